//! Organisation content storage
//!
//! The dashboard edits a small set of content blocks describing the
//! organisation. Callers depend on [`OrgContentRepository`] and receive an
//! implementation explicitly; [`InMemoryOrgContentRepository`] stands in until
//! a REST backend exists.

pub mod memory;

use async_trait::async_trait;
use serde::{Deserialize, Deserializer, Serialize};

use crate::Result;
use crate::app::models::OrgContent;

pub use memory::InMemoryOrgContentRepository;

/// Fields for a new content block; ids and timestamps are assigned on create
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewOrgContent {
    pub title: String,
    pub description: String,
    #[serde(default)]
    pub video_url: Option<String>,
    #[serde(default)]
    pub mission_statement: Option<String>,
    #[serde(default)]
    pub vision: Option<String>,
    #[serde(default)]
    pub history: Option<String>,
    #[serde(default)]
    pub is_active: bool,
}

/// Partial update; `None` leaves the stored value untouched
///
/// Optional text fields take `Some(None)` to clear the stored value. In JSON
/// an absent key keeps the value and an explicit `null` clears it.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OrgContentUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none", deserialize_with = "present")]
    pub video_url: Option<Option<String>>,
    #[serde(skip_serializing_if = "Option::is_none", deserialize_with = "present")]
    pub mission_statement: Option<Option<String>>,
    #[serde(skip_serializing_if = "Option::is_none", deserialize_with = "present")]
    pub vision: Option<Option<String>>,
    #[serde(skip_serializing_if = "Option::is_none", deserialize_with = "present")]
    pub history: Option<Option<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_active: Option<bool>,
}

// Only called for keys that are present, so `null` becomes `Some(None)`
fn present<'de, D>(deserializer: D) -> std::result::Result<Option<Option<String>>, D::Error>
where
    D: Deserializer<'de>,
{
    Option::<String>::deserialize(deserializer).map(Some)
}

impl OrgContentUpdate {
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }

    /// Merge present fields into `content`
    pub fn apply_to(self, content: &mut OrgContent) {
        if let Some(title) = self.title {
            content.title = title;
        }
        if let Some(description) = self.description {
            content.description = description;
        }
        if let Some(video_url) = self.video_url {
            content.video_url = video_url;
        }
        if let Some(mission_statement) = self.mission_statement {
            content.mission_statement = mission_statement;
        }
        if let Some(vision) = self.vision {
            content.vision = vision;
        }
        if let Some(history) = self.history {
            content.history = history;
        }
        if let Some(is_active) = self.is_active {
            content.is_active = is_active;
        }
    }
}

/// Storage for organisation content blocks
#[async_trait]
pub trait OrgContentRepository: Send + Sync {
    /// Every stored block, in creation order
    async fn list(&self) -> Result<Vec<OrgContent>>;

    /// The first active block, if any
    async fn active(&self) -> Result<Option<OrgContent>> {
        Ok(self.list().await?.into_iter().find(|item| item.is_active))
    }

    /// Apply `update` to block `id`; `None` when no such block exists
    async fn update(&self, id: i64, update: OrgContentUpdate) -> Result<Option<OrgContent>>;

    /// Store a new block with the next free id
    async fn create(&self, content: NewOrgContent) -> Result<OrgContent>;
}
