//! In-memory organisation content repository

use async_trait::async_trait;
use chrono::Utc;
use tokio::sync::RwLock;
use tracing::debug;

use super::{NewOrgContent, OrgContentRepository, OrgContentUpdate};
use crate::Result;
use crate::app::models::OrgContent;

/// Repository backed by a vector behind an async lock
#[derive(Debug, Default)]
pub struct InMemoryOrgContentRepository {
    items: RwLock<Vec<OrgContent>>,
}

impl InMemoryOrgContentRepository {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_items(items: Vec<OrgContent>) -> Self {
        Self {
            items: RwLock::new(items),
        }
    }

    /// Seeded with the organisation's default presentation
    pub fn with_default_content() -> Self {
        let now = Utc::now();
        Self::with_items(vec![OrgContent {
            id: 1,
            created_at: now,
            updated_at: now,
            title: "OGEC - Œuvre Générale pour l'Éducation et la Culture".to_string(),
            description: "Notre organisation se consacre à l'éducation et au développement \
                          culturel des enfants et des jeunes. Nous proposons diverses activités \
                          éducatives, culturelles et récréatives pour enrichir leur vie et \
                          favoriser leur épanouissement."
                .to_string(),
            video_url: Some("/home-video.mp4".to_string()),
            mission_statement: Some(
                "Offrir un environnement éducatif et culturel qui favorise le développement \
                 personnel et l'épanouissement des jeunes dans notre communauté."
                    .to_string(),
            ),
            vision: Some(
                "Devenir un pilier dans l'éducation et la culture, en formant des générations \
                 conscientes et actives dans la société."
                    .to_string(),
            ),
            history: Some(
                "Fondée en 2010, notre organisation a commencé avec un petit groupe de bénévoles \
                 dévoués. Aujourd'hui, nous sommes fiers de servir des centaines d'enfants \
                 chaque année."
                    .to_string(),
            ),
            is_active: true,
        }])
    }
}

#[async_trait]
impl OrgContentRepository for InMemoryOrgContentRepository {
    async fn list(&self) -> Result<Vec<OrgContent>> {
        Ok(self.items.read().await.clone())
    }

    async fn update(&self, id: i64, update: OrgContentUpdate) -> Result<Option<OrgContent>> {
        let mut items = self.items.write().await;
        let Some(item) = items.iter_mut().find(|item| item.id == id) else {
            debug!("No org content with id {}", id);
            return Ok(None);
        };

        update.apply_to(item);
        item.updated_at = Utc::now();
        debug!("Updated org content {}", id);
        Ok(Some(item.clone()))
    }

    async fn create(&self, content: NewOrgContent) -> Result<OrgContent> {
        let mut items = self.items.write().await;
        let id = items.iter().map(|item| item.id).max().unwrap_or(0).max(0) + 1;
        let now = Utc::now();

        let created = OrgContent {
            id,
            created_at: now,
            updated_at: now,
            title: content.title,
            description: content.description,
            video_url: content.video_url,
            mission_statement: content.mission_statement,
            vision: content.vision,
            history: content.history,
            is_active: content.is_active,
        };

        items.push(created.clone());
        debug!("Created org content {}", id);
        Ok(created)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn new_content(title: &str, is_active: bool) -> NewOrgContent {
        NewOrgContent {
            title: title.to_string(),
            description: "desc".to_string(),
            video_url: None,
            mission_statement: None,
            vision: None,
            history: None,
            is_active,
        }
    }

    #[tokio::test]
    async fn test_default_content_is_active() {
        let repo = InMemoryOrgContentRepository::with_default_content();

        let active = repo.active().await.unwrap().unwrap();
        assert_eq!(active.id, 1);
        assert!(active.title.starts_with("OGEC"));
        assert_eq!(active.video_url.as_deref(), Some("/home-video.mp4"));
    }

    #[tokio::test]
    async fn test_create_assigns_next_id() {
        let repo = InMemoryOrgContentRepository::new();

        let first = repo.create(new_content("First", false)).await.unwrap();
        let second = repo.create(new_content("Second", true)).await.unwrap();

        assert_eq!(first.id, 1);
        assert_eq!(second.id, 2);
        assert_eq!(first.created_at, first.updated_at);
        assert_eq!(repo.list().await.unwrap().len(), 2);
    }

    #[tokio::test]
    async fn test_create_after_seed_continues_numbering() {
        let repo = InMemoryOrgContentRepository::with_default_content();
        let created = repo.create(new_content("Next", false)).await.unwrap();
        assert_eq!(created.id, 2);
    }

    #[tokio::test]
    async fn test_update_merges_present_fields() {
        let repo = InMemoryOrgContentRepository::with_default_content();
        let before = repo.list().await.unwrap().remove(0);

        let updated = repo
            .update(
                1,
                OrgContentUpdate {
                    vision: Some(Some("New vision".to_string())),
                    ..Default::default()
                },
            )
            .await
            .unwrap()
            .unwrap();

        assert_eq!(updated.vision.as_deref(), Some("New vision"));
        assert_eq!(updated.title, before.title);
        assert_eq!(updated.mission_statement, before.mission_statement);
        assert!(updated.updated_at >= before.updated_at);
        assert_eq!(repo.list().await.unwrap()[0], updated);
    }

    #[tokio::test]
    async fn test_update_clears_optional_fields() {
        let repo = InMemoryOrgContentRepository::with_default_content();
        let before = repo.list().await.unwrap().remove(0);
        assert!(before.history.is_some());

        let update: OrgContentUpdate =
            serde_json::from_str(r#"{"history": null, "vision": "Grandir ensemble"}"#).unwrap();
        assert_eq!(update.history, Some(None));
        assert_eq!(update.mission_statement, None);

        let updated = repo.update(1, update).await.unwrap().unwrap();

        assert_eq!(updated.history, None);
        assert_eq!(updated.vision.as_deref(), Some("Grandir ensemble"));
        assert_eq!(updated.mission_statement, before.mission_statement);
    }

    #[tokio::test]
    async fn test_update_unknown_id() {
        let repo = InMemoryOrgContentRepository::with_default_content();
        let result = repo.update(42, OrgContentUpdate::default()).await.unwrap();
        assert!(result.is_none());
    }

    #[tokio::test]
    async fn test_active_follows_updates() {
        let repo = InMemoryOrgContentRepository::with_default_content();
        repo.create(new_content("Replacement", true)).await.unwrap();
        repo.update(
            1,
            OrgContentUpdate {
                is_active: Some(false),
                ..Default::default()
            },
        )
        .await
        .unwrap();

        let active = repo.active().await.unwrap().unwrap();
        assert_eq!(active.title, "Replacement");
    }

    #[test]
    fn test_empty_update() {
        assert!(OrgContentUpdate::default().is_empty());
        assert!(
            !OrgContentUpdate {
                title: Some("x".to_string()),
                ..Default::default()
            }
            .is_empty()
        );
    }
}
