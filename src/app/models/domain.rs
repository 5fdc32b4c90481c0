//! Typed dashboard entities
//!
//! These mirror the rows the dashboard manages. Optional attributes are
//! `Option` fields, so presence is checked through the type rather than by
//! probing for keys at runtime.

use super::{ColumnDescriptor, ColumnFormat, Record};
use crate::Result;
use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

/// An entity that can be exported as CSV rows
pub trait Exportable: Serialize {
    /// Default column layout for exports of this entity
    fn export_columns() -> Vec<ColumnDescriptor>;

    fn to_record(&self) -> Result<Record> {
        Record::from_serializable(self)
    }
}

/// Convert a slice of entities into export records
pub fn to_records<T: Exportable>(items: &[T]) -> Result<Vec<Record>> {
    items.iter().map(Exportable::to_record).collect()
}

/// An educational program offered by the organisation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Program {
    pub id: i64,
    pub title: String,
    pub description: String,
    pub status: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub capacity: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub details_url: Option<String>,
}

impl Program {
    pub fn has_image(&self) -> bool {
        self.image_url.as_deref().is_some_and(|url| !url.is_empty())
    }
}

impl Exportable for Program {
    fn export_columns() -> Vec<ColumnDescriptor> {
        vec![
            ColumnDescriptor::new("id", "ID"),
            ColumnDescriptor::new("title", "Title"),
            ColumnDescriptor::new("description", "Description"),
            ColumnDescriptor::new("status", "Status"),
            ColumnDescriptor::new("location", "Location"),
            ColumnDescriptor::new("capacity", "Capacity"),
            ColumnDescriptor::new("created_at", "Created").with_format(ColumnFormat::Date),
        ]
    }
}

/// A dated phase of a program
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Phase {
    pub id: i64,
    pub title: String,
    pub description: String,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub status: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Phase {
    /// Whether the phase covers the given day (bounds inclusive)
    pub fn is_running_on(&self, day: NaiveDate) -> bool {
        self.start_date <= day && day <= self.end_date
    }
}

impl Exportable for Phase {
    fn export_columns() -> Vec<ColumnDescriptor> {
        vec![
            ColumnDescriptor::new("title", "Title"),
            ColumnDescriptor::new("description", "Description"),
            ColumnDescriptor::new("start_date", "Start Date"),
            ColumnDescriptor::new("end_date", "End Date"),
            ColumnDescriptor::new("status", "Status"),
        ]
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Team {
    pub id: i64,
    pub name: String,
    pub description: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Exportable for Team {
    fn export_columns() -> Vec<ColumnDescriptor> {
        vec![
            ColumnDescriptor::new("id", "ID"),
            ColumnDescriptor::new("name", "Name"),
            ColumnDescriptor::new("description", "Description"),
        ]
    }
}

/// A staff member attached to a team
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Member {
    pub id: i64,
    pub team_id: i64,
    pub name: String,
    pub role: String,
    #[serde(default)]
    pub image_url: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Exportable for Member {
    fn export_columns() -> Vec<ColumnDescriptor> {
        vec![
            ColumnDescriptor::new("id", "ID"),
            ColumnDescriptor::new("team_id", "Team"),
            ColumnDescriptor::new("name", "Name"),
            ColumnDescriptor::new("role", "Role"),
        ]
    }
}

/// A child enrolled with the organisation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Enfant {
    pub id: i64,
    pub name: String,
    pub age: u32,
    pub date_of_birth: NaiveDate,
    pub address: String,
    pub phone_number: String,
    pub parent_name: String,
    pub parent_phone_number: String,
    #[serde(default)]
    pub image_url: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Exportable for Enfant {
    fn export_columns() -> Vec<ColumnDescriptor> {
        vec![
            ColumnDescriptor::new("name", "Name"),
            ColumnDescriptor::new("age", "Age"),
            ColumnDescriptor::new("date_of_birth", "Date of Birth"),
            ColumnDescriptor::new("address", "Address"),
            ColumnDescriptor::new("phone_number", "Phone").with_format(ColumnFormat::Text),
            ColumnDescriptor::new("parent_name", "Parent"),
            ColumnDescriptor::new("parent_phone_number", "Parent Phone")
                .with_format(ColumnFormat::Text),
        ]
    }
}

/// A payment recorded against a child
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Transaction {
    pub id: i64,
    pub enfant_id: i64,
    pub amount: f64,
    pub description: String,
    pub date: NaiveDate,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Exportable for Transaction {
    fn export_columns() -> Vec<ColumnDescriptor> {
        vec![
            ColumnDescriptor::new("enfant_id", "Child"),
            ColumnDescriptor::new("amount", "Amount"),
            ColumnDescriptor::new("description", "Description"),
            ColumnDescriptor::new("date", "Date"),
        ]
    }
}

/// The organisation's public-facing content block
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OrgContent {
    pub id: i64,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
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
    pub is_active: bool,
}

impl Exportable for OrgContent {
    fn export_columns() -> Vec<ColumnDescriptor> {
        vec![
            ColumnDescriptor::new("id", "ID"),
            ColumnDescriptor::new("title", "Title"),
            ColumnDescriptor::new("description", "Description"),
            ColumnDescriptor::new("mission_statement", "Mission"),
            ColumnDescriptor::new("vision", "Vision"),
            ColumnDescriptor::new("history", "History"),
            ColumnDescriptor::new("is_active", "Active"),
            ColumnDescriptor::new("updated_at", "Last Updated"),
        ]
    }
}
