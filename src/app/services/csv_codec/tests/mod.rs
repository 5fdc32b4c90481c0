//! Test fixtures shared by the CSV codec test modules

use crate::app::models::{ColumnDescriptor, Record, Value};


/// The `Name` / `Age` column pair used across scenarios
pub fn name_age_columns() -> Vec<ColumnDescriptor> {
    vec![
        ColumnDescriptor::new("name", "Name"),
        ColumnDescriptor::new("age", "Age"),
    ]
}

/// Two people, one with a quote in the name and a missing age
pub fn name_age_records() -> Vec<Record> {
    vec![
        Record::new().with("name", "Ann").with("age", 5),
        Record::new().with("name", "B\"ob").with("age", Value::Null),
    ]
}

/// A member roster mixing every scalar type
pub fn roster_columns() -> Vec<ColumnDescriptor> {
    vec![
        ColumnDescriptor::new("name", "Name"),
        ColumnDescriptor::new("role", "Role"),
        ColumnDescriptor::new("age", "Age"),
        ColumnDescriptor::new("is_active", "Active"),
        ColumnDescriptor::new("start_date", "Start Date"),
        ColumnDescriptor::new("balance", "Balance"),
    ]
}

pub fn roster_records() -> Vec<Record> {
    vec![
        Record::new()
            .with("name", "Salma, Jr.")
            .with("role", "Coordinator")
            .with("age", 34)
            .with("is_active", true)
            .with("start_date", "2021-09-01")
            .with("balance", 12.5),
        Record::new()
            .with("name", "Youssef \"Jo\"")
            .with("role", "Animateur")
            .with("age", 19)
            .with("is_active", false)
            .with("start_date", "2023-01-15")
            .with("balance", -3.0),
        Record::new()
            .with("name", "Nadia")
            .with("role", "Volunteer")
            .with("age", 27)
            .with("is_active", true)
            .with("start_date", "2024-06-30")
            .with("balance", 0.25),
    ]
}
