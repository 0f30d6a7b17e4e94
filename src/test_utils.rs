//! Shared test utilities.
//!
//! This module provides common helper functions for setting up test databases
//! and building roster entries and orders with sensible defaults.

use crate::{
    config::TeacherConfig,
    core::{
        amount::FormattedAmount,
        roster::{NewTeacher, seed_teachers},
        sanction::{SanctionLine, SanctionOrder},
    },
    errors::Result,
};
use chrono::NaiveDate;
use sea_orm::DatabaseConnection;

/// Lecturer on the sample roster
pub const LECTURER_ID: &str = "2013051618";
/// TGT on the sample roster
pub const TGT_ID: &str = "2017090786";
/// Second TGT on the sample roster
pub const OTHER_ID: &str = "2014082977";
/// Sample roster entry whose designation matches no rate tier
pub const PRINCIPAL_ID: &str = "2019000001";

/// Creates an in-memory `SQLite` database with all tables initialized.
/// This is the standard setup for all integration tests.
pub async fn setup_test_db() -> Result<DatabaseConnection> {
    let db = sea_orm::Database::connect("sqlite::memory:").await?;
    crate::config::database::create_tables(&db).await?;
    Ok(db)
}

/// Sets up a test database seeded with [`sample_roster`].
pub async fn setup_with_roster() -> Result<DatabaseConnection> {
    let db = setup_test_db().await?;
    seed_teachers(&db, &sample_roster()).await?;
    Ok(db)
}

/// Four teachers: a lecturer, two TGTs and one unrecognized designation.
pub fn sample_roster() -> Vec<TeacherConfig> {
    [
        (LECTURER_ID, "RASHMI SHARMA", "LECTURER ENGLISH", "81517653"),
        (TGT_ID, "DEEPA", "TGT MATH", "76623091"),
        (OTHER_ID, "POONAM RANI", "TGT HINDI", "41725605"),
        (PRINCIPAL_ID, "S. K. VERMA", "PRINCIPAL", "10000001"),
    ]
    .into_iter()
    .map(|(app_id, name, designation, nic_pin)| TeacherConfig {
        app_id: app_id.to_string(),
        name: name.to_string(),
        designation: designation.to_string(),
        nic_pin: nic_pin.to_string(),
    })
    .collect()
}

/// A roster entry with a fixed secondary code.
pub fn new_teacher(app_id: &str, name: &str, designation: &str) -> NewTeacher {
    NewTeacher {
        app_id: app_id.to_string(),
        name: name.to_string(),
        designation: designation.to_string(),
        nic_pin: "12345678".to_string(),
    }
}

/// Issue date used across tests (31 March 2025).
pub fn issue_date() -> NaiveDate {
    NaiveDate::from_ymd_opt(2025, 3, 31).unwrap_or_default()
}

/// An unsaved March order: the lecturer and the first TGT, ten days each.
pub fn sample_order() -> SanctionOrder {
    let lines = vec![
        SanctionLine {
            app_id: LECTURER_ID.to_string(),
            name: "RASHMI SHARMA".to_string(),
            designation: "LECTURER ENGLISH".to_string(),
            nic_pin: "81517653".to_string(),
            days: 10,
            amount: 14450,
        },
        SanctionLine {
            app_id: TGT_ID.to_string(),
            name: "DEEPA".to_string(),
            designation: "TGT MATH".to_string(),
            nic_pin: "76623091".to_string(),
            days: 10,
            amount: 14030,
        },
    ];
    SanctionOrder {
        id: None,
        month: "March".to_string(),
        issued_date: issue_date(),
        total: FormattedAmount::new(14450 + 14030),
        lines,
        file_path: None,
    }
}
