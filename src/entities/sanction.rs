//! Sanction entity - The header row of an issued sanction order.
//!
//! `total_amount` is rewritten together with its display and words forms
//! whenever any line changes.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Sanction order header model
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "sanctions")]
pub struct Model {
    /// Order identifier, assigned on insert
    #[sea_orm(primary_key)]
    pub id: i64,
    /// Sum of all line amounts
    pub total_amount: i64,
    /// Total in regional digit grouping, e.g. `"12,34,567"`
    pub total_amount_display: String,
    /// Total in words, e.g. `"Fourteen Thousand Four Hundred And Fifty Only"`
    pub total_amount_words: String,
    /// Month label the order covers
    pub month: String,
    /// Date the order was issued
    pub issued_date: Date,
    /// Location of the rendered document, empty until rendered
    pub file_path: String,
}

/// Defines relationships between Sanction and other entities
#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    /// One order has many lines
    #[sea_orm(has_many = "super::sanction_teacher::Entity")]
    Lines,
}

impl Related<super::sanction_teacher::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Lines.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
