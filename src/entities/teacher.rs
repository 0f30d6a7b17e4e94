//! Teacher entity - One guest teacher on the school roster.
//!
//! The `app_id` is the externally assigned application identifier and is what
//! sanction lines reference. Rows are inserted once and only ever deleted.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Teacher database model
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "teachers")]
pub struct Model {
    /// Surrogate key
    #[sea_orm(primary_key)]
    pub id: i64,
    /// Application identifier, unique across the roster
    #[sea_orm(unique)]
    pub app_id: String,
    /// Display name
    pub name: String,
    /// Free-text title containing the rate keyword (e.g. "LECTURER ENGLISH", "TGT MATH")
    pub designation: String,
    /// Secondary identity code
    pub nic_pin: String,
}

/// Lines reference teachers by `app_id` only; removing a teacher leaves its
/// historical lines in place.
#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
