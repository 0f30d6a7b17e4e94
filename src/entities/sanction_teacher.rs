//! Sanction line entity - One teacher's days and amount within an order.
//!
//! The teacher's name, designation and code are copied onto the line when it is
//! created so the order can still be rendered after the teacher leaves the roster.
use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Sanction line database model
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "sanction_teachers")]
pub struct Model {
    /// Surrogate key, also the line's position within its order
    #[sea_orm(primary_key)]
    pub id: i64,
    /// Owning order
    pub sanction_id: i64,
    /// Referenced teacher's application ID
    pub app_id: String,
    /// Teacher name at time of issue
    pub teacher_name: String,
    /// Teacher designation at time of issue
    pub designation: String,
    /// Teacher secondary code at time of issue
    pub nic_pin: String,
    /// Worked days
    pub days: i32,
    /// Cached `days * rate`
    pub amount: i64,
}

/// Defines relationships between a line and other entities
#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    /// Each line belongs to one order
    #[sea_orm(
        belongs_to = "super::sanction::Entity",
        from = "Column::SanctionId",
        to = "super::sanction::Column::Id"
    )]
    Sanction,
}

impl Related<super::sanction::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Sanction.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
