//! Entity module - Contains all SeaORM entity definitions for the database.
//! These entities represent the database tables and their relationships.
//! Each entity has a Model struct for data and an Entity struct for operations.

pub mod sanction;
pub mod sanction_teacher;
pub mod teacher;

// Re-export specific types to avoid conflicts
pub use sanction::{Column as SanctionColumn, Entity as Sanction, Model as SanctionModel};
pub use sanction_teacher::{
    Column as SanctionTeacherColumn, Entity as SanctionTeacher, Model as SanctionTeacherModel,
};
pub use teacher::{Column as TeacherColumn, Entity as Teacher, Model as TeacherModel};
