//! Database configuration module.
//!
//! This module handles the `SQLite` connection and table creation using `SeaORM`.
//! Tables are generated from the entity definitions with
//! `Schema::create_table_from_entity`, so the schema always matches the Rust models.

use crate::entities::{Sanction, SanctionTeacher, Teacher};
use crate::errors::Result;
use sea_orm::{ConnectionTrait, Database, DatabaseConnection, Schema};
use std::path::Path;
use tracing::debug;

const DEFAULT_DATABASE_URL: &str = "sqlite://data/sanctions.sqlite?mode=rwc";

/// Gets the database URL from the `DATABASE_URL` environment variable or returns the
/// default local `SQLite` path.
#[must_use]
pub fn get_database_url() -> String {
    std::env::var("DATABASE_URL").unwrap_or_else(|_| DEFAULT_DATABASE_URL.to_string())
}

/// Establishes a connection to the database named by [`get_database_url`].
///
/// When the default file location is used its `data/` directory is created first.
pub async fn create_connection() -> Result<DatabaseConnection> {
    let database_url = get_database_url();
    if database_url == DEFAULT_DATABASE_URL {
        std::fs::create_dir_all(Path::new("data"))?;
    }
    debug!("Connecting to database at {}", database_url);

    Database::connect(&database_url).await.map_err(Into::into)
}

/// Creates the teachers, sanctions and sanction line tables if they do not exist yet.
pub async fn create_tables(db: &DatabaseConnection) -> Result<()> {
    let builder = db.get_database_backend();
    let schema = Schema::new(builder);

    let mut teacher_table = schema.create_table_from_entity(Teacher);
    let mut sanction_table = schema.create_table_from_entity(Sanction);
    let mut line_table = schema.create_table_from_entity(SanctionTeacher);

    teacher_table.if_not_exists();
    sanction_table.if_not_exists();
    line_table.if_not_exists();

    db.execute(builder.build(&teacher_table)).await?;
    db.execute(builder.build(&sanction_table)).await?;
    db.execute(builder.build(&line_table)).await?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entities::{SanctionModel, SanctionTeacherModel, TeacherModel};
    use sea_orm::{EntityTrait, QuerySelect};

    #[tokio::test]
    async fn test_create_tables() -> Result<()> {
        let db = Database::connect("sqlite::memory:").await?;
        create_tables(&db).await?;

        // Test that tables exist by querying them
        let _: Vec<TeacherModel> = Teacher::find().limit(1).all(&db).await?;
        let _: Vec<SanctionModel> = Sanction::find().limit(1).all(&db).await?;
        let _: Vec<SanctionTeacherModel> = SanctionTeacher::find().limit(1).all(&db).await?;

        Ok(())
    }

    #[tokio::test]
    async fn test_create_tables_twice_is_harmless() -> Result<()> {
        let db = Database::connect("sqlite::memory:").await?;
        create_tables(&db).await?;
        create_tables(&db).await?;
        Ok(())
    }
}
