//! Teacher roster access.
//!
//! The sanction pipeline only ever sees the roster through [`TeacherRoster`]:
//! look a teacher up, add one, remove one. The database connection implements
//! it directly. Removing a teacher never touches existing sanction lines.

use crate::{
    config::TeacherConfig,
    entities::{Teacher, teacher},
    errors::{Error, Result},
};
use sea_orm::{QueryOrder, Set, prelude::*};
use tracing::{debug, info};

/// A teacher to add to the roster
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewTeacher {
    /// Application identifier, must be unique
    pub app_id: String,
    /// Display name
    pub name: String,
    /// Designation text including the rate keyword
    pub designation: String,
    /// Secondary identity code
    pub nic_pin: String,
}

impl From<&TeacherConfig> for NewTeacher {
    fn from(config: &TeacherConfig) -> Self {
        Self {
            app_id: config.app_id.clone(),
            name: config.name.clone(),
            designation: config.designation.clone(),
            nic_pin: config.nic_pin.clone(),
        }
    }
}

/// Repository of teachers keyed by application ID.
#[allow(async_fn_in_trait)]
pub trait TeacherRoster {
    /// Looks up a teacher, returning `None` when the ID is unknown.
    async fn find_teacher(&self, app_id: &str) -> Result<Option<teacher::Model>>;

    /// Adds a teacher; fails with `Error::Validation` if the ID is taken or a field is blank.
    async fn insert_teacher(&self, new_teacher: NewTeacher) -> Result<teacher::Model>;

    /// Removes a teacher; fails with `Error::TeacherNotFound` if the ID is unknown.
    async fn delete_teacher(&self, app_id: &str) -> Result<()>;
}

impl TeacherRoster for DatabaseConnection {
    async fn find_teacher(&self, app_id: &str) -> Result<Option<teacher::Model>> {
        Teacher::find()
            .filter(teacher::Column::AppId.eq(app_id))
            .one(self)
            .await
            .map_err(Into::into)
    }

    async fn insert_teacher(&self, new_teacher: NewTeacher) -> Result<teacher::Model> {
        let app_id = new_teacher.app_id.trim().to_string();
        if app_id.is_empty() {
            return Err(Error::validation("Application ID cannot be empty"));
        }
        if new_teacher.name.trim().is_empty() {
            return Err(Error::validation("Teacher name cannot be empty"));
        }
        if self.find_teacher(&app_id).await?.is_some() {
            return Err(Error::validation(format!(
                "Teacher with application ID {app_id} already exists"
            )));
        }

        let model = teacher::ActiveModel {
            app_id: Set(app_id),
            name: Set(new_teacher.name.trim().to_string()),
            designation: Set(new_teacher.designation.trim().to_string()),
            nic_pin: Set(new_teacher.nic_pin.trim().to_string()),
            ..Default::default()
        };

        let result = model.insert(self).await?;
        debug!("Added teacher {} ({})", result.name, result.app_id);
        Ok(result)
    }

    async fn delete_teacher(&self, app_id: &str) -> Result<()> {
        let result = Teacher::delete_many()
            .filter(teacher::Column::AppId.eq(app_id))
            .exec(self)
            .await?;

        if result.rows_affected == 0 {
            return Err(Error::TeacherNotFound {
                app_id: app_id.to_string(),
            });
        }
        info!("Removed teacher {} from the roster", app_id);
        Ok(())
    }
}

/// Retrieves the whole roster ordered by application ID, for selection screens.
pub async fn list_teachers(db: &DatabaseConnection) -> Result<Vec<teacher::Model>> {
    Teacher::find()
        .order_by_asc(teacher::Column::AppId)
        .all(db)
        .await
        .map_err(Into::into)
}

/// Inserts every configured teacher whose application ID is not on the roster yet.
///
/// Returns the number of teachers added.
pub async fn seed_teachers(db: &DatabaseConnection, teachers: &[TeacherConfig]) -> Result<usize> {
    info!(
        "Starting to seed teachers. Found {} entries in configuration.",
        teachers.len()
    );
    let mut added = 0;
    for entry in teachers {
        if db.find_teacher(&entry.app_id).await?.is_some() {
            debug!("Teacher {} already present. Skipping.", entry.app_id);
            continue;
        }
        db.insert_teacher(NewTeacher::from(entry)).await?;
        added += 1;
    }
    info!("Seeded {} new teachers.", added);
    Ok(added)
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    use super::*;
    use crate::test_utils::*;

    #[tokio::test]
    async fn test_insert_and_find_teacher() -> Result<()> {
        let db = setup_test_db().await?;
        let created = db
            .insert_teacher(new_teacher("2017090786", "DEEPA", "TGT MATH"))
            .await?;

        let found = db.find_teacher("2017090786").await?.unwrap();
        assert_eq!(found, created);
        assert_eq!(found.designation, "TGT MATH");

        assert!(db.find_teacher("0000000000").await?.is_none());
        Ok(())
    }

    #[tokio::test]
    async fn test_insert_duplicate_rejected() -> Result<()> {
        let db = setup_test_db().await?;
        db.insert_teacher(new_teacher("2017090786", "DEEPA", "TGT MATH"))
            .await?;

        let result = db
            .insert_teacher(new_teacher("2017090786", "SOMEONE ELSE", "TGT HINDI"))
            .await;
        assert!(matches!(result, Err(Error::Validation { .. })));
        Ok(())
    }

    #[tokio::test]
    async fn test_insert_blank_fields_rejected() -> Result<()> {
        let db = setup_test_db().await?;
        let result = db.insert_teacher(new_teacher("  ", "DEEPA", "TGT MATH")).await;
        assert!(matches!(result, Err(Error::Validation { .. })));

        let result = db.insert_teacher(new_teacher("2017090786", "", "TGT MATH")).await;
        assert!(matches!(result, Err(Error::Validation { .. })));
        Ok(())
    }

    #[tokio::test]
    async fn test_delete_teacher() -> Result<()> {
        let db = setup_test_db().await?;
        db.insert_teacher(new_teacher("2017090786", "DEEPA", "TGT MATH"))
            .await?;

        db.delete_teacher("2017090786").await?;
        assert!(db.find_teacher("2017090786").await?.is_none());

        let again = db.delete_teacher("2017090786").await;
        assert!(matches!(again, Err(Error::TeacherNotFound { app_id }) if app_id == "2017090786"));
        Ok(())
    }

    #[tokio::test]
    async fn test_seed_teachers_skips_existing() -> Result<()> {
        let db = setup_test_db().await?;
        let roster = sample_roster();

        let first = seed_teachers(&db, &roster).await?;
        assert_eq!(first, roster.len());

        let second = seed_teachers(&db, &roster).await?;
        assert_eq!(second, 0);

        let teachers = list_teachers(&db).await?;
        assert_eq!(teachers.len(), roster.len());
        assert!(teachers.windows(2).all(|w| w[0].app_id <= w[1].app_id));
        Ok(())
    }
}
