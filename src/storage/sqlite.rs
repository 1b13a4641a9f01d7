/// SQLite implementation of the goal storage interface
///
/// This module provides the concrete SQLite implementation for storing and
/// retrieving goal data. It handles all SQL queries and data conversion.

use std::path::PathBuf;

use chrono::{NaiveDate, Utc};
use rusqlite::{params, Connection};

use crate::domain::{Cadence, Goal, GoalId, OwnerId};
use crate::storage::{migrations, GoalStore, StorageError};

/// SQLite-based storage implementation
///
/// This struct holds a connection to the SQLite database and implements all
/// the storage operations defined in the GoalStore trait.
pub struct SqliteStorage {
    conn: Connection,
}

impl SqliteStorage {
    /// Create a new SQLite storage instance
    ///
    /// This opens the database file and runs any necessary migrations
    /// to ensure the schema is up to date.
    pub fn new(db_path: PathBuf) -> Result<Self, StorageError> {
        // Open the SQLite database
        let conn = Connection::open(&db_path)
            .map_err(|e| StorageError::Connection(format!("Failed to open database: {}", e)))?;

        // Enable foreign key constraints
        conn.execute("PRAGMA foreign_keys = ON", [])
            .map_err(|e| StorageError::Connection(format!("Failed to enable foreign keys: {}", e)))?;

        // Initialize/migrate the database schema
        migrations::initialize_database(&conn)?;

        tracing::info!("SQLite storage initialized at: {:?}", db_path);

        Ok(Self { conn })
    }

    /// Verify that a goal exists and belongs to the given owner
    fn assert_owned(&self, owner: &OwnerId, goal_id: &GoalId) -> Result<(), StorageError> {
        let result = self.conn.query_row(
            "SELECT 1 FROM goals WHERE id = ?1 AND owner_id = ?2",
            params![goal_id.to_string(), owner.as_str()],
            |_| Ok(()),
        );

        match result {
            Ok(()) => Ok(()),
            Err(rusqlite::Error::QueryReturnedNoRows) => Err(StorageError::GoalNotFound {
                goal_id: goal_id.to_string(),
            }),
            Err(e) => Err(e.into()),
        }
    }

    /// Load the completion days for a goal, oldest first
    fn load_completions(&self, goal_id: &GoalId) -> Result<Vec<NaiveDate>, StorageError> {
        let mut stmt = self.conn.prepare(
            "SELECT completed_on FROM goal_completions
             WHERE goal_id = ?1 ORDER BY completed_on",
        )?;

        let days = stmt
            .query_map(params![goal_id.to_string()], |row| row.get::<_, NaiveDate>(0))?
            .collect::<Result<Vec<_>, _>>()?;

        Ok(days)
    }
}

/// Convert a goals table row into a Goal with an empty completion list
///
/// Completions live in their own table and are loaded separately.
fn row_to_goal(row: &rusqlite::Row<'_>) -> rusqlite::Result<Goal> {
    let id_str: String = row.get(0)?;
    let id = GoalId::from_string(&id_str).map_err(|_| {
        rusqlite::Error::InvalidColumnType(0, "Invalid UUID".to_string(), rusqlite::types::Type::Text)
    })?;

    let owner: String = row.get(1)?;

    let cadence_str: String = row.get(3)?;
    let cadence = Cadence::parse(&cadence_str).map_err(|_| {
        rusqlite::Error::InvalidColumnType(3, "Invalid cadence".to_string(), rusqlite::types::Type::Text)
    })?;

    let start_date: NaiveDate = row.get(4)?;

    let created_at_str: String = row.get(5)?;
    let created_at = chrono::DateTime::parse_from_rfc3339(&created_at_str)
        .map_err(|_| {
            rusqlite::Error::InvalidColumnType(5, "Invalid datetime".to_string(), rusqlite::types::Type::Text)
        })?
        .with_timezone(&chrono::Utc);

    Ok(Goal::from_existing(
        id,
        OwnerId::new(owner),
        row.get(2)?, // name
        cadence,
        start_date,
        Vec::new(),
        created_at,
    ))
}

impl GoalStore for SqliteStorage {
    /// Create a new goal in the database
    fn create_goal(&self, goal: &Goal) -> Result<(), StorageError> {
        self.conn.execute(
            "INSERT INTO goals (id, owner_id, name, cadence, start_date, created_at)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
            params![
                goal.id.to_string(),
                goal.owner_id.as_str(),
                goal.name,
                goal.cadence.as_str(),
                goal.start_date,
                goal.created_at.to_rfc3339(),
            ],
        )?;

        // A freshly created goal has no completions, but restoring one from a
        // snapshot may carry them
        for &day in &goal.completions {
            self.conn.execute(
                "INSERT OR IGNORE INTO goal_completions (goal_id, completed_on, logged_at)
                 VALUES (?1, ?2, ?3)",
                params![goal.id.to_string(), day, Utc::now().to_rfc3339()],
            )?;
        }

        tracing::debug!("Created goal: {} ({})", goal.name, goal.id);
        Ok(())
    }

    /// Get one of the owner's goals by its ID
    fn get_goal(&self, owner: &OwnerId, goal_id: &GoalId) -> Result<Goal, StorageError> {
        let mut stmt = self.conn.prepare(
            "SELECT id, owner_id, name, cadence, start_date, created_at
             FROM goals WHERE id = ?1 AND owner_id = ?2",
        )?;

        let result = stmt.query_row(params![goal_id.to_string(), owner.as_str()], row_to_goal);

        match result {
            Ok(mut goal) => {
                goal.completions = self.load_completions(goal_id)?;
                Ok(goal)
            }
            Err(rusqlite::Error::QueryReturnedNoRows) => Err(StorageError::GoalNotFound {
                goal_id: goal_id.to_string(),
            }),
            Err(e) => Err(e.into()),
        }
    }

    /// Update a goal's editable fields
    fn update_goal(&self, goal: &Goal) -> Result<(), StorageError> {
        let affected = self.conn.execute(
            "UPDATE goals SET name = ?1, cadence = ?2, start_date = ?3
             WHERE id = ?4 AND owner_id = ?5",
            params![
                goal.name,
                goal.cadence.as_str(),
                goal.start_date,
                goal.id.to_string(),
                goal.owner_id.as_str(),
            ],
        )?;

        if affected == 0 {
            return Err(StorageError::GoalNotFound {
                goal_id: goal.id.to_string(),
            });
        }

        tracing::debug!("Updated goal: {} ({})", goal.name, goal.id);
        Ok(())
    }

    /// Delete a goal and its entire completion history
    fn delete_goal(&self, owner: &OwnerId, goal_id: &GoalId) -> Result<(), StorageError> {
        self.assert_owned(owner, goal_id)?;

        // Completion rows go first to satisfy the foreign key constraint
        self.conn.execute(
            "DELETE FROM goal_completions WHERE goal_id = ?1",
            params![goal_id.to_string()],
        )?;
        self.conn.execute(
            "DELETE FROM goals WHERE id = ?1 AND owner_id = ?2",
            params![goal_id.to_string(), owner.as_str()],
        )?;

        tracing::debug!("Deleted goal {} and its completion history", goal_id);
        Ok(())
    }

    /// Snapshot of all the owner's goals, oldest start date first
    fn list_goals(&self, owner: &OwnerId) -> Result<Vec<Goal>, StorageError> {
        let mut stmt = self.conn.prepare(
            "SELECT id, owner_id, name, cadence, start_date, created_at
             FROM goals WHERE owner_id = ?1 ORDER BY start_date, created_at",
        )?;

        let mut goals = stmt
            .query_map(params![owner.as_str()], row_to_goal)?
            .collect::<Result<Vec<_>, _>>()?;

        for goal in &mut goals {
            goal.completions = self.load_completions(&goal.id)?;
        }

        Ok(goals)
    }

    /// Persist the completion state of a single (goal, day) pair
    fn set_completion(
        &self,
        owner: &OwnerId,
        goal_id: &GoalId,
        day: NaiveDate,
        completed: bool,
    ) -> Result<(), StorageError> {
        self.assert_owned(owner, goal_id)?;

        if completed {
            self.conn.execute(
                "INSERT OR IGNORE INTO goal_completions (goal_id, completed_on, logged_at)
                 VALUES (?1, ?2, ?3)",
                params![goal_id.to_string(), day, Utc::now().to_rfc3339()],
            )?;
        } else {
            self.conn.execute(
                "DELETE FROM goal_completions WHERE goal_id = ?1 AND completed_on = ?2",
                params![goal_id.to_string(), day],
            )?;
        }

        tracing::debug!(goal_id = %goal_id, %day, completed, "Set completion state");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::Cadence;
    use tempfile::tempdir;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn open_storage(dir: &tempfile::TempDir) -> SqliteStorage {
        SqliteStorage::new(dir.path().join("test.db")).unwrap()
    }

    fn sample_goal(owner: &str) -> Goal {
        Goal::new(
            OwnerId::new(owner),
            "Stretch".to_string(),
            Cadence::Daily,
            date(2024, 1, 1),
        )
        .unwrap()
    }

    #[test]
    fn test_create_and_get_round_trip() {
        let dir = tempdir().unwrap();
        let storage = open_storage(&dir);
        let owner = OwnerId::new("user-1");

        let goal = sample_goal("user-1");
        storage.create_goal(&goal).unwrap();

        let loaded = storage.get_goal(&owner, &goal.id).unwrap();
        assert_eq!(loaded.name, "Stretch");
        assert_eq!(loaded.cadence, Cadence::Daily);
        assert_eq!(loaded.start_date, date(2024, 1, 1));
        assert!(loaded.completions.is_empty());
    }

    #[test]
    fn test_owner_scoping() {
        let dir = tempdir().unwrap();
        let storage = open_storage(&dir);

        let goal = sample_goal("user-1");
        storage.create_goal(&goal).unwrap();

        let stranger = OwnerId::new("user-2");
        assert!(matches!(
            storage.get_goal(&stranger, &goal.id),
            Err(StorageError::GoalNotFound { .. })
        ));
        assert!(storage.delete_goal(&stranger, &goal.id).is_err());
        assert!(storage.list_goals(&stranger).unwrap().is_empty());
    }

    #[test]
    fn test_set_completion_is_idempotent() {
        let dir = tempdir().unwrap();
        let storage = open_storage(&dir);
        let owner = OwnerId::new("user-1");

        let goal = sample_goal("user-1");
        storage.create_goal(&goal).unwrap();

        let day = date(2024, 1, 5);
        storage.set_completion(&owner, &goal.id, day, true).unwrap();
        storage.set_completion(&owner, &goal.id, day, true).unwrap();
        assert_eq!(storage.get_goal(&owner, &goal.id).unwrap().completions, vec![day]);

        storage.set_completion(&owner, &goal.id, day, false).unwrap();
        storage.set_completion(&owner, &goal.id, day, false).unwrap();
        assert!(storage.get_goal(&owner, &goal.id).unwrap().completions.is_empty());
    }

    #[test]
    fn test_delete_discards_history() {
        let dir = tempdir().unwrap();
        let storage = open_storage(&dir);
        let owner = OwnerId::new("user-1");

        let goal = sample_goal("user-1");
        storage.create_goal(&goal).unwrap();
        storage
            .set_completion(&owner, &goal.id, date(2024, 1, 5), true)
            .unwrap();

        storage.delete_goal(&owner, &goal.id).unwrap();
        assert!(storage.get_goal(&owner, &goal.id).is_err());

        // No orphaned completion rows remain
        let count: i32 = storage
            .conn
            .query_row("SELECT COUNT(*) FROM goal_completions", [], |row| row.get(0))
            .unwrap();
        assert_eq!(count, 0);
    }

    #[test]
    fn test_update_goal_fields() {
        let dir = tempdir().unwrap();
        let storage = open_storage(&dir);
        let owner = OwnerId::new("user-1");

        let mut goal = sample_goal("user-1");
        storage.create_goal(&goal).unwrap();

        goal.update(Some("Stretch more".to_string()), Some(Cadence::Weekly), None)
            .unwrap();
        storage.update_goal(&goal).unwrap();

        let loaded = storage.get_goal(&owner, &goal.id).unwrap();
        assert_eq!(loaded.name, "Stretch more");
        assert_eq!(loaded.cadence, Cadence::Weekly);
    }

    #[test]
    fn test_list_goals_sorted_by_start_date() {
        let dir = tempdir().unwrap();
        let storage = open_storage(&dir);
        let owner = OwnerId::new("user-1");

        let mut later = sample_goal("user-1");
        later.start_date = date(2024, 3, 1);
        let earlier = sample_goal("user-1");

        storage.create_goal(&later).unwrap();
        storage.create_goal(&earlier).unwrap();

        let goals = storage.list_goals(&owner).unwrap();
        assert_eq!(goals.len(), 2);
        assert_eq!(goals[0].id, earlier.id);
        assert_eq!(goals[1].id, later.id);
    }
}
