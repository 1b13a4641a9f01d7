/// Database migration management
///
/// This module handles creating and updating the SQLite database schema.
/// It ensures the database has all the required tables and indexes.

use rusqlite::Connection;

use crate::storage::StorageError;

/// Current database schema version
///
/// Increment this when you add new migrations
const CURRENT_VERSION: i32 = 1;

/// Initialize the database schema
///
/// This creates all required tables and indexes if they don't exist.
/// It also sets up the version tracking for future migrations.
pub fn initialize_database(conn: &Connection) -> Result<(), StorageError> {
    // Create version tracking table first
    conn.execute(
        "CREATE TABLE IF NOT EXISTS schema_version (
            version INTEGER PRIMARY KEY
        )",
        [],
    )?;

    // Check current version
    let current_version = get_current_version(conn)?;

    // Run migrations if needed
    if current_version < CURRENT_VERSION {
        run_migrations(conn, current_version)?;
        set_version(conn, CURRENT_VERSION)?;
    }

    Ok(())
}

/// Get the current database schema version
fn get_current_version(conn: &Connection) -> Result<i32, StorageError> {
    let version = conn
        .query_row("SELECT version FROM schema_version LIMIT 1", [], |row| {
            row.get::<_, i32>(0)
        })
        .unwrap_or(0); // Default to version 0 if no version record exists

    Ok(version)
}

/// Set the database schema version
fn set_version(conn: &Connection, version: i32) -> Result<(), StorageError> {
    conn.execute("DELETE FROM schema_version", [])?;
    conn.execute("INSERT INTO schema_version (version) VALUES (?1)", [version])?;
    Ok(())
}

/// Run database migrations from the current version to the latest
fn run_migrations(conn: &Connection, from_version: i32) -> Result<(), StorageError> {
    if from_version < 1 {
        migration_v1(conn)?;
    }

    // Future migrations would go here:
    // if from_version < 2 {
    //     migration_v2(conn)?;
    // }

    Ok(())
}

/// Migration to version 1: Create initial tables
///
/// This creates the core tables for goals and their completion days
fn migration_v1(conn: &Connection) -> Result<(), StorageError> {
    // Create goals table
    conn.execute(
        "CREATE TABLE IF NOT EXISTS goals (
            id TEXT PRIMARY KEY,
            owner_id TEXT NOT NULL,
            name TEXT NOT NULL,
            cadence TEXT NOT NULL,
            start_date TEXT NOT NULL,
            created_at TEXT NOT NULL
        )",
        [],
    )?;

    // Create goal_completions table; one row per (goal, calendar day)
    conn.execute(
        "CREATE TABLE IF NOT EXISTS goal_completions (
            goal_id TEXT NOT NULL,
            completed_on TEXT NOT NULL,
            logged_at TEXT NOT NULL,
            FOREIGN KEY (goal_id) REFERENCES goals (id)
        )",
        [],
    )?;

    // Create indexes for better query performance
    create_indexes_v1(conn)?;

    tracing::info!("Applied migration v1: Created initial database schema");
    Ok(())
}

/// Create database indexes for version 1
fn create_indexes_v1(conn: &Connection) -> Result<(), StorageError> {
    // Index for listing a user's goals (most common query)
    conn.execute(
        "CREATE INDEX IF NOT EXISTS idx_goals_owner
         ON goals (owner_id)",
        [],
    )?;

    // Index for finding completions by day (for aggregation)
    conn.execute(
        "CREATE INDEX IF NOT EXISTS idx_goal_completions_day
         ON goal_completions (completed_on)",
        [],
    )?;

    // Unique constraint: a goal is completed at most once per calendar day,
    // which makes the day-level toggle idempotent at the schema level
    conn.execute(
        "CREATE UNIQUE INDEX IF NOT EXISTS idx_goal_completions_unique
         ON goal_completions (goal_id, completed_on)",
        [],
    )?;

    tracing::info!("Created database indexes for v1");
    Ok(())
}
