/// Public library interface for the TripTailor goals MCP server
///
/// This module exports the main server implementation, the goal domain types,
/// the pure progress engine, and the storage layer so they can be used by
/// other applications or tests.

use std::path::PathBuf;

use thiserror::Error;

// Internal modules
mod domain;
mod mcp;
mod progress;
mod storage;
mod tools;

// Re-export public modules and types
pub use domain::*;
pub use progress::*;
pub use storage::{GoalStore, SqliteStorage, StorageError};

/// Errors that can occur during server operation
#[derive(Error, Debug)]
pub enum ServerError {
    #[error("Database error: {0}")]
    Database(#[from] storage::StorageError),

    #[error("Domain validation error: {0}")]
    Domain(#[from] domain::DomainError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON serialization error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Main goal tracker server that implements the MCP protocol
///
/// This server manages goal data through a SQLite database, scoped to a
/// single authenticated owner, and provides tools for creating goals,
/// toggling daily completions, and reading streak and progress statistics.
pub struct GoalTrackerServer {
    storage: SqliteStorage,
    owner: OwnerId,
}

impl GoalTrackerServer {
    /// Create a new goal tracker server bound to an owner
    ///
    /// This will initialize the SQLite database with the required schema
    /// if it doesn't already exist. The owner identifier is opaque; it is
    /// supplied by the identity collaborator and never interpreted.
    pub fn new(db_path: PathBuf, owner: OwnerId) -> Result<Self, ServerError> {
        tracing::info!("Initializing goal tracker with database: {:?}", db_path);

        let storage = SqliteStorage::new(db_path)?;

        Ok(Self { storage, owner })
    }

    /// Run the MCP server, handling JSON-RPC requests over stdin/stdout
    ///
    /// This method will block until the server is shut down or an error occurs.
    pub async fn run(self) -> Result<(), ServerError> {
        tracing::info!("Starting MCP server for owner '{}'...", self.owner);

        // Test database connectivity
        let goals = self.storage.list_goals(&self.owner)?;
        tracing::info!(
            "Server started successfully, found {} existing goals",
            goals.len()
        );

        // Create and run the MCP server
        let mut mcp_server = mcp::McpServer::new(self);
        mcp_server.run().await?;

        Ok(())
    }

    /// Get a reference to the storage layer (useful for testing)
    pub fn storage(&self) -> &SqliteStorage {
        &self.storage
    }

    /// Get the owner this server is bound to
    pub fn owner(&self) -> &OwnerId {
        &self.owner
    }
}
