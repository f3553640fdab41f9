//! # Foodshare - Local Food Donation Dashboard
//!
//! Providers list surplus food, receivers claim it, administrators review
//! aggregate statistics.
//!
//! Foodshare provides:
//! - SQLite-backed storage with a parameterized query executor
//! - An in-memory filter engine over tabular results
//! - View controllers for the dashboard, browse, claim, admin and analysis flows
//! - An HTTP/JSON server and a terminal CLI over the same views

pub mod models;
pub mod storage;
pub mod filter;
pub mod views;
pub mod server;
pub mod config;
pub mod ui;

// Re-exports for convenient access
pub use models::{Claim, ClaimStatus, FoodListing, NewClaim, NewProvider, Provider, Receiver};
pub use storage::{SqliteStore, Table, TableName, Cell};
pub use filter::{FilterSet, Filters, Selection};

/// Result type alias for Foodshare operations
pub type Result<T> = std::result::Result<T, Error>;

/// Error types for Foodshare operations
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("Database not found: {}", .0.display())]
    DatabaseNotFound(std::path::PathBuf),

    #[error("Storage error: {0}")]
    Storage(#[from] rusqlite::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Validation failed: {0}")]
    Validation(#[from] ValidationError),

    #[error("Unknown column '{column}' (available: {available})")]
    UnknownColumn { column: String, available: String },

    #[error("Unknown table: {0}")]
    UnknownTable(String),

    #[error("Unknown analysis: {0}")]
    UnknownAnalysis(String),

    #[error("Invalid claim status: {0}")]
    InvalidStatus(String),
}

/// Pre-insert validation failures
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    #[error("field '{0}' must not be empty")]
    EmptyField(&'static str),

    #[error("receiver {0} does not exist")]
    UnknownReceiver(i64),

    #[error("food listing {0} does not exist")]
    UnknownFood(i64),
}
