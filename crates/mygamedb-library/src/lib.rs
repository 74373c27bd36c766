//! Game catalog storage for myGameDatabase
//!
//! Persists a personal video-game collection in a single SQLite table and
//! answers the lookups the menu needs: exact name, name prefix, platform and
//! content rating.

mod database;
mod game;

pub use database::{CatalogStore, Game};
pub use game::{GameField, Platform, Rating};

use thiserror::Error;

#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("Invalid table name: {0:?}")]
    InvalidTable(String),

    #[error("Unknown searchable field: {0:?}")]
    InvalidField(String),

    #[error("Unknown platform: {0:?}")]
    InvalidPlatform(String),

    #[error("Unknown rating: {0:?}")]
    InvalidRating(String),

    #[error("SQLite error: {0}")]
    Sqlite(#[from] rusqlite::Error),
}
