//! Error handling for hirelog

use std::path::PathBuf;

use thiserror::Error;

use crate::types::StoreKind;

#[derive(Debug, Error)]
pub enum Error {
    #[error("failed to create store directory {path:?}: {source}")]
    CreateDir {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to open {store} store: {source}")]
    Open {
        store: StoreKind,
        #[source]
        source: rusqlite::Error,
    },

    #[error("failed to create {store} schema: {source}")]
    Schema {
        store: StoreKind,
        #[source]
        source: rusqlite::Error,
    },

    #[error("{store} store failed liveness check: {source}")]
    Ping {
        store: StoreKind,
        #[source]
        source: rusqlite::Error,
    },

    #[error("{store} store is closed")]
    Closed { store: StoreKind },

    #[error("database error: {0}")]
    Database(String),

    #[error("SQLite error: {0}")]
    Sqlite(#[from] rusqlite::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, Error>;
