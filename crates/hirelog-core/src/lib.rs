//! hirelog Core Library
//!
//! This crate provides the database layer for the hirelog recruitment
//! tracker: bootstrapping of the three SQLite stores (users, works,
//! candidates), typed row operations, and explicit teardown. It is
//! UI-agnostic and can be used from any frontend (CLI, web, etc.)

pub mod db;
pub mod error;
pub mod types;

// Re-exports for convenience
pub use db::{data_dir_root, CandidatesDb, Store, Stores, UsersDb, WorksDb, DEFAULT_ROOT};
pub use error::{Error, Result};
pub use types::*;
