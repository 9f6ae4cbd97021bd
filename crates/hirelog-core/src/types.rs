//! Types module - data models for hirelog
//!
//! One model per store. `works.username` and `candidates.username` are soft
//! references to `users.username`: the stores live in separate files, so the
//! relationship is enforced by application code, never by the database.

use std::fmt;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Identifies one of the three stores
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StoreKind {
    Users,
    Works,
    Candidates,
}

impl StoreKind {
    /// File name of the store inside the store root
    pub fn file_name(&self) -> &'static str {
        match self {
            StoreKind::Users => "users.db",
            StoreKind::Works => "works.db",
            StoreKind::Candidates => "candidates.db",
        }
    }
}

impl fmt::Display for StoreKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            StoreKind::Users => "users",
            StoreKind::Works => "works",
            StoreKind::Candidates => "candidates",
        };
        write!(f, "{}", name)
    }
}

/// Account record
///
/// `password` is stored as given; hashing is the caller's concern.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct User {
    pub id: i64,
    pub username: String,
    pub password: String,
}

/// Work record
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Work {
    pub id: i64,
    pub information: String,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    /// Duration in hours
    pub time_duration: i64,
    pub collaborators: i64,
    /// Soft reference to `users.username`
    pub username: String,
}

/// Candidate record
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Candidate {
    pub id: i64,
    pub last_name: Option<String>,
    pub first_name: Option<String>,
    pub age: Option<i64>,
    pub profession: Option<String>,
    pub email: Option<String>,
    pub module: Option<i64>,
    /// Soft reference to `users.username`
    pub username: Option<String>,
}
