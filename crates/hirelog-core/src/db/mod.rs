//! Database module - SQLite persistence layer
//!
//! Three independent store files, one table each. There is no cross-store
//! atomicity and no enforced relationship between the stores.

mod candidates;
mod connection;
mod users;
mod works;

pub use candidates::CandidatesDb;
pub use connection::{data_dir_root, Store, Stores, DEFAULT_ROOT};
pub use users::UsersDb;
pub use works::WorksDb;
