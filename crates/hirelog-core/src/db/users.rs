//! Users store operations

use rusqlite::params;

use crate::db::Store;
use crate::error::Result;
use crate::types::User;

/// Users store operations
pub struct UsersDb;

impl UsersDb {
    /// Insert a user, returning the assigned row id
    ///
    /// Fails with a uniqueness violation if the username is taken.
    pub fn insert(db: &Store, user: &User) -> Result<i64> {
        db.with_conn(|conn| {
            conn.execute(
                "INSERT INTO users (username, password) VALUES (?1, ?2)",
                params![user.username, user.password],
            )?;
            Ok(conn.last_insert_rowid())
        })
    }

    /// Get a user by username
    pub fn get_by_username(db: &Store, username: &str) -> Result<Option<User>> {
        db.with_conn(|conn| {
            let result = conn.query_row(
                "SELECT id, username, password FROM users WHERE username = ?1",
                params![username],
                row_to_user,
            );

            match result {
                Ok(user) => Ok(Some(user)),
                Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
                Err(e) => Err(e),
            }
        })
    }

    /// Get all users ordered by id
    pub fn list(db: &Store) -> Result<Vec<User>> {
        db.with_conn(|conn| {
            let mut stmt = conn.prepare("SELECT id, username, password FROM users ORDER BY id")?;
            let users = stmt
                .query_map([], row_to_user)?
                .collect::<rusqlite::Result<Vec<_>>>()?;
            Ok(users)
        })
    }

    /// Get count of users
    pub fn count(db: &Store) -> Result<i64> {
        db.with_conn(|conn| conn.query_row("SELECT COUNT(*) FROM users", [], |row| row.get(0)))
    }
}

fn row_to_user(row: &rusqlite::Row) -> rusqlite::Result<User> {
    Ok(User {
        id: row.get(0)?,
        username: row.get(1)?,
        password: row.get(2)?,
    })
}
