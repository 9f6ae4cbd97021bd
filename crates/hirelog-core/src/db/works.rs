//! Works store operations

use rusqlite::params;

use crate::db::Store;
use crate::error::Result;
use crate::types::Work;

/// Works store operations
pub struct WorksDb;

impl WorksDb {
    /// Insert a work record, returning the assigned row id
    ///
    /// All fields are required by the schema. `username` is a soft reference
    /// to the users store; nothing here checks it exists.
    pub fn insert(db: &Store, work: &Work) -> Result<i64> {
        db.with_conn(|conn| {
            conn.execute(
                r#"
                INSERT INTO works
                (information, start_date, end_date, time_duration, collaborators, username)
                VALUES (?1, ?2, ?3, ?4, ?5, ?6)
                "#,
                params![
                    work.information,
                    work.start_date,
                    work.end_date,
                    work.time_duration,
                    work.collaborators,
                    work.username,
                ],
            )?;
            Ok(conn.last_insert_rowid())
        })
    }

    /// Get all work records for a username, most recent first
    pub fn list_for_user(db: &Store, username: &str) -> Result<Vec<Work>> {
        db.with_conn(|conn| {
            let mut stmt = conn.prepare(
                r#"
                SELECT id, information, start_date, end_date, time_duration, collaborators, username
                FROM works
                WHERE username = ?1
                ORDER BY start_date DESC
                "#,
            )?;

            let works = stmt
                .query_map(params![username], row_to_work)?
                .collect::<rusqlite::Result<Vec<_>>>()?;
            Ok(works)
        })
    }

    /// Get all work records ordered by id
    pub fn list(db: &Store) -> Result<Vec<Work>> {
        db.with_conn(|conn| {
            let mut stmt = conn.prepare(
                r#"
                SELECT id, information, start_date, end_date, time_duration, collaborators, username
                FROM works
                ORDER BY id
                "#,
            )?;

            let works = stmt
                .query_map([], row_to_work)?
                .collect::<rusqlite::Result<Vec<_>>>()?;
            Ok(works)
        })
    }

    /// Get count of work records
    pub fn count(db: &Store) -> Result<i64> {
        db.with_conn(|conn| conn.query_row("SELECT COUNT(*) FROM works", [], |row| row.get(0)))
    }
}

fn row_to_work(row: &rusqlite::Row) -> rusqlite::Result<Work> {
    Ok(Work {
        id: row.get(0)?,
        information: row.get(1)?,
        start_date: row.get(2)?,
        end_date: row.get(3)?,
        time_duration: row.get(4)?,
        collaborators: row.get(5)?,
        username: row.get(6)?,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::Stores;
    use chrono::NaiveDate;

    fn work(username: &str, start: NaiveDate) -> Work {
        Work {
            id: 0,
            information: "api rewrite".to_string(),
            start_date: start,
            end_date: start + chrono::Duration::days(5),
            time_duration: 30,
            collaborators: 1,
            username: username.to_string(),
        }
    }

    #[test]
    fn list_for_user_orders_by_start_date() {
        let dir = tempfile::tempdir().unwrap();
        let stores = Stores::open(dir.path()).unwrap();

        let early = NaiveDate::from_ymd_opt(2024, 1, 10).unwrap();
        let late = NaiveDate::from_ymd_opt(2024, 6, 10).unwrap();
        WorksDb::insert(stores.works(), &work("ada", early)).unwrap();
        WorksDb::insert(stores.works(), &work("ada", late)).unwrap();
        WorksDb::insert(stores.works(), &work("grace", early)).unwrap();

        let works = WorksDb::list_for_user(stores.works(), "ada").unwrap();
        assert_eq!(works.len(), 2);
        assert_eq!(works[0].start_date, late);
        assert_eq!(works[1].start_date, early);
        stores.close().unwrap();
    }

    #[test]
    fn required_fields_are_enforced() {
        let dir = tempfile::tempdir().unwrap();
        let stores = Stores::open(dir.path()).unwrap();

        // The typed API cannot express nulls; go through the raw connection
        // the way a buggy caller would.
        for column in [
            "information",
            "start_date",
            "end_date",
            "time_duration",
            "collaborators",
        ] {
            let err = stores
                .works()
                .with_conn(|conn| {
                    conn.execute(
                        "INSERT INTO works \
                         (information, start_date, end_date, time_duration, collaborators, username) \
                         VALUES (?1, ?2, ?3, ?4, ?5, 'ada')",
                        rusqlite::params![
                            null_unless("information", column),
                            null_unless("start_date", column),
                            null_unless("end_date", column),
                            null_unless("time_duration", column),
                            null_unless("collaborators", column),
                        ],
                    )
                })
                .unwrap_err();
            assert!(
                err.to_string().contains("NOT NULL"),
                "expected NOT NULL violation for {column}, got: {err}"
            );
        }
        assert_eq!(WorksDb::count(stores.works()).unwrap(), 0);
        stores.close().unwrap();
    }

    fn null_unless(this: &str, nulled: &str) -> Option<&'static str> {
        if this == nulled {
            None
        } else {
            Some("1")
        }
    }

    #[test]
    fn roundtrip_preserves_dates() {
        let dir = tempfile::tempdir().unwrap();
        let stores = Stores::open(dir.path()).unwrap();

        let start = NaiveDate::from_ymd_opt(2023, 11, 5).unwrap();
        WorksDb::insert(stores.works(), &work("ada", start)).unwrap();

        let all = WorksDb::list(stores.works()).unwrap();
        assert_eq!(all[0].start_date, start);
        assert_eq!(all[0].end_date, start + chrono::Duration::days(5));
        stores.close().unwrap();
    }
}
