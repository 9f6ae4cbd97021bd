//! Candidates store operations

use rusqlite::params;

use crate::db::Store;
use crate::error::Result;
use crate::types::Candidate;

/// Candidates store operations
pub struct CandidatesDb;

impl CandidatesDb {
    /// Insert a candidate, returning the assigned row id
    ///
    /// Fails with a uniqueness violation if the email is already present.
    /// Candidates without an email are always accepted.
    pub fn insert(db: &Store, candidate: &Candidate) -> Result<i64> {
        db.with_conn(|conn| {
            conn.execute(
                r#"
                INSERT INTO candidates
                (last_name, first_name, age, profession, email, module, username)
                VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)
                "#,
                params![
                    candidate.last_name,
                    candidate.first_name,
                    candidate.age,
                    candidate.profession,
                    candidate.email,
                    candidate.module,
                    candidate.username,
                ],
            )?;
            Ok(conn.last_insert_rowid())
        })
    }

    /// Insert a batch of candidates in one transaction
    ///
    /// All-or-nothing: any constraint violation rolls the whole batch back.
    pub fn insert_many(db: &Store, candidates: &[Candidate]) -> Result<()> {
        db.with_conn_mut(|conn| {
            let tx = conn.transaction()?;

            for candidate in candidates {
                tx.execute(
                    r#"
                    INSERT INTO candidates
                    (last_name, first_name, age, profession, email, module, username)
                    VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)
                    "#,
                    params![
                        candidate.last_name,
                        candidate.first_name,
                        candidate.age,
                        candidate.profession,
                        candidate.email,
                        candidate.module,
                        candidate.username,
                    ],
                )?;
            }

            tx.commit()?;
            Ok(())
        })
    }

    /// Get a candidate by email
    pub fn get_by_email(db: &Store, email: &str) -> Result<Option<Candidate>> {
        db.with_conn(|conn| {
            let result = conn.query_row(
                r#"
                SELECT id, last_name, first_name, age, profession, email, module, username
                FROM candidates WHERE email = ?1
                "#,
                params![email],
                row_to_candidate,
            );

            match result {
                Ok(candidate) => Ok(Some(candidate)),
                Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
                Err(e) => Err(e),
            }
        })
    }

    /// Get all candidates attached to a username, ordered by id
    pub fn list_for_user(db: &Store, username: &str) -> Result<Vec<Candidate>> {
        db.with_conn(|conn| {
            let mut stmt = conn.prepare(
                r#"
                SELECT id, last_name, first_name, age, profession, email, module, username
                FROM candidates
                WHERE username = ?1
                ORDER BY id
                "#,
            )?;

            let candidates = stmt
                .query_map(params![username], row_to_candidate)?
                .collect::<rusqlite::Result<Vec<_>>>()?;
            Ok(candidates)
        })
    }

    /// Get count of candidates
    pub fn count(db: &Store) -> Result<i64> {
        db.with_conn(|conn| {
            conn.query_row("SELECT COUNT(*) FROM candidates", [], |row| row.get(0))
        })
    }
}

fn row_to_candidate(row: &rusqlite::Row) -> rusqlite::Result<Candidate> {
    Ok(Candidate {
        id: row.get(0)?,
        last_name: row.get(1)?,
        first_name: row.get(2)?,
        age: row.get(3)?,
        profession: row.get(4)?,
        email: row.get(5)?,
        module: row.get(6)?,
        username: row.get(7)?,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::Stores;

    fn candidate(email: Option<&str>) -> Candidate {
        Candidate {
            id: 0,
            last_name: Some("Ruiz".to_string()),
            first_name: Some("Ana".to_string()),
            age: Some(31),
            profession: Some("engineer".to_string()),
            email: email.map(String::from),
            module: Some(3),
            username: Some("ada".to_string()),
        }
    }

    #[test]
    fn duplicate_email_is_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let stores = Stores::open(dir.path()).unwrap();

        CandidatesDb::insert(stores.candidates(), &candidate(Some("ana@example.com"))).unwrap();
        let err = CandidatesDb::insert(stores.candidates(), &candidate(Some("ana@example.com")))
            .unwrap_err();
        assert!(err.to_string().contains("UNIQUE"));
        stores.close().unwrap();
    }

    #[test]
    fn insert_many_is_all_or_nothing() {
        let dir = tempfile::tempdir().unwrap();
        let stores = Stores::open(dir.path()).unwrap();

        // Duplicate email inside the batch rolls back the earlier rows too.
        let batch = [
            candidate(Some("a@example.com")),
            candidate(Some("b@example.com")),
            candidate(Some("a@example.com")),
        ];
        let err = CandidatesDb::insert_many(stores.candidates(), &batch).unwrap_err();
        assert!(err.to_string().contains("UNIQUE"));
        assert_eq!(CandidatesDb::count(stores.candidates()).unwrap(), 0);

        let batch = [
            candidate(Some("a@example.com")),
            candidate(Some("b@example.com")),
        ];
        CandidatesDb::insert_many(stores.candidates(), &batch).unwrap();
        assert_eq!(CandidatesDb::count(stores.candidates()).unwrap(), 2);
        stores.close().unwrap();
    }

    #[test]
    fn missing_emails_do_not_collide() {
        let dir = tempfile::tempdir().unwrap();
        let stores = Stores::open(dir.path()).unwrap();

        // SQLite UNIQUE treats NULLs as distinct.
        CandidatesDb::insert(stores.candidates(), &candidate(None)).unwrap();
        CandidatesDb::insert(stores.candidates(), &candidate(None)).unwrap();
        assert_eq!(CandidatesDb::count(stores.candidates()).unwrap(), 2);
        stores.close().unwrap();
    }

    #[test]
    fn get_by_email_roundtrips_optional_fields() {
        let dir = tempfile::tempdir().unwrap();
        let stores = Stores::open(dir.path()).unwrap();

        let mut sparse = candidate(Some("ana@example.com"));
        sparse.age = None;
        sparse.module = None;
        CandidatesDb::insert(stores.candidates(), &sparse).unwrap();

        let found = CandidatesDb::get_by_email(stores.candidates(), "ana@example.com")
            .unwrap()
            .unwrap();
        assert_eq!(found.last_name.as_deref(), Some("Ruiz"));
        assert!(found.age.is_none());
        assert!(found.module.is_none());

        assert!(CandidatesDb::get_by_email(stores.candidates(), "none@example.com")
            .unwrap()
            .is_none());
        stores.close().unwrap();
    }

    #[test]
    fn list_for_user_filters_by_soft_reference() {
        let dir = tempfile::tempdir().unwrap();
        let stores = Stores::open(dir.path()).unwrap();

        let mut other = candidate(Some("b@example.com"));
        other.username = Some("grace".to_string());
        CandidatesDb::insert(stores.candidates(), &candidate(Some("a@example.com"))).unwrap();
        CandidatesDb::insert(stores.candidates(), &other).unwrap();

        let mine = CandidatesDb::list_for_user(stores.candidates(), "ada").unwrap();
        assert_eq!(mine.len(), 1);
        assert_eq!(mine[0].email.as_deref(), Some("a@example.com"));
        stores.close().unwrap();
    }
}
