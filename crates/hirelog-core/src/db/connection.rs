//! Store connection management
//!
//! Bootstraps the three store files, runs their idempotent schemas, and
//! hands out thread-safe handles. Initialization is sequential and
//! fail-fast: the first error aborts and is returned to the caller.

use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex, MutexGuard};

use rusqlite::Connection;

use crate::error::{Error, Result};
use crate::types::StoreKind;

const USERS_SCHEMA: &str = include_str!("../../migrations/users.sql");
const WORKS_SCHEMA: &str = include_str!("../../migrations/works.sql");
const CANDIDATES_SCHEMA: &str = include_str!("../../migrations/candidates.sql");

/// Default store root, relative to the working directory
pub const DEFAULT_ROOT: &str = "./db";

/// Per-user data directory root, as an alternative to [`DEFAULT_ROOT`]
pub fn data_dir_root() -> PathBuf {
    dirs::data_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("hirelog")
}

/// Thread-safe handle to a single store file
///
/// Clones share the same underlying connection. After [`Store::close`] any
/// operation through any clone fails with [`Error::Closed`].
#[derive(Clone, Debug)]
pub struct Store {
    kind: StoreKind,
    conn: Arc<Mutex<Option<Connection>>>,
}

impl Store {
    fn open(kind: StoreKind, path: &Path) -> Result<Self> {
        log::info!("Opening {} store at {:?}", kind, path);
        let conn = Connection::open(path).map_err(|e| Error::Open {
            store: kind,
            source: e,
        })?;
        Ok(Store {
            kind,
            conn: Arc::new(Mutex::new(Some(conn))),
        })
    }

    fn lock(&self) -> Result<MutexGuard<'_, Option<Connection>>> {
        self.conn
            .lock()
            .map_err(|e| Error::Database(format!("failed to lock {} store: {}", self.kind, e)))
    }

    /// Execute a function with the store connection
    pub fn with_conn<F, T>(&self, f: F) -> Result<T>
    where
        F: FnOnce(&Connection) -> rusqlite::Result<T>,
    {
        let guard = self.lock()?;
        let conn = guard.as_ref().ok_or(Error::Closed { store: self.kind })?;
        f(conn).map_err(Into::into)
    }

    /// Execute a function with mutable access to the store connection
    pub fn with_conn_mut<F, T>(&self, f: F) -> Result<T>
    where
        F: FnOnce(&mut Connection) -> rusqlite::Result<T>,
    {
        let mut guard = self.lock()?;
        let conn = guard.as_mut().ok_or(Error::Closed { store: self.kind })?;
        f(conn).map_err(Into::into)
    }

    fn create_schema(&self, schema: &str) -> Result<()> {
        let guard = self.lock()?;
        let conn = guard.as_ref().ok_or(Error::Closed { store: self.kind })?;
        conn.execute_batch(schema).map_err(|e| Error::Schema {
            store: self.kind,
            source: e,
        })
    }

    /// Liveness check against the underlying connection
    pub fn ping(&self) -> Result<()> {
        let guard = self.lock()?;
        let conn = guard.as_ref().ok_or(Error::Closed { store: self.kind })?;
        conn.query_row("SELECT 1", [], |row| row.get::<_, i64>(0))
            .map(|_| ())
            .map_err(|e| Error::Ping {
                store: self.kind,
                source: e,
            })
    }

    /// Close the underlying connection
    ///
    /// Safe to call more than once; later calls are no-ops. Other operations
    /// on a closed handle fail with [`Error::Closed`].
    pub fn close(&self) -> Result<()> {
        let mut guard = self.lock()?;
        if let Some(conn) = guard.take() {
            conn.close().map_err(|(_, e)| Error::Sqlite(e))?;
            log::info!("{} store closed", self.kind);
        }
        Ok(())
    }

    /// Whether this handle has been closed
    pub fn is_closed(&self) -> bool {
        self.lock().map(|guard| guard.is_none()).unwrap_or(true)
    }
}

/// The three store handles, opened together at startup
///
/// This is the single ownership scope for the long-lived connections: open
/// once, pass to whatever consumes it, close once at shutdown.
#[derive(Clone, Debug)]
pub struct Stores {
    root: PathBuf,
    users: Store,
    works: Store,
    candidates: Store,
}

impl Stores {
    /// Open all three stores under `root`
    ///
    /// Creates the directory if absent, then opens each store, runs its
    /// idempotent schema, and pings it. Stores are handled in order users,
    /// works, candidates; the first failure aborts initialization.
    pub fn open(root: impl AsRef<Path>) -> Result<Self> {
        let root = root.as_ref();
        std::fs::create_dir_all(root).map_err(|e| Error::CreateDir {
            path: root.to_path_buf(),
            source: e,
        })?;

        let users = init_store(StoreKind::Users, root, USERS_SCHEMA)?;
        let works = init_store(StoreKind::Works, root, WORKS_SCHEMA)?;
        let candidates = init_store(StoreKind::Candidates, root, CANDIDATES_SCHEMA)?;

        users.ping()?;
        works.ping()?;
        candidates.ping()?;

        log::info!("All stores initialized at {:?}", root);

        Ok(Stores {
            root: root.to_path_buf(),
            users,
            works,
            candidates,
        })
    }

    /// Open the stores under [`DEFAULT_ROOT`]
    pub fn open_default() -> Result<Self> {
        Self::open(DEFAULT_ROOT)
    }

    /// Directory holding the store files
    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn users(&self) -> &Store {
        &self.users
    }

    pub fn works(&self) -> &Store {
        &self.works
    }

    pub fn candidates(&self) -> &Store {
        &self.candidates
    }

    /// Close all three stores
    ///
    /// Every store is attempted even if an earlier one fails to close; the
    /// first error is returned afterwards. Safe to call more than once.
    /// After closing, operations on any handle fail with [`Error::Closed`].
    pub fn close(&self) -> Result<()> {
        let results = [
            self.users.close(),
            self.candidates.close(),
            self.works.close(),
        ];
        results.into_iter().collect()
    }
}

fn init_store(kind: StoreKind, root: &Path, schema: &str) -> Result<Store> {
    let store = Store::open(kind, &root.join(kind.file_name()))?;
    store.create_schema(schema)?;
    Ok(store)
}
