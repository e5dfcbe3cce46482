#[macro_use]
extern crate diesel;

use anyhow::Result as Fallible;
use diesel::{connection::SimpleConnection as _, r2d2, sqlite::SqliteConnection};
use diesel_migrations::{embed_migrations, EmbeddedMigrations, MigrationHarness};
use livemap_core::usecases as uc;
use parking_lot::{RwLock, RwLockReadGuard, RwLockWriteGuard};
use std::{
    cell::{RefCell, RefMut},
    ops::Deref,
    sync::Arc,
};

mod models;
mod repo_impl;
mod schema;

pub use repo_impl::from_diesel_err;

const MIGRATIONS: EmbeddedMigrations = embed_migrations!("./migrations");

type ConnectionManager = r2d2::ConnectionManager<SqliteConnection>;
type ConnectionPool = r2d2::Pool<ConnectionManager>;
type PooledConnection = r2d2::PooledConnection<ConnectionManager>;

/// A pooled connection that keeps the pool locked while in use.
struct Checkout<G> {
    _guard: G,
    conn: RefCell<PooledConnection>,
}

impl<G> Checkout<G>
where
    G: Deref<Target = ConnectionPool>,
{
    fn take(guard: G, access: &str) -> Fallible<Self> {
        let conn = guard.get().inspect_err(|err| {
            log::error!("No pooled database connection available for {access} access: {err}");
        })?;
        Ok(Self {
            _guard: guard,
            conn: RefCell::new(conn),
        })
    }
}

/// Shared access, many of these may exist at the same time.
pub struct DbReadOnly<'a>(Checkout<RwLockReadGuard<'a, ConnectionPool>>);

impl DbReadOnly<'_> {
    fn sqlite_conn(&self) -> RefMut<PooledConnection> {
        self.0.conn.borrow_mut()
    }
}

/// Exclusive access, blocks all other connections.
pub struct DbReadWrite<'a>(Checkout<RwLockWriteGuard<'a, ConnectionPool>>);

impl DbReadWrite<'_> {
    fn sqlite_conn(&self) -> RefMut<PooledConnection> {
        self.0.conn.borrow_mut()
    }

    /// Run `f` within a single transaction.
    ///
    /// Nothing is stored if `f` fails.
    pub fn transaction<T, E, F>(&mut self, f: F) -> Result<T, uc::Error>
    where
        F: FnOnce(&DbConnection) -> Result<T, E>,
        E: Into<uc::Error>,
    {
        use diesel::Connection as _;
        let mut aborted = None;
        let outcome = self.sqlite_conn().transaction(|conn| {
            f(&DbConnection::new(conn)).map_err(|err| {
                aborted = Some(err.into());
                diesel::result::Error::RollbackTransaction
            })
        });
        outcome.map_err(|err| match aborted.take() {
            Some(err) => err,
            None => uc::Error::Repo(from_diesel_err(err)),
        })
    }
}

/// A connection borrowed by a running transaction.
pub struct DbConnection<'a> {
    conn: RefCell<&'a mut SqliteConnection>,
}

impl<'a> DbConnection<'a> {
    fn new(conn: &'a mut SqliteConnection) -> Self {
        Self {
            conn: RefCell::new(conn),
        }
    }

    fn sqlite_conn(&self) -> RefMut<&'a mut SqliteConnection> {
        self.conn.borrow_mut()
    }
}

/// The connection pool of the feature store.
///
/// Readers share the pool, a writer has it for itself.
/// SQLite would otherwise fail with "database is locked".
#[derive(Clone)]
pub struct Connections {
    pool: Arc<RwLock<ConnectionPool>>,
}

/// Settings that have to be applied to every new database.
fn initialize_database(connection: &mut SqliteConnection) -> Fallible<()> {
    connection.batch_execute(
        r#"
PRAGMA journal_mode = WAL;
PRAGMA synchronous = NORMAL;
PRAGMA wal_checkpoint(TRUNCATE);
PRAGMA automatic_index = 1;
PRAGMA encoding = 'UTF-8';
"#,
    )?;
    Ok(())
}

impl Connections {
    pub fn init(url: &str, pool_size: u32) -> Fallible<Self> {
        use diesel::Connection as _;
        // r2d2 would keep retrying an unreachable database
        SqliteConnection::establish(url)?;
        let pool = ConnectionPool::builder()
            .max_size(pool_size)
            .build(ConnectionManager::new(url))?;
        initialize_database(&mut *pool.get()?)?;
        Ok(Self {
            pool: Arc::new(RwLock::new(pool)),
        })
    }

    pub fn shared(&self) -> Fallible<DbReadOnly> {
        Checkout::take(self.pool.read(), "read-only").map(DbReadOnly)
    }

    pub fn exclusive(&self) -> Fallible<DbReadWrite> {
        Checkout::take(self.pool.write(), "read/write").map(DbReadWrite)
    }
}

pub fn run_embedded_database_migrations(conn: DbReadWrite<'_>) -> Fallible<()> {
    log::info!("Running embedded database migrations");
    conn.sqlite_conn()
        .run_pending_migrations(MIGRATIONS)
        .map_err(|err| anyhow::anyhow!("Failed to run database migrations: {err}"))?;
    Ok(())
}
