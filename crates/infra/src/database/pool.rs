//! SQLite connection pool
//!
//! r2d2 pool over `r2d2_sqlite` with per-connection pragmas applied in the
//! manager's init hook. Pool construction failures are reported as
//! `StorageUnavailable` since the queue cannot work without its store.

use std::path::Path;
use std::time::Duration;

use prashiskshan_domain::{PrashiskshanError, Result as DomainResult};
use r2d2::{Pool, PooledConnection};
use r2d2_sqlite::SqliteConnectionManager;
use rusqlite::Connection;
use tracing::{info, warn};

/// Pooled SQLite pool.
pub type SqlitePool = Pool<SqliteConnectionManager>;

/// Connection checked out of a [`SqlitePool`].
pub type SqliteConnection = PooledConnection<SqliteConnectionManager>;

/// SQLite pool configuration
#[derive(Debug, Clone)]
pub struct SqlitePoolConfig {
    /// Maximum number of connections in the pool
    pub max_size: u32,

    /// How long to wait for a free connection
    pub connection_timeout: Duration,

    /// Busy timeout for SQLite operations
    pub busy_timeout: Duration,

    /// Enable WAL journal mode
    pub enable_wal: bool,
}

impl Default for SqlitePoolConfig {
    fn default() -> Self {
        Self {
            max_size: 4,
            connection_timeout: Duration::from_secs(5),
            busy_timeout: Duration::from_millis(5000),
            enable_wal: true,
        }
    }
}

/// Build a pool for the database file at `path`, creating the file if needed.
pub fn create_sqlite_pool<P: AsRef<Path>>(
    path: P,
    config: &SqlitePoolConfig,
) -> DomainResult<SqlitePool> {
    let path = path.as_ref();
    let pragma_config = config.clone();

    let manager = SqliteConnectionManager::file(path)
        .with_init(move |conn| apply_connection_pragmas(conn, &pragma_config));

    let pool = Pool::builder()
        .max_size(config.max_size.max(1))
        .connection_timeout(config.connection_timeout)
        .build(manager)
        .map_err(|e| {
            warn!(db_path = %path.display(), error = %e, "failed to create sqlite pool");
            PrashiskshanError::StorageUnavailable(format!("failed to open {}: {e}", path.display()))
        })?;

    info!(db_path = %path.display(), max_connections = pool.max_size(), "sqlite pool initialised");
    Ok(pool)
}

/// Apply connection-level pragmas
///
/// - WAL mode for concurrent readers alongside the sync writer
/// - NORMAL synchronous mode
/// - Busy timeout for lock contention
pub fn apply_connection_pragmas(
    conn: &Connection,
    config: &SqlitePoolConfig,
) -> rusqlite::Result<()> {
    let mut pragma_sql = String::new();

    if config.enable_wal {
        pragma_sql.push_str("PRAGMA journal_mode=WAL;\n");
        pragma_sql.push_str("PRAGMA wal_autocheckpoint=1000;\n");
    }
    pragma_sql.push_str("PRAGMA synchronous=NORMAL;\n");

    conn.execute_batch(&pragma_sql)?;
    conn.busy_timeout(config.busy_timeout)
}
