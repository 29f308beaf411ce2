//! Database connection manager backed by the SQLite pool.

use std::path::{Path, PathBuf};

use prashiskshan_domain::{PrashiskshanError, Result, StorageUsage};
use rusqlite::params;
use tracing::info;

use super::pool::{create_sqlite_pool, SqliteConnection, SqlitePool, SqlitePoolConfig};
use crate::errors::InfraError;

const SCHEMA_VERSION: i32 = 1;
const SCHEMA_SQL: &str = include_str!("schema.sql");

/// Database manager that wraps a [`SqlitePool`].
pub struct DbManager {
    pool: SqlitePool,
    path: PathBuf,
}

impl DbManager {
    /// Open (or create) the database file with the given pool size.
    pub fn new<P: AsRef<Path>>(db_path: P, pool_size: u32) -> Result<Self> {
        let path = db_path.as_ref().to_path_buf();
        let config = SqlitePoolConfig { max_size: pool_size.max(1), ..SqlitePoolConfig::default() };
        let pool = create_sqlite_pool(&path, &config)?;
        Ok(Self { pool, path })
    }

    /// Acquire a connection from the pool.
    pub fn get_connection(&self) -> Result<SqliteConnection> {
        self.pool.get().map_err(|e| PrashiskshanError::from(InfraError::from(e)))
    }

    /// Ensure the full schema exists on the current database.
    pub fn run_migrations(&self) -> Result<()> {
        let conn = self.get_connection()?;
        create_schema(&conn)?;
        info!(db_path = %self.path.display(), version = SCHEMA_VERSION, "schema ready");
        Ok(())
    }

    /// Return the configured database path.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Perform a health check to verify database connectivity.
    pub fn health_check(&self) -> Result<()> {
        let conn = self.get_connection()?;
        conn.query_row("SELECT 1", params![], |row| row.get::<_, i32>(0)).map_err(map_sql_error)?;
        Ok(())
    }

    /// Bytes currently allocated by the database file and the page quota.
    pub fn storage_usage(&self) -> Result<StorageUsage> {
        let conn = self.get_connection()?;
        let page_size = pragma_u64(&conn, "page_size")?;
        let page_count = pragma_u64(&conn, "page_count")?;
        let max_page_count = pragma_u64(&conn, "max_page_count")?;

        Ok(StorageUsage {
            used_bytes: page_count.saturating_mul(page_size),
            quota_bytes: max_page_count.saturating_mul(page_size),
        })
    }
}

fn create_schema(conn: &SqliteConnection) -> Result<()> {
    conn.execute_batch(SCHEMA_SQL).map_err(map_sql_error)?;
    conn.execute(
        "INSERT OR IGNORE INTO schema_version (version, applied_at) VALUES (?, CAST(strftime('%s','now') AS INTEGER))",
        params![SCHEMA_VERSION],
    )
    .map_err(map_sql_error)?;
    Ok(())
}

fn pragma_u64(conn: &SqliteConnection, name: &str) -> Result<u64> {
    let value: i64 =
        conn.pragma_query_value(None, name, |row| row.get(0)).map_err(map_sql_error)?;
    Ok(u64::try_from(value).unwrap_or(0))
}

fn map_sql_error(err: rusqlite::Error) -> PrashiskshanError {
    PrashiskshanError::from(InfraError::from(err))
}
