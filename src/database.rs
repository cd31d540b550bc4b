use std::path::Path;

use log::info;
use r2d2::{Pool, PooledConnection};
use r2d2_sqlite::SqliteConnectionManager;
use rusqlite::{
    functions::{Context, FunctionFlags},
    types::ValueRef,
    Connection, OptionalExtension,
};

use crate::error::AssetListError;
use crate::schema::{CREATE_SCHEMA_SQL, SCHEMA_VERSION};

const DB_FILENAME: &str = "assetlist.db";

const CONNECTION_PRAGMAS: &str = "
    PRAGMA case_sensitive_like = ON;
    PRAGMA foreign_keys = ON;
";

/// Name of the SQL function that lowercases with full Unicode rules.
/// SQLite's built-in `LOWER()` only folds ASCII.
pub const UNICODE_LOWER_FN: &str = "unicode_lower";

/// Pooled access to the listing database.
#[derive(Clone)]
pub struct Database {
    pool: Pool<SqliteConnectionManager>,
}

impl Database {
    pub fn open(db_dir: &Path, pool_size: u32) -> Result<Self, AssetListError> {
        if !db_dir.is_dir() {
            return Err(AssetListError::Error(format!(
                "Database folder '{}' does not exist or is not a directory",
                db_dir.display()
            )));
        }

        let db_path = db_dir.join(DB_FILENAME);
        let manager = SqliteConnectionManager::file(&db_path).with_init(Self::init_connection);
        let pool = Pool::builder().max_size(pool_size.max(1)).build(manager)?;

        info!("Database opened at: {}", db_path.display());

        Ok(Database { pool })
    }

    /// Every in-memory connection is its own database, so the pool holds
    /// exactly one connection and never recycles it.
    pub fn open_in_memory() -> Result<Self, AssetListError> {
        let manager = SqliteConnectionManager::memory().with_init(Self::init_connection);
        let pool = Pool::builder()
            .max_size(1)
            .idle_timeout(None)
            .max_lifetime(None)
            .build(manager)?;

        Ok(Database { pool })
    }

    fn init_connection(conn: &mut Connection) -> rusqlite::Result<()> {
        conn.create_scalar_function(
            UNICODE_LOWER_FN,
            1,
            FunctionFlags::SQLITE_UTF8 | FunctionFlags::SQLITE_DETERMINISTIC,
            Self::unicode_lower,
        )?;
        conn.execute_batch(CONNECTION_PRAGMAS)
    }

    fn unicode_lower(ctx: &Context<'_>) -> rusqlite::Result<Option<String>> {
        Ok(match ctx.get_raw(0) {
            ValueRef::Text(text) => Some(String::from_utf8_lossy(text).to_lowercase()),
            ValueRef::Integer(i) => Some(i.to_string()),
            ValueRef::Real(f) => Some(f.to_string()),
            ValueRef::Null | ValueRef::Blob(_) => None,
        })
    }

    pub fn get_connection(
        &self,
    ) -> Result<PooledConnection<SqliteConnectionManager>, AssetListError> {
        Ok(self.pool.get()?)
    }

    pub fn ensure_schema(&self) -> Result<(), AssetListError> {
        let conn = self.get_connection()?;

        let table_exists: bool = conn
            .query_row(
                "SELECT count(*) FROM sqlite_master WHERE type='table' AND name='meta'",
                [],
                |row| row.get::<_, i32>(0),
            )
            .map(|count| count > 0)?;

        if !table_exists {
            info!("Creating database schema version {SCHEMA_VERSION}");
            conn.execute_batch(CREATE_SCHEMA_SQL)?;
            return Ok(());
        }

        let stored_version: Option<String> = conn
            .query_row(
                "SELECT value FROM meta WHERE key = 'schema_version'",
                [],
                |row| row.get(0),
            )
            .optional()?;

        match stored_version.as_deref() {
            Some(SCHEMA_VERSION) => Ok(()),
            Some(other) => Err(AssetListError::Error(format!(
                "Schema version mismatch: found {other}, expected {SCHEMA_VERSION}"
            ))),
            None => Err(AssetListError::Error("Schema version missing".to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_open_in_memory_creates_schema() {
        let db = Database::open_in_memory().unwrap();
        db.ensure_schema().unwrap();
        // Second call sees the stored version
        db.ensure_schema().unwrap();

        let conn = db.get_connection().unwrap();
        let tables: i64 = conn
            .query_row(
                "SELECT count(*) FROM sqlite_master WHERE type='table' \
                 AND name IN ('users', 'user_groups', 'assets', 'asset_files', 'suppliers')",
                [],
                |row| row.get(0),
            )
            .unwrap();
        assert_eq!(tables, 5);
    }

    #[test]
    fn test_pragmas_applied() {
        let db = Database::open_in_memory().unwrap();
        let conn = db.get_connection().unwrap();
        let foreign_keys: i64 = conn
            .query_row("PRAGMA foreign_keys", [], |row| row.get(0))
            .unwrap();
        assert_eq!(foreign_keys, 1);

        let matched: i64 = conn
            .query_row("SELECT 'ABC' LIKE 'abc'", [], |row| row.get(0))
            .unwrap();
        assert_eq!(matched, 0);
    }

    #[test]
    fn test_unicode_lower_folds_beyond_ascii() {
        let db = Database::open_in_memory().unwrap();
        let conn = db.get_connection().unwrap();

        let folded: String = conn
            .query_row("SELECT unicode_lower('ÉLODIE Straße ΣΑΣ')", [], |row| row.get(0))
            .unwrap();
        assert_eq!(folded, "élodie straße σας");

        let builtin: String = conn
            .query_row("SELECT lower('ÉLODIE')", [], |row| row.get(0))
            .unwrap();
        assert_eq!(builtin, "Élodie");

        let null: Option<String> = conn
            .query_row("SELECT unicode_lower(NULL)", [], |row| row.get(0))
            .unwrap();
        assert_eq!(null, None);
    }

    #[test]
    fn test_version_mismatch() {
        let db = Database::open_in_memory().unwrap();
        db.ensure_schema().unwrap();
        db.get_connection()
            .unwrap()
            .execute("UPDATE meta SET value = '99' WHERE key = 'schema_version'", [])
            .unwrap();

        match db.ensure_schema() {
            Err(AssetListError::Error(msg)) => assert!(msg.contains("99")),
            other => panic!("expected version mismatch, got {other:?}"),
        }
    }

    #[test]
    fn test_open_on_disk() {
        let dir = TempDir::new().unwrap();
        let db = Database::open(dir.path(), 2).unwrap();
        db.ensure_schema().unwrap();
        assert!(dir.path().join(DB_FILENAME).exists());

        // Reopening finds the existing schema
        let db = Database::open(dir.path(), 0).unwrap();
        db.ensure_schema().unwrap();
    }

    #[test]
    fn test_open_missing_dir() {
        let dir = TempDir::new().unwrap();
        let missing = dir.path().join("nope");
        assert!(Database::open(&missing, 1).is_err());
    }
}
