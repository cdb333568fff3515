use crate::error::Result;
use r2d2::Pool;
use r2d2_sqlite::SqliteConnectionManager;
use rusqlite::{params, Connection, OptionalExtension, Result as SqlResult};
use std::collections::BTreeMap;
use std::path::Path;
use std::sync::RwLock;

/// Key-value persistence behind the history, template and settings stores.
///
/// Values are whole JSON documents; every write replaces the previous value.
pub trait KeyValueStore: Send + Sync {
    fn get(&self, key: &str) -> Result<Option<String>>;
    fn set(&self, key: &str, value: &str) -> Result<()>;
    fn remove(&self, key: &str) -> Result<()>;
    fn keys(&self) -> Result<Vec<String>>;
}

/// Thread-safe SQLite store backed by an r2d2 connection pool.
#[derive(Clone)]
pub struct Database {
    pool: Pool<SqliteConnectionManager>,
}

fn pool_error<E>(err: E) -> rusqlite::Error
where
    E: std::error::Error + Send + Sync + 'static,
{
    rusqlite::Error::ToSqlConversionFailure(Box::new(err))
}

const DEFAULT_DB_POOL_SIZE: u32 = 4;

fn db_pool_size() -> u32 {
    if let Ok(raw) = std::env::var("MIPREF_DB_POOL_SIZE") {
        if let Ok(parsed) = raw.parse::<u32>() {
            return parsed.clamp(1, 8);
        }
    }

    let cpu_count = std::thread::available_parallelism()
        .map(|count| count.get() as u32)
        .unwrap_or(2);
    cpu_count.min(DEFAULT_DB_POOL_SIZE).max(1)
}

fn apply_connection_pragmas(conn: &Connection) -> SqlResult<()> {
    conn.execute_batch(
        "PRAGMA journal_mode=WAL;
         PRAGMA synchronous=NORMAL;
         PRAGMA temp_store=MEMORY;
         PRAGMA busy_timeout=5000;",
    )?;
    Ok(())
}

impl Database {
    /// Opens or creates the SQLite database at the given path using a connection pool.
    pub fn new(db_path: &Path) -> SqlResult<Self> {
        let manager =
            SqliteConnectionManager::file(db_path).with_init(|conn| apply_connection_pragmas(conn));
        let pool_size = db_pool_size();
        let pool = Pool::builder()
            .max_size(pool_size)
            .build(manager)
            .map_err(pool_error)?;
        log::info!(
            "Opened store {} with a pool of {} connections",
            db_path.display(),
            pool_size
        );

        let db = Database { pool };
        db.init_schema()?;
        Ok(db)
    }

    /// A private in-memory database. Every pooled connection to `:memory:`
    /// would see its own empty database, so the pool holds exactly one.
    pub fn open_in_memory() -> SqlResult<Self> {
        let pool = Pool::builder()
            .max_size(1)
            .build(SqliteConnectionManager::memory())
            .map_err(pool_error)?;
        let db = Database { pool };
        db.init_schema()?;
        Ok(db)
    }

    fn init_schema(&self) -> SqlResult<()> {
        let conn = self.pool.get().map_err(pool_error)?;
        conn.execute_batch(
            "CREATE TABLE IF NOT EXISTS kv_store (
                key TEXT PRIMARY KEY NOT NULL,
                value TEXT NOT NULL,
                updated_at INTEGER NOT NULL
            );",
        )?;
        Ok(())
    }

    /// Milliseconds since the epoch of the last write to `key`.
    pub fn updated_at(&self, key: &str) -> Result<Option<i64>> {
        let conn = self.pool.get()?;
        let updated = conn
            .query_row(
                "SELECT updated_at FROM kv_store WHERE key = ?1",
                params![key],
                |row| row.get(0),
            )
            .optional()?;
        Ok(updated)
    }
}

impl KeyValueStore for Database {
    fn get(&self, key: &str) -> Result<Option<String>> {
        let conn = self.pool.get()?;
        let value = conn
            .query_row(
                "SELECT value FROM kv_store WHERE key = ?1",
                params![key],
                |row| row.get(0),
            )
            .optional()?;
        Ok(value)
    }

    fn set(&self, key: &str, value: &str) -> Result<()> {
        let conn = self.pool.get()?;
        conn.execute(
            "INSERT INTO kv_store (key, value, updated_at) VALUES (?1, ?2, ?3)
             ON CONFLICT(key) DO UPDATE SET value = excluded.value, updated_at = excluded.updated_at",
            params![key, value, chrono::Utc::now().timestamp_millis()],
        )?;
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<()> {
        let conn = self.pool.get()?;
        conn.execute("DELETE FROM kv_store WHERE key = ?1", params![key])?;
        Ok(())
    }

    fn keys(&self) -> Result<Vec<String>> {
        let conn = self.pool.get()?;
        let mut stmt = conn.prepare("SELECT key FROM kv_store ORDER BY key")?;
        let keys = stmt
            .query_map([], |row| row.get(0))?
            .collect::<SqlResult<Vec<String>>>()?;
        Ok(keys)
    }
}

/// Process-local store for `--ephemeral` sessions and tests.
#[derive(Default)]
pub struct MemoryStore {
    values: RwLock<BTreeMap<String, String>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<String>> {
        let values = self.values.read().unwrap_or_else(|e| e.into_inner());
        Ok(values.get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> Result<()> {
        let mut values = self.values.write().unwrap_or_else(|e| e.into_inner());
        values.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<()> {
        let mut values = self.values.write().unwrap_or_else(|e| e.into_inner());
        values.remove(key);
        Ok(())
    }

    fn keys(&self) -> Result<Vec<String>> {
        let values = self.values.read().unwrap_or_else(|e| e.into_inner());
        Ok(values.keys().cloned().collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn exercise(store: &dyn KeyValueStore) {
        assert_eq!(store.get("mipref_settings").unwrap(), None);

        store.set("mipref_settings", "{\"a\":1}").unwrap();
        store.set("mipref_history", "[]").unwrap();
        store.set("mipref_settings", "{\"a\":2}").unwrap();
        assert_eq!(
            store.get("mipref_settings").unwrap().as_deref(),
            Some("{\"a\":2}")
        );
        assert_eq!(
            store.keys().unwrap(),
            vec!["mipref_history".to_string(), "mipref_settings".to_string()]
        );

        store.remove("mipref_history").unwrap();
        assert_eq!(store.get("mipref_history").unwrap(), None);
        assert_eq!(store.keys().unwrap().len(), 1);
    }

    #[test]
    fn test_in_memory_database_round_trip() {
        let db = Database::open_in_memory().expect("failed to create in-memory db");
        exercise(&db);
        assert!(db.updated_at("mipref_settings").unwrap().is_some());
        assert!(db.updated_at("missing").unwrap().is_none());
    }

    #[test]
    fn test_memory_store_round_trip() {
        exercise(&MemoryStore::new());
    }

    #[test]
    fn test_file_database_persists_across_reopen() {
        let dir = std::env::temp_dir().join(format!(
            "mipref_db_test_{}_{}",
            std::process::id(),
            chrono::Utc::now().timestamp_nanos_opt().unwrap_or_default()
        ));
        std::fs::create_dir_all(&dir).unwrap();
        let path = dir.join("mipref.db");

        {
            let db = Database::new(&path).expect("failed to open db");
            db.set("mipref_templates", "[1]").unwrap();
        }
        let db = Database::new(&path).expect("failed to reopen db");
        assert_eq!(db.get("mipref_templates").unwrap().as_deref(), Some("[1]"));

        drop(db);
        let _ = std::fs::remove_dir_all(&dir);
    }
}
