use crate::domain::csv::{CellValue, InsertStatement, LoaderConfig, Schema, TypedRow};
use crate::domain::error::{AppError, Result};
use sqlx::query::Query;
use sqlx::sqlite::{
    SqliteArguments, SqliteConnectOptions, SqlitePool, SqlitePoolOptions, SqliteRow,
    SqliteStatement,
};
use sqlx::{Executor, Sqlite, Statement, Transaction};
use std::str::FromStr;
use std::time::Duration;
use uuid::Uuid;

/// An in-memory SQLite database reachable through a pool.
///
/// The database is addressed by a shared-cache key that is unique per
/// instance and only lives while the pool holds a connection, so dropping
/// or closing the store destroys the data.
pub struct MemoryStore {
    pool: SqlitePool,
    cache_key: String,
}

impl MemoryStore {
    pub async fn open(config: &LoaderConfig) -> Result<Self> {
        let cache_key = format!("{}-{}", config.cache_key_prefix, Uuid::new_v4());
        let url = format!("sqlite:file:{}?mode=memory&cache=shared", cache_key);

        let options = SqliteConnectOptions::from_str(&url).map_err(|e| {
            AppError::ExecutionError(format!("Failed to parse connection string: {e}"))
        })?;

        let pool = SqlitePoolOptions::new()
            .max_connections(config.max_connections)
            .min_connections(config.min_connections)
            .acquire_timeout(Duration::from_secs(config.acquire_timeout_secs))
            .max_lifetime(None)
            .idle_timeout(None)
            .connect_with(options)
            .await
            .map_err(|e| {
                AppError::ExecutionError(format!("Failed to open in-memory store: {e}"))
            })?;

        tracing::debug!(cache_key = %cache_key, "Opened in-memory store");

        Ok(Self { pool, cache_key })
    }

    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }

    pub fn cache_key(&self) -> &str {
        &self.cache_key
    }

    /// Run a table definition. Any rejection is a schema problem.
    pub async fn apply_schema(&self, ddl: &str) -> Result<()> {
        sqlx::query(ddl)
            .execute(&self.pool)
            .await
            .map_err(|e| AppError::SchemaError(format!("Failed to create table: {e}")))?;
        Ok(())
    }

    /// Open a transaction on one connection and prepare `insert` on it.
    pub async fn begin_insert<'s>(&self, insert: &'s InsertStatement) -> Result<RowInserter<'s>> {
        let mut tx = self
            .pool
            .begin()
            .await
            .map_err(|e| AppError::ExecutionError(format!("Failed to begin transaction: {e}")))?;

        let statement = (&mut *tx).prepare(insert.sql()).await.map_err(|e| {
            AppError::ExecutionError(format!("Failed to prepare insert statement: {e}"))
        })?;

        Ok(RowInserter {
            tx,
            statement,
            placeholder_count: insert.placeholder_count(),
            inserted: 0,
        })
    }

    pub async fn query(&self, sql: &str) -> Result<Vec<SqliteRow>> {
        sqlx::query(sql)
            .fetch_all(&self.pool)
            .await
            .map_err(|e| AppError::ExecutionError(format!("Failed to run query: {e}")))
    }

    pub async fn close(self) {
        self.pool.close().await;
        tracing::debug!(cache_key = %self.cache_key, "Closed in-memory store");
    }
}

/// Single-writer insert session. Rows become visible only on `commit`.
pub struct RowInserter<'s> {
    tx: Transaction<'static, Sqlite>,
    statement: SqliteStatement<'s>,
    placeholder_count: usize,
    inserted: u64,
}

impl RowInserter<'_> {
    pub async fn insert(&mut self, row: TypedRow) -> Result<()> {
        // The driver binds missing parameters as NULL; a short row must fail instead.
        if row.len() != self.placeholder_count {
            return Err(AppError::ExecutionError(format!(
                "Row {} has {} values but the insert expects {}",
                self.inserted + 1,
                row.len(),
                self.placeholder_count
            )));
        }

        let mut query = self.statement.query();
        for value in row.into_values() {
            query = bind_value(query, value);
        }

        query.execute(&mut *self.tx).await.map_err(|e| {
            AppError::ExecutionError(format!("Failed to insert row {}: {e}", self.inserted + 1))
        })?;

        self.inserted += 1;
        Ok(())
    }

    pub async fn commit(self) -> Result<u64> {
        self.tx
            .commit()
            .await
            .map_err(|e| AppError::ExecutionError(format!("Failed to commit transaction: {e}")))?;
        Ok(self.inserted)
    }

    pub async fn rollback(self) -> Result<()> {
        self.tx
            .rollback()
            .await
            .map_err(|e| AppError::ExecutionError(format!("Failed to roll back transaction: {e}")))
    }
}

fn bind_value<'q>(
    query: Query<'q, Sqlite, SqliteArguments<'q>>,
    value: CellValue,
) -> Query<'q, Sqlite, SqliteArguments<'q>> {
    match value {
        CellValue::Integer(v) => query.bind(v),
        CellValue::Real(v) => query.bind(v),
        CellValue::Text(v) => query.bind(v),
        CellValue::DateTime(v) => query.bind(v),
    }
}

/// A populated store holding exactly one table. Owned by the caller;
/// closing or dropping it destroys the data.
pub struct StoreHandle {
    store: MemoryStore,
    table_name: String,
    schema: Schema,
    rows_loaded: u64,
}

impl StoreHandle {
    pub(crate) fn new(store: MemoryStore, table_name: String, schema: Schema, rows_loaded: u64) -> Self {
        Self {
            store,
            table_name,
            schema,
            rows_loaded,
        }
    }

    pub fn pool(&self) -> &SqlitePool {
        self.store.pool()
    }

    pub fn cache_key(&self) -> &str {
        self.store.cache_key()
    }

    pub fn table_name(&self) -> &str {
        &self.table_name
    }

    pub fn schema(&self) -> &Schema {
        &self.schema
    }

    /// Rows inserted by the load, counted client-side
    pub fn rows_loaded(&self) -> u64 {
        self.rows_loaded
    }

    /// Row count as reported by the store
    pub async fn row_count(&self) -> Result<i64> {
        let sql = format!("SELECT COUNT(*) FROM {}", self.table_name);
        sqlx::query_scalar(&sql)
            .fetch_one(self.store.pool())
            .await
            .map_err(|e| AppError::ExecutionError(format!("Failed to count rows: {e}")))
    }

    /// Run arbitrary query text against the loaded table
    pub async fn query(&self, sql: &str) -> Result<Vec<SqliteRow>> {
        self.store.query(sql).await
    }

    pub async fn close(self) {
        self.store.close().await;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use sqlx::Row;

    #[tokio::test]
    async fn test_stores_are_isolated() {
        let config = LoaderConfig::default();
        let first = MemoryStore::open(&config).await.unwrap();
        let second = MemoryStore::open(&config).await.unwrap();
        assert_ne!(first.cache_key(), second.cache_key());

        first.apply_schema("CREATE TABLE t(a INTEGER)").await.unwrap();
        // Same table name in the second store must not collide.
        second.apply_schema("CREATE TABLE t(a INTEGER)").await.unwrap();

        first.close().await;
        second.close().await;
    }

    #[tokio::test]
    async fn test_data_is_shared_across_pool_connections() {
        let store = MemoryStore::open(&LoaderConfig::default()).await.unwrap();
        store.apply_schema("CREATE TABLE t(a INTEGER)").await.unwrap();

        let insert = InsertStatement::new("INSERT INTO t (a) VALUES (?)".to_string(), 1);
        let mut inserter = store.begin_insert(&insert).await.unwrap();
        inserter
            .insert(TypedRow::new(vec![CellValue::Integer(7)]))
            .await
            .unwrap();
        assert_eq!(inserter.commit().await.unwrap(), 1);

        let mut a = store.pool().acquire().await.unwrap();
        let mut b = store.pool().acquire().await.unwrap();
        let from_a: i64 = sqlx::query_scalar("SELECT a FROM t").fetch_one(&mut *a).await.unwrap();
        let from_b: i64 = sqlx::query_scalar("SELECT a FROM t").fetch_one(&mut *b).await.unwrap();
        assert_eq!(from_a, 7);
        assert_eq!(from_b, 7);
        drop(a);
        drop(b);

        store.close().await;
    }

    #[tokio::test]
    async fn test_bad_ddl_is_schema_error() {
        let store = MemoryStore::open(&LoaderConfig::default()).await.unwrap();
        let err = store.apply_schema("CREATE TABLE t(a INTEGER,a TEXT)").await.unwrap_err();
        assert!(matches!(err, AppError::SchemaError(_)));
        store.close().await;
    }

    #[tokio::test]
    async fn test_short_row_is_rejected() {
        let store = MemoryStore::open(&LoaderConfig::default()).await.unwrap();
        store.apply_schema("CREATE TABLE t(a INTEGER,b TEXT)").await.unwrap();

        let insert = InsertStatement::new("INSERT INTO t (a,b) VALUES (?,?)".to_string(), 2);
        let mut inserter = store.begin_insert(&insert).await.unwrap();
        let err = inserter
            .insert(TypedRow::new(vec![CellValue::Integer(1)]))
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::ExecutionError(_)));
        inserter.rollback().await.unwrap();

        let rows = store.query("SELECT COUNT(*) AS n FROM t").await.unwrap();
        let n: i64 = rows[0].get("n");
        assert_eq!(n, 0);
        store.close().await;
    }

    #[tokio::test]
    async fn test_prepare_against_missing_table_fails() {
        let store = MemoryStore::open(&LoaderConfig::default()).await.unwrap();
        let insert = InsertStatement::new("INSERT INTO nope (a) VALUES (?)".to_string(), 1);
        let err = store.begin_insert(&insert).await.err().unwrap();
        assert!(matches!(err, AppError::ExecutionError(_)));
        store.close().await;
    }
}
