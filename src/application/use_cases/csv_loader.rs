// ============================================================
// CSV LOADER USE CASE
// ============================================================
// Orchestrate header read, schema resolution, table creation and bulk insert

use crate::application::use_cases::row_materializer::materialize;
use crate::application::use_cases::schema_synthesizer::{build_create_table, build_insert};
use crate::domain::csv::{Column, HeaderIndexMap, LoaderConfig, Schema};
use crate::domain::error::{AppError, Result};
use crate::infrastructure::csv::type_detector::detect;
use crate::infrastructure::csv::RowReader;
use crate::infrastructure::db::{MemoryStore, RowInserter, StoreHandle};

/// Loads one delimited stream into a fresh in-memory table
pub struct CsvLoader {
    config: LoaderConfig,
}

impl CsvLoader {
    pub fn new(config: LoaderConfig) -> Self {
        Self { config }
    }

    /// Create with default configuration
    pub fn default_config() -> Self {
        Self::new(LoaderConfig::default())
    }

    pub fn config(&self) -> &LoaderConfig {
        &self.config
    }

    /// Load every row of `reader` into a new table named `table_name`.
    ///
    /// An empty `schema_hint` infers the schema from the first data row.
    /// Rows are read and inserted strictly in sequence on one connection;
    /// the first failing row aborts the whole load and the store is
    /// discarded, so a handle is only ever returned fully populated.
    pub async fn load<R>(
        &self,
        table_name: &str,
        reader: &mut R,
        schema_hint: Schema,
    ) -> Result<StoreHandle>
    where
        R: RowReader + ?Sized,
    {
        self.config.validate()?;

        tracing::info!(table = table_name, "Loading delimited data");

        let header = reader
            .read_row()?
            .ok_or_else(|| AppError::IoError("Stream is empty: no header row".to_string()))?;

        // Always consumed, even with a schema hint: a header-only stream
        // has nothing to load.
        let first_row = reader.read_row()?.ok_or_else(|| {
            AppError::IoError("Stream has a header but no data rows".to_string())
        })?;

        let schema = if schema_hint.is_empty() {
            let inferred = infer_schema(&header, &first_row)?;
            tracing::debug!(table = table_name, schema = ?inferred, "Inferred schema from first row");
            inferred
        } else {
            schema_hint
        };

        let index_map = HeaderIndexMap::build(&schema, &header);
        if index_map.len() < schema.len() {
            tracing::warn!(
                table = table_name,
                resolved = index_map.len(),
                columns = schema.len(),
                "Some schema columns are not present in the header; inserts will fail"
            );
        }

        let store = MemoryStore::open(&self.config).await?;
        populate(store, table_name, schema, &index_map, first_row, reader).await
    }
}

/// Load with default configuration
pub async fn load<R>(table_name: &str, reader: &mut R, schema_hint: Schema) -> Result<StoreHandle>
where
    R: RowReader + ?Sized,
{
    CsvLoader::default_config()
        .load(table_name, reader, schema_hint)
        .await
}

/// Pair cell `i` of the first data row with header name `i` and detect its type.
pub fn infer_schema(header: &[String], first_row: &[String]) -> Result<Schema> {
    let mut columns = Vec::with_capacity(first_row.len());
    for (idx, value) in first_row.iter().enumerate() {
        let name = header.get(idx).ok_or_else(|| {
            AppError::IoError(format!(
                "First data row has {} cells but the header has only {}",
                first_row.len(),
                header.len()
            ))
        })?;
        columns.push(Column::new(name.clone(), detect(value)));
    }
    Ok(Schema::new(columns))
}

/// Create the table in `store` and insert `first_row` followed by the rest
/// of `reader`. Any failure closes `store` before the error is returned.
async fn populate<R>(
    store: MemoryStore,
    table_name: &str,
    schema: Schema,
    index_map: &HeaderIndexMap,
    first_row: Vec<String>,
    reader: &mut R,
) -> Result<StoreHandle>
where
    R: RowReader + ?Sized,
{
    let ddl = build_create_table(table_name, schema.columns());
    tracing::debug!(sql = %ddl, "Creating table");
    let applied = store.apply_schema(&ddl).await;
    if let Err(e) = applied {
        return Err(abort(store, table_name, e).await);
    }

    let insert = build_insert(table_name, &schema);
    tracing::debug!(sql = %insert.sql(), "Preparing insert");
    let mut inserter = match store.begin_insert(&insert).await {
        Ok(inserter) => inserter,
        Err(e) => return Err(abort(store, table_name, e).await),
    };

    let inserted = insert_rows(&mut inserter, first_row, reader, &schema, index_map).await;
    if let Err(e) = inserted {
        if let Err(rollback_err) = inserter.rollback().await {
            tracing::warn!(error = %rollback_err, "Rollback after failed load also failed");
        }
        return Err(abort(store, table_name, e).await);
    }

    let rows_loaded = match inserter.commit().await {
        Ok(n) => n,
        Err(e) => return Err(abort(store, table_name, e).await),
    };

    tracing::info!(
        table = table_name,
        columns = schema.len(),
        rows = rows_loaded,
        "Load complete"
    );

    Ok(StoreHandle::new(
        store,
        table_name.to_string(),
        schema,
        rows_loaded,
    ))
}

async fn insert_rows<R>(
    inserter: &mut RowInserter<'_>,
    first_row: Vec<String>,
    reader: &mut R,
    schema: &Schema,
    index_map: &HeaderIndexMap,
) -> Result<()>
where
    R: RowReader + ?Sized,
{
    inserter
        .insert(materialize(&first_row, schema, index_map))
        .await?;

    while let Some(row) = reader.read_row()? {
        inserter.insert(materialize(&row, schema, index_map)).await?;
    }

    Ok(())
}

async fn abort(store: MemoryStore, table_name: &str, err: AppError) -> AppError {
    tracing::warn!(table = table_name, error = %err, "Load aborted, discarding store");
    store.close().await;
    err
}
