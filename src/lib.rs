//! Load delimited text into a queryable in-memory SQLite table.
//!
//! A caller hands over a [`RowReader`] (header row first), a table name and an
//! optional [`Schema`]; column types are inferred from the first data row when
//! no schema is given. The result is a [`StoreHandle`] owning a memory-resident
//! database with exactly one populated table.

mod application;
mod domain;
mod infrastructure;

pub use crate::application::use_cases::csv_loader::{infer_schema, load, CsvLoader};
pub use crate::application::use_cases::schema_synthesizer::{build_create_table, build_insert};
pub use crate::application::use_cases::value_coercer::coerce;
pub use crate::domain::csv::{
    CellValue, Column, HeaderIndexMap, InsertStatement, LoaderConfig, Schema, SemanticType,
    TypedRow,
};
pub use crate::domain::error::{AppError, ErrorKind, Result};
pub use crate::infrastructure::config::ConfigService;
pub use crate::infrastructure::csv::type_detector::detect;
pub use crate::infrastructure::csv::{parse_datetime, CsvRowSource, RowReader, VecRowReader};
pub use crate::infrastructure::db::{MemoryStore, RowInserter, StoreHandle};

/// Install a `fmt` subscriber filtered by `filter` (e.g. `"info"`).
/// Safe to call more than once; later calls are no-ops.
pub fn init_tracing(filter: &str) {
    let _ = tracing_subscriber::fmt().with_env_filter(filter).try_init();
}
