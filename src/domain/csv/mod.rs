// ============================================================
// CSV DOMAIN LAYER
// ============================================================
// Core types and value objects for loading delimited data
// No I/O, no async

mod cell_value;
mod column;
mod loader_config;
mod semantic_type;
mod statement;

pub use cell_value::{CellValue, TypedRow};
pub use column::{Column, HeaderIndexMap, Schema};
pub use loader_config::LoaderConfig;
pub use semantic_type::SemanticType;
pub use statement::InsertStatement;
