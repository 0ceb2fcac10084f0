// ============================================================
// CSV INFRASTRUCTURE LAYER
// ============================================================
// Row reading, date parsing, and per-value type detection

mod date_parser;
mod row_reader;
pub mod type_detector;

pub use date_parser::parse_datetime;
pub use row_reader::{CsvRowSource, RowReader, VecRowReader};
