pub mod csv_loader;
pub mod row_materializer;
pub mod schema_synthesizer;
pub mod value_coercer;
