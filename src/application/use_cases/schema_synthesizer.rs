// Table definition and insert statement text for a resolved schema.
//
// Identifiers are emitted as-is. Table and column names must already be
// valid SQLite identifiers; quoting them is the caller's responsibility.

use crate::domain::csv::{Column, InsertStatement, Schema};

/// `CREATE TABLE t(a INTEGER DEFAULT 0,b TEXT DEFAULT '')`
pub fn build_create_table(table_name: &str, columns: &[Column]) -> String {
    let column_defs: Vec<String> = columns
        .iter()
        .map(|column| {
            format!(
                "{} {} {}",
                column.name,
                column.semantic_type.native_type(),
                column.semantic_type.default_clause()
            )
        })
        .collect();

    format!("CREATE TABLE {}({})", table_name, column_defs.join(","))
}

/// One positional placeholder per schema column, in schema order.
pub fn build_insert(table_name: &str, schema: &Schema) -> InsertStatement {
    let names = schema.column_names();
    let binds = vec!["?"; names.len()].join(",");
    let sql = format!(
        "INSERT INTO {} ({}) VALUES ({})",
        table_name,
        names.join(","),
        binds
    );
    InsertStatement::new(sql, names.len())
}
