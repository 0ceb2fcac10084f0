// Raw row -> typed row aligned to schema order.

use super::value_coercer::coerce;
use crate::domain::csv::{HeaderIndexMap, Schema, TypedRow};

/// Walk `schema` in order and coerce the cell each column maps to.
///
/// Columns missing from `index_map`, or whose offset is past the end of
/// `raw_row`, are skipped rather than padded, so the result can be shorter
/// than the schema. The insert step rejects such rows.
pub fn materialize(raw_row: &[String], schema: &Schema, index_map: &HeaderIndexMap) -> TypedRow {
    let mut row = TypedRow::default();
    for column in schema.columns() {
        let Some(offset) = index_map.get(&column.name) else {
            continue;
        };
        if let Some(raw) = raw_row.get(offset) {
            row.push(coerce(raw, Some(column.semantic_type)));
        }
    }
    row
}
