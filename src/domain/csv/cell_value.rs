// ============================================================
// TYPED CELL VALUES
// ============================================================
// Values produced by coercion and bound into the insert statement

use chrono::NaiveDateTime;

/// One coerced cell.
///
/// `Text` is also the fallback for any cell that failed to parse as its
/// column's declared type, so a typed column may still receive text.
#[derive(Debug, Clone, PartialEq)]
pub enum CellValue {
    Integer(i64),
    Real(f64),
    Text(String),
    DateTime(NaiveDateTime),
}

/// Values aligned to schema order, holding only the columns that resolved
/// against the header.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TypedRow {
    values: Vec<CellValue>,
}

impl TypedRow {
    pub fn new(values: Vec<CellValue>) -> Self {
        Self { values }
    }

    pub fn push(&mut self, value: CellValue) {
        self.values.push(value);
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn values(&self) -> &[CellValue] {
        &self.values
    }

    pub fn into_values(self) -> Vec<CellValue> {
        self.values
    }
}
