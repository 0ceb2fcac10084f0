// ============================================================
// INSERT STATEMENT
// ============================================================
// Parameterized insert text plus its positional placeholder count

/// Insert statement reused for every row of a load
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InsertStatement {
    sql: String,
    placeholder_count: usize,
}

impl InsertStatement {
    pub fn new(sql: String, placeholder_count: usize) -> Self {
        Self {
            sql,
            placeholder_count,
        }
    }

    pub fn sql(&self) -> &str {
        &self.sql
    }

    /// Number of `?` parameters a row must supply
    pub fn placeholder_count(&self) -> usize {
        self.placeholder_count
    }
}
