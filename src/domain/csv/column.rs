// ============================================================
// COLUMN / SCHEMA TYPES
// ============================================================
// Ordered, named, typed table shape and the header lookup built per load

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use super::SemanticType;
use crate::domain::error::{AppError, Result};

/// A single named, typed column
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Column {
    pub name: String,

    #[serde(rename = "type")]
    pub semantic_type: SemanticType,
}

impl Column {
    pub fn new(name: impl Into<String>, semantic_type: SemanticType) -> Self {
        Self {
            name: name.into(),
            semantic_type,
        }
    }
}

/// Ordered column list. Fixes both the table shape and the insert binding
/// order, independent of the source header order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Schema {
    columns: Vec<Column>,
}

impl Schema {
    pub fn new(columns: Vec<Column>) -> Self {
        Self { columns }
    }

    /// Parse a column descriptor list such as
    /// `[{"name":"a","type":"integer"}]`
    pub fn from_json(json: &str) -> Result<Self> {
        serde_json::from_str(json)
            .map_err(|e| AppError::ConfigError(format!("Invalid column descriptor list: {}", e)))
    }

    pub fn columns(&self) -> &[Column] {
        &self.columns
    }

    pub fn len(&self) -> usize {
        self.columns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.columns.is_empty()
    }

    pub fn column_names(&self) -> Vec<&str> {
        self.columns.iter().map(|c| c.name.as_str()).collect()
    }

    /// Type of the first column carrying `name`
    pub fn type_of(&self, name: &str) -> Option<SemanticType> {
        self.columns
            .iter()
            .find(|c| c.name == name)
            .map(|c| c.semantic_type)
    }
}

impl From<Vec<Column>> for Schema {
    fn from(columns: Vec<Column>) -> Self {
        Self::new(columns)
    }
}

/// Column name -> offset of that name in the source header row.
///
/// Columns whose name does not appear in the header are absent.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct HeaderIndexMap {
    offsets: HashMap<String, usize>,
}

impl HeaderIndexMap {
    /// Build the map for `schema` against `header`. A header name that
    /// occurs more than once resolves to its last occurrence.
    pub fn build(schema: &Schema, header: &[String]) -> Self {
        let mut offsets = HashMap::new();
        for column in schema.columns() {
            for (idx, header_name) in header.iter().enumerate() {
                if *header_name == column.name {
                    offsets.insert(column.name.clone(), idx);
                }
            }
        }
        Self { offsets }
    }

    pub fn get(&self, name: &str) -> Option<usize> {
        self.offsets.get(name).copied()
    }

    pub fn len(&self) -> usize {
        self.offsets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.offsets.is_empty()
    }
}
