// ============================================================
// SEMANTIC TYPE ENUM
// ============================================================
// The five column kinds a loaded table can carry

use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// Semantic type of a column, independent of the store's native type names
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SemanticType {
    /// Whole number without fractional or exponent form
    Integer,

    /// Number with fractional or exponent form
    Real,

    /// Anything that is neither numeric nor a recognizable date
    Text,

    /// Human-readable date or date-time
    Date,

    /// Integer epoch value. Never inferred, only reachable through an explicit schema.
    Timestamp,
}

impl SemanticType {
    /// Native SQLite type name used in the table definition
    pub fn native_type(&self) -> &'static str {
        match self {
            SemanticType::Integer => "INTEGER",
            SemanticType::Real => "REAL",
            SemanticType::Text => "TEXT",
            SemanticType::Date => "DATE",
            SemanticType::Timestamp => "TIMESTAMP",
        }
    }

    /// DEFAULT clause emitted next to the column definition
    pub fn default_clause(&self) -> &'static str {
        match self {
            SemanticType::Integer | SemanticType::Real => "DEFAULT 0",
            SemanticType::Text => "DEFAULT ''",
            SemanticType::Date | SemanticType::Timestamp => "DEFAULT CURRENT_TIMESTAMP",
        }
    }
}

impl std::fmt::Display for SemanticType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SemanticType::Integer => write!(f, "integer"),
            SemanticType::Real => write!(f, "real"),
            SemanticType::Text => write!(f, "text"),
            SemanticType::Date => write!(f, "date"),
            SemanticType::Timestamp => write!(f, "timestamp"),
        }
    }
}

impl FromStr for SemanticType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "integer" | "int" => Ok(SemanticType::Integer),
            "real" | "float" => Ok(SemanticType::Real),
            "text" | "string" => Ok(SemanticType::Text),
            "date" => Ok(SemanticType::Date),
            "timestamp" => Ok(SemanticType::Timestamp),
            other => Err(format!("unknown column type '{}'", other)),
        }
    }
}
