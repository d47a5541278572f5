//! Logical column types.

use serde::{Deserialize, Serialize};

/// Inferred logical type for a column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ColumnType {
    /// Whole numbers (no decimal point).
    Integer,
    /// Floating-point numbers.
    Float,
    /// Boolean values (true/false, yes/no).
    Boolean,
    /// Date values.
    Date,
    /// Text/string values.
    String,
    /// Unable to determine type (e.g., all values missing).
    Unknown,
}

impl ColumnType {
    /// True if this type is numeric.
    pub fn is_numeric(&self) -> bool {
        matches!(self, ColumnType::Integer | ColumnType::Float)
    }
}

impl Default for ColumnType {
    fn default() -> Self {
        ColumnType::Unknown
    }
}
