use serde::{Deserialize, Serialize};

/// A single table cell as reported by detection; `None` when the row had no
/// cell at that column.
pub type Cell = Option<String>;

pub type Row = Vec<Cell>;

/// Comma-joined row strings, led by a `Title` row unless it is the leading
/// orphan section.
pub type Section = Vec<String>;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageText {
    pub page_number: u32,
    pub text: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct DetectedTable {
    pub page: u32,
    pub rows: Vec<Row>,
    pub confidence: f32,
}

/// On-disk shape of the output: `{"table": [[...], ...]}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TableDocument {
    pub table: Vec<Section>,
}
