use crate::core::format::format_cell;
use crate::core::sort::{sort_by_header, TableViewState};
use crate::domain::model::{Column, FlatRow};
use serde::Serialize;

pub const TABLE_CAPTION: &str = "World Countries Ranking";

/// Columns shown when none are configured.
pub const DEFAULT_COLUMNS: [Column; 6] = Column::ALL;

/// A table ready for a rendering surface: header columns plus the rows bound
/// to the body, in display order.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Table {
    pub caption: String,
    pub columns: Vec<Column>,
    pub rows: Vec<FlatRow>,
}

impl Table {
    pub fn headers(&self) -> Vec<&'static str> {
        self.columns.iter().map(|c| c.as_str()).collect()
    }

    /// Formatted cells, one vector per row.
    pub fn body(&self) -> Vec<Vec<String>> {
        self.rows
            .iter()
            .map(|row| self.columns.iter().map(|&c| format_cell(c, row)).collect())
            .collect()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Reorders the body in response to a header activation.
    pub fn sort_by(&mut self, header: Column, state: TableViewState) -> TableViewState {
        sort_by_header(&mut self.rows, header, state)
    }
}

/// Builds a fresh table; nothing from a previous table carries over.
pub fn present(columns: &[Column], rows: Vec<FlatRow>) -> Table {
    if rows.is_empty() {
        tracing::warn!("No rows match the current selection");
    }
    tracing::debug!("Presenting {} rows across {} columns", rows.len(), columns.len());

    Table {
        caption: TABLE_CAPTION.to_string(),
        columns: columns.to_vec(),
        rows,
    }
}
