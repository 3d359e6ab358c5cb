use crate::domain::model::{Column, FlatRow};
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ValueKind {
    Textual,
    Numeric,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SortDirection {
    Ascending,
    Descending,
}

type RowComparator = fn(&FlatRow, &FlatRow) -> Ordering;

/// How one column compares rows.
#[derive(Clone, Copy)]
pub struct ColumnComparator {
    pub column: Column,
    pub kind: ValueKind,
    pub equal: fn(&FlatRow, &FlatRow) -> bool,
    pub ascending: RowComparator,
    pub descending: RowComparator,
}

impl ColumnComparator {
    pub fn compare(&self, a: &FlatRow, b: &FlatRow, direction: SortDirection) -> Ordering {
        match direction {
            SortDirection::Ascending => (self.ascending)(a, b),
            SortDirection::Descending => (self.descending)(a, b),
        }
    }
}

/// NaN equals NaN here so that NaN rows fall back to the name tie-break.
fn same_number(a: f64, b: f64) -> bool {
    a == b || (a.is_nan() && b.is_nan())
}

/// Orders two coerced measures in `direction`. NaN sorts after every number
/// in either direction.
fn numeric(a: f64, b: f64, direction: SortDirection) -> Ordering {
    match (a.is_nan(), b.is_nan()) {
        (true, true) => Ordering::Equal,
        (true, false) => Ordering::Greater,
        (false, true) => Ordering::Less,
        (false, false) => {
            let ordering = a.partial_cmp(&b).unwrap_or(Ordering::Equal);
            match direction {
                SortDirection::Ascending => ordering,
                SortDirection::Descending => ordering.reverse(),
            }
        }
    }
}

macro_rules! text_comparator {
    ($column:expr, $field:ident) => {
        ColumnComparator {
            column: $column,
            kind: ValueKind::Textual,
            equal: |a, b| a.$field == b.$field,
            ascending: |a, b| a.$field.cmp(&b.$field),
            descending: |a, b| b.$field.cmp(&a.$field),
        }
    };
}

macro_rules! measure_comparator {
    ($column:expr, $field:ident) => {
        ColumnComparator {
            column: $column,
            kind: ValueKind::Numeric,
            equal: |a, b| same_number(a.$field.to_number(), b.$field.to_number()),
            ascending: |a, b| {
                numeric(a.$field.to_number(), b.$field.to_number(), SortDirection::Ascending)
            },
            descending: |a, b| {
                numeric(a.$field.to_number(), b.$field.to_number(), SortDirection::Descending)
            },
        }
    };
}

/// Comparator for every column, in `Column::ALL` order.
pub static COMPARATORS: [ColumnComparator; 6] = [
    text_comparator!(Column::Name, name),
    text_comparator!(Column::Continent, continent),
    measure_comparator!(Column::Gdp, gdp),
    measure_comparator!(Column::LifeExpectancy, life_expectancy),
    measure_comparator!(Column::Population, population),
    ColumnComparator {
        column: Column::Year,
        kind: ValueKind::Numeric,
        equal: |a, b| a.year == b.year,
        ascending: |a, b| a.year.cmp(&b.year),
        descending: |a, b| b.year.cmp(&a.year),
    },
];

pub fn comparator_for(column: Column) -> &'static ColumnComparator {
    &COMPARATORS[column as usize]
}

/// Sort state carried between header activations. A single toggle is shared
/// by all headers and flips on every activation, whichever header it is.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TableViewState {
    pub sort_toggle: bool,
    pub sorted_by: Option<Column>,
}

impl Default for TableViewState {
    fn default() -> Self {
        Self {
            sort_toggle: true,
            sorted_by: None,
        }
    }
}

impl TableViewState {
    pub fn new() -> Self {
        Self::default()
    }

    /// State after `header` has been activated.
    pub fn activate(self, header: Column) -> Self {
        Self {
            sort_toggle: !self.sort_toggle,
            sorted_by: Some(header),
        }
    }

    /// Text sorts descending while the toggle is set, numbers ascending.
    pub fn direction(&self, kind: ValueKind) -> SortDirection {
        match (kind, self.sort_toggle) {
            (ValueKind::Textual, true) | (ValueKind::Numeric, false) => SortDirection::Descending,
            (ValueKind::Textual, false) | (ValueKind::Numeric, true) => SortDirection::Ascending,
        }
    }
}

/// Orders two rows by `header` under `state`; equal values fall back to
/// ascending name order whatever the toggle says.
pub fn compare_rows(a: &FlatRow, b: &FlatRow, header: Column, state: &TableViewState) -> Ordering {
    let comparator = comparator_for(header);
    if (comparator.equal)(a, b) {
        return a.name.cmp(&b.name);
    }
    comparator.compare(a, b, state.direction(comparator.kind))
}

/// Handles a header activation: flips the toggle, stably sorts `rows` and
/// returns the new state.
pub fn sort_by_header(rows: &mut [FlatRow], header: Column, state: TableViewState) -> TableViewState {
    let next = state.activate(header);
    rows.sort_by(|a, b| compare_rows(a, b, header, &next));

    tracing::debug!(
        "Sorted {} rows by {} ({:?})",
        rows.len(),
        header,
        next.direction(comparator_for(header).kind)
    );
    next
}
