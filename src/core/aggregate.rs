//! Two-level rollup of rows by a category column and year.
//!
//! Rows are grouped first by the value of the chosen column, then by year.
//! Both levels iterate in the order their keys were first seen, so the output
//! lists categories in discovery order and, within a category, years in
//! discovery order. Each (category, year) leaf becomes one summary row:
//!
//! ```text
//! A  X 2000 gdp 10 pop 100 life 70      X  X 2000 gdp 30 pop 300 life 60
//! B  X 2000 gdp 20 pop 200 life 60  ->
//! ```

use crate::domain::model::{AggregatedRow, Column, FlatRow, Measure};
use std::collections::HashMap;

/// Insertion-ordered map from a key to grouped values.
#[derive(Debug, Clone)]
pub struct OrderedGroups<V> {
    index: HashMap<String, usize>,
    entries: Vec<(String, V)>,
}

impl<V> OrderedGroups<V> {
    pub fn new() -> Self {
        Self {
            index: HashMap::new(),
            entries: Vec::new(),
        }
    }

    /// Returns the slot for `key`, creating it at the end when first seen.
    pub fn entry_or_insert_with<F: FnOnce() -> V>(&mut self, key: String, make: F) -> &mut V {
        let position = match self.index.get(&key) {
            Some(&position) => position,
            None => {
                let position = self.entries.len();
                self.index.insert(key.clone(), position);
                self.entries.push((key, make()));
                position
            }
        };
        &mut self.entries[position].1
    }

    pub fn get(&self, key: &str) -> Option<&V> {
        self.index.get(key).map(|&i| &self.entries[i].1)
    }

    /// Insertion index of `key`.
    pub fn position(&self, key: &str) -> Option<usize> {
        self.index.get(key).copied()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &V)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v))
    }
}

impl<V> Default for OrderedGroups<V> {
    fn default() -> Self {
        Self::new()
    }
}

/// Category -> year -> member rows.
pub type CategoryYearGroups<'a> = OrderedGroups<OrderedGroups<Vec<&'a FlatRow>>>;

pub fn group_by_category_and_year(rows: &[FlatRow], group_field: Column) -> CategoryYearGroups<'_> {
    let mut groups: CategoryYearGroups<'_> = OrderedGroups::new();

    for row in rows {
        let category = row.value(group_field).to_key_string();
        let year = row.year.to_string();
        groups
            .entry_or_insert_with(category, OrderedGroups::new)
            .entry_or_insert_with(year, Vec::new)
            .push(row);
    }

    groups
}

/// Summarizes one leaf cell. `leaves` is never empty.
fn rollup(leaves: &[&FlatRow], group_field: Column) -> AggregatedRow {
    let first = leaves[0];

    let population: f64 = leaves.iter().map(|r| r.population.to_number()).sum();
    let gdp: f64 = leaves.iter().map(|r| r.gdp.to_number()).sum();
    let life_expectancy = leaves
        .iter()
        .map(|r| r.life_expectancy.to_number())
        .filter(|v| !v.is_nan())
        .fold(None, |min: Option<f64>, v| Some(min.map_or(v, |m| m.min(v))))
        .unwrap_or(f64::NAN);

    if gdp.is_nan() || population.is_nan() {
        tracing::warn!(
            "Non-numeric input in group '{}' year {}: aggregate is NaN",
            first.value(group_field).to_key_string(),
            first.year
        );
    }

    AggregatedRow {
        name: first.value(group_field).to_key_string(),
        continent: first.continent.clone(),
        gdp: Measure::Number(gdp),
        life_expectancy: Measure::Number(life_expectancy),
        population: Measure::Number(population),
        year: first.year,
    }
}

/// Rolls rows up per (group_field, year). Without a grouping column the rows
/// pass through untouched.
pub fn aggregate(rows: &[FlatRow], group_field: Option<Column>) -> Vec<AggregatedRow> {
    let Some(group_field) = group_field else {
        return rows.to_vec();
    };

    let groups = group_by_category_and_year(rows, group_field);
    let mut aggregated = Vec::new();
    for (_, years) in groups.iter() {
        for (_, leaves) in years.iter() {
            aggregated.push(rollup(leaves, group_field));
        }
    }

    tracing::debug!(
        "Aggregated {} rows by {} into {} rows",
        rows.len(),
        group_field,
        aggregated.len()
    );
    aggregated
}
