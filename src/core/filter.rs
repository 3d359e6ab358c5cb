use crate::domain::model::{CellValue, Column, FlatRow};

/// Keeps rows whose `field` strictly equals one of `allowed`, in input order.
pub fn apply_filter(rows: &[FlatRow], allowed: &[CellValue<'_>], field: Column) -> Vec<FlatRow> {
    let filtered: Vec<FlatRow> = rows
        .iter()
        .filter(|row| {
            let value = row.value(field);
            allowed.iter().any(|a| *a == value)
        })
        .cloned()
        .collect();

    tracing::debug!(
        "Filter on {}: {} of {} rows kept",
        field,
        filtered.len(),
        rows.len()
    );
    filtered
}

pub fn filter_by_year(rows: &[FlatRow], year: i64) -> Vec<FlatRow> {
    apply_filter(rows, &[CellValue::Number(year as f64)], Column::Year)
}

/// An empty selection means no continent filter at all, so every row is
/// returned rather than none.
pub fn filter_by_continent<S: AsRef<str>>(rows: &[FlatRow], continents: &[S]) -> Vec<FlatRow> {
    if continents.is_empty() {
        return rows.to_vec();
    }

    let allowed: Vec<CellValue<'_>> = continents
        .iter()
        .map(|c| CellValue::Text(c.as_ref()))
        .collect();
    apply_filter(rows, &allowed, Column::Continent)
}
