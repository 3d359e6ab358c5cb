use crate::utils::error::TableError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// One country of the source dataset with its per-year records.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RawCountry {
    pub name: String,
    pub continent: String,
    pub years: Vec<RawYearRecord>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RawYearRecord {
    pub year: i64,
    #[serde(default)]
    pub gdp: Measure,
    #[serde(default)]
    pub life_expectancy: Measure,
    #[serde(default)]
    pub population: Measure,
}

/// A measurement as it arrives from the loader: datasets mix numbers,
/// numeric strings and nulls in the same field.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(untagged)]
pub enum Measure {
    Number(f64),
    Text(String),
    #[default]
    Missing,
}

impl Measure {
    /// Numeric coercion. Text that does not parse yields NaN, a missing value
    /// counts as zero.
    pub fn to_number(&self) -> f64 {
        match self {
            Measure::Number(n) => *n,
            Measure::Text(s) => parse_number(s),
            Measure::Missing => 0.0,
        }
    }

    pub fn as_cell(&self) -> CellValue<'_> {
        match self {
            Measure::Number(n) => CellValue::Number(*n),
            Measure::Text(s) => CellValue::Text(s),
            Measure::Missing => CellValue::Null,
        }
    }
}

impl From<f64> for Measure {
    fn from(value: f64) -> Self {
        Measure::Number(value)
    }
}

impl From<i64> for Measure {
    fn from(value: i64) -> Self {
        Measure::Number(value as f64)
    }
}

impl From<&str> for Measure {
    fn from(value: &str) -> Self {
        Measure::Text(value.to_string())
    }
}

/// Parses a numeric string the way a browser coerces it: surrounding
/// whitespace is ignored, an empty string is zero, `0x`/`0o`/`0b` prefixes
/// select a radix and only the spelled-out `Infinity` is accepted.
pub fn parse_number(text: &str) -> f64 {
    let trimmed = text.trim();
    if trimmed.is_empty() {
        return 0.0;
    }

    let radix = match trimmed.get(..2) {
        Some("0x") | Some("0X") => Some(16),
        Some("0o") | Some("0O") => Some(8),
        Some("0b") | Some("0B") => Some(2),
        _ => None,
    };
    if let Some(radix) = radix {
        return u64::from_str_radix(&trimmed[2..], radix)
            .map(|v| v as f64)
            .unwrap_or(f64::NAN);
    }

    match trimmed {
        "Infinity" | "+Infinity" => return f64::INFINITY,
        "-Infinity" => return f64::NEG_INFINITY,
        _ => {}
    }

    // Rust accepts "inf" and "nan" spellings that a browser rejects.
    let lowered = trimmed.to_ascii_lowercase();
    if lowered.contains("inf") || lowered.contains("nan") {
        return f64::NAN;
    }

    trimmed.parse::<f64>().unwrap_or(f64::NAN)
}

/// Renders a number the way it shows up as a plain table cell: integral
/// values carry no fractional part, and magnitudes from `1e21` up or below
/// `1e-6` switch to exponent form with a signed exponent (`1e+21`, `1e-7`).
pub fn number_to_string(value: f64) -> String {
    if value.is_nan() {
        return "NaN".to_string();
    }
    if value.is_infinite() {
        return if value > 0.0 { "Infinity" } else { "-Infinity" }.to_string();
    }
    if value == 0.0 {
        return "0".to_string();
    }

    let magnitude = value.abs();
    if !(1e-6..1e21).contains(&magnitude) {
        let exponent_form = format!("{:e}", value);
        return match exponent_form.split_once('e') {
            Some((mantissa, exponent)) if !exponent.starts_with('-') => {
                format!("{}e+{}", mantissa, exponent)
            }
            _ => exponent_form,
        };
    }
    format!("{}", value)
}

/// One (country, year) row. Aggregated rows share this shape.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FlatRow {
    pub name: String,
    pub continent: String,
    pub gdp: Measure,
    pub life_expectancy: Measure,
    pub population: Measure,
    pub year: i64,
}

/// Rollup of one (category, year) cell; same shape as a flat row.
pub type AggregatedRow = FlatRow;

impl FlatRow {
    pub fn value(&self, column: Column) -> CellValue<'_> {
        match column {
            Column::Name => CellValue::Text(&self.name),
            Column::Continent => CellValue::Text(&self.continent),
            Column::Gdp => self.gdp.as_cell(),
            Column::LifeExpectancy => self.life_expectancy.as_cell(),
            Column::Population => self.population.as_cell(),
            Column::Year => CellValue::Number(self.year as f64),
        }
    }
}

/// Borrowed view of a single field, compared with strict equality:
/// `"2000"` and `2000` are different values, NaN equals nothing.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum CellValue<'a> {
    Text(&'a str),
    Number(f64),
    Null,
}

impl CellValue<'_> {
    pub fn to_number(&self) -> f64 {
        match self {
            CellValue::Text(s) => parse_number(s),
            CellValue::Number(n) => *n,
            CellValue::Null => 0.0,
        }
    }

    /// String form used as a grouping key and for unformatted display.
    pub fn to_key_string(&self) -> String {
        match self {
            CellValue::Text(s) => s.to_string(),
            CellValue::Number(n) => number_to_string(*n),
            CellValue::Null => "null".to_string(),
        }
    }
}

impl fmt::Display for CellValue<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CellValue::Null => Ok(()),
            other => f.write_str(&other.to_key_string()),
        }
    }
}

/// The fixed set of table columns, declared in display order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Column {
    Name,
    Continent,
    Gdp,
    LifeExpectancy,
    Population,
    Year,
}

impl Column {
    pub const ALL: [Column; 6] = [
        Column::Name,
        Column::Continent,
        Column::Gdp,
        Column::LifeExpectancy,
        Column::Population,
        Column::Year,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Column::Name => "name",
            Column::Continent => "continent",
            Column::Gdp => "gdp",
            Column::LifeExpectancy => "life_expectancy",
            Column::Population => "population",
            Column::Year => "year",
        }
    }

    /// Columns that always hold measurements.
    pub fn is_measure(&self) -> bool {
        matches!(
            self,
            Column::Gdp | Column::LifeExpectancy | Column::Population
        )
    }

    /// Parses a comma separated list such as `name,gdp,year`.
    pub fn parse_list(list: &str) -> Result<Vec<Column>, TableError> {
        list.split(',')
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(Column::from_str)
            .collect()
    }
}

impl fmt::Display for Column {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Column {
    type Err = TableError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Column::ALL
            .iter()
            .copied()
            .find(|c| c.as_str() == s)
            .ok_or_else(|| TableError::UnknownColumn {
                name: s.to_string(),
            })
    }
}
