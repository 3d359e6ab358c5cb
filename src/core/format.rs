use crate::domain::model::{number_to_string, Column, FlatRow};

const SI_PREFIXES: [&str; 17] = [
    "y", "z", "a", "f", "p", "n", "µ", "m", "", "k", "M", "G", "T", "P", "E", "Z", "Y",
];
const SI_OFFSET: i32 = 8;
const SI_WIDTH: usize = 4;

/// Display text for one cell. Measures are formatted, every other column is
/// shown as stored.
pub fn format_cell(column: Column, row: &FlatRow) -> String {
    let value = row.value(column);
    match column {
        Column::LifeExpectancy => format_rounded(value.to_number(), 1),
        Column::Population => format_grouped(value.to_number()),
        Column::Gdp => format_si(value.to_number()),
        Column::Name | Column::Continent | Column::Year => value.to_string(),
    }
}

/// Rounds half up to `digits` decimals and drops a trailing `.0`.
pub fn format_rounded(value: f64, digits: i32) -> String {
    let scale = 10f64.powi(digits);
    number_to_string(round_half_up(value * scale) / scale)
}

fn round_half_up(value: f64) -> f64 {
    (value + 0.5).floor()
}

/// Thousands separators on the integer part: `1234567` -> `1,234,567`.
pub fn format_grouped(value: f64) -> String {
    if !value.is_finite() {
        return number_to_string(value);
    }

    let text = number_to_string(value.abs());
    let (integer, fraction) = match text.split_once('.') {
        Some((i, f)) => (i, Some(f)),
        None => (text.as_str(), None),
    };

    let mut grouped = String::with_capacity(text.len() + integer.len() / 3 + 1);
    if value < 0.0 {
        grouped.push('-');
    }
    for (i, digit) in integer.chars().enumerate() {
        if i > 0 && (integer.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(digit);
    }
    if let Some(fraction) = fraction {
        grouped.push('.');
        grouped.push_str(fraction);
    }
    grouped
}

/// SI-prefixed magnitude with one decimal, right aligned to four characters:
/// `2.3e12` -> `2.3T`, `5` -> ` 5.0`.
pub fn format_si(value: f64) -> String {
    let text = if !value.is_finite() {
        number_to_string(value)
    } else if value == 0.0 {
        "0.0".to_string()
    } else {
        let mut exponent = ((value.abs().log10() / 3.0).floor() as i32).clamp(-SI_OFFSET, SI_OFFSET);
        let mut mantissa = format!("{:.1}", value / 10f64.powi(exponent * 3));
        // 999.96 rounds up into the next prefix
        if exponent < SI_OFFSET && mantissa.trim_start_matches('-').len() > 5 {
            exponent += 1;
            mantissa = format!("{:.1}", value / 10f64.powi(exponent * 3));
        }
        format!("{}{}", mantissa, SI_PREFIXES[(exponent + SI_OFFSET) as usize])
    };

    format!("{:>width$}", text, width = SI_WIDTH)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::model::Measure;

    #[test]
    fn test_life_expectancy_rounds_to_one_decimal() {
        assert_eq!(format_rounded(72.345, 1), "72.3");
        assert_eq!(format_rounded(72.36, 1), "72.4");
        assert_eq!(format_rounded(70.0, 1), "70");
        assert_eq!(format_rounded(f64::NAN, 1), "NaN");
    }

    #[test]
    fn test_population_grouping() {
        assert_eq!(format_grouped(1234567.0), "1,234,567");
        assert_eq!(format_grouped(999.0), "999");
        assert_eq!(format_grouped(1000.0), "1,000");
        assert_eq!(format_grouped(-1234.5), "-1,234.5");
        assert_eq!(format_grouped(0.0), "0");
    }

    #[test]
    fn test_gdp_si_prefix() {
        assert_eq!(format_si(2.3e12), "2.3T");
        assert_eq!(format_si(1.2e6), "1.2M");
        assert_eq!(format_si(1234.0), "1.2k");
        assert_eq!(format_si(999.96), "1.0k");
        assert_eq!(format_si(5.0), " 5.0");
        assert_eq!(format_si(0.0), " 0.0");
        assert_eq!(format_si(-4.56e9), "-4.6G");
        assert_eq!(format_si(f64::NAN), " NaN");
    }

    #[test]
    fn test_format_cell_by_column() {
        let row = FlatRow {
            name: "Chile".to_string(),
            continent: "Americas".to_string(),
            gdp: Measure::Number(2.3e12),
            life_expectancy: Measure::Text("72.345".to_string()),
            population: Measure::Number(1234567.0),
            year: 2005,
        };

        assert_eq!(format_cell(Column::Name, &row), "Chile");
        assert_eq!(format_cell(Column::Continent, &row), "Americas");
        assert_eq!(format_cell(Column::Gdp, &row), "2.3T");
        assert_eq!(format_cell(Column::LifeExpectancy, &row), "72.3");
        assert_eq!(format_cell(Column::Population, &row), "1,234,567");
        assert_eq!(format_cell(Column::Year, &row), "2005");
    }
}
