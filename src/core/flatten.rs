use crate::domain::model::{FlatRow, RawCountry};

/// Expands every (country, year) pair into its own row, keeping source order.
pub fn flatten(raw: &[RawCountry]) -> Vec<FlatRow> {
    let mut rows = Vec::with_capacity(raw.iter().map(|c| c.years.len()).sum());

    for country in raw {
        for year in &country.years {
            rows.push(FlatRow {
                name: country.name.clone(),
                continent: country.continent.clone(),
                gdp: year.gdp.clone(),
                life_expectancy: year.life_expectancy.clone(),
                population: year.population.clone(),
                year: year.year,
            });
        }
    }

    tracing::debug!("Flattened {} countries into {} rows", raw.len(), rows.len());
    rows
}
