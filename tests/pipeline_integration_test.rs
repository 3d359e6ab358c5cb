use anyhow::Result;
use std::collections::HashSet;
use std::io::Write;
use tempfile::NamedTempFile;
use world_table::core::aggregate::aggregate;
use world_table::core::filter::{apply_filter, filter_by_continent};
use world_table::core::flatten::flatten;
use world_table::domain::model::{CellValue, Measure};
use world_table::{
    Column, CsvTableRenderer, FlatRow, LocalDataset, RawCountry, TablePipeline, TextTableRenderer,
    UiEvent,
};

fn dataset() -> serde_json::Value {
    serde_json::json!([
        {"name": "Argentina", "continent": "Americas", "years": [
            {"year": 1995, "gdp": 2.58e11, "life_expectancy": 72.95, "population": 34835000},
            {"year": 1996, "gdp": 2.72e11, "life_expectancy": 73.12, "population": 35255000}
        ]},
        {"name": "Egypt", "continent": "Africa", "years": [
            {"year": 1995, "gdp": 6.0e10, "life_expectancy": 66.6, "population": 62064000},
            {"year": 1996, "gdp": "6.7e10", "life_expectancy": 67.02, "population": 63294000}
        ]},
        {"name": "Brazil", "continent": "Americas", "years": [
            {"year": 1995, "gdp": 7.69e11, "life_expectancy": 68.31, "population": 161750000},
            {"year": 1996, "gdp": 8.5e11, "life_expectancy": 68.7, "population": 164200000}
        ]},
        {"name": "Kenya", "continent": "Africa", "years": [
            {"year": 1995, "gdp": 9.05e9, "life_expectancy": 54.53, "population": 27346000},
            {"year": 1996, "gdp": "unknown", "life_expectancy": 53.9, "population": 28071000}
        ]}
    ])
}

fn raw() -> Vec<RawCountry> {
    serde_json::from_value(dataset()).expect("fixture is valid")
}

fn names(rows: &[FlatRow]) -> Vec<&str> {
    rows.iter().map(|r| r.name.as_str()).collect()
}

#[test]
fn test_flatten_completeness() {
    let raw = raw();
    let rows = flatten(&raw);

    let expected: usize = raw.iter().map(|c| c.years.len()).sum();
    assert_eq!(rows.len(), expected);

    let pairs: HashSet<(String, i64)> = rows.iter().map(|r| (r.name.clone(), r.year)).collect();
    assert_eq!(pairs.len(), rows.len());
    for country in &raw {
        for year in &country.years {
            assert!(pairs.contains(&(country.name.clone(), year.year)));
        }
    }
}

#[test]
fn test_filter_preserves_relative_order() {
    let rows = flatten(&raw());

    let americas = apply_filter(&rows, &[CellValue::Text("Americas")], Column::Continent);
    assert_eq!(names(&americas), vec!["Argentina", "Argentina", "Brazil", "Brazil"]);

    let none: Vec<String> = Vec::new();
    assert_eq!(filter_by_continent(&rows, &none), rows);
}

#[test]
fn test_aggregation_matches_sums_and_minimum() {
    let rows = flatten(&raw());
    let aggregated = aggregate(&rows, Some(Column::Continent));

    // discovery order: Americas first (Argentina), then Africa (Egypt)
    let keys: Vec<(&str, i64)> = aggregated.iter().map(|r| (r.name.as_str(), r.year)).collect();
    assert_eq!(
        keys,
        vec![("Americas", 1995), ("Americas", 1996), ("Africa", 1995), ("Africa", 1996)]
    );

    let americas_1995 = &aggregated[0];
    assert_eq!(americas_1995.continent, "Americas");
    assert_eq!(americas_1995.population, Measure::Number(196_585_000.0));
    assert_eq!(americas_1995.gdp, Measure::Number(2.58e11 + 7.69e11));
    assert_eq!(americas_1995.life_expectancy, Measure::Number(68.31));

    // "unknown" does not coerce, so the Africa 1996 total is NaN
    assert!(aggregated[3].gdp.to_number().is_nan());
    assert_eq!(aggregated[3].population, Measure::Number(91_365_000.0));
}

#[test]
fn test_pipeline_end_to_end_from_file() -> Result<()> {
    let mut file = NamedTempFile::new()?;
    file.write_all(serde_json::to_string(&dataset())?.as_bytes())?;

    let mut pipeline = TablePipeline::from_source(&LocalDataset::new(file.path()), None)?;
    assert_eq!(pipeline.params().year, 1995);
    assert_eq!(names(&pipeline.table().rows), vec!["Argentina", "Egypt", "Brazil", "Kenya"]);

    pipeline.handle(UiEvent::YearChanged(1996));
    pipeline.handle(UiEvent::ContinentsChanged(vec!["Americas".to_string()]));
    let table = pipeline.handle(UiEvent::HeaderClicked(Column::Gdp));
    assert_eq!(names(&table.rows), vec!["Brazil", "Argentina"]);

    let mut renderer = TextTableRenderer::new(Vec::new());
    pipeline.render(&mut renderer)?;
    let output = String::from_utf8(renderer.into_inner())?;
    let lines: Vec<&str> = output.lines().collect();

    assert_eq!(lines[0], "World Countries Ranking");
    assert!(lines[1].starts_with("name"));
    assert!(lines[3].starts_with("Brazil"));
    assert!(lines[3].contains("850.0G"));
    assert!(lines[3].contains("164,200,000"));
    assert!(lines[3].contains("68.7"));
    assert_eq!(lines.len(), 5);
    Ok(())
}

#[test]
fn test_aggregated_csv_output() -> Result<()> {
    let mut pipeline = TablePipeline::new(&raw(), None).with_columns(vec![
        Column::Name,
        Column::Population,
        Column::LifeExpectancy,
    ]);
    pipeline.handle(UiEvent::AggregateToggled(true));

    let mut renderer = CsvTableRenderer::new(Vec::new());
    pipeline.render(&mut renderer)?;
    let output = String::from_utf8(renderer.into_inner()?)?;

    assert_eq!(
        output,
        "name,population,life_expectancy\n\
         Americas,\"196,585,000\",68.3\n\
         Africa,\"89,410,000\",54.5\n"
    );
    Ok(())
}

#[test]
fn test_double_click_restores_tie_order() {
    let mut pipeline = TablePipeline::new(&raw(), None);
    pipeline.handle(UiEvent::ContinentsChanged(vec!["Africa".to_string(), "Americas".to_string()]));

    pipeline.handle(UiEvent::HeaderClicked(Column::Year));
    let first: Vec<String> = pipeline.table().rows.iter().map(|r| r.name.clone()).collect();
    assert_eq!(first, vec!["Argentina", "Brazil", "Egypt", "Kenya"]);

    pipeline.handle(UiEvent::HeaderClicked(Column::Year));
    let second: Vec<String> = pipeline.table().rows.iter().map(|r| r.name.clone()).collect();
    assert_eq!(second, first);
}

#[test]
fn test_chart_from_pipeline() {
    let mut pipeline = TablePipeline::new(&raw(), None);
    pipeline.handle(UiEvent::ContinentsChanged(vec!["Africa".to_string()]));

    let chart = pipeline.chart(Column::LifeExpectancy);
    let labels: Vec<&str> = chart.bars.iter().map(|b| b.label.as_str()).collect();

    assert_eq!(labels, vec!["Egypt", "Kenya"]);
    assert_eq!(chart.max, 66.6);
    assert_eq!(chart.bars[0].width, 940.0);
    assert_eq!(chart.bars[1].text, "54.5");
}
