use anyhow::Result;
use tempfile::TempDir;
use world_table::config::toml_config::TomlConfig;
use world_table::utils::validation::Validate;
use world_table::{Column, LocalDataset, OutputFormat, RunSettings, TablePipeline, UiEvent};

const DATASET: &str = r#"[
    {"name": "France", "continent": "Europe", "years": [
        {"year": 2010, "gdp": 2.6e12, "life_expectancy": 81.3, "population": 65000000}
    ]},
    {"name": "Germany", "continent": "Europe", "years": [
        {"year": 2010, "gdp": 3.4e12, "life_expectancy": 80.0, "population": 81800000}
    ]},
    {"name": "India", "continent": "Asia", "years": [
        {"year": 2010, "gdp": 1.7e12, "life_expectancy": 66.1, "population": 1205600000}
    ]}
]"#;

/// Loads the dataset the settings name and replays them as widget events.
fn build(settings: &RunSettings) -> Result<TablePipeline> {
    let mut pipeline =
        TablePipeline::from_source(&LocalDataset::new(&settings.dataset_path), None)?
            .with_columns(settings.columns.clone());
    if let Some(year) = settings.year {
        pipeline.handle(UiEvent::YearChanged(year));
    }
    pipeline.handle(UiEvent::ContinentsChanged(settings.continents.clone()));
    pipeline.handle(UiEvent::AggregateToggled(settings.aggregate));
    for &header in &settings.sort {
        pipeline.handle(UiEvent::HeaderClicked(header));
    }
    Ok(pipeline)
}

#[test]
fn test_config_file_drives_pipeline() -> Result<()> {
    let temp_dir = TempDir::new()?;
    let data_path = temp_dir.path().join("countries.json");
    std::fs::write(&data_path, DATASET)?;
    let normalized = data_path.to_str().unwrap().replace('\\', "/");

    let config_path = temp_dir.path().join("world-table.toml");
    std::fs::write(
        &config_path,
        format!(
            r#"
[dataset]
path = "{}"

[view]
year = 2010
continents = ["Europe"]
columns = ["name", "gdp", "population"]
sort = ["population"]

[output]
format = "tsv"
"#,
            normalized
        ),
    )?;

    let config = TomlConfig::from_file(&config_path)?;
    config.validate()?;
    let settings = RunSettings::from(config);
    settings.validate()?;
    assert_eq!(settings.format, OutputFormat::Tsv);

    let pipeline = build(&settings)?;
    let body = pipeline.table().body();

    assert_eq!(pipeline.table().headers(), vec!["name", "gdp", "population"]);
    assert_eq!(
        body,
        vec![
            vec!["Germany", "3.4T", "81,800,000"],
            vec!["France", "2.6T", "65,000,000"],
        ]
    );
    Ok(())
}

#[test]
fn test_aggregate_everything_from_defaults() -> Result<()> {
    let temp_dir = TempDir::new()?;
    let data_path = temp_dir.path().join("countries.json");
    std::fs::write(&data_path, DATASET)?;

    let settings = RunSettings {
        dataset_path: data_path.to_str().unwrap().to_string(),
        aggregate: true,
        columns: vec![Column::Name, Column::Continent, Column::LifeExpectancy],
        ..RunSettings::default()
    };
    settings.validate()?;

    let pipeline = build(&settings)?;
    assert_eq!(
        pipeline.table().body(),
        vec![vec!["Europe", "Europe", "80"], vec!["Asia", "Asia", "66.1"]]
    );
    Ok(())
}

#[test]
fn test_missing_dataset_reports_io_error() {
    let settings = RunSettings {
        dataset_path: "/definitely/not/here.json".to_string(),
        ..RunSettings::default()
    };

    let err = build(&settings).err().expect("load should fail");
    let table_error = err
        .downcast_ref::<world_table::TableError>()
        .expect("error comes from the loader");
    assert_eq!(
        table_error.severity(),
        world_table::utils::error::ErrorSeverity::Critical
    );
}
