use clap::Parser;
use std::fs::File;
use std::io::{self, BufWriter, Write};
use world_table::domain::ports::{DatasetSource, TableRenderer};
use world_table::utils::error::ErrorSeverity;
use world_table::utils::monitor::StageMonitor;
use world_table::utils::{logger, validation::Validate};
use world_table::{
    CliConfig, CsvTableRenderer, LocalDataset, OutputFormat, RunSettings, TablePipeline,
    TextChartRenderer, TextTableRenderer, UiEvent,
};

fn run(settings: &RunSettings) -> world_table::Result<()> {
    let monitor = StageMonitor::new(settings.monitor);

    let raw = LocalDataset::new(&settings.dataset_path).load()?;
    monitor.log_stage("load", raw.len());

    let mut pipeline = TablePipeline::new(&raw, None).with_columns(settings.columns.clone());
    monitor.log_stage("flatten", pipeline.cached_rows().len());

    // replay the widget state as the events a user would have produced
    if let Some(year) = settings.year {
        pipeline.handle(UiEvent::YearChanged(year));
    }
    if !settings.continents.is_empty() {
        pipeline.handle(UiEvent::ContinentsChanged(settings.continents.clone()));
    }
    if settings.aggregate {
        pipeline.handle(UiEvent::AggregateToggled(true));
    }
    for &header in &settings.sort {
        pipeline.handle(UiEvent::HeaderClicked(header));
    }
    monitor.log_stage("transform", pipeline.table().rows.len());

    let out: Box<dyn Write> = match &settings.output_path {
        Some(path) => Box::new(BufWriter::new(File::create(path)?)),
        None => Box::new(io::stdout().lock()),
    };
    match settings.format {
        OutputFormat::Text => TextTableRenderer::new(out).render_table(pipeline.table())?,
        OutputFormat::Csv => CsvTableRenderer::new(out).render_table(pipeline.table())?,
        OutputFormat::Tsv => {
            CsvTableRenderer::with_delimiter(out, b'\t').render_table(pipeline.table())?
        }
    }

    if let Some(field) = settings.chart {
        pipeline.render_chart(field, &mut TextChartRenderer::new(io::stdout().lock()))?;
    }

    monitor.log_stage("render", pipeline.table().rows.len());
    monitor.log_final_stats();
    Ok(())
}

fn exit_code(severity: ErrorSeverity) -> i32 {
    match severity {
        ErrorSeverity::Low => 0,
        ErrorSeverity::Medium => 2,
        ErrorSeverity::High => 1,
        ErrorSeverity::Critical => 3,
    }
}

fn main() -> anyhow::Result<()> {
    let cli = CliConfig::parse();

    // settings are resolved first so the config file can pick the log level
    let resolved = cli.resolve().and_then(|s| s.validate().map(|_| s));
    let level = resolved.as_ref().ok().and_then(|s| s.log_level.as_deref());
    if cli.json_logs {
        logger::init_json_logger(cli.verbose, level);
    } else {
        logger::init_cli_logger(cli.verbose, level);
    }
    tracing::info!("Starting world-table");
    if let Some(path) = &cli.config {
        tracing::info!("📁 Configuration file: {}", path);
    }

    let settings = match resolved {
        Ok(settings) => settings,
        Err(e) => {
            tracing::error!("❌ Configuration validation failed: {}", e);
            tracing::error!("💡 Suggestion: {}", e.recovery_suggestion());
            eprintln!("❌ {}", e.user_friendly_message());
            std::process::exit(exit_code(e.severity()));
        }
    };
    tracing::debug!("Settings: {:?}", settings);

    if let Err(e) = run(&settings) {
        tracing::error!(
            "❌ Table build failed: {} (Category: {:?}, Severity: {:?})",
            e,
            e.category(),
            e.severity()
        );
        eprintln!("❌ {}", e.user_friendly_message());
        eprintln!("💡 {}", e.recovery_suggestion());

        let code = exit_code(e.severity());
        if code > 0 {
            std::process::exit(code);
        }
    }

    Ok(())
}
