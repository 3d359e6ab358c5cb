use crate::core::aggregate::aggregate;
use crate::core::chart::{render_chart, BarChart};
use crate::core::filter::{filter_by_continent, filter_by_year};
use crate::core::flatten::flatten;
use crate::core::present::{present, Table, DEFAULT_COLUMNS};
use crate::core::sort::TableViewState;
use crate::domain::model::{Column, FlatRow, RawCountry};
use crate::domain::ports::{ChartRenderer, DatasetSource, TableRenderer};
use crate::utils::error::Result;
use serde::{Deserialize, Serialize};

/// What the input widgets currently say.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ViewParams {
    pub year: i64,
    /// Empty means every continent.
    pub continents: Vec<String>,
    pub aggregate: bool,
}

impl ViewParams {
    pub fn group_field(&self) -> Option<Column> {
        self.aggregate.then_some(Column::Continent)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UiEvent {
    YearChanged(i64),
    ContinentsChanged(Vec<String>),
    AggregateToggled(bool),
    HeaderClicked(Column),
}

/// Recomputes the table from the cached flat rows whenever an input changes.
#[derive(Debug, Clone)]
pub struct TablePipeline {
    rows: Vec<FlatRow>,
    columns: Vec<Column>,
    params: ViewParams,
    view: TableViewState,
    table: Table,
}

impl TablePipeline {
    /// Flattens `raw` once and builds the first table. Without an explicit
    /// year the first year in the data is selected.
    pub fn new(raw: &[RawCountry], params: Option<ViewParams>) -> Self {
        let rows = flatten(raw);
        let params = params.unwrap_or_else(|| ViewParams {
            year: rows.first().map(|r| r.year).unwrap_or_default(),
            ..ViewParams::default()
        });
        tracing::info!("Cached {} rows from {} countries", rows.len(), raw.len());

        let mut pipeline = Self {
            rows,
            columns: DEFAULT_COLUMNS.to_vec(),
            table: present(&DEFAULT_COLUMNS, Vec::new()),
            params,
            view: TableViewState::new(),
        };
        pipeline.rebuild();
        pipeline
    }

    pub fn from_source<S: DatasetSource>(source: &S, params: Option<ViewParams>) -> Result<Self> {
        let raw = source.load()?;
        Ok(Self::new(&raw, params))
    }

    pub fn with_columns(mut self, columns: Vec<Column>) -> Self {
        self.columns = columns;
        self.rebuild();
        self
    }

    /// Filter by year, then by continent, then aggregate when asked.
    pub fn compute(&self) -> Vec<FlatRow> {
        let by_year = filter_by_year(&self.rows, self.params.year);
        let by_continent = filter_by_continent(&by_year, &self.params.continents);
        match self.params.group_field() {
            Some(field) => aggregate(&by_continent, Some(field)),
            None => by_continent,
        }
    }

    fn rebuild(&mut self) {
        self.table = present(&self.columns, self.compute());
        tracing::info!(
            "Table rebuilt: year {}, continents [{}], aggregate {}, {} rows",
            self.params.year,
            self.params.continents.join(", "),
            self.params.aggregate,
            self.table.rows.len()
        );
    }

    /// Applies one widget event and returns the table to show.
    pub fn handle(&mut self, event: UiEvent) -> &Table {
        tracing::debug!("Handling {:?}", event);
        match event {
            UiEvent::YearChanged(year) => {
                self.params.year = year;
                self.rebuild();
            }
            UiEvent::ContinentsChanged(continents) => {
                self.params.continents = continents;
                self.rebuild();
            }
            UiEvent::AggregateToggled(aggregate) => {
                self.params.aggregate = aggregate;
                self.rebuild();
            }
            UiEvent::HeaderClicked(header) => {
                self.view = self.table.sort_by(header, self.view);
            }
        }
        &self.table
    }

    pub fn render<R: TableRenderer>(&self, renderer: &mut R) -> Result<()> {
        renderer.render_table(&self.table)
    }

    pub fn chart(&self, field: Column) -> BarChart {
        render_chart(&self.table.rows, field)
    }

    pub fn render_chart<R: ChartRenderer>(&self, field: Column, renderer: &mut R) -> Result<()> {
        renderer.render_chart(&self.chart(field))
    }

    pub fn table(&self) -> &Table {
        &self.table
    }

    pub fn params(&self) -> &ViewParams {
        &self.params
    }

    pub fn view_state(&self) -> TableViewState {
        self.view
    }

    pub fn cached_rows(&self) -> &[FlatRow] {
        &self.rows
    }

    /// Distinct years in the cached rows, in first-seen order.
    pub fn years(&self) -> Vec<i64> {
        let mut years: Vec<i64> = Vec::new();
        for row in &self.rows {
            if !years.contains(&row.year) {
                years.push(row.year);
            }
        }
        years
    }
}
