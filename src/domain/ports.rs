use crate::core::chart::BarChart;
use crate::core::present::Table;
use crate::domain::model::RawCountry;
use crate::utils::error::Result;

/// Supplies the nested dataset, once, before the first table is built.
pub trait DatasetSource {
    fn load(&self) -> Result<Vec<RawCountry>>;
}

/// Draws a presented table. Every call replaces what was drawn before.
pub trait TableRenderer {
    fn render_table(&mut self, table: &Table) -> Result<()>;
}

pub trait ChartRenderer {
    fn render_chart(&mut self, chart: &BarChart) -> Result<()>;
}

impl DatasetSource for Vec<RawCountry> {
    fn load(&self) -> Result<Vec<RawCountry>> {
        Ok(self.clone())
    }
}
