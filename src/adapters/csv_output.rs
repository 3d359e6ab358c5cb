use crate::core::present::Table;
use crate::domain::ports::TableRenderer;
use crate::utils::error::Result;
use std::io::Write;

/// Writes the formatted table as CSV: one header record, then the body.
pub struct CsvTableRenderer<W: Write> {
    writer: csv::Writer<W>,
}

impl<W: Write> CsvTableRenderer<W> {
    pub fn new(out: W) -> Self {
        Self {
            writer: csv::Writer::from_writer(out),
        }
    }

    pub fn with_delimiter(out: W, delimiter: u8) -> Self {
        Self {
            writer: csv::WriterBuilder::new()
                .delimiter(delimiter)
                .from_writer(out),
        }
    }

    pub fn into_inner(self) -> Result<W> {
        self.writer
            .into_inner()
            .map_err(|e| crate::utils::error::TableError::IoError(e.into_error()))
    }
}

impl<W: Write> TableRenderer for CsvTableRenderer<W> {
    fn render_table(&mut self, table: &Table) -> Result<()> {
        self.writer.write_record(table.headers())?;
        for row in table.body() {
            self.writer.write_record(&row)?;
        }
        self.writer.flush()?;
        tracing::debug!("Wrote {} CSV records", table.rows.len());
        Ok(())
    }
}
