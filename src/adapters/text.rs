use crate::core::chart::BarChart;
use crate::core::present::Table;
use crate::domain::ports::{ChartRenderer, TableRenderer};
use crate::utils::error::Result;
use std::io::Write;

const CHART_COLUMNS: f64 = 50.0;

/// Plain-text table with aligned columns, written to any `Write`.
pub struct TextTableRenderer<W: Write> {
    out: W,
}

impl<W: Write> TextTableRenderer<W> {
    pub fn new(out: W) -> Self {
        Self { out }
    }

    pub fn into_inner(self) -> W {
        self.out
    }
}

impl<W: Write> TableRenderer for TextTableRenderer<W> {
    fn render_table(&mut self, table: &Table) -> Result<()> {
        let headers = table.headers();
        let body = table.body();

        let mut widths: Vec<usize> = headers.iter().map(|h| h.chars().count()).collect();
        for row in &body {
            for (width, cell) in widths.iter_mut().zip(row) {
                *width = (*width).max(cell.chars().count());
            }
        }

        let line = |cells: Vec<&str>| -> String {
            cells
                .iter()
                .zip(&widths)
                .map(|(cell, &width)| format!("{:<width$}", cell, width = width))
                .collect::<Vec<_>>()
                .join("  ")
                .trim_end()
                .to_string()
        };

        writeln!(self.out, "{}", table.caption)?;
        writeln!(self.out, "{}", line(headers.clone()))?;
        writeln!(
            self.out,
            "{}",
            widths.iter().map(|w| "-".repeat(*w)).collect::<Vec<_>>().join("  ")
        )?;
        for row in &body {
            writeln!(self.out, "{}", line(row.iter().map(String::as_str).collect()))?;
        }
        self.out.flush()?;
        Ok(())
    }
}

/// Horizontal bars drawn with `#`, scaled from the chart's pixel widths.
pub struct TextChartRenderer<W: Write> {
    out: W,
}

impl<W: Write> TextChartRenderer<W> {
    pub fn new(out: W) -> Self {
        Self { out }
    }

    pub fn into_inner(self) -> W {
        self.out
    }
}

impl<W: Write> ChartRenderer for TextChartRenderer<W> {
    fn render_chart(&mut self, chart: &BarChart) -> Result<()> {
        let label_width = chart
            .bars
            .iter()
            .map(|b| b.label.chars().count())
            .max()
            .unwrap_or(0);
        let inner = chart.frame.inner_width();

        writeln!(self.out, "{}", chart.field)?;
        for bar in &chart.bars {
            let length = if inner > 0.0 {
                (bar.width / inner * CHART_COLUMNS).round() as usize
            } else {
                0
            };
            writeln!(
                self.out,
                "{:<label$}  {} {}",
                bar.label,
                "#".repeat(length),
                bar.text,
                label = label_width
            )?;
        }
        self.out.flush()?;
        Ok(())
    }
}
