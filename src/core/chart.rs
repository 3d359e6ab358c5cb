use crate::core::aggregate::OrderedGroups;
use crate::core::format::format_rounded;
use crate::domain::model::{Column, FlatRow};
use serde::Serialize;

pub const DEFAULT_CHART_FIELD: Column = Column::LifeExpectancy;

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Margin {
    pub top: f64,
    pub right: f64,
    pub bottom: f64,
    pub left: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ChartFrame {
    pub width: f64,
    pub height: f64,
    pub margin: Margin,
}

impl Default for ChartFrame {
    fn default() -> Self {
        Self {
            width: 960.0,
            height: 640.0,
            margin: Margin {
                top: 10.0,
                right: 10.0,
                bottom: 10.0,
                left: 10.0,
            },
        }
    }
}

impl ChartFrame {
    pub fn inner_width(&self) -> f64 {
        self.width - self.margin.left - self.margin.right
    }

    pub fn inner_height(&self) -> f64 {
        self.height - self.margin.top - self.margin.bottom
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Bar {
    pub label: String,
    pub value: f64,
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
    /// Value text placed just past the end of the bar.
    pub text: String,
    pub text_x: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BarChart {
    pub field: Column,
    pub frame: ChartFrame,
    pub min: f64,
    pub max: f64,
    pub bars: Vec<Bar>,
}

/// Linear map from `[0, max]` onto `[0, extent]`.
fn linear(value: f64, max: f64, extent: f64) -> f64 {
    if max <= 0.0 || !value.is_finite() {
        0.0
    } else {
        value / max * extent
    }
}

/// Bar chart of `field` with one band per distinct row name.
pub fn render_chart(rows: &[FlatRow], field: Column) -> BarChart {
    render_chart_in(rows, field, ChartFrame::default())
}

pub fn render_chart_in(rows: &[FlatRow], field: Column, frame: ChartFrame) -> BarChart {
    let values: Vec<f64> = rows.iter().map(|r| r.value(field).to_number()).collect();
    let numeric = values.iter().copied().filter(|v| !v.is_nan());
    let min = numeric.clone().fold(f64::NAN, f64::min);
    let max = numeric.fold(f64::NAN, f64::max);

    let mut bands: OrderedGroups<()> = OrderedGroups::new();
    for row in rows {
        bands.entry_or_insert_with(row.name.clone(), || ());
    }

    // rounded bands: integer step, leftover split evenly around the bands
    let width = frame.inner_width();
    let height = frame.inner_height();
    let step = if bands.is_empty() {
        0.0
    } else {
        (height / bands.len() as f64).floor()
    };
    let offset = ((height - step * bands.len() as f64) / 2.0).round();
    let band_position = |name: &str| -> f64 {
        bands
            .position(name)
            .map_or(offset, |i| offset + step * i as f64)
    };

    let bars = rows
        .iter()
        .zip(values.iter())
        .map(|(row, &value)| {
            let bar_width = linear(value, max, width);
            Bar {
                label: row.name.clone(),
                value,
                x: linear(min, max, width),
                y: band_position(&row.name),
                width: bar_width,
                height: (step - 1.0).max(0.0),
                text: format_rounded(value, 1),
                text_x: bar_width + 5.0,
            }
        })
        .collect::<Vec<_>>();

    tracing::debug!("Charted {} bars for {}", bars.len(), field);
    BarChart {
        field,
        frame,
        min,
        max,
        bars,
    }
}
