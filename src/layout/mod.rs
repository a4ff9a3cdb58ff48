//! Chart geometry.
//!
//! [`resolve`] maps a chart tag to a [`Renderer`]; each renderer is a pure
//! function of the data points, the target height, the theme palette and the
//! layout config. Unknown tags resolve to an unsupported placeholder instead
//! of failing.

mod bar;
mod donut;
mod gauge;
mod line;
mod progress;
mod radar;
mod stacked;
mod types;
mod unsupported;

pub use types::*;

use tracing::{debug, warn};

use crate::config::LayoutConfig;
use crate::ir::{ChartDescriptor, ChartKind, DataPoint};
use crate::theme::Theme;

/// Upper bound of the 0–9 maturity scale shared by readiness levels.
///
/// Radar charts use it as the fixed `fullMark` and progress bars without a
/// `%` unit are normalised against it. It is a domain contract, not derived
/// from the data.
pub const MATURITY_SCALE_MAX: f64 = 9.0;

pub type LayoutFn = fn(&[DataPoint], f64, &Theme, &LayoutConfig) -> ChartData;

#[derive(Debug, Clone)]
pub enum Renderer {
    Chart { kind: ChartKind, compute: LayoutFn },
    Unsupported { tag: String },
}

impl Renderer {
    pub fn kind(&self) -> ChartKind {
        match self {
            Renderer::Chart { kind, .. } => *kind,
            Renderer::Unsupported { .. } => ChartKind::Other,
        }
    }

    pub fn is_supported(&self) -> bool {
        matches!(self, Renderer::Chart { .. })
    }

    pub fn layout(
        &self,
        points: &[DataPoint],
        height: f64,
        theme: &Theme,
        config: &LayoutConfig,
    ) -> ChartData {
        match self {
            Renderer::Chart { compute, .. } => compute(points, height, theme, config),
            Renderer::Unsupported { tag } => unsupported::compute_unsupported_layout(tag),
        }
    }
}

/// Resolves a chart tag. Total over all strings.
pub fn resolve(tag: &str) -> Renderer {
    let kind = ChartKind::from_tag(tag);
    let compute: LayoutFn = match kind {
        ChartKind::ComparisonBar => bar::compute_bar_layout,
        ChartKind::StackedBar => stacked::compute_stacked_layout,
        ChartKind::Donut => donut::compute_donut_layout,
        ChartKind::Gauge => gauge::compute_gauge_layout,
        ChartKind::Progress => progress::compute_progress_layout,
        ChartKind::Line => line::compute_line_layout,
        ChartKind::Radar => radar::compute_radar_layout,
        ChartKind::Other => {
            warn!(tag, "unsupported chart type");
            return Renderer::Unsupported {
                tag: tag.to_string(),
            };
        }
    };
    Renderer::Chart { kind, compute }
}

pub fn compute_layout(
    chart: &ChartDescriptor,
    height: f64,
    theme: &Theme,
    config: &LayoutConfig,
) -> ChartLayout {
    let height = if height.is_finite() && height > 0.0 {
        height
    } else {
        config.chart_height
    };
    let renderer = resolve(&chart.chart_type);
    debug!(
        tag = chart.chart_type.as_str(),
        points = chart.data_points.len(),
        height,
        "computing chart layout"
    );
    let data = renderer.layout(&chart.data_points, height, theme, config);
    ChartLayout {
        kind: renderer.kind(),
        title: chart.title.clone(),
        subtitle: chart.subtitle.clone(),
        source: chart.source.clone(),
        height,
        data,
    }
}

pub fn compute_layouts(
    charts: &[ChartDescriptor],
    height: f64,
    theme: &Theme,
    config: &LayoutConfig,
) -> Vec<ChartLayout> {
    charts
        .iter()
        .map(|chart| compute_layout(chart, height, theme, config))
        .collect()
}

fn format_value(value: f64) -> String {
    let rounded = (value * 100.0).round() / 100.0;
    if (rounded - rounded.round()).abs() < 0.001 {
        format!("{:.0}", rounded)
    } else {
        format!("{}", rounded)
    }
}
