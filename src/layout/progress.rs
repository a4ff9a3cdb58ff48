use crate::config::LayoutConfig;
use crate::ir::DataPoint;
use crate::theme::Theme;

use super::{ChartData, MATURITY_SCALE_MAX, ProgressBar, ProgressLayout, format_value};

/// Bar fill for one point: `%` values are used as-is, anything else is read
/// as a maturity level.
pub(super) fn progress_percentage(point: &DataPoint) -> f64 {
    if point.is_percent() {
        point.value
    } else {
        (point.value / MATURITY_SCALE_MAX * 100.0).min(100.0)
    }
}

pub(super) fn compute_progress_layout(
    points: &[DataPoint],
    _height: f64,
    theme: &Theme,
    _config: &LayoutConfig,
) -> ChartData {
    let bars = points
        .iter()
        .enumerate()
        .map(|(idx, point)| {
            let value_label = if point.is_percent() {
                format!("{}%", format_value(point.value))
            } else {
                format!("{}/{}", format_value(point.value), format_value(MATURITY_SCALE_MAX))
            };
            ProgressBar {
                label: point.label.clone(),
                value: point.value,
                unit: point.unit.clone(),
                percentage: progress_percentage(point),
                value_label,
                color: theme.color(idx),
            }
        })
        .collect();
    ChartData::Progress(ProgressLayout { bars })
}
