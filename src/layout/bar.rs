use crate::config::LayoutConfig;
use crate::ir::DataPoint;
use crate::theme::Theme;

use super::{BarDatum, BarLayout, ChartData};

pub(super) fn compute_bar_layout(
    points: &[DataPoint],
    _height: f64,
    theme: &Theme,
    _config: &LayoutConfig,
) -> ChartData {
    let bars = points
        .iter()
        .enumerate()
        .map(|(idx, point)| BarDatum {
            label: point.label.clone(),
            value: point.value,
            unit: point.unit.clone(),
            color: theme.color(idx),
        })
        .collect();
    ChartData::ComparisonBar(BarLayout { bars })
}
