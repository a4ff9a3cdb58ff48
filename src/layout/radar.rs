use crate::config::LayoutConfig;
use crate::ir::DataPoint;
use crate::theme::Theme;

use super::{ChartData, MATURITY_SCALE_MAX, RadarLayout, RadarPoint};

pub(super) fn compute_radar_layout(
    points: &[DataPoint],
    _height: f64,
    theme: &Theme,
    _config: &LayoutConfig,
) -> ChartData {
    let points = points
        .iter()
        .map(|point| RadarPoint {
            subject: point.label.clone(),
            value: point.value,
            full_mark: MATURITY_SCALE_MAX,
        })
        .collect();
    ChartData::Radar(RadarLayout {
        points,
        color: theme.color(0),
    })
}
