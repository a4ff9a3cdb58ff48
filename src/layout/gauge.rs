use crate::config::LayoutConfig;
use crate::ir::DataPoint;
use crate::theme::Theme;

use super::{ArcSegment, ChartData, GaugeLayout, format_value};

const PERCENT_SCALE_MAX: f64 = 100.0;

pub(super) fn compute_gauge_layout(
    points: &[DataPoint],
    height: f64,
    theme: &Theme,
    config: &LayoutConfig,
) -> ChartData {
    let cfg = &config.gauge;
    let first = points.first();
    let value = first.map(|point| point.value).unwrap_or(0.0);
    let is_percent = first.is_some_and(DataPoint::is_percent);
    let max = if is_percent {
        PERCENT_SCALE_MAX
    } else {
        (value * cfg.headroom).max(cfg.min_scale_max)
    };
    let percentage = (value / max * 100.0).clamp(0.0, 100.0);
    let remaining = 100.0 - percentage;

    let sweep = cfg.end_angle - cfg.start_angle;
    let split_angle = cfg.start_angle + sweep * percentage / 100.0;

    let value_label = if is_percent {
        format!("{}%", format_value(value))
    } else {
        format_value(value)
    };

    ChartData::Gauge(GaugeLayout {
        value,
        max,
        unit: first.and_then(|point| point.unit.clone()),
        percentage,
        remaining,
        inner_radius: height * cfg.inner_radius_ratio,
        outer_radius: height * cfg.outer_radius_ratio,
        filled: ArcSegment {
            start_angle: cfg.start_angle,
            end_angle: split_angle,
            color: theme.color(0),
        },
        track: ArcSegment {
            start_angle: split_angle,
            end_angle: cfg.end_angle,
            color: theme.track_color.clone(),
        },
        value_label,
    })
}
