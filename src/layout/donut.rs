use std::f64::consts::PI;

use crate::config::LayoutConfig;
use crate::ir::DataPoint;
use crate::theme::Theme;

use super::{ChartData, DonutLayout, DonutSlice, TextAnchor};

const RADIAN: f64 = PI / 180.0;

fn clamp_round(value: f64, min: f64, max: f64) -> f64 {
    value.max(min).min(max).round()
}

/// Polar offset of a point `radius` away from the center at `angle` degrees,
/// in screen coordinates (y grows downwards).
fn polar_offset(radius: f64, angle: f64) -> (f64, f64) {
    (
        radius * (-angle * RADIAN).cos(),
        radius * (-angle * RADIAN).sin(),
    )
}

pub(super) fn donut_radii(height: f64, config: &LayoutConfig) -> (f64, f64) {
    let cfg = &config.donut;
    let inner = clamp_round(
        height * cfg.inner_radius_ratio,
        cfg.inner_radius_min,
        cfg.inner_radius_max,
    );
    let outer = clamp_round(
        height * cfg.outer_radius_ratio,
        cfg.outer_radius_min,
        cfg.outer_radius_max,
    );
    (inner, outer)
}

pub(super) fn compute_donut_layout(
    points: &[DataPoint],
    height: f64,
    theme: &Theme,
    config: &LayoutConfig,
) -> ChartData {
    let cfg = &config.donut;
    let small = height <= cfg.small_height;
    let (inner_radius, outer_radius) = donut_radii(height, config);
    let center_y_ratio = if small {
        cfg.small_center_y_ratio
    } else {
        cfg.center_y_ratio
    };
    let label_radius = outer_radius
        + if small {
            cfg.small_label_offset
        } else {
            cfg.label_offset
        };

    let total: f64 = points.iter().map(|point| point.value.max(0.0)).sum();
    let sweep = cfg.end_angle - cfg.start_angle;
    let count = points.len().max(1) as f64;

    let mut slices = Vec::with_capacity(points.len());
    let mut angle = cfg.start_angle;
    for (idx, point) in points.iter().enumerate() {
        let share = if total > 0.0 {
            point.value.max(0.0) / total
        } else {
            1.0 / count
        };
        let start_angle = angle;
        let end_angle = angle + share * sweep;
        let mid_angle = (start_angle + end_angle) / 2.0;
        let (label_dx, label_dy) = polar_offset(label_radius, mid_angle);
        let percent = share * 100.0;
        slices.push(DonutSlice {
            label: point.label.clone(),
            value: point.value,
            percent,
            percent_label: format!("{}%", percent.round() as i64),
            start_angle,
            end_angle,
            mid_angle,
            color: theme.color(idx),
            label_dx,
            label_dy,
            anchor: if label_dx > 0.0 {
                TextAnchor::Start
            } else {
                TextAnchor::End
            },
        });
        angle = end_angle;
    }

    ChartData::Donut(DonutLayout {
        small,
        inner_radius,
        outer_radius,
        center_y_ratio,
        center_y: height * center_y_ratio,
        label_radius,
        label_font_size: if small {
            cfg.small_label_font_size
        } else {
            cfg.label_font_size
        },
        legend_font_size: if small {
            cfg.small_legend_font_size
        } else {
            cfg.legend_font_size
        },
        total,
        slices,
    })
}
