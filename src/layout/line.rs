use crate::config::LayoutConfig;
use crate::ir::DataPoint;
use crate::theme::Theme;

use super::{ChartData, LineLayout, LinePoint};

/// Points ordered by year; points without a year sort as year 0. The sort is
/// stable so equal years keep their input order.
pub(super) fn sort_by_year(points: &[DataPoint]) -> Vec<DataPoint> {
    let mut sorted = points.to_vec();
    sorted.sort_by_key(|point| point.year.unwrap_or(0));
    sorted
}

pub(super) fn compute_line_layout(
    points: &[DataPoint],
    _height: f64,
    theme: &Theme,
    _config: &LayoutConfig,
) -> ChartData {
    let sorted = sort_by_year(points);
    let y_min = sorted
        .iter()
        .map(|point| point.value)
        .fold(0.0_f64, f64::min);
    let y_max = sorted
        .iter()
        .map(|point| point.value)
        .fold(0.0_f64, f64::max);

    let points = sorted
        .into_iter()
        .map(|point| LinePoint {
            x_label: point
                .year
                .map(|year| year.to_string())
                .unwrap_or_else(|| point.label.clone()),
            label: point.label,
            year: point.year,
            value: point.value,
            unit: point.unit,
        })
        .collect();

    ChartData::Line(LineLayout {
        points,
        color: theme.color(0),
        y_min,
        y_max,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sorts_ascending_by_year() {
        let points = vec![
            DataPoint::new("c", 3.0).year(2023),
            DataPoint::new("a", 1.0).year(2021),
            DataPoint::new("b", 2.0).year(2022),
        ];
        let years: Vec<Option<i32>> = sort_by_year(&points).iter().map(|p| p.year).collect();
        assert_eq!(years, vec![Some(2021), Some(2022), Some(2023)]);
    }

    #[test]
    fn missing_years_sort_first_and_use_the_label() {
        let points = vec![
            DataPoint::new("later", 3.0).year(2022),
            DataPoint::new("baseline", 1.0),
            DataPoint::new("target", -2.0),
        ];
        let ChartData::Line(layout) =
            compute_line_layout(&points, 200.0, &Theme::light(), &LayoutConfig::default())
        else {
            panic!("expected line layout");
        };
        let labels: Vec<&str> = layout.points.iter().map(|p| p.x_label.as_str()).collect();
        assert_eq!(labels, vec!["baseline", "target", "2022"]);
        assert_eq!(layout.y_min, -2.0);
        assert_eq!(layout.y_max, 3.0);
    }
}
