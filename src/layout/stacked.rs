use std::collections::HashMap;

use crate::config::LayoutConfig;
use crate::ir::DataPoint;
use crate::theme::Theme;

use super::{ChartData, StackedBarLayout, StackedRow, StackedSeries};

const DEFAULT_CATEGORY: &str = "default";

fn category_of(point: &DataPoint) -> &str {
    match point.category.as_deref() {
        Some(category) if !category.trim().is_empty() => category,
        _ => DEFAULT_CATEGORY,
    }
}

/// Pivots points into one row per label with one field per category.
pub(super) fn pivot_points(points: &[DataPoint]) -> (Vec<String>, Vec<StackedRow>) {
    let mut categories: Vec<String> = Vec::new();
    let mut category_index: HashMap<&str, usize> = HashMap::new();
    let mut labels: Vec<&str> = Vec::new();
    let mut label_index: HashMap<&str, usize> = HashMap::new();

    for point in points {
        let category = category_of(point);
        if !category_index.contains_key(category) {
            category_index.insert(category, categories.len());
            categories.push(category.to_string());
        }
        let label = point.label.as_str();
        if !label_index.contains_key(label) {
            label_index.insert(label, labels.len());
            labels.push(label);
        }
    }

    let mut rows: Vec<StackedRow> = labels
        .iter()
        .map(|label| StackedRow {
            name: label.to_string(),
            values: categories.iter().map(|c| (c.clone(), 0.0)).collect(),
        })
        .collect();

    // Later points win when a label/category pair repeats.
    for point in points {
        let row = label_index[point.label.as_str()];
        let column = category_index[category_of(point)];
        rows[row].values[column].1 = point.value;
    }

    (categories, rows)
}

pub(super) fn compute_stacked_layout(
    points: &[DataPoint],
    _height: f64,
    theme: &Theme,
    _config: &LayoutConfig,
) -> ChartData {
    let (categories, rows) = pivot_points(points);
    let series = categories
        .iter()
        .enumerate()
        .map(|(idx, category)| StackedSeries {
            category: category.clone(),
            color: theme.color(idx),
        })
        .collect();
    ChartData::StackedBar(StackedBarLayout {
        categories,
        series,
        rows,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pivots_by_first_seen_order() {
        let points = vec![
            DataPoint::new("A", 1.0).category("x"),
            DataPoint::new("A", 2.0).category("y"),
            DataPoint::new("B", 3.0).category("x"),
        ];
        let (categories, rows) = pivot_points(&points);
        assert_eq!(categories, vec!["x", "y"]);
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].name, "A");
        assert_eq!(rows[0].value("x"), Some(1.0));
        assert_eq!(rows[0].value("y"), Some(2.0));
        assert_eq!(rows[1].name, "B");
        assert_eq!(rows[1].value("x"), Some(3.0));
        assert_eq!(rows[1].value("y"), Some(0.0));
    }

    #[test]
    fn rows_serialize_flat() {
        let points = vec![
            DataPoint::new("A", 1.0).category("x"),
            DataPoint::new("A", 2.0).category("y"),
            DataPoint::new("B", 3.0).category("x"),
        ];
        let (_, rows) = pivot_points(&points);
        let json = serde_json::to_value(&rows).unwrap();
        assert_eq!(
            json,
            serde_json::json!([
                {"name": "A", "x": 1.0, "y": 2.0},
                {"name": "B", "x": 3.0, "y": 0.0}
            ])
        );
    }

    #[test]
    fn category_named_name_does_not_shadow_the_row_label() {
        let points = vec![
            DataPoint::new("A", 1.0).category("name"),
            DataPoint::new("A", 2.0).category("y"),
        ];
        let (_, rows) = pivot_points(&points);
        assert_eq!(rows[0].value("name"), Some(1.0));
        let json = serde_json::to_value(&rows).unwrap();
        assert_eq!(json, serde_json::json!([{"name": "A", "y": 2.0}]));
    }

    #[test]
    fn missing_category_uses_default_and_last_value_wins() {
        let points = vec![
            DataPoint::new("2024", 5.0),
            DataPoint::new("2024", 7.0).category(" "),
        ];
        let (categories, rows) = pivot_points(&points);
        assert_eq!(categories, vec![DEFAULT_CATEGORY]);
        assert_eq!(rows[0].value(DEFAULT_CATEGORY), Some(7.0));
    }

    #[test]
    fn series_colors_follow_category_index() {
        let theme = Theme::light();
        let points = vec![
            DataPoint::new("A", 1.0).category("x"),
            DataPoint::new("A", 1.0).category("y"),
        ];
        let ChartData::StackedBar(layout) =
            compute_stacked_layout(&points, 200.0, &theme, &LayoutConfig::default())
        else {
            panic!("expected stacked layout");
        };
        assert_eq!(layout.series[0].color, theme.color(0));
        assert_eq!(layout.series[1].color, theme.color(1));
    }
}
