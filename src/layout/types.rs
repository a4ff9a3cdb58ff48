use serde::ser::SerializeMap;
use serde::{Serialize, Serializer};

use crate::ir::ChartKind;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum TextAnchor {
    Start,
    End,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ChartLayout {
    pub kind: ChartKind,
    pub title: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub subtitle: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub source: Option<String>,
    pub height: f64,
    pub data: ChartData,
}

impl ChartLayout {
    pub fn is_supported(&self) -> bool {
        !matches!(self.data, ChartData::Unsupported(_))
    }
}

#[derive(Debug, Clone, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ChartData {
    ComparisonBar(BarLayout),
    StackedBar(StackedBarLayout),
    Donut(DonutLayout),
    Gauge(GaugeLayout),
    Progress(ProgressLayout),
    Line(LineLayout),
    Radar(RadarLayout),
    Unsupported(UnsupportedLayout),
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BarLayout {
    pub bars: Vec<BarDatum>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BarDatum {
    pub label: String,
    pub value: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub unit: Option<String>,
    pub color: String,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StackedBarLayout {
    /// Distinct categories in first-seen order; one stacked series each.
    pub categories: Vec<String>,
    pub series: Vec<StackedSeries>,
    /// One row per distinct label in first-seen order.
    pub rows: Vec<StackedRow>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StackedSeries {
    pub category: String,
    pub color: String,
}

/// A pivoted row. Serializes flat: `{"name": "A", "x": 1, "y": 2}`.
///
/// A category literally called `"name"` would collide with the row label, so
/// that column is left out of the flat form; `value("name")` still has it.
#[derive(Debug, Clone, PartialEq)]
pub struct StackedRow {
    pub name: String,
    /// `(category, value)` in category order.
    pub values: Vec<(String, f64)>,
}

impl StackedRow {
    pub fn value(&self, category: &str) -> Option<f64> {
        self.values
            .iter()
            .find(|(name, _)| name == category)
            .map(|(_, value)| *value)
    }
}

const ROW_LABEL_KEY: &str = "name";

impl Serialize for StackedRow {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let columns: Vec<&(String, f64)> = self
            .values
            .iter()
            .filter(|(category, _)| category != ROW_LABEL_KEY)
            .collect();
        let mut map = serializer.serialize_map(Some(columns.len() + 1))?;
        map.serialize_entry(ROW_LABEL_KEY, &self.name)?;
        for (category, value) in columns {
            map.serialize_entry(category, value)?;
        }
        map.end()
    }
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DonutLayout {
    pub small: bool,
    pub inner_radius: f64,
    pub outer_radius: f64,
    /// Vertical pie center as a share of the chart height.
    pub center_y_ratio: f64,
    pub center_y: f64,
    pub label_radius: f64,
    pub label_font_size: f64,
    pub legend_font_size: f64,
    pub total: f64,
    pub slices: Vec<DonutSlice>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DonutSlice {
    pub label: String,
    pub value: f64,
    pub percent: f64,
    pub percent_label: String,
    /// Degrees, counter-clockwise from 3 o'clock.
    pub start_angle: f64,
    pub end_angle: f64,
    pub mid_angle: f64,
    pub color: String,
    /// Label position relative to the pie center (screen coordinates).
    pub label_dx: f64,
    pub label_dy: f64,
    pub anchor: TextAnchor,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ArcSegment {
    pub start_angle: f64,
    pub end_angle: f64,
    pub color: String,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GaugeLayout {
    pub value: f64,
    pub max: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub unit: Option<String>,
    /// `value / max * 100`, clamped to `0..=100` so negative values show an
    /// empty gauge.
    pub percentage: f64,
    pub remaining: f64,
    pub inner_radius: f64,
    pub outer_radius: f64,
    pub filled: ArcSegment,
    pub track: ArcSegment,
    pub value_label: String,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProgressLayout {
    pub bars: Vec<ProgressBar>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProgressBar {
    pub label: String,
    pub value: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub unit: Option<String>,
    pub percentage: f64,
    pub value_label: String,
    pub color: String,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LineLayout {
    pub points: Vec<LinePoint>,
    pub color: String,
    pub y_min: f64,
    pub y_max: f64,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LinePoint {
    /// Year when present, otherwise the point label.
    pub x_label: String,
    pub label: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub year: Option<i32>,
    pub value: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub unit: Option<String>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RadarLayout {
    pub points: Vec<RadarPoint>,
    pub color: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RadarPoint {
    pub subject: String,
    pub value: f64,
    pub full_mark: f64,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UnsupportedLayout {
    pub tag: String,
    pub message: String,
}
