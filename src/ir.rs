use once_cell::sync::Lazy;
use regex::Regex;
use serde::de::IgnoredAny;
use serde::{Deserialize, Deserializer, Serialize};

static LEADING_NUMBER_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^\s*([-+]?(?:\d+(?:\.\d*)?|\.\d+)(?:[eE][-+]?\d+)?)").unwrap());

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ChartKind {
    ComparisonBar,
    Donut,
    Line,
    Radar,
    Gauge,
    StackedBar,
    Progress,
    Other,
}

impl ChartKind {
    /// Maps a chart tag to its kind. Unrecognized tags map to `Other`.
    pub fn from_tag(tag: &str) -> Self {
        match tag.trim() {
            "comparison_bar" => Self::ComparisonBar,
            "donut" => Self::Donut,
            "line" => Self::Line,
            "radar" => Self::Radar,
            "gauge" => Self::Gauge,
            "stacked_bar" => Self::StackedBar,
            "progress" => Self::Progress,
            _ => Self::Other,
        }
    }

    pub fn as_tag(self) -> &'static str {
        match self {
            Self::ComparisonBar => "comparison_bar",
            Self::Donut => "donut",
            Self::Line => "line",
            Self::Radar => "radar",
            Self::Gauge => "gauge",
            Self::StackedBar => "stacked_bar",
            Self::Progress => "progress",
            Self::Other => "other",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DataPoint {
    #[serde(default, deserialize_with = "null_as_default")]
    pub label: String,
    #[serde(default, deserialize_with = "lenient_number")]
    pub value: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub unit: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    #[serde(default, deserialize_with = "lenient_year", skip_serializing_if = "Option::is_none")]
    pub year: Option<i32>,
}

impl DataPoint {
    pub fn new(label: impl Into<String>, value: f64) -> Self {
        Self {
            label: label.into(),
            value,
            ..Self::default()
        }
    }

    pub fn unit(mut self, unit: impl Into<String>) -> Self {
        self.unit = Some(unit.into());
        self
    }

    pub fn category(mut self, category: impl Into<String>) -> Self {
        self.category = Some(category.into());
        self
    }

    pub fn year(mut self, year: i32) -> Self {
        self.year = Some(year);
        self
    }

    pub fn is_percent(&self) -> bool {
        self.unit.as_deref().map(str::trim) == Some("%")
    }
}

/// One chart as emitted by the upstream extraction step.
///
/// `chart_type` keeps the raw tag so unknown tags survive decoding and can be
/// reported by the dispatcher. A missing or null tag decodes as `""`.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChartDescriptor {
    #[serde(default, deserialize_with = "null_as_default")]
    pub chart_type: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub subtitle: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source: Option<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub data_points: Vec<DataPoint>,
}

impl ChartDescriptor {
    pub fn new(chart_type: impl Into<String>, title: impl Into<String>) -> Self {
        Self {
            chart_type: chart_type.into(),
            title: title.into(),
            ..Self::default()
        }
    }

    pub fn with_points(mut self, points: Vec<DataPoint>) -> Self {
        self.data_points = points;
        self
    }

    pub fn kind(&self) -> ChartKind {
        ChartKind::from_tag(&self.chart_type)
    }
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum NumberOrString {
    Number(f64),
    String(String),
    Other(IgnoredAny),
}

impl NumberOrString {
    fn as_f64(&self) -> Option<f64> {
        match self {
            NumberOrString::Number(val) => Some(*val),
            NumberOrString::String(val) => parse_leading_number(val),
            NumberOrString::Other(_) => None,
        }
    }
}

/// Parses `"80"`, `" 80 %"` or `"4.5/9"` style strings by their numeric prefix.
pub fn parse_leading_number(text: &str) -> Option<f64> {
    LEADING_NUMBER_RE
        .captures(text)
        .and_then(|caps| caps.get(1))
        .and_then(|m| m.as_str().parse::<f64>().ok())
        .filter(|value| value.is_finite())
}

/// Treats an explicit `null` like a missing field.
fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de> + Default,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

fn lenient_number<'de, D>(deserializer: D) -> Result<f64, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Option::<NumberOrString>::deserialize(deserializer)?;
    Ok(raw.as_ref().and_then(NumberOrString::as_f64).unwrap_or(0.0))
}

fn lenient_year<'de, D>(deserializer: D) -> Result<Option<i32>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Option::<NumberOrString>::deserialize(deserializer)?;
    Ok(raw
        .as_ref()
        .and_then(NumberOrString::as_f64)
        .map(f64::trunc)
        .filter(|year| (f64::from(i32::MIN)..=f64::from(i32::MAX)).contains(year))
        .map(|year| year as i32))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unknown_tags_become_other() {
        assert_eq!(ChartKind::from_tag("donut"), ChartKind::Donut);
        assert_eq!(ChartKind::from_tag("unknown_type"), ChartKind::Other);
        assert_eq!(ChartKind::from_tag(""), ChartKind::Other);
    }

    #[test]
    fn lenient_values_decode() {
        let json = r#"{
            "chartType": "progress",
            "title": "TRL",
            "dataPoints": [
                {"label": "a", "value": "80 %", "unit": "%"},
                {"label": "b", "value": "n/a"},
                {"label": "c", "value": null, "year": "2024"},
                {"label": "d", "value": {"nested": 1}},
                {"label": "e"}
            ]
        }"#;
        let chart: ChartDescriptor = serde_json::from_str(json).unwrap();
        let values: Vec<f64> = chart.data_points.iter().map(|p| p.value).collect();
        assert_eq!(values, vec![80.0, 0.0, 0.0, 0.0, 0.0]);
        assert_eq!(chart.data_points[2].year, Some(2024));
        assert!(chart.data_points[0].is_percent());
        assert_eq!(chart.kind(), ChartKind::Progress);
    }

    #[test]
    fn nulls_decode_as_defaults() {
        let json = r#"{
            "chartType": null,
            "title": null,
            "dataPoints": [{"label": null, "value": 3, "unit": null}]
        }"#;
        let chart: ChartDescriptor = serde_json::from_str(json).unwrap();
        assert_eq!(chart.chart_type, "");
        assert_eq!(chart.kind(), ChartKind::Other);
        assert_eq!(chart.title, "");
        assert_eq!(chart.data_points, vec![DataPoint::new("", 3.0)]);

        let empty: ChartDescriptor = serde_json::from_str(r#"{"dataPoints": null}"#).unwrap();
        assert!(empty.data_points.is_empty());
    }

    #[test]
    fn out_of_range_years_are_dropped() {
        let json = r#"[
            {"label": "far", "year": 1e12},
            {"label": "negative", "year": -1e12},
            {"label": "edge", "year": "2147483647"}
        ]"#;
        let points: Vec<DataPoint> = serde_json::from_str(json).unwrap();
        let years: Vec<Option<i32>> = points.iter().map(|p| p.year).collect();
        assert_eq!(years, vec![None, None, Some(i32::MAX)]);
    }

    #[test]
    fn leading_number_prefix() {
        assert_eq!(parse_leading_number("4.5/9"), Some(4.5));
        assert_eq!(parse_leading_number("  -3"), Some(-3.0));
        assert_eq!(parse_leading_number("about 3"), None);
    }
}
