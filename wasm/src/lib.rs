use plan_dashboard::{DashboardOptions, ScoringPolicy, Theme, layout_with_options, score_with_options};
use serde::Deserialize;
use wasm_bindgen::prelude::*;

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct DashboardRenderOptions {
    theme: Option<String>,
    policy: Option<ScoringPolicy>,
    chart_height: Option<f64>,
    palette: Option<Vec<String>>,
}

fn build_dashboard_options(options: DashboardRenderOptions) -> DashboardOptions {
    let mut dashboard = DashboardOptions::default();
    if let Some(theme) = options.theme.as_deref().and_then(Theme::by_name) {
        dashboard.theme = theme;
    }
    if let Some(palette) = options.palette {
        dashboard.theme.palette = palette;
    }
    if let Some(policy) = options.policy {
        dashboard.scoring.policy = policy;
    }
    if let Some(height) = options.chart_height {
        dashboard.layout.chart_height = height;
    }
    dashboard
}

fn parse_options(options_json: Option<String>) -> Result<DashboardOptions, String> {
    let options = match options_json {
        Some(raw_options) => serde_json::from_str::<DashboardRenderOptions>(&raw_options)
            .map_err(|error| error.to_string())?,
        None => DashboardRenderOptions::default(),
    };
    Ok(build_dashboard_options(options))
}

fn score_json(record: &str, options_json: Option<String>) -> Result<String, String> {
    let options = parse_options(options_json)?;
    let report = score_with_options(record, &options).map_err(|error| error.to_string())?;
    serde_json::to_string(&report).map_err(|error| error.to_string())
}

fn layout_json(charts: &str, options_json: Option<String>) -> Result<String, String> {
    let options = parse_options(options_json)?;
    let layouts = layout_with_options(charts, &options).map_err(|error| error.to_string())?;
    serde_json::to_string(&layouts).map_err(|error| error.to_string())
}

#[wasm_bindgen]
pub fn score_project(record: &str, options_json: Option<String>) -> Result<String, JsValue> {
    score_json(record, options_json).map_err(|error| JsValue::from_str(&error))
}

#[wasm_bindgen]
pub fn layout_charts(charts: &str, options_json: Option<String>) -> Result<String, JsValue> {
    layout_json(charts, options_json).map_err(|error| JsValue::from_str(&error))
}
