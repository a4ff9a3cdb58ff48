use crate::completeness::ScoringPolicy;
use crate::theme::Theme;
use serde::{Deserialize, Serialize};
use std::path::Path;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DonutConfig {
    pub inner_radius_ratio: f64,
    pub inner_radius_min: f64,
    pub inner_radius_max: f64,
    pub outer_radius_ratio: f64,
    pub outer_radius_min: f64,
    pub outer_radius_max: f64,
    /// Heights at or below this render the compact variant.
    pub small_height: f64,
    pub label_font_size: f64,
    pub small_label_font_size: f64,
    pub legend_font_size: f64,
    pub small_legend_font_size: f64,
    pub center_y_ratio: f64,
    pub small_center_y_ratio: f64,
    pub label_offset: f64,
    pub small_label_offset: f64,
    pub start_angle: f64,
    pub end_angle: f64,
}

impl Default for DonutConfig {
    fn default() -> Self {
        Self {
            inner_radius_ratio: 0.19,
            inner_radius_min: 24.0,
            inner_radius_max: 70.0,
            outer_radius_ratio: 0.30,
            outer_radius_min: 40.0,
            outer_radius_max: 110.0,
            small_height: 180.0,
            label_font_size: 12.0,
            small_label_font_size: 10.0,
            legend_font_size: 12.0,
            small_legend_font_size: 10.0,
            center_y_ratio: 0.45,
            small_center_y_ratio: 0.42,
            label_offset: 10.0,
            small_label_offset: 8.0,
            start_angle: 0.0,
            end_angle: 360.0,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GaugeConfig {
    pub inner_radius_ratio: f64,
    pub outer_radius_ratio: f64,
    /// Scale maximum for values without a `%` unit is `value * headroom`,
    /// never below `min_scale_max`.
    pub headroom: f64,
    pub min_scale_max: f64,
    pub start_angle: f64,
    pub end_angle: f64,
}

impl Default for GaugeConfig {
    fn default() -> Self {
        Self {
            inner_radius_ratio: 0.30,
            outer_radius_ratio: 0.45,
            headroom: 1.5,
            min_scale_max: 10.0,
            start_angle: 180.0,
            end_angle: 0.0,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LayoutConfig {
    pub chart_height: f64,
    pub donut: DonutConfig,
    pub gauge: GaugeConfig,
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            chart_height: 250.0,
            donut: DonutConfig::default(),
            gauge: GaugeConfig::default(),
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ScoringConfig {
    pub policy: ScoringPolicy,
    /// Replaces the built-in skip set when present.
    pub skip_fields: Option<Vec<String>>,
}

#[derive(Debug, Clone, Default)]
pub struct Config {
    pub theme: Theme,
    pub layout: LayoutConfig,
    pub scoring: ScoringConfig,
}

#[derive(Debug, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
struct DonutConfigFile {
    inner_radius_ratio: Option<f64>,
    inner_radius_min: Option<f64>,
    inner_radius_max: Option<f64>,
    outer_radius_ratio: Option<f64>,
    outer_radius_min: Option<f64>,
    outer_radius_max: Option<f64>,
    small_height: Option<f64>,
    label_font_size: Option<f64>,
    small_label_font_size: Option<f64>,
    legend_font_size: Option<f64>,
    small_legend_font_size: Option<f64>,
    center_y_ratio: Option<f64>,
    small_center_y_ratio: Option<f64>,
    label_offset: Option<f64>,
    small_label_offset: Option<f64>,
}

#[derive(Debug, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
struct GaugeConfigFile {
    inner_radius_ratio: Option<f64>,
    outer_radius_ratio: Option<f64>,
    headroom: Option<f64>,
    min_scale_max: Option<f64>,
}

#[derive(Debug, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
struct ScoringConfigFile {
    policy: Option<ScoringPolicy>,
    skip_fields: Option<Vec<String>>,
}

#[derive(Debug, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
struct ConfigFile {
    theme: Option<String>,
    palette: Option<Vec<String>>,
    track_color: Option<String>,
    text_color: Option<String>,
    chart_height: Option<f64>,
    scoring: Option<ScoringConfigFile>,
    donut: Option<DonutConfigFile>,
    gauge: Option<GaugeConfigFile>,
}

pub fn load_config(path: Option<&Path>) -> anyhow::Result<Config> {
    let Some(path) = path else {
        return Ok(Config::default());
    };
    let contents = std::fs::read_to_string(path)?;
    parse_config(&contents)
}

/// Overlays a camelCase JSON config document on the defaults.
pub fn parse_config(contents: &str) -> anyhow::Result<Config> {
    let mut config = Config::default();
    let parsed: ConfigFile = serde_json::from_str(contents)?;

    if let Some(theme_name) = parsed.theme.as_deref() {
        config.theme = Theme::by_name(theme_name)
            .ok_or_else(|| anyhow::anyhow!("unknown theme '{theme_name}'"))?;
    }
    if let Some(palette) = parsed.palette {
        config.theme.palette = palette;
    }
    if let Some(v) = parsed.track_color {
        config.theme.track_color = v;
    }
    if let Some(v) = parsed.text_color {
        config.theme.text_color = v;
    }
    if let Some(v) = parsed.chart_height {
        config.layout.chart_height = v;
    }

    if let Some(scoring) = parsed.scoring {
        if let Some(v) = scoring.policy {
            config.scoring.policy = v;
        }
        if scoring.skip_fields.is_some() {
            config.scoring.skip_fields = scoring.skip_fields;
        }
    }

    if let Some(donut) = parsed.donut {
        let cfg = &mut config.layout.donut;
        if let Some(v) = donut.inner_radius_ratio {
            cfg.inner_radius_ratio = v;
        }
        if let Some(v) = donut.inner_radius_min {
            cfg.inner_radius_min = v;
        }
        if let Some(v) = donut.inner_radius_max {
            cfg.inner_radius_max = v;
        }
        if let Some(v) = donut.outer_radius_ratio {
            cfg.outer_radius_ratio = v;
        }
        if let Some(v) = donut.outer_radius_min {
            cfg.outer_radius_min = v;
        }
        if let Some(v) = donut.outer_radius_max {
            cfg.outer_radius_max = v;
        }
        if let Some(v) = donut.small_height {
            cfg.small_height = v;
        }
        if let Some(v) = donut.label_font_size {
            cfg.label_font_size = v;
        }
        if let Some(v) = donut.small_label_font_size {
            cfg.small_label_font_size = v;
        }
        if let Some(v) = donut.legend_font_size {
            cfg.legend_font_size = v;
        }
        if let Some(v) = donut.small_legend_font_size {
            cfg.small_legend_font_size = v;
        }
        if let Some(v) = donut.center_y_ratio {
            cfg.center_y_ratio = v;
        }
        if let Some(v) = donut.small_center_y_ratio {
            cfg.small_center_y_ratio = v;
        }
        if let Some(v) = donut.label_offset {
            cfg.label_offset = v;
        }
        if let Some(v) = donut.small_label_offset {
            cfg.small_label_offset = v;
        }
    }

    if let Some(gauge) = parsed.gauge {
        let cfg = &mut config.layout.gauge;
        if let Some(v) = gauge.inner_radius_ratio {
            cfg.inner_radius_ratio = v;
        }
        if let Some(v) = gauge.outer_radius_ratio {
            cfg.outer_radius_ratio = v;
        }
        if let Some(v) = gauge.headroom {
            cfg.headroom = v;
        }
        if let Some(v) = gauge.min_scale_max {
            cfg.min_scale_max = v;
        }
    }

    Ok(config)
}
