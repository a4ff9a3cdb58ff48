#[cfg(feature = "cli")]
pub mod cli;
pub mod completeness;
pub mod config;
pub mod content;
pub mod ir;
pub mod layout;
pub mod layout_dump;
pub mod parser;
pub mod record;
pub mod theme;

#[cfg(feature = "cli")]
pub use cli::run;
pub use completeness::{CompletenessReport, CompletenessScorer, ScoringPolicy, SectionScore};
pub use config::{Config, LayoutConfig, ScoringConfig};
pub use content::ContentDetector;
pub use ir::{ChartDescriptor, ChartKind, DataPoint};
pub use layout::{ChartData, ChartLayout, MATURITY_SCALE_MAX, Renderer, compute_layout, resolve};
pub use parser::{ParseError, parse_chart_descriptors, parse_project_record};
pub use record::{ProjectRecord, SectionKey, Value};
pub use theme::Theme;

/// Settings for one dashboard pass.
#[derive(Debug, Clone, Default)]
pub struct DashboardOptions {
    pub theme: Theme,
    pub layout: LayoutConfig,
    pub scoring: ScoringConfig,
}

impl DashboardOptions {
    pub fn light() -> Self {
        Self::default()
    }

    pub fn dark() -> Self {
        Self {
            theme: Theme::dark(),
            ..Self::default()
        }
    }

    pub fn with_policy(mut self, policy: ScoringPolicy) -> Self {
        self.scoring.policy = policy;
        self
    }

    pub fn with_chart_height(mut self, height: f64) -> Self {
        self.layout.chart_height = height;
        self
    }
}

impl From<Config> for DashboardOptions {
    fn from(config: Config) -> Self {
        Self {
            theme: config.theme,
            layout: config.layout,
            scoring: config.scoring,
        }
    }
}

pub fn score_with_options(
    record_json: &str,
    options: &DashboardOptions,
) -> Result<CompletenessReport, ParseError> {
    let record = parse_project_record(record_json)?;
    Ok(CompletenessScorer::from_config(&options.scoring).report(&record))
}

pub fn layout_with_options(
    charts_json: &str,
    options: &DashboardOptions,
) -> Result<Vec<ChartLayout>, ParseError> {
    let charts = parse_chart_descriptors(charts_json)?;
    Ok(layout::compute_layouts(
        &charts,
        options.layout.chart_height,
        &options.theme,
        &options.layout,
    ))
}
