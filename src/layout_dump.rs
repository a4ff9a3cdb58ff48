use crate::completeness::CompletenessReport;
use crate::layout::ChartLayout;
use serde::Serialize;
use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::Path;

/// Everything a drawing layer needs for one dashboard pass.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardDump<'a> {
    pub theme: &'a str,
    pub height: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub completeness: Option<&'a CompletenessReport>,
    pub charts: &'a [ChartLayout],
    pub unsupported: usize,
}

impl<'a> DashboardDump<'a> {
    pub fn new(theme: &'a str, height: f64, charts: &'a [ChartLayout]) -> Self {
        Self {
            theme,
            height,
            completeness: None,
            charts,
            unsupported: charts.iter().filter(|chart| !chart.is_supported()).count(),
        }
    }

    pub fn with_completeness(mut self, report: &'a CompletenessReport) -> Self {
        self.completeness = Some(report);
        self
    }
}

pub fn write_dump<T: Serialize>(value: &T, path: Option<&Path>) -> anyhow::Result<()> {
    match path {
        Some(path) => {
            let file = File::create(path)?;
            let mut writer = BufWriter::new(file);
            serde_json::to_writer_pretty(&mut writer, value)?;
            writer.flush()?;
        }
        None => {
            let stdout = io::stdout();
            let mut writer = stdout.lock();
            serde_json::to_writer_pretty(&mut writer, value)?;
            writeln!(writer)?;
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::LayoutConfig;
    use crate::ir::{ChartDescriptor, DataPoint};
    use crate::layout::compute_layouts;
    use crate::theme::Theme;

    #[test]
    fn counts_unsupported_charts() {
        let charts = vec![
            ChartDescriptor::new("donut", "A").with_points(vec![DataPoint::new("x", 1.0)]),
            ChartDescriptor::new("sankey", "B"),
        ];
        let layouts = compute_layouts(&charts, 250.0, &Theme::light(), &LayoutConfig::default());
        let dump = DashboardDump::new("light", 250.0, &layouts);
        assert_eq!(dump.unsupported, 1);
        let json = serde_json::to_value(&dump).unwrap();
        assert_eq!(json["charts"][1]["data"]["type"], "unsupported");
        assert!(json.get("completeness").is_none());
    }
}
