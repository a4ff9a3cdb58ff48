use super::{ChartData, UnsupportedLayout};

pub(super) fn compute_unsupported_layout(tag: &str) -> ChartData {
    ChartData::Unsupported(UnsupportedLayout {
        tag: tag.to_string(),
        message: format!("Chart type '{}' is not supported", tag),
    })
}
