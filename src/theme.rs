use serde::{Deserialize, Serialize};

const LIGHT_PALETTE: [&str; 8] = [
    "#6366F1", "#10B981", "#F59E0B", "#EF4444", "#8B5CF6", "#06B6D4", "#EC4899", "#84CC16",
];

const DARK_PALETTE: [&str; 8] = [
    "#818CF8", "#34D399", "#FBBF24", "#F87171", "#A78BFA", "#22D3EE", "#F472B6", "#A3E635",
];

/// Color tokens handed to the geometry engine.
///
/// The palette is indexed cyclically by series or point position, so the
/// same point order always gets the same colors.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Theme {
    pub name: String,
    pub font_family: String,
    pub text_color: String,
    pub muted_text_color: String,
    pub grid_color: String,
    pub track_color: String,
    pub background: String,
    pub palette: Vec<String>,
}

impl Theme {
    pub fn light() -> Self {
        Self {
            name: "light".to_string(),
            font_family: "Inter, Segoe UI, system-ui, -apple-system, sans-serif".to_string(),
            text_color: "#1E293B".to_string(),
            muted_text_color: "#64748B".to_string(),
            grid_color: "#E2E8F0".to_string(),
            track_color: "#E5E7EB".to_string(),
            background: "#FFFFFF".to_string(),
            palette: LIGHT_PALETTE.iter().map(|c| c.to_string()).collect(),
        }
    }

    pub fn dark() -> Self {
        Self {
            name: "dark".to_string(),
            font_family: "Inter, Segoe UI, system-ui, -apple-system, sans-serif".to_string(),
            text_color: "#E2E8F0".to_string(),
            muted_text_color: "#94A3B8".to_string(),
            grid_color: "#334155".to_string(),
            track_color: "#374151".to_string(),
            background: "#0F172A".to_string(),
            palette: DARK_PALETTE.iter().map(|c| c.to_string()).collect(),
        }
    }

    pub fn by_name(name: &str) -> Option<Self> {
        match name {
            "light" | "default" => Some(Self::light()),
            "dark" => Some(Self::dark()),
            _ => None,
        }
    }

    /// Palette color for `index`, wrapping around.
    pub fn color(&self, index: usize) -> String {
        if self.palette.is_empty() {
            return self.text_color.clone();
        }
        self.palette[index % self.palette.len()].clone()
    }
}

impl Default for Theme {
    fn default() -> Self {
        Self::light()
    }
}
