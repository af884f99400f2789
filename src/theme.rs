use serde::{Deserialize, Serialize};

/// Immutable look of the axis decorations, handed to each component at
/// construction. Colors are `#RRGGBB` strings interpreted by the renderer.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct PlotStyle {
    pub background: String,
    pub grid_line: String,
    pub axis_line: String,
    pub axis_label: String,
    pub axis_label_size: f32,
    /// Reserve room for at least this label so the axis does not jump when
    /// labels gain or lose digits.
    pub min_label_extent: String,
    pub curve_colors: Vec<String>,
}

impl Default for PlotStyle {
    fn default() -> Self {
        Self {
            background: "#FFFFFF".to_string(),
            grid_line: "#353537".to_string(),
            axis_line: "#6E6E6F".to_string(),
            axis_label: "#6E6E6F".to_string(),
            axis_label_size: 11.0,
            min_label_extent: "100.00".to_string(),
            curve_colors: ["#FF7200", "#9013FE", "#00FF00", "#00FFFF", "#FF00FF", "#FFFF00"]
                .iter()
                .map(|c| c.to_string())
                .collect(),
        }
    }
}

impl PlotStyle {
    /// Color for the curve bound to a vertical axis, cycling through the table.
    pub fn curve_color(&self, index: usize) -> Option<&str> {
        if self.curve_colors.is_empty() {
            return None;
        }
        Some(&self.curve_colors[index % self.curve_colors.len()])
    }
}
