use eyre::{bail, Result, WrapErr};
use serde::{Deserialize, Serialize};

use crate::scales::ScaleStepSequence;
use crate::theme::PlotStyle;

use super::axis::AxisSide;

/// Whether a direct range call on an axis side resets the zoom history.
///
/// The vertical side historically kept its zoom base while autoscale was
/// running (autoscale keeps re-fitting the view), whereas the horizontal side
/// always reset it. Both behaviours are available on both sides.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum ZoomBasePolicy {
    #[default]
    Always,
    UnlessAutoscale,
}

impl ZoomBasePolicy {
    pub fn resets(&self, autoscale: bool) -> bool {
        match self {
            Self::Always => true,
            Self::UnlessAutoscale => !autoscale,
        }
    }
}

/// Independently toggleable parts of an axis decoration.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct DrawCapabilities {
    pub draw_ticks: bool,
    pub draw_labels: bool,
    pub draw_backbone: bool,
}

impl Default for DrawCapabilities {
    fn default() -> Self {
        Self::labels_only()
    }
}

impl DrawCapabilities {
    pub const fn all() -> Self {
        Self {
            draw_ticks: true,
            draw_labels: true,
            draw_backbone: true,
        }
    }

    /// Scope axes: labels without tick marks or baseline.
    pub const fn labels_only() -> Self {
        Self {
            draw_ticks: false,
            draw_labels: true,
            draw_backbone: false,
        }
    }

    /// In-canvas scale items: tick marks only.
    pub const fn ticks_only() -> Self {
        Self {
            draw_ticks: true,
            draw_labels: false,
            draw_backbone: false,
        }
    }

    pub fn is_empty(&self) -> bool {
        !(self.draw_ticks || self.draw_labels || self.draw_backbone)
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct LabelConfig {
    pub unit: String,
    /// Digits after the decimal point.
    pub precision: usize,
}

impl LabelConfig {
    pub fn new(unit: impl Into<String>, precision: usize) -> Self {
        Self {
            unit: unit.into(),
            precision,
        }
    }
}

/// Settings shared by every axis on one side.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct SideConfig {
    pub num_divisions: u32,
    pub steps: ScaleStepSequence,
    pub zoom_base: ZoomBasePolicy,
    pub labels: LabelConfig,
    pub capabilities: DrawCapabilities,
}

impl SideConfig {
    pub fn horizontal() -> Self {
        Self {
            num_divisions: 10,
            steps: ScaleStepSequence::decades(1e-9, 10.0, &[1.0, 2.0, 5.0]),
            zoom_base: ZoomBasePolicy::Always,
            labels: LabelConfig::new("s", 3),
            capabilities: DrawCapabilities::labels_only(),
        }
    }

    pub fn vertical() -> Self {
        Self {
            num_divisions: 8,
            steps: ScaleStepSequence::decades(1e-3, 10.0, &[1.0, 2.0, 5.0]),
            zoom_base: ZoomBasePolicy::UnlessAutoscale,
            labels: LabelConfig::new("V", 3),
            capabilities: DrawCapabilities::labels_only(),
        }
    }
}

/// Complete engine configuration, normally handed over by the host as JSON.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    pub horizontal: SideConfig,
    pub vertical: SideConfig,
    /// Minor grid subdivisions per division.
    pub minor_subdivisions: u32,
    /// Show only the active vertical axis.
    pub exclusive_visibility: bool,
    pub zoom_max_depth: Option<usize>,
    pub style: PlotStyle,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            horizontal: SideConfig::horizontal(),
            vertical: SideConfig::vertical(),
            minor_subdivisions: 5,
            exclusive_visibility: true,
            zoom_max_depth: None,
            style: PlotStyle::default(),
        }
    }
}

impl EngineConfig {
    pub fn from_json(text: &str) -> Result<Self> {
        let config: Self =
            serde_json::from_str(text).wrap_err("failed to parse engine configuration")?;
        config.validate()?;
        Ok(config)
    }

    pub fn to_json(&self) -> Result<String> {
        serde_json::to_string_pretty(self).wrap_err("failed to serialize engine configuration")
    }

    pub fn side(&self, side: AxisSide) -> &SideConfig {
        match side {
            AxisSide::Horizontal => &self.horizontal,
            AxisSide::Vertical => &self.vertical,
        }
    }

    pub fn validate(&self) -> Result<()> {
        for (name, side) in [("horizontal", &self.horizontal), ("vertical", &self.vertical)] {
            if side.num_divisions == 0 {
                bail!("{name} axis needs at least one division");
            }
            if side.steps.is_empty() {
                bail!("{name} scale step sequence is empty");
            }
        }
        if self.minor_subdivisions == 0 {
            bail!("minor_subdivisions must be at least 1");
        }
        if self.zoom_max_depth == Some(0) {
            bail!("zoom_max_depth must be at least 1 when set");
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_policy_resets() {
        assert!(ZoomBasePolicy::Always.resets(true));
        assert!(ZoomBasePolicy::UnlessAutoscale.resets(false));
        assert!(!ZoomBasePolicy::UnlessAutoscale.resets(true));
    }

    #[test]
    fn test_default_config_is_valid() {
        assert!(EngineConfig::default().validate().is_ok());
    }

    #[test]
    fn test_zero_divisions_rejected() {
        let mut config = EngineConfig::default();
        config.vertical.num_divisions = 0;
        assert!(config.validate().is_err());
    }
}
