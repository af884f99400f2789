use crate::axis_registry::AxisRegistry;
use crate::data_types::{AxisBounds, AxisKey, AxisSide, DrawCapabilities, EngineConfig};
use crate::grid_aligner::GridAligner;
use crate::scales::ScaleDivision;
use crate::theme::PlotStyle;
use crate::utils::{AxisLabeler, MetricPrefixFormatter};

/// Everything a painter needs for one axis decoration.
#[derive(Clone, Debug, PartialEq)]
pub struct AxisRenderModel {
    pub key: AxisKey,
    pub bounds: AxisBounds,
    pub division: ScaleDivision,
    /// Major tick value and its text; empty when labels are switched off.
    pub labels: Vec<(f64, String)>,
    pub prefix: &'static str,
    pub capabilities: DrawCapabilities,
    pub inverted: bool,
}

/// Edgeless grid for the canvas: horizontal axis and active vertical axis.
#[derive(Clone, Debug, PartialEq)]
pub struct GridModel {
    pub horizontal: ScaleDivision,
    pub vertical: ScaleDivision,
}

#[derive(Clone, Debug)]
struct SideDecoration {
    labeler: AxisLabeler,
    capabilities: DrawCapabilities,
}

/// Builds renderer-facing models from the registry. Holds no axis state of
/// its own, so it is re-queried after every change notification.
#[derive(Clone, Debug)]
pub struct AxisRenderer {
    style: PlotStyle,
    horizontal: SideDecoration,
    vertical: SideDecoration,
    subdivisions: u32,
}

impl AxisRenderer {
    pub fn new(config: &EngineConfig) -> Self {
        Self {
            style: config.style.clone(),
            horizontal: SideDecoration {
                labeler: AxisLabeler::new(
                    MetricPrefixFormatter::time(),
                    config.horizontal.labels.clone(),
                ),
                capabilities: config.horizontal.capabilities,
            },
            vertical: SideDecoration {
                labeler: AxisLabeler::new(
                    MetricPrefixFormatter::metric(),
                    config.vertical.labels.clone(),
                ),
                capabilities: config.vertical.capabilities,
            },
            subdivisions: config.minor_subdivisions,
        }
    }

    pub fn style(&self) -> &PlotStyle {
        &self.style
    }

    fn side(&self, side: AxisSide) -> &SideDecoration {
        match side {
            AxisSide::Horizontal => &self.horizontal,
            AxisSide::Vertical => &self.vertical,
        }
    }

    pub fn labeler(&self, side: AxisSide) -> &AxisLabeler {
        &self.side(side).labeler
    }

    pub fn capabilities(&self, side: AxisSide) -> DrawCapabilities {
        self.side(side).capabilities
    }

    pub fn set_capabilities(&mut self, side: AxisSide, capabilities: DrawCapabilities) {
        match side {
            AxisSide::Horizontal => self.horizontal.capabilities = capabilities,
            AxisSide::Vertical => self.vertical.capabilities = capabilities,
        }
    }

    pub fn division(&self, registry: &AxisRegistry, key: AxisKey) -> Option<ScaleDivision> {
        let bounds = registry.bounds(key)?;
        let n = registry.num_divisions(key.side());
        Some(ScaleDivision::fixed_grid(bounds, n, self.subdivisions))
    }

    pub fn axis(&self, registry: &AxisRegistry, key: AxisKey) -> Option<AxisRenderModel> {
        let state = registry.get(key)?;
        let bounds = registry.bounds(key)?;
        let division = self.division(registry, key)?;
        let deco = self.side(key.side());
        let (prefix, _) = deco.labeler.attributes(bounds);

        let labels = if deco.capabilities.draw_labels {
            division
                .major_ticks
                .iter()
                .map(|t| (*t, deco.labeler.label(*t, bounds)))
                .collect()
        } else {
            Vec::new()
        };

        Some(AxisRenderModel {
            key,
            bounds,
            division,
            labels,
            prefix,
            capabilities: deco.capabilities,
            inverted: state.inverted,
        })
    }

    /// Models for every visible axis, horizontal first.
    pub fn axes(&self, registry: &AxisRegistry) -> Vec<AxisRenderModel> {
        registry
            .keys()
            .filter(|k| registry.get(*k).is_some_and(|s| s.visible))
            .filter_map(|k| self.axis(registry, k))
            .collect()
    }

    pub fn grid(&self, registry: &AxisRegistry) -> GridModel {
        let trimmed = |key| {
            self.division(registry, key)
                .map(|d| GridAligner::trim(&d))
                .unwrap_or_default()
        };
        GridModel {
            horizontal: trimmed(AxisKey::Horizontal),
            vertical: trimmed(registry.active_key()),
        }
    }
}
