use serde::{Deserialize, Serialize};

/// Position of a vertical axis inside the registry.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, Default)]
pub struct AxisId(pub usize);

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AxisSide {
    Vertical,
    Horizontal,
}

/// Addresses exactly one axis. Every engine operation is indexed by this key
/// so that a mutation never reads another axis's scale.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AxisKey {
    Horizontal,
    Vertical(AxisId),
}

impl AxisKey {
    pub fn side(&self) -> AxisSide {
        match self {
            Self::Horizontal => AxisSide::Horizontal,
            Self::Vertical(_) => AxisSide::Vertical,
        }
    }
}

/// Visible data-space interval of an axis.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct AxisBounds {
    pub min: f64,
    pub max: f64,
}

impl AxisBounds {
    pub fn new(min: f64, max: f64) -> Self {
        Self { min, max }
    }

    pub fn span(&self) -> f64 {
        self.max - self.min
    }

    pub fn midpoint(&self) -> f64 {
        (self.min + self.max) / 2.0
    }

    /// Larger of the two absolute bounds, used to pick a label prefix.
    pub fn max_abs(&self) -> f64 {
        self.min.abs().max(self.max.abs())
    }

    pub fn contains(&self, value: f64) -> bool {
        value >= self.min && value <= self.max
    }
}

/// Symmetric zero-centred bounds for a division count: `±n/2`.
pub fn base_bounds(num_divisions: u32) -> AxisBounds {
    let half = num_divisions as f64 / 2.0;
    AxisBounds::new(-half, half)
}

/// State for a single axis (one vertical channel axis or the time axis).
///
/// The division count is not stored here: it is shared by every axis on the
/// same side and owned by the registry.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct AxisState {
    pub id: AxisId,
    pub pts_per_division: f64,
    pub offset: f64,
    pub visible: bool,
    pub gestures_enabled: bool,
    /// Natural direction is decreasing (values grow towards the origin edge).
    pub inverted: bool,
    #[serde(skip)]
    cached_bounds: Option<AxisBounds>,
}

impl AxisState {
    pub fn new(id: AxisId) -> Self {
        Self {
            id,
            pts_per_division: 1.0,
            offset: 0.0,
            visible: true,
            gestures_enabled: false,
            inverted: false,
            cached_bounds: None,
        }
    }

    /// Bounds implied by the current scale and offset.
    pub fn compute_bounds(&self, num_divisions: u32) -> AxisBounds {
        let base = base_bounds(num_divisions);
        AxisBounds::new(
            (base.min * self.pts_per_division) + self.offset,
            (base.max * self.pts_per_division) + self.offset,
        )
    }

    /// Last bounds applied by the engine, if still valid.
    pub fn cached_bounds(&self) -> Option<AxisBounds> {
        self.cached_bounds
    }

    pub fn bounds(&self, num_divisions: u32) -> AxisBounds {
        self.cached_bounds
            .unwrap_or_else(|| self.compute_bounds(num_divisions))
    }

    pub(crate) fn apply_bounds(&mut self, bounds: AxisBounds) {
        self.cached_bounds = Some(bounds);
    }

    pub(crate) fn invalidate(&mut self) {
        self.cached_bounds = None;
    }

    /// Scale and offset only, used to compare and restore zoom states.
    pub fn scale_snapshot(&self) -> AxisScale {
        AxisScale {
            pts_per_division: self.pts_per_division,
            offset: self.offset,
        }
    }

    /// Orders two data-space edges along the axis' natural direction.
    pub fn oriented(&self, a: f64, b: f64) -> (f64, f64) {
        let (lo, hi) = if a <= b { (a, b) } else { (b, a) };
        if self.inverted {
            (hi, lo)
        } else {
            (lo, hi)
        }
    }
}

/// Scale/offset pair of one axis.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct AxisScale {
    pub pts_per_division: f64,
    pub offset: f64,
}
