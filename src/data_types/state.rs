use serde::{Deserialize, Serialize};

use super::axis::{AxisBounds, AxisId, AxisScale};

/// A point in data space (time on X, channel value on Y).
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct DataPoint {
    pub x: f64,
    pub y: f64,
}

impl DataPoint {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

/// Data-space rectangle `[x_min, x_max] × [y_min, y_max]` selected by a
/// rubber-band zoom. Edges are stored as given; callers normalize through
/// [`ZoomRect::normalized`] when ordering matters.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct ZoomRect {
    pub x_min: f64,
    pub x_max: f64,
    pub y_min: f64,
    pub y_max: f64,
}

impl ZoomRect {
    pub fn new(x_min: f64, x_max: f64, y_min: f64, y_max: f64) -> Self {
        Self {
            x_min,
            x_max,
            y_min,
            y_max,
        }
    }

    /// Rectangle spanned by two opposite corners, in any order.
    pub fn from_corners(a: DataPoint, b: DataPoint) -> Self {
        Self::new(a.x.min(b.x), a.x.max(b.x), a.y.min(b.y), a.y.max(b.y))
    }

    pub fn from_bounds(x: AxisBounds, y: AxisBounds) -> Self {
        Self::new(x.min, x.max, y.min, y.max)
    }

    pub fn normalized(&self) -> Self {
        Self::new(
            self.x_min.min(self.x_max),
            self.x_min.max(self.x_max),
            self.y_min.min(self.y_max),
            self.y_min.max(self.y_max),
        )
    }

    pub fn width(&self) -> f64 {
        (self.x_max - self.x_min).abs()
    }

    pub fn height(&self) -> f64 {
        (self.y_max - self.y_min).abs()
    }

    pub fn is_finite(&self) -> bool {
        self.x_min.is_finite()
            && self.x_max.is_finite()
            && self.y_min.is_finite()
            && self.y_max.is_finite()
    }

    pub fn x_bounds(&self) -> AxisBounds {
        AxisBounds::new(self.x_min, self.x_max)
    }

    pub fn y_bounds(&self) -> AxisBounds {
        AxisBounds::new(self.y_min, self.y_max)
    }
}

/// Scale/offset of the axes a zoom rectangle applies to, captured while that
/// rectangle is current so it can be restored without re-deriving.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct ViewSnapshot {
    pub horizontal: AxisScale,
    pub vertical_axis: AxisId,
    pub vertical: AxisScale,
}
