use std::fmt;

use crate::data_types::AxisKey;

/// Conditions the engine resolves locally instead of surfacing to callers.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum AxisError {
    /// Axis id out of range on remove/activate/mutate.
    InvalidIndex(AxisKey),
    /// Zero or non-finite span, scale or zoom rectangle.
    DegenerateGeometry(AxisKey),
    /// Offset accumulated float noise around zero and was snapped.
    PrecisionDrift { axis: AxisKey, residual: f64 },
}

impl fmt::Display for AxisError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidIndex(axis) => write!(f, "axis {:?} does not exist", axis),
            Self::DegenerateGeometry(axis) => {
                write!(f, "degenerate geometry on axis {:?}", axis)
            }
            Self::PrecisionDrift { axis, residual } => {
                write!(f, "offset drift {residual:e} on axis {:?} snapped to zero", axis)
            }
        }
    }
}

impl std::error::Error for AxisError {}
