use serde::{Deserialize, Serialize};

use super::axis::{AxisId, AxisKey, AxisSide};
use super::state::{DataPoint, ZoomRect};

/// Discrete input posted by the host widget.
///
/// Every axis gesture names the axis that produced it, so the engine never has
/// to guess the sender.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub enum InputEvent {
    WheelUp { axis: AxisKey },
    WheelDown { axis: AxisKey },
    /// Drag along an axis, in gesture units (one unit = one division step).
    DragDelta { axis: AxisKey, value: f64 },
    PointSelected(DataPoint),
    ZoomSelected(ZoomRect),
    ZoomOut,
    ZoomIn,
}

/// Change notification raised after the state it describes is final.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub enum AxisEvent {
    ScaleChanged { axis: AxisKey, value: f64 },
    OffsetChanged { axis: AxisKey, value: f64 },
    PointSelected(DataPoint),
    DivisionsChanged { side: AxisSide, count: u32 },
    ActiveAxisChanged(AxisId),
    AxisAdded(AxisId),
    AxisRemoved(AxisId),
    ZoomChanged { depth: usize },
    /// Visibility or direction of an axis changed; decorations need a redraw.
    AppearanceChanged(AxisKey),
}

impl AxisEvent {
    /// Axis the event refers to, when it refers to one.
    pub fn axis(&self) -> Option<AxisKey> {
        match self {
            Self::ScaleChanged { axis, .. }
            | Self::OffsetChanged { axis, .. }
            | Self::AppearanceChanged(axis) => Some(*axis),
            Self::ActiveAxisChanged(id) | Self::AxisAdded(id) | Self::AxisRemoved(id) => {
                Some(AxisKey::Vertical(*id))
            }
            _ => None,
        }
    }
}
