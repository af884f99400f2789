//! scope_axes: scale, offset and zoom engine for multi-axis oscilloscope plots

pub mod axis_registry;
pub mod axis_renderer;
pub mod coordinate_engine;
pub mod data_types;
pub mod error;
pub mod gesture_adapter;
pub mod grid_aligner;
pub mod scales;
pub mod theme;
pub mod utils;
pub mod view_controller;
pub mod zoom_stack;

pub use axis_registry::AxisRegistry;
pub use axis_renderer::{AxisRenderModel, AxisRenderer, GridModel};
pub use coordinate_engine::CoordinateEngine;
pub use data_types::{
    AxisBounds, AxisEvent, AxisId, AxisKey, AxisSide, EngineConfig, InputEvent, ZoomRect,
};
pub use error::AxisError;
pub use gesture_adapter::GestureAdapter;
pub use grid_aligner::GridAligner;
pub use scales::{ScaleDivision, ScaleStepSequence};
pub use view_controller::ViewController;
pub use zoom_stack::{ZoomStack, ZoomState};
