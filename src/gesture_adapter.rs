use tracing::{debug, trace};

use crate::coordinate_engine::CoordinateEngine;
use crate::data_types::{AxisKey, AxisSide, InputEvent};
use crate::error::AxisError;
use crate::scales::ScaleStepSequence;

/// Relative tolerance, in division steps, under which an offset counts as zero.
const FUZZY_ZERO: f64 = 1e-6;

/// Translates wheel and drag gestures into quantized scale steps and
/// division-sized offset moves on the axis named by the event.
#[derive(Clone, Debug, PartialEq)]
pub struct GestureAdapter {
    horizontal_steps: ScaleStepSequence,
    vertical_steps: ScaleStepSequence,
}

impl GestureAdapter {
    pub fn new(horizontal_steps: ScaleStepSequence, vertical_steps: ScaleStepSequence) -> Self {
        Self {
            horizontal_steps,
            vertical_steps,
        }
    }

    pub fn steps(&self, side: AxisSide) -> &ScaleStepSequence {
        match side {
            AxisSide::Horizontal => &self.horizontal_steps,
            AxisSide::Vertical => &self.vertical_steps,
        }
    }

    pub fn steps_mut(&mut self, side: AxisSide) -> &mut ScaleStepSequence {
        match side {
            AxisSide::Horizontal => &mut self.horizontal_steps,
            AxisSide::Vertical => &mut self.vertical_steps,
        }
    }

    /// Handles wheel and drag events; other events are not gestures and are
    /// left to the caller. Returns whether an axis changed.
    pub fn handle(
        &self,
        engine: &mut CoordinateEngine,
        event: &InputEvent,
    ) -> Result<bool, AxisError> {
        match *event {
            InputEvent::WheelDown { axis } => self.scale_increase(engine, axis),
            InputEvent::WheelUp { axis } => self.scale_decrease(engine, axis),
            InputEvent::DragDelta { axis, value } => {
                self.drag(engine, axis, value).map(|o| o.is_some())
            }
            _ => Ok(false),
        }
    }

    /// Steps the per-division magnitude up to the next sequence member.
    pub fn scale_increase(
        &self,
        engine: &mut CoordinateEngine,
        key: AxisKey,
    ) -> Result<bool, AxisError> {
        if !Self::bound(engine, key)? {
            return Ok(false);
        }
        let steps = self.steps(key.side());
        let current = engine.pts_per_division(key).ok_or(AxisError::InvalidIndex(key))?;
        let next = steps.number_after(current);
        if next == current {
            return Ok(false);
        }
        engine.set_pts_per_division(key, next)
    }

    pub fn scale_decrease(
        &self,
        engine: &mut CoordinateEngine,
        key: AxisKey,
    ) -> Result<bool, AxisError> {
        if !Self::bound(engine, key)? {
            return Ok(false);
        }
        let steps = self.steps(key.side());
        let current = engine.pts_per_division(key).ok_or(AxisError::InvalidIndex(key))?;
        let prev = steps.number_before(current);
        if prev == current {
            return Ok(false);
        }
        engine.set_pts_per_division(key, prev)
    }

    /// Moves the offset by `units` division steps (`scale / n` each).
    /// Results within float noise of zero are snapped to exactly `0.0`.
    /// Returns the applied offset, or `None` when the axis has gestures off.
    pub fn drag(
        &self,
        engine: &mut CoordinateEngine,
        key: AxisKey,
        units: f64,
    ) -> Result<Option<f64>, AxisError> {
        if !Self::bound(engine, key)? {
            return Ok(None);
        }
        if !units.is_finite() {
            return Err(AxisError::DegenerateGeometry(key));
        }
        let step = engine.step(key).ok_or(AxisError::InvalidIndex(key))?;
        let current = engine.offset(key).ok_or(AxisError::InvalidIndex(key))?;

        let mut offset = current + units * step;
        if offset != 0.0 && offset.abs() <= (step * FUZZY_ZERO).abs() {
            trace!(
                "{}",
                AxisError::PrecisionDrift {
                    axis: key,
                    residual: offset
                }
            );
            offset = 0.0;
        }

        engine.set_offset(key, offset)?;
        Ok(Some(offset))
    }

    pub fn offset_increase(
        &self,
        engine: &mut CoordinateEngine,
        key: AxisKey,
    ) -> Result<Option<f64>, AxisError> {
        self.drag(engine, key, 1.0)
    }

    pub fn offset_decrease(
        &self,
        engine: &mut CoordinateEngine,
        key: AxisKey,
    ) -> Result<Option<f64>, AxisError> {
        self.drag(engine, key, -1.0)
    }

    fn bound(engine: &CoordinateEngine, key: AxisKey) -> Result<bool, AxisError> {
        let state = engine
            .registry()
            .get(key)
            .ok_or(AxisError::InvalidIndex(key))?;
        if !state.gestures_enabled {
            debug!(?key, "gesture on axis without bindings ignored");
        }
        Ok(state.gestures_enabled)
    }
}
