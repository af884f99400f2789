use tracing::trace;

use crate::axis_registry::AxisRegistry;
use crate::data_types::{AxisBounds, AxisEvent, AxisId, AxisKey, AxisScale, AxisSide};
use crate::error::AxisError;

/// Callback invoked after every state change. It sees the final registry
/// state but cannot mutate it.
pub type Listener = Box<dyn FnMut(&AxisEvent, &AxisRegistry)>;

/// Sole owner of the [`AxisRegistry`]: derives bounds from scale/offset,
/// applies them and notifies listeners.
///
/// Multi-step operations stage their writes and queue the matching events;
/// listeners only run once the whole operation has been applied.
pub struct CoordinateEngine {
    registry: AxisRegistry,
    listeners: Vec<Listener>,
    pending: Vec<AxisEvent>,
}

impl std::fmt::Debug for CoordinateEngine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CoordinateEngine")
            .field("registry", &self.registry)
            .field("listeners", &self.listeners.len())
            .field("pending", &self.pending)
            .finish()
    }
}

impl CoordinateEngine {
    pub fn new(registry: AxisRegistry) -> Self {
        Self {
            registry,
            listeners: Vec::new(),
            pending: Vec::new(),
        }
    }

    pub fn registry(&self) -> &AxisRegistry {
        &self.registry
    }

    pub fn subscribe(&mut self, listener: impl FnMut(&AxisEvent, &AxisRegistry) + 'static) {
        self.listeners.push(Box::new(listener));
    }

    /// Queues `event` behind any staged ones and delivers them all.
    pub(crate) fn emit(&mut self, event: AxisEvent) {
        self.pending.push(event);
        self.flush();
    }

    /// Delivers every queued event, in staging order, against the current
    /// registry.
    pub(crate) fn flush(&mut self) {
        let events = std::mem::take(&mut self.pending);
        let registry = &self.registry;
        for event in &events {
            trace!(?event, "axis event");
            for listener in self.listeners.iter_mut() {
                listener(event, registry);
            }
        }
    }

    pub fn pts_per_division(&self, key: AxisKey) -> Option<f64> {
        self.registry.get(key).map(|s| s.pts_per_division)
    }

    pub fn offset(&self, key: AxisKey) -> Option<f64> {
        self.registry.get(key).map(|s| s.offset)
    }

    pub fn scale(&self, key: AxisKey) -> Option<AxisScale> {
        self.registry.get(key).map(|s| s.scale_snapshot())
    }

    pub fn bounds(&self, key: AxisKey) -> Option<AxisBounds> {
        self.registry.bounds(key)
    }

    pub fn num_divisions(&self, side: AxisSide) -> u32 {
        self.registry.num_divisions(side)
    }

    /// Data-space size of one division step on `key`, i.e. `scale / n`.
    pub fn step(&self, key: AxisKey) -> Option<f64> {
        let n = self.num_divisions(key.side()) as f64;
        self.pts_per_division(key).map(|s| s / n)
    }

    /// Sets the per-division magnitude. Exact equality with the current value
    /// is a no-op; returns whether anything changed.
    pub fn set_pts_per_division(&mut self, key: AxisKey, value: f64) -> Result<bool, AxisError> {
        let result = self.stage_pts_per_division(key, value);
        self.flush();
        result
    }

    /// Sets the offset and re-applies bounds. Always applied.
    pub fn set_offset(&mut self, key: AxisKey, value: f64) -> Result<(), AxisError> {
        let result = self.stage_offset(key, value);
        self.flush();
        result
    }

    /// Shifts `key` by `delta` data units using that axis's own base bounds
    /// and scale. Returns the new offset.
    pub fn add_offset(&mut self, key: AxisKey, delta: f64) -> Result<f64, AxisError> {
        let current = self.offset(key).ok_or(AxisError::InvalidIndex(key))?;
        let offset = current + delta;
        self.set_offset(key, offset)?;
        Ok(offset)
    }

    /// Applies a scale/offset pair in one step, emitting only for the parts
    /// that changed.
    pub fn apply_scale(&mut self, key: AxisKey, scale: AxisScale) -> Result<(), AxisError> {
        let result = self.stage_scale(key, scale);
        self.flush();
        result
    }

    /// Fits `[min, max]` into the axis: `scale = |span| / n`,
    /// `offset = midpoint`. A zero span keeps the previous scale.
    pub fn set_axis_range(&mut self, key: AxisKey, min: f64, max: f64) -> Result<(), AxisError> {
        let result = self.stage_range(key, min, max);
        self.flush();
        result
    }

    fn stage_pts_per_division(&mut self, key: AxisKey, value: f64) -> Result<bool, AxisError> {
        if !(value.is_finite() && value > 0.0) {
            return Err(AxisError::DegenerateGeometry(key));
        }
        let state = self.registry.get_mut(key)?;
        if state.pts_per_division == value {
            return Ok(false);
        }
        state.pts_per_division = value;
        self.registry.refresh_bounds(key)?;
        self.pending.push(AxisEvent::ScaleChanged { axis: key, value });
        Ok(true)
    }

    fn stage_offset(&mut self, key: AxisKey, value: f64) -> Result<(), AxisError> {
        if !value.is_finite() {
            return Err(AxisError::DegenerateGeometry(key));
        }
        self.registry.get_mut(key)?.offset = value;
        self.registry.refresh_bounds(key)?;
        self.pending.push(AxisEvent::OffsetChanged { axis: key, value });
        Ok(())
    }

    /// Writes scale and offset without notifying; pair with [`Self::flush`].
    pub(crate) fn stage_scale(&mut self, key: AxisKey, scale: AxisScale) -> Result<(), AxisError> {
        self.stage_pts_per_division(key, scale.pts_per_division)?;
        if self.offset(key) != Some(scale.offset) {
            self.stage_offset(key, scale.offset)?;
        }
        Ok(())
    }

    /// Range fit without notifying; pair with [`Self::flush`].
    pub(crate) fn stage_range(
        &mut self,
        key: AxisKey,
        min: f64,
        max: f64,
    ) -> Result<(), AxisError> {
        if !(min.is_finite() && max.is_finite()) {
            return Err(AxisError::DegenerateGeometry(key));
        }
        if !self.registry.contains(key) {
            return Err(AxisError::InvalidIndex(key));
        }
        let n = self.num_divisions(key.side()) as f64;
        let span = (max - min).abs();
        let scale_result = if span > 0.0 {
            self.stage_pts_per_division(key, span / n).map(|_| ())
        } else {
            Err(AxisError::DegenerateGeometry(key))
        };
        self.stage_offset(key, (min + max) / 2.0)?;
        scale_result
    }

    /// Changes the division count of one side and recomputes every axis on it.
    pub fn set_num_divisions(&mut self, side: AxisSide, count: u32) -> Result<bool, AxisError> {
        if !self.registry.set_num_divisions(side, count)? {
            return Ok(false);
        }
        let keys: Vec<AxisKey> = self.registry.keys().filter(|k| k.side() == side).collect();
        for key in keys {
            self.registry.refresh_bounds(key)?;
        }
        self.emit(AxisEvent::DivisionsChanged { side, count });
        Ok(true)
    }

    pub fn add_vertical_axis(&mut self) -> AxisId {
        let id = self.registry.add_vertical_axis();
        self.emit(AxisEvent::AxisAdded(id));
        id
    }

    pub fn remove_vertical_axis(&mut self, id: AxisId) -> Result<(), AxisError> {
        let active_before = self.registry.active_vertical();
        self.registry.remove_vertical_axis(id)?;
        self.pending.push(AxisEvent::AxisRemoved(id));
        if active_before == id || self.registry.active_vertical() != active_before {
            self.pending.push(AxisEvent::ActiveAxisChanged(self.registry.active_vertical()));
        }
        self.flush();
        Ok(())
    }

    pub fn set_vertical_count(&mut self, count: usize) -> Result<(), AxisError> {
        let before = self.registry.vertical_count();
        let active_before = self.registry.active_vertical();
        self.registry.set_vertical_count(count)?;
        for i in before..count {
            self.pending.push(AxisEvent::AxisAdded(AxisId(i)));
        }
        for i in (count..before).rev() {
            self.pending.push(AxisEvent::AxisRemoved(AxisId(i)));
        }
        if self.registry.active_vertical() != active_before {
            self.pending.push(AxisEvent::ActiveAxisChanged(self.registry.active_vertical()));
        }
        self.flush();
        Ok(())
    }

    pub fn set_active_vertical(&mut self, id: AxisId) -> Result<bool, AxisError> {
        let changed = self.registry.set_active_vertical(id)?;
        if changed {
            self.emit(AxisEvent::ActiveAxisChanged(id));
        }
        Ok(changed)
    }

    /// Raises [`AxisEvent::AppearanceChanged`] for every vertical axis whose
    /// visibility flipped.
    pub fn set_exclusive_visibility(&mut self, on: bool) {
        let before: Vec<bool> = self
            .registry
            .vertical_axes()
            .iter()
            .map(|s| s.visible)
            .collect();
        self.registry.set_exclusive_visibility(on);
        for (state, was_visible) in self.registry.vertical_axes().iter().zip(before) {
            if state.visible != was_visible {
                self.pending.push(AxisEvent::AppearanceChanged(AxisKey::Vertical(state.id)));
            }
        }
        self.flush();
    }

    pub fn set_visible(&mut self, key: AxisKey, visible: bool) -> Result<(), AxisError> {
        if self.registry.set_visible(key, visible)? {
            self.emit(AxisEvent::AppearanceChanged(key));
        }
        Ok(())
    }

    pub fn set_inverted(&mut self, key: AxisKey, inverted: bool) -> Result<(), AxisError> {
        if self.registry.set_inverted(key, inverted)? {
            self.emit(AxisEvent::AppearanceChanged(key));
        }
        Ok(())
    }
}
