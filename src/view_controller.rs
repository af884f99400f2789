use eyre::Result;
use tracing::{debug, info};

use crate::axis_registry::AxisRegistry;
use crate::axis_renderer::{AxisRenderModel, AxisRenderer, GridModel};
use crate::coordinate_engine::CoordinateEngine;
use crate::data_types::{
    AxisBounds, AxisEvent, AxisId, AxisKey, AxisSide, EngineConfig, InputEvent, ZoomBasePolicy,
    ZoomRect,
};
use crate::error::AxisError;
use crate::gesture_adapter::GestureAdapter;
use crate::zoom_stack::{ZoomStack, ZoomState};

/// ViewController is the public face of the engine: it owns the coordinate
/// engine, zoom history and gesture translation, and resolves every
/// [`AxisError`] locally so interactive input never fails.
#[derive(Debug)]
pub struct ViewController {
    engine: CoordinateEngine,
    zoom: ZoomStack,
    gestures: GestureAdapter,
    renderer: AxisRenderer,
    horizontal_policy: ZoomBasePolicy,
    vertical_policy: ZoomBasePolicy,
    autoscale: bool,
}

impl Default for ViewController {
    fn default() -> Self {
        Self::new(EngineConfig::default())
    }
}

fn resolve<T>(result: Result<T, AxisError>) -> Option<T> {
    match result {
        Ok(v) => Some(v),
        Err(err) => {
            debug!(%err, "input ignored");
            None
        }
    }
}

impl ViewController {
    pub fn new(config: EngineConfig) -> Self {
        let registry = AxisRegistry::new(
            config.horizontal.num_divisions,
            config.vertical.num_divisions,
            config.exclusive_visibility,
        );
        let engine = CoordinateEngine::new(registry);
        let zoom = ZoomStack::new(&engine, config.zoom_max_depth);
        Self {
            gestures: GestureAdapter::new(
                config.horizontal.steps.clone(),
                config.vertical.steps.clone(),
            ),
            renderer: AxisRenderer::new(&config),
            horizontal_policy: config.horizontal.zoom_base,
            vertical_policy: config.vertical.zoom_base,
            engine,
            zoom,
            autoscale: false,
        }
    }

    pub fn from_json(text: &str) -> Result<Self> {
        let config = EngineConfig::from_json(text)?;
        info!(
            h_div = config.horizontal.num_divisions,
            v_div = config.vertical.num_divisions,
            "view controller configured"
        );
        Ok(Self::new(config))
    }

    pub fn engine(&self) -> &CoordinateEngine {
        &self.engine
    }

    pub fn registry(&self) -> &AxisRegistry {
        self.engine.registry()
    }

    pub fn zoom(&self) -> &ZoomStack {
        &self.zoom
    }

    pub fn zoom_state(&self) -> ZoomState {
        self.zoom.state()
    }

    pub fn gestures(&self) -> &GestureAdapter {
        &self.gestures
    }

    pub fn renderer(&self) -> &AxisRenderer {
        &self.renderer
    }

    pub fn renderer_mut(&mut self) -> &mut AxisRenderer {
        &mut self.renderer
    }

    pub fn subscribe(&mut self, listener: impl FnMut(&AxisEvent, &AxisRegistry) + 'static) {
        self.engine.subscribe(listener);
    }

    pub fn pts_per_division(&self, key: AxisKey) -> Option<f64> {
        self.engine.pts_per_division(key)
    }

    pub fn offset(&self, key: AxisKey) -> Option<f64> {
        self.engine.offset(key)
    }

    pub fn bounds(&self, key: AxisKey) -> Option<AxisBounds> {
        self.engine.bounds(key)
    }

    pub fn active_vertical(&self) -> AxisId {
        self.registry().active_vertical()
    }

    // Programmatic API

    pub fn set_pts_per_division(&mut self, key: AxisKey, value: f64) {
        resolve(self.engine.set_pts_per_division(key, value));
    }

    pub fn set_offset(&mut self, key: AxisKey, value: f64) {
        resolve(self.engine.set_offset(key, value));
    }

    pub fn add_offset(&mut self, key: AxisKey, delta: f64) {
        resolve(self.engine.add_offset(key, delta));
    }

    /// Shows `[min, max]` on `key`. Resets the zoom base according to the
    /// side's [`ZoomBasePolicy`] and the autoscale flag.
    pub fn set_axis_range(&mut self, key: AxisKey, min: f64, max: f64) {
        if !self.registry().contains(key) {
            resolve::<()>(Err(AxisError::InvalidIndex(key)));
            return;
        }
        resolve(self.engine.set_axis_range(key, min, max));
        if self.policy(key.side()).resets(self.autoscale) {
            self.zoom.reset_base(&mut self.engine);
        }
    }

    /// Fits the axis to a data range with a relative margin, the way an
    /// autoscale pass would.
    pub fn auto_fit(&mut self, key: AxisKey, data_min: f64, data_max: f64, margin_pct: f64) {
        let (min, max) = Self::compute_auto_fit(data_min, data_max, margin_pct);
        self.set_axis_range(key, min, max);
    }

    /// Bounds for an auto-fit with an optional margin. Non-finite input yields
    /// a unit range; a flat range is widened to one unit around its value.
    pub fn compute_auto_fit(min: f64, max: f64, margin_pct: f64) -> (f64, f64) {
        if !min.is_finite() || !max.is_finite() {
            return (0.0, 1.0);
        }
        let (min, max) = if (max - min).abs() < f64::EPSILON {
            (min - 0.5, max + 0.5)
        } else {
            (min, max)
        };
        let span = max - min;
        (min - span * margin_pct, max + span * margin_pct)
    }

    pub fn set_num_divisions(&mut self, side: AxisSide, count: u32) {
        if resolve(self.engine.set_num_divisions(side, count)) == Some(true) {
            self.zoom.reset_base(&mut self.engine);
        }
    }

    pub fn add_vertical_axis(&mut self) -> AxisId {
        self.engine.add_vertical_axis()
    }

    pub fn remove_vertical_axis(&mut self, id: AxisId) {
        if resolve(self.engine.remove_vertical_axis(id)).is_some() {
            self.zoom.reset_base(&mut self.engine);
        }
    }

    pub fn set_vertical_count(&mut self, count: usize) {
        if resolve(self.engine.set_vertical_count(count)).is_some() {
            self.zoom.reset_base(&mut self.engine);
        }
    }

    pub fn set_active_vertical(&mut self, id: AxisId) {
        if resolve(self.engine.set_active_vertical(id)) == Some(true) {
            self.zoom.reset_base(&mut self.engine);
        }
    }

    pub fn set_exclusive_visibility(&mut self, on: bool) {
        self.engine.set_exclusive_visibility(on);
    }

    pub fn set_visible(&mut self, key: AxisKey, visible: bool) {
        resolve(self.engine.set_visible(key, visible));
    }

    pub fn set_inverted(&mut self, key: AxisKey, inverted: bool) {
        resolve(self.engine.set_inverted(key, inverted));
    }

    pub fn autoscale(&self) -> bool {
        self.autoscale
    }

    pub fn set_autoscale(&mut self, on: bool) {
        self.autoscale = on;
    }

    pub fn policy(&self, side: AxisSide) -> ZoomBasePolicy {
        match side {
            AxisSide::Horizontal => self.horizontal_policy,
            AxisSide::Vertical => self.vertical_policy,
        }
    }

    pub fn set_zoom_base_policy(&mut self, side: AxisSide, policy: ZoomBasePolicy) {
        match side {
            AxisSide::Horizontal => self.horizontal_policy = policy,
            AxisSide::Vertical => self.vertical_policy = policy,
        }
    }

    /// Smallest per-division magnitude reachable by wheel gestures.
    pub fn set_min_division(&mut self, side: AxisSide, value: f64) {
        self.gestures.steps_mut(side).set_lower(value);
    }

    pub fn set_max_division(&mut self, side: AxisSide, value: f64) {
        self.gestures.steps_mut(side).set_upper(value);
    }

    pub fn min_division(&self, side: AxisSide) -> Option<f64> {
        self.gestures.steps(side).lower()
    }

    pub fn max_division(&self, side: AxisSide) -> Option<f64> {
        self.gestures.steps(side).upper()
    }

    // Zoom

    /// Makes the current view the zoom base.
    pub fn zoom_base(&mut self) {
        self.zoom.reset_base(&mut self.engine);
    }

    pub fn zoom_to(&mut self, rect: ZoomRect) -> bool {
        resolve(self.zoom.push(&mut self.engine, rect)).unwrap_or(false)
    }

    pub fn zoom_out(&mut self) -> bool {
        resolve(self.zoom.pop(&mut self.engine)).unwrap_or(false)
    }

    pub fn zoom_in(&mut self) -> bool {
        resolve(self.zoom.redo(&mut self.engine)).unwrap_or(false)
    }

    // Input

    /// Routes one input event. Returns whether engine state changed.
    pub fn dispatch(&mut self, event: InputEvent) -> bool {
        match event {
            InputEvent::PointSelected(point) => {
                self.engine.emit(AxisEvent::PointSelected(point));
                false
            }
            InputEvent::ZoomSelected(rect) => self.zoom_to(rect),
            InputEvent::ZoomOut => self.zoom_out(),
            InputEvent::ZoomIn => self.zoom_in(),
            _ => resolve(self.gestures.handle(&mut self.engine, &event)).unwrap_or(false),
        }
    }

    /// Maps a pixel position along an axis of `total_pixels` to a data value,
    /// honouring the axis direction. Vertical pixels grow downwards.
    pub fn value_at(&self, key: AxisKey, pixels: f64, total_pixels: f64) -> Option<f64> {
        let bounds = self.bounds(key)?;
        let state = self.registry().get(key)?;
        let invert = matches!(key, AxisKey::Vertical(_)) != state.inverted;
        Some(Self::map_pixels_to_value(pixels, total_pixels, bounds.min, bounds.max, invert))
    }

    pub fn map_pixels_to_value(
        pixels: f64,
        total_pixels: f64,
        min_val: f64,
        max_val: f64,
        invert: bool,
    ) -> f64 {
        if total_pixels <= 0.0 {
            return min_val;
        }
        let pct = (pixels / total_pixels).clamp(0.0, 1.0);
        let effective_pct = if invert { 1.0 - pct } else { pct };
        min_val + (max_val - min_val) * effective_pct
    }

    // Rendering

    pub fn axis_model(&self, key: AxisKey) -> Option<AxisRenderModel> {
        self.renderer.axis(self.registry(), key)
    }

    pub fn axes(&self) -> Vec<AxisRenderModel> {
        self.renderer.axes(self.registry())
    }

    pub fn grid(&self) -> GridModel {
        self.renderer.grid(self.registry())
    }
}
