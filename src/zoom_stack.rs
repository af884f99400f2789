use tracing::debug;

use crate::coordinate_engine::CoordinateEngine;
use crate::data_types::{AxisBounds, AxisEvent, AxisKey, ViewSnapshot, ZoomRect};
use crate::error::AxisError;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ZoomState {
    Base,
    Zoomed(usize),
}

#[derive(Clone, Copy, Debug, PartialEq)]
struct ZoomEntry {
    rect: ZoomRect,
    /// Axis scales while this entry was current, restored verbatim on undo.
    snapshot: Option<ViewSnapshot>,
}

/// Rubber-band zoom history over the horizontal axis and the active vertical
/// axis. Entry 0 is the zoom base.
#[derive(Clone, Debug, PartialEq)]
pub struct ZoomStack {
    entries: Vec<ZoomEntry>,
    index: usize,
    max_depth: Option<usize>,
}

impl ZoomStack {
    pub fn new(engine: &CoordinateEngine, max_depth: Option<usize>) -> Self {
        Self {
            entries: vec![ZoomEntry {
                rect: Self::view_rect(engine),
                snapshot: Some(Self::capture(engine)),
            }],
            index: 0,
            max_depth,
        }
    }

    pub fn state(&self) -> ZoomState {
        match self.index {
            0 => ZoomState::Base,
            depth => ZoomState::Zoomed(depth),
        }
    }

    pub fn depth(&self) -> usize {
        self.index
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn current(&self) -> ZoomRect {
        self.entries[self.index].rect
    }

    pub fn base(&self) -> ZoomRect {
        self.entries[0].rect
    }

    pub fn rects(&self) -> impl Iterator<Item = ZoomRect> + '_ {
        self.entries.iter().map(|e| e.rect)
    }

    /// Rectangle currently shown by the horizontal and active vertical axes.
    pub fn view_rect(engine: &CoordinateEngine) -> ZoomRect {
        let registry = engine.registry();
        let x = registry.bounds(AxisKey::Horizontal).unwrap_or_default();
        let y = registry.bounds(registry.active_key()).unwrap_or_default();
        ZoomRect::from_bounds(x, y).normalized()
    }

    fn capture(engine: &CoordinateEngine) -> ViewSnapshot {
        let registry = engine.registry();
        let active = registry.active_key();
        ViewSnapshot {
            horizontal: registry.horizontal().scale_snapshot(),
            vertical_axis: registry.active_vertical(),
            vertical: registry
                .get(active)
                .map(|s| s.scale_snapshot())
                .unwrap_or(registry.horizontal().scale_snapshot()),
        }
    }

    /// Collapses the history to one entry matching the current full view.
    pub fn reset_base(&mut self, engine: &mut CoordinateEngine) {
        self.entries.clear();
        self.entries.push(ZoomEntry {
            rect: Self::view_rect(engine),
            snapshot: Some(Self::capture(engine)),
        });
        self.index = 0;
        engine.emit(AxisEvent::ZoomChanged { depth: 0 });
    }

    /// Zooms into `rect`. Pushing the rectangle that is already current is a
    /// no-op. Returns whether the view changed.
    pub fn push(
        &mut self,
        engine: &mut CoordinateEngine,
        rect: ZoomRect,
    ) -> Result<bool, AxisError> {
        if !rect.is_finite() {
            return Err(AxisError::DegenerateGeometry(AxisKey::Horizontal));
        }
        let rect = rect.normalized();
        if rect == self.current() {
            return Ok(false);
        }
        if let Some(max) = self.max_depth {
            if self.index >= max {
                debug!(max, "zoom stack full, selection ignored");
                return Ok(false);
            }
        }

        self.entries[self.index].snapshot = Some(Self::capture(engine));
        self.entries.truncate(self.index + 1);
        self.entries.push(ZoomEntry {
            rect,
            snapshot: None,
        });
        self.index += 1;
        self.rescale(engine)?;
        Ok(true)
    }

    /// Steps back one rectangle. No-op at the base.
    pub fn pop(&mut self, engine: &mut CoordinateEngine) -> Result<bool, AxisError> {
        if self.index == 0 {
            return Ok(false);
        }
        self.entries[self.index].snapshot = Some(Self::capture(engine));
        self.index -= 1;
        self.rescale(engine)?;
        Ok(true)
    }

    /// Steps forward again after [`ZoomStack::pop`].
    pub fn redo(&mut self, engine: &mut CoordinateEngine) -> Result<bool, AxisError> {
        if self.index + 1 >= self.entries.len() {
            return Ok(false);
        }
        self.entries[self.index].snapshot = Some(Self::capture(engine));
        self.index += 1;
        self.rescale(engine)?;
        Ok(true)
    }

    /// Applies the current entry to the horizontal and active vertical axes.
    /// Both axes are written before any listener runs.
    fn rescale(&mut self, engine: &mut CoordinateEngine) -> Result<(), AxisError> {
        let entry = self.entries[self.index];
        let vertical = engine.registry().active_key();

        let restore = entry
            .snapshot
            .filter(|snap| engine.registry().contains(AxisKey::Vertical(snap.vertical_axis)));
        let staged = match restore {
            Some(snap) => engine
                .stage_scale(AxisKey::Horizontal, snap.horizontal)
                .and_then(|_| {
                    engine.stage_scale(AxisKey::Vertical(snap.vertical_axis), snap.vertical)
                }),
            None => Self::fit(engine, AxisKey::Horizontal, entry.rect.x_bounds())
                .and_then(|_| Self::fit(engine, vertical, entry.rect.y_bounds())),
        };
        if staged.is_err() {
            engine.flush();
            return staged;
        }

        self.entries[self.index].snapshot = Some(Self::capture(engine));
        engine.emit(AxisEvent::ZoomChanged { depth: self.index });
        Ok(())
    }

    /// `scale = |span| / n`, `offset = midpoint`, edges taken in the axis'
    /// natural direction. A zero span keeps the axis' previous scale.
    fn fit(
        engine: &mut CoordinateEngine,
        key: AxisKey,
        bounds: AxisBounds,
    ) -> Result<(), AxisError> {
        let state = engine
            .registry()
            .get(key)
            .ok_or(AxisError::InvalidIndex(key))?;
        let (first, second) = state.oriented(bounds.min, bounds.max);
        match engine.stage_range(key, first, second) {
            Err(AxisError::DegenerateGeometry(axis)) => {
                debug!(?axis, "zero-span zoom edge, keeping previous scale");
                Ok(())
            }
            other => other,
        }
    }
}
