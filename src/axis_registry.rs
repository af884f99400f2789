use crate::data_types::{AxisBounds, AxisId, AxisKey, AxisSide, AxisState};
use crate::error::AxisError;

/// Ordered vertical axes plus the shared horizontal (time) axis.
///
/// Vertical axes are addressed by their position; display order is insertion
/// order. There is always at least one vertical axis and the active index is
/// always in range.
#[derive(Clone, Debug, PartialEq)]
pub struct AxisRegistry {
    vertical: Vec<AxisState>,
    horizontal: AxisState,
    active_vertical: usize,
    vertical_divisions: u32,
    horizontal_divisions: u32,
    exclusive_visibility: bool,
}

impl AxisRegistry {
    pub fn new(
        horizontal_divisions: u32,
        vertical_divisions: u32,
        exclusive_visibility: bool,
    ) -> Self {
        let mut horizontal = AxisState::new(AxisId(0));
        horizontal.gestures_enabled = true;
        let mut registry = Self {
            vertical: vec![AxisState::new(AxisId(0))],
            horizontal,
            active_vertical: 0,
            vertical_divisions: vertical_divisions.max(1),
            horizontal_divisions: horizontal_divisions.max(1),
            exclusive_visibility,
        };
        registry.apply_bindings();
        registry.refresh_all();
        registry
    }

    pub fn vertical_count(&self) -> usize {
        self.vertical.len()
    }

    pub fn vertical_axes(&self) -> &[AxisState] {
        &self.vertical
    }

    pub fn horizontal(&self) -> &AxisState {
        &self.horizontal
    }

    pub fn active_vertical(&self) -> AxisId {
        AxisId(self.active_vertical)
    }

    pub fn active_key(&self) -> AxisKey {
        AxisKey::Vertical(self.active_vertical())
    }

    pub fn exclusive_visibility(&self) -> bool {
        self.exclusive_visibility
    }

    pub fn num_divisions(&self, side: AxisSide) -> u32 {
        match side {
            AxisSide::Vertical => self.vertical_divisions,
            AxisSide::Horizontal => self.horizontal_divisions,
        }
    }

    pub fn contains(&self, key: AxisKey) -> bool {
        self.get(key).is_some()
    }

    pub fn get(&self, key: AxisKey) -> Option<&AxisState> {
        match key {
            AxisKey::Horizontal => Some(&self.horizontal),
            AxisKey::Vertical(id) => self.vertical.get(id.0),
        }
    }

    pub(crate) fn get_mut(&mut self, key: AxisKey) -> Result<&mut AxisState, AxisError> {
        match key {
            AxisKey::Horizontal => Ok(&mut self.horizontal),
            AxisKey::Vertical(id) => self
                .vertical
                .get_mut(id.0)
                .ok_or(AxisError::InvalidIndex(key)),
        }
    }

    /// Horizontal axis first, then every vertical axis in display order.
    pub fn keys(&self) -> impl Iterator<Item = AxisKey> + '_ {
        std::iter::once(AxisKey::Horizontal).chain(
            (0..self.vertical.len()).map(|i| AxisKey::Vertical(AxisId(i))),
        )
    }

    /// Visible bounds of an axis; recomputed from scale/offset when the cache
    /// was invalidated.
    pub fn bounds(&self, key: AxisKey) -> Option<AxisBounds> {
        let divisions = self.num_divisions(key.side());
        self.get(key).map(|s| s.bounds(divisions))
    }

    pub fn add_vertical_axis(&mut self) -> AxisId {
        let id = AxisId(self.vertical.len());
        let mut state = AxisState::new(id);
        state.apply_bounds(state.compute_bounds(self.vertical_divisions));
        self.vertical.push(state);
        self.apply_bindings();
        id
    }

    /// Removes a vertical axis and renumbers the ones after it. The last
    /// remaining vertical axis cannot be removed.
    pub fn remove_vertical_axis(&mut self, id: AxisId) -> Result<(), AxisError> {
        if id.0 >= self.vertical.len() || self.vertical.len() == 1 {
            return Err(AxisError::InvalidIndex(AxisKey::Vertical(id)));
        }

        self.vertical.remove(id.0);
        for (i, state) in self.vertical.iter_mut().enumerate().skip(id.0) {
            state.id = AxisId(i);
        }

        if self.active_vertical == id.0 {
            self.active_vertical = 0;
        } else if self.active_vertical > id.0 {
            // Keep following the same axis after renumbering.
            self.active_vertical -= 1;
        }
        self.apply_bindings();
        Ok(())
    }

    /// Grows or shrinks the vertical list; new axes get default scale/offset.
    pub fn set_vertical_count(&mut self, count: usize) -> Result<(), AxisError> {
        if count == 0 {
            return Err(AxisError::InvalidIndex(AxisKey::Vertical(AxisId(0))));
        }
        self.vertical.truncate(count);
        while self.vertical.len() < count {
            let id = AxisId(self.vertical.len());
            let mut state = AxisState::new(id);
            state.apply_bounds(state.compute_bounds(self.vertical_divisions));
            self.vertical.push(state);
        }
        if self.active_vertical >= count {
            self.active_vertical = 0;
        }
        self.apply_bindings();
        Ok(())
    }

    /// Returns whether the active axis changed.
    pub fn set_active_vertical(&mut self, id: AxisId) -> Result<bool, AxisError> {
        if id.0 >= self.vertical.len() {
            return Err(AxisError::InvalidIndex(AxisKey::Vertical(id)));
        }
        let changed = self.active_vertical != id.0;
        self.active_vertical = id.0;
        self.apply_bindings();
        Ok(changed)
    }

    pub fn set_exclusive_visibility(&mut self, on: bool) {
        self.exclusive_visibility = on;
        if !on {
            for state in &mut self.vertical {
                state.visible = true;
            }
        }
        self.apply_bindings();
    }

    /// Returns whether the flag changed.
    pub fn set_visible(&mut self, key: AxisKey, visible: bool) -> Result<bool, AxisError> {
        let state = self.get_mut(key)?;
        let changed = state.visible != visible;
        state.visible = visible;
        Ok(changed)
    }

    pub fn set_inverted(&mut self, key: AxisKey, inverted: bool) -> Result<bool, AxisError> {
        let state = self.get_mut(key)?;
        let changed = state.inverted != inverted;
        state.inverted = inverted;
        Ok(changed)
    }

    /// Changes the division count of one side and invalidates the cached
    /// bounds of every axis on it. Returns whether the count changed.
    pub fn set_num_divisions(&mut self, side: AxisSide, count: u32) -> Result<bool, AxisError> {
        if count == 0 {
            let key = match side {
                AxisSide::Horizontal => AxisKey::Horizontal,
                AxisSide::Vertical => self.active_key(),
            };
            return Err(AxisError::DegenerateGeometry(key));
        }
        let slot = match side {
            AxisSide::Vertical => &mut self.vertical_divisions,
            AxisSide::Horizontal => &mut self.horizontal_divisions,
        };
        if *slot == count {
            return Ok(false);
        }
        *slot = count;
        match side {
            AxisSide::Vertical => self.vertical.iter_mut().for_each(AxisState::invalidate),
            AxisSide::Horizontal => self.horizontal.invalidate(),
        }
        Ok(true)
    }

    /// Recomputes and stores the bounds of one axis from its scale/offset.
    pub(crate) fn refresh_bounds(&mut self, key: AxisKey) -> Result<AxisBounds, AxisError> {
        let divisions = self.num_divisions(key.side());
        let state = self.get_mut(key)?;
        let bounds = state.compute_bounds(divisions);
        state.apply_bounds(bounds);
        Ok(bounds)
    }

    pub(crate) fn refresh_all(&mut self) {
        let keys: Vec<AxisKey> = self.keys().collect();
        for key in keys {
            let _ = self.refresh_bounds(key);
        }
    }

    fn apply_bindings(&mut self) {
        let active = self.active_vertical;
        let exclusive = self.exclusive_visibility;
        for (i, state) in self.vertical.iter_mut().enumerate() {
            state.gestures_enabled = i == active;
            if exclusive {
                state.visible = i == active;
            }
        }
        self.horizontal.gestures_enabled = true;
    }
}

impl Default for AxisRegistry {
    fn default() -> Self {
        Self::new(10, 8, true)
    }
}
