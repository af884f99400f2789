use scope_axes::axis_registry::AxisRegistry;
use scope_axes::data_types::{AxisId, AxisKey, AxisSide};

#[test]
fn test_new_registry_has_one_active_axis() {
    let registry = AxisRegistry::new(10, 8, true);
    assert_eq!(registry.vertical_count(), 1);
    assert_eq!(registry.active_vertical(), AxisId(0));
    assert_eq!(registry.num_divisions(AxisSide::Horizontal), 10);
    assert_eq!(registry.num_divisions(AxisSide::Vertical), 8);
    assert!(registry.horizontal().gestures_enabled);
    assert!(registry.vertical_axes()[0].gestures_enabled);
}

#[test]
fn test_exclusive_visibility_follows_active() {
    let mut registry = AxisRegistry::new(10, 8, true);
    registry.add_vertical_axis();
    registry.add_vertical_axis();
    assert_eq!(registry.set_active_vertical(AxisId(2)), Ok(true));

    let visible: Vec<bool> = registry.vertical_axes().iter().map(|s| s.visible).collect();
    assert_eq!(visible, vec![false, false, true]);
    let gestures: Vec<bool> = registry
        .vertical_axes()
        .iter()
        .map(|s| s.gestures_enabled)
        .collect();
    assert_eq!(gestures, vec![false, false, true]);

    assert_eq!(registry.set_active_vertical(AxisId(2)), Ok(false));
    assert!(registry.set_active_vertical(AxisId(5)).is_err());
}

#[test]
fn test_shared_visibility_shows_all() {
    let mut registry = AxisRegistry::new(10, 8, true);
    registry.add_vertical_axis();
    registry.set_exclusive_visibility(false);
    assert!(registry.vertical_axes().iter().all(|s| s.visible));
    // Gestures still bind to the active axis only.
    assert!(!registry.vertical_axes()[1].gestures_enabled);
}

#[test]
fn test_active_index_follows_axis_after_removal() {
    let mut registry = AxisRegistry::new(10, 8, true);
    registry.add_vertical_axis();
    registry.add_vertical_axis();
    registry.set_active_vertical(AxisId(2)).unwrap();
    registry.remove_vertical_axis(AxisId(0)).unwrap();
    assert_eq!(registry.active_vertical(), AxisId(1));
    assert_eq!(registry.active_key(), AxisKey::Vertical(AxisId(1)));
}

#[test]
fn test_set_vertical_count() {
    let mut registry = AxisRegistry::new(10, 8, true);
    registry.set_vertical_count(4).unwrap();
    assert_eq!(registry.vertical_count(), 4);
    registry.set_active_vertical(AxisId(3)).unwrap();
    registry.set_vertical_count(2).unwrap();
    assert_eq!(registry.vertical_count(), 2);
    assert_eq!(registry.active_vertical(), AxisId(0));
    assert!(registry.set_vertical_count(0).is_err());
}

#[test]
fn test_keys_list_horizontal_first() {
    let mut registry = AxisRegistry::default();
    registry.add_vertical_axis();
    let keys: Vec<AxisKey> = registry.keys().collect();
    assert_eq!(
        keys,
        vec![
            AxisKey::Horizontal,
            AxisKey::Vertical(AxisId(0)),
            AxisKey::Vertical(AxisId(1)),
        ]
    );
    assert!(!registry.contains(AxisKey::Vertical(AxisId(2))));
    assert!(registry.get(AxisKey::Vertical(AxisId(2))).is_none());
}
