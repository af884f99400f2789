use std::cell::RefCell;
use std::rc::Rc;

use scope_axes::data_types::{
    AxisBounds, AxisEvent, AxisId, AxisKey, AxisSide, DataPoint, EngineConfig, InputEvent,
    ZoomRect,
};
use scope_axes::view_controller::ViewController;
use scope_axes::zoom_stack::ZoomState;

type Seen = Rc<RefCell<Vec<(AxisEvent, Option<AxisBounds>, Option<AxisBounds>)>>>;

/// Records every scale/offset event with the horizontal and active vertical
/// bounds visible to the listener at that moment.
fn record_views(vc: &mut ViewController) -> Seen {
    let seen: Seen = Rc::new(RefCell::new(Vec::new()));
    let sink = seen.clone();
    vc.subscribe(move |event, registry| {
        if matches!(event, AxisEvent::ScaleChanged { .. } | AxisEvent::OffsetChanged { .. }) {
            sink.borrow_mut().push((
                *event,
                registry.bounds(AxisKey::Horizontal),
                registry.bounds(registry.active_key()),
            ));
        }
    });
    seen
}

fn scales(vc: &ViewController) -> Vec<(Option<f64>, Option<f64>)> {
    vc.registry()
        .keys()
        .map(|k| (vc.pts_per_division(k), vc.offset(k)))
        .collect()
}

#[test]
fn test_push_then_pop_restores_exactly() {
    let mut vc = ViewController::default();
    let y = AxisKey::Vertical(AxisId(0));
    vc.set_pts_per_division(y, 0.3);
    vc.set_offset(y, 0.1);
    let before = scales(&vc);

    assert!(vc.zoom_to(ZoomRect::new(0.123, 1.777, -0.33, 0.71)));
    assert_ne!(scales(&vc), before);
    assert!(vc.zoom_out());
    assert_eq!(scales(&vc), before);
    assert_eq!(vc.zoom_state(), ZoomState::Base);
}

#[test]
fn test_zoom_derives_scale_and_offset() {
    let mut vc = ViewController::default();
    assert!(vc.dispatch(InputEvent::ZoomSelected(ZoomRect::new(0.0, 2.0, -1.0, 4.0))));
    assert_eq!(vc.pts_per_division(AxisKey::Horizontal), Some(0.2));
    assert_eq!(vc.offset(AxisKey::Horizontal), Some(1.0));
    let y = AxisKey::Vertical(AxisId(0));
    assert_eq!(vc.pts_per_division(y), Some(0.625));
    assert_eq!(vc.offset(y), Some(1.5));
    assert_eq!(vc.zoom_state(), ZoomState::Zoomed(1));
}

#[test]
fn test_corner_order_does_not_matter() {
    let mut a = ViewController::default();
    let mut b = ViewController::default();
    a.zoom_to(ZoomRect::from_corners(DataPoint::new(0.0, -1.0), DataPoint::new(2.0, 1.0)));
    b.zoom_to(ZoomRect::from_corners(DataPoint::new(2.0, 1.0), DataPoint::new(0.0, -1.0)));
    assert_eq!(scales(&a), scales(&b));
}

#[test]
fn test_inverted_axis_keeps_direction() {
    let mut vc = ViewController::default();
    vc.set_inverted(AxisKey::Horizontal, true);
    vc.zoom_to(ZoomRect::new(0.0, 2.0, -1.0, 1.0));
    assert_eq!(vc.pts_per_division(AxisKey::Horizontal), Some(0.2));
    assert_eq!(vc.offset(AxisKey::Horizontal), Some(1.0));
}

#[test]
fn test_zoom_out_at_base_is_noop() {
    let mut vc = ViewController::default();
    let before = scales(&vc);
    assert!(!vc.dispatch(InputEvent::ZoomOut));
    assert_eq!(scales(&vc), before);
}

#[test]
fn test_redo_after_pop() {
    let mut vc = ViewController::default();
    vc.zoom_to(ZoomRect::new(0.0, 2.0, -1.0, 1.0));
    vc.zoom_to(ZoomRect::new(0.5, 1.5, -0.5, 0.5));
    let deepest = scales(&vc);

    vc.zoom_out();
    assert_eq!(vc.zoom_state(), ZoomState::Zoomed(1));
    assert!(vc.dispatch(InputEvent::ZoomIn));
    assert_eq!(scales(&vc), deepest);
    assert!(!vc.zoom_in());
}

#[test]
fn test_new_selection_discards_redo() {
    let mut vc = ViewController::default();
    vc.zoom_to(ZoomRect::new(0.0, 2.0, -1.0, 1.0));
    vc.zoom_out();
    vc.zoom_to(ZoomRect::new(1.0, 3.0, -1.0, 1.0));
    assert_eq!(vc.zoom().len(), 2);
    assert!(!vc.zoom_in());
}

#[test]
fn test_degenerate_selection_ignored() {
    let mut vc = ViewController::default();
    assert!(!vc.zoom_to(ZoomRect::new(f64::NAN, 1.0, 0.0, 1.0)));
    assert_eq!(vc.zoom_state(), ZoomState::Base);
}

#[test]
fn test_zoom_depth_limit_from_config() {
    let config = EngineConfig {
        zoom_max_depth: Some(1),
        ..Default::default()
    };
    let mut vc = ViewController::new(config);
    assert!(vc.zoom_to(ZoomRect::new(0.0, 2.0, -1.0, 1.0)));
    assert!(!vc.zoom_to(ZoomRect::new(0.5, 1.0, -1.0, 1.0)));
    assert_eq!(vc.zoom().depth(), 1);
}

#[test]
fn test_vertical_range_keeps_base_while_autoscaling() {
    let mut vc = ViewController::default();
    vc.set_autoscale(true);
    vc.zoom_to(ZoomRect::new(0.0, 2.0, -1.0, 1.0));

    vc.set_axis_range(AxisKey::Vertical(AxisId(0)), -3.0, 3.0);
    assert_eq!(vc.zoom_state(), ZoomState::Zoomed(1));

    vc.set_axis_range(AxisKey::Horizontal, 0.0, 1.0);
    assert_eq!(vc.zoom_state(), ZoomState::Base);
}

#[test]
fn test_vertical_range_resets_base_without_autoscale() {
    let mut vc = ViewController::default();
    vc.zoom_to(ZoomRect::new(0.0, 2.0, -1.0, 1.0));
    vc.set_axis_range(AxisKey::Vertical(AxisId(0)), -3.0, 3.0);
    assert_eq!(vc.zoom_state(), ZoomState::Base);
    assert_eq!(vc.zoom().base().y_min, -3.0);
    assert_eq!(vc.zoom().base().y_max, 3.0);
}

#[test]
fn test_active_axis_change_resets_base() {
    let mut vc = ViewController::default();
    let events = Rc::new(RefCell::new(Vec::new()));
    let sink = events.clone();
    vc.subscribe(move |e, _| sink.borrow_mut().push(*e));

    let second = vc.add_vertical_axis();
    vc.zoom_to(ZoomRect::new(0.0, 2.0, -1.0, 1.0));
    vc.set_active_vertical(second);
    assert_eq!(vc.zoom_state(), ZoomState::Base);
    assert!(events.borrow().contains(&AxisEvent::ActiveAxisChanged(second)));
    assert_eq!(events.borrow().last(), Some(&AxisEvent::ZoomChanged { depth: 0 }));
}

#[test]
fn test_zoom_follows_division_count() {
    let mut vc = ViewController::default();
    vc.set_num_divisions(AxisSide::Horizontal, 5);
    vc.zoom_to(ZoomRect::new(0.0, 2.0, -1.0, 1.0));
    assert_eq!(vc.pts_per_division(AxisKey::Horizontal), Some(0.4));
}

#[test]
fn test_listeners_see_complete_zoom() {
    let mut vc = ViewController::default();
    let seen = record_views(&mut vc);

    assert!(vc.zoom_to(ZoomRect::new(2.0, 4.0, 1.0, 3.0)));
    let y = AxisKey::Vertical(AxisId(0));
    let h_final = vc.bounds(AxisKey::Horizontal);
    let v_final = vc.bounds(y);
    assert_eq!(h_final, Some(AxisBounds::new(2.0, 4.0)));
    assert_eq!(v_final, Some(AxisBounds::new(1.0, 3.0)));

    let seen = seen.borrow();
    // Scale and offset on both axes.
    assert_eq!(seen.len(), 4);
    for (event, h, v) in seen.iter() {
        assert_eq!((*h, *v), (h_final, v_final), "stale view during {event:?}");
    }
}

#[test]
fn test_listeners_see_complete_zoom_out() {
    let mut vc = ViewController::default();
    vc.zoom_to(ZoomRect::new(2.0, 4.0, 1.0, 3.0));
    let seen = record_views(&mut vc);

    assert!(vc.zoom_out());
    let h_final = vc.bounds(AxisKey::Horizontal);
    let v_final = vc.bounds(AxisKey::Vertical(AxisId(0)));
    assert_eq!(h_final, Some(AxisBounds::new(-5.0, 5.0)));

    let seen = seen.borrow();
    assert!(!seen.is_empty());
    for (event, h, v) in seen.iter() {
        assert_eq!((*h, *v), (h_final, v_final), "stale view during {event:?}");
    }
}

#[test]
fn test_listeners_see_complete_axis_range() {
    let mut vc = ViewController::default();
    let seen = record_views(&mut vc);

    vc.set_axis_range(AxisKey::Horizontal, 10.0, 30.0);
    let h_final = vc.bounds(AxisKey::Horizontal);
    assert_eq!(h_final, Some(AxisBounds::new(10.0, 30.0)));

    let seen = seen.borrow();
    assert_eq!(seen.len(), 2);
    assert!(seen.iter().all(|(_, h, _)| *h == h_final));
}
