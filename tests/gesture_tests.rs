use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use scope_axes::data_types::{AxisId, AxisKey, AxisSide, InputEvent};
use scope_axes::view_controller::ViewController;

#[test]
fn test_drag_round_trip_lands_on_zero() {
    let mut vc = ViewController::default();
    let axis = AxisKey::Horizontal;
    vc.set_pts_per_division(axis, 2.0);

    for _ in 0..3 {
        assert!(vc.dispatch(InputEvent::DragDelta { axis, value: 1.0 }));
    }
    assert!((vc.offset(axis).unwrap() - 0.6).abs() < 1e-12);
    for _ in 0..3 {
        vc.dispatch(InputEvent::DragDelta { axis, value: -1.0 });
    }
    assert_eq!(vc.offset(axis), Some(0.0));
}

#[test]
fn test_random_balanced_drags_return_to_zero() {
    let mut rng = StdRng::seed_from_u64(7);
    for _ in 0..50 {
        let mut vc = ViewController::default();
        let axis = AxisKey::Vertical(AxisId(0));
        let scale = [0.001, 0.02, 0.5, 2.0, 10.0][rng.random_range(0..5)];
        vc.set_pts_per_division(axis, scale);

        let moves = rng.random_range(1..40);
        let mut steps: Vec<f64> = (0..moves)
            .flat_map(|_| [1.0, -1.0])
            .collect();
        // Fisher-Yates so the walk crosses zero in arbitrary places.
        for i in (1..steps.len()).rev() {
            let j = rng.random_range(0..=i);
            steps.swap(i, j);
        }
        for value in steps {
            vc.dispatch(InputEvent::DragDelta { axis, value });
        }
        assert_eq!(vc.offset(axis), Some(0.0), "scale {scale} moves {moves}");
    }
}

#[test]
fn test_wheel_stays_on_sequence() {
    let mut rng = StdRng::seed_from_u64(42);
    let mut vc = ViewController::default();
    let axis = AxisKey::Horizontal;
    for _ in 0..200 {
        let event = if rng.random_bool(0.5) {
            InputEvent::WheelUp { axis }
        } else {
            InputEvent::WheelDown { axis }
        };
        vc.dispatch(event);
        let scale = vc.pts_per_division(axis).unwrap();
        assert!(vc.gestures().steps(AxisSide::Horizontal).contains(scale));
    }
}

#[test]
fn test_wheel_direction() {
    let mut vc = ViewController::default();
    let axis = AxisKey::Vertical(AxisId(0));
    assert!(vc.dispatch(InputEvent::WheelDown { axis }));
    assert_eq!(vc.pts_per_division(axis), Some(2.0));
    assert!(vc.dispatch(InputEvent::WheelUp { axis }));
    assert!(vc.dispatch(InputEvent::WheelUp { axis }));
    assert_eq!(vc.pts_per_division(axis), Some(0.5));
}

#[test]
fn test_wheel_respects_max_division() {
    let mut vc = ViewController::default();
    let axis = AxisKey::Horizontal;
    vc.set_max_division(AxisSide::Horizontal, 1.0);
    assert!(!vc.dispatch(InputEvent::WheelDown { axis }));
    assert_eq!(vc.pts_per_division(axis), Some(1.0));
    assert_eq!(vc.max_division(AxisSide::Horizontal), Some(1.0));

    vc.set_min_division(AxisSide::Horizontal, 0.5);
    assert!(vc.dispatch(InputEvent::WheelUp { axis }));
    assert!(!vc.dispatch(InputEvent::WheelUp { axis }));
    assert_eq!(vc.pts_per_division(axis), Some(0.5));
}

#[test]
fn test_gestures_on_inactive_axis_are_ignored() {
    let mut vc = ViewController::default();
    let second = AxisKey::Vertical(vc.add_vertical_axis());
    assert!(!vc.dispatch(InputEvent::WheelDown { axis: second }));
    assert!(!vc.dispatch(InputEvent::DragDelta { axis: second, value: 2.0 }));
    assert_eq!(vc.pts_per_division(second), Some(1.0));
    assert_eq!(vc.offset(second), Some(0.0));

    vc.set_active_vertical(AxisId(1));
    assert!(vc.dispatch(InputEvent::WheelDown { axis: second }));
}

#[test]
fn test_gesture_on_missing_axis_is_ignored() {
    let mut vc = ViewController::default();
    let missing = AxisKey::Vertical(AxisId(9));
    assert!(!vc.dispatch(InputEvent::WheelDown { axis: missing }));
    assert!(!vc.dispatch(InputEvent::DragDelta { axis: missing, value: 1.0 }));
}
