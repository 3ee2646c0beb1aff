use blitzframe::collision::*;
use blitzframe::geometry::Rect;
use blitzframe::Vec2;
use proptest::prelude::*;

fn wall() -> Rect {
    Rect::new(20.0, 0.0, 10.0, 10.0)
}

// ── Single axis ───────────────────────────────────────────────────────────────

#[test]
fn moving_right_stops_at_left_edge() {
    let mut b = Rect::new(0.0, 0.0, 10.0, 10.0);
    let hit = resolve_axis(&mut b, Axis::Horizontal, 15.0, &[wall()]);
    assert_eq!(hit, Some(wall()));
    assert_eq!(b.right(), 20.0);
}

#[test]
fn moving_left_stops_at_right_edge() {
    let mut b = Rect::new(50.0, 0.0, 10.0, 10.0);
    let hit = resolve_axis(&mut b, Axis::Horizontal, -100.0, &[wall()]);
    assert!(hit.is_some());
    assert_eq!(b.left(), 30.0);
}

#[test]
fn moving_down_and_up_clamp_vertically() {
    let floor = Rect::new(0.0, 40.0, 100.0, 10.0);
    let mut b = Rect::new(0.0, 0.0, 10.0, 10.0);
    resolve_axis(&mut b, Axis::Vertical, 35.0, &[floor]);
    assert_eq!(b.bottom(), 40.0);

    let ceiling = Rect::new(0.0, -20.0, 100.0, 10.0);
    resolve_axis(&mut b, Axis::Vertical, -100.0, &[ceiling]);
    assert_eq!(b.top(), -10.0);
}

#[test]
fn free_movement_reports_nothing() {
    let mut b = Rect::new(0.0, 50.0, 10.0, 10.0);
    let hit = resolve_axis(&mut b, Axis::Horizontal, 100.0, &[wall()]);
    assert!(hit.is_none());
    assert_eq!(b.x, 100.0);
}

#[test]
fn zero_delta_reports_overlap_without_clamping() {
    let mut b = Rect::new(22.0, 2.0, 4.0, 4.0);
    let hit = resolve_axis(&mut b, Axis::Horizontal, 0.0, &[wall()]);
    assert_eq!(hit, Some(wall()));
    assert_eq!(b, Rect::new(22.0, 2.0, 4.0, 4.0));
}

#[test]
fn touching_edges_do_not_collide() {
    let mut b = Rect::new(0.0, 10.0, 10.0, 10.0); // sits right below the wall's row
    let hit = resolve_axis(&mut b, Axis::Horizontal, 15.0, &[wall()]);
    assert!(hit.is_none());
    assert_eq!(b.x, 15.0);
}

#[test]
fn long_step_does_not_tunnel_through_thin_wall() {
    let thin = Rect::new(100.0, 0.0, 2.0, 10.0);
    let mut b = Rect::new(0.0, 0.0, 10.0, 10.0);
    let hit = resolve_axis(&mut b, Axis::Horizontal, 500.0, &[thin]);
    assert_eq!(hit, Some(thin));
    assert_eq!(b.right(), 100.0);
}

#[test]
fn nearest_of_several_obstacles_wins() {
    let far = Rect::new(80.0, 0.0, 10.0, 10.0);
    let near = Rect::new(40.0, 0.0, 10.0, 10.0);
    let mut b = Rect::new(0.0, 0.0, 10.0, 10.0);
    let hit = resolve_axis(&mut b, Axis::Horizontal, 200.0, &[far, near]);
    assert_eq!(hit, Some(far)); // first in list order
    assert_eq!(b.right(), 40.0);
}

// ── Both axes ─────────────────────────────────────────────────────────────────

#[test]
fn diagonal_resolves_x_then_y() {
    let block = Rect::new(15.0, 15.0, 20.0, 20.0);
    let mut b = Rect::new(0.0, 0.0, 10.0, 10.0);
    let contacts = move_and_collide(&mut b, Vec2::new(10.0, 10.0), &[block]);

    // x is free (the box is still above the block), y then lands on its top
    assert!(contacts.horizontal.is_none());
    assert_eq!(contacts.vertical, Some(block));
    assert!(contacts.any());
    assert_eq!(b, Rect::new(10.0, 5.0, 10.0, 10.0));
}

#[test]
fn sliding_along_a_wall_keeps_the_free_axis() {
    let tall = Rect::new(20.0, -100.0, 10.0, 300.0);
    let mut b = Rect::new(0.0, 0.0, 10.0, 10.0);
    let contacts = move_and_collide(&mut b, Vec2::new(30.0, 25.0), &[tall]);
    assert!(contacts.horizontal.is_some());
    assert!(contacts.vertical.is_none());
    assert_eq!(b.right(), 20.0);
    assert_eq!(b.y, 25.0);
}

// ── Properties ────────────────────────────────────────────────────────────────

proptest! {
    #[test]
    fn moving_right_never_passes_obstacle_left_edge(
        x in -200.0f32..10.0,
        y in -9.0f32..9.0,
        dx in 0.01f32..1000.0,
    ) {
        let mut b = Rect::new(x, y, 10.0, 10.0);
        resolve_axis(&mut b, Axis::Horizontal, dx, &[wall()]);
        prop_assert!(b.right() <= wall().left() + 1e-3);
    }

    #[test]
    fn moving_left_never_passes_obstacle_right_edge(
        x in 30.0f32..300.0,
        y in -9.0f32..9.0,
        dx in 0.01f32..1000.0,
    ) {
        let mut b = Rect::new(x, y, 10.0, 10.0);
        resolve_axis(&mut b, Axis::Horizontal, -dx, &[wall()]);
        prop_assert!(b.left() >= wall().right() - 1e-3);
    }
}
