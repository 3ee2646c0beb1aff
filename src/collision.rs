//! Axis-separated movement against static level geometry.
//!
//! Every mover (player, enemies, knockback sub-steps) goes through
//! [`move_and_collide`], which always resolves horizontal before vertical.
//! Each axis is applied in full first and then clamped against what the box
//! overlaps, so a diagonal step can never slip through a corner.

use glam::Vec2;

use crate::geometry::Rect;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Axis {
    Horizontal,
    Vertical,
}

/// Obstacles touched on each axis during one [`move_and_collide`] call.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Contacts {
    pub horizontal: Option<Rect>,
    pub vertical: Option<Rect>,
}

impl Contacts {
    pub fn any(&self) -> bool {
        self.horizontal.is_some() || self.vertical.is_some()
    }
}

/// Shift `hitbox` by `delta` along `axis`, then push it back out of every
/// obstacle it overlaps on the side it was travelling toward.
///
/// An obstacle lying wholly between the start and end positions counts as
/// overlapped, so long steps cannot jump over thin walls.  A zero `delta`
/// still reports contacts but never clamps.  Returns the first obstacle hit.
pub fn resolve_axis(hitbox: &mut Rect, axis: Axis, delta: f32, obstacles: &[Rect]) -> Option<Rect> {
    let start = *hitbox;
    match axis {
        Axis::Horizontal => hitbox.x += delta,
        Axis::Vertical => hitbox.y += delta,
    }

    let mut first_hit = None;
    for obstacle in obstacles {
        let ahead = match axis {
            Axis::Horizontal if delta > 0.0 => obstacle.left() >= start.right(),
            Axis::Horizontal if delta < 0.0 => obstacle.right() <= start.left(),
            Axis::Vertical if delta > 0.0 => obstacle.top() >= start.bottom(),
            Axis::Vertical if delta < 0.0 => obstacle.bottom() <= start.top(),
            _ => false,
        };
        let swept_through = ahead && obstacle.overlaps(&start.union(hitbox));
        if !swept_through && !obstacle.overlaps(hitbox) {
            continue;
        }
        first_hit.get_or_insert(*obstacle);
        match axis {
            Axis::Horizontal if delta > 0.0 => hitbox.set_right(obstacle.left()),
            Axis::Horizontal if delta < 0.0 => hitbox.set_left(obstacle.right()),
            Axis::Vertical if delta > 0.0 => hitbox.set_bottom(obstacle.top()),
            Axis::Vertical if delta < 0.0 => hitbox.set_top(obstacle.bottom()),
            _ => {}
        }
    }
    first_hit
}

/// Move `hitbox` by `delta`: x first, then y.
pub fn move_and_collide(hitbox: &mut Rect, delta: Vec2, obstacles: &[Rect]) -> Contacts {
    let horizontal = resolve_axis(hitbox, Axis::Horizontal, delta.x, obstacles);
    let vertical = resolve_axis(hitbox, Axis::Vertical, delta.y, obstacles);
    Contacts { horizontal, vertical }
}
