//! Straight-line shots with a finite lifetime.

use glam::Vec2;

use crate::geometry::Rect;
use crate::timer::Timer;

/// Hit box side length for every shot.
pub const PROJECTILE_SIZE: f32 = 8.0;
/// Longest gap between two hit tests along one tick's travel.
pub const SWEEP_STEP: f32 = PROJECTILE_SIZE / 2.0;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ProjectileOwner {
    Player,
    Enemy,
}

#[derive(Debug)]
pub struct Projectile {
    pub pos: Vec2,
    /// Where the last `update` started from.
    prev_pos: Vec2,
    /// Unit vector.
    pub direction: Vec2,
    pub speed: f32,
    pub damage: f32,
    pub owner: ProjectileOwner,
    lifetime: Timer,
    alive: bool,
}

impl Projectile {
    pub fn new(
        owner: ProjectileOwner,
        pos: Vec2,
        direction: Vec2,
        speed: f32,
        damage: f32,
        lifetime: f32,
    ) -> Self {
        Self {
            pos,
            prev_pos: pos,
            direction: direction.try_normalize().unwrap_or(Vec2::X),
            speed,
            damage,
            owner,
            lifetime: Timer::new(lifetime).started(),
            alive: true,
        }
    }

    pub fn update(&mut self, dt: f32) {
        if !self.alive {
            return;
        }
        self.prev_pos = self.pos;
        self.pos += self.direction * self.speed * dt;
        if self.lifetime.update(dt) {
            self.alive = false;
        }
    }

    pub fn hitbox(&self) -> Rect {
        Rect::from_center(self.pos, Vec2::splat(PROJECTILE_SIZE))
    }

    /// Centres to hit-test for the last tick's travel, from the previous
    /// position to the current one, at most `SWEEP_STEP` apart.
    pub fn path(&self) -> impl Iterator<Item = Vec2> {
        let start = self.prev_pos;
        let travel = self.pos - self.prev_pos;
        let steps = (travel.length() / SWEEP_STEP).ceil().max(1.0) as usize;
        (0..=steps).map(move |i| start + travel * (i as f32 / steps as f32))
    }

    /// Kill the shot where it struck something along its path.
    pub fn stop_at(&mut self, pos: Vec2) {
        self.pos = pos;
        self.kill();
    }

    /// Removal hook for whoever registers the hit.
    pub fn kill(&mut self) {
        self.alive = false;
        self.lifetime.deactivate();
    }

    pub fn is_alive(&self) -> bool {
        self.alive
    }

    pub fn remaining_lifetime(&self) -> f32 {
        self.lifetime.remaining()
    }
}
