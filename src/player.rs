//! The player: 8-way movement, health, the post-hit invulnerability window
//! and knockback away from whatever touched it.

use glam::Vec2;
use rand::Rng;

use crate::animation::{Facing, FrameCursor};
use crate::collision::move_and_collide;
use crate::events::{EventQueue, GameEvent, Sound};
use crate::geometry::Rect;
use crate::projectile::Projectile;
use crate::timer::Timer;
use crate::weapon::{AimInput, Weapon};

// ── Tuning ───────────────────────────────────────────────────────────────────

pub const PLAYER_SIZE: Vec2 = Vec2::new(60.0, 90.0);
/// Hit box is the sprite box shrunk by this much on each axis.
pub const HITBOX_SHRINK: Vec2 = Vec2::new(30.0, 50.0);
pub const PLAYER_SPEED: f32 = 150.0;
pub const PLAYER_MAX_HEALTH: f32 = 100.0;

pub const DAMAGE_DELAY: f32 = 1.0;
pub const KNOCKBACK_SPEED: f32 = 400.0;
pub const KNOCKBACK_DURATION: f32 = 0.1;
/// Longest distance moved between two collision checks during knockback.
pub const KNOCKBACK_SUBSTEP: f32 = 2.0;
/// Knockback lockout after a contact hit.
pub const HIT_KNOCKBACK_FREEZE: f32 = 0.5;
/// Knockback lockout after brushing level geometry.
pub const WALL_KNOCKBACK_FREEZE: f32 = 0.1;
pub const STEP_INTERVAL: f32 = 0.4;
pub const WALK_FRAME_RATE: f32 = 10.0;

/// Camera shake for a hit that leaves the player at `health`.
pub fn shake_magnitude(health: f32) -> f32 {
    if health <= 20.0 {
        20.0
    } else if health <= 50.0 {
        15.0
    } else if health <= 80.0 {
        10.0
    } else {
        5.0
    }
}

// ── Input ────────────────────────────────────────────────────────────────────

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct MoveInput {
    pub up: bool,
    pub down: bool,
    pub left: bool,
    pub right: bool,
}

impl MoveInput {
    /// Unit (or zero) direction; diagonals are normalized.
    pub fn direction(&self) -> Vec2 {
        let x = self.right as i8 - self.left as i8;
        let y = self.down as i8 - self.up as i8;
        Vec2::new(x as f32, y as f32).normalize_or_zero()
    }
}

/// Whatever touched the player: where it is and how hard it hits.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ContactSource {
    pub center: Vec2,
    pub damage: f32,
}

#[derive(Debug)]
pub struct Knockback {
    pub direction: Vec2,
    pub speed: f32,
    timer: Timer,
}

impl Knockback {
    fn new(direction: Vec2) -> Self {
        Self {
            direction,
            speed: KNOCKBACK_SPEED,
            timer: Timer::new(KNOCKBACK_DURATION).started(),
        }
    }

    pub fn is_active(&self) -> bool {
        self.timer.is_active()
    }
}

// ── Player ───────────────────────────────────────────────────────────────────

#[derive(Debug)]
pub struct Player {
    pub rect: Rect,
    pub hitbox: Rect,
    pub direction: Vec2,
    pub speed: f32,
    pub health: f32,
    pub max_health: f32,
    alive: bool,
    damage_delay: Timer,
    /// Cleared while knockback is locked out.
    knockback_enabled: bool,
    knockback_freeze: Option<Timer>,
    knockback: Option<Knockback>,
    pub facing: Facing,
    pub last_facing: Facing,
    pub frames: FrameCursor,
    step_timer: Timer,
    pub weapon: Weapon,
}

impl Player {
    pub fn new(center: Vec2, weapon: Weapon) -> Self {
        let rect = Rect::from_center(center, PLAYER_SIZE);
        let mut frames = FrameCursor::new(WALK_FRAME_RATE);
        frames.reset_to(1.0);
        Self {
            rect,
            hitbox: rect.inflate(-HITBOX_SHRINK.x, -HITBOX_SHRINK.y),
            direction: Vec2::ZERO,
            speed: PLAYER_SPEED,
            health: PLAYER_MAX_HEALTH,
            max_health: PLAYER_MAX_HEALTH,
            alive: true,
            damage_delay: Timer::new(DAMAGE_DELAY),
            knockback_enabled: true,
            knockback_freeze: None,
            knockback: None,
            facing: Facing::Down,
            last_facing: Facing::Down,
            frames,
            step_timer: Timer::new(STEP_INTERVAL),
            weapon,
        }
    }

    pub fn center(&self) -> Vec2 {
        self.rect.center()
    }

    pub fn is_alive(&self) -> bool {
        self.alive
    }

    pub fn is_invulnerable(&self) -> bool {
        self.damage_delay.is_active()
    }

    pub fn knockback(&self) -> Option<&Knockback> {
        self.knockback.as_ref()
    }

    pub fn health_ratio(&self) -> f32 {
        (self.health / self.max_health).max(0.0)
    }

    /// One tick: input, movement, knockback, animation, then timers.
    /// A dead player is frozen.
    pub fn update(&mut self, input: &MoveInput, dt: f32, obstacles: &[Rect], events: &mut EventQueue) {
        if !self.alive {
            return;
        }
        self.read_input(input, events);
        self.move_by(self.direction * self.speed * dt, obstacles);
        self.damage_delay.update(dt);
        self.apply_knockback(dt, obstacles);
        self.animate(dt);

        self.step_timer.update(dt);
        if let Some(freeze) = self.knockback_freeze.as_mut() {
            if freeze.update(dt) {
                self.knockback_enabled = true;
                self.knockback_freeze = None;
            }
        }
    }

    /// Aim, re-derive damage and fire the equipped weapon.
    pub fn update_weapon(
        &mut self,
        aim: &AimInput,
        damage_upgrade: f32,
        dt: f32,
        rng: &mut impl Rng,
        spawned: &mut Vec<Projectile>,
        events: &mut EventQueue,
    ) {
        if !self.alive {
            return;
        }
        let mount = self.weapon_mount(aim);
        self.weapon
            .update(aim, mount, self.direction, damage_upgrade, dt, rng, spawned, events);
    }

    fn read_input(&mut self, input: &MoveInput, events: &mut EventQueue) {
        self.direction = input.direction();
        if self.direction != Vec2::ZERO && self.step_timer.is_ready() {
            events.play(Sound::Step);
            self.step_timer.activate();
        }
    }

    fn move_by(&mut self, delta: Vec2, obstacles: &[Rect]) {
        let contacts = move_and_collide(&mut self.hitbox, delta, obstacles);
        if contacts.any() {
            self.freeze_knockback(WALL_KNOCKBACK_FREEZE);
        }
        self.rect.set_center(self.hitbox.center());
    }

    fn freeze_knockback(&mut self, duration: f32) {
        self.knockback_enabled = false;
        self.knockback_freeze = Some(Timer::new(duration).started());
    }

    /// Damage from touching `source`; pushes the player away from it.
    pub fn take_contact_damage(&mut self, source: ContactSource, events: &mut EventQueue) -> bool {
        if !self.apply_damage(source.damage, events) {
            return false;
        }
        if self.alive && self.knockback_enabled {
            let away = self.center() - source.center;
            self.knockback = away.try_normalize().map(Knockback::new);
        }
        self.freeze_knockback(HIT_KNOCKBACK_FREEZE);
        true
    }

    /// Damage with no physical source (enemy shots).
    pub fn take_direct_damage(&mut self, amount: f32, events: &mut EventQueue) -> bool {
        self.apply_damage(amount, events)
    }

    fn apply_damage(&mut self, amount: f32, events: &mut EventQueue) -> bool {
        if !self.alive || self.damage_delay.is_active() {
            return false;
        }
        if self.knockback.as_ref().is_some_and(Knockback::is_active) {
            return false;
        }

        self.health -= amount;
        self.damage_delay.activate();
        events.play(Sound::PlayerDamage);
        events.shake(shake_magnitude(self.health));
        events.push(GameEvent::PlayerDamaged { amount, health: self.health.max(0.0) });

        if self.health <= 0.0 {
            self.die(events);
        }
        true
    }

    fn die(&mut self, events: &mut EventQueue) {
        self.health = 0.0;
        self.alive = false;
        self.direction = Vec2::ZERO;
        self.knockback = None;
        tracing::info!("player died");
        events.push(GameEvent::PlayerDied);
    }

    /// Move along the knockback direction in slices of at most
    /// `KNOCKBACK_SUBSTEP`, resolving collisions after each slice.
    pub fn apply_knockback(&mut self, dt: f32, obstacles: &[Rect]) {
        let Some(knockback) = self.knockback.as_mut() else {
            return;
        };
        if knockback.is_active() {
            let full = knockback.direction * knockback.speed * dt;
            let steps = (full.length() / KNOCKBACK_SUBSTEP).floor() as usize + 1;
            let step = full / steps as f32;
            for _ in 0..steps {
                move_and_collide(&mut self.hitbox, step, obstacles);
            }
            self.rect.set_center(self.hitbox.center());
            knockback.timer.update(dt);
        }
        if !knockback.is_active() {
            self.knockback = None;
        }
    }

    fn animate(&mut self, dt: f32) {
        match Facing::from_direction(self.direction) {
            Some(facing) => {
                self.frames.advance(dt);
                self.facing = facing;
                self.last_facing = facing;
            }
            None => {
                self.frames.reset_to(1.0);
                self.facing = self.last_facing;
            }
        }
    }

    /// Where the weapon sits relative to the body for the current facing.
    fn weapon_mount(&self, aim: &AimInput) -> Vec2 {
        let y = if self.facing.is_upward() { -3.0 } else { 15.0 };
        let mut x: f32 = if self.facing.is_rightward() {
            10.0
        } else if self.facing.is_leftward() {
            -10.0
        } else {
            0.0
        };
        let aim_side = if aim.direction().x > 0.0 { 1 } else { -1 };
        let body_side = if self.direction.x > 0.0 {
            1
        } else if self.direction.x < 0.0 {
            -1
        } else {
            self.weapon.last_horizontal()
        };
        if body_side != aim_side {
            x = (x / 10.0).floor();
        }
        self.center() + Vec2::new(x, y)
    }
}
