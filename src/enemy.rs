//! Enemies: pursue the player, steer around walls, hurt on contact.
//!
//! Normal, fast and heavy enemies differ only in their tuning record, so a
//! single [`Enemy`] type covers them all; the boss is the same type with an
//! [`AttackOrchestrator`] attached.

use glam::Vec2;
use rand::Rng;

use crate::animation::FrameCursor;
use crate::boss::{AttackOrchestrator, Volley};
use crate::collision::{resolve_axis, Axis};
use crate::config::{ConfigTables, DifficultyMultipliers, EntityConfig};
use crate::error::ConfigResult;
use crate::events::{EventQueue, Sound};
use crate::geometry::Rect;
use crate::player::ContactSource;
use crate::projectile::Projectile;
use crate::timer::Timer;

// ── Tuning ───────────────────────────────────────────────────────────────────

pub const HITBOX_SHRINK: Vec2 = Vec2::new(20.0, 40.0);
/// Base speed is drawn from `speed ± SPEED_JITTER`.
pub const SPEED_JITTER: f32 = 10.0;
/// Seconds of bump steering per unit of blocking obstacle length.
pub const BUMP_SECONDS_PER_UNIT: f32 = 0.011;
/// Cooldown after a contact hit, during which the enemy is staggered.
pub const DEAL_DAMAGE_COOLDOWN: f32 = 1.0;
pub const STAGGER_SPEED: f32 = 20.0;
pub const DEATH_DURATION: f32 = 0.2;
pub const ANIMATION_FPS: f32 = 5.0;

// ── Kinds ────────────────────────────────────────────────────────────────────

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum EnemyKind {
    Normal,
    Fast,
    Heavy,
    Boss,
}

impl EnemyKind {
    pub const ALL: [EnemyKind; 4] = [EnemyKind::Normal, EnemyKind::Fast, EnemyKind::Heavy, EnemyKind::Boss];

    /// Key into the enemy tuning table.
    pub fn name(self) -> &'static str {
        match self {
            EnemyKind::Normal => "normal",
            EnemyKind::Fast => "fast",
            EnemyKind::Heavy => "heavy",
            EnemyKind::Boss => "first_boss",
        }
    }

    pub fn from_name(name: &str) -> Option<EnemyKind> {
        Self::ALL.into_iter().find(|k| k.name() == name)
    }

    /// Sprite box size.
    pub fn size(self) -> Vec2 {
        match self {
            EnemyKind::Normal => Vec2::new(60.0, 72.0),
            EnemyKind::Fast => Vec2::new(50.0, 64.0),
            EnemyKind::Heavy => Vec2::new(80.0, 96.0),
            EnemyKind::Boss => Vec2::new(180.0, 200.0),
        }
    }

    /// Score awarded per kill.
    pub fn score(self) -> u32 {
        match self {
            EnemyKind::Normal => 100,
            EnemyKind::Fast => 150,
            EnemyKind::Heavy => 200,
            EnemyKind::Boss => 5000,
        }
    }

    pub fn is_boss(self) -> bool {
        self == EnemyKind::Boss
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum EnemyState {
    Alive,
    /// Death animation playing; no collision, no contact damage.
    Dying,
    Removed,
}

// ── Enemy ────────────────────────────────────────────────────────────────────

#[derive(Debug)]
pub struct Enemy {
    pub kind: EnemyKind,
    pub rect: Rect,
    pub hitbox: Rect,
    pub direction: Vec2,
    pub base_speed: f32,
    pub speed: f32,
    pub base_damage: f32,
    pub damage: f32,
    pub health: f32,
    pub max_health: f32,
    pub multipliers: DifficultyMultipliers,
    pub frames: FrameCursor,
    /// Presentation draws the silhouette instead of the sprite.
    pub mask_visual: bool,
    state: EnemyState,
    collision_active: bool,
    deal_damage_timer: Timer,
    bump: Option<Timer>,
    death_timer: Timer,
    attacks: Option<AttackOrchestrator>,
}

impl Enemy {
    pub fn new(
        kind: EnemyKind,
        center: Vec2,
        config: &EntityConfig,
        multipliers: DifficultyMultipliers,
        rng: &mut impl Rng,
    ) -> Self {
        let rolled = rng.gen_range((config.speed - SPEED_JITTER)..=(config.speed + SPEED_JITTER));
        let base_speed = rolled.max(0.0) * multipliers.speed;
        let max_health = config.health * multipliers.health;
        let base_damage = config.damage * multipliers.damage;
        let rect = Rect::from_center(center, kind.size());

        Self {
            kind,
            rect,
            hitbox: rect.inflate(-HITBOX_SHRINK.x, -HITBOX_SHRINK.y),
            direction: Vec2::ZERO,
            base_speed,
            speed: base_speed,
            base_damage,
            damage: base_damage,
            health: max_health,
            max_health,
            multipliers,
            frames: FrameCursor::new(ANIMATION_FPS),
            mask_visual: false,
            state: EnemyState::Alive,
            collision_active: true,
            deal_damage_timer: Timer::new(DEAL_DAMAGE_COOLDOWN),
            bump: None,
            death_timer: Timer::new(DEATH_DURATION),
            attacks: kind.is_boss().then(AttackOrchestrator::new),
        }
    }

    pub fn from_tables(
        kind: EnemyKind,
        center: Vec2,
        tables: &ConfigTables,
        multipliers: DifficultyMultipliers,
        rng: &mut impl Rng,
    ) -> ConfigResult<Self> {
        Ok(Self::new(kind, center, tables.enemy(kind.name())?, multipliers, rng))
    }

    pub fn center(&self) -> Vec2 {
        self.rect.center()
    }

    pub fn state(&self) -> EnemyState {
        self.state
    }

    pub fn is_alive(&self) -> bool {
        self.state == EnemyState::Alive
    }

    pub fn is_removed(&self) -> bool {
        self.state == EnemyState::Removed
    }

    /// Whether this enemy still blocks shots and touches the player.
    pub fn collision_active(&self) -> bool {
        self.collision_active
    }

    pub fn is_bumping(&self) -> bool {
        self.bump.as_ref().is_some_and(Timer::is_active)
    }

    pub fn is_staggered(&self) -> bool {
        self.deal_damage_timer.is_active()
    }

    pub fn attacks(&self) -> Option<&AttackOrchestrator> {
        self.attacks.as_ref()
    }

    pub fn health_ratio(&self) -> f32 {
        (self.health / self.max_health).max(0.0)
    }

    /// Sprite faces left by default; mirror it while moving right.
    pub fn flip_x(&self) -> bool {
        self.direction.x > 0.0
    }

    pub fn contact_source(&self) -> ContactSource {
        ContactSource { center: self.center(), damage: self.damage }
    }

    /// One tick.  `target` is the player's centre.
    pub fn update(
        &mut self,
        target: Vec2,
        dt: f32,
        obstacles: &[Rect],
        rng: &mut impl Rng,
        spawned: &mut Vec<Projectile>,
        events: &mut EventQueue,
    ) {
        match self.state {
            EnemyState::Removed => {}
            EnemyState::Dying => {
                if self.death_timer.update(dt) {
                    self.state = EnemyState::Removed;
                }
            }
            EnemyState::Alive => {
                if let Some(bump) = self.bump.as_mut() {
                    if bump.update(dt) {
                        self.bump = None;
                    }
                }
                if self.deal_damage_timer.update(dt) {
                    self.speed = self.base_speed;
                    self.damage = self.base_damage;
                }
                self.pursue(target, dt, obstacles);
                self.frames.advance(dt);

                if let Some(attacks) = self.attacks.as_mut() {
                    let volley = Volley {
                        origin: self.rect.center(),
                        target,
                        speed_multiplier: self.multipliers.speed,
                        damage: self.damage,
                    };
                    attacks.update(dt, volley, rng, spawned, events);
                }
            }
        }
    }

    fn pursue(&mut self, target: Vec2, dt: f32, obstacles: &[Rect]) {
        if !self.is_bumping() {
            self.direction = (target - self.center()).normalize_or_zero();
        }

        let dx = self.direction.x * self.speed * dt;
        if let Some(obstacle) = resolve_axis(&mut self.hitbox, Axis::Horizontal, dx, obstacles) {
            self.start_bump(Axis::Horizontal, &obstacle, target);
        }
        let dy = self.direction.y * self.speed * dt;
        if let Some(obstacle) = resolve_axis(&mut self.hitbox, Axis::Vertical, dy, obstacles) {
            self.start_bump(Axis::Vertical, &obstacle, target);
        }

        self.rect.set_center(self.hitbox.center());
    }

    /// Steer sideways along the blocking obstacle, toward the player's side
    /// of it, for as long as the obstacle is long.
    fn start_bump(&mut self, blocked: Axis, obstacle: &Rect, target: Vec2) {
        if self.is_bumping() {
            return;
        }
        let offset = target - self.center();
        let extent = match blocked {
            Axis::Horizontal => {
                self.direction = Vec2::new(0.0, if offset.y < 0.0 { -1.0 } else { 1.0 });
                obstacle.h
            }
            Axis::Vertical => {
                self.direction = Vec2::new(if offset.x < 0.0 { -1.0 } else { 1.0 }, 0.0);
                obstacle.w
            }
        };
        self.bump = Some(Timer::new(extent * BUMP_SECONDS_PER_UNIT).started());
    }

    /// Called after this enemy has hurt the player.  Returns `false` while
    /// the previous hit's cooldown is still running.
    pub fn deal_damage(&mut self) -> bool {
        if !self.is_alive() || self.deal_damage_timer.is_active() {
            return false;
        }
        self.damage = 0.0;
        self.speed = STAGGER_SPEED;
        self.deal_damage_timer.activate();
        true
    }

    /// Returns `true` on the hit that kills.  Hits on a dying enemy are
    /// ignored.
    pub fn take_damage(&mut self, amount: f32, events: &mut EventQueue) -> bool {
        if !self.is_alive() {
            return false;
        }
        self.health -= amount;
        if self.health <= 0.0 {
            self.destroy(events);
            return true;
        }
        false
    }

    fn destroy(&mut self, events: &mut EventQueue) {
        self.state = EnemyState::Dying;
        self.collision_active = false;
        self.death_timer.activate();
        self.frames.freeze();
        self.mask_visual = true;
        events.play(Sound::EnemyKill);
        tracing::info!(kind = self.kind.name(), "enemy killed");
    }
}
