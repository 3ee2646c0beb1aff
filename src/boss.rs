//! Boss attack sequencing.
//!
//! A repeating master timer opens a burst every `ATTACK_INTERVAL` seconds.
//! The burst picks one pattern at random and queues `BURST_LEN` one-shot
//! timers, `BURST_DELAY` apart; each one fires the pattern once.

use std::f32::consts::TAU;

use glam::Vec2;
use rand::seq::SliceRandom;
use rand::Rng;

use crate::events::{EventQueue, Sound};
use crate::projectile::{Projectile, ProjectileOwner};
use crate::timer::Timer;

pub const ATTACK_INTERVAL: f32 = 5.0;
pub const BURST_LEN: usize = 6;
pub const BURST_DELAY: f32 = 0.4;
pub const SPIRAL_STEP_DEG: f32 = 10.0;
pub const TRIPLE_SHOT_SPREAD_DEG: f32 = 15.0;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum AttackPattern {
    Star,
    Spiral,
    Wave,
    TripleShot,
    Laser,
}

impl AttackPattern {
    pub const ALL: [AttackPattern; 5] = [
        AttackPattern::Star,
        AttackPattern::Laser,
        AttackPattern::TripleShot,
        AttackPattern::Wave,
        AttackPattern::Spiral,
    ];

    pub fn projectile_count(self) -> usize {
        match self {
            AttackPattern::Star => 8,
            AttackPattern::Spiral => 8,
            AttackPattern::Wave => 12,
            AttackPattern::TripleShot => 3,
            AttackPattern::Laser => 1,
        }
    }

    /// Base `(speed, lifetime)` before the difficulty speed multiplier.
    pub fn ballistics(self) -> (f32, f32) {
        match self {
            AttackPattern::Star => (300.0, 10.0),
            AttackPattern::Spiral => (250.0, 6.0),
            AttackPattern::Wave => (190.0, 7.0),
            AttackPattern::TripleShot => (270.0, 5.0),
            AttackPattern::Laser => (460.0, 3.0),
        }
    }
}

/// Everything a pattern needs to aim one volley.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Volley {
    pub origin: Vec2,
    pub target: Vec2,
    pub speed_multiplier: f32,
    pub damage: f32,
}

#[derive(Debug)]
pub struct AttackOrchestrator {
    master: Timer,
    burst: [Option<Timer>; BURST_LEN],
    pattern: Option<AttackPattern>,
    spiral_angle: f32,
    activations: u64,
}

impl Default for AttackOrchestrator {
    fn default() -> Self {
        Self::new()
    }
}

impl AttackOrchestrator {
    pub fn new() -> Self {
        Self {
            master: Timer::new(ATTACK_INTERVAL).repeating().started(),
            burst: Default::default(),
            pattern: None,
            spiral_angle: 0.0,
            activations: 0,
        }
    }

    /// Pattern of the current (or last) burst.
    pub fn pattern(&self) -> Option<AttackPattern> {
        self.pattern
    }

    pub fn pending_shots(&self) -> usize {
        self.burst.iter().flatten().filter(|t| t.is_active()).count()
    }

    /// Pattern activations fired since creation.
    pub fn activations(&self) -> u64 {
        self.activations
    }

    pub fn spiral_angle(&self) -> f32 {
        self.spiral_angle
    }

    pub fn update(
        &mut self,
        dt: f32,
        volley: Volley,
        rng: &mut impl Rng,
        spawned: &mut Vec<Projectile>,
        events: &mut EventQueue,
    ) {
        if self.master.update(dt) {
            let pattern = *AttackPattern::ALL
                .choose(rng)
                .unwrap_or(&AttackPattern::Star);
            self.schedule_burst(pattern);
        }

        let Some(pattern) = self.pattern else {
            return;
        };
        let mut due = 0;
        for slot in self.burst.iter_mut() {
            if let Some(timer) = slot.as_mut() {
                if timer.update(dt) {
                    *slot = None;
                    due += 1;
                }
            }
        }
        for _ in 0..due {
            self.fire(pattern, volley, spawned, events);
        }
    }

    /// Replace whatever is queued with a fresh burst of `pattern`.
    pub fn schedule_burst(&mut self, pattern: AttackPattern) {
        tracing::debug!(?pattern, "boss burst");
        self.pattern = Some(pattern);
        for (i, slot) in self.burst.iter_mut().enumerate() {
            *slot = Some(Timer::new(BURST_DELAY * (i + 1) as f32).started());
        }
    }

    /// Fire one volley of `pattern`.  Returns the number of projectiles.
    pub fn fire(
        &mut self,
        pattern: AttackPattern,
        volley: Volley,
        spawned: &mut Vec<Projectile>,
        events: &mut EventQueue,
    ) -> usize {
        events.play(Sound::LaserShot);
        self.activations += 1;

        let directions: Vec<Vec2> = match pattern {
            AttackPattern::Star => [
                (0.0, -1.0),
                (1.0, -1.0),
                (1.0, 0.0),
                (1.0, 1.0),
                (0.0, 1.0),
                (-1.0, 1.0),
                (-1.0, 0.0),
                (-1.0, -1.0),
            ]
            .into_iter()
            .map(|(x, y)| Vec2::new(x, y).normalize())
            .collect(),
            AttackPattern::Spiral => {
                self.spiral_angle += SPIRAL_STEP_DEG;
                ring(pattern.projectile_count(), self.spiral_angle.to_radians())
            }
            AttackPattern::Wave => ring(pattern.projectile_count(), 0.0),
            AttackPattern::TripleShot => {
                let aim = aim_at(volley);
                [-TRIPLE_SHOT_SPREAD_DEG, 0.0, TRIPLE_SHOT_SPREAD_DEG]
                    .into_iter()
                    .map(|deg| Vec2::from_angle(deg.to_radians()).rotate(aim))
                    .collect()
            }
            AttackPattern::Laser => vec![aim_at(volley)],
        };

        let (speed, lifetime) = pattern.ballistics();
        let count = directions.len();
        spawned.extend(directions.into_iter().map(|dir| {
            Projectile::new(
                ProjectileOwner::Enemy,
                volley.origin,
                dir,
                speed * volley.speed_multiplier,
                volley.damage,
                lifetime,
            )
        }));
        count
    }
}

/// `count` directions evenly spaced around a circle starting at `start`.
fn ring(count: usize, start: f32) -> Vec<Vec2> {
    (0..count)
        .map(|i| Vec2::from_angle(start + TAU * i as f32 / count as f32))
        .collect()
}

/// Straight at the target, or right if the boss sits on top of it.
fn aim_at(volley: Volley) -> Vec2 {
    (volley.target - volley.origin)
        .try_normalize()
        .unwrap_or(Vec2::X)
}
