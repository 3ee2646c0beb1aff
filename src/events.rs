//! Side effects the core hands to its collaborators.
//!
//! Audio and camera are fire-and-forget: controllers push an event and carry
//! on.  The caller drains the queue after each tick.

use generational_arena::Index;
use glam::Vec2;

use crate::enemy::EnemyKind;
use crate::weapon::WeaponKind;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Sound {
    Step,
    PlayerDamage,
    EnemyKill,
    LaserShot,
    PistolShot,
    ShotgunShot,
    ShotgunReload,
    SniperShot,
    SniperReload,
    MachineGunShot,
    GunSwap,
}

impl Sound {
    /// Asset identifier the audio layer plays.
    pub fn id(self) -> &'static str {
        match self {
            Sound::Step => "step",
            Sound::PlayerDamage => "player_damage",
            Sound::EnemyKill => "enemy_kill",
            Sound::LaserShot => "laser_shot",
            Sound::PistolShot => "pistol_shot",
            Sound::ShotgunShot => "shotgun_shot",
            Sound::ShotgunReload => "shotgun_reload",
            Sound::SniperShot => "sniper_shot",
            Sound::SniperReload => "sniper_reload",
            Sound::MachineGunShot => "machine-gun_shot",
            Sound::GunSwap => "gun_swap",
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub enum GameEvent {
    PlaySound(Sound),
    CameraShake(f32),
    PlayerDamaged { amount: f32, health: f32 },
    PlayerDied,
    EnemyKilled { id: Index, kind: EnemyKind, pos: Vec2 },
    EnemyRemoved { id: Index },
    WeaponChanged(WeaponKind),
}

#[derive(Debug, Default)]
pub struct EventQueue {
    events: Vec<GameEvent>,
}

impl EventQueue {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, event: GameEvent) {
        self.events.push(event);
    }

    pub fn play(&mut self, sound: Sound) {
        self.push(GameEvent::PlaySound(sound));
    }

    pub fn shake(&mut self, magnitude: f32) {
        self.push(GameEvent::CameraShake(magnitude));
    }

    pub fn drain(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }

    pub fn iter(&self) -> impl Iterator<Item = &GameEvent> {
        self.events.iter()
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    pub fn count_sound(&self, sound: Sound) -> usize {
        self.events
            .iter()
            .filter(|e| **e == GameEvent::PlaySound(sound))
            .count()
    }
}
