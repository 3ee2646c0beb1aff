//! Player weapons.
//!
//! All four weapons share aiming, cooldown and damage bookkeeping; only the
//! shot pattern differs, so a weapon is one struct tagged by [`WeaponKind`].

use std::collections::BTreeSet;

use glam::Vec2;
use rand::Rng;

use crate::config::{ConfigTables, WeaponConfig};
use crate::error::ConfigResult;
use crate::events::{EventQueue, GameEvent, Sound};
use crate::player::Player;
use crate::projectile::{Projectile, ProjectileOwner};
use crate::timer::Timer;

/// Shots leave this far ahead of the weapon along their direction.
pub const MUZZLE_OFFSET: f32 = 10.0;
pub const SNIPER_RELOAD_DELAY: f32 = 0.4;

#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum WeaponKind {
    Pistol,
    Shotgun,
    Sniper,
    MachineGun,
}

/// How one trigger pull turns into projectiles.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ShotPattern {
    pub count: usize,
    /// Total random spread in degrees, centred on the aim.
    pub spread_deg: f32,
    pub speed: f32,
    pub lifetime: f32,
}

impl WeaponKind {
    pub const ALL: [WeaponKind; 4] = [
        WeaponKind::Pistol,
        WeaponKind::Shotgun,
        WeaponKind::Sniper,
        WeaponKind::MachineGun,
    ];

    /// Key into the weapon tuning table.
    pub fn name(self) -> &'static str {
        match self {
            WeaponKind::Pistol => "pistol",
            WeaponKind::Shotgun => "shotgun",
            WeaponKind::Sniper => "sniper",
            WeaponKind::MachineGun => "machine-gun",
        }
    }

    pub fn from_name(name: &str) -> Option<WeaponKind> {
        Self::ALL.into_iter().find(|k| k.name() == name)
    }

    pub fn pattern(self) -> ShotPattern {
        match self {
            WeaponKind::Pistol => ShotPattern { count: 1, spread_deg: 0.0, speed: 600.0, lifetime: 2.0 },
            WeaponKind::Shotgun => ShotPattern { count: 7, spread_deg: 35.0, speed: 1000.0, lifetime: 0.38 },
            WeaponKind::Sniper => ShotPattern { count: 1, spread_deg: 0.0, speed: 3000.0, lifetime: 2.0 },
            WeaponKind::MachineGun => ShotPattern { count: 1, spread_deg: 0.0, speed: 600.0, lifetime: 1.0 },
        }
    }

    fn fire_sounds(self) -> &'static [Sound] {
        match self {
            WeaponKind::Pistol => &[Sound::PistolShot],
            WeaponKind::Shotgun => &[Sound::ShotgunShot, Sound::ShotgunReload],
            WeaponKind::Sniper => &[Sound::SniperShot],
            WeaponKind::MachineGun => &[Sound::MachineGunShot],
        }
    }
}

// ── Aim input ────────────────────────────────────────────────────────────────

/// Pointer state for one tick.  The player is always drawn at screen centre,
/// so the aim is the pointer's offset from it.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct AimInput {
    pub pointer: Vec2,
    pub screen_center: Vec2,
    pub trigger: bool,
}

impl AimInput {
    /// Unit aim vector; a pointer sitting exactly on centre aims right.
    pub fn direction(&self) -> Vec2 {
        (self.pointer - self.screen_center)
            .try_normalize()
            .unwrap_or(Vec2::X)
    }
}

// ── Weapon ───────────────────────────────────────────────────────────────────

#[derive(Debug)]
pub struct Weapon {
    pub kind: WeaponKind,
    pub aim: Vec2,
    /// Where shots originate; follows the player every tick.
    pub center: Vec2,
    pub damage_multiplier: f32,
    pub damage: f32,
    last_horizontal: i32,
    cooldown: Timer,
    reload: Option<Timer>,
}

impl Weapon {
    pub fn new(kind: WeaponKind, config: &WeaponConfig, damage_upgrade: f32) -> Self {
        Self {
            kind,
            aim: Vec2::X,
            center: Vec2::ZERO,
            damage_multiplier: config.damage_multiplier,
            damage: damage_upgrade * config.damage_multiplier,
            last_horizontal: 1,
            cooldown: Timer::new(config.cooldown),
            reload: None,
        }
    }

    pub fn from_tables(kind: WeaponKind, tables: &ConfigTables, damage_upgrade: f32) -> ConfigResult<Self> {
        Ok(Self::new(kind, tables.weapon(kind.name())?, damage_upgrade))
    }

    /// Last nonzero horizontal movement of the owner: 1 right, -1 left.
    pub fn last_horizontal(&self) -> i32 {
        self.last_horizontal
    }

    pub fn is_ready(&self) -> bool {
        self.cooldown.is_ready()
    }

    pub fn is_reloading(&self) -> bool {
        self.reload.as_ref().is_some_and(Timer::is_active)
    }

    #[allow(clippy::too_many_arguments)]
    pub fn update(
        &mut self,
        aim: &AimInput,
        mount: Vec2,
        owner_direction: Vec2,
        damage_upgrade: f32,
        dt: f32,
        rng: &mut impl Rng,
        spawned: &mut Vec<Projectile>,
        events: &mut EventQueue,
    ) {
        self.aim = aim.direction();
        if owner_direction.x > 0.0 {
            self.last_horizontal = 1;
        } else if owner_direction.x < 0.0 {
            self.last_horizontal = -1;
        }
        self.center = mount;
        self.damage = damage_upgrade * self.damage_multiplier;

        if aim.trigger {
            self.fire(rng, spawned, events);
        }

        self.cooldown.update(dt);
        if let Some(reload) = self.reload.as_mut() {
            if reload.update(dt) {
                events.play(Sound::SniperReload);
                self.reload = None;
            }
        }
    }

    /// Spawn this weapon's pattern if the cooldown allows.  Returns the
    /// number of projectiles created.
    pub fn fire(&mut self, rng: &mut impl Rng, spawned: &mut Vec<Projectile>, events: &mut EventQueue) -> usize {
        if !self.cooldown.is_ready() {
            return 0;
        }
        for &sound in self.kind.fire_sounds() {
            events.play(sound);
        }

        let pattern = self.kind.pattern();
        let base_angle = self.aim.y.atan2(self.aim.x);
        let half_spread = pattern.spread_deg / 2.0;
        for _ in 0..pattern.count {
            let direction = if half_spread > 0.0 {
                let offset = rng.gen_range(-half_spread..=half_spread).to_radians();
                Vec2::from_angle(base_angle + offset)
            } else {
                self.aim
            };
            spawned.push(Projectile::new(
                ProjectileOwner::Player,
                self.center + direction * MUZZLE_OFFSET,
                direction,
                pattern.speed,
                self.damage,
                pattern.lifetime,
            ));
        }

        if self.kind == WeaponKind::Sniper {
            self.reload = Some(Timer::new(SNIPER_RELOAD_DELAY).started());
        }
        self.cooldown.activate();
        tracing::debug!(weapon = self.kind.name(), shots = pattern.count, "fired");
        pattern.count
    }
}

// ── Arsenal ──────────────────────────────────────────────────────────────────

/// Weapons the player has unlocked and may switch between.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Arsenal {
    available: BTreeSet<WeaponKind>,
}

impl Default for Arsenal {
    fn default() -> Self {
        Self { available: BTreeSet::from([WeaponKind::Pistol]) }
    }
}

impl Arsenal {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns `false` if it was already unlocked.
    pub fn unlock(&mut self, kind: WeaponKind) -> bool {
        self.available.insert(kind)
    }

    pub fn is_available(&self, kind: WeaponKind) -> bool {
        self.available.contains(&kind)
    }

    pub fn iter(&self) -> impl Iterator<Item = WeaponKind> + '_ {
        self.available.iter().copied()
    }

    /// Replace the player's weapon with a fresh instance of `name`.
    ///
    /// Unknown or locked weapons are ignored: the shop only offers what the
    /// player owns, so such a request is a no-op rather than an error.
    pub fn equip(
        &self,
        name: &str,
        player: &mut Player,
        tables: &ConfigTables,
        damage_upgrade: f32,
        sound: bool,
        events: &mut EventQueue,
    ) -> bool {
        let Some(kind) = WeaponKind::from_name(name) else {
            tracing::warn!(weapon = name, "ignoring swap to unknown weapon");
            return false;
        };
        if !self.is_available(kind) {
            tracing::warn!(weapon = name, "ignoring swap to locked weapon");
            return false;
        }
        let Ok(config) = tables.weapon(name) else {
            tracing::warn!(weapon = name, "ignoring swap to weapon without tuning");
            return false;
        };

        let mut weapon = Weapon::new(kind, config, damage_upgrade);
        weapon.center = player.weapon.center;
        weapon.aim = player.weapon.aim;
        weapon.last_horizontal = player.weapon.last_horizontal;
        player.weapon = weapon;

        if sound {
            events.play(Sound::GunSwap);
        }
        events.push(GameEvent::WeaponChanged(kind));
        tracing::info!(weapon = name, "weapon changed");
        true
    }
}
