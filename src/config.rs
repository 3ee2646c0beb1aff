//! Static tuning data: per-archetype enemy stats, per-weapon stats and the
//! difficulty presets.  Loaded once, read-only afterwards.

use std::collections::BTreeMap;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{ConfigError, ConfigResult};

// ── Records ──────────────────────────────────────────────────────────────────

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct EntityConfig {
    pub speed: f32,
    pub health: f32,
    pub damage: f32,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct WeaponConfig {
    /// Seconds between shots.
    pub cooldown: f32,
    pub damage_multiplier: f32,
    pub price: u32,
    #[serde(default)]
    pub description: String,
}

// ── Difficulty ───────────────────────────────────────────────────────────────

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Difficulty {
    Easy,
    Medium,
    Hard,
}

/// Scaling applied once when an enemy spawns.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct DifficultyMultipliers {
    pub health: f32,
    pub speed: f32,
    pub damage: f32,
}

impl Default for DifficultyMultipliers {
    fn default() -> Self {
        Self { health: 1.0, speed: 1.0, damage: 1.0 }
    }
}

impl Difficulty {
    pub fn multipliers(self) -> DifficultyMultipliers {
        match self {
            Difficulty::Easy => DifficultyMultipliers { health: 0.8, speed: 0.9, damage: 0.7 },
            Difficulty::Medium => DifficultyMultipliers::default(),
            Difficulty::Hard => DifficultyMultipliers { health: 1.5, speed: 1.2, damage: 1.5 },
        }
    }
}

// ── Tables ───────────────────────────────────────────────────────────────────

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ConfigTables {
    pub enemies: BTreeMap<String, EntityConfig>,
    pub weapons: BTreeMap<String, WeaponConfig>,
}

impl ConfigTables {
    pub fn from_json_str(json: &str) -> ConfigResult<Self> {
        let tables: ConfigTables = serde_json::from_str(json)?;
        tables.check_values()?;
        Ok(tables)
    }

    pub fn load(path: impl AsRef<Path>) -> ConfigResult<Self> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let tables = Self::from_json_str(&json)?;
        tracing::info!(
            path = %path.display(),
            enemies = tables.enemies.len(),
            weapons = tables.weapons.len(),
            "loaded tuning tables"
        );
        Ok(tables)
    }

    pub fn enemy(&self, name: &str) -> ConfigResult<&EntityConfig> {
        self.enemies
            .get(name)
            .ok_or_else(|| ConfigError::UnknownEnemy(name.to_string()))
    }

    pub fn weapon(&self, name: &str) -> ConfigResult<&WeaponConfig> {
        self.weapons
            .get(name)
            .ok_or_else(|| ConfigError::UnknownWeapon(name.to_string()))
    }

    /// Fail fast unless every listed archetype and weapon has a record.
    pub fn require<'a>(
        &self,
        enemies: impl IntoIterator<Item = &'a str>,
        weapons: impl IntoIterator<Item = &'a str>,
    ) -> ConfigResult<()> {
        for name in enemies {
            self.enemy(name)?;
        }
        for name in weapons {
            self.weapon(name)?;
        }
        Ok(())
    }

    fn check_values(&self) -> ConfigResult<()> {
        let invalid = |name: &str, reason: &str| ConfigError::Invalid {
            name: name.to_string(),
            reason: reason.to_string(),
        };
        for (name, e) in &self.enemies {
            if e.health <= 0.0 {
                return Err(invalid(name, "health must be positive"));
            }
            if e.speed < 0.0 || e.damage < 0.0 {
                return Err(invalid(name, "speed and damage must not be negative"));
            }
        }
        for (name, w) in &self.weapons {
            if w.cooldown < 0.0 {
                return Err(invalid(name, "cooldown must not be negative"));
            }
        }
        Ok(())
    }
}

impl Default for ConfigTables {
    fn default() -> Self {
        let enemy = |speed, health, damage| EntityConfig { speed, health, damage };
        let weapon = |cooldown, damage_multiplier, price, description: &str| WeaponConfig {
            cooldown,
            damage_multiplier,
            price,
            description: description.to_string(),
        };

        let enemies = BTreeMap::from([
            ("normal".to_string(), enemy(100.0, 50.0, 10.0)),
            ("fast".to_string(), enemy(170.0, 30.0, 7.0)),
            ("heavy".to_string(), enemy(60.0, 150.0, 20.0)),
            ("first_boss".to_string(), enemy(50.0, 2000.0, 25.0)),
        ]);
        let weapons = BTreeMap::from([
            ("pistol".to_string(), weapon(0.4, 1.0, 0, "Reliable sidearm")),
            ("shotgun".to_string(), weapon(1.0, 0.7, 150, "Seven pellets at close range")),
            ("sniper".to_string(), weapon(1.5, 4.0, 300, "One shot, very far, very hard")),
            ("machine-gun".to_string(), weapon(0.1, 0.5, 250, "Short bursts, high rate")),
        ]);
        Self { enemies, weapons }
    }
}
