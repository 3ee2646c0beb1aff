//! Configuration errors.
//!
//! The simulation itself never fails at tick time; everything that can go
//! wrong is a bad tuning table, caught once when the world is built.

use std::path::PathBuf;

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// No tuning record exists for this enemy archetype.
    #[error("unknown enemy archetype: {0}")]
    UnknownEnemy(String),

    /// No tuning record exists for this weapon.
    #[error("unknown weapon: {0}")]
    UnknownWeapon(String),

    /// The tuning document is not valid JSON for the expected shape.
    #[error("malformed tuning data: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("cannot read {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// A record parsed but holds values the simulation cannot use.
    #[error("invalid tuning for '{name}': {reason}")]
    Invalid { name: String, reason: String },
}

pub type ConfigResult<T> = Result<T, ConfigError>;
