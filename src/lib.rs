//! Real-time simulation core for a top-down shooter.
//!
//! Everything here is pure game logic advanced by a fixed `dt` once per
//! tick.  Rendering, audio and asset lookup stay outside the crate; the core
//! talks to them through [`events::GameEvent`] and the animation keys in
//! [`animation`].

pub mod animation;
pub mod boss;
pub mod collision;
pub mod config;
pub mod enemy;
pub mod error;
pub mod events;
pub mod geometry;
pub mod player;
pub mod projectile;
pub mod timer;
pub mod weapon;
pub mod world;

pub use glam::Vec2;
