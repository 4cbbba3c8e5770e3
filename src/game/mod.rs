// Entity core
//
// This module contains the gameplay model:
// - Entity record, kinds and the per-frame pipeline
// - Generic state machine plus the body and weapon state families
// - Character stats, damage numbers, projectiles and the player
// - World container that resolves collisions and spawns

pub mod animation;
pub mod character;
pub mod config;
pub mod damage;
pub mod definitions;
pub mod direction;
pub mod entity;
pub mod error;
pub mod player;
pub mod projectile;
pub mod state_machine;
pub mod states;
pub mod stats;
pub mod world;

// Re-export commonly used types
pub use config::CoreConfig;
pub use entity::{ControlInput, Entity};
pub use world::World;
