// State families and the machines built from them
//
// Body states drive locomotion and life cycle, weapon states drive the
// fire/cooldown cycle. The two families use distinct name types so they can
// never end up in the same machine.

pub mod body;
pub mod weapon;

use super::config::CoreConfig;
use super::entity::EntityCore;
use super::state_machine::{State, StateMachine};

pub use body::{DeathState, IdleState, StunnedState, WalkState};
pub use weapon::{AimState, CooldownState, FireState};

/// Body state names
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BodyState {
    Idle,
    Walk,
    Stunned,
    Death,
}

/// Weapon state names
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum WeaponState {
    Aim,
    Cooldown,
    Fire,
}

pub type BodyMachine = StateMachine<BodyState, EntityCore>;
pub type WeaponMachine = StateMachine<WeaponState, EntityCore>;

/// Idle/walk machine for plain animated entities
pub fn entity_body() -> BodyMachine {
    StateMachine::new("body")
        .with_state(BodyState::Idle, || -> Box<dyn State<BodyState, EntityCore>> {
            Box::new(IdleState)
        })
        .with_state(BodyState::Walk, || -> Box<dyn State<BodyState, EntityCore>> {
            Box::new(WalkState)
        })
}

/// Full body machine for characters
pub fn character_body(config: &CoreConfig) -> BodyMachine {
    let stun = config.stun_duration;
    entity_body()
        .with_state(BodyState::Stunned, move || -> Box<dyn State<BodyState, EntityCore>> {
            Box::new(StunnedState::new(stun))
        })
        .with_state(BodyState::Death, || -> Box<dyn State<BodyState, EntityCore>> {
            Box::new(DeathState)
        })
}

/// Blaster cycle: aim, fire, cool down
pub fn blaster(config: &CoreConfig) -> WeaponMachine {
    let cooldown = config.weapon_cooldown;
    let shot_speed = config.projectile_speed;
    StateMachine::new("weapon")
        .with_state(WeaponState::Aim, || -> Box<dyn State<WeaponState, EntityCore>> {
            Box::new(AimState)
        })
        .with_state(WeaponState::Fire, move || -> Box<dyn State<WeaponState, EntityCore>> {
            Box::new(FireState::new(shot_speed))
        })
        .with_state(WeaponState::Cooldown, move || -> Box<dyn State<WeaponState, EntityCore>> {
            Box::new(CooldownState::new(cooldown))
        })
}
