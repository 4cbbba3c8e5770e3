// Weapon states: aim, fire, cooldown

use crate::engine::SoundCue;
use crate::game::entity::{EntityCore, Spawn};
use crate::game::error::CoreError;
use crate::game::state_machine::{State, StateInput, Transition};
use crate::game::stats::Stat;

use super::WeaponState;

/// Ready; fires when the trigger is held and the owner can act
#[derive(Debug, Default)]
pub struct AimState;

impl State<WeaponState, EntityCore> for AimState {
    fn update(
        &mut self,
        ctx: &mut EntityCore,
        _dt: f32,
    ) -> Result<Option<Transition<WeaponState>>, CoreError> {
        if ctx.input.fire && !ctx.disabled {
            return Ok(Some(Transition::to(WeaponState::Fire)));
        }
        Ok(None)
    }
}

/// Queues one projectile on entry, then cools down
#[derive(Debug)]
pub struct FireState {
    shot_speed: f32,
}

impl FireState {
    pub fn new(shot_speed: f32) -> Self {
        Self { shot_speed }
    }
}

impl State<WeaponState, EntityCore> for FireState {
    fn enter(&mut self, ctx: &mut EntityCore, _input: Option<StateInput>) -> Result<(), CoreError> {
        let damage = ctx.combat()?.get(Stat::Attack);
        let origin = ctx.center();
        let velocity = ctx.direction.unit() * self.shot_speed;

        log::trace!("fire from {:?} heading {:?}", origin, ctx.direction);
        ctx.spawn(Spawn::Shot {
            origin,
            velocity,
            damage,
        });
        ctx.cue(SoundCue::Shoot);
        Ok(())
    }

    fn update(
        &mut self,
        _ctx: &mut EntityCore,
        _dt: f32,
    ) -> Result<Option<Transition<WeaponState>>, CoreError> {
        Ok(Some(Transition::to(WeaponState::Cooldown)))
    }
}

/// Waits out the refire delay
#[derive(Debug)]
pub struct CooldownState {
    remaining: f32,
}

impl CooldownState {
    pub fn new(duration: f32) -> Self {
        Self { remaining: duration }
    }
}

impl State<WeaponState, EntityCore> for CooldownState {
    fn update(
        &mut self,
        _ctx: &mut EntityCore,
        dt: f32,
    ) -> Result<Option<Transition<WeaponState>>, CoreError> {
        self.remaining -= dt;
        if self.remaining <= 0.0 {
            return Ok(Some(Transition::to(WeaponState::Aim)));
        }
        Ok(None)
    }
}
