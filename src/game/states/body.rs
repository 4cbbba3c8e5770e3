// Body states: idle, walk, stunned, death

use glam::Vec2;

use crate::game::animation::Pose;
use crate::game::direction::Direction;
use crate::game::entity::EntityCore;
use crate::game::error::CoreError;
use crate::game::state_machine::{State, StateInput, Transition};

use super::BodyState;

/// Standing still; starts walking as soon as there is movement input
#[derive(Debug, Default)]
pub struct IdleState;

impl State<BodyState, EntityCore> for IdleState {
    fn enter(&mut self, ctx: &mut EntityCore, _input: Option<StateInput>) -> Result<(), CoreError> {
        ctx.velocity = Vec2::ZERO;
        ctx.play_pose(Pose::Idle)
    }

    fn update(
        &mut self,
        ctx: &mut EntityCore,
        _dt: f32,
    ) -> Result<Option<Transition<BodyState>>, CoreError> {
        Ok(Direction::from_vector(ctx.input.movement)
            .map(|heading| Transition::with_input(BodyState::Walk, StateInput::Heading(heading))))
    }
}

/// Moving along the input direction at the entity's walk speed
#[derive(Debug, Default)]
pub struct WalkState;

impl State<BodyState, EntityCore> for WalkState {
    fn enter(&mut self, ctx: &mut EntityCore, input: Option<StateInput>) -> Result<(), CoreError> {
        if let Some(StateInput::Heading(heading)) = input {
            ctx.direction = heading;
        }
        ctx.play_pose(Pose::Walk)
    }

    fn update(
        &mut self,
        ctx: &mut EntityCore,
        _dt: f32,
    ) -> Result<Option<Transition<BodyState>>, CoreError> {
        let movement = ctx.input.movement;
        let Some(heading) = Direction::from_vector(movement) else {
            return Ok(Some(Transition::to(BodyState::Idle)));
        };

        if heading != ctx.direction {
            ctx.direction = heading;
            ctx.play_pose(Pose::Walk)?;
        }

        ctx.velocity = movement.normalize_or_zero() * ctx.speed;
        Ok(None)
    }
}

/// Frozen for a while, then back to idle
#[derive(Debug)]
pub struct StunnedState {
    remaining: f32,
}

impl StunnedState {
    /// `duration` applies when `enter` gets no `StateInput::Duration`
    pub fn new(duration: f32) -> Self {
        Self { remaining: duration }
    }

    pub fn remaining(&self) -> f32 {
        self.remaining
    }
}

impl State<BodyState, EntityCore> for StunnedState {
    fn enter(&mut self, ctx: &mut EntityCore, input: Option<StateInput>) -> Result<(), CoreError> {
        if let Some(StateInput::Duration(duration)) = input {
            self.remaining = duration;
        }
        ctx.velocity = Vec2::ZERO;
        ctx.disabled = true;
        Ok(())
    }

    fn update(
        &mut self,
        _ctx: &mut EntityCore,
        dt: f32,
    ) -> Result<Option<Transition<BodyState>>, CoreError> {
        self.remaining -= dt;
        if self.remaining <= 0.0 {
            return Ok(Some(Transition::to(BodyState::Idle)));
        }
        Ok(None)
    }

    fn exit(&mut self, ctx: &mut EntityCore) {
        ctx.disabled = false;
    }
}

/// Terminal state. The entity keeps rendering but stops moving and colliding.
#[derive(Debug, Default)]
pub struct DeathState;

impl State<BodyState, EntityCore> for DeathState {
    fn enter(&mut self, ctx: &mut EntityCore, _input: Option<StateInput>) -> Result<(), CoreError> {
        ctx.velocity = Vec2::ZERO;
        ctx.disabled = true;
        ctx.collidable = false;
        ctx.play_pose(Pose::Idle)
    }
}
