// Base entity record and per-frame pipeline
//
// An entity is a plain data record (`EntityCore`) plus a kind tag and up to
// two state machines. Characters, the player, projectiles and damage
// numbers are all this one struct with different capabilities filled in.
// Side effects that reach beyond the entity (spawns, sounds) go through the
// outbox and are applied by the world after each step.

use glam::Vec2;

use crate::engine::{RenderContext, SoundCue};

use super::animation::{AnimationPlayer, Pose};
use super::damage::{DamageColor, DamageLabel};
use super::definitions::EntityDefinition;
use super::direction::Direction;
use super::error::CoreError;
use super::player::{InvulnerabilityTimer, WeaponRig};
use super::projectile::Projectile;
use super::state_machine::StateInput;
use super::states::{self, BodyMachine, BodyState, WeaponState};
use super::stats::CombatStats;

/// Identifier assigned by the world on spawn
pub type EntityId = u32;

/// Closed set of entity variants. Collision handling matches on pairs of these.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum EntityKind {
    Player,
    Enemy,
    Obstacle,
    Projectile(Projectile),
    Damage(DamageLabel),
}

impl EntityKind {
    pub fn name(&self) -> &'static str {
        match self {
            Self::Player => "player",
            Self::Enemy => "enemy",
            Self::Obstacle => "obstacle",
            Self::Projectile(_) => "projectile",
            Self::Damage(_) => "damage",
        }
    }
}

/// Control intent for this frame, written by input handling or AI
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct ControlInput {
    /// Desired movement, any length; zero means stand still
    pub movement: Vec2,
    /// Trigger held
    pub fire: bool,
}

/// Entity the world should create after this step
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Spawn {
    /// Floating damage number
    DamageNumber {
        at: Vec2,
        amount: i32,
        color: DamageColor,
    },
    /// Projectile fired by a weapon
    Shot {
        origin: Vec2,
        velocity: Vec2,
        damage: i32,
    },
}

/// Side effects an entity produced during a step, drained by the world
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Outbox {
    pub spawns: Vec<Spawn>,
    pub cues: Vec<SoundCue>,
}

impl Outbox {
    pub fn is_empty(&self) -> bool {
        self.spawns.is_empty() && self.cues.is_empty()
    }
}

/// Entity data lent to state hooks
#[derive(Debug, Clone)]
pub struct EntityCore {
    /// Top-left corner of the collision box
    pub position: Vec2,
    pub size: Vec2,
    /// Pixels per second, set by the active state
    pub velocity: Vec2,
    pub direction: Direction,
    /// Walk speed in pixels per second
    pub speed: f32,
    /// Sprite offset from the collision box
    pub tile_offset: Vec2,

    pub collidable: bool,
    pub solid: bool,
    pub destroyed: bool,
    /// Set while stunned or dead; weapons and movement ignore input
    pub disabled: bool,

    pub animation: Option<AnimationPlayer>,
    pub input: ControlInput,

    // Capabilities
    pub combat: Option<CombatStats>,
    pub invulnerability: Option<InvulnerabilityTimer>,

    pub outbox: Outbox,
}

impl EntityCore {
    /// Bare record: not animated, no capabilities
    pub fn new(position: Vec2, size: Vec2) -> Self {
        Self {
            position,
            size,
            velocity: Vec2::ZERO,
            direction: Direction::default(),
            speed: 0.0,
            tile_offset: Vec2::ZERO,
            collidable: true,
            solid: false,
            destroyed: false,
            disabled: false,
            animation: None,
            input: ControlInput::default(),
            combat: None,
            invulnerability: None,
            outbox: Outbox::default(),
        }
    }

    /// Animated record built from a definition
    pub fn from_definition(def: &EntityDefinition, position: Vec2) -> Result<Self, CoreError> {
        let mut core = Self::new(position, def.size);
        core.speed = def.speed;
        core.tile_offset = def.tile_offset;
        core.animation = Some(AnimationPlayer::from_definition(def)?);
        Ok(core)
    }

    pub fn center(&self) -> Vec2 {
        self.position + self.size * 0.5
    }

    /// Apply this frame's velocity
    pub fn integrate(&mut self, dt: f32) {
        self.position += self.velocity * dt;
    }

    /// Select a clip by index
    pub fn change_animation(&mut self, index: usize) -> Result<(), CoreError> {
        self.animation
            .as_mut()
            .ok_or(CoreError::MissingCapability("animation"))?
            .play(index)
    }

    /// Select the clip for `pose` in the current facing direction
    pub fn play_pose(&mut self, pose: Pose) -> Result<(), CoreError> {
        let direction = self.direction;
        self.animation
            .as_mut()
            .ok_or(CoreError::MissingCapability("animation"))?
            .play_pose(pose, direction)
    }

    pub fn combat(&self) -> Result<&CombatStats, CoreError> {
        self.combat
            .as_ref()
            .ok_or(CoreError::MissingCapability("combat"))
    }

    pub fn combat_mut(&mut self) -> Result<&mut CombatStats, CoreError> {
        self.combat
            .as_mut()
            .ok_or(CoreError::MissingCapability("combat"))
    }

    pub fn spawn(&mut self, spawn: Spawn) {
        self.outbox.spawns.push(spawn);
    }

    pub fn cue(&mut self, cue: SoundCue) {
        self.outbox.cues.push(cue);
    }
}

/// A game object: data record, kind tag and up to two state machines
#[derive(Debug)]
pub struct Entity {
    id: EntityId,
    pub kind: EntityKind,
    pub core: EntityCore,
    /// Idle/walk (and stunned/death for characters)
    pub(crate) body: Option<BodyMachine>,
    /// Weapon cycle, players only
    pub(crate) weapon: Option<WeaponRig>,
}

impl Entity {
    /// Entity without state machines
    pub fn new(kind: EntityKind, core: EntityCore) -> Self {
        Self {
            id: 0,
            kind,
            core,
            body: None,
            weapon: None,
        }
    }

    /// Animated obstacle with the basic idle/walk machine
    pub fn obstacle(def: &EntityDefinition, position: Vec2) -> Result<Self, CoreError> {
        let mut core = EntityCore::from_definition(def, position)?;
        core.solid = true;

        let mut entity = Self::new(EntityKind::Obstacle, core);
        entity.body = Some(states::entity_body());
        entity.change_state(BodyState::Idle, None)?;
        Ok(entity)
    }

    pub fn id(&self) -> EntityId {
        self.id
    }

    pub(crate) fn assign_id(&mut self, id: EntityId) {
        self.id = id;
    }

    pub fn is_destroyed(&self) -> bool {
        self.core.destroyed
    }

    pub fn position(&self) -> Vec2 {
        self.core.position
    }

    /// Active body state, if the entity has a body machine
    pub fn body_state(&self) -> Option<BodyState> {
        self.body.as_ref().and_then(|body| body.current_name())
    }

    /// Active weapon state, if the entity carries a weapon
    pub fn weapon_state(&self) -> Option<WeaponState> {
        self.weapon.as_ref().and_then(|rig| rig.current_name())
    }

    pub fn set_input(&mut self, input: ControlInput) {
        self.core.input = input;
    }

    /// Switch the body machine to `name`
    pub fn change_state(
        &mut self,
        name: BodyState,
        input: Option<StateInput>,
    ) -> Result<(), CoreError> {
        self.body
            .as_mut()
            .ok_or(CoreError::MissingCapability("body state machine"))?
            .change(name, &mut self.core, input)
    }

    pub fn change_animation(&mut self, index: usize) -> Result<(), CoreError> {
        self.core.change_animation(index)
    }

    /// Advance one frame.
    ///
    /// Order: weapon machine, invulnerability, animation, body machine,
    /// then position. `dt` must not be negative.
    pub fn update(&mut self, dt: f32) -> Result<(), CoreError> {
        if self.core.destroyed {
            return Ok(());
        }

        if let Some(weapon) = &mut self.weapon {
            weapon.update(&mut self.core, dt)?;
        }

        if let Some(timer) = &mut self.core.invulnerability {
            timer.tick(dt);
        }

        if let Some(animation) = &mut self.core.animation {
            animation.update(dt);
        }

        if let Some(body) = &mut self.body {
            body.update(&mut self.core, dt)?;
        }

        match &mut self.kind {
            EntityKind::Projectile(shot) => shot.update(&mut self.core, dt),
            EntityKind::Damage(label) => label.update(&mut self.core, dt),
            _ => self.core.integrate(dt),
        }

        Ok(())
    }

    pub fn render(&self, target: &mut dyn RenderContext) {
        match self.kind {
            EntityKind::Player => self.render_player(target),
            EntityKind::Enemy => self.render_character(target),
            EntityKind::Obstacle => self.render_sprite(target),
            EntityKind::Projectile(shot) => shot.render(&self.core, target),
            EntityKind::Damage(label) => label.render(&self.core, target),
        }
    }

    /// Current frame at the sprite offset, then body state overlays
    pub(crate) fn render_sprite(&self, target: &mut dyn RenderContext) {
        if let Some(animation) = &self.core.animation {
            target.draw_tile(
                animation.current_tile(),
                self.core.position + self.core.tile_offset,
            );
        }

        if let Some(body) = &self.body {
            body.render(&self.core, target);
        }
    }

    /// React to touching `other`. Pairs without a rule do nothing.
    pub fn collided(&mut self, other: &mut Entity) -> Result<(), CoreError> {
        match (self.kind, other.kind) {
            (EntityKind::Player, EntityKind::Enemy) => self.absorb_hit(other),
            (EntityKind::Projectile(shot), EntityKind::Enemy) => {
                other.take_damage(shot.damage, self.core.position, DamageColor::Dealt)
            }
            (EntityKind::Projectile(_), EntityKind::Obstacle) => {
                self.core.destroyed = true;
                Ok(())
            }
            _ => Ok(()),
        }
    }

    /// Take everything queued in the outbox
    pub fn drain_outbox(&mut self) -> Outbox {
        std::mem::take(&mut self.core.outbox)
    }
}
