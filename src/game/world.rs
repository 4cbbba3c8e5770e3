// Entity container: update, collision dispatch and spawn bookkeeping

use crate::engine::collision::{bounds, overlapping_pairs};
use crate::engine::{AudioFeedback, RenderContext};

use super::config::CoreConfig;
use super::entity::{Entity, EntityId, Spawn};
use super::error::CoreError;

/// Owns every live entity and applies their queued side effects
pub struct World {
    entities: Vec<Entity>,
    next_id: EntityId,
    config: CoreConfig,
}

impl World {
    pub fn new(config: CoreConfig) -> Self {
        Self {
            entities: Vec::new(),
            next_id: 1,
            config,
        }
    }

    pub fn config(&self) -> &CoreConfig {
        &self.config
    }

    /// Add an entity, returns its id
    pub fn spawn(&mut self, mut entity: Entity) -> EntityId {
        let id = self.next_id;
        self.next_id += 1;

        entity.assign_id(id);
        log::debug!("spawned {} {}", entity.kind.name(), id);
        self.entities.push(entity);

        id
    }

    /// Get an entity by ID
    pub fn get(&self, id: EntityId) -> Option<&Entity> {
        self.entities.iter().find(|e| e.id() == id)
    }

    /// Get a mutable entity by ID
    pub fn get_mut(&mut self, id: EntityId) -> Option<&mut Entity> {
        self.entities.iter_mut().find(|e| e.id() == id)
    }

    pub fn len(&self) -> usize {
        self.entities.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entities.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Entity> {
        self.entities.iter()
    }

    /// One simulation step: update, collide, then apply spawns, sounds and
    /// removals.
    pub fn step(&mut self, dt: f32, audio: &mut dyn AudioFeedback) -> Result<(), CoreError> {
        for entity in &mut self.entities {
            if !entity.is_destroyed() {
                entity.update(dt)?;
            }
        }

        self.resolve_collisions()?;
        self.flush(audio);
        Ok(())
    }

    /// Notify both sides of every overlapping collidable pair
    fn resolve_collisions(&mut self) -> Result<(), CoreError> {
        let boxes: Vec<_> = self
            .entities
            .iter()
            .enumerate()
            .filter(|(_, e)| e.core.collidable && !e.is_destroyed())
            .map(|(i, e)| (i, bounds(e.core.position, e.core.size)))
            .collect();

        for (i, j) in overlapping_pairs(&boxes) {
            let (a, b) = pair_mut(&mut self.entities, i, j);
            collide(a, b)?;
        }

        Ok(())
    }

    /// Collide two entities by id, in both directions
    pub fn dispatch_collision(&mut self, a: EntityId, b: EntityId) -> Result<(), CoreError> {
        let i = self.index_of(a);
        let j = self.index_of(b);

        match (i, j) {
            (Some(i), Some(j)) if i != j => {
                let (a, b) = pair_mut(&mut self.entities, i, j);
                collide(a, b)
            }
            _ => Ok(()),
        }
    }

    fn index_of(&self, id: EntityId) -> Option<usize> {
        self.entities.iter().position(|e| e.id() == id)
    }

    /// Drain every outbox, drop destroyed entities, then add new ones
    fn flush(&mut self, audio: &mut dyn AudioFeedback) {
        let config = self.config;
        let mut spawned = Vec::new();

        for entity in &mut self.entities {
            let outbox = entity.drain_outbox();

            for cue in outbox.cues {
                audio.play(cue);
            }

            for spawn in outbox.spawns {
                spawned.push(materialize(spawn, &config));
            }
        }

        let before = self.entities.len();
        self.entities.retain(|e| !e.is_destroyed());
        let removed = before - self.entities.len();
        if removed > 0 {
            log::trace!("removed {} destroyed entities", removed);
        }

        for entity in spawned {
            self.spawn(entity);
        }
    }

    /// Draw every entity in spawn order
    pub fn render(&self, target: &mut dyn RenderContext) {
        for entity in &self.entities {
            entity.render(target);
        }
    }
}

/// Build the entity a queued spawn describes
fn materialize(spawn: Spawn, config: &CoreConfig) -> Entity {
    match spawn {
        Spawn::DamageNumber { at, amount, color } => {
            Entity::damage_number(at, amount, color, config)
        }
        Spawn::Shot {
            origin,
            velocity,
            damage,
        } => Entity::projectile(origin, velocity, damage, config),
    }
}

/// Both sides react; entities taken out earlier in the pass are skipped
fn collide(a: &mut Entity, b: &mut Entity) -> Result<(), CoreError> {
    if !touchable(a) || !touchable(b) {
        return Ok(());
    }

    log::debug!(
        "collision {} {} <-> {} {}",
        a.kind.name(),
        a.id(),
        b.kind.name(),
        b.id()
    );

    a.collided(b)?;
    if touchable(a) && touchable(b) {
        b.collided(a)?;
    }
    Ok(())
}

fn touchable(entity: &Entity) -> bool {
    entity.core.collidable && !entity.is_destroyed()
}

/// Mutable references to two distinct slots
fn pair_mut(entities: &mut [Entity], i: usize, j: usize) -> (&mut Entity, &mut Entity) {
    if i < j {
        let (left, right) = entities.split_at_mut(j);
        (&mut left[i], &mut right[0])
    } else {
        let (left, right) = entities.split_at_mut(i);
        (&mut right[0], &mut left[j])
    }
}
