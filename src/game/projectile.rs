// Projectiles fired by weapons
//
// A shot flies in a straight line and removes itself once it is a fixed
// Chebyshev distance from where it was fired. It passes through characters
// and is stopped only by obstacles.

use glam::Vec2;

use crate::core::math::chebyshev_distance;
use crate::engine::{palette, RenderContext};

use super::config::CoreConfig;
use super::entity::{Entity, EntityCore, EntityKind};

/// Payload of a projectile entity
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Projectile {
    pub damage: i32,
    /// Where the shot was fired from
    pub origin: Vec2,
    /// Travel limit, measured as Chebyshev distance from `origin`
    pub range: f32,
}

impl Projectile {
    /// Move, then self-destruct once out of range
    pub fn update(&self, core: &mut EntityCore, dt: f32) {
        core.integrate(dt);

        if chebyshev_distance(core.position, self.origin) >= self.range {
            core.destroyed = true;
        }
    }

    /// Trail from the origin to the current position
    pub fn render(&self, core: &EntityCore, target: &mut dyn RenderContext) {
        target.set_color(palette::TRAIL, 1.0);
        target.line(self.origin, core.position);
    }
}

impl Entity {
    /// Collidable, non-solid shot travelling at `velocity`
    pub fn projectile(origin: Vec2, velocity: Vec2, damage: i32, config: &CoreConfig) -> Self {
        let mut core = EntityCore::new(origin, Vec2::splat(config.projectile_size));
        core.velocity = velocity;
        core.collidable = true;
        core.solid = false;

        Self::new(
            EntityKind::Projectile(Projectile {
                damage,
                origin,
                range: config.projectile_range(),
            }),
            core,
        )
    }
}
