// Floating damage numbers

use glam::{Vec2, Vec3};

use crate::core::math::out_cubic;
use crate::engine::{palette, RenderContext};

use super::config::CoreConfig;
use super::entity::{Entity, EntityCore, EntityKind};

/// Palette slot for a damage number
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum DamageColor {
    /// White
    #[default]
    Neutral = 0,
    /// Red, damage taken by the player
    Hurt = 1,
    /// Green, damage dealt by the player's shots
    Dealt = 2,
}

impl DamageColor {
    pub fn index(self) -> usize {
        self as usize
    }

    pub fn rgb(self) -> Vec3 {
        match self {
            Self::Neutral => palette::WHITE,
            Self::Hurt => palette::RED,
            Self::Dealt => palette::GREEN,
        }
    }
}

/// Display-only payload of a damage number entity
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DamageLabel {
    pub amount: i32,
    pub color: DamageColor,
    /// Seconds since spawn
    pub timer: f32,
    pub duration: f32,
    /// Pixels travelled upward over `duration`
    pub rise: f32,
    pub font_size: u32,
}

impl DamageLabel {
    pub fn update(&mut self, core: &mut EntityCore, dt: f32) {
        self.timer += dt;
        if self.timer >= self.duration {
            core.destroyed = true;
        }
    }

    /// Vertical draw position for the current timer
    pub fn offset_y(&self, spawn_y: f32) -> f32 {
        let t = self.timer.min(self.duration);
        out_cubic(t, spawn_y, -self.rise, self.duration)
    }

    pub fn render(&self, core: &EntityCore, target: &mut dyn RenderContext) {
        let position = Vec2::new(core.position.x, self.offset_y(core.position.y));
        target.set_color(self.color.rgb(), 1.0);
        target.print(&self.amount.to_string(), position, self.font_size);
    }
}

impl Entity {
    /// Damage number rising from `at`
    pub fn damage_number(at: Vec2, amount: i32, color: DamageColor, config: &CoreConfig) -> Self {
        let mut core = EntityCore::new(at, Vec2::ZERO);
        core.collidable = false;

        Self::new(
            EntityKind::Damage(DamageLabel {
                amount,
                color,
                timer: 0.0,
                duration: config.damage_duration,
                rise: config.damage_rise(),
                font_size: config.damage_font_size,
            }),
            core,
        )
    }
}
