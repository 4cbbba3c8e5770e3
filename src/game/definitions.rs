// Built-in entity templates

use glam::Vec2;

use super::animation::PoseLayout;
use super::stats::StatBlock;

/// Read-only template an entity is built from
#[derive(Debug, Clone, Copy)]
pub struct EntityDefinition {
    pub name: &'static str,
    /// Tile ids per clip
    pub clips: &'static [&'static [usize]],
    /// Seconds per animation frame
    pub frame_interval: f32,
    pub poses: PoseLayout,
    /// Collision box size
    pub size: Vec2,
    /// Sprite offset from the collision box
    pub tile_offset: Vec2,
    /// Walk speed in pixels per second
    pub speed: f32,
    /// Starting stats at level 1, for entities that fight
    pub stats: Option<StatBlock>,
}

/// Characters share one clip layout: walk clips 0..4, idle clips 4..8,
/// both in `Direction` order.
const CHARACTER_POSES: PoseLayout = PoseLayout {
    walk: [0, 1, 2, 3],
    idle: [4, 5, 6, 7],
};

pub const PLAYER: EntityDefinition = EntityDefinition {
    name: "player",
    clips: &[
        &[0, 1],
        &[2, 3],
        &[4, 5],
        &[6, 7],
        &[0],
        &[2],
        &[4],
        &[6],
    ],
    frame_interval: 0.15,
    poses: CHARACTER_POSES,
    size: Vec2::new(10.0, 14.0),
    tile_offset: Vec2::new(-3.0, -2.0),
    speed: 48.0,
    //      hp  max-hp   attack   defense  agility
    stats: Some([20, 20, 4, 3, 3, 2, 2, 3, 3]),
};

pub const SLIME: EntityDefinition = EntityDefinition {
    name: "slime",
    clips: &[
        &[8, 9],
        &[10, 11],
        &[12, 13],
        &[14, 15],
        &[8],
        &[10],
        &[12],
        &[14],
    ],
    frame_interval: 0.25,
    poses: CHARACTER_POSES,
    size: Vec2::new(10.0, 14.0),
    tile_offset: Vec2::new(-3.0, -2.0),
    speed: 24.0,
    stats: Some([8, 8, 3, 2, 2, 1, 1, 2, 2]),
};

pub const CRATE: EntityDefinition = EntityDefinition {
    name: "crate",
    clips: &[&[40]],
    frame_interval: 0.0,
    poses: PoseLayout::single(0),
    size: Vec2::new(16.0, 16.0),
    tile_offset: Vec2::ZERO,
    speed: 0.0,
    stats: None,
};
