// Rendering backend interface
//
// The core never talks to a GPU. Every `render` call receives a
// `RenderContext` resolved once per frame by the caller.

use glam::{Vec2, Vec3};

/// Palette colours used by the core
pub mod palette {
    use glam::Vec3;

    /// `#fff`
    pub const WHITE: Vec3 = Vec3::new(1.0, 1.0, 1.0);
    /// `#d72744`
    pub const RED: Vec3 = Vec3::new(0xd7 as f32 / 255.0, 0x27 as f32 / 255.0, 0x44 as f32 / 255.0);
    /// `#79c834`
    pub const GREEN: Vec3 = Vec3::new(0x79 as f32 / 255.0, 0xc8 as f32 / 255.0, 0x34 as f32 / 255.0);
    /// Projectile trail
    pub const TRAIL: Vec3 = Vec3::new(1.0, 0.0, 0.0);
}

/// Immediate-mode drawing surface supplied by the rendering backend
pub trait RenderContext {
    /// Draw the tile with the given id with its top-left corner at `position`
    fn draw_tile(&mut self, tile: usize, position: Vec2);

    /// Draw text at `position` with the given font size
    fn print(&mut self, text: &str, position: Vec2, size: u32);

    /// Draw a one pixel line
    fn line(&mut self, from: Vec2, to: Vec2);

    /// Set the colour and opacity used by subsequent draw calls
    fn set_color(&mut self, rgb: Vec3, alpha: f32);
}

/// A single recorded draw call
#[derive(Debug, Clone, PartialEq)]
pub enum DrawCommand {
    Tile { tile: usize, position: Vec2 },
    Text { text: String, position: Vec2, size: u32 },
    Line { from: Vec2, to: Vec2 },
    Color { rgb: Vec3, alpha: f32 },
}

/// Render target that records every call instead of drawing
#[derive(Debug, Default)]
pub struct CommandRecorder {
    commands: Vec<DrawCommand>,
}

impl CommandRecorder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Commands recorded since the last clear
    pub fn commands(&self) -> &[DrawCommand] {
        &self.commands
    }

    /// Forget recorded commands (call at the start of a frame)
    pub fn clear(&mut self) {
        self.commands.clear();
    }

    /// Number of tiles drawn
    pub fn tile_count(&self) -> usize {
        self.commands
            .iter()
            .filter(|command| matches!(command, DrawCommand::Tile { .. }))
            .count()
    }
}

impl RenderContext for CommandRecorder {
    fn draw_tile(&mut self, tile: usize, position: Vec2) {
        self.commands.push(DrawCommand::Tile { tile, position });
    }

    fn print(&mut self, text: &str, position: Vec2, size: u32) {
        self.commands.push(DrawCommand::Text {
            text: text.to_string(),
            position,
            size,
        });
    }

    fn line(&mut self, from: Vec2, to: Vec2) {
        self.commands.push(DrawCommand::Line { from, to });
    }

    fn set_color(&mut self, rgb: Vec3, alpha: f32) {
        self.commands.push(DrawCommand::Color { rgb, alpha });
    }
}
