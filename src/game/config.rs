// Tuning values shared by every entity

/// Gameplay tuning. One value is handed to the world and copied into the
/// state factories that need it.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CoreConfig {
    /// Grid unit in pixels
    pub tile_size: f32,

    // Damage numbers
    /// Seconds a damage number stays on screen
    pub damage_duration: f32,
    /// Distance a damage number rises, in tiles
    pub damage_rise_tiles: f32,
    /// Font size for damage numbers
    pub damage_font_size: u32,

    // Player
    /// Seconds of invulnerability after a hit
    pub invulnerability_window: f32,
    /// Opacity right after a hit (fades back to 1.0)
    pub invulnerable_min_alpha: f32,

    // Weapon
    /// Projectile travel limit, in tiles
    pub projectile_range_tiles: f32,
    /// Projectile speed in pixels per second
    pub projectile_speed: f32,
    /// Projectile box edge in pixels
    pub projectile_size: f32,
    /// Seconds between shots
    pub weapon_cooldown: f32,

    // Body
    /// Default stun length when none is given
    pub stun_duration: f32,
}

pub const DEFAULT_CONFIG: CoreConfig = CoreConfig {
    tile_size: 16.0,

    damage_duration: 1.0,
    damage_rise_tiles: 0.5,
    damage_font_size: 8,

    invulnerability_window: 1.0,
    invulnerable_min_alpha: 0.3,

    projectile_range_tiles: 3.0,
    projectile_speed: 160.0,
    projectile_size: 1.0,
    weapon_cooldown: 0.4,

    stun_duration: 0.3,
};

impl Default for CoreConfig {
    fn default() -> Self {
        DEFAULT_CONFIG
    }
}

impl CoreConfig {
    /// Projectile travel limit in pixels
    pub fn projectile_range(&self) -> f32 {
        self.projectile_range_tiles * self.tile_size
    }

    /// Damage number rise in pixels
    pub fn damage_rise(&self) -> f32 {
        self.damage_rise_tiles * self.tile_size
    }
}
