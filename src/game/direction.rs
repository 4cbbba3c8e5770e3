// Facing direction

use glam::Vec2;

/// Direction an entity is facing. Screen space: y grows downward.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Direction {
    Top,
    Right,
    #[default]
    Bottom,
    Left,
}

impl Direction {
    pub const ALL: [Direction; 4] = [Self::Top, Self::Right, Self::Bottom, Self::Left];

    /// Slot used by per-direction tables such as pose layouts
    pub fn index(self) -> usize {
        self as usize
    }

    /// Unit vector pointing this way
    pub fn unit(self) -> Vec2 {
        match self {
            Self::Top => Vec2::new(0.0, -1.0),
            Self::Right => Vec2::new(1.0, 0.0),
            Self::Bottom => Vec2::new(0.0, 1.0),
            Self::Left => Vec2::new(-1.0, 0.0),
        }
    }

    /// Dominant-axis direction of a movement vector. Ties favour the
    /// horizontal axis. `None` for the zero vector.
    pub fn from_vector(v: Vec2) -> Option<Self> {
        if v == Vec2::ZERO {
            return None;
        }

        if v.x.abs() >= v.y.abs() {
            Some(if v.x > 0.0 { Self::Right } else { Self::Left })
        } else {
            Some(if v.y > 0.0 { Self::Bottom } else { Self::Top })
        }
    }
}
