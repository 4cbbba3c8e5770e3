// Audio feedback interface

/// Fire-and-forget sound effects requested by entities
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SoundCue {
    /// Player took a hit
    Hit,
    /// Player gained experience
    Powerup,
    /// Weapon fired
    Shoot,
}

impl SoundCue {
    pub fn name(&self) -> &'static str {
        match self {
            Self::Hit => "hit",
            Self::Powerup => "powerup",
            Self::Shoot => "shoot",
        }
    }
}

/// Audio backend. Return values are never consulted.
pub trait AudioFeedback {
    fn play(&mut self, cue: SoundCue);
}

/// Audio backend that only logs what would have been played
#[derive(Debug, Default)]
pub struct LogAudio;

impl AudioFeedback for LogAudio {
    fn play(&mut self, cue: SoundCue) {
        log::debug!("sfx: {}", cue.name());
    }
}

impl AudioFeedback for Vec<SoundCue> {
    fn play(&mut self, cue: SoundCue) {
        self.push(cue);
    }
}
