// Engine collaborators: rendering, audio, randomness, collision detection, frame pacing

pub mod audio;
pub mod collision;
pub mod game_loop;
pub mod random;
pub mod render;

pub use audio::{AudioFeedback, LogAudio, SoundCue};
pub use game_loop::FrameClock;
pub use random::RandomSource;
pub use render::{palette, CommandRecorder, DrawCommand, RenderContext};
