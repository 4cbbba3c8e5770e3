// Contract violations surfaced by the entity core

/// Errors raised by state machines and entities
///
/// All of these are programming mistakes (bad state name, bad clip index,
/// wrong entity variant). They are returned instead of ignored so a broken
/// frame stops the loop instead of corrupting every later frame.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CoreError {
    #[error("{machine} state machine has no state named {state}")]
    UnknownState { machine: &'static str, state: String },

    #[error("Animation index {index} out of range ({len} clips)")]
    AnimationOutOfRange { index: usize, len: usize },

    #[error("Animation clip {index} has no frames")]
    EmptyClip { index: usize },

    #[error("Entity has no {0} capability")]
    MissingCapability(&'static str),
}
