use thiserror::Error;

/// Rejections raised at the dispatcher boundary. Core state is never touched when
/// one of these is returned.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CommandError {
    #[error("Unknown command: {0}")]
    UnknownCommand(String),
    #[error("No command bound to key chord: {0}")]
    UnboundKey(String),
    #[error(transparent)]
    Keymap(#[from] KeymapError),
}

/// Problems with a key binding table or a key chord string.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum KeymapError {
    #[error("Empty key chord")]
    EmptyChord,
    #[error("Unknown modifier '{modifier}' in key chord '{chord}'")]
    UnknownModifier { chord: String, modifier: String },
    #[error("Key chord '{0}' is bound more than once")]
    DuplicateChord(String),
}
