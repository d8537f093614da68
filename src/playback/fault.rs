use thiserror::Error;

/// Why a stream stopped before it finished.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StreamFailure {
    /// Fetch or decode failed, or the stream could not be constructed.
    Load(String),
    /// `play()` was refused by the platform.
    Rejected(String),
}

/// Local, non-fatal playback failures. These never leave the controller;
/// they are logged and shown as a transient notice on the avatar.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PlaybackFault {
    #[error("no audio file registered for character `{0}`")]
    UnknownCharacter(String),

    #[error("playback failed for character `{character}`: {cause}")]
    Playback {
        character: String,
        cause: StreamFailure,
    },
}

impl std::fmt::Display for StreamFailure {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Load(detail) => write!(f, "load error ({detail})"),
            Self::Rejected(detail) => write!(f, "start rejected ({detail})"),
        }
    }
}

impl PlaybackFault {
    pub fn load(character: impl Into<String>, detail: impl Into<String>) -> Self {
        Self::Playback {
            character: character.into(),
            cause: StreamFailure::Load(detail.into()),
        }
    }

    pub fn rejected(character: impl Into<String>, detail: impl Into<String>) -> Self {
        Self::Playback {
            character: character.into(),
            cause: StreamFailure::Rejected(detail.into()),
        }
    }

    /// Short text shown in place of the character's name.
    pub fn notice(&self) -> &'static str {
        match self {
            Self::UnknownCharacter(_) => "Audio not found",
            Self::Playback {
                cause: StreamFailure::Load(_),
                ..
            } => "Audio file missing",
            Self::Playback {
                cause: StreamFailure::Rejected(_),
                ..
            } => "Playback error",
        }
    }
}
