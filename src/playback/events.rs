// Stream notifications routed back to the playback controller.
use futures_channel::mpsc::{unbounded, UnboundedReceiver, UnboundedSender};

/// Identifies the session a stream was opened for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SessionToken(pub u64);

impl std::fmt::Display for SessionToken {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "#{}", self.0)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StreamEventKind {
    /// The clip played to its end.
    Completed,
    /// The resource could not be fetched or decoded.
    LoadFailed(String),
    /// The platform refused to start playback (autoplay policy etc).
    StartRejected(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StreamEvent {
    pub token: SessionToken,
    pub kind: StreamEventKind,
}

/// Sender half handed to a backend when a stream is opened. Every event it
/// emits is stamped with the token of that stream.
#[derive(Debug, Clone)]
pub struct StreamEvents {
    token: SessionToken,
    tx: UnboundedSender<StreamEvent>,
}

impl StreamEvents {
    pub fn new(token: SessionToken, tx: UnboundedSender<StreamEvent>) -> Self {
        Self { token, tx }
    }

    pub fn token(&self) -> SessionToken {
        self.token
    }

    pub fn completed(&self) {
        self.emit(StreamEventKind::Completed);
    }

    pub fn load_failed(&self, detail: impl Into<String>) {
        self.emit(StreamEventKind::LoadFailed(detail.into()));
    }

    pub fn start_rejected(&self, detail: impl Into<String>) {
        self.emit(StreamEventKind::StartRejected(detail.into()));
    }

    fn emit(&self, kind: StreamEventKind) {
        // The receiver only goes away with the page.
        let _ = self.tx.unbounded_send(StreamEvent {
            token: self.token,
            kind,
        });
    }
}

pub fn stream_channel() -> (UnboundedSender<StreamEvent>, UnboundedReceiver<StreamEvent>) {
    unbounded()
}
