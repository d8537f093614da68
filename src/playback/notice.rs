// Transient label overrides shown on an avatar after a fault.
use std::time::Duration;

/// How long a notice replaces the label before it is reverted.
pub const NOTICE_DURATION: Duration = Duration::from_secs(2);

/// Text and style of an avatar's name label.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LabelState {
    pub text: String,
    /// Alert styling (red text) while a notice is up.
    pub alert: bool,
}

impl LabelState {
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            alert: false,
        }
    }

    /// Swap in `message` and return what has to be put back once
    /// [`NOTICE_DURATION`] has elapsed.
    ///
    /// The restore captures whatever text is showing right now. A second
    /// notice inside the window therefore captures the first notice's text,
    /// and the first timer reverts the label early. Timers are never
    /// cancelled.
    pub fn show_notice(&mut self, message: &str) -> PendingRestore {
        let restore = PendingRestore {
            text: std::mem::replace(&mut self.text, message.to_string()),
        };
        self.alert = true;
        restore
    }
}

/// The label text captured when a notice went up.
#[derive(Debug, Clone, PartialEq, Eq)]
#[must_use = "the label stays overridden unless the restore is applied"]
pub struct PendingRestore {
    text: String,
}

impl PendingRestore {
    pub fn apply(self, label: &mut LabelState) {
        label.text = self.text;
        label.alert = false;
    }
}
