// Keyboard surface for the playback controller.
use serde::Deserialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Shortcut {
    TogglePause,
    Stop,
}

/// What the key handler knows about a `keydown`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct KeyPress {
    /// `KeyboardEvent.code`, e.g. `Space` or `Escape`.
    pub code: String,
    /// The event target is `document.body` rather than a control.
    pub on_body: bool,
    pub composing: bool,
    pub default_prevented: bool,
}

/// Map a key press to a shortcut. `session_active` gates both keys so that
/// Space keeps scrolling the page when nothing is playing.
pub fn shortcut_for(press: &KeyPress, session_active: bool) -> Option<Shortcut> {
    if !session_active || press.composing || press.default_prevented {
        return None;
    }

    match press.code.as_str() {
        "Space" if press.on_body => Some(Shortcut::TogglePause),
        "Escape" => Some(Shortcut::Stop),
        _ => None,
    }
}
