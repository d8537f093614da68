use dioxus::logger::tracing::debug;
use dioxus::prelude::*;

use crate::characters::Character;
use crate::components::{AudioManager, Icon, RevealItem, AVATAR_STAGGER_SECS};
use crate::playback::{AvatarElement, LabelState, PendingRestore, PlayOutcome, NOTICE_DURATION};
use crate::utils::dom_id;

#[cfg(not(target_arch = "wasm32"))]
async fn notice_delay() {
    tokio::time::sleep(NOTICE_DURATION).await;
}

#[cfg(target_arch = "wasm32")]
async fn notice_delay() {
    gloo_timers::future::TimeoutFuture::new(NOTICE_DURATION.as_millis() as u32).await;
}

/// Keeps a notice up for [`NOTICE_DURATION`], then hands the captured
/// label back to `revert`.
async fn hold_notice(restore: PendingRestore, revert: impl FnOnce(PendingRestore)) {
    notice_delay().await;
    revert(restore);
}

/// A rendered avatar as the playback controller sees it. Identity is the
/// grid slot, not the character it plays.
#[derive(Clone, Copy)]
pub struct AvatarHandle {
    slot: usize,
    playing: Signal<bool>,
    label: Signal<LabelState>,
}

impl PartialEq for AvatarHandle {
    fn eq(&self, other: &Self) -> bool {
        self.slot == other.slot
    }
}

impl AvatarElement for AvatarHandle {
    fn set_playing(&self, playing: bool) {
        let mut flag = self.playing;
        if *flag.peek() != playing {
            flag.set(playing);
        }
    }

    fn show_notice(&self, message: &str) {
        let mut label = self.label;
        let restore = label.write().show_notice(message);
        spawn(hold_notice(restore, move |restore| {
            restore.apply(&mut label.write());
        }));
    }
}

#[component]
pub fn CharacterAvatar(slot: usize, character: Character) -> Element {
    let manager = use_context::<AudioManager>();
    let playing = use_signal(|| false);
    let label = {
        let name = character.name.clone();
        use_signal(move || LabelState::new(name))
    };
    let handle = AvatarHandle {
        slot,
        playing,
        label,
    };

    let character_id = character.id.clone();
    let on_play = move |evt: MouseEvent| {
        evt.stop_propagation();
        match manager.request_play(&character_id, handle) {
            PlayOutcome::Started(token) => debug!(character = %character_id, %token, "clip started"),
            PlayOutcome::Stopped => debug!(character = %character_id, "clip stopped by its avatar"),
            PlayOutcome::Failed(fault) => debug!(character = %character_id, %fault, "clip did not start"),
        }
    };

    let initial: String = character.name.chars().take(1).collect();
    let is_playing = playing();
    let label_state = label();
    let action_label = if is_playing {
        format!("Stop {}", character.name)
    } else {
        format!("Play {}", character.name)
    };
    let avatar_class = if is_playing {
        "character-avatar playing"
    } else {
        "character-avatar"
    };

    rsx! {
        RevealItem {
            id: dom_id("avatar", &character.id),
            index: slot,
            stagger_secs: AVATAR_STAGGER_SECS,
            class: avatar_class.to_string(),
            div { class: "avatar-portrait",
                span { class: "avatar-initial", "{initial}" }
                button {
                    class: "play-button",
                    "data-character": "{character.id}",
                    r#type: "button",
                    "aria-label": "{action_label}",
                    onclick: on_play,
                    if is_playing {
                        Icon { name: "wave".to_string(), class: "w-6 h-6".to_string() }
                    } else {
                        Icon { name: "play".to_string(), class: "w-6 h-6".to_string() }
                    }
                }
            }
            h3 {
                class: if label_state.alert { "character-name alert" } else { "character-name" },
                "{label_state.text}"
            }
            if !character.role.is_empty() {
                p { class: "character-role", "{character.role}" }
            }
        }
    }
}
