//! Audio Manager - runs the playback controller outside of the render cycle.
//! Stream notifications and keyboard shortcuts are fed in from long-lived tasks.
use dioxus::logger::tracing::{error, info, warn};
use dioxus::prelude::*;
use futures_channel::mpsc::UnboundedReceiver;
use futures_util::StreamExt;
use std::cell::RefCell;
use std::rc::Rc;

use crate::characters::{CharacterRegistry, SHOWCASE};
use crate::components::AvatarHandle;
use crate::playback::{
    shortcut_for, stream_channel, PlayOutcome, PlaybackController, Shortcut, StreamEvent,
};

#[cfg(not(target_arch = "wasm32"))]
use crate::playback::{
    bridge_delay_ms, drain_bridge_events, BridgeRouter, DesktopStreamBackend, KeyPress,
    BRIDGE_POLL_MS,
};
#[cfg(target_arch = "wasm32")]
use crate::playback::{KeyPress, WebStreamBackend};

#[cfg(target_arch = "wasm32")]
use dioxus::core::{Runtime, RuntimeGuard};
#[cfg(target_arch = "wasm32")]
use wasm_bindgen::{closure::Closure, JsCast, JsValue};
#[cfg(target_arch = "wasm32")]
use web_sys::{window, KeyboardEvent};

#[cfg(target_arch = "wasm32")]
type Backend = WebStreamBackend;
#[cfg(not(target_arch = "wasm32"))]
type Backend = DesktopStreamBackend;

type Controller = PlaybackController<Backend, AvatarHandle>;

/// Shared handle to the page's single playback controller.
#[derive(Clone)]
pub struct AudioManager {
    controller: Rc<RefCell<Controller>>,
    pending_events: Rc<RefCell<Option<UnboundedReceiver<StreamEvent>>>>,
    #[cfg(not(target_arch = "wasm32"))]
    router: BridgeRouter,
    active: Signal<bool>,
}

impl AudioManager {
    pub fn new() -> Self {
        let registry = SHOWCASE.registry().unwrap_or_else(|err| {
            error!(%err, "character registry unavailable");
            CharacterRegistry::default()
        });
        if registry.is_empty() {
            warn!("no character clips registered, avatars will only show notices");
        } else {
            info!(clips = registry.len(), "character clips registered");
        }
        let (tx, rx) = stream_channel();
        let backend = Backend::default();
        #[cfg(not(target_arch = "wasm32"))]
        let router = backend.router();

        Self {
            controller: Rc::new(RefCell::new(PlaybackController::new(registry, backend, tx))),
            pending_events: Rc::new(RefCell::new(Some(rx))),
            #[cfg(not(target_arch = "wasm32"))]
            router,
            active: Signal::new(false),
        }
    }

    /// Whether a clip is playing or paused. Subscribes the caller.
    pub fn session_active(&self) -> bool {
        (self.active)()
    }

    pub fn is_active(&self) -> bool {
        self.controller.borrow().is_active()
    }

    pub fn request_play(&self, character_id: &str, element: AvatarHandle) -> PlayOutcome {
        let outcome = self
            .controller
            .borrow_mut()
            .request_play(character_id, element);
        self.sync_active();
        outcome
    }

    pub fn handle_event(&self, event: StreamEvent) {
        let applied = self.controller.borrow_mut().handle_event(event);
        if applied {
            self.sync_active();
        }
    }

    pub fn apply_shortcut(&self, shortcut: Shortcut) {
        {
            let mut controller = self.controller.borrow_mut();
            match shortcut {
                Shortcut::TogglePause => controller.toggle_pause(),
                Shortcut::Stop => controller.stop_and_clear(),
            };
        }
        self.sync_active();
    }

    fn take_events(&self) -> Option<UnboundedReceiver<StreamEvent>> {
        self.pending_events.borrow_mut().take()
    }

    fn sync_active(&self) {
        let active = self.is_active();
        let mut signal = self.active;
        if *signal.peek() != active {
            signal.set(active);
        }
    }
}

/// Drains stream notifications into the controller and installs the
/// keyboard shortcuts. Renders nothing.
#[component]
pub fn AudioController() -> Element {
    let manager = use_context::<AudioManager>();

    use_hook(move || {
        if let Some(mut events) = manager.take_events() {
            let manager = manager.clone();
            spawn(async move {
                while let Some(event) = events.next().await {
                    manager.handle_event(event);
                }
            });
        }

        #[cfg(not(target_arch = "wasm32"))]
        {
            let router = manager.router.clone();
            spawn(async move {
                loop {
                    bridge_delay_ms(BRIDGE_POLL_MS).await;
                    for event in drain_bridge_events().await {
                        router.dispatch(&event);
                    }
                }
            });
        }

        install_keyboard_shortcuts(manager.clone());
    });

    rsx! {}
}

#[cfg(target_arch = "wasm32")]
fn key_press_from_event(event: &KeyboardEvent) -> KeyPress {
    let body = window().and_then(|w| w.document()).and_then(|d| d.body());
    let on_body = match (event.target(), body) {
        (Some(target), Some(body)) => JsValue::from(target) == JsValue::from(body),
        _ => false,
    };

    KeyPress {
        code: event.code(),
        on_body,
        composing: event.is_composing(),
        default_prevented: event.default_prevented(),
    }
}

#[cfg(target_arch = "wasm32")]
fn install_keyboard_shortcuts(manager: AudioManager) {
    let Some(doc) = window().and_then(|w| w.document()) else {
        return;
    };

    let runtime = Runtime::current();
    let key_cb = Closure::wrap(Box::new(move |event: KeyboardEvent| {
        let _guard = RuntimeGuard::new(runtime.clone());
        let press = key_press_from_event(&event);
        if let Some(shortcut) = shortcut_for(&press, manager.is_active()) {
            if shortcut == Shortcut::TogglePause {
                event.prevent_default();
            }
            manager.apply_shortcut(shortcut);
        }
    }) as Box<dyn FnMut(KeyboardEvent)>);

    let _ = doc.add_event_listener_with_callback("keydown", key_cb.as_ref().unchecked_ref());
    key_cb.forget();
}

// The webview forwards Space/Escape presses. Space is only swallowed while
// the page is marked as having an active session.
#[cfg(not(target_arch = "wasm32"))]
const DESKTOP_KEY_BRIDGE_JS: &str = r#"
document.addEventListener("keydown", (event) => {
  const code = event.code;
  if (code !== "Space" && code !== "Escape") return;
  const onBody = event.target === document.body;
  const active = !!document.querySelector('[data-session="active"]');
  if (code === "Space" && onBody && active) {
    event.preventDefault();
  }
  dioxus.send({
    code,
    on_body: onBody,
    composing: !!event.isComposing,
    default_prevented: false,
  });
});
await new Promise(() => {});
"#;

#[cfg(not(target_arch = "wasm32"))]
fn install_keyboard_shortcuts(manager: AudioManager) {
    let mut eval = document::eval(DESKTOP_KEY_BRIDGE_JS);
    spawn(async move {
        while let Ok(press) = eval.recv::<KeyPress>().await {
            if let Some(shortcut) = shortcut_for(&press, manager.is_active()) {
                manager.apply_shortcut(shortcut);
            }
        }
    });
}
