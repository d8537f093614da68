// Desktop streams driven through a JavaScript bridge inside the webview.
use dioxus::logger::tracing::{debug, warn};
use dioxus::prelude::*;
use serde::Deserialize;
use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;

use super::controller::{AudioStream, StreamBackend};
use super::events::{SessionToken, StreamEventKind, StreamEvents};

/// How often queued bridge notifications are pulled into Rust.
pub const BRIDGE_POLL_MS: u64 = 200;

const DESKTOP_AUDIO_BRIDGE_JS: &str = r#"
(() => {
  if (window.__voicecastAudio) {
    return true;
  }

  const streams = new Map();
  const pending = [];
  const push = (token, kind, detail) => {
    pending.push({ token, kind, detail: detail == null ? null : String(detail) });
  };

  const describeMediaError = (error) => {
    switch (error && error.code) {
      case 1: return "aborted before the clip loaded";
      case 2: return "network error while loading the clip";
      case 3: return "decode error";
      case 4: return "source not supported or missing";
      default: return "unknown media error";
    }
  };

  window.__voicecastAudio = {
    apply(cmd) {
      if (!cmd || !cmd.type) return;
      const audio = streams.get(cmd.token);

      switch (cmd.type) {
        case "open": {
          const next = new Audio(cmd.src);
          next.preload = "auto";
          next.addEventListener("ended", () => push(cmd.token, "completed"));
          next.addEventListener("error", () =>
            push(cmd.token, "load_failed", describeMediaError(next.error)));
          streams.set(cmd.token, next);
          break;
        }
        case "play": {
          if (!audio) return;
          const started = audio.play();
          if (started && typeof started.catch === "function") {
            started.catch((err) => {
              if (err && err.name === "AbortError") return;
              push(cmd.token, "rejected", (err && err.name) || err);
            });
          }
          break;
        }
        case "pause":
          if (audio) audio.pause();
          break;
        case "rewind":
          if (audio) {
            try {
              audio.currentTime = 0;
            } catch (_err) {}
          }
          break;
        case "close":
          if (audio) {
            audio.pause();
            streams.delete(cmd.token);
          }
          break;
      }
    },
    drain() {
      return pending.splice(0, pending.length);
    },
  };
  return true;
})();
"#;

fn ensure_audio_bridge() {
    let _ = document::eval(DESKTOP_AUDIO_BRIDGE_JS);
}

fn bridge_command(value: serde_json::Value) {
    ensure_audio_bridge();
    let payload = serde_json::to_string(&value).unwrap_or_else(|_| "{}".to_string());
    let script = format!(
        r#"(function () {{
            const bridge = window.__voicecastAudio;
            if (!bridge) return false;
            bridge.apply({payload});
            return true;
        }})();"#
    );
    let _ = document::eval(&script);
}

/// A notification queued by the webview bridge.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct BridgeEvent {
    pub token: u64,
    pub kind: String,
    #[serde(default)]
    pub detail: Option<String>,
}

impl BridgeEvent {
    pub fn stream_event_kind(&self) -> Option<StreamEventKind> {
        let detail = || self.detail.clone().unwrap_or_default();
        match self.kind.as_str() {
            "completed" => Some(StreamEventKind::Completed),
            "load_failed" => Some(StreamEventKind::LoadFailed(detail())),
            "rejected" => Some(StreamEventKind::StartRejected(detail())),
            _ => None,
        }
    }
}

pub async fn drain_bridge_events() -> Vec<BridgeEvent> {
    ensure_audio_bridge();
    let eval = document::eval(
        r#"return (function () {
            const bridge = window.__voicecastAudio;
            return bridge ? bridge.drain() : [];
        })();"#,
    );
    eval.join::<Vec<BridgeEvent>>().await.unwrap_or_default()
}

pub async fn bridge_delay_ms(ms: u64) {
    tokio::time::sleep(std::time::Duration::from_millis(ms)).await;
}

type Routes = Rc<RefCell<HashMap<SessionToken, StreamEvents>>>;

/// Forwards drained bridge notifications to the stream that owns the token.
#[derive(Clone, Default)]
pub struct BridgeRouter {
    routes: Routes,
}

impl BridgeRouter {
    pub fn dispatch(&self, event: &BridgeEvent) {
        let Some(kind) = event.stream_event_kind() else {
            warn!(kind = %event.kind, "unknown bridge event");
            return;
        };
        let routes = self.routes.borrow();
        let Some(events) = routes.get(&SessionToken(event.token)) else {
            debug!(token = event.token, "bridge event for closed stream");
            return;
        };
        match kind {
            StreamEventKind::Completed => events.completed(),
            StreamEventKind::LoadFailed(detail) => events.load_failed(detail),
            StreamEventKind::StartRejected(detail) => events.start_rejected(detail),
        }
    }
}

#[derive(Default)]
pub struct DesktopStreamBackend {
    router: BridgeRouter,
}

impl DesktopStreamBackend {
    pub fn router(&self) -> BridgeRouter {
        self.router.clone()
    }
}

impl StreamBackend for DesktopStreamBackend {
    type Stream = DesktopStream;

    fn open(&mut self, location: &str, events: StreamEvents) -> Result<DesktopStream, String> {
        let token = events.token();
        bridge_command(serde_json::json!({
            "type": "open",
            "token": token.0,
            "src": location,
        }));
        self.router.routes.borrow_mut().insert(token, events);
        Ok(DesktopStream {
            token,
            paused: true,
            routes: self.router.routes.clone(),
        })
    }
}

/// Webview playback is asynchronous, so the paused flag is tracked here.
pub struct DesktopStream {
    token: SessionToken,
    paused: bool,
    routes: Routes,
}

impl DesktopStream {
    fn command(&self, kind: &str) {
        bridge_command(serde_json::json!({ "type": kind, "token": self.token.0 }));
    }
}

impl AudioStream for DesktopStream {
    fn play(&mut self) {
        self.command("play");
        self.paused = false;
    }

    fn pause(&mut self) {
        self.command("pause");
        self.paused = true;
    }

    fn rewind(&mut self) {
        self.command("rewind");
    }

    fn is_paused(&self) -> bool {
        self.paused
    }
}

impl Drop for DesktopStream {
    fn drop(&mut self) {
        self.command("close");
        self.routes.borrow_mut().remove(&self.token);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::playback::events::stream_channel;

    fn bridge_event(token: u64, kind: &str, detail: Option<&str>) -> BridgeEvent {
        BridgeEvent {
            token,
            kind: kind.to_string(),
            detail: detail.map(str::to_string),
        }
    }

    #[test]
    fn bridge_payload_deserializes() {
        let raw = r#"[{"token":3,"kind":"rejected","detail":"NotAllowedError"},
                      {"token":4,"kind":"completed","detail":null}]"#;
        let events: Vec<BridgeEvent> = serde_json::from_str(raw).unwrap();
        assert_eq!(events[0], bridge_event(3, "rejected", Some("NotAllowedError")));
        assert_eq!(events[1].stream_event_kind(), Some(StreamEventKind::Completed));
    }

    #[test]
    fn bridge_kinds_map_to_stream_events() {
        assert_eq!(
            bridge_event(1, "load_failed", Some("decode error")).stream_event_kind(),
            Some(StreamEventKind::LoadFailed("decode error".to_string()))
        );
        assert_eq!(
            bridge_event(1, "rejected", None).stream_event_kind(),
            Some(StreamEventKind::StartRejected(String::new()))
        );
        assert_eq!(bridge_event(1, "timeupdate", None).stream_event_kind(), None);
    }

    #[test]
    fn router_only_delivers_to_open_streams() {
        let (tx, mut rx) = stream_channel();
        let router = BridgeRouter::default();
        router
            .routes
            .borrow_mut()
            .insert(SessionToken(5), StreamEvents::new(SessionToken(5), tx));

        router.dispatch(&bridge_event(9, "completed", None));
        router.dispatch(&bridge_event(5, "completed", None));

        let delivered = rx.try_recv().unwrap();
        assert_eq!(delivered.token, SessionToken(5));
        assert!(rx.try_recv().is_err());
    }
}
