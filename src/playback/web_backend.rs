// Browser streams backed by `HtmlAudioElement`.
use dioxus::logger::tracing::debug;
use wasm_bindgen::{closure::Closure, JsCast, JsValue};
use web_sys::HtmlAudioElement;

use super::controller::{AudioStream, StreamBackend};
use super::events::StreamEvents;

#[derive(Debug, Default)]
pub struct WebStreamBackend;

impl StreamBackend for WebStreamBackend {
    type Stream = WebStream;

    fn open(&mut self, location: &str, events: StreamEvents) -> Result<WebStream, String> {
        let audio = HtmlAudioElement::new_with_src(location).map_err(|err| js_detail(&err))?;
        audio.set_preload("auto");

        let on_ended = {
            let events = events.clone();
            Closure::wrap(Box::new(move || events.completed()) as Box<dyn FnMut()>)
        };
        let on_error = {
            let events = events.clone();
            let audio = audio.clone();
            Closure::wrap(
                Box::new(move || events.load_failed(media_error_detail(&audio)))
                    as Box<dyn FnMut()>,
            )
        };

        audio
            .add_event_listener_with_callback("ended", on_ended.as_ref().unchecked_ref())
            .map_err(|err| js_detail(&err))?;
        audio
            .add_event_listener_with_callback("error", on_error.as_ref().unchecked_ref())
            .map_err(|err| js_detail(&err))?;

        Ok(WebStream {
            audio,
            events,
            on_ended,
            on_error,
        })
    }
}

/// Owns the element and its listeners; dropping it detaches both.
pub struct WebStream {
    audio: HtmlAudioElement,
    events: StreamEvents,
    on_ended: Closure<dyn FnMut()>,
    on_error: Closure<dyn FnMut()>,
}

impl AudioStream for WebStream {
    fn play(&mut self) {
        match self.audio.play() {
            Ok(promise) => {
                let events = self.events.clone();
                wasm_bindgen_futures::spawn_local(async move {
                    if let Err(err) = wasm_bindgen_futures::JsFuture::from(promise).await {
                        // Interrupted by our own pause() before playback began.
                        if js_error_name(&err).as_deref() == Some("AbortError") {
                            debug!(token = %events.token(), "play() interrupted");
                            return;
                        }
                        events.start_rejected(js_detail(&err));
                    }
                });
            }
            Err(err) => self.events.start_rejected(js_detail(&err)),
        }
    }

    fn pause(&mut self) {
        let _ = self.audio.pause();
    }

    fn rewind(&mut self) {
        self.audio.set_current_time(0.0);
    }

    fn is_paused(&self) -> bool {
        self.audio.paused()
    }
}

impl Drop for WebStream {
    fn drop(&mut self) {
        let _ = self.audio.pause();
        let _ = self
            .audio
            .remove_event_listener_with_callback("ended", self.on_ended.as_ref().unchecked_ref());
        let _ = self
            .audio
            .remove_event_listener_with_callback("error", self.on_error.as_ref().unchecked_ref());
    }
}

fn js_error_name(value: &JsValue) -> Option<String> {
    js_sys::Reflect::get(value, &"name".into())
        .ok()
        .and_then(|name| name.as_string())
}

fn js_detail(value: &JsValue) -> String {
    if let Some(name) = js_error_name(value) {
        let message = js_sys::Reflect::get(value, &"message".into())
            .ok()
            .and_then(|m| m.as_string())
            .unwrap_or_default();
        if message.is_empty() {
            return name;
        }
        return format!("{name}: {message}");
    }
    value.as_string().unwrap_or_else(|| format!("{value:?}"))
}

fn media_error_detail(audio: &HtmlAudioElement) -> String {
    let audio_js = JsValue::from(audio.clone());
    let code = js_sys::Reflect::get(&audio_js, &"error".into())
        .ok()
        .filter(|error| !error.is_null() && !error.is_undefined())
        .and_then(|error| js_sys::Reflect::get(&error, &"code".into()).ok())
        .and_then(|code| code.as_f64())
        .unwrap_or(0.0) as u16;

    match code {
        1 => "aborted before the clip loaded",
        2 => "network error while loading the clip",
        3 => "decode error",
        4 => "source not supported or missing",
        _ => "unknown media error",
    }
    .to_string()
}
