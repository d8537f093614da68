// Scroll-reveal: items fade and rise into place the first time they scroll into view.
use dioxus::logger::tracing::warn;
use dioxus::prelude::*;
use std::collections::HashSet;

#[cfg(target_arch = "wasm32")]
use dioxus::core::{Runtime, RuntimeGuard};
#[cfg(target_arch = "wasm32")]
use wasm_bindgen::{closure::Closure, JsCast, JsValue};
#[cfg(target_arch = "wasm32")]
use web_sys::{window, IntersectionObserver, IntersectionObserverEntry, IntersectionObserverInit};

pub const REVEAL_THRESHOLD: f64 = 0.1;
pub const REVEAL_ROOT_MARGIN: &str = "0px 0px -100px 0px";
pub const SERVICE_STAGGER_SECS: f64 = 0.1;
pub const AVATAR_STAGGER_SECS: f64 = 0.05;

/// Inline style for the `index`-th item of a staggered group.
pub fn reveal_style(index: usize, stagger_secs: f64, revealed: bool) -> String {
    let delay = index as f64 * stagger_secs;
    let (opacity, offset) = if revealed { (1, "0") } else { (0, "30px") };
    format!("opacity: {opacity}; transform: translateY({offset}); transition: all 0.6s ease {delay:.2}s;")
}

/// Ids of the items that have been revealed so far.
#[derive(Clone, Copy)]
pub struct RevealBoard {
    revealed: Signal<HashSet<String>>,
}

impl RevealBoard {
    pub fn new() -> Self {
        Self {
            revealed: Signal::new(HashSet::new()),
        }
    }

    pub fn is_revealed(&self, id: &str) -> bool {
        self.revealed.read().contains(id)
    }

    pub fn reveal(&self, id: &str) {
        if id.is_empty() || self.revealed.peek().contains(id) {
            return;
        }
        let mut revealed = self.revealed;
        revealed.write().insert(id.to_string());
    }
}

#[component]
pub fn RevealItem(
    id: String,
    index: usize,
    stagger_secs: f64,
    class: String,
    children: Element,
) -> Element {
    let board = use_context::<RevealBoard>();
    let style = reveal_style(index, stagger_secs, board.is_revealed(&id));

    rsx! {
        div {
            id: "{id}",
            class: "{class}",
            style: "{style}",
            "data-reveal": "true",
            {children}
        }
    }
}

/// Watches every `[data-reveal]` element on the page once it is mounted.
#[component]
pub fn RevealObserver() -> Element {
    let board = use_context::<RevealBoard>();

    use_effect(move || {
        install_reveal_observer(board);
    });

    rsx! {}
}

#[cfg(target_arch = "wasm32")]
fn install_reveal_observer(board: RevealBoard) {
    let Some(doc) = window().and_then(|w| w.document()) else {
        return;
    };

    let runtime = Runtime::current();
    let on_intersect = Closure::wrap(Box::new(
        move |entries: js_sys::Array, observer: IntersectionObserver| {
            let _guard = RuntimeGuard::new(runtime.clone());
            for entry in entries.iter() {
                let Ok(entry) = entry.dyn_into::<IntersectionObserverEntry>() else {
                    continue;
                };
                if !entry.is_intersecting() {
                    continue;
                }
                let target = entry.target();
                board.reveal(&target.id());
                observer.unobserve(&target);
            }
        },
    )
        as Box<dyn FnMut(js_sys::Array, IntersectionObserver)>);

    let options = IntersectionObserverInit::new();
    options.set_threshold(&JsValue::from_f64(REVEAL_THRESHOLD));
    options.set_root_margin(REVEAL_ROOT_MARGIN);

    let observer = match IntersectionObserver::new_with_options(
        on_intersect.as_ref().unchecked_ref(),
        &options,
    ) {
        Ok(observer) => observer,
        Err(err) => {
            warn!(?err, "IntersectionObserver unavailable, revealing everything");
            reveal_all(&doc, board);
            return;
        }
    };

    if let Ok(nodes) = doc.query_selector_all("[data-reveal]") {
        for i in 0..nodes.length() {
            if let Some(element) = nodes
                .item(i)
                .and_then(|node| node.dyn_into::<web_sys::Element>().ok())
            {
                observer.observe(&element);
            }
        }
    }
    on_intersect.forget();
}

#[cfg(target_arch = "wasm32")]
fn reveal_all(doc: &web_sys::Document, board: RevealBoard) {
    if let Ok(nodes) = doc.query_selector_all("[data-reveal]") {
        for i in 0..nodes.length() {
            if let Some(element) = nodes
                .item(i)
                .and_then(|node| node.dyn_into::<web_sys::Element>().ok())
            {
                board.reveal(&element.id());
            }
        }
    }
}

#[cfg(not(target_arch = "wasm32"))]
fn desktop_reveal_script() -> String {
    format!(
        r#"
const observer = new IntersectionObserver((entries) => {{
  entries.forEach((entry) => {{
    if (entry.isIntersecting) {{
      dioxus.send(entry.target.id);
      observer.unobserve(entry.target);
    }}
  }});
}}, {{ threshold: {REVEAL_THRESHOLD}, rootMargin: "{REVEAL_ROOT_MARGIN}" }});
document.querySelectorAll("[data-reveal]").forEach((el) => observer.observe(el));
await new Promise(() => {{}});
"#
    )
}

#[cfg(not(target_arch = "wasm32"))]
fn install_reveal_observer(board: RevealBoard) {
    let mut eval = document::eval(&desktop_reveal_script());
    spawn(async move {
        loop {
            match eval.recv::<String>().await {
                Ok(id) => board.reveal(&id),
                Err(err) => {
                    warn!(?err, "reveal bridge closed");
                    break;
                }
            }
        }
    });
}
