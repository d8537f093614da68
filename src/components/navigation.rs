use dioxus::prelude::*;

#[cfg(target_arch = "wasm32")]
use web_sys::{window, ScrollBehavior, ScrollIntoViewOptions, ScrollLogicalPosition};

/// The element id an in-page link points at. A bare `#` has no target.
pub fn anchor_target(href: &str) -> Option<&str> {
    let id = href.strip_prefix('#')?;
    if id.is_empty() || id.chars().any(char::is_whitespace) {
        return None;
    }
    Some(id)
}

#[cfg(target_arch = "wasm32")]
fn scroll_to_section(id: &str) {
    let Some(target) = window()
        .and_then(|w| w.document())
        .and_then(|d| d.get_element_by_id(id))
    else {
        return;
    };

    let options = ScrollIntoViewOptions::new();
    options.set_behavior(ScrollBehavior::Smooth);
    options.set_block(ScrollLogicalPosition::Start);
    target.scroll_into_view_with_scroll_into_view_options(&options);
}

#[cfg(not(target_arch = "wasm32"))]
fn scroll_to_section(id: &str) {
    let id = serde_json::to_string(id).unwrap_or_else(|_| "\"\"".to_string());
    let script = format!(
        r#"(function () {{
            const target = document.getElementById({id});
            if (!target) return false;
            target.scrollIntoView({{ behavior: "smooth", block: "start" }});
            return true;
        }})();"#
    );
    let _ = document::eval(&script);
}

/// In-page link that glides to its section instead of jumping.
#[component]
pub fn NavLink(href: String, label: String, #[props(default)] class: String) -> Element {
    let target = href.clone();
    let on_click = move |evt: MouseEvent| {
        evt.prevent_default();
        if let Some(id) = anchor_target(&target) {
            scroll_to_section(id);
        }
    };

    rsx! {
        a { class: "{class}", href: "{href}", onclick: on_click, "{label}" }
    }
}
