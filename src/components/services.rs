use dioxus::prelude::*;

use crate::characters::Service;
use crate::components::{Icon, RevealItem, SERVICE_STAGGER_SECS};
use crate::utils::dom_id;

#[component]
pub fn ServiceCard(index: usize, service: Service) -> Element {
    rsx! {
        RevealItem {
            id: dom_id("service", &service.title),
            index,
            stagger_secs: SERVICE_STAGGER_SECS,
            class: "service-card".to_string(),
            div { class: "service-icon",
                Icon { name: service.icon.clone(), class: "w-8 h-8".to_string() }
            }
            h3 { class: "service-title", "{service.title}" }
            p { class: "service-blurb", "{service.blurb}" }
        }
    }
}
