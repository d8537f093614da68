use dioxus::prelude::*;

use crate::characters::SHOWCASE;
use crate::components::{
    AudioController, AudioManager, CharacterAvatar, Icon, NavLink, RevealBoard, RevealObserver,
    ServiceCard,
};

const SECTIONS: [(&str, &str); 3] = [
    ("#services", "Services"),
    ("#characters", "Characters"),
    ("#contact", "Contact"),
];

#[component]
pub fn ShowcasePage() -> Element {
    let showcase = &*SHOWCASE;

    // Provide state via context
    let audio = use_context_provider(AudioManager::new);
    use_context_provider(RevealBoard::new);

    let session = if audio.session_active() {
        "active"
    } else {
        "idle"
    };

    rsx! {
        AudioController {}

        div { class: "page", "data-session": "{session}",
            header { class: "site-header",
                NavLink {
                    href: "#top".to_string(),
                    label: showcase.title.clone(),
                    class: "brand".to_string(),
                }
                nav { class: "site-nav",
                    for (href, label) in SECTIONS {
                        NavLink { key: "{href}", href: href.to_string(), label: label.to_string() }
                    }
                }
            }

            section { id: "top", class: "hero",
                div { class: "hero-mark",
                    Icon { name: "mic".to_string(), class: "w-10 h-10".to_string() }
                }
                h1 { "{showcase.title}" }
                if !showcase.tagline.is_empty() {
                    p { class: "hero-tagline", "{showcase.tagline}" }
                }
                NavLink {
                    href: "#characters".to_string(),
                    label: "Hear the voices".to_string(),
                    class: "hero-cta".to_string(),
                }
            }

            section { id: "services", class: "services",
                h2 { "Services" }
                div { class: "service-grid",
                    for (index, service) in showcase.services.iter().enumerate() {
                        ServiceCard { key: "{service.title}", index, service: service.clone() }
                    }
                }
            }

            section { id: "characters", class: "characters",
                h2 { "Characters" }
                p { class: "section-hint", "Press play on a character to hear a sample. Press it again to stop." }
                div { class: "character-grid",
                    for (slot, character) in showcase.characters.iter().enumerate() {
                        CharacterAvatar { key: "{character.id}", slot, character: character.clone() }
                    }
                }
            }

            footer { id: "contact", class: "site-footer",
                h2 { "Contact" }
                p { "Booking and rates on request." }
                p { class: "shortcut-hint",
                    kbd { "Space" }
                    " pause / resume "
                    kbd { "Esc" }
                    " stop"
                }
            }
        }

        RevealObserver {}
    }
}
