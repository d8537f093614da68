use dioxus::logger::tracing::Level;
use dioxus::prelude::*;

mod characters;
mod components;
mod playback;
mod utils;

use characters::SHOWCASE;
use components::ShowcasePage;

const APP_CSS: Asset = asset!("/assets/styling/app.css");

fn main() {
    if let Err(err) = dioxus::logger::init(Level::INFO) {
        eprintln!("failed to initialise logging: {err}");
    }
    dioxus::launch(App);
}

#[component]
fn App() -> Element {
    rsx! {
        document::Title { "{SHOWCASE.title}" }
        document::Meta { name: "viewport", content: "width=device-width, initial-scale=1" }
        document::Meta { name: "description", content: "{SHOWCASE.tagline}" }
        document::Meta { name: "theme-color", content: "#1b1d2a" }

        document::Stylesheet { href: APP_CSS }

        ShowcasePage {}
    }
}
