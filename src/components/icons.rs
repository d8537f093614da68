use dioxus::prelude::*;

#[component]
pub fn Icon(name: String, class: String) -> Element {
    match name.as_str() {
        "play" => rsx! {
            svg {
                class: "{class}",
                view_box: "0 0 24 24",
                fill: "currentColor",
                polygon { points: "6 4 20 12 6 20 6 4" }
            }
        },
        // Shown while a clip is playing.
        "wave" => rsx! {
            svg {
                class: "{class} icon-wave",
                view_box: "0 0 24 24",
                fill: "none",
                stroke: "currentColor",
                stroke_width: "2",
                stroke_linecap: "round",
                line { x1: "4", y1: "10", x2: "4", y2: "14" }
                line { x1: "8", y1: "6", x2: "8", y2: "18" }
                line { x1: "12", y1: "3", x2: "12", y2: "21" }
                line { x1: "16", y1: "7", x2: "16", y2: "17" }
                line { x1: "20", y1: "10", x2: "20", y2: "14" }
            }
        },
        "mic" => rsx! {
            svg {
                class: "{class}",
                view_box: "0 0 24 24",
                fill: "none",
                stroke: "currentColor",
                stroke_width: "2",
                rect {
                    x: "9",
                    y: "2",
                    width: "6",
                    height: "12",
                    rx: "3",
                }
                path { d: "M5 10v1a7 7 0 0 0 14 0v-1" }
                line { x1: "12", y1: "18", x2: "12", y2: "22" }
            }
        },
        "gamepad" => rsx! {
            svg {
                class: "{class}",
                view_box: "0 0 24 24",
                fill: "none",
                stroke: "currentColor",
                stroke_width: "2",
                rect {
                    x: "2",
                    y: "7",
                    width: "20",
                    height: "11",
                    rx: "5",
                }
                line { x1: "7", y1: "11", x2: "7", y2: "15" }
                line { x1: "5", y1: "13", x2: "9", y2: "13" }
                circle { cx: "16", cy: "12", r: "1" }
                circle { cx: "18", cy: "14", r: "1" }
            }
        },
        "film" => rsx! {
            svg {
                class: "{class}",
                view_box: "0 0 24 24",
                fill: "none",
                stroke: "currentColor",
                stroke_width: "2",
                rect {
                    x: "3",
                    y: "3",
                    width: "18",
                    height: "18",
                    rx: "2",
                }
                line { x1: "7", y1: "3", x2: "7", y2: "21" }
                line { x1: "17", y1: "3", x2: "17", y2: "21" }
                line { x1: "3", y1: "12", x2: "21", y2: "12" }
            }
        },
        "book" => rsx! {
            svg {
                class: "{class}",
                view_box: "0 0 24 24",
                fill: "none",
                stroke: "currentColor",
                stroke_width: "2",
                path { d: "M4 19.5A2.5 2.5 0 0 1 6.5 17H20V3H6.5A2.5 2.5 0 0 0 4 5.5z" }
                path { d: "M6.5 17A2.5 2.5 0 0 0 4 19.5 2.5 2.5 0 0 0 6.5 22H20v-5" }
            }
        },
        _ => rsx! {
            svg {
                class: "{class}",
                view_box: "0 0 24 24",
                fill: "none",
                stroke: "currentColor",
                stroke_width: "2",
                circle { cx: "12", cy: "12", r: "10" }
            }
        },
    }
}
