use dioxus::prelude::*;

/// Loading placeholder with animated pulse.
#[component]
pub fn Skeleton(#[props(into, default = "1.25rem".to_string())] height: String) -> Element {
    rsx! {
        div {
            class: "skeleton",
            style: "height: {height}",
            aria_busy: "true",
        }
    }
}
