use crate::auth::{use_auth, use_entitlements};
use crate::routes::Route;
use dioxus::prelude::*;
use shared_types::FeatureFlags;

/// Public landing page. Also where users without a usable role end up.
#[component]
pub fn Landing() -> Element {
    let flags: FeatureFlags = use_context();
    let auth = use_auth();
    let snapshot = use_entitlements();

    let brand = flags.brand_name();
    let tagline = if flags.marketplace {
        "Buy and sell electronics from trusted shops."
    } else {
        "Find blood donors near you, or become one."
    };
    // Shown when the signed-in user was sent back here because their
    // profile could not be used.
    let problem = snapshot
        .error
        .as_ref()
        .filter(|_| auth.is_authenticated() && !snapshot.loading)
        .map(|err| err.friendly_message());

    rsx! {
        div { class: "landing-page",
            h1 { class: "landing-title", "{brand}" }
            p { class: "landing-tagline", "{tagline}" }

            if let Some(msg) = problem {
                p { class: "landing-notice", "{msg}" }
            }

            if auth.is_authenticated() {
                Link { to: Route::Dashboard {}, class: "button-primary", "Go to dashboard" }
            } else {
                Link { to: Route::Login {}, class: "button-primary", "Sign in" }
            }
        }
    }
}
