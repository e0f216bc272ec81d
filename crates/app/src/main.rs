use dioxus::prelude::*;
use resolver::HttpRoleResolver;
use shared_types::FeatureFlags;

mod auth;
mod routes;
use auth::{AuthState, EntitlementState};
use routes::Route;

const MAIN_CSS: Asset = asset!("/assets/main.css");

fn main() {
    dioxus::launch(App);
}

#[component]
fn App() -> Element {
    let flags: FeatureFlags = use_hook(|| resolver::config::load_config().features.clone());
    use_context_provider(|| flags);

    // One resolver for the whole session; every route reads through it.
    let resolver: HttpRoleResolver = use_context_provider(resolver::http_resolver);
    let auth = use_context_provider(AuthState::new);

    // Re-resolve whenever the signed-in identity changes
    let snapshot = use_resource(move || {
        let resolver = resolver.clone();
        let identity = auth.current_identity.read().clone();
        async move { resolver.resolve(identity.as_ref()).await }
    });
    use_context_provider(|| EntitlementState { snapshot });

    rsx! {
        document::Link { rel: "stylesheet", href: MAIN_CSS }
        Router::<Route> {}
    }
}
