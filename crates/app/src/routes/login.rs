use crate::auth::use_auth;
use crate::routes::Route;
use dioxus::prelude::*;
use shared_types::{FeatureFlags, Identity};
use shared_ui::{Card, CardContent, CardDescription, CardHeader, CardTitle};

/// Build the identity handed to the resolver, or explain why not.
fn identity_from_form(email: &str, display_name: &str) -> Result<Identity, &'static str> {
    let identity = Identity::new(email.trim());
    if identity.lookup_key().is_none() {
        return Err("Email is required");
    }
    if !email.contains('@') {
        return Err("Enter a valid email address");
    }
    let name = display_name.trim();
    Ok(if name.is_empty() {
        identity
    } else {
        identity.with_display_name(name)
    })
}

/// Sign-in page. Stands in for the external identity provider: it only
/// establishes who the user is. Roles are looked up afterwards.
#[component]
pub fn Login() -> Element {
    let mut auth = use_auth();
    let flags: FeatureFlags = use_context();
    let mut email = use_signal(String::new);
    let mut display_name = use_signal(String::new);
    let mut error_msg = use_signal(|| Option::<String>::None);

    // Redirect to dashboard if already authenticated
    if auth.is_authenticated() {
        navigator().push(Route::Dashboard {});
    }

    let handle_login = move |evt: FormEvent| {
        evt.prevent_default();
        match identity_from_form(&email(), &display_name()) {
            Ok(identity) => {
                tracing::info!(email = %identity.email, "signed in");
                auth.sign_in(identity);
                navigator().push(Route::Dashboard {});
            }
            Err(msg) => error_msg.set(Some(msg.to_string())),
        }
    };

    let brand = flags.brand_name();

    rsx! {
        div { class: "login-page",
            Card {
                CardHeader {
                    CardTitle { "Sign in to {brand}" }
                    CardDescription { "Use the email your account was registered with." }
                }
                CardContent {
                    form { class: "login-form", onsubmit: handle_login,
                        label { r#for: "email", "Email" }
                        input {
                            id: "email",
                            r#type: "email",
                            value: "{email}",
                            oninput: move |e| email.set(e.value()),
                        }
                        label { r#for: "display_name", "Name (optional)" }
                        input {
                            id: "display_name",
                            value: "{display_name}",
                            oninput: move |e| display_name.set(e.value()),
                        }
                        if let Some(msg) = error_msg() {
                            p { class: "form-error", "{msg}" }
                        }
                        button { r#type: "submit", class: "button-primary", "Sign in" }
                    }
                }
            }
        }
    }
}
