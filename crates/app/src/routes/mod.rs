pub mod dashboard;
pub mod landing;
pub mod login;
pub mod not_found;
pub mod profile;
pub mod section;

use crate::auth::{use_auth, use_entitlements, use_guard, use_nav_links, use_sign_out};
use dioxus::prelude::*;
use dioxus_free_icons::icons::ld_icons::{
    LdFileText, LdLayoutDashboard, LdPackage, LdShield, LdUserCheck, LdUsers,
};
use dioxus_free_icons::Icon;
use shared_types::navigation::{self, NavEntry};
use shared_types::{FeatureFlags, GuardDecision, StatusTone};
use shared_ui::{Badge, BadgeVariant, Skeleton};

use dashboard::Dashboard;
use landing::Landing;
use login::Login;
use not_found::NotFound;
use profile::Profile;
use section::DashboardSection;

/// Application routes.
#[derive(Clone, Routable, Debug, PartialEq)]
pub enum Route {
    #[route("/")]
    Landing {},
    #[route("/login")]
    Login {},
    #[layout(AuthGuard)]
    #[layout(DashboardLayout)]
    #[route("/dashboard")]
    Dashboard {},
    #[route("/dashboard/profile")]
    Profile {},
    #[route("/dashboard/:section")]
    DashboardSection { section: String },
    #[end_layout]
    #[end_layout]
    #[route("/:..route")]
    NotFound { route: Vec<String> },
}

/// Auth guard layout. Redirects to /login if no identity is signed in.
#[component]
fn AuthGuard() -> Element {
    let auth = use_auth();

    if auth.is_authenticated() {
        rsx! { Outlet::<Route> {} }
    } else {
        navigator().push(Route::Login {});
        rsx! {
            div { class: "auth-guard-loading",
                p { "Redirecting to sign in..." }
            }
        }
    }
}

pub(crate) fn tone_variant(tone: StatusTone) -> BadgeVariant {
    match tone {
        StatusTone::Affirmative => BadgeVariant::Success,
        StatusTone::Cautionary => BadgeVariant::Warning,
        StatusTone::Negative => BadgeVariant::Destructive,
        StatusTone::Neutral => BadgeVariant::Outline,
    }
}

/// Dashboard shell: role-adaptive sidebar plus the routed page.
#[component]
fn DashboardLayout() -> Element {
    let route: Route = use_route();
    let flags: FeatureFlags = use_context();
    let auth = use_auth();
    let snapshot = use_entitlements();
    let links = use_nav_links();
    let mut sign_out = use_sign_out();

    let current_path = route.to_string();
    let display_name = snapshot
        .profile
        .as_ref()
        .and_then(|p| p.name.clone())
        .or_else(|| {
            auth.current_identity
                .read()
                .as_ref()
                .and_then(|i| i.display_name.clone())
        })
        .unwrap_or_else(|| "Guest".to_string());
    let brand = flags.brand_name();
    let role_label = snapshot.display_role.label();
    let status_label = snapshot.status.as_str();
    let status_variant = tone_variant(snapshot.status_tone());

    rsx! {
        div { class: "dashboard-shell",
            aside { class: "sidebar",
                div { class: "sidebar-brand",
                    span { class: "sidebar-brand-name", "{brand}" }
                }

                div { class: "sidebar-user",
                    span { class: "sidebar-user-name", "{display_name}" }
                    if snapshot.loading {
                        Skeleton { height: "1rem" }
                    } else {
                        div { class: "sidebar-user-badges",
                            Badge { variant: BadgeVariant::Secondary, "{role_label}" }
                            Badge { variant: status_variant, "{status_label}" }
                        }
                    }
                }

                nav { class: "sidebar-content",
                    if snapshot.loading {
                        for _ in 0..3 {
                            Skeleton {}
                        }
                    } else if links.is_empty() {
                        p { class: "sidebar-empty", "No actions available" }
                    } else {
                        if !links.power_links.is_empty() {
                            SidebarGroup {
                                label: "Manage",
                                entries: links.power_links.clone(),
                                current_path: current_path.clone(),
                            }
                        }
                        SidebarGroup {
                            label: "General",
                            entries: links.general_links.clone(),
                            current_path: current_path.clone(),
                        }
                    }
                }

                div { class: "sidebar-footer",
                    Link { to: Route::Landing {}, class: "sidebar-link", "Home" }
                    button {
                        class: "sidebar-sign-out",
                        onclick: move |_| {
                            sign_out();
                            navigator().push(Route::Landing {});
                        },
                        "Sign out"
                    }
                }
            }

            main { class: "dashboard-main",
                Outlet::<Route> {}
            }
        }
    }
}

#[component]
fn SidebarGroup(label: &'static str, entries: Vec<NavEntry>, current_path: String) -> Element {
    let items = entries.into_iter().map(|entry| {
        let class = if current_path == entry.path {
            "sidebar-link active"
        } else {
            "sidebar-link"
        };
        (entry, class)
    });

    rsx! {
        div { class: "sidebar-group",
            span { class: "sidebar-group-label", "{label}" }
            ul { class: "sidebar-menu",
                for (entry, class) in items {
                    li { key: "{entry.path}",
                        Link {
                            to: entry.path,
                            class,
                            SidebarIcon { path: entry.path }
                            "{entry.label}"
                        }
                    }
                }
            }
        }
    }
}

#[component]
fn SidebarIcon(path: &'static str) -> Element {
    if path == navigation::DASHBOARD.path {
        rsx! { Icon::<LdLayoutDashboard> { icon: LdLayoutDashboard, width: 18, height: 18 } }
    } else if path == navigation::PROFILE.path {
        rsx! { Icon::<LdUserCheck> { icon: LdUserCheck, width: 18, height: 18 } }
    } else if path == navigation::ALL_USERS.path {
        rsx! { Icon::<LdUsers> { icon: LdUsers, width: 18, height: 18 } }
    } else if path.contains("product") || path.contains("order") {
        rsx! { Icon::<LdPackage> { icon: LdPackage, width: 18, height: 18 } }
    } else if path == navigation::FUNDING.path || path == navigation::CONTENT_MANAGEMENT.path {
        rsx! { Icon::<LdShield> { icon: LdShield, width: 18, height: 18 } }
    } else {
        rsx! { Icon::<LdFileText> { icon: LdFileText, width: 18, height: 18 } }
    }
}

/// Renders `children` only when the current user may open `path`; otherwise
/// waits for the lookup or sends the user back to the landing page.
#[component]
pub fn SectionGuard(path: String, children: Element) -> Element {
    match use_guard(&path) {
        GuardDecision::Allow => rsx! { {children} },
        GuardDecision::Wait => rsx! {
            div { class: "section-loading",
                Skeleton { height: "2rem" }
                Skeleton {}
            }
        },
        GuardDecision::RedirectToLanding => {
            tracing::debug!(path = %path, "section refused, redirecting to landing");
            navigator().replace(Route::Landing {});
            rsx! {
                div { class: "auth-guard-loading",
                    p { "Redirecting..." }
                }
            }
        }
    }
}
