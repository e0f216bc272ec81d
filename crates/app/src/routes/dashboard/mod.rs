mod summaries;

use crate::auth::{use_dashboard_view, use_entitlements};
use crate::routes::Route;
use dioxus::prelude::*;
use shared_types::{DashboardBody, DashboardView};
use shared_ui::{Card, CardContent, CardHeader, Skeleton};

use summaries::{AdminHome, CustomerHome, DonorHome, MerchantHome, VolunteerHome};

/// Number of skeleton placeholders shown while the profile is resolving.
const SKELETON_COUNT: usize = 3;

/// Role-adaptive dashboard home.
#[component]
pub fn Dashboard() -> Element {
    let view = use_dashboard_view();
    let snapshot = use_entitlements();

    match view {
        DashboardView::Loading => rsx! { LoadingSkeletons {} },
        DashboardView::RedirectToLanding => {
            if let Some(err) = &snapshot.error {
                tracing::warn!(kind = %err.kind, "dashboard unavailable: {}", err.message);
            }
            navigator().replace(Route::Landing {});
            rsx! {
                div { class: "auth-guard-loading",
                    p { "Redirecting..." }
                }
            }
        }
        DashboardView::Body(body) => {
            let Some(profile) = snapshot.profile.clone() else {
                return rsx! { LoadingSkeletons {} };
            };
            rsx! {
                div { class: "dashboard-page",
                    match body {
                        DashboardBody::DonorHome => rsx! { DonorHome { profile } },
                        DashboardBody::VolunteerHome => rsx! { VolunteerHome { profile } },
                        DashboardBody::AdminHome => rsx! { AdminHome { profile } },
                        DashboardBody::CustomerHome => rsx! { CustomerHome { profile } },
                        DashboardBody::MerchantHome => rsx! { MerchantHome { profile } },
                    }
                }
            }
        }
    }
}

/// Grid of skeleton placeholders shown during the initial lookup.
#[component]
fn LoadingSkeletons() -> Element {
    rsx! {
        div { class: "skeleton-grid",
            for _ in 0..SKELETON_COUNT {
                Card {
                    CardHeader {
                        Skeleton { height: "1rem" }
                    }
                    CardContent {
                        Skeleton { height: "2rem" }
                    }
                }
            }
        }
    }
}
