use dioxus::prelude::*;
use shared_types::navigation::{self, NavEntry};
use shared_types::{links_for_role, status_tone, UserProfile};
use shared_ui::{
    Badge, BadgeVariant, Card, CardContent, CardDescription, CardHeader, CardTitle, PageHeader,
    PageTitle,
};

use crate::routes::tone_variant;

fn first_name(profile: &UserProfile) -> String {
    profile
        .name
        .as_deref()
        .and_then(|n| n.split_whitespace().next())
        .unwrap_or("there")
        .to_string()
}

/// Greeting shared by every summary.
#[component]
fn Welcome(profile: UserProfile, tagline: &'static str) -> Element {
    let name = first_name(&profile);
    let status = profile.status.as_str();
    let variant = tone_variant(status_tone(profile.status));

    rsx! {
        PageHeader {
            PageTitle { "Welcome, {name}" }
            Badge { variant, "{status}" }
        }
        p { class: "dashboard-tagline", "{tagline}" }
    }
}

/// Card listing the shortcuts the role can reach from its power links.
#[component]
fn Shortcuts(title: &'static str, entries: Vec<NavEntry>) -> Element {
    rsx! {
        Card {
            CardHeader {
                CardTitle { "{title}" }
            }
            CardContent {
                if entries.is_empty() {
                    p { class: "card-empty", "Nothing to manage yet." }
                } else {
                    ul { class: "shortcut-list",
                        for entry in entries {
                            li { key: "{entry.path}",
                                Link { to: entry.path, "{entry.label}" }
                            }
                        }
                    }
                }
            }
        }
    }
}

fn power_links(profile: &UserProfile) -> Vec<NavEntry> {
    profile
        .role
        .map(|role| links_for_role(role).power_links)
        .unwrap_or_default()
}

#[component]
pub fn DonorHome(profile: UserProfile) -> Element {
    let blood_group = profile.blood_group.clone().unwrap_or_else(|| "Not set".to_string());
    let location = match (&profile.upazila, &profile.district) {
        (Some(u), Some(d)) => format!("{u}, {d}"),
        (None, Some(d)) => d.clone(),
        _ => "Not set".to_string(),
    };

    rsx! {
        Welcome { profile: profile.clone(), tagline: "Thank you for being a blood donor." }
        div { class: "card-grid",
            Card {
                CardHeader {
                    CardTitle { "Blood group" }
                    CardDescription { "Shown to requesters who match" }
                }
                CardContent {
                    span { class: "stat-value", "{blood_group}" }
                }
            }
            Card {
                CardHeader {
                    CardTitle { "Location" }
                }
                CardContent { "{location}" }
            }
            Card {
                CardHeader {
                    CardTitle { "Donation requests" }
                }
                CardContent {
                    Link { to: navigation::MY_DONATION_REQUESTS.path, "View my requests" }
                    " · "
                    Link { to: navigation::CREATE_DONATION_REQUEST.path, "Create a request" }
                }
            }
        }
    }
}

#[component]
pub fn VolunteerHome(profile: UserProfile) -> Element {
    let entries = power_links(&profile);
    rsx! {
        Welcome { profile: profile.clone(), tagline: "Help match donors with the people who need them." }
        div { class: "card-grid",
            Shortcuts { title: "Volunteer tools", entries }
        }
    }
}

#[component]
pub fn AdminHome(profile: UserProfile) -> Element {
    let entries = power_links(&profile);
    let scope = if profile.is_ventech {
        "Marketplace administration"
    } else {
        "Blood donation administration"
    };
    rsx! {
        Welcome { profile: profile.clone(), tagline: scope }
        div { class: "card-grid",
            Shortcuts { title: "Administration", entries }
            Card {
                CardHeader {
                    CardTitle { "Role" }
                }
                CardContent {
                    Badge { variant: BadgeVariant::Primary, "Admin" }
                }
            }
        }
    }
}

#[component]
pub fn CustomerHome(profile: UserProfile) -> Element {
    rsx! {
        Welcome { profile: profile.clone(), tagline: "Track your orders and payments." }
        div { class: "card-grid",
            Card {
                CardHeader {
                    CardTitle { "Orders" }
                }
                CardContent {
                    Link { to: navigation::MY_ORDERS.path, "View my orders" }
                }
            }
            Card {
                CardHeader {
                    CardTitle { "Payments" }
                }
                CardContent {
                    Link { to: navigation::PAYMENT_HISTORY.path, "Payment history" }
                }
            }
        }
    }
}

#[component]
pub fn MerchantHome(profile: UserProfile) -> Element {
    let entries = power_links(&profile);
    let shop = profile.shop_details.clone().unwrap_or_default();
    let shop_name = if shop.shop_name.is_empty() {
        "Shop details incomplete".to_string()
    } else {
        shop.shop_name.clone()
    };

    rsx! {
        Welcome { profile: profile.clone(), tagline: "Manage your shop and incoming orders." }
        div { class: "card-grid",
            Card {
                CardHeader {
                    CardTitle { "{shop_name}" }
                    if !shop.shop_address.is_empty() {
                        CardDescription { "{shop.shop_address}" }
                    }
                }
                CardContent {
                    if !shop.trade_license.is_empty() {
                        p { "Trade license: {shop.trade_license}" }
                    }
                    Link { to: navigation::PROFILE.path, "Edit shop details" }
                }
            }
            Shortcuts { title: "Shop tools", entries }
        }
    }
}
