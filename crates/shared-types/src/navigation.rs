use serde::Serialize;

use crate::entitlement::EntitlementSnapshot;
use crate::models::{LegacyRole, MarketplaceRole, Role};

/// A single sidebar link.
#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq)]
pub struct NavEntry {
    pub path: &'static str,
    pub label: &'static str,
}

const fn entry(path: &'static str, label: &'static str) -> NavEntry {
    NavEntry { path, label }
}

pub const DASHBOARD: NavEntry = entry("/dashboard", "Dashboard");
pub const PROFILE: NavEntry = entry("/dashboard/profile", "Profile");

// ── Legacy (blood donation) ──
pub const MY_DONATION_REQUESTS: NavEntry =
    entry("/dashboard/my-donation-requests", "My Donation Requests");
pub const CREATE_DONATION_REQUEST: NavEntry =
    entry("/dashboard/create-donation-request", "Create Donation Request");
pub const ALL_DONATION_REQUESTS: NavEntry =
    entry("/dashboard/all-blood-donation-request", "All Blood Donation Requests");
pub const CONTENT_MANAGEMENT: NavEntry =
    entry("/dashboard/content-management", "Content Management");

// ── Marketplace ──
pub const MY_ORDERS: NavEntry = entry("/dashboard/my-orders", "My Orders");
pub const PAYMENT_HISTORY: NavEntry = entry("/dashboard/payment-history", "Payment History");
pub const ADD_PRODUCT: NavEntry = entry("/dashboard/add-product", "Add Product");
pub const MY_PRODUCTS: NavEntry = entry("/dashboard/my-products", "My Products");
pub const ORDER_REQUESTS: NavEntry = entry("/dashboard/order-requests", "Order Requests");
pub const ALL_PRODUCTS: NavEntry = entry("/dashboard/all-products", "All Products");
pub const ALL_ORDERS: NavEntry = entry("/dashboard/all-orders", "All Orders");

// ── Shared admin ──
pub const ALL_USERS: NavEntry = entry("/dashboard/all-users", "All Users");
pub const FUNDING: NavEntry = entry("/dashboard/funding", "Funding");

const DONOR_GENERAL: &[NavEntry] = &[
    DASHBOARD,
    MY_DONATION_REQUESTS,
    CREATE_DONATION_REQUEST,
    PROFILE,
];
const STAFF_GENERAL: &[NavEntry] = &[DASHBOARD, PROFILE];
const VOLUNTEER_POWER: &[NavEntry] = &[ALL_DONATION_REQUESTS, CONTENT_MANAGEMENT];
const LEGACY_ADMIN_POWER: &[NavEntry] = &[
    ALL_USERS,
    ALL_DONATION_REQUESTS,
    CONTENT_MANAGEMENT,
    FUNDING,
];

const CUSTOMER_GENERAL: &[NavEntry] = &[DASHBOARD, MY_ORDERS, PAYMENT_HISTORY, PROFILE];
const MERCHANT_POWER: &[NavEntry] = &[ADD_PRODUCT, MY_PRODUCTS, ORDER_REQUESTS];
const MARKETPLACE_ADMIN_POWER: &[NavEntry] = &[ALL_USERS, ALL_PRODUCTS, ALL_ORDERS, FUNDING];

/// Every entry any role can reach, used to label section pages.
pub const ALL_ENTRIES: &[NavEntry] = &[
    DASHBOARD,
    PROFILE,
    MY_DONATION_REQUESTS,
    CREATE_DONATION_REQUEST,
    ALL_DONATION_REQUESTS,
    CONTENT_MANAGEMENT,
    MY_ORDERS,
    PAYMENT_HISTORY,
    ADD_PRODUCT,
    MY_PRODUCTS,
    ORDER_REQUESTS,
    ALL_PRODUCTS,
    ALL_ORDERS,
    ALL_USERS,
    FUNDING,
];

/// Sidebar link sets for one snapshot.
#[derive(Debug, Clone, Serialize, PartialEq, Eq, Default)]
pub struct NavLinks {
    pub power_links: Vec<NavEntry>,
    pub general_links: Vec<NavEntry>,
}

impl NavLinks {
    fn from_tables(power: &[NavEntry], general: &[NavEntry]) -> Self {
        Self {
            power_links: power.to_vec(),
            general_links: general.to_vec(),
        }
    }

    /// Nothing to show; the sidebar renders an explicit empty state.
    pub fn is_empty(&self) -> bool {
        self.power_links.is_empty() && self.general_links.is_empty()
    }
}

/// Link sets for a typed role. Total over every `Role`.
pub fn links_for_role(role: Role) -> NavLinks {
    match role {
        Role::Legacy(LegacyRole::Donor) => NavLinks::from_tables(&[], DONOR_GENERAL),
        Role::Legacy(LegacyRole::Volunteer) => {
            NavLinks::from_tables(VOLUNTEER_POWER, STAFF_GENERAL)
        }
        Role::Legacy(LegacyRole::Admin) => {
            NavLinks::from_tables(LEGACY_ADMIN_POWER, STAFF_GENERAL)
        }
        Role::Marketplace(MarketplaceRole::Customer) => {
            NavLinks::from_tables(&[], CUSTOMER_GENERAL)
        }
        Role::Marketplace(MarketplaceRole::Merchant) => {
            NavLinks::from_tables(MERCHANT_POWER, STAFF_GENERAL)
        }
        Role::Marketplace(MarketplaceRole::Admin) => {
            NavLinks::from_tables(MARKETPLACE_ADMIN_POWER, STAFF_GENERAL)
        }
    }
}

/// Link sets for a snapshot. Loading, unresolved and unknown-role snapshots
/// all get two empty lists.
pub fn select_links(snapshot: &EntitlementSnapshot) -> NavLinks {
    if snapshot.loading {
        return NavLinks::default();
    }
    snapshot.role.map(links_for_role).unwrap_or_default()
}

/// Same lookup keyed by raw `(is_ventech, role tag)`. Total over all strings.
pub fn select_links_for(is_ventech: bool, role_tag: &str) -> NavLinks {
    Role::parse(role_tag, is_ventech)
        .map(links_for_role)
        .unwrap_or_default()
}

/// Label for a dashboard path, if it belongs to any table.
pub fn label_for_path(path: &str) -> Option<&'static str> {
    let path = path.trim_end_matches('/');
    ALL_ENTRIES
        .iter()
        .find(|e| e.path == path)
        .map(|e| e.label)
}
