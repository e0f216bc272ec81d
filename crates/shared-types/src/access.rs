use serde::Serialize;

use crate::entitlement::EntitlementSnapshot;
use crate::models::{AccountStatus, LegacyRole, MarketplaceRole, Role};
use crate::navigation;

/// Public landing route used when a user may not see a dashboard.
pub const LANDING_ROUTE: &str = "/";

/// Summary view rendered in the dashboard body.
#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq)]
pub enum DashboardBody {
    DonorHome,
    VolunteerHome,
    AdminHome,
    CustomerHome,
    MerchantHome,
}

/// What the dashboard route should do for a snapshot.
#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq)]
pub enum DashboardView {
    Loading,
    Body(DashboardBody),
    RedirectToLanding,
}

/// Pick the dashboard body.
///
/// Anything without a recognised role, including a failed lookup, is sent to
/// the landing page rather than given a default dashboard.
pub fn select_dashboard(snapshot: &EntitlementSnapshot) -> DashboardView {
    if snapshot.loading {
        return DashboardView::Loading;
    }
    match snapshot.role {
        Some(Role::Legacy(LegacyRole::Donor)) => DashboardView::Body(DashboardBody::DonorHome),
        Some(Role::Marketplace(MarketplaceRole::Customer)) => {
            DashboardView::Body(DashboardBody::CustomerHome)
        }
        Some(Role::Legacy(LegacyRole::Volunteer)) => {
            DashboardView::Body(DashboardBody::VolunteerHome)
        }
        Some(Role::Marketplace(MarketplaceRole::Merchant)) => {
            DashboardView::Body(DashboardBody::MerchantHome)
        }
        Some(Role::Legacy(LegacyRole::Admin)) | Some(Role::Marketplace(MarketplaceRole::Admin)) => {
            DashboardView::Body(DashboardBody::AdminHome)
        }
        None => DashboardView::RedirectToLanding,
    }
}

/// Which optional field groups the profile form shows.
#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq, Default)]
pub struct ProfileFields {
    pub editable: bool,
    pub show_shop_fields: bool,
    pub show_donor_fields: bool,
}

pub fn profile_fields(snapshot: &EntitlementSnapshot) -> ProfileFields {
    match snapshot.role {
        Some(role) if snapshot.is_resolved() => ProfileFields {
            editable: true,
            show_shop_fields: matches!(role, Role::Marketplace(MarketplaceRole::Merchant)),
            show_donor_fields: matches!(role, Role::Legacy(_)),
        },
        _ => ProfileFields::default(),
    }
}

/// Access requirement of a dashboard section.
#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq)]
pub enum Access {
    AnyRole,
    Elevated,
    AdminOnly,
}

impl Access {
    fn satisfied_by(&self, role: Role, status: AccountStatus) -> bool {
        match self {
            Access::AnyRole => true,
            // Blocked accounts keep the baseline sections only.
            _ if status == AccountStatus::Blocked => false,
            Access::Elevated => role.is_elevated(),
            Access::AdminOnly => role.is_admin(),
        }
    }
}

/// Outcome of a route guard check.
#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq)]
pub enum GuardDecision {
    Wait,
    Allow,
    RedirectToLanding,
}

/// Requirement for a dashboard path.
pub fn section_access(path: &str) -> Access {
    let path = path.trim_end_matches('/');
    let admin_only = [
        navigation::ALL_USERS,
        navigation::FUNDING,
        navigation::ALL_PRODUCTS,
        navigation::ALL_ORDERS,
    ];
    let elevated = [
        navigation::ALL_DONATION_REQUESTS,
        navigation::CONTENT_MANAGEMENT,
        navigation::ADD_PRODUCT,
        navigation::MY_PRODUCTS,
        navigation::ORDER_REQUESTS,
    ];
    if admin_only.iter().any(|e| e.path == path) {
        Access::AdminOnly
    } else if elevated.iter().any(|e| e.path == path) {
        Access::Elevated
    } else {
        Access::AnyRole
    }
}

pub fn guard(snapshot: &EntitlementSnapshot, access: Access) -> GuardDecision {
    if snapshot.loading {
        return GuardDecision::Wait;
    }
    match snapshot.role {
        Some(role) if access.satisfied_by(role, snapshot.status) => GuardDecision::Allow,
        _ => GuardDecision::RedirectToLanding,
    }
}

/// Guard a section by path. Sections a role cannot see in its own sidebar
/// are refused even if their access level would allow them, so a donor
/// cannot open the marketplace order pages by typing the URL.
pub fn guard_path(snapshot: &EntitlementSnapshot, path: &str) -> GuardDecision {
    match guard(snapshot, section_access(path)) {
        GuardDecision::Allow => {
            let links = navigation::select_links(snapshot);
            let path = path.trim_end_matches('/');
            let listed = links
                .power_links
                .iter()
                .chain(links.general_links.iter())
                .any(|e| e.path == path);
            if listed {
                GuardDecision::Allow
            } else {
                GuardDecision::RedirectToLanding
            }
        }
        other => other,
    }
}
