use serde::{Deserialize, Serialize};

use crate::error::AppError;
use crate::models::{AccountStatus, Role, UserProfile};

/// Human label for a role.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
pub enum DisplayRole {
    Donor,
    Volunteer,
    Customer,
    Merchant,
    Admin,
    #[default]
    Unknown,
}

impl DisplayRole {
    pub fn label(&self) -> &'static str {
        match self {
            DisplayRole::Donor => "Donor",
            DisplayRole::Volunteer => "Volunteer",
            DisplayRole::Customer => "Customer",
            DisplayRole::Merchant => "Merchant",
            DisplayRole::Admin => "Admin",
            DisplayRole::Unknown => "Unknown",
        }
    }
}

impl From<Role> for DisplayRole {
    fn from(role: Role) -> Self {
        use crate::models::{LegacyRole, MarketplaceRole};
        match role {
            Role::Legacy(LegacyRole::Donor) => DisplayRole::Donor,
            Role::Legacy(LegacyRole::Volunteer) => DisplayRole::Volunteer,
            Role::Legacy(LegacyRole::Admin) => DisplayRole::Admin,
            Role::Marketplace(MarketplaceRole::Customer) => DisplayRole::Customer,
            Role::Marketplace(MarketplaceRole::Merchant) => DisplayRole::Merchant,
            Role::Marketplace(MarketplaceRole::Admin) => DisplayRole::Admin,
        }
    }
}

/// Display label for a raw `(role, is_ventech)` pair.
///
/// Pairs outside the two taxonomies map to `Unknown`. There is no admin
/// fallback.
pub fn display_role(role_tag: Option<&str>, is_ventech: bool) -> DisplayRole {
    role_tag
        .and_then(|tag| Role::parse(tag, is_ventech))
        .map(DisplayRole::from)
        .unwrap_or(DisplayRole::Unknown)
}

/// Colour classification for an account status.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum StatusTone {
    Affirmative,
    Cautionary,
    Negative,
    Neutral,
}

pub fn status_tone(status: AccountStatus) -> StatusTone {
    match status {
        AccountStatus::Active => StatusTone::Affirmative,
        AccountStatus::Pending => StatusTone::Cautionary,
        AccountStatus::Blocked => StatusTone::Negative,
        AccountStatus::Unknown => StatusTone::Neutral,
    }
}

/// Read-only summary of what the signed-in user may see.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
pub struct EntitlementSnapshot {
    pub email: Option<String>,
    pub role: Option<Role>,
    pub role_tag: Option<String>,
    pub display_role: DisplayRole,
    pub status: AccountStatus,
    pub is_ventech: Option<bool>,
    pub loading: bool,
    pub profile: Option<UserProfile>,
    pub error: Option<AppError>,
}

impl EntitlementSnapshot {
    /// Snapshot for a session with no identity, or whose lookup is pending.
    pub fn loading() -> Self {
        Self {
            loading: true,
            ..Self::default()
        }
    }

    /// Pending snapshot that already knows which identity it is waiting for.
    pub fn pending(email: impl Into<String>) -> Self {
        Self {
            email: Some(email.into()),
            loading: true,
            ..Self::default()
        }
    }

    /// Lookup finished without a usable profile.
    pub fn unresolved(email: impl Into<String>, error: AppError) -> Self {
        Self {
            email: Some(email.into()),
            loading: false,
            error: Some(error),
            ..Self::default()
        }
    }

    pub fn from_profile(profile: UserProfile) -> Self {
        let error = match (&profile.role, &profile.role_tag) {
            (Some(_), _) => None,
            (None, Some(tag)) => Some(AppError::unknown_role(format!(
                "role '{}' is not valid when ventech_user={}",
                tag, profile.is_ventech
            ))),
            (None, None) => Some(AppError::unknown_role("profile has no role")),
        };
        Self {
            email: Some(profile.email.clone()),
            role: profile.role,
            role_tag: profile.role_tag.clone(),
            display_role: profile
                .role
                .map(DisplayRole::from)
                .unwrap_or(DisplayRole::Unknown),
            status: profile.status,
            is_ventech: Some(profile.is_ventech),
            loading: false,
            profile: Some(profile),
            error,
        }
    }

    /// True once a profile has been fetched and validated, regardless of
    /// whether its role is recognised.
    pub fn is_resolved(&self) -> bool {
        !self.loading && self.profile.is_some()
    }

    /// Lookup finished but produced nothing usable.
    pub fn is_unresolved(&self) -> bool {
        !self.loading && self.profile.is_none()
    }

    pub fn status_tone(&self) -> StatusTone {
        status_tone(self.status)
    }
}
