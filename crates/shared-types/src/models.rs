use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::error::{AppError, AppErrorKind};

/// Signed-in identity handed over by the authentication provider.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
pub struct Identity {
    pub email: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub display_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub photo_url: Option<String>,
}

impl Identity {
    pub fn new(email: impl Into<String>) -> Self {
        Self {
            email: email.into(),
            display_name: None,
            photo_url: None,
        }
    }

    pub fn with_display_name(mut self, name: impl Into<String>) -> Self {
        self.display_name = Some(name.into());
        self
    }

    /// Lookup key for this identity. `None` when the email is blank, which
    /// callers must treat exactly like a signed-out session.
    pub fn lookup_key(&self) -> Option<String> {
        let trimmed = self.email.trim();
        if trimmed.is_empty() {
            None
        } else {
            Some(trimmed.to_lowercase())
        }
    }
}

/// Roles from the BloodAid blood-donation product.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum LegacyRole {
    Donor,
    Volunteer,
    Admin,
}

impl LegacyRole {
    pub fn parse(tag: &str) -> Option<Self> {
        match tag.trim().to_lowercase().as_str() {
            "donor" => Some(LegacyRole::Donor),
            "volunteer" => Some(LegacyRole::Volunteer),
            "admin" => Some(LegacyRole::Admin),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            LegacyRole::Donor => "donor",
            LegacyRole::Volunteer => "volunteer",
            LegacyRole::Admin => "admin",
        }
    }
}

/// Roles from the marketplace re-skin.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum MarketplaceRole {
    Customer,
    Merchant,
    Admin,
}

impl MarketplaceRole {
    pub fn parse(tag: &str) -> Option<Self> {
        match tag.trim().to_lowercase().as_str() {
            "customer" => Some(MarketplaceRole::Customer),
            "merchant" => Some(MarketplaceRole::Merchant),
            "admin" => Some(MarketplaceRole::Admin),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            MarketplaceRole::Customer => "customer",
            MarketplaceRole::Merchant => "merchant",
            MarketplaceRole::Admin => "admin",
        }
    }
}

/// A role together with the taxonomy it belongs to.
///
/// A legacy tag can never be paired with the marketplace flag or the other
/// way around: `Role::parse` only looks in the taxonomy the flag selects.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum Role {
    Legacy(LegacyRole),
    Marketplace(MarketplaceRole),
}

impl Role {
    /// Parse a raw role tag in the taxonomy selected by `is_ventech`.
    pub fn parse(tag: &str, is_ventech: bool) -> Option<Self> {
        if is_ventech {
            MarketplaceRole::parse(tag).map(Role::Marketplace)
        } else {
            LegacyRole::parse(tag).map(Role::Legacy)
        }
    }

    pub fn is_ventech(&self) -> bool {
        matches!(self, Role::Marketplace(_))
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Legacy(r) => r.as_str(),
            Role::Marketplace(r) => r.as_str(),
        }
    }

    pub fn is_admin(&self) -> bool {
        matches!(
            self,
            Role::Legacy(LegacyRole::Admin) | Role::Marketplace(MarketplaceRole::Admin)
        )
    }

    /// Admins, volunteers and merchants see the privileged sidebar section.
    pub fn is_elevated(&self) -> bool {
        !matches!(
            self,
            Role::Legacy(LegacyRole::Donor) | Role::Marketplace(MarketplaceRole::Customer)
        )
    }
}

/// Account status as stored on the profile.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
pub enum AccountStatus {
    Active,
    Pending,
    Blocked,
    #[default]
    Unknown,
}

impl AccountStatus {
    /// Parse a status string. Unknown values map to `Unknown`, never `Active`.
    pub fn from_str_or_default(s: &str) -> Self {
        match s.trim().to_lowercase().as_str() {
            "active" => AccountStatus::Active,
            "pending" => AccountStatus::Pending,
            "blocked" => AccountStatus::Blocked,
            _ => AccountStatus::Unknown,
        }
    }

    pub fn from_optional(s: Option<&str>) -> Self {
        s.map(Self::from_str_or_default).unwrap_or_default()
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            AccountStatus::Active => "active",
            AccountStatus::Pending => "pending",
            AccountStatus::Blocked => "blocked",
            AccountStatus::Unknown => "unknown",
        }
    }
}

/// Shop registration details kept on merchant profiles.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
#[serde(rename_all = "camelCase")]
pub struct ShopDetails {
    #[serde(default)]
    pub shop_name: String,
    #[serde(default)]
    pub shop_number: String,
    #[serde(default)]
    pub shop_address: String,
    #[serde(default)]
    pub trade_license: String,
}

/// Profile document exactly as the backend returns it from `profile-by-email`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Validate)]
pub struct ProfileRecord {
    #[validate(email(message = "Profile email is not a valid address"))]
    pub email: String,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default, alias = "image", alias = "photoURL")]
    pub photo: Option<String>,
    #[serde(default)]
    pub role: Option<String>,
    #[serde(default, alias = "isVenTech")]
    pub ventech_user: Option<bool>,
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default, rename = "shopDetails")]
    pub shop_details: Option<ShopDetails>,
    #[serde(default, rename = "bloodGroup")]
    pub blood_group: Option<String>,
    #[serde(default)]
    pub district: Option<String>,
    #[serde(default)]
    pub upazila: Option<String>,
}

impl ProfileRecord {
    /// Validate the wire record into a typed profile for `requested_email`.
    ///
    /// A role tag outside the selected taxonomy still yields a profile, with
    /// `role = None`; only structurally broken records are rejected.
    pub fn into_profile(self, requested_email: &str) -> Result<UserProfile, AppError> {
        self.validate().map_err(|errors| {
            let mut err = AppError::from(errors);
            err.kind = AppErrorKind::MalformedProfile;
            err.message = "Profile failed validation".to_string();
            err
        })?;

        if !self.email.trim().eq_ignore_ascii_case(requested_email.trim()) {
            return Err(AppError::malformed(format!(
                "Profile for {} returned for lookup of {}",
                self.email, requested_email
            )));
        }

        let is_ventech = self.ventech_user.unwrap_or(false);
        let role_tag = self
            .role
            .map(|r| r.trim().to_string())
            .filter(|r| !r.is_empty());
        let role = role_tag
            .as_deref()
            .and_then(|tag| Role::parse(tag, is_ventech));

        Ok(UserProfile {
            email: self.email.trim().to_lowercase(),
            name: self.name,
            photo_url: self.photo,
            role,
            role_tag,
            is_ventech,
            status: AccountStatus::from_optional(self.status.as_deref()),
            shop_details: self.shop_details,
            blood_group: self.blood_group,
            district: self.district,
            upazila: self.upazila,
        })
    }
}

/// Validated profile used by every consumer.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct UserProfile {
    pub email: String,
    pub name: Option<String>,
    pub photo_url: Option<String>,
    pub role: Option<Role>,
    /// Tag as stored on the backend, kept for diagnostics when `role` is `None`.
    pub role_tag: Option<String>,
    pub is_ventech: bool,
    pub status: AccountStatus,
    pub shop_details: Option<ShopDetails>,
    pub blood_group: Option<String>,
    pub district: Option<String>,
    pub upazila: Option<String>,
}

/// Blood groups accepted by the donor profile form.
pub const BLOOD_GROUPS: &[&str] = &["A+", "A-", "B+", "B-", "AB+", "AB-", "O+", "O-"];

/// Body of a profile edit sent to `update-profile/{email}`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default, Validate)]
#[serde(rename_all = "camelCase")]
pub struct ProfileUpdate {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[validate(length(min = 1, message = "Name is required"))]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[validate(url(message = "Photo must be a valid URL"))]
    pub photo: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub blood_group: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub district: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub upazila: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub shop_details: Option<ShopDetails>,
}

impl ProfileUpdate {
    /// Run field validation, including the blood-group whitelist.
    pub fn check(&self) -> Result<(), AppError> {
        let mut err = match self.validate() {
            Ok(()) => None,
            Err(errors) => Some(AppError::from(errors)),
        };
        if let Some(group) = &self.blood_group {
            if !BLOOD_GROUPS.contains(&group.as_str()) {
                err.get_or_insert_with(|| {
                    AppError::validation("Validation failed", Default::default())
                })
                .field_errors
                .insert("blood_group".to_string(), "Unknown blood group".to_string());
            }
        }
        match err {
            Some(e) => Err(e),
            None => Ok(()),
        }
    }
}
