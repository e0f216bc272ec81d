use serde::{Deserialize, Serialize};

/// Deployment-level switches.
///
/// Every field defaults to `false`, so a missing or incomplete config file
/// yields the BloodAid blood-donation deployment.
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
pub struct FeatureFlags {
    /// The deployment runs the marketplace taxonomy and branding.
    #[serde(default)]
    pub marketplace: bool,
}

impl FeatureFlags {
    pub fn brand_name(&self) -> &'static str {
        if self.marketplace {
            "VenTech"
        } else {
            "BloodAid"
        }
    }
}
