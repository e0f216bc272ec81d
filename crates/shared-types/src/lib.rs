pub mod error;
pub mod feature_flags;

// Profile and entitlement model
pub mod access;
pub mod config;
pub mod entitlement;
pub mod models;
pub mod navigation;

pub use error::*;
pub use feature_flags::*;
pub use models::*;

pub use access::*;
pub use config::*;
pub use entitlement::*;
// navigation exposes many link constants; import them via
// `shared_types::navigation::*` explicitly.
pub use navigation::{links_for_role, select_links, select_links_for, NavEntry, NavLinks};
