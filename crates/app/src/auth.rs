use dioxus::prelude::*;
use resolver::HttpRoleResolver;
use shared_types::{
    guard_path, profile_fields, select_dashboard, select_links, DashboardView,
    EntitlementSnapshot, GuardDecision, Identity, NavLinks, ProfileFields,
};

/// Global authentication state. Holds only the identity from the sign-in
/// provider; roles come from the resolver.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct AuthState {
    pub current_identity: Signal<Option<Identity>>,
}

impl AuthState {
    pub fn new() -> Self {
        Self {
            current_identity: Signal::new(None),
        }
    }

    pub fn is_authenticated(&self) -> bool {
        self.current_identity.read().is_some()
    }

    pub fn sign_in(&mut self, identity: Identity) {
        self.current_identity.set(Some(identity));
    }

    pub fn clear_auth(&mut self) {
        self.current_identity.set(None);
    }
}

/// Resolved entitlements for the current identity.
#[derive(Clone, Copy)]
pub struct EntitlementState {
    pub snapshot: Resource<EntitlementSnapshot>,
}

/// Hook to access auth state.
pub fn use_auth() -> AuthState {
    use_context::<AuthState>()
}

/// Hook to access the shared role resolver.
pub fn use_resolver() -> HttpRoleResolver {
    use_context::<HttpRoleResolver>()
}

/// Sign out of both the identity provider stand-in and the resolver.
pub fn use_sign_out() -> impl FnMut() + Clone {
    let mut auth = use_auth();
    let resolver = use_resolver();
    move || {
        resolver.sign_out();
        auth.clear_auth();
    }
}

/// Reconcile the last resolved snapshot with the identity that is signed in
/// right now.
///
/// While the resource re-runs after an identity change it still holds the
/// previous user's snapshot; that must never be shown for the new identity.
pub fn current_snapshot(
    resolved: Option<EntitlementSnapshot>,
    identity: Option<&Identity>,
) -> EntitlementSnapshot {
    let Some(key) = identity.and_then(Identity::lookup_key) else {
        return EntitlementSnapshot::loading();
    };
    match resolved {
        Some(snapshot) if snapshot.email.as_deref() == Some(key.as_str()) => snapshot,
        _ => EntitlementSnapshot::pending(key),
    }
}

/// Snapshot for the signed-in identity, reactive to both the identity and
/// the resolver resource.
pub fn use_entitlements() -> EntitlementSnapshot {
    let auth = use_auth();
    let state = use_context::<EntitlementState>();
    let resolved = state.snapshot.read().clone();
    let identity = auth.current_identity.read().clone();
    current_snapshot(resolved, identity.as_ref())
}

/// Sidebar links for the current user.
pub fn use_nav_links() -> NavLinks {
    select_links(&use_entitlements())
}

/// Which dashboard body the current user gets.
pub fn use_dashboard_view() -> DashboardView {
    select_dashboard(&use_entitlements())
}

pub fn use_profile_fields() -> ProfileFields {
    profile_fields(&use_entitlements())
}

/// Guard decision for a dashboard path.
pub fn use_guard(path: &str) -> GuardDecision {
    guard_path(&use_entitlements(), path)
}
