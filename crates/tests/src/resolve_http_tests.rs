use pretty_assertions::assert_eq;
use serde_json::json;
use shared_types::{
    select_dashboard, select_links, AppErrorKind, DashboardView, DisplayRole, Identity,
};
use std::time::Duration;

use crate::common::{spawn_backend, Backend};

fn donor(email: &str) -> serde_json::Value {
    json!({ "email": email, "role": "donor", "status": "active" })
}

#[tokio::test]
async fn second_resolve_is_served_from_cache() {
    let backend = spawn_backend(Backend::new().with_profile(donor("d1@x.com"))).await;
    let resolver = backend.resolver();
    let identity = Identity::new("d1@x.com");

    let first = resolver.resolve(Some(&identity)).await;
    let second = resolver.resolve(Some(&identity)).await;

    assert_eq!(first, second);
    assert_eq!(backend.hits(), 1);
}

#[tokio::test]
async fn concurrent_resolves_share_one_request() {
    let backend = spawn_backend(
        Backend::new()
            .with_profile(donor("d1@x.com"))
            .with_delay("d1@x.com", Duration::from_millis(100)),
    )
    .await;
    let resolver = backend.resolver();
    let identity = Identity::new("d1@x.com");

    let (a, b) = tokio::join!(
        resolver.resolve(Some(&identity)),
        resolver.resolve(Some(&identity))
    );

    assert_eq!(a, b);
    assert_eq!(a.display_role, DisplayRole::Donor);
    assert_eq!(backend.hits(), 1);
}

#[tokio::test]
async fn email_case_does_not_split_the_cache() {
    let backend = spawn_backend(Backend::new().with_profile(donor("d1@x.com"))).await;
    let resolver = backend.resolver();

    resolver.resolve(Some(&Identity::new("D1@X.com"))).await;
    let snapshot = resolver.resolve(Some(&Identity::new(" d1@x.com "))).await;

    assert_eq!(snapshot.email.as_deref(), Some("d1@x.com"));
    assert_eq!(backend.hits(), 1);
}

#[tokio::test]
async fn slow_backend_times_out() {
    let backend = spawn_backend(
        Backend::new()
            .with_profile(donor("d1@x.com"))
            .with_delay("d1@x.com", Duration::from_secs(2)),
    )
    .await;
    let resolver = backend.resolver_with(|c| c.api.profile_timeout_ms = 100);

    let snapshot = resolver.resolve(Some(&Identity::new("d1@x.com"))).await;

    assert!(!snapshot.loading);
    assert_eq!(
        snapshot.error.as_ref().map(|e| e.kind),
        Some(AppErrorKind::Timeout)
    );
    assert_eq!(select_dashboard(&snapshot), DashboardView::RedirectToLanding);
}

#[tokio::test]
async fn unknown_email_is_not_found() {
    let backend = spawn_backend(Backend::new()).await;
    let resolver = backend.resolver();

    let snapshot = resolver.resolve(Some(&Identity::new("ghost@x.com"))).await;

    assert_eq!(
        snapshot.error.as_ref().map(|e| e.kind),
        Some(AppErrorKind::NotFound)
    );
    assert!(select_links(&snapshot).is_empty());
}

#[tokio::test]
async fn garbage_body_is_malformed() {
    let backend = spawn_backend(Backend::new().with_raw_body("d1@x.com", "{\"email\": 42")).await;
    let resolver = backend.resolver();

    let snapshot = resolver.resolve(Some(&Identity::new("d1@x.com"))).await;

    assert_eq!(
        snapshot.error.as_ref().map(|e| e.kind),
        Some(AppErrorKind::MalformedProfile)
    );
    assert_eq!(snapshot.role, None);
}

#[tokio::test]
async fn profile_for_another_email_is_malformed() {
    let backend = spawn_backend(Backend::new().with_raw_body(
        "d1@x.com",
        r#"{"email":"someone-else@x.com","role":"admin"}"#,
    ))
    .await;
    let resolver = backend.resolver();

    let snapshot = resolver.resolve(Some(&Identity::new("d1@x.com"))).await;

    assert_eq!(
        snapshot.error.as_ref().map(|e| e.kind),
        Some(AppErrorKind::MalformedProfile)
    );
    assert_eq!(select_dashboard(&snapshot), DashboardView::RedirectToLanding);
}

#[tokio::test]
async fn cross_taxonomy_role_has_no_entitlements() {
    let backend = spawn_backend(Backend::new().with_profile(json!({
        "email": "v1@x.com",
        "role": "volunteer",
        "isVenTech": true,
        "status": "active"
    })))
    .await;
    let resolver = backend.resolver();

    let snapshot = resolver.resolve(Some(&Identity::new("v1@x.com"))).await;

    assert!(snapshot.is_resolved());
    assert_eq!(snapshot.display_role, DisplayRole::Unknown);
    assert_eq!(snapshot.role_tag.as_deref(), Some("volunteer"));
    assert_eq!(
        snapshot.error.as_ref().map(|e| e.kind),
        Some(AppErrorKind::UnknownRoleCombination)
    );
    assert!(select_links(&snapshot).is_empty());
    assert_eq!(select_dashboard(&snapshot), DashboardView::RedirectToLanding);
}

#[tokio::test]
async fn invalidate_forces_a_refetch() {
    let backend = spawn_backend(Backend::new().with_profile(donor("d1@x.com"))).await;
    let resolver = backend.resolver();
    let identity = Identity::new("d1@x.com");

    resolver.resolve(Some(&identity)).await;
    backend.set_profile(json!({ "email": "d1@x.com", "role": "volunteer", "status": "active" }));

    // Still cached.
    let cached = resolver.resolve(Some(&identity)).await;
    assert_eq!(cached.display_role, DisplayRole::Donor);

    resolver.invalidate("d1@x.com");
    let fresh = resolver.resolve(Some(&identity)).await;
    assert_eq!(fresh.display_role, DisplayRole::Volunteer);
    assert_eq!(backend.hits(), 2);
}

#[tokio::test]
async fn expired_cache_entry_is_refetched() {
    let backend = spawn_backend(Backend::new().with_profile(donor("d1@x.com"))).await;
    let resolver = backend.resolver_with(|c| c.api.cache_ttl_secs = Some(0));
    let identity = Identity::new("d1@x.com");

    resolver.resolve(Some(&identity)).await;
    resolver.resolve(Some(&identity)).await;

    assert_eq!(backend.hits(), 2);
}

#[tokio::test]
async fn slower_earlier_lookup_never_overwrites_newer_identity() {
    let backend = spawn_backend(
        Backend::new()
            .with_profile(donor("slow@x.com"))
            .with_delay("slow@x.com", Duration::from_millis(200))
            .with_profile(json!({
                "email": "fast@x.com",
                "role": "admin",
                "status": "active"
            })),
    )
    .await;
    let resolver = backend.resolver();
    let slow = Identity::new("slow@x.com");
    let fast = Identity::new("fast@x.com");

    let (from_slow, from_fast) =
        tokio::join!(resolver.resolve(Some(&slow)), resolver.resolve(Some(&fast)));

    assert_eq!(from_fast.email.as_deref(), Some("fast@x.com"));
    assert_eq!(from_fast.display_role, DisplayRole::Admin);
    // The slow lookup finished last but was superseded.
    assert_eq!(from_slow, from_fast);
    assert_eq!(resolver.snapshot(), from_fast);
}

#[tokio::test]
async fn sign_out_discards_an_in_flight_lookup() {
    let backend = spawn_backend(
        Backend::new()
            .with_profile(donor("d1@x.com"))
            .with_delay("d1@x.com", Duration::from_millis(100)),
    )
    .await;
    let resolver = backend.resolver();
    let identity = Identity::new("d1@x.com");

    let (snapshot, ()) = tokio::join!(resolver.resolve(Some(&identity)), async {
        tokio::time::sleep(Duration::from_millis(20)).await;
        resolver.sign_out();
    });

    assert!(snapshot.loading);
    assert_eq!(snapshot.role, None);
    assert!(resolver.snapshot().loading);
}
