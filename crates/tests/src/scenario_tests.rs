use pretty_assertions::assert_eq;
use serde_json::json;
use shared_types::navigation;
use shared_types::{
    profile_fields, select_dashboard, select_links, AppErrorKind, DashboardBody, DashboardView,
    DisplayRole, Identity, StatusTone, LANDING_ROUTE,
};

use crate::common::{closed_port, resolver_for, spawn_backend, Backend};

#[tokio::test]
async fn donor_gets_donor_dashboard_and_links() {
    let backend = spawn_backend(Backend::new().with_profile(json!({
        "email": "d1@x.com",
        "role": "donor",
        "isVenTech": false,
        "status": "active"
    })))
    .await;
    let resolver = backend.resolver();

    let snapshot = resolver.resolve(Some(&Identity::new("d1@x.com"))).await;

    assert!(!snapshot.loading);
    assert_eq!(snapshot.display_role, DisplayRole::Donor);
    assert_eq!(snapshot.display_role.label(), "Donor");
    assert_eq!(
        select_dashboard(&snapshot),
        DashboardView::Body(DashboardBody::DonorHome)
    );

    let links = select_links(&snapshot);
    assert!(links.power_links.is_empty());
    let general: Vec<_> = links.general_links.iter().map(|e| e.path).collect();
    assert_eq!(
        general,
        vec![
            navigation::DASHBOARD.path,
            navigation::MY_DONATION_REQUESTS.path,
            navigation::CREATE_DONATION_REQUEST.path,
            navigation::PROFILE.path,
        ]
    );
    assert_eq!(resolver.snapshot(), snapshot);
}

#[tokio::test]
async fn pending_merchant_sees_shop_fields() {
    let backend = spawn_backend(Backend::new().with_profile(json!({
        "email": "m1@x.com",
        "name": "Karim",
        "role": "merchant",
        "isVenTech": true,
        "status": "pending",
        "shopDetails": {
            "shopName": "Karim Electronics",
            "shopNumber": "12",
            "shopAddress": "Mirpur 10",
            "tradeLicense": "TL-9"
        }
    })))
    .await;
    let resolver = backend.resolver();

    let snapshot = resolver.resolve(Some(&Identity::new("m1@x.com"))).await;

    assert_eq!(snapshot.display_role.label(), "Merchant");
    assert_eq!(snapshot.status_tone(), StatusTone::Cautionary);
    assert_eq!(snapshot.is_ventech, Some(true));

    let fields = profile_fields(&snapshot);
    assert!(fields.editable);
    assert!(fields.show_shop_fields);
    assert!(!fields.show_donor_fields);

    let shop = snapshot
        .profile
        .as_ref()
        .and_then(|p| p.shop_details.clone())
        .unwrap();
    assert_eq!(shop.shop_name, "Karim Electronics");
    assert_eq!(
        select_dashboard(&snapshot),
        DashboardView::Body(DashboardBody::MerchantHome)
    );
}

#[tokio::test]
async fn network_failure_redirects_to_landing() {
    let addr = closed_port().await;
    let resolver = resolver_for(&format!("http://{}", addr), |_| {});

    let snapshot = resolver.resolve(Some(&Identity::new("d1@x.com"))).await;

    assert!(!snapshot.loading);
    assert_eq!(snapshot.role, None);
    assert_eq!(
        snapshot.error.as_ref().map(|e| e.kind),
        Some(AppErrorKind::ProfileFetchFailed)
    );
    assert_eq!(select_dashboard(&snapshot), DashboardView::RedirectToLanding);
    assert_eq!(LANDING_ROUTE, "/");

    let links = select_links(&snapshot);
    assert!(links.power_links.is_empty());
    assert!(links.is_empty());
}
