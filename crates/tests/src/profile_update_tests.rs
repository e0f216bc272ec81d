use pretty_assertions::assert_eq;
use serde_json::json;
use shared_types::{AppErrorKind, Identity, ProfileUpdate, ShopDetails};

use crate::common::{spawn_backend, Backend};

#[tokio::test]
async fn donor_edit_is_sent_and_refetched() {
    let backend = spawn_backend(Backend::new().with_profile(json!({
        "email": "d1@x.com",
        "name": "Rahim",
        "role": "donor",
        "status": "active",
        "bloodGroup": "A+"
    })))
    .await;
    let resolver = backend.resolver();
    let identity = Identity::new("d1@x.com");
    resolver.resolve(Some(&identity)).await;

    let update = ProfileUpdate {
        name: Some("Rahim Uddin".to_string()),
        blood_group: Some("O-".to_string()),
        district: Some("Dhaka".to_string()),
        ..ProfileUpdate::default()
    };
    let snapshot = resolver
        .update_profile(Some(&identity), &update)
        .await
        .unwrap();

    let profile = snapshot.profile.unwrap();
    assert_eq!(profile.name.as_deref(), Some("Rahim Uddin"));
    assert_eq!(profile.blood_group.as_deref(), Some("O-"));
    assert_eq!(profile.district.as_deref(), Some("Dhaka"));
    // Initial lookup plus the refetch after the edit.
    assert_eq!(backend.hits(), 2);

    let updates = backend.updates();
    assert_eq!(updates.len(), 1);
    assert_eq!(updates[0].0, "d1@x.com");
    assert_eq!(
        updates[0].1,
        json!({ "name": "Rahim Uddin", "bloodGroup": "O-", "district": "Dhaka" })
    );
}

#[tokio::test]
async fn merchant_shop_details_round_through_backend() {
    let backend = spawn_backend(Backend::new().with_profile(json!({
        "email": "m1@x.com",
        "role": "merchant",
        "isVenTech": true,
        "status": "pending"
    })))
    .await;
    let resolver = backend.resolver();
    let identity = Identity::new("m1@x.com");

    let shop = ShopDetails {
        shop_name: "Karim Electronics".to_string(),
        shop_number: "12".to_string(),
        shop_address: "Mirpur 10".to_string(),
        trade_license: "TL-9".to_string(),
    };
    let update = ProfileUpdate {
        shop_details: Some(shop.clone()),
        ..ProfileUpdate::default()
    };
    let snapshot = resolver
        .update_profile(Some(&identity), &update)
        .await
        .unwrap();

    assert_eq!(
        snapshot.profile.and_then(|p| p.shop_details),
        Some(shop)
    );
}

#[tokio::test]
async fn invalid_edit_never_reaches_backend() {
    let backend = spawn_backend(Backend::new().with_profile(json!({
        "email": "d1@x.com",
        "role": "donor",
        "status": "active"
    })))
    .await;
    let resolver = backend.resolver();

    let update = ProfileUpdate {
        blood_group: Some("Z+".to_string()),
        ..ProfileUpdate::default()
    };
    let err = resolver
        .update_profile(Some(&Identity::new("d1@x.com")), &update)
        .await
        .unwrap_err();

    assert_eq!(err.kind, AppErrorKind::ValidationError);
    assert!(err.field_errors.contains_key("blood_group"));
    assert!(backend.updates().is_empty());
}

#[tokio::test]
async fn edit_without_identity_is_rejected() {
    let backend = spawn_backend(Backend::new()).await;
    let resolver = backend.resolver();

    let err = resolver
        .update_profile(None, &ProfileUpdate::default())
        .await
        .unwrap_err();

    assert_eq!(err.kind, AppErrorKind::NotAuthenticated);
    assert!(backend.updates().is_empty());
}

#[tokio::test]
async fn edit_for_missing_profile_is_not_found() {
    let backend = spawn_backend(Backend::new()).await;
    let resolver = backend.resolver();

    let update = ProfileUpdate {
        name: Some("Ghost".to_string()),
        ..ProfileUpdate::default()
    };
    let err = resolver
        .update_profile(Some(&Identity::new("ghost@x.com")), &update)
        .await
        .unwrap_err();

    assert_eq!(err.kind, AppErrorKind::NotFound);
}
