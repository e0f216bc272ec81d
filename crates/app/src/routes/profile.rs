use crate::auth::{
    use_auth, use_entitlements, use_profile_fields, use_resolver, EntitlementState,
};
use crate::routes::SectionGuard;
use dioxus::prelude::*;
use shared_types::navigation;
use shared_types::{ProfileFields, ProfileUpdate, ShopDetails, UserProfile, BLOOD_GROUPS};
use shared_ui::{Card, CardContent, CardDescription, CardHeader, CardTitle, PageHeader, PageTitle};
use std::collections::HashMap;

/// Profile page. Every role may open it; the form shape depends on the role.
#[component]
pub fn Profile() -> Element {
    rsx! {
        SectionGuard { path: navigation::PROFILE.path.to_string(),
            ProfileBody {}
        }
    }
}

#[component]
fn ProfileBody() -> Element {
    let snapshot = use_entitlements();
    let fields = use_profile_fields();

    match snapshot.profile {
        Some(profile) => rsx! {
            PageHeader {
                PageTitle { "My Profile" }
            }
            ProfileForm { profile, fields }
        },
        None => rsx! {},
    }
}

/// Trimmed field value, `None` when blank.
fn non_blank(value: String) -> Option<String> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_string())
    }
}

/// Build the edit request from the form values, leaving out groups the
/// role does not see.
fn build_update(
    fields: ProfileFields,
    name: String,
    photo: String,
    donor: (String, String, String),
    shop: ShopDetails,
) -> ProfileUpdate {
    let (blood_group, district, upazila) = donor;
    let mut update = ProfileUpdate {
        name: Some(name.trim().to_string()),
        photo: non_blank(photo),
        ..ProfileUpdate::default()
    };
    if fields.show_donor_fields {
        update.blood_group = non_blank(blood_group);
        update.district = non_blank(district);
        update.upazila = non_blank(upazila);
    }
    if fields.show_shop_fields {
        update.shop_details = Some(shop);
    }
    update
}

#[component]
fn ProfileForm(profile: UserProfile, fields: ProfileFields) -> Element {
    let auth = use_auth();
    let resolver = use_resolver();
    let mut entitlements = use_context::<EntitlementState>();

    let mut name = use_signal(|| profile.name.clone().unwrap_or_default());
    let mut photo = use_signal(|| profile.photo_url.clone().unwrap_or_default());
    let mut blood_group = use_signal(|| profile.blood_group.clone().unwrap_or_default());
    let mut district = use_signal(|| profile.district.clone().unwrap_or_default());
    let mut upazila = use_signal(|| profile.upazila.clone().unwrap_or_default());
    let shop = profile.shop_details.clone().unwrap_or_default();
    let mut shop_name = use_signal(|| shop.shop_name.clone());
    let mut shop_number = use_signal(|| shop.shop_number.clone());
    let mut shop_address = use_signal(|| shop.shop_address.clone());
    let mut trade_license = use_signal(|| shop.trade_license.clone());

    let mut error_msg = use_signal(|| Option::<String>::None);
    let mut notice = use_signal(|| Option::<String>::None);
    let mut field_errors = use_signal(HashMap::<String, String>::new);
    let mut saving = use_signal(|| false);

    let handle_save = move |evt: FormEvent| {
        let resolver = resolver.clone();
        async move {
            evt.prevent_default();
            saving.set(true);
            error_msg.set(None);
            notice.set(None);
            field_errors.set(HashMap::new());

            let update = build_update(
                fields,
                name(),
                photo(),
                (blood_group(), district(), upazila()),
                ShopDetails {
                    shop_name: shop_name(),
                    shop_number: shop_number(),
                    shop_address: shop_address(),
                    trade_license: trade_license(),
                },
            );
            let identity = auth.current_identity.read().clone();

            match resolver.update_profile(identity.as_ref(), &update).await {
                Ok(_) => {
                    entitlements.snapshot.restart();
                    notice.set(Some("Profile updated.".to_string()));
                }
                Err(err) => {
                    tracing::warn!(kind = %err.kind, "profile update failed: {}", err.message);
                    field_errors.set(err.field_errors.clone());
                    error_msg.set(Some(err.friendly_message()));
                }
            }
            saving.set(false);
        }
    };

    let field_error = move |key: &str| field_errors.read().get(key).cloned();
    let email = profile.email.clone();

    rsx! {
        form { class: "profile-form", onsubmit: handle_save,
            Card {
                CardHeader {
                    CardTitle { "Account" }
                    CardDescription { "{email}" }
                }
                CardContent {
                    label { r#for: "name", "Name" }
                    input {
                        id: "name",
                        value: "{name}",
                        disabled: !fields.editable,
                        oninput: move |e| name.set(e.value()),
                    }
                    if let Some(msg) = field_error("name") {
                        p { class: "field-error", "{msg}" }
                    }

                    label { r#for: "photo", "Photo URL" }
                    input {
                        id: "photo",
                        value: "{photo}",
                        disabled: !fields.editable,
                        oninput: move |e| photo.set(e.value()),
                    }
                    if let Some(msg) = field_error("photo") {
                        p { class: "field-error", "{msg}" }
                    }
                }
            }

            if fields.show_donor_fields {
                Card {
                    CardHeader {
                        CardTitle { "Donor details" }
                    }
                    CardContent {
                        label { r#for: "blood_group", "Blood group" }
                        select {
                            id: "blood_group",
                            value: "{blood_group}",
                            onchange: move |e| blood_group.set(e.value()),
                            option { value: "", "Select" }
                            for group in BLOOD_GROUPS.iter() {
                                option { key: "{group}", value: "{group}", "{group}" }
                            }
                        }
                        if let Some(msg) = field_error("blood_group") {
                            p { class: "field-error", "{msg}" }
                        }

                        label { r#for: "district", "District" }
                        input {
                            id: "district",
                            value: "{district}",
                            oninput: move |e| district.set(e.value()),
                        }

                        label { r#for: "upazila", "Upazila" }
                        input {
                            id: "upazila",
                            value: "{upazila}",
                            oninput: move |e| upazila.set(e.value()),
                        }
                    }
                }
            }

            if fields.show_shop_fields {
                Card {
                    CardHeader {
                        CardTitle { "Shop details" }
                    }
                    CardContent {
                        label { r#for: "shop_name", "Shop name" }
                        input {
                            id: "shop_name",
                            value: "{shop_name}",
                            oninput: move |e| shop_name.set(e.value()),
                        }
                        label { r#for: "shop_number", "Shop number" }
                        input {
                            id: "shop_number",
                            value: "{shop_number}",
                            oninput: move |e| shop_number.set(e.value()),
                        }
                        label { r#for: "shop_address", "Shop address" }
                        input {
                            id: "shop_address",
                            value: "{shop_address}",
                            oninput: move |e| shop_address.set(e.value()),
                        }
                        label { r#for: "trade_license", "Trade license" }
                        input {
                            id: "trade_license",
                            value: "{trade_license}",
                            oninput: move |e| trade_license.set(e.value()),
                        }
                    }
                }
            }

            if let Some(msg) = error_msg() {
                p { class: "form-error", "{msg}" }
            }
            if let Some(msg) = notice() {
                p { class: "form-notice", "{msg}" }
            }

            if fields.editable {
                button {
                    r#type: "submit",
                    class: "button-primary",
                    disabled: saving(),
                    if saving() { "Saving..." } else { "Save changes" }
                }
            }
        }
    }
}
