use shared_types::{ApiConfig, AppError, ProfileRecord, ProfileUpdate, UserProfile};
use std::future::Future;

/// Backend operations the resolver depends on.
pub trait ProfileApi: Send + Sync + 'static {
    /// Look up and validate the profile stored for `email`.
    fn fetch_profile(
        &self,
        email: &str,
    ) -> impl Future<Output = Result<UserProfile, AppError>> + Send;

    /// Persist a profile edit for `email`.
    fn update_profile(
        &self,
        email: &str,
        update: &ProfileUpdate,
    ) -> impl Future<Output = Result<(), AppError>> + Send;
}

/// `ProfileApi` over the REST backend.
#[derive(Debug, Clone)]
pub struct HttpProfileApi {
    client: reqwest::Client,
    base_url: String,
}

impl HttpProfileApi {
    pub fn new(config: &ApiConfig) -> Self {
        Self {
            client: reqwest::Client::new(),
            base_url: config.base().to_string(),
        }
    }

    fn url(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path)
    }
}

fn transport_error(e: reqwest::Error) -> AppError {
    if e.is_timeout() {
        AppError::timeout(format!("profile request timed out: {}", e))
    } else {
        AppError::fetch_failed(format!("profile request failed: {}", e))
    }
}

/// Decode a `profile-by-email` body. The backend answers `null` for an
/// unknown email, which is reported as `NotFound`.
fn decode_profile(body: &str, email: &str) -> Result<UserProfile, AppError> {
    let record: Option<ProfileRecord> = serde_json::from_str(body)
        .map_err(|e| AppError::malformed(format!("profile body is not valid: {}", e)))?;
    match record {
        Some(record) => record.into_profile(email),
        None => Err(AppError::not_found(format!("no profile for {}", email))),
    }
}

impl ProfileApi for HttpProfileApi {
    #[tracing::instrument(skip(self))]
    async fn fetch_profile(&self, email: &str) -> Result<UserProfile, AppError> {
        let response = self
            .client
            .get(self.url("profile-by-email"))
            .query(&[("email", email)])
            .send()
            .await
            .map_err(transport_error)?;

        let status = response.status();
        if status == reqwest::StatusCode::NOT_FOUND {
            return Err(AppError::not_found(format!("no profile for {}", email)));
        }
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(AppError::fetch_failed(format!(
                "profile API error ({}): {}",
                status, body
            )));
        }

        let body = response.text().await.map_err(transport_error)?;
        decode_profile(&body, email)
    }

    #[tracing::instrument(skip(self, update))]
    async fn update_profile(&self, email: &str, update: &ProfileUpdate) -> Result<(), AppError> {
        let path = format!("update-profile/{}", urlencoding::encode(email));
        let response = self
            .client
            .patch(self.url(&path))
            .json(update)
            .send()
            .await
            .map_err(transport_error)?;

        let status = response.status();
        if status == reqwest::StatusCode::NOT_FOUND {
            return Err(AppError::not_found(format!("no profile for {}", email)));
        }
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(AppError::fetch_failed(format!(
                "profile update error ({}): {}",
                status, body
            )));
        }
        tracing::info!(email = email, "profile updated");
        Ok(())
    }
}
