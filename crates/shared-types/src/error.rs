use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;

/// Categorization of resolution and profile errors.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum AppErrorKind {
    NotAuthenticated,
    NotFound,
    ProfileFetchFailed,
    Timeout,
    MalformedProfile,
    UnknownRoleCombination,
    ValidationError,
}

impl fmt::Display for AppErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AppErrorKind::NotAuthenticated => write!(f, "NotAuthenticated"),
            AppErrorKind::NotFound => write!(f, "NotFound"),
            AppErrorKind::ProfileFetchFailed => write!(f, "ProfileFetchFailed"),
            AppErrorKind::Timeout => write!(f, "Timeout"),
            AppErrorKind::MalformedProfile => write!(f, "MalformedProfile"),
            AppErrorKind::UnknownRoleCombination => write!(f, "UnknownRoleCombination"),
            AppErrorKind::ValidationError => write!(f, "ValidationError"),
        }
    }
}

/// Structured error shared by the resolver, the selectors and the UI.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct AppError {
    pub kind: AppErrorKind,
    pub message: String,
    #[serde(default, skip_serializing_if = "HashMap::is_empty")]
    pub field_errors: HashMap<String, String>,
}

impl AppError {
    fn new(kind: AppErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
            field_errors: HashMap::new(),
        }
    }

    pub fn not_authenticated(message: impl Into<String>) -> Self {
        Self::new(AppErrorKind::NotAuthenticated, message)
    }

    pub fn not_found(message: impl Into<String>) -> Self {
        Self::new(AppErrorKind::NotFound, message)
    }

    pub fn fetch_failed(message: impl Into<String>) -> Self {
        Self::new(AppErrorKind::ProfileFetchFailed, message)
    }

    pub fn timeout(message: impl Into<String>) -> Self {
        Self::new(AppErrorKind::Timeout, message)
    }

    pub fn malformed(message: impl Into<String>) -> Self {
        Self::new(AppErrorKind::MalformedProfile, message)
    }

    pub fn unknown_role(message: impl Into<String>) -> Self {
        Self::new(AppErrorKind::UnknownRoleCombination, message)
    }

    pub fn validation(message: impl Into<String>, field_errors: HashMap<String, String>) -> Self {
        Self {
            kind: AppErrorKind::ValidationError,
            message: message.into(),
            field_errors,
        }
    }

    /// True for errors that came from talking to the backend, as opposed to
    /// errors about what the backend returned.
    pub fn is_transport(&self) -> bool {
        matches!(
            self.kind,
            AppErrorKind::ProfileFetchFailed | AppErrorKind::Timeout | AppErrorKind::NotFound
        )
    }

    /// Text suitable for showing to the signed-in user.
    pub fn friendly_message(&self) -> String {
        match self.kind {
            AppErrorKind::NotAuthenticated => "Please sign in to continue.".to_string(),
            AppErrorKind::NotFound => "We couldn't find a profile for this account.".to_string(),
            AppErrorKind::ProfileFetchFailed | AppErrorKind::Timeout => {
                "We couldn't load your profile. Please try again.".to_string()
            }
            AppErrorKind::MalformedProfile => {
                "Your profile data looks incomplete. Please contact support.".to_string()
            }
            AppErrorKind::UnknownRoleCombination => {
                "Your account has no dashboard access yet.".to_string()
            }
            AppErrorKind::ValidationError => self.message.clone(),
        }
    }
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.kind, self.message)
    }
}

impl std::error::Error for AppError {}

impl From<validator::ValidationErrors> for AppError {
    fn from(errors: validator::ValidationErrors) -> Self {
        let mut field_errors = HashMap::new();
        for (field, errs) in errors.field_errors() {
            if let Some(first) = errs.first() {
                let msg = first
                    .message
                    .as_ref()
                    .map(|m| m.to_string())
                    .unwrap_or_else(|| format!("Invalid value for {}", field));
                field_errors.insert(field.to_string(), msg);
            }
        }
        AppError::validation("Validation failed", field_errors)
    }
}
