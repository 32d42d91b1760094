//! Error types for Azure Resource Manager operations.

use std::path::PathBuf;

use thiserror::Error;

/// Errors that can occur during ARM operations.
#[derive(Debug, Error)]
pub enum ArmError {
    /// Configuration is missing or incomplete.
    #[error("Azure configuration required: {0}")]
    ConfigMissing(String),

    /// A required argument (path segment, name) was empty or malformed.
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    /// The identity provider rejected a token request.
    #[error("Authentication failed: {message}")]
    Authentication {
        message: String,
        status_code: Option<u16>,
    },

    /// A file of the Azure CLI credential cache does not exist.
    #[error("Cannot find {}", .0.display())]
    CacheFileMissing(PathBuf),

    /// No subscription in the CLI profile is flagged as default.
    #[error("Default subscription not found in {}", .0.display())]
    NoDefaultSubscription(PathBuf),

    /// No subscription in the CLI profile has the requested name.
    #[error("Subscription '{0}' not found in the Azure CLI profile")]
    SubscriptionNotFound(String),

    /// Every cached token for the active account has expired.
    #[error("No unexpired token cached for '{user}', run 'az login'")]
    TokenExpired { user: String },

    /// The CLI credential cache could not be understood.
    #[error("Malformed Azure CLI cache: {0}")]
    MalformedCache(String),

    /// The resource manager returned an error body.
    #[error("ARM API error{}: {message}", .code.as_deref().map(|c| format!(" ({c})")).unwrap_or_default())]
    Api {
        code: Option<String>,
        message: String,
        status_code: Option<u16>,
    },

    /// HTTP transport error.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// JSON parsing error.
    #[error("Failed to parse response: {0}")]
    Parse(#[from] serde_json::Error),

    /// URL parsing error.
    #[error("Invalid URL: {0}")]
    Url(#[from] url::ParseError),

    /// Local file I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl ArmError {
    /// Build an [`ArmError::Api`] from an ARM error body, if it is one.
    ///
    /// ARM reports failures as `{"error": {"code": "...", "message": "..."}}`.
    pub(crate) fn from_error_body(body: &serde_json::Value, status_code: Option<u16>) -> Option<Self> {
        let error = body.get("error")?;
        let code = error.get("code").and_then(|c| c.as_str()).map(str::to_string);
        let message = error
            .get("message")
            .and_then(|m| m.as_str())
            .map(str::to_string)
            .unwrap_or_else(|| error.to_string());
        Some(ArmError::Api {
            code,
            message,
            status_code,
        })
    }
}

/// Result type alias for ARM operations.
pub type Result<T> = core::result::Result<T, ArmError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_body_is_recognised() {
        let body = serde_json::json!({
            "error": {"code": "ResourceGroupNotFound", "message": "Resource group 'rg' could not be found."}
        });
        let err = ArmError::from_error_body(&body, Some(404)).unwrap();
        match err {
            ArmError::Api {
                code,
                message,
                status_code,
            } => {
                assert_eq!(code.as_deref(), Some("ResourceGroupNotFound"));
                assert!(message.contains("could not be found"));
                assert_eq!(status_code, Some(404));
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_non_error_body_is_ignored() {
        let body = serde_json::json!({"value": []});
        assert!(ArmError::from_error_body(&body, None).is_none());
    }

    #[test]
    fn test_api_error_display_includes_code() {
        let err = ArmError::Api {
            code: Some("AuthorizationFailed".to_string()),
            message: "no access".to_string(),
            status_code: Some(403),
        };
        assert_eq!(err.to_string(), "ARM API error (AuthorizationFailed): no access");
    }
}
