//! OAuth 2.0 / OIDC error taxonomy.
//!
//! Every validation stage returns a classified error from this module;
//! nothing in the request pipeline propagates an unclassified fault.
//! The pipeline translates errors into either a redirect (when a redirect
//! URI has been resolved) or the domain error page (otherwise); dynamic
//! client registration errors are surfaced directly as HTTP responses.

use serde::Serialize;

/// Errors produced while processing authorization requests and client
/// registrations.
#[derive(Debug, Clone, thiserror::Error)]
pub enum OAuth2Error {
    /// The request is missing a required parameter, includes an invalid
    /// parameter value, includes a parameter more than once, or is
    /// otherwise malformed.
    #[error("Invalid request: {message}")]
    InvalidRequest {
        /// Description of what is malformed.
        message: String,
    },

    /// Client authentication failed (bad client credentials).
    #[error("Invalid client: {message}")]
    InvalidClient {
        /// Description of why the client is invalid.
        message: String,
    },

    /// The client_id does not resolve to a registered client.
    #[error("No client found for client_id {client_id}")]
    UnknownClient {
        /// The unresolvable client identifier.
        client_id: String,
    },

    /// No redirect_uri was supplied and the client has none registered.
    #[error("A redirect_uri must be supplied")]
    RedirectUriRequired,

    /// No redirect_uri was supplied and several are registered.
    #[error("Unable to find suitable redirect_uri, a redirect_uri must be supplied")]
    RedirectUriAmbiguous,

    /// The supplied redirect_uri does not match any registered URI.
    #[error("The redirect_uri MUST match the registered callback URL for this application")]
    RedirectUriMismatch,

    /// The requested scope is empty, unknown, or not allowed for the client.
    #[error("Invalid scope: {message}")]
    InvalidScope {
        /// Description of the offending scope(s).
        message: String,
    },

    /// The resource owner or the authorization server denied the request.
    #[error("Access denied")]
    AccessDenied {
        /// Optional description; absent for the bare `access_denied` case.
        message: Option<String>,
    },

    /// `prompt=none` was requested but no sufficiently fresh session exists.
    #[error("Login required")]
    LoginRequired,

    /// The server does not support the requested response type.
    #[error("Unsupported response type: {response_type}")]
    UnsupportedResponseType {
        /// The unsupported response type value.
        response_type: String,
    },

    /// Dynamic client registration metadata is invalid.
    #[error("Invalid client metadata: {message}")]
    InvalidClientMetadata {
        /// Description of the invalid metadata.
        message: String,
    },

    /// Dynamic client registration redirect_uris are invalid.
    #[error("Invalid redirect uri")]
    InvalidRedirectUri {
        /// Optional description listing the offending URIs.
        message: Option<String>,
    },

    /// An unexpected internal failure (repository fault, ...).
    #[error("Server error: {message}")]
    Server {
        /// Description of the failure.
        message: String,
    },
}

impl OAuth2Error {
    /// Creates a new `InvalidRequest` error.
    #[must_use]
    pub fn invalid_request(message: impl Into<String>) -> Self {
        Self::InvalidRequest {
            message: message.into(),
        }
    }

    /// Creates a new `InvalidClient` error.
    #[must_use]
    pub fn invalid_client(message: impl Into<String>) -> Self {
        Self::InvalidClient {
            message: message.into(),
        }
    }

    /// Creates a new `UnknownClient` error.
    #[must_use]
    pub fn unknown_client(client_id: impl Into<String>) -> Self {
        Self::UnknownClient {
            client_id: client_id.into(),
        }
    }

    /// Creates a new `InvalidScope` error.
    #[must_use]
    pub fn invalid_scope(message: impl Into<String>) -> Self {
        Self::InvalidScope {
            message: message.into(),
        }
    }

    /// Creates a bare `AccessDenied` error without description.
    #[must_use]
    pub fn access_denied() -> Self {
        Self::AccessDenied { message: None }
    }

    /// Creates an `AccessDenied` error with a description.
    #[must_use]
    pub fn access_denied_with(message: impl Into<String>) -> Self {
        Self::AccessDenied {
            message: Some(message.into()),
        }
    }

    /// Creates a new `UnsupportedResponseType` error.
    #[must_use]
    pub fn unsupported_response_type(response_type: impl Into<String>) -> Self {
        Self::UnsupportedResponseType {
            response_type: response_type.into(),
        }
    }

    /// Creates a new `InvalidClientMetadata` error.
    #[must_use]
    pub fn invalid_client_metadata(message: impl Into<String>) -> Self {
        Self::InvalidClientMetadata {
            message: message.into(),
        }
    }

    /// Creates a bare `InvalidRedirectUri` error.
    #[must_use]
    pub fn invalid_redirect_uri() -> Self {
        Self::InvalidRedirectUri { message: None }
    }

    /// Creates an `InvalidRedirectUri` error with a description.
    #[must_use]
    pub fn invalid_redirect_uri_with(message: impl Into<String>) -> Self {
        Self::InvalidRedirectUri {
            message: Some(message.into()),
        }
    }

    /// Creates a new `Server` error.
    #[must_use]
    pub fn server(message: impl Into<String>) -> Self {
        Self::Server {
            message: message.into(),
        }
    }

    /// Returns the OAuth 2.0 `error` parameter value for this error.
    #[must_use]
    pub fn oauth_error_code(&self) -> &'static str {
        match self {
            Self::InvalidRequest { .. }
            | Self::UnknownClient { .. }
            | Self::RedirectUriRequired
            | Self::RedirectUriAmbiguous => "invalid_request",
            Self::InvalidClient { .. } => "invalid_client",
            Self::RedirectUriMismatch => "redirect_uri_mismatch",
            Self::InvalidScope { .. } => "invalid_scope",
            Self::AccessDenied { .. } => "access_denied",
            Self::LoginRequired => "login_required",
            Self::UnsupportedResponseType { .. } => "unsupported_response_type",
            Self::InvalidClientMetadata { .. } => "invalid_client_metadata",
            Self::InvalidRedirectUri { .. } => "invalid_redirect_uri",
            Self::Server { .. } => "server_error",
        }
    }

    /// Returns the `error_description` parameter value, if any.
    #[must_use]
    pub fn error_description(&self) -> Option<String> {
        match self {
            Self::InvalidRequest { message } => Some(message.clone()),
            Self::InvalidClient { message } => Some(message.clone()),
            Self::UnknownClient { client_id } => {
                Some(format!("No client found for client_id {client_id}"))
            }
            Self::RedirectUriRequired => Some("A redirect_uri must be supplied".to_string()),
            Self::RedirectUriAmbiguous => Some(
                "Unable to find suitable redirect_uri, a redirect_uri must be supplied".to_string(),
            ),
            Self::RedirectUriMismatch => Some(
                "The redirect_uri MUST match the registered callback URL for this application"
                    .to_string(),
            ),
            Self::InvalidScope { message } => Some(message.clone()),
            Self::AccessDenied { message } => message.clone(),
            Self::LoginRequired => Some("Login required".to_string()),
            Self::UnsupportedResponseType { response_type } => {
                Some(format!("Unsupported response type: {response_type}"))
            }
            Self::InvalidClientMetadata { message } => Some(message.clone()),
            Self::InvalidRedirectUri { message } => message.clone(),
            Self::Server { message } => Some(message.clone()),
        }
    }

    /// Returns the HTTP status used when the error is surfaced directly
    /// (i.e. not through a redirect).
    #[must_use]
    pub fn http_status(&self) -> u16 {
        match self {
            Self::InvalidClient { .. } => 401,
            Self::AccessDenied { .. } | Self::LoginRequired => 302,
            Self::Server { .. } => 500,
            _ => 400,
        }
    }

    /// Returns `true` for failures of redirect resolution itself, which
    /// must never be delivered to an unverified redirect target.
    #[must_use]
    pub fn is_redirect_resolution_failure(&self) -> bool {
        matches!(
            self,
            Self::RedirectUriRequired | Self::RedirectUriAmbiguous | Self::RedirectUriMismatch
        )
    }
}

/// The JSON error body surfaced directly on HTTP error responses
/// (dynamic client registration failures, where no redirect applies).
#[derive(Debug, Clone, Serialize)]
pub struct ErrorResponse {
    pub error: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error_description: Option<String>,
}

impl From<&OAuth2Error> for ErrorResponse {
    fn from(error: &OAuth2Error) -> Self {
        Self {
            error: error.oauth_error_code(),
            error_description: error.error_description(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_codes() {
        assert_eq!(
            OAuth2Error::invalid_request("x").oauth_error_code(),
            "invalid_request"
        );
        assert_eq!(
            OAuth2Error::unknown_client("c").oauth_error_code(),
            "invalid_request"
        );
        assert_eq!(
            OAuth2Error::RedirectUriMismatch.oauth_error_code(),
            "redirect_uri_mismatch"
        );
        assert_eq!(
            OAuth2Error::access_denied().oauth_error_code(),
            "access_denied"
        );
        assert_eq!(OAuth2Error::LoginRequired.oauth_error_code(), "login_required");
        assert_eq!(
            OAuth2Error::invalid_client_metadata("x").oauth_error_code(),
            "invalid_client_metadata"
        );
    }

    #[test]
    fn test_error_descriptions() {
        assert_eq!(
            OAuth2Error::unknown_client("client-id").error_description(),
            Some("No client found for client_id client-id".to_string())
        );
        assert_eq!(
            OAuth2Error::RedirectUriRequired.error_description(),
            Some("A redirect_uri must be supplied".to_string())
        );
        assert_eq!(OAuth2Error::access_denied().error_description(), None);
        assert_eq!(
            OAuth2Error::access_denied_with("User denied access").error_description(),
            Some("User denied access".to_string())
        );
        assert_eq!(
            OAuth2Error::LoginRequired.error_description(),
            Some("Login required".to_string())
        );
    }

    #[test]
    fn test_http_status() {
        assert_eq!(OAuth2Error::invalid_request("x").http_status(), 400);
        assert_eq!(OAuth2Error::invalid_client("x").http_status(), 401);
        assert_eq!(OAuth2Error::access_denied().http_status(), 302);
        assert_eq!(OAuth2Error::LoginRequired.http_status(), 302);
        assert_eq!(OAuth2Error::server("x").http_status(), 500);
        assert_eq!(OAuth2Error::invalid_redirect_uri().http_status(), 400);
    }

    #[test]
    fn test_error_response_serialization() {
        let body = serde_json::to_string(&ErrorResponse::from(
            &OAuth2Error::invalid_client_metadata(
                "The jwks_uri and jwks parameters MUST NOT be used together.",
            ),
        ))
        .unwrap();
        assert!(body.contains(r#""error":"invalid_client_metadata""#));
        assert!(body.contains("MUST NOT be used together"));

        let body =
            serde_json::to_string(&ErrorResponse::from(&OAuth2Error::invalid_redirect_uri()))
                .unwrap();
        assert_eq!(body, r#"{"error":"invalid_redirect_uri"}"#);
    }

    #[test]
    fn test_redirect_resolution_failures() {
        assert!(OAuth2Error::RedirectUriRequired.is_redirect_resolution_failure());
        assert!(OAuth2Error::RedirectUriAmbiguous.is_redirect_resolution_failure());
        assert!(OAuth2Error::RedirectUriMismatch.is_redirect_resolution_failure());
        assert!(!OAuth2Error::access_denied().is_redirect_resolution_failure());
        assert!(!OAuth2Error::invalid_request("x").is_redirect_resolution_failure());
    }
}
