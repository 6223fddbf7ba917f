//! Authorization request types.
//!
//! [`AuthorizationParams`] wraps the raw, possibly duplicated query
//! parameters as received on the wire; [`AuthorizationRequest`] is the
//! fully validated request the pipeline hands to the flow engine.

use idgate_core::Client;

use crate::error::OAuth2Error;
use crate::oauth::pkce::CodeChallengeMethod;

/// OAuth 2.0 / OIDC response types.
///
/// Multi-valued response types are order-insensitive on the wire
/// (`token id_token` and `id_token token` are the same request); parsing
/// normalizes them to a single variant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ResponseType {
    /// Authorization code flow.
    Code,
    /// Implicit flow, access token only.
    Token,
    /// Implicit flow, ID token only.
    IdToken,
    /// Implicit flow, access token and ID token.
    IdTokenToken,
    /// Hybrid flow, code and ID token.
    CodeIdToken,
    /// Hybrid flow, code and access token.
    CodeToken,
    /// Hybrid flow, code, access token and ID token.
    CodeIdTokenToken,
}

impl ResponseType {
    /// Parses a `response_type` parameter value.
    ///
    /// Returns `None` for anything that is not a known combination of
    /// `code`, `token` and `id_token`.
    #[must_use]
    pub fn parse(value: &str) -> Option<Self> {
        let mut code = false;
        let mut token = false;
        let mut id_token = false;

        for part in value.split_whitespace() {
            match part {
                "code" if !code => code = true,
                "token" if !token => token = true,
                "id_token" if !id_token => id_token = true,
                _ => return None,
            }
        }

        match (code, token, id_token) {
            (true, false, false) => Some(Self::Code),
            (false, true, false) => Some(Self::Token),
            (false, false, true) => Some(Self::IdToken),
            (false, true, true) => Some(Self::IdTokenToken),
            (true, false, true) => Some(Self::CodeIdToken),
            (true, true, false) => Some(Self::CodeToken),
            (true, true, true) => Some(Self::CodeIdTokenToken),
            (false, false, false) => None,
        }
    }

    /// Returns the canonical wire value.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Code => "code",
            Self::Token => "token",
            Self::IdToken => "id_token",
            Self::IdTokenToken => "id_token token",
            Self::CodeIdToken => "code id_token",
            Self::CodeToken => "code token",
            Self::CodeIdTokenToken => "code id_token token",
        }
    }

    /// Returns `true` if this response type issues an authorization code.
    #[must_use]
    pub fn includes_code(&self) -> bool {
        matches!(
            self,
            Self::Code | Self::CodeIdToken | Self::CodeToken | Self::CodeIdTokenToken
        )
    }

    /// Returns `true` if this response type issues an access token.
    #[must_use]
    pub fn includes_token(&self) -> bool {
        matches!(
            self,
            Self::Token | Self::IdTokenToken | Self::CodeToken | Self::CodeIdTokenToken
        )
    }

    /// Returns `true` if this response type issues an ID token.
    #[must_use]
    pub fn includes_id_token(&self) -> bool {
        matches!(
            self,
            Self::IdToken | Self::IdTokenToken | Self::CodeIdToken | Self::CodeIdTokenToken
        )
    }

    /// Returns `true` for the implicit and hybrid variants that carry an
    /// ID token, which require a nonce.
    #[must_use]
    pub fn requires_nonce(&self) -> bool {
        self.includes_id_token()
    }
}

impl std::fmt::Display for ResponseType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// OIDC `prompt` parameter values that alter pipeline behavior.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Prompt {
    /// No interactive prompt may be shown; fail with `login_required`
    /// instead of redirecting to login.
    None,
    /// Force re-authentication even with a live session.
    Login,
    /// Any other prompt value; carried but not acted on here.
    Other,
}

impl Prompt {
    #[must_use]
    pub fn parse(value: &str) -> Self {
        match value {
            "none" => Self::None,
            "login" => Self::Login,
            _ => Self::Other,
        }
    }
}

/// The raw parameter multiset of an inbound authorization request.
///
/// Parameters are kept as received so that duplicates can be detected:
/// per RFC 6749 §3.1, request and response parameters MUST NOT be included
/// more than once.
#[derive(Debug, Clone)]
pub struct AuthorizationParams {
    params: Vec<(String, String)>,
}

impl AuthorizationParams {
    #[must_use]
    pub fn new(params: Vec<(String, String)>) -> Self {
        Self { params }
    }

    /// Returns the single value of `name`, `None` when absent.
    ///
    /// # Errors
    ///
    /// Returns `invalid_request` when the parameter appears more than once.
    pub fn get(&self, name: &str) -> Result<Option<&str>, OAuth2Error> {
        let mut values = self
            .params
            .iter()
            .filter(|(key, _)| key == name)
            .map(|(_, value)| value.as_str());

        let first = values.next();
        if values.next().is_some() {
            return Err(OAuth2Error::invalid_request(format!(
                "Parameter [{name}] is included more than once"
            )));
        }
        Ok(first)
    }
}

impl From<Vec<(String, String)>> for AuthorizationParams {
    fn from(params: Vec<(String, String)>) -> Self {
        Self::new(params)
    }
}

impl From<&[(&str, &str)]> for AuthorizationParams {
    fn from(params: &[(&str, &str)]) -> Self {
        Self::new(
            params
                .iter()
                .map(|(key, value)| (key.to_string(), value.to_string()))
                .collect(),
        )
    }
}

/// A fully validated authorization request.
///
/// Built incrementally by the pipeline; every field is only populated once
/// the corresponding stage has passed. Never persisted — the request is
/// discarded after response construction or error delivery.
#[derive(Debug, Clone)]
pub struct AuthorizationRequest {
    pub response_type: ResponseType,
    pub client_id: String,
    pub client: Client,
    pub redirect_uri: String,
    pub scopes: Vec<String>,
    pub state: Option<String>,
    pub nonce: Option<String>,
    pub prompt: Option<Prompt>,
    pub max_age: Option<u64>,
    pub code_challenge: Option<String>,
    pub code_challenge_method: Option<CodeChallengeMethod>,
    /// Whether the authentication/consent decision approved the request.
    /// Consent collection itself happens outside this core.
    pub approved: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_single_response_types() {
        assert_eq!(ResponseType::parse("code"), Some(ResponseType::Code));
        assert_eq!(ResponseType::parse("token"), Some(ResponseType::Token));
        assert_eq!(ResponseType::parse("id_token"), Some(ResponseType::IdToken));
    }

    #[test]
    fn test_parse_is_order_insensitive() {
        assert_eq!(
            ResponseType::parse("id_token token"),
            Some(ResponseType::IdTokenToken)
        );
        assert_eq!(
            ResponseType::parse("token id_token"),
            Some(ResponseType::IdTokenToken)
        );
        assert_eq!(
            ResponseType::parse("code id_token token"),
            Some(ResponseType::CodeIdTokenToken)
        );
        assert_eq!(
            ResponseType::parse("token id_token code"),
            Some(ResponseType::CodeIdTokenToken)
        );
    }

    #[test]
    fn test_parse_rejects_unknown_and_repeated() {
        assert_eq!(ResponseType::parse(""), None);
        assert_eq!(ResponseType::parse("garbage"), None);
        assert_eq!(ResponseType::parse("code code"), None);
        assert_eq!(ResponseType::parse("code garbage"), None);
    }

    #[test]
    fn test_includes() {
        assert!(ResponseType::Code.includes_code());
        assert!(!ResponseType::Code.includes_token());
        assert!(!ResponseType::Code.includes_id_token());

        assert!(ResponseType::CodeIdTokenToken.includes_code());
        assert!(ResponseType::CodeIdTokenToken.includes_token());
        assert!(ResponseType::CodeIdTokenToken.includes_id_token());
    }

    #[test]
    fn test_requires_nonce() {
        assert!(ResponseType::IdToken.requires_nonce());
        assert!(ResponseType::CodeIdToken.requires_nonce());
        assert!(ResponseType::IdTokenToken.requires_nonce());
        assert!(!ResponseType::Code.requires_nonce());
        assert!(!ResponseType::Token.requires_nonce());
        assert!(!ResponseType::CodeToken.requires_nonce());
    }

    #[test]
    fn test_prompt_parse() {
        assert_eq!(Prompt::parse("none"), Prompt::None);
        assert_eq!(Prompt::parse("login"), Prompt::Login);
        assert_eq!(Prompt::parse("consent"), Prompt::Other);
    }

    #[test]
    fn test_params_single_value() {
        let params = AuthorizationParams::from(
            [("response_type", "code"), ("client_id", "client-id")].as_slice(),
        );
        assert_eq!(params.get("response_type").unwrap(), Some("code"));
        assert_eq!(params.get("state").unwrap(), None);
    }

    #[test]
    fn test_params_duplicate_detection() {
        let params = AuthorizationParams::from(
            [("response_type", "code"), ("response_type", "code")].as_slice(),
        );
        let err = params.get("response_type").unwrap_err();
        assert_eq!(
            err.error_description().unwrap(),
            "Parameter [response_type] is included more than once"
        );
    }
}
