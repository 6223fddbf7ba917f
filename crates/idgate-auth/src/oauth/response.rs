//! Authorization response variants.
//!
//! The flow engine selects the variant; serialization to the redirect is
//! variant-agnostic — every variant yields its ordered key/value pairs and
//! the redirect builder does the rest, so new variants never touch the
//! delivery code.

use std::collections::BTreeMap;

/// An access token as delivered on the implicit and hybrid channels.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AccessToken {
    /// The token value.
    pub value: String,

    /// Token type; always `bearer` here.
    pub token_type: String,

    /// Remaining lifetime in seconds.
    pub expires_in: u64,

    /// Additional response members attached to the token (e.g. `id_token`
    /// on the `code id_token token` response).
    pub additional_information: BTreeMap<String, String>,
}

impl AccessToken {
    /// Creates a bearer token with the given value and lifetime.
    #[must_use]
    pub fn bearer(value: impl Into<String>, expires_in: u64) -> Self {
        Self {
            value: value.into(),
            token_type: "bearer".to_string(),
            expires_in,
            additional_information: BTreeMap::new(),
        }
    }

    /// Attaches an additional response member.
    #[must_use]
    pub fn with_additional_information(
        mut self,
        key: impl Into<String>,
        value: impl Into<String>,
    ) -> Self {
        self.additional_information.insert(key.into(), value.into());
        self
    }

    /// Appends this token's response parameters in wire order.
    fn append_params(&self, params: &mut Vec<(String, String)>) {
        params.push(("access_token".to_string(), self.value.clone()));
        params.push(("token_type".to_string(), self.token_type.clone()));
        params.push(("expires_in".to_string(), self.expires_in.to_string()));
        for (key, value) in &self.additional_information {
            params.push((key.clone(), value.clone()));
        }
    }
}

/// The response to a successful authorization request.
///
/// Exactly one variant is constructed per request; the variant set mirrors
/// the response-type state machine (`code`, implicit, `id_token`, hybrid).
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AuthorizationResponse {
    /// `response_type=code`.
    AuthorizationCode { code: String },

    /// `response_type=token` and `token id_token` (ID token travels as
    /// additional token information).
    Implicit { access_token: AccessToken },

    /// `response_type=id_token`.
    IdToken { id_token: String },

    /// The hybrid variants: `code` plus the requested subset of access
    /// token and ID token.
    Hybrid {
        code: String,
        access_token: Option<AccessToken>,
        id_token: Option<String>,
    },
}

impl AuthorizationResponse {
    /// Yields the ordered response parameters for the delivery channel.
    #[must_use]
    pub fn params(&self) -> Vec<(String, String)> {
        let mut params = Vec::new();
        match self {
            Self::AuthorizationCode { code } => {
                params.push(("code".to_string(), code.clone()));
            }
            Self::Implicit { access_token } => {
                access_token.append_params(&mut params);
            }
            Self::IdToken { id_token } => {
                params.push(("id_token".to_string(), id_token.clone()));
            }
            Self::Hybrid {
                code,
                access_token,
                id_token,
            } => {
                params.push(("code".to_string(), code.clone()));
                if let Some(access_token) = access_token {
                    access_token.append_params(&mut params);
                }
                if let Some(id_token) = id_token {
                    params.push(("id_token".to_string(), id_token.clone()));
                }
            }
        }
        params
    }
}
