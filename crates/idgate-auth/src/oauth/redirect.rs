//! Redirect target resolution and response delivery.
//!
//! Resolves the effective redirect URI for a client/request pair, selects
//! the delivery channel (query string vs. URI fragment) from the response
//! type, and builds the final `Location` values for both successful and
//! failed requests. Redirect resolution failures never reach an unverified
//! target: they are delivered to the domain error page instead.

use url::Url;
use url::form_urlencoded::Serializer;

use idgate_core::{Client, Domain};

use crate::error::OAuth2Error;
use crate::oauth::request::ResponseType;

/// How response parameters travel back to the client.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeliveryChannel {
    /// Parameters appended to the query string (`?code=...`).
    Query,
    /// Parameters carried in the URI fragment (`#access_token=...`).
    Fragment,
}

impl DeliveryChannel {
    /// Selects the channel for a response type.
    ///
    /// `code` alone delivers via query string; any response type carrying
    /// `token` or `id_token` delivers via fragment. The same selection
    /// applies to success and error delivery.
    #[must_use]
    pub fn for_response_type(response_type: ResponseType) -> Self {
        if response_type.includes_token() || response_type.includes_id_token() {
            Self::Fragment
        } else {
            Self::Query
        }
    }
}

/// A verified redirect target together with its delivery channel and the
/// state to echo back.
#[derive(Debug, Clone)]
pub struct ResolvedRedirect {
    pub uri: String,
    pub channel: DeliveryChannel,
    pub state: Option<String>,
}

impl ResolvedRedirect {
    /// Appends the given parameters to the redirect target on the resolved
    /// channel, echoing `state` last when present.
    ///
    /// # Errors
    ///
    /// Returns a server error if the stored redirect URI does not parse;
    /// resolution guarantees it came from the client registration, so this
    /// only fires on a corrupt registration.
    pub fn location(&self, params: &[(String, String)]) -> Result<String, OAuth2Error> {
        let mut url = Url::parse(&self.uri)
            .map_err(|err| OAuth2Error::server(format!("Invalid redirect_uri: {err}")))?;

        let mut pairs: Vec<(&str, &str)> = params
            .iter()
            .map(|(key, value)| (key.as_str(), value.as_str()))
            .collect();
        if let Some(state) = &self.state {
            pairs.push(("state", state.as_str()));
        }

        match self.channel {
            DeliveryChannel::Query => {
                let mut query = url.query_pairs_mut();
                for (key, value) in pairs {
                    query.append_pair(key, value);
                }
            }
            DeliveryChannel::Fragment => {
                let mut serializer = Serializer::new(String::new());
                for (key, value) in pairs {
                    serializer.append_pair(key, value);
                }
                url.set_fragment(Some(&serializer.finish()));
            }
        }

        Ok(url.to_string())
    }

    /// Builds the error `Location` for a classified failure.
    ///
    /// # Errors
    ///
    /// Returns a server error if the stored redirect URI does not parse.
    pub fn error_location(&self, error: &OAuth2Error) -> Result<String, OAuth2Error> {
        let mut params = vec![("error".to_string(), error.oauth_error_code().to_string())];
        if let Some(description) = error.error_description() {
            params.push(("error_description".to_string(), description));
        }
        self.location(&params)
    }
}

/// Resolves the effective redirect target for a client/request pair.
///
/// - No `redirect_uri` supplied: succeeds only when the client has exactly
///   one registered redirect URI.
/// - Supplied: succeeds only on an exact string match against a registered
///   URI.
///
/// # Errors
///
/// `RedirectUriRequired` when nothing is registered, `RedirectUriAmbiguous`
/// when several are registered and none was requested,
/// `RedirectUriMismatch` when the requested URI matches nothing.
pub fn resolve_redirect_uri(
    client: &Client,
    requested: Option<&str>,
) -> Result<String, OAuth2Error> {
    match requested {
        Some(uri) => {
            if client.is_redirect_uri_registered(uri) {
                Ok(uri.to_string())
            } else {
                Err(OAuth2Error::RedirectUriMismatch)
            }
        }
        None => match client.redirect_uris.as_slice() {
            [] => Err(OAuth2Error::RedirectUriRequired),
            [single] => Ok(single.clone()),
            _ => Err(OAuth2Error::RedirectUriAmbiguous),
        },
    }
}

/// Builds the domain error page `Location` for failures with no usable
/// redirect target.
#[must_use]
pub fn error_page_location(domain: &Domain, error: &OAuth2Error) -> String {
    let mut serializer = Serializer::new(String::new());
    serializer.append_pair("error", error.oauth_error_code());
    if let Some(description) = error.error_description() {
        serializer.append_pair("error_description", &description);
    }
    format!(
        "{}?{}",
        domain.endpoint_path("/oauth/error"),
        serializer.finish()
    )
}
