//! The authorization endpoint service.
//!
//! Ties the validation pipeline, the flow engine and the redirect builder
//! together: raw query parameters and the current principal go in, the
//! final `302 Found` `Location` value comes out. The HTTP server layer
//! hosting this service is an external collaborator.
//!
//! Error delivery follows the OAuth 2.0 / OIDC rules exactly: once a
//! redirect target has been resolved, classified failures are delivered to
//! it on the channel selected by the response type; failures before (or of)
//! redirect resolution go to the domain error page, never to an unverified
//! target.

use idgate_core::Domain;

use crate::error::OAuth2Error;
use crate::oauth::flow::FlowEngine;
use crate::oauth::pipeline::AuthorizationPipeline;
use crate::oauth::redirect::{DeliveryChannel, ResolvedRedirect, error_page_location};
use crate::oauth::request::AuthorizationParams;
use crate::principal::UserPrincipal;

/// The outcome of an authorization request: where to send the user agent.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Redirect {
    /// Value of the `Location` header on the `302 Found` response.
    pub location: String,
}

impl Redirect {
    fn to(location: impl Into<String>) -> Self {
        Self {
            location: location.into(),
        }
    }
}

/// Processes authorization requests end to end.
pub struct AuthorizationEndpoint {
    pipeline: AuthorizationPipeline,
    flow: FlowEngine,
}

impl AuthorizationEndpoint {
    #[must_use]
    pub fn new(pipeline: AuthorizationPipeline, flow: FlowEngine) -> Self {
        Self { pipeline, flow }
    }

    /// Handles one authorization request and returns the redirect to send.
    ///
    /// Never fails: every classified error becomes an error redirect or an
    /// error-page redirect.
    pub async fn authorize(
        &self,
        domain: &Domain,
        params: &AuthorizationParams,
        principal: Option<&UserPrincipal>,
    ) -> Redirect {
        let request = match self.pipeline.validate(domain, params, principal).await {
            Ok(request) => request,
            Err(failure) => {
                return Self::deliver_error(domain, failure.redirect.as_ref(), &failure.error);
            }
        };

        let redirect = ResolvedRedirect {
            uri: request.redirect_uri.clone(),
            channel: DeliveryChannel::for_response_type(request.response_type),
            state: request.state.clone(),
        };

        let Some(user) = principal else {
            // The pipeline only passes with a principal; reaching this
            // point without one is a programming error upstream.
            return Self::deliver_error(
                domain,
                Some(&redirect),
                &OAuth2Error::server("No authenticated principal"),
            );
        };

        match self.flow.run(&request, user).await {
            Ok(response) => match redirect.location(&response.params()) {
                Ok(location) => Redirect::to(location),
                Err(error) => {
                    tracing::error!(
                        client = %request.client_id,
                        error = %error,
                        "Unable to build response redirect"
                    );
                    Redirect::to(error_page_location(domain, &error))
                }
            },
            Err(error) => {
                tracing::debug!(
                    client = %request.client_id,
                    error = %error,
                    "Authorization flow failed"
                );
                Self::deliver_error(domain, Some(&redirect), &error)
            }
        }
    }

    /// Builds the error redirect: through the resolved target when one
    /// exists, to the domain error page otherwise.
    fn deliver_error(
        domain: &Domain,
        redirect: Option<&ResolvedRedirect>,
        error: &OAuth2Error,
    ) -> Redirect {
        match redirect {
            Some(redirect) => match redirect.error_location(error) {
                Ok(location) => Redirect::to(location),
                Err(build_error) => {
                    tracing::error!(error = %build_error, "Unable to build error redirect");
                    Redirect::to(error_page_location(domain, error))
                }
            },
            None => Redirect::to(error_page_location(domain, error)),
        }
    }
}
