//! The authorization request validation pipeline.
//!
//! A strictly ordered chain of validators transforming the raw parameter
//! set into a fully validated [`AuthorizationRequest`], or failing fast
//! with a classified error. Each stage assumes all prior stages passed;
//! the first failure short-circuits the rest — nothing is committed before
//! that point, so there is nothing to compensate.
//!
//! Failures raised before a redirect target is resolved carry no redirect
//! and must be delivered on the domain error page; failures raised after
//! carry the resolved target and are delivered through it on the channel
//! selected by the response type.

use std::sync::Arc;

use time::OffsetDateTime;

use idgate_core::{Client, Domain};

use crate::directory::ClientDirectory;
use crate::discovery::DiscoveryService;
use crate::error::OAuth2Error;
use crate::oauth::pkce::{self, CodeChallengeMethod};
use crate::oauth::redirect::{DeliveryChannel, ResolvedRedirect, resolve_redirect_uri};
use crate::oauth::request::{AuthorizationParams, AuthorizationRequest, Prompt, ResponseType};
use crate::principal::UserPrincipal;

/// A classified pipeline failure together with the delivery target known
/// at the point of failure.
#[derive(Debug)]
pub struct PipelineFailure {
    pub error: OAuth2Error,

    /// The resolved redirect target, absent when the failure occurred
    /// before (or during) redirect resolution.
    pub redirect: Option<ResolvedRedirect>,
}

impl PipelineFailure {
    fn on_error_page(error: OAuth2Error) -> Self {
        Self {
            error,
            redirect: None,
        }
    }
}

/// The ordered validation chain over inbound authorization requests.
pub struct AuthorizationPipeline {
    directory: Arc<ClientDirectory>,
    discovery: Arc<dyn DiscoveryService>,
}

impl AuthorizationPipeline {
    #[must_use]
    pub fn new(directory: Arc<ClientDirectory>, discovery: Arc<dyn DiscoveryService>) -> Self {
        Self {
            directory,
            discovery,
        }
    }

    /// Runs the full validation chain.
    ///
    /// # Errors
    ///
    /// Returns a [`PipelineFailure`] carrying the classified error of the
    /// first failing stage.
    pub async fn validate(
        &self,
        domain: &Domain,
        params: &AuthorizationParams,
        principal: Option<&UserPrincipal>,
    ) -> Result<AuthorizationRequest, PipelineFailure> {
        // 1. Required parameters: presence, single occurrence, supported
        //    response_type.
        let response_type = self
            .parse_required_parameters(domain, params)
            .map_err(PipelineFailure::on_error_page)?;
        let client_id = required_param(params, "client_id")
            .map_err(PipelineFailure::on_error_page)?
            .to_string();
        let state = optional_param(params, "state").map_err(PipelineFailure::on_error_page)?;

        // 2. Client resolution.
        let client = self
            .directory
            .find_by_domain_and_client_id(&domain.id, &client_id)
            .ok_or_else(|| {
                PipelineFailure::on_error_page(OAuth2Error::unknown_client(&client_id))
            })?;

        // 3. Redirect resolution. Failures here must not reach any
        //    redirect target. Later stages deliver their errors through
        //    the redirect only when the request itself supplied one: a
        //    target defaulted from the registration is used for success
        //    delivery but never receives errors the client did not ask
        //    for.
        let requested_redirect =
            optional_param(params, "redirect_uri").map_err(PipelineFailure::on_error_page)?;
        let redirect_uri = resolve_redirect_uri(&client, requested_redirect.as_deref())
            .map_err(PipelineFailure::on_error_page)?;
        let redirect = requested_redirect.map(|uri| ResolvedRedirect {
            uri,
            channel: DeliveryChannel::for_response_type(response_type),
            state: state.clone(),
        });

        let fail = |error: OAuth2Error| PipelineFailure {
            error,
            redirect: redirect.clone(),
        };

        // 4. Scope validation.
        let scopes = validate_scope(params, &client).map_err(&fail)?;

        // 5. PKCE shape validation.
        let (code_challenge, code_challenge_method) = validate_pkce(params).map_err(&fail)?;

        // 6. Nonce requirement for ID-token-bearing flows.
        let nonce = optional_param(params, "nonce").map_err(&fail)?;
        if response_type.requires_nonce() && nonce.is_none() {
            return Err(fail(OAuth2Error::invalid_request(
                "Missing parameter: nonce is required for Implicit and Hybrid Flow",
            )));
        }

        // 7. Authentication-state evaluation.
        let (prompt, max_age) = parse_session_parameters(params).map_err(&fail)?;
        evaluate_authentication_state(principal, prompt, max_age).map_err(&fail)?;

        Ok(AuthorizationRequest {
            response_type,
            client_id,
            client,
            redirect_uri,
            scopes,
            state,
            nonce,
            prompt,
            max_age,
            code_challenge,
            code_challenge_method,
            approved: true,
        })
    }

    fn parse_required_parameters(
        &self,
        domain: &Domain,
        params: &AuthorizationParams,
    ) -> Result<ResponseType, OAuth2Error> {
        let value = required_param(params, "response_type")?;
        let response_type = ResponseType::parse(value)
            .ok_or_else(|| OAuth2Error::unsupported_response_type(value))?;

        let metadata = self.discovery.configuration(domain);
        if !metadata.is_response_type_supported(response_type) {
            return Err(OAuth2Error::unsupported_response_type(value));
        }
        Ok(response_type)
    }
}

/// Reads a required single-valued parameter.
fn required_param<'a>(
    params: &'a AuthorizationParams,
    name: &str,
) -> Result<&'a str, OAuth2Error> {
    params
        .get(name)?
        .ok_or_else(|| OAuth2Error::invalid_request(format!("Missing parameter: {name}")))
}

/// Reads an optional single-valued parameter.
fn optional_param(
    params: &AuthorizationParams,
    name: &str,
) -> Result<Option<String>, OAuth2Error> {
    Ok(params.get(name)?.map(str::to_string))
}

/// Stage 4: the scope parameter, when present, must be non-empty and every
/// token must be allowed for the client.
fn validate_scope(
    params: &AuthorizationParams,
    client: &Client,
) -> Result<Vec<String>, OAuth2Error> {
    let Some(scope) = params.get("scope")? else {
        return Ok(Vec::new());
    };

    if scope.trim().is_empty() {
        return Err(OAuth2Error::invalid_scope(
            "Invalid parameter: scope must not be empty",
        ));
    }

    let scopes: Vec<String> = scope.split_whitespace().map(str::to_string).collect();
    let offending: Vec<&str> = scopes
        .iter()
        .filter(|scope| !client.is_scope_allowed(scope))
        .map(String::as_str)
        .collect();
    if !offending.is_empty() {
        return Err(OAuth2Error::invalid_scope(format!(
            "Invalid scope(s): {}",
            offending.join(" ")
        )));
    }

    Ok(scopes)
}

/// Stage 5: PKCE parameter shape.
///
/// A method without a challenge is an error; an unknown method is an
/// error; a challenge must use the unreserved alphabet at 43-128
/// characters; a challenge without a method defaults to `plain`.
fn validate_pkce(
    params: &AuthorizationParams,
) -> Result<(Option<String>, Option<CodeChallengeMethod>), OAuth2Error> {
    let method_param = params.get("code_challenge_method")?.map(str::to_string);
    let challenge = params.get("code_challenge")?.map(str::to_string);

    let method = match method_param {
        Some(value) => {
            if challenge.is_none() {
                return Err(OAuth2Error::invalid_request(
                    "Missing parameter: code_challenge",
                ));
            }
            Some(CodeChallengeMethod::parse(&value).ok_or_else(|| {
                OAuth2Error::invalid_request("Invalid parameter: code_challenge_method")
            })?)
        }
        None => challenge.as_ref().map(|_| CodeChallengeMethod::default()),
    };

    if let Some(challenge) = &challenge
        && !pkce::is_valid_code_challenge(challenge)
    {
        return Err(OAuth2Error::invalid_request(
            "Invalid parameter: code_challenge",
        ));
    }

    Ok((challenge, method))
}

/// Reads the `prompt` and `max_age` parameters for stage 7.
fn parse_session_parameters(
    params: &AuthorizationParams,
) -> Result<(Option<Prompt>, Option<u64>), OAuth2Error> {
    let prompt = params.get("prompt")?.map(Prompt::parse);
    let max_age = params
        .get("max_age")?
        .map(|value| {
            value
                .parse::<u64>()
                .map_err(|_| OAuth2Error::invalid_request("Invalid parameter: max_age"))
        })
        .transpose()?;
    Ok((prompt, max_age))
}

/// Stage 7: decides whether the current session satisfies the requested
/// authentication freshness.
///
/// The `access_denied` outcomes here redirect the caller into the
/// interactive login flow, which lives outside this core.
fn evaluate_authentication_state(
    principal: Option<&UserPrincipal>,
    prompt: Option<Prompt>,
    max_age: Option<u64>,
) -> Result<(), OAuth2Error> {
    let Some(user) = principal else {
        return Err(match prompt {
            Some(Prompt::None) => OAuth2Error::LoginRequired,
            _ => OAuth2Error::access_denied(),
        });
    };

    if prompt == Some(Prompt::Login) {
        return Err(OAuth2Error::access_denied());
    }

    if let Some(max_age) = max_age
        && user.is_stale(max_age, OffsetDateTime::now_utc())
    {
        return Err(match prompt {
            Some(Prompt::None) => OAuth2Error::LoginRequired,
            _ => OAuth2Error::access_denied(),
        });
    }

    Ok(())
}
