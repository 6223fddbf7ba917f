//! The response-type flow engine.
//!
//! Dispatches a validated, approved authorization request by response type
//! and produces the matching [`AuthorizationResponse`] variant. The engine
//! performs no parameter re-validation — it trusts the pipeline's
//! guarantees — and delegates code/token construction to the issuance
//! collaborators.

use std::sync::Arc;

use crate::OAuth2Result;
use crate::error::OAuth2Error;
use crate::oauth::request::{AuthorizationRequest, ResponseType};
use crate::oauth::response::AuthorizationResponse;
use crate::principal::UserPrincipal;
use crate::storage::{AuthorizationCodeIssuer, TokenIssuer};

/// Produces the authorization response for a validated request.
pub struct FlowEngine {
    code_issuer: Arc<dyn AuthorizationCodeIssuer>,
    token_issuer: Arc<dyn TokenIssuer>,
}

impl FlowEngine {
    #[must_use]
    pub fn new(
        code_issuer: Arc<dyn AuthorizationCodeIssuer>,
        token_issuer: Arc<dyn TokenIssuer>,
    ) -> Self {
        Self {
            code_issuer,
            token_issuer,
        }
    }

    /// Runs the flow for the request's response type.
    ///
    /// # Errors
    ///
    /// Propagates classified issuance failures; a request without an
    /// approved decision fails with `access_denied`.
    pub async fn run(
        &self,
        request: &AuthorizationRequest,
        principal: &UserPrincipal,
    ) -> OAuth2Result<AuthorizationResponse> {
        if !request.approved {
            return Err(OAuth2Error::access_denied_with("User denied access"));
        }

        match request.response_type {
            ResponseType::Code => {
                let code = self.code_issuer.issue(request, principal).await?;
                Ok(AuthorizationResponse::AuthorizationCode { code })
            }
            ResponseType::Token => {
                let access_token = self
                    .token_issuer
                    .issue_access_token(request, principal)
                    .await?;
                Ok(AuthorizationResponse::Implicit { access_token })
            }
            ResponseType::IdToken => {
                let id_token = self.token_issuer.issue_id_token(request, principal).await?;
                Ok(AuthorizationResponse::IdToken { id_token })
            }
            ResponseType::IdTokenToken => {
                let id_token = self.token_issuer.issue_id_token(request, principal).await?;
                let access_token = self
                    .token_issuer
                    .issue_access_token(request, principal)
                    .await?
                    .with_additional_information("id_token", id_token);
                Ok(AuthorizationResponse::Implicit { access_token })
            }
            ResponseType::CodeIdToken => {
                let code = self.code_issuer.issue(request, principal).await?;
                let id_token = self.token_issuer.issue_id_token(request, principal).await?;
                Ok(AuthorizationResponse::Hybrid {
                    code,
                    access_token: None,
                    id_token: Some(id_token),
                })
            }
            ResponseType::CodeToken => {
                let code = self.code_issuer.issue(request, principal).await?;
                let access_token = self
                    .token_issuer
                    .issue_access_token(request, principal)
                    .await?;
                Ok(AuthorizationResponse::Hybrid {
                    code,
                    access_token: Some(access_token),
                    id_token: None,
                })
            }
            ResponseType::CodeIdTokenToken => {
                let code = self.code_issuer.issue(request, principal).await?;
                let id_token = self.token_issuer.issue_id_token(request, principal).await?;
                let access_token = self
                    .token_issuer
                    .issue_access_token(request, principal)
                    .await?
                    .with_additional_information("id_token", id_token);
                Ok(AuthorizationResponse::Hybrid {
                    code,
                    access_token: Some(access_token),
                    id_token: None,
                })
            }
        }
    }
}
