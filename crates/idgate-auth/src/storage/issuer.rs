//! Issuance collaborator traits.
//!
//! Token and code construction (signing, persistence, policy checks) is
//! owned by other subsystems; the flow engine only consumes their outputs.

use async_trait::async_trait;

use crate::OAuth2Result;
use crate::oauth::request::AuthorizationRequest;
use crate::oauth::response::AccessToken;
use crate::principal::UserPrincipal;

/// Issues authorization codes bound to a validated request.
///
/// The code must be bound to the request's client, redirect URI, scopes
/// and PKCE challenge so the token endpoint can enforce them on exchange.
#[async_trait]
pub trait AuthorizationCodeIssuer: Send + Sync {
    /// Issues a single-use authorization code.
    ///
    /// # Errors
    ///
    /// Returns `AccessDenied` when issuance is denied by policy.
    async fn issue(
        &self,
        request: &AuthorizationRequest,
        principal: &UserPrincipal,
    ) -> OAuth2Result<String>;
}

/// Issues access tokens and ID tokens for implicit and hybrid responses.
#[async_trait]
pub trait TokenIssuer: Send + Sync {
    /// Issues an access token for the validated request.
    ///
    /// # Errors
    ///
    /// Returns `AccessDenied` when issuance is denied by policy.
    async fn issue_access_token(
        &self,
        request: &AuthorizationRequest,
        principal: &UserPrincipal,
    ) -> OAuth2Result<AccessToken>;

    /// Issues an ID token for the validated request.
    ///
    /// # Errors
    ///
    /// Returns `AccessDenied` when issuance is denied by policy.
    async fn issue_id_token(
        &self,
        request: &AuthorizationRequest,
        principal: &UserPrincipal,
    ) -> OAuth2Result<String>;
}
