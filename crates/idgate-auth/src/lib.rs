//! # idgate-auth
//!
//! Authorization-request processing core for the idgate identity gateway.
//!
//! This crate decides, for every inbound authorization request, whether the
//! request is well-formed, whether the client and redirect target are
//! legitimate, whether the current session satisfies the requested
//! authentication freshness, and which response variant to construct and
//! how to deliver it back to the client application.
//!
//! ## Modules
//!
//! - [`error`] - OAuth 2.0 / OIDC error taxonomy
//! - [`config`] - outbound HTTP fetch configuration
//! - [`storage`] - collaborator traits (client repository, issuers, ...)
//! - [`directory`] - event-synchronized, lock-free client cache
//! - [`discovery`] - server metadata (supported response/grant types)
//! - [`principal`] - authenticated end-user snapshot
//! - [`oauth`] - validation pipeline, flow engine, redirect resolution
//! - [`jwk`] - remote JSON Web Key Set resolution
//! - [`oidc`] - dynamic client registration validation

pub mod config;
pub mod directory;
pub mod discovery;
pub mod error;
pub mod jwk;
pub mod oauth;
pub mod oidc;
pub mod principal;
pub mod storage;

pub use config::HttpFetchConfig;
pub use directory::ClientDirectory;
pub use discovery::{DiscoveryService, OpenIdProviderMetadata, StaticDiscoveryService};
pub use error::{ErrorResponse, OAuth2Error};
pub use jwk::JwkResolver;
pub use oauth::{
    AccessToken, AuthorizationEndpoint, AuthorizationParams, AuthorizationPipeline,
    AuthorizationRequest, AuthorizationResponse, CodeChallengeMethod, DeliveryChannel, FlowEngine,
    PipelineFailure, Prompt, Redirect, ResolvedRedirect, ResponseType,
};
pub use oidc::{DynamicClientRegistrationRequest, DynamicClientRegistrationValidator, Patch};
pub use principal::UserPrincipal;
pub use storage::{AuthorizationCodeIssuer, ClientRepository, DomainProviderSource, TokenIssuer};

/// Type alias for results of gateway operations.
pub type OAuth2Result<T> = Result<T, OAuth2Error>;
