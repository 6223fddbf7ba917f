//! OAuth 2.0 / OIDC authorization request processing.
//!
//! The processing chain is split across submodules:
//!
//! - [`request`] - raw parameter handling and the validated request type
//! - [`pkce`] - PKCE challenge shape validation
//! - [`redirect`] - redirect target resolution and delivery channels
//! - [`pipeline`] - the ordered validation chain
//! - [`flow`] - response-type dispatch and response construction
//! - [`response`] - authorization response variants
//! - [`authorize`] - the authorization endpoint service tying it together

pub mod authorize;
pub mod flow;
pub mod pkce;
pub mod pipeline;
pub mod redirect;
pub mod request;
pub mod response;

pub use authorize::{AuthorizationEndpoint, Redirect};
pub use flow::FlowEngine;
pub use pkce::CodeChallengeMethod;
pub use pipeline::{AuthorizationPipeline, PipelineFailure};
pub use redirect::{DeliveryChannel, ResolvedRedirect};
pub use request::{AuthorizationParams, AuthorizationRequest, Prompt, ResponseType};
pub use response::{AccessToken, AuthorizationResponse};
