//! OpenID Connect dynamic client registration.
//!
//! - [`patch`] - three-state optional fields (`unset` / `null` / value)
//! - [`registration`] - the registration request and its validation chain

pub mod patch;
pub mod registration;

pub use patch::Patch;
pub use registration::{DynamicClientRegistrationRequest, DynamicClientRegistrationValidator};
