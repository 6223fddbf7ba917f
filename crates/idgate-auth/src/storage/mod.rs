//! Collaborator traits.
//!
//! The processing core consumes a handful of external capabilities through
//! these traits: client persistence, code/token issuance, and domain
//! provider configuration. Implementations live in other crates (or in
//! tests as mocks).

mod client;
mod issuer;

pub use client::{ClientRepository, DomainProviderSource};
pub use issuer::{AuthorizationCodeIssuer, TokenIssuer};
