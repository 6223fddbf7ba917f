//! # idgate-core
//!
//! Core domain model for the idgate identity gateway.
//!
//! This crate defines the types shared by every gateway component:
//!
//! - [`Domain`] - a tenant boundary scoping clients and endpoints
//! - [`Client`] - an OAuth 2.0 / OIDC relying party registration
//! - [`jose`] - JSON Web Key types ([`Jwk`], [`JwkSet`], [`KeyType`])
//! - [`ClientEvent`] - synchronization events for the client directory
//!
//! The types here carry no behavior beyond simple lookups and validation;
//! all request processing lives in `idgate-auth`.

pub mod client;
pub mod domain;
pub mod event;
pub mod jose;

pub use client::Client;
pub use domain::Domain;
pub use event::{ClientEvent, ClientEventKind};
pub use jose::{Jwk, JwkSet, KeyType};
