//! # Registry Types Crate
//!
//! Identities, resource kinds, domain objects and envelopes for the registry.
//!
//! ## Design Principles
//!
//! - **Content-derived identity**: an [`Identity`] is computed from the
//!   canonical JSON of its body plus the body's [`Kind`]. Same content, same
//!   identity.
//! - **Explicit discriminator**: inbound bodies are decoded through the
//!   tagged union [`Body`] and must be narrowed with [`Unsigned::narrow`];
//!   a kind mismatch is an error, never a default.
//! - **One absent value**: optional identities are `Option<Identity>` and the
//!   zero identity is normalised away when decoding.
//! - **Valid on arrival**: narrowing re-checks a body's required fields, so a
//!   record with a zero org or an empty name never reaches callers.

#![warn(missing_docs)]

pub mod envelope;
pub mod errors;
pub mod identity;
pub mod kind;
pub mod primitives;

pub use envelope::{Body, Envelope, Resource, Unsigned};
pub use errors::*;
pub use identity::{canonical_json, Identifiable, Identity, IDENTITY_LEN, IDENTITY_VERSION};
pub use kind::{Kind, Mutability};
pub use primitives::{Environment, Org, Project, Service};
