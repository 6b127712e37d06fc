//! # Domain Entities
//!
//! Read-side projections handed to callers. Bodies are already narrowed to
//! their concrete type; the polymorphic envelope never leaves the client.

use registry_types::{Envelope, Environment, Identity, Org, Project, Service};
use serde::{Deserialize, Serialize};

/// A record returned by a collection read.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResourceResult<T> {
    /// Record identity.
    pub id: Identity,
    /// Record version.
    pub version: u8,
    /// Concrete body.
    pub body: T,
}

impl<T> From<Envelope<T>> for ResourceResult<T> {
    fn from(envelope: Envelope<T>) -> Self {
        Self {
            id: envelope.id,
            version: envelope.version,
            body: envelope.body,
        }
    }
}

/// Service returned by `GET /services`.
pub type ServiceResult = ResourceResult<Service>;

/// Project returned by `GET /projects`.
pub type ProjectResult = ResourceResult<Project>;

/// Environment returned by `GET /environments`.
pub type EnvironmentResult = ResourceResult<Environment>;

/// Org returned by `GET /orgs`.
pub type OrgResult = ResourceResult<Org>;
