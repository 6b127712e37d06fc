//! # Domain Primitives
//!
//! The bodies carried inside registry envelopes.
//!
//! ## Scoping
//!
//! - **Org**: top level, named.
//! - **Project**: belongs to an org.
//! - **Environment**: belongs to a project.
//! - **Service**: belongs to an org, optionally to a project.
//!
//! Optional scopes are `Option<Identity>`. The zero identity is normalised to
//! `None` both on construction and when decoding, so "absent" has exactly one
//! representation.

use crate::errors::DerivationError;
use crate::identity::{Identifiable, Identity};
use crate::kind::Kind;
use serde::{Deserialize, Deserializer, Serialize};

/// Organization.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Org {
    /// Unique org name.
    pub name: String,
}

impl Org {
    /// Create a new org body.
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }
}

impl Identifiable for Org {
    const KIND: Kind = Kind::Org;

    fn validate(&self) -> Result<(), DerivationError> {
        require_name(&self.name)
    }
}

/// Project inside an org.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Project {
    /// Project name, unique within the org.
    pub name: String,
    /// Owning org.
    pub org_id: Identity,
}

impl Project {
    /// Create a new project body.
    pub fn new(name: impl Into<String>, org_id: Identity) -> Self {
        Self {
            name: name.into(),
            org_id,
        }
    }
}

impl Identifiable for Project {
    const KIND: Kind = Kind::Project;

    fn validate(&self) -> Result<(), DerivationError> {
        require_name(&self.name)?;
        require_id("org_id", &self.org_id)
    }
}

/// Environment inside a project.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Environment {
    /// Environment name, unique within the project.
    pub name: String,
    /// Owning org.
    pub org_id: Identity,
    /// Owning project.
    pub project_id: Identity,
}

impl Environment {
    /// Create a new environment body.
    pub fn new(name: impl Into<String>, org_id: Identity, project_id: Identity) -> Self {
        Self {
            name: name.into(),
            org_id,
            project_id,
        }
    }
}

impl Identifiable for Environment {
    const KIND: Kind = Kind::Environment;

    fn validate(&self) -> Result<(), DerivationError> {
        require_name(&self.name)?;
        require_id("org_id", &self.org_id)?;
        require_id("project_id", &self.project_id)
    }
}

/// Service scoped to an org and, optionally, a project.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Service {
    /// Service name.
    pub name: String,
    /// Owning org. Always set.
    pub org_id: Identity,
    /// Owning project, if any. Never `Some(Identity::ZERO)`.
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        deserialize_with = "non_zero_identity"
    )]
    pub project_id: Option<Identity>,
}

impl Service {
    /// Create a new service body. A zero `project_id` is treated as absent.
    pub fn new(name: impl Into<String>, org_id: Identity, project_id: Option<Identity>) -> Self {
        Self {
            name: name.into(),
            org_id,
            project_id: project_id.filter(|id| !id.is_zero()),
        }
    }
}

impl Identifiable for Service {
    const KIND: Kind = Kind::Service;

    fn validate(&self) -> Result<(), DerivationError> {
        require_name(&self.name)?;
        require_id("org_id", &self.org_id)
    }
}

fn require_name(name: &str) -> Result<(), DerivationError> {
    if name.is_empty() {
        return Err(DerivationError::MissingField("name"));
    }
    Ok(())
}

fn require_id(field: &'static str, id: &Identity) -> Result<(), DerivationError> {
    if id.is_zero() {
        return Err(DerivationError::MissingField(field));
    }
    Ok(())
}

fn non_zero_identity<'de, D>(deserializer: D) -> Result<Option<Identity>, D::Error>
where
    D: Deserializer<'de>,
{
    let id = Option::<Identity>::deserialize(deserializer)?;
    Ok(id.filter(|id| !id.is_zero()))
}
