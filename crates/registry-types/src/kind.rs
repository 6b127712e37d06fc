//! # Resource Kinds
//!
//! Every record the registry stores is tagged with a [`Kind`]. The tag is
//! carried twice on the wire: as the second byte of the record's identity and
//! as the `type` discriminator inside the envelope body.

use serde::{Deserialize, Serialize};
use std::fmt;

/// How an identity is derived for a kind.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Mutability {
    /// Identity is derived from the object's content at creation time and the
    /// object may be updated later under the same identity.
    Mutable,
    /// Identity covers content that must never change once published.
    Immutable,
}

/// Resource kind discriminator.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Kind {
    /// Organization.
    Org,
    /// Project inside an organization.
    Project,
    /// Environment inside a project.
    Environment,
    /// Service inside an organization, optionally scoped to a project.
    Service,
    /// Immutable credential record.
    Credential,
}

impl Kind {
    /// All kinds, in byte order.
    pub const ALL: [Kind; 5] = [
        Kind::Org,
        Kind::Project,
        Kind::Environment,
        Kind::Service,
        Kind::Credential,
    ];

    /// Wire byte used inside identities. 0x00 is reserved for the zero identity.
    pub const fn as_byte(self) -> u8 {
        match self {
            Kind::Org => 0x03,
            Kind::Project => 0x04,
            Kind::Environment => 0x05,
            Kind::Service => 0x06,
            Kind::Credential => 0x07,
        }
    }

    /// Inverse of [`Kind::as_byte`].
    pub fn from_byte(byte: u8) -> Option<Kind> {
        Self::ALL.into_iter().find(|kind| kind.as_byte() == byte)
    }

    /// Snake-case name, identical to the serde representation.
    pub const fn name(self) -> &'static str {
        match self {
            Kind::Org => "org",
            Kind::Project => "project",
            Kind::Environment => "environment",
            Kind::Service => "service",
            Kind::Credential => "credential",
        }
    }

    /// Derivation mode for identities of this kind.
    pub const fn mutability(self) -> Mutability {
        match self {
            Kind::Credential => Mutability::Immutable,
            _ => Mutability::Mutable,
        }
    }
}

impl fmt::Display for Kind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
