//! # Identity Derivation
//!
//! Content-derived identifiers for registry records.
//!
//! ## Layout
//!
//! ```text
//! [ version (1) | kind (1) | digest (16) ]
//! ```
//!
//! The digest is the first 16 bytes of
//! `SHA-256(domain || kind || canonical content)`. Mutable and immutable
//! derivations use different domain separators, so the same content never
//! yields the same identity under both modes.
//!
//! The all-zero value is the zero identity. It renders as the empty string
//! and never collides with a derived identity, whose version byte is 0x01.

use crate::errors::{DerivationError, IdentityParseError};
use crate::kind::{Kind, Mutability};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use sha2::{Digest, Sha256};
use std::fmt;
use std::str::FromStr;

/// Identity format version.
pub const IDENTITY_VERSION: u8 = 0x01;

/// Encoded identity length in bytes.
pub const IDENTITY_LEN: usize = 18;

const DIGEST_LEN: usize = IDENTITY_LEN - 2;
const MUTABLE_DOMAIN: &[u8] = b"registry/identity/mutable/v1";
const IMMUTABLE_DOMAIN: &[u8] = b"registry/identity/immutable/v1";

/// A domain object that can be given a content-derived identity.
pub trait Identifiable: Serialize {
    /// Kind tag carried in the identity and on the wire.
    const KIND: Kind;

    /// Check the fields the canonical form depends on.
    fn validate(&self) -> Result<(), DerivationError> {
        Ok(())
    }

    /// Canonical bytes the identity is derived from.
    fn canonical_content(&self) -> Result<Vec<u8>, DerivationError> {
        self.validate()?;
        canonical_json(self)
    }
}

/// Serialize `value` as JSON with object keys sorted at every level.
pub fn canonical_json<T: Serialize + ?Sized>(value: &T) -> Result<Vec<u8>, DerivationError> {
    let value = serde_json::to_value(value)
        .map_err(|e| DerivationError::Canonicalization(e.to_string()))?;
    serde_json::to_vec(&sort_keys(value))
        .map_err(|e| DerivationError::Canonicalization(e.to_string()))
}

fn sort_keys(value: serde_json::Value) -> serde_json::Value {
    match value {
        serde_json::Value::Object(map) => {
            let mut entries: Vec<_> = map.into_iter().collect();
            entries.sort_by(|a, b| a.0.cmp(&b.0));
            serde_json::Value::Object(
                entries
                    .into_iter()
                    .map(|(key, value)| (key, sort_keys(value)))
                    .collect(),
            )
        }
        serde_json::Value::Array(items) => {
            serde_json::Value::Array(items.into_iter().map(sort_keys).collect())
        }
        other => other,
    }
}

/// Deterministic, content-derived reference to a registry record.
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default)]
pub struct Identity([u8; IDENTITY_LEN]);

impl Identity {
    /// The zero identity ("not set").
    pub const ZERO: Identity = Identity([0u8; IDENTITY_LEN]);

    /// Derive an identity from raw canonical content. Pure.
    pub fn derive(kind: Kind, mode: Mutability, content: &[u8]) -> Identity {
        let domain = match mode {
            Mutability::Mutable => MUTABLE_DOMAIN,
            Mutability::Immutable => IMMUTABLE_DOMAIN,
        };

        let mut hasher = Sha256::new();
        hasher.update(domain);
        hasher.update([kind.as_byte()]);
        hasher.update(content);
        let digest = hasher.finalize();

        let mut bytes = [0u8; IDENTITY_LEN];
        bytes[0] = IDENTITY_VERSION;
        bytes[1] = kind.as_byte();
        bytes[2..].copy_from_slice(&digest[..DIGEST_LEN]);
        Identity(bytes)
    }

    /// Identity for a mutable object, derived from its current content.
    pub fn mutable<T: Identifiable>(body: &T) -> Result<Identity, DerivationError> {
        Self::derive_checked(body, Mutability::Mutable)
    }

    /// Identity for an immutable object.
    pub fn immutable<T: Identifiable>(body: &T) -> Result<Identity, DerivationError> {
        Self::derive_checked(body, Mutability::Immutable)
    }

    fn derive_checked<T: Identifiable>(
        body: &T,
        mode: Mutability,
    ) -> Result<Identity, DerivationError> {
        if T::KIND.mutability() != mode {
            return Err(DerivationError::MutabilityMismatch { kind: T::KIND });
        }
        let content = body.canonical_content()?;
        Ok(Self::derive(T::KIND, mode, &content))
    }

    /// Build from raw bytes, validating version and kind.
    pub fn from_bytes(bytes: &[u8]) -> Result<Identity, IdentityParseError> {
        let raw: [u8; IDENTITY_LEN] =
            bytes.try_into().map_err(|_| IdentityParseError::InvalidLength {
                expected: IDENTITY_LEN,
                got: bytes.len(),
            })?;

        if raw == Self::ZERO.0 {
            return Ok(Self::ZERO);
        }
        if raw[0] != IDENTITY_VERSION {
            return Err(IdentityParseError::UnsupportedVersion(raw[0]));
        }
        if Kind::from_byte(raw[1]).is_none() {
            return Err(IdentityParseError::UnknownKind(raw[1]));
        }
        Ok(Identity(raw))
    }

    /// Raw bytes.
    pub fn as_bytes(&self) -> &[u8; IDENTITY_LEN] {
        &self.0
    }

    /// Kind this identity refers to; `None` for the zero identity.
    pub fn kind(&self) -> Option<Kind> {
        Kind::from_byte(self.0[1])
    }

    /// True for the zero identity.
    pub fn is_zero(&self) -> bool {
        *self == Self::ZERO
    }
}

impl fmt::Display for Identity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_zero() {
            return Ok(());
        }
        f.write_str(&hex::encode(self.0))
    }
}

impl fmt::Debug for Identity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_zero() {
            f.write_str("Identity(zero)")
        } else {
            write!(f, "Identity({})", hex::encode(self.0))
        }
    }
}

impl FromStr for Identity {
    type Err = IdentityParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.is_empty() {
            return Ok(Self::ZERO);
        }
        let bytes =
            hex::decode(s).map_err(|e| IdentityParseError::InvalidEncoding(e.to_string()))?;
        Self::from_bytes(&bytes)
    }
}

impl Serialize for Identity {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for Identity {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}
