//! # Resource Envelopes
//!
//! Every registry record travels as `{id, version, body}`.
//!
//! - [`Envelope<T>`]: outbound shape. The body is a concrete domain type and
//!   the identity is derived from it.
//! - [`Unsigned`]: inbound shape. The body is the tagged union [`Body`],
//!   selected by the `type` discriminator inside the body object. Callers
//!   narrow it with [`Unsigned::narrow`] before use.
//!
//! ## Wire Format
//!
//! ```text
//! {"id": "<hex>", "version": 1, "body": {"type": "service", "name": ..., ...}}
//! ```

use crate::errors::{DerivationError, EnvelopeError};
use crate::identity::{Identifiable, Identity};
use crate::kind::Kind;
use crate::primitives::{Environment, Org, Project, Service};
use serde::{Deserialize, Serialize, Serializer};

/// Polymorphic envelope body, keyed by its `type` field.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Body {
    /// Organization body.
    Org(Org),
    /// Project body.
    Project(Project),
    /// Environment body.
    Environment(Environment),
    /// Service body.
    Service(Service),
}

impl Body {
    /// Kind declared by the discriminator.
    pub fn kind(&self) -> Kind {
        match self {
            Body::Org(_) => Kind::Org,
            Body::Project(_) => Kind::Project,
            Body::Environment(_) => Kind::Environment,
            Body::Service(_) => Kind::Service,
        }
    }
}

/// A domain object the registry stores in its own collection.
pub trait Resource: Identifiable + Clone + Send + Sync + 'static {
    /// Collection endpoint path, e.g. `/services`.
    const COLLECTION: &'static str;

    /// Take the concrete body out of the union, or hand the union back.
    fn from_body(body: Body) -> Result<Self, Body>;

    /// Wrap into the union.
    fn into_body(self) -> Body;
}

macro_rules! impl_resource {
    ($ty:ident, $variant:ident, $path:literal) => {
        impl Resource for $ty {
            const COLLECTION: &'static str = $path;

            fn from_body(body: Body) -> Result<Self, Body> {
                match body {
                    Body::$variant(inner) => Ok(inner),
                    other => Err(other),
                }
            }

            fn into_body(self) -> Body {
                Body::$variant(self)
            }
        }
    };
}

impl_resource!(Org, Org, "/orgs");
impl_resource!(Project, Project, "/projects");
impl_resource!(Environment, Environment, "/environments");
impl_resource!(Service, Service, "/services");

/// Outbound envelope around a concrete body.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Envelope<T> {
    /// Identity derived from `body`.
    pub id: Identity,
    /// Record version; 1 for new records.
    pub version: u8,
    /// The domain object.
    pub body: T,
}

impl<T: Identifiable> Envelope<T> {
    /// Version assigned to records the client creates.
    pub const INITIAL_VERSION: u8 = 1;

    /// Wrap a new mutable object: derive its identity, version 1.
    pub fn new(body: T) -> Result<Self, DerivationError> {
        let id = Identity::mutable(&body)?;
        Ok(Self {
            id,
            version: Self::INITIAL_VERSION,
            body,
        })
    }
}

#[derive(Serialize)]
struct TaggedBody<'a, T> {
    #[serde(rename = "type")]
    kind: Kind,
    #[serde(flatten)]
    body: &'a T,
}

#[derive(Serialize)]
struct OutboundWire<'a, T> {
    id: &'a Identity,
    version: u8,
    body: TaggedBody<'a, T>,
}

impl<T: Identifiable> Serialize for Envelope<T> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        OutboundWire {
            id: &self.id,
            version: self.version,
            body: TaggedBody {
                kind: T::KIND,
                body: &self.body,
            },
        }
        .serialize(serializer)
    }
}

impl<T: Resource> From<Envelope<T>> for Unsigned {
    fn from(envelope: Envelope<T>) -> Self {
        Unsigned {
            id: envelope.id,
            version: envelope.version,
            body: envelope.body.into_body(),
        }
    }
}

/// Inbound envelope whose body has not been narrowed yet.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Unsigned {
    /// Record identity.
    pub id: Identity,
    /// Record version as reported by the registry.
    pub version: u8,
    /// Polymorphic body.
    pub body: Body,
}

impl Unsigned {
    /// Kind declared by the body.
    pub fn kind(&self) -> Kind {
        self.body.kind()
    }

    /// Narrow to a concrete body type.
    ///
    /// Fails when the body is another kind, when the identity is filed under
    /// a different kind than the body declares, or when the version is 0.
    pub fn narrow<T: Resource>(self) -> Result<Envelope<T>, EnvelopeError> {
        if self.version == 0 {
            return Err(EnvelopeError::InvalidVersion {
                id: self.id.to_string(),
            });
        }

        let found = self.body.kind();
        if found != T::KIND {
            return Err(EnvelopeError::TypeMismatch {
                expected: T::KIND,
                found: found.to_string(),
            });
        }

        if self.id.kind() != Some(found) {
            let id_kind = self.id.kind().map_or("zero", Kind::name);
            return Err(EnvelopeError::TypeMismatch {
                expected: T::KIND,
                found: format!("identity of kind {}", id_kind),
            });
        }

        let body = T::from_body(self.body).map_err(|other| EnvelopeError::TypeMismatch {
            expected: T::KIND,
            found: other.kind().to_string(),
        })?;
        body.validate().map_err(|reason| EnvelopeError::InvalidBody {
            kind: T::KIND,
            reason,
        })?;

        Ok(Envelope {
            id: self.id,
            version: self.version,
            body,
        })
    }
}
