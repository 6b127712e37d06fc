//! # Inbound Ports
//!
//! API trait defining what a typed resource client can do.

use crate::domain::{ListFilter, RegistryError, ResourceResult};
use async_trait::async_trait;
use registry_types::Resource;

/// Typed resource API - inbound port.
#[async_trait]
pub trait ResourceApi<R: Resource>: Send + Sync {
    /// Read the collection, narrowing every record to `R`.
    ///
    /// Fails as a whole on the first record that is not an `R`.
    async fn list(&self, filter: &ListFilter) -> Result<Vec<ResourceResult<R>>, RegistryError>;

    /// Derive an identity for `body`, wrap it at version 1 and submit it.
    async fn create(&self, body: R) -> Result<(), RegistryError>;
}
