//! Orgs client: requests against `/orgs`.

use super::resource_client::ResourceClient;
use crate::domain::{ListFilter, OrgResult, RegistryError};
use crate::ports::outbound::Transport;
use registry_types::Org;
use std::sync::Arc;

/// Typed client for orgs.
#[derive(Clone)]
pub struct OrgsClient {
    inner: ResourceClient<Org>,
}

impl OrgsClient {
    /// Create a client over `transport`.
    pub fn new(transport: Arc<dyn Transport>) -> Self {
        Self {
            inner: ResourceClient::new(transport),
        }
    }

    /// List orgs, optionally by exact name.
    pub async fn list(&self, name: Option<&str>) -> Result<Vec<OrgResult>, RegistryError> {
        let filter = ListFilter::from_parts(None, None, name);
        self.inner.list(&filter).await
    }

    /// Create an org named `name`.
    pub async fn create(&self, name: &str) -> Result<(), RegistryError> {
        self.inner.create(Org::new(name)).await
    }
}
