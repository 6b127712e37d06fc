//! Environments client: requests against `/environments`.

use super::resource_client::ResourceClient;
use crate::domain::{EnvironmentResult, ListFilter, RegistryError};
use crate::ports::outbound::Transport;
use registry_types::{Environment, Identity};
use std::sync::Arc;

/// Typed client for environments.
#[derive(Clone)]
pub struct EnvironmentsClient {
    inner: ResourceClient<Environment>,
}

impl EnvironmentsClient {
    /// Create a client over `transport`.
    pub fn new(transport: Arc<dyn Transport>) -> Self {
        Self {
            inner: ResourceClient::new(transport),
        }
    }

    /// List environments, optionally filtered by org, project and exact name.
    pub async fn list(
        &self,
        org_id: Option<&Identity>,
        project_id: Option<&Identity>,
        name: Option<&str>,
    ) -> Result<Vec<EnvironmentResult>, RegistryError> {
        let filter = ListFilter::from_parts(org_id, project_id, name);
        self.inner.list(&filter).await
    }

    /// Create an environment named `name` in the given project.
    pub async fn create(
        &self,
        org_id: Option<&Identity>,
        project_id: Option<&Identity>,
        name: &str,
    ) -> Result<(), RegistryError> {
        let (Some(org_id), Some(project_id)) = (org_id, project_id) else {
            return Err(RegistryError::InvalidArgument("invalid org or project"));
        };
        self.inner
            .create(Environment::new(name, *org_id, *project_id))
            .await
    }
}
