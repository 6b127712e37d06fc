//! Projects client: requests against `/projects`.

use super::resource_client::ResourceClient;
use crate::domain::{ListFilter, ProjectResult, RegistryError};
use crate::ports::outbound::Transport;
use registry_types::{Identity, Project};
use std::sync::Arc;

/// Typed client for projects.
#[derive(Clone)]
pub struct ProjectsClient {
    inner: ResourceClient<Project>,
}

impl ProjectsClient {
    /// Create a client over `transport`.
    pub fn new(transport: Arc<dyn Transport>) -> Self {
        Self {
            inner: ResourceClient::new(transport),
        }
    }

    /// List projects, optionally filtered by org and exact name.
    pub async fn list(
        &self,
        org_id: Option<&Identity>,
        name: Option<&str>,
    ) -> Result<Vec<ProjectResult>, RegistryError> {
        let filter = ListFilter::from_parts(org_id, None, name);
        self.inner.list(&filter).await
    }

    /// Create a project named `name` in the given org.
    pub async fn create(&self, org_id: Option<&Identity>, name: &str) -> Result<(), RegistryError> {
        let Some(org_id) = org_id else {
            return Err(RegistryError::InvalidArgument("invalid org"));
        };
        self.inner.create(Project::new(name, *org_id)).await
    }
}
