//! # Services Client
//!
//! Requests against the registry's `/services` collection.
//!
//! Optional identity arguments are `Option<&Identity>`: `None` means "not
//! supplied". On list, a supplied zero project is dropped from the filters.
//! On create, both org and project must be supplied and the project must not
//! be zero; both checks happen before any derivation or network work.

use super::resource_client::ResourceClient;
use crate::domain::{ListFilter, RegistryError, ServiceResult};
use crate::ports::outbound::Transport;
use registry_types::{DerivationError, Identity, Service};
use std::sync::Arc;

/// Typed client for services.
#[derive(Clone)]
pub struct ServicesClient {
    inner: ResourceClient<Service>,
}

impl ServicesClient {
    /// Create a client over `transport`.
    pub fn new(transport: Arc<dyn Transport>) -> Self {
        Self {
            inner: ResourceClient::new(transport),
        }
    }

    /// List services, optionally filtered by org, project and exact name.
    pub async fn list(
        &self,
        org_id: Option<&Identity>,
        project_id: Option<&Identity>,
        name: Option<&str>,
    ) -> Result<Vec<ServiceResult>, RegistryError> {
        let filter = ListFilter::from_parts(org_id, project_id, name);
        self.inner.list(&filter).await
    }

    /// Create a service named `name` in the given org and project.
    pub async fn create(
        &self,
        org_id: Option<&Identity>,
        project_id: Option<&Identity>,
        name: &str,
    ) -> Result<(), RegistryError> {
        let (Some(org_id), Some(project_id)) = (org_id, project_id) else {
            return Err(RegistryError::InvalidArgument("invalid org or project"));
        };
        // Service::new would read a zero project as "no project".
        if project_id.is_zero() {
            return Err(DerivationError::MissingField("project_id").into());
        }

        let body = Service::new(name, *org_id, Some(*project_id));
        self.inner.create(body).await
    }
}
