//! Registry facade handing out one typed client per collection.

use super::environments::EnvironmentsClient;
use super::orgs::OrgsClient;
use super::projects::ProjectsClient;
use super::services::ServicesClient;
use crate::adapters::HttpTransport;
use crate::config::ClientConfig;
use crate::domain::RegistryError;
use crate::ports::outbound::Transport;
use std::sync::Arc;
use tracing::info;

/// Entry point to the registry. Cheap to clone; clones share the transport.
#[derive(Clone)]
pub struct RegistryClient {
    transport: Arc<dyn Transport>,
}

impl RegistryClient {
    /// Create a client over any transport.
    pub fn new(transport: Arc<dyn Transport>) -> Self {
        Self { transport }
    }

    /// Create a client backed by [`HttpTransport`].
    pub fn from_config(config: &ClientConfig) -> Result<Self, RegistryError> {
        let transport = HttpTransport::new(config)?;
        info!(
            registry_url = %config.registry_url,
            authenticated = config.token.is_some(),
            "[registry] Client configured"
        );
        Ok(Self::new(Arc::new(transport)))
    }

    /// Client for `/services`.
    pub fn services(&self) -> ServicesClient {
        ServicesClient::new(Arc::clone(&self.transport))
    }

    /// Client for `/projects`.
    pub fn projects(&self) -> ProjectsClient {
        ProjectsClient::new(Arc::clone(&self.transport))
    }

    /// Client for `/environments`.
    pub fn environments(&self) -> EnvironmentsClient {
        EnvironmentsClient::new(Arc::clone(&self.transport))
    }

    /// Client for `/orgs`.
    pub fn orgs(&self) -> OrgsClient {
        OrgsClient::new(Arc::clone(&self.transport))
    }
}
