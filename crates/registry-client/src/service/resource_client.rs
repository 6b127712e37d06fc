//! # Typed Resource Client
//!
//! Generic facade over one registry collection.
//!
//! ## List
//!
//! 1. Build the query from the supplied filters only
//! 2. `GET <collection>` (authenticated)
//! 3. Decode the body as a sequence of unsigned envelopes
//! 4. Narrow each envelope in response order; the first mismatch aborts the
//!    whole call and nothing is returned
//!
//! ## Create
//!
//! 1. Derive the body's identity
//! 2. Wrap it in an envelope at version 1
//! 3. `POST <collection>` (authenticated) and discard the response body

use crate::domain::{AuthMode, ListFilter, Method, RegistryError, Request, ResourceResult};
use crate::ports::inbound::ResourceApi;
use crate::ports::outbound::Transport;
use async_trait::async_trait;
use registry_types::{Envelope, Resource, Unsigned};
use std::marker::PhantomData;
use std::sync::Arc;
use tracing::{debug, info, warn};

/// Client for the collection that stores `R`.
///
/// Holds no state besides the shared transport; clones are cheap and calls
/// are independent.
pub struct ResourceClient<R> {
    transport: Arc<dyn Transport>,
    _resource: PhantomData<fn() -> R>,
}

impl<R> Clone for ResourceClient<R> {
    fn clone(&self) -> Self {
        Self {
            transport: Arc::clone(&self.transport),
            _resource: PhantomData,
        }
    }
}

impl<R: Resource> ResourceClient<R> {
    /// Create a client over `transport`.
    pub fn new(transport: Arc<dyn Transport>) -> Self {
        Self {
            transport,
            _resource: PhantomData,
        }
    }

    /// Read the collection.
    pub async fn list(&self, filter: &ListFilter) -> Result<Vec<ResourceResult<R>>, RegistryError> {
        let query = filter.to_query();
        debug!(
            kind = %R::KIND,
            filters = query.len(),
            "[registry] Listing {}",
            R::COLLECTION
        );

        let request =
            Request::new(Method::Get, R::COLLECTION, AuthMode::Authenticated).with_query(query);
        let response = self.transport.execute(request).await?;

        let envelopes: Option<Vec<Unsigned>> = response
            .decode()
            .map_err(|e| RegistryError::Decode(e.to_string()))?;
        let results = narrow_all::<R>(envelopes.unwrap_or_default())?;

        debug!(kind = %R::KIND, count = results.len(), "[registry] Listed records");
        Ok(results)
    }

    /// Submit a new record.
    pub async fn create(&self, body: R) -> Result<(), RegistryError> {
        let envelope = Envelope::new(body)?;
        let payload =
            serde_json::to_value(&envelope).map_err(|e| RegistryError::Encode(e.to_string()))?;

        let request =
            Request::new(Method::Post, R::COLLECTION, AuthMode::Authenticated).with_body(payload);
        self.transport.execute(request).await?;

        info!(kind = %R::KIND, id = %envelope.id, "[registry] Created record");
        Ok(())
    }
}

/// Narrow every envelope to `R`, preserving order. Fails on the first
/// envelope that is not an `R`.
pub fn narrow_all<R: Resource>(
    envelopes: Vec<Unsigned>,
) -> Result<Vec<ResourceResult<R>>, RegistryError> {
    envelopes
        .into_iter()
        .enumerate()
        .map(|(index, envelope)| {
            envelope
                .narrow::<R>()
                .map(ResourceResult::from)
                .map_err(|err| {
                    warn!(index, error = %err, "[registry] Aborting list: bad record");
                    RegistryError::from(err)
                })
        })
        .collect()
}

#[async_trait]
impl<R: Resource> ResourceApi<R> for ResourceClient<R> {
    async fn list(&self, filter: &ListFilter) -> Result<Vec<ResourceResult<R>>, RegistryError> {
        ResourceClient::list(self, filter).await
    }

    async fn create(&self, body: R) -> Result<(), RegistryError> {
        ResourceClient::create(self, body).await
    }
}
