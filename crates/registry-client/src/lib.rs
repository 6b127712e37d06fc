//! # Registry Client
//!
//! Typed client for a remote registry of versioned, content-addressed
//! resource records.
//!
//! **Architecture:** Hexagonal (DDD + Ports/Adapters)
//!
//! ## Purpose
//!
//! - List a collection with optional org, project and name filters, and get
//!   back records narrowed to the collection's body type
//! - Create a record: derive its identity from its content, wrap it in a
//!   version 1 envelope and submit it
//!
//! A listing that contains even one record of the wrong type fails as a
//! whole. Nothing partial is returned.
//!
//! ## Module Structure
//!
//! ```text
//! registry-client/
//! ├── domain/      # Errors, filters, requests, result projections
//! ├── ports/       # ResourceApi (inbound), Transport (outbound)
//! ├── adapters/    # HttpTransport (reqwest)
//! ├── service/     # ResourceClient, ServicesClient, RegistryClient, ...
//! └── config.rs    # ClientConfig
//! ```
//!
//! ## Example
//!
//! ```ignore
//! use registry_client::{ClientConfig, RegistryClient};
//!
//! let registry = RegistryClient::from_config(&ClientConfig::from_env())?;
//! let services = registry.services().list(Some(&org_id), None, None).await?;
//! registry.services().create(Some(&org_id), Some(&project_id), "api").await?;
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod adapters;
pub mod config;
pub mod domain;
pub mod ports;
pub mod service;

// Re-exports
pub use adapters::{HttpTransport, REQUEST_ID_HEADER};
pub use config::{ClientConfig, MAX_RETRIES_LIMIT};
pub use domain::{
    AuthMode, ConfigError, EnvironmentResult, ListFilter, Method, OrgResult, ProjectResult,
    QueryParams, RegistryError, Request, ResourceResult, Response, ServiceResult, TransportError,
};
pub use ports::{MockTransport, ResourceApi, Transport};
pub use service::{
    narrow_all, EnvironmentsClient, OrgsClient, ProjectsClient, RegistryClient, ResourceClient,
    ServicesClient,
};

pub use registry_types::{Environment, Identity, Kind, Org, Project, Service};

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
