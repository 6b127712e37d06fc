//! # Service Layer
//!
//! Typed clients per collection and the facade that creates them.

pub mod environments;
pub mod orgs;
pub mod projects;
pub mod registry;
pub mod resource_client;
pub mod services;

pub use environments::EnvironmentsClient;
pub use orgs::OrgsClient;
pub use projects::ProjectsClient;
pub use registry::RegistryClient;
pub use resource_client::{narrow_all, ResourceClient};
pub use services::ServicesClient;
