//! # Domain Module
//!
//! Errors, filters, request values and result projections for the client.

pub mod entities;
pub mod errors;
pub mod filter;
pub mod value_objects;

pub use entities::*;
pub use errors::*;
pub use filter::*;
pub use value_objects::*;
