//! # Adapters Layer (Hexagonal Architecture)
//!
//! Implements the outbound transport port.

mod http_transport;

pub use http_transport::{HttpTransport, REQUEST_ID_HEADER};
