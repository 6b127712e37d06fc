//! # Outbound Ports
//!
//! The transport the client drives. Authentication, retries and connection
//! management live behind this trait.

use crate::domain::{Request, Response, TransportError};
use async_trait::async_trait;
use parking_lot::Mutex;
use std::collections::VecDeque;

/// Registry transport - outbound port.
///
/// Implementations must be safe to call concurrently. A cancelled or timed
/// out call should return promptly with [`TransportError::Cancelled`] or
/// [`TransportError::Timeout`].
#[async_trait]
pub trait Transport: Send + Sync {
    /// Execute one request and return the successful response.
    async fn execute(&self, request: Request) -> Result<Response, TransportError>;
}

// =============================================================================
// Mock Implementation for Testing
// =============================================================================

/// Mock transport that records requests and replays scripted responses.
///
/// With no scripted response left it answers `200` with an empty body.
#[derive(Default)]
pub struct MockTransport {
    requests: Mutex<Vec<Request>>,
    responses: Mutex<VecDeque<Result<Response, TransportError>>>,
}

impl MockTransport {
    /// Create a mock with no scripted responses.
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue a response for the next call.
    pub fn push_response(&self, response: Result<Response, TransportError>) {
        self.responses.lock().push_back(response);
    }

    /// Builder-style method to queue a response.
    pub fn with_response(self, response: Result<Response, TransportError>) -> Self {
        self.push_response(response);
        self
    }

    /// Requests received so far, in order.
    pub fn requests(&self) -> Vec<Request> {
        self.requests.lock().clone()
    }

    /// Number of requests received.
    pub fn request_count(&self) -> usize {
        self.requests.lock().len()
    }
}

#[async_trait]
impl Transport for MockTransport {
    async fn execute(&self, request: Request) -> Result<Response, TransportError> {
        self.requests.lock().push(request);
        self.responses
            .lock()
            .pop_front()
            .unwrap_or_else(|| Ok(Response::empty(200)))
    }
}
