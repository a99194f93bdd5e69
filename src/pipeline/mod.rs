// Request pipeline module - per-request context carried through the Pingora hooks

use std::time::{Duration, Instant};
use uuid::Uuid;

/// Request context that holds information about an HTTP request as it flows
/// through `request_filter` and `logging`
#[derive(Debug, Clone)]
pub struct RequestContext {
    request_id: String,
    method: String,
    path: String,
    started: Instant,
}

impl RequestContext {
    /// Create a new RequestContext from HTTP request information
    /// Automatically generates a unique request ID (UUID v4) and captures the start time
    pub fn new(method: String, path: String) -> Self {
        Self {
            request_id: Uuid::new_v4().to_string(),
            method,
            path,
            started: Instant::now(),
        }
    }

    /// Get the unique request ID
    pub fn request_id(&self) -> &str {
        &self.request_id
    }

    /// Get the HTTP method
    pub fn method(&self) -> &str {
        &self.method
    }

    /// Get the request path
    pub fn path(&self) -> &str {
        &self.path
    }

    /// Record method and path once the request header has been read
    pub fn set_request(&mut self, method: impl Into<String>, path: impl Into<String>) {
        self.method = method.into();
        self.path = path.into();
    }

    /// Time since the context was created
    pub fn elapsed(&self) -> Duration {
        self.started.elapsed()
    }
}

impl Default for RequestContext {
    fn default() -> Self {
        Self::new("GET".to_string(), "/".to_string())
    }
}
