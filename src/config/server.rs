//! Server configuration types.
//!
//! Address and port bindings, worker threads and the request limits applied
//! to form submissions. Default values are sourced from `crate::constants`.

use serde::{Deserialize, Serialize};

use crate::constants::{DEFAULT_MAX_BODY_SIZE, DEFAULT_THREADS};

fn default_threads() -> usize {
    DEFAULT_THREADS
}

fn default_max_body_size() -> usize {
    DEFAULT_MAX_BODY_SIZE
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    pub address: String,
    pub port: u16,
    /// Number of worker threads (default: 4)
    #[serde(default = "default_threads")]
    pub threads: usize,
    /// Maximum request body size in bytes (default: 16 KB)
    #[serde(default = "default_max_body_size")]
    pub max_body_size: usize,
    /// Optional cap on the number of characters in the submitted text.
    /// Unset means any non-empty text is composed; the layer size limit
    /// still bounds memory.
    #[serde(default)]
    pub max_text_chars: Option<usize>,
}

impl ServerConfig {
    /// Socket address to listen on, e.g. "0.0.0.0:8080"
    pub fn listen_address(&self) -> String {
        format!("{}:{}", self.address, self.port)
    }
}
