// Test harness for integration tests
// Provides utilities to start/stop the greetcard server for testing

use std::net::TcpListener;
use std::path::{Path, PathBuf};
use std::process::{Child, Command, Stdio};
use std::thread;
use std::time::Duration;

/// Greetcard server instance that automatically starts and stops
pub struct ServerTestHarness {
    process: Option<Child>,
    _config_dir: tempfile::TempDir,
    pub port: u16,
    pub base_url: String,
}

/// Ask the OS for a port that is free right now
pub fn free_port() -> u16 {
    TcpListener::bind("127.0.0.1:0")
        .and_then(|listener| listener.local_addr())
        .map(|addr| addr.port())
        .unwrap_or(18080)
}

/// Config file contents using the assets shipped with the crate
pub fn config_yaml(port: u16, font: &Path) -> String {
    let root = Path::new(env!("CARGO_MANIFEST_DIR"));
    format!(
        r##"
server:
  address: "127.0.0.1"
  port: {port}
  threads: 2
  max_body_size: 2048
  max_text_chars: 32
style:
  base_image: "{base}"
  font: "{font}"
logging:
  format: json
  level: warn
"##,
        port = port,
        base = root.join("assets/card.png").display(),
        font = font.display(),
    )
}

/// Path of a font shipped with the crate
pub fn shipped_font() -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR")).join("assets/fonts/DejaVuSans-Bold.ttf")
}

impl ServerTestHarness {
    /// Start the server with the shipped assets on a free port
    pub fn start() -> Result<Self, String> {
        Self::start_with_font(&shipped_font())
    }

    /// Start the server with a specific font path (which need not exist)
    pub fn start_with_font(font: &Path) -> Result<Self, String> {
        let port = free_port();
        let config_dir = tempfile::tempdir().map_err(|e| format!("Failed to create temp dir: {}", e))?;
        let config_path = config_dir.path().join("config.yaml");
        std::fs::write(&config_path, config_yaml(port, font))
            .map_err(|e| format!("Failed to write config: {}", e))?;

        let mut child = Command::new(env!("CARGO_BIN_EXE_greetcard"))
            .arg("--config")
            .arg(&config_path)
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .spawn()
            .map_err(|e| format!("Failed to start server: {}", e))?;

        let base_url = format!("http://127.0.0.1:{}", port);
        let client = reqwest::blocking::Client::builder()
            .timeout(Duration::from_secs(5))
            .build()
            .map_err(|e| format!("Failed to create HTTP client: {}", e))?;

        // Try a few times to connect
        for _ in 0..20 {
            if let Ok(Some(status)) = child.try_wait() {
                return Err(format!("Server exited immediately with status: {}", status));
            }

            if let Ok(response) = client.get(format!("{}/health", base_url)).send() {
                if response.status().is_success() {
                    return Ok(ServerTestHarness {
                        process: Some(child),
                        _config_dir: config_dir,
                        port,
                        base_url,
                    });
                }
            }

            thread::sleep(Duration::from_millis(250));
        }

        let _ = child.kill();
        let _ = child.wait();
        Err(format!("Server did not respond on port {}", port))
    }

    /// Get the full URL for a path
    pub fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    /// HTTP client with a generous timeout for card rendering
    pub fn client(&self) -> reqwest::blocking::Client {
        reqwest::blocking::Client::builder()
            .timeout(Duration::from_secs(60))
            .build()
            .unwrap_or_default()
    }

    /// Stop the server (called automatically on drop)
    pub fn stop(&mut self) {
        if let Some(mut child) = self.process.take() {
            let _ = child.kill();
            let _ = child.wait();
        }
    }
}

impl Drop for ServerTestHarness {
    fn drop(&mut self) {
        self.stop();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_yaml_is_valid() {
        let yaml = config_yaml(18080, &shipped_font());
        let config = greetcard::config::Config::from_yaml_with_env(&yaml).unwrap();
        config.validate().unwrap();
        assert_eq!(config.server.port, 18080);
        assert_eq!(config.server.max_text_chars, Some(32));
    }

    #[test]
    #[ignore] // Starts the server binary
    fn test_harness_starts_and_stops() {
        let mut harness = ServerTestHarness::start().expect("server should start");
        assert_eq!(harness.base_url, format!("http://127.0.0.1:{}", harness.port));
        harness.stop();
    }
}
