//! Upload server configuration types

use std::net::SocketAddr;
use std::path::PathBuf;

use crate::steganalysis::ScanConfig;

/// Default listen address for the upload front end.
pub const DEFAULT_LISTEN_ADDR: &str = "127.0.0.1:5001";

/// Largest accepted request body, 500 MiB.
pub const DEFAULT_MAX_UPLOAD_BYTES: usize = 500 * 1024 * 1024;

/// Configuration for the upload server
#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub listen_addr: SocketAddr,
    pub max_upload_bytes: usize,
    /// Directory that per-request scratch directories are created in.
    /// `None` uses the system temp directory.
    pub scratch_parent: Option<PathBuf>,
    /// Discovery settings applied to every uploaded batch
    pub scan: ScanConfig,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            listen_addr: SocketAddr::from(([127, 0, 0, 1], 5001)),
            max_upload_bytes: DEFAULT_MAX_UPLOAD_BYTES,
            scratch_parent: None,
            scan: ScanConfig::default(),
        }
    }
}

impl ServerConfig {
    pub fn builder() -> ServerConfigBuilder {
        ServerConfigBuilder::default()
    }
}

/// Builder for ServerConfig
#[derive(Default)]
pub struct ServerConfigBuilder {
    listen_addr: Option<SocketAddr>,
    max_upload_bytes: Option<usize>,
    scratch_parent: Option<Option<PathBuf>>,
    scan: Option<ScanConfig>,
}

impl ServerConfigBuilder {
    pub fn listen_addr(mut self, addr: SocketAddr) -> Self {
        self.listen_addr = Some(addr);
        self
    }

    pub fn max_upload_bytes(mut self, max: usize) -> Self {
        self.max_upload_bytes = Some(max);
        self
    }

    pub fn scratch_parent(mut self, parent: Option<PathBuf>) -> Self {
        self.scratch_parent = Some(parent);
        self
    }

    pub fn scan(mut self, scan: ScanConfig) -> Self {
        self.scan = Some(scan);
        self
    }

    pub fn build(self) -> ServerConfig {
        let default = ServerConfig::default();
        ServerConfig {
            listen_addr: self.listen_addr.unwrap_or(default.listen_addr),
            max_upload_bytes: self.max_upload_bytes.unwrap_or(default.max_upload_bytes),
            scratch_parent: self.scratch_parent.unwrap_or(default.scratch_parent),
            scan: self.scan.unwrap_or(default.scan),
        }
    }
}
