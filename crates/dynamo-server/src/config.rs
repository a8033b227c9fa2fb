//! Server configuration.

use std::net::SocketAddr;

/// Server configuration.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Address to bind the server to.
    pub bind_address: SocketAddr,

    /// Allow any origin/method/header via CORS. The browser frontend is
    /// served elsewhere, so this is on by default.
    pub enable_cors: bool,

    /// Abort a request when the model returns unparseable JSON instead of
    /// skipping the affected group.
    pub strict: bool,

    /// Emit per-group cost-estimate log lines for every request.
    pub verbose: bool,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind_address: "127.0.0.1:8080".parse().unwrap(),
            enable_cors: true,
            strict: false,
            verbose: false,
        }
    }
}

impl ServerConfig {
    /// Create a config with defaults.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the bind address.
    pub fn with_bind_address(mut self, addr: SocketAddr) -> Self {
        self.bind_address = addr;
        self
    }

    /// Enable or disable permissive CORS.
    pub fn with_cors(mut self, enabled: bool) -> Self {
        self.enable_cors = enabled;
        self
    }

    /// Enable or disable strict parse-failure handling.
    pub fn with_strict(mut self, strict: bool) -> Self {
        self.strict = strict;
        self
    }

    /// Enable or disable verbose cost logging.
    pub fn with_verbose(mut self, verbose: bool) -> Self {
        self.verbose = verbose;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_builder() {
        let config = ServerConfig::new()
            .with_bind_address("0.0.0.0:9000".parse().unwrap())
            .with_cors(false)
            .with_strict(true)
            .with_verbose(true);

        assert_eq!(config.bind_address.port(), 9000);
        assert!(!config.enable_cors);
        assert!(config.strict);
        assert!(config.verbose);
    }
}
