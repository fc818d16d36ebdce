use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::net::SocketAddr;
use std::path::PathBuf;
use std::time::Duration;

/// Server configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ServerConfig {
    /// Server bind address
    #[serde(default = "default_bind_addr")]
    pub bind_addr: String,

    /// Server port
    #[serde(default = "default_port")]
    pub port: u16,

    /// Whole-request timeout in seconds (must exceed the vendor timeout)
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,

    /// Vendor call timeout in seconds
    #[serde(default = "default_upstream_timeout_secs")]
    pub upstream_timeout_secs: u64,

    /// Maximum request body size in MB (images arrive base64-encoded)
    #[serde(default = "default_max_body_size_mb")]
    pub max_body_size_mb: usize,

    /// Enable CORS
    #[serde(default = "default_true")]
    pub enable_cors: bool,

    /// Log level
    #[serde(default = "default_log_level")]
    pub log_level: String,

    /// Directory holding the built SPA (`index.html` plus assets)
    #[serde(default = "default_static_dir")]
    pub static_dir: PathBuf,

    /// Dotenv file used as the last-resort environment source
    #[serde(default = "default_env_file")]
    pub env_file: PathBuf,

    /// Environment bindings injected by the hosting runtime; highest precedence
    #[serde(default)]
    pub bindings: HashMap<String, String>,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind_addr: default_bind_addr(),
            port: default_port(),
            timeout_secs: default_timeout_secs(),
            upstream_timeout_secs: default_upstream_timeout_secs(),
            max_body_size_mb: default_max_body_size_mb(),
            enable_cors: default_true(),
            log_level: default_log_level(),
            static_dir: default_static_dir(),
            env_file: default_env_file(),
            bindings: HashMap::new(),
        }
    }
}

impl ServerConfig {
    /// Load configuration from environment variables and config files
    pub fn load() -> anyhow::Result<Self> {
        let builder = config::Config::builder()
            // Load from file if exists
            .add_source(config::File::with_name("gateway").required(false))
            // Override with environment variables, e.g. IDGATE__PORT=9000
            .add_source(config::Environment::with_prefix("IDGATE").separator("__"));

        let config: ServerConfig = builder.build()?.try_deserialize()?;
        config.validate()?;
        Ok(config)
    }

    /// Reject settings that cannot work together.
    pub fn validate(&self) -> anyhow::Result<()> {
        if self.upstream_timeout_secs == 0 {
            anyhow::bail!("upstream_timeout_secs must be greater than zero");
        }
        if self.timeout_secs <= self.upstream_timeout_secs {
            anyhow::bail!(
                "timeout_secs ({}) must exceed upstream_timeout_secs ({}) so degraded answers can still be sent",
                self.timeout_secs,
                self.upstream_timeout_secs
            );
        }
        Ok(())
    }

    /// Get the socket address to bind to
    pub fn socket_addr(&self) -> anyhow::Result<SocketAddr> {
        let addr_str = format!("{}:{}", self.bind_addr, self.port);
        Ok(addr_str.parse()?)
    }

    /// Get request timeout as Duration
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    /// Get vendor call timeout as Duration
    pub fn upstream_timeout(&self) -> Duration {
        Duration::from_secs(self.upstream_timeout_secs)
    }

    /// Get max body size in bytes
    pub fn max_body_size(&self) -> usize {
        self.max_body_size_mb * 1024 * 1024
    }
}

fn default_bind_addr() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    8080
}

fn default_timeout_secs() -> u64 {
    30
}

fn default_upstream_timeout_secs() -> u64 {
    10
}

fn default_max_body_size_mb() -> usize {
    10
}

fn default_true() -> bool {
    true
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_static_dir() -> PathBuf {
    PathBuf::from("dist")
}

fn default_env_file() -> PathBuf {
    PathBuf::from(".env")
}
