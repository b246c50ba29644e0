use serde::{Deserialize, Serialize};

/// Connection settings, loaded from a JSON file or built in code.
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq, Eq)]
pub struct Config {
    #[serde(default = "default_host")]
    pub host: String,
    #[serde(default = "default_port")]
    pub port: String,

    /// Per-request timeout handed to the transport; `None` waits indefinitely.
    #[serde(default)]
    pub timeout_secs: Option<u64>,

    /// Fallback `tracing` filter when `RUST_LOG` is not set
    #[serde(default = "default_log_filter")]
    pub log_filter: String,
}

fn default_host() -> String {
    "localhost".to_string()
}

fn default_port() -> String {
    "9200".to_string()
}

fn default_log_filter() -> String {
    "searchlink=info,searchlink_rs=info".to_string()
}

impl Config {
    pub fn load(path: &str) -> anyhow::Result<Self> {
        let contents = std::fs::read_to_string(path)?;
        let config: Config = serde_json::from_str(&contents)?;
        Ok(config)
    }

    pub fn base_url(&self) -> String {
        format!("http://{}:{}", self.host, self.port)
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            timeout_secs: None,
            log_filter: default_log_filter(),
        }
    }
}
