//! HTTP boundary configuration from TOML (`[server]` section)

use secscope_domain::{ConfigIssue, ConfigIssueCode};
use serde::{Deserialize, Serialize};
use std::net::SocketAddr;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileServerConfig {
    /// Socket address to listen on.
    pub bind: String,
}

impl Default for FileServerConfig {
    fn default() -> Self {
        Self {
            bind: "127.0.0.1:8080".to_string(),
        }
    }
}

impl FileServerConfig {
    pub fn parse_bind(&self) -> (Option<SocketAddr>, Vec<ConfigIssue>) {
        match self.bind.trim().parse::<SocketAddr>() {
            Ok(addr) => (Some(addr), Vec::new()),
            Err(_) => (
                None,
                vec![ConfigIssue::error(
                    ConfigIssueCode::InvalidBindAddress {
                        value: self.bind.clone(),
                    },
                    format!("server.bind: '{}' is not a socket address", self.bind),
                )],
            ),
        }
    }
}
