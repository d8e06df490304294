//! Configuration for purchases service module

use serde::{Deserialize, Serialize};

/// Purchases service configuration
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
pub struct Config {
    /// Application name used in `X-{name}-alert` style headers
    #[serde(default = "default_application_name")]
    pub application_name: String,

    /// Page size used when the request has none (or an invalid one)
    #[serde(default = "default_page_size")]
    pub default_page_size: u64,

    /// Upper bound for requested page sizes
    #[serde(default = "default_max_page_size")]
    pub max_page_size: u64,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            application_name: default_application_name(),
            default_page_size: default_page_size(),
            max_page_size: default_max_page_size(),
        }
    }
}

fn default_application_name() -> String {
    "greenFirmHouseApp".to_string()
}

fn default_page_size() -> u64 {
    20
}

fn default_max_page_size() -> u64 {
    2000
}
