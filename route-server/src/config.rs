//! Server configuration from environment variables.

use std::net::SocketAddr;
use std::path::PathBuf;
use std::time::Duration;

use crate::network::{NetworkClient, NetworkClientConfig, NetworkError, NetworkSource};

pub const ADDR_VAR: &str = "ROUTE_SERVER_ADDR";
pub const DATA_FILE_VAR: &str = "ROUTE_DATA_FILE";
pub const DATA_URL_VAR: &str = "ROUTE_DATA_URL";
pub const REFRESH_VAR: &str = "ROUTE_DATA_REFRESH_SECS";
pub const STATIC_DIR_VAR: &str = "ROUTE_STATIC_DIR";

const DEFAULT_ADDR: &str = "127.0.0.1:3000";
const DEFAULT_REFRESH_SECS: u64 = 3600;
const DEFAULT_STATIC_DIR: &str = "static";

/// Error from reading the server configuration.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ConfigError {
    /// Neither a data file nor a data URL was given
    #[error("set ROUTE_DATA_FILE or ROUTE_DATA_URL to locate the network dataset")]
    MissingDataSource,

    /// A variable is set but cannot be parsed
    #[error("invalid {var} {value:?}: {reason}")]
    Invalid {
        var: &'static str,
        value: String,
        reason: String,
    },
}

/// Where the network dataset is read from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DataLocation {
    File(PathBuf),
    Url(String),
}

/// Server configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServerConfig {
    /// Address to listen on
    pub addr: SocketAddr,

    /// Network dataset location
    pub data: DataLocation,

    /// How often to reload the dataset; `None` disables reloading
    pub refresh_interval: Option<Duration>,

    /// Directory served under `/static`
    pub static_dir: PathBuf,
}

impl ServerConfig {
    /// Read the configuration from the process environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|var| std::env::var(var).ok())
    }

    /// Read the configuration through `lookup`, which maps a variable name
    /// to its value. Empty values count as unset.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |var: &str| lookup(var).filter(|value| !value.trim().is_empty());

        let addr_value = get(ADDR_VAR).unwrap_or_else(|| DEFAULT_ADDR.to_string());
        let addr = addr_value
            .trim()
            .parse()
            .map_err(|e: std::net::AddrParseError| ConfigError::Invalid {
                var: ADDR_VAR,
                value: addr_value.clone(),
                reason: e.to_string(),
            })?;

        let data = match (get(DATA_FILE_VAR), get(DATA_URL_VAR)) {
            (Some(path), _) => DataLocation::File(PathBuf::from(path)),
            (None, Some(url)) => DataLocation::Url(url),
            (None, None) => return Err(ConfigError::MissingDataSource),
        };

        let refresh_secs = match get(REFRESH_VAR) {
            Some(value) => {
                value
                    .trim()
                    .parse::<u64>()
                    .map_err(|e| ConfigError::Invalid {
                        var: REFRESH_VAR,
                        value: value.clone(),
                        reason: e.to_string(),
                    })?
            }
            None => DEFAULT_REFRESH_SECS,
        };
        let refresh_interval = (refresh_secs > 0).then(|| Duration::from_secs(refresh_secs));

        let static_dir =
            PathBuf::from(get(STATIC_DIR_VAR).unwrap_or_else(|| DEFAULT_STATIC_DIR.to_string()));

        Ok(Self {
            addr,
            data,
            refresh_interval,
            static_dir,
        })
    }

    /// Build the dataset source this configuration points at.
    pub fn network_source(&self) -> Result<NetworkSource, NetworkError> {
        match &self.data {
            DataLocation::File(path) => Ok(NetworkSource::File(path.clone())),
            DataLocation::Url(url) => {
                let client = NetworkClient::new(NetworkClientConfig::new(url.as_str()))?;
                Ok(NetworkSource::Url(client))
            }
        }
    }
}
