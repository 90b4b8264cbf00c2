//! Validated server configuration.

use axum::http::HeaderValue;
use marketplace_core::StorageBackend;
use std::net::{IpAddr, SocketAddr};
use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("invalid listen host `{0}`; expected an IP address")]
    InvalidHost(String),
    #[error("invalid front url `{0}`; expected an http(s) origin")]
    InvalidFrontUrl(String),
}

#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub bind_addr: SocketAddr,
    pub image_dir: PathBuf,
    /// Origin allowed by CORS.
    pub front_url: HeaderValue,
    pub storage: StorageBackend,
}

impl ServerConfig {
    /// Validates raw settings into a server configuration.
    ///
    /// # Errors
    /// - `InvalidHost` when `host` is not an IP address.
    /// - `InvalidFrontUrl` when `front_url` is not an `http://` or
    ///   `https://` origin usable as a header value.
    pub fn new(
        host: &str,
        port: u16,
        image_dir: impl Into<PathBuf>,
        front_url: &str,
        storage: StorageBackend,
    ) -> Result<Self, ConfigError> {
        let ip: IpAddr = host
            .trim()
            .parse()
            .map_err(|_| ConfigError::InvalidHost(host.to_string()))?;

        let origin = front_url.trim().trim_end_matches('/');
        if !(origin.starts_with("http://") || origin.starts_with("https://")) {
            return Err(ConfigError::InvalidFrontUrl(front_url.to_string()));
        }
        let front_url = HeaderValue::from_str(origin)
            .map_err(|_| ConfigError::InvalidFrontUrl(front_url.to_string()))?;

        Ok(Self {
            bind_addr: SocketAddr::new(ip, port),
            image_dir: image_dir.into(),
            front_url,
            storage,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::{ConfigError, ServerConfig};
    use marketplace_core::StorageBackend;

    fn json_backend() -> StorageBackend {
        StorageBackend::JsonFile {
            path: "items.json".into(),
        }
    }

    #[test]
    fn new_builds_bind_address_and_origin() {
        let config = ServerConfig::new(
            "0.0.0.0",
            9000,
            "images",
            "http://localhost:3000/",
            json_backend(),
        )
        .unwrap();

        assert_eq!(config.bind_addr.to_string(), "0.0.0.0:9000");
        assert_eq!(config.front_url, "http://localhost:3000");
    }

    #[test]
    fn new_rejects_bad_host_and_origin() {
        let err = ServerConfig::new("localhost", 9000, "images", "http://x", json_backend())
            .unwrap_err();
        assert_eq!(err, ConfigError::InvalidHost("localhost".to_string()));

        let err =
            ServerConfig::new("127.0.0.1", 9000, "images", "localhost:3000", json_backend())
                .unwrap_err();
        assert!(matches!(err, ConfigError::InvalidFrontUrl(_)));

        let err = ServerConfig::new(
            "127.0.0.1",
            9000,
            "images",
            "http://bad\nhost",
            json_backend(),
        )
        .unwrap_err();
        assert!(matches!(err, ConfigError::InvalidFrontUrl(_)));
    }
}
