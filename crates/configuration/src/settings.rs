use crate::error::ConfigError;
use serde::Deserialize;
use std::fmt;
use std::net::{IpAddr, SocketAddr};
use url::Url;

/// The root configuration structure for the entire application.
#[derive(Debug, Clone, Deserialize)]
pub struct Settings {
    pub store: StoreSettings,
    pub server: ServerSettings,
}

impl Settings {
    /// Checks every section. Called once at startup, before anything connects.
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.store.backend()?;
        self.server.socket_addr()?;
        Ok(())
    }

    /// Applies command-line overrides on top of the loaded values.
    pub fn apply_overrides(&mut self, overrides: ServerOverrides) {
        if let Some(host) = overrides.host {
            self.server.host = host;
        }
        if let Some(port) = overrides.port {
            self.server.port = port;
        }
    }
}

/// Connection parameters for the persistence service.
#[derive(Clone, Deserialize)]
pub struct StoreSettings {
    /// Either the project URL of a Supabase/PostgREST service or a PostgreSQL connection URL.
    #[serde(default)]
    pub url: String,
    /// The service key for REST stores, or the password for PostgreSQL URLs that carry none.
    #[serde(default)]
    pub key: String,
    /// The table holding school rows.
    pub table: String,
}

/// Which kind of service the store URL points at.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StoreBackend {
    Rest,
    Postgres,
}

impl StoreSettings {
    /// Resolves the backend from the URL scheme and checks the remaining fields for it.
    pub fn backend(&self) -> Result<StoreBackend, ConfigError> {
        if self.url.trim().is_empty() {
            return Err(ConfigError::ValidationError(
                "store URL is not set (SUPABASE_URL)".to_string(),
            ));
        }
        let url = Url::parse(&self.url).map_err(|e| {
            ConfigError::ValidationError(format!("invalid store URL '{}': {}", self.url, e))
        })?;

        let backend = match url.scheme() {
            "http" | "https" => StoreBackend::Rest,
            "postgres" | "postgresql" => StoreBackend::Postgres,
            scheme => {
                return Err(ConfigError::ValidationError(format!(
                    "unsupported store URL scheme: {}",
                    scheme
                )));
            }
        };

        if backend == StoreBackend::Rest && self.key.trim().is_empty() {
            return Err(ConfigError::ValidationError(
                "store key is required for REST stores (SUPABASE_SERVICE_KEY)".to_string(),
            ));
        }
        if self.table.trim().is_empty() {
            return Err(ConfigError::ValidationError(
                "store table name cannot be empty".to_string(),
            ));
        }

        Ok(backend)
    }
}

// The key is a secret; keep it out of logs.
impl fmt::Debug for StoreSettings {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("StoreSettings")
            .field("url", &self.url)
            .field("key", &if self.key.is_empty() { "" } else { "<redacted>" })
            .field("table", &self.table)
            .finish()
    }
}

/// Where the HTTP server listens.
#[derive(Debug, Clone, Deserialize)]
pub struct ServerSettings {
    pub host: String,
    pub port: u16,
}

impl ServerSettings {
    pub fn socket_addr(&self) -> Result<SocketAddr, ConfigError> {
        let ip: IpAddr = self.host.parse().map_err(|_| {
            ConfigError::ValidationError(format!("invalid listen host: {}", self.host))
        })?;
        Ok(SocketAddr::new(ip, self.port))
    }
}

/// Server settings that can be overridden from the command line.
#[derive(Debug, Clone, Default)]
#[cfg_attr(feature = "clap", derive(clap::Args))]
pub struct ServerOverrides {
    /// The address to bind the HTTP server to (e.g., "127.0.0.1").
    #[cfg_attr(feature = "clap", arg(long))]
    pub host: Option<String>,

    /// The port to listen on. Overrides PORT.
    #[cfg_attr(feature = "clap", arg(long))]
    pub port: Option<u16>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn store(url: &str, key: &str) -> StoreSettings {
        StoreSettings {
            url: url.to_string(),
            key: key.to_string(),
            table: "schools".to_string(),
        }
    }

    #[test]
    fn backend_follows_url_scheme() {
        assert_eq!(
            store("https://abc.supabase.co", "secret").backend().unwrap(),
            StoreBackend::Rest
        );
        assert_eq!(
            store("http://localhost:54321", "secret").backend().unwrap(),
            StoreBackend::Rest
        );
        assert_eq!(
            store("postgres://app@localhost/schools", "").backend().unwrap(),
            StoreBackend::Postgres
        );
    }

    #[test]
    fn rejects_missing_or_unsupported_urls() {
        assert!(store("", "secret").backend().is_err());
        assert!(store("not a url", "secret").backend().is_err());
        assert!(store("ftp://example.com", "secret").backend().is_err());
    }

    #[test]
    fn rest_store_requires_a_key() {
        assert!(store("https://abc.supabase.co", "  ").backend().is_err());
    }

    #[test]
    fn debug_output_hides_the_key() {
        let printed = format!("{:?}", store("https://abc.supabase.co", "super-secret"));
        assert!(!printed.contains("super-secret"));
        assert!(printed.contains("<redacted>"));
    }

    #[test]
    fn overrides_replace_server_values() {
        let mut settings = Settings {
            store: store("https://abc.supabase.co", "secret"),
            server: ServerSettings {
                host: "0.0.0.0".to_string(),
                port: 3000,
            },
        };
        settings.apply_overrides(ServerOverrides {
            host: Some("127.0.0.1".to_string()),
            port: None,
        });
        let addr = settings.server.socket_addr().unwrap();
        assert_eq!(addr.to_string(), "127.0.0.1:3000");
    }

    #[test]
    fn invalid_host_fails_validation() {
        let server = ServerSettings {
            host: "example.com".to_string(),
            port: 3000,
        };
        assert!(server.socket_addr().is_err());
    }
}
