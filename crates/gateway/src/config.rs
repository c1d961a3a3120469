//! Gateway configuration.

use std::env;
use std::time::Duration;

use common::ServiceConfig;

/// Gateway configuration.
#[derive(Debug, Clone)]
pub struct GatewayConfig {
    /// Bind address and logging defaults
    pub server: ServiceConfig,
    /// Deadline applied to every service call
    pub request_timeout_secs: u64,
}

impl GatewayConfig {
    /// Load configuration from environment variables.
    ///
    /// `SERVER_ADDRESS` takes the `host:port` form; `GATEWAY_HOST` and
    /// `GATEWAY_PORT` override its parts.
    pub fn from_env() -> Self {
        let defaults = Self::default();
        let (address_host, address_port) = env::var("SERVER_ADDRESS")
            .ok()
            .and_then(|address| split_address(&address))
            .unwrap_or((defaults.server.host.clone(), defaults.server.port));

        Self {
            server: ServiceConfig {
                service_name: defaults.server.service_name,
                host: env::var("GATEWAY_HOST").unwrap_or(address_host),
                port: env::var("GATEWAY_PORT")
                    .ok()
                    .and_then(|p| p.parse().ok())
                    .unwrap_or(address_port),
                log_level: env::var("LOG_LEVEL").unwrap_or(defaults.server.log_level),
            },
            request_timeout_secs: env::var("REQUEST_TIMEOUT_SECS")
                .ok()
                .and_then(|t| t.parse().ok())
                .unwrap_or(defaults.request_timeout_secs),
        }
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }
}

impl Default for GatewayConfig {
    fn default() -> Self {
        Self {
            server: ServiceConfig {
                service_name: "gateway".to_string(),
                ..ServiceConfig::default()
            },
            request_timeout_secs: 30,
        }
    }
}

fn split_address(address: &str) -> Option<(String, u16)> {
    let (host, port) = address.rsplit_once(':')?;
    let host = if host.is_empty() { "0.0.0.0" } else { host };
    Some((host.to_string(), port.parse().ok()?))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_split_address() {
        assert_eq!(
            split_address("127.0.0.1:9000"),
            Some(("127.0.0.1".to_string(), 9000))
        );
        assert_eq!(split_address(":8080"), Some(("0.0.0.0".to_string(), 8080)));
        assert_eq!(split_address("localhost"), None);
        assert_eq!(split_address("localhost:http"), None);
    }

    #[test]
    fn test_default_names_the_gateway() {
        let config = GatewayConfig::default();
        assert_eq!(config.server.service_name, "gateway");
        assert_eq!(config.request_timeout(), Duration::from_secs(30));
    }
}
