use std::env;
use std::net::{IpAddr, Ipv4Addr, SocketAddr};
use tracing::warn;

const DEFAULT_HOST: &str = "0.0.0.0";
const DEFAULT_PORT: u16 = 3000;

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub server_host: String,
    pub server_port: u16,
    pub seed_demo_data: bool,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            server_host: DEFAULT_HOST.to_string(),
            server_port: DEFAULT_PORT,
            seed_demo_data: true,
        }
    }
}

impl AppConfig {
    pub fn from_env() -> Self {
        Self {
            server_host: env::var("SERVER_HOST")
                .unwrap_or_else(|_| {
                    warn!("SERVER_HOST not set, using {}", DEFAULT_HOST);
                    DEFAULT_HOST.to_string()
                }),
            server_port: match env::var("SERVER_PORT") {
                Ok(raw) => parse_port(&raw),
                Err(_) => {
                    warn!("SERVER_PORT not set, using {}", DEFAULT_PORT);
                    DEFAULT_PORT
                }
            },
            seed_demo_data: env::var("SEED_DEMO_DATA")
                .map(|raw| parse_flag(&raw))
                .unwrap_or(true),
        }
    }

    /// Socket address the API listens on.
    pub fn bind_address(&self) -> SocketAddr {
        let ip = self.server_host.parse::<IpAddr>()
            .unwrap_or_else(|_| {
                warn!("SERVER_HOST '{}' is not an IP address, using {}", self.server_host, DEFAULT_HOST);
                IpAddr::V4(Ipv4Addr::UNSPECIFIED)
            });

        SocketAddr::new(ip, self.server_port)
    }
}

fn parse_port(raw: &str) -> u16 {
    raw.trim().parse().unwrap_or_else(|_| {
        warn!("SERVER_PORT '{}' is invalid, using {}", raw, DEFAULT_PORT);
        DEFAULT_PORT
    })
}

fn parse_flag(raw: &str) -> bool {
    !matches!(raw.trim().to_ascii_lowercase().as_str(), "0" | "false" | "no" | "off")
}
