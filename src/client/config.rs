use crate::{Error, Result};
use std::{str::FromStr, time::Duration};
use url::Url;

const DEFAULT_PORT: u16 = 6379;
const DEFAULT_CONNECT_TIMEOUT: Duration = Duration::from_secs(2);
const DEFAULT_READ_WRITE_TIMEOUT: Duration = Duration::from_secs(5);

/// Client configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub server: ServerConfig,
    /// Maximum time to wait when establishing a TCP connection.
    ///
    /// The default is 2 seconds.
    pub connect_timeout: Duration,
    /// Maximum time to block on a socket read or write.
    ///
    /// The default is 5 seconds.
    pub read_write_timeout: Duration,
    /// Enable/disable the use of Nagle's algorithm (default `true`)
    pub no_delay: bool,
    /// Enable/disable TCP keep-alive probing (default `None`)
    pub keep_alive: Option<Duration>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            server: ServerConfig::default(),
            connect_timeout: DEFAULT_CONNECT_TIMEOUT,
            read_write_timeout: DEFAULT_READ_WRITE_TIMEOUT,
            no_delay: true,
            keep_alive: None,
        }
    }
}

/// The server side of a [`Config`]: one endpoint, or an ordered pool of
/// endpoints sharded over a consistent-hash ring.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ServerConfig {
    Standalone { host: String, port: u16 },
    Sharded(Vec<(String, u16)>),
}

impl Default for ServerConfig {
    fn default() -> Self {
        ServerConfig::Standalone {
            host: "127.0.0.1".to_owned(),
            port: DEFAULT_PORT,
        }
    }
}

impl FromStr for Config {
    type Err = Error;

    /// Builds a config from a `redis://host[:port]` URI or a standard
    /// `host[:port]` address.
    fn from_str(str: &str) -> Result<Config> {
        if str.contains("://") {
            Self::parse_uri(str)
        } else {
            Self::parse_addr(str)
        }
        .ok_or_else(|| Error::Config(format!("cannot parse config from '{str}'")))
    }
}

impl Config {
    fn parse_uri(str: &str) -> Option<Config> {
        let uri = Url::parse(str).ok()?;
        if uri.scheme() != "redis" {
            return None;
        }
        let host = uri.host_str()?;
        let port = uri.port().unwrap_or(DEFAULT_PORT);

        Some(Config {
            server: ServerConfig::Standalone {
                host: host.to_owned(),
                port,
            },
            ..Default::default()
        })
    }

    fn parse_addr(str: &str) -> Option<Config> {
        let mut iter = str.split(':');

        let server = match (iter.next(), iter.next(), iter.next()) {
            (Some(host), Some(port), None) if !host.is_empty() => ServerConfig::Standalone {
                host: host.to_owned(),
                port: port.parse::<u16>().ok()?,
            },
            (Some(host), None, None) if !host.is_empty() => ServerConfig::Standalone {
                host: host.to_owned(),
                port: DEFAULT_PORT,
            },
            _ => return None,
        };

        Some(Config {
            server,
            ..Default::default()
        })
    }
}

/// Types accepted wherever a configuration is expected.
pub trait IntoConfig {
    fn into_config(self) -> Result<Config>;
}

impl IntoConfig for Config {
    fn into_config(self) -> Result<Config> {
        Ok(self)
    }
}

impl IntoConfig for &str {
    fn into_config(self) -> Result<Config> {
        self.parse()
    }
}

impl IntoConfig for String {
    fn into_config(self) -> Result<Config> {
        self.parse()
    }
}

impl IntoConfig for Url {
    fn into_config(self) -> Result<Config> {
        self.as_str().parse()
    }
}

impl IntoConfig for (&str, u16) {
    fn into_config(self) -> Result<Config> {
        Ok(Config {
            server: ServerConfig::Standalone {
                host: self.0.to_owned(),
                port: self.1,
            },
            ..Default::default()
        })
    }
}

impl IntoConfig for (String, u16) {
    fn into_config(self) -> Result<Config> {
        Ok(Config {
            server: ServerConfig::Standalone {
                host: self.0,
                port: self.1,
            },
            ..Default::default()
        })
    }
}

/// A list of addresses configures a sharded client; the pool order is the
/// given order.
impl IntoConfig for Vec<(String, u16)> {
    fn into_config(self) -> Result<Config> {
        if self.is_empty() {
            return Err(Error::Config("a sharded client needs at least one node".to_owned()));
        }
        Ok(Config {
            server: ServerConfig::Sharded(self),
            ..Default::default()
        })
    }
}

impl IntoConfig for Vec<(&str, u16)> {
    fn into_config(self) -> Result<Config> {
        self.into_iter()
            .map(|(host, port)| (host.to_owned(), port))
            .collect::<Vec<_>>()
            .into_config()
    }
}
