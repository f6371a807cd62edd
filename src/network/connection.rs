use crate::{
    Error, Result, ShardedConnection, StandaloneConnection,
    client::{Config, ServerConfig},
    commands::Command,
    resp::Value,
};

/// Polymorphic single-endpoint-or-ring transport with an identical contract.
#[allow(clippy::large_enum_variant)]
pub enum Connection {
    Standalone(StandaloneConnection),
    Sharded(ShardedConnection),
}

impl Connection {
    pub fn new(config: &Config) -> Self {
        match &config.server {
            ServerConfig::Standalone { host, port } => {
                Connection::Standalone(StandaloneConnection::new(host, *port, config))
            }
            ServerConfig::Sharded(nodes) => {
                Connection::Sharded(ShardedConnection::new(nodes, config))
            }
        }
    }

    #[inline]
    pub fn connect(&mut self) -> Result<()> {
        match self {
            Connection::Standalone(connection) => connection.connect(),
            Connection::Sharded(connection) => connection.connect(),
        }
    }

    #[inline]
    pub fn disconnect(&mut self) {
        match self {
            Connection::Standalone(connection) => connection.disconnect(),
            Connection::Sharded(connection) => connection.disconnect(),
        }
    }

    #[inline]
    pub fn is_connected(&self) -> bool {
        match self {
            Connection::Standalone(connection) => connection.is_connected(),
            Connection::Sharded(connection) => connection.is_connected(),
        }
    }

    #[inline]
    pub fn write_command(&mut self, command: &Command) -> Result<()> {
        match self {
            Connection::Standalone(connection) => connection.write_command(command),
            Connection::Sharded(connection) => connection.write_command(command),
        }
    }

    #[inline]
    pub fn read_response(&mut self, command: &Command) -> Result<Value> {
        match self {
            Connection::Standalone(connection) => connection.read_response(command),
            Connection::Sharded(connection) => connection.read_response(command),
        }
    }

    /// The raw escape hatch only exists on a single endpoint: on a sharded
    /// connection there is no key to route by.
    pub fn raw_command(&mut self, bytes: &[u8], expect_reply: bool) -> Result<Value> {
        match self {
            Connection::Standalone(connection) => connection.raw_command(bytes, expect_reply),
            Connection::Sharded(_) => Err(Error::Client(
                "raw commands are not available on a sharded connection".to_owned(),
            )),
        }
    }

    pub fn is_sharded(&self) -> bool {
        matches!(self, Connection::Sharded(_))
    }
}
