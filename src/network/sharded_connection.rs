use crate::{
    Error, HashRing, Result, StandaloneConnection, client::Config, commands::Command, resp::Value,
};
use log::trace;

/// An ordered pool of endpoints behind a consistent-hash ring.
///
/// Shardable commands are routed by hashing their first argument; everything
/// else goes to a fixed fallback slot (the first endpoint of the pool).
/// Routing is deterministic, so the reply of a command is read from the same
/// endpoint its request was written to.
pub struct ShardedConnection {
    connections: Vec<StandaloneConnection>,
    ring: HashRing,
}

impl ShardedConnection {
    pub fn new(nodes: &[(String, u16)], config: &Config) -> Self {
        let connections: Vec<StandaloneConnection> = nodes
            .iter()
            .map(|(host, port)| StandaloneConnection::new(host, *port, config))
            .collect();
        let ring = HashRing::with_nodes(connections.iter().map(|c| c.tag().to_owned()));

        Self { connections, ring }
    }

    /// Connects every endpoint of the pool. An individual failure propagates;
    /// there is no fallback across nodes.
    pub fn connect(&mut self) -> Result<()> {
        for connection in &mut self.connections {
            connection.connect()?;
        }
        Ok(())
    }

    pub fn disconnect(&mut self) {
        for connection in &mut self.connections {
            connection.disconnect();
        }
    }

    pub fn is_connected(&self) -> bool {
        self.connections.iter().any(StandaloneConnection::is_connected)
    }

    pub fn write_command(&mut self, command: &Command) -> Result<()> {
        let index = self.route(command)?;
        self.connections[index].write_command(command)
    }

    pub fn read_response(&mut self, command: &Command) -> Result<Value> {
        let index = self.route(command)?;
        self.connections[index].read_response(command)
    }

    fn route(&self, command: &Command) -> Result<usize> {
        let Some(key) = command.routing_key() else {
            return Ok(0);
        };

        let node = self
            .ring
            .get(key)
            .ok_or_else(|| Error::Client("empty hash ring".to_owned()))?;
        let index = self
            .connections
            .iter()
            .position(|connection| connection.tag() == node)
            .ok_or_else(|| Error::Client(format!("no connection for node {node}")))?;

        trace!("Routing {} to {node}", command.verb());
        Ok(index)
    }
}
