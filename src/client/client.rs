use crate::{
    Connection, Error, Result,
    client::{Config, IntoConfig, Pipeline},
    commands::{Command, CommandCatalog, CommandDescriptor},
    resp::{ToArgs, Value},
};
use log::debug;

/// A client for a Redis server, or for a consistent-hash-sharded pool of
/// Redis servers.
///
/// One client owns its connections and must not be shared across concurrent
/// contexts: all I/O is blocking and request/reply pairs are strictly
/// ordered per endpoint.
pub struct Client {
    connection: Connection,
    catalog: CommandCatalog,
}

impl Client {
    /// Builds a disconnected client; [`connect`](Client::connect) is
    /// explicit.
    pub fn new(config: impl IntoConfig) -> Result<Self> {
        let config: Config = config.into_config()?;
        Ok(Self {
            connection: Connection::new(&config),
            catalog: CommandCatalog::with_default_commands(),
        })
    }

    /// Establishes the TCP connection(s). Connecting an already-connected
    /// client is a client error.
    pub fn connect(&mut self) -> Result<()> {
        self.connection.connect()
    }

    /// Closes the connection(s). Idempotent.
    pub fn disconnect(&mut self) {
        self.connection.disconnect();
    }

    /// On a sharded client, `true` as soon as any endpoint is connected.
    pub fn is_connected(&self) -> bool {
        self.connection.is_connected()
    }

    /// Dispatches a command by its registered name and returns the shaped
    /// reply.
    ///
    /// ```no_run
    /// # use shardis::{client::Client, Result};
    /// # fn main() -> Result<()> {
    /// # let mut client = Client::new("127.0.0.1:6379")?;
    /// # client.connect()?;
    /// client.execute("set", ("key", "value"))?;
    /// let value = client.execute("get", "key")?;
    /// # Ok(())
    /// # }
    /// ```
    pub fn execute(&mut self, name: &str, args: impl ToArgs) -> Result<Value> {
        let command = self.catalog.resolve(name, args.to_args())?;
        self.send(command)
    }

    /// Sends an already-built command.
    pub fn send(&mut self, command: Command) -> Result<Value> {
        self.connection.write_command(&command)?;
        if command.closes_connection() {
            return Ok(Value::Nil);
        }
        self.connection.read_response(&command)
    }

    /// Runs `block` in a pipeline scope: commands queued inside are written
    /// in one batch, then all replies are read in submission order.
    ///
    /// Any failure inside or around the block discards the result list and
    /// surfaces as [`Error::Pipeline`] carrying the underlying cause.
    /// Pipelines require a single-endpoint connection.
    pub fn pipeline<F>(&mut self, block: F) -> Result<Vec<Value>>
    where
        F: FnOnce(&mut Pipeline) -> Result<()>,
    {
        if self.connection.is_sharded() {
            return Err(Error::Client(
                "pipelines require a single endpoint connection".to_owned(),
            ));
        }

        let mut pipeline = Pipeline::new(&self.catalog);
        let result = block(&mut pipeline);
        let commands = pipeline.into_commands();

        if let Err(e) = result {
            return Err(Error::Pipeline(Box::new(e)));
        }

        self.execute_pipeline(commands)
            .map_err(|e| Error::Pipeline(Box::new(e)))
    }

    fn execute_pipeline(&mut self, commands: Vec<Command>) -> Result<Vec<Value>> {
        debug!("Executing pipeline of {} commands", commands.len());

        for command in &commands {
            self.connection.write_command(command)?;
        }

        let mut replies = Vec::with_capacity(commands.len());
        let mut first_error = None;
        for command in &commands {
            if command.closes_connection() {
                replies.push(Value::Nil);
                continue;
            }
            match self.connection.read_response(command) {
                Ok(value) => replies.push(value),
                // the stream is broken, the remaining replies will never come
                Err(e) if e.invalidates_connection() => return Err(e),
                // server-side failure: keep draining so the stream stays
                // aligned, surface the first one afterwards
                Err(e) => {
                    if first_error.is_none() {
                        first_error = Some(e);
                    }
                    replies.push(Value::Nil);
                }
            }
        }

        match first_error {
            Some(e) => Err(e),
            None => Ok(replies),
        }
    }

    /// Registers a command under `name`, replacing any previous
    /// registration.
    pub fn register_command(&mut self, name: impl Into<String>, descriptor: CommandDescriptor) {
        self.catalog.register(name, descriptor);
    }

    /// Registers a batch of commands.
    pub fn register_commands<N: Into<String>>(
        &mut self,
        commands: impl IntoIterator<Item = (N, CommandDescriptor)>,
    ) {
        self.catalog.register_all(commands);
    }

    /// Escape hatch: writes caller-provided bytes verbatim and optionally
    /// reads one unshaped reply. Not available on a sharded client.
    pub fn raw_command(&mut self, bytes: &[u8], expect_reply: bool) -> Result<Value> {
        self.connection.raw_command(bytes, expect_reply)
    }
}
