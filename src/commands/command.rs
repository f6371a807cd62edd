use crate::{
    Result,
    commands::shapers,
    resp::{CommandArgs, RequestEncoding, Value, encode_request},
};
use bytes::BytesMut;
use std::{
    borrow::Cow,
    fmt::{self, Write},
};

/// A pure function turning a parsed reply into the logical value returned to
/// the caller.
pub type ResponseShaper = fn(Value) -> Result<Value>;

/// A pure transform of the raw argument list, applied before serialization.
pub type ArgFilter = fn(CommandArgs) -> Result<CommandArgs>;

/// Immutable description of a registered command verb.
#[derive(Debug, Clone)]
pub struct CommandDescriptor {
    verb: Cow<'static, str>,
    encoding: RequestEncoding,
    shaper: ResponseShaper,
    shardable: bool,
    closes_connection: bool,
    filter: Option<ArgFilter>,
}

impl CommandDescriptor {
    /// Creates a descriptor with the default concerns: identity shaper,
    /// shardable, does not close the connection, no argument filter.
    #[must_use]
    pub fn new(verb: impl Into<Cow<'static, str>>, encoding: RequestEncoding) -> Self {
        Self {
            verb: verb.into(),
            encoding,
            shaper: shapers::identity,
            shardable: true,
            closes_connection: false,
            filter: None,
        }
    }

    /// Builder function to set the response shaper.
    #[must_use]
    pub fn shaper(mut self, shaper: ResponseShaper) -> Self {
        self.shaper = shaper;
        self
    }

    /// Marks the command as not routable by its first argument.
    #[must_use]
    pub fn not_shardable(mut self) -> Self {
        self.shardable = false;
        self
    }

    /// Marks the command as dropping the connection after the request is
    /// written (`QUIT`, `SHUTDOWN`).
    #[must_use]
    pub fn closes_connection(mut self) -> Self {
        self.closes_connection = true;
        self
    }

    /// Builder function to set the argument filter.
    #[must_use]
    pub fn filter(mut self, filter: ArgFilter) -> Self {
        self.filter = Some(filter);
        self
    }

    /// The uppercase wire verb.
    pub fn verb(&self) -> &str {
        &self.verb
    }

    pub fn encoding(&self) -> RequestEncoding {
        self.encoding
    }

    pub fn is_shardable(&self) -> bool {
        self.shardable
    }
}

/// A descriptor bound to the ordered arguments of one call.
#[derive(Debug, Clone)]
pub struct Command {
    descriptor: CommandDescriptor,
    args: CommandArgs,
}

impl Command {
    /// Binds `args` to `descriptor`, applying the descriptor's argument
    /// filter if it has one.
    pub fn new(descriptor: CommandDescriptor, args: CommandArgs) -> Result<Self> {
        let args = match descriptor.filter {
            Some(filter) => filter(args)?,
            None => args,
        };
        Ok(Self { descriptor, args })
    }

    /// The uppercase wire verb.
    pub fn verb(&self) -> &str {
        &self.descriptor.verb
    }

    pub fn num_args(&self) -> usize {
        self.args.len()
    }

    /// The first argument's bytes when this command routes through the hash
    /// ring; `None` for non-shardable commands or an empty argument list.
    pub fn routing_key(&self) -> Option<&[u8]> {
        if !self.descriptor.shardable {
            return None;
        }
        self.args.first().map(|arg| arg.as_bytes())
    }

    pub fn closes_connection(&self) -> bool {
        self.descriptor.closes_connection
    }

    /// Serializes the request frame into `buf`.
    pub(crate) fn encode(&self, buf: &mut BytesMut) {
        encode_request(
            buf,
            self.descriptor.verb.as_bytes(),
            &self.args,
            self.descriptor.encoding,
        );
    }

    /// Applies the response shaper to a parsed reply.
    pub(crate) fn shape(&self, value: Value) -> Result<Value> {
        (self.descriptor.shaper)(value)
    }
}

impl fmt::Display for Command {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.descriptor.verb)?;
        for arg in &self.args {
            f.write_char(' ')?;
            fmt::Display::fmt(&String::from_utf8_lossy(arg.as_bytes()), f)?;
        }
        Ok(())
    }
}
