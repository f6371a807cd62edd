use crate::{
    Error, Result,
    client::Config,
    commands::Command,
    resp::{ResultValueExt, Value, read_reply},
};
use bytes::BytesMut;
use log::{Level, debug, log_enabled, trace};
use socket2::{SockRef, TcpKeepalive};
use std::{
    io::{self, BufReader, Write},
    net::{TcpStream, ToSocketAddrs},
};

/// A single blocking TCP endpoint.
///
/// The socket is present iff the connection is established; `disconnect` is
/// idempotent and reconnection is explicit. Requests and replies are strictly
/// paired: `write_command` then `read_response`, in that order.
pub struct StandaloneConnection {
    host: String,
    port: u16,
    config: Config,
    stream: Option<BufReader<TcpStream>>,
    buffer: BytesMut,
    tag: String,
}

impl StandaloneConnection {
    pub fn new(host: &str, port: u16, config: &Config) -> Self {
        Self {
            host: host.to_owned(),
            port,
            config: config.clone(),
            stream: None,
            buffer: BytesMut::with_capacity(1024),
            tag: format!("{host}:{port}"),
        }
    }

    pub fn connect(&mut self) -> Result<()> {
        if self.stream.is_some() {
            return Err(Error::Client(format!("[{}] already connected", self.tag)));
        }

        debug!(
            "[{}] Connecting with timeout {:?}...",
            self.tag, self.config.connect_timeout
        );

        let mut last_error = None;
        let mut stream = None;
        for addr in (self.host.as_str(), self.port).to_socket_addrs()? {
            match TcpStream::connect_timeout(&addr, self.config.connect_timeout) {
                Ok(connected) => {
                    stream = Some(connected);
                    break;
                }
                Err(e) => last_error = Some(e),
            }
        }

        let stream = match stream {
            Some(stream) => stream,
            None => {
                return Err(Error::Io(last_error.unwrap_or_else(|| {
                    io::Error::new(
                        io::ErrorKind::AddrNotAvailable,
                        format!("no address resolved for {}", self.tag),
                    )
                })));
            }
        };

        stream.set_read_timeout(Some(self.config.read_write_timeout))?;
        stream.set_write_timeout(Some(self.config.read_write_timeout))?;
        stream.set_nodelay(self.config.no_delay)?;
        if let Some(keep_alive) = self.config.keep_alive {
            SockRef::from(&stream).set_tcp_keepalive(&TcpKeepalive::new().with_time(keep_alive))?;
        }

        self.stream = Some(BufReader::new(stream));
        debug!("[{}] Connected", self.tag);
        Ok(())
    }

    pub fn disconnect(&mut self) {
        if self.stream.take().is_some() {
            debug!("[{}] Disconnected", self.tag);
        }
    }

    pub fn is_connected(&self) -> bool {
        self.stream.is_some()
    }

    /// Serializes `command` and writes the whole frame. A failure mid-write
    /// fails the connection. A command flagged as closing drops the socket
    /// right after the write.
    pub fn write_command(&mut self, command: &Command) -> Result<()> {
        if log_enabled!(Level::Debug) {
            debug!("[{}] Sending command: {command}", self.tag);
        }

        self.buffer.clear();
        command.encode(&mut self.buffer);

        let stream = self
            .stream
            .as_mut()
            .ok_or_else(|| Error::Client(format!("[{}] not connected", self.tag)))?
            .get_mut();

        let result = match stream.write_all(&self.buffer) {
            Ok(()) => stream.flush(),
            Err(e) => Err(e),
        };
        if let Err(e) = result {
            self.disconnect();
            return Err(e.into());
        }

        if command.closes_connection() {
            self.disconnect();
        }
        Ok(())
    }

    /// Reads one reply and runs it through the command's response shaper.
    /// Malformed responses and I/O errors invalidate the connection.
    pub fn read_response(&mut self, command: &Command) -> Result<Value> {
        let stream = self
            .stream
            .as_mut()
            .ok_or_else(|| Error::Client(format!("[{}] not connected", self.tag)))?;

        let result = read_reply(stream)
            .into_result()
            .and_then(|value| command.shape(value));

        match result {
            Err(e) if e.invalidates_connection() => {
                self.disconnect();
                Err(e)
            }
            Ok(value) => {
                if log_enabled!(Level::Trace) {
                    trace!("[{}] Received reply: {value}", self.tag);
                }
                Ok(value)
            }
            err => err,
        }
    }

    /// Writes caller-provided bytes verbatim and optionally reads one
    /// unshaped reply.
    pub fn raw_command(&mut self, bytes: &[u8], expect_reply: bool) -> Result<Value> {
        debug!("[{}] Sending raw command ({} bytes)", self.tag, bytes.len());

        let stream = self
            .stream
            .as_mut()
            .ok_or_else(|| Error::Client(format!("[{}] not connected", self.tag)))?;

        let result = match stream.get_mut().write_all(bytes) {
            Ok(()) => stream.get_mut().flush(),
            Err(e) => Err(e),
        };
        if let Err(e) = result {
            self.disconnect();
            return Err(e.into());
        }

        if !expect_reply {
            return Ok(Value::Nil);
        }

        match read_reply(stream).into_result() {
            Err(e) if e.invalidates_connection() => {
                self.disconnect();
                Err(e)
            }
            result => result,
        }
    }

    pub(crate) fn tag(&self) -> &str {
        &self.tag
    }
}
