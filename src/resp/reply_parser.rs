use crate::{Error, RedisError, Result, resp::Value};
use bytes::Bytes;
use log::trace;
use std::io::{self, BufRead, Read};

/// Reads one complete reply from the stream, blocking until it is available.
///
/// Recursive descent over the five reply kinds, dispatched on the first byte.
/// An unknown prefix yields [`Error::MalformedResponse`]: the stream can no
/// longer be assumed aligned and the caller must drop the connection.
pub(crate) fn read_reply<R: BufRead>(reader: &mut R) -> Result<Value> {
    let mut prefix = [0u8; 1];
    reader.read_exact(&mut prefix)?;

    match prefix[0] {
        b'+' => read_status(reader),
        b'-' => read_error(reader),
        b'$' => read_bulk(reader),
        b'*' => read_multi_bulk(reader),
        b':' => read_integer(reader),
        unknown => Err(Error::MalformedResponse(format!(
            "unknown reply prefix '{}' (0x{:02x})",
            unknown as char, unknown
        ))),
    }
}

fn read_status<R: BufRead>(reader: &mut R) -> Result<Value> {
    let line = read_line(reader)?;
    trace!("+{}", String::from_utf8_lossy(&line));
    if line == b"OK" {
        Ok(Value::Boolean(true))
    } else {
        Ok(Value::SimpleString(
            String::from_utf8_lossy(&line).into_owned(),
        ))
    }
}

fn read_error<R: BufRead>(reader: &mut R) -> Result<Value> {
    let line = read_line(reader)?;
    trace!("-{}", String::from_utf8_lossy(&line));
    Ok(Value::Error(RedisError::from(
        String::from_utf8_lossy(&line).as_ref(),
    )))
}

fn read_bulk<R: BufRead>(reader: &mut R) -> Result<Value> {
    match read_length(reader, "bulk")? {
        None => Ok(Value::Nil),
        Some(len) => {
            let mut payload = vec![0u8; len];
            reader.read_exact(&mut payload)?;
            read_terminator(reader)?;
            trace!("${len}");
            Ok(Value::BulkString(Bytes::from(payload)))
        }
    }
}

fn read_multi_bulk<R: BufRead>(reader: &mut R) -> Result<Value> {
    match read_length(reader, "multibulk")? {
        None => Ok(Value::Nil),
        Some(len) => {
            trace!("*{len}");
            let mut values = Vec::with_capacity(len);
            for _ in 0..len {
                values.push(read_reply(reader)?);
            }
            Ok(Value::Array(values))
        }
    }
}

fn read_integer<R: BufRead>(reader: &mut R) -> Result<Value> {
    let line = read_line(reader)?;
    // historical quirk: some servers answer the literal text `nil`
    if line == b"nil" {
        return Ok(Value::Nil);
    }
    match atoi::atoi::<i64>(&line) {
        Some(i) => Ok(Value::Integer(i)),
        None => Err(Error::MalformedResponse(format!(
            "integer reply is not numeric: {:?}",
            String::from_utf8_lossy(&line)
        ))),
    }
}

/// Reads a decimal length line. `-1` (and the historical literal `nil`)
/// stands for an absent value and maps to `None`.
fn read_length<R: BufRead>(reader: &mut R, kind: &str) -> Result<Option<usize>> {
    let line = read_line(reader)?;
    if line == b"nil" {
        return Ok(None);
    }
    match atoi::atoi::<i64>(&line) {
        Some(-1) => Ok(None),
        Some(len) if len >= 0 => Ok(Some(len as usize)),
        _ => Err(Error::MalformedResponse(format!(
            "{kind} length is not an integer: {:?}",
            String::from_utf8_lossy(&line)
        ))),
    }
}

/// Reads up to the next LF and returns the line without its CRLF terminator.
fn read_line<R: BufRead>(reader: &mut R) -> Result<Vec<u8>> {
    let mut line = Vec::new();
    reader.read_until(b'\n', &mut line)?;

    if line.is_empty() {
        return Err(Error::Io(io::Error::new(
            io::ErrorKind::UnexpectedEof,
            "connection closed by peer",
        )));
    }
    if !line.ends_with(b"\r\n") {
        return Err(Error::MalformedResponse(
            "reply line is not CRLF terminated".to_owned(),
        ));
    }

    line.truncate(line.len() - 2);
    Ok(line)
}

fn read_terminator<R: Read>(reader: &mut R) -> Result<()> {
    let mut crlf = [0u8; 2];
    reader.read_exact(&mut crlf)?;
    if crlf != *b"\r\n" {
        return Err(Error::MalformedResponse(format!(
            "expected CRLF after bulk payload, got {:?}",
            String::from_utf8_lossy(&crlf)
        )));
    }
    Ok(())
}
