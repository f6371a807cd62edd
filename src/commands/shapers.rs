//! The built-in response shapers of the default catalog.

use crate::{Error, Result, resp::Value};
use memchr::{memchr, memchr_iter};

pub(crate) fn identity(value: Value) -> Result<Value> {
    Ok(value)
}

/// `PING` answers `+PONG`; anything else is not a healthy pong.
pub(crate) fn pong_to_boolean(value: Value) -> Result<Value> {
    let is_pong = match &value {
        Value::SimpleString(s) => s == "PONG",
        Value::BulkString(bytes) => bytes.as_ref() == b"PONG",
        _ => false,
    };
    Ok(Value::Boolean(is_pong))
}

/// Predicate commands answer `:0` on failure; multi-key forms (`DEL`,
/// `EXISTS`, ...) reply with a count, so any non-zero integer is truthy.
pub(crate) fn integer_to_boolean(value: Value) -> Result<Value> {
    match value {
        Value::Integer(i) => Ok(Value::Boolean(i != 0)),
        Value::Boolean(b) => Ok(Value::Boolean(b)),
        Value::Nil => Ok(Value::Boolean(false)),
        _ => Err(Error::Client("expected an integer reply".to_owned())),
    }
}

/// `KEYS` historically answers one space-joined bulk string; the protocol
/// answers a multibulk list. Both shapes yield a list of keys.
pub(crate) fn keys_to_list(value: Value) -> Result<Value> {
    match value {
        Value::Array(values) => Ok(Value::Array(values)),
        Value::Nil => Ok(Value::Array(Vec::new())),
        Value::BulkString(bytes) if bytes.is_empty() => Ok(Value::Array(Vec::new())),
        Value::BulkString(bytes) => {
            let mut keys = Vec::new();
            let mut start = 0;
            for pos in memchr_iter(b' ', &bytes) {
                if pos > start {
                    keys.push(Value::BulkString(bytes.slice(start..pos)));
                }
                start = pos + 1;
            }
            if start < bytes.len() {
                keys.push(Value::BulkString(bytes.slice(start..)));
            }
            Ok(Value::Array(keys))
        }
        _ => Err(Error::Client("expected a bulk or multibulk reply".to_owned())),
    }
}

/// `RANDOMKEY` answers an empty string when the keyspace is empty.
pub(crate) fn empty_to_nil(value: Value) -> Result<Value> {
    match value {
        Value::BulkString(bytes) if bytes.is_empty() => Ok(Value::Nil),
        Value::SimpleString(s) if s.is_empty() => Ok(Value::Nil),
        other => Ok(other),
    }
}

/// `INFO` answers one bulk of CRLF-separated `key:value` lines.
pub(crate) fn info_to_map(value: Value) -> Result<Value> {
    match value {
        Value::BulkString(bytes) => {
            let mut entries = Vec::new();
            for line in bytes.split(|byte| *byte == b'\n') {
                let line = line.strip_suffix(b"\r").unwrap_or(line);
                if line.is_empty() {
                    continue;
                }
                if let Some(colon) = memchr(b':', line) {
                    entries.push((
                        String::from_utf8_lossy(&line[..colon]).into_owned(),
                        String::from_utf8_lossy(&line[colon + 1..]).into_owned(),
                    ));
                }
            }
            Ok(Value::Map(entries))
        }
        _ => Err(Error::Client("expected a bulk reply".to_owned())),
    }
}
