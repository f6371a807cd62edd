use crate::{Error, RedisError, Result};
use bytes::Bytes;
use std::fmt::{self, Display, Formatter};

/// A generic Rust data structure over the wire protocol reply kinds.
///
/// The parser produces `SimpleString`, `Boolean` (the status sentinel `OK`),
/// `Integer`, `BulkString`, `Array`, `Error` and `Nil`; response shapers may
/// additionally produce `Boolean` and `Map`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Value {
    SimpleString(String),
    Boolean(bool),
    Integer(i64),
    BulkString(Bytes),
    Array(Vec<Value>),
    Map(Vec<(String, String)>),
    Error(RedisError),
    Nil,
}

impl Value {
    #[inline]
    pub fn is_nil(&self) -> bool {
        matches!(self, Value::Nil)
    }

    /// The raw payload of a bulk reply, if this is one.
    #[inline]
    pub fn as_bytes(&self) -> Option<&[u8]> {
        match self {
            Value::BulkString(bytes) => Some(bytes),
            _ => None,
        }
    }
}

impl Default for Value {
    fn default() -> Self {
        Value::Nil
    }
}

impl Display for Value {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            Value::SimpleString(s) => f.write_str(s),
            Value::Boolean(b) => b.fmt(f),
            Value::Integer(i) => i.fmt(f),
            Value::BulkString(s) => String::from_utf8_lossy(s).fmt(f),
            Value::Array(v) => {
                f.write_str("[")?;
                for (i, value) in v.iter().enumerate() {
                    if i > 0 {
                        f.write_str(", ")?;
                    }
                    value.fmt(f)?;
                }
                f.write_str("]")
            }
            Value::Map(m) => {
                f.write_str("{")?;
                for (i, (key, value)) in m.iter().enumerate() {
                    if i > 0 {
                        f.write_str(", ")?;
                    }
                    write!(f, "{key}: {value}")?;
                }
                f.write_str("}")
            }
            Value::Error(e) => e.fmt(f),
            Value::Nil => f.write_str("nil"),
        }
    }
}

pub(crate) trait ResultValueExt {
    /// Turns an error reply into `Err(Error::Redis)`.
    fn into_result(self) -> Result<Value>;
}

impl ResultValueExt for Result<Value> {
    #[inline]
    fn into_result(self) -> Result<Value> {
        match self {
            Ok(Value::Error(e)) => Err(Error::Redis(e)),
            other => other,
        }
    }
}
