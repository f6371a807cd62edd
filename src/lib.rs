/*!
shardis is a blocking Redis client for Rust with client-side sharding.

# Philosophy
* Blocking I/O, one socket per endpoint, strict request/response ordering
* Low allocations
* Rust idiomatic API

# Features
* The classic line-oriented Redis wire protocol: inline, bulk and multi-bulk
  request framings; status/error/bulk/multibulk/integer replies
* Dynamic command dispatch through a per-client command catalog;
  custom commands can be registered at runtime
* [Pipelining](https://redis.io/docs/manual/pipelining/) support
* Client-side sharding over a consistent-hash ring of endpoints
* Configuration with a Redis URL, an `host:port` address or a dedicated builder

# Basic Usage

```no_run
use shardis::{client::Client, Result};

fn main() -> Result<()> {
    let mut client = Client::new("127.0.0.1:6379")?;
    client.connect()?;

    // sends the command SET to Redis
    client.execute("set", ("key", "value"))?;

    // sends the command GET to Redis
    let value = client.execute("get", "key")?;
    println!("value: {value}");

    client.disconnect();
    Ok(())
}
```

# Sharding

A client built from several addresses routes each command to one endpoint by
hashing the command's first argument on a consistent-hash ring:

```no_run
use shardis::{client::Client, Result};

fn main() -> Result<()> {
    let mut client = Client::new(vec![
        ("10.0.0.1".to_owned(), 6379),
        ("10.0.0.2".to_owned(), 6379),
    ])?;
    client.connect()?;

    // routed by hashing "key"
    client.execute("set", ("key", "value"))?;

    Ok(())
}
```

Commands without a single deterministic key argument (`PING`, `MGET`,
`KEYS`, server control, ...) are never routed by the ring; they go to the
first endpoint of the pool.

# Pipelining

```no_run
use shardis::{client::Client, Result};

fn main() -> Result<()> {
    let mut client = Client::new("127.0.0.1:6379")?;
    client.connect()?;

    let replies = client.pipeline(|pipeline| {
        pipeline.queue("set", ("key", "value"))?;
        pipeline.queue("incr", "counter")?;
        pipeline.queue("get", "key")?;
        Ok(())
    })?;
    assert_eq!(3, replies.len());

    Ok(())
}
```
*/

pub mod client;
pub mod commands;
mod error;
mod network;
pub mod resp;

pub use error::*;
use network::*;

/// Library general result type.
pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests;
