/*!
The client facade: configuration, dynamic command dispatch and pipelining.

A [`Client`] resolves a command name through its [catalog](crate::commands),
hands the resulting command to its connection (a single endpoint or a
consistent-hash-sharded pool, chosen by the [`Config`]), and returns the
shaped reply. Inside a [`pipeline`](Client::pipeline) scope, submissions are
buffered and replayed in two phases.
*/

mod client;
mod config;
mod pipeline;

pub use client::*;
pub use config::*;
pub use pipeline::*;
