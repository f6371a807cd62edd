/*!
Types related to the line-oriented Redis wire protocol and their
encoding/decoding.

# Object Model

The enum [`Value`] is a generic Rust data structure over the protocol's reply
kinds: status, error, bulk, multibulk and integer replies, plus the shaped
forms (booleans, maps) that response shapers produce.

# Requests

A request is a verb plus an ordered list of byte-string arguments
([`CommandArg`]). Caller values are converted through the [`ToArgs`] trait;
lists expand to several arguments and lists of pairs flatten in order, which
is how mapping-shaped calls (`MSET`, ...) are expressed.

Three request framings exist on the wire ([`RequestEncoding`]): inline
(space-joined, unframed), bulk (last argument length-prefixed) and multi-bulk
(every argument length-prefixed, verb included in the element count).
*/

mod command_arg;
mod reply_parser;
mod request_encoder;
mod value;

pub use command_arg::*;
pub use reply_parser::*;
pub use request_encoder::*;
pub use value::*;
