/*!
The command model and the catalog mapping callable names to it.

A [`CommandDescriptor`] records everything the client needs to know about a
verb: its wire spelling, request framing, response shaper, whether its first
argument routes it on a sharded connection, whether it closes the connection,
and an optional argument filter. A [`Command`] is a descriptor bound to the
arguments of one call.

The [`CommandCatalog`] resolves a human name (lowercase verb or stable alias)
into a command; registering new commands is a data entry through
[`CommandCatalog::register`].
*/

mod catalog;
mod command;
mod filters;
mod shapers;

pub use catalog::*;
pub use command::*;
pub(crate) use filters::*;
pub(crate) use shapers::*;
