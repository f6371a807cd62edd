mod util;
pub(crate) use util::*;

mod client;
