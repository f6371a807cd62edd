//! The built-in argument filters of the default catalog.

use crate::{
    Error, Result,
    resp::{CommandArg, CommandArgs},
};
use smallvec::smallvec;

/// `SLAVEOF` with no arguments detaches the replica: the wire form is the
/// literal `NO ONE`.
pub(crate) fn slaveof_no_one(args: CommandArgs) -> Result<CommandArgs> {
    if args.is_empty() {
        Ok(smallvec![CommandArg::from("NO"), CommandArg::from("ONE")])
    } else {
        Ok(args)
    }
}

/// `SORT key` accepts its options as name/value pairs in any order and
/// rewrites them into the fixed wire suffix
/// `[BY pat] [GET pat]... [LIMIT off cnt] [ASC|DESC] [ALPHA] [STORE dst]`.
pub(crate) fn sort_options(args: CommandArgs) -> Result<CommandArgs> {
    if args.len() <= 1 {
        return Ok(args);
    }

    let mut by = None;
    let mut gets = Vec::new();
    let mut limit = None;
    let mut order = None;
    let mut alpha = false;
    let mut store = None;

    let options = &args[1..];
    let mut i = 0;
    while i < options.len() {
        let name = options[i].as_bytes();
        if name.eq_ignore_ascii_case(b"by") {
            by = Some(option_value(options, i, "by")?);
            i += 2;
        } else if name.eq_ignore_ascii_case(b"get") {
            gets.push(option_value(options, i, "get")?);
            i += 2;
        } else if name.eq_ignore_ascii_case(b"limit") {
            let offset = option_value(options, i, "limit")?;
            let count = option_value(options, i + 1, "limit")?;
            limit = Some((offset, count));
            i += 3;
        } else if name.eq_ignore_ascii_case(b"order") {
            let direction = option_value(options, i, "order")?;
            if direction.as_bytes().eq_ignore_ascii_case(b"asc") {
                order = Some(CommandArg::from("ASC"));
            } else if direction.as_bytes().eq_ignore_ascii_case(b"desc") {
                order = Some(CommandArg::from("DESC"));
            } else {
                return Err(Error::Client(format!(
                    "SORT order must be 'asc' or 'desc', got '{}'",
                    String::from_utf8_lossy(direction.as_bytes())
                )));
            }
            i += 2;
        } else if name.eq_ignore_ascii_case(b"alpha") {
            let truthy = option_value(options, i, "alpha")?;
            alpha = !matches!(truthy.as_bytes(), b"" | b"0" | b"false");
            i += 2;
        } else if name.eq_ignore_ascii_case(b"store") {
            store = Some(option_value(options, i, "store")?);
            i += 2;
        } else {
            return Err(Error::Client(format!(
                "unknown SORT option '{}'",
                String::from_utf8_lossy(name)
            )));
        }
    }

    let mut out: CommandArgs = smallvec![args[0].clone()];
    if let Some(pattern) = by {
        out.push(CommandArg::from("BY"));
        out.push(pattern);
    }
    for pattern in gets {
        out.push(CommandArg::from("GET"));
        out.push(pattern);
    }
    if let Some((offset, count)) = limit {
        out.push(CommandArg::from("LIMIT"));
        out.push(offset);
        out.push(count);
    }
    if let Some(direction) = order {
        out.push(direction);
    }
    if alpha {
        out.push(CommandArg::from("ALPHA"));
    }
    if let Some(destination) = store {
        out.push(CommandArg::from("STORE"));
        out.push(destination);
    }
    Ok(out)
}

fn option_value(options: &[CommandArg], i: usize, name: &str) -> Result<CommandArg> {
    options
        .get(i + 1)
        .cloned()
        .ok_or_else(|| Error::Client(format!("SORT option '{name}' expects a value")))
}
