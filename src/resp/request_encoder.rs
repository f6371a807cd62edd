use crate::resp::CommandArg;
use bytes::{BufMut, BytesMut};

/// The three request framings of the wire protocol.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RequestEncoding {
    /// `VERB arg1 arg2\r\n`, no length framing.
    ///
    /// Only safe for arguments free of whitespace and newlines.
    Inline,
    /// Inline prefix with the last argument length-prefixed:
    /// `VERB arg1 LEN\r\npayload\r\n`. The payload is 8-bit clean.
    Bulk,
    /// `*<N+1>\r\n` followed by N+1 length-prefixed bulks, verb first.
    /// Every argument is 8-bit clean.
    MultiBulk,
}

/// Serializes one request frame into `buf`.
pub(crate) fn encode_request(
    buf: &mut BytesMut,
    verb: &[u8],
    args: &[CommandArg],
    encoding: RequestEncoding,
) {
    match encoding {
        RequestEncoding::Inline => encode_inline(buf, verb, args),
        RequestEncoding::Bulk => encode_bulk(buf, verb, args),
        RequestEncoding::MultiBulk => encode_multi_bulk(buf, verb, args),
    }
}

fn encode_inline(buf: &mut BytesMut, verb: &[u8], args: &[CommandArg]) {
    buf.put_slice(verb);
    for arg in args {
        buf.put_u8(b' ');
        buf.put_slice(arg.as_bytes());
    }
    buf.put_slice(b"\r\n");
}

fn encode_bulk(buf: &mut BytesMut, verb: &[u8], args: &[CommandArg]) {
    let Some((payload, head)) = args.split_last() else {
        // a bulk command without arguments degenerates to an inline frame
        encode_inline(buf, verb, args);
        return;
    };

    buf.put_slice(verb);
    for arg in head {
        buf.put_u8(b' ');
        buf.put_slice(arg.as_bytes());
    }
    buf.put_u8(b' ');
    let mut itoa_buf = itoa::Buffer::new();
    buf.put_slice(itoa_buf.format(payload.len()).as_bytes());
    buf.put_slice(b"\r\n");
    buf.put_slice(payload.as_bytes());
    buf.put_slice(b"\r\n");
}

fn encode_multi_bulk(buf: &mut BytesMut, verb: &[u8], args: &[CommandArg]) {
    let mut itoa_buf = itoa::Buffer::new();

    buf.put_u8(b'*');
    buf.put_slice(itoa_buf.format(args.len() + 1).as_bytes());
    buf.put_slice(b"\r\n");

    put_bulk(buf, verb);
    for arg in args {
        put_bulk(buf, arg.as_bytes());
    }
}

fn put_bulk(buf: &mut BytesMut, bytes: &[u8]) {
    let mut itoa_buf = itoa::Buffer::new();
    buf.put_u8(b'$');
    buf.put_slice(itoa_buf.format(bytes.len()).as_bytes());
    buf.put_slice(b"\r\n");
    buf.put_slice(bytes);
    buf.put_slice(b"\r\n");
}
