use crate::{
    Error, Result,
    client::Client,
    commands::CommandDescriptor,
    resp::{RequestEncoding, Value},
    tests::{MockServer, exchange, init_logs},
};
use bytes::Bytes;

#[test]
fn set_then_get() -> Result<()> {
    init_logs();
    let server = MockServer::start(vec![
        exchange(b"*3\r\n$3\r\nSET\r\n$3\r\nfoo\r\n$3\r\nbar\r\n", b"+OK\r\n"),
        exchange(b"GET foo\r\n", b"$3\r\nbar\r\n"),
    ]);

    let mut client = Client::new(server.addr())?;
    client.connect()?;
    assert!(client.is_connected());

    assert_eq!(Value::Boolean(true), client.execute("set", ("foo", "bar"))?);
    assert_eq!(
        Value::BulkString(Bytes::from_static(b"bar")),
        client.execute("get", "foo")?
    );

    client.disconnect();
    assert!(!client.is_connected());
    server.shutdown();
    Ok(())
}

#[test]
fn get_missing_key_is_nil() -> Result<()> {
    init_logs();
    let server = MockServer::start(vec![exchange(b"GET missing\r\n", b"$-1\r\n")]);

    let mut client = Client::new(server.addr())?;
    client.connect()?;
    assert_eq!(Value::Nil, client.execute("get", "missing")?);

    server.shutdown();
    Ok(())
}

#[test]
fn keys_splits_the_reply() -> Result<()> {
    init_logs();
    let server = MockServer::start(vec![
        exchange(b"KEYS *\r\n", b"$7\r\na b c d\r\n"),
        exchange(b"KEYS *\r\n", b"$0\r\n\r\n"),
        // protocol-correct servers answer a multibulk
        exchange(b"KEYS *\r\n", b"*2\r\n$1\r\na\r\n$1\r\nb\r\n"),
    ]);

    let mut client = Client::new(server.addr())?;
    client.connect()?;

    assert_eq!(
        Value::Array(vec![
            Value::BulkString(Bytes::from_static(b"a")),
            Value::BulkString(Bytes::from_static(b"b")),
            Value::BulkString(Bytes::from_static(b"c")),
            Value::BulkString(Bytes::from_static(b"d")),
        ]),
        client.execute("keys", "*")?
    );
    assert_eq!(Value::Array(Vec::new()), client.execute("keys", "*")?);
    assert_eq!(
        Value::Array(vec![
            Value::BulkString(Bytes::from_static(b"a")),
            Value::BulkString(Bytes::from_static(b"b")),
        ]),
        client.execute("keys", "*")?
    );

    server.shutdown();
    Ok(())
}

#[test]
fn ping_and_info() -> Result<()> {
    init_logs();
    let server = MockServer::start(vec![
        exchange(b"PING\r\n", b"+PONG\r\n"),
        exchange(
            b"INFO\r\n",
            b"$40\r\nredis_version:1.2.6\r\nconnected_clients:1\r\n",
        ),
    ]);

    let mut client = Client::new(server.addr())?;
    client.connect()?;

    assert_eq!(Value::Boolean(true), client.execute("ping", ())?);
    assert_eq!(
        Value::Map(vec![
            ("redis_version".to_owned(), "1.2.6".to_owned()),
            ("connected_clients".to_owned(), "1".to_owned()),
        ]),
        client.execute("info", ())?
    );

    server.shutdown();
    Ok(())
}

#[test]
fn server_error_reply() -> Result<()> {
    init_logs();
    let server = MockServer::start(vec![exchange(
        b"INCR foo\r\n",
        b"-ERR value is not an integer\r\n",
    )]);

    let mut client = Client::new(server.addr())?;
    client.connect()?;

    match client.execute("incr", "foo") {
        Err(Error::Redis(e)) => assert_eq!("value is not an integer", e.message),
        other => panic!("expected a Redis error, got {other:?}"),
    }
    // a server error does not invalidate the connection
    assert!(client.is_connected());

    server.shutdown();
    Ok(())
}

#[test]
fn mset_flattens_a_mapping() -> Result<()> {
    init_logs();
    let server = MockServer::start(vec![exchange(
        b"*5\r\n$4\r\nMSET\r\n$2\r\nk1\r\n$2\r\nv1\r\n$2\r\nk2\r\n$2\r\nv2\r\n",
        b"+OK\r\n",
    )]);

    let mut client = Client::new(server.addr())?;
    client.connect()?;
    assert_eq!(
        Value::Boolean(true),
        client.execute("mset", vec![("k1", "v1"), ("k2", "v2")])?
    );

    server.shutdown();
    Ok(())
}

#[test]
fn quit_closes_the_connection() -> Result<()> {
    init_logs();
    let server = MockServer::start(vec![exchange(b"QUIT\r\n", b"")]);

    let mut client = Client::new(server.addr())?;
    client.connect()?;
    assert_eq!(Value::Nil, client.execute("quit", ())?);
    assert!(!client.is_connected());

    server.shutdown();
    Ok(())
}

#[test]
fn raw_command() -> Result<()> {
    init_logs();
    let server = MockServer::start(vec![exchange(b"ECHO 2\r\nhi\r\n", b"$2\r\nhi\r\n")]);

    let mut client = Client::new(server.addr())?;
    client.connect()?;
    assert_eq!(
        Value::BulkString(Bytes::from_static(b"hi")),
        client.raw_command(b"ECHO 2\r\nhi\r\n", true)?
    );

    server.shutdown();
    Ok(())
}

#[test]
fn register_custom_command() -> Result<()> {
    init_logs();
    let server = MockServer::start(vec![exchange(b"OBJECT REFCOUNT foo\r\n", b":1\r\n")]);

    let mut client = Client::new(server.addr())?;
    client.connect()?;
    client.register_command(
        "object",
        CommandDescriptor::new("OBJECT", RequestEncoding::Inline),
    );
    assert_eq!(
        Value::Integer(1),
        client.execute("object", ("REFCOUNT", "foo"))?
    );

    server.shutdown();
    Ok(())
}

#[test]
fn client_errors() -> Result<()> {
    init_logs();
    let server = MockServer::start(vec![]);

    let mut client = Client::new(server.addr())?;

    // execute while disconnected
    assert!(matches!(
        client.execute("get", "foo"),
        Err(Error::Client(_))
    ));

    // unknown command
    client.connect()?;
    assert!(matches!(
        client.execute("teleport", "foo"),
        Err(Error::Client(_))
    ));

    // connect while connected
    assert!(matches!(client.connect(), Err(Error::Client(_))));

    client.disconnect();
    server.shutdown();
    Ok(())
}

#[test]
fn malformed_reply_invalidates_the_connection() -> Result<()> {
    init_logs();
    let server = MockServer::start(vec![exchange(b"GET foo\r\n", b"!garbage\r\n")]);

    let mut client = Client::new(server.addr())?;
    client.connect()?;

    assert!(matches!(
        client.execute("get", "foo"),
        Err(Error::MalformedResponse(_))
    ));
    assert!(!client.is_connected());

    server.shutdown();
    Ok(())
}
