use std::{
    io::{Read, Write},
    net::TcpListener,
    thread::{self, JoinHandle},
    time::Duration,
};

pub(crate) fn init_logs() {
    let _ = env_logger::builder().is_test(true).try_init();
}

/// One scripted step: the exact request bytes the server must receive and
/// the reply it answers with.
pub(crate) struct Exchange {
    pub request: Vec<u8>,
    pub reply: Vec<u8>,
}

pub(crate) fn exchange(request: impl AsRef<[u8]>, reply: impl AsRef<[u8]>) -> Exchange {
    Exchange {
        request: request.as_ref().to_vec(),
        reply: reply.as_ref().to_vec(),
    }
}

/// A listener bound to an ephemeral localhost port, not yet serving.
///
/// Splitting bind from run lets a test learn the address first: with a
/// sharded client, the script of each node depends on how the ring routes
/// over the actual `host:port` identifiers.
pub(crate) struct BoundServer {
    listener: TcpListener,
    host: String,
    port: u16,
}

impl BoundServer {
    pub fn addr(&self) -> (String, u16) {
        (self.host.clone(), self.port)
    }

    /// The node identifier this endpoint gets on a hash ring.
    pub fn tag(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    pub fn run(self, script: Vec<Exchange>) -> MockServer {
        let listener = self.listener;
        let handle = thread::spawn(move || {
            let (mut stream, _) = listener.accept().unwrap();
            // a wrong or short request must fail the test, not hang it
            stream
                .set_read_timeout(Some(Duration::from_secs(2)))
                .unwrap();

            let mut received = Vec::with_capacity(script.len());
            for exchange in &script {
                let mut request = vec![0u8; exchange.request.len()];
                stream.read_exact(&mut request).unwrap();
                received.push(request);
                if !exchange.reply.is_empty() {
                    stream.write_all(&exchange.reply).unwrap();
                }
            }
            received
        });

        MockServer {
            host: self.host,
            port: self.port,
            handle,
        }
    }
}

/// A minimal scripted server speaking the wire protocol over a real
/// localhost socket.
///
/// It accepts one connection, then walks its script: for each exchange it
/// reads exactly as many bytes as the expected request and answers with the
/// scripted reply. [`MockServer::shutdown`] joins the server thread and
/// returns the requests actually received, for byte-exact assertions.
pub(crate) struct MockServer {
    host: String,
    port: u16,
    handle: JoinHandle<Vec<Vec<u8>>>,
}

impl MockServer {
    pub fn bind() -> BoundServer {
        let listener = TcpListener::bind("127.0.0.1:0").unwrap();
        let addr = listener.local_addr().unwrap();
        BoundServer {
            listener,
            host: addr.ip().to_string(),
            port: addr.port(),
        }
    }

    pub fn start(script: Vec<Exchange>) -> Self {
        Self::bind().run(script)
    }

    pub fn addr(&self) -> (String, u16) {
        (self.host.clone(), self.port)
    }

    /// Joins the server thread and returns the received requests.
    pub fn shutdown(self) -> Vec<Vec<u8>> {
        self.handle.join().unwrap()
    }
}
