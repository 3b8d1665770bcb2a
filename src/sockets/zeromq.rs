use crate::error::{Error, Result};
use crate::pattern::Pattern;
use crate::sock::{
    ComplexSock, Endpoint, MessagePart, MessageSock, SockDocViewer, SocketFactory, SocketParams,
    make_message_sock,
};
use std::thread;
use std::time::Duration;

make_message_sock!(ZmqSock {
    socket: Option<zmq::Socket>,
    pattern: Pattern,
    params: SocketParams,
}, "zmq", self, {
    format!("{}{} ({})", self.stype, self.id, self.pattern)
});

impl ZmqSock {
    fn socket(&self) -> Result<&zmq::Socket> {
        self.socket
            .as_ref()
            .ok_or(Error::Transport { op: "zmq_socket", source: zmq::Error::ENOTSOCK })
    }
}

impl MessageSock for ZmqSock {
    fn open(&mut self, endpoint: &Endpoint) -> Result<()> {
        let socket = self.socket()?;
        if endpoint.bind {
            socket.bind(&endpoint.addr).map_err(Error::transport("zmq_bind"))?;
        } else {
            socket.connect(&endpoint.addr).map_err(Error::transport("zmq_connect"))?;
        }

        match self.pattern {
            // A subscriber delivers nothing until a filter is set
            Pattern::Subscribe => socket
                .set_subscribe(&self.params.subscribe)
                .map_err(Error::transport("zmq_setsockopt"))?,
            // Give peers a chance to connect before the first message goes out
            Pattern::Publish => thread::sleep(Duration::from_millis(self.params.pub_delay_ms)),
            _ => {}
        }
        Ok(())
    }

    fn close(&mut self) {
        // Dropping the handle closes the socket
        self.socket.take();
    }

    fn send(&mut self, payload: Vec<u8>) -> Result<()> {
        // The message takes the buffer over without copying it
        let msg = zmq::Message::from(payload);
        self.socket()?.send(msg, 0).map_err(Error::transport("zmq_sendmsg"))
    }

    fn recv_part(&mut self) -> Result<MessagePart> {
        let mut msg = zmq::Message::new();
        self.socket()?
            .recv(&mut msg, 0)
            .map_err(Error::transport("zmq_recvmsg"))?;
        Ok(MessagePart { more: msg.get_more(), data: msg.to_vec() })
    }
}

struct ZmqDoc;

impl SockDocViewer for ZmqDoc {
    fn get_full_scheme(&self) -> String {
        let schema = schemars::schema_for!(SocketParams);
        serde_json::to_string_pretty(&schema).unwrap_or_else(|e| e.to_string())
    }
    fn get_examples(&self) -> String {
        let example_sub = "{ \"subscribe\": \"746f706963\", \"rcvhwm\": 1000 }";
        let example_pub = "{ \"pub_delay_ms\": 200, \"linger_ms\": 0 }";
        format!(
            "{}: {}\n{}: {}",
            "Subscriber filtering on \"topic\"", example_sub,
            "Publisher waiting 200 ms for peers", example_pub
        )
    }
}

/// Creates libzmq sockets from one shared context.
pub struct ZmqFactory {
    context: zmq::Context,
}

impl ZmqFactory {
    pub fn new() -> Self {
        Self::with_context(zmq::Context::new())
    }

    pub fn with_context(context: zmq::Context) -> Self {
        Self { context }
    }
}

impl SocketFactory for ZmqFactory {
    fn create_sock(&self, pattern: Pattern, params: &SocketParams) -> Result<Box<dyn ComplexSock>> {
        let socket = self
            .context
            .socket(pattern.socket_type())
            .map_err(Error::transport("zmq_socket"))?;

        if let Some(linger) = params.linger_ms {
            socket.set_linger(linger).map_err(Error::transport("zmq_setsockopt"))?;
        }
        if let Some(hwm) = params.sndhwm {
            socket.set_sndhwm(hwm).map_err(Error::transport("zmq_setsockopt"))?;
        }
        if let Some(hwm) = params.rcvhwm {
            socket.set_rcvhwm(hwm).map_err(Error::transport("zmq_setsockopt"))?;
        }
        if let Some(timeout) = params.rcvtimeo_ms {
            socket.set_rcvtimeo(timeout).map_err(Error::transport("zmq_setsockopt"))?;
        }

        Ok(Box::new(ZmqSock::new(Some(socket), pattern, params.clone())))
    }
    fn create_doc_viewer(&self) -> Box<dyn SockDocViewer> {
        Box::new(ZmqDoc)
    }
}
