pub mod decorators;
pub use decorators::{TraceCanonicalDecoratorFactory, TraceInfoDecoratorFactory};

use crate::error::{Error, Result};
use crate::pattern::Pattern;
use crate::serde_helpers;
use crate::stream;

use schemars::JsonSchema;
use serde::Deserialize;
use std::fmt;
use std::io::{Read, Write};

/// One part of a received message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MessagePart {
    pub data: Vec<u8>,
    /// More parts of the same message follow
    pub more: bool,
}

/// Where a socket binds or connects.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Endpoint {
    pub addr: String,
    pub bind: bool,
}

impl Endpoint {
    pub fn bind(addr: impl Into<String>) -> Self {
        Self { addr: addr.into(), bind: true }
    }

    pub fn connect(addr: impl Into<String>) -> Self {
        Self { addr: addr.into(), bind: false }
    }
}

impl fmt::Display for Endpoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.addr)
    }
}

/// A message socket with blocking send/receive operations.
#[allow(unused)]
pub trait MessageSock {
    /// Binds or connects the socket.
    fn open(&mut self, _endpoint: &Endpoint) -> Result<()> {
        Ok(())
    }

    /// Closes the socket.
    fn close(&mut self) {}

    /// Sends `payload` as one single-part message. The buffer is handed
    /// over to the transport.
    fn send(&mut self, payload: Vec<u8>) -> Result<()>;

    /// Receives the next message part.
    fn recv_part(&mut self) -> Result<MessagePart>;
}

pub trait SockInfo {
    fn get_type_name(&self) -> &str;
    fn get_id(&self) -> u32;
    fn get_description(&self) -> String {
        format!("{}{}", self.get_type_name(), self.get_id())
    }
}

pub trait ComplexSock: MessageSock + SockInfo {}

// Any type that impl MessageSock & SockInfo automatically
// implements ComplexSock
impl<T: MessageSock + SockInfo> ComplexSock for T {}

/// Socket parameters passed with `--params`.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, JsonSchema)]
#[serde(deny_unknown_fields)]
pub struct SocketParams {
    /// Linger period for pending messages on close (ZMQ_LINGER), ms
    pub linger_ms: Option<i32>,
    /// Outbound high water mark (ZMQ_SNDHWM)
    pub sndhwm: Option<i32>,
    /// Inbound high water mark (ZMQ_RCVHWM)
    pub rcvhwm: Option<i32>,
    /// Receive timeout (ZMQ_RCVTIMEO), ms. Blocks forever when absent
    pub rcvtimeo_ms: Option<i32>,
    /// Subscription prefix of a `sub` socket, hex encoded. Empty accepts everything
    #[serde(default, with = "hex::serde")]
    #[schemars(with = "String")]
    pub subscribe: Vec<u8>,
    /// Delay between connection setup and the first publish of a `pub` socket, ms
    #[serde(default = "serde_helpers::default_pub_delay_ms")]
    pub pub_delay_ms: u64,
    /// Initial size and growth increment of the stdin buffer
    #[serde(default = "serde_helpers::default_chunk_size")]
    pub chunk_size: usize,
}

impl Default for SocketParams {
    fn default() -> Self {
        Self {
            linger_ms: None,
            sndhwm: None,
            rcvhwm: None,
            rcvtimeo_ms: None,
            subscribe: Vec::new(),
            pub_delay_ms: serde_helpers::default_pub_delay_ms(),
            chunk_size: serde_helpers::default_chunk_size(),
        }
    }
}

impl SocketParams {
    pub fn from_json(json: &str) -> Result<Self> {
        let params: Self = serde_json::from_str(json).map_err(|e| Error::Params(e.to_string()))?;
        if params.chunk_size == 0 || params.chunk_size > stream::MAX_READ_SIZE {
            return Err(Error::Params(format!(
                "chunk_size must be between 1 and {}",
                stream::MAX_READ_SIZE
            )));
        }
        Ok(params)
    }
}

pub trait SockDocViewer {
    fn get_full_scheme(&self) -> String;
    fn get_examples(&self) -> String;
}

pub trait SocketFactory {
    /// Creates a new, not yet opened, socket of the given pattern.
    fn create_sock(&self, pattern: Pattern, params: &SocketParams) -> Result<Box<dyn ComplexSock>>;
    fn create_doc_viewer(&self) -> Box<dyn SockDocViewer>;
}

/// Owns the session socket; closes it exactly once when dropped.
pub struct SocketWrapper {
    sock: Box<dyn ComplexSock>,
}

impl SocketWrapper {
    pub fn new(sock: Box<dyn ComplexSock>) -> Self {
        Self { sock }
    }
    pub fn open(mut self, endpoint: &Endpoint) -> Result<Self> {
        self.sock.open(endpoint)?;
        Ok(self)
    }
    fn close(&mut self) {
        self.sock.close();
    }
    pub fn description(&self) -> String {
        self.sock.get_description()
    }

    /// Reads `input` to end-of-stream and sends it as one message.
    pub fn send_from(&mut self, input: &mut dyn Read, chunk: usize) -> Result<usize> {
        let buffer = stream::read_to_end_growing(input, chunk).map_err(Error::io("stdin read"))?;
        let total = buffer.len();
        self.sock.send(buffer)?;
        Ok(total)
    }

    /// Receives one message and writes every part to `output` as it arrives.
    pub fn recv_to(&mut self, output: &mut dyn Write) -> Result<usize> {
        let mut total = 0;
        loop {
            let part = self.sock.recv_part()?;
            total += part.data.len();
            stream::write_part(output, &part.data).map_err(Error::io("stdout write"))?;
            if !part.more {
                break;
            }
        }
        Ok(total)
    }
}

impl Drop for SocketWrapper {
    fn drop(&mut self) {
        self.close();
    }
}

macro_rules! make_message_sock {
    ($name: ident { $($field:ident : $t:ty),* $(,)? }, $stype: expr $(, $self_ident: ident, $sock_descr: block)?) => {
        paste::paste! {
            #[allow(non_upper_case_globals)]
            static [<$name _id>]: std::sync::atomic::AtomicU32 = std::sync::atomic::AtomicU32::new(0);
            pub struct $name {
                stype: String,
                id: u32,
                $($field: $t),*
            }
            impl $name {
                pub fn new($($field: $t),*) -> Self {
                    Self {
                        id: [<$name _id>].fetch_add(1, std::sync::atomic::Ordering::Relaxed),
                        stype: $stype.to_string(),
                        $($field),*
                    }
                }
            }
            impl crate::sock::SockInfo for $name {
                fn get_type_name(&self) -> &str {
                    self.stype.as_str()
                }
                fn get_id(&self) -> u32 {
                    self.id
                }
                $(
                    fn get_description(&$self_ident) -> String {
                        $sock_descr
                    }
                )?
            }
        }
    };
}
pub(crate) use make_message_sock;
