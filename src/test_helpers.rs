use crate::error::{Error, Result};
use crate::pattern::Pattern;
use crate::sock::{
    ComplexSock, Endpoint, MessagePart, MessageSock, SockDocViewer, SocketFactory, SocketParams,
    SocketWrapper, make_message_sock,
};
use crate::sockets::zeromq::ZmqFactory;
use std::cell::RefCell;
use std::collections::VecDeque;
use std::io::Cursor;
use std::rc::Rc;
use std::thread;
use std::time::Duration;

impl MessagePart {
    pub fn last(data: impl Into<Vec<u8>>) -> Self {
        Self { data: data.into(), more: false }
    }

    pub fn more(data: impl Into<Vec<u8>>) -> Self {
        Self { data: data.into(), more: true }
    }
}

/// What a scripted socket was asked to do.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Event {
    Open(Endpoint),
    Send(Vec<u8>),
    Receive(usize),
    Close,
}

#[derive(Default)]
pub struct Script {
    inbox: VecDeque<MessagePart>,
    events: Vec<Event>,
    fail_send: bool,
}

make_message_sock!(ScriptedSock {
    script: Rc<RefCell<Script>>,
}, "scripted");

impl MessageSock for ScriptedSock {
    fn open(&mut self, endpoint: &Endpoint) -> Result<()> {
        self.script.borrow_mut().events.push(Event::Open(endpoint.clone()));
        Ok(())
    }
    fn close(&mut self) {
        self.script.borrow_mut().events.push(Event::Close);
    }
    fn send(&mut self, payload: Vec<u8>) -> Result<()> {
        let mut script = self.script.borrow_mut();
        if script.fail_send {
            return Err(Error::transport("zmq_sendmsg")(zmq::Error::EFSM));
        }
        script.events.push(Event::Send(payload));
        Ok(())
    }
    fn recv_part(&mut self) -> Result<MessagePart> {
        let mut script = self.script.borrow_mut();
        let part = script
            .inbox
            .pop_front()
            .ok_or_else(|| Error::transport("zmq_recvmsg")(zmq::Error::EAGAIN))?;
        script.events.push(Event::Receive(part.data.len()));
        Ok(part)
    }
}

struct ScriptedDoc;

impl SockDocViewer for ScriptedDoc {
    fn get_full_scheme(&self) -> String {
        String::from("{}")
    }
    fn get_examples(&self) -> String {
        String::new()
    }
}

/// In-memory socket factory: replays queued parts and records every call.
#[derive(Clone, Default)]
pub struct ScriptedFactory {
    script: Rc<RefCell<Script>>,
}

impl ScriptedFactory {
    pub fn new(inbox: Vec<MessagePart>) -> Self {
        let factory = Self::default();
        factory.script.borrow_mut().inbox = inbox.into();
        factory
    }
    pub fn failing_send() -> Self {
        let factory = Self::default();
        factory.script.borrow_mut().fail_send = true;
        factory
    }
    pub fn events(&self) -> Vec<Event> {
        self.script.borrow().events.clone()
    }
    pub fn sent(&self) -> Vec<Vec<u8>> {
        self.script
            .borrow()
            .events
            .iter()
            .filter_map(|e| match e {
                Event::Send(data) => Some(data.clone()),
                _ => None,
            })
            .collect()
    }
}

impl SocketFactory for ScriptedFactory {
    fn create_sock(&self, _: Pattern, _: &SocketParams) -> Result<Box<dyn ComplexSock>> {
        Ok(Box::new(ScriptedSock::new(self.script.clone())))
    }
    fn create_doc_viewer(&self) -> Box<dyn SockDocViewer> {
        Box::new(ScriptedDoc)
    }
}

/// Parameters for real libzmq sockets in tests: a lost message makes the
/// receive fail after a few seconds instead of blocking forever.
pub fn test_params() -> SocketParams {
    SocketParams { pub_delay_ms: 100, rcvtimeo_ms: Some(5000), ..SocketParams::default() }
}

/// Relays `payload` from a bound `sender` to a connected `receiver` over
/// real libzmq sockets sharing one context, returning what came out.
pub fn zmq_loopback(sender: Pattern, receiver: Pattern, endpoint: &str, payload: &[u8]) -> Result<Vec<u8>> {
    let factory = ZmqFactory::with_context(zmq::Context::new());
    let params = test_params();

    let mut tx = SocketWrapper::new(factory.create_sock(sender, &params)?)
        .open(&Endpoint::bind(endpoint))?;
    let mut rx = SocketWrapper::new(factory.create_sock(receiver, &params)?)
        .open(&Endpoint::connect(endpoint))?;
    // a subscription travels to the publisher after connect
    thread::sleep(Duration::from_millis(params.pub_delay_ms));

    let sent = tx.send_from(&mut Cursor::new(payload.to_vec()), params.chunk_size)?;
    assert_eq!(sent, payload.len());

    let mut out = Vec::new();
    rx.recv_to(&mut out)?;
    Ok(out)
}
