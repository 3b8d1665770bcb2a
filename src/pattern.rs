use clap::ValueEnum;
use std::fmt;

/// One blocking action of a relay iteration.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Step {
    /// Read stdin to end-of-stream and send it as one message
    Send,
    /// Receive one message (all of its parts) and write it to stdout
    Receive,
}

/// Messaging pattern of the relay socket.
#[derive(Copy, Clone, Debug, PartialEq, Eq, ValueEnum)]
pub enum Pattern {
    #[value(name = "req", alias = "request")]
    Request,
    #[value(name = "rep", alias = "reply")]
    Reply,
    #[value(name = "pub", alias = "publish")]
    Publish,
    #[value(name = "sub", alias = "subscribe")]
    Subscribe,
    #[value(name = "push")]
    Push,
    #[value(name = "pull")]
    Pull,
}

impl Pattern {
    /// Ordered steps of a single iteration.
    pub fn steps(self) -> &'static [Step] {
        match self {
            Pattern::Request => &[Step::Send, Step::Receive],
            Pattern::Reply => &[Step::Receive, Step::Send],
            Pattern::Publish | Pattern::Push => &[Step::Send],
            Pattern::Subscribe | Pattern::Pull => &[Step::Receive],
        }
    }

    pub fn socket_type(self) -> zmq::SocketType {
        match self {
            Pattern::Request => zmq::REQ,
            Pattern::Reply => zmq::REP,
            Pattern::Publish => zmq::PUB,
            Pattern::Subscribe => zmq::SUB,
            Pattern::Push => zmq::PUSH,
            Pattern::Pull => zmq::PULL,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Pattern::Request => "req",
            Pattern::Reply => "rep",
            Pattern::Publish => "pub",
            Pattern::Subscribe => "sub",
            Pattern::Push => "push",
            Pattern::Pull => "pull",
        }
    }
}

impl fmt::Display for Pattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
