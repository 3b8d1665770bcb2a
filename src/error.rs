use std::io;
use thiserror::Error;

/// Errors that terminate a relay session.
#[derive(Error, Debug)]
pub enum Error {
    /// libzmq call failed, reported with the native error code
    #[error("{op} error {}: {}", .source.to_raw(), .source.message())]
    Transport {
        op: &'static str,
        #[source]
        source: zmq::Error,
    },

    /// Standard stream failure
    #[error("{op} error {}: {source}", .source.raw_os_error().unwrap_or(0))]
    Io {
        op: &'static str,
        #[source]
        source: io::Error,
    },

    /// Socket parameters could not be used
    #[error("invalid socket parameters: {0}")]
    Params(String),
}

pub type Result<T> = std::result::Result<T, Error>;

impl Error {
    pub fn transport(op: &'static str) -> impl FnOnce(zmq::Error) -> Self {
        move |source| Self::Transport { op, source }
    }

    pub fn io(op: &'static str) -> impl FnOnce(io::Error) -> Self {
        move |source| Self::Io { op, source }
    }
}
