use derive_builder::Builder;

use crate::error::Result;
use crate::pattern::{Pattern, Step};
use crate::sock::{Endpoint, SocketFactory, SocketParams, SocketWrapper};
use std::io::{self, Read, Write};
use std::process;

/// Relays standard streams through one socket, following the step
/// sequence of its pattern.
pub struct RelayMode {
    factory: Box<dyn SocketFactory>,
    params: RelayModeParams,
}

#[derive(Builder, Debug)]
#[builder(build_fn(validate = "Self::validate"))]
pub struct RelayModeParams {
    pub pattern: Pattern,
    #[builder(setter(into))]
    pub endpoint: String,
    #[builder(default = false)]
    pub bind: bool,
    /// Zero means no limit
    #[builder(default = 0)]
    pub nbiter: u64,
    #[builder(default)]
    pub sock_params: SocketParams,
}

impl RelayModeParamsBuilder {
    fn validate(&self) -> std::result::Result<(), String> {
        match &self.endpoint {
            Some(endpoint) if endpoint.is_empty() => Err("endpoint must not be empty".to_string()),
            _ => Ok(()),
        }
    }
}

impl RelayModeParams {
    pub fn endpoint(&self) -> Endpoint {
        if self.bind {
            Endpoint::bind(self.endpoint.as_str())
        } else {
            Endpoint::connect(self.endpoint.as_str())
        }
    }
}

impl RelayMode {
    pub fn new(factory: Box<dyn SocketFactory>, params: RelayModeParams) -> Self {
        Self { factory, params }
    }

    /// Runs the relay loop and returns the number of completed iterations.
    ///
    /// The socket is closed before returning, whether the loop finished or
    /// failed.
    pub fn run(&self, input: &mut dyn Read, output: &mut dyn Write) -> Result<u64> {
        let params = &self.params;
        let mut sock = SocketWrapper::new(
            self.factory.create_sock(params.pattern, &params.sock_params)?,
        )
        .open(&params.endpoint())?;
        log::debug!("{} relaying as {}", sock.description(), params.pattern);

        let steps = params.pattern.steps();
        let mut done = 0_u64;
        while params.nbiter == 0 || done < params.nbiter {
            for step in steps {
                match step {
                    Step::Send => {
                        sock.send_from(input, params.sock_params.chunk_size)?;
                    }
                    Step::Receive => {
                        sock.recv_to(output)?;
                    }
                }
            }
            done += 1;
        }
        Ok(done)
    }
}

pub struct RelayModeCommand {
    mode: RelayMode,
}

impl RelayModeCommand {
    pub fn new(mode: RelayMode) -> Self {
        Self { mode }
    }
}

impl super::Command for RelayModeCommand {
    fn execute(&mut self) {
        let mut input = io::stdin().lock();
        let mut output = io::stdout().lock();
        match self.mode.run(&mut input, &mut output) {
            Ok(done) => log::debug!("{done} iterations done"),
            Err(e) => {
                eprintln!("{e}");
                process::exit(1);
            }
        }
    }
}
