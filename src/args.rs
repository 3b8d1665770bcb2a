use crate::modes::{
    Command,
    doc::DocCommand,
    relay::{RelayMode, RelayModeCommand, RelayModeParams, RelayModeParamsBuilder, RelayModeParamsBuilderError},
};
use crate::pattern::Pattern;
use crate::sock::{SocketFactory, SocketParams, TraceCanonicalDecoratorFactory, TraceInfoDecoratorFactory};
use crate::sockets::zeromq::ZmqFactory;

use clap::builder::NonEmptyStringValueParser;
use clap::error::ErrorKind;
use clap::{ArgAction, CommandFactory, Parser};
use std::process;

#[derive(Parser)]
#[command(name = "zc", version, about = "A netcat like utility for ZMQ")]
pub struct ZcArgs {
    /// Bind instead of connect
    #[arg(short, long, default_value_t = false)]
    bind: bool,
    /// Number of iterations (0 for infinite loop)
    #[arg(short, long, value_name = "N", default_value_t = 0)]
    nbiter: u64,
    /// Print some messages in stderr (repeat to dump payloads)
    #[arg(short, long, action = ArgAction::Count)]
    verbose: u8,
    /// Socket parameters (JSON format)
    #[arg(short, long, value_name = "JSON", value_parser = parse_params)]
    params: Option<SocketParams>,
    /// Print the socket parameters scheme with examples and exit
    #[arg(long, default_value_t = false)]
    params_doc: bool,
    /// ZMQ socket type
    #[arg(value_name = "TYPE", value_enum, ignore_case = true, required_unless_present = "params_doc")]
    pattern: Option<Pattern>,
    /// A string consisting of two parts as follows: transport://address (see zmq documentation)
    #[arg(value_parser = NonEmptyStringValueParser::new(), required_unless_present = "params_doc")]
    endpoint: Option<String>,
}

fn parse_params(json: &str) -> Result<SocketParams, String> {
    SocketParams::from_json(json).map_err(|e| e.to_string())
}

impl ZcArgs {
    pub fn get_scenario() -> Box<dyn Command> {
        let args = Self::try_parse().unwrap_or_else(|e| {
            if e.use_stderr() {
                // Usage errors are followed by the full help
                let _ = e.print();
                eprintln!("\n{}", Self::command().render_long_help());
                process::exit(e.exit_code());
            }
            e.exit()
        });
        args.init_logger();

        if args.params_doc {
            return Box::new(DocCommand::new(ZmqFactory::new().create_doc_viewer()));
        }

        let params = args.relay_params().unwrap_or_else(|e| {
            Self::command()
                .error(ErrorKind::MissingRequiredArgument, format!("Relay parameters building failed: {e}"))
                .exit()
        });
        Box::new(RelayModeCommand::new(RelayMode::new(args.factory(), params)))
    }

    fn init_logger(&self) {
        let level = match self.verbose {
            0 => "warn",
            1 => "info",
            _ => "debug",
        };
        env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level))
            .format_timestamp(None)
            .format_target(false)
            .init();
    }

    /// ZMQ socket factory wrapped with the tracing decorators the verbosity asks for.
    fn factory(&self) -> Box<dyn SocketFactory> {
        let mut f: Box<dyn SocketFactory> = Box::new(ZmqFactory::new());
        // Socket info must be printed firstly
        if self.verbose >= 1 {
            f = TraceInfoDecoratorFactory::new(f);
        }
        // Canonical data is the last
        if self.verbose >= 2 {
            f = TraceCanonicalDecoratorFactory::new(f);
        }
        f
    }

    fn relay_params(&self) -> Result<RelayModeParams, RelayModeParamsBuilderError> {
        let mut builder = RelayModeParamsBuilder::default();
        if let Some(pattern) = self.pattern {
            builder.pattern(pattern);
        }
        if let Some(endpoint) = &self.endpoint {
            builder.endpoint(endpoint.as_str());
        }
        builder
            .bind(self.bind)
            .nbiter(self.nbiter)
            .sock_params(self.params.clone().unwrap_or_default())
            .build()
    }
}
