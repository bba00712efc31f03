use urlgate_core::error::GateError;
use urlgate_core::logging;

mod cli;

use crate::cli::CliCommand;

#[tokio::main]
async fn main() {
    // Initialize logging as early as possible; stderr if the state dir is unusable.
    if let Err(e) = logging::init_logging() {
        logging::init_logging_stderr();
        tracing::warn!("file logging unavailable, using stderr: {:#}", e);
    }

    if let Err(err) = CliCommand::run_from_args().await {
        match err.downcast_ref::<GateError>() {
            Some(gate) => eprintln!("urlgate error [{}]: {:#}", gate.code(), err),
            None => eprintln!("urlgate error: {:#}", err),
        }
        std::process::exit(1);
    }
}
