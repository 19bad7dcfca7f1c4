mod command;
mod driver;

use clap::Parser;
use std::{process::ExitCode, thread};
use tracing::error;
use tracing_subscriber::EnvFilter;

// Room for the recursion of formulas up to the default `--max-depth`.
const STACK_SIZE: usize = 256 * 1024 * 1024;

fn main() -> ExitCode {
    let args = command::Args::parse();
    let level = if args.verbose { "debug" } else { "warn" };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level)),
        )
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    let worker = thread::Builder::new()
        .name("ltlnorm".to_string())
        .stack_size(STACK_SIZE)
        .spawn(move || {
            let stdout = std::io::stdout();
            driver::run(&args, &mut stdout.lock())
        });
    let res = match worker.map(|handle| handle.join()) {
        Ok(Ok(res)) => res,
        Ok(Err(_)) => {
            error!("normalizer thread panicked");
            return ExitCode::FAILURE;
        }
        Err(err) => Err(err.into()),
    };
    ltlnorm::release_static_nodes();
    match res {
        Ok(true) => ExitCode::SUCCESS,
        Ok(false) => ExitCode::FAILURE,
        Err(err) => {
            error!("{}", err);
            ExitCode::FAILURE
        }
    }
}
