mod builtin;
mod error;
mod eval;
mod fd;
mod global;
mod job;
mod parser;
mod types;

use std::{env,io,process};
use std::ffi::OsString;

use tracing::{debug,error};
use tracing_subscriber::EnvFilter;

use error::{Diagnostic,Fatal};

/// Log filter for the interpreter's own tracing. Unset means silent, so the
/// error stream carries only the command diagnostics.
const LOG_ENV: &'static str = "MICROSHELL_LOG";

fn init_logging() {
	let filter = EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new("off"));
	tracing_subscriber::fmt()
		.with_env_filter(filter)
		.with_writer(io::stderr)
		.with_target(true)
		.init();
}

fn run(tokens: &[OsString]) -> Result<(), Fatal> {
	let mut state = global::State::new()?;
	eval::run(&mut state, tokens)?;
	let n = job::reap_stragglers();
	if n > 0 {
		debug!(processes = n, "reaped leftover children");
	}
	Ok(())
}

fn main() {
	let tokens: Vec<OsString> = env::args_os().skip(1).collect();
	if tokens.is_empty() {
		return;
	}
	init_logging();
	if let Err(e) = run(&tokens) {
		error!(error = %e, "aborting");
		let _ = Diagnostic::Fatal.emit();
		process::exit(1);
	}
}
