use std::ffi::OsString;

use nix::unistd;
use tracing::debug;

use crate::error::{Diagnostic,Fatal};

#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub enum Builtin { Cd }

pub fn match_builtin(name: &[u8]) -> Option<Builtin> {
	match name {
		b"cd" => Some(Builtin::Cd),
		_ => None,
	}
}

/// Runs a builtin in the interpreter's own process and returns its status.
pub fn run_builtin(builtin: Builtin, args: &[OsString]) -> Result<u8, Fatal> {
	match builtin {
		Builtin::Cd => builtin_cd(args),
	}
}

pub fn builtin_cd(args: &[OsString]) -> Result<u8, Fatal> {
	let path = match args {
		[path] => path,
		_ => {
			debug!(argc = args.len(), "cd: wrong argument count");
			Diagnostic::CdBadArguments.emit()?;
			return Ok(1);
		},
	};
	match unistd::chdir(path.as_os_str()) {
		Ok(()) => {
			debug!(path = ?path, "cd");
			Ok(0)
		},
		Err(e) => {
			debug!(path = ?path, error = %e, "cd failed");
			Diagnostic::CdCannotChange(path).emit()?;
			Ok(1)
		},
	}
}
