use std::{ffi,io};
use std::ffi::OsStr;
use std::os::unix::ffi::OsStrExt;
use std::os::unix::io::RawFd;
use io::Write;

use thiserror::Error;

/// Conditions that abort the whole interpreter with exit code 1.
#[derive(Debug, Error)]
pub enum Fatal {
	#[error("cannot create pipe: {0}")]
	Pipe(#[source] nix::Error),
	#[error("cannot fork: {0}")]
	Fork(#[source] nix::Error),
	#[error("cannot close fd {fd}: {source}")]
	Close { fd: RawFd, #[source] source: nix::Error },
	#[error("cannot duplicate fd {fd} onto {target}: {source}")]
	Duplicate { fd: RawFd, target: RawFd, #[source] source: nix::Error },
	#[error("argument contains a nul byte: {0}")]
	Nul(#[from] ffi::NulError),
	#[error("cannot write diagnostic: {0}")]
	Diagnostic(#[from] io::Error),
}

/// User-visible messages on the error stream.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Diagnostic<'a> {
	Fatal,
	CdBadArguments,
	CdCannotChange(&'a OsStr),
	CannotExecute(&'a OsStr),
}

impl<'a> Diagnostic<'a> {
	pub fn to_bytes(&self) -> Vec<u8> {
		let mut buf: Vec<u8> = vec![];
		match *self {
			Diagnostic::Fatal => buf.extend(b"error: fatal"),
			Diagnostic::CdBadArguments => buf.extend(b"error: cd: bad arguments"),
			Diagnostic::CdCannotChange(path) => {
				buf.extend(b"error: cd: cannot change directory to ");
				buf.extend(path.as_bytes());
			},
			Diagnostic::CannotExecute(path) => {
				buf.extend(b"error: cannot execute ");
				buf.extend(path.as_bytes());
			},
		}
		buf.push(b'\n');
		buf
	}

	/// Writes the message in one piece. A failed write of anything but
	/// `error: fatal` is itself fatal.
	pub fn emit(&self) -> Result<(), Fatal> {
		let stderr = io::stderr();
		let mut stderr_locked = stderr.lock();
		let r = stderr_locked.write_all(&self.to_bytes()).and_then(|_| stderr_locked.flush());
		match (r, *self) {
			(Ok(()), _) | (Err(_), Diagnostic::Fatal) => Ok(()),
			(Err(e), _) => Err(Fatal::Diagnostic(e)),
		}
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn diagnostic_texts() {
		assert_eq!(Diagnostic::Fatal.to_bytes(), b"error: fatal\n");
		assert_eq!(Diagnostic::CdBadArguments.to_bytes(), b"error: cd: bad arguments\n");
		assert_eq!(Diagnostic::CdCannotChange(OsStr::new("/nonexistent")).to_bytes(),
		           b"error: cd: cannot change directory to /nonexistent\n");
		assert_eq!(Diagnostic::CannotExecute(OsStr::new("does-not-exist")).to_bytes(),
		           b"error: cannot execute does-not-exist\n");
	}

	#[test]
	fn non_utf8_path_is_kept_verbatim() {
		let path = OsStr::from_bytes(b"/tmp/\xff\xfe");
		assert_eq!(Diagnostic::CannotExecute(path).to_bytes(), b"error: cannot execute /tmp/\xff\xfe\n");
	}

	#[test]
	fn fatal_messages_name_the_fd() {
		let e = Fatal::Close { fd: 7, source: nix::Error::EBADF };
		assert!(e.to_string().starts_with("cannot close fd 7"));
	}
}
