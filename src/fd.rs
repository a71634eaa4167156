use std::mem;
use std::os::unix::io::RawFd;

use nix::unistd;
use tracing::trace;

use crate::error::Fatal;

/// Input for the next segment: the interpreter's own standard input, or the
/// read end of the pipe written by the previous segment.
#[derive(Debug, PartialEq, Eq)]
pub enum FdLink {
	Stdin,
	Pipe(RawFd),
}

impl FdLink {
	pub fn is_stdin(&self) -> bool {
		*self == FdLink::Stdin
	}

	/// Moves the link out, leaving standard input in its place.
	pub fn take(&mut self) -> FdLink {
		mem::replace(self, FdLink::Stdin)
	}

	/// Closes the pipe end if one is held and resets to standard input.
	pub fn release(&mut self) -> Result<(), Fatal> {
		match self.take() {
			FdLink::Stdin => Ok(()),
			FdLink::Pipe(fd) => close(fd),
		}
	}
}

pub fn close(fd: RawFd) -> Result<(), Fatal> {
	trace!(fd, "close");
	unistd::close(fd).map_err(|e| Fatal::Close { fd: fd, source: e })
}

/// Makes `target` refer to `fd` and drops the original descriptor.
/// Nothing to do when they are already the same slot.
pub fn redirect(fd: RawFd, target: RawFd) -> Result<(), Fatal> {
	if fd == target {
		return Ok(());
	}
	unistd::dup2(fd, target).map_err(|e| Fatal::Duplicate { fd: fd, target: target, source: e })?;
	close(fd)
}
