use std::ffi::{CString,OsStr,OsString};
use std::os::fd::IntoRawFd;
use std::os::unix::ffi::OsStrExt;
use std::os::unix::io::RawFd;

use nix::unistd::{self,ForkResult,Pid};
use tracing::{debug,trace};

use crate::builtin;
use crate::error::{Diagnostic,Fatal};
use crate::fd::{self,FdLink};
use crate::global;
use crate::parser;
use crate::types::{Command,Separator};

/// Both ends of the pipe carrying a segment's output forward.
#[derive(Debug, PartialEq, Eq, Clone, Copy)]
struct Forward {
	read: RawFd,
	write: RawFd,
}

/// A segment with its descriptors prepared but not yet forked.
///
/// Owns the input link taken from the state and, when piping forward, both
/// ends of a fresh pipe. `launch` hands them to the child and parent;
/// `rollback` closes all of them.
#[derive(Debug)]
pub struct Launch<'a> {
	path: &'a OsStr,
	argv: Vec<CString>,
	input: FdLink,
	forward: Option<Forward>,
}

impl<'a> Launch<'a> {
	pub fn prepare(link: &mut FdLink, argv: &'a [OsString], separator: Separator) -> Result<Launch<'a>, Fatal> {
		let cargv: Result<Vec<CString>, _> = argv.iter().map(|s| CString::new(s.as_bytes())).collect();
		let cargv = match cargv {
			Ok(v) => v,
			Err(e) => {
				link.release()?;
				return Err(Fatal::from(e));
			},
		};
		let forward = if separator == Separator::Pipe {
			match unistd::pipe() {
				Ok((r, w)) => Some(Forward { read: r.into_raw_fd(), write: w.into_raw_fd() }),
				Err(e) => {
					link.release()?;
					return Err(Fatal::Pipe(e));
				},
			}
		} else {
			None
		};
		trace!(forward = ?forward, input = ?link, "prepared");
		Ok(Launch { path: argv[0].as_os_str(), argv: cargv, input: link.take(), forward: forward })
	}

	/// Releases every descriptor the launch owns.
	pub fn rollback(mut self) -> Result<(), Fatal> {
		if let Some(p) = self.forward.take() {
			fd::close(p.read)?;
			fd::close(p.write)?;
		}
		self.input.release()
	}

	/// Forks. In the parent, returns the child's pid and the link the next
	/// segment reads from. The child never returns.
	pub fn launch(self, envp: &[CString]) -> Result<(Pid, FdLink), Fatal> {
		match unsafe { unistd::fork() } {
			Err(e) => {
				self.rollback()?;
				Err(Fatal::Fork(e))
			},
			Ok(ForkResult::Child) => self.exec(envp),
			Ok(ForkResult::Parent { child }) => {
				let Launch { path, mut input, forward, .. } = self;
				input.release()?;
				let next = match forward {
					Some(p) => {
						fd::close(p.write)?;
						FdLink::Pipe(p.read)
					},
					None => FdLink::Stdin,
				};
				debug!(pid = child.as_raw(), path = ?path, next = ?next, "spawned");
				Ok((child, next))
			},
		}
	}

	fn wire(&self) -> Result<(), Fatal> {
		if let FdLink::Pipe(fd) = self.input {
			fd::redirect(fd, libc::STDIN_FILENO)?;
		}
		if let Some(p) = self.forward {
			fd::close(p.read)?;
			fd::redirect(p.write, libc::STDOUT_FILENO)?;
		}
		Ok(())
	}

	fn exec(self, envp: &[CString]) -> ! {
		if self.wire().is_err() {
			let _ = Diagnostic::Fatal.emit();
			unsafe { libc::_exit(1) }
		}
		// The Rust runtime ignores SIGPIPE; exec'd programs expect the default.
		unsafe { libc::signal(libc::SIGPIPE, libc::SIG_DFL) };
		let Err(e) = unistd::execve(&self.argv[0], &self.argv, envp);
		trace!(error = %e, "execve failed");
		let _ = Diagnostic::CannotExecute(self.path).emit();
		unsafe { libc::_exit(1) }
	}
}

/// Runs every segment of `tokens`, waiting at each `;` and at the end.
pub fn run(state: &mut global::State, tokens: &[OsString]) -> Result<(), Fatal> {
	for segment in parser::segments(tokens) {
		let command = match segment.command() {
			Some(c) => c,
			None => {
				trace!(separator = ?segment.separator, "empty segment");
				if segment.separator.ends_group() {
					state.finish_group()?;
				}
				continue;
			},
		};
		match command {
			Command::Builtin { builtin, args } => {
				if !state.link.is_stdin() {
					trace!(link = ?state.link, "builtin cannot read a pipe, dropping it");
				}
				state.link.release()?;
				let status = builtin::run_builtin(builtin, args)?;
				debug!(builtin = ?builtin, status, "builtin finished");
				state.finish_group()?;
			},
			Command::External { argv } => {
				let launch = Launch::prepare(&mut state.link, argv, segment.separator)?;
				let (pid, next) = launch.launch(&state.envp)?;
				state.group.push(pid);
				state.link = next;
				if segment.separator.ends_group() {
					state.finish_group()?;
				}
			},
		}
	}
	state.finish_group()
}
