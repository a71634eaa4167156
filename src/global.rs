use std::{env,mem};
use std::ffi::{CString,OsString};
use std::os::unix::ffi::OsStringExt;

use tracing::debug;

use crate::error::Fatal;
use crate::fd::FdLink;
use crate::job;

/// Interpreter context threaded through dispatch, spawn and reap.
pub struct State {
	/// `NAME=value` pairs handed unchanged to every exec.
	pub envp: Vec<CString>,
	pub link: FdLink,
	pub group: job::Group,
}

impl State {
	pub fn new() -> Result<State, Fatal> {
		let envp: Result<Vec<CString>, _> = env::vars_os().map(|(mut k, v)| CString::new({ k.push(OsString::from("=")); k.push(v); k.into_vec() })).collect();
		Ok(State::with_env(envp?))
	}

	pub fn with_env(envp: Vec<CString>) -> State {
		State { envp: envp, link: FdLink::Stdin, group: job::Group::new() }
	}

	/// Closes the current group: waits for every process spawned since the
	/// last boundary, then drops any dangling pipe input.
	pub fn finish_group(&mut self) -> Result<(), Fatal> {
		let group = mem::take(&mut self.group);
		if !group.is_empty() {
			let n = group.reap();
			debug!(processes = n, "group finished");
		}
		// A trailing `|` leaves the last writer attached; it must fit its
		// output in the pipe buffer since nothing reads it.
		self.link.release()
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn environment_is_captured_as_pairs() {
		env::set_var("MICROSHELL_TEST_CAPTURE", "a=b c");
		let state = State::new().unwrap();
		assert!(state.envp.iter().any(|e| e.as_bytes() == b"MICROSHELL_TEST_CAPTURE=a=b c"));
		assert!(state.link.is_stdin());
		assert!(state.group.is_empty());
	}

	#[test]
	fn finishing_an_empty_group_is_idempotent() {
		let mut state = State::with_env(vec![]);
		state.finish_group().unwrap();
		state.finish_group().unwrap();
		assert!(state.link.is_stdin());
	}
}
