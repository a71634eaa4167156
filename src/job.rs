use nix::errno::Errno;
use nix::sys::wait::{self,WaitStatus};
use nix::unistd::Pid;
use tracing::{debug,trace,warn};

/// Processes spawned within one pipeline group, in spawn order.
#[derive(Debug, Default)]
pub struct Group {
	processes: Vec<Pid>,
}

impl Group {
	pub fn new() -> Group {
		Group { processes: vec![] }
	}

	pub fn push(&mut self, pid: Pid) {
		trace!(pid = pid.as_raw(), size = self.processes.len() + 1, "track");
		self.processes.push(pid);
	}

	pub fn is_empty(&self) -> bool {
		self.processes.is_empty()
	}

	/// Blocks until every tracked process has terminated. Exit statuses are
	/// discarded. Returns how many processes were waited for.
	pub fn reap(self) -> usize {
		let n = self.processes.len();
		for pid in self.processes {
			match wait_pid(pid) {
				Ok(status) => debug!(pid = pid.as_raw(), status = ?status, "reaped"),
				Err(e) => warn!(pid = pid.as_raw(), error = %e, "wait failed"),
			}
		}
		n
	}
}

fn wait_pid(pid: Pid) -> nix::Result<WaitStatus> {
	loop {
		match wait::waitpid(pid, None) {
			Err(Errno::EINTR) => (),
			r => return r,
		}
	}
}

/// Waits for any remaining child of the interpreter until none is left.
pub fn reap_stragglers() -> usize {
	let mut n = 0;
	loop {
		match wait::wait() {
			Ok(status) => {
				debug!(status = ?status, "reaped straggler");
				n += 1;
			},
			Err(Errno::EINTR) => (),
			Err(_) => return n,
		}
	}
}
