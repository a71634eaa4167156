use std::ffi::{OsStr,OsString};
use std::os::unix::ffi::OsStrExt;

use crate::builtin::{self,Builtin};

pub const PIPE: &'static [u8] = b"|";
pub const SEQUENCE: &'static [u8] = b";";

/// The operator following a segment.
#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub enum Separator { Pipe, Sequence, End }

impl Separator {
	pub fn from_token(token: &OsStr) -> Option<Separator> {
		match token.as_bytes() {
			PIPE => Some(Separator::Pipe),
			SEQUENCE => Some(Separator::Sequence),
			_ => None,
		}
	}

	/// Whether the pipeline group is complete after this separator.
	pub fn ends_group(self) -> bool {
		self != Separator::Pipe
	}
}

#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub struct Segment<'a> {
	pub tokens: &'a [OsString],
	pub separator: Separator,
}

#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub enum Command<'a> {
	/// Runs in-process; `args` excludes the builtin's name.
	Builtin { builtin: Builtin, args: &'a [OsString] },
	/// `argv[0]` is the executable path, taken literally.
	External { argv: &'a [OsString] },
}

impl<'a> Segment<'a> {
	/// `None` for an empty segment, which is skipped without dispatch.
	pub fn command(&self) -> Option<Command<'a>> {
		let (name, args) = self.tokens.split_first()?;
		Some(match builtin::match_builtin(name.as_bytes()) {
			Some(builtin) => Command::Builtin { builtin: builtin, args: args },
			None => Command::External { argv: self.tokens },
		})
	}
}
