use std::ffi::OsString;

use crate::types::*;

/// Splits a flat token list into segments at `|` and `;`.
///
/// Each item carries the separator that follows it; iteration ends after the
/// segment tagged `End`. Operators with nothing between them produce empty
/// segments rather than errors.
pub struct Segmenter<'a> {
	tokens: &'a [OsString],
	i: usize,
	finished: bool,
}

impl<'a> Segmenter<'a> {
	fn proceed_while<F>(&mut self, f: F) where F: Fn(&OsString) -> bool {
		while let Some(t) = self.tokens.get(self.i) {
			if !f(t) { break; }
			self.i += 1;
		}
	}

	fn is_word(token: &OsString) -> bool {
		Separator::from_token(token).is_none()
	}
}

impl<'a> Iterator for Segmenter<'a> {
	type Item = Segment<'a>;

	fn next(&mut self) -> Option<Segment<'a>> {
		if self.finished {
			return None;
		}
		let orig = self.i;
		self.proceed_while(Segmenter::is_word);
		let tokens = &self.tokens[orig .. self.i];
		let separator = match self.tokens.get(self.i).and_then(|t| Separator::from_token(t)) {
			Some(sep) => {
				self.i += 1;
				sep
			},
			None => {
				self.finished = true;
				Separator::End
			},
		};
		Some(Segment { tokens: tokens, separator: separator })
	}
}

pub fn segments<'a>(tokens: &'a [OsString]) -> Segmenter<'a> {
	Segmenter { tokens: tokens, i: 0, finished: false }
}
