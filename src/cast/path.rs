use std::fmt;

use crate::cast::{CastError, Result};

/// One step in a field path.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PathStep {
	/// Select a named field or map key.
	Field(String),
	/// Select a sequence element by zero-based index.
	Index(usize),
}

/// Dotted access path such as `outer.items[2].name`.
///
/// The writer accumulates one of these while descending so that errors name
/// the exact field that failed; the same syntax addresses values through
/// [`Value::get_path`](crate::cast::Value::get_path).
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FieldPath {
	/// Ordered sequence of path steps.
	pub steps: Vec<PathStep>,
}

impl FieldPath {
	/// Empty path addressing the value itself.
	pub fn root() -> Self {
		Self::default()
	}

	/// Whether the path has no steps.
	pub fn is_root(&self) -> bool {
		self.steps.is_empty()
	}

	/// Copy of this path extended by a named field.
	pub fn field(&self, name: &str) -> Self {
		let mut steps = self.steps.clone();
		steps.push(PathStep::Field(name.to_owned()));
		Self { steps }
	}

	/// Copy of this path extended by a sequence index.
	pub fn index(&self, index: usize) -> Self {
		let mut steps = self.steps.clone();
		steps.push(PathStep::Index(index));
		Self { steps }
	}

	/// Parse dotted field syntax with optional `[index]` selectors.
	///
	/// Errors report the byte offset where parsing stopped.
	pub fn parse(input: &str) -> Result<Self> {
		let mut cursor = Cursor { input, pos: 0 };
		let mut steps = Vec::new();
		loop {
			steps.push(PathStep::Field(cursor.key()?));
			while cursor.eat(b'[') {
				steps.push(PathStep::Index(cursor.index()?));
			}
			if cursor.at_end() {
				return Ok(Self { steps });
			}
			if !cursor.eat(b'.') {
				return Err(cursor.fail("expected `.` or `[`"));
			}
		}
	}
}

struct Cursor<'a> {
	input: &'a str,
	pos: usize,
}

impl<'a> Cursor<'a> {
	fn at_end(&self) -> bool {
		self.pos >= self.input.len()
	}

	fn peek(&self) -> Option<u8> {
		self.input.as_bytes().get(self.pos).copied()
	}

	fn eat(&mut self, byte: u8) -> bool {
		let hit = self.peek() == Some(byte);
		if hit {
			self.pos += 1;
		}
		hit
	}

	fn take_while(&mut self, accept: fn(u8) -> bool) -> &'a str {
		let start = self.pos;
		while self.peek().is_some_and(accept) {
			self.pos += 1;
		}
		&self.input[start..self.pos]
	}

	fn key(&mut self) -> Result<String> {
		let key = self.take_while(is_key_byte).to_owned();
		if key.is_empty() {
			return Err(self.fail("expected field name"));
		}
		Ok(key)
	}

	fn index(&mut self) -> Result<usize> {
		let start = self.pos;
		let digits = self.take_while(|byte| byte.is_ascii_digit());
		if digits.is_empty() {
			return Err(self.fail("expected index digits"));
		}
		let Ok(index) = digits.parse::<usize>() else {
			return Err(CastError::InvalidFieldPath {
				path: self.input.to_owned(),
				offset: start,
				reason: "index out of range",
			});
		};
		if !self.eat(b']') {
			return Err(self.fail("expected `]`"));
		}
		Ok(index)
	}

	fn fail(&self, reason: &'static str) -> CastError {
		CastError::InvalidFieldPath {
			path: self.input.to_owned(),
			offset: self.pos,
			reason,
		}
	}
}

fn is_key_byte(byte: u8) -> bool {
	byte.is_ascii_alphanumeric() || byte == b'_' || byte == b'-'
}

impl fmt::Display for FieldPath {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		if self.is_root() {
			return f.write_str("(root)");
		}
		for (pos, step) in self.steps.iter().enumerate() {
			match step {
				PathStep::Field(name) if pos == 0 => f.write_str(name)?,
				PathStep::Field(name) => write!(f, ".{name}")?,
				PathStep::Index(index) => write!(f, "[{index}]")?,
			}
		}
		Ok(())
	}
}
