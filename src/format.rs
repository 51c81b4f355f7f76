//! Rendering aggregates back into display names

use std::fmt::{self, Write};

use crate::aggregate::SequenceAggregate;
use crate::name::DEFAULT_MAX_LEN;

/// Decimal text of `value`, zero-filled to at least `width` digits.
///
/// The sign is not counted in the width and longer numbers are never cut.
///
/// ```rust
/// use seqls::format::zero_pad;
///
/// assert_eq!(zero_pad(42, 4), "0042");
/// assert_eq!(zero_pad(-42, 4), "-0042");
/// assert_eq!(zero_pad(12345, 2), "12345");
/// ```
pub fn zero_pad(value: i64, width: u8) -> String {
	let mut out = String::new();
	push_padded(&mut out, value, width);
	out
}

fn push_padded(out: &mut String, value: i64, width: u8) {
	if value < 0 {
		out.push('-');
	}
	// Writing to a String cannot fail.
	let _ = write!(out, "{:0width$}", value.unsigned_abs(), width = usize::from(width));
}

/// Render an aggregate as `[path]base[min[-max]]extension`.
///
/// A range is written only when the sequence spans more than one frame.
/// The result is cut to at most `max_len` bytes, on a character boundary.
pub fn format_aggregate(aggregate: &SequenceAggregate, include_path: bool, max_len: usize) -> String {
	let name = &aggregate.file_name;
	let mut out = String::new();
	if include_path {
		out.push_str(&name.path);
	}
	out.push_str(&name.base);
	if name.has_number() {
		push_padded(&mut out, aggregate.frame_min, aggregate.frame_padding);
		if aggregate.frame_min != aggregate.frame_max {
			out.push('-');
			push_padded(&mut out, aggregate.frame_max, aggregate.frame_padding);
		}
	}
	out.push_str(&name.extension);
	truncate_to_boundary(&mut out, max_len);
	out
}

fn truncate_to_boundary(text: &mut String, max_len: usize) {
	if text.len() <= max_len {
		return;
	}
	let mut end = max_len;
	while !text.is_char_boundary(end) {
		end -= 1;
	}
	text.truncate(end);
}

impl SequenceAggregate {
	/// Display name with the default length limit
	pub fn to_display_string(&self, include_path: bool) -> String {
		format_aggregate(self, include_path, DEFAULT_MAX_LEN)
	}
}

/// Formats with the path prefix; use `{:#}` to leave it out.
impl fmt::Display for SequenceAggregate {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(&self.to_display_string(!f.alternate()))
	}
}
