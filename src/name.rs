//! File name decomposition into path, base, number and extension
//!
//! Parsing is split in two steps. [`parse_sizes`] only measures the four
//! components and never allocates, which is all the sequence matcher needs.
//! [`split_components`] copies the measured ranges into owned strings once an
//! entry is kept.

use serde::{Deserialize, Serialize};
use std::ops::Range;

use crate::error::{SeqError, SeqResult};

/// Default limit for scanned names and formatted output, in bytes
pub const DEFAULT_MAX_LEN: usize = 4096;

/// Largest digit count for which every decimal value fits in an `i64`
pub const DEFAULT_MAX_NUMBER_DIGITS: u8 = 18;

/// Options controlling how the numeric suffix is recognized.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ParseOptions {
	/// Treat a `-` directly before the digits as part of the number
	pub allow_negative_numbers: bool,
	/// Digit runs longer than this stay in the base name
	pub max_number_digits: u8,
}

impl Default for ParseOptions {
	fn default() -> Self {
		Self {
			allow_negative_numbers: false,
			max_number_digits: DEFAULT_MAX_NUMBER_DIGITS,
		}
	}
}

impl ParseOptions {
	/// Accept negative numbers and digit runs of any practical length.
	///
	/// Values that do not fit in an `i64` saturate when converted to a frame.
	pub fn permissive() -> Self {
		Self {
			allow_negative_numbers: true,
			max_number_digits: u8::MAX,
		}
	}

	pub fn allow_negative_numbers(mut self, allow: bool) -> Self {
		self.allow_negative_numbers = allow;
		self
	}

	pub fn max_number_digits(mut self, digits: u8) -> Self {
		self.max_number_digits = digits;
		self
	}
}

/// Byte lengths of the four contiguous components of a file name.
///
/// `path + base + number + extension` is always the parsed length of the name.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash)]
pub struct FileNameSizes {
	pub path: usize,
	pub base: usize,
	pub number: usize,
	pub extension: usize,
}

impl FileNameSizes {
	/// Total length covered by the four components
	pub fn len(&self) -> usize {
		self.path + self.base + self.number + self.extension
	}

	pub fn is_empty(&self) -> bool {
		self.len() == 0
	}

	pub fn has_number(&self) -> bool {
		self.number > 0
	}

	pub fn path_range(&self) -> Range<usize> {
		0..self.path
	}

	pub fn base_range(&self) -> Range<usize> {
		let start = self.path;
		start..start + self.base
	}

	pub fn number_range(&self) -> Range<usize> {
		let start = self.path + self.base;
		start..start + self.number
	}

	pub fn extension_range(&self) -> Range<usize> {
		let start = self.path + self.base + self.number;
		start..start + self.extension
	}
}

/// Field-wise comparison of two measured names
pub fn sizes_equal(a: &FileNameSizes, b: &FileNameSizes) -> bool {
	a == b
}

/// Measure the components of `name`.
///
/// At most `max_len` bytes are scanned (rounded down to a character boundary)
/// and a NUL byte ends the name early. Returns the sizes together with the
/// number of bytes actually scanned.
///
/// ```rust
/// use seqls::name::{ParseOptions, parse_sizes};
///
/// let (sizes, len) = parse_sizes("/tmp/seq.0001.exr", 4096, &ParseOptions::default());
/// assert_eq!(len, 17);
/// assert_eq!((sizes.path, sizes.base, sizes.number, sizes.extension), (5, 4, 4, 4));
/// ```
pub fn parse_sizes(name: &str, max_len: usize, options: &ParseOptions) -> (FileNameSizes, usize) {
	let mut limit = max_len.min(name.len());
	while !name.is_char_boundary(limit) {
		limit -= 1;
	}
	let bytes = &name.as_bytes()[..limit];

	let mut len = bytes.len();
	let mut last_separator = None;
	let mut last_dot = None;
	for (i, &b) in bytes.iter().enumerate() {
		match b {
			0 => {
				len = i;
				break;
			}
			b'/' | b'\\' => last_separator = Some(i),
			b'.' => last_dot = Some(i),
			_ => {}
		}
	}

	let mut sizes = FileNameSizes::default();
	if len == 0 {
		return (sizes, 0);
	}
	let bytes = &bytes[..len];

	let start = last_separator.map_or(0, |i| i + 1);
	sizes.path = start;

	// A dot that starts the base name is never an extension marker, and the
	// `..` entry has no extension either.
	let mut end = len;
	if let Some(dot) = last_dot
		&& dot > start
		&& &bytes[start..] != b".."
	{
		sizes.extension = len - dot;
		end = dot;
	}

	sizes.number = trailing_number_len(&bytes[start..end], options);
	sizes.base = end - start - sizes.number;

	(sizes, len)
}

fn trailing_number_len(text: &[u8], options: &ParseOptions) -> usize {
	match text.last() {
		Some(b) if b.is_ascii_digit() => {
			let digits = text.iter().rev().take_while(|b| b.is_ascii_digit()).count();
			if digits > usize::from(options.max_number_digits) {
				return 0;
			}
			let signed = options.allow_negative_numbers
				&& text.len() > digits
				&& text[text.len() - digits - 1] == b'-';
			digits + usize::from(signed)
		}
		Some(b'#') => text.iter().rev().take_while(|&&b| b == b'#').count(),
		_ => 0,
	}
}

/// Owned copies of the four components of a file name.
#[derive(Debug, Default, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct FileNameComponents {
	pub path: String,
	pub base: String,
	pub number: String,
	pub extension: String,
}

impl FileNameComponents {
	/// Parse and split `name` in one step
	pub fn parse(name: &str, max_len: usize, options: &ParseOptions) -> SeqResult<Self> {
		let (sizes, _) = parse_sizes(name, max_len, options);
		split_components(name, &sizes)
	}

	pub fn has_number(&self) -> bool {
		!self.number.is_empty()
	}

	/// The measured sizes of these components
	pub fn sizes(&self) -> FileNameSizes {
		FileNameSizes {
			path: self.path.len(),
			base: self.base.len(),
			number: self.number.len(),
			extension: self.extension.len(),
		}
	}
}

/// Copy the ranges described by `sizes` out of `name`.
///
/// Either all four strings are produced or an error is returned; a failed
/// split never hands back a partially filled value.
pub fn split_components(name: &str, sizes: &FileNameSizes) -> SeqResult<FileNameComponents> {
	let component = |range: Range<usize>| -> SeqResult<String> {
		let text = name.get(range).ok_or(SeqError::InvalidSizes {
			sizes: *sizes,
			name_len: name.len(),
		})?;
		let mut owned = String::new();
		owned.try_reserve_exact(text.len())?;
		owned.push_str(text);
		Ok(owned)
	};

	Ok(FileNameComponents {
		path: component(sizes.path_range())?,
		base: component(sizes.base_range())?,
		number: component(sizes.number_range())?,
		extension: component(sizes.extension_range())?,
	})
}
