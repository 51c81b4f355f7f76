//! Structural test for whether two names belong to the same sequence

use crate::name::FileNameSizes;

/// The parts of a numbered name that must agree for two files to be frames of
/// the same sequence. Names without a number field have no key.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SequenceKey<'a> {
	path: &'a [u8],
	base: &'a [u8],
	extension: &'a [u8],
}

impl<'a> SequenceKey<'a> {
	pub fn of(name: &'a str, sizes: &FileNameSizes) -> Option<Self> {
		if !sizes.has_number() {
			return None;
		}
		let bytes = name.as_bytes();
		Some(Self {
			path: bytes.get(sizes.path_range())?,
			base: bytes.get(sizes.base_range())?,
			extension: bytes.get(sizes.extension_range())?,
		})
	}
}

/// True when path, base and extension are equal and both names carry a
/// number (or `#` wildcard) field.
///
/// The numbers themselves are not compared: two files with the same frame
/// number still belong to one sequence.
///
/// ```rust
/// use seqls::matcher::same_sequence;
/// use seqls::name::{ParseOptions, parse_sizes};
///
/// let opts = ParseOptions::default();
/// let (a, _) = parse_sizes("a/b/c1.ext", 4096, &opts);
/// let (b, _) = parse_sizes("a/b/c2.ext", 4096, &opts);
/// assert!(same_sequence("a/b/c1.ext", &a, "a/b/c2.ext", &b));
/// ```
pub fn same_sequence(a: &str, a_sizes: &FileNameSizes, b: &str, b_sizes: &FileNameSizes) -> bool {
	match (SequenceKey::of(a, a_sizes), SequenceKey::of(b, b_sizes)) {
		(Some(a), Some(b)) => a == b,
		_ => false,
	}
}
