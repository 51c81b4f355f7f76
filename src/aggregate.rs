//! Folding a stream of file names into sequence aggregates

use serde::{Deserialize, Serialize};
use smallvec::SmallVec;
use std::collections::HashMap;
use std::hash::{BuildHasher, RandomState};
use tracing::{debug, trace, warn};

use crate::config::{DirOptions, ListConfig};
use crate::error::SeqResult;
use crate::listing::DirListing;
use crate::matcher::{SequenceKey, same_sequence};
use crate::name::{FileNameComponents, FileNameSizes, ParseOptions, parse_sizes, split_components};

/// One listing entry: either a whole sequence or a single file.
///
/// For a sequence, `file_name.number` holds the number text of the first file
/// seen, while `frame_min`/`frame_max` cover every folded file.
/// `frame_padding` is non-zero only when every folded number was written with
/// leading zeros.
#[derive(Debug, Default, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SequenceAggregate {
	pub file_name: FileNameComponents,
	pub frame_min: i64,
	pub frame_max: i64,
	pub frame_padding: u8,
}

impl SequenceAggregate {
	/// Build the aggregate for a single file name
	pub fn from_name(name: &str, max_len: usize, options: &ParseOptions) -> SeqResult<Self> {
		let (sizes, len) = parse_sizes(name, max_len, options);
		let name = &name[..len];
		let frames = FrameStats::first(&name[sizes.number_range()]);
		Ok(frames.into_aggregate(split_components(name, &sizes)?))
	}

	/// Whether more than one frame number was seen
	pub fn has_frame_range(&self) -> bool {
		self.file_name.has_number() && self.frame_min != self.frame_max
	}

	/// Number of frames in `frame_min..=frame_max`; gaps are not tracked
	pub fn frame_span(&self) -> u64 {
		if self.file_name.has_number() {
			self.frame_max.abs_diff(self.frame_min).saturating_add(1)
		} else {
			1
		}
	}
}

/// Decimal value of a number field.
///
/// Leading zeros never switch to octal, a `#` wildcard reads as 0 and values
/// outside the `i64` range saturate.
pub fn frame_value(number: &str) -> i64 {
	let (negative, digits) = match number.strip_prefix('-') {
		Some(rest) => (true, rest),
		None => (false, number),
	};
	digits
		.bytes()
		.take_while(u8::is_ascii_digit)
		.fold(0i64, |acc, d| {
			let d = i64::from(d - b'0');
			if negative {
				acc.saturating_mul(10).saturating_sub(d)
			} else {
				acc.saturating_mul(10).saturating_add(d)
			}
		})
}

/// Width of a zero-padded number field, e.g. `Some(4)` for `0001`
pub fn padding_width(number: &str) -> Option<u8> {
	match number.as_bytes() {
		[b'0', second, ..] if second.is_ascii_digit() => {
			Some(u8::try_from(number.len()).unwrap_or(u8::MAX))
		}
		_ => None,
	}
}

#[derive(Debug, Clone, Copy)]
struct FrameStats {
	min: i64,
	max: i64,
	padding: u8,
	padded: bool,
}

impl FrameStats {
	fn first(number: &str) -> Self {
		if number.is_empty() {
			return Self {
				min: 0,
				max: 0,
				padding: 0,
				padded: false,
			};
		}
		let value = frame_value(number);
		let padding = padding_width(number);
		Self {
			min: value,
			max: value,
			padding: padding.unwrap_or(0),
			padded: padding.is_some(),
		}
	}

	fn fold(&mut self, number: &str) {
		let value = frame_value(number);
		self.min = self.min.min(value);
		self.max = self.max.max(value);
		// One unpadded frame disables padding for the whole sequence.
		match padding_width(number) {
			Some(width) if self.padded => self.padding = self.padding.max(width),
			_ => {
				self.padded = false;
				self.padding = 0;
			}
		}
	}

	fn into_aggregate(self, file_name: FileNameComponents) -> SequenceAggregate {
		SequenceAggregate {
			file_name,
			frame_min: self.min,
			frame_max: self.max,
			frame_padding: self.padding,
		}
	}
}

#[derive(Debug)]
struct PendingEntry {
	name: String,
	sizes: FileNameSizes,
	frames: FrameStats,
}

/// Incremental builder for a listing.
///
/// Names are only measured while folding; components are copied out once, in
/// [`SequenceAggregator::into_listing`]. Numbered entries are indexed by a hash
/// of their path, base and extension so each name is matched against the few
/// candidates in its bucket rather than against every aggregate so far.
/// Entries keep first-seen order.
#[derive(Debug)]
pub struct SequenceAggregator {
	config: ListConfig,
	entries: Vec<PendingEntry>,
	index: HashMap<u64, SmallVec<[usize; 1]>>,
	hasher: RandomState,
	filtered: usize,
}

impl SequenceAggregator {
	pub fn new(config: ListConfig) -> Self {
		Self {
			config,
			entries: Vec::new(),
			index: HashMap::new(),
			hasher: RandomState::new(),
			filtered: 0,
		}
	}

	/// Fold every name into a listing.
	///
	/// Stops at the first allocation failure and returns what was built so far
	/// together with the error.
	pub fn aggregate<I, S>(names: I, config: &ListConfig) -> DirListing
	where
		I: IntoIterator<Item = S>,
		S: AsRef<str>,
	{
		let mut aggregator = Self::new(config.clone());
		let mut failure = None;
		for name in names {
			if let Err(e) = aggregator.push(name.as_ref()) {
				warn!(
					"Aggregator: stopping after {} entries: {}",
					aggregator.len(),
					e
				);
				failure = Some(e);
				break;
			}
		}
		let mut listing = aggregator.into_listing();
		if failure.is_some() {
			listing.error = failure;
		}
		listing
	}

	/// Number of aggregates created so far
	pub fn len(&self) -> usize {
		self.entries.len()
	}

	pub fn is_empty(&self) -> bool {
		self.entries.is_empty()
	}

	/// Number of names dropped by the dot filters
	pub fn filtered(&self) -> usize {
		self.filtered
	}

	/// Fold one raw name into the aggregates
	pub fn push(&mut self, raw: &str) -> SeqResult<()> {
		let (sizes, len) = parse_sizes(raw, self.config.max_len, &self.config.parse_options);
		let name = &raw[..len];

		if is_filtered(name, &sizes, &self.config.dir_options) {
			trace!("Aggregator: filtered {}", name);
			self.filtered += 1;
			return Ok(());
		}

		let number = &name[sizes.number_range()];
		let key = if self.config.dir_options.enable_sequencing {
			SequenceKey::of(name, &sizes)
		} else {
			None
		};
		let hash = key.map(|key| self.hasher.hash_one(key));

		if let Some(hash) = hash
			&& let Some(bucket) = self.index.get(&hash)
		{
			for &i in bucket {
				let entry = &mut self.entries[i];
				if same_sequence(name, &sizes, &entry.name, &entry.sizes) {
					entry.frames.fold(number);
					trace!("Aggregator: folded {} into #{}", name, i);
					return Ok(());
				}
			}
		}

		self.entries.try_reserve(1)?;
		let mut owned = String::new();
		owned.try_reserve_exact(name.len())?;
		owned.push_str(name);
		if let Some(hash) = hash {
			self.index.try_reserve(1)?;
			self.index.entry(hash).or_default().push(self.entries.len());
		}
		trace!("Aggregator: new entry #{} for {}", self.entries.len(), name);
		self.entries.push(PendingEntry {
			name: owned,
			sizes,
			frames: FrameStats::first(number),
		});
		Ok(())
	}

	/// Materialize the aggregates.
	///
	/// If a component copy fails, the entries before it are kept and the
	/// error is recorded on the listing.
	pub fn into_listing(self) -> DirListing {
		let mut listing = DirListing {
			max_len: self.config.max_len,
			..DirListing::default()
		};
		if let Err(e) = listing.entries.try_reserve_exact(self.entries.len()) {
			warn!("Aggregator: cannot reserve {} entries", self.entries.len());
			listing.error = Some(e.into());
			return listing;
		}
		for pending in self.entries {
			match split_components(&pending.name, &pending.sizes) {
				Ok(file_name) => listing.entries.push(pending.frames.into_aggregate(file_name)),
				Err(e) => {
					warn!("Aggregator: cannot split {}: {}", pending.name, e);
					listing.error = Some(e);
					break;
				}
			}
		}
		debug!(
			"Aggregator: {} entries, {} filtered",
			listing.entries.len(),
			self.filtered
		);
		listing
	}
}

fn is_filtered(name: &str, sizes: &FileNameSizes, options: &DirOptions) -> bool {
	if !options.include_dot_and_dot_dot_dirs && (name == "." || name == "..") {
		return true;
	}
	!options.include_dot_files && sizes.base > 0 && name.as_bytes()[sizes.path] == b'.'
}
