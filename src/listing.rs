//! Directory listing entry points

use std::path::Path;
use tracing::{debug, info, warn};

use crate::aggregate::{SequenceAggregate, SequenceAggregator};
use crate::config::ListConfig;
use crate::error::{SeqError, SeqResult};
use crate::format::format_aggregate;
use crate::name::DEFAULT_MAX_LEN;
use crate::scanner::{DirectoryScanner, FsScanner};

/// The entries of one directory together with an out-of-band failure.
///
/// `entries` is always usable. When `error` is set after an allocation
/// failure, `entries` holds every aggregate completed before it; after an
/// enumeration failure it is empty.
#[derive(Debug)]
pub struct DirListing {
	pub entries: Vec<SequenceAggregate>,
	pub error: Option<SeqError>,
	/// Longest formatted line, in bytes
	pub max_len: usize,
}

impl Default for DirListing {
	fn default() -> Self {
		Self {
			entries: Vec::new(),
			error: None,
			max_len: DEFAULT_MAX_LEN,
		}
	}
}

impl DirListing {
	pub fn failed(error: SeqError) -> Self {
		Self {
			error: Some(error),
			..Self::default()
		}
	}

	pub fn is_error(&self) -> bool {
		self.error.is_some()
	}

	pub fn len(&self) -> usize {
		self.entries.len()
	}

	pub fn is_empty(&self) -> bool {
		self.entries.is_empty()
	}

	/// Display names of every entry, in listing order, cut to `max_len`
	pub fn display_lines(&self, include_path: bool) -> impl Iterator<Item = String> + '_ {
		self.entries
			.iter()
			.map(move |entry| self.display_name(entry, include_path))
	}

	/// Display name of one entry, cut to `max_len`
	pub fn display_name(&self, entry: &SequenceAggregate, include_path: bool) -> String {
		format_aggregate(entry, include_path, self.max_len)
	}

	/// Drop partial results and keep only the failure, if any
	pub fn into_result(self) -> SeqResult<Vec<SequenceAggregate>> {
		match self.error {
			Some(e) => Err(e),
			None => Ok(self.entries),
		}
	}
}

impl<'a> IntoIterator for &'a DirListing {
	type Item = &'a SequenceAggregate;
	type IntoIter = std::slice::Iter<'a, SequenceAggregate>;

	fn into_iter(self) -> Self::IntoIter {
		self.entries.iter()
	}
}

/// List `dir` on the local filesystem, grouping numbered files into sequences.
///
/// ```rust,no_run
/// use seqls::{ListConfig, list_dir};
///
/// let listing = list_dir("/renders/shot010", &ListConfig::default());
/// for line in listing.display_lines(false) {
///     println!("{line}");
/// }
/// ```
pub fn list_dir(dir: impl AsRef<Path>, config: &ListConfig) -> DirListing {
	list_dir_with(&FsScanner::default(), dir, config)
}

/// List `dir` using a caller-supplied scanner
pub fn list_dir_with<S>(scanner: &S, dir: impl AsRef<Path>, config: &ListConfig) -> DirListing
where
	S: DirectoryScanner + ?Sized,
{
	let dir = dir.as_ref();
	info!("Listing: {}", dir.display());

	if let Err(e) = config.validate() {
		warn!("Listing: {}", e);
		return DirListing::failed(e);
	}

	let names = match scanner.read_entry_names(dir) {
		Ok(names) => names,
		Err(e) => {
			warn!("Listing: {}", e);
			return DirListing::failed(e);
		}
	};

	let listing = SequenceAggregator::aggregate(&names, config);
	debug!(
		"Listing: {} names folded into {} entries",
		names.len(),
		listing.len()
	);
	listing
}
