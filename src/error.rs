//! Error types for sequence listing

use std::collections::TryReserveError;
use std::path::PathBuf;
use thiserror::Error;

use crate::name::FileNameSizes;

/// Failure modes of a directory listing.
///
/// Name parsing itself never fails: over-long names are truncated at the scan
/// boundary and over-long digit runs fall back into the base name.
///
/// ## Partial results
///
/// An `Allocation` error stops aggregation but does not invalidate what was
/// already built. [`crate::DirListing`] keeps those entries next to the error,
/// so a caller can still print them:
///
/// ```rust
/// use seqls::{ListConfig, list_dir};
///
/// let listing = list_dir("./renders", &ListConfig::default());
/// for entry in &listing.entries {
///     println!("{}", entry.to_display_string(false));
/// }
/// if let Some(err) = &listing.error {
///     eprintln!("listing incomplete: {err}");
/// }
/// ```
#[derive(Debug, Error)]
pub enum SeqError {
	/// The directory does not exist or cannot be opened
	#[error("cannot read {}: {source}", path.display())]
	Enumeration {
		path: PathBuf,
		#[source]
		source: std::io::Error,
	},

	/// Memory could not be reserved for an aggregate or its component strings
	#[error("allocation failed: {0}")]
	Allocation(#[from] TryReserveError),

	/// Component sizes measured on one name were applied to another
	#[error("component sizes {sizes:?} do not fit a name of {name_len} bytes")]
	InvalidSizes { sizes: FileNameSizes, name_len: usize },

	/// Configuration validation errors with descriptive messages
	#[error("Configuration error: {0}")]
	Config(String),

	/// Configuration could not be deserialized
	#[error("Configuration parse error: {0}")]
	ConfigParse(#[from] serde_json::Error),
}

impl SeqError {
	/// Whether this error came from the directory enumeration step
	pub fn is_enumeration(&self) -> bool {
		matches!(self, SeqError::Enumeration { .. })
	}
}

/// Convenience type alias for Results in sequence listing.
pub type SeqResult<T> = Result<T, SeqError>;
