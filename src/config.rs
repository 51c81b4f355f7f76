//! Listing configuration

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::{SeqError, SeqResult};
use crate::name::{DEFAULT_MAX_LEN, ParseOptions};

/// Which directory entries are kept and whether numbered files are grouped.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DirOptions {
	/// Keep the `.` and `..` entries
	pub include_dot_and_dot_dot_dirs: bool,
	/// Keep entries whose base name starts with `.`
	pub include_dot_files: bool,
	/// Fold numbered files into sequences
	pub enable_sequencing: bool,
}

impl Default for DirOptions {
	fn default() -> Self {
		Self {
			include_dot_and_dot_dot_dirs: false,
			include_dot_files: false,
			enable_sequencing: true,
		}
	}
}

/// Everything a directory listing needs besides the directory itself.
///
/// ```rust
/// use seqls::ListConfig;
///
/// let config = ListConfig::default()
///     .include_dot_files(true)
///     .sequencing(false);
/// assert!(config.validate().is_ok());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ListConfig {
	pub dir_options: DirOptions,
	pub parse_options: ParseOptions,
	/// Longest name scanned and longest line formatted, in bytes
	pub max_len: usize,
}

impl Default for ListConfig {
	fn default() -> Self {
		Self {
			dir_options: DirOptions::default(),
			parse_options: ParseOptions::default(),
			max_len: DEFAULT_MAX_LEN,
		}
	}
}

impl ListConfig {
	/// Load a configuration from JSON; missing fields keep their defaults
	pub fn from_json(text: &str) -> SeqResult<Self> {
		let config: Self = serde_json::from_str(text)?;
		config.validate()?;
		debug!("Config: loaded {:?}", config);
		Ok(config)
	}

	pub fn validate(&self) -> SeqResult<()> {
		if self.max_len == 0 {
			return Err(SeqError::Config("max_len must be greater than 0".to_string()));
		}
		if self.parse_options.max_number_digits == 0 {
			return Err(SeqError::Config(
				"max_number_digits must be greater than 0".to_string(),
			));
		}
		Ok(())
	}

	pub fn with_dir_options(mut self, options: DirOptions) -> Self {
		self.dir_options = options;
		self
	}

	pub fn with_parse_options(mut self, options: ParseOptions) -> Self {
		self.parse_options = options;
		self
	}

	pub fn include_dot_files(mut self, include: bool) -> Self {
		self.dir_options.include_dot_files = include;
		self
	}

	pub fn include_dot_dirs(mut self, include: bool) -> Self {
		self.dir_options.include_dot_and_dot_dot_dirs = include;
		self
	}

	pub fn sequencing(mut self, enable: bool) -> Self {
		self.dir_options.enable_sequencing = enable;
		self
	}

	pub fn max_len(mut self, max_len: usize) -> Self {
		self.max_len = max_len;
		self
	}
}
