//! Directory enumeration backends

use std::collections::HashMap;
use std::io;
use std::path::{Path, PathBuf};
use tracing::{debug, trace, warn};
use walkdir::WalkDir;

use crate::error::{SeqError, SeqResult};

/// Source of raw entry names for a directory.
///
/// Names come back in the backend's own order, which need not be sorted.
/// An empty directory yields an empty list; a missing or unreadable one is a
/// [`SeqError::Enumeration`].
pub trait DirectoryScanner {
	fn read_entry_names(&self, dir: &Path) -> SeqResult<Vec<String>>;
}

/// Lists a directory on the local filesystem.
#[derive(Debug, Clone)]
pub struct FsScanner {
	/// Report `.` and `..` ahead of the real entries
	pub dot_entries: bool,
	/// Follow a symlinked directory entry when reading its type
	pub follow_links: bool,
}

impl Default for FsScanner {
	fn default() -> Self {
		Self {
			dot_entries: true,
			follow_links: false,
		}
	}
}

impl FsScanner {
	pub fn new() -> Self {
		Self::default()
	}

	/// Configure whether `.` and `..` are reported
	pub fn dot_entries(mut self, report: bool) -> Self {
		self.dot_entries = report;
		self
	}

	/// Configure whether to follow symbolic links
	pub fn follow_links(mut self, follow: bool) -> Self {
		self.follow_links = follow;
		self
	}
}

impl DirectoryScanner for FsScanner {
	fn read_entry_names(&self, dir: &Path) -> SeqResult<Vec<String>> {
		let enumeration = |source: io::Error| SeqError::Enumeration {
			path: dir.to_path_buf(),
			source,
		};

		let metadata = std::fs::metadata(dir).map_err(enumeration)?;
		if !metadata.is_dir() {
			return Err(enumeration(io::Error::new(
				io::ErrorKind::NotADirectory,
				"not a directory",
			)));
		}

		let mut names = Vec::new();
		if self.dot_entries {
			names.push(".".to_string());
			names.push("..".to_string());
		}

		let walker = WalkDir::new(dir)
			.min_depth(1)
			.max_depth(1)
			.follow_links(self.follow_links);
		for entry in walker {
			let entry = match entry {
				Ok(e) => e,
				// The directory itself could not be read.
				Err(e) if e.depth() == 0 => return Err(enumeration(e.into())),
				Err(e) => {
					warn!("Scanner: skipping entry in {}: {}", dir.display(), e);
					continue;
				}
			};
			let file_name = entry.file_name();
			let name = match file_name.to_str() {
				Some(name) => name.to_owned(),
				None => {
					debug!("Scanner: non UTF-8 name {:?}", file_name);
					file_name.to_string_lossy().into_owned()
				}
			};
			trace!("Scanner: found {}", name);
			names.push(name);
		}

		debug!("Scanner: {} names in {}", names.len(), dir.display());
		Ok(names)
	}
}

/// Fixed directory contents held in memory.
#[derive(Debug, Clone, Default)]
pub struct MemoryScanner {
	dirs: HashMap<PathBuf, Vec<String>>,
}

impl MemoryScanner {
	pub fn new() -> Self {
		Self::default()
	}

	/// Add or replace the names listed for `dir`
	pub fn with_dir<I, S>(mut self, dir: impl Into<PathBuf>, names: I) -> Self
	where
		I: IntoIterator<Item = S>,
		S: Into<String>,
	{
		self.dirs
			.insert(dir.into(), names.into_iter().map(Into::into).collect());
		self
	}
}

impl DirectoryScanner for MemoryScanner {
	fn read_entry_names(&self, dir: &Path) -> SeqResult<Vec<String>> {
		self.dirs
			.get(dir)
			.cloned()
			.ok_or_else(|| SeqError::Enumeration {
				path: dir.to_path_buf(),
				source: io::Error::new(io::ErrorKind::NotFound, "no such directory"),
			})
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use std::fs;
	use tempfile::TempDir;

	fn sorted(mut names: Vec<String>) -> Vec<String> {
		names.sort();
		names
	}

	#[test_log::test]
	fn test_fs_scanner_lists_names() {
		let temp_dir = TempDir::new().unwrap();
		fs::write(temp_dir.path().join("seq.1.exr"), b"").unwrap();
		fs::write(temp_dir.path().join("notes.txt"), b"").unwrap();
		fs::create_dir(temp_dir.path().join("subdir")).unwrap();
		fs::write(temp_dir.path().join("subdir").join("nested.txt"), b"").unwrap();

		let names = FsScanner::new().read_entry_names(temp_dir.path()).unwrap();
		assert_eq!(&names[..2], &[".", ".."]);
		assert_eq!(
			sorted(names),
			vec![".", "..", "notes.txt", "seq.1.exr", "subdir"]
		);
	}

	#[test_log::test]
	fn test_fs_scanner_empty_dir() {
		let temp_dir = TempDir::new().unwrap();
		let names = FsScanner::new()
			.dot_entries(false)
			.read_entry_names(temp_dir.path())
			.unwrap();
		assert!(names.is_empty());
	}

	#[test_log::test]
	fn test_fs_scanner_missing_dir() {
		let temp_dir = TempDir::new().unwrap();
		let missing = temp_dir.path().join("missing");
		let err = FsScanner::new().read_entry_names(&missing).unwrap_err();
		assert!(err.is_enumeration());
	}

	#[test_log::test]
	fn test_fs_scanner_rejects_file() {
		let temp_dir = TempDir::new().unwrap();
		let file = temp_dir.path().join("file");
		fs::write(&file, b"").unwrap();
		let err = FsScanner::new().read_entry_names(&file).unwrap_err();
		assert!(err.is_enumeration());
	}

	#[test]
	fn test_memory_scanner() {
		let scanner = MemoryScanner::new().with_dir("/renders", ["a.1.exr", "a.2.exr"]);
		assert_eq!(
			scanner.read_entry_names(Path::new("/renders")).unwrap(),
			vec!["a.1.exr", "a.2.exr"]
		);
		assert!(
			scanner
				.read_entry_names(Path::new("/elsewhere"))
				.unwrap_err()
				.is_enumeration()
		);
	}
}
