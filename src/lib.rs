//! # File Sequence Listing
//!
//! Collapses numbered files such as `render.0001.exr` ... `render.0240.exr`
//! into a single entry `render.0001-0240.exr`.
//!
//! Names flow one way: [`name`] measures and splits them, [`matcher`] decides
//! which ones share a sequence, [`aggregate`] folds them into frame ranges and
//! [`format`] renders the result. [`listing`] ties this to a directory through
//! a [`scanner::DirectoryScanner`].

pub mod aggregate;
pub mod config;
pub mod error;
pub mod format;
pub mod listing;
pub mod matcher;
pub mod name;
pub mod scanner;

// Re-export main API types
pub use aggregate::{SequenceAggregate, SequenceAggregator};
pub use config::{DirOptions, ListConfig};
pub use error::{SeqError, SeqResult};
pub use listing::{DirListing, list_dir, list_dir_with};
pub use name::{FileNameComponents, FileNameSizes, ParseOptions};
pub use scanner::{DirectoryScanner, FsScanner, MemoryScanner};
