use anyhow::{Context, bail};
use clap::{Parser, Subcommand};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde_json::json;
use std::collections::HashSet;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{Level, debug, info, subscriber::set_global_default};
use tracing_subscriber::EnvFilter;

use seqls::{DirListing, ListConfig, list_dir};

fn init_tracing(verbosity: u8) {
	// Map -q/-v to tracing levels; default WARN
	let level = match verbosity {
		0 => Level::WARN,
		1 => Level::INFO,
		2 => Level::DEBUG,
		_ => Level::TRACE,
	};

	let env_filter = EnvFilter::from_default_env().add_directive(level.into());

	let subscriber = tracing_subscriber::fmt()
		.with_env_filter(env_filter)
		.with_writer(std::io::stderr) // logs to stderr
		.with_target(false)
		.with_level(true)
		.compact()
		.finish();

	// Ignore error if already set in tests or env
	let _ = set_global_default(subscriber);
}

fn main() {
	let opts = Opts::parse();
	init_tracing(opts.verbose.saturating_sub(opts.quiet));
	if let Err(e) = run(opts) {
		eprintln!("error: {e:#}");
		std::process::exit(1);
	}
}

fn run(opts: Opts) -> anyhow::Result<()> {
	match opts.command {
		Command::List { dirs, flags } => {
			let config = flags.to_config()?;
			let dirs = if dirs.is_empty() {
				vec![PathBuf::from(".")]
			} else {
				dirs
			};
			let mut failed = 0;
			for dir in &dirs {
				let listing = list_dir(dir, &config);
				if let Some(e) = &listing.error {
					eprintln!("cannot read {}", dir.display());
					debug!("{}", e);
					failed += 1;
				}
				print_listing(dir, &listing, &flags)?;
			}
			if failed > 0 {
				bail!("{} of {} directories could not be read", failed, dirs.len());
			}
		}
		Command::Random {
			dir,
			total,
			sequences,
			seed,
		} => {
			let created = create_random(&dir, total, sequences, seed)?;
			println!("Created {created} files in {}", dir.display());
		}
	}
	Ok(())
}

fn print_listing(dir: &Path, listing: &DirListing, flags: &ListFlags) -> anyhow::Result<()> {
	if flags.json {
		let entries = listing
			.entries
			.iter()
			.map(|entry| {
				let mut value = serde_json::to_value(entry)?;
				value["display"] = listing.display_name(entry, flags.full_path).into();
				Ok(value)
			})
			.collect::<serde_json::Result<Vec<_>>>()?;
		let doc = json!({
			"dir": dir.display().to_string(),
			"error": listing.error.as_ref().map(|e| e.to_string()),
			"entries": entries,
		});
		println!("{}", serde_json::to_string_pretty(&doc)?);
	} else {
		for line in listing.display_lines(flags.full_path) {
			println!("{line}");
		}
	}
	Ok(())
}

const PASSES: &[&str] = &["normals", "rgba", "z"];

/// Create `sequences` random render sequences of empty `.tif` files
fn create_random(dir: &Path, total: usize, sequences: usize, seed: Option<u64>) -> anyhow::Result<usize> {
	if sequences == 0 {
		bail!("sequence count must be greater than 0");
	}
	if sequences > PASSES.len() * 100 * 100 {
		bail!("at most {} distinct sequences can be named", PASSES.len() * 100 * 100);
	}
	fs::create_dir_all(dir).with_context(|| format!("cannot create {}", dir.display()))?;

	let mut rng = match seed {
		Some(seed) => StdRng::seed_from_u64(seed),
		None => StdRng::from_entropy(),
	};
	let per_sequence = total / sequences;
	let mut created = 0;
	let mut bases = HashSet::new();
	while bases.len() < sequences {
		let pass = PASSES[rng.gen_range(0..PASSES.len())];
		let base = format!(
			"shot{}_scene{}_{}",
			rng.gen_range(0..100),
			rng.gen_range(0..100),
			pass
		);
		if !bases.insert(base.clone()) {
			continue;
		}
		let start = rng.gen_range(0..1000usize);
		for frame in start..start + per_sequence {
			let path = dir.join(format!("{base}.{frame}.tif"));
			fs::File::create(&path).with_context(|| format!("cannot create {}", path.display()))?;
			created += 1;
		}
		debug!("Random: {} frames {}..{}", base, start, start + per_sequence);
	}
	info!("Random: created {} files in {}", created, dir.display());
	Ok(created)
}

#[derive(Parser)]
#[command(version, about = "List directories with numbered file sequences collapsed")]
pub struct Opts {
	/// Increase verbosity (-v, -vv). Default WARN.
	#[arg(short = 'v', action = clap::ArgAction::Count, global = true)]
	pub verbose: u8,
	/// Decrease verbosity (-q). Each -q reduces level by one step.
	#[arg(short = 'q', action = clap::ArgAction::Count, global = true)]
	pub quiet: u8,

	#[command(subcommand)]
	pub command: Command,
}

#[derive(Subcommand)]
pub enum Command {
	/// List directories (default: the current directory)
	List {
		/// Directories to list
		dirs: Vec<PathBuf>,
		#[command(flatten)]
		flags: ListFlags,
	},
	/// Create random file sequences for testing
	Random {
		/// Directory to create the files in
		dir: PathBuf,
		/// Total number of files
		total: usize,
		/// Number of sequences
		sequences: usize,
		/// Seed for reproducible names
		#[arg(long)]
		seed: Option<u64>,
	},
}

#[derive(clap::Args)]
pub struct ListFlags {
	/// Show dot files
	#[arg(short = 'a', long)]
	pub all: bool,
	/// Show the `.` and `..` entries
	#[arg(long)]
	pub dot_dirs: bool,
	/// List every file on its own line
	#[arg(long)]
	pub no_sequence: bool,
	/// Prefix entries with their path
	#[arg(long)]
	pub full_path: bool,
	/// Read a `-` before the frame number as a sign
	#[arg(long)]
	pub negative: bool,
	/// Print JSON instead of one name per line
	#[arg(long)]
	pub json: bool,
	/// Load listing options from a JSON file; flags above override it
	#[arg(long)]
	pub config: Option<PathBuf>,
}

impl ListFlags {
	fn to_config(&self) -> anyhow::Result<ListConfig> {
		let mut config = match &self.config {
			Some(path) => {
				let text = fs::read_to_string(path)
					.with_context(|| format!("cannot read config {}", path.display()))?;
				ListConfig::from_json(&text)?
			}
			None => ListConfig::default(),
		};
		if self.all {
			config = config.include_dot_files(true);
		}
		if self.dot_dirs {
			config = config.include_dot_dirs(true);
		}
		if self.no_sequence {
			config = config.sequencing(false);
		}
		if self.negative {
			config.parse_options.allow_negative_numbers = true;
		}
		Ok(config)
	}
}
