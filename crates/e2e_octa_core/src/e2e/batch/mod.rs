use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicUsize, Ordering};

use rayon::prelude::*;
use serde::Serialize;
use tracing::{debug, info, warn};

use crate::e2e::{ExtractOptions, Result, extract_file_to_dir};

/// File extensions picked up by default (compared case-insensitively).
pub const DEFAULT_EXTENSIONS: &[&str] = &["e2e"];

/// Upper bound on default worker threads; each worker holds a whole export in memory.
pub const DEFAULT_MAX_JOBS: usize = 4;

/// Folder batch options.
#[derive(Debug, Clone)]
pub struct BatchOptions {
	/// Descend into subdirectories.
	pub recursive: bool,
	/// Accepted extensions without the leading dot.
	pub extensions: Vec<String>,
	/// Output root; defaults to `<root>_output` next to the input folder.
	pub output_root: Option<PathBuf>,
	/// Worker threads; `None` (or `0`) uses one per CPU, capped at [`DEFAULT_MAX_JOBS`].
	pub jobs: Option<usize>,
	/// Per-file extraction options.
	pub extract: ExtractOptions,
}

impl Default for BatchOptions {
	fn default() -> Self {
		Self {
			recursive: false,
			extensions: DEFAULT_EXTENSIONS.iter().map(|ext| (*ext).to_owned()).collect(),
			output_root: None,
			jobs: None,
			extract: ExtractOptions::default(),
		}
	}
}

/// Whole-file progress tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Progress {
	/// Files finished so far, including this one.
	pub counter: usize,
	/// Files in the batch.
	pub total: usize,
}

impl fmt::Display for Progress {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		write!(f, "{} / {}", self.counter, self.total)
	}
}

/// Outcome for one input file.
#[derive(Debug, Clone, Serialize)]
pub struct FileReport {
	/// Input container path.
	pub input: PathBuf,
	/// Directory images were written to.
	pub output_dir: PathBuf,
	/// Images written.
	pub images: usize,
	/// Entries skipped on entry-level errors.
	pub skipped: usize,
	/// File-level failure, rendered.
	pub error: Option<String>,
	/// Whether the file was cut short or never started because of cancellation.
	pub cancelled: bool,
}

/// Outcome of a folder batch.
#[derive(Debug, Clone, Serialize)]
pub struct BatchReport {
	/// Root images were mirrored under.
	pub output_root: PathBuf,
	/// Per-file outcomes in input order.
	pub files: Vec<FileReport>,
}

impl BatchReport {
	/// Images written across all files.
	pub fn total_images(&self) -> usize {
		self.files.iter().map(|file| file.images).sum()
	}

	/// Files that failed at file level.
	pub fn failed_files(&self) -> usize {
		self.files.iter().filter(|file| file.error.is_some()).count()
	}

	/// Whether no input file matched.
	pub fn no_inputs(&self) -> bool {
		self.files.is_empty()
	}

	/// Whether any file was affected by cancellation.
	pub fn cancelled(&self) -> bool {
		self.files.iter().any(|file| file.cancelled)
	}
}

/// `<parent>/<name>_output` for an input folder.
pub fn default_output_root(root: &Path) -> PathBuf {
	let name = root.file_name().map(|name| name.to_string_lossy().into_owned()).unwrap_or_default();
	let parent = root.parent().unwrap_or_else(|| Path::new(""));
	parent.join(format!("{name}_output"))
}

/// Worker threads used for a requested job count.
pub fn worker_count(jobs: Option<usize>) -> usize {
	match jobs {
		Some(jobs) if jobs > 0 => jobs,
		_ => rayon::current_num_threads().clamp(1, DEFAULT_MAX_JOBS),
	}
}

/// List matching input files under `root`, sorted.
///
/// Only an unreadable `root` is an error; unreadable subdirectories are
/// logged and skipped.
pub fn collect_inputs(root: &Path, recursive: bool, extensions: &[String]) -> Result<Vec<PathBuf>> {
	let suffixes: Vec<String> = extensions.iter().map(|ext| format!(".{}", ext.to_ascii_lowercase())).collect();
	let mut out = Vec::new();
	visit_dir(root, recursive, &suffixes, &mut out)?;
	out.sort();
	Ok(out)
}

fn visit_dir(dir: &Path, recursive: bool, suffixes: &[String], out: &mut Vec<PathBuf>) -> Result<()> {
	for item in fs::read_dir(dir)? {
		let item = item?;
		let path = item.path();
		let file_type = item.file_type()?;
		if file_type.is_dir() {
			if recursive {
				if let Err(err) = visit_dir(&path, recursive, suffixes, out) {
					warn!(dir = %path.display(), error = %err, "skipping unreadable directory");
				}
			}
			continue;
		}

		let name = item.file_name().to_string_lossy().to_ascii_lowercase();
		if suffixes.iter().any(|suffix| name.ends_with(suffix.as_str())) {
			out.push(path);
		}
	}
	Ok(())
}

/// Extract every matching file under `root`, mirroring relative directories
/// under the output root. A failing file is reported with zero images and
/// never stops the batch.
pub fn run_batch(root: &Path, options: &BatchOptions, progress: &(dyn Fn(Progress, &FileReport) + Sync)) -> Result<BatchReport> {
	let output_root = options.output_root.clone().unwrap_or_else(|| default_output_root(root));
	let inputs = collect_inputs(root, options.recursive, &options.extensions)?;
	let total = inputs.len();
	info!(root = %root.display(), total, "batch started");

	let pool = rayon::ThreadPoolBuilder::new().num_threads(worker_count(options.jobs)).build()?;

	let done = AtomicUsize::new(0);
	let files = pool.install(|| {
		inputs
			.par_iter()
			.map(|input| {
				let relative_dir = input.strip_prefix(root).ok().and_then(Path::parent).unwrap_or_else(|| Path::new(""));
				let report = run_one(input, &output_root.join(relative_dir), &options.extract);
				let counter = done.fetch_add(1, Ordering::Relaxed) + 1;
				progress(Progress { counter, total }, &report);
				report
			})
			.collect::<Vec<_>>()
	});

	Ok(BatchReport { output_root, files })
}

fn run_one(input: &Path, output_dir: &Path, options: &ExtractOptions) -> FileReport {
	let mut report = FileReport {
		input: input.to_path_buf(),
		output_dir: output_dir.to_path_buf(),
		images: 0,
		skipped: 0,
		error: None,
		cancelled: false,
	};

	if options.cancel.is_cancelled() {
		debug!(file = %input.display(), "skipped after cancellation");
		report.cancelled = true;
		return report;
	}

	match extract_file_to_dir(input, output_dir, options) {
		Ok(summary) => {
			report.images = summary.image_count();
			report.skipped = summary.skipped;
			report.cancelled = summary.cancelled;
		}
		Err(err) => {
			warn!(file = %input.display(), error = %err, "file produced no images");
			report.error = Some(err.to_string());
		}
	}
	report
}
