use std::path::PathBuf;

use e2e_octa::e2e::{BatchOptions, ExtractOptions, run_batch};
use tracing::warn;

use crate::cmd::util::{WalkArgs, emit_json, parse_type_filter};

#[derive(clap::Args)]
pub struct Args {
	pub folder: PathBuf,
	/// Output root; defaults to `<folder>_output` beside the input folder.
	#[arg(short = 'o', long = "out")]
	pub out: Option<PathBuf>,
	#[arg(long)]
	pub recursive: bool,
	/// Worker threads; one per CPU (at most 4) when omitted. Each worker holds one whole export in memory.
	#[arg(long)]
	pub jobs: Option<usize>,
	#[command(flatten)]
	pub walk: WalkArgs,
	/// Type tags to decode (hex `0x...` or decimal); defaults to every known type.
	/// The laterality tag `0x3b` is always decoded so images can be labeled.
	#[arg(long = "type", value_name = "TAG")]
	pub types: Vec<String>,
	#[arg(long)]
	pub json: bool,
}

/// Extract every container under a folder, mirroring its layout.
pub fn run(args: Args) -> e2e_octa::e2e::Result<()> {
	let Args {
		folder,
		out,
		recursive,
		jobs,
		walk,
		types,
		json,
	} = args;

	let mut extract = ExtractOptions::with_tags(parse_type_filter(&types)?);
	extract.walk = walk.options();
	let options = BatchOptions {
		recursive,
		output_root: out,
		jobs,
		extract,
		..BatchOptions::default()
	};

	let report = run_batch(&folder, &options, &|progress, file| {
		if !json {
			println!("{progress}\t{}\t{}", file.images, file.input.display());
		}
	})?;

	if report.no_inputs() {
		warn!(folder = %folder.display(), "no input containers found");
	}

	if json {
		emit_json(&report);
		return Ok(());
	}

	if report.no_inputs() {
		println!("no images");
		return Ok(());
	}

	println!();
	println!("output_root: {}", report.output_root.display());
	println!("files: {}", report.files.len());
	println!("failed: {}", report.failed_files());
	println!("images: {}", report.total_images());

	Ok(())
}
