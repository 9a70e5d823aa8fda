use std::path::PathBuf;

use e2e_octa::e2e::{ExtractOptions, extract_file_to_dir};

use crate::cmd::util::{WalkArgs, emit_json, parse_type_filter};

#[derive(clap::Args)]
pub struct Args {
	pub file: PathBuf,
	#[arg(short = 'o', long = "out")]
	pub out: PathBuf,
	#[command(flatten)]
	pub walk: WalkArgs,
	/// Type tags to decode (hex `0x...` or decimal); defaults to every known type.
	/// The laterality tag `0x3b` is always decoded so images can be labeled.
	#[arg(long = "type", value_name = "TAG")]
	pub types: Vec<String>,
	#[arg(long)]
	pub json: bool,
}

/// Extract the images of one container into a directory.
pub fn run(args: Args) -> e2e_octa::e2e::Result<()> {
	let Args {
		file: path,
		out,
		walk,
		types,
		json,
	} = args;

	let mut options = ExtractOptions::with_tags(parse_type_filter(&types)?);
	options.walk = walk.options();

	let summary = extract_file_to_dir(&path, &out, &options)?;

	if json {
		let payload = ExtractJson {
			path: path.display().to_string(),
			out: out.display().to_string(),
			images: summary.image_count(),
			skipped: summary.skipped,
			written: summary.written.iter().map(|item| item.display().to_string()).collect(),
		};
		emit_json(&payload);
		return Ok(());
	}

	println!("path: {}", path.display());
	println!("out: {}", out.display());
	println!("images: {}", summary.image_count());
	println!("skipped: {}", summary.skipped);
	for item in &summary.written {
		println!("{}", item.display());
	}

	Ok(())
}

#[derive(serde::Serialize)]
struct ExtractJson {
	path: String,
	out: String,
	images: usize,
	skipped: usize,
	written: Vec<String>,
}
