use std::path::PathBuf;

use e2e_octa::e2e::{ChunkKind, E2eFile};

use crate::cmd::util::{WalkArgs, emit_json, tag_hex};

#[derive(clap::Args)]
pub struct Args {
	pub file: PathBuf,
	#[command(flatten)]
	pub walk: WalkArgs,
	#[arg(long)]
	pub json: bool,
}

/// Print header fields and per-kind entry counts.
pub fn run(args: Args) -> e2e_octa::e2e::Result<()> {
	let Args { file: path, walk, json } = args;

	let file = E2eFile::open(&path)?;
	let stats = file.scan_entry_stats(&walk.options())?;

	if json {
		let payload = InfoJson {
			path: path.display().to_string(),
			magic: file.header.magic.clone(),
			version: file.header.version,
			padding_ok: file.header.padding_ok(),
			blocks_visited: stats.blocks_visited,
			entry_count: stats.entry_count,
			by_type: stats
				.by_tag
				.iter()
				.map(|(tag, count)| TypeCountJson {
					tag: tag_hex(*tag),
					description: ChunkKind::from_tag(*tag).description(),
					count: *count,
				})
				.collect(),
		};
		emit_json(&payload);
		return Ok(());
	}

	println!("path: {}", path.display());
	println!("magic: {}", file.header.magic);
	println!("version: {}", file.header.version);
	println!("padding_ok: {}", file.header.padding_ok());
	println!("blocks_visited: {}", stats.blocks_visited);
	println!("entries: {}", stats.entry_count);
	println!();
	println!("type\tcount\tdescription");
	for (tag, count) in &stats.by_tag {
		println!("{}\t{}\t{}", tag_hex(*tag), count, ChunkKind::from_tag(*tag).description());
	}

	Ok(())
}

#[derive(serde::Serialize)]
struct InfoJson {
	path: String,
	magic: String,
	version: u32,
	padding_ok: bool,
	blocks_visited: usize,
	entry_count: usize,
	by_type: Vec<TypeCountJson>,
}

#[derive(serde::Serialize)]
struct TypeCountJson {
	tag: String,
	description: String,
	count: u32,
}
