use std::path::PathBuf;

use e2e_octa::e2e::{ChunkKind, DirEntry, E2eFile};

use crate::cmd::util::{WalkArgs, emit_json, id_label, parse_type_filter, tag_hex};

#[derive(clap::Args)]
pub struct Args {
	pub file: PathBuf,
	#[command(flatten)]
	pub walk: WalkArgs,
	/// Only list entries with these type tags (hex `0x...` or decimal).
	#[arg(long = "type", value_name = "TAG")]
	pub types: Vec<String>,
	#[arg(long)]
	pub limit: Option<usize>,
	#[arg(long)]
	pub json: bool,
}

/// List valid directory entries in the order they are decoded.
pub fn run(args: Args) -> e2e_octa::e2e::Result<()> {
	let Args {
		file: path,
		walk,
		types,
		limit,
		json,
	} = args;

	let filter = if types.is_empty() {
		None
	} else {
		Some(parse_type_filter(&types)?)
	};

	let file = E2eFile::open(&path)?;
	let result = file.walk(&walk.options())?;
	let mut entries: Vec<&DirEntry> = result
		.entries
		.iter()
		.filter(|entry| filter.as_ref().is_none_or(|tags| tags.contains(&entry.tag)))
		.collect();
	if let Some(limit) = limit {
		entries.truncate(limit);
	}

	if json {
		let payload = EntriesJson {
			path: path.display().to_string(),
			blocks_visited: result.blocks_visited,
			entries: entries.iter().map(|entry| entry_to_json(entry)).collect(),
		};
		emit_json(&payload);
		return Ok(());
	}

	println!("path: {}", path.display());
	println!("blocks_visited: {}", result.blocks_visited);
	println!("entries: {}", entries.len());
	println!();
	println!("idx\ttype\tdescription\tpatient\tstudy\tseries\tslice\tstart\tsize");
	for (idx, entry) in entries.iter().enumerate() {
		println!(
			"{}\t{}\t{}\t{}\t{}\t{}\t{}\t{}\t{}",
			idx,
			tag_hex(entry.tag),
			ChunkKind::from_tag(entry.tag).description(),
			id_label(entry.patient()),
			id_label(entry.study()),
			id_label(entry.series()),
			id_label(entry.slice()),
			entry.start,
			entry.size
		);
	}

	Ok(())
}

fn entry_to_json(entry: &DirEntry) -> EntryJson {
	EntryJson {
		tag: tag_hex(entry.tag),
		description: ChunkKind::from_tag(entry.tag).description(),
		patient_id: entry.patient(),
		study_id: entry.study(),
		series_id: entry.series(),
		slice_id: entry.slice(),
		start: entry.start,
		size: entry.size,
	}
}

#[derive(serde::Serialize)]
struct EntriesJson {
	path: String,
	blocks_visited: usize,
	entries: Vec<EntryJson>,
}

#[derive(serde::Serialize)]
struct EntryJson {
	tag: String,
	description: String,
	patient_id: Option<u32>,
	study_id: Option<u32>,
	series_id: Option<u32>,
	slice_id: Option<u32>,
	start: u32,
	size: u32,
}
