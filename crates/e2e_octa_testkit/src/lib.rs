//! Shared test helpers for workspace crates: synthetic E2E containers and fixture files.

use std::fs;
use std::path::{Path, PathBuf};

/// Laterality/series metadata chunk tag.
pub const LATERALITY_TAG: u32 = 0x3b;
/// Superficial vascular complex image tag.
pub const SVC_TAG: u32 = 0x2760;
/// Deep vascular complex image tag.
pub const DVC_TAG: u32 = 0x2761;
/// Avascular complex image tag.
pub const AVC_TAG: u32 = 0x2762;

/// Raster side length in pixels.
pub const SIDE: usize = 512;
/// Byte length of a well-formed image payload.
pub const IMAGE_PAYLOAD_LEN: usize = SIDE * SIDE * 4;

const HEADER_SIZE: usize = 36;
const BLOCK_SIZE: usize = 52;
const ENTRY_SIZE: usize = 44;

/// One synthetic directory entry plus its payload.
#[derive(Debug, Clone)]
pub struct FixtureEntry {
	/// Chunk type tag; `0` produces an unused slot.
	pub tag: u32,
	/// Patient id.
	pub patient_id: u32,
	/// Study id.
	pub study_id: u32,
	/// Series id.
	pub series_id: u32,
	/// Slice id.
	pub slice_id: u32,
	/// Payload bytes written after the directory region.
	pub payload: Vec<u8>,
}

impl FixtureEntry {
	/// Entry with ids `1/2/3/0`.
	pub fn new(tag: u32, payload: Vec<u8>) -> Self {
		Self {
			tag,
			patient_id: 1,
			study_id: 2,
			series_id: 3,
			slice_id: 0,
			payload,
		}
	}

	/// Override patient/study/series ids.
	pub fn with_ids(mut self, patient_id: u32, study_id: u32, series_id: u32) -> Self {
		self.patient_id = patient_id;
		self.study_id = study_id;
		self.series_id = series_id;
		self
	}

	/// Laterality entry carrying `code` (`b'R'` for right eye).
	pub fn laterality(code: u8) -> Self {
		Self::new(LATERALITY_TAG, laterality_payload(code))
	}

	/// Image entry with a deterministic payload derived from `seed`.
	pub fn image(tag: u32, seed: u8) -> Self {
		Self::new(tag, image_payload(seed))
	}

	/// Unused slot (`tag == 0`).
	pub fn unused() -> Self {
		Self::new(0, Vec::new())
	}
}

/// Synthetic container written by [`ContainerBuilder::build`].
#[derive(Debug, Clone)]
pub struct BuiltContainer {
	/// Complete file image.
	pub bytes: Vec<u8>,
	/// Offsets of chain blocks, oldest first.
	pub block_offsets: Vec<usize>,
}

impl BuiltContainer {
	/// Overwrite the `prev` pointer of chain block `block`.
	pub fn set_prev(&mut self, block: usize, prev: u32) {
		let at = self.block_offsets[block] + 44;
		self.bytes[at..at + 4].copy_from_slice(&prev.to_le_bytes());
	}

	/// Overwrite the file-level `last` pointer in the main block.
	pub fn set_main_last(&mut self, last: u32) {
		let at = HEADER_SIZE + 40;
		self.bytes[at..at + 4].copy_from_slice(&last.to_le_bytes());
	}
}

/// Builds containers whose blocks are given oldest first.
#[derive(Debug, Clone)]
pub struct ContainerBuilder {
	magic: [u8; 12],
	padding: [u8; 20],
	blocks: Vec<Vec<FixtureEntry>>,
}

impl Default for ContainerBuilder {
	fn default() -> Self {
		Self::new()
	}
}

impl ContainerBuilder {
	/// Builder with the `OCTAIR2.0.0` magic and standard padding.
	pub fn new() -> Self {
		let mut padding = [0xFF_u8; 20];
		padding[18] = 0;
		padding[19] = 0;
		Self {
			magic: *b"OCTAIR2.0.0\0",
			padding,
			blocks: Vec::new(),
		}
	}

	/// Replace the header/block magic.
	pub fn magic(mut self, magic: [u8; 12]) -> Self {
		self.magic = magic;
		self
	}

	/// Replace the reserved padding.
	pub fn padding(mut self, padding: [u8; 20]) -> Self {
		self.padding = padding;
		self
	}

	/// Append a block (newer than every block added before it).
	pub fn block(mut self, entries: Vec<FixtureEntry>) -> Self {
		self.blocks.push(entries);
		self
	}

	/// Lay out header, main block, chain blocks, then payloads.
	pub fn build(&self) -> BuiltContainer {
		let mut block_offsets = Vec::with_capacity(self.blocks.len());
		let mut cursor = HEADER_SIZE + BLOCK_SIZE;
		for entries in &self.blocks {
			block_offsets.push(cursor);
			cursor += BLOCK_SIZE + ENTRY_SIZE * entries.len();
		}
		let newest = block_offsets.last().copied().unwrap_or(0) as u32;

		let mut payload_offset = cursor;
		let mut payload_starts = Vec::new();
		for entries in &self.blocks {
			let mut starts = Vec::with_capacity(entries.len());
			for entry in entries {
				starts.push(payload_offset as u32);
				payload_offset += entry.payload.len();
			}
			payload_starts.push(starts);
		}

		let mut bytes = Vec::with_capacity(payload_offset);
		bytes.extend_from_slice(&self.magic);
		bytes.extend_from_slice(&100_u32.to_le_bytes());
		bytes.extend_from_slice(&self.padding);

		self.push_block(&mut bytes, 0, newest, 0, 0);

		for (idx, entries) in self.blocks.iter().enumerate() {
			let prev = if idx == 0 { 0 } else { block_offsets[idx - 1] as u32 };
			self.push_block(&mut bytes, entries.len() as u32, newest, prev, idx as u32 + 1);
			for (slot, entry) in entries.iter().enumerate() {
				push_entry(&mut bytes, slot as u32, payload_starts[idx][slot], entry);
			}
		}

		for entries in &self.blocks {
			for entry in entries {
				bytes.extend_from_slice(&entry.payload);
			}
		}

		BuiltContainer { bytes, block_offsets }
	}

	fn push_block(&self, out: &mut Vec<u8>, num_entries: u32, last: u32, prev: u32, id: u32) {
		out.extend_from_slice(&self.magic);
		out.extend_from_slice(&100_u32.to_le_bytes());
		out.extend_from_slice(&self.padding);
		for value in [num_entries, last, prev, id] {
			out.extend_from_slice(&value.to_le_bytes());
		}
	}
}

fn push_entry(out: &mut Vec<u8>, position: u32, start: u32, entry: &FixtureEntry) {
	let size = entry.payload.len() as u32;
	for value in [position, start, size, 0, entry.patient_id, entry.study_id, entry.series_id, entry.slice_id] {
		out.extend_from_slice(&value.to_le_bytes());
	}
	out.extend_from_slice(&0_u16.to_le_bytes());
	out.extend_from_slice(&0_u16.to_le_bytes());
	out.extend_from_slice(&entry.tag.to_le_bytes());
	out.extend_from_slice(&[0xAA, 0xBB, 0xCC, 0xDD]);
}

/// 27-byte laterality record with `code` at offset 14.
pub fn laterality_payload(code: u8) -> Vec<u8> {
	let mut out = vec![0_u8; 27];
	out[12..14].copy_from_slice(&7_u16.to_le_bytes());
	out[14] = code;
	for (idx, byte) in out[15..].iter_mut().enumerate() {
		*byte = idx as u8;
	}
	out
}

/// Four-bytes-per-pixel image payload; channel `c` of pixel `(row, col)` is `f(row, col, c)`.
pub fn image_payload_with(f: impl Fn(usize, usize, usize) -> u8) -> Vec<u8> {
	let mut out = Vec::with_capacity(IMAGE_PAYLOAD_LEN);
	for row in 0..SIDE {
		for col in 0..SIDE {
			out.push(f(row, col, 0));
			out.push(f(row, col, 1));
			out.push(f(row, col, 2));
			out.push(0xEE);
		}
	}
	out
}

/// Deterministic image payload varying by row, column, channel, and `seed`.
pub fn image_payload(seed: u8) -> Vec<u8> {
	image_payload_with(|row, col, ch| (row as u8).wrapping_mul(3) ^ (col as u8) ^ ((ch as u8) << 6) ^ seed)
}

/// Write `bytes` to `dir/name`, creating parent directories.
pub fn write_file(dir: &Path, name: &str, bytes: &[u8]) -> PathBuf {
	let path = dir.join(name);
	if let Some(parent) = path.parent() {
		fs::create_dir_all(parent).expect("fixture parent directory is created");
	}
	fs::write(&path, bytes).expect("fixture file is written");
	path
}
