use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

use serde::Serialize;

use crate::e2e::bytes::Cursor;
use crate::e2e::{DirEntry, E2eError, E2eHeader, Result, WalkOptions, WalkResult, walk_directory};

/// Container image loaded into memory with a validated header.
///
/// The OS handle is dropped inside [`E2eFile::open`]; every later read is a
/// slice of the owned bytes.
pub struct E2eFile {
	/// Parsed file header.
	pub header: E2eHeader,
	bytes: Vec<u8>,
}

impl E2eFile {
	/// Read a file on disk and validate its header.
	pub fn open(path: impl AsRef<Path>) -> Result<Self> {
		let raw = fs::read(path)?;
		Self::from_bytes(raw)
	}

	/// Wrap an in-memory container image.
	pub fn from_bytes(bytes: Vec<u8>) -> Result<Self> {
		let header = E2eHeader::parse(&mut Cursor::new(&bytes))?;
		Ok(Self { header, bytes })
	}

	/// Return container bytes.
	pub fn bytes(&self) -> &[u8] {
		&self.bytes
	}

	/// Walk the directory chain.
	pub fn walk(&self, options: &WalkOptions) -> Result<WalkResult> {
		walk_directory(&self.bytes, options)
	}

	/// Slice the payload an entry points at.
	pub fn payload(&self, entry: &DirEntry) -> Result<&[u8]> {
		let start = entry.start as usize;
		let end = start.checked_add(entry.size as usize);
		match end {
			Some(end) if end <= self.bytes.len() => Ok(&self.bytes[start..end]),
			_ => Err(E2eError::PayloadOutOfRange {
				tag: entry.tag,
				start: entry.start,
				size: entry.size,
				len: self.bytes.len(),
			}),
		}
	}

	/// Count valid entries per type tag.
	pub fn scan_entry_stats(&self, options: &WalkOptions) -> Result<EntryStats> {
		let walk = self.walk(options)?;
		let mut by_tag = BTreeMap::new();
		for entry in &walk.entries {
			*by_tag.entry(entry.tag).or_insert(0) += 1;
		}

		Ok(EntryStats {
			blocks_visited: walk.blocks_visited,
			entry_count: walk.entries.len(),
			by_tag,
		})
	}
}

/// Aggregate entry-level counts from a chain walk.
#[derive(Debug, Clone, Serialize)]
pub struct EntryStats {
	/// Number of chain blocks visited.
	pub blocks_visited: usize,
	/// Number of valid entries.
	pub entry_count: usize,
	/// Frequency table by type tag.
	pub by_tag: BTreeMap<u32, u32>,
}

#[cfg(test)]
mod tests;
