use std::collections::HashSet;

use serde::Serialize;
use tracing::{debug, warn};

use crate::e2e::bytes::Cursor;
use crate::e2e::record::{FixedRecord, read_record};
use crate::e2e::{DirBlock, DirEntry, E2eError, E2eHeader, Result};

/// Directory traversal options.
#[derive(Debug, Clone)]
pub struct WalkOptions {
	/// Maximum number of chain blocks visited before the chain is rejected.
	pub max_blocks: usize,
	/// Reject headers whose reserved padding differs from the expected pattern.
	pub strict_padding: bool,
}

impl Default for WalkOptions {
	fn default() -> Self {
		Self {
			max_blocks: 65_536,
			strict_padding: false,
		}
	}
}

/// Result of walking the directory chain.
#[derive(Debug, Clone, Serialize)]
pub struct WalkResult {
	/// File header.
	pub header: E2eHeader,
	/// Main directory block following the header.
	pub main: DirBlock,
	/// Number of chain blocks visited, including empty ones.
	pub blocks_visited: usize,
	/// Valid entries, oldest block first, in-block file order preserved.
	pub entries: Vec<DirEntry>,
}

/// Walk the directory chain from the main block's `last` pointer back to `prev == 0`.
///
/// Blocks are stored newest-first, so entries are gathered reversed per block
/// and the whole list is reversed once at the end.
pub fn walk_directory(bytes: &[u8], options: &WalkOptions) -> Result<WalkResult> {
	let mut cursor = Cursor::new(bytes);
	let header = E2eHeader::parse(&mut cursor)?;
	if !header.padding_ok() {
		if options.strict_padding {
			return Err(E2eError::BadPadding {
				at: E2eHeader::PADDING_OFFSET,
			});
		}
		warn!(padding = ?header.padding, "unexpected header padding");
	}

	let main: DirBlock = read_record(&mut cursor)?;
	debug!(last = main.last, "main directory block");

	let mut collected = Vec::new();
	let mut visited = HashSet::new();
	let mut target = main.last;

	while target != 0 {
		if visited.len() >= options.max_blocks {
			return Err(E2eError::ChainTooLong {
				max_blocks: options.max_blocks,
			});
		}
		if !visited.insert(target) {
			return Err(E2eError::ChainCycle { at: target });
		}

		cursor.set_record("directory block");
		cursor.seek(target as usize)?;
		let block: DirBlock = read_record(&mut cursor)?;

		let mut valid = Vec::with_capacity((block.num_entries as usize).min(cursor.remaining() / DirEntry::SIZE));
		for _ in 0..block.num_entries {
			let entry: DirEntry = read_record(&mut cursor)?;
			if entry.is_valid() {
				valid.push(entry);
			}
		}
		debug!(
			offset = target,
			id = block.id,
			entries = block.num_entries,
			valid = valid.len(),
			prev = block.prev,
			"directory block"
		);

		collected.extend(valid.into_iter().rev());
		target = block.prev;
	}

	collected.reverse();

	Ok(WalkResult {
		header,
		main,
		blocks_visited: visited.len(),
		entries: collected,
	})
}
