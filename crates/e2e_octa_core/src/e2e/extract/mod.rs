use std::collections::BTreeSet;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use tracing::debug;

use crate::e2e::chunk::{KNOWN_TAGS, LATERALITY_TAG};
use crate::e2e::raster::Raster;
use crate::e2e::{Chunk, ChunkKind, DirEntry, E2eError, E2eFile, ImageLabel, Laterality, Result, WalkOptions};

/// Shared cancellation signal polled at entry and file boundaries.
#[derive(Debug, Clone, Default)]
pub struct CancelFlag(Arc<AtomicBool>);

impl CancelFlag {
	/// Fresh, unraised flag.
	pub fn new() -> Self {
		Self::default()
	}

	/// Request cancellation.
	pub fn cancel(&self) {
		self.0.store(true, Ordering::Relaxed);
	}

	/// Whether cancellation was requested.
	pub fn is_cancelled(&self) -> bool {
		self.0.load(Ordering::Relaxed)
	}
}

/// Extraction options.
#[derive(Debug, Clone)]
pub struct ExtractOptions {
	/// Directory walk options.
	pub walk: WalkOptions,
	/// Type tags to decode; every other entry is skipped undecoded.
	///
	/// Images are labeled with the laterality decoded before them, so
	/// [`ExtractOptions::with_tags`] always keeps the laterality tag.
	pub wanted: BTreeSet<u32>,
	/// Cancellation signal.
	pub cancel: CancelFlag,
}

impl Default for ExtractOptions {
	fn default() -> Self {
		Self {
			walk: WalkOptions::default(),
			wanted: KNOWN_TAGS.into_iter().collect(),
			cancel: CancelFlag::new(),
		}
	}
}

impl ExtractOptions {
	/// Default options restricted to `tags` plus the laterality tag.
	pub fn with_tags(tags: impl IntoIterator<Item = u32>) -> Self {
		Self {
			wanted: tags.into_iter().chain([LATERALITY_TAG]).collect(),
			..Self::default()
		}
	}
}

/// One labeled image ready for output.
#[derive(Debug, Clone)]
pub struct ExtractedImage {
	/// Output identity.
	pub label: ImageLabel,
	/// Corrected raster.
	pub raster: Raster,
	/// Entry the image came from.
	pub entry: DirEntry,
}

/// Result of processing one entry.
#[derive(Debug)]
pub enum Step {
	/// Laterality metadata updated the session state.
	Laterality(Laterality),
	/// Image decoded and labeled.
	Image(Box<ExtractedImage>),
	/// Unknown kind; payload left undecoded.
	Opaque {
		/// Payload length in bytes.
		len: usize,
	},
	/// Entry-level failure; the session continues.
	Failed(E2eError),
}

/// Process one entry given the laterality in effect, returning the new laterality.
pub fn step(file: &E2eFile, laterality: Option<Laterality>, entry: &DirEntry) -> (Option<Laterality>, Step) {
	let kind = ChunkKind::from_tag(entry.tag);
	let chunk = match file.payload(entry).and_then(|payload| kind.decode(payload)) {
		Ok(chunk) => chunk,
		Err(err) => return (laterality, Step::Failed(err)),
	};

	match chunk {
		Chunk::Laterality(record) => {
			let next = record.laterality();
			(Some(next), Step::Laterality(next))
		}
		Chunk::Image(raster) => {
			let (Some(depth), Some(current)) = (kind.depth(), laterality) else {
				return (laterality, Step::Failed(E2eError::MalformedOrder { tag: entry.tag }));
			};
			let image = ExtractedImage {
				label: ImageLabel::for_entry(entry, depth, current),
				raster,
				entry: entry.clone(),
			};
			(laterality, Step::Image(Box::new(image)))
		}
		Chunk::Opaque { len } => (laterality, Step::Opaque { len }),
	}
}

/// Walk `file` and start an extraction session over its entries.
///
/// File-level failures (magic, truncation, chain cycles) surface here; the
/// returned iterator only yields entry-level errors.
pub fn extract<'a>(file: &'a E2eFile, options: &ExtractOptions) -> Result<Extraction<'a>> {
	let walk = file.walk(&options.walk)?;
	Ok(Extraction::new(file, walk.entries, options))
}

/// Sequential extraction session yielding labeled images in chain order.
pub struct Extraction<'a> {
	file: &'a E2eFile,
	entries: std::vec::IntoIter<DirEntry>,
	wanted: BTreeSet<u32>,
	cancel: CancelFlag,
	laterality: Option<Laterality>,
	cancelled: bool,
}

impl<'a> Extraction<'a> {
	/// Session over already-walked entries.
	pub fn new(file: &'a E2eFile, entries: Vec<DirEntry>, options: &ExtractOptions) -> Self {
		Self {
			file,
			entries: entries.into_iter(),
			wanted: options.wanted.clone(),
			cancel: options.cancel.clone(),
			laterality: None,
			cancelled: false,
		}
	}

	/// Laterality currently in effect.
	pub fn laterality(&self) -> Option<Laterality> {
		self.laterality
	}

	/// Whether iteration stopped because of cancellation.
	pub fn was_cancelled(&self) -> bool {
		self.cancelled
	}
}

impl Iterator for Extraction<'_> {
	type Item = Result<ExtractedImage>;

	fn next(&mut self) -> Option<Self::Item> {
		loop {
			if self.cancelled {
				return None;
			}
			if self.cancel.is_cancelled() {
				debug!("extraction cancelled");
				self.cancelled = true;
				return None;
			}

			let entry = self.entries.next()?;
			if !self.wanted.contains(&entry.tag) {
				continue;
			}

			let (laterality, outcome) = step(self.file, self.laterality, &entry);
			self.laterality = laterality;

			match outcome {
				Step::Laterality(value) => debug!(laterality = %value, "laterality entry"),
				Step::Opaque { len } => debug!(len, "no decoder for type 0x{:x}", entry.tag),
				Step::Image(image) => return Some(Ok(*image)),
				Step::Failed(err) => return Some(Err(err)),
			}
		}
	}
}

#[cfg(test)]
mod tests;
