use thiserror::Error;

/// Crate-local result type.
pub type Result<T> = std::result::Result<T, E2eError>;

/// Errors produced while reading, walking, and decoding `.E2E` containers.
#[derive(Debug, Error)]
pub enum E2eError {
	/// Filesystem or stream IO failure.
	#[error("io: {0}")]
	Io(#[from] std::io::Error),
	/// PNG encoding or image write failure.
	#[error("image write: {0}")]
	ImageWrite(#[from] image::ImageError),
	/// Batch worker pool could not be created.
	#[error("worker pool: {0}")]
	ThreadPool(#[from] rayon::ThreadPoolBuildError),
	/// Header magic is not one of the known container magics.
	#[error("bad container magic {magic:?}")]
	BadMagic {
		/// Magic string as read, trailing NULs removed.
		magic: String,
	},
	/// Reserved header padding did not match the expected pattern.
	#[error("bad header padding at offset {at}")]
	BadPadding {
		/// File offset of the padding field.
		at: usize,
	},
	/// A fixed-layout record could not be fully read.
	#[error("truncated {record} at offset {at}, need {need} bytes, remaining {rem}")]
	TruncatedRecord {
		/// Record kind being decoded.
		record: &'static str,
		/// Byte offset where the read was attempted.
		at: usize,
		/// Requested bytes.
		need: usize,
		/// Bytes still available.
		rem: usize,
	},
	/// Directory chain revisited a block offset.
	#[error("directory chain cycle at offset 0x{at:08x}")]
	ChainCycle {
		/// Block offset seen twice.
		at: u32,
	},
	/// Directory chain exceeded the configured block budget.
	#[error("directory chain exceeded {max_blocks} blocks")]
	ChainTooLong {
		/// Maximum number of blocks allowed.
		max_blocks: usize,
	},
	/// Entry payload size does not match what its chunk decoder expects.
	#[error("malformed payload for type 0x{tag:x}: expected {expected} bytes, got {actual}")]
	MalformedPayload {
		/// Chunk type tag.
		tag: u32,
		/// Expected payload length (minimum for variable-length records).
		expected: usize,
		/// Actual payload length.
		actual: usize,
	},
	/// Entry payload range lies outside the file.
	#[error("payload for type 0x{tag:x} at {start}+{size} exceeds file length {len}")]
	PayloadOutOfRange {
		/// Chunk type tag.
		tag: u32,
		/// Absolute payload offset.
		start: u32,
		/// Declared payload length.
		size: u32,
		/// Total file length.
		len: usize,
	},
	/// Image entry appeared before any laterality entry.
	#[error("image type 0x{tag:x} decoded before any laterality entry")]
	MalformedOrder {
		/// Image chunk type tag.
		tag: u32,
	},
	/// CLI type tag argument was invalid.
	#[error("invalid type tag: {value}")]
	InvalidTypeTag {
		/// User-provided tag literal.
		value: String,
	},
}

impl E2eError {
	/// Whether the error only affects a single entry and decoding may continue.
	pub fn is_entry_level(&self) -> bool {
		matches!(
			self,
			Self::MalformedPayload { .. } | Self::PayloadOutOfRange { .. } | Self::MalformedOrder { .. }
		)
	}
}
