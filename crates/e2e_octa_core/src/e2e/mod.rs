mod batch;
mod bytes;
mod chain;
mod chunk;
mod directory;
mod error;
mod extract;
mod file;
mod header;
mod label;
mod laterality;
mod output;
/// Image payload reconstruction: pixel unpacking and column displacement.
pub mod raster;
mod record;

/// Folder batch driver types and entry points.
pub use batch::{
	BatchOptions, BatchReport, DEFAULT_EXTENSIONS, DEFAULT_MAX_JOBS, FileReport, Progress, collect_inputs, default_output_root, run_batch, worker_count,
};
/// Seekable byte cursor.
pub use bytes::Cursor;
/// Directory chain walk types and entry point.
pub use chain::{WalkOptions, WalkResult, walk_directory};
/// Chunk type registry.
pub use chunk::{AVC_TAG, Chunk, ChunkKind, DVC_TAG, DepthPlane, KNOWN_TAGS, LATERALITY_TAG, SVC_TAG, parse_tag};
/// Directory records and id sentinel helpers.
pub use directory::{ABSENT_ID, DirBlock, DirEntry, actual_id};
/// Error and result aliases.
pub use error::{E2eError, Result};
/// Extraction session types and entry points.
pub use extract::{CancelFlag, ExtractOptions, ExtractedImage, Extraction, Step, extract, step};
/// In-memory container and entry statistics.
pub use file::{E2eFile, EntryStats};
/// File header representation.
pub use header::{E2eHeader, KNOWN_MAGICS};
/// Output label rendering.
pub use label::{ABSENT_TOKEN, ImageLabel};
/// Laterality metadata record.
pub use laterality::{Laterality, LateralityRecord};
/// PNG output and the single-file extraction entry point.
pub use output::{ExtractSummary, IMAGE_EXT, extract_file_to_dir, write_image};
/// Fixed-layout record decoding.
pub use record::{FixedRecord, parse_record, read_record};
