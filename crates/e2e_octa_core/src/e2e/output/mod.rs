use std::fs;
use std::path::{Path, PathBuf};

use image::ImageFormat;
use serde::Serialize;
use tracing::{info, warn};

use crate::e2e::{E2eFile, ExtractOptions, ExtractedImage, Result, extract};

/// Extension of written images.
pub const IMAGE_EXT: &str = "png";

/// Outcome of extracting one container into a directory.
#[derive(Debug, Clone, Default, Serialize)]
pub struct ExtractSummary {
	/// Files written, in decode order.
	pub written: Vec<PathBuf>,
	/// Entries skipped because of entry-level errors.
	pub skipped: usize,
	/// Whether extraction stopped on cancellation.
	pub cancelled: bool,
}

impl ExtractSummary {
	/// Number of images written.
	pub fn image_count(&self) -> usize {
		self.written.len()
	}
}

/// Write one image as PNG into `dir`, named from its label.
pub fn write_image(dir: &Path, image: &ExtractedImage) -> Result<PathBuf> {
	let path = dir.join(image.label.file_name(IMAGE_EXT));
	image.raster.to_rgb_image().save_with_format(&path, ImageFormat::Png)?;
	Ok(path)
}

/// Decode `input` and write every image into `output_dir`, creating it if absent.
///
/// File-level failures are returned; entry-level failures are logged and
/// counted in [`ExtractSummary::skipped`].
pub fn extract_file_to_dir(input: &Path, output_dir: &Path, options: &ExtractOptions) -> Result<ExtractSummary> {
	fs::create_dir_all(output_dir)?;

	let file = E2eFile::open(input)?;
	let mut session = extract(&file, options)?;
	let mut summary = ExtractSummary::default();

	for item in session.by_ref() {
		match item {
			Ok(image) => {
				let path = write_image(output_dir, &image)?;
				info!(path = %path.display(), "image saved");
				summary.written.push(path);
			}
			Err(err) => {
				warn!(file = %input.display(), error = %err, "entry skipped");
				summary.skipped += 1;
			}
		}
	}
	summary.cancelled = session.was_cancelled();

	Ok(summary)
}
