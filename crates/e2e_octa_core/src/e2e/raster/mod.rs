use image::{Rgb, RgbImage};

use crate::e2e::{E2eError, Result};

/// Raster side length in pixels.
pub const SIDE: usize = 512;
/// Image channels kept per pixel.
pub const CHANNELS: usize = 3;
/// Bytes per stored pixel cell (three channels plus one padding byte).
pub const STRIDE: usize = 4;
/// Exact payload length of an image chunk.
pub const PAYLOAD_LEN: usize = SIDE * SIDE * STRIDE;
/// Column offset of the sensor read-out, undone by a left rotation.
pub const DISPLACEMENT: usize = 15;

/// Decoded 8-bit raster with channels in stored (B, G, R) order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Raster {
	/// Width in pixels.
	pub width: usize,
	/// Height in pixels.
	pub height: usize,
	/// Row-major pixel bytes, `CHANNELS` per pixel.
	pub data: Vec<u8>,
}

impl Raster {
	/// Channel bytes of one pixel.
	pub fn pixel(&self, row: usize, col: usize) -> &[u8] {
		let at = (row * self.width + col) * CHANNELS;
		&self.data[at..at + CHANNELS]
	}

	/// Convert to an RGB buffer for encoding, swapping stored BGR order.
	pub fn to_rgb_image(&self) -> RgbImage {
		RgbImage::from_fn(self.width as u32, self.height as u32, |x, y| {
			let px = self.pixel(y as usize, x as usize);
			Rgb([px[2], px[1], px[0]])
		})
	}
}

/// Reconstruct a corrected 512x512 image from an image chunk payload.
pub fn decode_image(tag: u32, payload: &[u8]) -> Result<Raster> {
	if payload.len() != PAYLOAD_LEN {
		return Err(E2eError::MalformedPayload {
			tag,
			expected: PAYLOAD_LEN,
			actual: payload.len(),
		});
	}

	let mut data = unpack_pixels(payload, STRIDE, CHANNELS);
	rotate_columns(&mut data, SIDE, CHANNELS, DISPLACEMENT);

	Ok(Raster {
		width: SIDE,
		height: SIDE,
		data,
	})
}

/// Keep the first `channels` bytes of every `stride`-byte cell.
pub fn unpack_pixels(payload: &[u8], stride: usize, channels: usize) -> Vec<u8> {
	let mut out = Vec::with_capacity(payload.len() / stride * channels);
	for cell in payload.chunks_exact(stride) {
		out.extend_from_slice(&cell[..channels]);
	}
	out
}

/// Circularly rotate every row left by `shift` columns.
///
/// Column `shift` becomes column 0 and the first `shift` columns wrap to the
/// right edge. Rotating by `shift` then `width - shift` is the identity.
pub fn rotate_columns(data: &mut [u8], width: usize, channels: usize, shift: usize) {
	let row_len = width * channels;
	if row_len == 0 {
		return;
	}

	let by = (shift % width) * channels;
	for row in data.chunks_exact_mut(row_len) {
		row.rotate_left(by);
	}
}

#[cfg(test)]
mod tests;
