use serde::Serialize;

use crate::e2e::bytes::Cursor;
use crate::e2e::record::{FixedRecord, read_record};
use crate::e2e::{E2eError, Result};

/// Container magics accepted at file start.
pub const KNOWN_MAGICS: &[&str] = &["OCTAIR2.0.0", "CMDb"];

/// Expected reserved padding: eighteen `0xFF` bytes, then two zeros.
pub const EXPECTED_PADDING: [u8; 20] = {
	let mut pad = [0xFF_u8; 20];
	pad[18] = 0;
	pad[19] = 0;
	pad
};

/// Parsed 36-byte container header.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct E2eHeader {
	/// Magic string, trailing NUL padding removed.
	pub magic: String,
	/// Format version.
	pub version: u32,
	/// Reserved padding bytes.
	#[serde(skip)]
	pub padding: [u8; 20],
}

impl FixedRecord for E2eHeader {
	const NAME: &'static str = "header";
	const SIZE: usize = 36;

	fn decode(cursor: &mut Cursor<'_>) -> Result<Self> {
		Ok(Self {
			magic: cursor.read_padded_str(12)?,
			version: cursor.read_u32_le()?,
			padding: cursor.read_array()?,
		})
	}
}

impl E2eHeader {
	/// Offset of the padding field inside the header.
	pub const PADDING_OFFSET: usize = 16;

	/// Read and validate the header at the cursor.
	pub fn parse(cursor: &mut Cursor<'_>) -> Result<Self> {
		let header: Self = read_record(cursor)?;
		if !KNOWN_MAGICS.contains(&header.magic.as_str()) {
			return Err(E2eError::BadMagic { magic: header.magic });
		}
		Ok(header)
	}

	/// Whether the reserved padding matches the expected pattern.
	pub fn padding_ok(&self) -> bool {
		self.padding == EXPECTED_PADDING
	}
}

#[cfg(test)]
mod tests;
