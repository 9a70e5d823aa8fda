use serde::Serialize;

use crate::e2e::Result;
use crate::e2e::bytes::Cursor;
use crate::e2e::record::FixedRecord;

/// Id value meaning "absent / not applicable".
pub const ABSENT_ID: u32 = u32::MAX;

/// Map the all-ones sentinel to `None`.
pub fn actual_id(raw: u32) -> Option<u32> {
	if raw == ABSENT_ID { None } else { Some(raw) }
}

/// Directory block header; entries follow it immediately on disk.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DirBlock {
	/// Block magic, trailing NUL padding removed.
	pub magic: String,
	/// Block format version.
	pub version: u32,
	/// Reserved padding.
	#[serde(skip)]
	pub padding: [u8; 20],
	/// Number of entry records following this header.
	pub num_entries: u32,
	/// Offset of the most recent block.
	pub last: u32,
	/// Offset of the previous (older) block; `0` ends the chain.
	pub prev: u32,
	/// Block id.
	pub id: u32,
}

impl FixedRecord for DirBlock {
	const NAME: &'static str = "directory block";
	const SIZE: usize = 52;

	fn decode(cursor: &mut Cursor<'_>) -> Result<Self> {
		Ok(Self {
			magic: cursor.read_padded_str(12)?,
			version: cursor.read_u32_le()?,
			padding: cursor.read_array()?,
			num_entries: cursor.read_u32_le()?,
			last: cursor.read_u32_le()?,
			prev: cursor.read_u32_le()?,
			id: cursor.read_u32_le()?,
		})
	}
}

/// One 44-byte directory entry describing a payload chunk.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DirEntry {
	/// Offset within the block region.
	pub position: u32,
	/// Absolute file offset of the payload.
	pub start: u32,
	/// Payload length in bytes.
	pub size: u32,
	/// Raw patient id (`ABSENT_ID` when absent).
	pub patient_id: u32,
	/// Raw study id.
	pub study_id: u32,
	/// Raw series id.
	pub series_id: u32,
	/// Raw slice id.
	pub slice_id: u32,
	/// Indicator flags.
	pub indicator: u16,
	/// Chunk type tag.
	pub tag: u32,
	/// Trailing raw id bytes.
	pub raw_id: [u8; 4],
}

impl FixedRecord for DirEntry {
	const NAME: &'static str = "directory entry";
	const SIZE: usize = 44;

	fn decode(cursor: &mut Cursor<'_>) -> Result<Self> {
		let position = cursor.read_u32_le()?;
		let start = cursor.read_u32_le()?;
		let size = cursor.read_u32_le()?;
		let _reserved: [u8; 4] = cursor.read_array()?;
		let patient_id = cursor.read_u32_le()?;
		let study_id = cursor.read_u32_le()?;
		let series_id = cursor.read_u32_le()?;
		let slice_id = cursor.read_u32_le()?;
		let indicator = cursor.read_u16_le()?;
		let _unknown = cursor.read_u16_le()?;
		let tag = cursor.read_u32_le()?;
		let raw_id = cursor.read_array()?;

		Ok(Self {
			position,
			start,
			size,
			patient_id,
			study_id,
			series_id,
			slice_id,
			indicator,
			tag,
			raw_id,
		})
	}
}

impl DirEntry {
	/// Entries with a zero type tag are unused slots.
	pub fn is_valid(&self) -> bool {
		self.tag > 0
	}

	/// Patient id, `None` for the sentinel.
	pub fn patient(&self) -> Option<u32> {
		actual_id(self.patient_id)
	}

	/// Study id, `None` for the sentinel.
	pub fn study(&self) -> Option<u32> {
		actual_id(self.study_id)
	}

	/// Series id, `None` for the sentinel.
	pub fn series(&self) -> Option<u32> {
		actual_id(self.series_id)
	}

	/// Slice id, `None` for the sentinel.
	pub fn slice(&self) -> Option<u32> {
		actual_id(self.slice_id)
	}
}
