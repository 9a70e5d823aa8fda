use std::fmt;

use serde::Serialize;

use crate::e2e::bytes::Cursor;
use crate::e2e::record::{FixedRecord, parse_record};
use crate::e2e::{E2eError, Result};

/// Eye designation attached to subsequent images.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Laterality {
	/// Right eye (oculus dexter).
	#[serde(rename = "OD")]
	Od,
	/// Left eye (oculus sinister).
	#[serde(rename = "OS")]
	Os,
}

impl Laterality {
	/// Map the stored code; only `'R'` is right.
	pub fn from_code(code: u8) -> Self {
		if code == b'R' { Self::Od } else { Self::Os }
	}

	/// Clinical label (`OD` / `OS`).
	pub fn as_str(self) -> &'static str {
		match self {
			Self::Od => "OD",
			Self::Os => "OS",
		}
	}
}

impl fmt::Display for Laterality {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(self.as_str())
	}
}

/// Series metadata chunk carrying the laterality code.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LateralityRecord {
	/// Opaque value preceding the code.
	pub unknown1: u16,
	/// Raw laterality code byte.
	pub code: u8,
	/// Opaque trailing values.
	pub unknown2: [u8; 12],
}

impl FixedRecord for LateralityRecord {
	const NAME: &'static str = "laterality record";
	const SIZE: usize = 27;

	fn decode(cursor: &mut Cursor<'_>) -> Result<Self> {
		let _reserved: [u8; 12] = cursor.read_array()?;
		Ok(Self {
			unknown1: cursor.read_u16_le()?,
			code: cursor.read_u8()?,
			unknown2: cursor.read_array()?,
		})
	}
}

impl LateralityRecord {
	/// Decode the metadata payload; trailing bytes past the record are ignored.
	pub fn parse(tag: u32, payload: &[u8]) -> Result<Self> {
		if payload.len() < Self::SIZE {
			return Err(E2eError::MalformedPayload {
				tag,
				expected: Self::SIZE,
				actual: payload.len(),
			});
		}
		parse_record(payload)
	}

	/// Eye designation encoded by this record.
	pub fn laterality(&self) -> Laterality {
		Laterality::from_code(self.code)
	}
}
