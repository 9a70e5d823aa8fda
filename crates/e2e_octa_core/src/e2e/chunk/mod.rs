use std::fmt;

use serde::Serialize;

use crate::e2e::raster::{Raster, decode_image};
use crate::e2e::{LateralityRecord, Result};

/// Series metadata chunk carrying laterality.
pub const LATERALITY_TAG: u32 = 0x3b;
/// Superficial vascular complex image.
pub const SVC_TAG: u32 = 0x2760;
/// Deep vascular complex image.
pub const DVC_TAG: u32 = 0x2761;
/// Avascular complex image.
pub const AVC_TAG: u32 = 0x2762;

/// Every tag with a known decoder, in display order.
pub const KNOWN_TAGS: [u32; 4] = [LATERALITY_TAG, SVC_TAG, DVC_TAG, AVC_TAG];

/// Vascular layer an OCTA image represents.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum DepthPlane {
	/// Superficial vascular complex.
	#[serde(rename = "SVC")]
	Svc,
	/// Deep vascular complex.
	#[serde(rename = "DVC")]
	Dvc,
	/// Avascular complex.
	#[serde(rename = "AVC")]
	Avc,
}

impl DepthPlane {
	/// Short plane label used in output names.
	pub fn as_str(self) -> &'static str {
		match self {
			Self::Svc => "SVC",
			Self::Dvc => "DVC",
			Self::Avc => "AVC",
		}
	}
}

impl fmt::Display for DepthPlane {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(self.as_str())
	}
}

/// Chunk kinds resolved from a directory entry type tag.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ChunkKind {
	/// Series metadata with the laterality code.
	Laterality,
	/// OCTA en-face image of one depth plane.
	OctaImage(DepthPlane),
	/// Any tag without a decoder.
	Unknown(u32),
}

/// Decoded chunk payload.
#[derive(Debug, Clone)]
pub enum Chunk {
	/// Laterality metadata.
	Laterality(LateralityRecord),
	/// Corrected raster.
	Image(Raster),
	/// Undecoded payload of an unknown kind.
	Opaque {
		/// Payload length in bytes.
		len: usize,
	},
}

impl ChunkKind {
	/// Resolve a tag; unknown tags never fail.
	pub fn from_tag(tag: u32) -> Self {
		match tag {
			LATERALITY_TAG => Self::Laterality,
			SVC_TAG => Self::OctaImage(DepthPlane::Svc),
			DVC_TAG => Self::OctaImage(DepthPlane::Dvc),
			AVC_TAG => Self::OctaImage(DepthPlane::Avc),
			other => Self::Unknown(other),
		}
	}

	/// Numeric type tag.
	pub fn tag(self) -> u32 {
		match self {
			Self::Laterality => LATERALITY_TAG,
			Self::OctaImage(DepthPlane::Svc) => SVC_TAG,
			Self::OctaImage(DepthPlane::Dvc) => DVC_TAG,
			Self::OctaImage(DepthPlane::Avc) => AVC_TAG,
			Self::Unknown(tag) => tag,
		}
	}

	/// Human-readable description for listings and diagnostics.
	pub fn description(self) -> String {
		match self {
			Self::Laterality => "series data L/R".to_owned(),
			Self::OctaImage(_) => "OCTA image".to_owned(),
			Self::Unknown(tag) => format!("unknown(0x{tag:x})"),
		}
	}

	/// Stable key name for decoded values, when the kind has one.
	pub fn key(self) -> Option<&'static str> {
		match self {
			Self::OctaImage(_) => Some("octa image"),
			Self::Laterality | Self::Unknown(_) => None,
		}
	}

	/// Depth plane of image kinds.
	pub fn depth(self) -> Option<DepthPlane> {
		match self {
			Self::OctaImage(plane) => Some(plane),
			Self::Laterality | Self::Unknown(_) => None,
		}
	}

	/// Whether a decoder exists for this kind.
	pub fn is_known(self) -> bool {
		!matches!(self, Self::Unknown(_))
	}

	/// Decode a payload with this kind's contract.
	pub fn decode(self, payload: &[u8]) -> Result<Chunk> {
		match self {
			Self::Laterality => LateralityRecord::parse(self.tag(), payload).map(Chunk::Laterality),
			Self::OctaImage(_) => decode_image(self.tag(), payload).map(Chunk::Image),
			Self::Unknown(_) => Ok(Chunk::Opaque { len: payload.len() }),
		}
	}
}

/// Parse a `0x`-prefixed hex or decimal tag literal.
pub fn parse_tag(value: &str) -> Option<u32> {
	match value.strip_prefix("0x").or_else(|| value.strip_prefix("0X")) {
		Some(hex) => u32::from_str_radix(hex, 16).ok(),
		None => value.parse().ok(),
	}
}
