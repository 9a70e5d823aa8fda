use std::fmt;

use serde::Serialize;

use crate::e2e::{DepthPlane, DirEntry, Laterality};

/// Token written in place of an absent id.
pub const ABSENT_TOKEN: &str = "None";

/// Identity of one extracted image.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ImageLabel {
	/// Patient id, `None` for the sentinel.
	pub patient_id: Option<u32>,
	/// Study id, `None` for the sentinel.
	pub study_id: Option<u32>,
	/// Series id, `None` for the sentinel.
	pub series_id: Option<u32>,
	/// Depth plane of the image.
	pub depth: DepthPlane,
	/// Laterality in effect when the image was decoded.
	pub laterality: Laterality,
}

impl ImageLabel {
	/// Build a label from an entry's ids.
	pub fn for_entry(entry: &DirEntry, depth: DepthPlane, laterality: Laterality) -> Self {
		Self {
			patient_id: entry.patient(),
			study_id: entry.study(),
			series_id: entry.series(),
			depth,
			laterality,
		}
	}

	/// `{patient}_{study}_{series}_{depth}_{laterality}` without extension.
	pub fn file_stem(&self) -> String {
		self.to_string()
	}

	/// Output file name with the given extension.
	pub fn file_name(&self, ext: &str) -> String {
		format!("{self}.{ext}")
	}
}

impl fmt::Display for ImageLabel {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		write!(
			f,
			"{}_{}_{}_{}_{}",
			IdDisplay(self.patient_id),
			IdDisplay(self.study_id),
			IdDisplay(self.series_id),
			self.depth,
			self.laterality
		)
	}
}

struct IdDisplay(Option<u32>);

impl fmt::Display for IdDisplay {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		match self.0 {
			Some(id) => write!(f, "{id}"),
			None => f.write_str(ABSENT_TOKEN),
		}
	}
}

#[cfg(test)]
mod tests {
	use crate::e2e::{DepthPlane, ImageLabel, Laterality};

	#[test]
	fn renders_ids_plane_and_eye() {
		let label = ImageLabel {
			patient_id: Some(12),
			study_id: Some(34),
			series_id: Some(56),
			depth: DepthPlane::Dvc,
			laterality: Laterality::Os,
		};
		assert_eq!(label.file_name("png"), "12_34_56_DVC_OS.png");
	}

	#[test]
	fn absent_ids_render_as_token() {
		let label = ImageLabel {
			patient_id: None,
			study_id: Some(4_294_967_294),
			series_id: None,
			depth: DepthPlane::Svc,
			laterality: Laterality::Od,
		};
		let stem = label.file_stem();
		assert_eq!(stem, "None_4294967294_None_SVC_OD");
		assert!(!stem.contains("4294967295"));
	}
}
