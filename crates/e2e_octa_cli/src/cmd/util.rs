use e2e_octa::e2e::{E2eError, KNOWN_TAGS, Result, WalkOptions, parse_tag};
use serde::Serialize;

/// Directory walk flags shared by commands that read a container.
#[derive(clap::Args)]
pub struct WalkArgs {
	/// Reject headers whose reserved padding is not the expected pattern.
	#[arg(long)]
	pub strict_padding: bool,
	/// Maximum directory blocks visited before the chain is rejected.
	#[arg(long)]
	pub max_blocks: Option<usize>,
}

impl WalkArgs {
	pub(crate) fn options(&self) -> WalkOptions {
		let defaults = WalkOptions::default();
		WalkOptions {
			max_blocks: self.max_blocks.unwrap_or(defaults.max_blocks),
			strict_padding: self.strict_padding,
		}
	}
}

/// Parse `--type` literals, falling back to every known tag.
pub(crate) fn parse_type_filter(values: &[String]) -> Result<Vec<u32>> {
	if values.is_empty() {
		return Ok(KNOWN_TAGS.to_vec());
	}

	values
		.iter()
		.map(|value| parse_tag(value).ok_or_else(|| E2eError::InvalidTypeTag { value: value.clone() }))
		.collect()
}

/// Render a type tag the way listings show it.
pub(crate) fn tag_hex(tag: u32) -> String {
	format!("0x{tag:x}")
}

/// Render an optional id, `-` when absent.
pub(crate) fn id_label(id: Option<u32>) -> String {
	id.map_or_else(|| "-".to_owned(), |value| value.to_string())
}

/// Print a serializable payload as pretty JSON on stdout.
pub(crate) fn emit_json<T: Serialize>(payload: &T) {
	match serde_json::to_string_pretty(payload) {
		Ok(text) => println!("{text}"),
		Err(err) => eprintln!("error: json encode: {err}"),
	}
}
