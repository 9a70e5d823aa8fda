use crate::e2e::bytes::Cursor;
use crate::e2e::header::EXPECTED_PADDING;
use crate::e2e::{E2eError, E2eHeader};

fn header_bytes(magic: &[u8; 12], padding: [u8; 20]) -> Vec<u8> {
	let mut out = magic.to_vec();
	out.extend_from_slice(&100_u32.to_le_bytes());
	out.extend_from_slice(&padding);
	out
}

#[test]
fn parses_octair_header() {
	let bytes = header_bytes(b"OCTAIR2.0.0\0", EXPECTED_PADDING);
	let mut cursor = Cursor::new(&bytes);
	let header = E2eHeader::parse(&mut cursor).expect("header parses");
	assert_eq!(header.magic, "OCTAIR2.0.0");
	assert_eq!(header.version, 100);
	assert!(header.padding_ok());
	assert_eq!(cursor.pos(), 36);
}

#[test]
fn parses_cmdb_header() {
	let bytes = header_bytes(b"CMDb\0\0\0\0\0\0\0\0", EXPECTED_PADDING);
	let header = E2eHeader::parse(&mut Cursor::new(&bytes)).expect("header parses");
	assert_eq!(header.magic, "CMDb");
}

#[test]
fn rejects_unknown_magic() {
	let bytes = header_bytes(b"BLENDER-v302", EXPECTED_PADDING);
	let err = E2eHeader::parse(&mut Cursor::new(&bytes)).expect_err("foreign magic fails");
	assert!(matches!(err, E2eError::BadMagic { ref magic } if magic == "BLENDER-v302"));
}

#[test]
fn flags_unexpected_padding() {
	let bytes = header_bytes(b"OCTAIR2.0.0\0", [0_u8; 20]);
	let header = E2eHeader::parse(&mut Cursor::new(&bytes)).expect("padding is not checked by parse");
	assert!(!header.padding_ok());
}

#[test]
fn short_header_is_truncated() {
	let err = E2eHeader::parse(&mut Cursor::new(b"OCTAIR2.0.0\0")).expect_err("12 bytes is too short");
	assert!(matches!(
		err,
		E2eError::TruncatedRecord {
			record: "header",
			at: 0,
			need: 36,
			rem: 12
		}
	));
}
