use e2e_octa_testkit::{ContainerBuilder, DVC_TAG, FixtureEntry, LATERALITY_TAG, SVC_TAG, write_file};

use crate::e2e::{E2eError, E2eFile, WalkOptions};

fn sample() -> Vec<u8> {
	ContainerBuilder::new()
		.block(vec![FixtureEntry::laterality(b'R'), FixtureEntry::new(SVC_TAG, vec![1; 8])])
		.block(vec![FixtureEntry::new(SVC_TAG, vec![2; 8]), FixtureEntry::new(DVC_TAG, vec![3; 8])])
		.build()
		.bytes
}

#[test]
fn opens_raw_container_from_disk() {
	let dir = tempfile::tempdir().expect("tempdir");
	let path = write_file(dir.path(), "scan.E2E", &sample());

	let file = E2eFile::open(&path).expect("file opens");
	assert_eq!(file.header.magic, "OCTAIR2.0.0");

	let stats = file.scan_entry_stats(&WalkOptions::default()).expect("stats scan");
	assert_eq!(stats.blocks_visited, 2);
	assert_eq!(stats.entry_count, 4);
	assert_eq!(stats.by_tag.get(&SVC_TAG), Some(&2));
	assert_eq!(stats.by_tag.get(&LATERALITY_TAG), Some(&1));
}

#[test]
fn in_memory_bytes_are_kept_verbatim() {
	let raw = sample();
	let file = E2eFile::from_bytes(raw.clone()).expect("container opens");
	assert_eq!(file.bytes(), raw.as_slice());
}

#[test]
fn compressed_frames_are_not_containers() {
	let mut bytes = vec![0x28, 0xB5, 0x2F, 0xFD];
	bytes.extend_from_slice(&sample());
	assert!(matches!(E2eFile::from_bytes(bytes), Err(E2eError::BadMagic { .. })));
}

#[test]
fn foreign_bytes_fail_on_magic() {
	let mut bytes = b"PNG-NOT-E2E!".to_vec();
	bytes.resize(64, 0);
	assert!(matches!(E2eFile::from_bytes(bytes), Err(E2eError::BadMagic { .. })));
}

#[test]
fn missing_file_is_io_error() {
	let dir = tempfile::tempdir().expect("tempdir");
	assert!(matches!(E2eFile::open(dir.path().join("absent.E2E")), Err(E2eError::Io(_))));
}

#[test]
fn payload_slices_entry_range_and_rejects_overruns() {
	let file = E2eFile::from_bytes(sample()).expect("opens");
	let walk = file.walk(&WalkOptions::default()).expect("walks");
	assert_eq!(file.payload(&walk.entries[3]).expect("payload in range"), &[3; 8]);

	let mut broken = walk.entries[3].clone();
	broken.size = u32::MAX;
	assert!(matches!(file.payload(&broken), Err(E2eError::PayloadOutOfRange { tag, .. }) if tag == DVC_TAG));
}
