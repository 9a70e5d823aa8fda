use e2e_octa_testkit::{AVC_TAG, ContainerBuilder, DVC_TAG, FixtureEntry, LATERALITY_TAG, SVC_TAG, image_payload};

use super::{ExtractOptions, Step, extract, step};
use crate::e2e::{DepthPlane, E2eError, E2eFile, Laterality, WalkOptions};

fn open(builder: ContainerBuilder) -> E2eFile {
	E2eFile::from_bytes(builder.build().bytes).expect("container opens")
}

#[test]
fn metadata_then_image_yields_one_labeled_image() {
	let file = open(ContainerBuilder::new().block(vec![FixtureEntry::laterality(b'R'), FixtureEntry::image(SVC_TAG, 7)]));

	let images: Vec<_> = extract(&file, &ExtractOptions::default())
		.expect("walk succeeds")
		.collect::<Result<_, _>>()
		.expect("no entry errors");

	assert_eq!(images.len(), 1);
	let label = &images[0].label;
	assert_eq!(label.laterality, Laterality::Od);
	assert_eq!(label.depth, DepthPlane::Svc);
	assert_eq!(label.file_name("png"), "1_2_3_SVC_OD.png");
}

#[test]
fn one_metadata_entry_labels_every_following_image() {
	let file = open(ContainerBuilder::new().block(vec![
		FixtureEntry::laterality(b'L'),
		FixtureEntry::image(SVC_TAG, 1),
		FixtureEntry::image(AVC_TAG, 2),
	]));

	let labels: Vec<_> = extract(&file, &ExtractOptions::default())
		.expect("walk succeeds")
		.map(|item| item.expect("image decodes").label)
		.collect();

	assert_eq!(labels.len(), 2);
	assert!(labels.iter().all(|label| label.laterality == Laterality::Os));
	assert_eq!(labels[0].depth, DepthPlane::Svc);
	assert_eq!(labels[1].depth, DepthPlane::Avc);
}

#[test]
fn laterality_follows_decode_order_across_blocks() {
	let file = open(
		ContainerBuilder::new()
			.block(vec![FixtureEntry::laterality(b'R'), FixtureEntry::image(SVC_TAG, 1)])
			.block(vec![FixtureEntry::image(DVC_TAG, 2), FixtureEntry::laterality(b'L'), FixtureEntry::image(SVC_TAG, 3)]),
	);

	let eyes: Vec<_> = extract(&file, &ExtractOptions::default())
		.expect("walk succeeds")
		.map(|item| {
			let image = item.expect("image decodes");
			(image.label.depth, image.label.laterality)
		})
		.collect();

	assert_eq!(
		eyes,
		vec![
			(DepthPlane::Svc, Laterality::Od),
			(DepthPlane::Dvc, Laterality::Od),
			(DepthPlane::Svc, Laterality::Os),
		]
	);
}

#[test]
fn malformed_image_is_skipped_while_sibling_is_emitted() {
	let file = open(ContainerBuilder::new().block(vec![
		FixtureEntry::laterality(b'R'),
		FixtureEntry::new(SVC_TAG, vec![0; 1024]),
		FixtureEntry::image(DVC_TAG, 9),
	]));

	let items: Vec<_> = extract(&file, &ExtractOptions::default()).expect("walk succeeds").collect();
	assert_eq!(items.len(), 2);
	assert!(matches!(items[0], Err(E2eError::MalformedPayload { tag: SVC_TAG, actual: 1024, .. })));
	let image = items[1].as_ref().expect("sibling decodes");
	assert_eq!(image.label.depth, DepthPlane::Dvc);
}

#[test]
fn image_before_any_laterality_is_an_order_error() {
	let file = open(ContainerBuilder::new().block(vec![
		FixtureEntry::image(SVC_TAG, 1),
		FixtureEntry::laterality(b'R'),
		FixtureEntry::image(SVC_TAG, 2),
	]));

	let items: Vec<_> = extract(&file, &ExtractOptions::default()).expect("walk succeeds").collect();
	assert_eq!(items.len(), 2);
	assert!(matches!(items[0], Err(E2eError::MalformedOrder { tag: SVC_TAG })));
	assert!(items[0].as_ref().err().is_some_and(E2eError::is_entry_level));
	assert_eq!(items[1].as_ref().expect("second image decodes").label.laterality, Laterality::Od);
}

#[test]
fn unwanted_entries_are_never_decoded() {
	let file = open(ContainerBuilder::new().block(vec![
		FixtureEntry::laterality(b'R'),
		FixtureEntry::new(SVC_TAG, vec![0; 3]),
		FixtureEntry::image(DVC_TAG, 4),
	]));

	let options = ExtractOptions::with_tags([LATERALITY_TAG, DVC_TAG]);
	let items: Vec<_> = extract(&file, &options).expect("walk succeeds").collect();
	assert_eq!(items.len(), 1, "malformed SVC entry must be filtered before decode");
	assert_eq!(items[0].as_ref().expect("DVC decodes").label.depth, DepthPlane::Dvc);
}

#[test]
fn image_only_filter_still_tracks_laterality() {
	let file = open(ContainerBuilder::new().block(vec![
		FixtureEntry::laterality(b'R'),
		FixtureEntry::image(SVC_TAG, 1),
		FixtureEntry::image(DVC_TAG, 2),
	]));

	let options = ExtractOptions::with_tags([SVC_TAG]);
	assert!(options.wanted.contains(&LATERALITY_TAG));

	let images: Vec<_> = extract(&file, &options)
		.expect("walk succeeds")
		.collect::<Result<_, _>>()
		.expect("no entry errors");
	assert_eq!(images.len(), 1);
	assert_eq!(images[0].label.file_name("png"), "1_2_3_SVC_OD.png");
}

#[test]
fn unknown_wanted_tag_produces_nothing() {
	let file = open(ContainerBuilder::new().block(vec![FixtureEntry::laterality(b'R'), FixtureEntry::new(0x1234, vec![1, 2, 3])]));

	let options = ExtractOptions::with_tags([LATERALITY_TAG, 0x1234]);
	assert_eq!(extract(&file, &options).expect("walk succeeds").count(), 0);
}

#[test]
fn sentinel_ids_never_reach_labels() {
	let file = open(ContainerBuilder::new().block(vec![
		FixtureEntry::laterality(b'R'),
		FixtureEntry::new(SVC_TAG, image_payload(0)).with_ids(u32::MAX, 77, u32::MAX),
	]));

	let image = extract(&file, &ExtractOptions::default())
		.expect("walk succeeds")
		.next()
		.expect("one item")
		.expect("image decodes");
	assert_eq!(image.label.patient_id, None);
	assert_eq!(image.label.file_stem(), "None_77_None_SVC_OD");
	assert!(!image.label.file_stem().contains(&u32::MAX.to_string()));
}

#[test]
fn cancellation_before_start_yields_nothing() {
	let file = open(ContainerBuilder::new().block(vec![FixtureEntry::laterality(b'R'), FixtureEntry::image(SVC_TAG, 1)]));
	let options = ExtractOptions::default();
	options.cancel.cancel();

	let mut session = extract(&file, &options).expect("walk succeeds");
	assert!(session.next().is_none());
	assert!(session.was_cancelled());
}

#[test]
fn cancellation_stops_at_next_entry_boundary() {
	let file = open(ContainerBuilder::new().block(vec![
		FixtureEntry::laterality(b'R'),
		FixtureEntry::image(SVC_TAG, 1),
		FixtureEntry::image(DVC_TAG, 2),
	]));
	let options = ExtractOptions::default();

	let mut session = extract(&file, &options).expect("walk succeeds");
	assert!(session.next().expect("first image").is_ok());
	options.cancel.cancel();
	assert!(session.next().is_none());
	assert!(session.next().is_none());
	assert!(session.was_cancelled());
	assert_eq!(session.laterality(), Some(Laterality::Od));
}

#[test]
fn step_threads_laterality_explicitly() {
	let file = open(ContainerBuilder::new().block(vec![FixtureEntry::laterality(b'L'), FixtureEntry::image(AVC_TAG, 5)]));
	let entries = file.walk(&WalkOptions::default()).expect("walk succeeds").entries;

	let (state, outcome) = step(&file, None, &entries[0]);
	assert_eq!(state, Some(Laterality::Os));
	assert!(matches!(outcome, Step::Laterality(Laterality::Os)));

	let (after_image, outcome) = step(&file, state, &entries[1]);
	assert_eq!(after_image, state);
	let Step::Image(image) = outcome else {
		panic!("expected image step");
	};
	assert_eq!(image.label.laterality, Laterality::Os);

	let (unchanged, outcome) = step(&file, Some(Laterality::Od), &entries[1]);
	assert_eq!(unchanged, Some(Laterality::Od));
	assert!(matches!(outcome, Step::Image(ref image) if image.label.laterality == Laterality::Od));
}
