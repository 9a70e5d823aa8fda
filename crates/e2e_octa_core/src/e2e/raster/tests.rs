use e2e_octa_testkit::{image_payload, image_payload_with};

use super::{CHANNELS, DISPLACEMENT, PAYLOAD_LEN, SIDE, decode_image, rotate_columns, unpack_pixels};
use crate::e2e::E2eError;

fn col_marker(row: usize, col: usize, ch: usize) -> u8 {
	match ch {
		0 => (col & 0xFF) as u8,
		1 => (col >> 8) as u8,
		_ => (row & 0xFF) as u8,
	}
}

fn raw_col_at(raster: &super::Raster, row: usize, col: usize) -> usize {
	let px = raster.pixel(row, col);
	usize::from(px[0]) | (usize::from(px[1]) << 8)
}

#[test]
fn rejects_wrong_payload_length() {
	let err = decode_image(0x2760, &vec![0_u8; PAYLOAD_LEN - 4]).expect_err("short payload fails");
	assert!(matches!(
		err,
		E2eError::MalformedPayload {
			tag: 0x2760,
			expected: PAYLOAD_LEN,
			actual
		} if actual == PAYLOAD_LEN - 4
	));

	let err = decode_image(0x2760, &vec![0_u8; PAYLOAD_LEN + 1]).expect_err("long payload fails");
	assert!(matches!(err, E2eError::MalformedPayload { .. }));
}

#[test]
fn output_is_shifted_left_by_displacement() {
	let raster = decode_image(0x2761, &image_payload_with(col_marker)).expect("image decodes");
	assert_eq!((raster.width, raster.height), (SIDE, SIDE));
	assert_eq!(raster.data.len(), SIDE * SIDE * CHANNELS);

	for row in [0, 17, SIDE - 1] {
		assert_eq!(raw_col_at(&raster, row, 0), DISPLACEMENT);
		assert_eq!(raw_col_at(&raster, row, SIDE - DISPLACEMENT - 1), SIDE - 1);
		assert_eq!(raw_col_at(&raster, row, SIDE - DISPLACEMENT), 0);
		assert_eq!(raw_col_at(&raster, row, SIDE - 1), DISPLACEMENT - 1);
		assert_eq!(raster.pixel(row, 100)[2], (row & 0xFF) as u8);
	}
}

#[test]
fn padding_byte_is_dropped() {
	let raster = decode_image(0x2762, &image_payload_with(|_, _, _| 0x11)).expect("image decodes");
	assert!(raster.data.iter().all(|byte| *byte == 0x11), "0xEE padding must not leak into channels");
}

#[test]
fn decode_is_pure() {
	let payload = image_payload(42);
	let first = decode_image(0x2760, &payload).expect("first decode");
	let second = decode_image(0x2760, &payload).expect("second decode");
	assert_eq!(first, second);
}

#[test]
fn rgb_conversion_swaps_stored_order() {
	let raster = decode_image(0x2760, &image_payload_with(|_, _, ch| [10, 20, 30][ch])).expect("image decodes");
	let rgb = raster.to_rgb_image();
	assert_eq!(rgb.dimensions(), (SIDE as u32, SIDE as u32));
	assert_eq!(rgb.get_pixel(5, 9).0, [30, 20, 10]);
}

#[test]
fn unpack_keeps_leading_channels() {
	let packed = [1, 2, 3, 9, 4, 5, 6, 9];
	assert_eq!(unpack_pixels(&packed, 4, 3), vec![1, 2, 3, 4, 5, 6]);
	assert_eq!(unpack_pixels(&packed, 4, 1), vec![1, 4]);
}

#[test]
fn rotation_round_trips_for_any_shape() {
	for (rows, width, channels) in [(1, 1, 1), (3, 7, 1), (2, 5, 4), (4, 16, 3), (2, SIDE, CHANNELS)] {
		let original: Vec<u8> = (0..rows * width * channels).map(|idx| (idx * 31 % 251) as u8).collect();
		for shift in 0..=width {
			let mut data = original.clone();
			rotate_columns(&mut data, width, channels, shift);
			rotate_columns(&mut data, width, channels, width - shift);
			assert_eq!(data, original, "rows={rows} width={width} channels={channels} shift={shift}");
		}
	}
}

#[test]
fn rotation_matches_slice_definition() {
	let mut data: Vec<u8> = (0..10).collect();
	rotate_columns(&mut data, 5, 1, 2);
	assert_eq!(data, vec![2, 3, 4, 0, 1, 7, 8, 9, 5, 6]);
}
