use crate::e2e::Result;
use crate::e2e::bytes::Cursor;

/// Fixed-width little-endian record stored in the container.
pub trait FixedRecord: Sized {
	/// Record kind used in truncation errors.
	const NAME: &'static str;
	/// Declared on-disk size in bytes.
	const SIZE: usize;

	/// Decode fields in order; callers go through [`read_record`].
	fn decode(cursor: &mut Cursor<'_>) -> Result<Self>;
}

/// Decode one record at the cursor and leave the cursor exactly `R::SIZE` bytes further.
///
/// The size check runs before any field is read, so a short tail fails as a
/// whole record rather than at an arbitrary field.
pub fn read_record<R: FixedRecord>(cursor: &mut Cursor<'_>) -> Result<R> {
	cursor.set_record(R::NAME);
	cursor.require(R::SIZE)?;

	let start = cursor.pos();
	let record = R::decode(cursor)?;
	cursor.seek(start + R::SIZE)?;
	Ok(record)
}

/// Decode a record from the start of a standalone payload.
pub fn parse_record<R: FixedRecord>(payload: &[u8]) -> Result<R> {
	read_record(&mut Cursor::new(payload))
}
