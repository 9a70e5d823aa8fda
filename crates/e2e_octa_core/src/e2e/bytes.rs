use crate::e2e::{E2eError, Result};

/// Seekable bounded cursor over an immutable byte slice.
#[derive(Debug, Clone)]
pub struct Cursor<'a> {
	bytes: &'a [u8],
	pos: usize,
	record: &'static str,
}

impl<'a> Cursor<'a> {
	/// Create a cursor at position 0.
	pub fn new(bytes: &'a [u8]) -> Self {
		Self { bytes, pos: 0, record: "bytes" }
	}

	/// Return current byte offset.
	pub fn pos(&self) -> usize {
		self.pos
	}

	/// Return remaining unread bytes.
	pub fn remaining(&self) -> usize {
		self.bytes.len().saturating_sub(self.pos)
	}

	/// Return the full underlying slice.
	pub fn bytes(&self) -> &'a [u8] {
		self.bytes
	}

	/// Label reads with the record currently being decoded.
	pub(crate) fn set_record(&mut self, record: &'static str) {
		self.record = record;
	}

	/// Move to an absolute offset; `at == len` is a valid end position.
	pub fn seek(&mut self, at: usize) -> Result<()> {
		if at > self.bytes.len() {
			return Err(E2eError::TruncatedRecord {
				record: self.record,
				at,
				need: 0,
				rem: 0,
			});
		}
		self.pos = at;
		Ok(())
	}

	/// Fail unless at least `n` bytes remain.
	pub fn require(&self, n: usize) -> Result<()> {
		if n > self.remaining() {
			return Err(E2eError::TruncatedRecord {
				record: self.record,
				at: self.pos,
				need: n,
				rem: self.remaining(),
			});
		}
		Ok(())
	}

	/// Read exactly `n` bytes and advance cursor.
	pub fn read_exact(&mut self, n: usize) -> Result<&'a [u8]> {
		self.require(n)?;
		let start = self.pos;
		self.pos += n;
		Ok(&self.bytes[start..self.pos])
	}

	/// Read a fixed-size byte array.
	pub fn read_array<const N: usize>(&mut self) -> Result<[u8; N]> {
		let raw = self.read_exact(N)?;
		let mut out = [0_u8; N];
		out.copy_from_slice(raw);
		Ok(out)
	}

	/// Read a single byte.
	pub fn read_u8(&mut self) -> Result<u8> {
		Ok(self.read_array::<1>()?[0])
	}

	/// Read a little-endian `u16`.
	pub fn read_u16_le(&mut self) -> Result<u16> {
		Ok(u16::from_le_bytes(self.read_array()?))
	}

	/// Read a little-endian `u32`.
	pub fn read_u32_le(&mut self) -> Result<u32> {
		Ok(u32::from_le_bytes(self.read_array()?))
	}

	/// Read a fixed-width ASCII field, dropping trailing NUL padding.
	pub fn read_padded_str(&mut self, width: usize) -> Result<String> {
		let raw = self.read_exact(width)?;
		let end = raw.iter().rposition(|byte| *byte != 0).map_or(0, |idx| idx + 1);
		Ok(raw[..end].iter().map(|byte| char::from(*byte)).collect())
	}
}
