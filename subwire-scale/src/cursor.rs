// Copyright 2024-2026 Subwire Developers.
// This file is part of subwire.
//
// subwire is free software: you can redistribute it and/or modify
// it under the terms of the GNU General Public License as published by
// the Free Software Foundation, either version 3 of the License, or
// (at your option) any later version.
//
// subwire is distributed in the hope that it will be useful,
// but WITHOUT ANY WARRANTY; without even the implied warranty of
// MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE.  See the
// GNU General Public License for more details.
//
// You should have received a copy of the GNU General Public License
// along with subwire.  If not, see <http://www.gnu.org/licenses/>.

use crate::{compact, CodecError};

/// A stateful reader over a contiguous SCALE byte stream.
///
/// Every `next_*` call decodes starting at the current offset, advances the
/// offset by exactly the bytes consumed and returns the decoded value.
/// Decoders are offset-pure: decoding a value only depends on the remaining
/// bytes, never on how the cursor arrived at its offset.
#[derive(Debug, Clone)]
pub struct Cursor<'a> {
	data: &'a [u8],
	offset: usize,
}

macro_rules! next_uint {
	($name:ident, $ty:ty) => {
		pub fn $name(&mut self) -> Result<$ty, CodecError> {
			Ok(<$ty>::from_le_bytes(self.next_array()?))
		}
	};
}

impl<'a> Cursor<'a> {
	pub fn new(data: &'a [u8]) -> Self {
		Self { data, offset: 0 }
	}

	/// Decode a `0x`-prefixed (or bare) hex string into owned bytes.
	pub fn strip_hex(s: &str) -> Result<Vec<u8>, CodecError> {
		Ok(hex::decode(s.strip_prefix("0x").unwrap_or(s))?)
	}

	pub fn offset(&self) -> usize {
		self.offset
	}

	pub fn remaining(&self) -> usize {
		self.data.len() - self.offset
	}

	pub fn is_empty(&self) -> bool {
		self.remaining() == 0
	}

	/// Byte at the current offset, without consuming it.
	pub fn peek(&self) -> Option<u8> {
		self.data.get(self.offset).copied()
	}

	/// Consume the next `n` raw bytes.
	pub fn take(&mut self, n: usize) -> Result<&'a [u8], CodecError> {
		if self.remaining() < n {
			return Err(CodecError::Underflow { offset: self.offset, needed: n, remaining: self.remaining() });
		}
		let out = &self.data[self.offset..self.offset + n];
		self.offset += n;
		Ok(out)
	}

	/// Consume everything that is left.
	pub fn take_remaining(&mut self) -> &'a [u8] {
		let out = &self.data[self.offset..];
		self.offset = self.data.len();
		out
	}

	pub fn next_array<const N: usize>(&mut self) -> Result<[u8; N], CodecError> {
		let bytes = self.take(N)?;
		let mut out = [0u8; N];
		out.copy_from_slice(bytes);
		Ok(out)
	}

	pub fn next_u8(&mut self) -> Result<u8, CodecError> {
		Ok(self.take(1)?[0])
	}

	next_uint!(next_u16, u16);
	next_uint!(next_u32, u32);
	next_uint!(next_u64, u64);
	next_uint!(next_u128, u128);
	next_uint!(next_i8, i8);
	next_uint!(next_i16, i16);
	next_uint!(next_i32, i32);
	next_uint!(next_i64, i64);
	next_uint!(next_i128, i128);

	/// A boolean is strictly one byte, 0x00 or 0x01; anything else is an error
	/// rather than a coercion.
	pub fn next_bool(&mut self) -> Result<bool, CodecError> {
		let offset = self.offset;
		match self.next_u8()? {
			0x00 => Ok(false),
			0x01 => Ok(true),
			byte => Err(CodecError::InvalidBool { offset, byte }),
		}
	}

	/// Compact integer in any of the four modes, minimality enforced.
	pub fn next_compact(&mut self) -> Result<u128, CodecError> {
		compact::decode(self)
	}

	/// Compact length prefix, as found on byte strings and sequences.
	pub fn next_len(&mut self) -> Result<usize, CodecError> {
		let offset = self.offset;
		usize::try_from(self.next_compact()?).map_err(|_| CodecError::CompactOutOfRange(offset))
	}

	/// Compact-length-prefixed byte string.
	pub fn next_bytes(&mut self) -> Result<&'a [u8], CodecError> {
		let len = self.next_len()?;
		self.take(len)
	}

	/// Compact-length-prefixed utf-8 string. Invalid utf-8 is an error, not a
	/// replacement character.
	pub fn next_str(&mut self) -> Result<String, CodecError> {
		let offset = self.offset;
		let bytes = self.next_bytes()?;
		String::from_utf8(bytes.to_vec()).map_err(|_| CodecError::InvalidUtf8(offset))
	}

	/// Optional value: a one-byte presence flag (0x00 absent, 0x01 present)
	/// followed by the encoded value only if present.
	pub fn next_option<T, E, F>(&mut self, f: F) -> Result<Option<T>, E>
	where
		E: From<CodecError>,
		F: FnOnce(&mut Self) -> Result<T, E>,
	{
		let offset = self.offset;
		match self.next_u8()? {
			0x00 => Ok(None),
			0x01 => f(self).map(Some),
			byte => Err(CodecError::InvalidOptionFlag { offset, byte }.into()),
		}
	}

	/// Sequence: a compact element count followed by exactly that many encoded
	/// elements. Decoding stops after the declared count; what any trailing
	/// bytes mean is the caller's business.
	pub fn next_sequence<T, E, F>(&mut self, mut f: F) -> Result<Vec<T>, E>
	where
		E: From<CodecError>,
		F: FnMut(&mut Self) -> Result<T, E>,
	{
		let len = self.next_len()?;
		log::trace!("sequence of {} element(s) at offset {}", len, self.offset);
		// A hostile length prefix must not pre-allocate unbounded memory.
		let mut out = Vec::with_capacity(len.min(1024));
		for _ in 0..len {
			out.push(f(self)?);
		}
		Ok(out)
	}

	/// Shorthand for the ubiquitous `Vec<String>` (documentation lists etc.).
	pub fn next_str_vec(&mut self) -> Result<Vec<String>, CodecError> {
		self.next_sequence(|c| c.next_str())
	}

	/// Error unless every input byte has been consumed.
	pub fn finish(self) -> Result<(), CodecError> {
		match self.remaining() {
			0 => Ok(()),
			n => Err(CodecError::TrailingBytes(n)),
		}
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use codec::Encode;

	#[test]
	fn fixed_width_ints_are_little_endian() {
		let data = 0xDEADBEEFu32.to_le_bytes();
		let mut cursor = Cursor::new(&data);
		assert_eq!(cursor.next_u32().unwrap(), 0xDEADBEEF);
		assert!(cursor.is_empty());
	}

	#[test]
	fn underflow_is_typed_not_a_panic() {
		let mut cursor = Cursor::new(&[0x01, 0x02]);
		let err = cursor.next_u32().unwrap_err();
		assert_eq!(err, CodecError::Underflow { offset: 0, needed: 4, remaining: 2 });
	}

	#[test]
	fn bool_rejects_everything_but_zero_and_one() {
		assert!(Cursor::new(&[0x00]).next_bool() == Ok(false));
		assert!(Cursor::new(&[0x01]).next_bool() == Ok(true));
		let err = Cursor::new(&[0x02]).next_bool().unwrap_err();
		assert_eq!(err, CodecError::InvalidBool { offset: 0, byte: 0x02 });
	}

	#[test]
	fn strings_reject_invalid_utf8() {
		// length 2, then an invalid sequence
		let data = vec![0x08, 0xC3, 0x28];
		let err = Cursor::new(&data).next_str().unwrap_err();
		assert_eq!(err, CodecError::InvalidUtf8(0));
	}

	#[test]
	fn option_flag_is_strict() {
		let some: Option<u32> = Some(7);
		let encoded = some.encode();
		let mut cursor = Cursor::new(&encoded);
		let decoded: Option<u32> = cursor.next_option(|c| c.next_u32()).unwrap();
		assert_eq!(decoded, Some(7));

		let err = Cursor::new(&[0x05]).next_option::<u32, CodecError, _>(|c| c.next_u32()).unwrap_err();
		assert_eq!(err, CodecError::InvalidOptionFlag { offset: 0, byte: 0x05 });
	}

	#[test]
	fn sequence_stops_exactly_after_declared_count() {
		let mut encoded = vec![1u16, 2, 3].encode();
		encoded.extend_from_slice(&[0xAA, 0xBB]); // trailing bytes belong to the caller
		let mut cursor = Cursor::new(&encoded);
		let seq: Vec<u16> = cursor.next_sequence(|c| c.next_u16()).unwrap();
		assert_eq!(seq, vec![1, 2, 3]);
		assert_eq!(cursor.remaining(), 2);
		assert_eq!(cursor.clone().finish(), Err(CodecError::TrailingBytes(2)));
	}

	#[test]
	fn cursor_is_offset_pure() {
		// Decoding A then B must equal decoding B alone from the stream with
		// A's prefix removed.
		let mut data = 0x1122u16.encode();
		data.extend("hello".to_string().encode());

		let mut full = Cursor::new(&data);
		let a = full.next_u16().unwrap();
		let consumed = full.offset();
		let b_from_full = full.next_str().unwrap();

		let mut suffix = Cursor::new(&data[consumed..]);
		let b_alone = suffix.next_str().unwrap();

		assert_eq!(a, 0x1122);
		assert_eq!(b_from_full, b_alone);
		assert_eq!(full.remaining(), suffix.remaining());
	}

	#[test]
	fn hex_entry_point_accepts_both_prefixed_and_bare() {
		assert_eq!(Cursor::strip_hex("0x0abc").unwrap(), vec![0x0A, 0xBC]);
		assert_eq!(Cursor::strip_hex("0abc").unwrap(), vec![0x0A, 0xBC]);
		assert!(Cursor::strip_hex("0xzz").is_err());
	}
}
