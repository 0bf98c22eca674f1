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

//! Compact (variable-width) integer coding.
//!
//! The mode is selected by the low two bits of the first byte: single-byte for
//! values below 2^6, two-byte below 2^14, four-byte below 2^30, and a
//! big-integer mode whose first byte carries the count of following
//! little-endian bytes. The encoding is strict and bijective: `encode` always
//! picks the smallest mode, and `decode` rejects any encoding that uses a
//! longer mode than its value requires.

use crate::{CodecError, Cursor};

pub(crate) fn decode(cursor: &mut Cursor) -> Result<u128, CodecError> {
	let offset = cursor.offset();
	let first = cursor.next_u8()?;
	match first & 0b11 {
		0b00 => Ok(u128::from(first >> 2)),
		0b01 => {
			let second = cursor.next_u8()?;
			let value = u128::from(first >> 2) | u128::from(second) << 6;
			if value < 1 << 6 {
				return Err(CodecError::NonMinimalCompact(offset));
			}
			Ok(value)
		}
		0b10 => {
			let rest = cursor.take(3)?;
			let value = u128::from(first >> 2)
				| u128::from(rest[0]) << 6
				| u128::from(rest[1]) << 14
				| u128::from(rest[2]) << 22;
			if value < 1 << 14 {
				return Err(CodecError::NonMinimalCompact(offset));
			}
			Ok(value)
		}
		_ => {
			let len = usize::from(first >> 2) + 4;
			if len > 16 {
				return Err(CodecError::CompactOutOfRange(offset));
			}
			let bytes = cursor.take(len)?;
			// A zero high byte means a shorter length would have done.
			if bytes[len - 1] == 0 {
				return Err(CodecError::NonMinimalCompact(offset));
			}
			let mut value = 0u128;
			for (i, byte) in bytes.iter().enumerate() {
				value |= u128::from(*byte) << (8 * i);
			}
			if value < 1 << 30 {
				return Err(CodecError::NonMinimalCompact(offset));
			}
			Ok(value)
		}
	}
}

/// Encode `value` in the smallest compact mode.
pub fn encode_compact(value: u128) -> Vec<u8> {
	if value < 1 << 6 {
		vec![(value as u8) << 2]
	} else if value < 1 << 14 {
		(((value as u16) << 2) | 0b01).to_le_bytes().to_vec()
	} else if value < 1 << 30 {
		(((value as u32) << 2) | 0b10).to_le_bytes().to_vec()
	} else {
		let bytes = value.to_le_bytes();
		let len = 16 - bytes.iter().rev().take_while(|b| **b == 0).count();
		let mut out = Vec::with_capacity(len + 1);
		out.push((((len - 4) as u8) << 2) | 0b11);
		out.extend_from_slice(&bytes[..len]);
		out
	}
}

/// Number of bytes [`encode_compact`] produces for `value`.
pub fn compact_len(value: u128) -> usize {
	if value < 1 << 6 {
		1
	} else if value < 1 << 14 {
		2
	} else if value < 1 << 30 {
		4
	} else {
		17 - value.to_le_bytes().iter().rev().take_while(|b| **b == 0).count()
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use codec::{Compact, Encode};

	fn decode_all(bytes: &[u8]) -> Result<u128, CodecError> {
		let mut cursor = Cursor::new(bytes);
		let value = cursor.next_compact()?;
		cursor.finish()?;
		Ok(value)
	}

	#[test]
	fn round_trips_across_all_mode_boundaries() {
		for value in [0u128, 1, 63, 64, 16383, 16384, (1 << 30) - 1, 1 << 30, 1 << 40, u128::from(u64::MAX), u128::MAX]
		{
			let encoded = encode_compact(value);
			assert_eq!(decode_all(&encoded), Ok(value), "value {}", value);
			assert_eq!(encoded.len(), compact_len(value));
		}
	}

	#[test]
	fn selects_the_minimal_mode() {
		assert_eq!(encode_compact(0).len(), 1);
		assert_eq!(encode_compact(63).len(), 1);
		assert_eq!(encode_compact(64).len(), 2);
		assert_eq!(encode_compact(16383).len(), 2);
		assert_eq!(encode_compact(16384).len(), 4);
		assert_eq!(encode_compact((1 << 30) - 1).len(), 4);
		assert_eq!(encode_compact(1 << 30).len(), 5);
		assert_eq!(encode_compact(1 << 40).len(), 7);
	}

	#[test]
	fn matches_the_reference_codec() {
		for value in [0u128, 42, 63, 64, 16383, 16384, 1_000_000, (1 << 30) - 1, 1 << 30, 1 << 40, 1 << 100] {
			assert_eq!(encode_compact(value), Compact(value).encode(), "value {}", value);
		}
	}

	#[test]
	fn rejects_non_minimal_modes() {
		// 0 in two-byte mode
		assert_eq!(decode_all(&[0b01, 0x00]), Err(CodecError::NonMinimalCompact(0)));
		// 63 in four-byte mode
		assert_eq!(decode_all(&[(63 << 2) | 0b10, 0, 0, 0]), Err(CodecError::NonMinimalCompact(0)));
		// 2^14 - 1 in four-byte mode
		let v = ((16383u32) << 2) | 0b10;
		assert_eq!(decode_all(&v.to_le_bytes()), Err(CodecError::NonMinimalCompact(0)));
		// big-integer mode with a zero high byte
		assert_eq!(decode_all(&[0b11, 0x01, 0x00, 0x00, 0x00]), Err(CodecError::NonMinimalCompact(0)));
		// big-integer mode for a value that fits four bytes
		assert_eq!(decode_all(&[0b11, 0x01, 0x00, 0x00, 0x01]), Err(CodecError::NonMinimalCompact(0)));
	}

	#[test]
	fn rejects_truncated_input() {
		assert!(matches!(decode_all(&[0b01]), Err(CodecError::Underflow { .. })));
		assert!(matches!(decode_all(&[0b10, 0x00]), Err(CodecError::Underflow { .. })));
		assert!(matches!(decode_all(&[0b11, 0x01]), Err(CodecError::Underflow { .. })));
	}

	#[test]
	fn rejects_overlong_big_integer_lengths() {
		// first byte declares 17 following bytes, which no u128 needs
		let mut bytes = vec![(13u8 << 2) | 0b11];
		bytes.extend(std::iter::repeat(0xFF).take(17));
		assert_eq!(decode_all(&bytes), Err(CodecError::CompactOutOfRange(0)));
	}
}
