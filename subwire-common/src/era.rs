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

use crate::WireTypeError;
use serde::{Deserialize, Serialize};
use subwire_scale::{encode, Cursor};

/// The mortality window encoded into a transaction.
///
/// An immortal era is a single zero byte. A mortal era packs (period, phase)
/// into two bytes: the low four bits hold `log2(period) - 1`, the rest the
/// phase divided by the quantize factor `max(period >> 12, 1)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Era {
	Immortal,
	Mortal { period: u64, phase: u64 },
}

impl Era {
	/// Mortal era for a transaction built at `current_block`, valid for
	/// roughly `period` blocks. The period is rounded up to the next power of
	/// two and clamped to [4, 2^16]; the phase is the block number modulo the
	/// period, quantized so it survives the two-byte packing.
	pub fn mortal(period: u64, current_block: u64) -> Self {
		let period = period.checked_next_power_of_two().unwrap_or(1 << 16).clamp(4, 1 << 16);
		let phase = current_block % period;
		let quantize_factor = (period >> 12).max(1);
		let phase = phase / quantize_factor * quantize_factor;
		Era::Mortal { period, phase }
	}

	pub fn is_immortal(&self) -> bool {
		matches!(self, Era::Immortal)
	}

	pub fn encode_to(&self, out: &mut Vec<u8>) {
		match self {
			Era::Immortal => out.push(0),
			Era::Mortal { period, phase } => {
				let quantize_factor = (period >> 12).max(1);
				// clamp before subtracting so a degenerate period below 4
				// cannot underflow the nibble
				let nibble = (period.trailing_zeros() as u16).clamp(2, 16) - 1;
				let encoded = nibble | ((phase / quantize_factor) as u16) << 4;
				encode::encode_u16(encoded, out);
			}
		}
	}

	pub fn encoded(&self) -> Vec<u8> {
		let mut out = Vec::with_capacity(2);
		self.encode_to(&mut out);
		out
	}

	pub fn decode(cursor: &mut Cursor) -> Result<Self, WireTypeError> {
		let first = cursor.next_u8()?;
		if first == 0 {
			return Ok(Era::Immortal);
		}
		let encoded = u64::from(first) | u64::from(cursor.next_u8()?) << 8;
		let period = 2u64 << (encoded % (1 << 4));
		let quantize_factor = (period >> 12).max(1);
		let phase = (encoded >> 4) * quantize_factor;
		if period < 4 || phase >= period {
			return Err(WireTypeError::InvalidEra { period, phase });
		}
		Ok(Era::Mortal { period, phase })
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn immortal_is_a_single_zero_byte() {
		assert_eq!(Era::Immortal.encoded(), vec![0x00]);
		let mut cursor = Cursor::new(&[0x00]);
		assert_eq!(Era::decode(&mut cursor).unwrap(), Era::Immortal);
	}

	#[test]
	fn mortal_packing_matches_the_substrate_reference_vector() {
		// Era::mortal(64, 42): period 64, phase 42 packs to 0xa5 0x02.
		let era = Era::mortal(64, 42);
		assert_eq!(era, Era::Mortal { period: 64, phase: 42 });
		assert_eq!(era.encoded(), vec![0xA5, 0x02]);
	}

	#[test]
	fn period_rounds_up_to_a_clamped_power_of_two() {
		assert_eq!(Era::mortal(0, 0), Era::Mortal { period: 4, phase: 0 });
		assert_eq!(Era::mortal(3, 10), Era::Mortal { period: 4, phase: 2 });
		assert_eq!(Era::mortal(100, 1000), Era::Mortal { period: 128, phase: 1000 % 128 });
		assert_eq!(Era::mortal(u64::MAX, 0), Era::Mortal { period: 1 << 16, phase: 0 });
	}

	#[test]
	fn large_periods_quantize_the_phase() {
		let era = Era::mortal(32768, 20001);
		// quantize factor is 8 for a 2^15 period
		assert_eq!(era, Era::Mortal { period: 32768, phase: 20000 });
		let encoded = era.encoded();
		let mut cursor = Cursor::new(&encoded);
		assert_eq!(Era::decode(&mut cursor).unwrap(), era);
	}

	#[test]
	fn mortal_eras_round_trip() {
		for (period, block) in [(4u64, 7u64), (64, 42), (256, 100_000), (65536, 123_456)] {
			let era = Era::mortal(period, block);
			let encoded = era.encoded();
			assert_eq!(encoded.len(), 2);
			let mut cursor = Cursor::new(&encoded);
			assert_eq!(Era::decode(&mut cursor).unwrap(), era);
			cursor.finish().unwrap();
		}
	}

	#[test]
	fn hand_built_degenerate_periods_encode_without_panicking() {
		// period 1 and 2 cannot come out of Era::mortal, but the fields are
		// public; the nibble saturates at the smallest valid period instead
		// of underflowing
		assert_eq!(Era::Mortal { period: 1, phase: 0 }.encoded(), vec![0x01, 0x00]);
		assert_eq!(Era::Mortal { period: 2, phase: 1 }.encoded(), vec![0x11, 0x00]);
		// a period of 4 still encodes the same nibble as before
		assert_eq!(Era::Mortal { period: 4, phase: 3 }.encoded(), vec![0x31, 0x00]);
	}

	#[test]
	fn decode_rejects_a_phase_outside_the_period() {
		// low nibble 1 => period 4; phase bits 15 => phase 15 >= 4
		let mut cursor = Cursor::new(&[0xF1, 0x00]);
		assert!(matches!(Era::decode(&mut cursor), Err(WireTypeError::InvalidEra { .. })));
	}
}
