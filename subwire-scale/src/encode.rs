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

//! Appending encoders for the SCALE primitives. Each function pushes the wire
//! form of its argument onto `out`; composite encoders are plain sequences of
//! these calls, mirroring the decode side.

use crate::compact::encode_compact;

macro_rules! encode_uint {
	($name:ident, $ty:ty) => {
		pub fn $name(value: $ty, out: &mut Vec<u8>) {
			out.extend_from_slice(&value.to_le_bytes());
		}
	};
}

pub fn encode_u8(value: u8, out: &mut Vec<u8>) {
	out.push(value);
}

encode_uint!(encode_u16, u16);
encode_uint!(encode_u32, u32);
encode_uint!(encode_u64, u64);
encode_uint!(encode_u128, u128);
encode_uint!(encode_i8, i8);
encode_uint!(encode_i16, i16);
encode_uint!(encode_i32, i32);
encode_uint!(encode_i64, i64);
encode_uint!(encode_i128, i128);

pub fn encode_bool(value: bool, out: &mut Vec<u8>) {
	out.push(u8::from(value));
}

pub fn encode_compact_to(value: u128, out: &mut Vec<u8>) {
	out.extend_from_slice(&encode_compact(value));
}

/// Compact-length-prefixed byte string.
pub fn encode_bytes(value: &[u8], out: &mut Vec<u8>) {
	encode_compact_to(value.len() as u128, out);
	out.extend_from_slice(value);
}

pub fn encode_str(value: &str, out: &mut Vec<u8>) {
	encode_bytes(value.as_bytes(), out);
}

/// 0x00 for `None`, 0x01 followed by the encoded value for `Some`.
pub fn encode_option_with<T>(value: Option<&T>, out: &mut Vec<u8>, f: impl FnOnce(&T, &mut Vec<u8>)) {
	match value {
		None => out.push(0x00),
		Some(inner) => {
			out.push(0x01);
			f(inner, out);
		}
	}
}

/// Compact element count followed by each encoded element.
pub fn encode_sequence_with<T>(items: &[T], out: &mut Vec<u8>, mut f: impl FnMut(&T, &mut Vec<u8>)) {
	encode_compact_to(items.len() as u128, out);
	for item in items {
		f(item, out);
	}
}

pub fn encode_str_vec(items: &[String], out: &mut Vec<u8>) {
	encode_sequence_with(items, out, |s, out| encode_str(s, out));
}

/// `0x`-prefixed lowercase hex, the form chain tooling expects.
pub fn to_hex(bytes: &[u8]) -> String {
	format!("0x{}", hex::encode(bytes))
}
