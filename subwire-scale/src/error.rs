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

/// Errors arising while encoding or decoding SCALE bytes.
///
/// Decode errors are fatal to the current decode: nothing here is recovered
/// from by padding or substituting defaults, and the offending offset is
/// carried so that a failed metadata decode can point at the exact byte.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum CodecError {
	#[error("unexpected end of input at offset {offset}: needed {needed} byte(s), {remaining} remaining")]
	Underflow { offset: usize, needed: usize, remaining: usize },
	#[error("compact integer at offset {0} uses a longer mode than necessary")]
	NonMinimalCompact(usize),
	#[error("compact integer at offset {0} does not fit the requested width")]
	CompactOutOfRange(usize),
	#[error("invalid boolean byte {byte:#04x} at offset {offset}")]
	InvalidBool { offset: usize, byte: u8 },
	#[error("invalid option flag {byte:#04x} at offset {offset}")]
	InvalidOptionFlag { offset: usize, byte: u8 },
	#[error("string at offset {0} is not valid utf-8")]
	InvalidUtf8(usize),
	#[error("enum tag {tag} at offset {offset} has no matching variant")]
	UnknownEnumTag { offset: usize, tag: u8 },
	#[error("{0} undecoded byte(s) left at the end of input")]
	TrailingBytes(usize),
	#[error(transparent)]
	Hex(#[from] hex::FromHexError),
	#[error("value does not conform to the declared schema: {0}")]
	SchemaMismatch(String),
}
