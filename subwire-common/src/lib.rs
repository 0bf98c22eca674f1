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

//! Wire types shared between the legacy and current subwire layers:
//! transaction mortality ([`Era`]), origins ([`MultiAddress`]) and signatures
//! ([`MultiSignature`]).

#![forbid(unsafe_code)]

mod address;
mod era;

pub use address::{MultiAddress, MultiSignature, SignatureScheme};
pub use era::Era;

/// Spec version type declared in the runtime of a chain.
pub type SpecVersion = u32;

/// Errors decoding the shared wire types.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum WireTypeError {
	#[error(transparent)]
	Codec(#[from] subwire_scale::CodecError),
	#[error("invalid era encoding (period {period}, phase {phase})")]
	InvalidEra { period: u64, phase: u64 },
	#[error("unknown address tag {0:#04x}")]
	UnknownAddressTag(u8),
	#[error("unknown signature tag {0:#04x}")]
	UnknownSignatureTag(u8),
}
