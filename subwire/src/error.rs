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

use crate::decorator::LookupError;
use crate::tx::SignerError;

/// Umbrella error for the crate's public surface.
#[derive(Debug, thiserror::Error)]
pub enum Error {
	#[error(transparent)]
	Codec(#[from] subwire_scale::CodecError),
	#[error(transparent)]
	LegacyMetadata(#[from] subwire_legacy::MetadataError),
	#[error(transparent)]
	CurrentMetadata(#[from] subwire_current::MetadataError),
	#[error(transparent)]
	WireType(#[from] subwire_common::WireTypeError),
	#[error(transparent)]
	Lookup(#[from] LookupError),
	#[error(transparent)]
	Signer(#[from] SignerError),
	#[error("metadata version {0} is not supported (supported: 11, 13, 14)")]
	UnsupportedVersion(u8),
	#[error("extrinsic format version {0} is not supported (supported: 4)")]
	UnsupportedExtrinsicVersion(u8),
	#[error("call {pallet}.{call} takes {expected} arguments, {got} were supplied")]
	BadArgumentCount { pallet: String, call: String, expected: usize, got: usize },
	#[error("argument {index} of {pallet}.{call} does not fit the call's schema")]
	ArgumentMismatch { pallet: String, call: String, index: usize },
	#[error(transparent)]
	Serialization(#[from] serde_json::Error),
}
