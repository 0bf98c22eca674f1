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

//! Version dispatch over the supported metadata layouts.

use crate::error::Error;
use crate::normalize::{self, NormalizedPallet};
use serde::Serialize;
use subwire_current::MetadataV14;
use subwire_legacy::{MetadataV11, MetadataV13};
use subwire_scale::{CodecError, Cursor};

/// A decoded metadata blob of any supported version.
///
/// Constructed once per (chain, spec version) pair and read-only afterwards.
#[derive(Debug, Serialize)]
pub enum RuntimeMetadata {
	V11(MetadataV11),
	V13(MetadataV13),
	V14(MetadataV14),
}

impl RuntimeMetadata {
	/// Decodes a metadata blob, dispatching on the version byte that follows
	/// the magic number.
	pub fn from_bytes(bytes: &[u8]) -> Result<Self, Error> {
		let version = *bytes.get(4).ok_or(CodecError::Underflow {
			offset: 0,
			needed: 5,
			remaining: bytes.len(),
		})?;
		log::debug!("decoding {} byte metadata blob, version {}", bytes.len(), version);
		match version {
			11 => Ok(RuntimeMetadata::V11(subwire_legacy::version_11::decode(bytes)?)),
			13 => Ok(RuntimeMetadata::V13(subwire_legacy::version_13::decode(bytes)?)),
			14 => Ok(RuntimeMetadata::V14(subwire_current::version_14::decode(bytes)?)),
			other => Err(Error::UnsupportedVersion(other)),
		}
	}

	/// Decodes from a hex string, `0x` prefix optional. Node RPCs hand
	/// metadata back in this form.
	pub fn from_hex(s: &str) -> Result<Self, Error> {
		let bytes = Cursor::strip_hex(s)?;
		Self::from_bytes(&bytes)
	}

	pub fn version(&self) -> u8 {
		match self {
			RuntimeMetadata::V11(_) => 11,
			RuntimeMetadata::V13(_) => 13,
			RuntimeMetadata::V14(_) => 14,
		}
	}

	/// The version-independent view of the pallet list. Pallet and call
	/// indices come out the same whichever version carried them.
	pub fn normalize(&self) -> Result<Vec<NormalizedPallet>, Error> {
		normalize::normalize(self)
	}

	/// Pretty-printed JSON of the version-specific tree, for inspection.
	pub fn pretty(&self) -> Result<String, Error> {
		Ok(serde_json::to_string_pretty(self)?)
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn dispatches_on_the_version_byte() {
		let meta = RuntimeMetadata::from_bytes(&subwire_legacy::test_suite::raw_v11()).unwrap();
		assert_eq!(meta.version(), 11);
		let meta = RuntimeMetadata::from_bytes(&subwire_legacy::test_suite::raw_v13()).unwrap();
		assert_eq!(meta.version(), 13);
		let meta = RuntimeMetadata::from_bytes(&subwire_current::test_suite::raw_v14()).unwrap();
		assert_eq!(meta.version(), 14);
	}

	#[test]
	fn unsupported_versions_are_refused_up_front() {
		let mut raw = subwire_legacy::test_suite::raw_v13();
		raw[4] = 12;
		assert!(matches!(
			RuntimeMetadata::from_bytes(&raw),
			Err(Error::UnsupportedVersion(12))
		));
	}

	#[test]
	fn short_input_is_an_underflow() {
		assert!(matches!(
			RuntimeMetadata::from_bytes(&[0x6d, 0x65]),
			Err(Error::Codec(CodecError::Underflow { .. }))
		));
	}

	#[test]
	fn hex_and_bytes_agree() {
		let raw = subwire_legacy::test_suite::raw_v11();
		let hex = format!("0x{}", hex::encode(&raw));
		let meta = RuntimeMetadata::from_hex(&hex).unwrap();
		assert_eq!(meta.version(), 11);
	}

	#[test]
	fn pretty_output_is_valid_json() {
		let meta = RuntimeMetadata::from_bytes(&subwire_current::test_suite::raw_v14()).unwrap();
		let json: serde_json::Value = serde_json::from_str(&meta.pretty().unwrap()).unwrap();
		assert!(json.get("V14").is_some());
	}
}
