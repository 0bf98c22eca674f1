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

/// Transaction origin, mirroring the runtime's `MultiAddress` enum. Only the
/// shapes supported chains actually put on the wire are modelled.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum MultiAddress {
	/// An account id (public key).
	Id([u8; 32]),
	/// An account index, compact on the wire.
	Index(u32),
	/// Arbitrary raw bytes, length-prefixed.
	Raw(Vec<u8>),
	/// A 32-byte representation.
	Address32([u8; 32]),
	/// A 20-byte representation (ecdsa chains address by hashed pubkey).
	Address20([u8; 20]),
}

impl MultiAddress {
	pub fn encode_to(&self, out: &mut Vec<u8>) {
		match self {
			MultiAddress::Id(id) => {
				out.push(0x00);
				out.extend_from_slice(id);
			}
			MultiAddress::Index(index) => {
				out.push(0x01);
				encode::encode_compact_to(u128::from(*index), out);
			}
			MultiAddress::Raw(bytes) => {
				out.push(0x02);
				encode::encode_bytes(bytes, out);
			}
			MultiAddress::Address32(bytes) => {
				out.push(0x03);
				out.extend_from_slice(bytes);
			}
			MultiAddress::Address20(bytes) => {
				out.push(0x04);
				out.extend_from_slice(bytes);
			}
		}
	}

	pub fn decode(cursor: &mut Cursor) -> Result<Self, WireTypeError> {
		let tag = cursor.next_u8()?;
		match tag {
			0x00 => Ok(MultiAddress::Id(cursor.next_array()?)),
			0x01 => {
				let offset = cursor.offset();
				let index = cursor.next_compact()?;
				let index = u32::try_from(index)
					.map_err(|_| subwire_scale::CodecError::CompactOutOfRange(offset))?;
				Ok(MultiAddress::Index(index))
			}
			0x02 => Ok(MultiAddress::Raw(cursor.next_bytes()?.to_vec())),
			0x03 => Ok(MultiAddress::Address32(cursor.next_array()?)),
			0x04 => Ok(MultiAddress::Address20(cursor.next_array()?)),
			tag => Err(WireTypeError::UnknownAddressTag(tag)),
		}
	}
}

/// The signature algorithm a chain expects, doubling as the wire tag of a
/// [`MultiSignature`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, derive_more::Display)]
pub enum SignatureScheme {
	#[display(fmt = "ed25519")]
	Ed25519,
	#[display(fmt = "sr25519")]
	Sr25519,
	#[display(fmt = "ecdsa")]
	Ecdsa,
}

impl SignatureScheme {
	pub fn tag(self) -> u8 {
		match self {
			SignatureScheme::Ed25519 => 0x00,
			SignatureScheme::Sr25519 => 0x01,
			SignatureScheme::Ecdsa => 0x02,
		}
	}
}

/// A raw signature produced by an external signer. The bytes are opaque here;
/// verification belongs to the signature primitive, not the codec.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MultiSignature {
	Ed25519([u8; 64]),
	Sr25519([u8; 64]),
	Ecdsa([u8; 65]),
}

impl MultiSignature {
	pub fn scheme(&self) -> SignatureScheme {
		match self {
			MultiSignature::Ed25519(_) => SignatureScheme::Ed25519,
			MultiSignature::Sr25519(_) => SignatureScheme::Sr25519,
			MultiSignature::Ecdsa(_) => SignatureScheme::Ecdsa,
		}
	}

	pub fn encode_to(&self, out: &mut Vec<u8>) {
		out.push(self.scheme().tag());
		match self {
			MultiSignature::Ed25519(sig) | MultiSignature::Sr25519(sig) => out.extend_from_slice(sig),
			MultiSignature::Ecdsa(sig) => out.extend_from_slice(sig),
		}
	}

	pub fn decode(cursor: &mut Cursor) -> Result<Self, WireTypeError> {
		let tag = cursor.next_u8()?;
		match tag {
			0x00 => Ok(MultiSignature::Ed25519(cursor.next_array()?)),
			0x01 => Ok(MultiSignature::Sr25519(cursor.next_array()?)),
			0x02 => Ok(MultiSignature::Ecdsa(cursor.next_array()?)),
			tag => Err(WireTypeError::UnknownSignatureTag(tag)),
		}
	}
}
