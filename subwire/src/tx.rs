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

//! Builds, signs and encodes v4 extrinsics.
//!
//! The controller resolves call names through a [`Decorator`], encodes the
//! arguments against the schema the calling protocol supplies (argument
//! names in metadata are not reliable enough to infer wire order from), and
//! hands the signing payload to an external [`Signer`]. Key material never
//! enters this crate.

use crate::decorator::Decorator;
use crate::error::Error;
use subwire_common::{Era, MultiAddress, MultiSignature, SignatureScheme};
use subwire_scale::{encode, encode_value, Cursor, TypeSpec, Value};

/// The extrinsic format version this controller speaks.
pub const EXTRINSIC_VERSION: u8 = 4;
/// High bit of the leading byte: set means the extrinsic carries a signature.
pub const SIGNED_FLAG: u8 = 0b1000_0000;

/// A dispatchable with its arguments already on wire form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Call {
	pub module_index: u8,
	pub call_index: u8,
	pub args: Vec<u8>,
}

impl Call {
	pub fn encode_to(&self, out: &mut Vec<u8>) {
		out.push(self.module_index);
		out.push(self.call_index);
		out.extend_from_slice(&self.args);
	}
}

/// Chain-wide constants mixed into every signing payload.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ChainContext {
	pub spec_version: u32,
	pub transaction_version: u32,
	pub genesis_hash: [u8; 32],
	/// The hash the era is anchored to; equals `genesis_hash` for immortal
	/// transactions.
	pub era_block_hash: [u8; 32],
}

/// The signed-extension values of one transaction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Extra {
	pub era: Era,
	pub nonce: u32,
	pub tip: u128,
}

impl Extra {
	fn encode_to(&self, out: &mut Vec<u8>) {
		self.era.encode_to(out);
		encode::encode_compact_to(u128::from(self.nonce), out);
		encode::encode_compact_to(self.tip, out);
	}

	fn decode(cursor: &mut Cursor) -> Result<Self, Error> {
		let era = Era::decode(cursor)?;
		let offset = cursor.offset();
		let nonce = u32::try_from(cursor.next_compact()?)
			.map_err(|_| subwire_scale::CodecError::CompactOutOfRange(offset))?;
		let tip = cursor.next_compact()?;
		Ok(Extra { era, nonce, tip })
	}
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("signer failed: {0}")]
pub struct SignerError(pub String);

/// An external signature provider, selected per target chain.
pub trait Signer {
	fn scheme(&self) -> SignatureScheme;
	fn sign(&self, payload: &[u8]) -> Result<MultiSignature, SignerError>;
}

/// Builds calls and signed extrinsics against one decorated runtime.
pub struct TxController<'a> {
	decorator: &'a Decorator,
}

impl<'a> TxController<'a> {
	pub fn new(decorator: &'a Decorator) -> Self {
		TxController { decorator }
	}

	/// Resolves the call by name and encodes its arguments against the
	/// supplied schema. Argument count and shape are checked before any
	/// byte is written.
	pub fn call(
		&self,
		pallet: &str,
		name: &str,
		schema: &[TypeSpec],
		args: &[Value],
	) -> Result<Call, Error> {
		let location = self.decorator.call(pallet, name)?;
		if args.len() != schema.len() {
			return Err(Error::BadArgumentCount {
				pallet: pallet.into(),
				call: name.into(),
				expected: schema.len(),
				got: args.len(),
			});
		}
		let mut encoded = Vec::new();
		for (index, (arg, spec)) in args.iter().zip(schema).enumerate() {
			if !arg.conforms_to(spec) {
				return Err(Error::ArgumentMismatch {
					pallet: pallet.into(),
					call: name.into(),
					index,
				});
			}
			encode_value(arg, &mut encoded);
		}
		log::debug!(
			"{}.{} -> pallet {} call {}, {} argument bytes",
			pallet,
			name,
			location.pallet_index,
			location.call_index,
			encoded.len()
		);
		Ok(Call {
			module_index: location.pallet_index,
			call_index: location.call_index,
			args: encoded,
		})
	}

	/// The bytes the signer signs: call, extra, then the chain context.
	/// Payloads longer than 256 bytes are conventionally hashed before
	/// signing; that step belongs to the signer, which sees the full bytes.
	pub fn signing_payload(&self, call: &Call, extra: &Extra, ctx: &ChainContext) -> Vec<u8> {
		let mut out = Vec::new();
		call.encode_to(&mut out);
		extra.encode_to(&mut out);
		encode::encode_u32(ctx.spec_version, &mut out);
		encode::encode_u32(ctx.transaction_version, &mut out);
		out.extend_from_slice(&ctx.genesis_hash);
		out.extend_from_slice(&ctx.era_block_hash);
		out
	}

	/// Signs the payload and assembles the signed extrinsic.
	pub fn sign(
		&self,
		call: Call,
		extra: Extra,
		ctx: &ChainContext,
		address: MultiAddress,
		signer: &dyn Signer,
	) -> Result<Extrinsic, Error> {
		let payload = self.signing_payload(&call, &extra, ctx);
		let signature = signer.sign(&payload)?;
		Ok(Extrinsic { signature: Some((address, signature, extra)), call })
	}
}

/// A v4 extrinsic, signed or bare.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Extrinsic {
	pub signature: Option<(MultiAddress, MultiSignature, Extra)>,
	pub call: Call,
}

impl Extrinsic {
	pub fn unsigned(call: Call) -> Self {
		Extrinsic { signature: None, call }
	}

	/// The wire bytes: a compact length prefix over the version byte,
	/// signature block (when present) and call.
	pub fn encode(&self) -> Vec<u8> {
		let mut body = Vec::new();
		match &self.signature {
			Some((address, signature, extra)) => {
				body.push(EXTRINSIC_VERSION | SIGNED_FLAG);
				address.encode_to(&mut body);
				signature.encode_to(&mut body);
				extra.encode_to(&mut body);
			}
			None => body.push(EXTRINSIC_VERSION),
		}
		self.call.encode_to(&mut body);

		let mut out = Vec::new();
		encode::encode_compact_to(body.len() as u128, &mut out);
		out.extend_from_slice(&body);
		out
	}

	pub fn encode_hex(&self) -> String {
		encode::to_hex(&self.encode())
	}

	/// Decodes wire bytes back into an extrinsic. Argument bytes stay raw;
	/// interpreting them needs the call's schema.
	pub fn decode(bytes: &[u8]) -> Result<Self, Error> {
		let mut cursor = Cursor::new(bytes);
		let length = cursor.next_len()?;
		let body = cursor.take(length)?;
		cursor.finish()?;

		let mut cursor = Cursor::new(body);
		let leading = cursor.next_u8()?;
		let version = leading & !SIGNED_FLAG;
		if version != EXTRINSIC_VERSION {
			return Err(Error::UnsupportedExtrinsicVersion(version));
		}

		let signature = if leading & SIGNED_FLAG != 0 {
			let address = MultiAddress::decode(&mut cursor)?;
			let signature = MultiSignature::decode(&mut cursor)?;
			let extra = Extra::decode(&mut cursor)?;
			Some((address, signature, extra))
		} else {
			None
		};

		let module_index = cursor.next_u8()?;
		let call_index = cursor.next_u8()?;
		let args = cursor.take_remaining().to_vec();

		Ok(Extrinsic { signature, call: Call { module_index, call_index, args } })
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn unsigned_extrinsics_carry_just_version_and_call() {
		let call = Call { module_index: 4, call_index: 0, args: vec![0xAA, 0xBB] };
		let encoded = Extrinsic::unsigned(call.clone()).encode();
		// body: version byte + module + call + 2 argument bytes = 5
		assert_eq!(encoded[0], 5 << 2);
		assert_eq!(&encoded[1..], &[0x04, 4, 0, 0xAA, 0xBB]);

		let decoded = Extrinsic::decode(&encoded).unwrap();
		assert_eq!(decoded.signature, None);
		assert_eq!(decoded.call, call);
	}

	#[test]
	fn rejects_unknown_format_versions() {
		// bare extrinsic claiming version 3
		let bytes = [3 << 2, 0x03, 4, 0];
		assert!(matches!(
			Extrinsic::decode(&bytes),
			Err(Error::UnsupportedExtrinsicVersion(3))
		));
	}

	#[test]
	fn rejects_length_prefix_mismatch() {
		let mut encoded = Extrinsic::unsigned(Call {
			module_index: 4,
			call_index: 0,
			args: vec![],
		})
		.encode();
		encoded.push(0xFF);
		assert!(matches!(
			Extrinsic::decode(&encoded),
			Err(Error::Codec(subwire_scale::CodecError::TrailingBytes(_)))
		));
	}
}
