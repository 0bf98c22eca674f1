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

use subwire::tx::{ChainContext, Extra, SignerError};
use subwire::{
	Decorator, Era, Extrinsic, MultiAddress, MultiSignature, RuntimeMetadata, SignatureScheme,
	Signer, SupportedItems, TxController, TypeSpec, Value,
};
use subwire_scale::VariantSpec;

const ALICE: [u8; 32] = [0x11; 32];

/// Deterministic stand-in for a real keypair.
struct TestSigner;

impl Signer for TestSigner {
	fn scheme(&self) -> SignatureScheme {
		SignatureScheme::Sr25519
	}

	fn sign(&self, payload: &[u8]) -> Result<MultiSignature, SignerError> {
		assert!(!payload.is_empty());
		Ok(MultiSignature::Sr25519([0xAB; 64]))
	}
}

fn items() -> SupportedItems {
	serde_json::from_str(r#"{ "calls": { "Balances": ["transfer"] } }"#).unwrap()
}

fn decorator(raw: &[u8]) -> Decorator {
	let meta = RuntimeMetadata::from_bytes(raw).unwrap();
	Decorator::new(&meta, &items()).unwrap()
}

fn transfer_schema() -> Vec<TypeSpec> {
	let address = TypeSpec::Enum(vec![VariantSpec {
		name: "Id".into(),
		index: 0,
		fields: Some(TypeSpec::Array(32, Box::new(TypeSpec::U8))),
	}]);
	vec![address, TypeSpec::Compact]
}

fn transfer_args(amount: u128) -> Vec<Value> {
	vec![
		Value::Variant {
			name: "Id".into(),
			index: 0,
			value: Some(Box::new(Value::Raw(ALICE.to_vec()))),
		},
		Value::Compact(amount),
	]
}

#[test]
fn every_metadata_version_encodes_the_same_call_bytes() {
	let raws = [
		subwire_legacy::test_suite::raw_v11(),
		subwire_legacy::test_suite::raw_v13(),
		subwire_current::test_suite::raw_v14(),
	];
	let mut encoded = Vec::new();
	for raw in &raws {
		let dec = decorator(raw);
		let controller = TxController::new(&dec);
		let call = controller
			.call("Balances", "transfer", &transfer_schema(), &transfer_args(1000))
			.unwrap();
		assert_eq!((call.module_index, call.call_index), (4, 0));
		encoded.push(call);
	}
	assert_eq!(encoded[0], encoded[1]);
	assert_eq!(encoded[1], encoded[2]);
}

#[test]
fn signed_extrinsic_matches_the_reference_layout_byte_for_byte() {
	let raw = subwire_current::test_suite::raw_v14();
	let dec = decorator(&raw);
	let controller = TxController::new(&dec);

	let call = controller
		.call("Balances", "transfer", &transfer_schema(), &transfer_args(1000))
		.unwrap();
	let extra = Extra { era: Era::mortal(64, 42), nonce: 1, tip: 0 };
	let ctx = ChainContext {
		spec_version: 9122,
		transaction_version: 7,
		genesis_hash: [0x22; 32],
		era_block_hash: [0x33; 32],
	};

	let extrinsic = controller
		.sign(call.clone(), extra, &ctx, MultiAddress::Id(ALICE), &TestSigner)
		.unwrap();
	let encoded = extrinsic.encode();

	// assemble the reference bytes by hand
	let mut body = Vec::new();
	body.push(0x84); // version 4 | signed flag
	body.push(0x00); // MultiAddress::Id tag
	body.extend_from_slice(&ALICE);
	body.push(0x01); // sr25519 tag
	body.extend_from_slice(&[0xAB; 64]);
	body.extend_from_slice(&[0xA5, 0x02]); // mortal(64, 42)
	body.push(0x04); // compact nonce 1
	body.push(0x00); // compact tip 0
	body.extend_from_slice(&[4, 0]); // Balances.transfer
	body.push(0x00); // MultiAddress::Id tag inside the call arguments
	body.extend_from_slice(&ALICE);
	body.extend_from_slice(&[0xA1, 0x0F]); // compact 1000

	let mut expected = Vec::new();
	expected.extend_from_slice(&subwire_scale::encode_compact(body.len() as u128));
	expected.extend_from_slice(&body);
	assert_eq!(encoded, expected);

	// and back again
	let decoded = Extrinsic::decode(&encoded).unwrap();
	let (address, signature, decoded_extra) = decoded.signature.unwrap();
	assert_eq!(address, MultiAddress::Id(ALICE));
	assert_eq!(signature, MultiSignature::Sr25519([0xAB; 64]));
	assert_eq!(decoded_extra, extra);
	assert_eq!(decoded_extra.era, Era::Mortal { period: 64, phase: 42 });
	assert_eq!(decoded.call, call);
}

#[test]
fn signing_payload_ends_with_the_chain_context() {
	let raw = subwire_legacy::test_suite::raw_v13();
	let dec = decorator(&raw);
	let controller = TxController::new(&dec);

	let call = controller
		.call("Balances", "transfer", &transfer_schema(), &transfer_args(1))
		.unwrap();
	let extra = Extra { era: Era::Immortal, nonce: 0, tip: 0 };
	let ctx = ChainContext {
		spec_version: 9122,
		transaction_version: 7,
		genesis_hash: [0x22; 32],
		era_block_hash: [0x22; 32],
	};
	let payload = controller.signing_payload(&call, &extra, &ctx);

	let context_len = 4 + 4 + 32 + 32;
	let (head, tail) = payload.split_at(payload.len() - context_len);
	assert_eq!(&tail[..4], &9122u32.to_le_bytes());
	assert_eq!(&tail[4..8], &7u32.to_le_bytes());
	assert_eq!(&tail[8..40], &[0x22; 32]);
	assert_eq!(&tail[40..], &[0x22; 32]);
	// head is call ++ era ++ nonce ++ tip; immortal era is one zero byte
	assert_eq!(&head[..2], &[4, 0]);
	assert_eq!(&head[head.len() - 3..], &[0x00, 0x00, 0x00]);
}

#[test]
fn argument_counts_are_checked_before_encoding() {
	let raw = subwire_legacy::test_suite::raw_v11();
	let dec = decorator(&raw);
	let controller = TxController::new(&dec);

	let result = controller.call("Balances", "transfer", &transfer_schema(), &transfer_args(1)[..1]);
	assert!(matches!(result, Err(subwire::Error::BadArgumentCount { expected: 2, got: 1, .. })));
}

#[test]
fn arguments_must_fit_the_schema() {
	let raw = subwire_legacy::test_suite::raw_v11();
	let dec = decorator(&raw);
	let controller = TxController::new(&dec);

	let args = vec![Value::Bool(true), Value::Compact(1)];
	let result = controller.call("Balances", "transfer", &transfer_schema(), &args);
	assert!(matches!(result, Err(subwire::Error::ArgumentMismatch { index: 0, .. })));
}

#[test]
fn unknown_calls_surface_the_lookup_error() {
	let raw = subwire_legacy::test_suite::raw_v11();
	let dec = decorator(&raw);
	let controller = TxController::new(&dec);

	let result = controller.call("Balances", "burn", &[], &[]);
	assert!(matches!(result, Err(subwire::Error::Lookup(_))));
}
