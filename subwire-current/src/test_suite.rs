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

//! A hand-encoded v14 fixture describing the same cut-down Polkadot runtime
//! as the subwire-legacy fixtures, so cross-version tests can compare the
//! decoded views. Pallet indices match the v13 fixture (Balances is 4).

use crate::types::META_RESERVED;
use subwire_scale::encode;

// Registry ids, contiguous like scale-info would emit them.
const U8: u32 = 0;
const U32: u32 = 1;
const U64: u32 = 2;
const U128: u32 = 3;
const BYTES: u32 = 4;
const ACCOUNT_ID: u32 = 5;
const HASH: u32 = 6;
const MULTI_ADDRESS: u32 = 7;
const COMPACT_U128: u32 = 8;
const BALANCES_CALL: u32 = 9;
const SYSTEM_CALL: u32 = 10;
const SCHEDULER_CALL: u32 = 11;
const PREIMAGE_CALL: u32 = 12;
const TIMESTAMP_CALL: u32 = 13;
const COMPACT_U64: u32 = 14;
const ACCOUNT_DATA: u32 = 15;
const ACCOUNT_INFO: u32 = 16;
const RUNTIME: u32 = 17;
const SYSTEM_EVENT: u32 = 18;
const BALANCES_EVENT: u32 = 19;
const EXTRINSIC: u32 = 20;
const HASH_VEC: u32 = 21;
const ADDRESS_20: u32 = 22;
const LOCK_KEY: u32 = 23;
const SYSTEM_ERROR: u32 = 24;
const BALANCES_ERROR: u32 = 25;

/// Id of the outermost runtime type in [`raw_v14`].
pub const RUNTIME_TY: u32 = RUNTIME;

type Field<'a> = (Option<&'a str>, u32, Option<&'a str>);

pub fn raw_v14() -> Vec<u8> {
	let mut out = Vec::new();
	encode::encode_u32(META_RESERVED, &mut out);
	out.push(14);
	registry(&mut out);
	pallets(&mut out);
	extrinsic(&mut out);
	encode::encode_compact_to(u128::from(RUNTIME_TY), &mut out);
	out
}

fn compact(value: u32, out: &mut Vec<u8>) {
	encode::encode_compact_to(u128::from(value), out);
}

fn strs(items: &[&str], out: &mut Vec<u8>) {
	compact(items.len() as u32, out);
	for item in items {
		encode::encode_str(item, out);
	}
}

fn option_str(value: Option<&str>, out: &mut Vec<u8>) {
	match value {
		None => out.push(0x00),
		Some(s) => {
			out.push(0x01);
			encode::encode_str(s, out);
		}
	}
}

/// One registry entry: id, path, no params, the def, no docs.
fn entry(id: u32, path: &[&str], def: impl FnOnce(&mut Vec<u8>), out: &mut Vec<u8>) {
	compact(id, out);
	strs(path, out);
	compact(0, out); // type_params
	def(out);
	strs(&[], out); // docs
}

fn primitive(tag: u8) -> impl FnOnce(&mut Vec<u8>) {
	move |out: &mut Vec<u8>| {
		out.push(5);
		out.push(tag);
	}
}

fn fields(items: &[Field], out: &mut Vec<u8>) {
	compact(items.len() as u32, out);
	for (name, ty, type_name) in items {
		option_str(*name, out);
		compact(*ty, out);
		option_str(*type_name, out);
		strs(&[], out);
	}
}

fn composite<'a>(items: &'a [Field<'a>]) -> impl FnOnce(&mut Vec<u8>) + 'a {
	move |out: &mut Vec<u8>| {
		out.push(0);
		fields(items, out);
	}
}

fn variant<'a>(variants: &'a [(&'a str, &'a [Field<'a>], u8)]) -> impl FnOnce(&mut Vec<u8>) + 'a {
	move |out: &mut Vec<u8>| {
		out.push(1);
		compact(variants.len() as u32, out);
		for (name, fs, index) in variants {
			encode::encode_str(name, out);
			fields(fs, out);
			out.push(*index);
			strs(&[], out);
		}
	}
}

fn sequence(ty: u32) -> impl FnOnce(&mut Vec<u8>) {
	move |out: &mut Vec<u8>| {
		out.push(2);
		compact(ty, out);
	}
}

fn array(len: u32, ty: u32) -> impl FnOnce(&mut Vec<u8>) {
	move |out: &mut Vec<u8>| {
		out.push(3);
		encode::encode_u32(len, out);
		compact(ty, out);
	}
}

fn tuple(ids: &[u32]) -> impl FnOnce(&mut Vec<u8>) + '_ {
	move |out: &mut Vec<u8>| {
		out.push(4);
		compact(ids.len() as u32, out);
		for id in ids {
			compact(*id, out);
		}
	}
}

fn compact_def(ty: u32) -> impl FnOnce(&mut Vec<u8>) {
	move |out: &mut Vec<u8>| {
		out.push(6);
		compact(ty, out);
	}
}

fn registry(out: &mut Vec<u8>) {
	compact(26, out); // entry count

	entry(U8, &[], primitive(3), out);
	entry(U32, &[], primitive(5), out);
	entry(U64, &[], primitive(6), out);
	entry(U128, &[], primitive(7), out);
	entry(BYTES, &[], sequence(U8), out);
	entry(
		ACCOUNT_ID,
		&["sp_core", "crypto", "AccountId32"],
		composite(&[(None, HASH, Some("[u8; 32]"))]),
		out,
	);
	entry(HASH, &[], array(32, U8), out);
	entry(
		MULTI_ADDRESS,
		&["sp_runtime", "multiaddress", "MultiAddress"],
		variant(&[
			("Id", &[(None, ACCOUNT_ID, None)], 0),
			("Address20", &[(None, ADDRESS_20, None)], 4),
		]),
		out,
	);
	entry(COMPACT_U128, &[], compact_def(U128), out);
	entry(
		BALANCES_CALL,
		&["pallet_balances", "pallet", "Call"],
		variant(&[
			(
				"transfer",
				&[
					(Some("dest"), MULTI_ADDRESS, Some("AccountIdLookupOf<T>")),
					(Some("value"), COMPACT_U128, Some("T::Balance")),
				],
				0,
			),
			(
				"set_balance",
				&[
					(Some("who"), MULTI_ADDRESS, Some("AccountIdLookupOf<T>")),
					(Some("new_free"), COMPACT_U128, Some("T::Balance")),
					(Some("new_reserved"), COMPACT_U128, Some("T::Balance")),
				],
				1,
			),
		]),
		out,
	);
	entry(
		SYSTEM_CALL,
		&["frame_system", "pallet", "Call"],
		variant(&[("remark", &[(Some("remark"), BYTES, Some("Vec<u8>"))], 0)]),
		out,
	);
	entry(
		SCHEDULER_CALL,
		&["pallet_scheduler", "pallet", "Call"],
		variant(&[(
			"cancel",
			&[(Some("when"), U32, Some("T::BlockNumber")), (Some("index"), U32, Some("u32"))],
			0,
		)]),
		out,
	);
	entry(
		PREIMAGE_CALL,
		&["pallet_preimage", "pallet", "Call"],
		variant(&[("note_preimage", &[(Some("bytes"), BYTES, Some("Vec<u8>"))], 0)]),
		out,
	);
	entry(
		TIMESTAMP_CALL,
		&["pallet_timestamp", "pallet", "Call"],
		variant(&[("set", &[(Some("now"), COMPACT_U64, Some("T::Moment"))], 0)]),
		out,
	);
	entry(COMPACT_U64, &[], compact_def(U64), out);
	entry(
		ACCOUNT_DATA,
		&["pallet_balances", "AccountData"],
		composite(&[(Some("free"), U128, Some("Balance")), (Some("reserved"), U128, Some("Balance"))]),
		out,
	);
	entry(
		ACCOUNT_INFO,
		&["frame_system", "AccountInfo"],
		composite(&[(Some("nonce"), U32, Some("Index")), (Some("data"), ACCOUNT_DATA, Some("AccountData"))]),
		out,
	);
	entry(RUNTIME, &["polkadot_runtime", "Runtime"], composite(&[]), out);
	entry(
		SYSTEM_EVENT,
		&["frame_system", "pallet", "Event"],
		variant(&[("ExtrinsicSuccess", &[], 0)]),
		out,
	);
	entry(
		BALANCES_EVENT,
		&["pallet_balances", "pallet", "Event"],
		variant(&[(
			"Transfer",
			&[
				(Some("from"), ACCOUNT_ID, Some("T::AccountId")),
				(Some("to"), ACCOUNT_ID, Some("T::AccountId")),
				(Some("amount"), U128, Some("T::Balance")),
			],
			2,
		)]),
		out,
	);
	entry(
		EXTRINSIC,
		&["sp_runtime", "generic", "unchecked_extrinsic", "UncheckedExtrinsic"],
		composite(&[]),
		out,
	);
	entry(HASH_VEC, &[], sequence(HASH), out);
	entry(ADDRESS_20, &[], array(20, U8), out);
	entry(LOCK_KEY, &[], tuple(&[ACCOUNT_ID, U8]), out);
	entry(
		SYSTEM_ERROR,
		&["frame_system", "pallet", "Error"],
		variant(&[("InvalidSpecName", &[], 0)]),
		out,
	);
	entry(
		BALANCES_ERROR,
		&["pallet_balances", "pallet", "Error"],
		variant(&[("InsufficientBalance", &[], 0)]),
		out,
	);
}

fn option_ty(value: Option<u32>, out: &mut Vec<u8>) {
	match value {
		None => out.push(0x00),
		Some(id) => {
			out.push(0x01);
			compact(id, out);
		}
	}
}

fn plain_entry(name: &str, ty: u32, out: &mut Vec<u8>) {
	encode::encode_str(name, out);
	out.push(1); // Default
	out.push(0); // Plain
	compact(ty, out);
	encode::encode_bytes(&[0], out);
	strs(&[], out);
}

fn map_entry(name: &str, hashers: &[u8], key: u32, value: u32, out: &mut Vec<u8>) {
	encode::encode_str(name, out);
	out.push(1); // Default
	out.push(1); // Map
	compact(hashers.len() as u32, out);
	out.extend_from_slice(hashers);
	compact(key, out);
	compact(value, out);
	encode::encode_bytes(&[0], out);
	strs(&[], out);
}

fn constant(name: &str, ty: u32, value: &[u8], out: &mut Vec<u8>) {
	encode::encode_str(name, out);
	compact(ty, out);
	encode::encode_bytes(value, out);
	strs(&[], out);
}

#[allow(clippy::too_many_arguments)]
fn pallet(
	name: &str,
	storage: Option<(&str, &dyn Fn(&mut Vec<u8>))>,
	calls: Option<u32>,
	event: Option<u32>,
	constants: &dyn Fn(&mut Vec<u8>),
	error: Option<u32>,
	index: u8,
	out: &mut Vec<u8>,
) {
	encode::encode_str(name, out);
	match storage {
		None => out.push(0x00),
		Some((prefix, entries)) => {
			out.push(0x01);
			encode::encode_str(prefix, out);
			entries(out);
		}
	}
	option_ty(calls, out);
	option_ty(event, out);
	constants(out);
	option_ty(error, out);
	out.push(index);
}

fn pallets(out: &mut Vec<u8>) {
	compact(6, out);

	pallet(
		"System",
		Some((
			"System",
			&|out| {
				compact(2, out);
				map_entry("Account", &[2], ACCOUNT_ID, ACCOUNT_INFO, out);
				map_entry("AccountLocks", &[2, 5], LOCK_KEY, ACCOUNT_DATA, out);
			},
		)),
		Some(SYSTEM_CALL),
		Some(SYSTEM_EVENT),
		&|out| {
			compact(1, out);
			constant("BlockHashCount", U32, &2400u32.to_le_bytes(), out);
		},
		Some(SYSTEM_ERROR),
		0,
		out,
	);

	pallet("Scheduler", None, Some(SCHEDULER_CALL), None, &|out| compact(0, out), None, 1, out);
	pallet("Preimage", None, Some(PREIMAGE_CALL), None, &|out| compact(0, out), None, 2, out);

	pallet(
		"Timestamp",
		Some((
			"Timestamp",
			&|out| {
				compact(1, out);
				plain_entry("Now", U64, out);
			},
		)),
		Some(TIMESTAMP_CALL),
		None,
		&|out| {
			compact(1, out);
			constant("MinimumPeriod", U64, &3000u64.to_le_bytes(), out);
		},
		None,
		3,
		out,
	);

	pallet(
		"RandomnessCollectiveFlip",
		Some((
			"RandomnessCollectiveFlip",
			&|out| {
				compact(1, out);
				plain_entry("RandomMaterial", HASH_VEC, out);
			},
		)),
		None,
		None,
		&|out| compact(0, out),
		None,
		33,
		out,
	);

	pallet(
		"Balances",
		Some((
			"Balances",
			&|out| {
				compact(2, out);
				plain_entry("TotalIssuance", U128, out);
				map_entry("Account", &[2], ACCOUNT_ID, ACCOUNT_DATA, out);
			},
		)),
		Some(BALANCES_CALL),
		Some(BALANCES_EVENT),
		&|out| {
			compact(1, out);
			constant("ExistentialDeposit", U128, &500u128.to_le_bytes(), out);
		},
		Some(BALANCES_ERROR),
		4,
		out,
	);
}

fn extrinsic(out: &mut Vec<u8>) {
	compact(EXTRINSIC, out);
	out.push(4); // extrinsic format version
	compact(2, out); // signed extensions
	for identifier in ["CheckEra", "CheckNonce"] {
		encode::encode_str(identifier, out);
		compact(RUNTIME, out);
		compact(RUNTIME, out);
	}
}
