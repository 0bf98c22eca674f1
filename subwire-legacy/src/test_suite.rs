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

//! Hand-encoded metadata fixtures shaped like a cut-down Polkadot runtime.
//!
//! Module order matters: RandomnessCollectiveFlip has no dispatchables and
//! sits before Balances, so the v11 positional call index of Balances (4)
//! matches the explicit v13 index and exercises the skip-non-callable rule.

use crate::types::META_RESERVED;
use subwire_scale::encode;

const V11: u8 = 11;
const V13: u8 = 13;

pub fn raw_v11() -> Vec<u8> {
	raw(V11)
}

pub fn raw_v13() -> Vec<u8> {
	raw(V13)
}

/// A v11 blob smuggling in a v13-only NMap storage entry. Must be rejected.
pub fn raw_v11_with_nmap() -> Vec<u8> {
	let mut out = prefix(V11);
	encode::encode_compact_to(1, &mut out);
	encode::encode_str("System", &mut out);
	// storage: Some, one NMap entry (tag 3, unknown to v11)
	out.push(0x01);
	encode::encode_str("System", &mut out);
	encode::encode_compact_to(1, &mut out);
	encode::encode_str("AccountLocks", &mut out);
	out.push(1); // Default
	out.push(3); // NMap tag
	strs(&["T::AccountId", "LockId"], &mut out);
	encode::encode_compact_to(2, &mut out);
	out.extend_from_slice(&[2, 5]); // Blake2_128Concat, Twox64Concat
	encode::encode_str("BalanceLock", &mut out);
	encode::encode_bytes(&[0], &mut out);
	strs(&[], &mut out);
	// calls, event: None; constants, errors: empty
	out.extend_from_slice(&[0x00, 0x00]);
	encode::encode_compact_to(0, &mut out);
	encode::encode_compact_to(0, &mut out);
	extrinsic(&mut out);
	out
}

fn raw(version: u8) -> Vec<u8> {
	let mut out = prefix(version);
	encode::encode_compact_to(6, &mut out);
	system(version, &mut out);
	scheduler(version, &mut out);
	preimage(version, &mut out);
	timestamp(version, &mut out);
	randomness(version, &mut out);
	balances(version, &mut out);
	extrinsic(&mut out);
	out
}

fn prefix(version: u8) -> Vec<u8> {
	let mut out = Vec::new();
	encode::encode_u32(META_RESERVED, &mut out);
	out.push(version);
	out
}

fn extrinsic(out: &mut Vec<u8>) {
	out.push(4);
	strs(&["CheckEra", "CheckNonce"], out);
}

fn strs(items: &[&str], out: &mut Vec<u8>) {
	encode::encode_compact_to(items.len() as u128, out);
	for item in items {
		encode::encode_str(item, out);
	}
}

fn plain_entry(name: &str, ty: &str, out: &mut Vec<u8>) {
	encode::encode_str(name, out);
	out.push(1); // Default
	out.push(0); // Plain
	encode::encode_str(ty, out);
	encode::encode_bytes(&[0], out);
	strs(&[], out);
}

fn map_entry(name: &str, hasher: u8, key: &str, value: &str, out: &mut Vec<u8>) {
	encode::encode_str(name, out);
	out.push(1); // Default
	out.push(1); // Map
	out.push(hasher);
	encode::encode_str(key, out);
	encode::encode_str(value, out);
	encode::encode_bool(false, out);
	encode::encode_bytes(&[0], out);
	strs(&[], out);
}

fn call(name: &str, args: &[(&str, &str)], out: &mut Vec<u8>) {
	encode::encode_str(name, out);
	encode::encode_compact_to(args.len() as u128, out);
	for (arg, ty) in args {
		encode::encode_str(arg, out);
		encode::encode_str(ty, out);
	}
	strs(&[], out);
}

fn event(name: &str, args: &[&str], out: &mut Vec<u8>) {
	encode::encode_str(name, out);
	strs(args, out);
	strs(&[], out);
}

fn constant(name: &str, ty: &str, value: &[u8], out: &mut Vec<u8>) {
	encode::encode_str(name, out);
	encode::encode_str(ty, out);
	encode::encode_bytes(value, out);
	strs(&[], out);
}

fn error(name: &str, out: &mut Vec<u8>) {
	encode::encode_str(name, out);
	strs(&[], out);
}

fn index(version: u8, value: u8, out: &mut Vec<u8>) {
	if version >= 12 {
		out.push(value);
	}
}

fn system(version: u8, out: &mut Vec<u8>) {
	encode::encode_str("System", out);

	out.push(0x01); // storage: Some
	encode::encode_str("System", out);
	let entry_count = if version >= V13 { 3 } else { 2 };
	encode::encode_compact_to(entry_count, out);
	map_entry("Account", 2, "T::AccountId", "AccountInfo<T::Index, T::AccountData>", out);
	// DoubleMap keeps the tag-2 path exercised
	encode::encode_str("EventTopics", out);
	out.push(1); // Default
	out.push(2); // DoubleMap
	out.push(5); // Twox64Concat
	encode::encode_str("()", out);
	encode::encode_str("T::Hash", out);
	encode::encode_str("Vec<(T::BlockNumber, EventIndex)>", out);
	out.push(2); // Blake2_128Concat
	encode::encode_bytes(&[0], out);
	strs(&[], out);
	if version >= V13 {
		encode::encode_str("AccountLocks", out);
		out.push(1); // Default
		out.push(3); // NMap
		strs(&["T::AccountId", "LockId"], out);
		encode::encode_compact_to(2, out);
		out.extend_from_slice(&[2, 5]); // Blake2_128Concat, Twox64Concat
		encode::encode_str("BalanceLock", out);
		encode::encode_bytes(&[0], out);
		strs(&[], out);
	}

	out.push(0x01); // calls: Some
	encode::encode_compact_to(1, out);
	call("remark", &[("_remark", "Vec<u8>")], out);

	out.push(0x01); // event: Some
	encode::encode_compact_to(1, out);
	event("ExtrinsicSuccess", &["DispatchInfo"], out);

	encode::encode_compact_to(1, out);
	constant("BlockHashCount", "T::BlockNumber", &2400u32.to_le_bytes(), out);

	encode::encode_compact_to(1, out);
	error("InvalidSpecName", out);

	index(version, 0, out);
}

fn scheduler(version: u8, out: &mut Vec<u8>) {
	encode::encode_str("Scheduler", out);
	out.push(0x00); // storage: None
	out.push(0x01); // calls: Some
	encode::encode_compact_to(1, out);
	call("cancel", &[("when", "T::BlockNumber"), ("index", "u32")], out);
	out.push(0x00); // event: None
	encode::encode_compact_to(0, out);
	encode::encode_compact_to(0, out);
	index(version, 1, out);
}

fn preimage(version: u8, out: &mut Vec<u8>) {
	encode::encode_str("Preimage", out);
	out.push(0x00);
	out.push(0x01);
	encode::encode_compact_to(1, out);
	call("note_preimage", &[("bytes", "Vec<u8>")], out);
	out.push(0x00);
	encode::encode_compact_to(0, out);
	encode::encode_compact_to(0, out);
	index(version, 2, out);
}

fn timestamp(version: u8, out: &mut Vec<u8>) {
	encode::encode_str("Timestamp", out);

	out.push(0x01);
	encode::encode_str("Timestamp", out);
	encode::encode_compact_to(1, out);
	plain_entry("Now", "T::Moment", out);

	out.push(0x01);
	encode::encode_compact_to(1, out);
	call("set", &[("now", "Compact<T::Moment>")], out);

	out.push(0x00);

	encode::encode_compact_to(1, out);
	constant("MinimumPeriod", "T::Moment", &3000u64.to_le_bytes(), out);

	encode::encode_compact_to(0, out);
	index(version, 3, out);
}

// No dispatchables: the v11 positional call counter must skip it.
fn randomness(version: u8, out: &mut Vec<u8>) {
	encode::encode_str("RandomnessCollectiveFlip", out);

	out.push(0x01);
	encode::encode_str("RandomnessCollectiveFlip", out);
	encode::encode_compact_to(1, out);
	plain_entry("RandomMaterial", "Vec<T::Hash>", out);

	out.push(0x00); // calls: None
	out.push(0x00);
	encode::encode_compact_to(0, out);
	encode::encode_compact_to(0, out);
	index(version, 33, out);
}

fn balances(version: u8, out: &mut Vec<u8>) {
	encode::encode_str("Balances", out);

	out.push(0x01);
	encode::encode_str("Balances", out);
	encode::encode_compact_to(2, out);
	plain_entry("TotalIssuance", "T::Balance", out);
	map_entry("Account", 2, "T::AccountId", "AccountData<T::Balance>", out);

	out.push(0x01);
	encode::encode_compact_to(2, out);
	call(
		"transfer",
		&[("dest", "<T::Lookup as StaticLookup>::Source"), ("value", "Compact<T::Balance>")],
		out,
	);
	call(
		"set_balance",
		&[
			("who", "<T::Lookup as StaticLookup>::Source"),
			("new_free", "Compact<T::Balance>"),
			("new_reserved", "Compact<T::Balance>"),
		],
		out,
	);

	out.push(0x01);
	encode::encode_compact_to(1, out);
	event("Transfer", &["T::AccountId", "T::AccountId", "T::Balance"], out);

	encode::encode_compact_to(1, out);
	constant("ExistentialDeposit", "T::Balance", &500u128.to_le_bytes(), out);

	encode::encode_compact_to(1, out);
	error("InsufficientBalance", out);

	index(version, 4, out);
}
