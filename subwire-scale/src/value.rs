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

//! A closed schema ([`TypeSpec`]) and value ([`Value`]) model over the subset
//! of SCALE exercised by supported calls, storage values and constants.
//!
//! The schema drives a discriminated decode with static dispatch; no trait
//! objects sit on the hot path. Call-argument schemas are supplied by the
//! calling protocol layer per operation, since argument names alone are not
//! enough to infer wire order.

use crate::{encode, CodecError, Cursor};
use serde::{Deserialize, Serialize};

/// Wire schema for a single SCALE value.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum TypeSpec {
	U8,
	U16,
	U32,
	U64,
	U128,
	I8,
	I16,
	I32,
	I64,
	I128,
	/// Compact integer of any width up to u128.
	Compact,
	Bool,
	/// Compact-length-prefixed byte string.
	Bytes,
	Str,
	Option(Box<TypeSpec>),
	Sequence(Box<TypeSpec>),
	/// Fixed-size array: no length prefix on the wire.
	Array(usize, Box<TypeSpec>),
	/// Ordered named fields, decoded strictly in declaration order.
	Composite(Vec<(String, TypeSpec)>),
	/// Tagged variants; tags may be sparse (call enums are).
	Enum(Vec<VariantSpec>),
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VariantSpec {
	pub name: String,
	pub index: u8,
	/// `None` for unit variants; multi-field variants use a `Composite`.
	pub fields: Option<TypeSpec>,
}

/// A decoded (or to-be-encoded) SCALE value.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Value {
	U8(u8),
	U16(u16),
	U32(u32),
	U64(u64),
	U128(u128),
	I8(i8),
	I16(i16),
	I32(i32),
	I64(i64),
	I128(i128),
	Compact(u128),
	Bool(bool),
	Bytes(Vec<u8>),
	Str(String),
	Option(Box<Option<Value>>),
	Sequence(Vec<Value>),
	Array(Vec<Value>),
	Composite(Vec<(String, Value)>),
	Variant { name: String, index: u8, value: Option<Box<Value>> },
	/// Pre-encoded bytes spliced into the output verbatim. Used for opaque
	/// wire forms owned by other layers (account ids, hashes).
	Raw(Vec<u8>),
}

impl Value {
	/// Whether this value can be encoded where `spec` is expected.
	/// [`Value::Raw`] conforms to anything: the caller vouches for bytes it
	/// pre-encoded itself.
	pub fn conforms_to(&self, spec: &TypeSpec) -> bool {
		match (self, spec) {
			(Value::Raw(_), _) => true,
			(Value::U8(_), TypeSpec::U8)
			| (Value::U16(_), TypeSpec::U16)
			| (Value::U32(_), TypeSpec::U32)
			| (Value::U64(_), TypeSpec::U64)
			| (Value::U128(_), TypeSpec::U128)
			| (Value::I8(_), TypeSpec::I8)
			| (Value::I16(_), TypeSpec::I16)
			| (Value::I32(_), TypeSpec::I32)
			| (Value::I64(_), TypeSpec::I64)
			| (Value::I128(_), TypeSpec::I128)
			| (Value::Compact(_), TypeSpec::Compact)
			| (Value::Bool(_), TypeSpec::Bool)
			| (Value::Bytes(_), TypeSpec::Bytes)
			| (Value::Str(_), TypeSpec::Str) => true,
			(Value::Option(inner), TypeSpec::Option(spec)) => match inner.as_ref() {
				None => true,
				Some(value) => value.conforms_to(spec),
			},
			(Value::Sequence(items), TypeSpec::Sequence(spec)) => items.iter().all(|v| v.conforms_to(spec)),
			(Value::Array(items), TypeSpec::Array(len, spec)) => {
				items.len() == *len && items.iter().all(|v| v.conforms_to(spec))
			}
			(Value::Composite(fields), TypeSpec::Composite(specs)) => {
				fields.len() == specs.len()
					&& fields
						.iter()
						.zip(specs)
						.all(|((name, value), (spec_name, spec))| name == spec_name && value.conforms_to(spec))
			}
			(Value::Variant { index, value, .. }, TypeSpec::Enum(variants)) => {
				match variants.iter().find(|v| v.index == *index) {
					None => false,
					Some(variant) => match (&variant.fields, value) {
						(None, None) => true,
						(Some(spec), Some(value)) => value.conforms_to(spec),
						_ => false,
					},
				}
			}
			_ => false,
		}
	}
}

/// Decode a single value described by `spec` from the cursor. The bytes
/// consumed by a composite equal the sum of its fields', with no gaps or
/// overlaps; the cursor guarantees that by construction.
pub fn decode_value(cursor: &mut Cursor, spec: &TypeSpec) -> Result<Value, CodecError> {
	let value = match spec {
		TypeSpec::U8 => Value::U8(cursor.next_u8()?),
		TypeSpec::U16 => Value::U16(cursor.next_u16()?),
		TypeSpec::U32 => Value::U32(cursor.next_u32()?),
		TypeSpec::U64 => Value::U64(cursor.next_u64()?),
		TypeSpec::U128 => Value::U128(cursor.next_u128()?),
		TypeSpec::I8 => Value::I8(cursor.next_i8()?),
		TypeSpec::I16 => Value::I16(cursor.next_i16()?),
		TypeSpec::I32 => Value::I32(cursor.next_i32()?),
		TypeSpec::I64 => Value::I64(cursor.next_i64()?),
		TypeSpec::I128 => Value::I128(cursor.next_i128()?),
		TypeSpec::Compact => Value::Compact(cursor.next_compact()?),
		TypeSpec::Bool => Value::Bool(cursor.next_bool()?),
		TypeSpec::Bytes => Value::Bytes(cursor.next_bytes()?.to_vec()),
		TypeSpec::Str => Value::Str(cursor.next_str()?),
		TypeSpec::Option(inner) => {
			Value::Option(Box::new(cursor.next_option(|c| decode_value(c, inner))?))
		}
		TypeSpec::Sequence(inner) => {
			Value::Sequence(cursor.next_sequence(|c| decode_value(c, inner))?)
		}
		TypeSpec::Array(len, inner) => {
			let mut items = Vec::with_capacity(*len);
			for _ in 0..*len {
				items.push(decode_value(cursor, inner)?);
			}
			Value::Array(items)
		}
		TypeSpec::Composite(specs) => {
			// Fields decode strictly in declaration order; none may be
			// skipped or reordered.
			let mut fields = Vec::with_capacity(specs.len());
			for (name, spec) in specs {
				fields.push((name.clone(), decode_value(cursor, spec)?));
			}
			Value::Composite(fields)
		}
		TypeSpec::Enum(variants) => {
			let offset = cursor.offset();
			let tag = cursor.next_u8()?;
			let variant = variants
				.iter()
				.find(|v| v.index == tag)
				.ok_or(CodecError::UnknownEnumTag { offset, tag })?;
			let value = match &variant.fields {
				None => None,
				Some(spec) => Some(Box::new(decode_value(cursor, spec)?)),
			};
			Value::Variant { name: variant.name.clone(), index: variant.index, value }
		}
	};
	Ok(value)
}

/// Append the wire form of `value` to `out`.
pub fn encode_value(value: &Value, out: &mut Vec<u8>) {
	match value {
		Value::U8(v) => encode::encode_u8(*v, out),
		Value::U16(v) => encode::encode_u16(*v, out),
		Value::U32(v) => encode::encode_u32(*v, out),
		Value::U64(v) => encode::encode_u64(*v, out),
		Value::U128(v) => encode::encode_u128(*v, out),
		Value::I8(v) => encode::encode_i8(*v, out),
		Value::I16(v) => encode::encode_i16(*v, out),
		Value::I32(v) => encode::encode_i32(*v, out),
		Value::I64(v) => encode::encode_i64(*v, out),
		Value::I128(v) => encode::encode_i128(*v, out),
		Value::Compact(v) => encode::encode_compact_to(*v, out),
		Value::Bool(v) => encode::encode_bool(*v, out),
		Value::Bytes(v) => encode::encode_bytes(v, out),
		Value::Str(v) => encode::encode_str(v, out),
		Value::Option(inner) => {
			encode::encode_option_with(inner.as_ref().as_ref(), out, |v, out| encode_value(v, out))
		}
		Value::Sequence(items) => {
			encode::encode_sequence_with(items, out, |v, out| encode_value(v, out))
		}
		Value::Array(items) => {
			for item in items {
				encode_value(item, out);
			}
		}
		Value::Composite(fields) => {
			for (_, field) in fields {
				encode_value(field, out);
			}
		}
		Value::Variant { index, value, .. } => {
			out.push(*index);
			if let Some(value) = value {
				encode_value(value, out);
			}
		}
		Value::Raw(bytes) => out.extend_from_slice(bytes),
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use codec::{Compact, Decode, Encode};

	fn balance_transfer_spec() -> TypeSpec {
		TypeSpec::Composite(vec![
			("dest".to_string(), TypeSpec::Array(32, Box::new(TypeSpec::U8))),
			("value".to_string(), TypeSpec::Compact),
		])
	}

	#[test]
	fn composite_consumption_is_the_sum_of_its_fields() {
		let mut data = Vec::new();
		data.extend_from_slice(&[0xAB; 32]);
		data.extend(Compact(1_500_000_000u128).encode());
		data.extend_from_slice(&[0xFF, 0xFF]); // unrelated trailing bytes

		let mut cursor = Cursor::new(&data);
		let value = decode_value(&mut cursor, &balance_transfer_spec()).unwrap();
		assert_eq!(cursor.offset(), data.len() - 2);

		match value {
			Value::Composite(fields) => {
				assert_eq!(fields[0].0, "dest");
				assert_eq!(fields[1].1, Value::Compact(1_500_000_000));
			}
			other => panic!("expected composite, got {:?}", other),
		}
	}

	#[test]
	fn values_round_trip_through_their_own_codec() {
		let spec = TypeSpec::Composite(vec![
			("id".to_string(), TypeSpec::U32),
			("tags".to_string(), TypeSpec::Sequence(Box::new(TypeSpec::Str))),
			("memo".to_string(), TypeSpec::Option(Box::new(TypeSpec::Bytes))),
		]);
		let value = Value::Composite(vec![
			("id".to_string(), Value::U32(7)),
			(
				"tags".to_string(),
				Value::Sequence(vec![Value::Str("a".into()), Value::Str("b".into())]),
			),
			("memo".to_string(), Value::Option(Box::new(Some(Value::Bytes(vec![1, 2, 3]))))),
		]);
		assert!(value.conforms_to(&spec));

		let mut encoded = Vec::new();
		encode_value(&value, &mut encoded);
		let mut cursor = Cursor::new(&encoded);
		let decoded = decode_value(&mut cursor, &spec).unwrap();
		cursor.finish().unwrap();
		assert_eq!(decoded, value);
	}

	#[test]
	fn agrees_with_a_derived_reference_struct() {
		#[derive(Encode, Decode)]
		struct Reference {
			id: u32,
			amount: Compact<u128>,
			active: bool,
		}
		let reference = Reference { id: 99, amount: Compact(1 << 40), active: true }.encode();

		let spec = TypeSpec::Composite(vec![
			("id".to_string(), TypeSpec::U32),
			("amount".to_string(), TypeSpec::Compact),
			("active".to_string(), TypeSpec::Bool),
		]);
		let value = Value::Composite(vec![
			("id".to_string(), Value::U32(99)),
			("amount".to_string(), Value::Compact(1 << 40)),
			("active".to_string(), Value::Bool(true)),
		]);
		let mut ours = Vec::new();
		encode_value(&value, &mut ours);
		assert_eq!(ours, reference);

		let mut cursor = Cursor::new(&reference);
		assert_eq!(decode_value(&mut cursor, &spec).unwrap(), value);
		cursor.finish().unwrap();
	}

	#[test]
	fn sparse_enum_tags_resolve_by_index_not_position() {
		let spec = TypeSpec::Enum(vec![
			VariantSpec { name: "transfer".into(), index: 0, fields: Some(TypeSpec::Compact) },
			VariantSpec { name: "force_transfer".into(), index: 2, fields: None },
		]);

		let mut cursor = Cursor::new(&[0x02]);
		let decoded = decode_value(&mut cursor, &spec).unwrap();
		assert_eq!(decoded, Value::Variant { name: "force_transfer".into(), index: 2, value: None });

		let err = decode_value(&mut Cursor::new(&[0x01]), &spec).unwrap_err();
		assert_eq!(err, CodecError::UnknownEnumTag { offset: 0, tag: 1 });
	}

	#[test]
	fn conformance_is_strict_about_shape_and_names() {
		let spec = balance_transfer_spec();
		let good = Value::Composite(vec![
			("dest".to_string(), Value::Array(vec![Value::U8(0); 32])),
			("value".to_string(), Value::Compact(10)),
		]);
		assert!(good.conforms_to(&spec));

		let wrong_len = Value::Composite(vec![
			("dest".to_string(), Value::Array(vec![Value::U8(0); 31])),
			("value".to_string(), Value::Compact(10)),
		]);
		assert!(!wrong_len.conforms_to(&spec));

		let wrong_name = Value::Composite(vec![
			("destination".to_string(), Value::Array(vec![Value::U8(0); 32])),
			("value".to_string(), Value::Compact(10)),
		]);
		assert!(!wrong_name.conforms_to(&spec));

		// raw bytes conform anywhere: the caller pre-encoded them
		assert!(Value::Raw(vec![0; 33]).conforms_to(&spec));
	}
}
