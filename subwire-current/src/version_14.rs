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

use crate::error::MetadataError;
use crate::registry::TypeRegistry;
use crate::types::*;
use std::collections::BTreeMap;
use subwire_scale::{CodecError, Cursor};

/// Decodes a complete v14 metadata blob, magic prefix included. The whole
/// input must be consumed.
pub fn decode(bytes: &[u8]) -> Result<MetadataV14, MetadataError> {
	let mut cursor = Cursor::new(bytes);

	let magic = cursor.next_u32()?;
	if magic != META_RESERVED {
		return Err(MetadataError::BadMagic(magic));
	}
	let version = cursor.next_u8()?;
	if version != 14 {
		return Err(MetadataError::WrongVersion { expected: 14, got: version });
	}

	let types = decode_registry(&mut cursor)?;
	let pallets = cursor.next_sequence(decode_pallet)?;
	let extrinsic = decode_extrinsic(&mut cursor)?;
	let runtime_type = next_ty(&mut cursor)?;
	cursor.finish()?;

	Ok(MetadataV14 { types, pallets, extrinsic, runtime_type })
}

/// Type ids are compact on the wire.
fn next_ty(cursor: &mut Cursor) -> Result<u32, MetadataError> {
	let offset = cursor.offset();
	let id = cursor.next_compact()?;
	u32::try_from(id).map_err(|_| CodecError::CompactOutOfRange(offset).into())
}

fn decode_registry(cursor: &mut Cursor) -> Result<TypeRegistry, MetadataError> {
	let entries: Vec<(u32, SiType)> = cursor.next_sequence(|c| {
		let id = next_ty(c)?;
		let ty = decode_si_type(c)?;
		Ok::<_, MetadataError>((id, ty))
	})?;
	log::trace!("portable registry holds {} types", entries.len());
	Ok(TypeRegistry::new(entries.into_iter().collect::<BTreeMap<_, _>>()))
}

fn decode_si_type(cursor: &mut Cursor) -> Result<SiType, MetadataError> {
	let path = cursor.next_str_vec()?;
	let type_params = cursor.next_sequence(|c| {
		Ok::<_, MetadataError>(SiTypeParameter {
			name: c.next_str()?,
			ty: c.next_option(next_ty)?,
		})
	})?;
	let type_def = decode_type_def(cursor)?;
	let docs = cursor.next_str_vec()?;
	Ok(SiType { path, type_params, type_def, docs })
}

fn decode_type_def(cursor: &mut Cursor) -> Result<TypeDef, MetadataError> {
	let tag = cursor.next_u8()?;
	match tag {
		0 => Ok(TypeDef::Composite(cursor.next_sequence(decode_field)?)),
		1 => Ok(TypeDef::Variant(cursor.next_sequence(decode_variant)?)),
		2 => Ok(TypeDef::Sequence(next_ty(cursor)?)),
		// the array length is a plain u32, not compact
		3 => Ok(TypeDef::Array { len: cursor.next_u32()?, ty: next_ty(cursor)? }),
		4 => Ok(TypeDef::Tuple(cursor.next_sequence(next_ty)?)),
		5 => Ok(TypeDef::Primitive(decode_primitive(cursor)?)),
		6 => Ok(TypeDef::Compact(next_ty(cursor)?)),
		7 => Ok(TypeDef::BitSequence { bit_store: next_ty(cursor)?, bit_order: next_ty(cursor)? }),
		tag => Err(MetadataError::UnknownTypeDef(tag)),
	}
}

fn decode_field(cursor: &mut Cursor) -> Result<SiField, MetadataError> {
	Ok(SiField {
		name: cursor.next_option(|c| c.next_str())?,
		ty: next_ty(cursor)?,
		type_name: cursor.next_option(|c| c.next_str())?,
		docs: cursor.next_str_vec()?,
	})
}

fn decode_variant(cursor: &mut Cursor) -> Result<SiVariant, MetadataError> {
	Ok(SiVariant {
		name: cursor.next_str()?,
		fields: cursor.next_sequence(decode_field)?,
		index: cursor.next_u8()?,
		docs: cursor.next_str_vec()?,
	})
}

fn decode_primitive(cursor: &mut Cursor) -> Result<SiPrimitive, MetadataError> {
	match cursor.next_u8()? {
		0 => Ok(SiPrimitive::Bool),
		1 => Ok(SiPrimitive::Char),
		2 => Ok(SiPrimitive::Str),
		3 => Ok(SiPrimitive::U8),
		4 => Ok(SiPrimitive::U16),
		5 => Ok(SiPrimitive::U32),
		6 => Ok(SiPrimitive::U64),
		7 => Ok(SiPrimitive::U128),
		8 => Ok(SiPrimitive::U256),
		9 => Ok(SiPrimitive::I8),
		10 => Ok(SiPrimitive::I16),
		11 => Ok(SiPrimitive::I32),
		12 => Ok(SiPrimitive::I64),
		13 => Ok(SiPrimitive::I128),
		14 => Ok(SiPrimitive::I256),
		tag => Err(MetadataError::UnknownPrimitive(tag)),
	}
}

fn decode_pallet(cursor: &mut Cursor) -> Result<PalletMetadata, MetadataError> {
	let name = cursor.next_str()?;
	log::trace!("decoding pallet {}", name);

	let storage = cursor.next_option(decode_storage)?;
	let calls = cursor.next_option(next_ty)?;
	let event = cursor.next_option(next_ty)?;
	let constants = cursor.next_sequence(decode_constant)?;
	let error = cursor.next_option(next_ty)?;
	let index = cursor.next_u8()?;

	Ok(PalletMetadata { name, storage, calls, event, constants, error, index })
}

fn decode_storage(cursor: &mut Cursor) -> Result<StorageMetadata, MetadataError> {
	let prefix = cursor.next_str()?;
	let entries = cursor.next_sequence(decode_storage_entry)?;
	Ok(StorageMetadata { prefix, entries })
}

fn decode_storage_entry(cursor: &mut Cursor) -> Result<StorageEntryMetadata, MetadataError> {
	let name = cursor.next_str()?;
	let modifier = match cursor.next_u8()? {
		0 => StorageEntryModifier::Optional,
		1 => StorageEntryModifier::Default,
		tag => return Err(MetadataError::UnknownModifier(tag)),
	};
	let ty = match cursor.next_u8()? {
		0 => StorageEntryType::Plain(next_ty(cursor)?),
		1 => StorageEntryType::Map {
			hashers: cursor.next_sequence(decode_hasher)?,
			key: next_ty(cursor)?,
			value: next_ty(cursor)?,
		},
		tag => return Err(MetadataError::UnknownStorageType(tag)),
	};
	let default = cursor.next_bytes()?.to_vec();
	let docs = cursor.next_str_vec()?;
	Ok(StorageEntryMetadata { name, modifier, ty, default, docs })
}

fn decode_hasher(cursor: &mut Cursor) -> Result<StorageHasher, MetadataError> {
	match cursor.next_u8()? {
		0 => Ok(StorageHasher::Blake2_128),
		1 => Ok(StorageHasher::Blake2_256),
		2 => Ok(StorageHasher::Blake2_128Concat),
		3 => Ok(StorageHasher::Twox128),
		4 => Ok(StorageHasher::Twox256),
		5 => Ok(StorageHasher::Twox64Concat),
		6 => Ok(StorageHasher::Identity),
		tag => Err(MetadataError::UnknownHasher(tag)),
	}
}

fn decode_constant(cursor: &mut Cursor) -> Result<PalletConstantMetadata, MetadataError> {
	Ok(PalletConstantMetadata {
		name: cursor.next_str()?,
		ty: next_ty(cursor)?,
		value: cursor.next_bytes()?.to_vec(),
		docs: cursor.next_str_vec()?,
	})
}

fn decode_extrinsic(cursor: &mut Cursor) -> Result<ExtrinsicMetadata, MetadataError> {
	let ty = next_ty(cursor)?;
	let version = cursor.next_u8()?;
	let signed_extensions = cursor.next_sequence(|c| {
		Ok::<_, MetadataError>(SignedExtensionMetadata {
			identifier: c.next_str()?,
			ty: next_ty(c)?,
			additional_signed: next_ty(c)?,
		})
	})?;
	Ok(ExtrinsicMetadata { ty, version, signed_extensions })
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::test_suite;
	use subwire_scale::TypeSpec;

	#[test]
	fn decodes_the_fixture_runtime() {
		let metadata = decode(&test_suite::raw_v14()).unwrap();

		assert_eq!(metadata.extrinsic.version, 4);
		assert_eq!(metadata.runtime_type, test_suite::RUNTIME_TY);

		let indices: Vec<u8> = metadata.pallets.iter().map(|p| p.index).collect();
		assert_eq!(indices, vec![0, 1, 2, 3, 33, 4]);

		let balances = metadata.pallets.iter().find(|p| p.name == "Balances").unwrap();
		assert_eq!(balances.index, 4);

		let calls = metadata.types.variants(balances.calls.unwrap()).unwrap();
		assert_eq!(calls[0].name, "transfer");
		assert_eq!(calls[0].index, 0);
		assert_eq!(calls[0].fields.len(), 2);
	}

	#[test]
	fn storage_maps_carry_hashers_and_ids() {
		let metadata = decode(&test_suite::raw_v14()).unwrap();
		let balances = metadata.pallets.iter().find(|p| p.name == "Balances").unwrap();
		let storage = balances.storage.as_ref().unwrap();
		assert_eq!(storage.prefix, "Balances");

		let account = storage.entries.iter().find(|e| e.name == "Account").unwrap();
		match &account.ty {
			StorageEntryType::Map { hashers, .. } => {
				assert_eq!(hashers, &[StorageHasher::Blake2_128Concat]);
			}
			other => panic!("expected Map, got {:?}", other),
		}
	}

	#[test]
	fn call_argument_types_resolve_through_the_registry() {
		let metadata = decode(&test_suite::raw_v14()).unwrap();
		let balances = metadata.pallets.iter().find(|p| p.name == "Balances").unwrap();
		let calls = metadata.types.variants(balances.calls.unwrap()).unwrap();
		let value_ty = calls[0].fields[1].ty;
		assert_eq!(metadata.types.type_spec(value_ty).unwrap(), TypeSpec::Compact);
	}

	#[test]
	fn rejects_the_wrong_version_byte() {
		let mut raw = test_suite::raw_v14();
		raw[4] = 13;
		assert_eq!(
			decode(&raw).unwrap_err(),
			MetadataError::WrongVersion { expected: 14, got: 13 }
		);
	}

	#[test]
	fn rejects_trailing_bytes() {
		let mut raw = test_suite::raw_v14();
		raw.push(0xFF);
		assert!(matches!(
			decode(&raw),
			Err(MetadataError::Codec(CodecError::TrailingBytes(_)))
		));
	}
}
