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

//! Item decoders shared by the v11 and v13 layouts. The two versions differ
//! only in the explicit pallet index (v13) and the NMap storage shape (v13),
//! so each decoder takes the variation as a flag.

use crate::error::MetadataError;
use crate::types::*;
use subwire_scale::Cursor;

/// Which legacy layout is being decoded.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Layout {
	V11,
	V13,
}

impl Layout {
	fn has_index(self) -> bool {
		self == Layout::V13
	}

	fn allows_nmap(self) -> bool {
		self == Layout::V13
	}
}

/// Checks the leading magic and version byte.
pub(crate) fn decode_prefix(cursor: &mut Cursor, expected: u8) -> Result<(), MetadataError> {
	let magic = cursor.next_u32()?;
	if magic != META_RESERVED {
		return Err(MetadataError::BadMagic(magic));
	}
	let version = cursor.next_u8()?;
	if version != expected {
		return Err(MetadataError::WrongVersion { expected, got: version });
	}
	Ok(())
}

pub(crate) fn decode_module(
	cursor: &mut Cursor,
	layout: Layout,
) -> Result<ModuleMetadata, MetadataError> {
	let name = cursor.next_str()?;
	log::trace!("decoding module {}", name);

	let storage = cursor.next_option(|c| decode_storage(c, layout))?;
	let calls = cursor.next_option(|c| c.next_sequence(decode_function))?;
	let event = cursor.next_option(|c| c.next_sequence(decode_event))?;
	let constants = cursor.next_sequence(decode_constant)?;
	let errors = cursor.next_sequence(decode_error)?;
	// v12 moved the pallet index onto the wire; before that it is positional.
	let index = if layout.has_index() { Some(cursor.next_u8()?) } else { None };

	Ok(ModuleMetadata { name, storage, calls, event, constants, errors, index })
}

fn decode_storage(cursor: &mut Cursor, layout: Layout) -> Result<StorageMetadata, MetadataError> {
	let prefix = cursor.next_str()?;
	let entries = cursor.next_sequence(|c| decode_storage_entry(c, layout))?;
	Ok(StorageMetadata { prefix, entries })
}

fn decode_storage_entry(
	cursor: &mut Cursor,
	layout: Layout,
) -> Result<StorageEntryMetadata, MetadataError> {
	let name = cursor.next_str()?;
	let modifier = decode_modifier(cursor)?;
	let ty = decode_storage_entry_type(cursor, layout)?;
	let default = cursor.next_bytes()?.to_vec();
	let docs = cursor.next_str_vec()?;
	Ok(StorageEntryMetadata { name, modifier, ty, default, docs })
}

fn decode_modifier(cursor: &mut Cursor) -> Result<StorageEntryModifier, MetadataError> {
	match cursor.next_u8()? {
		0 => Ok(StorageEntryModifier::Optional),
		1 => Ok(StorageEntryModifier::Default),
		tag => Err(MetadataError::UnknownModifier(tag)),
	}
}

fn decode_storage_entry_type(
	cursor: &mut Cursor,
	layout: Layout,
) -> Result<StorageEntryType, MetadataError> {
	let tag = cursor.next_u8()?;
	match tag {
		0 => Ok(StorageEntryType::Plain(cursor.next_str()?)),
		1 => Ok(StorageEntryType::Map {
			hasher: decode_hasher(cursor)?,
			key: cursor.next_str()?,
			value: cursor.next_str()?,
			unused: cursor.next_bool()?,
		}),
		2 => Ok(StorageEntryType::DoubleMap {
			hasher: decode_hasher(cursor)?,
			key1: cursor.next_str()?,
			key2: cursor.next_str()?,
			value: cursor.next_str()?,
			key2_hasher: decode_hasher(cursor)?,
		}),
		3 if layout.allows_nmap() => Ok(StorageEntryType::NMap {
			keys: cursor.next_str_vec()?,
			hashers: cursor.next_sequence(decode_hasher)?,
			value: cursor.next_str()?,
		}),
		tag => Err(MetadataError::UnknownStorageType(tag)),
	}
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

fn decode_function(cursor: &mut Cursor) -> Result<FunctionMetadata, MetadataError> {
	let name = cursor.next_str()?;
	let arguments = cursor.next_sequence(|c| {
		Ok::<_, MetadataError>(FunctionArgumentMetadata { name: c.next_str()?, ty: c.next_str()? })
	})?;
	let docs = cursor.next_str_vec()?;
	Ok(FunctionMetadata { name, arguments, docs })
}

fn decode_event(cursor: &mut Cursor) -> Result<EventMetadata, MetadataError> {
	let name = cursor.next_str()?;
	let arguments = cursor.next_str_vec()?;
	let docs = cursor.next_str_vec()?;
	Ok(EventMetadata { name, arguments, docs })
}

fn decode_constant(cursor: &mut Cursor) -> Result<ModuleConstantMetadata, MetadataError> {
	let name = cursor.next_str()?;
	let ty = cursor.next_str()?;
	let value = cursor.next_bytes()?.to_vec();
	let docs = cursor.next_str_vec()?;
	Ok(ModuleConstantMetadata { name, ty, value, docs })
}

fn decode_error(cursor: &mut Cursor) -> Result<ErrorMetadata, MetadataError> {
	let name = cursor.next_str()?;
	let docs = cursor.next_str_vec()?;
	Ok(ErrorMetadata { name, docs })
}

pub(crate) fn decode_extrinsic(cursor: &mut Cursor) -> Result<ExtrinsicMetadata, MetadataError> {
	let version = cursor.next_u8()?;
	let signed_extensions = cursor.next_str_vec()?;
	Ok(ExtrinsicMetadata { version, signed_extensions })
}
