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

//! The decoded shape of v14 metadata. Wherever a runtime type is referenced
//! (call enums, storage keys, constants) the tree stores a `u32` id into the
//! portable type registry; compact on the wire, plain here.

use crate::registry::TypeRegistry;
use serde::Serialize;

/// "meta", little endian.
pub const META_RESERVED: u32 = 0x6174_656d;

#[derive(Debug, Serialize)]
pub struct MetadataV14 {
	pub types: TypeRegistry,
	pub pallets: Vec<PalletMetadata>,
	pub extrinsic: ExtrinsicMetadata,
	/// Id of the outermost runtime type.
	pub runtime_type: u32,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PalletMetadata {
	pub name: String,
	pub storage: Option<StorageMetadata>,
	/// Registry id of the pallet's call enum, when it has dispatchables.
	pub calls: Option<u32>,
	/// Registry id of the pallet's event enum.
	pub event: Option<u32>,
	pub constants: Vec<PalletConstantMetadata>,
	/// Registry id of the pallet's error enum.
	pub error: Option<u32>,
	pub index: u8,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StorageMetadata {
	pub prefix: String,
	pub entries: Vec<StorageEntryMetadata>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StorageEntryMetadata {
	pub name: String,
	pub modifier: StorageEntryModifier,
	pub ty: StorageEntryType,
	pub default: Vec<u8>,
	pub docs: Vec<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum StorageEntryModifier {
	Optional,
	Default,
}

/// v14 collapsed the map/double-map/n-map zoo into one `Map` shape with a
/// hasher list; a single-key map has one hasher, an n-map has n.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub enum StorageEntryType {
	Plain(u32),
	Map { hashers: Vec<StorageHasher>, key: u32, value: u32 },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum StorageHasher {
	Blake2_128,
	Blake2_256,
	Blake2_128Concat,
	Twox128,
	Twox256,
	Twox64Concat,
	Identity,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PalletConstantMetadata {
	pub name: String,
	pub ty: u32,
	pub value: Vec<u8>,
	pub docs: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ExtrinsicMetadata {
	pub ty: u32,
	pub version: u8,
	pub signed_extensions: Vec<SignedExtensionMetadata>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SignedExtensionMetadata {
	pub identifier: String,
	pub ty: u32,
	pub additional_signed: u32,
}

/// One entry of the portable registry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SiType {
	pub path: Vec<String>,
	pub type_params: Vec<SiTypeParameter>,
	pub type_def: TypeDef,
	pub docs: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SiTypeParameter {
	pub name: String,
	pub ty: Option<u32>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub enum TypeDef {
	Composite(Vec<SiField>),
	Variant(Vec<SiVariant>),
	Sequence(u32),
	Array { len: u32, ty: u32 },
	Tuple(Vec<u32>),
	Primitive(SiPrimitive),
	Compact(u32),
	BitSequence { bit_store: u32, bit_order: u32 },
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SiField {
	pub name: Option<String>,
	pub ty: u32,
	pub type_name: Option<String>,
	pub docs: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SiVariant {
	pub name: String,
	pub fields: Vec<SiField>,
	pub index: u8,
	pub docs: Vec<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum SiPrimitive {
	Bool,
	Char,
	Str,
	U8,
	U16,
	U32,
	U64,
	U128,
	U256,
	I8,
	I16,
	I32,
	I64,
	I128,
	I256,
}
