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

use subwire_scale::CodecError;

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum MetadataError {
	#[error("expected metadata magic 0x6174656d, found {0:#010x}")]
	BadMagic(u32),
	#[error("expected metadata version {expected}, found {got}")]
	WrongVersion { expected: u8, got: u8 },
	#[error("type {0} not found in the portable registry")]
	TypeNotFound(u32),
	#[error("type {0} is part of a reference cycle and cannot be lowered to a wire shape")]
	CyclicType(u32),
	#[error("type {0} is not a variant type")]
	ExpectedVariant(u32),
	#[error("type {id} ({what}) has no wire shape")]
	UnsupportedType { id: u32, what: String },
	#[error("unknown storage hasher tag {0}")]
	UnknownHasher(u8),
	#[error("unknown storage entry type tag {0}")]
	UnknownStorageType(u8),
	#[error("unknown storage entry modifier tag {0}")]
	UnknownModifier(u8),
	#[error("unknown type definition tag {0}")]
	UnknownTypeDef(u8),
	#[error("unknown primitive tag {0}")]
	UnknownPrimitive(u8),
	#[error(transparent)]
	Codec(#[from] CodecError),
}
