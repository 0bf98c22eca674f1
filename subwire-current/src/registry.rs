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

//! Lazy resolution of portable-registry type ids to wire shapes.

use crate::error::MetadataError;
use crate::types::{SiPrimitive, SiType, SiVariant, TypeDef};
use parking_lot::Mutex;
use serde::Serialize;
use std::collections::{BTreeMap, HashMap};
use subwire_scale::{TypeSpec, VariantSpec};

/// The portable type registry of a v14 blob.
///
/// Ids resolve through [`type_spec`](TypeRegistry::type_spec) on demand, and
/// each lowered shape is cached per id so repeated references (every pallet
/// leans on the same handful of primitive and account types) are resolved
/// once. A chain of ids that loops back on itself cannot be expressed as a
/// finite wire shape and is reported as [`MetadataError::CyclicType`].
#[derive(Debug, Default, Serialize)]
pub struct TypeRegistry {
	types: BTreeMap<u32, SiType>,
	#[serde(skip)]
	specs: Mutex<HashMap<u32, TypeSpec>>,
}

impl Clone for TypeRegistry {
	fn clone(&self) -> Self {
		// the lowered-TypeSpec memo is rebuilt on demand
		TypeRegistry { types: self.types.clone(), specs: Mutex::new(HashMap::new()) }
	}
}

impl PartialEq for TypeRegistry {
	fn eq(&self, other: &Self) -> bool {
		self.types == other.types
	}
}

impl TypeRegistry {
	pub fn new(types: BTreeMap<u32, SiType>) -> Self {
		TypeRegistry { types, specs: Mutex::new(HashMap::new()) }
	}

	pub fn len(&self) -> usize {
		self.types.len()
	}

	pub fn is_empty(&self) -> bool {
		self.types.is_empty()
	}

	pub fn get(&self, id: u32) -> Result<&SiType, MetadataError> {
		self.types.get(&id).ok_or(MetadataError::TypeNotFound(id))
	}

	/// The variants of a variant type, in wire order. Call and event enums
	/// go through here.
	pub fn variants(&self, id: u32) -> Result<&[SiVariant], MetadataError> {
		match &self.get(id)?.type_def {
			TypeDef::Variant(variants) => Ok(variants),
			_ => Err(MetadataError::ExpectedVariant(id)),
		}
	}

	/// Lowers a type id to the concrete wire shape used for encoding and
	/// decoding values, memoized per id.
	pub fn type_spec(&self, id: u32) -> Result<TypeSpec, MetadataError> {
		if let Some(spec) = self.specs.lock().get(&id) {
			return Ok(spec.clone());
		}
		let spec = self.lower(id, &mut Vec::new())?;
		self.specs.lock().insert(id, spec.clone());
		Ok(spec)
	}

	fn lower(&self, id: u32, visiting: &mut Vec<u32>) -> Result<TypeSpec, MetadataError> {
		if visiting.contains(&id) {
			return Err(MetadataError::CyclicType(id));
		}
		if let Some(spec) = self.specs.lock().get(&id) {
			return Ok(spec.clone());
		}
		visiting.push(id);
		let spec = self.lower_def(id, visiting)?;
		visiting.pop();
		self.specs.lock().insert(id, spec.clone());
		Ok(spec)
	}

	fn lower_def(&self, id: u32, visiting: &mut Vec<u32>) -> Result<TypeSpec, MetadataError> {
		let ty = self.get(id)?;
		log::trace!("lowering type {} ({})", id, ty.path.join("::"));
		let spec = match &ty.type_def {
			TypeDef::Primitive(prim) => self.lower_primitive(id, *prim)?,
			TypeDef::Compact(_) => TypeSpec::Compact,
			TypeDef::Sequence(inner) => {
				let inner = self.lower(*inner, visiting)?;
				if inner == TypeSpec::U8 {
					TypeSpec::Bytes
				} else {
					TypeSpec::Sequence(Box::new(inner))
				}
			}
			TypeDef::Array { len, ty } => {
				TypeSpec::Array(*len as usize, Box::new(self.lower(*ty, visiting)?))
			}
			TypeDef::Tuple(fields) => {
				// the empty tuple lowers to an empty composite, zero bytes
				let mut lowered = Vec::with_capacity(fields.len());
				for (position, field) in fields.iter().enumerate() {
					lowered.push((position.to_string(), self.lower(*field, visiting)?));
				}
				TypeSpec::Composite(lowered)
			}
			TypeDef::Composite(fields) => {
				let mut lowered = Vec::with_capacity(fields.len());
				for (position, field) in fields.iter().enumerate() {
					let name = field.name.clone().unwrap_or_else(|| position.to_string());
					lowered.push((name, self.lower(field.ty, visiting)?));
				}
				TypeSpec::Composite(lowered)
			}
			TypeDef::Variant(variants) => {
				// Option<T> is just a variant type in the registry; lowering
				// it to TypeSpec::Option keeps the strict 0x00/0x01 flag check.
				// scale-info registers the prelude Option with the bare path
				// ["Option"], so only that exact path qualifies; a chain type
				// whose path merely ends in "Option" stays a plain enum
				if ty.path.as_slice() == ["Option"] {
					if let Some(some) = variants.iter().find(|v| v.name == "Some") {
						if let [field] = some.fields.as_slice() {
							let inner = self.lower(field.ty, visiting)?;
							return Ok(TypeSpec::Option(Box::new(inner)));
						}
					}
				}
				let mut lowered = Vec::with_capacity(variants.len());
				for variant in variants {
					lowered.push(self.lower_variant(variant, visiting)?);
				}
				TypeSpec::Enum(lowered)
			}
			TypeDef::BitSequence { .. } => {
				return Err(MetadataError::UnsupportedType { id, what: "bit sequence".into() })
			}
		};
		Ok(spec)
	}

	fn lower_variant(
		&self,
		variant: &SiVariant,
		visiting: &mut Vec<u32>,
	) -> Result<VariantSpec, MetadataError> {
		let fields = match variant.fields.as_slice() {
			[] => None,
			[single] if single.name.is_none() => Some(self.lower(single.ty, visiting)?),
			fields => {
				let mut lowered = Vec::with_capacity(fields.len());
				for (position, field) in fields.iter().enumerate() {
					let name = field.name.clone().unwrap_or_else(|| position.to_string());
					lowered.push((name, self.lower(field.ty, visiting)?));
				}
				Some(TypeSpec::Composite(lowered))
			}
		};
		Ok(VariantSpec { name: variant.name.clone(), index: variant.index, fields })
	}

	fn lower_primitive(&self, id: u32, prim: SiPrimitive) -> Result<TypeSpec, MetadataError> {
		Ok(match prim {
			SiPrimitive::Bool => TypeSpec::Bool,
			SiPrimitive::Str => TypeSpec::Str,
			SiPrimitive::U8 => TypeSpec::U8,
			SiPrimitive::U16 => TypeSpec::U16,
			SiPrimitive::U32 => TypeSpec::U32,
			SiPrimitive::U64 => TypeSpec::U64,
			SiPrimitive::U128 => TypeSpec::U128,
			SiPrimitive::I8 => TypeSpec::I8,
			SiPrimitive::I16 => TypeSpec::I16,
			SiPrimitive::I32 => TypeSpec::I32,
			SiPrimitive::I64 => TypeSpec::I64,
			SiPrimitive::I128 => TypeSpec::I128,
			SiPrimitive::Char => {
				return Err(MetadataError::UnsupportedType { id, what: "char".into() })
			}
			SiPrimitive::U256 | SiPrimitive::I256 => {
				return Err(MetadataError::UnsupportedType { id, what: "256-bit integer".into() })
			}
		})
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::types::SiField;

	fn ty(def: TypeDef) -> SiType {
		SiType { path: vec![], type_params: vec![], type_def: def, docs: vec![] }
	}

	fn registry(entries: Vec<(u32, SiType)>) -> TypeRegistry {
		TypeRegistry::new(entries.into_iter().collect())
	}

	fn field(id: u32) -> SiField {
		SiField { name: None, ty: id, type_name: None, docs: vec![] }
	}

	#[test]
	fn primitives_lower_directly() {
		let reg = registry(vec![(0, ty(TypeDef::Primitive(SiPrimitive::U32)))]);
		assert_eq!(reg.type_spec(0).unwrap(), TypeSpec::U32);
	}

	#[test]
	fn sequence_of_bytes_lowers_to_bytes() {
		let reg = registry(vec![
			(0, ty(TypeDef::Primitive(SiPrimitive::U8))),
			(1, ty(TypeDef::Sequence(0))),
			(2, ty(TypeDef::Sequence(1))),
		]);
		assert_eq!(reg.type_spec(1).unwrap(), TypeSpec::Bytes);
		assert_eq!(reg.type_spec(2).unwrap(), TypeSpec::Sequence(Box::new(TypeSpec::Bytes)));
	}

	#[test]
	fn missing_id_is_reported() {
		let reg = registry(vec![]);
		assert_eq!(reg.type_spec(7), Err(MetadataError::TypeNotFound(7)));
	}

	#[test]
	fn reference_cycles_are_detected() {
		// 0 -> 1 -> 0 with no indirection that could terminate
		let reg = registry(vec![
			(0, ty(TypeDef::Composite(vec![field(1)]))),
			(1, ty(TypeDef::Composite(vec![field(0)]))),
		]);
		assert_eq!(reg.type_spec(0), Err(MetadataError::CyclicType(0)));
	}

	#[test]
	fn repeated_references_are_not_cycles() {
		// a pair (u64, u64) references the same id twice
		let reg = registry(vec![
			(0, ty(TypeDef::Primitive(SiPrimitive::U64))),
			(1, ty(TypeDef::Tuple(vec![0, 0]))),
		]);
		assert_eq!(
			reg.type_spec(1).unwrap(),
			TypeSpec::Composite(vec![("0".into(), TypeSpec::U64), ("1".into(), TypeSpec::U64)])
		);
	}

	#[test]
	fn option_lowers_to_the_strict_option_shape() {
		// the prelude Option registers with the bare path ["Option"]
		let some = SiVariant { name: "Some".into(), fields: vec![field(0)], index: 1, docs: vec![] };
		let none = SiVariant { name: "None".into(), fields: vec![], index: 0, docs: vec![] };
		let option = SiType {
			path: vec!["Option".into()],
			type_params: vec![],
			type_def: TypeDef::Variant(vec![none, some]),
			docs: vec![],
		};
		let reg = registry(vec![(0, ty(TypeDef::Primitive(SiPrimitive::U32))), (1, option)]);
		assert_eq!(reg.type_spec(1).unwrap(), TypeSpec::Option(Box::new(TypeSpec::U32)));
	}

	#[test]
	fn a_chain_type_named_option_stays_a_plain_enum() {
		let some = SiVariant { name: "Some".into(), fields: vec![field(0)], index: 1, docs: vec![] };
		let none = SiVariant { name: "None".into(), fields: vec![], index: 0, docs: vec![] };
		let lookalike = SiType {
			path: vec!["my_pallet".into(), "Option".into()],
			type_params: vec![],
			type_def: TypeDef::Variant(vec![none, some]),
			docs: vec![],
		};
		let reg = registry(vec![(0, ty(TypeDef::Primitive(SiPrimitive::U32))), (1, lookalike)]);
		assert_eq!(
			reg.type_spec(1).unwrap(),
			TypeSpec::Enum(vec![
				VariantSpec { name: "None".into(), index: 0, fields: None },
				VariantSpec { name: "Some".into(), index: 1, fields: Some(TypeSpec::U32) },
			])
		);
	}

	#[test]
	fn variant_enums_keep_their_indices() {
		let a = SiVariant { name: "A".into(), fields: vec![], index: 0, docs: vec![] };
		let b = SiVariant { name: "B".into(), fields: vec![field(0)], index: 5, docs: vec![] };
		let reg = registry(vec![
			(0, ty(TypeDef::Primitive(SiPrimitive::U8))),
			(1, ty(TypeDef::Variant(vec![a, b]))),
		]);
		assert_eq!(
			reg.type_spec(1).unwrap(),
			TypeSpec::Enum(vec![
				VariantSpec { name: "A".into(), index: 0, fields: None },
				VariantSpec { name: "B".into(), index: 5, fields: Some(TypeSpec::U8) },
			])
		);
	}

	#[test]
	fn variants_accessor_rejects_non_variant_types() {
		let reg = registry(vec![(0, ty(TypeDef::Primitive(SiPrimitive::U8)))]);
		assert_eq!(reg.variants(0).unwrap_err(), MetadataError::ExpectedVariant(0));
	}

	#[test]
	fn lowering_is_memoized() {
		let reg = registry(vec![(0, ty(TypeDef::Primitive(SiPrimitive::Bool)))]);
		reg.type_spec(0).unwrap();
		assert_eq!(reg.specs.lock().get(&0), Some(&TypeSpec::Bool));
	}
}
