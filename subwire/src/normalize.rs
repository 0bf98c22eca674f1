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

//! Collapses the version-specific metadata trees into one pallet view.
//!
//! The subtle part is the pallet index. v13 and v14 carry it explicitly;
//! v11 does not, and the index used on the wire for calls is the position
//! of the module among those that have dispatchables, skipping the rest.

use crate::error::Error;
use crate::metadata::RuntimeMetadata;
use serde::Serialize;
use subwire_current::MetadataV14;
use subwire_legacy::ModuleMetadata;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NormalizedPallet {
	pub name: String,
	/// The index used in call encoding. `None` for v11 modules without
	/// dispatchables, which have no position in the call enum.
	pub index: Option<u8>,
	pub calls: Vec<NormalizedCall>,
	pub storage_prefix: Option<String>,
	pub storage_entries: Vec<String>,
	pub constants: Vec<NormalizedConstant>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NormalizedCall {
	pub name: String,
	pub index: u8,
	/// Argument names, informational only; wire order and types come from
	/// the caller's per-operation schema.
	pub args: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NormalizedConstant {
	pub name: String,
	pub value: Vec<u8>,
}

pub(crate) fn normalize(meta: &RuntimeMetadata) -> Result<Vec<NormalizedPallet>, Error> {
	match meta {
		RuntimeMetadata::V11(v11) => Ok(legacy_modules(&v11.modules)),
		RuntimeMetadata::V13(v13) => Ok(legacy_modules(&v13.modules)),
		RuntimeMetadata::V14(v14) => current_pallets(v14),
	}
}

fn legacy_modules(modules: &[ModuleMetadata]) -> Vec<NormalizedPallet> {
	// v11 call index: position among callable modules only
	let mut callable_position: u8 = 0;
	modules
		.iter()
		.map(|module| {
			let index = match module.index {
				Some(explicit) => Some(explicit),
				None if module.calls.is_some() => {
					let position = callable_position;
					callable_position += 1;
					Some(position)
				}
				None => None,
			};
			let calls = module
				.calls
				.as_deref()
				.unwrap_or_default()
				.iter()
				.enumerate()
				.map(|(call_index, function)| NormalizedCall {
					name: function.name.clone(),
					index: call_index as u8,
					args: function.arguments.iter().map(|a| a.name.clone()).collect(),
				})
				.collect();
			NormalizedPallet {
				name: module.name.clone(),
				index,
				calls,
				storage_prefix: module.storage.as_ref().map(|s| s.prefix.clone()),
				storage_entries: module
					.storage
					.as_ref()
					.map(|s| s.entries.iter().map(|e| e.name.clone()).collect())
					.unwrap_or_default(),
				constants: module
					.constants
					.iter()
					.map(|c| NormalizedConstant { name: c.name.clone(), value: c.value.clone() })
					.collect(),
			}
		})
		.collect()
}

fn current_pallets(meta: &MetadataV14) -> Result<Vec<NormalizedPallet>, Error> {
	meta.pallets
		.iter()
		.map(|pallet| {
			let calls = match pallet.calls {
				None => Vec::new(),
				Some(call_ty) => meta
					.types
					.variants(call_ty)?
					.iter()
					.map(|variant| NormalizedCall {
						name: variant.name.clone(),
						index: variant.index,
						args: variant
							.fields
							.iter()
							.enumerate()
							.map(|(i, f)| f.name.clone().unwrap_or_else(|| i.to_string()))
							.collect(),
					})
					.collect(),
			};
			Ok(NormalizedPallet {
				name: pallet.name.clone(),
				index: Some(pallet.index),
				calls,
				storage_prefix: pallet.storage.as_ref().map(|s| s.prefix.clone()),
				storage_entries: pallet
					.storage
					.as_ref()
					.map(|s| s.entries.iter().map(|e| e.name.clone()).collect())
					.unwrap_or_default(),
				constants: pallet
					.constants
					.iter()
					.map(|c| NormalizedConstant { name: c.name.clone(), value: c.value.clone() })
					.collect(),
			})
		})
		.collect()
}
