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

//! Name-to-location maps over a decoded metadata tree.
//!
//! Callers declare up front which storage entries, calls and constants they
//! care about; the decorator walks the tree once and afterwards answers
//! lookups without touching the tree again, which is what isolates the rest
//! of the system from metadata-version differences. Lookups are
//! case-sensitive and fail loudly on anything outside the allow-list.

use crate::error::Error;
use crate::metadata::RuntimeMetadata;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap};

/// The allow-lists a caller supplies, keyed by pallet name.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SupportedItems {
	#[serde(default)]
	pub storage: BTreeMap<String, Vec<String>>,
	#[serde(default)]
	pub calls: BTreeMap<String, Vec<String>>,
	#[serde(default)]
	pub constants: BTreeMap<String, Vec<String>>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct CallLocation {
	pub pallet_index: u8,
	pub call_index: u8,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StorageLocation {
	/// Not available for v11 modules without dispatchables.
	pub pallet_index: Option<u8>,
	pub prefix: String,
	pub entry: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ConstantLocation {
	pub pallet_index: Option<u8>,
	pub value: Vec<u8>,
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum LookupError {
	#[error("call {0}.{1} is not supported by this runtime")]
	UnsupportedCall(String, String),
	#[error("storage entry {0}.{1} is not supported by this runtime")]
	UnsupportedStorage(String, String),
	#[error("constant {0}.{1} is not supported by this runtime")]
	UnsupportedConstant(String, String),
}

/// Built once per metadata version, immutable afterwards.
#[derive(Debug)]
pub struct Decorator {
	calls: HashMap<(String, String), CallLocation>,
	storage: HashMap<(String, String), StorageLocation>,
	constants: HashMap<(String, String), ConstantLocation>,
}

impl Decorator {
	/// Walks the tree once and keeps only the requested items. An item the
	/// runtime does not have is left out of the maps, so later lookups for
	/// it fail the same way lookups outside the allow-list do.
	pub fn new(meta: &RuntimeMetadata, items: &SupportedItems) -> Result<Self, Error> {
		let pallets = meta.normalize()?;
		let mut calls = HashMap::new();
		let mut storage = HashMap::new();
		let mut constants = HashMap::new();

		for pallet in &pallets {
			if let Some(wanted) = items.calls.get(&pallet.name) {
				for call in &pallet.calls {
					if !wanted.contains(&call.name) {
						continue;
					}
					let pallet_index = match pallet.index {
						Some(index) => index,
						None => continue,
					};
					calls.insert(
						(pallet.name.clone(), call.name.clone()),
						CallLocation { pallet_index, call_index: call.index },
					);
				}
			}
			if let Some(wanted) = items.storage.get(&pallet.name) {
				if let Some(prefix) = &pallet.storage_prefix {
					for entry in &pallet.storage_entries {
						if !wanted.contains(entry) {
							continue;
						}
						storage.insert(
							(pallet.name.clone(), entry.clone()),
							StorageLocation {
								pallet_index: pallet.index,
								prefix: prefix.clone(),
								entry: entry.clone(),
							},
						);
					}
				}
			}
			if let Some(wanted) = items.constants.get(&pallet.name) {
				for constant in &pallet.constants {
					if !wanted.contains(&constant.name) {
						continue;
					}
					constants.insert(
						(pallet.name.clone(), constant.name.clone()),
						ConstantLocation { pallet_index: pallet.index, value: constant.value.clone() },
					);
				}
			}
		}

		log::debug!(
			"decorator built: {} calls, {} storage entries, {} constants",
			calls.len(),
			storage.len(),
			constants.len()
		);
		Ok(Decorator { calls, storage, constants })
	}

	pub fn call(&self, pallet: &str, name: &str) -> Result<CallLocation, LookupError> {
		self.calls
			.get(&(pallet.to_owned(), name.to_owned()))
			.copied()
			.ok_or_else(|| LookupError::UnsupportedCall(pallet.into(), name.into()))
	}

	pub fn storage(&self, pallet: &str, entry: &str) -> Result<&StorageLocation, LookupError> {
		self.storage
			.get(&(pallet.to_owned(), entry.to_owned()))
			.ok_or_else(|| LookupError::UnsupportedStorage(pallet.into(), entry.into()))
	}

	pub fn constant(&self, pallet: &str, name: &str) -> Result<&ConstantLocation, LookupError> {
		self.constants
			.get(&(pallet.to_owned(), name.to_owned()))
			.ok_or_else(|| LookupError::UnsupportedConstant(pallet.into(), name.into()))
	}
}
