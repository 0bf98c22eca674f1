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

//! Decode Substrate runtime metadata (v11, v13, v14) into a common view,
//! resolve pallet and call indices by name, and assemble signed extrinsics.
//!
//! The flow runs one direction: raw metadata bytes decode into a
//! [`RuntimeMetadata`] tree, a [`Decorator`] walks that tree once to build
//! name-to-index maps for the items a caller declares interest in, and a
//! [`TxController`] uses those maps plus per-call argument schemas to encode,
//! hash and sign transactions. A [`NodeCache`] sits beside the node-fetch
//! boundary and coalesces concurrent lookups of the same key.

#![forbid(unsafe_code)]

pub mod cache;
pub mod decorator;
mod error;
pub mod metadata;
pub mod normalize;
pub mod tx;

pub use cache::{CacheValue, FetchError, NodeCache};
pub use decorator::{CallLocation, ConstantLocation, Decorator, StorageLocation, SupportedItems};
pub use error::Error;
pub use metadata::RuntimeMetadata;
pub use normalize::{NormalizedCall, NormalizedConstant, NormalizedPallet};
pub use tx::{Call, ChainContext, Extra, Extrinsic, Signer, TxController};

pub use subwire_common::{Era, MultiAddress, MultiSignature, SignatureScheme, SpecVersion};
pub use subwire_scale::{Cursor, TypeSpec, Value};
