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

//! Decoder for v14 runtime metadata, the first version that ships a portable
//! type registry instead of opaque type strings. Type references everywhere
//! in the pallet trees are integer ids into that registry; [`TypeRegistry`]
//! resolves them lazily and caches the lowered shapes, which keeps cyclic
//! runtime types (accounts referencing events referencing accounts) from
//! recursing forever.

#![forbid(unsafe_code)]

mod error;
mod registry;
pub mod test_suite;
pub mod types;
pub mod version_14;

pub use error::MetadataError;
pub use registry::TypeRegistry;
pub use types::MetadataV14;
