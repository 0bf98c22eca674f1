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

//! Decoders for the "legacy" runtime metadata layouts, versions 11 and 13.
//!
//! These versions describe types as opaque strings rather than through a
//! portable type registry, so the trees here carry type names verbatim and
//! leave their interpretation to the caller. Both versions share most of
//! their module layout; v13 adds an explicit pallet index and the NMap
//! storage shape.

#![forbid(unsafe_code)]

mod error;
mod items;
pub mod test_suite;
pub mod types;
pub mod version_11;
pub mod version_13;

pub use error::MetadataError;
pub use types::{MetadataV11, MetadataV13, ModuleMetadata, META_RESERVED};
