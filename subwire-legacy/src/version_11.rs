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
use crate::items::{self, Layout};
use crate::types::MetadataV11;
use subwire_scale::Cursor;

/// Decodes a complete v11 metadata blob, magic prefix included. The whole
/// input must be consumed.
pub fn decode(bytes: &[u8]) -> Result<MetadataV11, MetadataError> {
	let mut cursor = Cursor::new(bytes);
	items::decode_prefix(&mut cursor, 11)?;
	let modules = cursor.next_sequence(|c| items::decode_module(c, Layout::V11))?;
	let extrinsic = items::decode_extrinsic(&mut cursor)?;
	cursor.finish()?;
	Ok(MetadataV11 { modules, extrinsic })
}
