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

//! SCALE codec primitives for the Substrate wire format.
//!
//! Everything here is a pure, synchronous computation over in-memory byte
//! buffers. Decoding goes through a [`Cursor`] which consumes an exact byte
//! prefix per call, so composite decoders are plain sequences of calls and the
//! bytes consumed by a composite always equal the sum of its fields'.
//! Encoding goes through the free functions in [`encode`] and through
//! [`encode_value`] for schema-shaped [`Value`] trees.

#![forbid(unsafe_code)]

pub mod compact;
pub mod encode;
mod cursor;
mod error;
mod value;

pub use compact::{compact_len, encode_compact};
pub use cursor::Cursor;
pub use error::CodecError;
pub use value::{decode_value, encode_value, TypeSpec, Value, VariantSpec};
