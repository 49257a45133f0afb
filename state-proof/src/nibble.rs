// Copyright 2017, 2018 Parity Technologies
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

//! An owning, nibble-oriented byte vector.

use crate::{node_codec::Error, rstd::fmt};
use smallvec::SmallVec;

/// Number of child for a branch (trie radix).
pub const NIBBLE_LENGTH: usize = 16;
/// Number of nibble per byte.
pub const NIBBLE_PER_BYTE: usize = 2;

/// Flag set in the first byte of a hex-prefix encoded leaf path.
const LEAF_FLAG: u8 = 0x20;
/// Flag set in the first byte of a hex-prefix encoded odd path.
const ODD_FLAG: u8 = 0x10;

/// Owning sequence of nibbles, packed two per byte, high nibble first.
///
/// For an odd length the low nibble of the last byte is always zero, so two
/// paths holding the same nibbles compare equal.
#[derive(Clone, Default, PartialEq, Eq, Hash)]
pub struct NibblePath {
	inner: SmallVec<[u8; 32]>,
	len: usize,
}

impl NibblePath {
	/// Make a new empty `NibblePath`.
	pub const fn new() -> Self {
		NibblePath { inner: SmallVec::new_const(), len: 0 }
	}

	/// Path covering every nibble of `key`.
	pub fn from_key(key: &[u8]) -> Self {
		NibblePath { inner: SmallVec::from_slice(key), len: key.len() * NIBBLE_PER_BYTE }
	}

	/// Build from single nibbles. Only the low 4 bits of each item are kept.
	pub fn from_nibbles<I: IntoIterator<Item = u8>>(nibbles: I) -> Self {
		let mut path = NibblePath::new();
		for nibble in nibbles {
			path.push(nibble);
		}
		path
	}

	/// Read `len` nibbles from their packed representation.
	///
	/// Exactly `(len + 1) / 2` bytes are used. An odd path must leave the low
	/// nibble of its last byte unset.
	pub fn from_packed(bytes: &[u8], len: usize) -> Result<Self, Error> {
		let needed = (len + 1) / NIBBLE_PER_BYTE;
		if bytes.len() < needed {
			return Err(Error::UnexpectedEnd { needed, remaining: bytes.len() })
		}
		let packed = &bytes[..needed];
		if len % NIBBLE_PER_BYTE == 1 && packed[needed - 1] & 0x0f != 0 {
			return Err(Error::InvalidPathPadding)
		}
		Ok(NibblePath { inner: SmallVec::from_slice(packed), len })
	}

	/// Push a nibble onto the `NibblePath`. Ignores the high 4 bits.
	pub fn push(&mut self, nibble: u8) {
		let nibble = nibble & 0x0f;
		if self.len % NIBBLE_PER_BYTE == 0 {
			self.inner.push(nibble << 4);
		} else if let Some(last) = self.inner.last_mut() {
			*last |= nibble;
		}
		self.len += 1;
	}

	/// Length in nibbles.
	#[inline(always)]
	pub fn len(&self) -> usize {
		self.len
	}

	pub fn is_empty(&self) -> bool {
		self.len == 0
	}

	pub fn is_odd(&self) -> bool {
		self.len % NIBBLE_PER_BYTE == 1
	}

	/// Nibble at the given offset, if any.
	#[inline]
	pub fn get(&self, idx: usize) -> Option<u8> {
		if idx >= self.len {
			return None
		}
		let byte = self.inner[idx / NIBBLE_PER_BYTE];
		Some(if idx % NIBBLE_PER_BYTE == 0 { byte >> 4 } else { byte & 0x0f })
	}

	pub fn iter(&self) -> impl Iterator<Item = u8> + '_ {
		(0..self.len).filter_map(move |idx| self.get(idx))
	}

	/// Packed bytes, `(len + 1) / 2` of them.
	pub fn as_packed(&self) -> &[u8] {
		&self.inner
	}

	/// Whether all of `self` is found in `key` starting at nibble `offset`.
	/// False when `self` would run past the end of `key`.
	pub fn matches_at(&self, key: &NibblePath, offset: usize) -> bool {
		offset + self.len <= key.len && self.iter().zip(key.iter().skip(offset)).all(|(a, b)| a == b)
	}

	/// Hex-prefix encoding, the form a path takes inside a node hash.
	///
	/// The first byte carries the leaf flag, the odd flag and, for an odd
	/// path, the first nibble. The remaining nibbles follow, two per byte.
	pub fn encoded(&self, is_leaf: bool) -> SmallVec<[u8; 36]> {
		let mut output = SmallVec::with_capacity(self.len / NIBBLE_PER_BYTE + 1);
		let flag = if is_leaf { LEAF_FLAG } else { 0 };
		if self.is_odd() {
			output.push(flag | ODD_FLAG | (self.inner[0] >> 4));
			let mut rest = self.iter().skip(1);
			while let (Some(high), Some(low)) = (rest.next(), rest.next()) {
				output.push(high << 4 | low);
			}
		} else {
			output.push(flag);
			output.extend_from_slice(&self.inner);
		}
		output
	}
}

impl fmt::Display for NibblePath {
	fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
		for nibble in self.iter() {
			write!(f, "{:X}", nibble)?;
		}
		Ok(())
	}
}

impl fmt::Debug for NibblePath {
	fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
		write!(f, "NibblePath({}: {})", self.len, self)
	}
}
