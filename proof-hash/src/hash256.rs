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

//! Fixed size 256-bit digest.

use core::{fmt, hash};

/// A 256-bit digest. Compared byte by byte; the all-zero value is the
/// digest of nothing at all (empty Merkle sequence).
#[derive(Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord)]
pub struct Hash256([u8; 32]);

impl Hash256 {
	/// Digest length in bytes.
	pub const SIZE: usize = 32;

	/// Wrap raw digest bytes.
	pub const fn new(bytes: [u8; 32]) -> Self {
		Hash256(bytes)
	}

	/// The all-zero digest.
	pub const fn zero() -> Self {
		Hash256([0u8; 32])
	}

	/// Read a digest from a slice, `None` if the slice is not exactly 32 bytes long.
	pub fn from_slice(bytes: &[u8]) -> Option<Self> {
		if bytes.len() != Self::SIZE {
			return None;
		}
		let mut out = [0u8; 32];
		out.copy_from_slice(bytes);
		Some(Hash256(out))
	}

	pub fn is_zero(&self) -> bool {
		self.0.iter().all(|byte| *byte == 0)
	}

	pub fn as_bytes(&self) -> &[u8; 32] {
		&self.0
	}
}

impl From<[u8; 32]> for Hash256 {
	fn from(bytes: [u8; 32]) -> Self {
		Hash256(bytes)
	}
}

impl From<Hash256> for [u8; 32] {
	fn from(hash: Hash256) -> Self {
		hash.0
	}
}

impl AsRef<[u8]> for Hash256 {
	fn as_ref(&self) -> &[u8] {
		&self.0
	}
}

impl AsMut<[u8]> for Hash256 {
	fn as_mut(&mut self) -> &mut [u8] {
		&mut self.0
	}
}

// Written as a single 32 byte chunk, see `Hash256StdHasher`.
impl hash::Hash for Hash256 {
	fn hash<S: hash::Hasher>(&self, state: &mut S) {
		state.write(&self.0)
	}
}

impl fmt::Display for Hash256 {
	fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
		for byte in self.0.iter() {
			write!(f, "{:02X}", byte)?;
		}
		Ok(())
	}
}

impl fmt::Debug for Hash256 {
	fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
		for byte in self.0.iter() {
			write!(f, "{:02x}", byte)?;
		}
		Ok(())
	}
}

/// Error parsing a hex encoded `Hash256`.
#[cfg(feature = "std")]
#[derive(Debug, Clone)]
pub enum FromHexError {
	/// Not a hex string.
	InvalidHex(rustc_hex::FromHexError),
	/// Valid hex, but not 32 bytes of it. The parameter is the decoded length.
	InvalidLength(usize),
}

#[cfg(feature = "std")]
impl fmt::Display for FromHexError {
	fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
		match self {
			FromHexError::InvalidHex(err) => write!(f, "Invalid hex digest: {}", err),
			FromHexError::InvalidLength(len) =>
				write!(f, "Invalid digest length: expected 32 bytes, got {}", len),
		}
	}
}

#[cfg(feature = "std")]
impl std::error::Error for FromHexError {}

#[cfg(feature = "std")]
impl std::str::FromStr for Hash256 {
	type Err = FromHexError;

	/// Parse a digest from hex, either case.
	fn from_str(s: &str) -> Result<Self, Self::Err> {
		use rustc_hex::FromHex;

		let bytes: Vec<u8> = s.from_hex().map_err(FromHexError::InvalidHex)?;
		Hash256::from_slice(&bytes).ok_or(FromHexError::InvalidLength(bytes.len()))
	}
}

/// Hasher that just folds the 32 bytes of a digest into 8.
/// May only be used for keys which are 32 bytes.
#[derive(Default)]
pub struct Hash256StdHasher {
	prefix: u64,
}

impl hash::Hasher for Hash256StdHasher {
	#[inline]
	fn finish(&self) -> u64 {
		self.prefix
	}

	#[inline]
	fn write(&mut self, bytes: &[u8]) {
		// length prefixes may be written first when hashing through a slice.
		debug_assert!(bytes.len() == 4 || bytes.len() == 8 || bytes.len() == 32);
		if bytes.len() < 32 {
			return
		}

		for chunk in bytes[..32].chunks_exact(8) {
			let mut word = [0u8; 8];
			word.copy_from_slice(chunk);
			self.prefix ^= u64::from_le_bytes(word);
		}
	}
}
