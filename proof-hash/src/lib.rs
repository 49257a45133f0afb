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

//! Digest primitive contract used by state proofs.

#![cfg_attr(not(feature = "std"), no_std)]

#[cfg(not(feature = "std"))]
extern crate alloc;

#[cfg(feature = "std")]
mod rstd {
	pub use std::vec::Vec;
}

#[cfg(not(feature = "std"))]
mod rstd {
	pub use alloc::vec::Vec;
}

mod hash256;

#[cfg(feature = "std")]
pub use hash256::FromHexError;
pub use hash256::{Hash256, Hash256StdHasher};

use core::{fmt::Debug, hash};
use rstd::Vec;

/// Trait describing an object that can hash a slice of bytes. Used to abstract
/// other types over the hashing algorithm. Defines a single `hash` method and an
/// `Out` associated type with the necessary bounds.
///
/// Every composite hash in a state proof is computed over a concatenation of
/// byte strings, so implementations are encouraged to override `hash_concat`
/// with a streaming variant.
pub trait Hasher: Sync + Send {
	/// The output type of the `Hasher`
	type Out: AsRef<[u8]> + AsMut<[u8]> + Default + Debug + PartialEq + Eq
		+ hash::Hash + Send + Sync + Clone + Copy;
	/// What to use to build `HashMap`s with this `Hasher`.
	type StdHasher: Sync + Send + Default + hash::Hasher;
	/// The length in bytes of the `Hasher` output.
	const LENGTH: usize;

	/// Compute the hash of the provided slice of bytes returning the `Out` type of the `Hasher`.
	fn hash(x: &[u8]) -> Self::Out;

	/// Compute the hash of the concatenation of `parts`.
	fn hash_concat(parts: &[&[u8]]) -> Self::Out {
		let mut buffer = Vec::with_capacity(parts.iter().map(|part| part.len()).sum());
		for part in parts {
			buffer.extend_from_slice(part);
		}
		Self::hash(&buffer)
	}
}
