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

//! Hasher implementation for the SHA3-256 hash

#![cfg_attr(not(feature = "std"), no_std)]

use proof_hash::{Hash256, Hash256StdHasher, Hasher};
use tiny_keccak::{Hasher as _, Sha3};

/// Concrete `Hasher` impl for the SHA3-256 hash
#[derive(Default, Debug, Clone, PartialEq)]
pub struct Sha3Hasher;

impl Hasher for Sha3Hasher {
	type Out = Hash256;

	type StdHasher = Hash256StdHasher;

	const LENGTH: usize = 32;

	fn hash(x: &[u8]) -> Self::Out {
		Self::hash_concat(&[x])
	}

	fn hash_concat(parts: &[&[u8]]) -> Self::Out {
		let mut sha3 = Sha3::v256();
		for part in parts {
			sha3.update(part);
		}
		let mut out = [0u8; 32];
		sha3.finalize(&mut out);
		Hash256::new(out)
	}
}
