// Copyright 2017, 2020 Parity Technologies
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

//! Binary Merkle tree over an ordered sequence of digests.
//!
//! Levels are reduced pairwise as `hash(left || right)`; an odd trailing
//! element is paired with itself. The root of an empty sequence is the zero
//! digest and the root of a single element is that element.

use crate::rstd::vec::Vec;
use core::marker::PhantomData;
use proof_hash::Hasher;

/// One step of a Merkle path: the sibling digest and its side.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct MerklePart<O> {
	pub hash: O,
	/// Sibling is the left operand of the fold.
	pub is_left: bool,
}

impl<O> MerklePart<O> {
	pub fn new(hash: O, is_left: bool) -> Self {
		MerklePart { hash, is_left }
	}
}

/// Accumulates leaves then computes the Merkle root.
pub struct MerkleHashBuilder<H: Hasher> {
	hashes: Vec<H::Out>,
	_marker: PhantomData<H>,
}

impl<H: Hasher> Default for MerkleHashBuilder<H> {
	fn default() -> Self {
		MerkleHashBuilder { hashes: Vec::new(), _marker: PhantomData }
	}
}

impl<H: Hasher> MerkleHashBuilder<H> {
	pub fn new() -> Self {
		Self::default()
	}

	/// Append a leaf. Order matters, duplicates are kept.
	pub fn update(&mut self, component: H::Out) {
		self.hashes.push(component);
	}

	pub fn len(&self) -> usize {
		self.hashes.len()
	}

	pub fn is_empty(&self) -> bool {
		self.hashes.is_empty()
	}

	/// Consume the builder and compute the root.
	pub fn finalize(mut self) -> H::Out {
		if self.hashes.is_empty() {
			return Default::default()
		}

		while self.hashes.len() > 1 {
			self.hashes = reduce_level::<H>(&self.hashes);
		}
		self.hashes[0]
	}
}

impl<H: Hasher> Extend<H::Out> for MerkleHashBuilder<H> {
	fn extend<I: IntoIterator<Item = H::Out>>(&mut self, iter: I) {
		self.hashes.extend(iter)
	}
}

impl<H: Hasher> FromIterator<H::Out> for MerkleHashBuilder<H> {
	fn from_iter<I: IntoIterator<Item = H::Out>>(iter: I) -> Self {
		let mut builder = Self::new();
		builder.extend(iter);
		builder
	}
}

fn reduce_level<H: Hasher>(level: &[H::Out]) -> Vec<H::Out> {
	level
		.chunks(2)
		.map(|pair| {
			let left = &pair[0];
			let right = pair.get(1).unwrap_or(left);
			H::hash_concat(&[left.as_ref(), right.as_ref()])
		})
		.collect()
}

/// Check that folding `leaf` with every part of `path`, in order, yields `root`.
///
/// With an empty path the leaf must be the root itself.
pub fn prove_merkle<H: Hasher>(leaf: &H::Out, path: &[MerklePart<H::Out>], root: &H::Out) -> bool {
	let computed = path.iter().fold(*leaf, |current, part| {
		if part.is_left {
			H::hash_concat(&[part.hash.as_ref(), current.as_ref()])
		} else {
			H::hash_concat(&[current.as_ref(), part.hash.as_ref()])
		}
	});
	computed == *root
}

/// Sibling path from the leaf at `index` up to the root of `leaves`.
///
/// `None` when `index` is out of range. A duplicated trailing element shows
/// up as its own sibling on the right.
pub fn merkle_path<H: Hasher>(leaves: &[H::Out], index: usize) -> Option<Vec<MerklePart<H::Out>>> {
	if index >= leaves.len() {
		return None
	}

	let mut path = Vec::new();
	let mut level = leaves.to_vec();
	let mut index = index;
	while level.len() > 1 {
		let sibling = level.get(index ^ 1).unwrap_or(&level[index]);
		path.push(MerklePart::new(*sibling, index % 2 == 1));
		level = reduce_level::<H>(&level);
		index /= 2;
	}
	Some(path)
}
