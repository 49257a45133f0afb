// Copyright 2017, 2021 Parity Technologies
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
#![cfg_attr(not(feature = "std"), no_std)]

//! State proof verification.
//!
//! Two independent proof systems over the same digest primitive:
//! a binary Merkle tree (root builder and sibling path verifier) and a
//! sixteen-way Patricia-Merkle tree (compact node codec and an inclusion or
//! exclusion verifier anchored to a state hash).

#[cfg(not(feature = "std"))]
extern crate alloc;

#[cfg(feature = "std")]
mod rstd {
	pub use std::{error::Error, fmt, vec};
}

#[cfg(not(feature = "std"))]
mod rstd {
	pub use alloc::vec;
	pub use core::fmt;
	pub trait Error {}
	impl<T> Error for T {}
}

pub mod merkle;
pub mod nibble;
pub mod node;
pub mod node_codec;
pub mod proof;

pub use self::{
	merkle::{merkle_path, prove_merkle, MerkleHashBuilder, MerklePart},
	nibble::NibblePath,
	node::{BranchNode, LeafNode, PatriciaTreeNode},
	node_codec::{decode_nodes, encode_nodes},
	proof::{prove_patricia_merkle, PatriciaMerkleProofResult},
};
pub use proof_hash::{Hash256, Hasher};
pub use sha3_hasher::Sha3Hasher;

/// Digest type of a layout.
pub type TrieHash<L> = <<L as TreeLayout>::Hash as Hasher>::Out;

/// Trait with definition of the tree layout: which hasher is used, how
/// nodes are tagged on the wire, and how node and state hashes are composed.
///
/// Everything but the hasher has a default matching the deployed network.
pub trait TreeLayout {
	/// Hasher to use for every digest of this tree.
	type Hash: Hasher;

	/// First byte of an encoded leaf node.
	const LEAF_MARKER: u8 = 0xFF;
	/// First byte of an encoded branch node.
	const BRANCH_MARKER: u8 = 0x00;

	/// Digest standing in for an absent link when hashing a branch.
	///
	/// Absent and present links stay distinct in memory and on the wire,
	/// only the branch hash input uses this placeholder.
	fn absent_link() -> TrieHash<Self> {
		Default::default()
	}

	/// Commitment over the roots of all subcaches, compared against the state hash.
	/// Defaults to the digest of the roots concatenated in order.
	fn calculate_state_hash(subcache_merkle_roots: &[TrieHash<Self>]) -> TrieHash<Self> {
		let parts: rstd::vec::Vec<&[u8]> =
			subcache_merkle_roots.iter().map(|root| root.as_ref()).collect();
		Self::Hash::hash_concat(&parts)
	}
}

/// Production layout: SHA3-256 digests and the default wire markers.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Sha3Layout;

impl TreeLayout for Sha3Layout {
	type Hash = Sha3Hasher;
}
