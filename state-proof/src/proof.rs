// Copyright 2019, 2020 Parity Technologies
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

//! Verification of Patricia-Merkle inclusion and exclusion proofs.
//!
//! A proof is the ordered list of nodes on the way from the root of one
//! subcache tree down to the key. The subcache roots are themselves anchored
//! to a single state hash. Verification never fails: every input maps to
//! exactly one `PatriciaMerkleProofResult`.

use crate::{
	nibble::NibblePath,
	node::PatriciaTreeNode,
	rstd::{fmt, vec::Vec},
	TreeLayout, TrieHash,
};
use core::hash::BuildHasherDefault;
use hashbrown::HashMap;
use log::{debug, trace};
use proof_hash::Hasher;

/// Outcome of a Patricia-Merkle proof verification.
#[repr(u16)]
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum PatriciaMerkleProofResult {
	/// The key is present with the tested value.
	ValidPositive = 0x0001,
	/// The key is proven absent.
	ValidNegative = 0x0002,
	/// The proof is consistent but stops before reaching the key.
	Inconclusive = 0x4001,
	/// The subcache roots do not hash to the state hash.
	StateHashDoesNotMatchRoots = 0x8001,
	/// The first node is not one of the subcache roots.
	UnanchoredPathTree = 0x8002,
	/// The key's leaf holds a different value.
	LeafValueMismatch = 0x8003,
	/// A node is not referenced by its predecessor.
	UnlinkedNode = 0x8004,
	/// The nodes do not lead along the key.
	PathMismatch = 0x8005,
}

impl PatriciaMerkleProofResult {
	const FAILURE_FLAG: u16 = 0x8000;

	/// Stable numeric code.
	pub fn code(self) -> u16 {
		self as u16
	}

	pub fn from_code(code: u16) -> Option<Self> {
		use PatriciaMerkleProofResult::*;
		Some(match code {
			0x0001 => ValidPositive,
			0x0002 => ValidNegative,
			0x4001 => Inconclusive,
			0x8001 => StateHashDoesNotMatchRoots,
			0x8002 => UnanchoredPathTree,
			0x8003 => LeafValueMismatch,
			0x8004 => UnlinkedNode,
			0x8005 => PathMismatch,
			_ => return None,
		})
	}

	/// Either valid outcome.
	pub fn is_valid(self) -> bool {
		matches!(self, Self::ValidPositive | Self::ValidNegative)
	}

	pub fn is_failure(self) -> bool {
		self.code() & Self::FAILURE_FLAG != 0
	}
}

impl fmt::Display for PatriciaMerkleProofResult {
	fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
		let description = match self {
			Self::ValidPositive => "key is present with the tested value",
			Self::ValidNegative => "key is proven absent",
			Self::Inconclusive => "proof ends before reaching the key",
			Self::StateHashDoesNotMatchRoots => "state hash does not match subcache roots",
			Self::UnanchoredPathTree => "path tree is not anchored to a subcache root",
			Self::LeafValueMismatch => "leaf value does not match",
			Self::UnlinkedNode => "node is not linked to its predecessor",
			Self::PathMismatch => "path does not match key",
		};
		write!(f, "{:#06x}: {}", self.code(), description)
	}
}

type NodeIndex<L> = HashMap<
	TrieHash<L>,
	usize,
	BuildHasherDefault<<<L as TreeLayout>::Hash as Hasher>::StdHasher>,
>;

/// Reject with `result`, logging why.
fn reject(result: PatriciaMerkleProofResult, reason: fmt::Arguments) -> PatriciaMerkleProofResult {
	debug!(target: "state-proof", "{:?}: {}", result, reason);
	result
}

/// Nibbles of the links from each node to the next one, as a bit mask.
///
/// A branch may reference the same child under several nibbles, every one of
/// them is kept and the key picks one during the walk. Positions are resolved
/// through a hash index built once, the first occurrence of a hash wins.
fn link_masks<L: TreeLayout>(
	merkle_path: &[PatriciaTreeNode<TrieHash<L>>],
	hashes: &[TrieHash<L>],
) -> Option<Vec<u16>> {
	let mut index = NodeIndex::<L>::with_capacity_and_hasher(hashes.len(), Default::default());
	for (position, hash) in hashes.iter().enumerate() {
		index.entry(*hash).or_insert(position);
	}

	let mut masks = Vec::with_capacity(merkle_path.len().saturating_sub(1));
	for (position, pair) in merkle_path.windows(2).enumerate() {
		let child = position + 1;
		let mask = pair[0].as_branch().map_or(0, |parent| {
			parent
				.present_links()
				.filter(|(_, link)| index.get(*link) == Some(&child))
				.fold(0u16, |mask, (nibble, _)| mask | 1 << nibble)
		});
		if mask == 0 {
			debug!(target: "state-proof", "node {} is not linked from node {}", child, position);
			return None
		}
		trace!(target: "state-proof", "node {} linked from node {} by {:016b}", child, position, mask);
		masks.push(mask);
	}
	Some(masks)
}

/// Verify that `encoded_key` maps to `value_to_test` (inclusion) or to
/// nothing at all (exclusion, `value_to_test` is `None`).
///
/// `merkle_path` runs from a subcache root down towards the key, and
/// `subcache_merkle_roots` must compose to `state_hash` under
/// `L::calculate_state_hash`. Checks are applied in order and the first
/// failing one decides the outcome: state anchoring, forest anchoring,
/// linking between consecutive nodes, then the walk along the key.
pub fn prove_patricia_merkle<L: TreeLayout>(
	encoded_key: &[u8],
	value_to_test: Option<&TrieHash<L>>,
	merkle_path: &[PatriciaTreeNode<TrieHash<L>>],
	state_hash: &TrieHash<L>,
	subcache_merkle_roots: &[TrieHash<L>],
) -> PatriciaMerkleProofResult {
	use PatriciaMerkleProofResult::*;

	let calculated_state_hash = L::calculate_state_hash(subcache_merkle_roots);
	if calculated_state_hash != *state_hash {
		return reject(
			StateHashDoesNotMatchRoots,
			format_args!("expected {:?}, calculated {:?}", state_hash, calculated_state_hash),
		)
	}

	let hashes: Vec<TrieHash<L>> =
		merkle_path.iter().map(|node| node.calculate_hash::<L>()).collect();
	match hashes.first() {
		Some(root) if subcache_merkle_roots.contains(root) =>
			trace!(target: "state-proof", "path anchored at subcache root {:?}", root),
		Some(root) =>
			return reject(UnanchoredPathTree, format_args!("{:?} is not a subcache root", root)),
		None => return reject(UnanchoredPathTree, format_args!("no nodes")),
	}

	let links = match link_masks::<L>(merkle_path, &hashes) {
		Some(links) => links,
		None => return UnlinkedNode,
	};

	let key = NibblePath::from_key(encoded_key);
	let mut cursor = 0;
	for (position, node) in merkle_path.iter().enumerate() {
		if position > 0 {
			let mask = links[position - 1];
			match key.get(cursor) {
				Some(nibble) if mask & (1 << nibble) != 0 => (),
				_ =>
					return reject(
						PathMismatch,
						format_args!(
							"no link {:016b} into node {} follows the key at {}",
							mask, position, cursor,
						),
					),
			}
			cursor += 1;
		}

		let path = node.path();
		if cursor + path.len() > key.len() {
			return reject(
				PathMismatch,
				format_args!("path of node {} runs past the end of the key", position),
			)
		}
		if !path.matches_at(&key, cursor) {
			return match value_to_test {
				None => {
					trace!(target: "state-proof", "key diverges inside node {}, key is absent", position);
					ValidNegative
				},
				Some(_) => reject(
					PathMismatch,
					format_args!("path {} of node {} diverges from the key", path, position),
				),
			}
		}
		cursor += path.len();
		trace!(target: "state-proof", "node {} consumed, key cursor at {}", position, cursor);
	}

	// non-empty, checked when anchoring
	let last = &merkle_path[merkle_path.len() - 1];
	match last {
		PatriciaTreeNode::Leaf(leaf) => {
			if cursor != key.len() {
				return reject(
					PathMismatch,
					format_args!("leaf ends at nibble {} of {}", cursor, key.len()),
				)
			}
			if value_to_test == Some(&leaf.value) {
				ValidPositive
			} else {
				reject(LeafValueMismatch, format_args!("leaf holds {:?}", leaf.value))
			}
		},
		PatriciaTreeNode::Branch(branch) => {
			let next = match key.get(cursor) {
				Some(next) => next,
				None => return reject(PathMismatch, format_args!("key ends on a branch")),
			};
			match (branch.link(next), value_to_test) {
				(Some(_), _) => {
					trace!(target: "state-proof", "proof stops above link {:X}", next);
					Inconclusive
				},
				(None, None) => ValidNegative,
				(None, Some(_)) =>
					reject(PathMismatch, format_args!("no link at {:X} for an included key", next)),
			}
		},
	}
}
