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

//! Patricia tree nodes, owned and generic over the digest type `H`.

use crate::{
	nibble::{NibblePath, NIBBLE_LENGTH},
	TreeLayout,
};
use proof_hash::Hasher;
use smallvec::SmallVec;

/// Terminal node holding the digest of a value.
#[derive(Clone, PartialEq, Eq, Debug)]
pub struct LeafNode<H> {
	/// Nibbles between the parent link and the end of the key.
	pub path: NibblePath,
	/// Digest of the stored value.
	pub value: H,
}

impl<H: AsRef<[u8]>> LeafNode<H> {
	pub fn new(path: NibblePath, value: H) -> Self {
		LeafNode { path, value }
	}

	/// `hash(encoded_path || value)`.
	pub fn calculate_hash<L>(&self) -> H
	where
		L: TreeLayout,
		L::Hash: Hasher<Out = H>,
	{
		let path = self.path.encoded(true);
		L::Hash::hash_concat(&[&path[..], self.value.as_ref()])
	}
}

/// Sixteen way node. `None` is an absent link, which is not the same as a
/// present link whose digest happens to be zero.
#[derive(Clone, PartialEq, Eq, Debug)]
pub struct BranchNode<H> {
	/// Nibbles shared by every key below this branch.
	pub path: NibblePath,
	/// Child node digests indexed by nibble.
	pub links: [Option<H>; NIBBLE_LENGTH],
}

impl<H: AsRef<[u8]> + Copy> BranchNode<H> {
	/// Branch without links.
	pub fn new(path: NibblePath) -> Self {
		BranchNode { path, links: [None; NIBBLE_LENGTH] }
	}

	/// Set the link at `nibble`, builder style. Only the low 4 bits are used.
	pub fn with_link(mut self, nibble: u8, link: H) -> Self {
		self.links[(nibble & 0x0f) as usize] = Some(link);
		self
	}

	/// Link under `nibble`.
	pub fn link(&self, nibble: u8) -> Option<&H> {
		self.links.get(nibble as usize).and_then(Option::as_ref)
	}

	/// Bit `i` is set when link `i` is present.
	pub fn link_mask(&self) -> u16 {
		self.links
			.iter()
			.enumerate()
			.filter(|(_, link)| link.is_some())
			.fold(0u16, |mask, (i, _)| mask | 1 << i)
	}

	/// Present links in ascending nibble order.
	pub fn present_links(&self) -> impl Iterator<Item = (u8, &H)> + '_ {
		self.links
			.iter()
			.enumerate()
			.filter_map(|(i, link)| link.as_ref().map(|link| (i as u8, link)))
	}

	/// `hash(encoded_path || link_0 || .. || link_15)`, absent links replaced
	/// by the layout placeholder.
	pub fn calculate_hash<L>(&self) -> H
	where
		L: TreeLayout,
		L::Hash: Hasher<Out = H>,
	{
		let path = self.path.encoded(false);
		let absent = L::absent_link();
		let mut parts: SmallVec<[&[u8]; NIBBLE_LENGTH + 1]> = SmallVec::new();
		parts.push(&path[..]);
		for link in self.links.iter() {
			parts.push(link.as_ref().unwrap_or(&absent).as_ref());
		}
		L::Hash::hash_concat(&parts)
	}
}

/// A node of a Patricia-Merkle proof.
#[derive(Clone, PartialEq, Eq, Debug)]
pub enum PatriciaTreeNode<H> {
	Leaf(LeafNode<H>),
	Branch(BranchNode<H>),
}

impl<H: AsRef<[u8]> + Copy> PatriciaTreeNode<H> {
	/// Digest identifying this node, as referenced by its parent link.
	pub fn calculate_hash<L>(&self) -> H
	where
		L: TreeLayout,
		L::Hash: Hasher<Out = H>,
	{
		match self {
			PatriciaTreeNode::Leaf(leaf) => leaf.calculate_hash::<L>(),
			PatriciaTreeNode::Branch(branch) => branch.calculate_hash::<L>(),
		}
	}

	pub fn path(&self) -> &NibblePath {
		match self {
			PatriciaTreeNode::Leaf(leaf) => &leaf.path,
			PatriciaTreeNode::Branch(branch) => &branch.path,
		}
	}

	pub fn is_leaf(&self) -> bool {
		matches!(self, PatriciaTreeNode::Leaf(_))
	}

	pub fn as_leaf(&self) -> Option<&LeafNode<H>> {
		match self {
			PatriciaTreeNode::Leaf(leaf) => Some(leaf),
			PatriciaTreeNode::Branch(_) => None,
		}
	}

	pub fn as_branch(&self) -> Option<&BranchNode<H>> {
		match self {
			PatriciaTreeNode::Branch(branch) => Some(branch),
			PatriciaTreeNode::Leaf(_) => None,
		}
	}
}

impl<H> From<LeafNode<H>> for PatriciaTreeNode<H> {
	fn from(leaf: LeafNode<H>) -> Self {
		PatriciaTreeNode::Leaf(leaf)
	}
}

impl<H> From<BranchNode<H>> for PatriciaTreeNode<H> {
	fn from(branch: BranchNode<H>) -> Self {
		PatriciaTreeNode::Branch(branch)
	}
}
