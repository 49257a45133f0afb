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

//! Compact binary codec for Patricia proof nodes.
//!
//! A node is laid out as
//!
//! ```text
//! marker: u8 | nibble count: u8 | packed path | payload
//! ```
//!
//! where the payload of a leaf is its value digest, and the payload of a
//! branch is a little-endian `u16` link bitmap followed by one digest per set
//! bit in ascending order. Nodes are concatenated without separator.

use crate::{
	nibble::{NibblePath, NIBBLE_LENGTH},
	node::{BranchNode, LeafNode, PatriciaTreeNode},
	rstd::{fmt, vec::Vec},
	TreeLayout, TrieHash,
};
use proof_hash::Hasher;

#[cfg(feature = "std")]
use crate::rstd::Error as StdError;

/// Longest path a node can carry on the wire, in nibbles.
pub const MAX_PATH_NIBBLES: usize = u8::MAX as usize;

const BITMAP_LENGTH: usize = 2;

/// Error decoding or encoding proof nodes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Error {
	/// First byte of a node is neither the leaf nor the branch marker.
	UnknownNodeMarker(u8),
	/// Input ended inside a node.
	UnexpectedEnd {
		/// Bytes required by the field being read.
		needed: usize,
		/// Bytes left in the input.
		remaining: usize,
	},
	/// Odd length path with a non-zero trailing nibble.
	InvalidPathPadding,
	/// Path longer than `MAX_PATH_NIBBLES`.
	PathTooLong(usize),
}

impl fmt::Display for Error {
	fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
		match *self {
			Error::UnknownNodeMarker(marker) => write!(f, "Unknown node marker: {:#04x}", marker),
			Error::UnexpectedEnd { needed, remaining } =>
				write!(f, "Unexpected end of input: needed {} bytes, {} remaining", needed, remaining),
			Error::InvalidPathPadding => write!(f, "Odd node path has non-zero padding nibble"),
			Error::PathTooLong(len) =>
				write!(f, "Node path of {} nibbles exceeds {}", len, MAX_PATH_NIBBLES),
		}
	}
}

#[cfg(feature = "std")]
impl StdError for Error {}

/// Children bitmap codec for radix 16 nodes.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
struct Bitmap(u16);

impl Bitmap {
	fn decode(data: &[u8]) -> Self {
		Bitmap(u16::from_le_bytes([data[0], data[1]]))
	}

	fn value_at(&self, i: usize) -> bool {
		self.0 & (1u16 << i) != 0
	}

	fn encode<I: Iterator<Item = bool>>(has_children: I, output: &mut Vec<u8>) {
		let mut bitmap: u16 = 0;
		let mut cursor: u16 = 1;
		for v in has_children {
			if v {
				bitmap |= cursor
			}
			cursor <<= 1;
		}
		output.extend_from_slice(&bitmap.to_le_bytes());
	}
}

struct ByteSliceInput<'a> {
	data: &'a [u8],
	offset: usize,
}

impl<'a> ByteSliceInput<'a> {
	fn new(data: &'a [u8]) -> Self {
		ByteSliceInput { data, offset: 0 }
	}

	fn remaining_len(&self) -> usize {
		self.data.len() - self.offset
	}

	fn take(&mut self, count: usize) -> Result<&'a [u8], Error> {
		let remaining = self.remaining_len();
		if count > remaining {
			return Err(Error::UnexpectedEnd { needed: count, remaining })
		}

		let slice = &self.data[self.offset..self.offset + count];
		self.offset += count;
		Ok(slice)
	}

	fn read_byte(&mut self) -> Result<u8, Error> {
		Ok(self.take(1)?[0])
	}

	fn read_hash<L: TreeLayout>(&mut self) -> Result<TrieHash<L>, Error> {
		let mut hash: TrieHash<L> = Default::default();
		hash.as_mut().copy_from_slice(self.take(<L::Hash as Hasher>::LENGTH)?);
		Ok(hash)
	}
}

/// Kind of node, as given by its marker byte.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum NodeHeader {
	Leaf,
	Branch,
}

impl NodeHeader {
	fn decode<L: TreeLayout>(marker: u8) -> Result<Self, Error> {
		if marker == L::LEAF_MARKER {
			Ok(NodeHeader::Leaf)
		} else if marker == L::BRANCH_MARKER {
			Ok(NodeHeader::Branch)
		} else {
			Err(Error::UnknownNodeMarker(marker))
		}
	}
}

fn decode_node<L: TreeLayout>(
	input: &mut ByteSliceInput,
) -> Result<PatriciaTreeNode<TrieHash<L>>, Error> {
	let header = NodeHeader::decode::<L>(input.read_byte()?)?;
	let nibble_count = input.read_byte()? as usize;
	let packed = input.take((nibble_count + 1) / 2)?;
	let path = NibblePath::from_packed(packed, nibble_count)?;

	Ok(match header {
		NodeHeader::Leaf => LeafNode::new(path, input.read_hash::<L>()?).into(),
		NodeHeader::Branch => {
			let bitmap = Bitmap::decode(input.take(BITMAP_LENGTH)?);
			let mut branch = BranchNode::new(path);
			for i in 0..NIBBLE_LENGTH {
				if bitmap.value_at(i) {
					branch.links[i] = Some(input.read_hash::<L>()?);
				}
			}
			branch.into()
		},
	})
}

/// Decode every node of `data`, in order.
///
/// Either the whole buffer decodes or an error is returned: a trailing
/// partial node is an error, never silently dropped.
pub fn decode_nodes<L: TreeLayout>(data: &[u8]) -> Result<Vec<PatriciaTreeNode<TrieHash<L>>>, Error> {
	let mut input = ByteSliceInput::new(data);
	let mut nodes = Vec::new();
	while input.remaining_len() > 0 {
		nodes.push(decode_node::<L>(&mut input)?);
	}
	Ok(nodes)
}

fn encode_path(path: &NibblePath, output: &mut Vec<u8>) -> Result<(), Error> {
	if path.len() > MAX_PATH_NIBBLES {
		return Err(Error::PathTooLong(path.len()))
	}
	output.push(path.len() as u8);
	output.extend_from_slice(path.as_packed());
	Ok(())
}

/// Encode `nodes` back to their wire form. Inverse of `decode_nodes`.
pub fn encode_nodes<L: TreeLayout>(nodes: &[PatriciaTreeNode<TrieHash<L>>]) -> Result<Vec<u8>, Error> {
	let mut output = Vec::new();
	for node in nodes {
		match node {
			PatriciaTreeNode::Leaf(leaf) => {
				output.push(L::LEAF_MARKER);
				encode_path(&leaf.path, &mut output)?;
				output.extend_from_slice(leaf.value.as_ref());
			},
			PatriciaTreeNode::Branch(branch) => {
				output.push(L::BRANCH_MARKER);
				encode_path(&branch.path, &mut output)?;
				Bitmap::encode(branch.links.iter().map(Option::is_some), &mut output);
				for link in branch.links.iter().flatten() {
					output.extend_from_slice(link.as_ref());
				}
			},
		}
	}
	Ok(output)
}
