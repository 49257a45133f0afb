// Copyright 2020 Parity Technologies
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

use crate::fixtures::*;
use hex_literal::hex;
use proof_hash::Hash256;
use state_proof::{
	decode_nodes, encode_nodes, node_codec::Error, BranchNode, PatriciaTreeNode, Sha3Layout,
};

const LEAF_VALUE: &str = "3A50C5BF83CBA3370CF4E4AC0FC5A6FFB0E29501F66DA12DE25FFB13A419BA77";
const ODD_LEAF_VALUE: &str = "F48F12376B7C72F97E1533DE6DDB6F957DAB4F9031F959261AA2C5B655C864AA";

fn decode_single(hex: String) -> PatriciaTreeNode<Hash256> {
	let mut nodes = decode_nodes::<Sha3Layout>(&bytes(&hex)).unwrap();
	assert_eq!(nodes.len(), 1);
	nodes.remove(0)
}

fn assert_default_branch_links(branch: &BranchNode<Hash256>) {
	let expected: [Option<Hash256>; 16] = [
		None,
		Some(Hash256::new(hex!("541A465385264D8C8AF8F16946B1FCFF37F5131E3F710119699D65587C39D5F2"))),
		Some(Hash256::new(hex!("0DB344B8A1DD95EB3DB12C1BC150EE6657A8F440F8ADC6BEF724519D4403A58B"))),
		None,
		None,
		Some(Hash256::new(hex!("5EC30C0C07151672EC8A9234FC12BE35F69B07CC4E69896E2D003905611E2126"))),
		None,
		None,
		Some(Hash256::new(hex!("9DE0488DD979C15D1150FB5B2C87E64DC6E07A935EEDBC1850D21EBBE59DE0C8"))),
		None,
		Some(Hash256::new(hex!("130B276733332C7CA5D059202F352FE4887D381301573A4789C622C29B4B4DE4"))),
		None,
		Some(Hash256::new(hex!("88CEB3B43A69784787E791D703FF61D7C9EBE0F70719650F94BD39DD6D941C63"))),
		None,
		None,
		None,
	];
	assert_eq!(branch.links, expected);
	assert_eq!(branch.link_mask(), 0x1526);
}

#[test]
fn leaf_with_even_path() {
	let node = decode_single(format!("FF{}{}", ENCODED_EVEN_PATH, LEAF_VALUE));
	let leaf = node.as_leaf().unwrap();

	assert_eq!(leaf.path.len(), 60);
	assert_eq!(leaf.path.as_packed(), &bytes(&ENCODED_EVEN_PATH[2..])[..]);
	assert_eq!(leaf.value, LEAF_VALUE.parse::<Hash256>().unwrap());
	assert_eq!(
		node.calculate_hash::<Sha3Layout>(),
		Hash256::new(hex!("9DE0488DD979C15D1150FB5B2C87E64DC6E07A935EEDBC1850D21EBBE59DE0C8")),
	);
}

#[test]
fn leaf_with_odd_path() {
	let node = decode_single(format!("FF{}{}", ENCODED_ODD_PATH, ODD_LEAF_VALUE));
	let leaf = node.as_leaf().unwrap();

	assert_eq!(leaf.path.len(), 61);
	assert_eq!(leaf.path.as_packed(), &bytes(&ENCODED_ODD_PATH[2..])[..]);
	assert_eq!(leaf.value, ODD_LEAF_VALUE.parse::<Hash256>().unwrap());
	assert_eq!(
		node.calculate_hash::<Sha3Layout>(),
		Hash256::new(hex!("89C46989937A631F9D5DE7936EAC12CA5924E37DE3336F2B158CFAC7AC377F60")),
	);
}

#[test]
fn branch_with_no_path() {
	let node = decode_single(format!("0000{}", ENCODED_BRANCH_LINKS));
	let branch = node.as_branch().unwrap();

	assert!(branch.path.is_empty());
	assert_default_branch_links(branch);
	assert_eq!(
		node.calculate_hash::<Sha3Layout>(),
		Hash256::new(hex!("57E684CC77BECEF30EAD8C81EC812374AB3FF6DB82E0842DFA6DA2AC7C897DEF")),
	);
}

#[test]
fn branch_with_even_path() {
	let node = decode_single(format!("00{}{}", ENCODED_EVEN_PATH, ENCODED_BRANCH_LINKS));
	let branch = node.as_branch().unwrap();

	assert_eq!(branch.path.len(), 60);
	assert_default_branch_links(branch);
	assert_eq!(
		node.calculate_hash::<Sha3Layout>(),
		Hash256::new(hex!("DD7BE080F4DEBC3ECA2CEEE49121CC2E8C159CF224E9FF6363AB5282E596697F")),
	);
}

#[test]
fn branch_with_odd_path() {
	let node = decode_single(format!("00{}{}", ENCODED_ODD_PATH, ENCODED_BRANCH_LINKS));
	let branch = node.as_branch().unwrap();

	assert_eq!(branch.path.len(), 61);
	assert_default_branch_links(branch);
	assert_eq!(
		node.calculate_hash::<Sha3Layout>(),
		Hash256::new(hex!("78FAD74CE33005103D4948D94D3B648EFE702F6A507315327D4925D79D7B384E")),
	);
}

#[test]
fn unknown_marker() {
	let buffer = bytes(&format!("FE{}{}", ENCODED_EVEN_PATH, LEAF_VALUE));
	assert_eq!(decode_nodes::<Sha3Layout>(&buffer), Err(Error::UnknownNodeMarker(0xfe)));
}

#[test]
fn multiple_nodes() {
	let nodes = decode_nodes::<Sha3Layout>(&bytes(POSITIVE_PROOF)).unwrap();
	let hashes: Vec<Hash256> = nodes.iter().map(|node| node.calculate_hash::<Sha3Layout>()).collect();

	assert_eq!(
		hashes,
		vec![
			Hash256::new(hex!("7AA6503C54F63578FC4301E7EA785760FA7F6677A1DE322A9DE3BFA639BBF070")),
			Hash256::new(hex!("B3FC1F206624E25A33A71B1E9F646D7FAD46B43DA110C3A144AF8E6A1ACE853D")),
			Hash256::new(hex!("46A229B981BD2624101CC1C1E57BF1E78D806C3C7D7CE3550705733E53FA59BF")),
			Hash256::new(hex!("180DBFCF9B96913B67596692688236DBCD987A43289B970AC3B2269F4601F441")),
			Hash256::new(hex!("8E321E29839084810B0CD552497357ED73D07C200E09F338EBAA7053954D40E1")),
		],
	);
	assert!(nodes[..4].iter().all(|node| node.as_branch().is_some()));
	assert!(nodes[4].is_leaf());
}

#[test]
fn truncated_proof() {
	let buffer = bytes(NEGATIVE_PROOF);
	for cut in [1, 31, buffer.len() - 1] {
		assert!(matches!(
			decode_nodes::<Sha3Layout>(&buffer[..buffer.len() - cut]),
			Err(Error::UnexpectedEnd { .. }),
		));
	}
}

#[test]
fn odd_path_padding() {
	let mut buffer = bytes(&format!("FF{}{}", ENCODED_ODD_PATH, ODD_LEAF_VALUE));
	// low nibble of the last path byte
	buffer[32] |= 0x01;
	assert_eq!(decode_nodes::<Sha3Layout>(&buffer), Err(Error::InvalidPathPadding));
}

#[test]
fn reencode_reference_proofs() {
	for proof in [POSITIVE_PROOF, NEGATIVE_PROOF] {
		let buffer = bytes(proof);
		let nodes = decode_nodes::<Sha3Layout>(&buffer).unwrap();
		assert_eq!(encode_nodes::<Sha3Layout>(&nodes).unwrap(), buffer);
	}
}
