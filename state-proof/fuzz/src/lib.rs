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

use arbitrary::Arbitrary;
use proof_hash::Hash256;
use state_proof::{
	decode_nodes, encode_nodes, prove_patricia_merkle, PatriciaMerkleProofResult, Sha3Layout,
	TreeLayout,
};

/// Anything that decodes must encode back to the same bytes.
pub fn fuzz_decode_nodes(input: &[u8]) {
	if let Ok(nodes) = decode_nodes::<Sha3Layout>(input) {
		let encoded = encode_nodes::<Sha3Layout>(&nodes).expect("decoded paths fit a byte");
		assert_eq!(&encoded[..], input);
	}
}

#[derive(Debug, Arbitrary)]
pub struct ArbitraryProof {
	key: [u8; 32],
	value: Option<[u8; 32]>,
	encoded_nodes: Vec<u8>,
	roots: Vec<[u8; 32]>,
	/// Add the first node hash to the roots, to get past anchoring.
	anchor: bool,
}

pub fn fuzz_prove_patricia(input: ArbitraryProof) {
	let nodes = match decode_nodes::<Sha3Layout>(&input.encoded_nodes) {
		Ok(nodes) => nodes,
		Err(_) => return,
	};
	let mut roots: Vec<Hash256> = input.roots.into_iter().map(Hash256::new).collect();
	if let (true, Some(first)) = (input.anchor, nodes.first()) {
		roots.push(first.calculate_hash::<Sha3Layout>());
	}
	let state_hash = Sha3Layout::calculate_state_hash(&roots);
	let value = input.value.map(Hash256::new);

	let result =
		prove_patricia_merkle::<Sha3Layout>(&input.key, value.as_ref(), &nodes, &state_hash, &roots);
	match result {
		PatriciaMerkleProofResult::ValidPositive => assert!(value.is_some()),
		PatriciaMerkleProofResult::ValidNegative => assert!(value.is_none()),
		PatriciaMerkleProofResult::StateHashDoesNotMatchRoots =>
			panic!("state hash is computed from the roots"),
		_ => (),
	}
}
