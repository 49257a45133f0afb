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

use crate::{fixtures::*, random_hashes};
use proof_hash::Hash256;
use sha3_hasher::Sha3Hasher;
use state_proof::{merkle_path, prove_merkle, MerkleHashBuilder, MerklePart};

fn calculate_merkle_hash(hashes: &[Hash256]) -> Hash256 {
	let mut builder = MerkleHashBuilder::<Sha3Hasher>::new();
	for hash in hashes {
		builder.update(*hash);
	}
	builder.finalize()
}

fn reference_path() -> Vec<MerklePart<Hash256>> {
	MERKLE_PATH.iter().map(|(hash, is_left)| MerklePart::new(*hash, *is_left)).collect()
}

#[test]
fn build_from_zero_hashes() {
	assert_eq!(calculate_merkle_hash(&[]), Hash256::zero());
}

#[test]
fn build_from_one_hash() {
	let seed = random_hashes(1, 1);
	assert_eq!(calculate_merkle_hash(&seed), seed[0]);
}

#[test]
fn build_from_balanced_tree() {
	assert_eq!(calculate_merkle_hash(&BALANCED_LEAVES), BALANCED_ROOT);
}

#[test]
fn build_from_unbalanced_tree() {
	assert_eq!(calculate_merkle_hash(&BALANCED_LEAVES[..5]), UNBALANCED_ROOT);
}

#[test]
fn changing_order_changes_root() {
	let hashes = random_hashes(2, 8);
	let reordered: Vec<Hash256> = [0, 1, 2, 5, 4, 3, 6, 7].iter().map(|i| hashes[*i]).collect();

	assert_ne!(calculate_merkle_hash(&hashes), calculate_merkle_hash(&reordered));
}

#[test]
fn changing_one_hash_changes_root() {
	let hashes = random_hashes(3, 8);
	let mut altered = hashes.clone();
	altered[4] = random_hashes(4, 1)[0];

	assert_ne!(calculate_merkle_hash(&hashes), calculate_merkle_hash(&altered));
}

#[test]
fn leaf_is_root_without_path() {
	let root = BALANCED_LEAVES[0];
	assert!(prove_merkle::<Sha3Hasher>(&root, &[], &root));
}

#[test]
fn leaf_is_not_root_with_path() {
	let root = BALANCED_LEAVES[0];
	let path = [MerklePart::new(BALANCED_LEAVES[2], true)];
	assert!(!prove_merkle::<Sha3Hasher>(&root, &path, &root));
}

#[test]
fn valid_reference_path() {
	assert!(prove_merkle::<Sha3Hasher>(&MERKLE_LEAF, &reference_path(), &MERKLE_ROOT));
}

#[test]
fn root_mismatch() {
	let mut root = MERKLE_ROOT;
	root.as_mut()[31] ^= 0xff;
	assert!(!prove_merkle::<Sha3Hasher>(&MERKLE_LEAF, &reference_path(), &root));
}

#[test]
fn wrong_branch_position() {
	let mut path = reference_path();
	path[4].is_left = !path[4].is_left;
	assert!(!prove_merkle::<Sha3Hasher>(&MERKLE_LEAF, &path, &MERKLE_ROOT));
}

#[test]
fn generated_paths_for_reference_trees() {
	for leaves in [&BALANCED_LEAVES[..], &BALANCED_LEAVES[..5]] {
		let root = calculate_merkle_hash(leaves);
		for (index, leaf) in leaves.iter().enumerate() {
			let path = merkle_path::<Sha3Hasher>(leaves, index).unwrap();
			assert!(prove_merkle::<Sha3Hasher>(leaf, &path, &root));
		}
	}
}
