#![no_main]

use libfuzzer_sys::fuzz_target;
use state_proof_fuzz::ArbitraryProof;

fuzz_target!(|proof: ArbitraryProof| {
	state_proof_fuzz::fuzz_prove_patricia(proof);
});
