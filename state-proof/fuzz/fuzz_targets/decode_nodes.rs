#![no_main]

use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
	state_proof_fuzz::fuzz_decode_nodes(data);
});
