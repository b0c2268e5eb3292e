#![no_main]
use libfuzzer_sys::fuzz_target;

use nspack_core::{ContentMeta, Error};

fuzz_target!(|data: &[u8]| {
    // Random bytes must either decode or fail with a typed error;
    // anything else (panic, OOM from a bogus entry count) is a bug.
    let header = [0u8; 0x230];
    let result: Result<ContentMeta, Error> =
        ContentMeta::decode(&mut &data[..], &mut &header[..]);
    let _ = result;
});
