#![no_main]

use codec::{decode_value, encode, unserialize, CodecOptions, TypeRegistry};
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    let options = CodecOptions::for_testing();
    let mut registry = TypeRegistry::new();
    registry.register_name("Point").register_name("User");

    // Whatever decodes must re-encode to a fixed point.
    if let Ok(decoded) = unserialize(data, &options, Some(&registry)) {
        let bytes = encode(&decoded.value).expect("decoded value re-encodes");
        let again = unserialize(&bytes, &options, Some(&registry)).expect("re-encoded value decodes");
        assert_eq!(encode(&again.value).expect("second encode"), bytes);
    }

    // Walk the input as a sequence of values.
    let mut offset = 0usize;
    while offset < data.len() {
        match decode_value(data, offset, &options, None) {
            Ok((_, next)) => offset = next,
            Err(_) => break,
        }
    }
});
