use std::thread;

use codec::{
    encode, serialize, unserialize, CodecError, CodecOptions, Value, DEFAULT_MAX_DEPTH,
};

/// Default stack of a spawned test thread.
const TEST_THREAD_STACK: usize = 2 * 1024 * 1024;

fn nested_bytes(depth: usize) -> Vec<u8> {
    let mut bytes = Vec::with_capacity(depth * 2 + 1);
    for _ in 0..depth {
        bytes.extend_from_slice(&[0x81, 0x01]);
    }
    bytes.push(0x01);
    bytes
}

fn nested_value(depth: usize) -> Value {
    (0..depth).fold(Value::Int(1), |inner, _| Value::map([(Value::Int(1), inner)]))
}

fn on_small_stack(test: impl FnOnce() + Send + 'static) {
    thread::Builder::new()
        .stack_size(TEST_THREAD_STACK)
        .spawn(test)
        .unwrap()
        .join()
        .unwrap();
}

#[test]
fn default_depth_decodes_on_small_stack() {
    on_small_stack(|| {
        let options = CodecOptions::default();
        for depth in [DEFAULT_MAX_DEPTH - 1, DEFAULT_MAX_DEPTH] {
            let bytes = nested_bytes(depth);
            let decoded = unserialize(&bytes, &options, None).unwrap();
            assert_eq!(decoded.consumed, bytes.len());
            assert_eq!(encode(&decoded.value).unwrap(), bytes);
        }
    });
}

#[test]
fn past_default_depth_fails_on_small_stack() {
    on_small_stack(|| {
        let options = CodecOptions::default();
        let err = unserialize(&nested_bytes(DEFAULT_MAX_DEPTH + 1), &options, None).unwrap_err();
        assert_eq!(
            err,
            CodecError::DepthLimitExceeded {
                limit: DEFAULT_MAX_DEPTH
            }
        );

        let err = serialize(&nested_value(DEFAULT_MAX_DEPTH + 1), &options).unwrap_err();
        assert_eq!(
            err,
            CodecError::DepthLimitExceeded {
                limit: DEFAULT_MAX_DEPTH
            }
        );
    });
}

#[test]
fn default_depth_encodes_on_small_stack() {
    on_small_stack(|| {
        let value = nested_value(DEFAULT_MAX_DEPTH);
        let bytes = serialize(&value, &CodecOptions::default()).unwrap().bytes;
        assert_eq!(bytes, nested_bytes(DEFAULT_MAX_DEPTH));
    });
}
