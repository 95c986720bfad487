#![no_main]

use bytestream::ByteReader;
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    let mut reader = ByteReader::new(data);
    let mut idx = 0usize;

    // Use input bytes to drive a bounded sequence of operations.
    while idx < data.len() && idx < 1024 {
        let op = data[idx] % 7;
        idx += 1;

        match op {
            0 => {
                let _ = reader.read_u8();
            }
            1 => {
                let _ = reader.read_u16_be();
            }
            2 => {
                let _ = reader.read_u16_le();
            }
            3 => {
                let _ = reader.read_u32_be();
            }
            4 => {
                let _ = reader.read_u64_be();
            }
            5 => {
                let len = usize::from(data[idx.saturating_sub(1)]);
                let _ = reader.read_slice(len);
            }
            _ => {
                let _ = wire::read_tag(&mut reader);
            }
        }
        assert!(reader.position() <= data.len());
    }
});
