#![no_main]

use bytes::Bytes;
use libfuzzer_sys::fuzz_target;
use rechunkrs::{RechunkConfig, Rechunker};
use std::io::Cursor;

fuzz_target!(|input: (u8, u8, Vec<u8>)| {
    let (size, read_size, data) = input;
    let config = RechunkConfig::new(size as usize + 1).unwrap().with_nopad(true);

    // Reader adapter
    let from_reader = Rechunker::new(config)
        .unwrap()
        .read_blocks(Cursor::new(data.clone()))
        .with_read_size(read_size as usize)
        .collect::<Result<Vec<_>, _>>()
        .unwrap();

    // Single push
    let mut rechunker = Rechunker::new(config).unwrap();
    let mut direct = rechunker.push(Bytes::from(data)).unwrap();
    direct.extend(rechunker.finish());

    // Verify: block boundaries do not depend on read sizes
    assert_eq!(from_reader, direct);
});
