#![no_main]

use bytes::Bytes;
use libfuzzer_sys::fuzz_target;
use rechunkrs::{RechunkConfig, Rechunker};

fuzz_target!(|input: (u16, bool, bool, Vec<u8>, Vec<u8>)| {
    let (size, nopad, emit_empty, cuts, data) = input;
    let size = (size as usize % 4096) + 1;

    let config = RechunkConfig::new(size)
        .unwrap()
        .with_nopad(nopad)
        .with_emit_empty(emit_empty);
    let mut rechunker = Rechunker::new(config).unwrap();

    // Split the data at fuzzer-chosen lengths
    let data = Bytes::from(data);
    let mut blocks = Vec::new();
    let mut pos = 0;
    for cut in cuts.iter().map(|&c| c as usize) {
        let end = (pos + cut).min(data.len());
        blocks.extend(rechunker.push(data.slice(pos..end)).unwrap());
        pos = end;
    }
    blocks.extend(rechunker.push(data.slice(pos..)).unwrap());

    // Verify: floor(L / S) full blocks during push
    assert_eq!(blocks.len(), data.len() / size);
    assert!(blocks.iter().all(|b| b.len() == size));

    let last = rechunker.finish();
    let rem = data.len() % size;
    match &last {
        Some(block) if config.zero_padding() => {
            assert_eq!(block.len(), size);
            assert_eq!(block.padding, size - rem);
        }
        Some(block) => assert_eq!(block.len(), rem),
        None => assert!(rem == 0 && !(emit_empty && data.is_empty())),
    }

    // Verify: concatenation reproduces input, padded with zeroes only
    let mut out = Vec::with_capacity(data.len() + size);
    let mut expected_offset = 0u64;
    for block in blocks.iter().chain(last.iter()) {
        assert_eq!(block.offset, expected_offset);
        expected_offset += block.len() as u64;
        out.extend_from_slice(&block.data);
    }
    assert_eq!(&out[..data.len()], &data[..]);
    assert!(out[data.len()..].iter().all(|&b| b == 0));
});
