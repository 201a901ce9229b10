//! Basic synchronous re-chunking example with streaming API.
//!
//! Run with:
//!     cargo run --example sync_basic

use bytes::Bytes;
use rechunkrs::{RechunkConfig, Rechunker};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Irregular input: buffers of 1..=3000 bytes
    let inputs: Vec<Bytes> = (1..=40)
        .map(|i| Bytes::from(vec![i as u8; (i * 997) % 3000 + 1]))
        .collect();
    let total_in: usize = inputs.iter().map(Bytes::len).sum();

    // 4 KiB blocks, final block zero padded
    let mut rechunker = Rechunker::new(RechunkConfig::new(4 * 1024)?)?;

    println!("Re-chunking {} buffers ({} bytes)...\n", inputs.len(), total_in);

    let mut total_blocks = 0;
    for input in inputs {
        for block in rechunker.push(input)? {
            total_blocks += 1;
            println!("Block {}: offset={:>8}, len={}", total_blocks, block.offset, block.len());
        }
    }

    // Finalize stream
    if let Some(last) = rechunker.finish() {
        total_blocks += 1;
        println!(
            "Block {}: offset={:>8}, len={}, padding={} (final)",
            total_blocks,
            last.offset,
            last.len(),
            last.padding
        );
    }

    println!("\nTotal: {} blocks, {} bytes out", total_blocks, rechunker.offset());

    Ok(())
}
