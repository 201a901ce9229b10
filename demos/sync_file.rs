//! File re-chunking example.
//!
//! Run with:
//!     cargo run --example sync_file -- /path/to/file [block_size]

use std::env;
use std::fs::File;

use rechunkrs::{RechunkConfig, Rechunker};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let path = env::args()
        .nth(1)
        .unwrap_or_else(|| "Cargo.toml".to_string());
    let block_size = match env::args().nth(2) {
        Some(arg) => arg.parse()?,
        None => 512,
    };

    println!("Re-chunking file: {} into {} byte blocks\n", path, block_size);

    let file = File::open(&path)?;
    let metadata = file.metadata()?;
    println!("File size: {} bytes\n", metadata.len());

    // Short final block instead of padding
    let config = RechunkConfig::new(block_size)?.with_nopad(true);
    let rechunker = Rechunker::new(config)?;

    let mut total_blocks = 0;
    let mut total_bytes = 0;

    for block in rechunker.read_blocks(file) {
        let block = block?;
        total_blocks += 1;
        total_bytes += block.len();
        println!(
            "Block {}: offset={:>10}, len={:>8}",
            total_blocks,
            block.offset,
            block.len()
        );
    }

    println!("\nTotal: {} blocks, {} bytes", total_blocks, total_bytes);

    Ok(())
}
