//! Async streaming re-chunking example.
//!
//! Demonstrates adapting a stream of irregular buffers into a stream of
//! fixed-size blocks.
//!
//! Run with:
//!     cargo run --example async_stream --features async-io

use std::time::Duration;

use bytes::Bytes;
use futures_util::{StreamExt, stream};
use rechunkrs::{RechunkConfig, Rechunker, rechunk_stream};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let data: Vec<u8> = (0..100_000).map(|i| (i % 256) as u8).collect();

    println!("Async re-chunking {} bytes of data...\n", data.len());

    // Simulate network packets of varying size arriving with a delay
    let packets: Vec<Bytes> = data
        .chunks(1500)
        .map(Bytes::copy_from_slice)
        .collect();
    let inputs = stream::iter(packets).then(|packet| async move {
        tokio::time::sleep(Duration::from_millis(1)).await;
        packet
    });

    let config = RechunkConfig::new(16 * 1024)?;
    let mut blocks = Box::pin(rechunk_stream(inputs, Rechunker::new(config)?)?);

    let mut total_blocks = 0;
    while let Some(block) = blocks.next().await {
        total_blocks += 1;
        println!("  {}", block);
    }

    println!("\nTotal: {} blocks", total_blocks);

    Ok(())
}
