//! rechunkrs
//!
//! Streaming fixed-size re-chunking for Rust.
//!
//! `rechunkrs` consumes byte buffers of arbitrary, unpredictable sizes and
//! re-emits them as blocks of exactly one size. It is designed as a small,
//! composable primitive for:
//!
//! - block devices and block-aligned storage formats
//! - fixed-size framing of network payloads
//! - tar-style record padding
//! - cipher and codec front-ends that want whole blocks
//!
//! The crate intentionally:
//! - does NOT perform I/O in its core (adapters for `Read`/`AsyncRead` are thin)
//! - does NOT manage concurrency
//! - does NOT copy bytes that can be sliced
//!
//! It only does one thing: **Buffers of any size in → blocks of one size out**
//!
//! # Remainder policy
//!
//! When the stream ends with a partial block buffered, it is either zero
//! padded to a full block (default) or emitted short (`nopad`). An empty
//! stream emits nothing unless `emit_empty` is set.
//!
//! # Sync
//!
//! ```
//! use rechunkrs::{RechunkConfig, Rechunker, RechunkError};
//!
//! fn main() -> Result<(), RechunkError> {
//!     let mut rechunker = Rechunker::new(RechunkConfig::new(4)?)?;
//!
//!     for input in [&b"abc"[..], &b"defgh"[..], &b"ij"[..]] {
//!         for block in rechunker.push(input)? {
//!             println!("block {} bytes", block.len());
//!         }
//!     }
//!     if let Some(last) = rechunker.finish() {
//!         assert_eq!(&last.data[..], b"ij\0\0");
//!     }
//!     Ok(())
//! }
//! ```
//!
//! # Async (feature = "async-io")
//!
//! ```ignore
//! use futures_util::StreamExt;
//! use rechunkrs::{rechunk_async, Rechunker};
//! use futures_io::AsyncRead;
//!
//! async fn demo<R: AsyncRead + Unpin>(reader: R) -> Result<(), rechunkrs::RechunkError> {
//!     let mut stream = rechunk_async(reader, Rechunker::with_block_size(4096)?);
//!
//!     while let Some(block) = stream.next().await {
//!         let block = block?;
//!         println!("block {}", block.len());
//!     }
//!     Ok(())
//! }
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod block;
mod config;
mod error;
mod rechunker;

mod buffer; // internal (pending segment queue)
mod util;

#[cfg(feature = "async-io")]
mod async_stream;

//
// Public surface (intentionally tiny)
//

pub use block::{Block, Input};
pub use buffer::SQUASH_THRESHOLD;
pub use config::{DEFAULT_BLOCK_SIZE, RechunkConfig};
pub use error::RechunkError;
pub use rechunker::{Blocks, DEFAULT_READ_SIZE, ReadBlocks, Rechunker, StreamState, rechunk_bytes};

#[cfg(feature = "async-io")]
pub use async_stream::{AsyncReadBlocks, BlockStream, rechunk_async, rechunk_stream};
