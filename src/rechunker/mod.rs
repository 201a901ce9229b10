//! Re-chunking engine for processing byte streams.
//!
//! - [`Rechunker`] - Stateful fixed-size block engine with `push()`/`finish()` API
//! - [`Blocks`] / [`ReadBlocks`] - Pull-based iterator adapters

mod engine;
mod iter;

pub use engine::{Rechunker, StreamState};
pub use iter::{Blocks, DEFAULT_READ_SIZE, ReadBlocks, rechunk_bytes};
