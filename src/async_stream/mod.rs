//! Async streaming support for re-chunking.
//!
//! This module adapts `futures_core::Stream` and `futures_io::AsyncRead`
//! sources, making it runtime-agnostic and compatible with tokio, async-std,
//! smol, and other async runtimes.
//!
//! - [`rechunk_stream`] - Block stream over a stream of inputs
//! - [`rechunk_async`] - Block stream over an async reader
//!
//! This module requires the `async-io` feature to be enabled.

mod stream;

pub use stream::{AsyncReadBlocks, BlockStream, rechunk_async, rechunk_stream};
