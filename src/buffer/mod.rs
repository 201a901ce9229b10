//! Internal buffer management for zero-copy block assembly.
//!
//! This module provides the pending-segment queue the rechunker slices blocks
//! from. It is an implementation detail and not part of the public API.

mod queue;

pub(crate) use queue::PendingQueue;
pub use queue::SQUASH_THRESHOLD;
