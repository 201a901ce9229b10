//! Core re-chunking engine - Rechunker with streaming API.
//!
//! This module implements the synchronous fixed-size block API. It provides a
//! pure streaming interface:
//!
//! - [`Rechunker`] - Stateful engine that turns arbitrary buffers into blocks
//! - `push()` - Feed data in any size (1 byte, 8KB, 1MB, etc.)
//! - `finish()` - Flush the remainder when the stream ends
//!
//! # Example
//!
//! ```
//! use rechunkrs::{RechunkConfig, Rechunker};
//! use bytes::Bytes;
//!
//! let config = RechunkConfig::new(4)?.with_nopad(true);
//! let mut rechunker = Rechunker::new(config)?;
//!
//! let blocks = rechunker.push(Bytes::from_static(&[1, 2, 3]))?;
//! assert!(blocks.is_empty());
//!
//! let blocks = rechunker.push(Bytes::from_static(&[4, 5, 6, 7, 8]))?;
//! assert_eq!(blocks.len(), 2);
//!
//! // Remainder is zero, nothing left to flush
//! assert!(rechunker.finish().is_none());
//! # Ok::<(), rechunkrs::RechunkError>(())
//! ```

use bytes::Bytes;

use crate::block::{Block, Input};
use crate::buffer::PendingQueue;
use crate::config::RechunkConfig;
use crate::error::RechunkError;
use crate::util;

/// Lifecycle of a [`Rechunker`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StreamState {
    /// Accepting input; each push may emit zero or more blocks.
    Streaming,
    /// Inside `finish()`, emitting at most one final block.
    Flushing,
    /// Terminal. Further pushes are rejected until [`Rechunker::reset`].
    Closed,
}

/// Re-emits a stream of arbitrarily sized buffers as fixed-size blocks.
///
/// # Streaming API
///
/// - Call `push()` with data in any size (1 byte to megabytes)
/// - Each call returns every block completed by that input, in order
/// - Call `finish()` once when the stream ends to emit the remainder
///
/// # Zero-Copy
///
/// When a single input buffer covers a whole block, the block is a slice of
/// that buffer and no bytes are copied. Blocks that straddle buffers are
/// assembled with exactly one copy.
///
/// # Buffering Cost
///
/// Pending input is held as a queue of segments. When more than
/// [`SQUASH_THRESHOLD`](crate::SQUASH_THRESHOLD) segments pile up before a
/// block boundary, they are merged into one, so a flood of tiny buffers does
/// not make block assembly walk an ever-growing queue.
///
/// # Example
///
/// ```
/// use rechunkrs::{RechunkConfig, Rechunker};
///
/// let mut rechunker = Rechunker::new(RechunkConfig::new(5)?)?;
///
/// let mut blocks = rechunker.push(vec![1u8, 2, 3])?;
/// blocks.extend(rechunker.push(vec![4u8, 5, 6, 7, 8])?);
/// blocks.extend(rechunker.finish());
///
/// assert_eq!(&blocks[0].data[..], &[1, 2, 3, 4, 5]);
/// assert_eq!(&blocks[1].data[..], &[6, 7, 8, 0, 0]);
/// # Ok::<(), rechunkrs::RechunkError>(())
/// ```
#[derive(Debug)]
pub struct Rechunker {
    queue: PendingQueue,
    offset: u64,
    emitted: bool,
    state: StreamState,
    config: RechunkConfig,
}

impl Rechunker {
    /// Creates a new rechunker with the given configuration.
    ///
    /// # Errors
    ///
    /// Returns [`RechunkError::InvalidConfig`] if the block size is zero.
    ///
    /// # Example
    ///
    /// ```
    /// use rechunkrs::{RechunkConfig, Rechunker};
    ///
    /// let rechunker = Rechunker::new(RechunkConfig::default())?;
    /// assert_eq!(rechunker.config().block_size(), 512);
    /// # Ok::<(), rechunkrs::RechunkError>(())
    /// ```
    pub fn new(config: RechunkConfig) -> Result<Self, RechunkError> {
        config.validate()?;

        Ok(Self {
            queue: PendingQueue::new(),
            offset: 0,
            emitted: false,
            state: StreamState::Streaming,
            config,
        })
    }

    /// Creates a rechunker with the given block size and the default
    /// remainder policy (zero padding on, no empty emission).
    pub fn with_block_size(block_size: usize) -> Result<Self, RechunkError> {
        Self::new(RechunkConfig::new(block_size)?)
    }

    /// Pushes one input element and returns the blocks it completed.
    ///
    /// # Errors
    ///
    /// Returns [`RechunkError::StreamClosed`] if called after
    /// [`finish`](Self::finish).
    ///
    /// # Example
    ///
    /// ```
    /// use rechunkrs::Rechunker;
    ///
    /// let mut rechunker = Rechunker::with_block_size(2)?;
    /// assert!(rechunker.push(65u8)?.is_empty());
    /// let blocks = rechunker.push(66u8)?;
    /// assert_eq!(&blocks[0].data[..], b"AB");
    /// # Ok::<(), rechunkrs::RechunkError>(())
    /// ```
    pub fn push(&mut self, input: impl Into<Input>) -> Result<Vec<Block>, RechunkError> {
        let mut blocks = Vec::new();
        self.push_into(input, &mut blocks)?;
        Ok(blocks)
    }

    /// Pushes one input element, appending completed blocks to `out`.
    ///
    /// Same as [`push`](Self::push) but reuses a caller-owned vector.
    pub fn push_into(
        &mut self,
        input: impl Into<Input>,
        out: &mut Vec<Block>,
    ) -> Result<(), RechunkError> {
        if self.state != StreamState::Streaming {
            tracing::debug!(state = ?self.state, "push rejected");
            return Err(RechunkError::StreamClosed);
        }

        self.queue.push_segment(input.into().into_bytes());

        let size = self.config.block_size();
        while self.queue.buffered() >= size {
            self.queue.squash();
            let data = self.queue.take(size);
            out.push(self.emit(data, 0));
        }

        Ok(())
    }

    /// Finalizes the stream and returns the final block, if any.
    ///
    /// - A non-empty remainder is emitted, zero padded to a full block when
    ///   padding is on.
    /// - An empty remainder emits nothing, unless `emit_empty` is set and no
    ///   block was emitted yet. Then a block of zeroes (padding on) or an
    ///   empty block (padding off) is emitted.
    ///
    /// The rechunker is closed afterwards; call [`reset`](Self::reset) to
    /// reuse it. Calling `finish()` again returns `None`.
    pub fn finish(&mut self) -> Option<Block> {
        if self.state == StreamState::Closed {
            return None;
        }
        self.state = StreamState::Flushing;

        let remainder = self.queue.buffered();
        let flush = remainder > 0 || (self.config.emit_empty() && !self.emitted);

        let block = if flush {
            let padding = if self.config.zero_padding() {
                self.config.block_size() - remainder
            } else {
                0
            };
            if padding > 0 {
                self.queue.push_segment(util::zeroes(padding));
            }

            let data = self.queue.drain();
            tracing::debug!(remainder, padding, len = data.len(), "flushed final block");
            Some(self.emit(data, padding))
        } else {
            tracing::debug!(remainder, "nothing to flush");
            None
        };

        self.queue.clear();
        self.state = StreamState::Closed;
        block
    }

    /// Resets the rechunker for a new stream.
    ///
    /// Drops pending data and restarts the offset at zero. The configuration
    /// is kept.
    pub fn reset(&mut self) {
        self.queue.clear();
        self.offset = 0;
        self.emitted = false;
        self.state = StreamState::Streaming;
    }

    /// Returns the current lifecycle state.
    pub fn state(&self) -> StreamState {
        self.state
    }

    /// Returns the number of bytes emitted so far, padding included.
    ///
    /// This is the offset of the next block to be emitted.
    pub fn offset(&self) -> u64 {
        self.offset
    }

    /// Returns the number of pending bytes waiting for a full block.
    pub fn pending_len(&self) -> usize {
        self.queue.buffered()
    }

    /// Returns the number of pending input segments.
    pub fn pending_segments(&self) -> usize {
        self.queue.len()
    }

    /// Returns true once at least one block was emitted.
    pub fn has_emitted(&self) -> bool {
        self.emitted
    }

    /// Returns the configuration used by this rechunker.
    pub fn config(&self) -> &RechunkConfig {
        &self.config
    }

    fn emit(&mut self, data: Bytes, padding: usize) -> Block {
        let block = Block {
            offset: self.offset,
            data,
            padding,
        };
        self.offset += block.len() as u64;
        self.emitted = true;
        block
    }
}
