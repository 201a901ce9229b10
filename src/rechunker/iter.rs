//! Pull-based adapters over [`Rechunker`].
//!
//! - [`Blocks`] - Iterator of blocks over an iterator of inputs
//! - [`ReadBlocks`] - Iterator of blocks over a [`std::io::Read`] source
//!
//! # Example
//!
//! ```
//! use rechunkrs::Rechunker;
//! use std::io::Cursor;
//!
//! let rechunker = Rechunker::with_block_size(4)?;
//! let blocks = rechunker
//!     .read_blocks(Cursor::new(b"hello world"))
//!     .collect::<Result<Vec<_>, _>>()?;
//!
//! assert_eq!(blocks.len(), 3);
//! assert_eq!(&blocks[2].data[..], b"rld\0");
//! # Ok::<(), rechunkrs::RechunkError>(())
//! ```

use std::collections::VecDeque;
use std::io::{ErrorKind, Read};

use bytes::BytesMut;

use super::{Rechunker, StreamState};
use crate::block::{Block, Input};
use crate::config::RechunkConfig;
use crate::error::RechunkError;

/// Size of each read issued by [`ReadBlocks`].
pub const DEFAULT_READ_SIZE: usize = 8 * 1024;

impl Rechunker {
    /// Turns an iterator of inputs into a lazy iterator of blocks.
    ///
    /// Inputs are pulled only as needed to produce the next block. After the
    /// inputs run out, the final (flushed) block is yielded, if any.
    ///
    /// A rechunker that already holds pending bytes keeps them; they come out
    /// ahead of the new inputs.
    ///
    /// # Errors
    ///
    /// Returns [`RechunkError::StreamClosed`] if the rechunker was already
    /// finished. Call [`reset`](Rechunker::reset) first to reuse it.
    ///
    /// # Example
    ///
    /// ```
    /// use rechunkrs::{RechunkConfig, Rechunker};
    ///
    /// let rechunker = Rechunker::new(RechunkConfig::new(4)?.with_nopad(true))?;
    /// let lens: Vec<usize> = rechunker
    ///     .blocks([vec![1u8, 2, 3], vec![4, 5, 6, 7, 8, 9]])?
    ///     .map(|b| b.len())
    ///     .collect();
    ///
    /// assert_eq!(lens, vec![4, 4, 1]);
    /// # Ok::<(), rechunkrs::RechunkError>(())
    /// ```
    pub fn blocks<I>(self, inputs: I) -> Result<Blocks<I::IntoIter>, RechunkError>
    where
        I: IntoIterator,
        I::Item: Into<Input>,
    {
        if self.state() != StreamState::Streaming {
            return Err(RechunkError::StreamClosed);
        }

        Ok(Blocks {
            inputs: inputs.into_iter(),
            rechunker: self,
            ready: VecDeque::new(),
            scratch: Vec::new(),
            finished: false,
        })
    }

    /// Creates a block iterator from a reader.
    ///
    /// Reads up to [`DEFAULT_READ_SIZE`] bytes at a time. Block boundaries do
    /// not depend on how the reader splits its data.
    pub fn read_blocks<R: Read>(self, reader: R) -> ReadBlocks<R> {
        ReadBlocks {
            reader,
            rechunker: self,
            ready: VecDeque::new(),
            scratch: Vec::new(),
            read_size: DEFAULT_READ_SIZE,
            finished: false,
        }
    }
}

/// Re-chunks an in-memory buffer.
///
/// Convenience for data that is already in memory. Blocks fully inside
/// `data` are zero-copy slices of it.
///
/// # Errors
///
/// Returns [`RechunkError::InvalidConfig`] if the configuration is invalid.
///
/// # Example
///
/// ```
/// use rechunkrs::{rechunk_bytes, RechunkConfig};
///
/// let blocks = rechunk_bytes(RechunkConfig::new(3)?, &b"abcdefg"[..])?;
/// assert_eq!(blocks.len(), 3);
/// assert_eq!(blocks[2].padding, 2);
/// # Ok::<(), rechunkrs::RechunkError>(())
/// ```
pub fn rechunk_bytes(
    config: RechunkConfig,
    data: impl Into<Input>,
) -> Result<Vec<Block>, RechunkError> {
    let mut rechunker = Rechunker::new(config)?;
    let mut blocks = rechunker.push(data)?;
    blocks.extend(rechunker.finish());
    Ok(blocks)
}

/// An iterator that yields blocks from an iterator of inputs.
///
/// Created by [`Rechunker::blocks`].
#[derive(Debug)]
pub struct Blocks<I> {
    inputs: I,
    rechunker: Rechunker,
    ready: VecDeque<Block>,
    scratch: Vec<Block>,
    finished: bool,
}

impl<I> Blocks<I> {
    /// Returns the underlying rechunker.
    pub fn rechunker(&self) -> &Rechunker {
        &self.rechunker
    }
}

impl<I> Iterator for Blocks<I>
where
    I: Iterator,
    I::Item: Into<Input>,
{
    type Item = Block;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            if let Some(block) = self.ready.pop_front() {
                return Some(block);
            }
            if self.finished {
                return None;
            }

            match self.inputs.next() {
                Some(input) => {
                    // `blocks()` only accepts a streaming rechunker and only
                    // the branch below closes it.
                    if self.rechunker.push_into(input, &mut self.scratch).is_err() {
                        self.finished = true;
                        return None;
                    }
                    self.ready.extend(self.scratch.drain(..));
                }
                None => {
                    self.finished = true;
                    return self.rechunker.finish();
                }
            }
        }
    }
}

/// An iterator that yields blocks from a reader.
///
/// Created by [`Rechunker::read_blocks`]. An I/O error is yielded once and
/// ends the iteration; reads interrupted by a signal are retried.
#[derive(Debug)]
pub struct ReadBlocks<R> {
    reader: R,
    rechunker: Rechunker,
    ready: VecDeque<Block>,
    scratch: Vec<Block>,
    read_size: usize,
    finished: bool,
}

impl<R> ReadBlocks<R> {
    /// Sets how many bytes are requested from the reader per read.
    ///
    /// A size of zero is treated as one.
    pub fn with_read_size(mut self, read_size: usize) -> Self {
        self.read_size = read_size.max(1);
        self
    }

    /// Returns the underlying rechunker.
    pub fn rechunker(&self) -> &Rechunker {
        &self.rechunker
    }
}

impl<R: Read> Iterator for ReadBlocks<R> {
    type Item = Result<Block, RechunkError>;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            if let Some(block) = self.ready.pop_front() {
                return Some(Ok(block));
            }
            if self.finished {
                return None;
            }

            let mut buf = BytesMut::zeroed(self.read_size);
            match self.reader.read(&mut buf) {
                Ok(0) => {
                    // End of stream - emit remainder if any
                    self.finished = true;
                    return self.rechunker.finish().map(Ok);
                }
                Ok(n) => {
                    buf.truncate(n);
                    if let Err(e) = self.rechunker.push_into(buf, &mut self.scratch) {
                        self.finished = true;
                        return Some(Err(e));
                    }
                    self.ready.extend(self.scratch.drain(..));
                }
                Err(e) if e.kind() == ErrorKind::Interrupted => continue,
                Err(e) => {
                    tracing::debug!(error = %e, "read failed, ending block stream");
                    self.finished = true;
                    return Some(Err(e.into()));
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    struct FailingReader {
        served: bool,
    }

    impl Read for FailingReader {
        fn read(&mut self, buf: &mut [u8]) -> std::io::Result<usize> {
            if !self.served {
                self.served = true;
                buf[..3].copy_from_slice(b"abc");
                return Ok(3);
            }
            Err(std::io::Error::other("boom"))
        }
    }

    struct InterruptedOnce {
        interrupted: bool,
        data: Cursor<Vec<u8>>,
    }

    impl Read for InterruptedOnce {
        fn read(&mut self, buf: &mut [u8]) -> std::io::Result<usize> {
            if !self.interrupted {
                self.interrupted = true;
                return Err(std::io::Error::from(ErrorKind::Interrupted));
            }
            self.data.read(buf)
        }
    }

    #[test]
    fn test_blocks_rejects_closed_rechunker() {
        let mut rechunker = Rechunker::with_block_size(4).unwrap();
        rechunker.finish();

        let result = rechunker.blocks(vec![vec![1u8, 2, 3, 4]]);
        assert!(matches!(result, Err(RechunkError::StreamClosed)));
    }

    #[test]
    fn test_blocks_after_reset() {
        let mut rechunker = Rechunker::with_block_size(4).unwrap();
        rechunker.finish();
        rechunker.reset();

        let blocks: Vec<_> = rechunker
            .blocks(vec![vec![1u8, 2, 3, 4]])
            .unwrap()
            .collect();
        assert_eq!(blocks.len(), 1);
        assert_eq!(&blocks[0].data[..], &[1, 2, 3, 4]);
    }

    #[test]
    fn test_blocks_keeps_pending_bytes() {
        let mut rechunker = Rechunker::new(RechunkConfig::new(4).unwrap().with_nopad(true)).unwrap();
        rechunker.push(vec![1u8, 2]).unwrap();

        let blocks: Vec<_> = rechunker.blocks(vec![vec![3u8, 4, 5]]).unwrap().collect();
        assert_eq!(&blocks[0].data[..], &[1, 2, 3, 4]);
        assert_eq!(&blocks[1].data[..], &[5]);
    }

    #[test]
    fn test_blocks_emit_empty() {
        let config = RechunkConfig::new(6).unwrap().with_emit_empty(true);
        let blocks: Vec<_> = Rechunker::new(config)
            .unwrap()
            .blocks(Vec::<Vec<u8>>::new())
            .unwrap()
            .collect();
        assert_eq!(blocks.len(), 1);
        assert_eq!(&blocks[0].data[..], &[0u8; 6]);

        let blocks: Vec<_> = Rechunker::new(config.with_nopad(true))
            .unwrap()
            .blocks(Vec::<Vec<u8>>::new())
            .unwrap()
            .collect();
        assert_eq!(blocks.len(), 1);
        assert!(blocks[0].is_empty());
    }

    #[test]
    fn test_read_blocks_retries_interrupted() {
        let reader = InterruptedOnce {
            interrupted: false,
            data: Cursor::new(vec![9u8]),
        };
        let blocks = Rechunker::with_block_size(2)
            .unwrap()
            .read_blocks(reader)
            .collect::<Result<Vec<_>, _>>()
            .unwrap();

        assert_eq!(blocks.len(), 1);
        assert_eq!(&blocks[0].data[..], &[9, 0]);
    }

    #[test]
    fn test_read_blocks_emit_empty() {
        let config = RechunkConfig::new(3).unwrap().with_emit_empty(true);
        let blocks = Rechunker::new(config)
            .unwrap()
            .read_blocks(Cursor::new(Vec::new()))
            .collect::<Result<Vec<_>, _>>()
            .unwrap();
        assert_eq!(blocks.len(), 1);
        assert_eq!(&blocks[0].data[..], &[0, 0, 0]);
    }

    #[test]
    fn test_read_blocks_closed_rechunker_reports_error() {
        let mut rechunker = Rechunker::with_block_size(2).unwrap();
        rechunker.finish();

        let mut iter = rechunker.read_blocks(Cursor::new(vec![1u8, 2]));
        assert!(matches!(iter.next(), Some(Err(RechunkError::StreamClosed))));
        assert!(iter.next().is_none());
    }

    #[test]
    fn test_blocks_empty_input() {
        let rechunker = Rechunker::with_block_size(4).unwrap();
        let blocks: Vec<_> = rechunker.blocks(Vec::<Vec<u8>>::new()).unwrap().collect();
        assert!(blocks.is_empty());
    }

    #[test]
    fn test_blocks_lazy_pull() {
        let rechunker = Rechunker::with_block_size(2).unwrap();
        let mut pulled = 0;
        let inputs = (0..10u8).inspect(|_| pulled += 1);
        let mut blocks = rechunker.blocks(inputs).unwrap();

        let first = blocks.next().unwrap();
        assert_eq!(&first.data[..], &[0, 1]);
        drop(blocks);
        assert_eq!(pulled, 2);
    }

    #[test]
    fn test_read_blocks_small_reads() {
        let data: Vec<u8> = (0..100).map(|i| i as u8).collect();
        let config = RechunkConfig::new(7).unwrap().with_nopad(true);
        let blocks = Rechunker::new(config)
            .unwrap()
            .read_blocks(Cursor::new(data.clone()))
            .with_read_size(3)
            .collect::<Result<Vec<_>, _>>()
            .unwrap();

        assert_eq!(blocks.len(), 15);
        let joined: Vec<u8> = blocks.iter().flat_map(|b| b.data.to_vec()).collect();
        assert_eq!(joined, data);
    }

    #[test]
    fn test_read_blocks_error_ends_iteration() {
        let rechunker = Rechunker::with_block_size(2).unwrap();
        let mut iter = rechunker.read_blocks(FailingReader { served: false });

        assert_eq!(&iter.next().unwrap().unwrap().data[..], b"ab");
        assert!(matches!(iter.next(), Some(Err(RechunkError::Io(_)))));
        assert!(iter.next().is_none());
    }

    #[test]
    fn test_rechunk_bytes_invalid_config() {
        let result = rechunk_bytes(RechunkConfig::default().with_block_size(0), vec![1u8]);
        assert!(result.is_err());
    }
}
