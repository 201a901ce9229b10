//! Async stream adapters for re-chunking.
//!
//! Both adapters are runtime-agnostic: they depend only on
//! `futures_core::Stream` and `futures_io::AsyncRead`, so they work with
//! tokio, async-std, smol, and other async runtimes.
//!
//! # Example
//!
//! ```ignore
//! use futures_util::StreamExt;
//! use rechunkrs::{rechunk_stream, Rechunker};
//!
//! async fn demo<S>(buffers: S) -> Result<(), rechunkrs::RechunkError>
//! where
//!     S: futures_core::Stream<Item = bytes::Bytes>,
//! {
//!     let mut blocks = Box::pin(rechunk_stream(buffers, Rechunker::with_block_size(4096)?)?);
//!
//!     while let Some(block) = blocks.next().await {
//!         println!("Block: {}", block);
//!     }
//!     Ok(())
//! }
//! ```

use std::collections::VecDeque;
use std::pin::Pin;
use std::task::{Context, Poll};

use bytes::BytesMut;
use futures_core::Stream;
use futures_io::AsyncRead;
use pin_project_lite::pin_project;

use crate::block::{Block, Input};
use crate::error::RechunkError;
use crate::rechunker::{DEFAULT_READ_SIZE, Rechunker, StreamState};

pin_project! {
    /// A stream of blocks over a stream of inputs.
    ///
    /// Created by [`rechunk_stream`]. Inputs are polled only when no
    /// completed block is waiting. When the inner stream ends, the final
    /// (flushed) block is yielded, if any, and then the stream ends.
    pub struct BlockStream<S> {
        #[pin]
        inner: S,
        rechunker: Rechunker,
        ready: VecDeque<Block>,
        scratch: Vec<Block>,
        finished: bool,
    }
}

impl<S> BlockStream<S> {
    /// Returns the underlying rechunker.
    pub fn rechunker(&self) -> &Rechunker {
        &self.rechunker
    }
}

impl<S> Stream for BlockStream<S>
where
    S: Stream,
    S::Item: Into<Input>,
{
    type Item = Block;

    fn poll_next(self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Option<Self::Item>> {
        let mut this = self.project();

        loop {
            if let Some(block) = this.ready.pop_front() {
                return Poll::Ready(Some(block));
            }
            if *this.finished {
                return Poll::Ready(None);
            }

            match this.inner.as_mut().poll_next(cx) {
                Poll::Pending => return Poll::Pending,
                Poll::Ready(Some(input)) => {
                    // `rechunk_stream()` only accepts a streaming rechunker and only
                    // the branch below closes it.
                    if let Err(e) = this.rechunker.push_into(input, this.scratch) {
                        tracing::debug!(error = %e, "push rejected, ending block stream");
                        *this.finished = true;
                        return Poll::Ready(None);
                    }
                    this.ready.extend(this.scratch.drain(..));
                }
                Poll::Ready(None) => {
                    *this.finished = true;
                    return Poll::Ready(this.rechunker.finish());
                }
            }
        }
    }
}

pin_project! {
    /// A stream of blocks over an async reader.
    ///
    /// Created by [`rechunk_async`]. An I/O error is yielded once and ends
    /// the stream.
    pub struct AsyncReadBlocks<R> {
        #[pin]
        reader: R,
        rechunker: Rechunker,
        buffer: BytesMut,
        read_size: usize,
        ready: VecDeque<Block>,
        scratch: Vec<Block>,
        finished: bool,
    }
}

impl<R> AsyncReadBlocks<R> {
    /// Sets how many bytes are requested from the reader per read.
    ///
    /// A size of zero is treated as one.
    pub fn with_read_size(mut self, read_size: usize) -> Self {
        self.read_size = read_size.max(1);
        self
    }
}

impl<R: AsyncRead> Stream for AsyncReadBlocks<R> {
    type Item = Result<Block, RechunkError>;

    fn poll_next(self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Option<Self::Item>> {
        let mut this = self.project();

        loop {
            if let Some(block) = this.ready.pop_front() {
                return Poll::Ready(Some(Ok(block)));
            }
            if *this.finished {
                return Poll::Ready(None);
            }

            // Read more data; filled bytes are split off and handed over without copying
            this.buffer.resize(*this.read_size, 0);
            match this.reader.as_mut().poll_read(cx, &mut this.buffer[..]) {
                Poll::Pending => return Poll::Pending,
                Poll::Ready(Err(e)) => {
                    tracing::debug!(error = %e, "async read failed, ending block stream");
                    *this.finished = true;
                    return Poll::Ready(Some(Err(RechunkError::Io(e))));
                }
                Poll::Ready(Ok(0)) => {
                    *this.finished = true;
                    return Poll::Ready(this.rechunker.finish().map(Ok));
                }
                Poll::Ready(Ok(n)) => {
                    let filled = this.buffer.split_to(n);
                    if let Err(e) = this.rechunker.push_into(filled, this.scratch) {
                        *this.finished = true;
                        return Poll::Ready(Some(Err(e)));
                    }
                    this.ready.extend(this.scratch.drain(..));
                }
            }
        }
    }
}

/// Creates a block stream from a stream of inputs.
///
/// Blocks already pending in `rechunker` are carried into the stream.
///
/// # Errors
///
/// Returns [`RechunkError::StreamClosed`] if `rechunker` has already been
/// finished and not reset.
///
/// # Example
///
/// ```ignore
/// use futures_util::{stream, StreamExt};
/// use rechunkrs::{rechunk_stream, Rechunker};
///
/// let inputs = stream::iter(vec![vec![1u8, 2, 3], vec![4, 5, 6, 7, 8]]);
/// let blocks: Vec<_> = rechunk_stream(inputs, Rechunker::with_block_size(4)?)?
///     .collect()
///     .await;
/// assert_eq!(blocks.len(), 2);
/// ```
pub fn rechunk_stream<S>(stream: S, rechunker: Rechunker) -> Result<BlockStream<S>, RechunkError>
where
    S: Stream,
    S::Item: Into<Input>,
{
    if rechunker.state() != StreamState::Streaming {
        return Err(RechunkError::StreamClosed);
    }
    Ok(BlockStream {
        inner: stream,
        rechunker,
        ready: VecDeque::new(),
        scratch: Vec::new(),
        finished: false,
    })
}

/// Creates a block stream from an async reader.
///
/// Uses `futures_io::AsyncRead` for runtime-agnostic async I/O. For tokio
/// readers, convert with `tokio_util::compat`:
///
/// ```ignore
/// use tokio_util::compat::TokioAsyncReadCompatExt;
/// use rechunkrs::{rechunk_async, Rechunker};
///
/// let file = tokio::fs::File::open("file").await?;
/// let blocks = rechunk_async(file.compat(), Rechunker::with_block_size(4096)?);
/// ```
pub fn rechunk_async<R: AsyncRead>(reader: R, rechunker: Rechunker) -> AsyncReadBlocks<R> {
    AsyncReadBlocks {
        reader,
        rechunker,
        buffer: BytesMut::new(),
        read_size: DEFAULT_READ_SIZE,
        ready: VecDeque::new(),
        scratch: Vec::new(),
        finished: false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::RechunkConfig;
    use futures_util::{StreamExt, stream};
    use tokio_util::compat::TokioAsyncReadCompatExt;

    #[tokio::test]
    async fn test_block_stream_empty() {
        let inputs = stream::iter(Vec::<Vec<u8>>::new());
        let blocks: Vec<_> = rechunk_stream(inputs, Rechunker::with_block_size(4).unwrap())
            .unwrap()
            .collect()
            .await;
        assert!(blocks.is_empty());
    }

    #[tokio::test]
    async fn test_block_stream_pads_final_block() {
        let inputs = stream::iter(vec![vec![1u8, 2, 3], vec![4, 5, 6, 7, 8]]);
        let blocks: Vec<_> = rechunk_stream(inputs, Rechunker::with_block_size(5).unwrap())
            .unwrap()
            .collect()
            .await;

        assert_eq!(blocks.len(), 2);
        assert_eq!(&blocks[0].data[..], &[1, 2, 3, 4, 5]);
        assert_eq!(&blocks[1].data[..], &[6, 7, 8, 0, 0]);
    }

    #[tokio::test]
    async fn test_async_read_blocks() {
        let data: Vec<u8> = (0..1000).map(|i| (i % 256) as u8).collect();
        let reader: &[u8] = &data;
        let config = RechunkConfig::new(64).unwrap().with_nopad(true);

        let blocks: Vec<_> = rechunk_async(reader, Rechunker::new(config).unwrap())
            .with_read_size(100)
            .collect()
            .await;
        let blocks: Vec<_> = blocks.into_iter().collect::<Result<Vec<_>, _>>().unwrap();

        assert_eq!(blocks.len(), 16);
        assert!(blocks[..15].iter().all(|b| b.len() == 64));
        assert_eq!(blocks[15].len(), 1000 - 15 * 64);

        let joined: Vec<u8> = blocks.iter().flat_map(|b| b.data.to_vec()).collect();
        assert_eq!(joined, data);
    }

    #[tokio::test]
    async fn test_block_stream_rejects_closed_rechunker() {
        let mut rechunker = Rechunker::with_block_size(4).unwrap();
        rechunker.finish();

        let inputs = stream::iter(vec![vec![1u8, 2, 3, 4]]);
        assert!(matches!(
            rechunk_stream(inputs, rechunker),
            Err(RechunkError::StreamClosed)
        ));
    }

    #[tokio::test]
    async fn test_block_stream_emit_empty() {
        let config = RechunkConfig::new(4).unwrap().with_emit_empty(true);
        let inputs = stream::iter(Vec::<Vec<u8>>::new());
        let blocks: Vec<_> = rechunk_stream(inputs, Rechunker::new(config).unwrap())
            .unwrap()
            .collect()
            .await;

        assert_eq!(blocks.len(), 1);
        assert_eq!(&blocks[0].data[..], &[0, 0, 0, 0]);
        assert_eq!(blocks[0].padding, 4);
    }

    #[tokio::test]
    async fn test_async_read_blocks_emit_empty() {
        let config = RechunkConfig::new(3).unwrap().with_emit_empty(true).with_nopad(true);
        let reader: &[u8] = &[];
        let blocks: Vec<_> = rechunk_async(reader, Rechunker::new(config).unwrap())
            .collect()
            .await;

        assert_eq!(blocks.len(), 1);
        assert!(blocks[0].as_ref().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_async_read_blocks_error_ends_stream() {
        let reader = tokio_test::io::Builder::new()
            .read(b"abcde")
            .read_error(std::io::Error::other("boom"))
            .build();
        let mut blocks = rechunk_async(reader.compat(), Rechunker::with_block_size(2).unwrap());

        assert_eq!(&blocks.next().await.unwrap().unwrap().data[..], b"ab");
        assert_eq!(&blocks.next().await.unwrap().unwrap().data[..], b"cd");
        assert!(matches!(blocks.next().await, Some(Err(RechunkError::Io(_)))));
        assert!(blocks.next().await.is_none());
        assert!(blocks.next().await.is_none());
    }

    #[tokio::test]
    async fn test_async_read_blocks_from_tokio_file() {
        let path = std::env::temp_dir().join(format!("rechunkrs-{}.bin", std::process::id()));
        let data: Vec<u8> = (0..10_000).map(|i| (i * 31 % 251) as u8).collect();
        tokio::fs::write(&path, &data).await.unwrap();

        let file = tokio::fs::File::open(&path).await.unwrap();
        let blocks: Vec<_> = rechunk_async(file.compat(), Rechunker::with_block_size(4096).unwrap())
            .with_read_size(1000)
            .collect()
            .await;
        tokio::fs::remove_file(&path).await.unwrap();
        let blocks = blocks.into_iter().collect::<Result<Vec<_>, _>>().unwrap();

        assert_eq!(blocks.len(), 3);
        assert!(blocks.iter().all(|b| b.len() == 4096));
        assert_eq!(blocks[2].padding, 3 * 4096 - data.len());
        assert_eq!(blocks[2].payload(), &data[2 * 4096..]);
        assert_eq!(blocks[0].offset, 0);
        assert_eq!(blocks[2].offset, 2 * 4096);
    }
}
