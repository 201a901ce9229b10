//! The Block type - represents one emitted output block.

use bytes::Bytes;
use std::fmt;

/// A block emitted by the [`Rechunker`](crate::Rechunker).
///
/// Every block is exactly `block_size` bytes long, except possibly the final
/// one produced by [`finish`](crate::Rechunker::finish) when zero padding is off.
///
/// # Example
///
/// ```
/// use rechunkrs::Block;
/// use bytes::Bytes;
///
/// let block = Block {
///     data: Bytes::from_static(b"abc\0"),
///     offset: 0,
///     padding: 1,
/// };
///
/// assert_eq!(block.len(), 4);
/// assert_eq!(block.payload(), &b"abc"[..]);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Block {
    /// The block data. Zero-copy when a single input buffer covered the block.
    pub data: Bytes,

    /// The position of the first byte of this block in the output stream.
    pub offset: u64,

    /// Number of trailing zero bytes added by padding (0 for all but the final block).
    pub padding: usize,
}

impl Block {
    /// Creates an unpadded block at the given offset.
    pub fn new(data: impl Into<Bytes>, offset: u64) -> Self {
        Self {
            data: data.into(),
            offset,
            padding: 0,
        }
    }

    /// Returns the length of the block data, padding included.
    pub fn len(&self) -> usize {
        self.data.len()
    }

    /// Returns true if the block has no data.
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Returns true if the block ends with zero padding.
    pub fn is_padded(&self) -> bool {
        self.padding > 0
    }

    /// Returns the bytes that came from the input stream, without padding.
    pub fn payload(&self) -> &[u8] {
        &self.data[..self.data.len().saturating_sub(self.padding)]
    }

    /// Returns a reference to the block data.
    pub fn data(&self) -> &Bytes {
        &self.data
    }

    /// Returns the start offset.
    pub fn start(&self) -> u64 {
        self.offset
    }

    /// Returns the end offset (exclusive).
    pub fn end(&self) -> u64 {
        self.offset + self.data.len() as u64
    }

    /// Returns the block as a range.
    pub fn range(&self) -> std::ops::Range<u64> {
        self.start()..self.end()
    }

    /// Consumes the block and returns the underlying data.
    pub fn into_data(self) -> Bytes {
        self.data
    }
}

impl From<Block> for Bytes {
    fn from(block: Block) -> Self {
        block.data
    }
}

impl AsRef<[u8]> for Block {
    fn as_ref(&self) -> &[u8] {
        &self.data
    }
}

impl fmt::Display for Block {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Block {{ offset: {}, len: {}", self.offset, self.len())?;
        if self.is_padded() {
            write!(f, ", padding: {}", self.padding)?;
        }
        write!(f, " }}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_block_ranges() {
        let block = Block::new(Bytes::from_static(b"hello"), 10);
        assert_eq!(block.start(), 10);
        assert_eq!(block.end(), 15);
        assert_eq!(block.range(), 10..15);
        assert!(!block.is_padded());
    }

    #[test]
    fn test_payload_excludes_padding() {
        let block = Block {
            data: Bytes::from_static(&[6, 7, 8, 0, 0]),
            offset: 5,
            padding: 2,
        };
        assert_eq!(block.payload(), &[6, 7, 8]);
        assert!(block.is_padded());
        assert_eq!(block.to_string(), "Block { offset: 5, len: 5, padding: 2 }");
    }

    #[test]
    fn test_payload_padding_larger_than_data() {
        let block = Block {
            data: Bytes::from_static(&[0, 0]),
            offset: 0,
            padding: 5,
        };
        assert!(block.payload().is_empty());
    }

    #[test]
    fn test_into_bytes() {
        let block = Block::new(vec![1u8, 2, 3], 0);
        let bytes: Bytes = block.into();
        assert_eq!(&bytes[..], &[1, 2, 3]);
    }

    #[test]
    fn test_empty_block() {
        let block = Block::new(Bytes::new(), 0);
        assert!(block.is_empty());
        assert!(block.payload().is_empty());
        assert_eq!(block.to_string(), "Block { offset: 0, len: 0 }");
    }
}
