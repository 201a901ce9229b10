//! Input elements accepted by [`Rechunker::push`](crate::Rechunker::push).

use bytes::{Bytes, BytesMut};

/// One element of the input stream.
///
/// A single byte value is treated exactly like a one-byte buffer.
///
/// # Example
///
/// ```
/// use rechunkrs::Input;
/// use bytes::Bytes;
///
/// let a: Input = 65u8.into();
/// let b: Input = Bytes::from_static(b"A").into();
/// assert_eq!(a.into_bytes(), b.into_bytes());
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Input {
    /// A byte buffer of any length, including zero.
    Buffer(Bytes),
    /// A single byte value.
    Byte(u8),
}

impl Input {
    /// Returns the number of bytes this input carries.
    pub fn len(&self) -> usize {
        match self {
            Input::Buffer(b) => b.len(),
            Input::Byte(_) => 1,
        }
    }

    /// Returns true if this input carries no bytes.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Converts the input into an owned buffer.
    pub fn into_bytes(self) -> Bytes {
        match self {
            Input::Buffer(b) => b,
            Input::Byte(v) => Bytes::copy_from_slice(&[v]),
        }
    }
}

impl From<Bytes> for Input {
    fn from(data: Bytes) -> Self {
        Input::Buffer(data)
    }
}

impl From<BytesMut> for Input {
    fn from(data: BytesMut) -> Self {
        Input::Buffer(data.freeze())
    }
}

impl From<Vec<u8>> for Input {
    fn from(data: Vec<u8>) -> Self {
        Input::Buffer(Bytes::from(data))
    }
}

impl From<&'static [u8]> for Input {
    fn from(data: &'static [u8]) -> Self {
        Input::Buffer(Bytes::from_static(data))
    }
}

impl<const N: usize> From<&'static [u8; N]> for Input {
    fn from(data: &'static [u8; N]) -> Self {
        Input::Buffer(Bytes::from_static(data))
    }
}

impl From<&'static str> for Input {
    fn from(data: &'static str) -> Self {
        Input::Buffer(Bytes::from_static(data.as_bytes()))
    }
}

impl From<u8> for Input {
    fn from(value: u8) -> Self {
        Input::Byte(value)
    }
}
