//! Internal utility functions and helpers.
//!
//! This module contains small helper functions used throughout the crate.
//! It is an implementation detail and not part of the public API.

use bytes::{BufMut, Bytes, BytesMut};

/// Joins slices into one buffer.
///
/// A single slice is returned as is, without copying. Anything else is copied
/// into one allocation of exactly the combined length.
pub(crate) fn concat(slices: &[Bytes]) -> Bytes {
    if let [single] = slices {
        return single.clone();
    }

    let total = slices.iter().map(Bytes::len).sum();
    let mut combined = BytesMut::with_capacity(total);
    for slice in slices {
        combined.put_slice(slice);
    }
    combined.freeze()
}

/// Returns a zero-filled buffer of `len` bytes.
pub(crate) fn zeroes(len: usize) -> Bytes {
    Bytes::from(vec![0u8; len])
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_concat_single_is_zero_copy() {
        let data = Bytes::from_static(b"hello");
        let out = concat(std::slice::from_ref(&data));
        assert_eq!(out.as_ptr(), data.as_ptr());
    }

    #[test]
    fn test_concat_many() {
        let parts = [
            Bytes::from_static(b"ab"),
            Bytes::new(),
            Bytes::from_static(b"cde"),
        ];
        assert_eq!(&concat(&parts)[..], b"abcde");
        assert!(concat(&[]).is_empty());
    }

    #[test]
    fn test_zeroes() {
        assert_eq!(&zeroes(3)[..], &[0, 0, 0]);
        assert!(zeroes(0).is_empty());
    }
}
