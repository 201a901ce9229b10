//! Queue of pending input segments.

use std::collections::VecDeque;

use bytes::Bytes;

use crate::util;

/// Segment count above which the queue is squashed before a block is taken.
pub const SQUASH_THRESHOLD: usize = 128;

/// Owned input segments not yet fully emitted.
///
/// Invariants:
/// - `buffered == sum(segment lengths) - head_offset`
/// - the first `head_offset` bytes of the head segment were already emitted
///   and are never handed out again
#[derive(Debug, Default)]
pub struct PendingQueue {
    segments: VecDeque<Bytes>,
    head_offset: usize,
    buffered: usize,
}

impl PendingQueue {
    /// Creates an empty queue.
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a segment at the back. Empty segments are dropped.
    pub fn push_segment(&mut self, segment: Bytes) {
        if segment.is_empty() {
            return;
        }
        self.buffered += segment.len();
        self.segments.push_back(segment);
    }

    /// Collapses every segment but the last into one when the queue holds
    /// more than [`SQUASH_THRESHOLD`] segments.
    ///
    /// The consumed prefix of the head is not copied; `head_offset` restarts
    /// at 0 relative to the new head. Returns true if the queue was squashed.
    pub fn squash(&mut self) -> bool {
        if self.segments.len() <= SQUASH_THRESHOLD {
            return false;
        }

        let Some(last) = self.segments.pop_back() else {
            return false;
        };

        let mut front: Vec<Bytes> = self.segments.drain(..).collect();
        if let Some(head) = front.first_mut() {
            *head = head.slice(self.head_offset..);
        }
        let merged = util::concat(&front);

        tracing::trace!(
            segments = front.len() + 1,
            copied = merged.len(),
            "squashed pending queue"
        );

        self.segments.push_back(merged);
        self.segments.push_back(last);
        self.head_offset = 0;
        true
    }

    /// Removes up to `n` bytes from the front of the queue.
    ///
    /// The result is a zero-copy slice of the head segment whenever that
    /// segment alone covers the request; otherwise the collected slices are
    /// concatenated. Fewer than `n` bytes are returned only if the queue runs
    /// out.
    pub fn take(&mut self, n: usize) -> Bytes {
        let mut target: Vec<Bytes> = Vec::new();
        let mut taken = 0;

        while taken < n {
            let Some(head) = self.segments.front() else {
                break;
            };

            // Slice as much as we can from the next segment.
            let end = (self.head_offset + n - taken).min(head.len());
            let slice = head.slice(self.head_offset..end);
            taken += slice.len();

            if end == head.len() {
                self.segments.pop_front();
                self.head_offset = 0;
            } else {
                self.head_offset += slice.len();
            }
            target.push(slice);
        }

        self.buffered -= taken;
        util::concat(&target)
    }

    /// Removes and returns everything left in the queue.
    pub fn drain(&mut self) -> Bytes {
        self.take(self.buffered)
    }

    /// Drops all pending segments.
    pub fn clear(&mut self) {
        self.segments.clear();
        self.head_offset = 0;
        self.buffered = 0;
    }

    /// Returns the number of unconsumed bytes.
    pub fn buffered(&self) -> usize {
        self.buffered
    }

    /// Returns the number of segments held.
    pub fn len(&self) -> usize {
        self.segments.len()
    }

    /// Returns true if no segments are held.
    #[cfg(test)]
    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }

    /// Returns how many bytes of the head segment were already consumed.
    #[cfg(test)]
    pub fn head_offset(&self) -> usize {
        self.head_offset
    }
}
