//! Configuration for re-chunking behavior.
//!
//! [`RechunkConfig`] holds the output block size and the policy applied to the
//! trailing remainder when the stream ends.
//!
//! # Example
//!
//! ```
//! use rechunkrs::RechunkConfig;
//!
//! // 4 KiB blocks, final block zero padded (the default policy)
//! let config = RechunkConfig::new(4096)?;
//! assert!(config.zero_padding());
//!
//! // Short final block instead of padding
//! let config = RechunkConfig::new(4096)?.with_nopad(true);
//! assert!(!config.zero_padding());
//!
//! # Ok::<(), rechunkrs::RechunkError>(())
//! ```

use crate::error::RechunkError;

/// Default block size in bytes, used when no size is given.
pub const DEFAULT_BLOCK_SIZE: usize = 512;

/// Configuration for fixed-size re-chunking.
///
/// # Remainder policy
///
/// When the stream ends with fewer than `block_size` bytes buffered:
///
/// - with zero padding (default), the remainder is padded with zero bytes up
///   to a full block
/// - without zero padding, the remainder is emitted as a short block
/// - an empty remainder emits nothing, unless `emit_empty` is set and no block
///   was ever emitted
///
/// `nopad` overrides `zero_padding`: when it is set, padding is off no matter
/// what `zero_padding` says.
///
/// # Example
///
/// ```
/// use rechunkrs::RechunkConfig;
///
/// let config = RechunkConfig::default()
///     .with_block_size(10)
///     .with_emit_empty(true);
///
/// assert_eq!(config.block_size(), 10);
/// assert!(config.emit_empty());
/// assert!(config.validate().is_ok());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct RechunkConfig {
    /// Output block size in bytes.
    block_size: usize,

    /// Requested zero padding of the final block.
    zero_padding: bool,

    /// Forces zero padding off.
    nopad: bool,

    /// Emit a final block even if the stream carried no bytes at all.
    emit_empty: bool,
}

impl RechunkConfig {
    /// Creates a new configuration with the given block size and default
    /// remainder policy.
    ///
    /// # Errors
    ///
    /// Returns [`RechunkError::InvalidConfig`] if `block_size` is zero.
    ///
    /// # Example
    ///
    /// ```
    /// use rechunkrs::RechunkConfig;
    ///
    /// let config = RechunkConfig::new(256)?;
    /// assert_eq!(config.block_size(), 256);
    /// assert!(RechunkConfig::new(0).is_err());
    /// # Ok::<(), rechunkrs::RechunkError>(())
    /// ```
    pub fn new(block_size: usize) -> Result<Self, RechunkError> {
        if block_size == 0 {
            return Err(RechunkError::InvalidConfig {
                message: "block size must be a positive integer",
            });
        }

        Ok(Self {
            block_size,
            ..Self::default()
        })
    }

    /// Sets the block size.
    ///
    /// Note: This does not validate the configuration. Use [`RechunkConfig::validate`]
    /// to check if the configuration is valid.
    pub fn with_block_size(mut self, size: usize) -> Self {
        self.block_size = size;
        self
    }

    /// Enables or disables zero padding of the final block.
    pub fn with_zero_padding(mut self, enabled: bool) -> Self {
        self.zero_padding = enabled;
        self
    }

    /// When `true`, forces zero padding off regardless of
    /// [`with_zero_padding`](Self::with_zero_padding).
    pub fn with_nopad(mut self, nopad: bool) -> Self {
        self.nopad = nopad;
        self
    }

    /// When `true`, a stream that never produced a block still emits one
    /// final block on finish.
    pub fn with_emit_empty(mut self, enabled: bool) -> Self {
        self.emit_empty = enabled;
        self
    }

    /// Returns the block size.
    pub fn block_size(&self) -> usize {
        self.block_size
    }

    /// Returns the resolved zero padding policy.
    ///
    /// This is `false` whenever `nopad` is set.
    pub fn zero_padding(&self) -> bool {
        !self.nopad && self.zero_padding
    }

    /// Returns whether `nopad` was requested.
    pub fn nopad(&self) -> bool {
        self.nopad
    }

    /// Returns whether an empty stream still emits a final block.
    pub fn emit_empty(&self) -> bool {
        self.emit_empty
    }

    /// Validates the current configuration.
    ///
    /// # Example
    ///
    /// ```
    /// use rechunkrs::RechunkConfig;
    ///
    /// let config = RechunkConfig::default().with_block_size(0);
    /// assert!(config.validate().is_err());
    /// ```
    pub fn validate(&self) -> Result<(), RechunkError> {
        Self::new(self.block_size).map(|_| ())
    }
}

impl Default for RechunkConfig {
    fn default() -> Self {
        Self {
            block_size: DEFAULT_BLOCK_SIZE,
            zero_padding: true,
            nopad: false,
            emit_empty: false,
        }
    }
}
