//! Block types.
//!
//! - [`Block`] - Fixed-size output block with data, offset, padding
//! - [`Input`] - A single pushed element: a byte buffer or one byte

mod data;
mod input;

pub use data::Block;
pub use input::Input;
