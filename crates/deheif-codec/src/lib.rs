//! Deheif Codec Library
//!
//! Wraps the image decode/encode capability behind a narrow boundary so any
//! format-parsing vulnerability is confined to this crate.

pub mod codec;

pub use codec::{DecodedImage, EncodedOutput, MediaCodec};
