//! Media codec - container detection, decode, and JPEG encode.
//!
//! All format-specific logic lives behind this boundary; the pipeline never
//! inspects image bytes directly. Decode sniffs the container from the bytes
//! themselves, so the sender-declared MIME type only ever gates eligibility,
//! never parsing.

use std::io::Cursor;

use bytes::Bytes;
use image::{ColorType, DynamicImage, GenericImageView, ImageFormat, ImageReader};

use deheif_core::constants::TARGET_MIME;
use deheif_core::{ConvertError, ConvertResult};

/// A decoded image and what was learned about it. Scoped to a single
/// conversion run; never cached across messages.
pub struct DecodedImage {
    pub image: DynamicImage,
    pub format: ImageFormat,
    pub width: u32,
    pub height: u32,
    pub color: ColorType,
}

/// The transcoded payload plus its content type and measured dimensions.
pub struct EncodedOutput {
    pub data: Bytes,
    pub content_type: &'static str,
    pub width: u32,
    pub height: u32,
}

pub struct MediaCodec;

impl MediaCodec {
    /// Decode arbitrary image bytes, detecting the container by content.
    pub fn decode(data: &[u8]) -> ConvertResult<DecodedImage> {
        let reader = ImageReader::new(Cursor::new(data))
            .with_guessed_format()
            .map_err(|e| ConvertError::CorruptData(e.to_string()))?;
        let format = reader
            .format()
            .ok_or_else(|| ConvertError::UnsupportedFormat("unrecognized container".to_string()))?;

        let image = reader
            .decode()
            .map_err(|e| ConvertError::CorruptData(e.to_string()))?;
        let (width, height) = image.dimensions();
        let color = image.color();

        Ok(DecodedImage {
            image,
            format,
            width,
            height,
            color,
        })
    }

    /// Re-encode to JPEG at default quality. Dimensions in the result are
    /// measured from the encoded bytes, not taken from the input handle.
    pub fn encode(decoded: &DecodedImage) -> ConvertResult<EncodedOutput> {
        let mut buffer = Vec::new();
        let mut cursor = Cursor::new(&mut buffer);

        // JPEG carries no alpha channel; flatten to RGB first.
        let written = if decoded.color.has_alpha() {
            DynamicImage::ImageRgb8(decoded.image.to_rgb8()).write_to(&mut cursor, ImageFormat::Jpeg)
        } else {
            decoded.image.write_to(&mut cursor, ImageFormat::Jpeg)
        };
        written.map_err(|e| ConvertError::EncodeFailure(e.to_string()))?;

        let (width, height) = Self::probe_dimensions(&buffer)?;

        Ok(EncodedOutput {
            data: Bytes::from(buffer),
            content_type: TARGET_MIME,
            width,
            height,
        })
    }

    pub fn dimensions(decoded: &DecodedImage) -> (u32, u32) {
        (decoded.width, decoded.height)
    }

    // A codec that emits bytes it cannot read back is broken; treat a probe
    // failure as an encode failure.
    fn probe_dimensions(data: &[u8]) -> ConvertResult<(u32, u32)> {
        let image =
            image::load_from_memory(data).map_err(|e| ConvertError::EncodeFailure(e.to_string()))?;
        Ok(image.dimensions())
    }
}
