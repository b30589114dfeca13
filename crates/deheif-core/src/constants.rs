//! Wire-level constants owned by the converter.

/// The single MIME type recognized as a conversion source. Matched
/// case-sensitively against the sender-declared value.
pub const SOURCE_MIME: &str = "image/heic";

/// Content type of every converted payload.
pub const TARGET_MIME: &str = "image/jpeg";

/// Filename and message body attached to converted media.
pub const TARGET_FILENAME: &str = "image.jpg";

/// Message type of published replacement messages.
pub const IMAGE_MSGTYPE: &str = "m.image";
