//! Outbound media message content.
//!
//! The constructors are the only way to build [`OutboundMedia`], which keeps
//! the central anti-leak rule structural: a plain message carries a `url` and
//! no `file`, an encrypted message carries a `file` and no `url`.

use serde::Serialize;

use deheif_core::constants::{IMAGE_MSGTYPE, TARGET_FILENAME};
use deheif_core::EncryptedSource;

/// Media metadata sent alongside the message.
#[derive(Debug, Clone, Serialize)]
pub struct MediaInfo {
    pub mimetype: String,
    #[serde(rename = "w")]
    pub width: u32,
    #[serde(rename = "h")]
    pub height: u32,
    pub size: u64,
}

/// A media message ready to send.
#[derive(Debug, Clone, Serialize)]
pub struct OutboundMedia {
    pub msgtype: String,
    pub body: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub file: Option<EncryptedSource>,
    pub info: MediaInfo,
}

impl OutboundMedia {
    /// A plain media message referencing an unencrypted upload.
    pub fn plain(locator: String, info: MediaInfo) -> Self {
        Self {
            msgtype: IMAGE_MSGTYPE.to_string(),
            body: TARGET_FILENAME.to_string(),
            url: Some(locator),
            file: None,
            info,
        }
    }

    /// An encrypted media message referencing uploaded ciphertext.
    pub fn encrypted(source: EncryptedSource, info: MediaInfo) -> Self {
        Self {
            msgtype: IMAGE_MSGTYPE.to_string(),
            body: TARGET_FILENAME.to_string(),
            url: None,
            file: Some(source),
            info,
        }
    }

    pub fn is_encrypted(&self) -> bool {
        self.file.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use deheif_core::EncryptedFileInfo;
    use std::collections::BTreeMap;

    fn info() -> MediaInfo {
        MediaInfo {
            mimetype: "image/jpeg".to_string(),
            width: 640,
            height: 480,
            size: 1234,
        }
    }

    #[test]
    fn test_plain_message_shape() {
        let content = OutboundMedia::plain("mxc://host/abc".to_string(), info());
        let value = serde_json::to_value(&content).unwrap();

        assert_eq!(value["msgtype"], "m.image");
        assert_eq!(value["body"], "image.jpg");
        assert_eq!(value["url"], "mxc://host/abc");
        assert!(value.get("file").is_none());
        assert_eq!(value["info"]["mimetype"], "image/jpeg");
        assert_eq!(value["info"]["w"], 640);
        assert_eq!(value["info"]["h"], 480);
    }

    #[test]
    fn test_encrypted_message_shape() {
        let mut hashes = BTreeMap::new();
        hashes.insert("sha256".to_string(), "aGFzaA".to_string());
        let source = EncryptedSource {
            url: "mxc://host/enc".to_string(),
            file: EncryptedFileInfo {
                key: "a2V5".to_string(),
                iv: "aXY".to_string(),
                hashes,
                version: "v1".to_string(),
            },
        };

        let content = OutboundMedia::encrypted(source, info());
        assert!(content.is_encrypted());

        let value = serde_json::to_value(&content).unwrap();
        assert!(value.get("url").is_none());
        assert_eq!(value["file"]["url"], "mxc://host/enc");
        assert_eq!(value["file"]["v"], "v1");
    }
}
