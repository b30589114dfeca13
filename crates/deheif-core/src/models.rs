//! Domain models for inbound media messages.
//!
//! The encrypted/plain distinction is a type-level fact: [`MediaReference`]
//! is a tagged variant built once from the raw event fields, so no component
//! downstream ever re-checks optional fields to decide whether a message is
//! encrypted.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::error::ConvertError;

/// Decryption metadata carried by an encrypted media reference: symmetric
/// key, initialization vector, content hashes keyed by algorithm name, and a
/// scheme version tag. All byte fields are base64-encoded for transport.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EncryptedFileInfo {
    pub key: String,
    pub iv: String,
    pub hashes: BTreeMap<String, String>,
    #[serde(rename = "v")]
    pub version: String,
}

/// An encrypted media source as it appears on the wire: the locator plus the
/// decryption metadata.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EncryptedSource {
    pub url: String,
    #[serde(flatten)]
    pub file: EncryptedFileInfo,
}

/// The addressable pointer to a piece of remote media. A reference is either
/// fully plain or fully encrypted, never partial.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MediaReference {
    Plain {
        locator: String,
    },
    Encrypted {
        locator: String,
        file: EncryptedFileInfo,
    },
}

impl MediaReference {
    /// Build a reference from the optional fields of a raw event. A plain
    /// locator wins when both are present; a message with neither is
    /// malformed and rejected here, once, at construction.
    pub fn from_parts(
        url: Option<String>,
        file: Option<EncryptedSource>,
    ) -> Result<Self, ConvertError> {
        match (url, file) {
            (Some(locator), _) => Ok(Self::Plain { locator }),
            (None, Some(source)) => Ok(Self::Encrypted {
                locator: source.url,
                file: source.file,
            }),
            (None, None) => Err(ConvertError::MalformedReference),
        }
    }

    pub fn is_encrypted(&self) -> bool {
        matches!(self, Self::Encrypted { .. })
    }

    pub fn locator(&self) -> &str {
        match self {
            Self::Plain { locator } => locator,
            Self::Encrypted { locator, .. } => locator,
        }
    }
}

/// Message type of an inbound event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MessageKind {
    Image,
    File,
    Audio,
    Video,
    Text,
    Other,
}

impl MessageKind {
    pub fn from_msgtype(msgtype: &str) -> Self {
        match msgtype {
            "m.image" => Self::Image,
            "m.file" => Self::File,
            "m.audio" => Self::Audio,
            "m.video" => Self::Video,
            "m.text" | "m.notice" | "m.emote" => Self::Text,
            _ => Self::Other,
        }
    }
}

/// A media message event as delivered by the host, before normalization.
/// Every field the sender controls is optional and untrusted.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct MediaEvent {
    pub room_id: String,
    pub msgtype: String,
    pub body: Option<String>,
    pub mimetype: Option<String>,
    pub url: Option<String>,
    pub file: Option<EncryptedSource>,
    #[serde(rename = "w")]
    pub width: Option<u32>,
    #[serde(rename = "h")]
    pub height: Option<u32>,
}

/// The normalized triggering event consumed by the pipeline. Read-only for
/// the duration of one conversion run, then discarded.
#[derive(Debug, Clone)]
pub struct InboundMessage {
    pub room_id: String,
    pub kind: MessageKind,
    pub mime_type: Option<String>,
    pub media: MediaReference,
    pub declared_width: Option<u32>,
    pub declared_height: Option<u32>,
}

impl TryFrom<MediaEvent> for InboundMessage {
    type Error = ConvertError;

    fn try_from(event: MediaEvent) -> Result<Self, ConvertError> {
        let media = MediaReference::from_parts(event.url, event.file)?;
        Ok(Self {
            room_id: event.room_id,
            kind: MessageKind::from_msgtype(&event.msgtype),
            mime_type: event.mimetype,
            media,
            declared_width: event.width,
            declared_height: event.height,
        })
    }
}
