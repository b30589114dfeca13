//! Chat client abstraction trait
//!
//! The converter never talks to the network itself; the host hands it an
//! implementation of [`ChatMediaClient`] wrapping whatever protocol client it
//! runs. Failures propagate unchanged; this layer performs no retries.

use async_trait::async_trait;
use bytes::Bytes;
use thiserror::Error;

use deheif_core::ConvertError;

use crate::message::OutboundMedia;

/// Chat client operation errors
#[derive(Debug, Error)]
pub enum ClientError {
    #[error("download failed: {0}")]
    Download(String),

    #[error("upload failed: {0}")]
    Upload(String),

    #[error("send failed: {0}")]
    Send(String),
}

impl From<ClientError> for ConvertError {
    fn from(err: ClientError) -> Self {
        ConvertError::Transport(err.to_string())
    }
}

/// Opaque identifier of a sent message, as assigned by the chat network.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MessageHandle(pub String);

/// Media and message primitives the converter needs from the host's chat
/// client.
#[async_trait]
pub trait ChatMediaClient: Send + Sync {
    /// Download raw media bytes by locator. Returns ciphertext as-is for
    /// encrypted media; decryption is the transport's job.
    async fn download(&self, locator: &str) -> Result<Vec<u8>, ClientError>;

    /// Upload bytes to the media store, returning the new locator.
    async fn upload(
        &self,
        data: Bytes,
        content_type: &str,
        filename: &str,
    ) -> Result<String, ClientError>;

    /// Send a media message into a room.
    async fn send_media(
        &self,
        room_id: &str,
        content: OutboundMedia,
    ) -> Result<MessageHandle, ClientError>;
}
