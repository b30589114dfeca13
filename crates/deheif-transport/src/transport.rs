//! The two symmetric halves of media transport: fetch-and-decrypt and
//! encrypt-and-publish.

use std::sync::Arc;

use bytes::Bytes;

use deheif_core::constants::TARGET_FILENAME;
use deheif_core::{ConvertResult, EncryptedSource, MediaReference};

use crate::attachment::{decrypt_attachment, encrypt_attachment};
use crate::client::{ChatMediaClient, MessageHandle};
use crate::message::{MediaInfo, OutboundMedia};

pub struct MediaTransport {
    client: Arc<dyn ChatMediaClient>,
}

impl MediaTransport {
    pub fn new(client: Arc<dyn ChatMediaClient>) -> Self {
        Self { client }
    }

    /// Download the referenced media. Encrypted references are verified
    /// against their declared hash and decrypted; plain references come back
    /// as downloaded.
    pub async fn fetch(&self, reference: &MediaReference) -> ConvertResult<Vec<u8>> {
        match reference {
            MediaReference::Plain { locator } => Ok(self.client.download(locator).await?),
            MediaReference::Encrypted { locator, file } => {
                let ciphertext = self.client.download(locator).await?;
                decrypt_attachment(&ciphertext, file)
            }
        }
    }

    /// Upload the converted bytes and send the replacement message.
    ///
    /// `encrypted` is the mode determined at fetch time, carried through
    /// unchanged. When set, only ciphertext leaves this function and the
    /// sent message references it through its encryption metadata; when
    /// clear, the upload is plain and the message carries a bare locator.
    pub async fn publish(
        &self,
        data: Bytes,
        content_type: &str,
        room_id: &str,
        dimensions: (u32, u32),
        encrypted: bool,
    ) -> ConvertResult<MessageHandle> {
        let info = MediaInfo {
            mimetype: content_type.to_string(),
            width: dimensions.0,
            height: dimensions.1,
            size: data.len() as u64,
        };

        let content = if encrypted {
            let (ciphertext, file) = encrypt_attachment(&data)?;
            let locator = self
                .client
                .upload(Bytes::from(ciphertext), content_type, TARGET_FILENAME)
                .await?;
            OutboundMedia::encrypted(
                EncryptedSource {
                    url: locator,
                    file,
                },
                info,
            )
        } else {
            let locator = self
                .client
                .upload(data, content_type, TARGET_FILENAME)
                .await?;
            OutboundMedia::plain(locator, info)
        };

        tracing::debug!(
            room_id = %room_id,
            encrypted = content.is_encrypted(),
            "sending converted media message"
        );
        Ok(self.client.send_media(room_id, content).await?)
    }
}
