//! Conversion pipeline: filter, fetch, transcode, publish.
//!
//! One invocation per inbound message, run to completion or failure. The
//! pipeline holds no mutable state across invocations; the room allow-list
//! is read-only for the process lifetime, so concurrent dispatch needs no
//! locking. On failure the original message is left untouched and nothing is
//! posted to the room; errors surface to the host's diagnostics only.

use std::sync::Arc;

use deheif_codec::MediaCodec;
use deheif_core::{ConverterConfig, ConvertResult, InboundMessage, MediaEvent, RoomAllowList};
use deheif_transport::{ChatMediaClient, MediaTransport, MessageHandle};

use crate::filter::is_eligible;

/// Terminal outcome of a successful pipeline run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    /// The message was not a conversion candidate; nothing was fetched,
    /// transcoded, or sent.
    Skipped,
    /// A converted message was published.
    Published(MessageHandle),
}

pub struct ConversionPipeline {
    transport: MediaTransport,
    allow_list: RoomAllowList,
}

impl ConversionPipeline {
    pub fn new(client: Arc<dyn ChatMediaClient>, config: ConverterConfig) -> Self {
        Self {
            transport: MediaTransport::new(client),
            allow_list: config.rooms,
        }
    }

    /// Host-facing entry point: normalize the raw event, then run. An event
    /// with neither a plain url nor an encrypted file reference fails here
    /// with `MalformedReference` before any network call.
    pub async fn handle_event(&self, event: MediaEvent) -> ConvertResult<Outcome> {
        let message = InboundMessage::try_from(event)?;
        self.handle(message).await
    }

    /// Run the fetch -> decode -> encode -> publish chain for one message.
    pub async fn handle(&self, message: InboundMessage) -> ConvertResult<Outcome> {
        if !is_eligible(&message, &self.allow_list) {
            tracing::debug!(
                room_id = %message.room_id,
                kind = ?message.kind,
                mime = ?message.mime_type,
                "message not eligible for conversion, skipping"
            );
            return Ok(Outcome::Skipped);
        }

        // The encryption mode is decided exactly once, here, and carried
        // unchanged to publish. The room's mode never flips.
        let encrypted = message.media.is_encrypted();

        tracing::debug!(
            room_id = %message.room_id,
            locator = %message.media.locator(),
            encrypted,
            "fetching source media"
        );
        let data = self.transport.fetch(&message.media).await?;

        let decoded = MediaCodec::decode(&data)?;
        tracing::debug!(
            format = ?decoded.format,
            width = decoded.width,
            height = decoded.height,
            color = ?decoded.color,
            "decoded source image"
        );

        // Declared dimensions are untrusted; the published message carries
        // the dimensions measured from the encoded output.
        let output = MediaCodec::encode(&decoded)?;
        tracing::debug!(
            width = output.width,
            height = output.height,
            size = output.data.len(),
            "encoded target image"
        );

        let handle = self
            .transport
            .publish(
                output.data,
                output.content_type,
                &message.room_id,
                (output.width, output.height),
                encrypted,
            )
            .await?;

        tracing::info!(
            room_id = %message.room_id,
            event_id = %handle.0,
            encrypted,
            "published converted image"
        );
        Ok(Outcome::Published(handle))
    }
}
