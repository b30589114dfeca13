//! Deheif Transport Library
//!
//! Fetches media bytes for a message's reference, transparently handling the
//! encrypted-vs-plain distinction on the read side, and performs the
//! symmetric operation on the write side. Every encrypted read is paired
//! with an encrypted write; the two modes never mix.

pub mod attachment;
pub mod client;
pub mod message;
pub mod transport;

pub use attachment::{decrypt_attachment, encrypt_attachment, SCHEME_VERSION};
pub use client::{ChatMediaClient, ClientError, MessageHandle};
pub use message::{MediaInfo, OutboundMedia};
pub use transport::MediaTransport;
