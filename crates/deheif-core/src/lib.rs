//! Deheif Core Library
//!
//! Domain models, error taxonomy, constants, and configuration shared by the
//! converter components.

pub mod config;
pub mod constants;
pub mod error;
pub mod models;

// Re-export commonly used types
pub use config::{ConverterConfig, RoomAllowList};
pub use error::{ConvertError, ConvertResult};
pub use models::{
    EncryptedFileInfo, EncryptedSource, InboundMessage, MediaEvent, MediaReference, MessageKind,
};
