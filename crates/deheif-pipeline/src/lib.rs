//! Deheif Pipeline Library
//!
//! The conversion core a host wires into its event dispatch: build a
//! [`ConversionPipeline`] from a [`ChatMediaClient`](deheif_transport::ChatMediaClient)
//! and a [`ConverterConfig`](deheif_core::ConverterConfig), then call
//! [`ConversionPipeline::handle_event`] for every image/file message event.
//! There is no framework base class to subclass; registration is the host's
//! explicit choice.

pub mod filter;
pub mod pipeline;

pub use filter::is_eligible;
pub use pipeline::{ConversionPipeline, Outcome};
