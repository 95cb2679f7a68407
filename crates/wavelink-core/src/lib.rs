//! Shared plain types for the wavelink engine: media encodings and the typed
//! configuration passed when opening contexts, senders, and receivers.

pub mod config;
pub mod media;

pub use config::{
    ConfigError, ContextConfig, ContextConfigBuilder, ReceiverConfig, ReceiverConfigBuilder,
    SenderConfig, SenderConfigBuilder,
};
pub use media::{ChannelLayout, ClockSource, FecEncoding, MediaEncoding, SampleFormat};
