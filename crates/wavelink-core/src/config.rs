//! Typed configuration for opening engine resources.
//!
//! Builders fill in engine defaults (zero values mean "let the engine pick")
//! and reject configurations the engine would refuse, reporting a
//! [`ConfigError`] before anything reaches the native layer.

use std::time::Duration;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::media::{ClockSource, FecEncoding, MediaEncoding};

/// Errors produced while validating resource configuration.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    /// A field that must be positive was zero.
    #[error("{field} must not be zero")]
    ZeroField {
        /// Offending field name.
        field: &'static str,
    },
}

fn check_encoding(encoding: &MediaEncoding, field: &'static str) -> Result<(), ConfigError> {
    if encoding.sample_rate == 0 {
        return Err(ConfigError::ZeroField { field });
    }
    Ok(())
}

/// Configuration of a shared context.
///
/// All fields default to zero, which selects the engine defaults.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContextConfig {
    /// Maximum size in bytes of a network packet. Zero means engine default.
    pub max_packet_size: u32,
    /// Maximum size in bytes of an audio frame. Zero means engine default.
    pub max_frame_size: u32,
}

impl ContextConfig {
    pub fn builder() -> ContextConfigBuilder {
        ContextConfigBuilder::default()
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        Ok(())
    }
}

#[derive(Debug, Default)]
pub struct ContextConfigBuilder {
    max_packet_size: u32,
    max_frame_size: u32,
}

impl ContextConfigBuilder {
    pub fn max_packet_size(mut self, bytes: u32) -> Self {
        self.max_packet_size = bytes;
        self
    }

    pub fn max_frame_size(mut self, bytes: u32) -> Self {
        self.max_frame_size = bytes;
        self
    }

    pub fn build(self) -> Result<ContextConfig, ConfigError> {
        let config = ContextConfig {
            max_packet_size: self.max_packet_size,
            max_frame_size: self.max_frame_size,
        };
        config.validate()?;
        Ok(config)
    }
}

/// Configuration of a sender peer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SenderConfig {
    /// Encoding of the frames the user writes to the sender.
    pub frame_encoding: MediaEncoding,
    /// Duration of one network packet. Zero means engine default.
    pub packet_length: Duration,
    /// FEC scheme for outgoing packets.
    pub fec_encoding: FecEncoding,
    /// Clock pacing writes.
    pub clock_source: ClockSource,
}

impl SenderConfig {
    /// Starts a builder; the frame encoding is the only required parameter.
    pub fn builder(frame_encoding: MediaEncoding) -> SenderConfigBuilder {
        SenderConfigBuilder {
            frame_encoding,
            packet_length: Duration::ZERO,
            fec_encoding: FecEncoding::Default,
            clock_source: ClockSource::Default,
        }
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        check_encoding(&self.frame_encoding, "frame_encoding.sample_rate")
    }
}

#[derive(Debug)]
pub struct SenderConfigBuilder {
    frame_encoding: MediaEncoding,
    packet_length: Duration,
    fec_encoding: FecEncoding,
    clock_source: ClockSource,
}

impl SenderConfigBuilder {
    pub fn packet_length(mut self, length: Duration) -> Self {
        self.packet_length = length;
        self
    }

    pub fn fec_encoding(mut self, fec: FecEncoding) -> Self {
        self.fec_encoding = fec;
        self
    }

    pub fn clock_source(mut self, clock: ClockSource) -> Self {
        self.clock_source = clock;
        self
    }

    pub fn build(self) -> Result<SenderConfig, ConfigError> {
        let config = SenderConfig {
            frame_encoding: self.frame_encoding,
            packet_length: self.packet_length,
            fec_encoding: self.fec_encoding,
            clock_source: self.clock_source,
        };
        config.validate()?;
        Ok(config)
    }
}

/// Configuration of a receiver peer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReceiverConfig {
    /// Encoding of the frames the user reads from the receiver.
    pub frame_encoding: MediaEncoding,
    /// Target playback latency. Zero means engine default.
    pub target_latency: Duration,
    /// Clock pacing reads.
    pub clock_source: ClockSource,
}

impl ReceiverConfig {
    /// Starts a builder; the frame encoding is the only required parameter.
    pub fn builder(frame_encoding: MediaEncoding) -> ReceiverConfigBuilder {
        ReceiverConfigBuilder {
            frame_encoding,
            target_latency: Duration::ZERO,
            clock_source: ClockSource::Default,
        }
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        check_encoding(&self.frame_encoding, "frame_encoding.sample_rate")
    }
}

#[derive(Debug)]
pub struct ReceiverConfigBuilder {
    frame_encoding: MediaEncoding,
    target_latency: Duration,
    clock_source: ClockSource,
}

impl ReceiverConfigBuilder {
    pub fn target_latency(mut self, latency: Duration) -> Self {
        self.target_latency = latency;
        self
    }

    pub fn clock_source(mut self, clock: ClockSource) -> Self {
        self.clock_source = clock;
        self
    }

    pub fn build(self) -> Result<ReceiverConfig, ConfigError> {
        let config = ReceiverConfig {
            frame_encoding: self.frame_encoding,
            target_latency: self.target_latency,
            clock_source: self.clock_source,
        };
        config.validate()?;
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::media::{ChannelLayout, SampleFormat};

    #[test]
    fn context_config_defaults_to_engine_defaults() {
        let config = ContextConfig::builder().build().unwrap();
        assert_eq!(config.max_packet_size, 0);
        assert_eq!(config.max_frame_size, 0);
    }

    #[test]
    fn context_config_keeps_explicit_sizes() {
        let config = ContextConfig::builder()
            .max_packet_size(2048)
            .max_frame_size(8192)
            .build()
            .unwrap();
        assert_eq!(config.max_packet_size, 2048);
        assert_eq!(config.max_frame_size, 8192);
    }

    #[test]
    fn sender_config_rejects_zero_sample_rate() {
        let encoding = MediaEncoding::new(0, ChannelLayout::Stereo, SampleFormat::PcmFloat32);
        let err = SenderConfig::builder(encoding).build().unwrap_err();
        assert_eq!(
            err,
            ConfigError::ZeroField {
                field: "frame_encoding.sample_rate"
            }
        );
    }

    #[test]
    fn receiver_config_builder_applies_options() {
        let config = ReceiverConfig::builder(MediaEncoding::CD_STEREO)
            .target_latency(Duration::from_millis(200))
            .clock_source(ClockSource::Internal)
            .build()
            .unwrap();
        assert_eq!(config.target_latency, Duration::from_millis(200));
        assert_eq!(config.clock_source, ClockSource::Internal);
    }

    #[test]
    fn sender_config_defaults() {
        let config = SenderConfig::builder(MediaEncoding::CD_STEREO).build().unwrap();
        assert_eq!(config.packet_length, Duration::ZERO);
        assert_eq!(config.fec_encoding, FecEncoding::Default);
        assert_eq!(config.clock_source, ClockSource::Default);
    }
}
