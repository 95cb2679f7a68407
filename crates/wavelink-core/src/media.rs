//! Value types describing audio streams exchanged with the engine.

use serde::{Deserialize, Serialize};

/// Sample format of frames crossing the engine boundary.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum SampleFormat {
    /// 32-bit floats in the range [-1.0; +1.0].
    #[default]
    PcmFloat32,
    /// Signed 16-bit integers.
    PcmSint16,
}

/// Channel layout of an audio stream.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum ChannelLayout {
    /// One channel.
    Mono,
    /// Two channels: left, right.
    #[default]
    Stereo,
}

impl ChannelLayout {
    pub fn channel_count(self) -> u32 {
        match self {
            ChannelLayout::Mono => 1,
            ChannelLayout::Stereo => 2,
        }
    }
}

/// Encoding of an audio stream: rate, layout, and sample format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct MediaEncoding {
    /// Sample rate in hertz. Must not be zero.
    pub sample_rate: u32,
    /// Channel layout.
    pub channel_layout: ChannelLayout,
    /// Sample format.
    pub format: SampleFormat,
}

impl MediaEncoding {
    /// 44100 Hz, stereo, 32-bit float.
    pub const CD_STEREO: MediaEncoding = MediaEncoding {
        sample_rate: 44_100,
        channel_layout: ChannelLayout::Stereo,
        format: SampleFormat::PcmFloat32,
    };

    pub fn new(sample_rate: u32, channel_layout: ChannelLayout, format: SampleFormat) -> Self {
        Self {
            sample_rate,
            channel_layout,
            format,
        }
    }
}

impl Default for MediaEncoding {
    fn default() -> Self {
        Self::CD_STEREO
    }
}

/// Forward error correction scheme applied to outgoing packets.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum FecEncoding {
    /// Let the engine pick.
    #[default]
    Default,
    /// No FEC.
    Disable,
    /// Reed-Solomon (8m) codec.
    Rs8m,
    /// LDPC-Staircase codec.
    LdpcStaircase,
}

/// Clock driving reads and writes on a peer.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum ClockSource {
    /// Let the engine pick.
    #[default]
    Default,
    /// The user provides the clock by pacing calls.
    External,
    /// The engine paces calls with a CPU timer.
    Internal,
}
