//! Typed decoders for well-known SDP attributes.
//!
//! These are read-only interpretations of an [`Attributes`] map and never
//! touch the parsed document: an absent attribute decodes to `None` (or the
//! documented default), a present but malformed value is a decode error local
//! to the call. Decoding is stateless, so a completed [`Session`] can be
//! interpreted from any number of readers concurrently.
//!
//! [`Session`]: crate::Session

use crate::error::{Result, SdpError};
use crate::session::Attributes;

/// Decoded `a=rtpmap` value, mapping an RTP payload type to its codec:
///
/// `a=rtpmap:<payload type> <encoding name>/<clock rate>[/<encoding parameters>]`
///
/// For audio streams the encoding parameters carry the number of channels;
/// no other use is currently defined.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RtpMap {
    /// RTP payload type the mapping applies to.
    pub payload_type: u8,
    /// Codec name, e.g. `H264` or `mpeg4-generic`.
    pub encoding_name: String,
    /// RTP clock rate in Hz.
    pub clock_rate: u32,
    /// Channel count, present only for audio encodings that specify it.
    pub channels: Option<u32>,
}

/// Decoded `a=fmtp` value:
///
/// `a=fmtp:<format> <format specific parameters>`
///
/// The parameters are conveyed in a way SDP does not have to understand and
/// are handed over unchanged to the media tool using the format; their
/// grammar is codec-specific, so they stay opaque here.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormatParameters {
    /// The format (payload type, for RTP profiles) the parameters apply to.
    pub format: String,
    /// The format-specific parameters, verbatim.
    pub parameters: String,
}

/// Transmission direction declared by the `recvonly`/`sendrecv`/`sendonly`/
/// `inactive` flag attributes.
///
/// If none of the four flags is present, RFC 4566 says `sendrecv` should be
/// assumed for sessions that are not of the conference type `broadcast` or
/// `H332`; conference type is not modeled here, so the absence is reported as
/// [`Direction::Unspecified`] and the default is left to the caller.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    /// `a=recvonly`: start the tools in receive-only mode. Applies to the
    /// media only; an RTP-based system should still send RTCP.
    RecvOnly,
    /// `a=sendrecv`: start the tools in send and receive mode.
    SendRecv,
    /// `a=sendonly`: start the tools in send-only mode. Any associated
    /// control protocol should still be received and processed.
    SendOnly,
    /// `a=inactive`: no media is sent over the stream, e.g. a conference
    /// member on hold.
    Inactive,
    /// None of the four direction flags is present.
    Unspecified,
}

impl Attributes {
    /// Decodes the `rtpmap` attribute, if present.
    pub fn rtp_map(&self) -> Result<Option<RtpMap>> {
        let value = match self.get("rtpmap") {
            Some(value) => value,
            None => return Ok(None),
        };
        let malformed = || SdpError::AttributeDecode("rtpmap", value.clone());

        let (payload, encoding) = value.split_once(' ').ok_or_else(malformed)?;
        let payload_type = payload.parse().map_err(|_| malformed())?;
        let segments: Vec<&str> = encoding.split('/').collect();
        let (encoding_name, clock_rate, channels) = match segments[..] {
            [name, clock] => (name, clock, None),
            [name, clock, channels] => (name, clock, Some(channels)),
            _ => return Err(malformed()),
        };
        Ok(Some(RtpMap {
            payload_type,
            encoding_name: encoding_name.to_string(),
            clock_rate: clock_rate.parse().map_err(|_| malformed())?,
            channels: match channels {
                Some(channels) => Some(channels.parse().map_err(|_| malformed())?),
                None => None,
            },
        }))
    }

    /// Decodes the `fmtp` attribute, if present. The format-specific
    /// parameters are returned verbatim; at most one instance of the
    /// attribute is allowed per format, so a single lookup suffices.
    pub fn format_parameters(&self) -> Result<Option<FormatParameters>> {
        let value = match self.get("fmtp") {
            Some(value) => value,
            None => return Ok(None),
        };
        let (format, parameters) = value
            .split_once(' ')
            .ok_or_else(|| SdpError::AttributeDecode("fmtp", value.clone()))?;
        Ok(Some(FormatParameters {
            format: format.to_string(),
            parameters: parameters.to_string(),
        }))
    }

    /// Returns the `quality` attribute as an integer.
    ///
    /// The value suggests a trade-off between frame rate and still-image
    /// quality, in the range 0 (worst usable) through 5 (codec default) to
    /// 10 (best the compression scheme can give). Quality is advisory, so an
    /// absent or unparseable value decodes to 0 rather than failing.
    pub fn quality(&self) -> i32 {
        self.get("quality")
            .and_then(|value| value.parse().ok())
            .unwrap_or(0)
    }

    /// Decodes the `framerate` attribute, if present: the maximum video
    /// frame rate in frames/sec, as an integer or an `<integer>.<fraction>`
    /// decimal. Defined only for video media.
    pub fn frame_rate(&self) -> Result<Option<f64>> {
        let value = match self.get("framerate") {
            Some(value) => value,
            None => return Ok(None),
        };
        value
            .parse()
            .map(Some)
            .map_err(|_| SdpError::AttributeDecode("framerate", value.clone()))
    }

    /// Returns the transmission direction declared by the flag attributes,
    /// or [`Direction::Unspecified`] when none of them is present. The four
    /// flags are mutually exclusive by convention; if several appear anyway,
    /// the first in RFC order wins.
    pub fn direction(&self) -> Direction {
        if self.contains_key("recvonly") {
            Direction::RecvOnly
        } else if self.contains_key("sendrecv") {
            Direction::SendRecv
        } else if self.contains_key("sendonly") {
            Direction::SendOnly
        } else if self.contains_key("inactive") {
            Direction::Inactive
        } else {
            Direction::Unspecified
        }
    }
}
