#![doc(html_root_url = "https://docs.rs/sdpio/0.1.0")]
#![cfg_attr(docsrs, feature(doc_cfg))]
#![deny(missing_docs)]
#![deny(rustdoc::missing_crate_level_docs)]

//! # sdpio - typed SDP parsing for Rust
//!
//! `sdpio` parses Session Description Protocol text (RFC 4566) into a
//! strongly-typed document and decodes the well-known attributes that media
//! negotiation code (RTSP, SIP, WebRTC signaling) actually consumes.
//!
//! ## Features
//!
//! ### Parsing
//! - Single-pass line dispatcher with session/media scope tracking
//! - Typed `o=` (origin) and `m=` (media) sub-parsers, also usable on
//!   their own via `FromStr`
//! - Best-effort results: a fatal error comes back together with the
//!   document built so far
//! - Unknown type tags and attributes are ignored per the RFC, with an
//!   injectable observer for diagnostics
//!
//! ### Attribute interpretation
//! - `rtpmap` payload-type/codec mapping, including clock rate and channels
//! - `fmtp` format-specific parameters (kept opaque, as the RFC intends)
//! - `quality`, `framerate` and the `recvonly`/`sendrecv`/`sendonly`/
//!   `inactive` direction flags
//!
//! ## Quick Start
//!
//! ```rust
//! let body = "\
//! v=0
//! o=- 936021522 936021522 IN IP4 184.72.239.149
//! s=BigBuckBunny_115k.mov
//! m=audio 0 RTP/AVP 96
//! a=rtpmap:96 mpeg4-generic/12000/2
//! a=control:trackID=1
//! ";
//!
//! let (session, err) = sdpio::parse(body);
//! assert!(err.is_none());
//! assert_eq!(session.session_name, "BigBuckBunny_115k.mov");
//!
//! let audio = session.get_media("audio").unwrap();
//! let map = audio.attributes.rtp_map().unwrap().unwrap();
//! assert_eq!(map.payload_type, 96);
//! assert_eq!(map.clock_rate, 12000);
//! ```
//!
//! ## Module Overview
//!
//! - `session`: the document model (session, origin, media descriptions,
//!   attribute maps)
//! - `parser`: the line dispatcher and the origin/media sub-parsers
//! - `attr`: typed decoders for well-known attributes
//! - `error`: error types and the crate `Result` alias
//!
//! Out of scope: SDP generation (only the origin value has a formatter),
//! the `t=`/`r=`/`z=` time-description grammar, and structured parsing of
//! connection, bandwidth and key fields, which are kept as raw strings.

/// Typed decoders for well-known attributes
pub mod attr;

/// Error types and utilities
pub mod error;

/// Line dispatcher and sub-parsers
pub mod parser;

/// The SDP document model
pub mod session;

pub use attr::{Direction, FormatParameters, RtpMap};
pub use error::{Result, SdpError};
pub use parser::{parse, parse_with_observer, LogObserver, ParseObserver};
pub use session::{Attributes, Media, Origin, Session, TimeDescription};

/// MIME media type of the SDP format.
pub const MEDIA_TYPE: &str = "application/sdp";
