use std::collections::HashMap;
use std::fmt;
use std::ops::{Deref, DerefMut};

/// Named annotations (`a=` lines) collected for one scope, either the whole
/// session or a single media description.
///
/// Keys are unique within a scope; a repeated name overwrites the earlier
/// value (last write wins). Session-level attributes are *not* inherited into
/// media-level lookups by this type — RFC 4566 leaves that to the consumer of
/// the description.
///
/// Typed decoders for well-known attribute names (`rtpmap`, `fmtp`,
/// `quality`, `framerate` and the direction flags) live in the
/// [`attr`](crate::attr) module as methods on this type.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Attributes(HashMap<String, String>);

impl Attributes {
    /// Creates an empty attribute map.
    pub fn new() -> Self {
        Attributes(HashMap::new())
    }
}

impl Deref for Attributes {
    type Target = HashMap<String, String>;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl DerefMut for Attributes {
    fn deref_mut(&mut self) -> &mut Self::Target {
        &mut self.0
    }
}

/// Originator and session identifier, the `o=` field:
///
/// `o=<username> <sess-id> <sess-version> <nettype> <addrtype> <unicast-address>`
///
/// The subfields excepting the version, taken together, identify the session
/// irrespective of any modifications; the whole tuple serves as a globally
/// unique identifier for this version of the session description. The parser
/// validates shape only, not uniqueness.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Origin {
    /// The user's login on the originating host, or `-` if the host does not
    /// support the concept of user IDs. Must not contain spaces.
    pub username: String,
    /// Numeric session id. RFC 4566 recommends an NTP format timestamp to
    /// ensure uniqueness.
    pub session_id: i64,
    /// Version number for this session description, increased on every
    /// modification to the session data.
    pub session_version: i64,
    /// Type of network; initially only `IN` (Internet) is defined.
    pub net_type: String,
    /// Type of the address that follows; initially `IP4` and `IP6` are
    /// defined.
    pub address_type: String,
    /// Address of the machine the session was created from: a fully
    /// qualified domain name or the textual representation of an IP address.
    pub unicast_address: String,
}

impl fmt::Display for Origin {
    /// Renders the canonical space-joined six-token `o=` value.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} {} {} {} {} {}",
            self.username,
            self.session_id,
            self.session_version,
            self.net_type,
            self.address_type,
            self.unicast_address
        )
    }
}

/// Time the session is active (`t=`) with its repeat times (`r=`).
///
/// Kept as a placeholder: the time-description grammar is not parsed by this
/// crate and `Session::times` is never populated.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TimeDescription {
    /// `t=<start-time> <stop-time>`
    pub session_active_time: u64,
    /// `r=<repeat interval> <active duration> <offsets from start-time>`
    pub repeat_times: Vec<u64>,
}

/// One media description: an `m=` line and the `i=`/`c=`/`b=`/`k=`/`a=`
/// lines that follow it.
///
/// `m=<media> <port> <proto> <fmt> ...` or
/// `m=<media> <port>/<number of ports> <proto> <fmt> ...`
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Media {
    /// The media type. Currently defined are `audio`, `video`, `text`,
    /// `application` and `message`.
    pub media_type: String,
    /// Transport port the media stream is sent to.
    pub port: u16,
    /// Number of ports, present only when the port field carried a `/`
    /// (hierarchically encoded streams).
    pub port_count: Option<u16>,
    /// Transport protocol, e.g. `udp`, `RTP/AVP` (RTP under the Audio/Video
    /// Profile) or `RTP/SAVP` (secure RTP).
    pub proto: String,
    /// Media format description, kept verbatim: one or more space-separated
    /// format tokens whose meaning depends on `proto` (RTP payload types for
    /// the RTP profiles).
    pub format: String,
    /// `i=` media title.
    pub title: String,
    /// `c=` connection information, optional if included at session level.
    /// Not inherited from the session by the parser.
    pub connection_information: String,
    /// `b=` bandwidth information lines, in order of appearance.
    pub bandwidth_information: Vec<String>,
    /// `k=` encryption key.
    pub encryption_key: String,
    /// Media-level attributes, independent of the session-level map.
    pub attributes: Attributes,
}

/// A parsed session description, the top-level document of an SDP body.
///
/// The connection (`c=`) and attribute (`a=`) information in the
/// session-level section applies to all the media of that session unless
/// overridden by connection information or an attribute of the same name in
/// the media description; applying that override rule is left to the caller.
///
/// Built by [`parse`](crate::parse) and immutable from the caller's
/// perspective afterwards; all interpretation happens through read-only
/// lookups.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Session {
    /// `v=` protocol version. This memo defines version 0; there is no
    /// minor version number.
    pub version: i32,
    /// `o=` originator and session identifier.
    pub origin: Origin,
    /// `s=` session name.
    pub session_name: String,
    /// `i=` session information.
    pub session_information: String,
    /// `u=` URI of the description.
    pub uri: String,
    /// `e=` email address.
    pub email: String,
    /// `p=` phone number.
    pub phone: String,
    /// `c=<nettype> <addrtype> <connection-address>`, kept verbatim. Not
    /// required if included in all media.
    pub connection_information: String,
    /// `b=<bwtype>:<bandwidth>` lines, in order of appearance.
    pub bandwidth_information: Vec<String>,
    /// Time descriptions (`t=`/`r=` lines). Never populated by this parser;
    /// reserved for future extension.
    pub times: Vec<TimeDescription>,
    /// `z=<adjustment time> <offset> ...`, kept verbatim.
    pub time_zone_adjustments: String,
    /// `k=<method>:[<encryption key>]`, kept verbatim.
    pub encryption_key: String,
    /// Session-level attributes.
    pub attributes: Attributes,
    /// Media descriptions in order of appearance. The order is semantically
    /// meaningful: it determines the media stream indices used by control
    /// protocols (e.g. `trackID=1`, `trackID=2` in RTSP).
    pub media: Vec<Media>,
}

impl Session {
    /// Creates an empty session description.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the first media description of the given type, if any.
    pub fn get_media(&self, media_type: &str) -> Option<&Media> {
        self.media.iter().find(|m| m.media_type == media_type)
    }

    /// Returns the session-level value of the named attribute, if present.
    pub fn get_attribute(&self, name: &str) -> Option<&String> {
        self.attributes.get(name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_origin_display() {
        let origin = Origin {
            username: "-".to_string(),
            session_id: 936021522,
            session_version: 936021522,
            net_type: "IN".to_string(),
            address_type: "IP4".to_string(),
            unicast_address: "184.72.239.149".to_string(),
        };
        assert_eq!(
            origin.to_string(),
            "- 936021522 936021522 IN IP4 184.72.239.149"
        );
    }

    #[test]
    fn test_attribute_last_write_wins() {
        let mut attrs = Attributes::new();
        attrs.insert("control".to_string(), "trackID=1".to_string());
        attrs.insert("control".to_string(), "trackID=2".to_string());
        assert_eq!(attrs.get("control"), Some(&"trackID=2".to_string()));
    }
}
