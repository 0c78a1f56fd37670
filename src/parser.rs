//! Single-pass SDP line dispatcher and the `o=`/`m=` sub-parsers.
//!
//! An SDP body is a sequence of `<type>=<value>` lines. The dispatcher walks
//! the input once, routing each line by its one-character type tag either to
//! a session field or to the media description currently in scope (the most
//! recently parsed `m=` line). Per RFC 4566 a parser must ignore any type
//! letter and any attribute it does not understand; those lines are skipped
//! and surfaced through an optional [`ParseObserver`] instead of failing the
//! parse. Records are terminated by CRLF, but a bare LF is also accepted.

use std::str::FromStr;

use crate::error::{Result, SdpError};
use crate::session::{Media, Origin, Session};

/// Receiver for diagnostics about input the parser skips.
///
/// Skipped input never affects the parse result; the observer exists so that
/// callers can count or log it. All methods default to doing nothing, so an
/// implementation only overrides what it cares about.
pub trait ParseObserver {
    /// Called for a line carrying a type tag this parser does not model.
    fn unknown_tag(&mut self, _tag: char, _value: &str) {}

    /// Called for a non-empty line with no `=` separator.
    fn skipped_line(&mut self, _line: &str) {}
}

/// Default observer: forwards skipped input to the `log` facade at debug
/// level.
#[derive(Debug, Default)]
pub struct LogObserver;

impl ParseObserver for LogObserver {
    fn unknown_tag(&mut self, tag: char, value: &str) {
        log::debug!("ignoring unknown sdp type {}={}", tag, value);
    }

    fn skipped_line(&mut self, line: &str) {
        log::debug!("ignoring sdp line without separator: {:?}", line);
    }
}

/// Parses an SDP body into a [`Session`].
///
/// Parsing is best-effort: the returned session always reflects every line
/// processed before the first fatal error, and the error (if any) is returned
/// alongside it rather than discarding the document. A `None` error means the
/// whole input was consumed.
///
/// Diagnostics about skipped lines go to the `log` facade; use
/// [`parse_with_observer`] to capture them instead.
///
/// ```
/// let (session, err) = sdpio::parse("v=0\r\no=- 1 1 IN IP4 10.0.0.1\r\ns=demo\r\n");
/// assert!(err.is_none());
/// assert_eq!(session.session_name, "demo");
/// ```
pub fn parse(input: &str) -> (Session, Option<SdpError>) {
    parse_with_observer(input, &mut LogObserver)
}

/// Like [`parse`], reporting skipped input to the given observer.
pub fn parse_with_observer(
    input: &str,
    observer: &mut dyn ParseObserver,
) -> (Session, Option<SdpError>) {
    let mut session = Session::new();
    // Index into session.media of the description subsequent lines bind to;
    // None means lines bind to the session scope.
    let mut current_media: Option<usize> = None;

    for raw_line in input.lines() {
        let line = raw_line.strip_suffix('\r').unwrap_or(raw_line);
        if line.is_empty() {
            continue;
        }

        let (key, value) = match line.split_once('=') {
            Some(parts) => parts,
            None => {
                observer.skipped_line(line);
                continue;
            }
        };

        let mut chars = key.chars();
        let tag = match (chars.next(), chars.next()) {
            (Some(c), None) => c,
            _ => return (session, Some(SdpError::InvalidTypeTag(key.to_string()))),
        };

        match tag {
            'v' => match value.parse::<i32>() {
                Ok(version) => session.version = version,
                Err(err) => {
                    return (session, Some(SdpError::InvalidInteger("version", err)));
                }
            },
            'o' => match value.parse::<Origin>() {
                Ok(origin) => session.origin = origin,
                Err(err) => return (session, Some(err)),
            },
            's' => session.session_name = value.to_string(),
            'u' => session.uri = value.to_string(),
            'e' => session.email = value.to_string(),
            'p' => session.phone = value.to_string(),
            'i' => match current_media {
                Some(idx) => session.media[idx].title = value.to_string(),
                None => session.session_information = value.to_string(),
            },
            'c' => match current_media {
                Some(idx) => session.media[idx].connection_information = value.to_string(),
                None => session.connection_information = value.to_string(),
            },
            'b' => match current_media {
                Some(idx) => session.media[idx]
                    .bandwidth_information
                    .push(value.to_string()),
                None => session.bandwidth_information.push(value.to_string()),
            },
            'k' => match current_media {
                Some(idx) => session.media[idx].encryption_key = value.to_string(),
                None => session.encryption_key = value.to_string(),
            },
            'z' => session.time_zone_adjustments = value.to_string(),
            'm' => match value.parse::<Media>() {
                Ok(media) => {
                    session.media.push(media);
                    current_media = Some(session.media.len() - 1);
                }
                Err(err) => return (session, Some(err)),
            },
            'a' => {
                // a=<attribute> or a=<attribute>:<value>
                let (name, attr_value) = match value.split_once(':') {
                    Some((name, attr_value)) => (name, attr_value),
                    None => (value, ""),
                };
                let attributes = match current_media {
                    Some(idx) => &mut session.media[idx].attributes,
                    None => &mut session.attributes,
                };
                attributes.insert(name.to_string(), attr_value.to_string());
            }
            // Time descriptions are not modeled; reserved for a future
            // populator of Session::times.
            't' | 'r' => {}
            _ => observer.unknown_tag(tag, value),
        }
    }

    (session, None)
}

impl FromStr for Origin {
    type Err = SdpError;

    /// Parses the value of an `o=` line: exactly six space-separated fields,
    /// with numeric session id and session version.
    fn from_str(s: &str) -> Result<Self> {
        let fields: Vec<&str> = s.split(' ').collect();
        if fields.len() != 6 {
            return Err(SdpError::InvalidOriginShape(fields.len()));
        }
        Ok(Origin {
            username: fields[0].to_string(),
            session_id: fields[1]
                .parse()
                .map_err(|e| SdpError::InvalidInteger("origin session-id", e))?,
            session_version: fields[2]
                .parse()
                .map_err(|e| SdpError::InvalidInteger("origin session-version", e))?,
            net_type: fields[3].to_string(),
            address_type: fields[4].to_string(),
            unicast_address: fields[5].to_string(),
        })
    }
}

impl FromStr for Media {
    type Err = SdpError;

    /// Parses the value of an `m=` line: `<media> <port>[/<count>] <proto>
    /// <fmt>`. The split is bounded at four parts, so the format field keeps
    /// any embedded spaces verbatim.
    fn from_str(s: &str) -> Result<Self> {
        let fields: Vec<&str> = s.splitn(4, ' ').collect();
        if fields.len() != 4 {
            return Err(SdpError::InvalidMediaShape(fields.len()));
        }
        let (port, port_count) = match fields[1].split_once('/') {
            Some((port, count)) => (
                port.parse()
                    .map_err(|e| SdpError::InvalidInteger("media port", e))?,
                Some(
                    count
                        .parse()
                        .map_err(|e| SdpError::InvalidInteger("media port count", e))?,
                ),
            ),
            None => (
                fields[1]
                    .parse()
                    .map_err(|e| SdpError::InvalidInteger("media port", e))?,
                None,
            ),
        };
        Ok(Media {
            media_type: fields[0].to_string(),
            port,
            port_count,
            proto: fields[2].to_string(),
            format: fields[3].to_string(),
            ..Media::default()
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use quickcheck_macros::quickcheck;

    #[derive(Default)]
    struct Capture {
        unknown: Vec<(char, String)>,
        skipped: Vec<String>,
    }

    impl ParseObserver for Capture {
        fn unknown_tag(&mut self, tag: char, value: &str) {
            self.unknown.push((tag, value.to_string()));
        }

        fn skipped_line(&mut self, line: &str) {
            self.skipped.push(line.to_string());
        }
    }

    #[test]
    fn test_parse_version() {
        let (session, err) = parse("v=2");
        assert!(err.is_none());
        assert_eq!(session.version, 2);
    }

    #[test]
    fn test_parse_version_not_numeric() {
        let (_, err) = parse("v=two");
        assert!(matches!(err, Some(SdpError::InvalidInteger("version", _))));
    }

    #[test]
    fn test_fatal_error_stops_dispatch() {
        // The session name before the bad line survives; the one after is
        // never processed.
        let (session, err) = parse("s=first\nv=bad\ns=second");
        assert!(err.is_some());
        assert_eq!(session.session_name, "first");
    }

    #[test]
    fn test_long_type_tag_is_fatal() {
        let (session, err) = parse("s=ok\nvv=0");
        assert!(matches!(err, Some(SdpError::InvalidTypeTag(tag)) if tag == "vv"));
        assert_eq!(session.session_name, "ok");
    }

    #[test]
    fn test_parse_origin_line() {
        let (session, err) = parse("o=- 936021522 936021522 IN IP4 184.72.239.149");
        assert!(err.is_none());
        assert_eq!(session.origin.username, "-");
        assert_eq!(session.origin.session_id, 936021522);
        assert_eq!(session.origin.session_version, 936021522);
        assert_eq!(session.origin.net_type, "IN");
        assert_eq!(session.origin.address_type, "IP4");
        assert_eq!(session.origin.unicast_address, "184.72.239.149");
    }

    #[test]
    fn test_origin_wrong_field_count() {
        let err = "- 1 2 IN IP4".parse::<Origin>().unwrap_err();
        assert!(matches!(err, SdpError::InvalidOriginShape(5)));
    }

    #[test]
    fn test_origin_bad_session_id() {
        let err = "- abc 2 IN IP4 10.0.0.1".parse::<Origin>().unwrap_err();
        assert!(matches!(
            err,
            SdpError::InvalidInteger("origin session-id", _)
        ));
    }

    #[test]
    fn test_parse_media_line() {
        let media = "audio 49170 RTP/AVP 0 96".parse::<Media>().unwrap();
        assert_eq!(media.media_type, "audio");
        assert_eq!(media.port, 49170);
        assert_eq!(media.port_count, None);
        assert_eq!(media.proto, "RTP/AVP");
        // Bounded split: everything past the third space stays in format.
        assert_eq!(media.format, "0 96");
    }

    #[test]
    fn test_parse_media_port_count() {
        let media = "video 49170/2 RTP/AVP 31".parse::<Media>().unwrap();
        assert_eq!(media.port, 49170);
        assert_eq!(media.port_count, Some(2));
    }

    #[test]
    fn test_media_wrong_field_count() {
        let err = "video 49170 RTP/AVP".parse::<Media>().unwrap_err();
        assert!(matches!(err, SdpError::InvalidMediaShape(3)));
    }

    #[test]
    fn test_malformed_media_not_appended() {
        let input = "v=0\nm=audio 0 RTP/AVP 96\nm=video 0 RTP/AVP\n";
        let (session, err) = parse(input);
        assert!(matches!(err, Some(SdpError::InvalidMediaShape(3))));
        assert_eq!(session.media.len(), 1);
        assert_eq!(session.media[0].media_type, "audio");
    }

    #[test]
    fn test_media_bad_port() {
        let err = "audio port RTP/AVP 0".parse::<Media>().unwrap_err();
        assert!(matches!(err, SdpError::InvalidInteger("media port", _)));
    }

    #[test]
    fn test_scope_switches_at_media_line() {
        let input = "\
i=session info
c=IN IP4 224.2.17.12/127
b=AS:128
k=prompt
a=control:*
m=audio 0 RTP/AVP 96
i=audio track
c=IN IP4 10.0.0.1
b=AS:64
b=TIAS:64000
k=clear:key
a=control:trackID=1
";
        let (session, err) = parse(input);
        assert!(err.is_none());
        assert_eq!(session.session_information, "session info");
        assert_eq!(session.connection_information, "IN IP4 224.2.17.12/127");
        assert_eq!(session.bandwidth_information, vec!["AS:128".to_string()]);
        assert_eq!(session.encryption_key, "prompt");
        assert_eq!(session.get_attribute("control"), Some(&"*".to_string()));

        let media = &session.media[0];
        assert_eq!(media.title, "audio track");
        assert_eq!(media.connection_information, "IN IP4 10.0.0.1");
        assert_eq!(
            media.bandwidth_information,
            vec!["AS:64".to_string(), "TIAS:64000".to_string()]
        );
        assert_eq!(media.encryption_key, "clear:key");
        assert_eq!(
            media.attributes.get("control"),
            Some(&"trackID=1".to_string())
        );
    }

    #[test]
    fn test_no_connection_inheritance_into_media() {
        let (session, err) = parse("c=IN IP4 224.2.17.12\nm=audio 0 RTP/AVP 96\n");
        assert!(err.is_none());
        assert_eq!(session.connection_information, "IN IP4 224.2.17.12");
        assert_eq!(session.media[0].connection_information, "");
    }

    #[test]
    fn test_attribute_last_write_wins_per_scope() {
        let input = "a=control:first\na=control:second\nm=audio 0 RTP/AVP 96\na=control:media\n";
        let (session, err) = parse(input);
        assert!(err.is_none());
        assert_eq!(session.get_attribute("control"), Some(&"second".to_string()));
        assert_eq!(
            session.media[0].attributes.get("control"),
            Some(&"media".to_string())
        );
    }

    #[test]
    fn test_flag_attribute_stored_with_empty_value() {
        let (session, err) = parse("a=recvonly\n");
        assert!(err.is_none());
        assert_eq!(session.get_attribute("recvonly"), Some(&"".to_string()));
    }

    #[test]
    fn test_crlf_line_endings() {
        let (session, err) = parse("v=0\r\ns=crlf test\r\n");
        assert!(err.is_none());
        assert_eq!(session.session_name, "crlf test");
    }

    #[test]
    fn test_unknown_tags_and_junk_reported_not_fatal() {
        let mut capture = Capture::default();
        let input = "v=0\nx=mystery\nnot a field\n\ns=name\n";
        let (session, err) = parse_with_observer(input, &mut capture);
        assert!(err.is_none());
        assert_eq!(session.session_name, "name");
        assert_eq!(capture.unknown, vec![('x', "mystery".to_string())]);
        assert_eq!(capture.skipped, vec!["not a field".to_string()]);
    }

    #[test]
    fn test_time_lines_skipped_silently() {
        let mut capture = Capture::default();
        let (session, err) = parse_with_observer("t=0 0\nr=604800 3600 0\n", &mut capture);
        assert!(err.is_none());
        assert!(session.times.is_empty());
        assert!(capture.unknown.is_empty());
    }

    #[test]
    fn test_origin_round_trip() {
        let input = "- 936021522 936021522 IN IP4 184.72.239.149";
        let origin = input.parse::<Origin>().unwrap();
        assert_eq!(origin.to_string(), input);
    }

    /// Maps an arbitrary string to a valid origin token: no whitespace,
    /// non-empty.
    fn token(s: String, fallback: &str) -> String {
        let t: String = s.chars().filter(|c| !c.is_whitespace()).collect();
        if t.is_empty() {
            fallback.to_string()
        } else {
            t
        }
    }

    #[quickcheck]
    fn prop_origin_format_parse_round_trip(
        username: String,
        session_id: i64,
        session_version: i64,
        net_type: String,
        address_type: String,
        unicast_address: String,
    ) -> bool {
        let origin = Origin {
            username: token(username, "-"),
            session_id,
            session_version,
            net_type: token(net_type, "IN"),
            address_type: token(address_type, "IP4"),
            unicast_address: token(unicast_address, "0.0.0.0"),
        };
        let formatted = origin.to_string();
        match formatted.parse::<Origin>() {
            Ok(parsed) => parsed == origin && parsed.to_string() == formatted,
            Err(_) => false,
        }
    }

    #[test]
    fn test_origin_failure_keeps_partial_session() {
        let (session, err) = parse("v=0\ns=kept\no=- not-a-number 2 IN IP4 10.0.0.1\n");
        assert!(matches!(
            err,
            Some(SdpError::InvalidInteger("origin session-id", _))
        ));
        assert_eq!(session.version, 0);
        assert_eq!(session.session_name, "kept");
    }
}
