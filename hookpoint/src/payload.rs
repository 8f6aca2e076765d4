//! Registration payload parsing
//!
//! The inbound body is an XML document whose root carries `uri` and
//! `version` child elements. Parsing is deliberately tolerant about
//! everything else: unknown elements are skipped, the first `uri` and
//! `version` found win, and an element that is present but empty still
//! counts as present (its value then fails integer coercion downstream
//! rather than reporting a missing element).

use quick_xml::Reader;
use quick_xml::events::Event;
use thiserror::Error;

/// A successfully parsed registration request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Registration {
    pub uri: String,
    pub version: i64,
}

/// Why a registration body was rejected.
///
/// `Malformed` carries the underlying detail (parser error text or the
/// offending version value); the missing-element variants carry the exact
/// message text agents have historically been shown.
#[derive(Debug, Error)]
pub enum PayloadError {
    #[error("{0}")]
    Malformed(String),

    #[error("missing uri element")]
    MissingUri,

    #[error("missing version element")]
    MissingVersion,
}

enum Field {
    Uri,
    Version,
}

/// Parse a registration document.
///
/// The version is coerced to an integer here, but whether that integer is a
/// *supported* version is the caller's decision; a non-numeric version is a
/// malformed payload, not an unsupported one.
pub fn parse_registration(input: &str) -> Result<Registration, PayloadError> {
    let mut reader = Reader::from_str(input);
    reader.config_mut().trim_text(true);

    let mut uri: Option<String> = None;
    let mut version: Option<String> = None;
    let mut current: Option<Field> = None;

    loop {
        match reader.read_event() {
            Err(e) => return Err(PayloadError::Malformed(e.to_string())),
            Ok(Event::Start(start)) => {
                current = match start.local_name().as_ref() {
                    b"uri" if uri.is_none() => {
                        uri = Some(String::new());
                        Some(Field::Uri)
                    }
                    b"version" if version.is_none() => {
                        version = Some(String::new());
                        Some(Field::Version)
                    }
                    _ => None,
                };
            }
            Ok(Event::Empty(empty)) => match empty.local_name().as_ref() {
                b"uri" if uri.is_none() => uri = Some(String::new()),
                b"version" if version.is_none() => version = Some(String::new()),
                _ => {}
            },
            Ok(Event::End(_)) => current = None,
            Ok(Event::Text(text)) => {
                let text = text
                    .unescape()
                    .map_err(|e| PayloadError::Malformed(e.to_string()))?;
                match current {
                    Some(Field::Uri) => {
                        uri.get_or_insert_with(String::new).push_str(&text);
                    }
                    Some(Field::Version) => {
                        version.get_or_insert_with(String::new).push_str(&text);
                    }
                    None => {}
                }
            }
            Ok(Event::Eof) => break,
            Ok(_) => {}
        }
    }

    let uri = uri.ok_or(PayloadError::MissingUri)?;
    let version_text = version.ok_or(PayloadError::MissingVersion)?;
    let version = version_text.trim().parse::<i64>().map_err(|_| {
        PayloadError::Malformed(format!("invalid version value `{version_text}`"))
    })?;

    Ok(Registration { uri, version })
}
