//! Error conversion implementations.
//!
//! This module contains From trait implementations to convert from reader
//! and decoding error types to the unified Error type.

use super::types::Error;

impl From<quick_xml::Error> for Error {
    fn from(err: quick_xml::Error) -> Self {
        match err {
            quick_xml::Error::Io(e) => Error::Xml(format!("I/O failure while reading XML: {}", e)),
            other => Error::Xml(other.to_string()),
        }
    }
}

impl From<quick_xml::events::attributes::AttrError> for Error {
    fn from(err: quick_xml::events::attributes::AttrError) -> Self {
        Error::Xml(format!("Malformed attribute: {}", err))
    }
}

impl From<std::str::Utf8Error> for Error {
    fn from(err: std::str::Utf8Error) -> Self {
        Error::Parse(format!("Invalid UTF-8 in XML: {}", err))
    }
}

impl From<base64::DecodeError> for Error {
    fn from(err: base64::DecodeError) -> Self {
        Error::Processing(format!("Invalid base64 payload: {}", err))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_utf8_error_is_parse_error() {
        let bytes = [0xff_u8, 0xfe];
        let err: Error = std::str::from_utf8(&bytes).unwrap_err().into();
        assert!(err.is_parse_error());
    }

    #[test]
    fn test_base64_error_is_processing_error() {
        use base64::Engine;

        let err: Error = base64::engine::general_purpose::STANDARD
            .decode("@@@@")
            .unwrap_err()
            .into();
        assert!(!err.is_parse_error());
        assert!(matches!(err, Error::Processing(_)));
    }
}
