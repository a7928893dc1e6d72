//! `data:<mime-type>;base64,<payload>` documents, the encoding used for
//! uploaded resumes.

use std::fmt;

use base64::{engine::general_purpose, Engine as _};

use crate::flows::schema::ContractError;

pub const MIME_PDF: &str = "application/pdf";
pub const MIME_TEXT: &str = "text/plain";

#[derive(Debug, Clone, PartialEq)]
pub struct DataUri {
    mime_type: String,
    payload: String,
}

impl DataUri {
    /// Parses and checks the payload is valid base64.
    /// MIME parameters (`;charset=utf-8`) are accepted and dropped.
    pub fn parse(raw: &str) -> Result<Self, ContractError> {
        let raw = raw.trim();
        let rest = raw
            .strip_prefix("data:")
            .ok_or_else(|| invalid("expected a 'data:' URI"))?;
        let (header, payload) = rest
            .split_once(',')
            .ok_or_else(|| invalid("missing ',' between header and payload"))?;
        let header = header
            .strip_suffix(";base64")
            .ok_or_else(|| invalid("payload must be base64 encoded"))?;

        let mime_type = header
            .split(';')
            .next()
            .unwrap_or_default()
            .trim()
            .to_ascii_lowercase();
        if mime_type.is_empty() {
            return Err(invalid("missing MIME type"));
        }
        if payload.is_empty() {
            return Err(invalid("document is empty"));
        }
        general_purpose::STANDARD
            .decode(payload)
            .map_err(|e| invalid(&format!("payload is not valid base64 ({e})")))?;

        Ok(Self {
            mime_type,
            payload: payload.to_string(),
        })
    }

    pub fn encode(mime_type: &str, bytes: &[u8]) -> Self {
        Self {
            mime_type: mime_type.to_ascii_lowercase(),
            payload: general_purpose::STANDARD.encode(bytes),
        }
    }

    pub fn mime_type(&self) -> &str {
        &self.mime_type
    }

    /// The base64 body without the `data:` header.
    pub fn payload(&self) -> &str {
        &self.payload
    }

    /// Size of the decoded document, computed from the payload length.
    /// `parse` only accepts padded standard base64, so this is exact.
    pub fn decoded_len(&self) -> usize {
        let padding = self.payload.bytes().rev().take_while(|b| *b == b'=').count();
        (self.payload.len() / 4 * 3).saturating_sub(padding)
    }

    pub fn decode(&self) -> Result<Vec<u8>, ContractError> {
        general_purpose::STANDARD
            .decode(&self.payload)
            .map_err(|e| invalid(&format!("payload is not valid base64 ({e})")))
    }
}

impl fmt::Display for DataUri {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "data:{};base64,{}", self.mime_type, self.payload)
    }
}

fn invalid(reason: &str) -> ContractError {
    ContractError::InvalidDocument(reason.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_pdf_uri() {
        let uri = DataUri::parse("data:application/pdf;base64,JVBERi0xLjQ=").unwrap();
        assert_eq!(uri.mime_type(), MIME_PDF);
        assert_eq!(uri.payload(), "JVBERi0xLjQ=");
        assert_eq!(uri.decode().unwrap(), b"%PDF-1.4");
    }

    #[test]
    fn test_parse_drops_mime_parameters() {
        let uri = DataUri::parse("data:text/plain;charset=utf-8;base64,aGk=").unwrap();
        assert_eq!(uri.mime_type(), MIME_TEXT);
    }

    #[test]
    fn test_parse_rejects_plain_string() {
        assert!(matches!(
            DataUri::parse("just some resume text"),
            Err(ContractError::InvalidDocument(_))
        ));
    }

    #[test]
    fn test_parse_rejects_non_base64_uri() {
        let err = DataUri::parse("data:text/plain,hello").unwrap_err();
        assert!(err.to_string().contains("base64"));
    }

    #[test]
    fn test_parse_rejects_corrupt_payload() {
        assert!(DataUri::parse("data:application/pdf;base64,@@@@").is_err());
    }

    #[test]
    fn test_decoded_len_matches_decode() {
        for body in [&b""[..], b"a", b"ab", b"abc", b"%PDF-1.7 body"] {
            let uri = DataUri::encode(MIME_PDF, body);
            assert_eq!(uri.decoded_len(), body.len());
        }
    }

    #[test]
    fn test_encode_display_parse_agree() {
        let uri = DataUri::encode("application/pdf", b"%PDF-1.7 body");
        let reparsed = DataUri::parse(&uri.to_string()).unwrap();
        assert_eq!(reparsed, uri);
    }
}
