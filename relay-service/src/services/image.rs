//! Image payload normalization.
//!
//! Clients send images as base64, with or without a data-URL prefix
//! (`data:image/png;base64,...`). The payload is normalized and decoded here,
//! once per request, before the dispatch loop.

use crate::services::providers::ImagePayload;
use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine;

/// MIME type assumed when the payload carries no data-URL prefix.
const DEFAULT_MIME_TYPE: &str = "image/png";

/// Decode a client-supplied base64 image into raw bytes plus its MIME type.
pub fn decode_image(raw: &str) -> Result<ImagePayload, base64::DecodeError> {
    let (mime_type, payload) = match raw.split_once(',') {
        Some((prefix, rest)) => {
            let mime = prefix
                .strip_prefix("data:")
                .and_then(|p| p.split(';').next())
                .filter(|m| !m.is_empty())
                .unwrap_or(DEFAULT_MIME_TYPE);
            (mime.to_string(), rest)
        }
        None => (DEFAULT_MIME_TYPE.to_string(), raw),
    };

    let data = BASE64.decode(payload.trim())?;
    Ok(ImagePayload { mime_type, data })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn strips_data_url_prefix_before_decoding() {
        let image = decode_image("data:image/png;base64,AAAA").expect("valid payload");
        assert_eq!(image.mime_type, "image/png");
        assert_eq!(image.data, vec![0u8; 3]);
    }

    #[test]
    fn reads_mime_type_from_prefix() {
        let image = decode_image("data:image/jpeg;base64,AAAA").expect("valid payload");
        assert_eq!(image.mime_type, "image/jpeg");
    }

    #[test]
    fn accepts_bare_base64() {
        let image = decode_image("AAAA").expect("valid payload");
        assert_eq!(image.mime_type, "image/png");
        assert_eq!(image.data.len(), 3);
    }

    #[test]
    fn rejects_undecodable_payloads() {
        assert!(decode_image("data:image/png;base64,not-base64!").is_err());
    }
}
