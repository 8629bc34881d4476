//! `data:<mime>;base64,<payload>` parsing shared by image upload and PNG export.

use base64::Engine as _;
use base64::engine::general_purpose::STANDARD;

/// A decoded base64 data URI.
#[derive(Debug, Clone, PartialEq)]
pub struct DataUri {
    pub mime: String,
    pub bytes: Vec<u8>,
}

/// Split and decode a base64 data URI. Only the `;base64` form is accepted;
/// media-type parameters (`;charset=...`) before it are tolerated.
pub fn decode(uri: &str) -> Result<DataUri, String> {
    let rest = uri
        .trim()
        .strip_prefix("data:")
        .ok_or_else(|| "not a data URI".to_string())?;
    let (header, payload) = rest
        .split_once(',')
        .ok_or_else(|| "data URI has no payload".to_string())?;
    let mut parts = header.split(';');
    let mime = parts.next().unwrap_or("").trim().to_ascii_lowercase();
    if !parts.any(|p| p.trim().eq_ignore_ascii_case("base64")) {
        return Err("data URI is not base64-encoded".to_string());
    }
    let bytes = STANDARD
        .decode(payload.trim())
        .map_err(|e| format!("invalid base64 payload: {}", e))?;
    if bytes.is_empty() {
        return Err("data URI payload is empty".to_string());
    }
    Ok(DataUri { mime, bytes })
}

/// Encode bytes as a base64 data URI.
pub fn encode(mime: &str, bytes: &[u8]) -> String {
    format!("data:{};base64,{}", mime, STANDARD.encode(bytes))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decodes_image_uri() {
        let uri = encode("image/png", &[1, 2, 3]);
        let parsed = decode(&uri).unwrap();
        assert_eq!(parsed.mime, "image/png");
        assert_eq!(parsed.bytes, vec![1, 2, 3]);
    }

    #[test]
    fn tolerates_parameters_and_case() {
        let parsed = decode("data:Image/JPEG;name=x.jpg;base64,AAEC").unwrap();
        assert_eq!(parsed.mime, "image/jpeg");
        assert_eq!(parsed.bytes, vec![0, 1, 2]);
    }

    #[test]
    fn rejects_non_data_uri() {
        assert!(decode("https://example.com/a.png").is_err());
        assert!(decode("data:image/png;base64").is_err());
    }

    #[test]
    fn rejects_plain_text_payload() {
        assert!(decode("data:text/plain,hello").is_err());
    }

    #[test]
    fn rejects_bad_base64() {
        assert!(decode("data:image/png;base64,@@@").is_err());
        assert!(decode("data:image/png;base64,").is_err());
    }
}
