//! Character identity: the uploaded picture and the display name.
//!
//! Neither is validated beyond what rendering needs: the name is free text,
//! and the image only has to be a decodable `data:image/*;base64,` URI.

use crate::data_uri;
use crate::error::{Error, Result};

/// An uploaded character image, kept as the data URI the browser produced.
#[derive(Debug, Clone, PartialEq)]
pub struct CharacterImage {
    data_uri: String,
    mime: String,
    byte_len: usize,
}

impl CharacterImage {
    pub fn from_data_uri(uri: &str) -> Result<Self> {
        let decoded = data_uri::decode(uri).map_err(Error::InvalidImage)?;
        if !decoded.mime.starts_with("image/") {
            return Err(Error::InvalidImage(format!(
                "expected an image, got {}",
                if decoded.mime.is_empty() { "no media type" } else { decoded.mime.as_str() }
            )));
        }
        Ok(Self {
            data_uri: uri.trim().to_string(),
            mime: decoded.mime,
            byte_len: decoded.bytes.len(),
        })
    }

    pub fn data_uri(&self) -> &str {
        &self.data_uri
    }

    pub fn mime(&self) -> &str {
        &self.mime
    }

    pub fn byte_len(&self) -> usize {
        self.byte_len
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Character {
    pub name: String,
    pub image: Option<CharacterImage>,
}

impl Character {
    /// Replace the image. An empty value (file picker cancelled) keeps the
    /// previous image; an invalid one is rejected and also keeps it.
    pub fn set_image(&mut self, uri: &str) -> Result<bool> {
        if uri.trim().is_empty() {
            return Ok(false);
        }
        self.image = Some(CharacterImage::from_data_uri(uri)?);
        Ok(true)
    }
}
