//! Validation of uploaded pictures.
//!
//! Pictures travel as `data:<mime>;base64,<payload>` URIs. Scaling is left to
//! the processor implementation; the default one only validates that the
//! payload decodes as an image.

use base64::{engine::general_purpose::STANDARD, Engine as _};
use thiserror::Error;

use crate::domain::InlinePicture;

/// Default upper bound for a decoded picture.
pub const DEFAULT_MAX_PICTURE_SIZE: usize = 500 * 1024;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum PictureError {
    #[error("picture must be a base64 data URI")]
    NotADataUri,
    #[error("unsupported picture media type '{0}'")]
    UnsupportedMediaType(String),
    #[error("picture payload is not valid base64")]
    InvalidEncoding,
    #[error("picture is empty")]
    Empty,
    #[error("picture exceeds {max} bytes ({actual} bytes)")]
    TooLarge { max: usize, actual: usize },
    #[error("picture is not a readable image: {0}")]
    NotAnImage(String),
}

pub trait PictureProcessor: Send + Sync {
    /// Validate (and possibly rescale) a data URI, returning the URI to store.
    fn check_and_scale(&self, picture: &str) -> Result<String, PictureError>;
}

/// Split a data URI into its decoded bytes and media type.
///
/// ```rust
/// use portal_rest::services::picture::decode_data_uri;
///
/// let picture = decode_data_uri("data:image/png;base64,AQID").unwrap();
/// assert_eq!(picture.mime_type, "image/png");
/// assert_eq!(picture.content.as_ref(), &[1u8, 2, 3]);
/// ```
pub fn decode_data_uri(uri: &str) -> Result<InlinePicture, PictureError> {
    let rest = uri.trim().strip_prefix("data:").ok_or(PictureError::NotADataUri)?;
    let (header, payload) = rest.split_once(',').ok_or(PictureError::NotADataUri)?;
    let mime_type = header.strip_suffix(";base64").ok_or(PictureError::NotADataUri)?;

    let content = STANDARD.decode(payload.trim()).map_err(|_| PictureError::InvalidEncoding)?;
    Ok(InlinePicture::new(content, mime_type))
}

/// [`PictureProcessor`] that accepts any decodable `image/*` data URI up to a size limit.
#[derive(Debug, Clone)]
pub struct DataUriPictureProcessor {
    max_size: usize,
}

impl DataUriPictureProcessor {
    pub fn new(max_size: usize) -> Self {
        Self { max_size }
    }
}

impl Default for DataUriPictureProcessor {
    fn default() -> Self {
        Self::new(DEFAULT_MAX_PICTURE_SIZE)
    }
}

impl PictureProcessor for DataUriPictureProcessor {
    fn check_and_scale(&self, picture: &str) -> Result<String, PictureError> {
        let decoded = decode_data_uri(picture)?;

        if !decoded.mime_type.starts_with("image/") {
            return Err(PictureError::UnsupportedMediaType(decoded.mime_type));
        }
        if decoded.content.is_empty() {
            return Err(PictureError::Empty);
        }
        if decoded.content.len() > self.max_size {
            return Err(PictureError::TooLarge { max: self.max_size, actual: decoded.content.len() });
        }

        image::load_from_memory(&decoded.content)
            .map_err(|err| PictureError::NotAnImage(err.to_string()))?;

        Ok(picture.trim().to_string())
    }
}
