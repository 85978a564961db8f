//! Inline pictures stored alongside APIs and applications.

use bytes::Bytes;

/// Decoded picture payload as returned by a service's `get_picture`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InlinePicture {
    pub content: Bytes,
    pub mime_type: String,
}

impl InlinePicture {
    pub fn new(content: impl Into<Bytes>, mime_type: impl Into<String>) -> Self {
        Self { content: content.into(), mime_type: mime_type.into() }
    }
}
