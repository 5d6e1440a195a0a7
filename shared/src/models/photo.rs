//! Clothing photos uploaded with an advice request

/// Accepted image content types
pub const ACCEPTED_PHOTO_TYPES: [&str; 3] = ["image/png", "image/jpg", "image/jpeg"];

/// Maximum number of photos per request
pub const MAX_PHOTOS: usize = 10;

/// Each photo must be strictly smaller than this
pub const MAX_PHOTO_BYTES: usize = 5_000_000;

/// An uploaded photo, held in memory until it is forwarded to the classifier
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Photo {
    pub file_name: String,
    pub content_type: String,
    pub bytes: Vec<u8>,
}

impl Photo {
    pub fn new(file_name: impl Into<String>, content_type: impl Into<String>, bytes: Vec<u8>) -> Self {
        Self {
            file_name: file_name.into(),
            content_type: content_type.into(),
            bytes,
        }
    }

    pub fn size(&self) -> usize {
        self.bytes.len()
    }
}
