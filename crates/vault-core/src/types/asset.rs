//! Asset payloads.

use bytes::Bytes;

/// Content type stored for plain-text assets.
pub const TEXT_CONTENT_TYPE: &str = "application/text";

/// Content type stored for everything else.
pub const JSON_CONTENT_TYPE: &str = "application/json";

/// A stored asset body together with its declared content type.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AssetContent {
    pub content_type: String,
    pub data: Bytes,
}

impl AssetContent {
    /// Whether the asset was stored as plain text.
    pub fn is_text(&self) -> bool {
        self.content_type
            .split(';')
            .next()
            .is_some_and(|mime| mime.trim().eq_ignore_ascii_case(TEXT_CONTENT_TYPE))
    }
}

/// Asset names are non-empty and ASCII alphanumeric.
pub fn is_valid_asset_name(name: &str) -> bool {
    !name.is_empty() && name.chars().all(|c| c.is_ascii_alphanumeric())
}
