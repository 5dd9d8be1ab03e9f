#[cfg(test)]
#[path = "attachment_test.rs"]
mod tests;

use eyre::{Result, eyre};
use once_cell::sync::Lazy;
use regex::Regex;

static DATA_URI_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^data:(?P<mime>[^;,]+)?(;base64)?,(?P<data>.*)$").unwrap());

const FALLBACK_MIME_TYPE: &str = "image/jpeg";

/// A single image carried by one submission, as MIME type + base64 payload.
/// Dropped once the completion request has been issued.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Attachment {
    mime_type: String,
    data: String,
}

impl Attachment {
    pub fn new(mime_type: impl Into<String>, data: impl Into<String>) -> Self {
        Self {
            mime_type: mime_type.into(),
            data: data.into(),
        }
    }

    /// Parses a `data:<mime>;base64,<payload>` URI. A missing MIME type
    /// falls back to `image/jpeg`.
    pub fn from_data_uri(uri: &str) -> Result<Self> {
        let caps = DATA_URI_RE
            .captures(uri.trim())
            .ok_or_else(|| eyre!("not a data URI"))?;

        let mime_type = caps
            .name("mime")
            .map(|m| m.as_str())
            .unwrap_or(FALLBACK_MIME_TYPE);

        Ok(Self::new(mime_type, &caps["data"]))
    }

    pub fn to_data_uri(&self) -> String {
        format!("data:{};base64,{}", self.mime_type, self.data)
    }

    pub fn mime_type(&self) -> &str {
        &self.mime_type
    }

    pub fn data(&self) -> &str {
        &self.data
    }
}
