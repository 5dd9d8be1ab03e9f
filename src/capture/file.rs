#[cfg(test)]
#[path = "file_test.rs"]
mod tests;

use base64::Engine as _;
use base64::engine::general_purpose::STANDARD;
use eyre::{Context, Result};

use crate::{config::resolve_path, models::Attachment};

/// Reads a user-selected image file and encodes it as an attachment.
pub async fn read_attachment(path: &str) -> Result<Attachment> {
    let resolved = resolve_path(path).wrap_err(format!("resolving {}", path))?;
    let bytes = tokio::fs::read(&resolved)
        .await
        .wrap_err(format!("reading {}", resolved))?;
    Ok(Attachment::new(
        mime_from_path(&resolved),
        STANDARD.encode(bytes),
    ))
}

fn mime_from_path(path: &str) -> &'static str {
    let extension = path
        .rsplit_once('.')
        .map(|(_, ext)| ext.to_ascii_lowercase())
        .unwrap_or_default();

    match extension.as_str() {
        "png" => "image/png",
        "gif" => "image/gif",
        "webp" => "image/webp",
        "bmp" => "image/bmp",
        _ => "image/jpeg",
    }
}
