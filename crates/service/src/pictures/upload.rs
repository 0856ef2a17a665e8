//! Object key and content-type helpers for uploaded pictures.

use base64::{engine::general_purpose::STANDARD, Engine as _};
use uuid::Uuid;

use crate::errors::ServiceError;

pub const DEFAULT_EXT: &str = ".jpg";
pub const DEFAULT_CONTENT_TYPE: &str = "image/jpeg";

/// Longest extension kept from a client filename, dot included.
const MAX_EXT_LEN: usize = 16;

/// Suffix of `file_name` from its last `.`, or `.jpg` when that suffix is
/// not plain ASCII alphanumerics (query strings, separators, spaces).
pub fn extension_of(file_name: Option<&str>) -> String {
    file_name
        .and_then(|n| n.rfind('.').map(|i| &n[i..]))
        .filter(|ext| ext.len() > 1 && ext.len() <= MAX_EXT_LEN && ext[1..].bytes().all(|b| b.is_ascii_alphanumeric()))
        .map(str::to_string)
        .unwrap_or_else(|| DEFAULT_EXT.to_string())
}

/// `event-<event_id>/<uuid><ext>`
pub fn object_key(event_id: Uuid, ext: &str) -> String {
    format!("event-{}/{}{}", event_id, Uuid::new_v4(), ext)
}

pub fn content_type_for_ext(ext: &str) -> &'static str {
    match ext.to_ascii_lowercase().as_str() {
        ".png" => "image/png",
        ".gif" => "image/gif",
        ".webp" => "image/webp",
        ".bmp" => "image/bmp",
        ".heic" => "image/heic",
        ".svg" => "image/svg+xml",
        _ => DEFAULT_CONTENT_TYPE,
    }
}

pub fn ext_for_content_type(content_type: &str) -> &'static str {
    match content_type.to_ascii_lowercase().as_str() {
        "image/png" => ".png",
        "image/gif" => ".gif",
        "image/webp" => ".webp",
        "image/bmp" => ".bmp",
        "image/heic" => ".heic",
        "image/svg+xml" => ".svg",
        _ => DEFAULT_EXT,
    }
}

/// A decoded base64 upload.
#[derive(Debug, Clone, PartialEq)]
pub struct DecodedImage {
    pub bytes: Vec<u8>,
    pub content_type: String,
    pub ext: String,
}

/// Strips an optional `data:<mime>;base64,` prefix (everything up to the first
/// `,`) and decodes the rest as standard base64.
pub fn decode_base64_image(data: &str) -> Result<DecodedImage, ServiceError> {
    let (mime, payload) = match data.find(',') {
        Some(i) => {
            let header = &data[..i];
            let mime = header
                .strip_prefix("data:")
                .map(|h| h.split(';').next().unwrap_or_default().trim())
                .filter(|m| !m.is_empty());
            (mime, &data[i + 1..])
        }
        None => (None, data),
    };
    let cleaned: String = payload.chars().filter(|c| !c.is_whitespace()).collect();
    let bytes = STANDARD
        .decode(cleaned.as_bytes())
        .map_err(|e| ServiceError::Validation(format!("Invalid base64 image: {e}")))?;
    let content_type = mime.unwrap_or(DEFAULT_CONTENT_TYPE).to_string();
    let ext = ext_for_content_type(&content_type).to_string();
    Ok(DecodedImage { bytes, content_type, ext })
}
