//! Ticket image sources.

use crate::errors::{Result, TokenizationError};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::convert::TryFrom;
use std::path::Path;

/// A file referenced by URI, the way mobile platforms hand over picked images.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct FileDescriptor {
    /// Location of the file, a path or a `file://` URI
    pub uri: String,
    /// File name sent to the backend
    pub name: String,
    /// MIME type of the file
    #[serde(rename = "type")]
    pub mime_type: String,
}

impl FileDescriptor {
    /// Returns the local path the URI points to.
    pub fn local_path(&self) -> &str {
        self.uri.strip_prefix("file://").unwrap_or(&self.uri)
    }
}

/// An image to upload with a ticket.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum TicketFile {
    /// A file described by URI, name and MIME type
    Descriptor(FileDescriptor),
    /// Raw image bytes
    Blob(Vec<u8>),
}

/// Returns true when `value` is an object exposing `uri`, `name` and `type`.
pub fn is_platform_file_descriptor(value: &Value) -> bool {
    match value {
        Value::Object(map) => ["uri", "name", "type"].iter().all(|key| map.contains_key(*key)),
        _ => false,
    }
}

fn guess_mime_type(path: &Path) -> &'static str {
    let extension = path
        .extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| ext.to_ascii_lowercase());

    match extension.as_deref() {
        Some("jpg") | Some("jpeg") => "image/jpeg",
        Some("png") => "image/png",
        Some("gif") => "image/gif",
        Some("webp") => "image/webp",
        Some("heic") => "image/heic",
        Some("pdf") => "application/pdf",
        _ => "application/octet-stream",
    }
}

impl TicketFile {
    /// Describes a local file, guessing its MIME type from the extension.
    pub fn from_path<P: AsRef<Path>>(path: P) -> Self {
        let path = path.as_ref();
        let name = path
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_else(|| "image".to_string());

        TicketFile::Descriptor(FileDescriptor {
            uri: format!("file://{}", path.display()),
            name,
            mime_type: guess_mime_type(path).to_string(),
        })
    }
}

impl TryFrom<Value> for TicketFile {
    type Error = TokenizationError;

    fn try_from(value: Value) -> Result<Self> {
        if is_platform_file_descriptor(&value) {
            let descriptor: FileDescriptor =
                serde_json::from_value(value).map_err(|_| TokenizationError::InvalidFormat)?;
            return Ok(TicketFile::Descriptor(descriptor));
        }

        match value {
            Value::Array(_) => {
                let bytes: Vec<u8> =
                    serde_json::from_value(value).map_err(|_| TokenizationError::InvalidFormat)?;
                Ok(TicketFile::Blob(bytes))
            }
            _ => Err(TokenizationError::InvalidFormat),
        }
    }
}
