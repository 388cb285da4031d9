use std::fmt;
use std::fs;
use std::path::Path;
use std::sync::Arc;

use thiserror::Error;

/// MIME types accepted when no configuration overrides them.
pub const DEFAULT_IMAGE_TYPES: [&str; 5] = [
    "image/jpeg",
    "image/jpg",
    "image/png",
    "image/gif",
    "image/x-icon",
];

/// Which entry point delivered a batch of candidate files.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IngestSource {
    Picker,
    Drop,
}

impl fmt::Display for IngestSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            IngestSource::Picker => write!(f, "picker"),
            IngestSource::Drop => write!(f, "drop"),
        }
    }
}

#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValidationError {
    #[error("Invalid file type.")]
    InvalidType,
    #[error("File too small.")]
    TooSmall,
    #[error("File too large.")]
    TooLarge,
}

/// A raw candidate file as delivered by the picker or a window drop.
#[derive(Debug, Clone)]
pub struct FileHandle {
    pub name: String,
    pub size: u64,
    pub mime_type: String,
    pub bytes: Arc<[u8]>,
}

impl FileHandle {
    pub fn from_bytes(name: impl Into<String>, bytes: Arc<[u8]>) -> Self {
        let name = name.into();
        Self {
            size: bytes.len() as u64,
            mime_type: guess_mime_type(&name),
            name,
            bytes,
        }
    }

    /// Read a candidate from disk. Unreadable or nameless paths are skipped
    /// with a warning rather than aborting the batch they arrived in.
    pub fn from_path(path: &Path) -> Option<Self> {
        let name = match path.file_name().and_then(|n| n.to_str()) {
            Some(name) => name.to_string(),
            None => {
                log::warn!("skipping {}: no usable file name", path.display());
                return None;
            }
        };
        let bytes = match fs::read(path) {
            Ok(bytes) => bytes,
            Err(e) => {
                log::warn!("skipping {}: {}", path.display(), e);
                return None;
            }
        };
        Some(Self::from_bytes(name, Arc::from(bytes)))
    }
}

/// One selected file plus its validation outcome. The outcome is decided once
/// at ingestion and never changes; correction means removing and re-adding.
#[derive(Debug, Clone)]
pub struct FileEntry {
    pub id: String,
    pub name: String,
    pub size: u64,
    pub mime_type: String,
    pub bytes: Arc<[u8]>,
    pub error: Option<ValidationError>,
}

impl FileEntry {
    pub fn is_valid(&self) -> bool {
        self.error.is_none()
    }

    /// Only entries in the `image` MIME category get a preview.
    pub fn is_image(&self) -> bool {
        self.mime_type.split('/').next() == Some("image")
    }
}

/// Files on disk carry no MIME type, so derive one from the extension.
pub fn guess_mime_type(name: &str) -> String {
    let ext = Path::new(name)
        .extension()
        .and_then(|e| e.to_str())
        .map(|e| e.to_lowercase());

    let mime = match ext.as_deref() {
        Some("jpg") | Some("jpeg") => "image/jpeg",
        Some("png") => "image/png",
        Some("gif") => "image/gif",
        Some("ico") => "image/x-icon",
        Some("bmp") => "image/bmp",
        Some("webp") => "image/webp",
        Some("svg") => "image/svg+xml",
        Some("tif") | Some("tiff") => "image/tiff",
        Some("txt") | Some("md") | Some("log") => "text/plain",
        Some("html") | Some("htm") => "text/html",
        Some("css") => "text/css",
        Some("js") => "text/javascript",
        Some("json") => "application/json",
        Some("pdf") => "application/pdf",
        Some("zip") => "application/zip",
        _ => "application/octet-stream",
    };
    mime.to_string()
}
