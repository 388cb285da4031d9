mod manager;
mod types;

pub use manager::{validate, ConfirmSink, SelectionConfig, SelectionManager};
pub use types::{
    guess_mime_type, FileEntry, FileHandle, IngestSource, ValidationError, DEFAULT_IMAGE_TYPES,
};
