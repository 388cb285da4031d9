use std::time::{SystemTime, UNIX_EPOCH};

use derivative::Derivative;

use super::types::{FileEntry, FileHandle, IngestSource, ValidationError, DEFAULT_IMAGE_TYPES};

/// Receives the deduplicated batch every time the user confirms an upload.
/// The sink owns everything past that point; the manager keeps no transport.
pub type ConfirmSink = Box<dyn FnMut(Vec<FileEntry>)>;

#[derive(Debug, Clone)]
pub struct SelectionConfig {
    pub allowed_mime_types: Vec<String>,
    pub max_file_count: usize,
    pub min_size_kb: f64,
    pub max_size_kb: f64,
}

impl Default for SelectionConfig {
    fn default() -> Self {
        Self {
            allowed_mime_types: DEFAULT_IMAGE_TYPES
                .iter()
                .map(|mime| mime.to_string())
                .collect(),
            max_file_count: 50,
            min_size_kb: 0.0,
            max_size_kb: f64::INFINITY,
        }
    }
}

/// Checks are ordered: type first, then minimum size, then maximum size.
/// Only the first failure is reported.
pub fn validate(handle: &FileHandle, config: &SelectionConfig) -> Result<(), ValidationError> {
    if !config
        .allowed_mime_types
        .iter()
        .any(|mime| mime == &handle.mime_type)
    {
        return Err(ValidationError::InvalidType);
    }
    let size_kb = handle.size as f64 / 1024.0;
    if size_kb < config.min_size_kb {
        return Err(ValidationError::TooSmall);
    }
    if size_kb > config.max_size_kb {
        return Err(ValidationError::TooLarge);
    }
    Ok(())
}

/// Holds the selected files and the views the UI renders from them.
///
/// `entries` is the single source of truth, in insertion order and allowing
/// duplicate names. `valid_deduplicated` and `ready_to_upload` are derived
/// from it by `recompute` after every mutation; they are never patched
/// independently.
#[derive(Derivative)]
#[derivative(Debug)]
pub struct SelectionManager {
    config: SelectionConfig,
    entries: Vec<FileEntry>,
    valid_deduplicated: Vec<FileEntry>,
    ready_to_upload: bool,
    next_seq: u64,
    #[derivative(Debug = "ignore")]
    on_confirm: ConfirmSink,
}

impl SelectionManager {
    pub fn new(config: SelectionConfig, on_confirm: ConfirmSink) -> Self {
        Self {
            config,
            entries: Vec::new(),
            valid_deduplicated: Vec::new(),
            ready_to_upload: false,
            next_seq: 0,
            on_confirm,
        }
    }

    /// Validate and append a batch of candidates. A rejected file is kept,
    /// flagged with its error, and never blocks the rest of the batch.
    pub fn ingest<I>(&mut self, handles: I, source: IngestSource)
    where
        I: IntoIterator<Item = FileHandle>,
    {
        let mut appended = 0usize;
        for handle in handles {
            if handle.name.is_empty() {
                log::warn!("skipping a {} file handle without a name", source);
                continue;
            }
            let error = validate(&handle, &self.config).err();
            if let Some(error) = &error {
                log::debug!("{}: rejected ({})", handle.name, error);
            }
            let entry = FileEntry {
                id: self.allocate_id(),
                name: handle.name,
                size: handle.size,
                mime_type: handle.mime_type,
                bytes: handle.bytes,
                error,
            };
            self.entries.push(entry);
            appended += 1;
        }
        // derived state is rebuilt once per batch, not per file
        if appended > 0 {
            self.recompute();
        }
        log::info!("ingested {} file(s) via {}", appended, source);
    }

    /// Drop the first entry with a matching name. Unknown names are a no-op.
    /// Returns the removed entry so callers can release resources tied to it.
    pub fn remove(&mut self, name: &str) -> Option<FileEntry> {
        let index = self.entries.iter().position(|entry| entry.name == name);
        let removed = index.map(|index| self.entries.remove(index));
        match &removed {
            Some(entry) => log::debug!("removed {} ({})", entry.name, entry.id),
            None => log::debug!("remove: no entry named {}", name),
        }
        self.recompute();
        removed
    }

    /// Hand the current deduplicated list to the sink. The selection is kept
    /// as-is afterwards; readiness is the caller's gate, not re-checked here.
    pub fn confirm(&mut self) {
        let batch = self.valid_deduplicated.clone();
        log::info!("handing {} file(s) to the upload sink", batch.len());
        (self.on_confirm)(batch);
    }

    pub fn entries(&self) -> &[FileEntry] {
        &self.entries
    }

    /// First occurrence per name over all entries, valid and invalid alike.
    pub fn valid_deduplicated(&self) -> &[FileEntry] {
        &self.valid_deduplicated
    }

    pub fn unsupported(&self) -> Vec<&FileEntry> {
        self.entries
            .iter()
            .filter(|entry| !entry.is_valid())
            .collect()
    }

    pub fn ready_to_upload(&self) -> bool {
        self.ready_to_upload
    }

    /// The reason the upload action is unavailable, in UI wording.
    pub fn blocking_message(&self) -> Option<String> {
        if self.entries.iter().any(|entry| !entry.is_valid()) {
            return Some("Please remove all unsupported files.".to_string());
        }
        let selected = self.valid_deduplicated.len();
        if selected > self.config.max_file_count {
            return Some(format!(
                "Only {} images can be uploaded at once. Remove {} images.",
                self.config.max_file_count,
                selected - self.config.max_file_count
            ));
        }
        None
    }

    fn allocate_id(&mut self) -> String {
        let seq = self.next_seq;
        self.next_seq += 1;
        let millis = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|elapsed| elapsed.as_millis())
            .unwrap_or_default();
        format!("file{}_{}", seq, millis)
    }

    fn recompute(&mut self) {
        self.valid_deduplicated.clear();
        for entry in &self.entries {
            if !self
                .valid_deduplicated
                .iter()
                .any(|seen| seen.name == entry.name)
            {
                self.valid_deduplicated.push(entry.clone());
            }
        }
        let has_unsupported = self.entries.iter().any(|entry| !entry.is_valid());
        self.ready_to_upload = !has_unsupported
            && !self.valid_deduplicated.is_empty()
            && self.valid_deduplicated.len() <= self.config.max_file_count;
    }
}
