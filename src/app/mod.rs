mod previews;
mod ui;

use std::sync::mpsc::{channel, Receiver};

use eframe::egui;

use crate::config::AppConfig;
use crate::selection::{FileEntry, FileHandle, IngestSource, SelectionManager};
use crate::utils::file_size::FileSizeUtils;
use previews::PreviewCache;

pub struct ImageUploader {
    manager: SelectionManager,
    previews: PreviewCache,
    confirmed_receiver: Receiver<Vec<FileEntry>>,
    banner: Option<String>,
}

impl ImageUploader {
    pub fn new(_cc: &eframe::CreationContext<'_>, config: AppConfig) -> Self {
        log::info!("initializing image uploader");
        let (sender, receiver) = channel();
        let manager = SelectionManager::new(
            config.selection(),
            Box::new(move |batch| {
                sender.send(batch).unwrap_or_default();
            }),
        );
        Self {
            manager,
            previews: PreviewCache::default(),
            confirmed_receiver: receiver,
            banner: None,
        }
    }

    pub fn open_picker(&mut self) {
        if let Some(paths) = rfd::FileDialog::new()
            .add_filter("Images", &["jpg", "jpeg", "png", "gif", "ico"])
            .pick_files()
        {
            let handles: Vec<FileHandle> = paths
                .iter()
                .filter_map(|path| FileHandle::from_path(path))
                .collect();
            if !handles.is_empty() {
                self.manager.ingest(handles, IngestSource::Picker);
            }
        }
    }

    fn collect_dropped_files(&mut self, ctx: &egui::Context) {
        let dropped = ctx.input(|input| input.raw.dropped_files.clone());
        if dropped.is_empty() {
            return;
        }
        let handles: Vec<FileHandle> = dropped.iter().filter_map(handle_from_dropped).collect();
        if !handles.is_empty() {
            self.manager.ingest(handles, IngestSource::Drop);
        }
    }

    fn poll_confirmations(&mut self) {
        while let Ok(batch) = self.confirmed_receiver.try_recv() {
            let total: u64 = batch.iter().map(|entry| entry.size).sum();
            for entry in &batch {
                log::info!(
                    "upload sink received {} ({})",
                    entry.name,
                    FileSizeUtils::format_size(entry.size)
                );
            }
            self.banner = Some(format!(
                "Handed {} file(s) ({}) to the upload sink",
                batch.len(),
                FileSizeUtils::format_size(total)
            ));
        }
    }

    pub fn remove_file(&mut self, name: &str) {
        if let Some(entry) = self.manager.remove(name) {
            self.previews.release(&entry.id);
        }
    }

    pub fn confirm_upload(&mut self) {
        self.manager.confirm();
    }
}

fn handle_from_dropped(file: &egui::DroppedFile) -> Option<FileHandle> {
    // web targets deliver in-memory bytes, native drops a path
    match (&file.bytes, &file.path) {
        (Some(bytes), _) if !file.name.is_empty() => {
            Some(FileHandle::from_bytes(file.name.clone(), bytes.clone()))
        }
        (_, Some(path)) => FileHandle::from_path(path),
        _ => {
            log::warn!("dropped file carries neither bytes nor a path");
            None
        }
    }
}

impl eframe::App for ImageUploader {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.poll_confirmations();
        self.collect_dropped_files(ctx);
        self.render(ctx);
    }

    fn on_exit(&mut self, _gl: Option<&eframe::glow::Context>) {
        self.previews.clear();
    }
}
