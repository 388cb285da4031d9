use std::collections::HashMap;

use egui::{ColorImage, Context, TextureHandle, TextureOptions};

use crate::selection::FileEntry;

/// Per-entry preview textures, keyed by entry id. Failed decodes are cached
/// as absent so they are not retried every frame.
#[derive(Default)]
pub struct PreviewCache {
    textures: HashMap<String, Option<TextureHandle>>,
}

impl PreviewCache {
    pub fn texture_for(&mut self, ctx: &Context, entry: &FileEntry) -> Option<TextureHandle> {
        if !entry.is_image() {
            return None;
        }
        self.textures
            .entry(entry.id.clone())
            .or_insert_with(|| decode_texture(ctx, entry))
            .clone()
    }

    /// Call when the owning entry leaves the selection.
    pub fn release(&mut self, id: &str) {
        self.textures.remove(id);
    }

    pub fn clear(&mut self) {
        self.textures.clear();
    }
}

fn decode_texture(ctx: &Context, entry: &FileEntry) -> Option<TextureHandle> {
    let decoded = match image::load_from_memory(&entry.bytes) {
        Ok(decoded) => decoded,
        Err(e) => {
            log::warn!("{}: preview decode failed: {}", entry.name, e);
            return None;
        }
    };
    let rgba = decoded.to_rgba8();
    let size = [rgba.width() as usize, rgba.height() as usize];
    let pixels = ColorImage::from_rgba_unmultiplied(size, rgba.as_raw());
    Some(ctx.load_texture(entry.id.clone(), pixels, TextureOptions::LINEAR))
}
