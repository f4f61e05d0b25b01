//! GPU textures for the rendered pages on screen.

use crate::prelude::*;

/// A rendered page is identified by its index and the width it was scaled to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TextureKey {
    pub page_idx: usize,
    pub width: u32,
}

impl TextureKey {
    pub fn of(page: &RenderedPage) -> Self {
        Self {
            page_idx: page.index,
            width: page.width,
        }
    }
}

#[derive(Default)]
pub struct TextureCache {
    pages: HashMap<TextureKey, TextureHandle>,
}

impl TextureCache {
    pub fn new() -> Self {
        debug!("TextureCache created");
        Self::default()
    }

    /// Uploads `page` unless a texture for it is already cached.
    pub fn get_or_upload(&mut self, ctx: &Context, page: &RenderedPage) -> TextureHandle {
        let key = TextureKey::of(page);
        self.pages
            .entry(key)
            .or_insert_with(|| {
                debug!("TextureCache upload: page {} @ {}px", key.page_idx, key.width);
                let size = [page.image.width() as usize, page.image.height() as usize];
                let color_img = egui::ColorImage::from_rgba_unmultiplied(size, page.image.as_raw());
                ctx.load_texture(
                    format!("page{}_{}", key.page_idx, key.width),
                    color_img,
                    egui::TextureOptions::LINEAR,
                )
            })
            .clone()
    }

    /// Drops textures for pages no longer on screen.
    pub fn retain(&mut self, keep: &[TextureKey]) {
        self.pages.retain(|key, _| keep.contains(key));
    }

    pub fn clear(&mut self) {
        debug!("TextureCache cleared");
        self.pages.clear();
    }
}
