//! Splitting over-tall pages into tiles the renderer can hold.

use std::collections::HashSet;
use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::ops::Range;
use std::path::Path;

use image::codecs::jpeg::JpegEncoder;
use image::{DynamicImage, GenericImageView};

use crate::prelude::*;

const JPEG_QUALITY: u8 = 80;

/// Source row ranges of the tiles for a page `src_height` rows tall shown at
/// `scale`. Every tile but the last is `tile_height` rows tall once scaled; the
/// last one takes the remainder.
pub fn plan_tiles(src_height: u32, scale: f64, tile_height: u32) -> Vec<Range<u32>> {
    if src_height == 0 || scale <= 0.0 {
        return Vec::new();
    }
    let budget = f64::from(tile_height.max(1));
    let scaled = (f64::from(src_height) * scale).round().max(1.0);
    let count = ((scaled / budget).ceil() as u32).max(1);

    let mut tiles = Vec::with_capacity(count as usize);
    let mut start = 0;
    for k in 1..=count {
        let end = if k == count {
            src_height
        } else {
            ((f64::from(k) * budget / scale).round() as u32).min(src_height)
        };
        if end > start {
            tiles.push(start..end);
            start = end;
        }
    }
    tiles
}

pub fn tile_file_name(stem: &str, tile: usize) -> String {
    format!("{stem}_{tile:02}.jpg")
}

impl Book {
    /// Writes every page as tiles into the split cache and returns a book over
    /// them. Nothing becomes visible under the cache name unless all tiles
    /// were written.
    pub fn split(&self, width: u32, tile_height: u32) -> Result<Book, BookError> {
        let target = self.dir().join(OPTIMIZE_DIRECTORY);
        if target.exists() {
            return Err(BookError::AlreadyOptimized(target));
        }

        let staging = tempfile::Builder::new()
            .prefix(&format!("{OPTIMIZE_DIRECTORY}-"))
            .tempdir_in(self.dir())?;

        let mut names = Vec::new();
        let mut stems = HashSet::new();
        for (page, path) in self.files().iter().enumerate() {
            let img = self.load(page)?;
            let (w, h) = img.dimensions();
            let scale = f64::from(width) / f64::from(w.max(1));
            let stem = unique_stem(path, &mut stems);

            let tiles = plan_tiles(h, scale, tile_height);
            for (tile, rows) in tiles.iter().enumerate() {
                let piece = img.crop_imm(0, rows.start, w, rows.end - rows.start);
                let name = tile_file_name(&stem, tile);
                write_jpeg(&staging.path().join(&name), &piece)?;
                names.push(name);
            }
            log::debug!("Split {} into {} tiles", path.display(), tiles.len());
        }

        let staged = staging.into_path();
        if let Err(e) = fs::rename(&staged, &target) {
            let _ = fs::remove_dir_all(&staged);
            if target.exists() {
                return Err(BookError::AlreadyOptimized(target));
            }
            return Err(e.into());
        }

        log::info!(
            "Split {} pages into {} tiles under {}",
            self.page_count(),
            names.len(),
            target.display()
        );
        let files = names.into_iter().map(|n| target.join(n)).collect();
        Ok(Book::from_files(target, files, true))
    }
}

// Pages from different subdirectories may share a stem.
fn unique_stem(path: &Path, used: &mut HashSet<String>) -> String {
    let stem = path
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_else(|| "page".to_string());
    let mut candidate = stem.clone();
    let mut k = 1;
    while !used.insert(candidate.clone()) {
        candidate = format!("{stem}-{k}");
        k += 1;
    }
    candidate
}

fn write_jpeg(path: &Path, img: &DynamicImage) -> Result<(), BookError> {
    let mut writer = BufWriter::new(File::create(path)?);
    JpegEncoder::new_with_quality(&mut writer, JPEG_QUALITY).encode_image(&img.to_rgb8())?;
    writer.flush()?;
    Ok(())
}
