//! Page store: a directory of page images in reading order.

use std::path::{Path, PathBuf};

use image::{DynamicImage, GenericImageView};
use walkdir::WalkDir;

use crate::prelude::*;
use crate::{is_supported_format, render};

/// Anything the scroll engine and overview can read pages from.
pub trait PageSource: Send + Sync {
    fn page_count(&self) -> usize;
    fn load(&self, index: usize) -> Result<DynamicImage, BookError>;
}

/// Ordered page files of one reading session. Never mutated after construction.
#[derive(Debug, Clone)]
pub struct Book {
    dir: PathBuf,
    files: Vec<PathBuf>,
    split: bool,
}

impl Book {
    /// Opens `dir`, or its split cache when one exists.
    pub fn open(dir: &Path, sort: SortType) -> Result<Self, BookError> {
        if !dir.is_dir() {
            return Err(BookError::NotFound(dir.to_path_buf()));
        }

        let cache = dir.join(OPTIMIZE_DIRECTORY);
        if cache.is_dir() {
            log::info!("Reusing split pages in {}", cache.display());
            let mut files = list_files(&cache)?;
            sort.sort_tiles(&mut files);
            return Ok(Self::from_files(cache, files, true));
        }

        let mut files = list_files(dir)?;
        sort.sort(&mut files);
        log::info!("Opened {} with {} pages ({:?})", dir.display(), files.len(), sort);
        Ok(Self::from_files(dir.to_path_buf(), files, false))
    }

    pub(crate) fn from_files(dir: PathBuf, files: Vec<PathBuf>, split: bool) -> Self {
        Self { dir, files, split }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    pub fn files(&self) -> &[PathBuf] {
        &self.files
    }

    /// True when this book is the output of a split.
    pub fn is_split(&self) -> bool {
        self.split
    }

    pub fn page_count(&self) -> usize {
        self.files.len()
    }

    /// Decodes a page from disk. Nothing is cached here.
    pub fn load(&self, index: usize) -> Result<DynamicImage, BookError> {
        let path = self.files.get(index).ok_or(BookError::IndexOutOfRange {
            index,
            count: self.files.len(),
        })?;
        if !path.exists() {
            return Err(BookError::NotFound(path.clone()));
        }
        image::open(path).map_err(|e| BookError::Unreadable {
            path: path.clone(),
            reason: e.to_string(),
        })
    }

    /// Whether the first page at `width` renders taller than a quarter of the
    /// texture limit. Books that were already split never qualify.
    pub fn needs_splitting(&self, width: u32, max_texture_height: u32) -> bool {
        if self.split || self.files.is_empty() || width == 0 {
            return false;
        }
        let first = match self.load(0) {
            Ok(img) => img,
            Err(e) => {
                log::warn!("Cannot inspect first page: {e}");
                return false;
            }
        };
        let (w, h) = first.dimensions();
        let scaled = render::scaled_height(w, h, width);
        scaled > f64::from(max_texture_height / 4)
    }
}

impl PageSource for Book {
    fn page_count(&self) -> usize {
        Book::page_count(self)
    }

    fn load(&self, index: usize) -> Result<DynamicImage, BookError> {
        Book::load(self, index)
    }
}

/// Every supported image below `dir`, in file-name order per directory.
fn list_files(dir: &Path) -> Result<Vec<PathBuf>, BookError> {
    let mut files = Vec::new();
    let walker = WalkDir::new(dir)
        .sort_by_file_name()
        .into_iter()
        .filter_entry(|e| e.depth() == 0 || !is_staging(e.file_name().to_string_lossy().as_ref()));
    for entry in walker {
        let entry = entry.map_err(|e| match e.io_error() {
            Some(io) if io.kind() == std::io::ErrorKind::NotFound => {
                BookError::NotFound(dir.to_path_buf())
            }
            _ => BookError::Unreadable {
                path: e.path().unwrap_or(dir).to_path_buf(),
                reason: e.to_string(),
            },
        })?;
        if !entry.file_type().is_file() {
            continue;
        }
        let name = entry.file_name().to_string_lossy().to_lowercase();
        if is_supported_format!(name) {
            files.push(entry.into_path());
        }
    }
    Ok(files)
}

// Leftover staging directories from an interrupted split.
fn is_staging(name: &str) -> bool {
    name.starts_with(OPTIMIZE_DIRECTORY) && name != OPTIMIZE_DIRECTORY
}
