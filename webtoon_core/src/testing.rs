//! In-memory page source for engine tests.

use std::collections::HashSet;
use std::sync::{Mutex, MutexGuard};

use image::{DynamicImage, Rgba, RgbaImage};

use crate::prelude::*;

pub struct MemorySource {
    width: u32,
    heights: Vec<u32>,
    requests: Mutex<Vec<usize>>,
    failing: Mutex<HashSet<usize>>,
    gate: Mutex<()>,
}

impl MemorySource {
    pub fn new(width: u32, heights: &[u32]) -> Self {
        Self {
            width,
            heights: heights.to_vec(),
            requests: Mutex::new(Vec::new()),
            failing: Mutex::new(HashSet::new()),
            gate: Mutex::new(()),
        }
    }

    /// Blocks every load until the guard is dropped.
    pub fn hold(&self) -> MutexGuard<'_, ()> {
        self.gate.lock().unwrap()
    }

    pub fn fail_once(&self, index: usize) {
        self.failing.lock().unwrap().insert(index);
    }

    pub fn requests_for(&self, index: usize) -> usize {
        self.requests.lock().unwrap().iter().filter(|&&i| i == index).count()
    }
}

impl PageSource for MemorySource {
    fn page_count(&self) -> usize {
        self.heights.len()
    }

    fn load(&self, index: usize) -> Result<DynamicImage, BookError> {
        self.requests.lock().unwrap().push(index);
        let _gate = self.gate.lock().unwrap();
        let Some(&height) = self.heights.get(index) else {
            return Err(BookError::IndexOutOfRange {
                index,
                count: self.heights.len(),
            });
        };
        if self.failing.lock().unwrap().remove(&index) {
            return Err(BookError::Unreadable {
                path: format!("memory/{index}").into(),
                reason: "corrupt".to_string(),
            });
        }
        let shade = (index * 40 % 256) as u8;
        Ok(DynamicImage::ImageRgba8(RgbaImage::from_pixel(
            self.width,
            height,
            Rgba([shade, shade, shade, 255]),
        )))
    }
}
