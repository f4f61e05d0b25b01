//! Composite strip of the pages around the current one, used as a mini-map.

use std::collections::HashMap;

use image::imageops::overlay;
use image::{GenericImageView, Rgba, RgbaImage};

use crate::prelude::*;
use crate::render::{fit_scale, scale_image};

/// What to build the strip around.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct OverviewRequest {
    pub center_index: usize,
    /// Width of the main view, to recover its scale.
    pub viewport_width: u32,
    /// Offset at main-view scale, inside the center page, that lands on the
    /// panel's vertical midpoint.
    pub center_offset: i32,
    pub panel_width: u32,
    pub panel_height: u32,
    pub max_texture_height: u32,
}

/// Height of one page in the strip and in the main view.
#[derive(Debug, Clone, Copy)]
struct Extent {
    height: i32,
    main_height: i32,
}

impl Extent {
    fn to_thumb(&self, main_offset: i32) -> i32 {
        rescale(main_offset, self.height, self.main_height)
    }

    fn to_main(&self, thumb_offset: i32) -> i32 {
        rescale(thumb_offset, self.main_height, self.height)
    }
}

fn rescale(value: i32, to: i32, from: i32) -> i32 {
    if from == 0 {
        return 0;
    }
    (f64::from(value) * f64::from(to) / f64::from(from)).round() as i32
}

#[derive(Default)]
pub struct ScrollOverview {
    image: Option<RgbaImage>,
    extents: HashMap<usize, Extent>,
    center: usize,
    start: i32,
    built: bool,
}

impl ScrollOverview {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_built(&self) -> bool {
        self.built
    }

    pub fn image(&self) -> Option<&RgbaImage> {
        self.image.as_ref()
    }

    /// Builds the strip once per activation; later calls return the first
    /// result until [`reset`](Self::reset).
    pub fn build(
        &mut self,
        source: &dyn PageSource,
        req: &OverviewRequest,
    ) -> Result<Option<&RgbaImage>, BookError> {
        if self.built {
            return Ok(self.image.as_ref());
        }
        self.extents.clear();
        self.center = req.center_index;

        let (w, h) = (req.panel_width.max(1), req.panel_height.max(1));
        let mut canvas = RgbaImage::from_pixel(w, h, Rgba([0, 0, 0, 255]));

        // Stays unbuilt when the center page fails, so a later call retries.
        let (center, extent) = self.thumbnail(source, req.center_index, req)?;
        self.built = true;
        self.start = h as i32 / 2 - extent.to_thumb(req.center_offset);
        overlay(&mut canvas, &center, 0, i64::from(self.start));

        let mut y = self.start;
        for i in (0..req.center_index).rev() {
            if y <= 0 {
                break;
            }
            match self.thumbnail(source, i, req) {
                Ok((page, _)) => {
                    y -= page.height() as i32;
                    overlay(&mut canvas, &page, 0, i64::from(y));
                }
                Err(e) => {
                    log::warn!("Overview stopped at page {i}: {e}");
                    break;
                }
            }
        }

        let mut y = self.start + center.height() as i32;
        for i in req.center_index + 1..source.page_count() {
            if y >= h as i32 {
                break;
            }
            match self.thumbnail(source, i, req) {
                Ok((page, _)) => {
                    overlay(&mut canvas, &page, 0, i64::from(y));
                    y += page.height() as i32;
                }
                Err(e) => {
                    log::warn!("Overview stopped at page {i}: {e}");
                    break;
                }
            }
        }

        log::debug!(
            "Overview around page {} covers {} pages",
            req.center_index,
            self.extents.len()
        );
        self.image = Some(canvas);
        Ok(self.image.as_ref())
    }

    // Scales a page to the panel width and records its height at both scales.
    fn thumbnail(
        &mut self,
        source: &dyn PageSource,
        index: usize,
        req: &OverviewRequest,
    ) -> Result<(RgbaImage, Extent), BookError> {
        let src = source.load(index)?;
        let (sw, sh) = src.dimensions();
        let main_scale = fit_scale(sw, sh, req.viewport_width, req.max_texture_height);
        let thumb = scale_image(&src, f64::from(req.panel_width.max(1)) / f64::from(sw.max(1)));
        let extent = Extent {
            height: thumb.height() as i32,
            main_height: (f64::from(sh) * main_scale).round() as i32,
        };
        self.extents.insert(index, extent);
        Ok((thumb, extent))
    }

    /// Resolves a panel coordinate to a page and an offset inside it at
    /// main-view scale. Points past the recorded pages clamp to their edges.
    pub fn hit_test(&self, panel_y: i32) -> Option<(usize, i32)> {
        let mut index = self.center;
        let mut extent = *self.extents.get(&index)?;
        let mut top = self.start;

        if panel_y < top {
            while panel_y < top {
                let Some(prev) = index
                    .checked_sub(1)
                    .and_then(|i| self.extents.get(&i).map(|e| (i, *e)))
                else {
                    return Some((index, 0));
                };
                (index, extent) = prev;
                top -= extent.height;
            }
        } else {
            while panel_y >= top + extent.height {
                let Some(next) = self.extents.get(&(index + 1)) else {
                    return Some((index, extent.main_height));
                };
                top += extent.height;
                index += 1;
                extent = *next;
            }
        }

        Some((index, extent.to_main(panel_y - top)))
    }

    /// Drops the strip and lookup table; the next [`build`](Self::build) runs again.
    pub fn reset(&mut self) {
        self.image = None;
        self.extents.clear();
        self.built = false;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::MemorySource;

    fn request(center_index: usize, center_offset: i32) -> OverviewRequest {
        OverviewRequest {
            center_index,
            viewport_width: 50,
            center_offset,
            panel_width: 25,
            panel_height: 100,
            max_texture_height: 32766,
        }
    }

    #[test]
    fn strip_has_panel_size() {
        let source = MemorySource::new(50, &[100, 100, 100]);
        let mut overview = ScrollOverview::new();
        let img = overview.build(&source, &request(1, 50)).unwrap().unwrap();
        assert_eq!(img.dimensions(), (25, 100));
    }

    #[test]
    fn hit_test_inverts_build() {
        let source = MemorySource::new(50, &[100, 100, 100]);
        let mut overview = ScrollOverview::new();
        overview.build(&source, &request(1, 50)).unwrap();

        assert_eq!(overview.hit_test(50), Some((1, 50)));
        assert_eq!(overview.hit_test(0), Some((0, 50)));
        assert_eq!(overview.hit_test(99), Some((2, 48)));
    }

    #[test]
    fn hit_test_clamps_past_recorded_pages() {
        let source = MemorySource::new(50, &[100, 100]);
        let mut overview = ScrollOverview::new();
        overview.build(&source, &request(0, 0)).unwrap();
        // Page 0 occupies 50..100; nothing is above it.
        assert_eq!(overview.hit_test(10), Some((0, 0)));
    }

    #[test]
    fn build_runs_once_until_reset() {
        let source = MemorySource::new(50, &[100, 100, 100]);
        let mut overview = ScrollOverview::new();
        overview.build(&source, &request(1, 50)).unwrap();
        overview.build(&source, &request(2, 0)).unwrap();
        assert_eq!(source.requests_for(1), 1);
        assert_eq!(source.requests_for(2), 1);

        overview.reset();
        assert!(overview.image().is_none());
        assert_eq!(overview.hit_test(50), None);
        overview.build(&source, &request(1, 50)).unwrap();
        assert_eq!(source.requests_for(1), 2);
    }

    #[test]
    fn failed_center_page_can_be_rebuilt() {
        let source = MemorySource::new(50, &[100, 100, 100]);
        source.fail_once(1);
        let mut overview = ScrollOverview::new();
        assert!(overview.build(&source, &request(1, 50)).is_err());
        assert!(!overview.is_built());
        assert!(overview.image().is_none());

        assert!(overview.build(&source, &request(1, 50)).unwrap().is_some());
        assert!(overview.is_built());
        assert_eq!(overview.hit_test(50), Some((1, 50)));
    }

    #[test]
    fn never_reads_past_the_ends() {
        let source = MemorySource::new(50, &[10, 10, 10]);
        let mut overview = ScrollOverview::new();
        overview.build(&source, &request(2, 0)).unwrap();
        assert_eq!(source.requests_for(3), 0);
        overview.reset();
        overview.build(&source, &request(0, 0)).unwrap();
        assert_eq!(source.requests_for(0), 2);
    }
}
