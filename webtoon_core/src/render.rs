//! Scaling pages to the viewport width under the texture height cap.

use image::imageops::{self, FilterType};
use image::{DynamicImage, GenericImageView, RgbaImage};

/// A decoded page scaled for display.
#[derive(Clone)]
pub struct RenderedPage {
    pub index: usize,
    /// Viewport width this page was rendered for.
    pub width: u32,
    pub scale: f64,
    pub image: RgbaImage,
}

impl RenderedPage {
    pub fn height(&self) -> i32 {
        self.image.height() as i32
    }

    /// Re-scales the bitmap for a new viewport width.
    pub fn rescaled(&self, width: u32, max_height: u32) -> RenderedPage {
        let (w, h) = self.image.dimensions();
        let scale = fit_scale(w, h, width, max_height);
        RenderedPage {
            index: self.index,
            width,
            scale: self.scale * scale,
            image: scale_image(&self.image, scale),
        }
    }
}

impl std::fmt::Debug for RenderedPage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RenderedPage")
            .field("index", &self.index)
            .field("width", &self.width)
            .field("scale", &self.scale)
            .field("size", &self.image.dimensions())
            .finish()
    }
}

pub(crate) fn scaled_height(src_width: u32, src_height: u32, width: u32) -> f64 {
    if src_width == 0 {
        return 0.0;
    }
    f64::from(src_height) * f64::from(width) / f64::from(src_width)
}

/// Scale that fits `width`, reduced so the result never exceeds `max_height`.
pub fn fit_scale(src_width: u32, src_height: u32, width: u32, max_height: u32) -> f64 {
    if src_width == 0 || src_height == 0 {
        return 1.0;
    }
    let scale = f64::from(width) / f64::from(src_width);
    if f64::from(src_height) * scale > f64::from(max_height) {
        let capped = f64::from(max_height) / f64::from(src_height);
        log::info!(
            "Due to height restrictions, the magnification will be changed {:.2} -> {:.2}",
            scale,
            capped
        );
        return capped;
    }
    scale
}

/// CatmullRom resampling by `scale`.
pub fn scale_image<I>(src: &I, scale: f64) -> RgbaImage
where
    I: GenericImageView<Pixel = image::Rgba<u8>> + 'static,
{
    let (w, h) = src.dimensions();
    let nw = ((f64::from(w) * scale).round() as u32).max(1);
    let nh = ((f64::from(h) * scale).round() as u32).max(1);
    if nw == w && nh == h {
        return imageops::crop_imm(src, 0, 0, w, h).to_image();
    }
    imageops::resize(src, nw, nh, FilterType::CatmullRom)
}

pub fn render_page(src: &DynamicImage, index: usize, width: u32, max_height: u32) -> RenderedPage {
    let (w, h) = src.dimensions();
    let scale = fit_scale(w, h, width, max_height);
    let image = if (scale - 1.0).abs() < f64::EPSILON {
        src.to_rgba8()
    } else {
        scale_image(src, scale)
    };
    RenderedPage {
        index,
        width,
        scale,
        image,
    }
}
