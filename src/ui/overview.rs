//! Right-edge mini-map of the pages around the current one.

use crate::prelude::*;

const FULL_UV: Rect = Rect::from_min_max(pos2(0.0, 0.0), pos2(1.0, 1.0));
const MARKER_COLOR: Color32 = Color32::from_rgba_premultiplied(200, 40, 40, 200);

/// The overview strip plus its texture, rebuilt each time the panel opens.
#[derive(Default)]
pub struct OverviewPanel {
    overview: ScrollOverview,
    texture: Option<TextureHandle>,
    failed: bool,
}

impl OverviewPanel {
    pub fn new() -> Self {
        Self::default()
    }

    /// Built, or given up on, for the current opening.
    pub fn is_built(&self) -> bool {
        self.overview.is_built() || self.failed
    }

    pub fn reset(&mut self) {
        self.overview.reset();
        self.texture = None;
        self.failed = false;
    }

    /// Builds the strip around the viewer's position, once per opening.
    pub fn build(&mut self, viewer: &Viewer, logger: &mut UiLogger) {
        if self.is_built() || !viewer.enabled() {
            return;
        }
        let Some(source) = viewer.source() else {
            return;
        };
        let (width, height) = viewer.viewport();
        let request = OverviewRequest {
            center_index: viewer.index(),
            viewport_width: width,
            center_offset: viewer.pos() + height as i32 / 2,
            panel_width: OVERVIEW_WIDTH as u32,
            panel_height: height,
            max_texture_height: viewer.config().max_texture_height,
        };
        if let Err(e) = self.overview.build(&**source, &request) {
            logger.warn(format!("Overview unavailable: {e}"), None);
            self.failed = true;
        }
    }

    fn texture(&mut self, ctx: &Context) -> Option<TextureHandle> {
        if self.texture.is_none() {
            let img = self.overview.image()?;
            let size = [img.width() as usize, img.height() as usize];
            let color_img = egui::ColorImage::from_rgba_unmultiplied(size, img.as_raw());
            self.texture = Some(ctx.load_texture("overview", color_img, egui::TextureOptions::LINEAR));
        }
        self.texture.clone()
    }

    pub fn hit_test(&self, panel_y: i32) -> Option<(usize, i32)> {
        self.overview.hit_test(panel_y)
    }
}

impl WebtoonApp {
    /// A click on the strip jumps there and closes the panel.
    pub fn display_overview(&mut self, ctx: &Context) {
        if !self.side_menu.is_active() {
            return;
        }
        let rect = self.side_menu.panel_rect(ctx.screen_rect());
        let texture = self.overview.texture(ctx);
        let placeholder = if self.overview.failed { "\u{26A0}" } else { "\u{231B}" };

        egui::Area::new(egui::Id::new("overview"))
            .order(egui::Order::Foreground)
            .fixed_pos(rect.min)
            .show(ctx, |ui| {
                let (rect, response) = ui.allocate_exact_size(rect.size(), Sense::click());
                let painter = ui.painter_at(rect);
                painter.rect_filled(rect, 0.0, Color32::BLACK);
                match &texture {
                    Some(texture) => {
                        let size = texture.size_vec2();
                        painter.image(
                            texture.id(),
                            Rect::from_min_size(rect.min, size),
                            FULL_UV,
                            Color32::WHITE,
                        );
                    }
                    None => {
                        painter.text(
                            rect.center(),
                            Align2::CENTER_CENTER,
                            placeholder,
                            FontId::proportional(24.0),
                            Color32::GRAY,
                        );
                    }
                }
                // Current viewport centre.
                painter.hline(rect.x_range(), rect.center().y, (1.0, MARKER_COLOR));

                if !self.side_menu.is_open() || !response.clicked() {
                    return;
                }
                let Some(pointer) = response.interact_pointer_pos() else {
                    return;
                };
                let panel_y = (pointer.y - rect.top()).round() as i32;
                if let Some((index, offset)) = self.overview.hit_test(panel_y) {
                    let (_, height) = self.viewer.viewport();
                    debug!("Overview click at {panel_y}: page {index} offset {offset}");
                    self.on_jump = Some((index, offset - height as i32 / 2));
                    self.side_menu.hide();
                }
            });
    }
}
