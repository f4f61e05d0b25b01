use crate::cache::texture_cache::TextureKey;
use crate::prelude::*;

const FULL_UV: Rect = Rect::from_min_max(pos2(0.0, 0.0), pos2(1.0, 1.0));

impl WebtoonApp {
    pub fn display_main_empty(&mut self, ctx: &Context) {
        CentralPanel::default().show(ctx, |ui| {
            ui.with_layout(
                egui::Layout::centered_and_justified(egui::Direction::TopDown),
                |ui| {
                    ui.label(
                        RichText::new("No Directory Loaded \u{1F5C1}").text_style(TextStyle::Heading),
                    );
                },
            );
        });
    }

    /// Paints the pages the viewer placed this frame, top to bottom.
    pub fn display_main(&mut self, ctx: &Context) {
        let placements = self.viewer.draw();

        CentralPanel::default()
            .frame(egui::Frame::NONE.fill(Color32::BLACK))
            .show(ctx, |ui| {
                let area = ui.max_rect();
                if placements.is_empty() {
                    ui.centered_and_justified(|ui| {
                        if self.viewer.page_count() == 0 {
                            ui.label(RichText::new("No Pages").text_style(TextStyle::Heading));
                        } else {
                            ui.spinner();
                        }
                    });
                    return;
                }

                let painter = ui.painter_at(area);
                let mut keep = Vec::with_capacity(placements.len());
                for placement in &placements {
                    let page = &placement.page;
                    let size = vec2(page.image.width() as f32, page.image.height() as f32);
                    keep.push(TextureKey::of(page));
                    let top = area.top() + placement.y as f32;
                    if top > area.bottom() || top + size.y < area.top() {
                        continue;
                    }
                    let texture = self.texture_cache.get_or_upload(ctx, page);
                    let left = area.left() + (area.width() - size.x) / 2.0;
                    let rect = Rect::from_min_size(pos2(left, top), size);
                    painter.image(texture.id(), rect, FULL_UV, Color32::WHITE);
                }
                self.texture_cache.retain(&keep);
            });
    }
}
