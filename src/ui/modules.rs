use crate::prelude::*;

const MENU_FILL: Color32 = Color32::from_rgba_premultiplied(0, 0, 0, 230);
const HINT_COLOR: Color32 = Color32::from_gray(200);
const HINT_WIDTH: f32 = 80.0;

/// A round button painted by hand; only clicks inside the circle count.
pub struct RoundButton {
    shape: CircleShape,
}

impl RoundButton {
    pub fn new(radius: f32) -> Self {
        Self {
            shape: CircleShape::new(Pos2::ZERO, radius),
        }
    }

    /// Lays the button out at the cursor. Returns true when clicked.
    pub fn show(&mut self, ui: &mut Ui, icon: &str) -> bool {
        let radius = self.shape.radius();
        let (rect, response) = ui.allocate_exact_size(Vec2::splat(radius * 2.0), Sense::click());
        self.shape.move_to(rect.min);

        let hovered = response.hover_pos().is_some_and(|p| self.shape.hit_test(p));
        let fill = if hovered {
            Color32::from_gray(160)
        } else {
            Color32::from_gray(128)
        };
        let painter = ui.painter();
        painter.circle_filled(self.shape.center(), radius, fill);
        painter.text(
            self.shape.center(),
            Align2::CENTER_CENTER,
            icon,
            FontId::proportional(radius),
            Color32::WHITE,
        );

        response.clicked()
            && response
                .interact_pointer_pos()
                .is_some_and(|p| self.shape.hit_test(p))
    }
}

pub fn ui_log_msg(ui: &mut Ui, msg: &str, kind: UiLogLevel) {
    ui.colored_label(kind.color(), format!("{}: {}", kind.as_str(), msg));
}

fn sort_label(current: SortType, button: SortType) -> String {
    let same = current.label() == button.label();
    match (same, current.is_ascending()) {
        (true, true) => format!("{} \u{2B06}", button.label()),
        (true, false) => format!("{} \u{2B07}", button.label()),
        (false, _) => button.label().to_string(),
    }
}

pub fn ui_sort(app: &mut WebtoonApp, ui: &mut Ui) {
    for button in [
        SortType::NumericAsc,
        SortType::AlphamericAsc,
        SortType::ModTimeAsc,
    ] {
        let selected = app.prefs.sort.label() == button.label();
        if ui
            .selectable_label(selected, sort_label(app.prefs.sort, button))
            .on_hover_text("Click again to reverse")
            .clicked()
        {
            app.on_sort = Some(button);
        }
    }
}

pub fn ui_page_slider(app: &mut WebtoonApp, ui: &mut Ui) {
    let count = app.viewer.page_count().max(1);
    ui.spacing_mut().slider_width = (ui.available_width() - 80.0).max(50.0);
    let response = ui.add(egui::Slider::new(&mut app.page_slider, 1..=count).text("Page"));
    // Decoding on every step of a drag would stall the frame.
    if response.drag_stopped() || (response.changed() && !response.dragged()) {
        app.on_jump = Some((app.page_slider - 1, 0));
    }
}

impl WebtoonApp {
    /// Folder, sort and auto-play controls, sliding down from the top edge.
    pub fn display_top_menu(&mut self, ctx: &Context) {
        if !self.top_menu.is_active() {
            return;
        }
        let rect = self.top_menu.panel_rect(ctx.screen_rect());
        let state = self.top_menu.state();

        egui::Area::new(egui::Id::new("top_menu"))
            .order(egui::Order::Foreground)
            .fixed_pos(rect.min)
            .show(ctx, |ui| {
                ui.painter().rect_filled(rect, 0.0, MENU_FILL);
                ui.set_min_size(rect.size());

                if state == MenuState::Area {
                    let bottom = rect.bottom();
                    let top = bottom - TOP_MENU_AREA + 5.0;
                    let x = rect.center().x;
                    ui.painter().add(egui::Shape::convex_polygon(
                        vec![
                            pos2(x - HINT_WIDTH / 2.0, top),
                            pos2(x + HINT_WIDTH / 2.0, top),
                            pos2(x, bottom - 5.0),
                        ],
                        HINT_COLOR,
                        egui::Stroke::NONE,
                    ));
                    return;
                }

                ui.horizontal_centered(|ui| {
                    ui.add_space(16.0);
                    if self.folder_button.show(ui, "\u{1F5C1}") {
                        self.on_open_folder = true;
                    }
                    ui.add_space(16.0);
                    ui_sort(self, ui);
                    ui.add_space(16.0);
                    let icon = match self.viewer.play_mode() {
                        PlayMode::Normal => "\u{25B6}",
                        PlayMode::Auto => "\u{23F8}",
                    };
                    if self.auto_button.show(ui, icon) {
                        let mode = self.viewer.toggle_play_mode();
                        debug!("Play mode {mode:?}");
                        self.top_menu.hide();
                    }
                });
            });
    }

    /// Page slider and status line along the bottom edge. Without the menu,
    /// a pending status message still shows in the corner.
    pub fn display_bottom_menu(&mut self, ctx: &Context) {
        let screen = ctx.screen_rect();
        if !self.bottom_menu.is_active() {
            if let Some((msg, kind)) = self.ui_logger.message() {
                let msg = msg.to_string();
                egui::Area::new(egui::Id::new("status"))
                    .order(egui::Order::Foreground)
                    .anchor(Align2::LEFT_BOTTOM, vec2(8.0, -8.0))
                    .show(ctx, |ui| ui_log_msg(ui, &msg, kind));
            }
            return;
        }
        let rect = self.bottom_menu.panel_rect(screen);

        egui::Area::new(egui::Id::new("bottom_menu"))
            .order(egui::Order::Foreground)
            .fixed_pos(rect.min)
            .show(ctx, |ui| {
                ui.painter().rect_filled(rect, 0.0, MENU_FILL);
                ui.set_min_size(rect.size());
                ui.add_space(12.0);
                ui.horizontal(|ui| {
                    ui.add_space(12.0);
                    ui_page_slider(self, ui);
                });
                ui.horizontal(|ui| {
                    ui.add_space(12.0);
                    ui.label(format!(
                        "{}/{}",
                        self.viewer.index() + 1,
                        self.viewer.page_count()
                    ));
                    if let Some((msg, kind)) = self.ui_logger.message() {
                        let msg = msg.to_string();
                        ui.separator();
                        ui_log_msg(ui, &msg, kind);
                    }
                });
            });
    }
}
