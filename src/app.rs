//! Main application state and logic.

use tokio::runtime::Handle;

use crate::prelude::*;
use crate::ui::modules::RoundButton;
use crate::ui::overview::OverviewPanel;

/// Owns the engine, the menus and the persisted preferences.
pub struct WebtoonApp {
    pub viewer: Viewer,
    pub prefs: Preferences,
    store: Box<dyn PreferenceStore>,
    pub texture_cache: TextureCache,
    pub overview: OverviewPanel,
    pub ui_logger: UiLogger,
    pub top_menu: EdgeMenu,
    pub bottom_menu: EdgeMenu,
    pub side_menu: EdgeMenu,
    pub folder_button: RoundButton,
    pub auto_button: RoundButton,
    pub page_slider: usize,
    pub on_open_folder: bool,
    pub on_sort: Option<SortType>,
    pub on_jump: Option<(usize, i32)>,
    pub new_directory: Option<PathBuf>,
    size: (u32, u32),
    view_redraw: bool,
    texture_limit: usize,
}

impl WebtoonApp {
    pub fn new(
        cc: &CreationContext,
        runtime: Handle,
        prefs: Preferences,
        store: Box<dyn PreferenceStore>,
        path: Option<PathBuf>,
    ) -> Self {
        cc.egui_ctx.set_visuals(egui::Visuals::dark());
        let texture_limit = cc.egui_ctx.input(|i| i.max_texture_side);
        let config = ViewerConfig::default().with_texture_limit(texture_limit);

        let mut top_menu = EdgeMenu::new(Edge::Top, TOP_MENU_AREA, TOP_MENU_HEIGHT);
        top_menu.open();

        Self {
            viewer: Viewer::new(config, runtime),
            prefs,
            store,
            texture_cache: TextureCache::new(),
            overview: OverviewPanel::new(),
            ui_logger: UiLogger::new(),
            top_menu,
            bottom_menu: EdgeMenu::new(Edge::Bottom, 0.0, BOTTOM_MENU_HEIGHT),
            side_menu: EdgeMenu::new(Edge::Right, 0.0, OVERVIEW_WIDTH),
            folder_button: RoundButton::new(ROUND_BUTTON_RADIUS),
            auto_button: RoundButton::new(ROUND_BUTTON_RADIUS),
            page_slider: 1,
            on_open_folder: false,
            on_sort: None,
            on_jump: None,
            new_directory: path,
            size: (0, 0),
            view_redraw: true,
            texture_limit,
        }
    }

    /// Whether a book is loaded.
    pub fn is_view(&self) -> bool {
        self.viewer.source().is_some()
    }

    /// Opens `dir` with the current sort, splitting it first if needed.
    pub fn open_directory(&mut self, dir: PathBuf) -> Result<(), AppError> {
        let book = Book::open(&dir, self.prefs.sort)?;
        let count = book.page_count();
        self.viewer.set_book(book)?;
        if count == 0 {
            self.ui_logger.warn(format!("No pages in {}", dir.display()), None);
        } else {
            self.ui_logger.info(format!("Opened {} ({count} pages)", dir.display()), None);
        }
        self.texture_cache.clear();
        self.overview.reset();
        self.view_redraw = true;
        self.page_slider = 1;

        self.prefs.directory = Some(dir);
        self.save_preferences();
        Ok(())
    }

    fn pick_directory(&self) -> Result<PathBuf, AppError> {
        let mut dialog = rfd::FileDialog::new().set_title("Load Webtoon Directory");
        if let Some(dir) = &self.prefs.directory {
            dialog = dialog.set_directory(dir);
        }
        dialog.pick_folder().ok_or(AppError::Cancelled)
    }

    /// Re-opens the current directory in a new order.
    pub fn change_sort(&mut self, sort: SortType) -> Result<(), AppError> {
        self.prefs.sort = sort;
        let direction = if sort.is_ascending() { "ascending" } else { "descending" };
        log::info!("Sorting by {} ({direction})", sort.label());
        if let Some(dir) = self.prefs.directory.clone().filter(|_| self.is_view()) {
            self.open_directory(dir)?;
        }
        Ok(())
    }

    /// A second click on the active sort flips its direction.
    pub fn next_sort(current: SortType, clicked: SortType) -> SortType {
        let same = (current.is_numeric() && clicked.is_numeric())
            || (current.is_alphameric() && clicked.is_alphameric())
            || (current.is_mod_time() && clicked.is_mod_time());
        if same { current.reverse() } else { clicked }
    }

    pub fn save_preferences(&mut self) {
        if let Err(e) = self.store.save(&self.prefs) {
            self.ui_logger.error(format!("Failed to save preferences: {e}"), None);
        }
    }

    /// Tracks the window size. A new size is applied on the following frame,
    /// once it has settled.
    fn layout(&mut self, ctx: &Context) {
        let screen = ctx.screen_rect().size();
        let size = (screen.x.round() as u32, screen.y.round() as u32);
        if size != self.size {
            self.size = size;
            self.view_redraw = true;
        } else if self.view_redraw {
            self.view_redraw = false;
            let (w, h) = size;
            match self.viewer.resize(w, h) {
                Ok(Some(scale)) => {
                    debug!("Redraw at {w}x{h}, scale {scale:.3}");
                    self.texture_cache.clear();
                    self.prefs.width = w;
                    self.prefs.height = h;
                    self.save_preferences();
                }
                Ok(None) => {}
                Err(e) => self.ui_logger.error(format!("Failed to draw page: {e}"), None),
            }
        }
    }

    fn apply_texture_limit(&mut self, ctx: &Context) {
        let side = ctx.input(|i| i.max_texture_side);
        if side != self.texture_limit {
            self.texture_limit = side;
            let config = self.viewer.config().with_texture_limit(side);
            debug!("Texture limit {side}, pages capped at {}", config.max_texture_height);
            self.viewer.set_config(config);
            self.view_redraw = true;
        }
    }

    /// Menus get first pick of the pointer; none of them open while the
    /// viewer is mid-drag.
    fn update_menus(&mut self, ctx: &Context) {
        if self.viewer.dragging() {
            return;
        }
        let screen = ctx.screen_rect();
        let (pointer, clicked) = ctx.input(|i| (i.pointer.hover_pos(), i.pointer.primary_pressed()));

        if self.is_view() && !self.top_menu.is_active() && !self.bottom_menu.is_active() {
            self.side_menu.update(pointer, clicked, screen);
        }
        if !self.side_menu.is_active() && !self.bottom_menu.is_active() {
            self.top_menu.update(pointer, clicked, screen);
        }
        if self.is_view() && !self.side_menu.is_active() && !self.top_menu.is_active() {
            self.page_slider = self.viewer.index() + 1;
            self.bottom_menu.update(pointer, clicked, screen);
        }
    }

    fn frame_input(&self, ctx: &Context) -> FrameInput {
        ctx.input(|i| FrameInput {
            pointer_y: i.pointer.latest_pos().map_or(0.0, |p| p.y),
            pressed: i.pointer.primary_pressed(),
            released: i.pointer.primary_released(),
            wheel: i.raw_scroll_delta.y / WHEEL_POINTS_PER_NOTCH,
        })
    }

    /// Acts on what the menus asked for this frame.
    fn on_changes(&mut self) {
        if self.on_open_folder {
            self.on_open_folder = false;
            match self.pick_directory() {
                Ok(dir) => {
                    self.top_menu.hide();
                    self.new_directory = Some(dir);
                }
                Err(AppError::Cancelled) => debug!("Directory dialog cancelled"),
                Err(e) => self.ui_logger.error(e.to_string(), None),
            }
        }

        if let Some(clicked) = self.on_sort.take() {
            let sort = Self::next_sort(self.prefs.sort, clicked);
            if let Err(e) = self.change_sort(sort) {
                self.ui_logger.error(format!("Failed to re-sort: {e}"), None);
            }
        }

        if let Some((index, pos)) = self.on_jump.take() {
            match self.viewer.jump(index, pos) {
                Ok(()) => self.page_slider = index + 1,
                Err(e) => self.ui_logger.warn(format!("Cannot jump to page {}: {e}", index + 1), None),
            }
        }

        // Splitting needs the viewport width, known once the first layout ran.
        if self.viewer.viewport().0 > 0 {
            if let Some(dir) = self.new_directory.take() {
                if let Err(e) = self.open_directory(dir.clone()) {
                    self.ui_logger.error(format!("Failed to open {}: {e}", dir.display()), None);
                }
            }
        }
    }

    fn update_window_title(&self, ctx: &Context) {
        let title = match self.prefs.directory.as_ref().filter(|_| self.is_view()) {
            Some(dir) => {
                let name = dir.file_name().map(|n| n.to_string_lossy()).unwrap_or_default();
                format!("{name} - {NAME}")
            }
            None => NAME.to_string(),
        };
        ctx.send_viewport_cmd(egui::ViewportCommand::Title(title));
    }
}

impl eframe::App for WebtoonApp {
    fn update(&mut self, ctx: &Context, _frame: &mut eframe::Frame) {
        self.apply_texture_limit(ctx);
        self.layout(ctx);
        self.update_menus(ctx);

        if self.side_menu.is_active() {
            self.overview.build(&self.viewer, &mut self.ui_logger);
        } else if self.overview.is_built() {
            self.overview.reset();
        }

        if self.is_view() && !self.top_menu.is_active() && !self.side_menu.is_active() {
            let input = if self.bottom_menu.is_active() {
                FrameInput::default()
            } else {
                self.frame_input(ctx)
            };
            self.viewer.tick(&input);
        }

        if self.is_view() {
            self.display_main(ctx);
        } else {
            self.display_main_empty(ctx);
        }
        self.display_top_menu(ctx);
        if self.is_view() {
            self.display_overview(ctx);
        }
        self.display_bottom_menu(ctx);

        self.on_changes();
        self.update_window_title(ctx);
        self.ui_logger.clear_expired();

        ctx.request_repaint_after(Duration::from_millis(16));
    }
}
