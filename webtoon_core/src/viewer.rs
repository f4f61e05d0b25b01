//! Continuous scroll engine over three rendered pages.

use std::sync::Arc;

use tokio::runtime::Handle;

use crate::prelude::*;
use crate::render::render_page;
use crate::slot::NeighborSlot;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PlayMode {
    #[default]
    Normal,
    Auto,
}

/// Pointer and wheel state for one frame, as seen by the shell.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct FrameInput {
    pub pointer_y: f32,
    /// Primary button went down this frame.
    pub pressed: bool,
    /// Primary button went up this frame.
    pub released: bool,
    /// Wheel notches, positive away from the user.
    pub wheel: f32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SlotKind {
    Previous,
    Current,
    Next,
}

/// Where a rendered page goes on screen this frame.
#[derive(Debug, Clone)]
pub struct Placement {
    pub kind: SlotKind,
    pub page: Arc<RenderedPage>,
    /// Top edge relative to the viewport top.
    pub y: i32,
}

pub struct Viewer {
    config: ViewerConfig,
    runtime: Handle,
    source: Option<Arc<dyn PageSource>>,

    previous: NeighborSlot,
    current: Option<Arc<RenderedPage>>,
    next: NeighborSlot,
    index: usize,

    play_mode: PlayMode,
    drag: DragState,
    pos: i32,
    anchor: f32,

    width: u32,
    height: u32,
}

impl Viewer {
    pub fn new(config: ViewerConfig, runtime: Handle) -> Self {
        Self {
            config,
            runtime,
            source: None,
            previous: NeighborSlot::default(),
            current: None,
            next: NeighborSlot::default(),
            index: 0,
            play_mode: PlayMode::Normal,
            drag: DragState::None,
            pos: 0,
            anchor: 0.0,
            width: 0,
            height: 0,
        }
    }

    pub fn config(&self) -> &ViewerConfig {
        &self.config
    }

    pub fn set_config(&mut self, config: ViewerConfig) {
        self.config = config;
    }

    /// Installs a book, splitting it first when its pages are too tall for
    /// the current viewport width.
    pub fn set_book(&mut self, book: Book) -> Result<(), BookError> {
        let book = if book.needs_splitting(self.width, self.config.max_texture_height) {
            log::info!("Pages of {} are too tall, splitting", book.dir().display());
            book.split(self.width, self.config.split_tile_height)?
        } else {
            book
        };
        self.set_source(Arc::new(book));
        Ok(())
    }

    pub fn set_source(&mut self, source: Arc<dyn PageSource>) {
        self.source = Some(source);
        self.reset();
    }

    pub fn source(&self) -> Option<&Arc<dyn PageSource>> {
        self.source.as_ref()
    }

    /// Empties all slots and goes back to the first page.
    pub fn reset(&mut self) {
        self.previous.clear();
        self.current = None;
        self.next.clear();
        self.index = 0;
        self.pos = 0;
        self.drag = DragState::None;
    }

    /// Renders the current page for a new viewport and re-scales loaded
    /// neighbors. Returns the scale used for the current page.
    pub fn resize(&mut self, width: u32, height: u32) -> Result<Option<f64>, BookError> {
        self.width = width;
        self.height = height;
        let Some(source) = self.source.clone() else {
            return Ok(None);
        };
        if source.page_count() == 0 {
            return Ok(None);
        }

        let img = source.load(self.index)?;
        let page = render_page(&img, self.index, width, self.config.max_texture_height);
        let scale = page.scale;
        log::debug!("Rendered page {} at {:.3} for {}x{}", self.index, scale, width, height);
        self.current = Some(Arc::new(page));

        self.previous.rescale(width, self.config.max_texture_height);
        self.next.rescale(width, self.config.max_texture_height);
        Ok(Some(scale))
    }

    /// Shows `index` with `pos` clamped into that page.
    pub fn jump(&mut self, index: usize, pos: i32) -> Result<(), BookError> {
        let Some(source) = self.source.clone() else {
            return Ok(());
        };
        let count = source.page_count();
        if index >= count {
            return Err(BookError::IndexOutOfRange { index, count });
        }

        // The current page stays on screen if the target cannot be loaded.
        let img = source.load(index)?;
        let page = render_page(&img, index, self.width, self.config.max_texture_height);
        let max_pos = (page.height() - self.height as i32).max(0);

        self.reset();
        self.index = index;
        self.pos = pos.clamp(0, max_pos);
        self.current = Some(Arc::new(page));
        Ok(())
    }

    pub fn enabled(&self) -> bool {
        self.source.is_some() && self.current.is_some()
    }

    pub fn dragging(&self) -> bool {
        self.drag == DragState::Dragging
    }

    pub fn index(&self) -> usize {
        self.index
    }

    pub fn pos(&self) -> i32 {
        self.pos
    }

    pub fn page_count(&self) -> usize {
        self.source.as_ref().map_or(0, |s| s.page_count())
    }

    pub fn viewport(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    pub fn current(&self) -> Option<&Arc<RenderedPage>> {
        self.current.as_ref()
    }

    pub fn play_mode(&self) -> PlayMode {
        self.play_mode
    }

    pub fn set_play_mode(&mut self, mode: PlayMode) {
        self.play_mode = mode;
    }

    pub fn toggle_play_mode(&mut self) -> PlayMode {
        self.play_mode = match self.play_mode {
            PlayMode::Normal => PlayMode::Auto,
            PlayMode::Auto => PlayMode::Normal,
        };
        self.play_mode
    }

    /// Whether a previous/next load is outstanding.
    pub fn in_flight(&self) -> (bool, bool) {
        (self.previous.in_flight(), self.next.in_flight())
    }

    /// Per-frame update: collect and start neighbor loads, then move the
    /// scroll offset.
    pub fn tick(&mut self, input: &FrameInput) {
        if !self.enabled() {
            return;
        }
        let Some(source) = self.source.clone() else {
            return;
        };
        let max_height = self.config.max_texture_height;

        if let Some(prev) = self.index.checked_sub(1) {
            self.previous.poll(prev, self.width);
            self.previous.request(&self.runtime, &source, prev, self.width, max_height);
        }
        let next = self.index + 1;
        if next < source.page_count() {
            self.next.poll(next, self.width);
            self.next.request(&self.runtime, &source, next, self.width, max_height);
        }

        let moved = match self.play_mode {
            PlayMode::Auto => {
                self.pos += self.config.auto_scroll_step;
                true
            }
            PlayMode::Normal => self.handle_input(input),
        };
        if moved {
            self.clamp_pos();
        }
    }

    fn handle_input(&mut self, input: &FrameInput) -> bool {
        self.drag = self.drag.next(input.pressed, input.released);

        if self.drag == DragState::Start {
            self.anchor = input.pointer_y;
            return false;
        }
        if self.drag != DragState::Dragging && input.wheel == 0.0 {
            return false;
        }

        let delta = if input.wheel != 0.0 {
            -input.wheel * self.config.wheel_multiplier
        } else {
            self.anchor - input.pointer_y
        };
        self.pos += delta.round() as i32;
        self.anchor = input.pointer_y;
        true
    }

    // Only bounded where there is no neighbor to promote into.
    fn clamp_pos(&mut self) {
        let current_height = self.current.as_ref().map_or(0, |c| c.height());
        let upper = current_height - self.height as i32;
        if !self.next.is_loaded() && self.pos > upper {
            self.pos = upper;
        }
        if !self.previous.is_loaded() && self.pos < 0 {
            self.pos = 0;
        }
    }

    /// Lays out the loaded pages for this frame, then promotes a neighbor
    /// that has taken over the viewport. At most one promotion per call.
    pub fn draw(&mut self) -> Vec<Placement> {
        let mut placements = Vec::with_capacity(3);
        if !self.enabled() {
            return placements;
        }
        let Some(current) = self.current.clone() else {
            return placements;
        };
        let previous = self.previous.page().cloned();
        let next = self.next.page().cloned();

        let top = -self.pos;
        placements.push(Placement {
            kind: SlotKind::Current,
            page: Arc::clone(&current),
            y: top,
        });
        if let Some(prev) = &previous {
            placements.push(Placement {
                kind: SlotKind::Previous,
                page: Arc::clone(prev),
                y: top - prev.height(),
            });
        }
        if let Some(next) = &next {
            placements.push(Placement {
                kind: SlotKind::Next,
                page: Arc::clone(next),
                y: top + current.height(),
            });
        }

        // previous's bottom edge sits at `top`
        if previous.is_some() && top > self.height as i32 {
            self.promote_previous();
        } else if next.is_some() && top + current.height() < 0 {
            self.promote_next();
        }
        placements
    }

    fn promote_previous(&mut self) {
        let Some(prev) = self.previous.take() else {
            return;
        };
        self.pos += prev.height();
        let old = self.current.replace(prev);
        self.next.set(old);
        self.previous.clear();
        self.index -= 1;
        log::debug!("Promoted previous: page {} pos {}", self.index, self.pos);
    }

    fn promote_next(&mut self) {
        let Some(next) = self.next.take() else {
            return;
        };
        let old = self.current.replace(next);
        self.pos -= old.as_ref().map_or(0, |c| c.height());
        self.previous.set(old);
        self.next.clear();
        self.index += 1;
        log::debug!("Promoted next: page {} pos {}", self.index, self.pos);
    }

    /// Blocks until outstanding neighbor loads finish and installs them.
    pub fn finish_pending_loads(&mut self) {
        if let Some(prev) = self.index.checked_sub(1) {
            self.previous.wait(prev, self.width);
        }
        if self.index + 1 < self.page_count() {
            self.next.wait(self.index + 1, self.width);
        }
    }
}
