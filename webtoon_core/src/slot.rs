//! Neighbor slot: one rendered page plus at most one background load.

use std::sync::Arc;

use tokio::runtime::Handle;
use tokio::task::JoinHandle;

use crate::prelude::*;
use crate::render::render_page;

struct Flight {
    index: usize,
    handle: JoinHandle<Result<RenderedPage, BookError>>,
}

/// Loaded pages are only ever swapped in whole, on the frame thread, by
/// [`NeighborSlot::poll`].
#[derive(Default)]
pub(crate) struct NeighborSlot {
    page: Option<Arc<RenderedPage>>,
    flight: Option<Flight>,
    failures: u32,
}

impl NeighborSlot {
    pub fn page(&self) -> Option<&Arc<RenderedPage>> {
        self.page.as_ref()
    }

    pub fn is_loaded(&self) -> bool {
        self.page.is_some()
    }

    pub fn in_flight(&self) -> bool {
        self.flight.is_some()
    }

    /// Installs `page` and forgets any outstanding load.
    pub fn set(&mut self, page: Option<Arc<RenderedPage>>) {
        self.page = page;
        self.flight = None;
        self.failures = 0;
    }

    pub fn take(&mut self) -> Option<Arc<RenderedPage>> {
        self.page.take()
    }

    /// Empties the slot and re-arms the single-flight guard. An outstanding
    /// task keeps running detached and its result is dropped.
    pub fn clear(&mut self) {
        self.set(None);
    }

    /// Starts a background load of `index` unless the slot is loaded or a
    /// load is already out. Returns whether a task was spawned.
    pub fn request(
        &mut self,
        runtime: &Handle,
        source: &Arc<dyn PageSource>,
        index: usize,
        width: u32,
        max_height: u32,
    ) -> bool {
        if self.page.is_some() || self.flight.is_some() {
            return false;
        }
        let source = Arc::clone(source);
        let handle = runtime.spawn_blocking(move || {
            let img = source.load(index)?;
            Ok(render_page(&img, index, width, max_height))
        });
        self.flight = Some(Flight { index, handle });
        true
    }

    /// Collects a finished load, if any. Results for another page or width
    /// are discarded.
    pub fn poll(&mut self, index: usize, width: u32) {
        if let Some(flight) = self.flight.take_if(|f| f.handle.is_finished()) {
            self.complete(flight, index, width);
        }
    }

    /// Blocks until the outstanding load finishes, then collects it.
    pub fn wait(&mut self, index: usize, width: u32) {
        if let Some(flight) = self.flight.take() {
            self.complete(flight, index, width);
        }
    }

    /// Re-scales a loaded page for a new viewport width.
    pub fn rescale(&mut self, width: u32, max_height: u32) {
        if let Some(page) = &self.page {
            if page.width != width {
                self.page = Some(Arc::new(page.rescaled(width, max_height)));
            }
        }
    }

    fn complete(&mut self, flight: Flight, index: usize, width: u32) {
        let requested = flight.index;
        match futures::executor::block_on(flight.handle) {
            Ok(Ok(page)) if page.index == index && page.width == width => {
                log::debug!("Loaded page {} ({}px)", page.index, page.height());
                self.page = Some(Arc::new(page));
                self.failures = 0;
            }
            Ok(Ok(page)) => {
                log::debug!("Discarding stale page {} (want {})", page.index, index);
            }
            Ok(Err(e)) if e.is_out_of_range() => {
                log::debug!("No page {requested}: {e}");
            }
            Ok(Err(e)) => {
                self.failures += 1;
                if self.failures == 1 {
                    log::warn!("Failed to load page {requested}: {e}");
                } else {
                    log::debug!("Failed to load page {requested} ({} times): {e}", self.failures);
                }
            }
            Err(e) => log::warn!("Page {requested} load task failed: {e}"),
        }
    }
}
