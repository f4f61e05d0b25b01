//! Page store, tile splitter and continuous scroll engine for the webtoon viewer.

pub mod config;
pub mod error;
pub mod prelude;
pub mod sort;

mod book;
pub use book::{Book, PageSource};

mod optimize;
pub use optimize::{plan_tiles, tile_file_name};

mod render;
pub use render::{RenderedPage, fit_scale, render_page};

mod drag;
pub use drag::DragState;

mod slot;

mod viewer;
pub use viewer::{FrameInput, PlayMode, Placement, SlotKind, Viewer};

mod overview;
pub use overview::{OverviewRequest, ScrollOverview};

#[cfg(test)]
mod testing;

/// Reserved name of the split cache directory created inside a reading directory.
pub const OPTIMIZE_DIRECTORY: &str = ".wtv_optimize";

#[macro_export]
macro_rules! is_supported_format {
    ($name:expr) => {
        $name.ends_with(".jpg")
            || $name.ends_with(".jpeg")
            || $name.ends_with(".png")
            || $name.ends_with(".gif")
            || $name.ends_with(".bmp")
            || $name.ends_with(".webp")
    };
}
