pub use crate::config::ViewerConfig;
pub use crate::error::BookError;
pub use crate::sort::SortType;
pub use crate::{
    Book, DragState, FrameInput, OPTIMIZE_DIRECTORY, OverviewRequest, PageSource, Placement,
    PlayMode, RenderedPage, ScrollOverview, SlotKind, Viewer,
};
