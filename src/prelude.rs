// std
pub use std::collections::HashMap;
pub use std::path::{Path, PathBuf};
pub use std::time::{Duration, Instant};

// external crates
pub use eframe::{
    CreationContext,
    egui::{
        self, Align2, CentralPanel, Color32, Context, FontId, Pos2, Rect, RichText, Sense,
        TextStyle, TextureHandle, Ui, Vec2, pos2, vec2,
    },
};
pub use log::{debug, warn};
pub use webtoon_core::prelude::*;

// crate modules
pub use crate::{
    app::WebtoonApp,
    cache::texture_cache::TextureCache,
    config::*,
    error::AppError,
    ui::{
        log::{UiLogLevel, UiLogger},
        menu::{Edge, EdgeMenu, MenuState},
        shape::{CircleShape, HitShape, RectShape},
    },
};
