//! UI rendering and layout.

pub mod display;
pub mod log;
pub mod menu;
pub mod modules;
pub mod overview;
pub mod shape;
