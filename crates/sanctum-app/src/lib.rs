//! Sanctum runtime: headless district runner and material swatch previewer.

pub mod error;
pub mod frame_loop;
pub mod platform;
pub mod preview;
pub mod runner;
