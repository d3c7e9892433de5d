//! Hand landmark overlays for live camera feeds.
//!
//! An external hand tracking solution reports up to a few hands per camera frame, each as 21
//! normalized landmarks plus a handedness label. This crate draws those results on top of the
//! frame (skeleton connections, landmark markers and rings, colored by handedness) and keeps the
//! latest annotated frame around for display.
//!
//! # Coordinates
//!
//! Normalized landmarks use image coordinates: X points right and Y points *down*, both in range
//! 0 to 1 across the input image. World landmarks are in meters, relative to the hand's center.
//!
//! # Environment Variables
//!
//! * `RUST_LOG`: overrides the log filter set up by [`init_logger!`], using [`env_logger`] syntax.
//!
//! [`env_logger`]: https://docs.rs/env_logger

use log::LevelFilter;

pub mod camera;
pub mod hand;
pub mod image;
pub mod landmark;
pub mod mailbox;
pub mod models;
pub mod overlay;
pub mod pipeline;
pub mod record;
pub mod solution;
pub mod surface;
pub mod timer;
pub mod view;


/// macro-use only, not part of public API.
#[doc(hidden)]
pub fn init_logger(calling_crate: &'static str) {
    let log_level = LevelFilter::Debug;
    env_logger::Builder::new()
        .filter(Some(calling_crate), log_level)
        .filter(Some(env!("CARGO_CRATE_NAME")), log_level)
        .parse_default_env()
        .try_init()
        .ok();
}

/// Initializes logging to *stderr*.
///
/// The calling crate and this library log at *debug* level, unless overridden by `RUST_LOG`.
///
/// If a global logger is already registered, this macro will do nothing.
#[macro_export]
macro_rules! init_logger {
    () => {
        $crate::init_logger(env!("CARGO_CRATE_NAME"))
    };
}
