//! Display abstraction and status rendering for the Flapjack pancake maker
//!
//! This crate provides:
//! - `DisplayBackend` trait for character displays
//! - `Screen` buffer with change tracking
//! - The intro, heating and cooling frame tables and a player for them
//! - `StatusRenderer`, which turns a [`flapjack_core::StatusView`] into
//!   screen content
//! - `StatusIndicator`, the matching LED strip pattern
//!
//! # Architecture
//!
//! The renderer only consumes status snapshots; it never drives the cook
//! cycle. The firmware's display task calls [`StatusRenderer::update`]
//! with each new snapshot and awaits [`StatusRenderer::render_to`], which
//! pushes only the rows whose content changed.

#![no_std]
#![deny(unsafe_code)]

pub mod animation;
pub mod backend;
pub mod indicator;
pub mod renderer;
pub mod screen;

// Re-export key types
pub use animation::{Animation, AnimationPlayer, Playback};
pub use backend::{DisplayBackend, DisplayError};
pub use indicator::{Rgb, StatusIndicator};
pub use renderer::StatusRenderer;
pub use screen::{Screen, SCREEN_COLS, SCREEN_ROWS};
