//! Display abstraction and control view for Open Control
//!
//! This crate provides:
//! - `DisplayBackend` trait for character-addressed displays
//! - `Screen`, a text buffer with per-row highlights and a dirty flag
//! - Slider and indicator widgets
//! - `ControlView`, the view sink that shows encoder and button state
//!
//! # Layout
//!
//! ```text
//! row 0     Open Control
//! row 1..   Enc 1 [####    ]  50%     one per encoder
//! ...       Btn 1 [*]                 one per button
//! row 7     Btn: reset
//! ```
//!
//! State changes only touch the screen buffer. The display is written in
//! `refresh()`, which the scheduler runs at the view rate.

#![no_std]

pub mod backend;
pub mod screen;
pub mod view;
pub mod widgets;

// Re-export key types
pub use backend::{DisplayBackend, DisplayError};
pub use screen::{Screen, SCREEN_COLS, SCREEN_ROWS};
pub use view::{ControlView, FOOTER, MAX_CONTROLS, TITLE};
