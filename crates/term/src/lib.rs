//! Terminal front end.
//!
//! A small game-oriented rendering layer: views draw a
//! [`core::GameSnapshot`] into a framebuffer and the renderer flushes it to
//! the terminal with full or diff redraws. No widget toolkit involved.

pub mod fb;
pub mod game_view;
pub mod renderer;

pub use blockfall_core as core;
pub use blockfall_types as types;

pub use fb::{Cell, CellStyle, FrameBuffer, Rgb};
pub use game_view::{AnchorY, GameView, Viewport};
pub use renderer::{encode_diff_into, encode_full_into, TerminalRenderer};
