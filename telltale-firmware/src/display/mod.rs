//! Display link
//!
//! The cluster display is an external unit on UART: 8 rows of 21
//! characters, addressed by a one-way text-line protocol (`row:text\n`).
//! All rendering logic stays on this side of the link.

pub mod renderer;

pub use renderer::{Renderer, Screen, DISPLAY_COLS, DISPLAY_ROWS};
