//! Rendering: ray casting, frame composition and the terminal surface.
//!
//! Re-exports:
//! - `framebuffer`: Character screen buffer
//! - `casters`: Per-column ray marching and shading
//! - `render3d`: Parallel column casts merged with status line and minimap
//! - `screens`: Menu, instructions and end-of-game screens
//! - `terminal`: crossterm output surface

pub mod casters;
pub mod framebuffer;
pub mod render3d;
pub mod screens;
pub mod terminal;
