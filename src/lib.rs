//! Terminal ray-casting maze: find the door before the enemies find you.

pub mod app;
pub mod audio_manager;
pub mod config;
pub mod core;
pub mod error;
pub mod render;
