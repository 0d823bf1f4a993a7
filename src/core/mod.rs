//! Core game types and logic (map, simulation, phases).
//!
//! Re-exports:
//! - `maze`: Baseline grid plus the per-frame overlay
//! - `player`: Player position, heading and movement
//! - `enemy`: Enemy movement and placement
//! - `process_events`: Key mapping and movement-hold tracking
//! - `session`: One play-through and its per-frame step
//! - `game`: Phase state machine

pub mod enemy;
pub mod game;
pub mod maze;
pub mod player;
pub mod process_events;
pub mod session;
