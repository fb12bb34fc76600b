//! Headless client for the dungeon simulation.
//!
//! The binary loads content, starts a [`delve_runtime::Session`] and lets the
//! [`Autopilot`] play it, printing the message log when the run ends. There is
//! no rendering and no keyboard input; the point is to exercise the engine
//! end to end with a reproducible seed.
pub mod autopilot;
pub mod config;

pub use autopilot::{Autopilot, RunSummary, play};
pub use config::ClientConfig;
