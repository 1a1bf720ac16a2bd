//! Chroma Runner - endless color-matching runner
//!
//! Core modules:
//! - `sim`: Simulation (block generation, avatar physics, game phases)
//! - `platform`: Host collaborator traits and event dispatch
//! - `audio`: Sound effect kinds and clip pools
//! - `scores`: Distance and high score bookkeeping
//! - `tuning`: Data-driven game balance
//! - `autopilot`: Scripted player for demos and soak tests

pub mod audio;
pub mod autopilot;
pub mod platform;
pub mod scores;
pub mod sim;
pub mod tuning;

pub use scores::ScoreBoard;
pub use tuning::Tuning;

/// Game loop constants
pub mod consts {
    /// Fixed physics timestep (50 Hz)
    pub const SIM_DT: f32 = 1.0 / 50.0;
    /// Maximum substeps per frame to prevent spiral of death
    pub const MAX_SUBSTEPS: u32 = 8;
    /// Longest frame delta fed to the simulation (seconds)
    pub const MAX_FRAME_DT: f32 = 0.1;
}
