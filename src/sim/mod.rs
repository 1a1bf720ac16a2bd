//! Runner simulation module
//!
//! All gameplay logic lives here. No rendering, audio or input polling:
//! - Hosts feed [`FrameInput`] and frame deltas through [`advance`]
//! - Side effects come back as [`GameEvent`]s
//! - Randomness only through [`RandomSource`]

pub mod avatar;
pub mod generator;
pub mod rng;
pub mod state;
pub mod tick;
pub mod tracker;

pub use avatar::{StepOutcome, bounce_velocity, jump, physics_step};
pub use generator::{
    BlockLayout, BlockWindow, BuildingSpec, GroundStep, create_new_block, layout_block,
    next_ground_height, ramp_difficulty,
};
pub use rng::RandomSource;
pub use state::{
    AvatarState, Block, Building, DifficultyState, ElementColor, GameEvent, GamePhase, GameState,
};
pub use tick::{FrameInput, advance, fade_to_menu, frame, physics_tick, reset};
pub use tracker::ActiveBuildingTracker;
