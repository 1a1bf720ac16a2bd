//! Data-driven game balance
//!
//! Every gameplay constant lives here so hosts can tweak feel without
//! touching simulation code. Loaded from JSON; missing fields keep defaults.

use serde::{Deserialize, Serialize};

use crate::sim::DifficultyState;

/// Gameplay tuning values
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Tuning {
    // === Avatar ===
    /// Horizontal speed at the start of a run
    pub start_avatar_speed: f32,
    /// Horizontal acceleration (units/s²)
    pub avatar_speed_inc: f32,
    /// Horizontal speed cap
    pub max_avatar_speed: f32,
    /// Avatar box size (x, y)
    pub avatar_size: (f32, f32),
    /// Avatar spawn position on reset
    pub avatar_start: (f32, f32),
    pub gravity: f32,
    /// Fraction of downward speed returned on a landing
    pub bounciness: f32,

    // === Jumping ===
    pub starting_jump_energy: f32,
    /// Energy drained per second while the jump is held
    pub jump_energy_depletion_rate: f32,
    /// Upward acceleration per unit of remaining energy
    pub jump_energy_efficiency: f32,
    /// Instant upward velocity added on jump
    pub min_jump_impulse: f32,
    /// Length of the tilt animation after a jump (seconds)
    pub jump_rotation_time: f32,

    // === Blocks ===
    /// Buildings a single block may hold
    pub max_block_buildings: usize,
    /// Target width of one block
    pub min_block_width: f32,
    pub hardest_min_building_width: f32,
    pub hardest_max_building_width: f32,
    pub hardest_max_gap_width: f32,
    pub hardest_max_ground_delta: f32,
    pub building_width_step: f32,
    pub gap_width_step: f32,
    pub ground_delta_step: f32,
    pub min_ground_height: f32,
    pub max_ground_height: f32,
    /// Visual height of a building box below its roof
    pub building_depth: f32,
    pub building_thickness: f32,
    /// Difficulty at the start of a run
    pub initial_difficulty: DifficultyState,

    // === Menu / presentation ===
    pub fade_to_menu_time: f32,
    /// Camera offset from the avatar (x, y)
    pub camera_offset: (f32, f32),
    /// Camera position on reset
    pub camera_start: (f32, f32, f32),
    pub debris_count: u32,
    pub debris_spread: f32,
    /// Fail impulse scale (x from speed, y from vertical velocity)
    pub fail_impulse_scale: (f32, f32),
}

impl Default for Tuning {
    fn default() -> Self {
        Self {
            start_avatar_speed: 8.0,
            avatar_speed_inc: 0.05,
            max_avatar_speed: 11.0,
            avatar_size: (1.0, 1.0),
            avatar_start: (1.0, 1.5),
            gravity: 30.0,
            bounciness: 0.2,

            starting_jump_energy: 0.7,
            jump_energy_depletion_rate: 1.0,
            jump_energy_efficiency: 50.5,
            min_jump_impulse: 4.0,
            jump_rotation_time: 0.4,

            max_block_buildings: 25,
            min_block_width: 60.0,
            hardest_min_building_width: 4.0,
            hardest_max_building_width: 16.0,
            hardest_max_gap_width: 3.5,
            hardest_max_ground_delta: 1.2,
            building_width_step: 2.0,
            gap_width_step: 0.5,
            ground_delta_step: 0.1,
            min_ground_height: -15.0,
            max_ground_height: 5.0,
            building_depth: 50.0,
            building_thickness: 0.2,
            initial_difficulty: DifficultyState::default(),

            fade_to_menu_time: 0.7,
            camera_offset: (3.4, 0.2),
            camera_start: (8.0, 1.2, -30.0),
            debris_count: 30,
            debris_spread: 0.2,
            fail_impulse_scale: (40.0, 20.0),
        }
    }
}

impl Tuning {
    /// Parse tuning from JSON. Unknown fields are ignored, missing ones default.
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }

    /// Parse tuning, falling back to defaults on bad input
    pub fn load_or_default(json: &str) -> Self {
        match Self::from_json(json) {
            Ok(tuning) => {
                log::info!("Loaded tuning overrides");
                tuning
            }
            Err(e) => {
                log::warn!("Invalid tuning ({e}), using defaults");
                Self::default()
            }
        }
    }

    /// Half of the avatar box (x, y)
    pub fn avatar_half_extents(&self) -> (f32, f32) {
        (self.avatar_size.0 * 0.5, self.avatar_size.1 * 0.5)
    }

    /// Buildings the old+active window can ever hold
    pub fn window_capacity(&self) -> usize {
        self.max_block_buildings * 2
    }
}
