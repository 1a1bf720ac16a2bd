//! Run distance and high score
//!
//! Kept in memory only; the high score survives resets but not the process.

use serde::{Deserialize, Serialize};

/// Distance units per world unit travelled
pub const DISTANCE_SCALE: f32 = 0.5;

/// Label updates produced by [`ScoreBoard::update`]
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ScoreChanges {
    pub distance: Option<u32>,
    pub high_score: Option<u32>,
}

/// Current run distance, best distance, and what the labels last showed
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ScoreBoard {
    pub current_run_distance: u32,
    pub high_score: u32,
    shown_distance: Option<u32>,
    shown_high_score: Option<u32>,
}

/// Score for an avatar at horizontal position `x`
pub fn distance_for(x: f32) -> u32 {
    (x * DISTANCE_SCALE).floor().max(0.0) as u32
}

impl ScoreBoard {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record the avatar position; returns only the values whose label
    /// needs redrawing
    pub fn update(&mut self, avatar_x: f32) -> ScoreChanges {
        self.current_run_distance = distance_for(avatar_x);
        if self.current_run_distance > self.high_score {
            self.high_score = self.current_run_distance;
        }

        let mut changes = ScoreChanges::default();
        if self.shown_distance != Some(self.current_run_distance) {
            self.shown_distance = Some(self.current_run_distance);
            changes.distance = Some(self.current_run_distance);
        }
        if self.shown_high_score != Some(self.high_score) {
            self.shown_high_score = Some(self.high_score);
            changes.high_score = Some(self.high_score);
        }
        changes
    }

    /// Text for the high score label
    pub fn high_score_text(score: u32) -> String {
        format!("Highscore:{score}")
    }
}
