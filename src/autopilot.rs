//! Scripted player
//!
//! Reads the simulation state and produces [`FrameInput`]s the way a human
//! would press buttons: match the color of the roof we are about to touch,
//! hop near the end of each roof, release after a short hold.

use crate::sim::{FrameInput, GamePhase, GameState};

/// Seconds of jump energy to spend per hop
const HOLD_ENERGY: f32 = 0.15;
/// Jump when the roof ends within this many seconds of travel
const EDGE_LOOKAHEAD: f32 = 0.08;

#[derive(Debug, Clone, Default)]
pub struct Autopilot {
    holding: bool,
    /// Press any key on the menu to start another run
    pub restart: bool,
}

impl Autopilot {
    pub fn new(restart: bool) -> Self {
        Self {
            holding: false,
            restart,
        }
    }

    pub fn decide(&mut self, state: &GameState) -> FrameInput {
        let mut input = FrameInput::default();

        match state.phase {
            GamePhase::Playing => {}
            GamePhase::FadeToMenu => {
                input.jump_up = self.holding;
                self.holding = false;
                return input;
            }
            GamePhase::Menu => {
                input.any_key_down = self.restart;
                return input;
            }
        }

        let (half_w, _) = state.tuning.avatar_half_extents();
        let avatar = &state.avatar;
        let x = avatar.position.x;

        // Work on a copy so deciding never moves the real cursor
        let mut tracker = state.tracker;
        let in_column = tracker.in_active_column(&state.window, x, half_w);
        let active = tracker.active_building(&state.window, x, half_w);
        let next = tracker.next_building(&state.window, x, half_w);

        let target = if in_column { active } else { next };
        if let Some(target) = target {
            input.switch_down = target.color != avatar.color;
        }

        let near_edge = active
            .map(|b| b.right() - (x + half_w) < avatar.horizontal_speed * EDGE_LOOKAHEAD)
            .unwrap_or(false);
        let want_jump = if avatar.ground_contact {
            in_column && near_edge && avatar.ready_for_next_jump
        } else {
            self.holding && avatar.jump_energy > state.tuning.starting_jump_energy - HOLD_ENERGY
        };

        input.jump_down = want_jump && !self.holding;
        input.jump_up = !want_jump && self.holding;
        input.jump_held = want_jump;
        self.holding = want_jump;
        input
    }
}
