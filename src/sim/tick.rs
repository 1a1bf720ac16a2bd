//! Game state machine and tick drivers
//!
//! Two clocks drive the game, mirroring a typical engine loop:
//! - [`frame`]: once per rendered frame; input edges, phase transitions,
//!   block scroll-ahead and score labels
//! - [`physics_tick`]: fixed rate; avatar integration and landing
//!
//! [`advance`] runs both from a single variable frame delta.

use glam::Vec3;

use super::avatar::{self, StepOutcome};
use super::generator::{BlockWindow, create_new_block};
use super::state::{AvatarState, GameEvent, GamePhase, GameState};
use crate::consts::{MAX_FRAME_DT, MAX_SUBSTEPS, SIM_DT};

/// Input sampled by the host for one frame
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FrameInput {
    /// Jump button currently down
    pub jump_held: bool,
    /// Jump button went down this frame
    pub jump_down: bool,
    /// Jump button went up this frame
    pub jump_up: bool,
    /// Color switch button went down this frame
    pub switch_down: bool,
    /// Any key went down this frame
    pub any_key_down: bool,
}

/// Start a fresh run. The high score is kept.
pub fn reset(state: &mut GameState) {
    let stale: Vec<u32> = state.window.iter().map(|b| b.id).collect();
    for id in stale {
        state.emit(GameEvent::DestroyBuilding { id });
    }

    state.overlay_enabled = false;
    state.emit(GameEvent::OverlayEnabled(false));

    state.difficulty = state.tuning.initial_difficulty;
    state.window = BlockWindow::new(state.difficulty);
    state.tracker.reset();
    create_new_block(state);
    create_new_block(state);

    let color = state.window.get(0).map(|b| b.color).unwrap_or_default();
    state.avatar = AvatarState::new(&state.tuning, color);
    state.emit(GameEvent::AvatarColorChanged(color));
    state.emit(GameEvent::AvatarKinematic(true));

    let (cx, cy, cz) = state.tuning.camera_start;
    state.camera = Vec3::new(cx, cy, cz);
    state.emit(GameEvent::SetCameraPosition(state.camera));

    state.phase = GamePhase::Playing;
    state.fade_timer = 0.0;
    state.accumulator = 0.0;

    log::info!(
        "Run started (seed {}): {} buildings ready, avatar {:?}, high score {}",
        state.seed,
        state.window.len(),
        color,
        state.scores.high_score
    );
}

/// Playing -> FadeToMenu
pub fn fade_to_menu(state: &mut GameState) {
    state.phase = GamePhase::FadeToMenu;
    state.overlay_enabled = true;
    state.fade_timer = 0.0;
    state.emit(GameEvent::OverlayEnabled(true));
    state.emit(GameEvent::OverlayColor([0.0; 4]));
    log::info!(
        "Run failed at distance {} (high score {})",
        state.scores.current_run_distance,
        state.scores.high_score
    );
}

/// Logic tick, once per rendered frame
pub fn frame(state: &mut GameState, input: &FrameInput, dt: f32) {
    // Scroll ahead once the avatar reaches the active block's first building
    let block = *state.window.active_block();
    let trigger = block.offset + block.first_building_width.unwrap_or(block.width);
    if state.avatar.position.x > trigger {
        create_new_block(state);
    }

    match state.phase {
        GamePhase::Playing => {
            if input.jump_down && state.avatar.ground_contact && state.avatar.ready_for_next_jump {
                avatar::jump(state);
            }
            if input.jump_up {
                state.avatar.jump_energy = 0.0;
                state.avatar.ready_for_next_jump = true;
            }
            if input.switch_down {
                state.avatar.color = state.avatar.color.toggled();
                state.emit(GameEvent::AvatarColorChanged(state.avatar.color));
            }
        }

        GamePhase::FadeToMenu => {
            let fade_time = state.tuning.fade_to_menu_time;
            let alpha = 0.5 * (state.fade_timer / fade_time).min(1.0);
            state.emit(GameEvent::OverlayColor([0.5, 0.5, 0.5, alpha]));

            state.fade_timer += dt;
            if state.fade_timer >= fade_time {
                state.phase = GamePhase::Menu;
                state.avatar.kinematic = true;
                state.emit(GameEvent::OverlayColor([0.5, 0.5, 0.5, 0.5]));
                state.emit(GameEvent::AvatarKinematic(true));
                log::debug!("Menu");
            }
        }

        GamePhase::Menu => {
            if input.any_key_down {
                reset(state);
            }
        }
    }

    let changes = state.scores.update(state.avatar.position.x);
    if let Some(distance) = changes.distance {
        state.emit(GameEvent::DistanceChanged(distance));
    }
    if let Some(high_score) = changes.high_score {
        state.emit(GameEvent::HighScoreChanged(high_score));
    }
}

/// Fixed-rate physics tick. Returns the avatar outcome while Playing.
pub fn physics_tick(state: &mut GameState, jump_held: bool, dt: f32) -> Option<StepOutcome> {
    let (ox, oy) = state.tuning.camera_offset;
    state.camera = Vec3::new(
        state.avatar.position.x + ox,
        state.avatar.position.y + oy,
        state.camera.z,
    );
    state.emit(GameEvent::SetCameraPosition(state.camera));

    if state.phase != GamePhase::Playing {
        return None;
    }
    Some(avatar::physics_step(state, jump_held, dt))
}

/// Advance by one rendered frame: fixed physics substeps, then the logic tick
pub fn advance(state: &mut GameState, input: &FrameInput, frame_dt: f32) {
    let dt = frame_dt.clamp(0.0, MAX_FRAME_DT);
    state.accumulator += dt;

    let mut substeps = 0;
    while state.accumulator >= SIM_DT && substeps < MAX_SUBSTEPS {
        physics_tick(state, input.jump_held, SIM_DT);
        state.accumulator -= SIM_DT;
        substeps += 1;
    }
    if substeps == MAX_SUBSTEPS {
        state.accumulator = state.accumulator.min(SIM_DT);
    }

    frame(state, input, dt);
}
