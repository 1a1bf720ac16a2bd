//! Avatar physics: speed ramp, jumping, gravity, landing
//!
//! Runs once per fixed physics step while the game is Playing. Landing on a
//! building of the avatar's color bounces; landing on the other color, or
//! dropping below the roof of the building ahead while over a gap, fails
//! the run.

use glam::Vec3;

use super::rng::RandomSource;
use super::state::{GameEvent, GameState};
use crate::audio::SoundEffect;

/// What happened to the avatar during one physics step
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StepOutcome {
    /// In the air above a gap or building
    Airborne,
    /// Touched a matching roof and bounced
    Landed,
    /// Run over
    Failed,
}

/// Vertical velocity after bouncing off a roof
pub fn bounce_velocity(vertical_velocity: f32, bounciness: f32) -> f32 {
    if vertical_velocity < 0.0 {
        -vertical_velocity * bounciness
    } else {
        vertical_velocity
    }
}

/// Start a jump: refill energy and add the instant impulse
pub fn jump(state: &mut GameState) {
    let avatar = &mut state.avatar;
    avatar.jump_energy = state.tuning.starting_jump_energy;
    avatar.ground_contact = false;
    avatar.rotation_timer = 0.0;
    avatar.vertical_velocity += state.tuning.min_jump_impulse;
    avatar.ready_for_next_jump = false;

    let position = avatar.position;
    state.emit(GameEvent::Sound {
        effect: SoundEffect::Jump,
        position,
    });
}

/// Integrate one physics step and resolve roof contact
pub fn physics_step(state: &mut GameState, jump_held: bool, dt: f32) -> StepOutcome {
    let tuning = &state.tuning;
    let (half_w, half_h) = tuning.avatar_half_extents();
    let avatar = &mut state.avatar;

    if avatar.horizontal_speed < tuning.max_avatar_speed {
        avatar.horizontal_speed =
            (avatar.horizontal_speed + tuning.avatar_speed_inc * dt).min(tuning.max_avatar_speed);
    }

    if jump_held && avatar.jump_energy > 0.0 {
        avatar.vertical_velocity += avatar.jump_energy * tuning.jump_energy_efficiency * dt;
        avatar.jump_energy -= tuning.jump_energy_depletion_rate * dt;
    }

    // Over a gap and already below the next roof: any landing now is a crash
    // into the building's side
    let x = avatar.position.x;
    let potential_fail = !state.tracker.in_active_column(&state.window, x, half_w)
        && avatar.position.y - half_h < state.tracker.next_ground_height(&state.window, x, half_w);

    avatar.vertical_velocity -= tuning.gravity * dt;
    let prev_position = avatar.position;
    avatar.position.x += dt * avatar.horizontal_speed;
    avatar.position.y += dt * avatar.vertical_velocity;

    if !avatar.ground_contact && avatar.rotation_timer < tuning.jump_rotation_time {
        let t = (avatar.rotation_timer / tuning.jump_rotation_time * std::f32::consts::PI).sin();
        avatar.rotation = -t * std::f32::consts::PI * 0.05;
        avatar.rotation_timer += dt;
    } else {
        avatar.rotation = 0.0;
    }

    let x = avatar.position.x;
    if !state.tracker.in_active_column(&state.window, x, half_w) {
        avatar.ground_contact = false;
        return StepOutcome::Airborne;
    }

    let Some(active) = state.tracker.active_building(&state.window, x, half_w) else {
        avatar.ground_contact = false;
        return StepOutcome::Airborne;
    };
    if avatar.position.y - half_h >= active.ground_height {
        return StepOutcome::Airborne;
    }

    let landed_from_air = !avatar.ground_contact;
    avatar.ground_contact = true;
    avatar.rotation_timer = tuning.jump_rotation_time;
    if landed_from_air {
        let position = avatar.position;
        state.emit(GameEvent::Sound {
            effect: SoundEffect::Hit,
            position,
        });
    }

    if potential_fail || active.color != state.avatar.color {
        log::debug!(
            "Fail at x={:.2}: over_gap={}, avatar={:?}, building={:?}",
            state.avatar.position.x,
            potential_fail,
            state.avatar.color,
            active.color
        );
        state.avatar.position = prev_position;
        fail(state);
        // A held jump does not fire on a failing landing
        return StepOutcome::Failed;
    }

    let avatar = &mut state.avatar;
    avatar.jump_energy = 0.0;
    avatar.vertical_velocity = bounce_velocity(avatar.vertical_velocity, state.tuning.bounciness);
    avatar.position.y = active.ground_height + half_h;

    if jump_held && avatar.ready_for_next_jump {
        jump(state);
    }
    StepOutcome::Landed
}

/// Hand the avatar to host physics, throw it forward and shatter it
fn fail(state: &mut GameState) {
    super::tick::fade_to_menu(state);

    let tuning = &state.tuning;
    let avatar = &mut state.avatar;
    avatar.kinematic = false;
    // Velocity is left as is; the impulse is derived from it
    let impulse = Vec3::new(
        avatar.horizontal_speed * tuning.fail_impulse_scale.0,
        avatar.vertical_velocity * tuning.fail_impulse_scale.1,
        0.0,
    );
    let position = avatar.position;
    let color = avatar.color;
    let debris_count = tuning.debris_count;
    let spread = tuning.debris_spread;

    state.emit(GameEvent::AvatarKinematic(false));
    state.emit(GameEvent::AvatarImpulse(impulse));
    state.emit(GameEvent::Sound {
        effect: SoundEffect::Fail,
        position,
    });
    for _ in 0..debris_count {
        let offset = state.rng.on_unit_sphere() * spread;
        state.emit(GameEvent::SpawnDebris {
            position: position + offset,
            impulse,
            color,
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::consts::SIM_DT;
    use crate::sim::state::{Building, ElementColor, GamePhase};

    /// Drop the avatar onto the first building with a known velocity
    fn above_first_building(seed: u64) -> (GameState, Building) {
        let mut state = GameState::new(seed);
        let first = *state.window.get(0).unwrap();
        state.avatar.position = Vec3::new(first.center_x, first.ground_height + 0.5 + 0.01, 0.0);
        state.avatar.vertical_velocity = -10.0;
        state.avatar.horizontal_speed = 0.0;
        state.avatar.ground_contact = false;
        state.drain_events();
        (state, first)
    }

    #[test]
    fn test_bounce_velocity() {
        assert!((bounce_velocity(-10.0, 0.2) - 2.0).abs() < 1e-6);
        assert_eq!(bounce_velocity(3.0, 0.2), 3.0);
    }

    #[test]
    fn test_matching_color_bounces() {
        let (mut state, first) = above_first_building(11);
        state.avatar.color = first.color;
        state.tuning.max_avatar_speed = 0.0;

        let outcome = physics_step(&mut state, false, SIM_DT);
        assert_eq!(outcome, StepOutcome::Landed);
        assert_eq!(state.phase, GamePhase::Playing);
        assert!(state.avatar.ground_contact);
        assert_eq!(state.avatar.jump_energy, 0.0);
        assert!((state.avatar.position.y - (first.ground_height + 0.5)).abs() < 1e-5);

        let expected = (10.0 + state.tuning.gravity * SIM_DT) * state.tuning.bounciness;
        assert!((state.avatar.vertical_velocity - expected).abs() < 1e-4);

        let events = state.drain_events();
        assert!(events.iter().any(|e| matches!(e, GameEvent::Sound { effect: SoundEffect::Hit, .. })));
    }

    #[test]
    fn test_color_mismatch_fails() {
        let (mut state, first) = above_first_building(12);
        state.avatar.color = first.color.toggled();
        let before = state.avatar.position;

        let outcome = physics_step(&mut state, false, SIM_DT);
        assert_eq!(outcome, StepOutcome::Failed);
        assert_eq!(state.phase, GamePhase::FadeToMenu);
        assert!(!state.avatar.kinematic);
        // Rolled back to the pre-step position
        assert_eq!(state.avatar.position, before);

        let events = state.drain_events();
        let debris = events
            .iter()
            .filter(|e| matches!(e, GameEvent::SpawnDebris { .. }))
            .count();
        assert_eq!(debris, 30);
        assert!(events.iter().any(|e| matches!(e, GameEvent::Sound { effect: SoundEffect::Fail, .. })));
        assert!(events.contains(&GameEvent::OverlayEnabled(true)));
        assert!(events.iter().any(|e| matches!(e, GameEvent::AvatarImpulse(v) if v.y < 0.0)));
    }

    #[test]
    fn test_red_avatar_on_green_building_fails() {
        let (mut state, idx, green) = (1..)
            .find_map(|seed| {
                let state = GameState::new(seed);
                let found = state
                    .window
                    .iter()
                    .enumerate()
                    .find(|(_, b)| b.color == ElementColor::Green)
                    .map(|(i, b)| (i, *b));
                found.map(|(i, b)| (state, i, b))
            })
            .unwrap();
        // Put the cursor on the green building the way a run would get there
        state.tracker.active_building(&state.window, green.center_x, 0.5);
        assert_eq!(state.tracker.cursor(), idx);

        state.avatar.color = ElementColor::Red;
        state.avatar.position = Vec3::new(green.center_x, green.ground_height + 0.52, 0.0);
        state.avatar.vertical_velocity = -10.0;

        assert_eq!(physics_step(&mut state, false, SIM_DT), StepOutcome::Failed);
        assert_eq!(state.phase, GamePhase::FadeToMenu);
    }

    #[test]
    fn test_gap_landing_fails_even_with_matching_color() {
        let mut state = GameState::new(21);
        let first = *state.window.get(0).unwrap();
        let second = *state.window.get(1).unwrap();

        // Hovering over the gap, already below the second roof, moving into it
        state.avatar.position = Vec3::new(first.right() + 0.55, second.ground_height - 0.2, 0.0);
        state.avatar.horizontal_speed = 10.0;
        state.avatar.vertical_velocity = 0.0;
        state.avatar.color = second.color;
        state.tracker.active_building(&state.window, state.avatar.position.x, 0.5);

        let mut outcome = StepOutcome::Airborne;
        for _ in 0..200 {
            outcome = physics_step(&mut state, false, SIM_DT);
            if outcome != StepOutcome::Airborne {
                break;
            }
        }
        assert_eq!(outcome, StepOutcome::Failed);
        assert_eq!(state.phase, GamePhase::FadeToMenu);
    }

    #[test]
    fn test_jump_sets_energy_and_impulse() {
        let mut state = GameState::new(3);
        state.avatar.vertical_velocity = 0.0;
        state.avatar.ground_contact = true;
        state.drain_events();

        jump(&mut state);
        assert_eq!(state.avatar.jump_energy, state.tuning.starting_jump_energy);
        assert_eq!(state.avatar.vertical_velocity, state.tuning.min_jump_impulse);
        assert!(!state.avatar.ground_contact);
        assert!(!state.avatar.ready_for_next_jump);
        assert_eq!(state.avatar.rotation_timer, 0.0);
        assert!(matches!(
            state.drain_events().as_slice(),
            [GameEvent::Sound { effect: SoundEffect::Jump, .. }]
        ));
    }

    #[test]
    fn test_held_jump_drains_energy() {
        let mut state = GameState::new(4);
        state.avatar.position.y = 50.0;
        jump(&mut state);
        let v0 = state.avatar.vertical_velocity;
        physics_step(&mut state, true, SIM_DT);

        let t = &state.tuning;
        let expected_energy = t.starting_jump_energy - t.jump_energy_depletion_rate * SIM_DT;
        assert!((state.avatar.jump_energy - expected_energy).abs() < 1e-6);
        let expected_v =
            v0 + t.starting_jump_energy * t.jump_energy_efficiency * SIM_DT - t.gravity * SIM_DT;
        assert!((state.avatar.vertical_velocity - expected_v).abs() < 1e-4);
    }

    #[test]
    fn test_tilt_follows_jump_arc() {
        let mut state = GameState::new(4);
        state.avatar.position.y = 50.0;
        state.avatar.ground_contact = false;
        state.avatar.rotation_timer = 0.2;
        physics_step(&mut state, false, SIM_DT);

        let expected = -(0.5 * std::f32::consts::PI).sin() * std::f32::consts::PI * 0.05;
        assert!((state.avatar.rotation - expected).abs() < 1e-5);
        assert!((state.avatar.rotation_timer - (0.2 + SIM_DT)).abs() < 1e-6);
    }

    #[test]
    fn test_level_after_tilt_window() {
        let mut state = GameState::new(4);
        state.avatar.position.y = 50.0;
        state.avatar.ground_contact = false;
        state.avatar.rotation = -0.1;
        state.avatar.rotation_timer = state.tuning.jump_rotation_time;
        physics_step(&mut state, false, SIM_DT);
        assert_eq!(state.avatar.rotation, 0.0);
    }

    #[test]
    fn test_level_once_grounded() {
        let (mut state, first) = above_first_building(11);
        state.avatar.color = first.color;
        state.avatar.rotation_timer = 0.0;
        assert_eq!(physics_step(&mut state, false, SIM_DT), StepOutcome::Landed);
        assert_eq!(state.avatar.rotation_timer, state.tuning.jump_rotation_time);

        physics_step(&mut state, false, SIM_DT);
        assert!(state.avatar.ground_contact);
        assert_eq!(state.avatar.rotation, 0.0);
    }

    #[test]
    fn test_speed_ramps_to_cap() {
        let mut state = GameState::new(5);
        state.avatar.position.y = 1.0e4;
        state.avatar.horizontal_speed = state.tuning.max_avatar_speed - 0.0001;
        physics_step(&mut state, false, SIM_DT);
        assert_eq!(state.avatar.horizontal_speed, state.tuning.max_avatar_speed);
    }

    #[test]
    fn test_bounce_jump_chains() {
        let (mut state, first) = above_first_building(8);
        state.avatar.color = first.color;
        state.avatar.ready_for_next_jump = true;

        assert_eq!(physics_step(&mut state, true, SIM_DT), StepOutcome::Landed);
        assert!(!state.avatar.ground_contact);
        assert!(!state.avatar.ready_for_next_jump);
        assert_eq!(state.avatar.jump_energy, state.tuning.starting_jump_energy);
    }

    #[test]
    fn test_no_jump_after_fail() {
        let (mut state, first) = above_first_building(9);
        state.avatar.color = first.color.toggled();
        state.avatar.ready_for_next_jump = true;

        assert_eq!(physics_step(&mut state, true, SIM_DT), StepOutcome::Failed);
        assert!(state.avatar.ready_for_next_jump);
    }
}
