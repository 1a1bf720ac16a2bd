//! Chroma Runner headless demo
//!
//! Runs the simulation with the autopilot at 60 fps and logs what a real
//! host would render. Usage: `chroma-runner [tuning.json] [runs] [seed]`.
//! Set `RUST_LOG=debug` to see every host call.

use glam::Vec3;

use chroma_runner::Tuning;
use chroma_runner::audio::SoundBank;
use chroma_runner::autopilot::Autopilot;
use chroma_runner::platform::{AudioHost, EventDispatcher, SceneHost, UiHost};
use chroma_runner::sim::{ElementColor, GamePhase, GameState, advance};

const FRAME_DT: f32 = 1.0 / 60.0;
/// Give up on a run after this many frames (10 minutes)
const MAX_RUN_FRAMES: u32 = 60 * 60 * 10;

/// Scene that logs instead of drawing
#[derive(Default)]
struct LogHost {
    next_handle: u32,
    debris: u32,
}

impl SceneHost for LogHost {
    type Handle = u32;

    fn spawn_building(&mut self, position: Vec3, size: Vec3, color: ElementColor) -> u32 {
        self.next_handle += 1;
        log::debug!("spawn #{} {color:?} at {position} size {size}", self.next_handle);
        self.next_handle
    }

    fn destroy_building(&mut self, handle: u32) {
        log::debug!("destroy #{handle}");
    }

    fn spawn_debris(&mut self, _position: Vec3, _impulse: Vec3, _color: ElementColor) {
        self.debris += 1;
    }

    fn set_background_span(&mut self, offset: f32, width: f32) {
        log::debug!("background {offset:.1}..{:.1}", offset + width);
    }

    fn set_camera_position(&mut self, _position: Vec3) {}

    fn set_avatar_color(&mut self, color: ElementColor) {
        log::debug!("avatar {color:?}");
    }

    fn set_avatar_kinematic(&mut self, kinematic: bool) {
        log::debug!("avatar kinematic={kinematic}");
    }

    fn apply_avatar_impulse(&mut self, impulse: Vec3) {
        log::debug!("avatar impulse {impulse}");
    }
}

struct LogAudio;

impl AudioHost for LogAudio {
    fn play_sound(&mut self, clip: &str, position: Vec3) {
        log::debug!("sound {clip} at {position}");
    }
}

struct LogUi;

impl UiHost for LogUi {
    fn set_distance_text(&mut self, _text: &str) {}

    fn set_highscore_text(&mut self, text: &str) {
        log::debug!("{text}");
    }

    fn set_overlay_color(&mut self, _rgba: [f32; 4]) {}

    fn set_overlay_enabled(&mut self, enabled: bool) {
        log::debug!("overlay {enabled}");
    }
}

fn load_tuning(path: Option<&str>) -> Tuning {
    let Some(path) = path else {
        return Tuning::default();
    };
    match std::fs::read_to_string(path) {
        Ok(json) => Tuning::load_or_default(&json),
        Err(e) => {
            log::warn!("Could not read {path}: {e}, using defaults");
            Tuning::default()
        }
    }
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let args: Vec<String> = std::env::args().skip(1).collect();
    let tuning = load_tuning(args.first().map(String::as_str));
    let runs: u32 = args.get(1).and_then(|s| s.parse().ok()).unwrap_or(3);
    let seed: u64 = args.get(2).and_then(|s| s.parse().ok()).unwrap_or(0x5EED);

    let sounds = SoundBank {
        jump: vec!["jump1".into(), "jump2".into(), "jump3".into()],
        hit: vec!["hit1".into(), "hit2".into()],
        fail: vec!["fail".into()],
    };
    let mut scene = LogHost::default();
    let mut dispatcher = EventDispatcher::new(sounds, seed ^ 0xA0D10);
    let mut state = GameState::with_tuning(seed, tuning);
    let mut pilot = Autopilot::new(true);

    for run in 1..=runs {
        let mut frames = 0;
        while state.phase == GamePhase::Playing && frames < MAX_RUN_FRAMES {
            let input = pilot.decide(&state);
            advance(&mut state, &input, FRAME_DT);
            dispatcher.dispatch(state.drain_events(), &mut scene, &mut LogAudio, &mut LogUi);
            frames += 1;
        }

        log::info!(
            "Run {run}/{runs}: distance {} in {:.1}s, {} blocks, high score {}",
            state.scores.current_run_distance,
            frames as f32 * FRAME_DT,
            state.difficulty.block_index,
            state.scores.high_score
        );

        // Let the fade play out, then restart from the menu
        while state.phase != GamePhase::Playing {
            let input = pilot.decide(&state);
            advance(&mut state, &input, FRAME_DT);
            dispatcher.dispatch(state.drain_events(), &mut scene, &mut LogAudio, &mut LogUi);
        }
    }

    log::info!(
        "Done: high score {}, {} debris spawned, {} buildings alive",
        state.scores.high_score,
        scene.debris,
        dispatcher.live_buildings()
    );
}
