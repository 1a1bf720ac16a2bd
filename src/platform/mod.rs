//! Platform abstraction layer
//!
//! The simulation never talks to an engine directly. Hosts implement the
//! collaborator traits below and feed drained [`GameEvent`]s through an
//! [`EventDispatcher`], which keeps the mapping from building ids to host
//! handles and picks sound clips.

use std::collections::HashMap;

use glam::Vec3;
use rand_pcg::Pcg32;

use crate::audio::SoundBank;
use crate::scores::ScoreBoard;
use crate::sim::rng;
use crate::sim::{ElementColor, GameEvent};

/// Scene graph / renderer side
pub trait SceneHost {
    /// Host-side reference to a spawned building
    type Handle;

    fn spawn_building(&mut self, position: Vec3, size: Vec3, color: ElementColor) -> Self::Handle;
    fn destroy_building(&mut self, handle: Self::Handle);
    fn spawn_debris(&mut self, position: Vec3, impulse: Vec3, color: ElementColor);
    fn set_background_span(&mut self, offset: f32, width: f32);
    fn set_camera_position(&mut self, position: Vec3);
    fn set_avatar_color(&mut self, color: ElementColor);
    fn set_avatar_kinematic(&mut self, kinematic: bool);
    fn apply_avatar_impulse(&mut self, impulse: Vec3);
}

/// Sound playback
pub trait AudioHost {
    fn play_sound(&mut self, clip: &str, position: Vec3);
}

/// HUD labels and the fullscreen overlay
pub trait UiHost {
    fn set_distance_text(&mut self, text: &str);
    fn set_highscore_text(&mut self, text: &str);
    fn set_overlay_color(&mut self, rgba: [f32; 4]);
    fn set_overlay_enabled(&mut self, enabled: bool);
}

/// Routes simulation events to host collaborators
pub struct EventDispatcher<H> {
    handles: HashMap<u32, H>,
    sounds: SoundBank,
    /// Separate stream so clip choice never perturbs the simulation
    rng: Pcg32,
}

impl<H> EventDispatcher<H> {
    pub fn new(sounds: SoundBank, seed: u64) -> Self {
        Self {
            handles: HashMap::new(),
            sounds,
            rng: rng::seeded(seed),
        }
    }

    /// Buildings currently alive on the host
    pub fn live_buildings(&self) -> usize {
        self.handles.len()
    }

    pub fn dispatch<S, A, U>(
        &mut self,
        events: impl IntoIterator<Item = GameEvent>,
        scene: &mut S,
        audio: &mut A,
        ui: &mut U,
    ) where
        S: SceneHost<Handle = H>,
        A: AudioHost,
        U: UiHost,
    {
        for event in events {
            match event {
                GameEvent::SpawnBuilding {
                    id,
                    position,
                    size,
                    color,
                } => {
                    let handle = scene.spawn_building(position, size, color);
                    self.handles.insert(id, handle);
                }
                GameEvent::DestroyBuilding { id } => match self.handles.remove(&id) {
                    Some(handle) => scene.destroy_building(handle),
                    None => log::warn!("Destroy for unknown building {id}"),
                },
                GameEvent::SpawnDebris {
                    position,
                    impulse,
                    color,
                } => scene.spawn_debris(position, impulse, color),
                GameEvent::SetBackgroundSpan { offset, width } => {
                    scene.set_background_span(offset, width)
                }
                GameEvent::SetCameraPosition(position) => scene.set_camera_position(position),
                GameEvent::AvatarColorChanged(color) => scene.set_avatar_color(color),
                GameEvent::AvatarKinematic(kinematic) => scene.set_avatar_kinematic(kinematic),
                GameEvent::AvatarImpulse(impulse) => scene.apply_avatar_impulse(impulse),
                GameEvent::Sound { effect, position } => {
                    if let Some(clip) = self.sounds.pick(effect, &mut self.rng) {
                        audio.play_sound(clip, position);
                    }
                }
                GameEvent::DistanceChanged(distance) => ui.set_distance_text(&distance.to_string()),
                GameEvent::HighScoreChanged(score) => {
                    ui.set_highscore_text(&ScoreBoard::high_score_text(score))
                }
                GameEvent::OverlayColor(rgba) => ui.set_overlay_color(rgba),
                GameEvent::OverlayEnabled(enabled) => ui.set_overlay_enabled(enabled),
            }
        }
    }
}
