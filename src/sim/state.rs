//! Game state and core simulation types
//!
//! Everything the simulation mutates lives in [`GameState`]; hosts read it
//! for rendering and drain [`GameEvent`]s for side effects.

use glam::Vec3;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::generator::BlockWindow;
use super::rng;
use super::tracker::ActiveBuildingTracker;
use crate::audio::SoundEffect;
use crate::scores::ScoreBoard;
use crate::tuning::Tuning;

/// Color shared by buildings and the avatar
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum ElementColor {
    #[default]
    Red,
    Green,
}

impl ElementColor {
    pub fn toggled(self) -> Self {
        match self {
            ElementColor::Red => ElementColor::Green,
            ElementColor::Green => ElementColor::Red,
        }
    }
}

/// A building the avatar can land on
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Building {
    pub id: u32,
    /// Horizontal center
    pub center_x: f32,
    pub width: f32,
    /// Roof height (the avatar's resting y-bottom)
    pub ground_height: f32,
    pub color: ElementColor,
}

impl Building {
    pub fn left(&self) -> f32 {
        self.center_x - self.width * 0.5
    }

    pub fn right(&self) -> f32 {
        self.center_x + self.width * 0.5
    }
}

/// Difficulty parameters, ramped once per generated block
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DifficultyState {
    pub min_building_width: f32,
    pub max_building_width: f32,
    pub min_gap_width: f32,
    pub max_gap_width: f32,
    /// Largest random roof step between neighbouring buildings
    pub max_ground_delta: f32,
    pub last_ground_height: f32,
    /// Blocks generated so far this run
    pub block_index: u32,
}

impl Default for DifficultyState {
    fn default() -> Self {
        Self {
            min_building_width: 18.0,
            max_building_width: 20.0,
            min_gap_width: 1.4,
            max_gap_width: 1.6,
            max_ground_delta: 0.5,
            last_ground_height: 0.0,
            block_index: 0,
        }
    }
}

/// One generation of gap+building segments
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Block {
    /// Value of `block_index` when this block was generated
    pub index: u32,
    /// Left edge (start of the first gap)
    pub offset: f32,
    pub width: f32,
    pub building_count: usize,
    /// Width of the first building, used for the scroll-ahead trigger
    pub first_building_width: Option<f32>,
    /// Difficulty the block was generated with
    pub params: DifficultyState,
}

impl Block {
    /// Empty block at the origin (before the first generation)
    pub fn empty(params: DifficultyState) -> Self {
        Self {
            index: 0,
            offset: 0.0,
            width: 0.0,
            building_count: 0,
            first_building_width: None,
            params,
        }
    }
}

/// The player's avatar
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AvatarState {
    pub position: Vec3,
    pub vertical_velocity: f32,
    pub horizontal_speed: f32,
    pub color: ElementColor,
    pub jump_energy: f32,
    pub ground_contact: bool,
    pub rotation_timer: f32,
    /// Tilt around z during the jump arc
    pub rotation: f32,
    /// Cleared by a jump, re-armed on jump release
    pub ready_for_next_jump: bool,
    /// Kinematic avatars are driven by the simulation; after a fail the host
    /// physics owns the body until the menu locks it again
    pub kinematic: bool,
}

impl AvatarState {
    pub fn new(tuning: &Tuning, color: ElementColor) -> Self {
        Self {
            position: Vec3::new(tuning.avatar_start.0, tuning.avatar_start.1, 0.0),
            vertical_velocity: 0.0,
            horizontal_speed: tuning.start_avatar_speed,
            color,
            jump_energy: tuning.starting_jump_energy,
            ground_contact: false,
            rotation_timer: 0.0,
            rotation: 0.0,
            ready_for_next_jump: true,
            kinematic: true,
        }
    }

    /// Y of the avatar's bottom edge
    pub fn bottom(&self, tuning: &Tuning) -> f32 {
        self.position.y - tuning.avatar_half_extents().1
    }
}

/// Current phase of gameplay
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GamePhase {
    /// Active run
    Playing,
    /// Run failed, overlay fading in
    FadeToMenu,
    /// Waiting for any key to restart
    Menu,
}

/// Side effects for the host (scene, audio, UI)
#[derive(Debug, Clone, PartialEq)]
pub enum GameEvent {
    SpawnBuilding {
        id: u32,
        position: Vec3,
        size: Vec3,
        color: ElementColor,
    },
    DestroyBuilding {
        id: u32,
    },
    SpawnDebris {
        position: Vec3,
        impulse: Vec3,
        color: ElementColor,
    },
    SetBackgroundSpan {
        offset: f32,
        width: f32,
    },
    SetCameraPosition(Vec3),
    AvatarColorChanged(ElementColor),
    AvatarKinematic(bool),
    AvatarImpulse(Vec3),
    Sound {
        effect: SoundEffect,
        position: Vec3,
    },
    DistanceChanged(u32),
    HighScoreChanged(u32),
    OverlayColor([f32; 4]),
    OverlayEnabled(bool),
}

/// Complete simulation state
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GameState {
    /// Run seed
    pub seed: u64,
    pub rng: Pcg32,
    pub tuning: Tuning,
    pub phase: GamePhase,
    /// Seconds spent in FadeToMenu
    pub fade_timer: f32,
    pub difficulty: DifficultyState,
    /// Old and active generations of buildings
    pub window: BlockWindow,
    pub tracker: ActiveBuildingTracker,
    pub avatar: AvatarState,
    pub scores: ScoreBoard,
    pub camera: Vec3,
    pub overlay_enabled: bool,
    /// Unconsumed fixed-step time
    pub accumulator: f32,
    /// Pending host side effects
    #[serde(skip)]
    pub events: Vec<GameEvent>,
    next_id: u32,
}

impl GameState {
    /// New run with default tuning
    pub fn new(seed: u64) -> Self {
        Self::with_tuning(seed, Tuning::default())
    }

    pub fn with_tuning(seed: u64, tuning: Tuning) -> Self {
        let difficulty = tuning.initial_difficulty;
        let mut state = Self {
            seed,
            rng: rng::seeded(seed),
            avatar: AvatarState::new(&tuning, ElementColor::Red),
            camera: Vec3::new(tuning.camera_start.0, tuning.camera_start.1, tuning.camera_start.2),
            window: BlockWindow::new(difficulty),
            tuning,
            phase: GamePhase::Playing,
            fade_timer: 0.0,
            difficulty,
            tracker: ActiveBuildingTracker::default(),
            scores: ScoreBoard::new(),
            overlay_enabled: false,
            accumulator: 0.0,
            events: Vec::new(),
            next_id: 1,
        };
        super::tick::reset(&mut state);
        state
    }

    /// Allocate a new entity ID
    pub fn next_entity_id(&mut self) -> u32 {
        let id = self.next_id;
        self.next_id += 1;
        id
    }

    pub fn emit(&mut self, event: GameEvent) {
        self.events.push(event);
    }

    /// Take all pending events
    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }
}
