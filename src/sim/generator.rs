//! Procedural block generation
//!
//! A block is a run of gap/building pairs at least `min_block_width` wide.
//! Only two generations are kept: the block the avatar is leaving ("old")
//! and the newest one ("active"). Creating a block discards the old one.

use std::collections::VecDeque;

use glam::Vec3;
use serde::{Deserialize, Serialize};

use super::rng::RandomSource;
use super::state::{Block, Building, DifficultyState, ElementColor, GameEvent, GameState};
use crate::tuning::Tuning;

/// Old generation followed by the active generation, addressable by index
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BlockWindow {
    buildings: VecDeque<Building>,
    old_count: usize,
    old_block: Option<Block>,
    active_block: Block,
}

impl BlockWindow {
    pub fn new(params: DifficultyState) -> Self {
        Self {
            buildings: VecDeque::new(),
            old_count: 0,
            old_block: None,
            active_block: Block::empty(params),
        }
    }

    pub fn len(&self) -> usize {
        self.buildings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.buildings.is_empty()
    }

    /// Building at a logical index (old buildings first)
    pub fn get(&self, idx: usize) -> Option<&Building> {
        self.buildings.get(idx)
    }

    pub fn old_count(&self) -> usize {
        self.old_count
    }

    pub fn active_count(&self) -> usize {
        self.buildings.len() - self.old_count
    }

    pub fn old_buildings(&self) -> impl Iterator<Item = &Building> {
        self.buildings.iter().take(self.old_count)
    }

    pub fn active_buildings(&self) -> impl Iterator<Item = &Building> {
        self.buildings.iter().skip(self.old_count)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Building> {
        self.buildings.iter()
    }

    pub fn active_block(&self) -> &Block {
        &self.active_block
    }

    pub fn old_block(&self) -> Option<&Block> {
        self.old_block.as_ref()
    }

    /// Drop the old generation and demote the active one.
    /// Returns the discarded buildings.
    fn recycle(&mut self) -> Vec<Building> {
        let dropped: Vec<Building> = self.buildings.drain(..self.old_count).collect();
        self.old_count = self.buildings.len();
        self.old_block = Some(self.active_block);
        dropped
    }

    fn push_active(&mut self, building: Building) {
        self.buildings.push_back(building);
    }

    fn set_active_block(&mut self, block: Block) {
        self.active_block = block;
    }
}

/// A building produced by [`layout_block`], before it gets an id
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BuildingSpec {
    pub left: f32,
    pub width: f32,
    pub ground_height: f32,
    pub color: ElementColor,
}

/// Result of laying out one block
#[derive(Debug, Clone, PartialEq)]
pub struct BlockLayout {
    pub width: f32,
    pub buildings: Vec<BuildingSpec>,
    /// Building cap was hit before the target width
    pub truncated: bool,
}

/// Roof height for the next building plus an optional forced width
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GroundStep {
    pub ground_height: f32,
    pub width_override: Option<f32>,
}

/// Move each difficulty axis one step toward its hardest bound
pub fn ramp_difficulty(d: &mut DifficultyState, tuning: &Tuning) {
    if d.min_building_width > tuning.hardest_min_building_width {
        d.min_building_width = (d.min_building_width - tuning.building_width_step)
            .max(tuning.hardest_min_building_width);
    }
    if d.max_building_width > tuning.hardest_max_building_width {
        d.max_building_width = (d.max_building_width - tuning.building_width_step)
            .max(tuning.hardest_max_building_width);
    }
    if d.max_gap_width < tuning.hardest_max_gap_width {
        d.max_gap_width = (d.max_gap_width + tuning.gap_width_step).min(tuning.hardest_max_gap_width);
    }
    if d.max_ground_delta < tuning.hardest_max_ground_delta {
        d.max_ground_delta =
            (d.max_ground_delta + tuning.ground_delta_step).min(tuning.hardest_max_ground_delta);
    }
}

/// Roof height policy, keyed by the block counter.
///
/// Every 4th block rises gently on narrow buildings, two blocks later (after
/// the opening stretch) it steps down on wide ones, everything else wanders
/// randomly within `max_ground_delta`. The result is clamped to the ground
/// bounds.
pub fn next_ground_height<R: RandomSource + ?Sized>(
    d: &DifficultyState,
    tuning: &Tuning,
    rng: &mut R,
) -> GroundStep {
    let (height, width_override) = if d.block_index % 4 == 0 {
        (
            d.last_ground_height + d.max_ground_delta * 0.3,
            Some(d.min_building_width * 1.2),
        )
    } else if d.block_index % 4 == 2 && d.block_index > 4 {
        (
            d.last_ground_height - d.max_ground_delta * 0.2,
            Some(d.min_building_width * 1.7),
        )
    } else {
        let delta = rng.uniform(-d.max_ground_delta, d.max_ground_delta);
        (d.last_ground_height + delta, None)
    };

    GroundStep {
        ground_height: height.clamp(tuning.min_ground_height, tuning.max_ground_height),
        width_override,
    }
}

/// Lay out one block starting at `offset`: gap, building, gap, building...
/// until the target width is reached on a building boundary.
pub fn layout_block<R: RandomSource + ?Sized>(
    d: &mut DifficultyState,
    tuning: &Tuning,
    offset: f32,
    rng: &mut R,
) -> BlockLayout {
    let mut cursor = offset;
    let mut width = 0.0;
    let mut buildings = Vec::new();
    let mut truncated = false;
    let mut creating_gap = true;

    while width < tuning.min_block_width || !creating_gap {
        if creating_gap {
            let gap = rng.uniform(d.min_gap_width, d.max_gap_width);
            cursor += gap;
            width += gap;
        } else {
            if buildings.len() >= tuning.max_block_buildings {
                truncated = true;
                break;
            }

            let random_width = rng.uniform(d.min_building_width, d.max_building_width);
            let step = next_ground_height(d, tuning, rng);
            d.last_ground_height = step.ground_height;
            let building_width = step.width_override.unwrap_or(random_width);
            let color = if rng.uniform_int(0, 2) == 0 {
                ElementColor::Red
            } else {
                ElementColor::Green
            };

            buildings.push(BuildingSpec {
                left: cursor,
                width: building_width,
                ground_height: step.ground_height,
                color,
            });
            cursor += building_width;
            width += building_width;
        }
        creating_gap = !creating_gap;
    }

    BlockLayout {
        width,
        buildings,
        truncated,
    }
}

/// Generate the next block, recycling the old generation
pub fn create_new_block(state: &mut GameState) {
    // Keep the cursor pointing at the same building once the old
    // generation is gone
    state.tracker.rebase(state.window.old_count());

    for building in state.window.recycle() {
        state.emit(GameEvent::DestroyBuilding { id: building.id });
    }

    ramp_difficulty(&mut state.difficulty, &state.tuning);
    let params = state.difficulty;

    let previous = *state.window.active_block();
    let offset = previous.offset + previous.width;
    let layout = layout_block(&mut state.difficulty, &state.tuning, offset, &mut state.rng);

    if layout.truncated {
        log::warn!(
            "Block {} hit the {} building cap at width {:.1}",
            params.block_index,
            state.tuning.max_block_buildings,
            layout.width
        );
    }

    let depth = state.tuning.building_depth;
    let thickness = state.tuning.building_thickness;
    for spec in &layout.buildings {
        let building = Building {
            id: state.next_entity_id(),
            center_x: spec.left + spec.width * 0.5,
            width: spec.width,
            ground_height: spec.ground_height,
            color: spec.color,
        };
        state.emit(GameEvent::SpawnBuilding {
            id: building.id,
            position: Vec3::new(building.center_x, building.ground_height - depth * 0.5, 0.0),
            size: Vec3::new(building.width, depth, thickness),
            color: building.color,
        });
        state.window.push_active(building);
    }

    state.window.set_active_block(Block {
        index: params.block_index,
        offset,
        width: layout.width,
        building_count: layout.buildings.len(),
        first_building_width: layout.buildings.first().map(|b| b.width),
        params,
    });
    state.emit(GameEvent::SetBackgroundSpan {
        offset,
        width: layout.width,
    });

    log::info!(
        "Block {}: offset={:.1}, width={:.1}, buildings={}, widths={:.1}-{:.1}, gaps<={:.1}",
        params.block_index,
        offset,
        layout.width,
        layout.buildings.len(),
        params.min_building_width,
        params.max_building_width,
        params.max_gap_width
    );

    state.difficulty.block_index += 1;
}
