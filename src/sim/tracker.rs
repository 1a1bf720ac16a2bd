//! Which building is the avatar over?
//!
//! A forward-only cursor into the old+active [`BlockWindow`]. The cursor
//! moves to the next building as soon as the avatar's right edge passes that
//! building's left edge, so the "active" building is the last one the
//! avatar has reached, even while it is still above the gap in front of it.

use serde::{Deserialize, Serialize};

use super::generator::BlockWindow;
use super::state::{Building, ElementColor};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActiveBuildingTracker {
    cursor: usize,
}

impl ActiveBuildingTracker {
    pub fn cursor(&self) -> usize {
        self.cursor
    }

    /// Shift the cursor after the old generation (`old_count` buildings)
    /// was discarded from the front of the window
    pub fn rebase(&mut self, old_count: usize) {
        self.cursor = self.cursor.saturating_sub(old_count);
    }

    pub fn reset(&mut self) {
        self.cursor = 0;
    }

    /// Advance past every building the avatar has reached and return the
    /// building at the cursor
    pub fn active_building(
        &mut self,
        window: &BlockWindow,
        avatar_x: f32,
        half_width: f32,
    ) -> Option<Building> {
        let leading = avatar_x + half_width;
        while let Some(next) = window.get(self.cursor + 1) {
            if leading > next.left() {
                self.cursor += 1;
            } else {
                break;
            }
        }
        window.get(self.cursor).copied()
    }

    /// First building after the cursor whose left edge the avatar has not
    /// reached yet. Falls back to the last building in the window.
    pub fn next_building(
        &self,
        window: &BlockWindow,
        avatar_x: f32,
        half_width: f32,
    ) -> Option<Building> {
        let leading = avatar_x + half_width;
        let mut idx = self.cursor + 1;
        while let Some(next) = window.get(idx) {
            if leading > next.left() && idx + 1 < window.len() {
                idx += 1;
            } else {
                return Some(*next);
            }
        }
        window.get(window.len().checked_sub(1)?).copied()
    }

    /// The avatar still overlaps the active building's footprint
    pub fn in_active_column(&mut self, window: &BlockWindow, avatar_x: f32, half_width: f32) -> bool {
        match self.active_building(window, avatar_x, half_width) {
            Some(active) => avatar_x - half_width < active.right(),
            None => false,
        }
    }

    /// Roof height of the active building (`-inf` over an empty window)
    pub fn active_ground_height(&mut self, window: &BlockWindow, avatar_x: f32, half_width: f32) -> f32 {
        self.active_building(window, avatar_x, half_width)
            .map_or(f32::NEG_INFINITY, |b| b.ground_height)
    }

    /// Roof height of the next building ahead (`-inf` over an empty window)
    pub fn next_ground_height(&self, window: &BlockWindow, avatar_x: f32, half_width: f32) -> f32 {
        self.next_building(window, avatar_x, half_width)
            .map_or(f32::NEG_INFINITY, |b| b.ground_height)
    }

    pub fn active_color(
        &mut self,
        window: &BlockWindow,
        avatar_x: f32,
        half_width: f32,
    ) -> Option<ElementColor> {
        self.active_building(window, avatar_x, half_width)
            .map(|b| b.color)
    }
}
