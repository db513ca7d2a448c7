//! Tunable placement, stacking and keyboard step values.

use crate::constants::{
    BASE_LEFT, DEFAULT_FOCUS_ORDER, INITIAL_STACKING, STEP_COARSE, STEP_FINE, STEP_NORMAL,
    TILE_OFFSET_X, TILE_OFFSET_Y,
};
use crate::host::Position;
use crate::input::Modifiers;

/// Distances a keyboard move covers for each modifier combination.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StepSizes {
    pub normal: i32,
    pub coarse: i32,
    pub fine: i32,
}

impl Default for StepSizes {
    fn default() -> Self {
        Self {
            normal: STEP_NORMAL,
            coarse: STEP_COARSE,
            fine: STEP_FINE,
        }
    }
}

impl StepSizes {
    /// Ctrl selects the fine step even when Shift is also held.
    pub fn for_modifiers(&self, modifiers: Modifiers) -> i32 {
        if modifiers.ctrl {
            self.fine
        } else if modifiers.shift {
            self.coarse
        } else {
            self.normal
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PanelSettings {
    pub tile_offset_x: i32,
    pub tile_offset_y: i32,
    pub base_left: i32,
    pub initial_stacking: u32,
    pub default_focus_order: i32,
    pub steps: StepSizes,
}

impl Default for PanelSettings {
    fn default() -> Self {
        Self {
            tile_offset_x: TILE_OFFSET_X,
            tile_offset_y: TILE_OFFSET_Y,
            base_left: BASE_LEFT,
            initial_stacking: INITIAL_STACKING,
            default_focus_order: DEFAULT_FOCUS_ORDER,
            steps: StepSizes::default(),
        }
    }
}

impl PanelSettings {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_tile_offset(mut self, x: i32, y: i32) -> Self {
        self.tile_offset_x = x;
        self.tile_offset_y = y;
        self
    }

    pub fn with_base_left(mut self, base_left: i32) -> Self {
        self.base_left = base_left;
        self
    }

    pub fn with_initial_stacking(mut self, value: u32) -> Self {
        self.initial_stacking = value;
        self
    }

    pub fn with_default_focus_order(mut self, order: i32) -> Self {
        self.default_focus_order = order;
        self
    }

    pub fn with_steps(mut self, steps: StepSizes) -> Self {
        self.steps = steps;
        self
    }

    /// Default placement of the `ordinal`-th initialized panel (1-based).
    pub fn tiled_position(&self, ordinal: u32) -> Position {
        let n = i32::try_from(ordinal).unwrap_or(i32::MAX);
        Position {
            top: self.tile_offset_y.saturating_mul(n),
            left: self
                .base_left
                .saturating_add(self.tile_offset_x.saturating_mul(n)),
        }
    }
}
