//! Shared crate-wide constants.

/// Horizontal offset between the default placements of consecutively
/// initialized panels.
pub const TILE_OFFSET_X: i32 = 20;

/// Vertical offset between the default placements of consecutively
/// initialized panels.
pub const TILE_OFFSET_Y: i32 = 20;

/// Left offset added to every default placement before tiling.
pub const BASE_LEFT: i32 = 200;

/// First value handed out by the stacking counter.
pub const INITIAL_STACKING: u32 = 100;

/// Focus order assigned to a drag handle that has none.
pub const DEFAULT_FOCUS_ORDER: i32 = 0;

/// Keyboard move step with no modifier held.
pub const STEP_NORMAL: i32 = 10;

/// Keyboard move step with Shift held.
pub const STEP_COARSE: i32 = 100;

/// Keyboard move step with Ctrl held (wins over Shift).
pub const STEP_FINE: i32 = 1;
