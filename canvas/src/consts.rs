//! Shared numeric constants for the canvas crate.

// ── Viewport ────────────────────────────────────────────────────

/// Smallest allowed zoom factor.
pub const MIN_ZOOM: f64 = 0.1;

/// Largest allowed zoom factor.
pub const MAX_ZOOM: f64 = 5.0;

/// Relative zoom change applied per wheel notch.
pub const ZOOM_STEP: f64 = 0.03;

// ── Grid ────────────────────────────────────────────────────────

/// Grid pitch in world units. Committed drag positions land on this grid.
pub const GRID_SIZE: f64 = 40.0;

/// Maximum world distance between a note edge and a grid line for a guide to show.
pub const SNAP_THRESHOLD: f64 = 10.0;

/// Coarse grid lines are drawn every this many fine cells.
pub const COARSE_GRID_FACTOR: f64 = 5.0;

/// Extra-coarse grid lines are drawn every this many fine cells.
pub const EXTRA_COARSE_GRID_FACTOR: f64 = 25.0;

/// The extra-coarse grid only appears below this zoom.
pub const EXTRA_COARSE_ZOOM: f64 = 0.5;

/// Grid layers whose on-screen spacing falls below this are skipped.
pub const MIN_GRID_SPACING_PX: f64 = 4.0;

// ── Hit-testing ─────────────────────────────────────────────────

/// Screen-space hit slop in pixels for resize handles.
pub const HANDLE_RADIUS_PX: f64 = 8.0;

// ── Notes ───────────────────────────────────────────────────────

/// Content given to new notes and restored when an edit leaves a note blank.
pub const DEFAULT_NOTE_CONTENT: &str = "New Note";

/// Emoji given to notes created from the board.
pub const DEFAULT_NOTE_EMOJI: &str = "📝";

/// Width and height of a freshly created note, in world units.
pub const DEFAULT_NOTE_SIZE: f64 = 300.0;

/// Background colour for notes created without an explicit colour.
pub const DEFAULT_NOTE_COLOR: &str = "#fef3c7";

/// Colours offered by the add-note palette: yellow, pink, green, blue, purple, orange.
pub const NOTE_PALETTE: [&str; 6] = ["#fef3c7", "#fee2e2", "#dcfce7", "#dbeafe", "#f5d0fe", "#ffedd5"];
