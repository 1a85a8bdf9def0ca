//! Shared numeric and palette constants for the floorplan editor.

// ── Canvas ──────────────────────────────────────────────────────

/// Drawing surface width in canvas pixels.
pub const CANVAS_WIDTH: f64 = 1435.0;

/// Drawing surface height in canvas pixels.
pub const CANVAS_HEIGHT: f64 = 700.0;

// ── Rooms ───────────────────────────────────────────────────────

/// Smallest width a resize gesture may produce.
pub const MIN_ROOM_WIDTH: f64 = 40.0;

/// Smallest height a resize gesture may produce.
pub const MIN_ROOM_HEIGHT: f64 = 30.0;

/// Side length of the square resize handle at a room's bottom-right corner.
pub const HANDLE_SIZE: f64 = 10.0;

/// Display label for rooms the remote store returns without one.
pub const DEFAULT_LABEL: &str = "Room";

/// Fill color for rooms the remote store returns without one.
pub const DEFAULT_FILL: &str = "#eef2ff";

// ── New-room draft ──────────────────────────────────────────────

pub const DRAFT_X: f64 = 100.0;
pub const DRAFT_Y: f64 = 100.0;
pub const DRAFT_W: f64 = 160.0;
pub const DRAFT_H: f64 = 100.0;
pub const DRAFT_LABEL: &str = "Meeting Room";
/// Light blue default for freshly created rooms.
pub const DRAFT_FILL: &str = "#bfdbfe";

// ── Persistence ─────────────────────────────────────────────────

/// Quiet period before a scheduled save fires, in milliseconds.
pub const SAVE_DEBOUNCE_MS: u64 = 200;

// ── Rendering ───────────────────────────────────────────────────

pub const ROOM_CORNER_RADIUS: f64 = 4.0;
pub const STROKE_SELECTED: &str = "#4338ca";
pub const STROKE_DEFAULT: &str = "#111827";
pub const STROKE_WIDTH_SELECTED: f64 = 2.0;
pub const STROKE_WIDTH_DEFAULT: f64 = 1.0;
pub const LABEL_COLOR: &str = "#111827";
pub const LABEL_FONT: &str = "14px sans-serif";
pub const LABEL_OFFSET_X: f64 = 8.0;
pub const LABEL_OFFSET_Y: f64 = 20.0;

// ── Palette ─────────────────────────────────────────────────────

/// Named fill colors offered by the recolor menu (VIBGYOR plus extras).
pub const COLOR_PALETTE: [(&str, &str); 10] = [
    ("Violet", "#8b5cf6"),
    ("Indigo", "#6366f1"),
    ("Blue", "#3b82f6"),
    ("Green", "#22c55e"),
    ("Yellow", "#eab308"),
    ("Orange", "#f97316"),
    ("Red", "#ef4444"),
    ("Black", "#000000"),
    ("Grey", "#6b7280"),
    ("White", "#ffffff"),
];
