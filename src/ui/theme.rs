//! Overlay theme - shared colors
//!
//! Centralized color definitions so every element of the overlay reads as
//! one panel floating over the 3D view.

use macroquad::color::Color;

// =============================================================================
// Panel
// =============================================================================

/// Panel background (translucent so the scene shows through)
pub const PANEL_BG: Color = Color::new(0.11, 0.11, 0.13, 0.88);

/// Panel border
pub const PANEL_BORDER: Color = Color::new(0.314, 0.314, 0.314, 1.0);

/// Primary text color
pub const TEXT_COLOR: Color = Color::new(0.8, 0.8, 0.85, 1.0);

/// Dimmed/secondary text
pub const TEXT_DIM: Color = Color::new(0.4, 0.4, 0.45, 1.0);

/// Accent for open and selected state
pub const ACCENT_COLOR: Color = Color::new(0.0, 0.75, 0.9, 1.0);

// =============================================================================
// Interactive elements
// =============================================================================

/// Button/field background
pub const WIDGET_BG: Color = Color::new(0.196, 0.196, 0.216, 1.0); // ~50, 50, 55

/// Button/field hover background
pub const WIDGET_HOVER: Color = Color::new(0.235, 0.235, 0.275, 1.0); // ~60, 60, 70

/// Field being dragged
pub const WIDGET_ACTIVE: Color = Color::new(0.235, 0.314, 0.392, 1.0); // ~60, 80, 100

// =============================================================================
// Dropdown/Popup
// =============================================================================

/// Dropdown menu background
pub const DROPDOWN_BG: Color = Color::new(0.176, 0.176, 0.196, 0.96); // ~45, 45, 50

/// Dropdown menu border
pub const DROPDOWN_BORDER: Color = Color::new(0.314, 0.314, 0.314, 1.0); // ~80, 80, 80

/// Dropdown item hover background
pub const DROPDOWN_HOVER: Color = Color::new(0.235, 0.314, 0.392, 1.0); // ~60, 80, 100

/// Tooltip background
pub const TIP_BG: Color = Color::new(0.05, 0.05, 0.06, 0.92);

// =============================================================================
// Dot and move handle
// =============================================================================

/// Dot interior while the panel is closed
pub const DOT_FILL: Color = Color::new(0.2, 0.2, 0.24, 0.9);

/// Dot ring
pub const DOT_RING: Color = Color::new(0.8, 0.8, 0.85, 1.0);

/// Move handle at rest
pub const HANDLE_COLOR: Color = Color::new(0.3, 0.3, 0.34, 0.8);

/// Move handle hovered or dragging
pub const HANDLE_HOT: Color = Color::new(0.39, 0.59, 1.0, 1.0); // ~100, 150, 255

/// Scroll list track
pub const SCROLL_TRACK: Color = Color::new(0.14, 0.14, 0.16, 1.0);
