//! Panel configuration
//!
//! Every pixel constant the overlay uses lives here, at scale 1.0. Hosts can
//! ship a RON file to override any subset of fields:
//!
//! ```ron
//! (dot_radius: 12.0, warp_pad: 30.0)
//! ```

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::OverlayError;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PanelConfig {
    /// Dot launcher radius
    pub dot_radius: f32,
    /// Gap between the panel's top-left corner and the dot
    pub dot_offset: f32,
    /// Hit radius multiplier while the panel is closed
    pub closed_hit_scale: f32,
    /// Minimum distance kept between the panel and the screen edge
    pub warp_pad: f32,
    /// Space between the panel border and its elements
    pub padding: f32,
    /// Gap between neighbouring elements and rows
    pub spacing: f32,
    /// Move handle strip thickness
    pub handle_thickness: f32,
    /// Extra hover margin around the move handle
    pub handle_tolerance: f32,
    /// Pixels of dot drag per callback
    pub drag_step: f32,
    /// Pixels of dot drag per callback while shift or ctrl is held
    pub drag_step_modified: f32,
    pub font_size: f32,
    /// Height of a standard element row
    pub row_height: f32,
    /// Horizontal padding inside buttons and fields
    pub text_inset: f32,
    /// Skip timer events entirely
    pub return_on_timer: bool,
}

impl Default for PanelConfig {
    fn default() -> Self {
        Self {
            dot_radius: 10.0,
            dot_offset: 8.0,
            closed_hit_scale: 1.5,
            warp_pad: 20.0,
            padding: 6.0,
            spacing: 4.0,
            handle_thickness: 6.0,
            handle_tolerance: 3.0,
            drag_step: 20.0,
            drag_step_modified: 60.0,
            font_size: 14.0,
            row_height: 22.0,
            text_inset: 6.0,
            return_on_timer: true,
        }
    }
}

impl PanelConfig {
    /// Load from a RON file; missing fields keep their defaults
    pub fn load(path: &Path) -> Result<Self, OverlayError> {
        let text = std::fs::read_to_string(path)?;
        Self::from_ron(&text)
    }

    pub fn from_ron(text: &str) -> Result<Self, OverlayError> {
        Ok(ron::from_str(text)?)
    }

    /// Copy with every pixel size multiplied by the host scale factor
    pub fn scaled(&self, scale: f32) -> Self {
        let s = if scale > 0.0 { scale } else { 1.0 };
        Self {
            dot_radius: self.dot_radius * s,
            dot_offset: self.dot_offset * s,
            closed_hit_scale: self.closed_hit_scale,
            warp_pad: self.warp_pad * s,
            padding: self.padding * s,
            spacing: self.spacing * s,
            handle_thickness: self.handle_thickness * s,
            handle_tolerance: self.handle_tolerance * s,
            drag_step: self.drag_step * s,
            drag_step_modified: self.drag_step_modified * s,
            font_size: self.font_size * s,
            row_height: self.row_height * s,
            text_inset: self.text_inset * s,
            return_on_timer: self.return_on_timer,
        }
    }

    pub fn dot_diameter(&self) -> f32 {
        self.dot_radius * 2.0
    }
}
