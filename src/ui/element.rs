//! The element contract
//!
//! Rows hold `Box<dyn Element<C>>`. The layout engine and the panel only ever
//! talk to elements through this trait.

use macroquad::math::Vec2;

use super::painter::{fill, Painter};
use super::{theme, ElementId, FrameState, Owner, Quad};
use crate::config::PanelConfig;

/// Read-only context for build and draw passes
#[derive(Clone, Copy)]
pub struct ViewCx<'a> {
    pub frame: &'a FrameState,
    pub painter: &'a dyn Painter,
    pub config: &'a PanelConfig,
}

impl<'a> ViewCx<'a> {
    pub fn measure(&self, text: &str) -> Vec2 {
        self.painter.measure_text(text, self.config.font_size)
    }

    /// Pointer is over `quad` and nothing else holds focus
    pub fn hovering(&self, quad: &Quad) -> bool {
        !self.frame.is_locked() && quad.contains(self.frame.pointer)
    }
}

/// Mutable context for one element's update
pub struct UpdateCx<'a, C> {
    pub ctx: &'a mut C,
    pub frame: &'a mut FrameState,
    pub painter: &'a dyn Painter,
    pub config: &'a PanelConfig,
    /// Address of the element being updated within its row set
    pub id: ElementId,
}

impl<'a, C> UpdateCx<'a, C> {
    pub fn owner(&self) -> Owner {
        Owner::Element(self.id)
    }

    /// Take the element lock for this element
    pub fn lock(&mut self) -> bool {
        let owner = self.owner();
        self.frame.lock_element(owner)
    }

    pub fn release(&mut self) -> bool {
        let owner = self.owner();
        self.frame.release(owner)
    }

    pub fn has_lock(&self) -> bool {
        self.frame.is_locked_by(self.owner())
    }

    pub fn open_popup(&mut self) -> bool {
        let id = self.id;
        self.frame.lock_popup(id)
    }

    pub fn close_popup(&mut self) -> bool {
        let id = self.id;
        self.frame.close_popup(id)
    }

    pub fn popup_open(&self) -> bool {
        self.frame.locked_popup() == Some(self.id)
    }

    pub fn view(&self) -> ViewCx<'_> {
        ViewCx { frame: &*self.frame, painter: self.painter, config: self.config }
    }
}

/// What an update asks of its owner
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Response {
    #[default]
    Idle,
    /// Layout changed; the owner must rebuild before the next hit test
    Rebuild,
}

impl Response {
    pub fn merge(self, other: Response) -> Response {
        if self == Response::Rebuild || other == Response::Rebuild {
            Response::Rebuild
        } else {
            Response::Idle
        }
    }
}

/// An interactive or decorative unit placed in a row
pub trait Element<C> {
    /// Acquire host resources (images); runs once when the row is added
    fn setup(&mut self, _painter: &dyn Painter) {}

    /// Place the element with its bottom-left corner at (x, y)
    ///
    /// Must fully overwrite any previous geometry.
    fn build(&mut self, cx: &ViewCx<'_>, x: f32, y: f32) -> Quad;

    /// Handle the current event
    fn update(&mut self, cx: &mut UpdateCx<'_, C>) -> Response;

    /// Refresh cached display values from the host context
    fn sync(&mut self, _ctx: &C) {}

    fn draw(&self, cx: &ViewCx<'_>);

    /// Hover tooltip, drawn after every element
    fn draw_tips(&self, _cx: &ViewCx<'_>) {}

    /// Popup overlay, drawn last while this element holds the popup lock
    fn draw_popup(&self, _cx: &ViewCx<'_>) {}

    /// Release host resources
    fn shut_down(&mut self, _painter: &dyn Painter) {}

    /// Geometry from the last build
    fn bounds(&self) -> Quad;
}

/// Draw `text` as a tooltip just above the pointer
pub fn draw_tip(cx: &ViewCx<'_>, text: &str) {
    let size = cx.config.font_size * 0.85;
    let dims = cx.painter.measure_text(text, size);
    let inset = cx.config.text_inset;
    let at = cx.frame.pointer + Vec2::new(12.0, 12.0);
    let quad = Quad::new(at.x, at.y, dims.x + inset * 2.0, dims.y + inset);
    fill(cx.painter, &quad, theme::TIP_BG);
    cx.painter.draw_text(text, Vec2::new(quad.left() + inset, quad.bottom() + inset * 0.5), size, theme::TEXT_COLOR);
}
