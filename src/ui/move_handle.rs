//! Move handle
//!
//! Two strips hugging the panel's bottom-left corner: one up the left edge,
//! one along the bottom. Dragging either moves the panel anchor; `clamp`
//! keeps the panel (and its dot) inside the viewport.

use macroquad::math::Vec2;

use super::element::ViewCx;
use super::painter::fill;
use super::{theme, FrameState, Owner, Quad};
use crate::config::PanelConfig;

#[derive(Debug, Clone, Default)]
pub struct MoveHandle {
    vertical: Quad,
    horizontal: Quad,
    /// anchor - pointer at press time
    offset: Vec2,
    hot: bool,
}

impl MoveHandle {
    pub fn new() -> Self {
        Self::default()
    }

    /// Place the strips around the panel's outer quad
    pub fn build(&mut self, panel: &Quad, config: &PanelConfig) {
        let t = config.handle_thickness;
        let tol = config.handle_tolerance;
        self.vertical = Quad::new(panel.left() - t, panel.bottom(), t, panel.height).with_padding(tol);
        self.horizontal = Quad::new(panel.left() - t, panel.bottom() - t, panel.width + t, t).with_padding(tol);
    }

    pub fn strips(&self) -> [Quad; 2] {
        [self.vertical, self.horizontal]
    }

    pub fn hovered(&self, point: Vec2) -> bool {
        self.vertical.contains(point) || self.horizontal.contains(point)
    }

    /// Strips are highlighted for the pointer
    pub fn is_hot(&self) -> bool {
        self.hot
    }

    /// Drop the highlight when something on top took the event
    pub fn clear_hover(&mut self) {
        self.hot = false;
    }

    pub fn is_dragging(&self, frame: &FrameState) -> bool {
        frame.is_locked_by(Owner::MoveHandle)
    }

    /// Handle the current event; returns true when the panel position changed
    pub fn update(&mut self, frame: &mut FrameState) -> bool {
        if self.is_dragging(frame) {
            if frame.released || !frame.held {
                frame.release(Owner::MoveHandle);
                self.hot = self.hovered(frame.pointer);
                return false;
            }
            let target = frame.pointer + self.offset;
            let moved = target != frame.position;
            frame.position = target;
            return moved;
        }

        self.hot = !frame.is_locked() && self.hovered(frame.pointer);
        if self.hot && frame.pressed && frame.lock_element(Owner::MoveHandle) {
            self.offset = frame.position - frame.pointer;
        }
        false
    }

    /// Keep a `panel_width` x `panel_height` panel at `frame.position` on screen
    ///
    /// Returns whether the position changed.
    pub fn clamp(frame: &mut FrameState, panel_width: f32, panel_height: f32, config: &PanelConfig) -> bool {
        let min_x = config.warp_pad + config.dot_offset + config.dot_diameter();
        let max_x = frame.screen_width - config.warp_pad - panel_width;
        let min_y = config.warp_pad;
        let max_y = frame.screen_height - config.warp_pad - panel_height - config.dot_offset;

        // min wins on a screen too small for the panel
        let clamped = Vec2::new(frame.position.x.min(max_x).max(min_x), frame.position.y.min(max_y).max(min_y));
        if clamped == frame.position {
            return false;
        }
        tracing::trace!(from = ?frame.position, to = ?clamped, "panel position clamped");
        frame.position = clamped;
        true
    }

    pub fn draw(&self, cx: &ViewCx<'_>) {
        let color = if self.hot || self.is_dragging(cx.frame) { theme::HANDLE_HOT } else { theme::HANDLE_COLOR };
        fill(cx.painter, &self.vertical, color);
        fill(cx.painter, &self.horizontal, color);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ui::InputEvent;

    fn panel_quad(frame: &FrameState) -> Quad {
        Quad::new(frame.position.x, frame.position.y, 300.0, 200.0)
    }

    #[test]
    fn test_strips_meet_at_bottom_left() {
        let mut handle = MoveHandle::new();
        let config = PanelConfig::default();
        handle.build(&Quad::new(100.0, 100.0, 300.0, 200.0), &config);
        let [v, h] = handle.strips();
        assert_eq!(v.right(), 100.0);
        assert_eq!(v.top(), 300.0);
        assert_eq!(h.top(), 100.0);
        assert_eq!(h.right(), 400.0);
        // tolerance extends the hit area
        assert!(handle.hovered(Vec2::new(101.0, 200.0)));
        assert!(!handle.hovered(Vec2::new(150.0, 200.0)));
    }

    #[test]
    fn test_drag_follows_pointer_with_offset() {
        let mut handle = MoveHandle::new();
        let config = PanelConfig::default();
        let mut frame = FrameState::new();
        frame.position = Vec2::new(100.0, 100.0);
        handle.build(&panel_quad(&frame), &config);

        frame.update(&InputEvent::press(97.0, 150.0));
        assert!(!handle.update(&mut frame));
        assert!(handle.is_dragging(&frame));

        frame.update(&InputEvent::mouse_move(197.0, 170.0));
        assert!(handle.update(&mut frame));
        assert_eq!(frame.position, Vec2::new(200.0, 120.0));

        frame.update(&InputEvent::release(197.0, 170.0));
        handle.update(&mut frame);
        assert!(!frame.is_locked());
    }

    #[test]
    fn test_hover_tracks_pointer_until_cleared() {
        let mut handle = MoveHandle::new();
        let mut frame = FrameState::new();
        frame.position = Vec2::new(100.0, 100.0);
        handle.build(&panel_quad(&frame), &PanelConfig::default());

        frame.update(&InputEvent::mouse_move(97.0, 150.0));
        handle.update(&mut frame);
        assert!(handle.is_hot());

        handle.clear_hover();
        assert!(!handle.is_hot());

        frame.update(&InputEvent::mouse_move(150.0, 97.0));
        handle.update(&mut frame);
        assert!(handle.is_hot());
        frame.update(&InputEvent::mouse_move(150.0, 150.0));
        handle.update(&mut frame);
        assert!(!handle.is_hot());
    }

    #[test]
    fn test_clamp_far_left_uses_dot_margin() {
        let config = PanelConfig::default();
        let mut frame = FrameState::new();
        frame.set_viewport(1920.0, 1080.0, 1.0);
        frame.position = Vec2::new(-500.0, 300.0);

        assert!(MoveHandle::clamp(&mut frame, 300.0, 200.0, &config));
        assert_eq!(frame.position.x, 20.0 + 8.0 + 20.0);
        assert_eq!(frame.position.y, 300.0);
        assert!(!MoveHandle::clamp(&mut frame, 300.0, 200.0, &config));
    }

    #[test]
    fn test_clamp_far_right_and_top() {
        let config = PanelConfig::default();
        let mut frame = FrameState::new();
        frame.set_viewport(1920.0, 1080.0, 1.0);
        frame.position = Vec2::new(5000.0, 5000.0);

        MoveHandle::clamp(&mut frame, 300.0, 200.0, &config);
        assert_eq!(frame.position, Vec2::new(1920.0 - 20.0 - 300.0, 1080.0 - 20.0 - 200.0 - 8.0));
    }

    #[test]
    fn test_clamp_min_wins_on_tiny_screen() {
        let config = PanelConfig::default();
        let mut frame = FrameState::new();
        frame.set_viewport(100.0, 100.0, 1.0);
        frame.position = Vec2::new(0.0, 0.0);

        MoveHandle::clamp(&mut frame, 300.0, 200.0, &config);
        assert_eq!(frame.position, Vec2::new(48.0, 20.0));
    }
}
