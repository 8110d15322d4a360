//! Dot launcher
//!
//! A small always-visible circle next to the panel's top-left corner. A
//! click (press and release without moving past the dot's radius) opens or
//! closes the panel. Pulling away from the dot instead turns the gesture into
//! a drag locked to the dominant axis, which fires the caller's LR or UD
//! callback once per `drag_step` pixels of travel.
//!
//! ```text
//!  ClosedIdle/OpenIdle --press on dot--> PressTesting
//!  PressTesting --moved > radius--> DragLockedLr | DragLockedUd
//!  PressTesting --release--> toggle open, back to idle
//!  DragLocked* --release--> idle, no toggle
//! ```

use macroquad::math::Vec2;

use super::callback::StepCallback;
use super::element::ViewCx;
use super::painter::{fill_circle, stroke_circle};
use super::{theme, FrameState, Owner, Quad};
use crate::config::PanelConfig;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DotState {
    ClosedIdle,
    OpenIdle,
    PressTesting,
    DragLockedLr,
    DragLockedUd,
}

impl DotState {
    fn idle(open: bool) -> Self {
        if open {
            DotState::OpenIdle
        } else {
            DotState::ClosedIdle
        }
    }

    pub fn is_drag(&self) -> bool {
        matches!(self, DotState::DragLockedLr | DotState::DragLockedUd)
    }
}

/// Cardinal direction of a gesture (viewport coordinates, y up)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}

impl Direction {
    const ALL: [Direction; 4] = [Direction::Up, Direction::Down, Direction::Left, Direction::Right];

    pub fn unit(&self) -> Vec2 {
        match self {
            Direction::Up => Vec2::new(0.0, 1.0),
            Direction::Down => Vec2::new(0.0, -1.0),
            Direction::Left => Vec2::new(-1.0, 0.0),
            Direction::Right => Vec2::new(1.0, 0.0),
        }
    }

    /// Cardinal direction with the smallest angle to `delta`
    pub fn classify(delta: Vec2) -> Direction {
        let dir = delta.normalize_or_zero();
        let angle = |d: &Direction| dir.dot(d.unit()).clamp(-1.0, 1.0).acos();
        Direction::ALL
            .into_iter()
            .min_by(|a, b| angle(a).total_cmp(&angle(b)))
            .unwrap_or(Direction::Right)
    }

    pub fn axis(&self) -> DragAxis {
        match self {
            Direction::Left | Direction::Right => DragAxis::LeftRight,
            Direction::Up | Direction::Down => DragAxis::UpDown,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DragAxis {
    LeftRight,
    UpDown,
}

pub struct Dot<C> {
    center: Vec2,
    radius: f32,
    state: DotState,
    press_at: Vec2,
    /// Pointer position at the last drag callback
    anchor: Vec2,
    last_drag_axis: Option<DragAxis>,
    on_drag_lr: Option<StepCallback<C>>,
    on_drag_ud: Option<StepCallback<C>>,
    on_scroll: Option<StepCallback<C>>,
}

impl<C> Dot<C> {
    pub fn new(radius: f32) -> Self {
        Self {
            center: Vec2::ZERO,
            radius,
            state: DotState::ClosedIdle,
            press_at: Vec2::ZERO,
            anchor: Vec2::ZERO,
            last_drag_axis: None,
            on_drag_lr: None,
            on_drag_ud: None,
            on_scroll: None,
        }
    }

    /// Called with +1 (right) or -1 (left) per drag step
    pub fn on_drag_lr(&mut self, f: impl FnMut(&mut C, i32) + 'static) {
        self.on_drag_lr = Some(Box::new(f));
    }

    /// Called with +1 (up) or -1 (down) per drag step
    pub fn on_drag_ud(&mut self, f: impl FnMut(&mut C, i32) + 'static) {
        self.on_drag_ud = Some(Box::new(f));
    }

    /// Called with the sign of the wheel step while hovering the dot
    pub fn on_scroll(&mut self, f: impl FnMut(&mut C, i32) + 'static) {
        self.on_scroll = Some(Box::new(f));
    }

    pub fn state(&self) -> DotState {
        self.state
    }

    pub fn center(&self) -> Vec2 {
        self.center
    }

    pub fn radius(&self) -> f32 {
        self.radius
    }

    /// Axis of the most recent drag gesture
    pub fn last_drag_axis(&self) -> Option<DragAxis> {
        self.last_drag_axis
    }

    pub fn set_center(&mut self, center: Vec2) {
        self.center = center;
    }

    /// Position next to the panel's top-left corner
    pub fn place(&mut self, panel: &Quad, config: &PanelConfig) {
        self.radius = config.dot_radius;
        self.center = Vec2::new(panel.left() - config.dot_offset - self.radius, panel.top() + config.dot_offset);
    }

    /// Hit radius, enlarged while the panel is closed
    pub fn hit_radius(&self, open: bool, config: &PanelConfig) -> f32 {
        if open {
            self.radius
        } else {
            self.radius * config.closed_hit_scale
        }
    }

    pub fn hovered(&self, frame: &FrameState, config: &PanelConfig) -> bool {
        frame.pointer.distance(self.center) <= self.hit_radius(frame.panel_open, config)
    }

    /// Drive the state machine with the current event
    ///
    /// Returns true when the dot consumed the event.
    pub fn update(&mut self, ctx: &mut C, frame: &mut FrameState, config: &PanelConfig) -> bool {
        match self.state {
            DotState::ClosedIdle | DotState::OpenIdle => {
                // resync if the panel was opened or closed from outside
                self.state = DotState::idle(frame.panel_open);
                if !self.hovered(frame, config) {
                    return false;
                }
                if frame.pressed {
                    if frame.lock_element(Owner::Dot) {
                        self.state = DotState::PressTesting;
                        self.press_at = frame.pointer;
                    }
                } else if frame.scroll != 0 {
                    if let Some(f) = self.on_scroll.as_mut() {
                        f(ctx, frame.scroll.signum());
                    }
                }
                true
            }
            DotState::PressTesting => {
                let finished = frame.released || !frame.held;
                let delta = frame.pointer - self.press_at;
                if delta.length() > self.radius {
                    let direction = Direction::classify(delta);
                    self.state = match direction.axis() {
                        DragAxis::LeftRight => DotState::DragLockedLr,
                        DragAxis::UpDown => DotState::DragLockedUd,
                    };
                    self.last_drag_axis = Some(direction.axis());
                    self.anchor = self.press_at;
                    tracing::debug!(?direction, "dot press became a drag");
                    if !finished {
                        self.step(ctx, frame, config);
                    }
                }
                if finished {
                    frame.release(Owner::Dot);
                    if self.state == DotState::PressTesting {
                        frame.panel_open = !frame.panel_open;
                        tracing::debug!(open = frame.panel_open, "panel toggled from dot");
                    }
                    self.state = DotState::idle(frame.panel_open);
                }
                true
            }
            DotState::DragLockedLr | DotState::DragLockedUd => {
                if frame.released || !frame.held {
                    frame.release(Owner::Dot);
                    self.state = DotState::idle(frame.panel_open);
                } else {
                    self.step(ctx, frame, config);
                }
                true
            }
        }
    }

    /// Fire at most one drag callback for the current pointer position
    fn step(&mut self, ctx: &mut C, frame: &FrameState, config: &PanelConfig) {
        let threshold = if frame.modifiers.shift || frame.modifiers.ctrl {
            config.drag_step_modified
        } else {
            config.drag_step
        };
        let travel = frame.pointer - self.anchor;
        let (along, callback) = match self.state {
            DotState::DragLockedLr => (travel.x, self.on_drag_lr.as_mut()),
            DotState::DragLockedUd => (travel.y, self.on_drag_ud.as_mut()),
            _ => return,
        };
        if along.abs() > threshold {
            if let Some(f) = callback {
                f(ctx, along.signum() as i32);
            }
            self.anchor = frame.pointer;
        }
    }

    pub fn draw(&self, cx: &ViewCx<'_>) {
        let fill = if self.state.is_drag() || self.state == DotState::PressTesting {
            theme::HANDLE_HOT
        } else if cx.frame.panel_open {
            theme::ACCENT_COLOR
        } else {
            theme::DOT_FILL
        };
        fill_circle(cx.painter, self.center, self.radius, fill);
        stroke_circle(cx.painter, self.center, self.radius, theme::DOT_RING, 1.5);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ui::{InputEvent, ModifierKeys};

    #[derive(Default)]
    struct Steps {
        lr: Vec<i32>,
        ud: Vec<i32>,
        scroll: Vec<i32>,
    }

    fn dot_at(x: f32, y: f32) -> Dot<Steps> {
        let mut dot = Dot::new(10.0);
        dot.set_center(Vec2::new(x, y));
        dot.on_drag_lr(|s: &mut Steps, d| s.lr.push(d));
        dot.on_drag_ud(|s: &mut Steps, d| s.ud.push(d));
        dot.on_scroll(|s: &mut Steps, d| s.scroll.push(d));
        dot
    }

    fn send(dot: &mut Dot<Steps>, steps: &mut Steps, frame: &mut FrameState, event: InputEvent) {
        frame.update(&event);
        dot.update(steps, frame, &PanelConfig::default());
    }

    #[test]
    fn test_classify_cardinals() {
        assert_eq!(Direction::classify(Vec2::new(5.0, 1.0)), Direction::Right);
        assert_eq!(Direction::classify(Vec2::new(-5.0, 4.0)), Direction::Left);
        assert_eq!(Direction::classify(Vec2::new(1.0, 9.0)), Direction::Up);
        assert_eq!(Direction::classify(Vec2::new(-2.0, -3.0)), Direction::Down);
    }

    #[test]
    fn test_small_release_toggles_open() {
        let mut dot = dot_at(100.0, 100.0);
        let mut steps = Steps::default();
        let mut frame = FrameState::new();

        send(&mut dot, &mut steps, &mut frame, InputEvent::press(100.0, 100.0));
        assert_eq!(dot.state(), DotState::PressTesting);
        assert!(frame.is_locked_by(Owner::Dot));

        send(&mut dot, &mut steps, &mut frame, InputEvent::release(102.0, 101.0));
        assert!(frame.panel_open);
        assert_eq!(dot.state(), DotState::OpenIdle);
        assert!(!frame.is_locked());

        send(&mut dot, &mut steps, &mut frame, InputEvent::press(101.0, 100.0));
        send(&mut dot, &mut steps, &mut frame, InputEvent::release(101.0, 100.0));
        assert!(!frame.panel_open);
        assert_eq!(dot.state(), DotState::ClosedIdle);
    }

    #[test]
    fn test_drag_right_locks_lr_without_toggle() {
        let mut dot = dot_at(100.0, 100.0);
        let mut steps = Steps::default();
        let mut frame = FrameState::new();

        send(&mut dot, &mut steps, &mut frame, InputEvent::press(100.0, 100.0));
        send(&mut dot, &mut steps, &mut frame, InputEvent::mouse_move(160.0, 100.0));
        assert_eq!(dot.state(), DotState::DragLockedLr);
        assert!(!frame.panel_open);
        assert_eq!(steps.lr, vec![1]);

        send(&mut dot, &mut steps, &mut frame, InputEvent::release(160.0, 100.0));
        assert!(!frame.panel_open);
        assert_eq!(dot.state(), DotState::ClosedIdle);
        assert_eq!(dot.last_drag_axis(), Some(DragAxis::LeftRight));
        assert!(!frame.is_locked());
    }

    #[test]
    fn test_far_release_is_a_drag() {
        let mut dot = dot_at(100.0, 100.0);
        let mut steps = Steps::default();
        let mut frame = FrameState::new();

        send(&mut dot, &mut steps, &mut frame, InputEvent::press(100.0, 100.0));
        send(&mut dot, &mut steps, &mut frame, InputEvent::release(100.0, 130.0));
        assert!(!frame.panel_open);
        assert_eq!(dot.last_drag_axis(), Some(DragAxis::UpDown));
        assert!(steps.ud.is_empty());
    }

    #[test]
    fn test_drag_cadence() {
        let mut dot = dot_at(100.0, 100.0);
        let mut steps = Steps::default();
        let mut frame = FrameState::new();

        send(&mut dot, &mut steps, &mut frame, InputEvent::press(100.0, 100.0));
        send(&mut dot, &mut steps, &mut frame, InputEvent::mouse_move(100.0, 88.0));
        assert_eq!(dot.state(), DotState::DragLockedUd);
        assert!(steps.ud.is_empty());

        // 15px more: 27 total since the press, one step
        send(&mut dot, &mut steps, &mut frame, InputEvent::mouse_move(100.0, 73.0));
        assert_eq!(steps.ud, vec![-1]);
        // 10px since the last step: nothing
        send(&mut dot, &mut steps, &mut frame, InputEvent::mouse_move(100.0, 63.0));
        assert_eq!(steps.ud, vec![-1]);
        // a huge jump still fires exactly once
        send(&mut dot, &mut steps, &mut frame, InputEvent::mouse_move(100.0, 500.0));
        assert_eq!(steps.ud, vec![-1, 1]);
        // shift raises the step distance
        send(&mut dot, &mut steps, &mut frame, InputEvent::mouse_move(100.0, 530.0).with_modifiers(ModifierKeys::SHIFT));
        assert_eq!(steps.ud, vec![-1, 1]);
        assert!(steps.lr.is_empty());
    }

    #[test]
    fn test_scroll_over_dot() {
        let mut dot = dot_at(100.0, 100.0);
        let mut steps = Steps::default();
        let mut frame = FrameState::new();

        send(&mut dot, &mut steps, &mut frame, InputEvent::scroll(104.0, 100.0, 2));
        frame.panel_open = true;
        send(&mut dot, &mut steps, &mut frame, InputEvent::scroll(104.0, 100.0, -1));
        send(&mut dot, &mut steps, &mut frame, InputEvent::scroll(300.0, 100.0, -1));
        assert_eq!(steps.scroll, vec![1, -1]);
    }

    #[test]
    fn test_closed_hit_radius_is_larger() {
        let mut dot = dot_at(100.0, 100.0);
        let mut steps = Steps::default();
        let mut frame = FrameState::new();

        // 13px away: inside 10 * 1.5 while closed
        send(&mut dot, &mut steps, &mut frame, InputEvent::press(113.0, 100.0));
        assert_eq!(dot.state(), DotState::PressTesting);
        send(&mut dot, &mut steps, &mut frame, InputEvent::release(113.0, 100.0));
        assert!(frame.panel_open);

        send(&mut dot, &mut steps, &mut frame, InputEvent::press(113.0, 100.0));
        assert_eq!(dot.state(), DotState::OpenIdle);
    }
}
