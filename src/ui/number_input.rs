//! Drag-adjustable numeric field
//!
//! Press on the field to grab it, then move horizontally: every pixel adds
//! `increment` to the bound value (x10 with ctrl, x0.1 with shift). Releasing
//! the button lets go. The wheel nudges by one increment.

use super::element::{draw_tip, Element, Response, UpdateCx, ViewCx};
use super::painter::{fill, text_in};
use super::{theme, ModifierKeys, Quad};

/// Reads the bound value from the host context
pub type Getter<C> = Box<dyn Fn(&C) -> f32>;

/// Writes the bound value into the host context
pub type Setter<C> = Box<dyn FnMut(&mut C, f32)>;

#[derive(Debug, Clone, Copy)]
struct FieldDrag {
    last_x: f32,
    value: f32,
}

pub struct NumberInput<C> {
    label: String,
    get: Getter<C>,
    set: Setter<C>,
    increment: f32,
    min: Option<f32>,
    max: Option<f32>,
    precision: usize,
    tip: Option<String>,
    drag: Option<FieldDrag>,
    shown: f32,
    bounds: Quad,
}

impl<C> NumberInput<C> {
    pub fn new(
        label: impl Into<String>,
        get: impl Fn(&C) -> f32 + 'static,
        set: impl FnMut(&mut C, f32) + 'static,
    ) -> Self {
        Self {
            label: label.into(),
            get: Box::new(get),
            set: Box::new(set),
            increment: 0.1,
            min: None,
            max: None,
            precision: 2,
            tip: None,
            drag: None,
            shown: 0.0,
            bounds: Quad::default(),
        }
    }

    /// Value change per pixel of drag
    pub fn with_increment(mut self, increment: f32) -> Self {
        self.increment = increment;
        self
    }

    pub fn with_range(mut self, min: f32, max: f32) -> Self {
        self.min = Some(min.min(max));
        self.max = Some(max.max(min));
        self
    }

    pub fn with_precision(mut self, precision: usize) -> Self {
        self.precision = precision;
        self
    }

    pub fn with_tip(mut self, tip: impl Into<String>) -> Self {
        self.tip = Some(tip.into());
        self
    }

    pub fn is_dragging(&self) -> bool {
        self.drag.is_some()
    }

    /// Effective increment after coarse/fine modifiers
    fn step(&self, modifiers: ModifierKeys) -> f32 {
        if modifiers.ctrl {
            self.increment * 10.0
        } else if modifiers.shift {
            self.increment * 0.1
        } else {
            self.increment
        }
    }

    fn clamp(&self, value: f32) -> f32 {
        let value = self.min.map_or(value, |m| value.max(m));
        self.max.map_or(value, |m| value.min(m))
    }

    fn text(&self) -> String {
        format!("{}: {:.*}", self.label, self.precision, self.shown)
    }

    fn apply(&mut self, ctx: &mut C, value: f32) {
        let value = self.clamp(value);
        (self.set)(ctx, value);
        self.shown = value;
    }
}

impl<C> Element<C> for NumberInput<C> {
    fn build(&mut self, cx: &ViewCx<'_>, x: f32, y: f32) -> Quad {
        // Reserve room for a few extra digits so the width stays put while dragging
        let sample = format!("{}: -0000.{:0<w$}", self.label, "", w = self.precision);
        let dims = cx.measure(&sample);
        self.bounds = Quad::new(x, y, dims.x + cx.config.text_inset * 2.0, cx.config.row_height.max(dims.y));
        self.bounds
    }

    fn update(&mut self, cx: &mut UpdateCx<'_, C>) -> Response {
        if cx.has_lock() {
            let Some(mut drag) = self.drag else {
                cx.release();
                return Response::Idle;
            };
            if cx.frame.released || !cx.frame.held {
                self.drag = None;
                cx.release();
                return Response::Idle;
            }
            let dx = cx.frame.pointer.x - drag.last_x;
            if dx != 0.0 {
                drag.value = self.clamp(drag.value + dx * self.step(cx.frame.modifiers));
                drag.last_x = cx.frame.pointer.x;
                self.drag = Some(drag);
                self.apply(cx.ctx, drag.value);
            }
            return Response::Idle;
        }

        self.drag = None;
        if !self.bounds.contains(cx.frame.pointer) {
            return Response::Idle;
        }
        if cx.frame.pressed {
            if cx.lock() {
                let value = (self.get)(cx.ctx);
                self.drag = Some(FieldDrag { last_x: cx.frame.pointer.x, value });
                self.shown = value;
            }
        } else if cx.frame.scroll != 0 {
            let value = (self.get)(cx.ctx) + cx.frame.scroll.signum() as f32 * self.step(cx.frame.modifiers);
            self.apply(cx.ctx, value);
        }
        Response::Idle
    }

    fn draw(&self, cx: &ViewCx<'_>) {
        let bg = if self.drag.is_some() {
            theme::WIDGET_ACTIVE
        } else if cx.hovering(&self.bounds) {
            theme::WIDGET_HOVER
        } else {
            theme::WIDGET_BG
        };
        fill(cx.painter, &self.bounds, bg);
        text_in(cx.painter, &self.text(), &self.bounds, cx.config.text_inset, cx.config.font_size, theme::TEXT_COLOR);
    }

    fn draw_tips(&self, cx: &ViewCx<'_>) {
        if let Some(tip) = &self.tip {
            if cx.hovering(&self.bounds) {
                draw_tip(cx, tip);
            }
        }
    }

    fn sync(&mut self, ctx: &C) {
        if self.drag.is_none() {
            self.shown = (self.get)(ctx);
        }
    }

    fn bounds(&self) -> Quad {
        self.bounds
    }
}
