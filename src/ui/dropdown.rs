//! Dropdown selector
//!
//! Scrolling over the trigger cycles through the options in place. Clicking
//! it opens the full option list as the panel's popup; the list closes on a
//! selection or on any click outside it.

use super::element::{draw_tip, Element, Response, UpdateCx, ViewCx};
use super::painter::{fill, stroke, text_in};
use super::{theme, Quad};

pub struct Dropdown<C> {
    label: String,
    options: Vec<String>,
    get: Box<dyn Fn(&C) -> usize>,
    set: Box<dyn FnMut(&mut C, usize)>,
    tip: Option<String>,
    selected: usize,
    hovered_option: Option<usize>,
    list: Vec<Quad>,
    list_bounds: Quad,
    bounds: Quad,
}

impl<C> Dropdown<C> {
    pub fn new(
        label: impl Into<String>,
        options: Vec<String>,
        get: impl Fn(&C) -> usize + 'static,
        set: impl FnMut(&mut C, usize) + 'static,
    ) -> Self {
        Self {
            label: label.into(),
            options,
            get: Box::new(get),
            set: Box::new(set),
            tip: None,
            selected: 0,
            hovered_option: None,
            list: Vec::new(),
            list_bounds: Quad::default(),
            bounds: Quad::default(),
        }
    }

    pub fn with_tip(mut self, tip: impl Into<String>) -> Self {
        self.tip = Some(tip.into());
        self
    }

    pub fn selected(&self) -> usize {
        self.selected
    }

    fn caption(&self) -> String {
        let option = self.options.get(self.selected).map(String::as_str).unwrap_or("-");
        format!("{}: {}", self.label, option)
    }

    fn option_at(&self, cx: &UpdateCx<'_, C>) -> Option<usize> {
        self.list.iter().position(|q| q.contains(cx.frame.pointer))
    }

    fn select(&mut self, ctx: &mut C, index: usize) {
        if index < self.options.len() {
            self.selected = index;
            (self.set)(ctx, index);
        }
    }

    fn cycle(&mut self, ctx: &mut C, step: i32) {
        let n = self.options.len() as i32;
        if n == 0 {
            return;
        }
        let current = (self.get)(ctx).min(self.options.len() - 1) as i32;
        let next = (current + step).rem_euclid(n) as usize;
        self.select(ctx, next);
    }
}

impl<C> Element<C> for Dropdown<C> {
    fn build(&mut self, cx: &ViewCx<'_>, x: f32, y: f32) -> Quad {
        let inset = cx.config.text_inset;
        let row_h = cx.config.row_height;
        let widest = self
            .options
            .iter()
            .map(|o| cx.measure(&format!("{}: {}", self.label, o)).x)
            .fold(cx.measure(&self.caption()).x, f32::max);
        self.bounds = Quad::new(x, y, widest + inset * 2.0, row_h);

        // The list opens upward unless it would leave the screen
        let list_h = row_h * self.options.len() as f32;
        let list_y = if self.bounds.top() + list_h <= cx.frame.screen_height {
            self.bounds.top()
        } else {
            self.bounds.bottom() - list_h
        };
        self.list = (0..self.options.len())
            .map(|i| Quad::new(x, list_y + list_h - row_h * (i + 1) as f32, self.bounds.width, row_h))
            .collect();
        self.list_bounds = Quad::new(x, list_y, self.bounds.width, list_h);
        self.bounds
    }

    fn update(&mut self, cx: &mut UpdateCx<'_, C>) -> Response {
        if cx.popup_open() {
            if cx.frame.pressed {
                if let Some(i) = self.option_at(cx) {
                    self.select(cx.ctx, i);
                }
                self.hovered_option = None;
                cx.close_popup();
            } else {
                self.hovered_option = self.option_at(cx);
            }
            return Response::Idle;
        }

        if !self.bounds.contains(cx.frame.pointer) {
            return Response::Idle;
        }
        if cx.frame.pressed {
            if cx.open_popup() {
                self.selected = (self.get)(cx.ctx);
                self.hovered_option = Some(self.selected);
            }
        } else if cx.frame.scroll != 0 {
            self.cycle(cx.ctx, cx.frame.scroll.signum());
        }
        Response::Idle
    }

    fn sync(&mut self, ctx: &C) {
        self.selected = (self.get)(ctx);
    }

    fn draw(&self, cx: &ViewCx<'_>) {
        let bg = if cx.hovering(&self.bounds) { theme::WIDGET_HOVER } else { theme::WIDGET_BG };
        fill(cx.painter, &self.bounds, bg);
        text_in(cx.painter, &self.caption(), &self.bounds, cx.config.text_inset, cx.config.font_size, theme::TEXT_COLOR);
    }

    fn draw_tips(&self, cx: &ViewCx<'_>) {
        if let Some(tip) = &self.tip {
            if cx.hovering(&self.bounds) {
                draw_tip(cx, tip);
            }
        }
    }

    fn draw_popup(&self, cx: &ViewCx<'_>) {
        fill(cx.painter, &self.list_bounds, theme::DROPDOWN_BG);
        for (i, (quad, option)) in self.list.iter().zip(&self.options).enumerate() {
            if self.hovered_option == Some(i) {
                fill(cx.painter, quad, theme::DROPDOWN_HOVER);
            }
            let color = if i == self.selected { theme::ACCENT_COLOR } else { theme::TEXT_COLOR };
            text_in(cx.painter, option, quad, cx.config.text_inset, cx.config.font_size, color);
        }
        stroke(cx.painter, &self.list_bounds, theme::DROPDOWN_BORDER, 1.0);
    }

    fn bounds(&self) -> Quad {
        self.bounds
    }
}
