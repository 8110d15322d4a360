//! Basic elements: labels, spacers and buttons

use macroquad::math::Vec2;

use super::callback::{Bindings, Click};
use super::element::{draw_tip, Element, Response, UpdateCx, ViewCx};
use super::painter::{fill, text_in, ImageHandle, Painter};
use super::{theme, Quad};

/// Static text
pub struct Label {
    text: String,
    tip: Option<String>,
    bounds: Quad,
}

impl Label {
    pub fn new(text: impl Into<String>) -> Self {
        Self { text: text.into(), tip: None, bounds: Quad::default() }
    }

    pub fn with_tip(mut self, tip: impl Into<String>) -> Self {
        self.tip = Some(tip.into());
        self
    }

    pub fn text(&self) -> &str {
        &self.text
    }
}

impl<C> Element<C> for Label {
    fn build(&mut self, cx: &ViewCx<'_>, x: f32, y: f32) -> Quad {
        let dims = cx.measure(&self.text);
        let h = cx.config.row_height.max(dims.y);
        self.bounds = Quad::new(x, y, dims.x + cx.config.text_inset, h);
        self.bounds
    }

    fn update(&mut self, _cx: &mut UpdateCx<'_, C>) -> Response {
        Response::Idle
    }

    fn draw(&self, cx: &ViewCx<'_>) {
        text_in(cx.painter, &self.text, &self.bounds, 0.0, cx.config.font_size, theme::TEXT_COLOR);
    }

    fn draw_tips(&self, cx: &ViewCx<'_>) {
        if let Some(tip) = &self.tip {
            if cx.hovering(&self.bounds) {
                draw_tip(cx, tip);
            }
        }
    }

    fn bounds(&self) -> Quad {
        self.bounds
    }
}

/// Fixed empty gap
pub struct Spacer {
    size: Vec2,
    bounds: Quad,
}

impl Spacer {
    pub fn new(width: f32, height: f32) -> Self {
        Self { size: Vec2::new(width.max(0.0), height.max(0.0)), bounds: Quad::default() }
    }
}

impl<C> Element<C> for Spacer {
    fn build(&mut self, _cx: &ViewCx<'_>, x: f32, y: f32) -> Quad {
        self.bounds = Quad::new(x, y, self.size.x, self.size.y);
        self.bounds
    }

    fn update(&mut self, _cx: &mut UpdateCx<'_, C>) -> Response {
        Response::Idle
    }

    fn draw(&self, _cx: &ViewCx<'_>) {}

    fn bounds(&self) -> Quad {
        self.bounds
    }
}

/// Clickable button with per-modifier callback slots and an optional icon
pub struct Button<C> {
    text: String,
    tip: Option<String>,
    image_name: Option<String>,
    image: Option<ImageHandle>,
    bindings: Bindings<C>,
    bounds: Quad,
}

impl<C> Button<C> {
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            tip: None,
            image_name: None,
            image: None,
            bindings: Bindings::new(),
            bounds: Quad::default(),
        }
    }

    /// Plain click
    pub fn on_click(self, f: impl FnMut(&mut C) + 'static) -> Self {
        self.on(Click::Plain, f)
    }

    /// Click with a specific modifier combination
    pub fn on(mut self, click: Click, f: impl FnMut(&mut C) + 'static) -> Self {
        self.bindings.set_click(click, f);
        self
    }

    pub fn on_scroll(mut self, f: impl FnMut(&mut C, i32) + 'static) -> Self {
        self.bindings.set_scroll(f);
        self
    }

    pub fn with_tip(mut self, tip: impl Into<String>) -> Self {
        self.tip = Some(tip.into());
        self
    }

    /// Icon loaded through the painter when the row is added
    pub fn with_image(mut self, name: impl Into<String>) -> Self {
        self.image_name = Some(name.into());
        self
    }

    pub fn image(&self) -> Option<ImageHandle> {
        self.image
    }

    fn icon_size(&self, cx: &ViewCx<'_>) -> f32 {
        if self.image.is_some() {
            cx.config.row_height - 4.0
        } else {
            0.0
        }
    }
}

impl<C> Element<C> for Button<C> {
    fn setup(&mut self, painter: &dyn Painter) {
        if let Some(name) = &self.image_name {
            self.image = painter.load_image(name);
            if self.image.is_none() {
                tracing::warn!(name = %name, "button image failed to load, drawing text only");
            }
        }
    }

    fn build(&mut self, cx: &ViewCx<'_>, x: f32, y: f32) -> Quad {
        let dims = cx.measure(&self.text);
        let icon = self.icon_size(cx);
        let w = dims.x + cx.config.text_inset * 2.0 + icon;
        self.bounds = Quad::new(x, y, w, cx.config.row_height.max(dims.y));
        self.bounds
    }

    fn update(&mut self, cx: &mut UpdateCx<'_, C>) -> Response {
        if !self.bounds.contains(cx.frame.pointer) {
            return Response::Idle;
        }
        if cx.frame.pressed {
            if !self.bindings.click(cx.ctx, cx.frame.modifiers) {
                tracing::trace!(button = %self.text, "no callback for this modifier combination");
            }
        } else if cx.frame.scroll != 0 {
            self.bindings.scroll(cx.ctx, cx.frame.scroll);
        }
        Response::Idle
    }

    fn draw(&self, cx: &ViewCx<'_>) {
        let bg = if cx.hovering(&self.bounds) { theme::WIDGET_HOVER } else { theme::WIDGET_BG };
        fill(cx.painter, &self.bounds, bg);

        let mut inset = cx.config.text_inset;
        if let Some(image) = self.image {
            let icon = self.icon_size(cx);
            let quad = Quad::new(self.bounds.left() + 2.0, self.bounds.bottom() + 2.0, icon, icon);
            cx.painter.draw_image(image, &quad);
            inset += icon;
        }
        text_in(cx.painter, &self.text, &self.bounds, inset, cx.config.font_size, theme::TEXT_COLOR);
    }

    fn draw_tips(&self, cx: &ViewCx<'_>) {
        if let Some(tip) = &self.tip {
            if cx.hovering(&self.bounds) {
                draw_tip(cx, tip);
            }
        }
    }

    fn shut_down(&mut self, painter: &dyn Painter) {
        if let Some(image) = self.image.take() {
            painter.free_image(image);
        }
    }

    fn bounds(&self) -> Quad {
        self.bounds
    }
}
