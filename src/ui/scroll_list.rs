//! Virtualized scrolling list of rows
//!
//! Only the rows inside the visible window are built, updated and drawn.
//! The offset moves in whole rows and stays within
//! `[0, content_height - window_height]`.

use macroquad::math::Vec2;

use super::element::{Element, Response, UpdateCx, ViewCx};
use super::layout::{Row, RowSet};
use super::painter::{fill, Painter};
use super::{theme, Lock, Quad};

/// Width of the scroll indicator on the right edge
const BAR_WIDTH: f32 = 4.0;

pub struct ScrollList<C> {
    items: RowSet<C>,
    visible_rows: usize,
    width: f32,
    offset: usize,
    /// Lock slot for the list's own rows
    inner_lock: Option<Lock>,
    origin: Vec2,
    bounds: Quad,
}

impl<C> ScrollList<C> {
    /// A list showing `visible_rows` rows at a time, `width` wide
    pub fn new(visible_rows: usize, width: f32) -> Self {
        Self {
            items: RowSet::new(),
            visible_rows: visible_rows.max(1),
            width,
            offset: 0,
            inner_lock: None,
            origin: Vec2::ZERO,
            bounds: Quad::default(),
        }
    }

    pub fn with_row(mut self, row: Row<C>) -> Self {
        self.items.push(row);
        self
    }

    pub fn push(&mut self, row: Row<C>) {
        self.items.push(row);
    }

    pub fn offset(&self) -> usize {
        self.offset
    }

    pub fn items(&self) -> &RowSet<C> {
        &self.items
    }

    /// Largest offset that still fills the window
    pub fn max_offset(&self) -> usize {
        self.items.active_count().saturating_sub(self.visible_rows)
    }

    /// Offsets below zero or past the end are clamped
    pub fn scroll_to(&mut self, offset: isize) -> bool {
        let clamped = offset.clamp(0, self.max_offset() as isize) as usize;
        let changed = clamped != self.offset;
        self.offset = clamped;
        changed
    }

    fn pitch(cx: &ViewCx<'_>) -> f32 {
        cx.config.row_height + cx.config.spacing
    }

    fn layout(&mut self, cx: &ViewCx<'_>) -> Quad {
        self.offset = self.offset.min(self.max_offset());
        let shown = self.items.active_count().min(self.visible_rows);
        self.items.set_window(Some(self.offset..self.offset + shown));

        let pitch = Self::pitch(cx);
        let window_h = (pitch * self.visible_rows as f32 - cx.config.spacing).max(0.0);
        // Top-align when there are fewer rows than the window holds
        let empty_rows = (self.visible_rows - shown) as f32;
        self.items.build(cx, Vec2::new(self.origin.x, self.origin.y + empty_rows * pitch));
        self.bounds = Quad::new(self.origin.x, self.origin.y, self.width, window_h);
        self.bounds
    }

    /// Take or give back the outer lock to mirror the list's own rows
    fn mirror_lock(&self, cx: &mut UpdateCx<'_, C>) {
        match self.inner_lock {
            Some(Lock::Popup(_)) => {
                if !cx.popup_open() {
                    cx.open_popup();
                }
            }
            Some(Lock::Element(_)) => {
                if !cx.has_lock() {
                    cx.lock();
                }
            }
            None => {
                cx.release();
                cx.close_popup();
            }
        }
    }
}

impl<C> Element<C> for ScrollList<C> {
    fn setup(&mut self, painter: &dyn Painter) {
        self.items.setup(painter);
    }

    fn build(&mut self, cx: &ViewCx<'_>, x: f32, y: f32) -> Quad {
        self.origin = Vec2::new(x, y);
        self.layout(cx)
    }

    fn update(&mut self, cx: &mut UpdateCx<'_, C>) -> Response {
        let idle = self.inner_lock.is_none();
        if idle && cx.frame.scroll != 0 && self.bounds.contains(cx.frame.pointer) {
            // wheel up shows earlier rows
            let target = self.offset as isize - cx.frame.scroll as isize;
            if self.scroll_to(target) {
                let view = cx.view();
                self.layout(&view);
            }
            return Response::Idle;
        }

        let response = self.items.dispatch_scoped(
            &mut self.inner_lock,
            false,
            cx.ctx,
            cx.frame,
            cx.painter,
            cx.config,
        );
        self.mirror_lock(cx);

        if response == Response::Rebuild {
            let view = cx.view();
            self.layout(&view);
        }
        Response::Idle
    }

    fn sync(&mut self, ctx: &C) {
        self.items.sync(ctx);
    }

    fn draw(&self, cx: &ViewCx<'_>) {
        fill(cx.painter, &self.bounds, theme::SCROLL_TRACK);

        let frame = cx.frame.scoped_view(self.inner_lock, false);
        let inner = ViewCx { frame: &frame, ..*cx };
        self.items.draw(&inner);

        let total = self.items.active_count();
        if total > self.visible_rows {
            let h = self.bounds.height * self.visible_rows as f32 / total as f32;
            let travel = self.bounds.height - h;
            let t = self.offset as f32 / self.max_offset() as f32;
            let bar = Quad::new(self.bounds.right() - BAR_WIDTH, self.bounds.top() - h - travel * t, BAR_WIDTH, h);
            fill(cx.painter, &bar, theme::TEXT_DIM);
        }
    }

    fn draw_tips(&self, cx: &ViewCx<'_>) {
        let frame = cx.frame.scoped_view(self.inner_lock, false);
        self.items.draw_tips(&ViewCx { frame: &frame, ..*cx });
    }

    fn draw_popup(&self, cx: &ViewCx<'_>) {
        let frame = cx.frame.scoped_view(self.inner_lock, false);
        self.items.draw_popup(&ViewCx { frame: &frame, ..*cx });
    }

    fn shut_down(&mut self, painter: &dyn Painter) {
        self.items.shut_down(painter);
    }

    fn bounds(&self) -> Quad {
        self.bounds
    }
}
