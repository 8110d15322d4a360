//! Rows and the layout engine
//!
//! Elements flow left-to-right inside a row; active rows stack bottom-to-top
//! from an origin. Rows are declared top-down, so the last active row ends up
//! at the bottom next to the origin.
//!
//! The same [`RowSet`] backs the panel, popups and scroll lists, so event
//! routing and lock handling behave identically at every level.

use std::ops::Range;

use macroquad::math::Vec2;

use super::element::{Element, Response, UpdateCx, ViewCx};
use super::painter::Painter;
use super::{ElementId, FrameState, Lock, Quad};
use crate::config::PanelConfig;

/// A labelled, switchable line of elements
pub struct Row<C> {
    pub label: String,
    pub active: bool,
    elements: Vec<Box<dyn Element<C>>>,
}

impl<C> Row<C> {
    pub fn new(label: impl Into<String>) -> Self {
        Self { label: label.into(), active: true, elements: Vec::new() }
    }

    /// Builder: append an element
    pub fn with(mut self, element: impl Element<C> + 'static) -> Self {
        self.elements.push(Box::new(element));
        self
    }

    pub fn push(&mut self, element: impl Element<C> + 'static) {
        self.elements.push(Box::new(element));
    }

    pub fn inactive(mut self) -> Self {
        self.active = false;
        self
    }

    pub fn len(&self) -> usize {
        self.elements.len()
    }

    pub fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }

    pub fn elements(&self) -> impl Iterator<Item = &dyn Element<C>> {
        self.elements.iter().map(|e| e.as_ref())
    }

    pub fn setup(&mut self, painter: &dyn Painter) {
        for element in self.elements.iter_mut() {
            element.setup(painter);
        }
    }
}

/// Ordered rows plus the routing rules shared by every container
pub struct RowSet<C> {
    rows: Vec<Row<C>>,
    /// Positions in the active-row list that are live; `None` means all
    window: Option<Range<usize>>,
}

impl<C> Default for RowSet<C> {
    fn default() -> Self {
        Self { rows: Vec::new(), window: None }
    }
}

impl<C> RowSet<C> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_rows(rows: Vec<Row<C>>) -> Self {
        Self { rows, window: None }
    }

    pub fn push(&mut self, row: Row<C>) {
        self.rows.push(row);
    }

    pub fn rows(&self) -> &[Row<C>] {
        &self.rows
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Set every row carrying `label`; unknown labels are a silent no-op
    pub fn set_active(&mut self, label: &str, active: bool) -> bool {
        let mut found = false;
        for row in self.rows.iter_mut().filter(|r| r.label == label) {
            row.active = active;
            found = true;
        }
        if !found {
            tracing::trace!(label, "no row with this label");
        }
        found
    }

    /// Flip every row carrying `label`
    pub fn toggle(&mut self, label: &str) -> bool {
        let mut found = false;
        for row in self.rows.iter_mut().filter(|r| r.label == label) {
            row.active = !row.active;
            found = true;
        }
        found
    }

    pub fn is_active(&self, label: &str) -> bool {
        self.rows.iter().any(|r| r.label == label && r.active)
    }

    pub fn active_count(&self) -> usize {
        self.rows.iter().filter(|r| r.active).count()
    }

    /// Restrict build, update and draw to a slice of the active rows
    pub fn set_window(&mut self, window: Option<Range<usize>>) {
        self.window = window;
    }

    /// Indices of rows taking part in build, update and draw
    pub fn live_rows(&self) -> Vec<usize> {
        let active = self.rows.iter().enumerate().filter(|(_, r)| r.active).map(|(i, _)| i);
        match &self.window {
            Some(w) => active.skip(w.start).take(w.end.saturating_sub(w.start)).collect(),
            None => active.collect(),
        }
    }

    pub fn element(&self, id: ElementId) -> Option<&dyn Element<C>> {
        self.rows.get(id.row)?.elements.get(id.index).map(|e| e.as_ref())
    }

    pub fn element_mut(&mut self, id: ElementId) -> Option<&mut Box<dyn Element<C>>> {
        self.rows.get_mut(id.row)?.elements.get_mut(id.index)
    }

    /// Bounds of every live element, in row order
    pub fn live_bounds(&self) -> Vec<Quad> {
        self.live_rows()
            .into_iter()
            .flat_map(|r| self.rows[r].elements.iter().map(|e| e.bounds()))
            .collect()
    }

    pub fn setup(&mut self, painter: &dyn Painter) {
        for row in self.rows.iter_mut() {
            row.setup(painter);
        }
    }

    pub fn sync(&mut self, ctx: &C) {
        for element in self.rows.iter_mut().flat_map(|r| r.elements.iter_mut()) {
            element.sync(ctx);
        }
    }

    pub fn shut_down(&mut self, painter: &dyn Painter) {
        for element in self.rows.iter_mut().flat_map(|r| r.elements.iter_mut()) {
            element.shut_down(painter);
        }
    }

    /// Place every live element upward from `origin`
    ///
    /// Returns the union of the placed quads, or `None` when nothing is live.
    pub fn build(&mut self, cx: &ViewCx<'_>, origin: Vec2) -> Option<Quad> {
        let spacing = cx.config.spacing;
        let mut union: Option<Quad> = None;
        let mut y = origin.y;

        for r in self.live_rows().into_iter().rev() {
            let mut x = origin.x;
            let mut row_height: f32 = 0.0;
            for element in self.rows[r].elements.iter_mut() {
                let quad = element.build(cx, x, y);
                x = quad.right() + spacing;
                row_height = row_height.max(quad.height);
                union = Some(match union {
                    Some(u) => u.union(&quad),
                    None => quad,
                });
            }
            y += row_height + spacing;
        }
        union
    }

    /// Route the current event through the rows
    ///
    /// A locked target gets the event exclusively. Otherwise live elements are
    /// updated in row order until one of them takes the lock.
    pub fn dispatch(
        &mut self,
        ctx: &mut C,
        frame: &mut FrameState,
        painter: &dyn Painter,
        config: &PanelConfig,
    ) -> Response {
        if let Some(id) = frame.lock_target() {
            let Some(element) = self.element_mut(id) else {
                tracing::trace!(?id, "clearing lock held by a missing element");
                frame.clear_lock();
                return Response::Idle;
            };
            let mut cx = UpdateCx { ctx, frame, painter, config, id };
            return element.update(&mut cx);
        }
        if frame.is_locked() {
            return Response::Idle;
        }

        let mut response = Response::Idle;
        for r in self.live_rows() {
            for (index, element) in self.rows[r].elements.iter_mut().enumerate() {
                let id = ElementId::new(r, index);
                let mut cx = UpdateCx { ctx: &mut *ctx, frame: &mut *frame, painter, config, id };
                response = response.merge(element.update(&mut cx));
                if frame.is_locked() {
                    return response;
                }
            }
        }
        response
    }

    /// Dispatch with this set's own lock slot swapped in
    pub(crate) fn dispatch_scoped(
        &mut self,
        inner: &mut Option<Lock>,
        popup: bool,
        ctx: &mut C,
        frame: &mut FrameState,
        painter: &dyn Painter,
        config: &PanelConfig,
    ) -> Response {
        let saved = frame.enter_scope(*inner, popup);
        let response = self.dispatch(ctx, frame, painter, config);
        *inner = frame.exit_scope(saved);
        response
    }

    pub fn draw(&self, cx: &ViewCx<'_>) {
        for r in self.live_rows() {
            for element in &self.rows[r].elements {
                element.draw(cx);
            }
        }
    }

    pub fn draw_tips(&self, cx: &ViewCx<'_>) {
        for r in self.live_rows() {
            for element in &self.rows[r].elements {
                element.draw_tips(cx);
            }
        }
    }

    /// Draw the popup of whichever element holds the popup lock
    pub fn draw_popup(&self, cx: &ViewCx<'_>) {
        if let Some(element) = cx.frame.locked_popup().and_then(|id| self.element(id)) {
            element.draw_popup(cx);
        }
    }
}
