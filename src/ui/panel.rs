//! Panel orchestrator
//!
//! The panel owns the frame state, the dot, the move handle and the row set.
//! The host forwards every input event to [`Panel::update`] and calls
//! [`Panel::draw`] once per frame.
//!
//! Per event:
//! - rebuild if something marked the layout dirty
//! - route to the lock holder if there is one
//! - otherwise the dot, then (panel open) the move handle, then the rows
//! - clamp and persist the position if it moved

use macroquad::math::Vec2;

use super::dot::Dot;
use super::draw_handle::DrawHandle;
use super::element::{Response, ViewCx};
use super::layout::{Row, RowSet};
use super::move_handle::MoveHandle;
use super::painter::{fill, stroke, Painter};
use super::{theme, EventKind, FrameState, InputEvent, Lock, Owner, Quad};
use crate::config::PanelConfig;
use crate::error::OverlayError;
use crate::prefs::PositionStore;

pub struct Panel<C> {
    frame: FrameState,
    /// Unscaled configuration as supplied by the host
    base_config: PanelConfig,
    config: PanelConfig,
    dot: Dot<C>,
    handle: MoveHandle,
    rows: RowSet<C>,
    painter: Box<dyn Painter>,
    store: Box<dyn PositionStore>,
    draw_handle: Option<DrawHandle>,
    dirty: bool,
    built: bool,
    bounds: Quad,
}

impl<C> Panel<C> {
    /// Create a panel, taking this thread's draw handle
    pub fn new(
        config: PanelConfig,
        painter: Box<dyn Painter>,
        store: Box<dyn PositionStore>,
    ) -> Result<Self, OverlayError> {
        let draw_handle = DrawHandle::acquire()?;
        Ok(Self {
            frame: FrameState::new(),
            dot: Dot::new(config.dot_radius),
            base_config: config.clone(),
            config,
            handle: MoveHandle::new(),
            rows: RowSet::new(),
            painter,
            store,
            draw_handle: Some(draw_handle),
            dirty: true,
            built: false,
            bounds: Quad::default(),
        })
    }

    pub fn with_row(mut self, row: Row<C>) -> Self {
        self.add_row(row);
        self
    }

    /// Append a row; its elements acquire their resources now
    pub fn add_row(&mut self, mut row: Row<C>) {
        row.setup(self.painter.as_ref());
        self.rows.push(row);
        self.dirty = true;
    }

    /// Show or hide every row labelled `label`
    ///
    /// Unknown labels are ignored. Returns whether anything changed.
    pub fn set_row_active(&mut self, label: &str, active: bool) -> bool {
        let changed = self.rows.rows().iter().any(|r| r.label == label && r.active != active);
        if changed {
            self.rows.set_active(label, active);
            self.dirty = true;
        } else {
            tracing::trace!(label, active, "row activation unchanged");
        }
        changed
    }

    pub fn toggle_row(&mut self, label: &str) -> bool {
        let found = self.rows.toggle(label);
        if found {
            self.dirty = true;
        } else {
            tracing::trace!(label, "no row to toggle");
        }
        found
    }

    pub fn is_row_active(&self, label: &str) -> bool {
        self.rows.is_active(label)
    }

    /// Record new screen metrics; pixel sizes follow the scale factor
    pub fn set_viewport(&mut self, width: f32, height: f32, scale: f32) {
        let changed = width != self.frame.screen_width
            || height != self.frame.screen_height
            || scale != self.frame.scale;
        if !changed {
            return;
        }
        self.frame.set_viewport(width, height, scale);
        self.config = self.base_config.scaled(self.frame.scale);
        self.dirty = true;
    }

    /// Move the panel anchor; the new position is clamped and persisted
    pub fn set_position(&mut self, x: f32, y: f32) {
        self.frame.position = Vec2::new(x, y);
        self.built = true;
        self.settle(true);
        self.dirty = false;
    }

    pub fn set_open(&mut self, open: bool) {
        self.frame.panel_open = open;
    }

    /// Lay out every active row
    ///
    /// The first build reads the persisted position. A position outside the
    /// clamped region is snapped and the layout runs once more.
    pub fn build(&mut self) {
        if !self.built {
            if let Some((x, y)) = self.store.load() {
                self.frame.position = Vec2::new(x, y);
            }
            self.built = true;
        }
        self.settle(false);
        self.dirty = false;
    }

    /// Rebuild if rows or the viewport changed since the last build
    pub fn build_if_dirty(&mut self) -> bool {
        if self.dirty || !self.built {
            self.build();
            true
        } else {
            false
        }
    }

    fn layout(&mut self) -> Quad {
        let padding = self.config.padding;
        let position = self.frame.position;
        let cx = ViewCx { frame: &self.frame, painter: self.painter.as_ref(), config: &self.config };
        let content = self.rows.build(&cx, position + Vec2::splat(padding));

        self.bounds = match content {
            Some(union) => Quad::new(
                position.x,
                position.y,
                union.right() - position.x + padding,
                union.top() - position.y + padding,
            ),
            None => Quad::new(position.x, position.y, padding * 2.0, padding * 2.0),
        };
        self.handle.build(&self.bounds, &self.config);
        self.dot.place(&self.bounds, &self.config);
        self.bounds
    }

    /// Lay out, clamp to the viewport, and persist when the anchor changed
    fn settle(&mut self, moved: bool) {
        let quad = self.layout();
        let clamped = MoveHandle::clamp(&mut self.frame, quad.width, quad.height, &self.config);
        if clamped {
            self.layout();
        }
        if moved || clamped {
            self.persist();
        }
    }

    fn persist(&mut self) {
        let p = self.frame.position;
        if let Err(e) = self.store.store((p.x, p.y)) {
            tracing::warn!("failed to store panel position: {}", e);
        }
    }

    /// Feed one host event through the panel
    ///
    /// Returns whether the panel consumed it; unconsumed events belong to
    /// the host's own view.
    pub fn update(&mut self, ctx: &mut C, event: &InputEvent) -> bool {
        if event.kind == EventKind::Timer && self.config.return_on_timer {
            return false;
        }
        if self.draw_handle.is_none() {
            return false;
        }

        self.frame.update(event);
        self.build_if_dirty();

        let before = self.frame.position;
        let (consumed, response) = self.route(ctx);
        if self.frame.position != before {
            self.settle(true);
        }
        if response == Response::Rebuild {
            self.dirty = true;
        }

        self.rows.sync(ctx);
        consumed
    }

    fn route(&mut self, ctx: &mut C) -> (bool, Response) {
        let painter = self.painter.as_ref();
        match self.frame.lock() {
            Some(Lock::Element(Owner::Dot)) => {
                self.dot.update(ctx, &mut self.frame, &self.config);
                return (true, Response::Idle);
            }
            Some(Lock::Element(Owner::MoveHandle)) => {
                self.handle.update(&mut self.frame);
                return (true, Response::Idle);
            }
            Some(_) => {
                let response = self.rows.dispatch(ctx, &mut self.frame, painter, &self.config);
                return (true, response);
            }
            None => {}
        }

        if self.dot.update(ctx, &mut self.frame, &self.config) {
            self.handle.clear_hover();
            return (true, Response::Idle);
        }
        if !self.frame.panel_open {
            return (false, Response::Idle);
        }

        self.handle.update(&mut self.frame);
        if self.frame.is_locked() {
            return (true, Response::Idle);
        }

        let response = self.rows.dispatch(ctx, &mut self.frame, painter, &self.config);
        let pointer = self.frame.pointer;
        let consumed = self.frame.is_locked() || self.bounds.contains(pointer) || self.handle.hovered(pointer);
        (consumed, response)
    }

    /// Draw the overlay
    ///
    /// Background, move handle, elements, tips, dot, then the locked popup on
    /// top. A closed panel draws only its dot.
    pub fn draw(&self) {
        if self.draw_handle.is_none() {
            return;
        }
        let cx = ViewCx { frame: &self.frame, painter: self.painter.as_ref(), config: &self.config };
        if !self.frame.panel_open {
            self.dot.draw(&cx);
            return;
        }

        fill(cx.painter, &self.bounds, theme::PANEL_BG);
        stroke(cx.painter, &self.bounds, theme::PANEL_BORDER, 1.0);
        self.handle.draw(&cx);
        self.rows.draw(&cx);
        self.rows.draw_tips(&cx);
        self.dot.draw(&cx);
        self.rows.draw_popup(&cx);
    }

    /// Release every element's resources and the draw handle
    ///
    /// Runs at most once; dropping the panel calls it too.
    pub fn shut_down(&mut self) {
        let Some(handle) = self.draw_handle.take() else {
            return;
        };
        self.frame.clear_lock();
        self.rows.shut_down(self.painter.as_ref());
        handle.release();
        tracing::debug!("panel shut down");
    }

    pub fn is_shut_down(&self) -> bool {
        self.draw_handle.is_none()
    }

    pub fn frame(&self) -> &FrameState {
        &self.frame
    }

    pub fn config(&self) -> &PanelConfig {
        &self.config
    }

    pub fn bounds(&self) -> Quad {
        self.bounds
    }

    pub fn position(&self) -> Vec2 {
        self.frame.position
    }

    pub fn is_open(&self) -> bool {
        self.frame.panel_open
    }

    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    pub fn rows(&self) -> &RowSet<C> {
        &self.rows
    }

    pub fn dot(&self) -> &Dot<C> {
        &self.dot
    }

    /// Register drag and scroll callbacks on the dot
    pub fn dot_mut(&mut self) -> &mut Dot<C> {
        &mut self.dot
    }

    pub fn move_handle(&self) -> &MoveHandle {
        &self.handle
    }
}

impl<C> Drop for Panel<C> {
    fn drop(&mut self) {
        self.shut_down();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::prefs::MemoryPositionStore;
    use crate::ui::painter::testing::RecordingPainter;
    use crate::ui::{Button, Dropdown, Element, ElementId, Label, NumberInput, Spacer, UpdateCx};
    use std::cell::RefCell;
    use std::rc::Rc;

    /// Store the test can inspect after handing it to the panel
    #[derive(Clone, Default)]
    struct SharedStore(Rc<RefCell<MemoryPositionStore>>);

    impl PositionStore for SharedStore {
        fn load(&self) -> Option<(f32, f32)> {
            self.0.borrow().load()
        }

        fn store(&mut self, position: (f32, f32)) -> Result<(), OverlayError> {
            self.0.borrow_mut().store(position)
        }
    }

    #[derive(Default)]
    struct Ctx {
        size: f32,
        mode: usize,
        resets: u32,
    }

    fn panel_at(x: f32, y: f32) -> (Panel<Ctx>, SharedStore) {
        let store = SharedStore::default();
        store.0.borrow_mut().position = Some((x, y));
        let mut panel = Panel::new(PanelConfig::default(), Box::new(RecordingPainter::new()), Box::new(store.clone()))
            .unwrap();
        panel.set_viewport(1920.0, 1080.0, 1.0);
        (panel, store)
    }

    fn tool_panel() -> (Panel<Ctx>, SharedStore) {
        let (panel, store) = panel_at(200.0, 200.0);
        let modes = vec!["Vert".to_string(), "Edge".to_string(), "Face".to_string()];
        let panel = panel
            .with_row(Row::new("title").with(Label::new("Tools")))
            .with_row(Row::new("size").with(NumberInput::new("Size", |c: &Ctx| c.size, |c: &mut Ctx, v| c.size = v)))
            .with_row(Row::new("mode").with(Dropdown::new("Mode", modes, |c: &Ctx| c.mode, |c: &mut Ctx, i| c.mode = i)))
            .with_row(Row::new("actions").with(Button::new("Reset").on_click(|c: &mut Ctx| c.resets += 1)));
        (panel, store)
    }

    /// Grows by one step on every press inside it
    struct Grower {
        height: f32,
        bounds: Quad,
    }

    impl Element<Ctx> for Grower {
        fn build(&mut self, _cx: &ViewCx<'_>, x: f32, y: f32) -> Quad {
            self.bounds = Quad::new(x, y, 40.0, self.height);
            self.bounds
        }

        fn update(&mut self, cx: &mut UpdateCx<'_, Ctx>) -> Response {
            if cx.frame.pressed && self.bounds.contains(cx.frame.pointer) {
                self.height += 20.0;
                Response::Rebuild
            } else {
                Response::Idle
            }
        }

        fn draw(&self, _cx: &ViewCx<'_>) {}

        fn bounds(&self) -> Quad {
            self.bounds
        }
    }

    fn center_of(panel: &Panel<Ctx>, row: usize) -> Vec2 {
        panel.rows().element(ElementId::new(row, 0)).unwrap().bounds().center()
    }

    #[test]
    fn test_build_contains_elements_and_is_idempotent() {
        let (mut panel, _) = tool_panel();
        panel.build();
        let first = panel.rows().live_bounds();
        let bounds = panel.bounds();
        for q in &first {
            assert!(bounds.encloses(q));
        }

        panel.build();
        assert_eq!(panel.rows().live_bounds(), first);
        assert_eq!(panel.bounds(), bounds);
        assert_eq!(bounds.bl, Vec2::new(200.0, 200.0));
    }

    #[test]
    fn test_empty_panel_is_padding_sized() {
        let (mut panel, _) = panel_at(200.0, 200.0);
        panel.build();
        assert_eq!(panel.bounds().size(), Vec2::new(12.0, 12.0));
    }

    #[test]
    fn test_deactivated_row_leaves_layout() {
        let config = PanelConfig::default();
        let (panel, _) = panel_at(200.0, 200.0);
        let mut panel = panel
            .with_row(Row::new("a").with(Spacer::new(50.0, 20.0)))
            .with_row(Row::new("b").with(Spacer::new(80.0, 20.0)))
            .with_row(Row::new("c").with(Spacer::new(60.0, 20.0)));
        panel.build();
        let tall = panel.bounds();
        let top_row = panel.rows().element(ElementId::new(0, 0)).unwrap().bounds();

        assert!(panel.set_row_active("a", false));
        assert!(!panel.set_row_active("a", false));
        assert!(!panel.set_row_active("missing", true));
        panel.build();

        assert_eq!(panel.rows().live_bounds().len(), 2);
        assert_eq!(panel.bounds().height, tall.height - 20.0 - config.spacing);
        assert!(!panel.bounds().encloses(&top_row));
        for q in panel.rows().live_bounds() {
            assert!(panel.bounds().encloses(&q));
        }
    }

    #[test]
    fn test_dot_click_opens_panel() {
        let (mut panel, _) = tool_panel();
        let mut ctx = Ctx::default();
        panel.build();
        let dot = panel.dot().center();
        assert_eq!(dot, Vec2::new(200.0 - 8.0 - 10.0, panel.bounds().top() + 8.0));

        assert!(panel.update(&mut ctx, &InputEvent::press(dot.x, dot.y)));
        assert!(panel.update(&mut ctx, &InputEvent::release(dot.x + 2.0, dot.y + 1.0)));
        assert!(panel.is_open());
    }

    #[test]
    fn test_closed_panel_ignores_elements() {
        let (mut panel, _) = tool_panel();
        let mut ctx = Ctx::default();
        panel.build();
        let reset = center_of(&panel, 3);

        assert!(!panel.update(&mut ctx, &InputEvent::press(reset.x, reset.y)));
        assert_eq!(ctx.resets, 0);

        panel.set_open(true);
        assert!(panel.update(&mut ctx, &InputEvent::press(reset.x, reset.y)));
        assert_eq!(ctx.resets, 1);
    }

    #[test]
    fn test_open_popup_blocks_other_elements() {
        let (mut panel, _) = tool_panel();
        let mut ctx = Ctx { size: 2.0, ..Default::default() };
        panel.set_open(true);
        panel.build();
        let size = center_of(&panel, 1);
        let mode = center_of(&panel, 2);
        let reset = center_of(&panel, 3);

        panel.update(&mut ctx, &InputEvent::press(mode.x, mode.y));
        assert_eq!(panel.frame().locked_popup(), Some(ElementId::new(2, 0)));

        // wheel over the size field would normally nudge it
        panel.update(&mut ctx, &InputEvent::scroll(size.x, size.y, 1));
        panel.update(&mut ctx, &InputEvent::mouse_move(reset.x, reset.y));
        assert_eq!(ctx.size, 2.0);
        assert_eq!(ctx.resets, 0);
        assert_eq!(panel.frame().locked_popup(), Some(ElementId::new(2, 0)));

        // the reset button is outside the option list: the click only closes it
        panel.update(&mut ctx, &InputEvent::press(reset.x, reset.y));
        assert!(!panel.frame().is_locked());
        assert_eq!(ctx.resets, 0);
        assert_eq!(ctx.mode, 0);
    }

    #[test]
    fn test_handle_drag_is_clamped_and_persisted() {
        let (panel, store) = panel_at(400.0, 300.0);
        let mut panel = panel.with_row(Row::new("wide").with(Spacer::new(288.0, 40.0)));
        let mut ctx = Ctx::default();
        panel.set_open(true);
        panel.build();
        assert_eq!(panel.bounds().width, 300.0);

        // grab the vertical strip 3px left of the panel
        assert!(panel.update(&mut ctx, &InputEvent::press(397.0, 310.0)));
        assert!(panel.frame().is_locked_by(Owner::MoveHandle));

        panel.update(&mut ctx, &InputEvent::mouse_move(-503.0, 310.0));
        assert_eq!(panel.position(), Vec2::new(20.0 + 8.0 + 20.0, 300.0));
        assert_eq!(store.0.borrow().position, Some((48.0, 300.0)));

        panel.update(&mut ctx, &InputEvent::mouse_move(2500.0, 310.0));
        assert_eq!(panel.position().x, 1920.0 - 20.0 - 300.0);

        panel.update(&mut ctx, &InputEvent::release(2500.0, 310.0));
        assert!(!panel.frame().is_locked());
        assert_eq!(panel.bounds().bl, panel.position());
    }

    #[test]
    fn test_stale_position_snapped_on_first_build() {
        let (mut panel, store) = panel_at(-100.0, 5000.0);
        panel.add_row(Row::new("r").with(Spacer::new(100.0, 20.0)));
        panel.build();

        let height = panel.bounds().height;
        assert_eq!(panel.position(), Vec2::new(48.0, 1080.0 - 20.0 - height - 8.0));
        assert_eq!(store.0.borrow().writes, 1);

        panel.build();
        assert_eq!(store.0.borrow().writes, 1);
    }

    #[test]
    fn test_timer_events_pass_through() {
        let (mut panel, _) = tool_panel();
        let mut ctx = Ctx::default();
        assert!(!panel.update(&mut ctx, &InputEvent::timer(0.0, 0.0)));
        assert!(panel.is_dirty());
    }

    #[test]
    fn test_shut_down_frees_images_once() {
        let painter = RecordingPainter::new().with_images(&["reset.png"]);
        let log = painter.log();
        let mut panel: Panel<Ctx> =
            Panel::new(PanelConfig::default(), Box::new(painter), Box::new(MemoryPositionStore::new())).unwrap();
        panel.add_row(Row::new("r").with(Button::new("Reset").with_image("reset.png")));
        assert_eq!(log.borrow().loaded.len(), 1);
        assert!(DrawHandle::is_held());

        panel.shut_down();
        panel.shut_down();
        assert_eq!(log.borrow().freed.len(), 1);
        assert!(!DrawHandle::is_held());

        drop(panel);
        assert_eq!(log.borrow().freed.len(), 1);
    }

    #[test]
    fn test_second_panel_on_thread_is_refused() {
        let (panel, _) = panel_at(0.0, 0.0);
        let second: Result<Panel<Ctx>, _> =
            Panel::new(PanelConfig::default(), Box::new(RecordingPainter::new()), Box::new(MemoryPositionStore::new()));
        assert!(matches!(second, Err(OverlayError::DrawHandleHeld)));

        drop(panel);
        let third: Result<Panel<Ctx>, _> =
            Panel::new(PanelConfig::default(), Box::new(RecordingPainter::new()), Box::new(MemoryPositionStore::new()));
        assert!(third.is_ok());
    }

    #[test]
    fn test_closed_panel_draws_only_dot() {
        let painter = RecordingPainter::new();
        let log = painter.log();
        let mut panel: Panel<Ctx> =
            Panel::new(PanelConfig::default(), Box::new(painter), Box::new(MemoryPositionStore::new())).unwrap();
        panel.add_row(Row::new("t").with(Label::new("Tools")));
        panel.build();

        panel.draw();
        assert!(log.borrow().texts().is_empty());

        panel.set_open(true);
        panel.draw();
        assert_eq!(log.borrow().texts(), vec!["Tools".to_string()]);
    }

    #[test]
    fn test_rebuild_response_relayouts_on_next_event() {
        let (panel, _) = panel_at(200.0, 200.0);
        let mut panel = panel.with_row(Row::new("grow").with(Grower { height: 20.0, bounds: Quad::default() }));
        let mut ctx = Ctx::default();
        panel.set_open(true);
        panel.build();
        assert_eq!(panel.bounds().height, 32.0);

        assert!(panel.update(&mut ctx, &InputEvent::press(216.0, 216.0)));
        assert!(panel.is_dirty());
        // geometry is stale until the next event
        assert_eq!(panel.bounds().height, 32.0);

        panel.update(&mut ctx, &InputEvent::release(216.0, 216.0));
        assert!(!panel.is_dirty());
        assert_eq!(panel.bounds().height, 52.0);
        let grown = panel.rows().element(ElementId::new(0, 0)).unwrap().bounds();
        assert_eq!(grown.height, 40.0);
        assert!(panel.bounds().encloses(&grown));
        assert_eq!(panel.dot().center().y, panel.bounds().top() + 8.0);
    }

    #[test]
    fn test_scale_change_rebuilds_with_scaled_margins() {
        let (panel, store) = panel_at(-500.0, 300.0);
        let mut panel = panel.with_row(Row::new("r").with(Spacer::new(100.0, 20.0)));
        panel.build();
        assert_eq!(panel.position().x, 48.0);
        assert_eq!(panel.dot().radius(), 10.0);

        panel.set_viewport(1920.0, 1080.0, 2.0);
        assert!(panel.is_dirty());
        assert_eq!(panel.config().warp_pad, 40.0);
        assert!(panel.build_if_dirty());

        assert_eq!(panel.position(), Vec2::new((20.0 + 8.0 + 20.0) * 2.0, 300.0));
        assert_eq!(panel.dot().radius(), 20.0);
        assert_eq!(panel.bounds().width, 100.0 + 12.0 * 2.0);
        assert_eq!(store.0.borrow().position, Some((96.0, 300.0)));

        // same metrics again change nothing
        panel.set_viewport(1920.0, 1080.0, 2.0);
        assert!(!panel.is_dirty());
    }

    #[test]
    fn test_dot_hover_clears_handle_highlight() {
        let (mut panel, _) = tool_panel();
        let mut ctx = Ctx::default();
        panel.set_open(true);
        panel.build();

        panel.update(&mut ctx, &InputEvent::mouse_move(197.0, 210.0));
        assert!(panel.move_handle().is_hot());

        let dot = panel.dot().center();
        assert!(panel.update(&mut ctx, &InputEvent::mouse_move(dot.x, dot.y)));
        assert!(!panel.move_handle().is_hot());
    }
}
