//! Popup sub-panels
//!
//! A popup is a trigger sitting in a row plus a floating panel of its own
//! rows, anchored above the trigger. While open it holds the popup lock, so
//! it alone receives events and is drawn on top of everything else.

use std::cell::Cell;
use std::rc::Rc;

use macroquad::math::Vec2;

use super::element::{draw_tip, Element, Response, UpdateCx, ViewCx};
use super::layout::{Row, RowSet};
use super::painter::{fill, stroke, text_in, Painter};
use super::{theme, Lock, Quad};

/// Hook run after each event the open popup handles; return true to rebuild
pub type PopupHook<C> = Box<dyn FnMut(&mut C, &mut RowSet<C>) -> bool>;

/// Lets callbacks inside a popup ask for it to close
#[derive(Debug, Clone, Default)]
pub struct PopupCloser(Rc<Cell<bool>>);

impl PopupCloser {
    pub fn close(&self) {
        self.0.set(true);
    }

    fn take(&self) -> bool {
        self.0.replace(false)
    }
}

pub struct Popup<C> {
    title: String,
    tip: Option<String>,
    rows: RowSet<C>,
    inner_lock: Option<Lock>,
    update_func: Option<PopupHook<C>>,
    needs_rebuild: bool,
    closer: PopupCloser,
    open: bool,
    trigger: Quad,
    panel: Quad,
}

impl<C> Popup<C> {
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            tip: None,
            rows: RowSet::new(),
            inner_lock: None,
            update_func: None,
            needs_rebuild: false,
            closer: PopupCloser::default(),
            open: false,
            trigger: Quad::default(),
            panel: Quad::default(),
        }
    }

    pub fn with_row(mut self, row: Row<C>) -> Self {
        self.rows.push(row);
        self
    }

    pub fn with_tip(mut self, tip: impl Into<String>) -> Self {
        self.tip = Some(tip.into());
        self
    }

    /// Hook that may switch the popup's own rows on and off
    pub fn with_update_func(mut self, f: impl FnMut(&mut C, &mut RowSet<C>) -> bool + 'static) -> Self {
        self.update_func = Some(Box::new(f));
        self
    }

    /// Handle for callbacks that should close the popup
    pub fn closer(&self) -> PopupCloser {
        self.closer.clone()
    }

    pub fn is_open(&self) -> bool {
        self.open
    }

    pub fn needs_rebuild(&self) -> bool {
        self.needs_rebuild
    }

    pub fn rows(&self) -> &RowSet<C> {
        &self.rows
    }

    pub fn panel_bounds(&self) -> Quad {
        self.panel
    }

    /// Lay out the floating panel above the trigger, kept on screen
    fn layout_panel(&mut self, cx: &ViewCx<'_>) {
        let pad = cx.config.padding;
        let gap = cx.config.spacing;
        let origin = Vec2::new(self.trigger.left() + pad, self.trigger.top() + gap + pad);
        let Some(content) = self.rows.build(cx, origin) else {
            self.panel = Quad::new(self.trigger.left(), self.trigger.top() + gap, pad * 2.0, pad * 2.0);
            return;
        };

        let mut shift = Vec2::ZERO;
        let w = content.width + pad * 2.0;
        let h = content.height + pad * 2.0;
        let right = self.trigger.left() + w;
        if right > cx.frame.screen_width {
            shift.x = (cx.frame.screen_width - right).max(-self.trigger.left());
        }
        if self.trigger.top() + gap + h > cx.frame.screen_height {
            // flip below the trigger
            shift.y = -(h + gap * 2.0 + self.trigger.height);
        }
        if shift != Vec2::ZERO {
            self.rows.build(cx, origin + shift);
        }
        self.panel = Quad::new(self.trigger.left() + shift.x, self.trigger.top() + gap + shift.y, w, h);
    }

    fn close(&mut self, cx: &mut UpdateCx<'_, C>) {
        self.open = false;
        self.inner_lock = None;
        cx.close_popup();
    }
}

impl<C> Element<C> for Popup<C> {
    fn setup(&mut self, painter: &dyn Painter) {
        self.rows.setup(painter);
    }

    fn build(&mut self, cx: &ViewCx<'_>, x: f32, y: f32) -> Quad {
        let dims = cx.measure(&self.title);
        let w = dims.x + cx.config.text_inset * 2.0 + cx.config.font_size;
        self.trigger = Quad::new(x, y, w, cx.config.row_height.max(dims.y));
        self.layout_panel(cx);
        self.trigger
    }

    fn update(&mut self, cx: &mut UpdateCx<'_, C>) -> Response {
        if !cx.popup_open() {
            self.open = false;
            self.inner_lock = None;
            self.closer.take();
            if cx.frame.pressed && self.trigger.contains(cx.frame.pointer) && cx.open_popup() {
                self.open = true;
                let view = cx.view();
                self.layout_panel(&view);
            }
            return Response::Idle;
        }

        if self.needs_rebuild {
            self.needs_rebuild = false;
            let view = cx.view();
            self.layout_panel(&view);
        }

        if self.inner_lock.is_none() && cx.frame.pressed && !self.panel.contains(cx.frame.pointer) {
            self.close(cx);
            return Response::Idle;
        }

        let response = self.rows.dispatch_scoped(
            &mut self.inner_lock,
            true,
            cx.ctx,
            cx.frame,
            cx.painter,
            cx.config,
        );
        if response == Response::Rebuild {
            self.needs_rebuild = true;
        }
        if let Some(f) = self.update_func.as_mut() {
            if f(cx.ctx, &mut self.rows) {
                self.needs_rebuild = true;
            }
        }
        if self.closer.take() {
            self.close(cx);
        }
        Response::Idle
    }

    fn sync(&mut self, ctx: &C) {
        self.rows.sync(ctx);
    }

    fn draw(&self, cx: &ViewCx<'_>) {
        let bg = if self.open {
            theme::WIDGET_ACTIVE
        } else if cx.hovering(&self.trigger) {
            theme::WIDGET_HOVER
        } else {
            theme::WIDGET_BG
        };
        fill(cx.painter, &self.trigger, bg);
        text_in(cx.painter, &self.title, &self.trigger, cx.config.text_inset, cx.config.font_size, theme::TEXT_COLOR);
        // open-upward marker
        let tip = Vec2::new(self.trigger.right() - cx.config.font_size * 0.5, self.trigger.center().y);
        let s = cx.config.font_size * 0.25;
        cx.painter.draw_quad(
            [tip + Vec2::new(0.0, s), tip + Vec2::new(s, -s), tip + Vec2::new(-s, -s), tip + Vec2::new(0.0, s)],
            theme::TEXT_DIM,
        );
    }

    fn draw_tips(&self, cx: &ViewCx<'_>) {
        if let Some(tip) = &self.tip {
            if cx.hovering(&self.trigger) {
                draw_tip(cx, tip);
            }
        }
    }

    fn draw_popup(&self, cx: &ViewCx<'_>) {
        fill(cx.painter, &self.panel, theme::DROPDOWN_BG);
        stroke(cx.painter, &self.panel, theme::DROPDOWN_BORDER, 1.0);
        let frame = cx.frame.scoped_view(self.inner_lock, true);
        let inner = ViewCx { frame: &frame, ..*cx };
        self.rows.draw(&inner);
        self.rows.draw_tips(&inner);
    }

    fn shut_down(&mut self, painter: &dyn Painter) {
        self.rows.shut_down(painter);
    }

    fn bounds(&self) -> Quad {
        self.trigger
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::PanelConfig;
    use crate::ui::painter::testing::RecordingPainter;
    use crate::ui::{Button, Dropdown, ElementId, FrameState, InputEvent, Label};

    #[derive(Default)]
    struct Ctx {
        advanced: bool,
        applied: u32,
        mode: usize,
    }

    struct Rig {
        frame: FrameState,
        painter: RecordingPainter,
        config: PanelConfig,
    }

    impl Rig {
        fn new() -> Self {
            Self { frame: FrameState::new(), painter: RecordingPainter::new(), config: PanelConfig::default() }
        }

        fn build(&self, popup: &mut Popup<Ctx>) {
            popup.build(&ViewCx { frame: &self.frame, painter: &self.painter, config: &self.config }, 100.0, 100.0);
        }

        fn send(&mut self, popup: &mut Popup<Ctx>, ctx: &mut Ctx, event: InputEvent) {
            self.frame.update(&event);
            let mut cx = UpdateCx {
                ctx,
                frame: &mut self.frame,
                painter: &self.painter,
                config: &self.config,
                id: ElementId::new(2, 1),
            };
            popup.update(&mut cx);
        }
    }

    fn popup() -> Popup<Ctx> {
        let popup = Popup::new("More")
            .with_row(Row::new("basic").with(Button::new("Apply").on_click(|c: &mut Ctx| c.applied += 1)))
            .with_row(Row::new("advanced").with(Label::new("Advanced settings")).inactive());
        let closer = popup.closer();
        popup
            .with_row(Row::new("footer").with(Button::new("Close").on_click(move |_: &mut Ctx| closer.close())))
            .with_update_func(|c: &mut Ctx, rows| {
                if rows.is_active("advanced") != c.advanced {
                    rows.set_active("advanced", c.advanced);
                    true
                } else {
                    false
                }
            })
    }

    fn element_center(popup: &Popup<Ctx>, row: usize) -> Vec2 {
        popup.rows().element(ElementId::new(row, 0)).unwrap().bounds().center()
    }

    #[test]
    fn test_open_and_outside_click_closes() {
        let mut rig = Rig::new();
        let mut p = popup();
        let mut ctx = Ctx::default();
        rig.build(&mut p);

        rig.send(&mut p, &mut ctx, InputEvent::press(105.0, 105.0));
        assert!(p.is_open());
        assert_eq!(rig.frame.locked_popup(), Some(ElementId::new(2, 1)));
        assert!(p.panel_bounds().bottom() > p.bounds().top());

        rig.send(&mut p, &mut ctx, InputEvent::press(1500.0, 900.0));
        assert!(!p.is_open());
        assert!(!rig.frame.is_locked());
    }

    #[test]
    fn test_inner_buttons_and_closer() {
        let mut rig = Rig::new();
        let mut p = popup();
        let mut ctx = Ctx::default();
        rig.build(&mut p);
        rig.send(&mut p, &mut ctx, InputEvent::press(105.0, 105.0));

        let apply = element_center(&p, 0);
        rig.send(&mut p, &mut ctx, InputEvent::press(apply.x, apply.y));
        assert_eq!(ctx.applied, 1);
        assert!(p.is_open());

        let close = element_center(&p, 2);
        rig.send(&mut p, &mut ctx, InputEvent::press(close.x, close.y));
        assert!(!p.is_open());
        assert!(!rig.frame.is_locked());
    }

    #[test]
    fn test_update_func_rebuilds_next_event() {
        let mut rig = Rig::new();
        let mut p = popup();
        let mut ctx = Ctx::default();
        rig.build(&mut p);
        rig.send(&mut p, &mut ctx, InputEvent::press(105.0, 105.0));
        let before = p.panel_bounds();

        ctx.advanced = true;
        rig.send(&mut p, &mut ctx, InputEvent::mouse_move(120.0, 140.0));
        assert!(p.needs_rebuild());
        assert_eq!(p.panel_bounds(), before);

        rig.send(&mut p, &mut ctx, InputEvent::mouse_move(121.0, 140.0));
        assert!(!p.needs_rebuild());
        assert!(p.panel_bounds().height > before.height);
    }

    #[test]
    fn test_nested_popup_request_ignored() {
        let mut rig = Rig::new();
        let options = vec!["A".to_string(), "B".to_string()];
        let mut p = Popup::new("Nested")
            .with_row(Row::new("dd").with(Dropdown::new("Mode", options, |c: &Ctx| c.mode, |c: &mut Ctx, i| c.mode = i)));
        let mut ctx = Ctx::default();
        rig.build(&mut p);
        rig.send(&mut p, &mut ctx, InputEvent::press(105.0, 105.0));

        let dd = element_center(&p, 0);
        rig.send(&mut p, &mut ctx, InputEvent::press(dd.x, dd.y));
        // still the outer popup, no inner popup lock taken
        assert_eq!(rig.frame.locked_popup(), Some(ElementId::new(2, 1)));
        assert!(p.is_open());
        assert_eq!(ctx.mode, 0);
    }
}
