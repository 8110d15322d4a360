//! Input events and the per-event frame snapshot
//!
//! The host turns each window-system event into an [`InputEvent`] and hands it
//! to the panel. [`FrameState::update`] copies it verbatim; interpretation
//! (hover, click, drag) is left to the components.

use macroquad::math::Vec2;

/// Modifier key state
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ModifierKeys {
    pub shift: bool,
    pub ctrl: bool,
    pub alt: bool,
}

impl ModifierKeys {
    pub const NONE: Self = Self { shift: false, ctrl: false, alt: false };
    pub const SHIFT: Self = Self { shift: true, ctrl: false, alt: false };
    pub const CTRL: Self = Self { shift: false, ctrl: true, alt: false };
    pub const ALT: Self = Self { shift: false, ctrl: false, alt: true };

    /// Check if any modifier is held
    pub fn any(&self) -> bool {
        self.shift || self.ctrl || self.alt
    }
}

/// What kind of host event produced an [`InputEvent`]
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum EventKind {
    MouseMove,
    Button,
    Scroll,
    Timer,
    /// Anything the host could not classify
    #[default]
    Other,
}

/// A single input event forwarded by the host
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct InputEvent {
    pub kind: EventKind,
    pub position: Vec2,
    /// Left button went down with this event
    pub pressed: bool,
    /// Left button went up with this event
    pub released: bool,
    /// Wheel steps, positive away from the user
    pub scroll: i32,
    pub modifiers: ModifierKeys,
}

impl InputEvent {
    pub fn mouse_move(x: f32, y: f32) -> Self {
        Self { kind: EventKind::MouseMove, position: Vec2::new(x, y), ..Default::default() }
    }

    pub fn press(x: f32, y: f32) -> Self {
        Self { kind: EventKind::Button, position: Vec2::new(x, y), pressed: true, ..Default::default() }
    }

    pub fn release(x: f32, y: f32) -> Self {
        Self { kind: EventKind::Button, position: Vec2::new(x, y), released: true, ..Default::default() }
    }

    pub fn scroll(x: f32, y: f32, steps: i32) -> Self {
        Self { kind: EventKind::Scroll, position: Vec2::new(x, y), scroll: steps, ..Default::default() }
    }

    pub fn timer(x: f32, y: f32) -> Self {
        Self { kind: EventKind::Timer, position: Vec2::new(x, y), ..Default::default() }
    }

    pub fn with_modifiers(mut self, modifiers: ModifierKeys) -> Self {
        self.modifiers = modifiers;
        self
    }
}

/// Address of an element inside a row set: (row index, element index)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ElementId {
    pub row: usize,
    pub index: usize,
}

impl ElementId {
    pub const fn new(row: usize, index: usize) -> Self {
        Self { row, index }
    }
}

/// Something that can hold the exclusive element lock
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Owner {
    Dot,
    MoveHandle,
    Element(ElementId),
}

/// The single exclusive-focus slot
///
/// Being one `Option<Lock>`, a locked element and a locked popup can never
/// coexist.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Lock {
    /// A drag or press in progress
    Element(Owner),
    /// An open popup, drawn topmost
    Popup(ElementId),
}

/// Saved outer lock while a container dispatches to its own rows
#[derive(Debug, Clone, Copy)]
pub(crate) struct LockScope {
    lock: Option<Lock>,
    in_popup: bool,
}

/// Per-event snapshot shared by every component of a panel
#[derive(Debug, Clone)]
pub struct FrameState {
    pub kind: EventKind,
    pub pointer: Vec2,
    pub pressed: bool,
    pub released: bool,
    /// Left button is currently down (tracked across events)
    pub held: bool,
    pub scroll: i32,
    pub modifiers: ModifierKeys,
    pub screen_width: f32,
    pub screen_height: f32,
    pub scale: f32,
    pub panel_open: bool,
    /// Bottom-left anchor of the panel, persisted by the host
    pub position: Vec2,
    lock: Option<Lock>,
    in_popup: bool,
}

impl Default for FrameState {
    fn default() -> Self {
        Self {
            kind: EventKind::Other,
            pointer: Vec2::ZERO,
            pressed: false,
            released: false,
            held: false,
            scroll: 0,
            modifiers: ModifierKeys::NONE,
            screen_width: 1920.0,
            screen_height: 1080.0,
            scale: 1.0,
            panel_open: false,
            position: Vec2::ZERO,
            lock: None,
            in_popup: false,
        }
    }
}

impl FrameState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Copy an event into the snapshot
    pub fn update(&mut self, event: &InputEvent) {
        self.kind = event.kind;
        self.pressed = false;
        self.released = false;
        self.scroll = 0;
        self.modifiers = ModifierKeys::NONE;

        if event.kind == EventKind::Other {
            return;
        }

        self.pointer = event.position;
        self.modifiers = event.modifiers;
        self.pressed = event.pressed;
        self.released = event.released;
        self.scroll = event.scroll;

        if event.pressed {
            self.held = true;
        }
        if event.released {
            self.held = false;
        }
    }

    pub fn set_viewport(&mut self, width: f32, height: f32, scale: f32) {
        self.screen_width = width.max(0.0);
        self.screen_height = height.max(0.0);
        self.scale = if scale > 0.0 { scale } else { 1.0 };
    }

    pub fn lock(&self) -> Option<Lock> {
        self.lock
    }

    pub fn is_locked(&self) -> bool {
        self.lock.is_some()
    }

    pub fn locked_element(&self) -> Option<Owner> {
        match self.lock {
            Some(Lock::Element(owner)) => Some(owner),
            _ => None,
        }
    }

    pub fn locked_popup(&self) -> Option<ElementId> {
        match self.lock {
            Some(Lock::Popup(id)) => Some(id),
            _ => None,
        }
    }

    /// The element that should receive the next event, if any
    pub fn lock_target(&self) -> Option<ElementId> {
        match self.lock {
            Some(Lock::Element(Owner::Element(id))) | Some(Lock::Popup(id)) => Some(id),
            _ => None,
        }
    }

    pub fn is_locked_by(&self, owner: Owner) -> bool {
        self.lock == Some(Lock::Element(owner))
    }

    /// Take the element lock; fails if anything already holds focus
    pub fn lock_element(&mut self, owner: Owner) -> bool {
        if self.lock.is_some() {
            return false;
        }
        tracing::debug!(?owner, "lock acquired");
        self.lock = Some(Lock::Element(owner));
        true
    }

    /// Open `id` as the locked popup; a second popup request is ignored
    pub fn lock_popup(&mut self, id: ElementId) -> bool {
        if self.lock.is_some() || self.in_popup {
            tracing::trace!(?id, "popup request ignored, focus already held");
            return false;
        }
        tracing::debug!(?id, "popup opened");
        self.lock = Some(Lock::Popup(id));
        true
    }

    /// Release the element lock if `owner` holds it
    pub fn release(&mut self, owner: Owner) -> bool {
        if self.is_locked_by(owner) {
            tracing::debug!(?owner, "lock released");
            self.lock = None;
            true
        } else {
            false
        }
    }

    /// Close the popup lock if `id` holds it
    pub fn close_popup(&mut self, id: ElementId) -> bool {
        if self.lock == Some(Lock::Popup(id)) {
            tracing::debug!(?id, "popup closed");
            self.lock = None;
            true
        } else {
            false
        }
    }

    pub fn clear_lock(&mut self) {
        self.lock = None;
    }

    /// Swap in a container's own lock slot before dispatching to its rows
    pub(crate) fn enter_scope(&mut self, inner: Option<Lock>, popup: bool) -> LockScope {
        let saved = LockScope { lock: self.lock, in_popup: self.in_popup };
        self.lock = inner;
        self.in_popup = self.in_popup || popup;
        saved
    }

    /// Snapshot for drawing a container's rows against its own lock slot
    pub(crate) fn scoped_view(&self, inner: Option<Lock>, popup: bool) -> FrameState {
        let mut view = self.clone();
        view.lock = inner;
        view.in_popup = self.in_popup || popup;
        view
    }

    /// Restore the outer lock slot, returning the container's inner lock
    pub(crate) fn exit_scope(&mut self, saved: LockScope) -> Option<Lock> {
        let inner = self.lock;
        self.lock = saved.lock;
        self.in_popup = saved.in_popup;
        inner
    }
}
