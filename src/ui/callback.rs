//! Typed callback slots
//!
//! Callbacks are boxed closures that capture whatever they need when they are
//! registered. They receive the host context `C` mutably when they fire.

use std::collections::HashMap;
use std::fmt;

use super::ModifierKeys;

/// Fired once per trigger
pub type Callback<C> = Box<dyn FnMut(&mut C)>;

/// Fired with a signed step (+1 / -1) for scroll and drag cadences
pub type StepCallback<C> = Box<dyn FnMut(&mut C, i32)>;

/// Which click slot a press maps to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Click {
    Plain,
    Shift,
    Ctrl,
    Alt,
    ShiftCtrl,
}

impl Click {
    /// Map held modifiers to a slot; combinations without a slot map to `None`
    pub fn from_modifiers(m: ModifierKeys) -> Option<Self> {
        match (m.shift, m.ctrl, m.alt) {
            (false, false, false) => Some(Click::Plain),
            (true, false, false) => Some(Click::Shift),
            (false, true, false) => Some(Click::Ctrl),
            (false, false, true) => Some(Click::Alt),
            (true, true, false) => Some(Click::ShiftCtrl),
            _ => None,
        }
    }
}

/// Callback slots of one element, keyed by trigger kind
pub struct Bindings<C> {
    clicks: HashMap<Click, Callback<C>>,
    scroll: Option<StepCallback<C>>,
}

impl<C> Default for Bindings<C> {
    fn default() -> Self {
        Self { clicks: HashMap::new(), scroll: None }
    }
}

impl<C> fmt::Debug for Bindings<C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Bindings")
            .field("clicks", &self.clicks.keys().collect::<Vec<_>>())
            .field("scroll", &self.scroll.is_some())
            .finish()
    }
}

impl<C> Bindings<C> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_click(&mut self, click: Click, f: impl FnMut(&mut C) + 'static) {
        self.clicks.insert(click, Box::new(f));
    }

    pub fn set_scroll(&mut self, f: impl FnMut(&mut C, i32) + 'static) {
        self.scroll = Some(Box::new(f));
    }

    pub fn has_click(&self, click: Click) -> bool {
        self.clicks.contains_key(&click)
    }

    pub fn has_scroll(&self) -> bool {
        self.scroll.is_some()
    }

    /// Fire the slot matching `modifiers`; false when the slot is empty
    pub fn click(&mut self, ctx: &mut C, modifiers: ModifierKeys) -> bool {
        let slot = Click::from_modifiers(modifiers).and_then(|c| self.clicks.get_mut(&c));
        match slot {
            Some(f) => {
                f(ctx);
                true
            }
            None => false,
        }
    }

    /// Fire the scroll slot with the sign of `steps`
    pub fn scroll(&mut self, ctx: &mut C, steps: i32) -> bool {
        match (&mut self.scroll, steps.signum()) {
            (_, 0) | (None, _) => false,
            (Some(f), sign) => {
                f(ctx, sign);
                true
            }
        }
    }
}
