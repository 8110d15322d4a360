//! Draw handle ownership
//!
//! A host registers at most one overlay draw callback per event-loop thread.
//! The panel takes this handle when it is created and gives it back on
//! shut-down; nothing recreates it implicitly.

use std::cell::Cell;

use crate::error::OverlayError;

thread_local! {
    static HELD: Cell<bool> = const { Cell::new(false) };
}

/// Exclusive right to draw the overlay on this thread
#[derive(Debug)]
pub struct DrawHandle {
    _not_send: std::marker::PhantomData<*const ()>,
}

impl DrawHandle {
    /// Take the handle; a second acquire while one is held is an error
    pub fn acquire() -> Result<Self, OverlayError> {
        if HELD.with(|h| h.replace(true)) {
            tracing::error!("draw handle acquired twice");
            return Err(OverlayError::DrawHandleHeld);
        }
        tracing::debug!("draw handle acquired");
        Ok(Self { _not_send: std::marker::PhantomData })
    }

    /// Give the handle back
    pub fn release(self) {
        drop(self);
    }

    pub fn is_held() -> bool {
        HELD.with(|h| h.get())
    }
}

impl Drop for DrawHandle {
    fn drop(&mut self) {
        HELD.with(|h| h.set(false));
        tracing::debug!("draw handle released");
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_double_acquire_fails() {
        let handle = DrawHandle::acquire().unwrap();
        assert!(DrawHandle::is_held());
        assert!(matches!(DrawHandle::acquire(), Err(OverlayError::DrawHandleHeld)));

        handle.release();
        assert!(!DrawHandle::is_held());
        let again = DrawHandle::acquire().unwrap();
        drop(again);
    }
}
