//! dotpanel: floating overlay panels for 3D viewport hosts
//!
//! A host creates a [`ui::Panel`], appends rows of elements, forwards every
//! input event to [`ui::Panel::update`] and calls [`ui::Panel::draw`] each
//! frame. Only the panel position is persisted, through a
//! [`prefs::PositionStore`].

pub mod config;
pub mod error;
pub mod prefs;
pub mod ui;

pub use config::PanelConfig;
pub use error::OverlayError;
pub use prefs::{MemoryPositionStore, PositionStore, RonPositionStore};
pub use ui::{InputEvent, Panel, Row};

/// Version from Cargo.toml
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
