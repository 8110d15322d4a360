//! Overlay UI toolkit
//!
//! A floating panel of widget rows drawn on top of a 3D viewport:
//! - Dot launcher that opens/closes the panel and doubles as a drag dial
//! - Move handle with screen clamping
//! - Rows of elements laid out upward from the panel anchor
//! - One exclusive lock slot for drags and popups
//!
//! Everything draws through the [`Painter`] trait, so the core has no
//! graphics dependency beyond macroquad's math and color types.

mod rect;
mod input;
mod theme;
mod callback;
mod element;
mod layout;
mod widgets;
mod number_input;
mod dropdown;
mod scroll_list;
mod popup;
mod dot;
mod move_handle;
mod panel;
pub mod backend;
pub mod draw_handle;
pub mod painter;

pub use rect::*;
pub use input::*;
pub use theme::*;
pub use callback::{Bindings, Callback, Click, StepCallback};
pub use element::{draw_tip, Element, Response, UpdateCx, ViewCx};
pub use layout::{Row, RowSet};
pub use widgets::*;
pub use number_input::NumberInput;
pub use dropdown::Dropdown;
pub use scroll_list::ScrollList;
pub use popup::{Popup, PopupCloser};
pub use dot::{Direction, Dot, DotState, DragAxis};
pub use move_handle::MoveHandle;
pub use panel::Panel;
pub use draw_handle::DrawHandle;
pub use painter::{ImageHandle, Painter};
