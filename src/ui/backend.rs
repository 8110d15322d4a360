//! Macroquad backend
//!
//! Implements [`Painter`] on top of macroquad's immediate drawing calls and
//! turns macroquad's polled input into [`InputEvent`]s. Macroquad's screen
//! space has y pointing down, so every coordinate is flipped here.

use std::cell::{Cell, RefCell};
use std::collections::HashMap;
use std::path::PathBuf;

use macroquad::color::{Color, WHITE};
use macroquad::input::{
    is_key_down, is_mouse_button_pressed, is_mouse_button_released, mouse_position, mouse_wheel, KeyCode,
    MouseButton,
};
use macroquad::math::Vec2;
use macroquad::shapes::{draw_line, draw_triangle};
use macroquad::texture::{draw_texture_ex, DrawTextureParams, FilterMode, Texture2D};
use macroquad::window::screen_height;

use super::painter::{ImageHandle, Painter};
use super::{InputEvent, ModifierKeys, Quad};
use crate::error::OverlayError;

fn flip(p: Vec2) -> Vec2 {
    Vec2::new(p.x, screen_height() - p.y)
}

/// Painter drawing straight to the macroquad window
pub struct MacroquadPainter {
    /// Directory image names are resolved against
    image_root: PathBuf,
    textures: RefCell<HashMap<ImageHandle, Texture2D>>,
    next_image: Cell<u32>,
}

impl MacroquadPainter {
    pub fn new(image_root: impl Into<PathBuf>) -> Self {
        Self { image_root: image_root.into(), textures: RefCell::new(HashMap::new()), next_image: Cell::new(1) }
    }

    fn decode(&self, name: &str) -> Result<Texture2D, OverlayError> {
        let bytes = std::fs::read(self.image_root.join(name))?;
        let img = image::load_from_memory(&bytes)?;
        let rgba = img.to_rgba8();
        let texture = Texture2D::from_rgba8(rgba.width() as u16, rgba.height() as u16, rgba.as_raw());
        texture.set_filter(FilterMode::Linear);
        Ok(texture)
    }
}

impl Painter for MacroquadPainter {
    fn draw_quad(&self, points: [Vec2; 4], color: Color) {
        let [a, b, c, d] = points.map(flip);
        draw_triangle(a, b, c, color);
        draw_triangle(a, c, d, color);
    }

    fn draw_polyline(&self, points: &[Vec2], color: Color, width: f32) {
        for pair in points.windows(2) {
            let (a, b) = (flip(pair[0]), flip(pair[1]));
            draw_line(a.x, a.y, b.x, b.y, width, color);
        }
    }

    fn draw_text(&self, text: &str, pos: Vec2, size: f32, color: Color) {
        let p = flip(pos);
        macroquad::text::draw_text(text, p.x, p.y, size, color);
    }

    fn measure_text(&self, text: &str, size: f32) -> Vec2 {
        let dims = macroquad::text::measure_text(text, None, size.round().max(1.0) as u16, 1.0);
        Vec2::new(dims.width, dims.height)
    }

    fn load_image(&self, name: &str) -> Option<ImageHandle> {
        match self.decode(name) {
            Ok(texture) => {
                let handle = ImageHandle(self.next_image.get());
                self.next_image.set(handle.0 + 1);
                self.textures.borrow_mut().insert(handle, texture);
                Some(handle)
            }
            Err(e) => {
                tracing::warn!(name, root = %self.image_root.display(), "image load failed: {}", e);
                None
            }
        }
    }

    fn draw_image(&self, image: ImageHandle, quad: &Quad) {
        let textures = self.textures.borrow();
        let Some(texture) = textures.get(&image) else {
            return;
        };
        draw_texture_ex(
            texture,
            quad.left(),
            screen_height() - quad.top(),
            WHITE,
            DrawTextureParams { dest_size: Some(quad.size()), ..Default::default() },
        );
    }

    fn free_image(&self, image: ImageHandle) {
        if self.textures.borrow_mut().remove(&image).is_none() {
            tracing::trace!(?image, "freeing unknown image");
        }
    }
}

/// Modifier keys currently held
pub fn modifiers() -> ModifierKeys {
    ModifierKeys {
        shift: is_key_down(KeyCode::LeftShift) || is_key_down(KeyCode::RightShift),
        ctrl: is_key_down(KeyCode::LeftControl) || is_key_down(KeyCode::RightControl),
        alt: is_key_down(KeyCode::LeftAlt) || is_key_down(KeyCode::RightAlt),
    }
}

/// Input events since the last frame, in viewport coordinates
///
/// `last_pointer` carries the pointer between calls so that motion is only
/// reported when it happened.
pub fn poll_events(last_pointer: &mut Vec2) -> Vec<InputEvent> {
    let (mx, my) = mouse_position();
    let pointer = flip(Vec2::new(mx, my));
    let mods = modifiers();
    let mut events = Vec::new();

    if pointer != *last_pointer {
        *last_pointer = pointer;
        events.push(InputEvent::mouse_move(pointer.x, pointer.y).with_modifiers(mods));
    }
    if is_mouse_button_pressed(MouseButton::Left) {
        events.push(InputEvent::press(pointer.x, pointer.y).with_modifiers(mods));
    }
    if is_mouse_button_released(MouseButton::Left) {
        events.push(InputEvent::release(pointer.x, pointer.y).with_modifiers(mods));
    }
    let wheel = mouse_wheel().1;
    if wheel.abs() > 0.1 {
        events.push(InputEvent::scroll(pointer.x, pointer.y, wheel.signum() as i32).with_modifiers(mods));
    }
    events
}
