//! dotpanel demo host
//!
//! A small 3D scene (a grid of cubes seen from an orbiting camera) with an
//! overlay panel that edits it. Drag the dot left/right to change the grid
//! divisions, up/down to resize the cubes, or click it to open the panel.

use macroquad::prelude::*;

use dotpanel::ui::backend::{poll_events, MacroquadPainter};
use dotpanel::ui::{Button, Click, Dropdown, Label, NumberInput, Popup, Row, ScrollList};
use dotpanel::{Panel, PanelConfig, PositionStore, VERSION};

/// Everything the panel edits
struct Scene {
    divisions: i32,
    cube_size: f32,
    spin_speed: f32,
    azimuth: f32,
    distance: f32,
    shading: usize,
    show_grid: bool,
    show_speed_row: bool,
}

impl Default for Scene {
    fn default() -> Self {
        Self {
            divisions: 4,
            cube_size: 0.6,
            spin_speed: 0.3,
            azimuth: 0.0,
            distance: 9.0,
            shading: 0,
            show_grid: true,
            show_speed_row: false,
        }
    }
}

impl Scene {
    /// Division counts below one make no grid
    fn set_divisions(&mut self, divisions: i32) {
        self.divisions = divisions.clamp(1, 32);
    }

    fn set_cube_size(&mut self, size: f32) {
        self.cube_size = size.clamp(0.05, 1.0);
    }

    fn draw(&self) {
        let eye = vec3(self.azimuth.cos() * self.distance, self.distance * 0.6, self.azimuth.sin() * self.distance);
        set_camera(&Camera3D { position: eye, up: vec3(0.0, 1.0, 0.0), target: Vec3::ZERO, ..Default::default() });

        if self.show_grid {
            draw_grid(20, 0.5, DARKGRAY, Color::new(0.25, 0.25, 0.28, 1.0));
        }

        let n = self.divisions.max(1);
        let spacing = 4.0 / n as f32;
        let edge = spacing * self.cube_size;
        let start = -2.0 + spacing * 0.5;
        for i in 0..n {
            for j in 0..n {
                let pos = vec3(start + i as f32 * spacing, edge * 0.5, start + j as f32 * spacing);
                let size = vec3(edge, edge, edge);
                match self.shading {
                    0 => draw_cube(pos, size, None, Color::new(0.3, 0.6, 0.8, 1.0)),
                    1 => draw_cube_wires(pos, size, SKYBLUE),
                    _ => {
                        draw_cube(pos, size, None, Color::new(0.3, 0.6, 0.8, 1.0));
                        draw_cube_wires(pos, size, WHITE);
                    }
                }
            }
        }
        set_default_camera();
    }
}

fn window_conf() -> Conf {
    Conf {
        window_title: format!("dotpanel demo v{}", VERSION),
        window_width: 1280,
        window_height: 800,
        window_resizable: true,
        high_dpi: true,
        ..Default::default()
    }
}

/// Panel constants from `<config dir>/dotpanel/panel.ron`, if present
#[cfg(not(target_arch = "wasm32"))]
fn load_config() -> PanelConfig {
    let Some(path) = dirs::config_dir().map(|d| d.join("dotpanel").join("panel.ron")) else {
        return PanelConfig::default();
    };
    if !path.exists() {
        return PanelConfig::default();
    }
    PanelConfig::load(&path).unwrap_or_else(|e| {
        tracing::warn!(path = %path.display(), "using default panel config: {}", e);
        PanelConfig::default()
    })
}

#[cfg(target_arch = "wasm32")]
fn load_config() -> PanelConfig {
    PanelConfig::default()
}

#[cfg(not(target_arch = "wasm32"))]
fn position_store() -> Box<dyn PositionStore> {
    Box::new(dotpanel::RonPositionStore::in_config_dir())
}

#[cfg(target_arch = "wasm32")]
fn position_store() -> Box<dyn PositionStore> {
    Box::new(dotpanel::MemoryPositionStore::with_position(60.0, 60.0))
}

fn presets() -> ScrollList<Scene> {
    let mut list = ScrollList::new(3, 160.0);
    for (name, divisions, size) in [
        ("Single", 1, 0.8),
        ("Sparse", 3, 0.4),
        ("Default", 4, 0.6),
        ("Dense", 8, 0.7),
        ("Packed", 12, 0.95),
        ("Dust", 24, 0.2),
        ("Max", 32, 0.5),
    ] {
        list.push(Row::new(name).with(Button::new(name).on_click(move |s: &mut Scene| {
            s.set_divisions(divisions);
            s.set_cube_size(size);
        })));
    }
    list
}

fn view_popup() -> Popup<Scene> {
    let popup = Popup::new("View")
        .with_tip("Camera and grid options")
        .with_row(Row::new("grid").with(Button::new("Toggle grid").on_click(|s: &mut Scene| s.show_grid = !s.show_grid)))
        .with_row(
            Row::new("distance").with(
                NumberInput::new("Distance", |s: &Scene| s.distance, |s: &mut Scene, v| s.distance = v)
                    .with_increment(0.05)
                    .with_range(3.0, 30.0),
            ),
        )
        .with_row(Row::new("grid_hint").with(Label::new("Grid is hidden")).inactive());
    let closer = popup.closer();
    popup
        .with_row(Row::new("done").with(Button::new("Done").on_click(move |_: &mut Scene| closer.close())))
        .with_update_func(|s: &mut Scene, rows| {
            if rows.is_active("grid_hint") == s.show_grid {
                rows.set_active("grid_hint", !s.show_grid);
                true
            } else {
                false
            }
        })
}

fn build_panel(config: PanelConfig) -> Result<Panel<Scene>, dotpanel::OverlayError> {
    let painter = Box::new(MacroquadPainter::new("assets"));
    let shading = vec!["Solid".to_string(), "Wire".to_string(), "Both".to_string()];

    let mut panel = Panel::new(config, painter, position_store())?
        .with_row(Row::new("title").with(Label::new("Cube grid").with_tip("Drag the dot to edit without opening")))
        .with_row(
            Row::new("divisions")
                .with(Button::new("-").on_click(|s: &mut Scene| s.set_divisions(s.divisions - 1)).on(
                    Click::Shift,
                    |s: &mut Scene| s.set_divisions(s.divisions - 5),
                ))
                .with(
                    NumberInput::new("Divisions", |s: &Scene| s.divisions as f32, |s: &mut Scene, v| {
                        s.set_divisions(v.round() as i32)
                    })
                    .with_increment(0.1)
                    .with_range(1.0, 32.0)
                    .with_precision(0),
                )
                .with(Button::new("+").on_click(|s: &mut Scene| s.set_divisions(s.divisions + 1)).on(
                    Click::Shift,
                    |s: &mut Scene| s.set_divisions(s.divisions + 5),
                )),
        )
        .with_row(
            Row::new("size").with(
                NumberInput::new("Size", |s: &Scene| s.cube_size, |s: &mut Scene, v| s.set_cube_size(v))
                    .with_increment(0.005)
                    .with_range(0.05, 1.0)
                    .with_tip("Ctrl: coarse, Shift: fine"),
            ),
        )
        .with_row(
            Row::new("shading")
                .with(Dropdown::new("Shading", shading, |s: &Scene| s.shading, |s: &mut Scene, i| s.shading = i))
                .with(view_popup()),
        )
        .with_row(Row::new("presets").with(presets()))
        .with_row(
            Row::new("spin").with(
                Button::new("Spin options")
                    .with_image("spin.png")
                    .on_click(|s: &mut Scene| s.show_speed_row = !s.show_speed_row)
                    .on_scroll(|s: &mut Scene, d| s.spin_speed += d as f32 * 0.1),
            ),
        )
        .with_row(
            Row::new("speed")
                .with(
                    NumberInput::new("Speed", |s: &Scene| s.spin_speed, |s: &mut Scene, v| s.spin_speed = v)
                        .with_increment(0.01)
                        .with_range(-3.0, 3.0),
                )
                .inactive(),
        );

    let dot = panel.dot_mut();
    dot.on_drag_lr(|s: &mut Scene, d| s.set_divisions(s.divisions + d));
    dot.on_drag_ud(|s: &mut Scene, d| s.set_cube_size(s.cube_size + d as f32 * 0.05));
    dot.on_scroll(|s: &mut Scene, d| s.spin_speed += d as f32 * 0.1);
    Ok(panel)
}

#[macroquad::main(window_conf)]
async fn main() {
    #[cfg(not(target_arch = "wasm32"))]
    crashlog::setup!(crashlog::cargo_metadata!().capitalized(), false);

    #[cfg(not(target_arch = "wasm32"))]
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let mut scene = Scene::default();
    let mut panel = match build_panel(load_config()) {
        Ok(panel) => panel,
        Err(e) => {
            tracing::error!("could not create the overlay: {}", e);
            return;
        }
    };
    let mut last_pointer = Vec2::ZERO;

    loop {
        clear_background(Color::new(0.08, 0.08, 0.1, 1.0));
        panel.set_viewport(screen_width(), screen_height(), 1.0);

        for event in poll_events(&mut last_pointer) {
            let consumed = panel.update(&mut scene, &event);
            // wheel over the empty viewport zooms the camera
            if !consumed && event.scroll != 0 {
                scene.distance = (scene.distance - event.scroll as f32 * 0.5).clamp(3.0, 30.0);
            }
        }

        if panel.is_row_active("speed") != scene.show_speed_row {
            panel.set_row_active("speed", scene.show_speed_row);
        }
        panel.build_if_dirty();

        scene.azimuth += scene.spin_speed * get_frame_time();
        scene.draw();
        panel.draw();

        if is_key_pressed(KeyCode::Escape) {
            break;
        }
        next_frame().await
    }

    panel.shut_down();
}
