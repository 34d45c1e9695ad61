//! Face Shaper preview
//!
//! Renders the mask through the library pipeline and shows it in a window.
//! Pass a preset path as the first argument to start from it.

use std::path::PathBuf;

use face_shaper::face::{render_framebuffer, FaceParams, MAX_LINE_THICKNESS};
use face_shaper::rasterizer::{BackgroundMode, Framebuffer};
use face_shaper::settings::{load_preset, save_preset, DEFAULT_PRESET_PATH};
use face_shaper::VERSION;
use macroquad::prelude::*;
use tracing::{error, info, warn};

const PNG_PATH: &str = "face.png";
const ZOOM_STEP: f32 = 1.05;
const PAN_STEP: f32 = 0.01;
const THICKNESS_STEP: f32 = 0.5;
const TIP_STEP: f32 = 0.005;
const ROTATION_STEP: f32 = 2.0;

const HELP: &str = "Up/Down zoom  WASD pan  +/- line  B background  I/K nose tip  Q/E eyes  R reset  P png  F5 save  F9 load";

fn window_conf() -> Conf {
    Conf {
        window_title: format!("Face Shaper v{}", VERSION),
        window_width: 900,
        window_height: 960,
        window_resizable: true,
        high_dpi: true,
        ..Default::default()
    }
}

fn init_logging() {
    use tracing_subscriber::fmt;
    use tracing_subscriber::prelude::*;
    use tracing_subscriber::EnvFilter;

    let env_filter = EnvFilter::from_default_env().add_directive(tracing::Level::INFO.into());
    let fmt_layer = fmt::layer()
        .with_writer(std::io::stdout)
        .with_target(true)
        .with_level(true);

    tracing_subscriber::registry()
        .with(env_filter)
        .with(fmt_layer)
        .init();
}

/// Preview state between frames
struct Preview {
    params: FaceParams,
    texture: Option<Texture2D>,
    /// Last rendered framebuffer, kept for PNG export
    frame: Option<Framebuffer>,
    dirty: bool,
    status: String,
}

impl Preview {
    fn new(params: FaceParams) -> Self {
        Self {
            params,
            texture: None,
            frame: None,
            dirty: true,
            status: String::new(),
        }
    }

    fn set_status(&mut self, msg: String) {
        info!("{}", msg);
        self.status = msg;
    }

    fn rerender(&mut self) {
        match render_framebuffer(&self.params) {
            Ok(fb) => {
                let texture = Texture2D::from_rgba8(fb.width as u16, fb.height as u16, &fb.pixels);
                texture.set_filter(FilterMode::Nearest);
                self.texture = Some(texture);
                self.frame = Some(fb);
            }
            Err(e) => {
                warn!("render rejected: {}", e);
                self.status = format!("Render failed: {}", e);
            }
        }
        self.dirty = false;
    }

    fn handle_input(&mut self) {
        let p = &mut self.params;
        let mut changed = true;

        if is_key_pressed(KeyCode::Up) {
            p.camera.distance *= ZOOM_STEP;
        } else if is_key_pressed(KeyCode::Down) {
            p.camera.distance /= ZOOM_STEP;
        } else if is_key_pressed(KeyCode::A) {
            p.camera.pos_x -= PAN_STEP;
        } else if is_key_pressed(KeyCode::D) {
            p.camera.pos_x += PAN_STEP;
        } else if is_key_pressed(KeyCode::W) {
            p.camera.pos_y -= PAN_STEP;
        } else if is_key_pressed(KeyCode::S) {
            p.camera.pos_y += PAN_STEP;
        } else if is_key_pressed(KeyCode::Equal) {
            p.line_thickness = (p.line_thickness + THICKNESS_STEP).min(MAX_LINE_THICKNESS);
        } else if is_key_pressed(KeyCode::Minus) {
            p.line_thickness = (p.line_thickness - THICKNESS_STEP).max(THICKNESS_STEP);
        } else if is_key_pressed(KeyCode::B) {
            p.canvas.background = match p.canvas.background {
                BackgroundMode::Opaque => BackgroundMode::Transparent,
                BackgroundMode::Transparent => BackgroundMode::Opaque,
            };
        } else if is_key_pressed(KeyCode::I) {
            p.nose.tip_pos_y -= TIP_STEP;
        } else if is_key_pressed(KeyCode::K) {
            p.nose.tip_pos_y += TIP_STEP;
        } else if is_key_pressed(KeyCode::Q) {
            p.eye_left.rotation -= ROTATION_STEP;
            p.eye_right.rotation += ROTATION_STEP;
        } else if is_key_pressed(KeyCode::E) {
            p.eye_left.rotation += ROTATION_STEP;
            p.eye_right.rotation -= ROTATION_STEP;
        } else if is_key_pressed(KeyCode::R) {
            *p = FaceParams::default();
            self.set_status("Reset to defaults".to_string());
        } else if is_key_pressed(KeyCode::F9) {
            match load_preset(DEFAULT_PRESET_PATH) {
                Ok(loaded) => {
                    self.params = loaded;
                    self.set_status(format!("Loaded {}", DEFAULT_PRESET_PATH));
                }
                Err(e) => {
                    error!("preset load failed: {}", e);
                    self.status = format!("Load failed: {}", e);
                }
            }
        } else {
            changed = false;
        }

        if is_key_pressed(KeyCode::F5) {
            match save_preset(&self.params, DEFAULT_PRESET_PATH) {
                Ok(()) => self.set_status(format!("Saved {}", DEFAULT_PRESET_PATH)),
                Err(e) => {
                    error!("preset save failed: {}", e);
                    self.status = format!("Save failed: {}", e);
                }
            }
        }

        if is_key_pressed(KeyCode::P) {
            self.save_png();
        }

        self.dirty |= changed;
    }

    fn save_png(&mut self) {
        let Some(fb) = &self.frame else {
            self.status = "Nothing rendered yet".to_string();
            return;
        };
        match fb.save_png(PNG_PATH) {
            Ok(()) => self.set_status(format!("Saved {}", PNG_PATH)),
            Err(e) => {
                error!("png export failed: {}", e);
                self.status = format!("PNG export failed: {}", e);
            }
        }
    }

    fn draw(&self) {
        clear_background(Color::from_rgba(30, 30, 35, 255));

        let footer = 48.0;
        if let Some(texture) = &self.texture {
            let avail_w = screen_width();
            let avail_h = (screen_height() - footer).max(1.0);
            let scale = (avail_w / texture.width()).min(avail_h / texture.height());
            let draw_w = texture.width() * scale;
            let draw_h = texture.height() * scale;
            draw_texture_ex(
                texture,
                (avail_w - draw_w) / 2.0,
                (avail_h - draw_h) / 2.0,
                WHITE,
                DrawTextureParams {
                    dest_size: Some(Vec2::new(draw_w, draw_h)),
                    ..Default::default()
                },
            );
        }

        let text_color = Color::from_rgba(200, 200, 200, 255);
        draw_text(HELP, 8.0, screen_height() - 28.0, 16.0, text_color);
        let cam = &self.params.camera;
        let info_line = format!(
            "zoom {:.2}  pan ({:.2}, {:.2})  line {:.1}  tip {:.3}  {}",
            cam.distance, cam.pos_x, cam.pos_y, self.params.line_thickness, self.params.nose.tip_pos_y, self.status
        );
        draw_text(&info_line, 8.0, screen_height() - 8.0, 16.0, text_color);
    }
}

#[macroquad::main(window_conf)]
async fn main() {
    init_logging();

    let params = match std::env::args().nth(1).map(PathBuf::from) {
        Some(path) => match load_preset(&path) {
            Ok(params) => params,
            Err(e) => {
                error!("could not load {}: {}, starting from defaults", path.display(), e);
                FaceParams::default()
            }
        },
        None => FaceParams::default(),
    };

    let mut preview = Preview::new(params);

    loop {
        preview.handle_input();
        if preview.dirty {
            preview.rerender();
        }
        preview.draw();
        next_frame().await;
    }
}
