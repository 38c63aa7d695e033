//! Window configuration for the desktop app.

use lanoir_app::APP_NAME;
use lanoir_app::settings::resolve_window_scale;
use macroquad::window::Conf;
use std::env;

pub const SCREEN_WIDTH: f32 = 640.0;
pub const SCREEN_HEIGHT: f32 = 480.0;

pub fn runtime_window_scale(persisted: Option<f32>) -> f32 {
    let override_value = env::var("LANOIR_WINDOW_SCALE").ok();
    resolve_window_scale(persisted, override_value.as_deref())
}

pub fn build_window_conf(scale: f32) -> Conf {
    Conf {
        window_title: APP_NAME.to_owned(),
        window_width: (SCREEN_WIDTH * scale).round() as i32,
        window_height: (SCREEN_HEIGHT * scale).round() as i32,
        window_resizable: false,
        high_dpi: true,
        ..Default::default()
    }
}
