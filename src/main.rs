#![cfg_attr(target_os = "windows", windows_subsystem = "windows")]

use fltk::app;

use editor_showcase::app::domain::{AppSettings, Message};
use editor_showcase::app::state::AppState;

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let app = app::App::default();
    let (sender, receiver) = app::channel::<Message>();

    let settings = AppSettings::load();
    log::debug!("Settings loaded from {}", AppSettings::get_config_path().display());

    let mut state = AppState::new(settings, sender);
    state.start();

    while app.wait() {
        while let Some(msg) = receiver.recv() {
            if !state.handle_message(msg) {
                return;
            }
        }
    }
}
