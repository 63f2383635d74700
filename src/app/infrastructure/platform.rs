use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::thread::{self, JoinHandle};
use std::time::Duration;

use crate::app::domain::theme::{ColorScheme, ThemeMode};

pub fn detect_system_dark_mode() -> bool {
    // Windows: Check registry for dark mode preference
    #[cfg(target_os = "windows")]
    {
        use winreg::RegKey;
        use winreg::enums::HKEY_CURRENT_USER;

        if let Ok(hkcu) = RegKey::predef(HKEY_CURRENT_USER)
            .open_subkey("Software\\Microsoft\\Windows\\CurrentVersion\\Themes\\Personalize")
        {
            // AppsUseLightTheme: 0 = dark mode, 1 = light mode
            if let Ok(value) = hkcu.get_value::<u32, _>("AppsUseLightTheme") {
                return value == 0;
            }
        }
    }

    // Linux: GNOME exposes both a theme name and a color-scheme preference
    #[cfg(target_os = "linux")]
    {
        use std::process::Command;

        if let Ok(output) = Command::new("gsettings")
            .args(["get", "org.gnome.desktop.interface", "color-scheme"])
            .output()
        {
            let scheme = String::from_utf8_lossy(&output.stdout);
            if scheme.contains("prefer-dark") {
                return true;
            }
        }

        if let Ok(output) = Command::new("gsettings")
            .args(["get", "org.gnome.desktop.interface", "gtk-theme"])
            .output()
        {
            let theme = String::from_utf8_lossy(&output.stdout).to_lowercase();
            if theme.contains("dark") {
                return true;
            }
        }
    }

    // macOS: Check AppleInterfaceStyle
    #[cfg(target_os = "macos")]
    {
        use std::process::Command;

        if let Ok(output) = Command::new("defaults")
            .args(["read", "-g", "AppleInterfaceStyle"])
            .output()
            && output.status.success()
        {
            let style = String::from_utf8_lossy(&output.stdout).to_lowercase();
            if style.contains("dark") {
                return true;
            }
        }
    }

    // Default to light mode if detection fails
    false
}

pub fn detect_system_scheme() -> ColorScheme {
    if detect_system_dark_mode() {
        ColorScheme::Dark
    } else {
        ColorScheme::Light
    }
}

/// Initial ambient scheme for a configured theme mode.
pub fn resolve_ambient(mode: ThemeMode) -> ColorScheme {
    match mode {
        ThemeMode::Light => ColorScheme::Light,
        ThemeMode::Dark => ColorScheme::Dark,
        ThemeMode::SystemDefault => detect_system_scheme(),
    }
}

/// Background thread that polls the OS color scheme and reports changes.
/// Dropping the watcher stops and joins the thread.
pub struct AmbientWatcher {
    stop: Arc<AtomicBool>,
    handle: Option<JoinHandle<()>>,
}

impl AmbientWatcher {
    pub fn spawn<N>(interval: Duration, initial: ColorScheme, notify: N) -> Self
    where
        N: Fn(ColorScheme) + Send + 'static,
    {
        Self::spawn_with(interval, initial, detect_system_scheme, notify)
    }

    pub fn spawn_with<P, N>(interval: Duration, initial: ColorScheme, detect: P, notify: N) -> Self
    where
        P: Fn() -> ColorScheme + Send + 'static,
        N: Fn(ColorScheme) + Send + 'static,
    {
        let stop = Arc::new(AtomicBool::new(false));
        let stop_flag = Arc::clone(&stop);
        let handle = thread::Builder::new()
            .name("ambient-watcher".to_string())
            .spawn(move || {
                let mut last = initial;
                loop {
                    thread::park_timeout(interval);
                    if stop_flag.load(Ordering::Acquire) {
                        break;
                    }
                    let current = detect();
                    if current != last {
                        log::debug!("System color scheme changed to {}", current.as_str());
                        last = current;
                        notify(current);
                    }
                }
            });

        let handle = match handle {
            Ok(h) => Some(h),
            Err(e) => {
                log::warn!("Could not start color scheme watcher: {}", e);
                None
            }
        };

        Self { stop, handle }
    }

    #[cfg(test)]
    pub(crate) fn is_running(&self) -> bool {
        self.handle.as_ref().is_some_and(|h| !h.is_finished())
    }
}

impl Drop for AmbientWatcher {
    fn drop(&mut self) {
        self.stop.store(true, Ordering::Release);
        if let Some(handle) = self.handle.take() {
            handle.thread().unpark();
            let _ = handle.join();
        }
    }
}
