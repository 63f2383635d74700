use fltk::{
    app,
    enums::Color,
    group::Tabs,
    menu::MenuBar,
    prelude::*,
    window::Window,
};

use crate::app::domain::ColorScheme;

/// Color the window chrome (everything except the editor hosts) for the
/// ambient scheme.
pub fn apply_chrome_theme(window: &mut Window, menu: &mut MenuBar, tabs: &mut Tabs, scheme: ColorScheme) {
    if scheme.is_dark() {
        app::background(25, 25, 25);
        app::background2(40, 40, 40);
        app::foreground(220, 220, 220);
        window.set_color(Color::from_rgb(25, 25, 25));
        window.set_label_color(Color::from_rgb(220, 220, 220));
        menu.set_color(Color::from_rgb(35, 35, 35));
        menu.set_text_color(Color::from_rgb(220, 220, 220));
        menu.set_selection_color(Color::from_rgb(60, 60, 60)); // Hover color
        tabs.set_color(Color::from_rgb(35, 35, 35));
        tabs.set_selection_color(Color::from_rgb(25, 25, 25));
        tabs.set_label_color(Color::from_rgb(220, 220, 220));
    } else {
        app::background(240, 240, 240);
        app::background2(255, 255, 255);
        app::foreground(0, 0, 0);
        window.set_color(Color::from_rgb(240, 240, 240));
        window.set_label_color(Color::Black);
        menu.set_color(Color::from_rgb(240, 240, 240));
        menu.set_text_color(Color::Black);
        menu.set_selection_color(Color::from_rgb(200, 200, 200)); // Hover color
        tabs.set_color(Color::from_rgb(225, 225, 225));
        tabs.set_selection_color(Color::from_rgb(240, 240, 240));
        tabs.set_label_color(Color::Black);
    }

    if let Some(_is_dark) = titlebar_target(window.shown(), scheme) {
        #[cfg(target_os = "windows")]
        set_windows_titlebar_theme(window, _is_dark);
    }

    app::redraw();
}

/// Dark flag for the native title bar, or `None` while the window has no
/// native handle yet.
fn titlebar_target(window_shown: bool, scheme: ColorScheme) -> Option<bool> {
    window_shown.then(|| scheme.is_dark())
}

/// Set Windows title bar theme (Windows 10 build 1809+)
/// Must be called AFTER window.show() to have a valid HWND
#[cfg(target_os = "windows")]
fn set_windows_titlebar_theme(window: &Window, is_dark: bool) {
    use std::mem::size_of;
    use std::ptr::from_ref;
    use windows::Win32::Foundation::HWND;
    use windows::Win32::Graphics::Dwm::{DwmSetWindowAttribute, DWMWINDOWATTRIBUTE};

    unsafe {
        let hwnd = HWND(window.raw_handle() as *mut std::ffi::c_void);

        let on: i32 = if is_dark { 1 } else { 0 };

        // Try attribute 20 (Windows 11 / Windows 10 2004+)
        let _ = DwmSetWindowAttribute(
            hwnd,
            DWMWINDOWATTRIBUTE(20), // DWMWA_USE_IMMERSIVE_DARK_MODE
            from_ref(&on).cast(),
            size_of::<i32>() as u32,
        );

        // Also try attribute 19 (Windows 10 1809-1903)
        let _ = DwmSetWindowAttribute(
            hwnd,
            DWMWINDOWATTRIBUTE(19),
            from_ref(&on).cast(),
            size_of::<i32>() as u32,
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_titlebar_skipped_before_show() {
        assert_eq!(titlebar_target(false, ColorScheme::Dark), None);
        assert_eq!(titlebar_target(false, ColorScheme::Light), None);
    }

    #[test]
    fn test_titlebar_follows_scheme_once_shown() {
        assert_eq!(titlebar_target(true, ColorScheme::Dark), Some(true));
        assert_eq!(titlebar_target(true, ColorScheme::Light), Some(false));
    }
}
