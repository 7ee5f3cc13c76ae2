use gpui::{App, Window};

use crate::{components::tabs, theme::ThemeExt};

/// Registers the key bindings components rely on. Call once at startup,
/// after installing a theme.
pub fn init(cx: &mut App) {
    tabs::init(cx);
}

pub fn init_for_window(window: &mut Window, cx: &mut App) {
    window.set_rem_size(cx.get_theme().layout.text.base_size);
}
