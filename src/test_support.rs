use gpui::{ElementId, Modifiers, MouseButton, TestAppContext, VisualTestContext};

use crate::{
    theme::{Theme, ThemeExt},
    utils::debug_selector,
};

pub(crate) fn init_test(cx: &mut TestAppContext) {
    cx.update(|cx| {
        cx.set_theme(Theme::default_theme());
        crate::init(cx);
    });
}

pub(crate) fn click(vcx: &mut VisualTestContext, id: &ElementId) {
    click_with(vcx, id, Modifiers::none());
}

pub(crate) fn click_with(vcx: &mut VisualTestContext, id: &ElementId, modifiers: Modifiers) {
    let position = center_of(vcx, id);
    vcx.simulate_click(position, modifiers);
    vcx.run_until_parked();
}

pub(crate) fn middle_click(vcx: &mut VisualTestContext, id: &ElementId) {
    let position = center_of(vcx, id);
    vcx.simulate_mouse_down(position, MouseButton::Middle, Modifiers::none());
    vcx.simulate_mouse_up(position, MouseButton::Middle, Modifiers::none());
    vcx.run_until_parked();
}

pub(crate) fn is_rendered(vcx: &mut VisualTestContext, id: &ElementId) -> bool {
    let selector: &'static str = Box::leak(debug_selector(id).into_boxed_str());
    vcx.debug_bounds(selector).is_some()
}

fn center_of(vcx: &mut VisualTestContext, id: &ElementId) -> gpui::Point<gpui::Pixels> {
    let selector: &'static str = Box::leak(debug_selector(id).into_boxed_str());
    vcx.debug_bounds(selector)
        .unwrap_or_else(|| panic!("{selector} was not rendered"))
        .center()
}
