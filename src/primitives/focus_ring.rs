use std::time::Duration;

use gpui::{App, ElementId, FocusHandle, IntoElement, Pixels, RenderOnce, Window, prelude::*, px};
use gpui_squircle::{SquircleStyled, squircle};

use crate::{
    ElementIdExt,
    theme::ThemeExt,
    utils::{RgbaExt, selected_transition},
};

/// Distance the ring travels inwards while it fades in.
const RING_TRAVEL: f32 = 6.;

/// An accent ring drawn around its parent while `focus_handle` is focused.
///
/// The parent must be relatively positioned; the ring fills it absolutely.
#[derive(IntoElement)]
pub struct FocusRing {
    id: ElementId,
    focus_handle: FocusHandle,
    rounded: Pixels,
    visible: Option<bool>,
}

impl FocusRing {
    pub fn new(id: impl Into<ElementId>, focus_handle: FocusHandle) -> Self {
        Self {
            id: id.into(),
            focus_handle,
            rounded: px(8.),
            visible: None,
        }
    }

    pub fn rounded(mut self, rounded: Pixels) -> Self {
        self.rounded = rounded;
        self
    }

    /// Overrides the focus check, for components that move a virtual focus
    /// between children sharing one focus handle.
    pub fn visible(mut self, visible: bool) -> Self {
        self.visible = Some(visible);
        self
    }
}

impl RenderOnce for FocusRing {
    fn render(self, window: &mut Window, cx: &mut App) -> impl IntoElement {
        let accent_color = cx.get_theme().variants.active(cx).colors.accent.primary;

        let is_focused = self
            .visible
            .unwrap_or_else(|| self.focus_handle.is_focused(window));

        let progress = *selected_transition(
            self.id.with_suffix("ring"),
            window,
            cx,
            Duration::from_millis(365),
            is_focused,
        )
        .evaluate(window, cx);

        let travel = px((1. - progress) * RING_TRAVEL);

        squircle()
            .absolute()
            .top(-travel)
            .bottom(-travel)
            .left(-travel)
            .right(-travel)
            .rounded(self.rounded + travel + px(1.))
            .border(px(3.))
            .border_outside()
            .border_color(accent_color.alpha(progress * 0.3))
    }
}
