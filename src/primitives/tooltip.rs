use gpui::{
    AnyView, App, AppContext, Context, IntoElement, ParentElement, Render, SharedString, Styled,
    Window, div, px,
};
use gpui_squircle::{SquircleStyled, squircle};

use crate::theme::{ThemeExt, ThemeLayerKind};

/// A small text bubble shown by `.tooltip(..)`.
pub struct Tooltip {
    text: SharedString,
}

impl Tooltip {
    /// Builds the view expected by `StatefulInteractiveElement::tooltip`.
    pub fn text(text: impl Into<SharedString>) -> impl Fn(&mut Window, &mut App) -> AnyView {
        let text = text.into();

        move |_window, cx| {
            cx.new(|_cx| Tooltip { text: text.clone() })
                .into()
        }
    }
}

impl Render for Tooltip {
    fn render(&mut self, _window: &mut Window, cx: &mut Context<Self>) -> impl IntoElement {
        let theme = cx.get_theme();
        let padding = theme.layout.padding.md;
        let corner_radius = theme.layout.corner_radii.sm;
        let text_size = theme.layout.text.default_font.sizes.caption;
        let text_color = theme.variants.active(cx).colors.text.primary;
        let background_color = ThemeLayerKind::Quaternary.resolve(cx);
        let border_color = ThemeLayerKind::Quaternary.next().resolve(cx);

        div()
            .relative()
            .px(padding)
            .py(padding / 2.)
            .text_size(text_size)
            .text_color(text_color)
            .child(
                squircle()
                    .absolute_expand()
                    .rounded(corner_radius)
                    .bg(background_color)
                    .border(px(1.))
                    .border_inside()
                    .border_color(border_color),
            )
            .child(self.text.clone())
    }
}
