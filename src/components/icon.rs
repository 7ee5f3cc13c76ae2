use gpui::{
    App, Hsla, IntoElement, Pixels, Radians, RenderOnce, SharedString, Styled, Transformation,
    Window, prelude::FluentBuilder, px, svg,
};

use crate::theme::ThemeExt;

/// An SVG icon tinted with the theme's text color.
#[derive(IntoElement)]
pub struct Icon {
    path: SharedString,
    size: Pixels,
    rotate: Radians,
    color: Option<Hsla>,
}

impl Icon {
    /// Creates an icon from an asset path or a [`crate::FacetsIconKind`].
    pub fn new(path: impl Into<SharedString>) -> Self {
        Self {
            path: path.into(),
            size: px(14.),
            rotate: Radians(0.),
            color: None,
        }
    }

    pub fn size(mut self, size: Pixels) -> Self {
        self.size = size;
        self
    }

    /// Overrides the theme's primary text color.
    pub fn color(mut self, color: impl Into<Hsla>) -> Self {
        self.color = Some(color.into());
        self
    }

    pub fn rotate(mut self, rotate: impl Into<Radians>) -> Self {
        self.rotate = rotate.into();
        self
    }
}

impl RenderOnce for Icon {
    fn render(self, _window: &mut Window, cx: &mut App) -> impl IntoElement {
        let primary_text_color = cx.get_theme().variants.active(cx).colors.text.primary;

        svg()
            .path(self.path)
            .flex_none()
            .size(self.size)
            .text_color(primary_text_color)
            .when_some(self.color, |this, color| this.text_color(color))
            .with_transformation(Transformation::rotate(self.rotate))
    }
}
