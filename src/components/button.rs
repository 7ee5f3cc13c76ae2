use std::time::Duration;

use gpui::{
    App, ClickEvent, CursorStyle, ElementId, InteractiveElement, IntoElement, MouseButton,
    ParentElement, RenderOnce, Rgba, SharedString, StatefulInteractiveElement, Styled, Window, div,
    prelude::FluentBuilder, px,
};
use gpui_squircle::{SquircleStyled, squircle};
use gpui_transitions::Lerp;

use crate::{
    ElementIdExt,
    components::Icon,
    conditional_transition,
    extensions::{
        click_behavior::{ClickBehavior, ClickBehaviorExt},
        external_props::{ExternalProps, ExternalPropsExt, external_root},
    },
    primitives::{FocusRing, Tooltip},
    theme::{ThemeExt, ThemeLayerKind},
    utils::{DebugIdExt, PixelsExt, RgbaExt, disabled_transition},
};

type ClickHandler = Box<dyn Fn(&ClickEvent, &mut Window, &mut App) + 'static>;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum ButtonVariant {
    /// Filled with the accent color.
    Primary,
    /// A bordered surface on the current layer.
    #[default]
    Normal,
    /// Icon only, no surface until hovered.
    Icon,
    /// Inline text in the accent color.
    Link,
}

struct ButtonColors {
    bg: Rgba,
    bg_hover: Rgba,
    border: Rgba,
    text: Rgba,
}

impl ButtonVariant {
    fn colors(&self, layer: ThemeLayerKind, cx: &App) -> ButtonColors {
        let colors = &cx.get_theme().variants.active(cx).colors;
        let surface = layer.resolve(cx);
        let raised = layer.next().resolve(cx);

        match self {
            ButtonVariant::Primary => ButtonColors {
                bg: colors.accent.primary,
                bg_hover: colors.accent.primary.lerp(&colors.text.primary, 0.12),
                border: colors.accent.primary,
                text: colors.text.primary,
            },
            ButtonVariant::Normal => ButtonColors {
                bg: surface,
                bg_hover: raised,
                border: raised,
                text: colors.text.primary,
            },
            ButtonVariant::Icon => ButtonColors {
                bg: raised.alpha(0.),
                bg_hover: raised,
                border: raised.alpha(0.),
                text: colors.text.secondary,
            },
            ButtonVariant::Link => ButtonColors {
                bg: surface.alpha(0.),
                bg_hover: surface.alpha(0.),
                border: surface.alpha(0.),
                text: colors.accent.primary,
            },
        }
    }
}

/// A clickable control with optional text and icon.
#[derive(IntoElement)]
pub struct Button {
    id: ElementId,
    text: Option<SharedString>,
    icon: Option<SharedString>,
    variant: ButtonVariant,
    layer: ThemeLayerKind,
    disabled: bool,
    tooltip: Option<SharedString>,
    on_click: Option<ClickHandler>,
    click_behavior: ClickBehavior,
    external_props: ExternalProps,
}

impl Button {
    pub fn new(id: impl Into<ElementId>) -> Self {
        Self {
            id: id.into(),
            text: None,
            icon: None,
            variant: ButtonVariant::default(),
            layer: ThemeLayerKind::Secondary,
            disabled: false,
            tooltip: None,
            on_click: None,
            click_behavior: ClickBehavior::default(),
            external_props: ExternalProps::default(),
        }
    }

    pub fn text(mut self, text: impl Into<SharedString>) -> Self {
        self.text = Some(text.into());
        self
    }

    pub fn icon(mut self, icon: impl Into<SharedString>) -> Self {
        self.icon = Some(icon.into());
        self
    }

    pub fn variant(mut self, variant: ButtonVariant) -> Self {
        self.variant = variant;
        self
    }

    pub fn layer(mut self, layer: ThemeLayerKind) -> Self {
        self.layer = layer;
        self
    }

    pub fn disabled(mut self, disabled: bool) -> Self {
        self.disabled = disabled;
        self
    }

    pub fn tooltip(mut self, tooltip: impl Into<SharedString>) -> Self {
        self.tooltip = Some(tooltip.into());
        self
    }

    /// Labels the button for assistive technology. Icon-only buttons should
    /// always have one.
    pub fn aria_label(self, label: impl Into<SharedString>) -> Self {
        self.aria("label", label)
    }

    pub fn on_click(
        mut self,
        on_click: impl Fn(&ClickEvent, &mut Window, &mut App) + 'static,
    ) -> Self {
        self.on_click = Some(Box::new(on_click));
        self
    }
}

impl ClickBehaviorExt for Button {
    fn click_behavior_mut(&mut self) -> &mut ClickBehavior {
        &mut self.click_behavior
    }
}

impl ExternalPropsExt for Button {
    fn external_props_mut(&mut self) -> &mut ExternalProps {
        &mut self.external_props
    }
}

impl RenderOnce for Button {
    fn render(self, window: &mut Window, cx: &mut App) -> impl IntoElement {
        let colors = self.variant.colors(self.layer, cx);
        let theme = cx.get_theme();
        let text_size = theme.layout.text.default_font.sizes.body;
        let line_height = theme.layout.text.default_font.line_height;
        let corner_radius = theme.layout.corner_radii.sm;
        let gap = theme.layout.padding.sm;
        let horizontal_padding = match self.variant {
            ButtonVariant::Link => px(0.),
            ButtonVariant::Icon => theme.layout.padding.sm,
            _ => theme.layout.padding.lg,
        };
        let vertical_padding = match self.variant {
            ButtonVariant::Link => px(0.),
            ButtonVariant::Icon => theme.layout.padding.sm,
            _ => theme
                .layout
                .size
                .lg
                .padding_needed_for_height(window, text_size, line_height),
        };

        let is_hover_state =
            window.use_keyed_state(self.id.with_suffix("state:hover"), cx, |_window, _cx| false);
        let is_hover = *is_hover_state.read(cx);

        let focus_handle = window
            .use_keyed_state(
                self.id.with_suffix("state:focus_handle"),
                cx,
                |_window, cx| cx.focus_handle().tab_stop(true),
            )
            .read(cx)
            .clone();
        let is_focus = focus_handle.is_focused(window);

        let is_disabled = self.disabled;
        if is_focus && is_disabled {
            window.blur();
        }

        let disabled_transition = disabled_transition(self.id.clone(), window, cx, is_disabled);

        let bg_color_transition = conditional_transition!(
            self.id.with_suffix("state:transition:bg_color"),
            window,
            cx,
            Duration::from_millis(250),
            {
                is_hover && !is_disabled => colors.bg_hover,
                _ => colors.bg
            }
        );

        let root = external_root(
            &self.id,
            &self.external_props,
            [
                ("role".into(), "button".into()),
                ("aria-disabled".into(), is_disabled.to_string().into()),
            ],
            window,
            cx,
        );

        root.debug_id(&self.id)
            .relative()
            .flex()
            .flex_none()
            .items_center()
            .justify_center()
            .gap(gap)
            .px(horizontal_padding)
            .py(vertical_padding)
            .text_size(text_size)
            .text_color(colors.text)
            .cursor(if is_disabled {
                CursorStyle::OperationNotAllowed
            } else {
                CursorStyle::PointingHand
            })
            .opacity(*disabled_transition.evaluate(window, cx))
            .when(self.variant != ButtonVariant::Link, |this| {
                this.child(
                    FocusRing::new(self.id.with_suffix("focus_ring"), focus_handle.clone())
                        .rounded(corner_radius),
                )
                .child(
                    squircle()
                        .absolute_expand()
                        .rounded(corner_radius)
                        .bg(*bg_color_transition.evaluate(window, cx))
                        .border(px(1.))
                        .border_inside()
                        .border_color(colors.border),
                )
            })
            .when_some(self.icon, |this, icon| {
                this.child(Icon::new(icon).color(colors.text))
            })
            .when_some(self.text, |this, text| {
                let underline = is_hover && self.variant == ButtonVariant::Link;
                this.child(div().when(underline, |this| this.underline()).child(text))
            })
            .when_some(self.tooltip, |this, tooltip| {
                this.tooltip(Tooltip::text(tooltip))
            })
            .when(is_disabled, |this| {
                let click_behavior = self.click_behavior;

                // Inert, but still owns the click so its parent does not act on it.
                this.on_click(move |_event, window, cx| click_behavior.apply(window, cx))
            })
            .when(!is_disabled, |this| {
                let click_behavior = self.click_behavior;
                let on_click = self.on_click;

                this.track_focus(&focus_handle)
                    .on_hover(move |hover, _window, cx| {
                        is_hover_state.update(cx, |this, cx| {
                            *this = *hover;
                            cx.notify();
                        });
                    })
                    .on_mouse_down(MouseButton::Left, |_event, window, _cx| {
                        // Keeps the focus ring hidden for pointer presses.
                        window.prevent_default();
                    })
                    .on_click(move |event, window, cx| {
                        click_behavior.apply(window, cx);

                        if let Some(on_click) = &on_click {
                            (on_click)(event, window, cx);
                        }
                    })
            })
    }
}

#[cfg(all(test, feature = "test-support"))]
mod tests {
    use std::{cell::Cell, rc::Rc};

    use super::*;
    use crate::{
        extensions::external_props::ElementAttributes,
        test_support::{click, init_test},
    };
    use gpui::{AppContext, Context, Render, TestAppContext, VisualTestContext};

    struct ButtonTestView {
        clicks: Rc<Cell<usize>>,
        parent_clicks: Rc<Cell<usize>>,
        disabled: bool,
    }

    impl Render for ButtonTestView {
        fn render(&mut self, _window: &mut Window, _cx: &mut Context<Self>) -> impl IntoElement {
            let clicks = self.clicks.clone();
            let parent_clicks = self.parent_clicks.clone();

            div()
                .id("parent")
                .size_full()
                .on_click(move |_event, _window, _cx| parent_clicks.set(parent_clicks.get() + 1))
                .child(
                    Button::new("save")
                        .text("Save")
                        .aria_label("Save changes")
                        .disabled(self.disabled)
                        .on_click(move |_event, _window, _cx| clicks.set(clicks.get() + 1)),
                )
        }
    }

    fn open(cx: &mut TestAppContext, disabled: bool) -> (Rc<Cell<usize>>, VisualTestContext) {
        let (clicks, _parent_clicks, vcx) = open_in_parent(cx, disabled);
        (clicks, vcx)
    }

    fn open_in_parent(
        cx: &mut TestAppContext,
        disabled: bool,
    ) -> (Rc<Cell<usize>>, Rc<Cell<usize>>, VisualTestContext) {
        init_test(cx);
        let clicks = Rc::new(Cell::new(0));
        let parent_clicks = Rc::new(Cell::new(0));

        let window = cx
            .update(|cx| {
                cx.open_window(Default::default(), |_window, cx| {
                    cx.new(|_cx| ButtonTestView {
                        clicks: clicks.clone(),
                        parent_clicks: parent_clicks.clone(),
                        disabled,
                    })
                })
            })
            .unwrap();

        let mut vcx = VisualTestContext::from_window(window.into(), cx);
        vcx.run_until_parked();
        (clicks, parent_clicks, vcx)
    }

    #[gpui::test]
    fn test_click_invokes_handler(cx: &mut TestAppContext) {
        let (clicks, mut vcx) = open(cx, false);

        click(&mut vcx, &"save".into());
        assert_eq!(clicks.get(), 1);
    }

    #[gpui::test]
    fn test_disabled_button_ignores_clicks(cx: &mut TestAppContext) {
        let (clicks, mut vcx) = open(cx, true);

        click(&mut vcx, &"save".into());
        assert_eq!(clicks.get(), 0);

        vcx.update(|_window, cx| {
            let id = ElementId::from("save");
            assert_eq!(
                ElementAttributes::get_attribute(&id, "aria-disabled", cx).map(|v| v.as_ref()),
                Some("true")
            );
        });
    }

    #[gpui::test]
    fn test_clicks_do_not_reach_the_parent(cx: &mut TestAppContext) {
        for disabled in [false, true] {
            let (_clicks, parent_clicks, mut vcx) = open_in_parent(cx, disabled);

            click(&mut vcx, &"save".into());
            assert_eq!(parent_clicks.get(), 0, "disabled: {disabled}");
        }
    }

    #[gpui::test]
    fn test_aria_label_is_recorded(cx: &mut TestAppContext) {
        let (_clicks, mut vcx) = open(cx, false);

        vcx.update(|_window, cx| {
            let id = ElementId::from("save");
            assert_eq!(
                ElementAttributes::get_attribute(&id, "aria-label", cx).map(|v| v.as_ref()),
                Some("Save changes")
            );
            assert_eq!(
                ElementAttributes::get_attribute(&id, "role", cx).map(|v| v.as_ref()),
                Some("button")
            );
        });
    }
}
