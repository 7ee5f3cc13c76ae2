use std::time::Duration;

use gpui::{
    App, CursorStyle, ElementId, InteractiveElement, IntoElement, MouseButton, ParentElement,
    RenderOnce, StatefulInteractiveElement, Styled, Window, div, prelude::FluentBuilder, px,
};

use crate::{
    ElementIdExt, FacetsIconKind,
    components::{
        Button, ButtonVariant, Icon,
        tabs::{Tab, TabsController, dismiss_id, header_dom_id, header_id, panel_dom_id},
    },
    extensions::external_props::ElementAttributes,
    primitives::{FocusRing, Tooltip},
    theme::{ThemeExt, ThemeLayerKind},
    utils::{DebugIdExt, RgbaExt, disabled_transition, selected_transition},
};

/// The clickable header of one tab inside the tab list.
#[derive(IntoElement)]
pub(crate) struct TabHeader {
    tabs_id: ElementId,
    tab: Tab,
    selected: bool,
    focused: bool,
    layer: ThemeLayerKind,
    controller: TabsController,
}

impl TabHeader {
    pub fn new(tabs_id: &ElementId, tab: Tab, controller: TabsController) -> Self {
        Self {
            tabs_id: tabs_id.clone(),
            tab,
            selected: false,
            focused: false,
            layer: ThemeLayerKind::Secondary,
            controller,
        }
    }

    pub fn selected(mut self, selected: bool) -> Self {
        self.selected = selected;
        self
    }

    /// Shows the focus ring; keyboard focus moves between headers virtually.
    pub fn focused(mut self, focused: bool) -> Self {
        self.focused = focused;
        self
    }

    pub fn layer(mut self, layer: ThemeLayerKind) -> Self {
        self.layer = layer;
        self
    }
}

impl RenderOnce for TabHeader {
    fn render(self, window: &mut Window, cx: &mut App) -> impl IntoElement {
        let tab = self.tab;
        let id = header_id(&self.tabs_id, &tab.id);

        let theme = cx.get_theme();
        let colors = &theme.variants.active(cx).colors;
        let accent_color = colors.accent.primary;
        let text_color = match (tab.disabled, self.selected) {
            (true, _) => colors.text.disabled,
            (false, true) => colors.text.primary,
            (false, false) => colors.text.secondary,
        };
        let padding = theme.layout.padding.lg;
        let gap = theme.layout.padding.sm;
        let corner_radius = theme.layout.corner_radii.sm;
        let indicator_height = theme.layout.tab_indicator_height;
        let hover_color = self.layer.next().resolve(cx);

        ElementAttributes::record(
            &id,
            [
                ("id".into(), header_dom_id(&tab.id)),
                ("role".into(), "tab".into()),
                ("aria-selected".into(), self.selected.to_string().into()),
                ("aria-disabled".into(), tab.disabled.to_string().into()),
                ("aria-controls".into(), panel_dom_id(&tab.id)),
            ]
            .into_iter()
            .chain(tab.href.clone().map(|href| ("href".into(), href)))
            .collect(),
            window,
            cx,
        );

        let is_hover_state =
            window.use_keyed_state(id.with_suffix("state:hover"), cx, |_window, _cx| false);
        let is_hover = *is_hover_state.read(cx) && !tab.disabled;

        let indicator = *selected_transition(
            id.with_suffix("indicator"),
            window,
            cx,
            Duration::from_millis(250),
            self.selected,
        )
        .evaluate(window, cx);

        let opacity = *disabled_transition(id.clone(), window, cx, tab.disabled).evaluate(window, cx);

        let action = tab.action.as_ref().map(|action| action(window, cx));

        let dismiss = tab.dismissible.then(|| {
            let on_dismiss = tab.on_dismiss.clone();

            Button::new(dismiss_id(&self.tabs_id, &tab.id))
                .variant(ButtonVariant::Icon)
                .layer(self.layer)
                .icon(FacetsIconKind::Close)
                .aria_label(
                    tab.dismiss_label
                        .clone()
                        .unwrap_or_else(|| format!("Dismiss {}", tab.label).into()),
                )
                .disabled(tab.dismiss_disabled || tab.disabled)
                .on_click(move |event, window, cx| {
                    if let Some(on_dismiss) = &on_dismiss {
                        (on_dismiss)(event, window, cx);
                    }
                })
        });

        div()
            .id(id.clone())
            .debug_id(&id)
            .relative()
            .flex()
            .flex_none()
            .items_center()
            .gap(gap)
            .px(padding)
            .py(padding / 2.)
            .text_color(text_color)
            .opacity(opacity)
            .cursor(if tab.disabled {
                CursorStyle::OperationNotAllowed
            } else {
                CursorStyle::PointingHand
            })
            .when(is_hover, |this| this.bg(hover_color.fade(0.5)).rounded(corner_radius))
            .child(
                FocusRing::new(id.with_suffix("focus_ring"), self.controller.focus_handle())
                    .visible(self.focused)
                    .rounded(corner_radius),
            )
            .child(tab.label.clone())
            .when(tab.href.is_some(), |this| {
                this.child(Icon::new(FacetsIconKind::External).size(px(10.)).color(text_color))
            })
            .children(action)
            .children(dismiss)
            .child(
                div()
                    .absolute()
                    .left_0()
                    .right_0()
                    .bottom_0()
                    .h(indicator_height)
                    .bg(accent_color.alpha(indicator)),
            )
            .when_some(
                tab.disabled_reason.clone().filter(|_| tab.disabled),
                |this, reason| this.tooltip(Tooltip::text(reason)),
            )
            .when(!tab.disabled, |this| {
                let tab_id = tab.id.clone();
                let href = tab.href.clone();
                let controller = self.controller.clone();

                this.on_hover(move |hover, _window, cx| {
                    is_hover_state.update(cx, |this, cx| {
                        *this = *hover;
                        cx.notify();
                    });
                })
                .on_click({
                    let tab_id = tab_id.clone();
                    let href = href.clone();
                    let controller = controller.clone();

                    move |event, window, cx| {
                        controller.header_clicked(
                            &tab_id,
                            href.as_ref(),
                            &event.modifiers(),
                            MouseButton::Left,
                            window,
                            cx,
                        );
                    }
                })
                .on_mouse_up(MouseButton::Middle, move |event, window, cx| {
                    controller.header_clicked(
                        &tab_id,
                        href.as_ref(),
                        &event.modifiers,
                        MouseButton::Middle,
                        window,
                        cx,
                    );
                })
            })
    }
}
