use gpui::{
    App, ElementId, Entity, FocusHandle, InteractiveElement, IntoElement, ParentElement,
    RenderOnce, SharedString, Styled, Subscription, Window, anchored, deferred, div,
    prelude::FluentBuilder,
};
use gpui_squircle::{SquircleStyled, squircle};

use crate::{
    ElementIdExt, FacetsIconKind,
    components::{Button, ButtonVariant, top_navigation::FollowHandler},
    extensions::external_props::ExternalPropsExt,
    theme::{ThemeExt, ThemeLayerKind},
};

#[derive(Clone, Debug, PartialEq)]
pub struct MenuDropdownItem {
    pub id: SharedString,
    pub text: SharedString,
    pub href: Option<SharedString>,
    pub disabled: bool,
}

impl MenuDropdownItem {
    pub fn new(id: impl Into<SharedString>, text: impl Into<SharedString>) -> Self {
        Self {
            id: id.into(),
            text: text.into(),
            href: None,
            disabled: false,
        }
    }

    pub fn href(mut self, href: impl Into<SharedString>) -> Self {
        self.href = Some(href.into());
        self
    }

    pub fn disabled(mut self, disabled: bool) -> Self {
        self.disabled = disabled;
        self
    }
}

/// A utility that lists its items below a trigger while open.
#[derive(Clone, Debug, PartialEq)]
pub struct MenuDropdown {
    pub text: SharedString,
    pub items: Vec<MenuDropdownItem>,
}

impl MenuDropdown {
    pub fn new(
        text: impl Into<SharedString>,
        items: impl IntoIterator<Item = MenuDropdownItem>,
    ) -> Self {
        Self {
            text: text.into(),
            items: items.into_iter().collect(),
        }
    }
}

struct MenuState {
    open: bool,
    _focus_out: Subscription,
}

#[derive(IntoElement)]
pub(crate) struct MenuDropdownElement {
    id: ElementId,
    menu: MenuDropdown,
    layer: ThemeLayerKind,
    on_follow: Option<FollowHandler>,
}

impl MenuDropdownElement {
    pub fn new(id: ElementId, menu: MenuDropdown, on_follow: Option<FollowHandler>) -> Self {
        Self {
            id,
            menu,
            layer: ThemeLayerKind::Secondary,
            on_follow,
        }
    }
}

fn set_open(state: &Entity<MenuState>, open: bool, cx: &mut App) {
    state.update(cx, |this, cx| {
        if this.open != open {
            this.open = open;
            cx.notify();
        }
    });
}

impl RenderOnce for MenuDropdownElement {
    fn render(self, window: &mut Window, cx: &mut App) -> impl IntoElement {
        let theme = cx.get_theme();
        let corner_radius = theme.layout.corner_radii.md;
        let padding = theme.layout.padding.sm;
        let border_width = theme.layout.border_width;
        let background_color = self.layer.next().resolve(cx);
        let border_color = self.layer.raised().next().resolve(cx);

        let focus_handle: FocusHandle = window
            .use_keyed_state(self.id.with_suffix("state:focus_handle"), cx, |_window, cx| {
                cx.focus_handle()
            })
            .read(cx)
            .clone();

        let state = window.use_keyed_state(self.id.with_suffix("state:menu"), cx, {
            let focus_handle = focus_handle.clone();

            move |window, cx| {
                let weak_state = cx.weak_entity();

                // Closes once focus leaves the trigger and its items.
                let focus_out =
                    window.on_focus_out(&focus_handle, cx, move |_event, _window, cx| {
                        if let Some(state) = weak_state.upgrade() {
                            set_open(&state, false, cx);
                        }
                    });

                MenuState {
                    open: false,
                    _focus_out: focus_out,
                }
            }
        });
        let is_open = state.read(cx).open;

        let trigger = Button::new(self.id.with_suffix("trigger"))
            .variant(ButtonVariant::Normal)
            .layer(self.layer)
            .text(self.menu.text.clone())
            .icon(FacetsIconKind::CaretDown)
            .aria("haspopup", "menu")
            .aria("expanded", is_open.to_string())
            .on_click({
                let state = state.clone();
                let focus_handle = focus_handle.clone();

                move |_event, window, cx| {
                    focus_handle.focus(window, cx);
                    let open = !state.read(cx).open;
                    log::debug!("menu dropdown {}", if open { "opened" } else { "closed" });
                    set_open(&state, open, cx);
                }
            });

        let items = self.menu.items.into_iter().map(|item| {
            let state = state.clone();
            let on_follow = self.on_follow.clone();

            Button::new(self.id.with_item("item", item.id.clone()))
                .variant(ButtonVariant::Link)
                .layer(self.layer)
                .text(item.text.clone())
                .disabled(item.disabled)
                .on_click(move |event, window, cx| {
                    set_open(&state, false, cx);

                    if let Some(href) = &item.href {
                        super::follow(href, &event.modifiers(), on_follow.as_ref(), window, cx);
                    }
                })
        });

        div()
            .id(self.id.clone())
            .track_focus(&focus_handle)
            .flex()
            .flex_col()
            .child(trigger)
            .when(is_open, |this| {
                this.child(deferred(
                    anchored().snap_to_window().child(
                        div()
                            .id(self.id.with_suffix("menu"))
                            .occlude()
                            .relative()
                            .mt(padding)
                            .flex()
                            .flex_col()
                            .gap(padding)
                            .p(padding * 2.)
                            .child(
                                squircle()
                                    .absolute_expand()
                                    .rounded(corner_radius)
                                    .bg(background_color)
                                    .border(border_width)
                                    .border_inside()
                                    .border_color(border_color),
                            )
                            .children(items),
                    ),
                ))
            })
    }
}
