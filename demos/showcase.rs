use gpui::{
    App, AppContext, Application, Bounds, Context, FocusHandle, IntoElement, KeyBinding, Render,
    SharedString, TitlebarOptions, Window, WindowBounds, WindowOptions, actions, div, point,
    prelude::*, px, size,
};

use gpui_facets::{
    FacetsAssets, assets,
    components::{
        Button, ButtonVariant, Container, ContainerVariant, ContentRenderStrategy, MenuDropdown,
        MenuDropdownItem, Tab, Tabs, TabsChangeDetail, TabsVariant, TokenList, TokenListAlignment,
        TopNavigation, TopNavigationIdentity, UtilityButton,
    },
    extensions::external_props::ExternalPropsExt,
    theme::{Theme, ThemeExt},
};

actions!(window, [TabNext, TabPrev]);

struct Showcase {
    focus_handle: FocusHandle,
    open_tabs: Vec<SharedString>,
    active_tab: Option<SharedString>,
    next_tab: usize,
}

impl Showcase {
    fn editor_tabs(&self, cx: &Context<Self>) -> Vec<Tab> {
        self.open_tabs
            .iter()
            .map(|name| {
                let dismissed = name.clone();

                Tab::new(name.clone(), name.clone())
                    .dismissible(true)
                    .dismiss_label(format!("Close {name}"))
                    .on_dismiss(cx.listener(move |this, _event, _window, cx| {
                        this.open_tabs.retain(|name| name != &dismissed);
                        if this.active_tab.as_ref() == Some(&dismissed) {
                            this.active_tab = this.open_tabs.first().cloned();
                        }
                        cx.notify();
                    }))
                    .content({
                        let name = name.clone();
                        move |_window: &mut Window, _cx: &mut App| {
                            div().child(format!("Contents of {name}"))
                        }
                    })
            })
            .collect()
    }
}

impl Render for Showcase {
    fn render(&mut self, window: &mut Window, cx: &mut Context<Self>) -> impl IntoElement {
        gpui_facets::init_for_window(window, cx);

        let theme = cx.get_theme();
        let labels: Vec<SharedString> = ["rust", "gpui", "taffy", "squircle", "serde", "log"]
            .into_iter()
            .map(SharedString::from)
            .collect();

        let settings_tabs = vec![
            Tab::new("general", "General")
                .content(|_window: &mut Window, _cx: &mut App| div().child("General settings")),
            Tab::new("billing", "Billing")
                .disabled(true)
                .disabled_reason("Billing is managed by your organization"),
            Tab::new("docs", "Docs").href("https://www.gpui.rs"),
            Tab::new("history", "History")
                .content_render_strategy(ContentRenderStrategy::Lazy)
                .content(|_window: &mut Window, _cx: &mut App| div().child("Recent activity")),
        ];

        div()
            .tab_group()
            .track_focus(&self.focus_handle)
            .size_full()
            .text_size(theme.layout.text.default_font.sizes.body)
            .text_color(theme.variants.active(cx).colors.text.primary)
            .bg(theme.variants.active(cx).colors.background.primary)
            .flex()
            .flex_col()
            .gap(px(20.))
            .child(
                TopNavigation::new(
                    "top_navigation",
                    TopNavigationIdentity::new("Facets", "/"),
                )
                .utility(UtilityButton::new("Docs").href("https://www.gpui.rs").external(true))
                .utility(MenuDropdown::new(
                    "Account",
                    [
                        MenuDropdownItem::new("profile", "Profile").href("/profile"),
                        MenuDropdownItem::new("sign_out", "Sign out").href("/sign-out"),
                    ],
                ))
                .on_follow(|href, _window, _cx| println!("navigate to {href}")),
            )
            .child(
                div()
                    .flex()
                    .flex_col()
                    .gap(px(20.))
                    .px(px(40.))
                    .child(
                        Tabs::new("settings", settings_tabs)
                            .aria_label("Settings")
                            .on_change(|detail, _window, _cx| {
                                println!("settings tab: {}", detail.active_tab_id)
                            }),
                    )
                    .child(
                        Tabs::new("editor", self.editor_tabs(cx))
                            .variant(TabsVariant::Container)
                            .when_some(self.active_tab.clone(), |this, id| this.active_tab_id(id))
                            .actions(Button::new("new_tab").text("New tab").on_click(
                                cx.listener(|this, _event, _window, cx| {
                                    this.next_tab += 1;
                                    let name: SharedString =
                                        format!("untitled-{}.rs", this.next_tab).into();
                                    this.open_tabs.push(name.clone());
                                    this.active_tab = Some(name);
                                    cx.notify();
                                }),
                            ))
                            .on_change(cx.listener(
                                |this, detail: &TabsChangeDetail, _window, cx| {
                                    this.active_tab = Some(detail.active_tab_id.clone());
                                    cx.notify();
                                },
                            )),
                    )
                    .child(
                        Container::new("crates")
                            .variant(ContainerVariant::Stacked)
                            .header("Dependencies")
                            .data("testid", "crates")
                            .child(
                                TokenList::new(
                                    "tokens",
                                    labels,
                                    |label: &SharedString, _index, _window, _cx| {
                                        Button::new(SharedString::from(format!("token-{label}")))
                                            .variant(ButtonVariant::Normal)
                                            .text(label.clone())
                                            .into_any_element()
                                    },
                                )
                                .alignment(TokenListAlignment::Horizontal)
                                .limit(3),
                            ),
                    ),
            )
    }
}

fn main() {
    Application::new()
        .with_assets(assets![FacetsAssets])
        .run(|cx: &mut App| {
            cx.set_theme(Theme::default_theme());
            gpui_facets::init(cx);

            let bounds = Bounds::centered(None, size(px(900.), px(760.)), cx);

            cx.open_window(
                WindowOptions {
                    window_bounds: Some(WindowBounds::Windowed(bounds)),
                    titlebar: Some(TitlebarOptions {
                        appears_transparent: true,
                        traffic_light_position: Some(point(px(10.), px(10.))),
                        ..Default::default()
                    }),
                    ..Default::default()
                },
                |_window, cx| {
                    cx.new(|cx| Showcase {
                        focus_handle: cx.focus_handle(),
                        open_tabs: vec!["main.rs".into(), "lib.rs".into()],
                        active_tab: Some("main.rs".into()),
                        next_tab: 0,
                    })
                },
            )
            .unwrap();

            init_tab_indexing_actions(cx);

            cx.activate(true);
        });
}

fn init_tab_indexing_actions(cx: &mut App) {
    cx.on_action(move |_: &TabNext, cx| {
        cx.defer(move |cx| {
            let Some(window) = cx.active_window() else {
                return;
            };

            let _ = window.update(cx, move |_, window, cx| {
                window.focus_next(cx);
            });
        })
    });

    cx.on_action(move |_: &TabPrev, cx| {
        cx.defer(move |cx| {
            let Some(window) = cx.active_window() else {
                return;
            };

            let _ = window.update(cx, move |_, window, cx| {
                window.focus_prev(cx);
            });
        })
    });

    cx.bind_keys([KeyBinding::new("tab", TabNext, None)]);
    cx.bind_keys([KeyBinding::new("shift-tab", TabPrev, None)]);
}
