mod header;
mod state;
mod tab;

use std::{collections::HashSet, rc::Rc};

use gpui::{
    Action, AnyElement, App, ElementId, Entity, FocusHandle, InteractiveElement, IntoElement,
    KeyBinding, Modifiers, MouseButton, ParentElement, Pixels, RenderOnce, ScrollHandle,
    SharedString, StatefulInteractiveElement, Styled, Window, actions, canvas, div, point,
    prelude::FluentBuilder, px,
};
use serde::Serialize;

pub use state::{KeyboardActivationMode, TabSelectError};
pub use tab::{ContentRenderStrategy, Tab};

use crate::{
    ElementIdExt, FacetsIconKind,
    components::{Button, ButtonVariant, Container, ContainerVariant},
    extensions::{
        click_behavior::LinkActivation,
        external_props::{ElementAttributes, ExternalProps, ExternalPropsExt, external_root},
    },
    instrumentation::{
        AnalyticsMetadata, AnalyticsMetadataExt, ComponentConfiguration, use_base_component,
    },
    theme::{ThemeExt, ThemeLayerKind},
    utils::DebugIdExt,
};
use header::TabHeader;
use state::{
    ScrollOverflow, Step, TabStop, content_is_rendered, duplicate_ids, index_of, resolve_active,
    scrolled_offset, update_mounted, validate_selection,
};

actions!(
    tabs,
    [
        SelectPrevious,
        SelectNext,
        SelectFirst,
        SelectLast,
        ActivateFocused
    ]
);

const KEY_CONTEXT: &str = "Tabs";

pub fn init(cx: &mut App) {
    cx.bind_keys([
        KeyBinding::new("left", SelectPrevious, Some(KEY_CONTEXT)),
        KeyBinding::new("right", SelectNext, Some(KEY_CONTEXT)),
        KeyBinding::new("home", SelectFirst, Some(KEY_CONTEXT)),
        KeyBinding::new("end", SelectLast, Some(KEY_CONTEXT)),
        KeyBinding::new("enter", ActivateFocused, Some(KEY_CONTEXT)),
        KeyBinding::new("space", ActivateFocused, Some(KEY_CONTEXT)),
    ]);
}

pub(crate) fn header_id(tabs_id: &ElementId, tab_id: &SharedString) -> ElementId {
    tabs_id.with_item("tab", tab_id.clone())
}

pub(crate) fn dismiss_id(tabs_id: &ElementId, tab_id: &SharedString) -> ElementId {
    tabs_id.with_item("dismiss", tab_id.clone())
}

pub(crate) fn panel_id(tabs_id: &ElementId, tab_id: &SharedString) -> ElementId {
    tabs_id.with_item("panel", tab_id.clone())
}

/// The `id` attribute recorded for a tab header, referenced by its panel.
pub(crate) fn header_dom_id(tab_id: &SharedString) -> SharedString {
    format!("{tab_id}-tab").into()
}

/// The `id` attribute recorded for a tab panel, referenced by its header.
pub(crate) fn panel_dom_id(tab_id: &SharedString) -> SharedString {
    format!("{tab_id}-panel").into()
}

/// Passed to `on_change` whenever the user selects a different tab.
#[derive(Clone, Debug, PartialEq)]
pub struct TabsChangeDetail {
    pub active_tab_id: SharedString,
    /// The selected tab's `href`, for routing in-app navigation.
    pub active_tab_href: Option<SharedString>,
}

type ChangeHandler = Rc<dyn Fn(&TabsChangeDetail, &mut Window, &mut App)>;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum TabsVariant {
    /// A bare tab list above the content.
    #[default]
    Default,
    /// The tab list is the header of a container.
    Container,
    /// Like `Container`, without outer corner radius.
    Stacked,
}

#[derive(Clone, Debug)]
pub struct TabsI18nStrings {
    pub scroll_left_aria_label: SharedString,
    pub scroll_right_aria_label: SharedString,
    /// Announced for tab lists whose headers carry dismiss buttons or actions.
    pub tabs_with_actions_aria_role_description: SharedString,
}

impl Default for TabsI18nStrings {
    fn default() -> Self {
        Self {
            scroll_left_aria_label: "Scroll left".into(),
            scroll_right_aria_label: "Scroll right".into(),
            tabs_with_actions_aria_role_description: "Tabs with actions".into(),
        }
    }
}

/// Per-instance interaction state kept across renders.
#[derive(Default)]
struct TabsInteraction {
    /// The uncontrolled selection.
    selected: Option<SharedString>,
    /// The header keyboard focus is on while the tab list is focused.
    focused: Option<SharedString>,
    /// Whether the focus ring is shown; pointer presses keep it hidden.
    focus_visible: bool,
    /// Tabs whose lazy content has been built at least once.
    mounted: HashSet<SharedString>,
    /// The scroll state the scroll buttons were last rendered for.
    scroll_overflow: ScrollOverflow,
    last_warning: Option<String>,
}

/// Shared by the tab list and its headers to act on the current frame's tabs.
#[derive(Clone)]
pub(crate) struct TabsController {
    stops: Rc<[TabStop]>,
    controlled: Option<SharedString>,
    interaction: Entity<TabsInteraction>,
    keyboard_activation_mode: KeyboardActivationMode,
    on_change: Option<ChangeHandler>,
    focus_handle: FocusHandle,
    scroll_handle: ScrollHandle,
}

impl TabsController {
    pub fn focus_handle(&self) -> FocusHandle {
        self.focus_handle.clone()
    }

    fn active(&self, cx: &App) -> Option<SharedString> {
        match &self.controlled {
            Some(controlled) => Some(controlled.clone()),
            None => self.interaction.read(cx).selected.clone(),
        }
    }

    fn focus_index(&self, cx: &App) -> Option<usize> {
        self.interaction
            .read(cx)
            .focused
            .clone()
            .or_else(|| self.active(cx))
            .and_then(|id| index_of(&self.stops, &id))
    }

    /// Handles a tab list key action only while the list itself holds focus.
    /// Keys pressed inside a header's action or dismiss button go to them.
    fn key_action<A: Action>(
        &self,
        handler: impl Fn(&Self, &mut Window, &mut App) + 'static,
    ) -> impl Fn(&A, &mut Window, &mut App) + 'static {
        let controller = self.clone();

        move |_action: &A, window: &mut Window, cx: &mut App| {
            if controller.focus_handle.is_focused(window) {
                handler(&controller, window, cx);
            } else {
                cx.propagate();
            }
        }
    }

    fn navigate(&self, direction: Step, window: &mut Window, cx: &mut App) {
        let Some(index) = state::step(&self.stops, self.focus_index(cx), direction) else {
            return;
        };
        let id = self.stops[index].id.clone();

        self.interaction.update(cx, |this, cx| {
            this.focused = Some(id.clone());
            this.focus_visible = true;
            cx.notify();
        });
        self.scroll_handle.scroll_to_item(index);

        if self.keyboard_activation_mode == KeyboardActivationMode::Automatic {
            self.select(&id, window, cx);
        }
    }

    fn activate_focused(&self, window: &mut Window, cx: &mut App) {
        if let Some(index) = self.focus_index(cx) {
            let id = self.stops[index].id.clone();
            self.select(&id, window, cx);
        }
    }

    pub fn header_clicked(
        &self,
        id: &SharedString,
        href: Option<&SharedString>,
        modifiers: &Modifiers,
        button: MouseButton,
        window: &mut Window,
        cx: &mut App,
    ) {
        match (LinkActivation::classify(modifiers, button), href) {
            (LinkActivation::NewContext, Some(href)) => {
                log::debug!("opening tab link {href}");
                cx.open_url(href);
            }
            (LinkActivation::NewContext, None) if button == MouseButton::Middle => {}
            _ => {
                self.interaction.update(cx, |this, cx| {
                    this.focused = Some(id.clone());
                    this.focus_visible = false;
                    cx.notify();
                });
                self.focus_handle.focus(window, cx);
                self.select(id, window, cx);
            }
        }
    }

    /// Makes `id` the active tab. Selecting the tab that is already active
    /// does not notify.
    fn select(&self, id: &SharedString, window: &mut Window, cx: &mut App) {
        let index = match validate_selection(&self.stops, id) {
            Ok(index) => index,
            Err(err) => {
                log::warn!("ignoring tab selection: {err}");
                return;
            }
        };

        if self.active(cx).as_ref() == Some(id) {
            return;
        }

        if self.controlled.is_none() {
            self.interaction.update(cx, |this, cx| {
                this.selected = Some(id.clone());
                cx.notify();
            });
        }

        log::debug!("tab \"{id}\" selected");

        if let Some(on_change) = &self.on_change {
            let detail = TabsChangeDetail {
                active_tab_id: id.clone(),
                active_tab_href: self.stops[index].href.clone(),
            };
            (on_change)(&detail, window, cx);
        }
    }
}

/// A tab list with one content panel per tab.
///
/// Uncontrolled by default: the first enabled tab starts active and user
/// selections are kept across renders. Passing
/// [`active_tab_id`](Tabs::active_tab_id) makes the caller the owner of the
/// selection; `on_change` then only reports what the user asked for.
#[derive(IntoElement)]
pub struct Tabs {
    id: ElementId,
    tabs: Vec<Tab>,
    active_tab_id: Option<SharedString>,
    on_change: Option<ChangeHandler>,
    variant: TabsVariant,
    layer: ThemeLayerKind,
    keyboard_activation_mode: KeyboardActivationMode,
    actions: Option<AnyElement>,
    i18n_strings: TabsI18nStrings,
    aria_label: Option<SharedString>,
    aria_labelledby: Option<SharedString>,
    disable_content_paddings: bool,
    fit_height: bool,
    focus_handle: Option<FocusHandle>,
    analytics_metadata: Option<AnalyticsMetadata>,
    external_props: ExternalProps,
}

impl Tabs {
    pub fn new(id: impl Into<ElementId>, tabs: impl IntoIterator<Item = Tab>) -> Self {
        Self {
            id: id.into(),
            tabs: tabs.into_iter().collect(),
            active_tab_id: None,
            on_change: None,
            variant: TabsVariant::default(),
            layer: ThemeLayerKind::Secondary,
            keyboard_activation_mode: KeyboardActivationMode::default(),
            actions: None,
            i18n_strings: TabsI18nStrings::default(),
            aria_label: None,
            aria_labelledby: None,
            disable_content_paddings: false,
            fit_height: false,
            focus_handle: None,
            analytics_metadata: None,
            external_props: ExternalProps::default(),
        }
    }

    pub fn active_tab_id(mut self, id: impl Into<SharedString>) -> Self {
        self.active_tab_id = Some(id.into());
        self
    }

    pub fn on_change(
        mut self,
        on_change: impl Fn(&TabsChangeDetail, &mut Window, &mut App) + 'static,
    ) -> Self {
        self.on_change = Some(Rc::new(on_change));
        self
    }

    pub fn variant(mut self, variant: TabsVariant) -> Self {
        self.variant = variant;
        self
    }

    pub fn layer(mut self, layer: ThemeLayerKind) -> Self {
        self.layer = layer;
        self
    }

    pub fn keyboard_activation_mode(mut self, mode: KeyboardActivationMode) -> Self {
        self.keyboard_activation_mode = mode;
        self
    }

    /// Rendered after the tab list, e.g. an "add tab" button.
    pub fn actions(mut self, actions: impl IntoElement) -> Self {
        self.actions = Some(actions.into_any_element());
        self
    }

    pub fn i18n_strings(mut self, strings: TabsI18nStrings) -> Self {
        self.i18n_strings = strings;
        self
    }

    pub fn disable_content_paddings(mut self, disable: bool) -> Self {
        self.disable_content_paddings = disable;
        self
    }

    pub fn fit_height(mut self, fit_height: bool) -> Self {
        self.fit_height = fit_height;
        self
    }

    /// Labels the tab list.
    pub fn aria_label(mut self, label: impl Into<SharedString>) -> Self {
        self.aria_label = Some(label.into());
        self
    }

    pub fn aria_labelledby(mut self, id: impl Into<SharedString>) -> Self {
        self.aria_labelledby = Some(id.into());
        self
    }

    /// Uses `focus_handle` for the tab list instead of an internal one, so the
    /// caller can move focus onto it.
    pub fn focus_handle(mut self, focus_handle: FocusHandle) -> Self {
        self.focus_handle = Some(focus_handle);
        self
    }
}

impl ExternalPropsExt for Tabs {
    fn external_props_mut(&mut self) -> &mut ExternalProps {
        &mut self.external_props
    }
}

impl AnalyticsMetadataExt for Tabs {
    fn analytics_metadata_mut(&mut self) -> &mut Option<AnalyticsMetadata> {
        &mut self.analytics_metadata
    }
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct TabsTelemetry {
    variant: TabsVariant,
    keyboard_activation_mode: KeyboardActivationMode,
    disable_content_paddings: bool,
    fit_height: bool,
    tabs_count: usize,
    has_actions: bool,
}

impl RenderOnce for Tabs {
    fn render(mut self, window: &mut Window, cx: &mut App) -> impl IntoElement {
        let theme = cx.get_theme();
        let padding = theme.layout.padding.lg;
        let gap = theme.layout.padding.sm;
        let border_width = theme.layout.border_width;
        let border_color = self.layer.next().resolve(cx);
        let text_size = theme.layout.text.default_font.sizes.body;

        let base_component = use_base_component(
            &self.id,
            "Tabs",
            ComponentConfiguration {
                props: TabsTelemetry {
                    variant: self.variant,
                    keyboard_activation_mode: self.keyboard_activation_mode,
                    disable_content_paddings: self.disable_content_paddings,
                    fit_height: self.fit_height,
                    tabs_count: self.tabs.len(),
                    has_actions: self.actions.is_some(),
                },
            },
            self.analytics_metadata.as_ref(),
            window,
            cx,
        );

        let stops: Rc<[TabStop]> = self.tabs.iter().map(Tab::stop).collect();

        let interaction = window.use_keyed_state(
            self.id.with_suffix("state:interaction"),
            cx,
            |_window, _cx| TabsInteraction::default(),
        );
        let focus_handle = match self.focus_handle.take() {
            Some(focus_handle) => focus_handle,
            None => window
                .use_keyed_state(
                    self.id.with_suffix("state:focus_handle"),
                    cx,
                    |_window, cx| cx.focus_handle().tab_stop(true),
                )
                .read(cx)
                .clone(),
        };
        let scroll_handle = window
            .use_keyed_state(
                self.id.with_suffix("state:scroll_handle"),
                cx,
                |_window, _cx| ScrollHandle::new(),
            )
            .read(cx)
            .clone();
        let is_list_focused = focus_handle.is_focused(window);
        // Layout of the previous frame; checked again after this one is laid out.
        let scroll_overflow =
            ScrollOverflow::new(scroll_handle.offset().x, scroll_handle.max_offset().width);

        let duplicates = duplicate_ids(&stops);
        let warning = if !duplicates.is_empty() {
            Some(format!(
                "tabs {:?} has duplicate tab ids: {}",
                self.id,
                duplicates
                    .iter()
                    .map(ToString::to_string)
                    .collect::<Vec<_>>()
                    .join(", ")
            ))
        } else {
            self.active_tab_id
                .as_ref()
                .filter(|id| index_of(&stops, id).is_none())
                .map(|id| format!("tabs {:?} has no tab with active id \"{id}\"", self.id))
        };

        let retained = interaction.read(cx).selected.clone();
        let active = resolve_active(&stops, self.active_tab_id.as_ref(), retained.as_ref());
        // A controlled id naming a disabled tab selects it without showing
        // its panel.
        let shown = active
            .clone()
            .filter(|id| index_of(&stops, id).is_some_and(|index| !stops[index].disabled));

        let (focused, focus_visible, mounted) = interaction.update(cx, |this, _cx| {
            if self.active_tab_id.is_none() {
                this.selected = active.clone();
            }
            if !is_list_focused {
                this.focused = None;
                this.focus_visible = false;
            }
            update_mounted(&mut this.mounted, &stops, shown.as_ref());
            this.scroll_overflow = scroll_overflow;

            if this.last_warning != warning {
                if let Some(warning) = &warning {
                    log::warn!("{warning}");
                }
                this.last_warning = warning;
            }

            (
                this.focused.clone().or_else(|| active.clone()),
                this.focus_visible && is_list_focused,
                this.mounted.clone(),
            )
        });

        let controller = TabsController {
            stops,
            controlled: self.active_tab_id.clone(),
            interaction,
            keyboard_activation_mode: self.keyboard_activation_mode,
            on_change: self.on_change.clone(),
            focus_handle: focus_handle.clone(),
            scroll_handle: scroll_handle.clone(),
        };

        let tab_list_id = self.id.with_suffix("tab_list");
        ElementAttributes::record(
            &tab_list_id,
            [(SharedString::from("role"), SharedString::from("tablist"))]
                .into_iter()
                .chain(
                    self.aria_label
                        .clone()
                        .map(|label| ("aria-label".into(), label)),
                )
                .chain(
                    self.aria_labelledby
                        .clone()
                        .map(|id| ("aria-labelledby".into(), id)),
                )
                .chain(
                    self.tabs
                        .iter()
                        .any(Tab::has_header_actions)
                        .then(|| {
                            (
                                "aria-roledescription".into(),
                                self.i18n_strings.tabs_with_actions_aria_role_description.clone(),
                            )
                        }),
                )
                .chain(
                    focused
                        .as_ref()
                        .map(|id| ("aria-activedescendant".into(), header_dom_id(id))),
                )
                .collect(),
            window,
            cx,
        );

        let headers: Vec<_> = self
            .tabs
            .iter()
            .map(|tab| {
                let is_active = active.as_ref() == Some(&tab.id);
                let is_focused = focus_visible && focused.as_ref() == Some(&tab.id);

                TabHeader::new(&self.id, tab.clone(), controller.clone())
                    .selected(is_active)
                    .focused(is_focused)
                    .layer(self.layer)
            })
            .collect();

        let tab_list = div()
            .id(tab_list_id.clone())
            .debug_id(&tab_list_id)
            .key_context(KEY_CONTEXT)
            .track_focus(&focus_handle)
            .on_action(controller.key_action::<SelectPrevious>(|controller, window, cx| {
                controller.navigate(Step::Previous, window, cx)
            }))
            .on_action(controller.key_action::<SelectNext>(|controller, window, cx| {
                controller.navigate(Step::Next, window, cx)
            }))
            .on_action(controller.key_action::<SelectFirst>(|controller, window, cx| {
                controller.navigate(Step::First, window, cx)
            }))
            .on_action(controller.key_action::<SelectLast>(|controller, window, cx| {
                controller.navigate(Step::Last, window, cx)
            }))
            .on_action(controller.key_action::<ActivateFocused>(|controller, window, cx| {
                controller.activate_focused(window, cx)
            }))
            .flex()
            .flex_1()
            .min_w(px(0.))
            .overflow_x_scroll()
            .track_scroll(&scroll_handle)
            .children(headers);

        // The scroll handle only learns the strip's size during layout. Once
        // the strip is laid out, a stale set of scroll buttons renders again.
        let overflow_check = canvas(
            {
                let scroll_handle = scroll_handle.clone();
                let interaction = controller.interaction.clone();

                move |_bounds, _window, cx| {
                    let current = ScrollOverflow::new(
                        scroll_handle.offset().x,
                        scroll_handle.max_offset().width,
                    );

                    if interaction.read(cx).scroll_overflow != current {
                        cx.defer(move |cx| interaction.update(cx, |_this, cx| cx.notify()));
                    }
                }
            },
            |_bounds, _state, _window, _cx| {},
        )
        .absolute()
        .size_0();

        let scroll_button = |suffix: &'static str,
                             icon: FacetsIconKind,
                             label: SharedString,
                             delta: Pixels,
                             disabled: bool| {
            let scroll_handle = scroll_handle.clone();

            Button::new(self.id.with_suffix(suffix))
                .variant(ButtonVariant::Icon)
                .layer(self.layer)
                .icon(icon)
                .aria_label(label)
                .disabled(disabled)
                .on_click(move |_event, window, _cx| {
                    let offset = scroll_handle.offset();
                    let max_offset = scroll_handle.max_offset().width;
                    scroll_handle.set_offset(point(
                        scrolled_offset(offset.x, delta, max_offset),
                        offset.y,
                    ));
                    window.refresh();
                })
        };

        // One step scrolls by roughly a tab header.
        let scroll_step = px(160.);
        let scroll_buttons = scroll_overflow.overflowing.then(|| {
            (
                scroll_button(
                    "scroll_left",
                    FacetsIconKind::AngleLeft,
                    self.i18n_strings.scroll_left_aria_label.clone(),
                    scroll_step,
                    scroll_overflow.at_start,
                ),
                scroll_button(
                    "scroll_right",
                    FacetsIconKind::AngleRight,
                    self.i18n_strings.scroll_right_aria_label.clone(),
                    -scroll_step,
                    scroll_overflow.at_end,
                ),
            )
        });
        let (scroll_left, scroll_right) = scroll_buttons.unzip();

        let header_row = div()
            .flex()
            .items_center()
            .w_full()
            .gap(gap)
            .text_size(text_size)
            .when(self.variant == TabsVariant::Default, |this| {
                this.border_b(border_width).border_color(border_color)
            })
            .relative()
            .children(scroll_left)
            .child(tab_list)
            .child(overflow_check)
            .children(scroll_right)
            .children(self.actions);

        let panels: Vec<_> = self
            .tabs
            .iter()
            .filter_map(|tab| {
                let is_shown = shown.as_ref() == Some(&tab.id);
                let was_mounted = mounted.contains(&tab.id);

                if !content_is_rendered(tab.content_render_strategy, is_shown, was_mounted) {
                    return None;
                }

                let id = panel_id(&self.id, &tab.id);
                ElementAttributes::record(
                    &id,
                    [
                        ("id".into(), panel_dom_id(&tab.id)),
                        ("role".into(), "tabpanel".into()),
                        ("aria-labelledby".into(), header_dom_id(&tab.id)),
                    ]
                    .into_iter()
                    .collect(),
                    window,
                    cx,
                );

                let content = tab.content.as_ref().map(|content| content(window, cx));

                Some(
                    div()
                        .id(id.clone())
                        .debug_id(&id)
                        .flex()
                        .flex_col()
                        .w_full()
                        .when(!is_shown, |this| this.hidden())
                        .children(content),
                )
            })
            .collect();

        let root = external_root(
            &self.id,
            &self.external_props,
            base_component.attributes(),
            window,
            cx,
        )
        .flex()
        .flex_col()
        .w_full()
        .when(self.fit_height, |this| this.h_full());

        match self.variant {
            TabsVariant::Default => root.child(header_row).child(
                div()
                    .id(self.id.with_suffix("content"))
                    .flex()
                    .flex_col()
                    .w_full()
                    .when(!self.disable_content_paddings, |this| this.pt(padding))
                    .when(self.fit_height, |this| {
                        this.flex_1().min_h(px(0.)).overflow_y_scroll()
                    })
                    .children(panels),
            ),
            TabsVariant::Container | TabsVariant::Stacked => root.child(
                Container::new(self.id.with_suffix("container"))
                    .variant(match self.variant {
                        TabsVariant::Stacked => ContainerVariant::Stacked,
                        _ => ContainerVariant::Default,
                    })
                    .layer(self.layer)
                    .header(header_row.px(padding).border_b(border_width).border_color(border_color))
                    .disable_header_paddings(true)
                    .disable_content_paddings(self.disable_content_paddings)
                    .fit_height(self.fit_height)
                    .children(panels),
            ),
        }
    }
}

#[cfg(all(test, feature = "test-support"))]
mod tests {
    use std::{
        cell::{Cell, RefCell},
        rc::Rc,
    };

    use gpui::{
        AppContext, Bounds, Context, Render, Size, TestAppContext, VisualTestContext,
        WindowBounds, WindowOptions, size,
    };
    use rand::{Rng, SeedableRng, rngs::StdRng};

    use super::*;
    use crate::test_support::{click, click_with, init_test, is_rendered, middle_click};

    struct TabsTestView {
        tabs: Vec<Tab>,
        active_tab_id: Option<SharedString>,
        follow_changes: bool,
        keyboard_activation_mode: KeyboardActivationMode,
        changes: Rc<RefCell<Vec<TabsChangeDetail>>>,
    }

    impl TabsTestView {
        fn new(tabs: Vec<Tab>) -> Self {
            Self {
                tabs,
                active_tab_id: None,
                follow_changes: false,
                keyboard_activation_mode: KeyboardActivationMode::Automatic,
                changes: Rc::default(),
            }
        }
    }

    impl Render for TabsTestView {
        fn render(&mut self, _window: &mut Window, cx: &mut Context<Self>) -> impl IntoElement {
            let view = cx.entity().downgrade();
            let changes = self.changes.clone();
            let follow_changes = self.follow_changes;

            let tabs = Tabs::new("tabs", self.tabs.clone())
                .aria_label("Settings")
                .keyboard_activation_mode(self.keyboard_activation_mode)
                .on_change(move |detail, _window, cx| {
                    changes.borrow_mut().push(detail.clone());

                    if follow_changes {
                        let _ = view.update(cx, |this, cx| {
                            this.active_tab_id = Some(detail.active_tab_id.clone());
                            cx.notify();
                        });
                    }
                });

            div().size_full().child(match &self.active_tab_id {
                Some(id) => tabs.active_tab_id(id.clone()),
                None => tabs,
            })
        }
    }

    fn open(
        cx: &mut TestAppContext,
        view: TabsTestView,
    ) -> (Entity<TabsTestView>, VisualTestContext) {
        open_with(cx, view, WindowOptions::default())
    }

    fn open_sized(
        cx: &mut TestAppContext,
        view: TabsTestView,
        window_size: Size<Pixels>,
    ) -> (Entity<TabsTestView>, VisualTestContext) {
        let bounds = Bounds::new(point(px(0.), px(0.)), window_size);
        let options = WindowOptions {
            window_bounds: Some(WindowBounds::Windowed(bounds)),
            ..Default::default()
        };
        open_with(cx, view, options)
    }

    fn open_with(
        cx: &mut TestAppContext,
        view: TabsTestView,
        options: WindowOptions,
    ) -> (Entity<TabsTestView>, VisualTestContext) {
        let window = cx
            .update(|cx| cx.open_window(options, |_window, cx| cx.new(|_cx| view)))
            .unwrap();
        let entity = cx.update(|cx| window.root(cx)).unwrap();

        let mut vcx = VisualTestContext::from_window(window.into(), cx);
        vcx.run_until_parked();
        (entity, vcx)
    }

    fn tabs_id() -> ElementId {
        ElementId::from("tabs")
    }

    fn plain(ids: &[&'static str]) -> Vec<Tab> {
        ids.iter().map(|id| Tab::new(*id, id.to_uppercase())).collect()
    }

    fn attribute(vcx: &mut VisualTestContext, id: &ElementId, name: &str) -> Option<String> {
        vcx.update(|_window, cx| {
            ElementAttributes::get_attribute(id, name, cx).map(|value| value.to_string())
        })
    }

    fn selected(vcx: &mut VisualTestContext, ids: &[&'static str]) -> Vec<&'static str> {
        ids.iter()
            .copied()
            .filter(|id| {
                attribute(vcx, &header_id(&tabs_id(), &(*id).into()), "aria-selected").as_deref()
                    == Some("true")
            })
            .collect()
    }

    fn change_ids(changes: &Rc<RefCell<Vec<TabsChangeDetail>>>) -> Vec<String> {
        changes
            .borrow()
            .iter()
            .map(|change| change.active_tab_id.to_string())
            .collect()
    }

    fn press(vcx: &mut VisualTestContext, keystrokes: &str) {
        vcx.simulate_keystrokes(keystrokes);
        vcx.run_until_parked();
    }

    fn click_tab(vcx: &mut VisualTestContext, id: &'static str) {
        click(vcx, &header_id(&tabs_id(), &id.into()));
    }

    #[gpui::test]
    fn test_first_enabled_tab_starts_active(cx: &mut TestAppContext) {
        init_test(cx);
        let mut tabs = plain(&["a", "b", "c"]);
        tabs[0] = tabs[0].clone().disabled(true);

        let (_view, mut vcx) = open(cx, TabsTestView::new(tabs));

        assert_eq!(selected(&mut vcx, &["a", "b", "c"]), vec!["b"]);
        assert_eq!(
            attribute(&mut vcx, &panel_id(&tabs_id(), &"b".into()), "aria-labelledby").as_deref(),
            Some("b-tab")
        );
        assert_eq!(
            attribute(&mut vcx, &tabs_id().with_suffix("tab_list"), "aria-label").as_deref(),
            Some("Settings")
        );
        assert!(!is_rendered(&mut vcx, &tabs_id().with_suffix("scroll_right")));
    }

    #[gpui::test]
    fn test_arrow_keys_skip_disabled_tabs_and_wrap(cx: &mut TestAppContext) {
        init_test(cx);
        let mut tabs = plain(&["a", "b", "c"]);
        tabs[1] = tabs[1].clone().disabled(true);

        let view = TabsTestView::new(tabs);
        let changes = view.changes.clone();
        let (_view, mut vcx) = open(cx, view);

        // Clicking the active tab focuses the list without a change.
        click_tab(&mut vcx, "a");
        assert!(changes.borrow().is_empty());

        press(&mut vcx, "right");
        assert_eq!(selected(&mut vcx, &["a", "b", "c"]), vec!["c"]);

        press(&mut vcx, "right");
        assert_eq!(selected(&mut vcx, &["a", "b", "c"]), vec!["a"]);
        assert_eq!(change_ids(&changes), vec!["c", "a"]);

        press(&mut vcx, "end");
        assert_eq!(selected(&mut vcx, &["a", "b", "c"]), vec!["c"]);
        assert_eq!(
            attribute(&mut vcx, &tabs_id().with_suffix("tab_list"), "aria-activedescendant")
                .as_deref(),
            Some("c-tab")
        );
    }

    #[gpui::test]
    fn test_manual_activation_moves_focus_only(cx: &mut TestAppContext) {
        init_test(cx);
        let mut view = TabsTestView::new(plain(&["a", "b", "c"]));
        view.keyboard_activation_mode = KeyboardActivationMode::Manual;
        let changes = view.changes.clone();
        let (_view, mut vcx) = open(cx, view);

        click_tab(&mut vcx, "a");
        press(&mut vcx, "right right");

        assert_eq!(selected(&mut vcx, &["a", "b", "c"]), vec!["a"]);
        assert_eq!(
            attribute(&mut vcx, &tabs_id().with_suffix("tab_list"), "aria-activedescendant")
                .as_deref(),
            Some("c-tab")
        );
        assert!(changes.borrow().is_empty());

        press(&mut vcx, "enter");
        assert_eq!(selected(&mut vcx, &["a", "b", "c"]), vec!["c"]);
        assert_eq!(change_ids(&changes), vec!["c"]);
    }

    #[gpui::test]
    fn test_controlled_selection_follows_the_caller(cx: &mut TestAppContext) {
        init_test(cx);
        let mut view = TabsTestView::new(plain(&["a", "b", "c"]));
        view.active_tab_id = Some("a".into());
        let changes = view.changes.clone();
        let (view, mut vcx) = open(cx, view);

        click_tab(&mut vcx, "b");
        assert_eq!(change_ids(&changes), vec!["b"]);
        assert_eq!(selected(&mut vcx, &["a", "b", "c"]), vec!["a"]);

        view.update(&mut vcx, |this, cx| {
            this.follow_changes = true;
            cx.notify();
        });
        vcx.run_until_parked();

        click_tab(&mut vcx, "c");
        assert_eq!(change_ids(&changes), vec!["b", "c"]);
        assert_eq!(selected(&mut vcx, &["a", "b", "c"]), vec!["c"]);
    }

    #[gpui::test]
    fn test_dismissing_a_tab_does_not_select_it(cx: &mut TestAppContext) {
        init_test(cx);
        let dismissed = Rc::new(RefCell::new(Vec::new()));
        let mut tabs = plain(&["a", "b"]);
        tabs[1] = tabs[1].clone().dismissible(true).on_dismiss({
            let dismissed = dismissed.clone();
            move |_event, _window, _cx| dismissed.borrow_mut().push("b")
        });

        let view = TabsTestView::new(tabs);
        let changes = view.changes.clone();
        let (_view, mut vcx) = open(cx, view);

        assert_eq!(
            attribute(&mut vcx, &tabs_id().with_suffix("tab_list"), "aria-roledescription")
                .as_deref(),
            Some("Tabs with actions")
        );

        click(&mut vcx, &dismiss_id(&tabs_id(), &"b".into()));

        assert_eq!(*dismissed.borrow(), vec!["b"]);
        assert!(changes.borrow().is_empty());
        assert_eq!(selected(&mut vcx, &["a", "b"]), vec!["a"]);
    }

    #[gpui::test]
    fn test_disabled_dismiss_button_is_inert(cx: &mut TestAppContext) {
        init_test(cx);
        let dismissed = Rc::new(Cell::new(0));
        let mut tabs = plain(&["a", "b"]);
        tabs[1] = tabs[1]
            .clone()
            .dismissible(true)
            .dismiss_disabled(true)
            .on_dismiss({
                let dismissed = dismissed.clone();
                move |_event, _window, _cx| dismissed.set(dismissed.get() + 1)
            });

        let view = TabsTestView::new(tabs);
        let changes = view.changes.clone();
        let (_view, mut vcx) = open(cx, view);

        click(&mut vcx, &dismiss_id(&tabs_id(), &"b".into()));

        assert_eq!(dismissed.get(), 0);
        assert!(changes.borrow().is_empty());
        assert_eq!(selected(&mut vcx, &["a", "b"]), vec!["a"]);
    }

    #[gpui::test]
    fn test_keys_pressed_inside_a_header_action_stay_there(cx: &mut TestAppContext) {
        init_test(cx);
        let action_focus = cx.update(|cx| cx.focus_handle());
        let mut tabs = plain(&["a", "b", "c"]);
        tabs[0] = tabs[0].clone().action({
            let action_focus = action_focus.clone();
            move |_window: &mut Window, _cx: &mut App| {
                div().id("filter").track_focus(&action_focus).size(px(12.))
            }
        });

        let view = TabsTestView::new(tabs);
        let changes = view.changes.clone();
        let (_view, mut vcx) = open(cx, view);

        click_tab(&mut vcx, "b");
        assert_eq!(change_ids(&changes), vec!["b"]);

        vcx.update(|window, cx| action_focus.focus(window, cx));
        press(&mut vcx, "right end");

        assert_eq!(selected(&mut vcx, &["a", "b", "c"]), vec!["b"]);
        assert_eq!(change_ids(&changes), vec!["b"]);
        assert!(vcx.update(|window, _cx| action_focus.is_focused(window)));
    }

    #[gpui::test]
    fn test_scroll_buttons_follow_overflow(cx: &mut TestAppContext) {
        init_test(cx);
        let tabs = (0..20)
            .map(|index| Tab::new(format!("section-{index}"), format!("Section {index}")))
            .collect();
        let left = tabs_id().with_suffix("scroll_left");
        let right = tabs_id().with_suffix("scroll_right");

        let (_view, mut vcx) = open_sized(cx, TabsTestView::new(tabs), size(px(240.), px(320.)));

        assert!(is_rendered(&mut vcx, &left));
        assert!(is_rendered(&mut vcx, &right));
        assert_eq!(attribute(&mut vcx, &left, "aria-label").as_deref(), Some("Scroll left"));
        assert_eq!(attribute(&mut vcx, &right, "aria-label").as_deref(), Some("Scroll right"));
        assert_eq!(attribute(&mut vcx, &left, "aria-disabled").as_deref(), Some("true"));
        assert_eq!(attribute(&mut vcx, &right, "aria-disabled").as_deref(), Some("false"));

        click(&mut vcx, &right);
        assert_eq!(attribute(&mut vcx, &left, "aria-disabled").as_deref(), Some("false"));

        vcx.simulate_resize(size(px(6000.), px(320.)));
        vcx.run_until_parked();

        assert!(!is_rendered(&mut vcx, &left));
        assert!(!is_rendered(&mut vcx, &right));
    }

    #[gpui::test]
    fn test_link_tabs_open_in_a_new_context_with_modifiers(cx: &mut TestAppContext) {
        init_test(cx);
        let tabs = vec![
            Tab::new("a", "A"),
            Tab::new("docs", "Docs").href("https://example.com/docs"),
            Tab::new("api", "API").href("https://example.com/api"),
        ];

        let view = TabsTestView::new(tabs);
        let changes = view.changes.clone();
        let (_view, mut vcx) = open(cx, view);

        click_tab(&mut vcx, "docs");
        assert_eq!(
            *changes.borrow(),
            vec![TabsChangeDetail {
                active_tab_id: "docs".into(),
                active_tab_href: Some("https://example.com/docs".into()),
            }]
        );

        click_with(
            &mut vcx,
            &header_id(&tabs_id(), &"api".into()),
            Modifiers::control(),
        );
        assert_eq!(changes.borrow().len(), 1);
        assert_eq!(selected(&mut vcx, &["a", "docs", "api"]), vec!["docs"]);
        assert_eq!(vcx.opened_url().as_deref(), Some("https://example.com/api"));

        middle_click(&mut vcx, &header_id(&tabs_id(), &"a".into()));
        assert_eq!(changes.borrow().len(), 1);
        assert_eq!(selected(&mut vcx, &["a", "docs", "api"]), vec!["docs"]);
    }

    #[gpui::test]
    fn test_content_render_strategies(cx: &mut TestAppContext) {
        init_test(cx);
        let renders: Vec<Rc<Cell<usize>>> = (0..3).map(|_| Rc::default()).collect();
        let strategies = [
            ContentRenderStrategy::Active,
            ContentRenderStrategy::Lazy,
            ContentRenderStrategy::Eager,
        ];

        let tabs = ["a", "b", "c"]
            .into_iter()
            .zip(strategies)
            .zip(renders.iter().cloned())
            .map(|((id, strategy), count)| {
                Tab::new(id, id.to_uppercase())
                    .content_render_strategy(strategy)
                    .content(move |_window: &mut Window, _cx: &mut App| {
                        count.set(count.get() + 1);
                        div().child(id)
                    })
            })
            .collect();

        let (_view, mut vcx) = open(cx, TabsTestView::new(tabs));
        let refresh = |vcx: &mut VisualTestContext| {
            vcx.update(|window, _cx| window.refresh());
            vcx.run_until_parked();
        };

        assert!(renders[0].get() > 0);
        assert_eq!(renders[1].get(), 0);
        assert!(renders[2].get() > 0);

        click_tab(&mut vcx, "b");
        let active_renders = renders[0].get();
        assert!(renders[1].get() > 0);

        click_tab(&mut vcx, "c");
        let lazy_renders = renders[1].get();
        refresh(&mut vcx);

        assert_eq!(renders[0].get(), active_renders);
        assert!(renders[1].get() > lazy_renders);
    }

    #[gpui::test]
    fn test_removed_selection_falls_back_to_first_enabled_tab(cx: &mut TestAppContext) {
        init_test(cx);
        let view = TabsTestView::new(plain(&["a", "b", "c"]));
        let changes = view.changes.clone();
        let (view, mut vcx) = open(cx, view);

        click_tab(&mut vcx, "c");
        assert_eq!(selected(&mut vcx, &["a", "b", "c"]), vec!["c"]);

        view.update(&mut vcx, |this, cx| {
            this.tabs.pop();
            cx.notify();
        });
        vcx.run_until_parked();

        assert_eq!(selected(&mut vcx, &["a", "b"]), vec!["a"]);
        assert_eq!(change_ids(&changes), vec!["c"]);
    }

    #[gpui::test]
    fn test_random_key_presses_keep_focus_on_the_active_tab(cx: &mut TestAppContext) {
        init_test(cx);
        let ids = ["a", "b", "c", "d", "e"];
        let mut tabs = plain(&ids);
        tabs[1] = tabs[1].clone().disabled(true);
        tabs[4] = tabs[4].clone().disabled(true);

        let view = TabsTestView::new(tabs);
        let changes = view.changes.clone();
        let (_view, mut vcx) = open(cx, view);
        click_tab(&mut vcx, "a");

        let mut rng = StdRng::seed_from_u64(11);
        let keys = ["left", "right", "home", "end"];

        for _ in 0..40 {
            press(&mut vcx, keys[rng.random_range(0..keys.len())]);

            let active = selected(&mut vcx, &ids);
            assert_eq!(active.len(), 1);
            assert!(!["b", "e"].contains(&active[0]));
            assert_eq!(
                attribute(&mut vcx, &tabs_id().with_suffix("tab_list"), "aria-activedescendant"),
                Some(format!("{}-tab", active[0]))
            );

            if let Some(last) = change_ids(&changes).last() {
                assert_eq!(last, active[0]);
            }
        }
    }
}
