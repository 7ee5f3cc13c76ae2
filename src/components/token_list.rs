use std::rc::Rc;

use gpui::{
    AnyElement, App, ElementId, IntoElement, ParentElement, RenderOnce, SharedString, Styled,
    Window, div, prelude::FluentBuilder,
};
use serde::Serialize;

use crate::{
    ElementIdExt,
    components::{Button, ButtonVariant},
    extensions::external_props::{ExternalProps, ExternalPropsExt, external_root},
    instrumentation::{ComponentConfiguration, use_base_component},
    theme::ThemeExt,
};

type RenderItem<T> = Rc<dyn Fn(&T, usize, &mut Window, &mut App) -> AnyElement>;
type ExpandedHandler = Rc<dyn Fn(bool, &mut Window, &mut App)>;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum TokenListAlignment {
    #[default]
    Vertical,
    /// A wrapping row.
    Horizontal,
    /// A wrapping row with the toggle inline after the last token.
    Inline,
    /// Fixed-width columns.
    HorizontalGrid,
}

#[derive(Clone, Debug, Default)]
pub struct TokenListI18nStrings {
    pub limit_show_more: Option<SharedString>,
    pub limit_show_fewer: Option<SharedString>,
}

/// Number of items shown, given the limit and the expanded flag.
pub fn visible_item_count(len: usize, limit: Option<usize>, expanded: bool) -> usize {
    match limit {
        Some(limit) if !expanded => len.min(limit),
        _ => len,
    }
}

/// Whether the show more / show fewer toggle applies at all.
pub fn has_hidden_items(len: usize, limit: Option<usize>) -> bool {
    limit.is_some_and(|limit| len > limit)
}

/// Renders items up to an optional limit, with a toggle revealing the rest.
#[derive(IntoElement)]
pub struct TokenList<T: 'static> {
    id: ElementId,
    items: Rc<[T]>,
    render_item: RenderItem<T>,
    limit: Option<usize>,
    alignment: TokenListAlignment,
    after: Option<AnyElement>,
    i18n_strings: TokenListI18nStrings,
    limit_show_more_aria_label: Option<SharedString>,
    limit_show_fewer_aria_label: Option<SharedString>,
    on_expanded_click: Option<ExpandedHandler>,
    external_props: ExternalProps,
}

impl<T: 'static> TokenList<T> {
    pub fn new(
        id: impl Into<ElementId>,
        items: impl Into<Rc<[T]>>,
        render_item: impl Fn(&T, usize, &mut Window, &mut App) -> AnyElement + 'static,
    ) -> Self {
        Self {
            id: id.into(),
            items: items.into(),
            render_item: Rc::new(render_item),
            limit: None,
            alignment: TokenListAlignment::default(),
            after: None,
            i18n_strings: TokenListI18nStrings::default(),
            limit_show_more_aria_label: None,
            limit_show_fewer_aria_label: None,
            on_expanded_click: None,
            external_props: ExternalProps::default(),
        }
    }

    pub fn limit(mut self, limit: usize) -> Self {
        self.limit = Some(limit);
        self
    }

    pub fn alignment(mut self, alignment: TokenListAlignment) -> Self {
        self.alignment = alignment;
        self
    }

    /// Content rendered after the items, e.g. an "add" control.
    pub fn after(mut self, after: impl IntoElement) -> Self {
        self.after = Some(after.into_any_element());
        self
    }

    pub fn i18n_strings(mut self, i18n_strings: TokenListI18nStrings) -> Self {
        self.i18n_strings = i18n_strings;
        self
    }

    pub fn limit_show_more_aria_label(mut self, label: impl Into<SharedString>) -> Self {
        self.limit_show_more_aria_label = Some(label.into());
        self
    }

    pub fn limit_show_fewer_aria_label(mut self, label: impl Into<SharedString>) -> Self {
        self.limit_show_fewer_aria_label = Some(label.into());
        self
    }

    /// Called with the new expanded flag whenever the toggle is used.
    pub fn on_expanded_click(
        mut self,
        on_expanded_click: impl Fn(bool, &mut Window, &mut App) + 'static,
    ) -> Self {
        self.on_expanded_click = Some(Rc::new(on_expanded_click));
        self
    }

    fn toggle_text(&self, expanded: bool, hidden: usize) -> SharedString {
        if expanded {
            self.i18n_strings
                .limit_show_fewer
                .clone()
                .unwrap_or_else(|| "Show fewer".into())
        } else {
            let show_more = self
                .i18n_strings
                .limit_show_more
                .clone()
                .unwrap_or_else(|| "Show more".into());
            format!("{show_more} (+{hidden})").into()
        }
    }
}

impl<T: 'static> ExternalPropsExt for TokenList<T> {
    fn external_props_mut(&mut self) -> &mut ExternalProps {
        &mut self.external_props
    }
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct TokenListTelemetry {
    alignment: TokenListAlignment,
    limit: Option<usize>,
    items_count: usize,
}

impl<T: 'static> RenderOnce for TokenList<T> {
    fn render(mut self, window: &mut Window, cx: &mut App) -> impl IntoElement {
        let theme = cx.get_theme();
        let gap = theme.layout.padding.md;
        let grid_column_width = theme.layout.size.xl * 4.;

        let base_component = use_base_component(
            &self.id,
            "TokenList",
            ComponentConfiguration {
                props: TokenListTelemetry {
                    alignment: self.alignment,
                    limit: self.limit,
                    items_count: self.items.len(),
                },
            },
            None,
            window,
            cx,
        );

        let expanded_state = window.use_keyed_state(
            self.id.with_suffix("state:expanded"),
            cx,
            |_window, _cx| false,
        );
        let expanded = *expanded_state.read(cx);

        let len = self.items.len();
        let visible = visible_item_count(len, self.limit, expanded);
        let toggle = has_hidden_items(len, self.limit).then(|| {
            let text = self.toggle_text(expanded, len - visible);
            let aria_label = if expanded {
                self.limit_show_fewer_aria_label.clone()
            } else {
                self.limit_show_more_aria_label.clone()
            };
            let on_expanded_click = self.on_expanded_click.clone();

            Button::new(self.id.with_suffix("toggle"))
                .variant(ButtonVariant::Link)
                .text(text.clone())
                .aria_label(aria_label.unwrap_or(text))
                .aria("expanded", expanded.to_string())
                .on_click(move |_event, window, cx| {
                    let expanded = expanded_state.update(cx, |expanded, cx| {
                        *expanded = !*expanded;
                        cx.notify();
                        *expanded
                    });

                    if let Some(on_expanded_click) = &on_expanded_click {
                        (on_expanded_click)(expanded, window, cx);
                    }
                })
        });

        let items = self.items[..visible]
            .iter()
            .enumerate()
            .map(|(index, item)| {
                let token = (self.render_item)(item, index, window, cx);

                div()
                    .when(self.alignment == TokenListAlignment::HorizontalGrid, |this| {
                        this.w(grid_column_width)
                    })
                    .child(token)
            })
            .collect::<Vec<_>>();

        let inline = self.alignment == TokenListAlignment::Inline;
        let after = self.after.take();

        let list = div()
            .flex()
            .gap(gap)
            .map(|this| match self.alignment {
                TokenListAlignment::Vertical => this.flex_col(),
                _ => this.flex_row().flex_wrap().items_center(),
            })
            .children(items);

        let root = external_root(
            &self.id,
            &self.external_props,
            base_component
                .attributes()
                .into_iter()
                .chain([("role".into(), "list".into())]),
            window,
            cx,
        );

        if inline {
            root.flex()
                .flex_row()
                .flex_wrap()
                .items_center()
                .gap(gap)
                .child(list)
                .children(toggle)
                .children(after)
        } else {
            root.flex()
                .flex_col()
                .gap(gap)
                .child(list.children(after))
                .children(toggle)
        }
    }
}
