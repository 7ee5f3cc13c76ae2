use std::rc::Rc;

use gpui::{AnyElement, App, ClickEvent, IntoElement, SharedString, Window};
use serde::Serialize;

use crate::components::tabs::state::TabStop;

pub(crate) type RenderSlot = Rc<dyn Fn(&mut Window, &mut App) -> AnyElement>;
pub(crate) type DismissHandler = Rc<dyn Fn(&ClickEvent, &mut Window, &mut App)>;

/// When a tab's content is built.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum ContentRenderStrategy {
    /// Only while the tab is active.
    #[default]
    Active,
    /// Always; inactive content is hidden.
    Eager,
    /// From the first time the tab is active, then kept hidden.
    Lazy,
}

/// One tab of a [`crate::components::Tabs`].
///
/// Tabs are supplied in full on every render and matched by `id`.
#[derive(Clone)]
pub struct Tab {
    pub(crate) id: SharedString,
    pub(crate) label: SharedString,
    pub(crate) content: Option<RenderSlot>,
    pub(crate) disabled: bool,
    pub(crate) disabled_reason: Option<SharedString>,
    pub(crate) dismissible: bool,
    pub(crate) dismiss_label: Option<SharedString>,
    pub(crate) dismiss_disabled: bool,
    pub(crate) on_dismiss: Option<DismissHandler>,
    pub(crate) action: Option<RenderSlot>,
    pub(crate) href: Option<SharedString>,
    pub(crate) content_render_strategy: ContentRenderStrategy,
}

impl Tab {
    pub fn new(id: impl Into<SharedString>, label: impl Into<SharedString>) -> Self {
        Self {
            id: id.into(),
            label: label.into(),
            content: None,
            disabled: false,
            disabled_reason: None,
            dismissible: false,
            dismiss_label: None,
            dismiss_disabled: false,
            on_dismiss: None,
            action: None,
            href: None,
            content_render_strategy: ContentRenderStrategy::default(),
        }
    }

    /// Builds the panel shown while this tab is active.
    pub fn content<E: IntoElement + 'static>(
        mut self,
        content: impl Fn(&mut Window, &mut App) -> E + 'static,
    ) -> Self {
        self.content = Some(Rc::new(move |window: &mut Window, cx: &mut App| {
            content(window, cx).into_any_element()
        }));
        self
    }

    pub fn disabled(mut self, disabled: bool) -> Self {
        self.disabled = disabled;
        self
    }

    /// Shown as a tooltip while the tab is disabled.
    pub fn disabled_reason(mut self, reason: impl Into<SharedString>) -> Self {
        self.disabled_reason = Some(reason.into());
        self
    }

    pub fn dismissible(mut self, dismissible: bool) -> Self {
        self.dismissible = dismissible;
        self
    }

    pub fn dismiss_label(mut self, label: impl Into<SharedString>) -> Self {
        self.dismiss_label = Some(label.into());
        self
    }

    pub fn dismiss_disabled(mut self, disabled: bool) -> Self {
        self.dismiss_disabled = disabled;
        self
    }

    /// Called when the dismiss button is pressed. Removing the tab is up to
    /// the caller.
    pub fn on_dismiss(
        mut self,
        on_dismiss: impl Fn(&ClickEvent, &mut Window, &mut App) + 'static,
    ) -> Self {
        self.on_dismiss = Some(Rc::new(on_dismiss));
        self
    }

    /// An extra control rendered inside the tab header.
    pub fn action<E: IntoElement + 'static>(
        mut self,
        action: impl Fn(&mut Window, &mut App) -> E + 'static,
    ) -> Self {
        self.action = Some(Rc::new(move |window: &mut Window, cx: &mut App| {
            action(window, cx).into_any_element()
        }));
        self
    }

    /// Turns the header into a link; see [`crate::components::TabsChangeDetail`].
    pub fn href(mut self, href: impl Into<SharedString>) -> Self {
        self.href = Some(href.into());
        self
    }

    pub fn content_render_strategy(mut self, strategy: ContentRenderStrategy) -> Self {
        self.content_render_strategy = strategy;
        self
    }

    pub fn id(&self) -> &SharedString {
        &self.id
    }

    pub(crate) fn stop(&self) -> TabStop {
        TabStop {
            id: self.id.clone(),
            disabled: self.disabled,
            href: self.href.clone(),
        }
    }

    pub(crate) fn has_header_actions(&self) -> bool {
        self.dismissible || self.action.is_some()
    }
}
