//! A header bar composed from an identity and a row of utilities.
//!
//! Deprecated: kept for applications that still render the legacy header.
//! It has no behaviour beyond following links and toggling its dropdowns.

mod menu_dropdown;

use std::rc::Rc;

use gpui::{
    App, ClickEvent, ElementId, FontWeight, InteractiveElement, IntoElement, Modifiers, MouseButton,
    ParentElement, RenderOnce, SharedString, StatefulInteractiveElement, Styled, Window, div,
    prelude::FluentBuilder,
};
use serde::Serialize;

pub use menu_dropdown::{MenuDropdown, MenuDropdownItem};

use crate::{
    ElementIdExt, FacetsIconKind,
    components::{Button, ButtonVariant, Icon},
    extensions::{
        click_behavior::LinkActivation,
        external_props::{ExternalProps, ExternalPropsExt, external_root},
    },
    instrumentation::{
        AnalyticsMetadata, AnalyticsMetadataExt, ComponentConfiguration, use_base_component,
    },
    theme::{ThemeExt, ThemeLayerKind, ThemeTextSizeKind},
    utils::DebugIdExt,
};
use menu_dropdown::MenuDropdownElement;

pub(crate) type FollowHandler = Rc<dyn Fn(&SharedString, &mut Window, &mut App)>;
type UtilityClickHandler = Rc<dyn Fn(&ClickEvent, &mut Window, &mut App)>;

/// Hands `href` to the application's routing, or opens it outside the app
/// when the user asked for a new context.
fn follow(
    href: &SharedString,
    modifiers: &Modifiers,
    on_follow: Option<&FollowHandler>,
    window: &mut Window,
    cx: &mut App,
) {
    match (LinkActivation::classify(modifiers, MouseButton::Left), on_follow) {
        (LinkActivation::InApp, Some(on_follow)) => (on_follow)(href, window, cx),
        _ => {
            log::debug!("opening {href}");
            cx.open_url(href);
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct TopNavigationIdentity {
    pub title: SharedString,
    pub href: SharedString,
    /// Path of an svg asset shown before the title.
    pub logo: Option<SharedString>,
}

impl TopNavigationIdentity {
    pub fn new(title: impl Into<SharedString>, href: impl Into<SharedString>) -> Self {
        Self {
            title: title.into(),
            href: href.into(),
            logo: None,
        }
    }

    pub fn logo(mut self, logo: impl Into<SharedString>) -> Self {
        self.logo = Some(logo.into());
        self
    }
}

#[derive(Clone)]
pub struct UtilityButton {
    pub text: SharedString,
    pub icon: Option<SharedString>,
    pub href: Option<SharedString>,
    /// Opens `href` outside the application.
    pub external: bool,
    pub on_click: Option<UtilityClickHandler>,
}

impl UtilityButton {
    pub fn new(text: impl Into<SharedString>) -> Self {
        Self {
            text: text.into(),
            icon: None,
            href: None,
            external: false,
            on_click: None,
        }
    }

    pub fn icon(mut self, icon: impl Into<SharedString>) -> Self {
        self.icon = Some(icon.into());
        self
    }

    pub fn href(mut self, href: impl Into<SharedString>) -> Self {
        self.href = Some(href.into());
        self
    }

    pub fn external(mut self, external: bool) -> Self {
        self.external = external;
        self
    }

    pub fn on_click(
        mut self,
        on_click: impl Fn(&ClickEvent, &mut Window, &mut App) + 'static,
    ) -> Self {
        self.on_click = Some(Rc::new(on_click));
        self
    }
}

#[derive(Clone)]
pub enum TopNavigationUtility {
    Button(UtilityButton),
    MenuDropdown(MenuDropdown),
}

impl From<UtilityButton> for TopNavigationUtility {
    fn from(button: UtilityButton) -> Self {
        TopNavigationUtility::Button(button)
    }
}

impl From<MenuDropdown> for TopNavigationUtility {
    fn from(menu: MenuDropdown) -> Self {
        TopNavigationUtility::MenuDropdown(menu)
    }
}

#[derive(IntoElement)]
pub struct TopNavigation {
    id: ElementId,
    identity: TopNavigationIdentity,
    utilities: Vec<TopNavigationUtility>,
    layer: ThemeLayerKind,
    on_follow: Option<FollowHandler>,
    analytics_metadata: Option<AnalyticsMetadata>,
    external_props: ExternalProps,
}

impl TopNavigation {
    pub fn new(id: impl Into<ElementId>, identity: TopNavigationIdentity) -> Self {
        Self {
            id: id.into(),
            identity,
            utilities: Vec::new(),
            layer: ThemeLayerKind::Secondary,
            on_follow: None,
            analytics_metadata: None,
            external_props: ExternalProps::default(),
        }
    }

    pub fn utility(mut self, utility: impl Into<TopNavigationUtility>) -> Self {
        self.utilities.push(utility.into());
        self
    }

    pub fn utilities(
        mut self,
        utilities: impl IntoIterator<Item = impl Into<TopNavigationUtility>>,
    ) -> Self {
        self.utilities.extend(utilities.into_iter().map(Into::into));
        self
    }

    pub fn layer(mut self, layer: ThemeLayerKind) -> Self {
        self.layer = layer;
        self
    }

    /// Receives in-app links (identity, non-external utilities, menu items).
    /// Without it every link is opened outside the application.
    pub fn on_follow(
        mut self,
        on_follow: impl Fn(&SharedString, &mut Window, &mut App) + 'static,
    ) -> Self {
        self.on_follow = Some(Rc::new(on_follow));
        self
    }
}

impl ExternalPropsExt for TopNavigation {
    fn external_props_mut(&mut self) -> &mut ExternalProps {
        &mut self.external_props
    }
}

impl AnalyticsMetadataExt for TopNavigation {
    fn analytics_metadata_mut(&mut self) -> &mut Option<AnalyticsMetadata> {
        &mut self.analytics_metadata
    }
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct TopNavigationTelemetry {
    has_logo: bool,
    utilities_count: usize,
}

impl RenderOnce for TopNavigation {
    fn render(self, window: &mut Window, cx: &mut App) -> impl IntoElement {
        let theme = cx.get_theme();
        let padding = theme.layout.padding.lg;
        let gap = theme.layout.padding.md;
        let border_width = theme.layout.border_width;
        let text_color = theme.variants.active(cx).colors.text.primary;
        let title_size = ThemeTextSizeKind::Subheading;
        let background_color = self.layer.resolve(cx);
        let border_color = self.layer.next().resolve(cx);

        let base_component = use_base_component(
            &self.id,
            "TopNavigation",
            ComponentConfiguration {
                props: TopNavigationTelemetry {
                    has_logo: self.identity.logo.is_some(),
                    utilities_count: self.utilities.len(),
                },
            },
            self.analytics_metadata.as_ref(),
            window,
            cx,
        );

        let identity_id = self.id.with_suffix("identity");
        let identity = div()
            .id(identity_id.clone())
            .debug_id(&identity_id)
            .flex()
            .items_center()
            .gap(gap)
            .cursor_pointer()
            .text_size(title_size.resolve(cx))
            .font_weight(FontWeight(title_size.weight(cx)))
            .when_some(self.identity.logo.clone(), |this, logo| {
                this.child(Icon::new(logo).color(text_color))
            })
            .child(self.identity.title.clone())
            .on_click({
                let href = self.identity.href.clone();
                let on_follow = self.on_follow.clone();

                move |event, window, cx| {
                    follow(&href, &event.modifiers(), on_follow.as_ref(), window, cx)
                }
            });

        let utilities = self
            .utilities
            .into_iter()
            .enumerate()
            .map(|(index, utility)| {
                let id = self.id.with_item("utility", index.to_string());

                match utility {
                    TopNavigationUtility::Button(button) => {
                        let on_follow = self.on_follow.clone();
                        let icon = button
                            .icon
                            .clone()
                            .or_else(|| button.external.then(|| FacetsIconKind::External.into()));

                        Button::new(id)
                            .variant(ButtonVariant::Link)
                            .layer(self.layer)
                            .text(button.text.clone())
                            .when_some(icon, |this, icon| this.icon(icon))
                            .on_click(move |event, window, cx| {
                                if let Some(on_click) = &button.on_click {
                                    (on_click)(event, window, cx);
                                }

                                match &button.href {
                                    Some(href) if button.external => cx.open_url(href),
                                    Some(href) => follow(
                                        href,
                                        &event.modifiers(),
                                        on_follow.as_ref(),
                                        window,
                                        cx,
                                    ),
                                    None => {}
                                }
                            })
                            .into_any_element()
                    }
                    TopNavigationUtility::MenuDropdown(menu) => {
                        MenuDropdownElement::new(id, menu, self.on_follow.clone())
                            .into_any_element()
                    }
                }
            })
            .collect::<Vec<_>>();

        external_root(
            &self.id,
            &self.external_props,
            base_component
                .attributes()
                .into_iter()
                .chain([("role".into(), "navigation".into())]),
            window,
            cx,
        )
        .flex()
        .items_center()
        .justify_between()
        .w_full()
        .px(padding)
        .py(padding / 2.)
        .bg(background_color)
        .border_b(border_width)
        .border_color(border_color)
        .text_color(text_color)
        .child(identity)
        .child(div().flex().items_center().gap(gap).children(utilities))
    }
}

#[cfg(all(test, feature = "test-support"))]
mod tests {
    use std::cell::RefCell;

    use gpui::{AppContext, Context, Render, TestAppContext, VisualTestContext};

    use super::*;
    use crate::{
        extensions::external_props::ElementAttributes,
        test_support::{click, click_with, init_test},
    };

    struct NavigationTestView {
        followed: Rc<RefCell<Vec<SharedString>>>,
        clicks: Rc<RefCell<usize>>,
    }

    impl Render for NavigationTestView {
        fn render(&mut self, _window: &mut Window, _cx: &mut Context<Self>) -> impl IntoElement {
            let followed = self.followed.clone();
            let clicks = self.clicks.clone();

            div().size_full().child(
                TopNavigation::new("nav", TopNavigationIdentity::new("Facets", "/home"))
                    .data("testid", "header")
                    .utility(UtilityButton::new("Notifications").on_click(
                        move |_event, _window, _cx| *clicks.borrow_mut() += 1,
                    ))
                    .utility(UtilityButton::new("Docs").href("https://example.com").external(true))
                    .utility(MenuDropdown::new(
                        "Account",
                        [
                            MenuDropdownItem::new("profile", "Profile").href("/profile"),
                            MenuDropdownItem::new("billing", "Billing").disabled(true),
                        ],
                    ))
                    .on_follow(move |href, _window, _cx| followed.borrow_mut().push(href.clone())),
            )
        }
    }

    fn open(cx: &mut TestAppContext) -> (NavigationTestView, VisualTestContext) {
        let followed = Rc::new(RefCell::new(Vec::new()));
        let clicks = Rc::new(RefCell::new(0));
        let view = NavigationTestView {
            followed: followed.clone(),
            clicks: clicks.clone(),
        };

        let window = cx
            .update(|cx| cx.open_window(Default::default(), |_window, cx| cx.new(|_cx| view)))
            .unwrap();

        let mut vcx = VisualTestContext::from_window(window.into(), cx);
        vcx.run_until_parked();
        (NavigationTestView { followed, clicks }, vcx)
    }

    fn nav_id() -> ElementId {
        ElementId::from("nav")
    }

    #[gpui::test]
    fn test_records_navigation_attributes(cx: &mut TestAppContext) {
        init_test(cx);
        let (_probe, mut vcx) = open(cx);

        vcx.update(|_window, cx| {
            let attributes = ElementAttributes::get(&nav_id(), cx).expect("navigation is recorded");

            assert_eq!(attributes.get("role").map(|v| v.as_ref()), Some("navigation"));
            assert_eq!(attributes.get("data-testid").map(|v| v.as_ref()), Some("header"));
            assert_eq!(
                attributes.get("data-component").map(|v| v.as_ref()),
                Some("TopNavigation")
            );
        });
    }

    #[gpui::test]
    fn test_identity_and_utilities_follow_links(cx: &mut TestAppContext) {
        init_test(cx);
        let (probe, mut vcx) = open(cx);

        click(&mut vcx, &nav_id().with_suffix("identity"));
        assert_eq!(*probe.followed.borrow(), vec![SharedString::from("/home")]);

        click(&mut vcx, &nav_id().with_item("utility", "0"));
        assert_eq!(*probe.clicks.borrow(), 1);

        click(&mut vcx, &nav_id().with_item("utility", "1"));
        assert_eq!(vcx.opened_url().as_deref(), Some("https://example.com"));
        assert_eq!(probe.followed.borrow().len(), 1);
    }

    #[gpui::test]
    fn test_identity_opens_outside_with_modifier(cx: &mut TestAppContext) {
        init_test(cx);
        let (probe, mut vcx) = open(cx);

        click_with(&mut vcx, &nav_id().with_suffix("identity"), Modifiers::control());

        assert!(probe.followed.borrow().is_empty());
        assert_eq!(vcx.opened_url().as_deref(), Some("/home"));
    }

    #[gpui::test]
    fn test_menu_dropdown_lists_items_while_open(cx: &mut TestAppContext) {
        init_test(cx);
        let (probe, mut vcx) = open(cx);
        let menu_id = nav_id().with_item("utility", "2");
        let trigger_id = menu_id.with_suffix("trigger");
        let expanded = |vcx: &mut VisualTestContext| {
            vcx.update(|_window, cx| {
                ElementAttributes::get_attribute(&trigger_id, "aria-expanded", cx)
                    .map(|value| value.to_string())
            })
        };

        assert_eq!(expanded(&mut vcx).as_deref(), Some("false"));

        click(&mut vcx, &trigger_id);
        assert_eq!(expanded(&mut vcx).as_deref(), Some("true"));

        click(&mut vcx, &menu_id.with_item("item", "profile"));
        assert_eq!(*probe.followed.borrow(), vec![SharedString::from("/profile")]);
        assert_eq!(expanded(&mut vcx).as_deref(), Some("false"));
    }
}
