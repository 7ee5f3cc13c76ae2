use std::collections::HashMap;

use gpui::{
    App, Div, ElementId, Global, InteractiveElement, Refineable, SharedString, Stateful,
    StyleRefinement, Styled, WeakEntity, Window, div,
};
use indexmap::IndexMap;

use crate::ElementIdExt;

/// Attribute names starting with this prefix are reserved for internal use
/// and are never forwarded.
const INTERNAL_PREFIX: &str = "__";

pub type Attributes = IndexMap<SharedString, SharedString>;

/// Configuration a component does not model itself: free-form attributes
/// (`aria-*`, `data-*`, anything else) plus style refinements. Both land on
/// the component's root element.
#[derive(Default)]
pub struct ExternalProps {
    pub attributes: Attributes,
    pub style: StyleRefinement,
}

impl ExternalProps {
    /// Returns the props that may be forwarded, dropping reserved names.
    pub fn forwardable(&self) -> Attributes {
        self.attributes
            .iter()
            .filter(|(name, _)| {
                let reserved = name.starts_with(INTERNAL_PREFIX);
                if reserved {
                    log::trace!("not forwarding reserved attribute \"{name}\"");
                }
                !reserved
            })
            .map(|(name, value)| (name.clone(), value.clone()))
            .collect()
    }
}

/// Builder methods for components accepting external props.
pub trait ExternalPropsExt: Sized {
    fn external_props_mut(&mut self) -> &mut ExternalProps;

    /// Sets an arbitrary attribute on the root element.
    fn attr(mut self, name: impl Into<SharedString>, value: impl Into<SharedString>) -> Self {
        self.external_props_mut()
            .attributes
            .insert(name.into(), value.into());
        self
    }

    /// Sets an `aria-{name}` attribute.
    fn aria(self, name: &str, value: impl Into<SharedString>) -> Self {
        self.attr(format!("aria-{name}"), value)
    }

    /// Sets a `data-{name}` attribute.
    fn data(self, name: &str, value: impl Into<SharedString>) -> Self {
        self.attr(format!("data-{name}"), value)
    }
}

struct AttributeEntry {
    attributes: Attributes,
    owner: WeakEntity<()>,
}

/// Attributes recorded for rendered elements, keyed by element id.
///
/// GPUI has no DOM, so this registry is where forwarded and accessibility
/// attributes live. Entries disappear once their element stops rendering.
#[derive(Default)]
pub struct ElementAttributes {
    entries: HashMap<ElementId, AttributeEntry>,
}

impl Global for ElementAttributes {}

impl ElementAttributes {
    /// Records the attributes of `id` for the current frame.
    pub fn record(id: &ElementId, attributes: Attributes, window: &mut Window, cx: &mut App) {
        let owner = window
            .use_keyed_state(id.with_suffix("state:attributes"), cx, |_window, _cx| ())
            .downgrade();

        let registry = cx.default_global::<ElementAttributes>();
        registry
            .entries
            .retain(|_, entry| entry.owner.upgrade().is_some());
        registry
            .entries
            .insert(id.clone(), AttributeEntry { attributes, owner });
    }

    /// Returns the attributes last recorded for `id`.
    pub fn get<'a>(id: &ElementId, cx: &'a App) -> Option<&'a Attributes> {
        cx.try_global::<ElementAttributes>()?
            .entries
            .get(id)
            .map(|entry| &entry.attributes)
    }

    /// Returns a single attribute last recorded for `id`.
    pub fn get_attribute<'a>(id: &ElementId, name: &str, cx: &'a App) -> Option<&'a SharedString> {
        Self::get(id, cx)?.get(name)
    }
}

/// Creates the root element of a component: an identified div carrying the
/// forwarded style, with `extra` attributes merged over the forwardable
/// external ones.
pub fn external_root(
    id: &ElementId,
    props: &ExternalProps,
    extra: impl IntoIterator<Item = (SharedString, SharedString)>,
    window: &mut Window,
    cx: &mut App,
) -> Stateful<Div> {
    let mut attributes = props.forwardable();
    attributes.extend(extra);
    ElementAttributes::record(id, attributes, window, cx);

    let mut root = div().id(id.clone());
    root.style().refine(&props.style);
    root
}
