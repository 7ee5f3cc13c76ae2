use gpui::{ElementId, InteractiveElement, SharedString};

pub trait ElementIdExt {
    /// Derives a child id scoped to this one.
    fn with_suffix(&self, suffix: impl Into<SharedString>) -> ElementId;

    /// Derives a child id for one item of a keyed collection, e.g. one tab of a tab list.
    fn with_item(&self, collection: &'static str, key: impl Into<SharedString>) -> ElementId {
        self.with_suffix(collection).with_suffix(key)
    }
}

impl ElementIdExt for ElementId {
    fn with_suffix(&self, suffix: impl Into<SharedString>) -> ElementId {
        ElementId::NamedChild(Box::new(self.clone()), suffix.into())
    }
}

/// The debug selector under which [`DebugIdExt::debug_id`] registers `id`.
pub fn debug_selector(id: &ElementId) -> String {
    format!("{id:?}")
}

/// Lets tests find an element by its id.
pub trait DebugIdExt: InteractiveElement + Sized {
    #[cfg(feature = "test-support")]
    fn debug_id(self, id: &ElementId) -> Self {
        self.debug_selector(|| debug_selector(id))
    }

    #[cfg(not(feature = "test-support"))]
    fn debug_id(self, _id: &ElementId) -> Self {
        self
    }
}

impl<E: InteractiveElement> DebugIdExt for E {}
