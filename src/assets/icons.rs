#![allow(missing_docs)] // Derive macros generate undocumented methods.

use enum_assoc::Assoc;
use gpui::SharedString;

/// Built-in icon identifiers that map to bundled SVG assets.
#[derive(Assoc, Clone, Copy, Debug, PartialEq, Eq)]
#[func(pub fn path(&self) -> SharedString)]
pub enum FacetsIconKind {
    /// Scrolls a tab strip towards its start.
    #[assoc(path = "icons/angle_left.svg".into())]
    AngleLeft,

    /// Scrolls a tab strip towards its end.
    #[assoc(path = "icons/angle_right.svg".into())]
    AngleRight,

    /// Dismisses a tab.
    #[assoc(path = "icons/close.svg".into())]
    Close,

    /// Opens a menu dropdown.
    #[assoc(path = "icons/caret_down.svg".into())]
    CaretDown,

    /// Marks links that leave the application.
    #[assoc(path = "icons/external.svg".into())]
    External,
}

impl From<FacetsIconKind> for SharedString {
    fn from(kind: FacetsIconKind) -> Self {
        kind.path()
    }
}
