//! Theme access for components.
//!
//! The schema and the JSON loader live in `gpui_facets_theme`; this module
//! re-exports them and adds the enum "kinds" components use to pick a theme
//! value by name.

pub use gpui_facets_theme::*;

mod kinds;
pub use kinds::*;
