//! Theme schema for the facets component library.
//!
//! A theme is a JSON document with a shared layout section and one or more
//! colour variants (dark, light). It is installed as a gpui global through
//! [`ThemeExt::set_theme`].

mod deserializers;

mod schema;
pub use schema::*;

mod ext;
pub use ext::*;
