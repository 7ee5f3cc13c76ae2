//! Instrumentation attached to every top-level component: a stable instance
//! identity reported once per mount, and the analytics funnel boundaries.

mod analytics;
pub use analytics::*;

mod base_component;
pub use base_component::*;
