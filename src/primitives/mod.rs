mod focus_ring;
pub use focus_ring::*;

mod tooltip;
pub use tooltip::*;
