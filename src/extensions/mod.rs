/// Controls how click events propagate and how link clicks are classified.
pub mod click_behavior;

/// Forwarding of attributes and styles a component does not model itself.
pub mod external_props;
