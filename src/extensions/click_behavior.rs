use gpui::{App, Modifiers, MouseButton, Window};

/// Settings that control click event behavior.
///
/// By default, click handlers call `cx.stop_propagation()` and `window.prevent_default()`.
/// This struct allows components to opt out of this behavior.
#[derive(Clone, Copy, Default)]
pub struct ClickBehavior {
    /// If true, `cx.stop_propagation()` will NOT be called.
    pub allow_propagation: bool,
    /// If true, `window.prevent_default()` will NOT be called.
    pub allow_default: bool,
}

impl ClickBehavior {
    /// Applies the click behavior settings to the given window and app context.
    pub fn apply(&self, window: &mut Window, cx: &mut App) {
        if !self.allow_default {
            window.prevent_default();
        }
        if !self.allow_propagation {
            cx.stop_propagation();
        }
    }
}

/// A trait for components that support controlling click event behavior.
pub trait ClickBehaviorExt: Sized {
    /// Returns a mutable reference to the click behavior settings.
    fn click_behavior_mut(&mut self) -> &mut ClickBehavior;

    /// Allows the click event to propagate to parent elements.
    fn allow_click_propagation(mut self) -> Self {
        self.click_behavior_mut().allow_propagation = true;
        self
    }

    /// Allows the system default behavior for the click event.
    fn allow_default_click_behaviour(mut self) -> Self {
        self.click_behavior_mut().allow_default = true;
        self
    }
}

/// How a click on an element carrying an `href` should be handled.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LinkActivation {
    /// A plain primary click: the component handles it and hands the href to
    /// the application's own routing.
    InApp,
    /// The user asked for a new context (modifier key or middle button): the
    /// platform default applies and the href is opened outside the app.
    NewContext,
}

impl LinkActivation {
    pub fn classify(modifiers: &Modifiers, button: MouseButton) -> Self {
        let modified =
            modifiers.control || modifiers.alt || modifiers.shift || modifiers.platform;

        if modified || button == MouseButton::Middle {
            LinkActivation::NewContext
        } else {
            LinkActivation::InApp
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plain_left_click_stays_in_app() {
        assert_eq!(
            LinkActivation::classify(&Modifiers::default(), MouseButton::Left),
            LinkActivation::InApp
        );
    }

    #[test]
    fn test_modifier_keys_open_new_context() {
        let cases = [
            Modifiers {
                control: true,
                ..Default::default()
            },
            Modifiers {
                alt: true,
                ..Default::default()
            },
            Modifiers {
                shift: true,
                ..Default::default()
            },
            Modifiers {
                platform: true,
                ..Default::default()
            },
        ];

        for modifiers in cases {
            assert_eq!(
                LinkActivation::classify(&modifiers, MouseButton::Left),
                LinkActivation::NewContext,
                "{modifiers:?} should keep the default link behavior"
            );
        }
    }

    #[test]
    fn test_function_key_alone_is_not_a_new_context() {
        let modifiers = Modifiers {
            function: true,
            ..Default::default()
        };
        assert_eq!(
            LinkActivation::classify(&modifiers, MouseButton::Left),
            LinkActivation::InApp
        );
    }

    #[test]
    fn test_middle_click_opens_new_context() {
        assert_eq!(
            LinkActivation::classify(&Modifiers::default(), MouseButton::Middle),
            LinkActivation::NewContext
        );
    }
}
