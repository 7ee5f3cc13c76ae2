use gpui::App;

use crate::{ActiveVariantId, Theme, ThemeError, ThemeVariantKind};

/// Extension trait for accessing and modifying the global theme.
pub trait ThemeExt {
    /// Changes the theme.
    ///
    /// The active variant is left untouched, or set to the first variant if
    /// none was chosen yet.
    fn set_theme<T: AsRef<Theme>>(&mut self, theme: T);

    /// Gets an immutable reference to the theme.
    fn get_theme(&self) -> &Theme;

    /// Switches to the first variant of the given kind.
    fn set_theme_variant(&mut self, kind: ThemeVariantKind) -> Result<(), ThemeError>;
}

impl ThemeExt for App {
    fn set_theme<T: AsRef<Theme>>(&mut self, theme: T) {
        let theme = theme.as_ref().clone();
        log::debug!("installing theme \"{}\"", theme.name);

        self.set_global::<Theme>(theme);

        if !self.has_global::<ActiveVariantId>() {
            self.set_global(ActiveVariantId::default());
        }
    }

    fn get_theme(&self) -> &Theme {
        self.global()
    }

    fn set_theme_variant(&mut self, kind: ThemeVariantKind) -> Result<(), ThemeError> {
        let index = self
            .get_theme()
            .variants
            .position_of(kind)
            .ok_or(ThemeError::MissingVariant(kind))?;

        self.set_global(ActiveVariantId(index));
        Ok(())
    }
}

#[cfg(all(test, feature = "test-support"))]
mod tests {
    use super::*;
    use gpui::TestAppContext;

    #[gpui::test]
    fn test_set_and_get_theme(cx: &mut TestAppContext) {
        cx.update(|cx| {
            cx.set_theme(Theme::default_theme());
            let theme = cx.get_theme();
            assert!(!theme.name.is_empty(), "Theme should have a name");
        });
    }

    #[gpui::test]
    fn test_set_theme_installs_active_variant(cx: &mut TestAppContext) {
        cx.update(|cx| {
            cx.set_theme(Theme::default_theme());
            assert_eq!(*cx.global::<ActiveVariantId>(), ActiveVariantId(0));

            let active = cx.get_theme().variants.active(cx);
            assert_eq!(active.kind, ThemeVariantKind::Dark);
        });
    }

    #[gpui::test]
    fn test_switch_variant(cx: &mut TestAppContext) {
        cx.update(|cx| {
            cx.set_theme(Theme::default_theme());
            cx.set_theme_variant(ThemeVariantKind::Light).unwrap();

            let active = cx.get_theme().variants.active(cx);
            assert_eq!(active.kind, ThemeVariantKind::Light);

            // Re-installing the theme keeps the chosen variant.
            cx.set_theme(Theme::default_theme());
            let active = cx.get_theme().variants.active(cx);
            assert_eq!(active.kind, ThemeVariantKind::Light);
        });
    }

    #[gpui::test]
    fn test_out_of_range_variant_falls_back_to_first(cx: &mut TestAppContext) {
        cx.update(|cx| {
            cx.set_theme(Theme::default_theme());
            cx.set_global(ActiveVariantId(42));

            let active = cx.get_theme().variants.active(cx);
            assert_eq!(active.kind, ThemeVariantKind::Dark);
        });
    }

    #[gpui::test]
    fn test_theme_has_layout(cx: &mut TestAppContext) {
        cx.update(|cx| {
            cx.set_theme(Theme::default_theme());
            let theme = cx.get_theme();

            assert!(theme.layout.size.sm > gpui::px(0.), "Size sm should be positive");
            assert!(theme.layout.size.lg > gpui::px(0.), "Size lg should be positive");
            assert!(
                theme.layout.padding.sm >= gpui::px(0.),
                "Padding sm should be non-negative"
            );
            assert!(
                theme.layout.tab_indicator_height > gpui::px(0.),
                "Tab indicator should be visible"
            );
        });
    }
}
