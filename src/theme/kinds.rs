#![allow(missing_docs)] // Derive macros generate undocumented methods.

use enum_assoc::Assoc;
use gpui::{AbsoluteLength, App, Pixels, Rgba};

use crate::theme::ThemeExt;

/// Text sizes defined by the theme's default font.
#[derive(Assoc, Clone, Copy, Debug, Default, PartialEq, Eq)]
#[func(pub fn resolve(&self, cx: &App) -> AbsoluteLength)]
#[func(pub fn weight(&self, cx: &App) -> f32)]
pub enum ThemeTextSizeKind {
    #[assoc(resolve = cx.get_theme().layout.text.default_font.sizes.heading_md)]
    #[assoc(weight = cx.get_theme().layout.text.default_font.weights.heading_md)]
    Heading,
    #[assoc(resolve = cx.get_theme().layout.text.default_font.sizes.heading_sm)]
    #[assoc(weight = cx.get_theme().layout.text.default_font.weights.heading_sm)]
    Subheading,
    #[default]
    #[assoc(resolve = cx.get_theme().layout.text.default_font.sizes.body)]
    #[assoc(weight = cx.get_theme().layout.text.default_font.weights.body)]
    Body,
    #[assoc(resolve = cx.get_theme().layout.text.default_font.sizes.caption)]
    #[assoc(weight = cx.get_theme().layout.text.default_font.weights.caption)]
    Caption,
}

/// Spacing steps.
#[derive(Assoc, Clone, Copy, Debug, PartialEq, Eq)]
#[func(pub fn resolve(&self, cx: &App) -> Pixels)]
pub enum ThemeLayoutPaddingKind {
    #[assoc(resolve = cx.get_theme().layout.padding.xl)]
    Xl,
    #[assoc(resolve = cx.get_theme().layout.padding.lg)]
    Lg,
    #[assoc(resolve = cx.get_theme().layout.padding.md)]
    Md,
    #[assoc(resolve = cx.get_theme().layout.padding.sm)]
    Sm,
}

/// Background colors of the active theme variant.
#[derive(Assoc, Clone, Copy, Debug, PartialEq, Eq)]
#[func(pub fn resolve(&self, cx: &App) -> Rgba)]
pub enum ThemeBackgroundKind {
    #[assoc(resolve = cx.get_theme().variants.active(cx).colors.background.primary)]
    Primary,
    #[assoc(resolve = cx.get_theme().variants.active(cx).colors.background.secondary)]
    Secondary,
    #[assoc(resolve = cx.get_theme().variants.active(cx).colors.background.tertiary)]
    Tertiary,
    #[assoc(resolve = cx.get_theme().variants.active(cx).colors.background.quaternary)]
    Quaternary,
    #[assoc(resolve = cx.get_theme().variants.active(cx).colors.background.quinary)]
    Quinary,
}

/// A surface in the stacking order.
///
/// `next()` is the background one step above, used for borders and for
/// surfaces nested inside this one.
#[derive(Assoc, Clone, Copy, Debug, PartialEq, Eq)]
#[func(pub fn background(&self) -> ThemeBackgroundKind)]
#[func(pub fn next(&self) -> ThemeBackgroundKind)]
pub enum ThemeLayerKind {
    #[assoc(background = ThemeBackgroundKind::Primary)]
    #[assoc(next = ThemeBackgroundKind::Secondary)]
    Primary,
    #[assoc(background = ThemeBackgroundKind::Secondary)]
    #[assoc(next = ThemeBackgroundKind::Tertiary)]
    Secondary,
    #[assoc(background = ThemeBackgroundKind::Tertiary)]
    #[assoc(next = ThemeBackgroundKind::Quaternary)]
    Tertiary,
    #[assoc(background = ThemeBackgroundKind::Quaternary)]
    #[assoc(next = ThemeBackgroundKind::Quinary)]
    Quaternary,
}

impl ThemeLayerKind {
    pub fn resolve(&self, cx: &App) -> Rgba {
        self.background().resolve(cx)
    }

    /// The layer for a surface stacked on top of this one. Saturates at the
    /// topmost layer.
    pub fn raised(&self) -> ThemeLayerKind {
        match self {
            Self::Primary => Self::Secondary,
            Self::Secondary => Self::Tertiary,
            Self::Tertiary | Self::Quaternary => Self::Quaternary,
        }
    }
}

impl From<ThemeLayerKind> for ThemeBackgroundKind {
    fn from(layer: ThemeLayerKind) -> Self {
        layer.background()
    }
}
