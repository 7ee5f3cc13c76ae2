#![allow(missing_docs)] // Derive macros generate undocumented methods.

use std::borrow::Cow;

use gpui::{Result, SharedString};
use rust_embed::RustEmbed;

use crate::assets::AssetProvider;

/// Embedded assets bundled with the facets crate.
#[derive(RustEmbed)]
#[folder = "assets/"]
#[include = "icons/**/*.svg"]
#[exclude = "*.DS_Store"]
pub struct FacetsAssets;

impl AssetProvider for FacetsAssets {
    fn get(&self, path: &str) -> Option<Cow<'static, [u8]>> {
        <Self as RustEmbed>::get(path).map(|f| f.data)
    }

    fn list(&self, path: &str) -> Result<Vec<SharedString>> {
        Ok(FacetsAssets::iter()
            .filter(|p| p.starts_with(path))
            .map(|p| SharedString::from(p.to_string()))
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::assets::FacetsIconKind;

    #[test]
    fn test_every_icon_kind_is_bundled() {
        for kind in [
            FacetsIconKind::AngleLeft,
            FacetsIconKind::AngleRight,
            FacetsIconKind::Close,
            FacetsIconKind::CaretDown,
            FacetsIconKind::External,
        ] {
            assert!(
                AssetProvider::get(&FacetsAssets, &kind.path()).is_some(),
                "{kind:?} has no bundled svg"
            );
        }
    }

    #[test]
    fn test_list_filters_by_prefix() {
        let icons = AssetProvider::list(&FacetsAssets, "icons/").unwrap();
        assert_eq!(icons.len(), 5);
        assert!(AssetProvider::list(&FacetsAssets, "fonts/").unwrap().is_empty());
    }
}
