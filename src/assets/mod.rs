mod assets;
pub use assets::*;
use cfg_if::cfg_if;

mod icons;
pub use icons::*;

cfg_if!(
    if #[cfg(feature = "assets")] {
        mod facets_assets;
        pub use facets_assets::*;
    }
);
