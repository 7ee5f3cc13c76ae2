pub mod primitives;

pub mod extensions;

pub mod instrumentation;

pub mod components;

pub mod theme;

mod utils;
pub use utils::ElementIdExt;

mod assets;
pub use assets::*;

mod init;
pub use init::*;

#[cfg(all(test, feature = "test-support"))]
mod test_support;
