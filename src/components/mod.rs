mod button;
pub use button::*;

mod container;
pub use container::*;

mod icon;
pub use icon::*;

mod token_list;
pub use token_list::*;

pub mod tabs;
pub use tabs::{
    ContentRenderStrategy, KeyboardActivationMode, Tab, TabSelectError, Tabs, TabsChangeDetail,
    TabsI18nStrings, TabsVariant,
};

pub mod top_navigation;
pub use top_navigation::{
    MenuDropdown, MenuDropdownItem, TopNavigation, TopNavigationIdentity, TopNavigationUtility,
    UtilityButton,
};
