//! menu-kit
//!
//! Two independent utilities: a translation file aggregator ([`locale`]) and a
//! cached, priced menu fetcher for a public recipe API ([`menu`]).

pub mod config;
pub mod locale;
pub mod menu;

mod test_utils;

pub use locale::{
    Messages,
    available_locales,
    messages,
};
pub use menu::{
    MenuFetcher,
    MenuItem,
    fetch_menu_items,
};
