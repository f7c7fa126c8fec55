//! Menu fetching from the public recipe API.
//!
//! One GET per cache miss, a synthetic `price` on every meal, and an optional
//! never-expiring cache entry in a [`KeyValueStore`].

/// Errors
mod error;
/// Fetch algorithm
mod fetcher;
/// Menu item record
mod item;
/// Synthetic pricing
mod price;
/// Key-value stores
mod store;
/// HTTP transport
mod transport;

pub use error::{
    FetchError,
    StoreError,
};
pub use fetcher::{
    MenuFetcher,
    fetch_menu_items,
    try_fetch_menu_items,
};
pub use item::{
    MenuItem,
    PRICE_FIELD,
    extract_meals,
};
pub use price::{
    decorate,
    random_price,
};
pub use store::{
    FileStore,
    KeyValueStore,
    MemoryStore,
};
pub use transport::{
    HttpResponse,
    HttpTransport,
    ReqwestTransport,
};
