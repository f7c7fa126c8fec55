//! Synthetic prices.
//!
//! Prices are placeholder noise, not business data: uniform in
//! [50000.00, 100000.00) with two decimals.

use rand::Rng;

use super::MenuItem;

/// Lowest price, in cents (inclusive).
const MIN_PRICE_CENTS: u64 = 5_000_000;
/// Highest price, in cents (exclusive).
const MAX_PRICE_CENTS: u64 = 10_000_000;

/// Draw a price and format it as `"<units>.<cents>"`.
///
/// Drawing whole cents keeps the upper bound exclusive after formatting.
pub fn random_price<R: Rng + ?Sized>(rng: &mut R) -> String {
    let cents = rng.gen_range(MIN_PRICE_CENTS..MAX_PRICE_CENTS);
    format!("{}.{:02}", cents / 100, cents % 100)
}

/// Give every item its own independent price.
pub fn decorate<R: Rng + ?Sized>(items: Vec<MenuItem>, rng: &mut R) -> Vec<MenuItem> {
    items
        .into_iter()
        .map(|mut item| {
            item.set_price(random_price(rng));
            item
        })
        .collect()
}
