//! Menu item records.

use serde::{
    Deserialize,
    Serialize,
};
use serde_json::{
    Map,
    Value,
};

use super::FetchError;

/// Name of the synthetic field added to every item.
pub const PRICE_FIELD: &str = "price";

/// One meal as returned by the recipe API, plus a `price`.
///
/// The shape is owned by the API (`idMeal`, `strMeal`, `strCategory`, ...), so
/// fields are kept as an ordered JSON object and passed through untouched.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct MenuItem(Map<String, Value>);

impl MenuItem {
    /// Raw value of `field`.
    #[must_use]
    pub fn get(&self, field: &str) -> Option<&Value> {
        self.0.get(field)
    }

    /// The synthetic price, once decorated.
    #[must_use]
    pub fn price(&self) -> Option<&str> {
        self.0.get(PRICE_FIELD).and_then(Value::as_str)
    }

    /// Set `price`. An existing `price` field is overwritten in place.
    pub fn set_price(&mut self, price: String) {
        self.0.insert(PRICE_FIELD.to_string(), Value::String(price));
    }

    /// All fields in API order, `price` last.
    #[must_use]
    pub const fn fields(&self) -> &Map<String, Value> {
        &self.0
    }
}

impl From<Map<String, Value>> for MenuItem {
    fn from(fields: Map<String, Value>) -> Self {
        Self(fields)
    }
}

/// Pull the `meals` array out of an API response body.
///
/// A missing or `null` `meals` field (the API's answer for "no results") is an
/// empty list. Elements that are not objects are dropped.
pub fn extract_meals(body: &str) -> Result<Vec<MenuItem>, FetchError> {
    let mut data: Value = serde_json::from_str(body).map_err(FetchError::Parse)?;

    let meals = match data.get_mut("meals").map(Value::take) {
        Some(Value::Array(meals)) => meals,
        Some(Value::Null) | None => Vec::new(),
        Some(other) => {
            tracing::warn!("Ignoring non-array `meals` field: {other}");
            Vec::new()
        }
    };

    Ok(meals
        .into_iter()
        .filter_map(|meal| match meal {
            Value::Object(fields) => Some(MenuItem::from(fields)),
            other => {
                tracing::warn!("Skipping non-object meal: {other}");
                None
            }
        })
        .collect())
}
