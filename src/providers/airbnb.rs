//! Lodging search backed by the Airbnb RapidAPI endpoint

use async_trait::async_trait;
use reqwest_middleware::ClientWithMiddleware;
use serde::Deserialize;
use serde_json::Value;
use tracing::{debug, info, instrument};

use super::http::{fetch_json, require_key};
use super::{LodgingQuery, LodgingSearch, ProviderResult, select_best_lodging};
use crate::config::LodgingProviderConfig;
use crate::error::ProviderError;
use crate::models::LodgingOption;

/// Highest listing rating Airbnb reports
const MAX_RATING: f32 = 5.0;

/// Airbnb location search client
pub struct AirbnbLodgingClient {
    client: ClientWithMiddleware,
    config: LodgingProviderConfig,
}

/// Airbnb search response
#[derive(Debug, Deserialize)]
pub struct SearchResponse {
    #[serde(default)]
    pub error: Option<Value>,
    pub results: Option<Vec<Listing>>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Listing {
    #[serde(default)]
    pub id: Value,
    pub name: Option<String>,
    pub price: Option<ListingPrice>,
    pub address: Option<String>,
    pub rating: Option<f32>,
    pub bedrooms: Option<u32>,
    pub bathrooms: Option<f32>,
    pub beds: Option<u32>,
    #[serde(rename = "type")]
    pub property_type: Option<String>,
    pub is_superhost: Option<bool>,
    pub images: Option<Vec<String>>,
    pub url: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ListingPrice {
    pub rate: Option<f64>,
    pub price_items: Option<Vec<PriceItem>>,
}

#[derive(Debug, Deserialize)]
pub struct PriceItem {
    pub amount: Option<f64>,
}

impl SearchResponse {
    fn has_error(&self) -> bool {
        match &self.error {
            None | Some(Value::Null) | Some(Value::Bool(false)) => false,
            Some(Value::String(message)) => !message.is_empty(),
            Some(Value::Number(code)) => code.as_f64().is_some_and(|code| code != 0.0),
            Some(_) => true,
        }
    }

    /// Listings mapped to lodging options, or `NotFound` when the search came back empty
    pub fn into_candidates(self, location: &str) -> ProviderResult<Vec<LodgingOption>> {
        if self.has_error() {
            return Err(ProviderError::NotFound(format!(
                "No lodging found for \"{location}\""
            )));
        }
        match self.results {
            Some(results) if !results.is_empty() => {
                Ok(results.into_iter().map(Listing::into_lodging_option).collect())
            }
            _ => Err(ProviderError::NotFound(format!(
                "No lodging found for \"{location}\""
            ))),
        }
    }
}

impl Listing {
    /// Convert a listing into the shared lodging record
    #[must_use]
    pub fn into_lodging_option(self) -> LodgingOption {
        let id = match self.id {
            Value::String(id) => id,
            Value::Null => String::new(),
            other => other.to_string(),
        };

        let (price, total_price) = match self.price {
            Some(price) => (
                price.rate.unwrap_or(0.0),
                price
                    .price_items
                    .map(|items| items.iter().filter_map(|item| item.amount).sum::<f64>())
                    .filter(|total| *total > 0.0),
            ),
            None => (0.0, None),
        };

        LodgingOption {
            id,
            name: self.name.unwrap_or_default(),
            price,
            total_price,
            address: self
                .address
                .unwrap_or_else(|| "Address not available".to_string()),
            rating: self.rating.filter(|rating| (0.0..=MAX_RATING).contains(rating)),
            bedrooms: self.bedrooms,
            bathrooms: self.bathrooms,
            beds: self.beds,
            property_type: self.property_type,
            is_superhost: self.is_superhost,
            images: self.images.unwrap_or_default(),
            url: self.url,
        }
    }
}

impl AirbnbLodgingClient {
    /// Create a new client
    #[must_use]
    pub fn new(client: ClientWithMiddleware, config: LodgingProviderConfig) -> Self {
        Self { client, config }
    }
}

#[async_trait]
impl LodgingSearch for AirbnbLodgingClient {
    #[instrument(name = "lodging_search", skip(self), fields(location = %query.location))]
    async fn find_lodging(&self, query: &LodgingQuery) -> ProviderResult<LodgingOption> {
        let api_key = require_key(self.config.api_key.as_deref(), "lodging search")?;

        let url = format!(
            "{}/search-location?location={}&checkin={}&checkout={}&adults={}&currency=USD",
            self.config.base_url,
            urlencoding::encode(&query.location),
            query.check_in.format("%Y-%m-%d"),
            query.check_out.format("%Y-%m-%d"),
            query.adults,
        );
        debug!("Lodging search request URL: {}", url);

        let response: SearchResponse = fetch_json(
            self.client
                .get(url)
                .header("X-RapidAPI-Key", api_key)
                .header("X-RapidAPI-Host", &self.config.host),
        )
        .await?;

        let candidates = response.into_candidates(&query.location)?;
        debug!("Received {} lodging candidates", candidates.len());

        let lodging = select_best_lodging(candidates, query.max_price_per_night)?;
        info!("Selected lodging {} at ${:.2} per night", lodging.name, lodging.price);
        Ok(lodging)
    }
}
