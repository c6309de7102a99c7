//! Point-of-interest lookup backed by the Foursquare Places API

use std::sync::LazyLock;

use async_trait::async_trait;
use regex::Regex;
use reqwest_middleware::ClientWithMiddleware;
use serde::Deserialize;
use tracing::{debug, info, instrument};

use super::http::{fetch_json, require_key};
use super::{PlaceLookup, PlaceQuery, ProviderResult};
use crate::config::PlacesProviderConfig;
use crate::error::ProviderError;
use crate::models::PlaceResult;

/// Foursquare place search client
pub struct FoursquarePlaceClient {
    client: ClientWithMiddleware,
    config: PlacesProviderConfig,
}

/// Foursquare search response
#[derive(Debug, Deserialize)]
pub struct SearchResponse {
    #[serde(default)]
    pub results: Vec<FoursquarePlace>,
}

#[derive(Debug, Deserialize)]
pub struct FoursquarePlace {
    pub name: String,
    pub location: Option<FoursquareLocation>,
    pub email: Option<String>,
    pub tel: Option<String>,
    pub website: Option<String>,
    /// Distance from the search anchor in meters
    pub distance: Option<f64>,
}

#[derive(Debug, Deserialize)]
pub struct FoursquareLocation {
    pub formatted_address: Option<String>,
    pub address: Option<String>,
    pub locality: Option<String>,
    pub postcode: Option<String>,
}

static EMAIL: LazyLock<Option<Regex>> =
    LazyLock::new(|| Regex::new(r"^[^@\s]+@[^@\s]+\.[^@\s]+$").ok());

fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.is_empty())
}

/// Keep only addresses shaped like `local@domain.tld`
fn valid_email(value: Option<String>) -> Option<String> {
    let pattern = EMAIL.as_ref()?;
    non_empty(value).filter(|email| pattern.is_match(email))
}

impl From<FoursquarePlace> for PlaceResult {
    fn from(place: FoursquarePlace) -> Self {
        let location = place.location;
        let address = location
            .as_ref()
            .and_then(|loc| non_empty(loc.formatted_address.clone()))
            .unwrap_or_else(|| {
                let street = location.as_ref().and_then(|loc| loc.address.clone());
                let locality = location.as_ref().and_then(|loc| loc.locality.clone());
                format!(
                    "{}, {}",
                    street.unwrap_or_default(),
                    locality.unwrap_or_default()
                )
            });
        let postcode = location
            .and_then(|loc| loc.postcode)
            .unwrap_or_default();

        Self {
            name: place.name,
            address,
            postcode,
            email: valid_email(place.email),
            tel: non_empty(place.tel),
            website: non_empty(place.website),
            distance: place.distance.unwrap_or(0.0),
        }
    }
}

impl SearchResponse {
    /// First result as a place, or `NoResults`
    pub fn into_first_place(self, query: &PlaceQuery) -> ProviderResult<PlaceResult> {
        self.results
            .into_iter()
            .next()
            .map(PlaceResult::from)
            .ok_or_else(|| {
                ProviderError::NoResults(match &query.category {
                    Some(category) => format!("No {category} places found in {}", query.location),
                    None => format!("No places found in {}", query.location),
                })
            })
    }
}

impl FoursquarePlaceClient {
    /// Create a new client
    #[must_use]
    pub fn new(client: ClientWithMiddleware, config: PlacesProviderConfig) -> Self {
        Self { client, config }
    }
}

#[async_trait]
impl PlaceLookup for FoursquarePlaceClient {
    #[instrument(name = "place_lookup", skip(self), fields(location = %query.location))]
    async fn find_place(&self, query: &PlaceQuery) -> ProviderResult<PlaceResult> {
        let api_key = require_key(self.config.api_key.as_deref(), "place lookup")?;

        let mut url = format!(
            "{}/places/search?near={}&limit=1",
            self.config.base_url,
            urlencoding::encode(&query.location)
        );
        if let Some(category) = query.category.as_deref().filter(|c| !c.is_empty()) {
            url.push_str("&query=");
            url.push_str(&urlencoding::encode(category));
        }
        debug!("Place search request URL: {}", url);

        let response: SearchResponse = fetch_json(
            self.client
                .get(url)
                .header("Accept", "application/json")
                .header("Authorization", format!("Bearer {api_key}"))
                .header("X-Places-Api-Version", &self.config.api_version),
        )
        .await?;

        let place = response.into_first_place(query)?;
        info!("Found place {} ({}m away)", place.name, place.distance);
        Ok(place)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn query(category: Option<&str>) -> PlaceQuery {
        PlaceQuery {
            location: "Manhattan".to_string(),
            category: category.map(str::to_string),
        }
    }

    #[test]
    fn test_first_result_is_mapped() {
        let json = r#"{
            "results": [
                {
                    "name": "Radina's Coffeehouse",
                    "location": {
                        "formatted_address": "1200 Moro St, Manhattan, KS 66502",
                        "postcode": "66502"
                    },
                    "tel": "(785) 555-0100",
                    "email": "",
                    "distance": 812
                },
                {"name": "Second"}
            ]
        }"#;
        let response: SearchResponse = serde_json::from_str(json).unwrap();
        let place = response.into_first_place(&query(Some("coffee"))).unwrap();

        assert_eq!(place.name, "Radina's Coffeehouse");
        assert_eq!(place.address, "1200 Moro St, Manhattan, KS 66502");
        assert_eq!(place.postcode, "66502");
        assert_eq!(place.tel.as_deref(), Some("(785) 555-0100"));
        assert!(place.email.is_none());
        assert_eq!(place.distance, 812.0);
    }

    #[test]
    fn test_malformed_email_is_dropped() {
        assert_eq!(
            valid_email(Some("hello@radinas.example".to_string())).as_deref(),
            Some("hello@radinas.example")
        );
        assert_eq!(valid_email(Some("not an email".to_string())), None);
        assert_eq!(valid_email(Some("missing@tld".to_string())), None);
        assert_eq!(valid_email(Some("two@@at.example".to_string())), None);
        assert_eq!(valid_email(None), None);
    }

    #[test]
    fn test_address_falls_back_to_street_and_locality() {
        let json = r#"{
            "results": [
                {"name": "Museum", "location": {"address": "1 Main St", "locality": "Manhattan"}}
            ]
        }"#;
        let response: SearchResponse = serde_json::from_str(json).unwrap();
        let place = response.into_first_place(&query(None)).unwrap();

        assert_eq!(place.address, "1 Main St, Manhattan");
        assert_eq!(place.postcode, "");
        assert_eq!(place.distance, 0.0);
    }

    #[test]
    fn test_no_results_names_category() {
        let response: SearchResponse = serde_json::from_str(r#"{"results": []}"#).unwrap();
        match response.into_first_place(&query(Some("museum"))) {
            Err(ProviderError::NoResults(message)) => {
                assert_eq!(message, "No museum places found in Manhattan");
            }
            other => panic!("expected NoResults, got {other:?}"),
        }
    }
}
