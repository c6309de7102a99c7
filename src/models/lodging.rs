//! Lodging option model

use serde::{Deserialize, Serialize};

/// The lodging candidate chosen for the stay
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LodgingOption {
    pub id: String,
    pub name: String,
    /// Nightly price in USD
    pub price: f64,
    /// Price for the whole stay, when the provider itemizes it
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub total_price: Option<f64>,
    pub address: String,
    /// Rating out of 5
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rating: Option<f32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bedrooms: Option<u32>,
    /// Bathroom count, may be fractional (e.g. 1.5)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bathrooms: Option<f32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub beds: Option<u32>,
    #[serde(default, rename = "type", skip_serializing_if = "Option::is_none")]
    pub property_type: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub is_superhost: Option<bool>,
    #[serde(default)]
    pub images: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
}

impl LodgingOption {
    /// Whether the listing is run by a highly rated host
    #[must_use]
    pub fn superhost(&self) -> bool {
        self.is_superhost.unwrap_or(false)
    }

    /// Cost of the stay: the itemized total if positive, otherwise nightly price times nights
    #[must_use]
    pub fn stay_cost(&self, nights: u32) -> f64 {
        self.total_price
            .filter(|total| *total > 0.0)
            .unwrap_or_else(|| self.price * f64::from(nights))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn lodging(total_price: Option<f64>) -> LodgingOption {
        LodgingOption {
            id: "1".to_string(),
            name: "Loft".to_string(),
            price: 120.0,
            total_price,
            address: "Main St".to_string(),
            rating: Some(4.5),
            bedrooms: None,
            bathrooms: None,
            beds: None,
            property_type: None,
            is_superhost: None,
            images: Vec::new(),
            url: None,
        }
    }

    #[test]
    fn test_stay_cost_prefers_total_price() {
        assert_eq!(lodging(Some(500.0)).stay_cost(3), 500.0);
    }

    #[test]
    fn test_stay_cost_falls_back_to_nightly_price() {
        assert_eq!(lodging(None).stay_cost(3), 360.0);
        assert_eq!(lodging(None).stay_cost(0), 0.0);
    }

    #[test]
    fn test_stay_cost_ignores_zero_total() {
        assert_eq!(lodging(Some(0.0)).stay_cost(2), 240.0);
        assert_eq!(lodging(Some(-0.0)).stay_cost(2), 240.0);
    }

    #[test]
    fn test_superhost_defaults_to_false() {
        assert!(!lodging(None).superhost());
    }
}
