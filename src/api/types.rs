// Wire types for the upstream flight-offers API.
use serde::Deserialize;

/// Response envelope of the offer search endpoint.
#[derive(Debug, Clone, Deserialize)]
pub struct OfferSearchResponse {
    #[serde(default)]
    pub data: Vec<RawOffer>,
}

/// One offer record as delivered upstream, before normalization.
#[derive(Debug, Clone, Deserialize)]
pub struct RawOffer {
    pub id: String,
    pub price: RawPrice,
    #[serde(default)]
    pub itineraries: Vec<RawItinerary>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct RawPrice {
    pub total: String,
    pub currency: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct RawItinerary {
    pub duration: String,
    #[serde(default)]
    pub segments: Vec<RawSegment>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawSegment {
    pub departure: RawEndpoint,
    pub arrival: RawEndpoint,
    pub carrier_code: String,
    /// Flight number within the carrier, e.g. "1234".
    pub number: String,
    pub duration: String,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawEndpoint {
    pub iata_code: String,
    #[serde(default)]
    pub terminal: Option<String>,
    pub at: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct TokenResponse {
    pub access_token: String,
    pub expires_in: i64,
}
