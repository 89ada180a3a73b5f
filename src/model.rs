// Core structs: Flight, FlightSegment, SearchParams
use serde::Deserialize;
use thiserror::Error;

/// One priced itinerary option, normalized from an upstream offer record.
#[derive(Debug, Clone, PartialEq)]
pub struct Flight {
    pub id: String,
    pub price: f64,
    pub currency: String,
    /// Display names, parallel to `airline_codes`.
    pub airlines: Vec<String>,
    /// Distinct carrier codes in first-seen order across segments.
    pub airline_codes: Vec<String>,
    /// Always `segments.len() - 1`.
    pub stops: u32,
    pub duration_minutes: u32,
    pub departure_time: String,
    pub arrival_time: String,
    pub departure_airport: String,
    pub arrival_airport: String,
    /// Date portion of `departure_time`.
    pub departure_date: String,
    pub segments: Vec<FlightSegment>,
}

/// One non-stop leg within an itinerary.
#[derive(Debug, Clone, PartialEq)]
pub struct FlightSegment {
    pub departure: SegmentPoint,
    pub arrival: SegmentPoint,
    pub carrier_code: String,
    pub flight_number: String,
    pub duration: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct SegmentPoint {
    pub iata_code: String,
    pub terminal: Option<String>,
    /// Airport-local ISO-8601 timestamp, no offset.
    pub at: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct SearchParams {
    pub origin: String,
    pub destination: String,
    pub departure_date: String,
    #[serde(default)]
    pub return_date: Option<String>,
    pub adults: u32,
    #[serde(default)]
    pub travel_class: TravelClass,
    #[serde(default)]
    pub non_stop: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Default)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TravelClass {
    #[default]
    Economy,
    PremiumEconomy,
    Business,
    First,
}

impl TravelClass {
    pub fn as_str(&self) -> &'static str {
        match self {
            TravelClass::Economy => "ECONOMY",
            TravelClass::PremiumEconomy => "PREMIUM_ECONOMY",
            TravelClass::Business => "BUSINESS",
            TravelClass::First => "FIRST",
        }
    }
}

#[derive(Debug, Error)]
pub enum ApiError {
    #[error("http error: {0}")]
    Http(String),
    #[error("upstream responded with status {0}")]
    InvalidResponse(u16),
    #[error("API credentials not configured")]
    MissingCredentials,
}

impl From<reqwest::Error> for ApiError {
    fn from(e: reqwest::Error) -> Self {
        ApiError::Http(e.to_string())
    }
}

/// A malformed upstream offer record. Offers are expected to arrive with at
/// least one itinerary holding at least one segment and a numeric total price.
#[derive(Debug, Error)]
pub enum ValidationError {
    #[error("offer {0}: no itineraries")]
    MissingItineraries(String),
    #[error("offer {0}: itinerary has no segments")]
    MissingSegments(String),
    #[error("offer {0}: unparseable total price '{1}'")]
    InvalidPrice(String, String),
}
