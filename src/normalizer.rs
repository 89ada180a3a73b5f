use crate::airlines::airline_name;
use crate::api::types::RawOffer;
use crate::model::{Flight, FlightSegment, SegmentPoint, ValidationError};
use tracing::warn;

/// Normalizes a batch of raw offers, dropping malformed records with a
/// warning so one bad offer cannot take down a whole watch cycle.
pub fn normalize_all(offers: &[RawOffer]) -> Vec<Flight> {
    let mut flights = Vec::with_capacity(offers.len());
    for offer in offers {
        match normalize_offer(offer) {
            Ok(flight) => flights.push(flight),
            Err(e) => warn!("Skipping malformed offer: {}", e),
        }
    }
    flights
}

/// Converts one raw upstream offer into the canonical `Flight`.
///
/// Only the first itinerary is considered. Derived fields (`stops`,
/// departure/arrival endpoints, `departure_date`) all come from `segments`.
pub fn normalize_offer(offer: &RawOffer) -> Result<Flight, ValidationError> {
    let itinerary = offer
        .itineraries
        .first()
        .ok_or_else(|| ValidationError::MissingItineraries(offer.id.clone()))?;

    if itinerary.segments.is_empty() {
        return Err(ValidationError::MissingSegments(offer.id.clone()));
    }

    let price: f64 = offer.price.total.parse().map_err(|_| {
        ValidationError::InvalidPrice(offer.id.clone(), offer.price.total.clone())
    })?;

    let segments: Vec<FlightSegment> = itinerary
        .segments
        .iter()
        .map(|seg| FlightSegment {
            departure: SegmentPoint {
                iata_code: seg.departure.iata_code.clone(),
                terminal: seg.departure.terminal.clone(),
                at: seg.departure.at.clone(),
            },
            arrival: SegmentPoint {
                iata_code: seg.arrival.iata_code.clone(),
                terminal: seg.arrival.terminal.clone(),
                at: seg.arrival.at.clone(),
            },
            carrier_code: seg.carrier_code.clone(),
            flight_number: seg.number.clone(),
            duration: seg.duration.clone(),
        })
        .collect();

    let mut airline_codes: Vec<String> = Vec::new();
    for segment in &segments {
        if !airline_codes.contains(&segment.carrier_code) {
            airline_codes.push(segment.carrier_code.clone());
        }
    }
    let airlines: Vec<String> = airline_codes
        .iter()
        .map(|code| airline_name(code).to_string())
        .collect();

    let first = &segments[0];
    let last = &segments[segments.len() - 1];
    let departure_time = first.departure.at.clone();
    let departure_date = departure_time
        .split('T')
        .next()
        .unwrap_or_default()
        .to_string();

    Ok(Flight {
        id: offer.id.clone(),
        price,
        currency: offer.price.currency.clone(),
        airlines,
        airline_codes,
        stops: (segments.len() - 1) as u32,
        duration_minutes: parse_duration(&itinerary.duration),
        arrival_time: last.arrival.at.clone(),
        departure_airport: first.departure.iata_code.clone(),
        arrival_airport: last.arrival.iata_code.clone(),
        departure_time,
        departure_date,
        segments,
    })
}

/// Parses an ISO-8601-style duration token of the form `PT[n]H[n]M` into
/// minutes. Either component may be absent; anything unmatched counts as 0.
pub fn parse_duration(token: &str) -> u32 {
    let Some(rest) = token.strip_prefix("PT") else {
        return 0;
    };

    let mut minutes = 0u32;
    let mut digits = String::new();
    for c in rest.chars() {
        match c {
            '0'..='9' => digits.push(c),
            'H' => {
                minutes += digits.parse::<u32>().unwrap_or(0) * 60;
                digits.clear();
            }
            'M' => {
                minutes += digits.parse::<u32>().unwrap_or(0);
                digits.clear();
            }
            _ => return minutes,
        }
    }
    minutes
}
