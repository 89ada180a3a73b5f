use crate::model::Flight;

/// Summary statistics over a result set.
#[derive(Debug, Clone, PartialEq)]
pub struct FlightStats {
    pub total_flights: usize,
    pub cheapest_price: f64,
    /// Mean price, rounded to the nearest unit.
    pub average_price: f64,
    pub shortest_duration: u32,
    /// Mean duration in minutes, rounded.
    pub average_duration: u32,
}

/// `None` for an empty result set; never an error.
pub fn flight_stats(flights: &[Flight]) -> Option<FlightStats> {
    if flights.is_empty() {
        return None;
    }

    let count = flights.len() as f64;
    let cheapest_price = flights
        .iter()
        .map(|f| f.price)
        .fold(f64::INFINITY, f64::min);
    let average_price = (flights.iter().map(|f| f.price).sum::<f64>() / count).round();
    let shortest_duration = flights
        .iter()
        .map(|f| f.duration_minutes)
        .min()
        .unwrap_or(0);
    let average_duration =
        (flights.iter().map(|f| f.duration_minutes as f64).sum::<f64>() / count).round() as u32;

    Some(FlightStats {
        total_flights: flights.len(),
        cheapest_price,
        average_price,
        shortest_duration,
        average_duration,
    })
}

/// Cheapest fare in a result set, used by the price calendar.
pub fn cheapest_price(flights: &[Flight]) -> Option<f64> {
    flights
        .iter()
        .map(|f| f.price)
        .min_by(|a, b| a.total_cmp(b))
}
