// Filter engine: declarative filter spec + stable sorting + facets.
use crate::model::Flight;
use crate::utils::{departure_hour, parse_local_datetime};
use chrono::NaiveDateTime;
use serde::Deserialize;
use std::collections::{BTreeMap, BTreeSet, HashSet};

/// Stop counts above this are folded into one "2+" bucket.
pub const MAX_STOP_BUCKET: u32 = 2;

const DEFAULT_PRICE_CEILING: f64 = 10_000.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum SortBy {
    #[default]
    Price,
    Duration,
    Departure,
}

/// Declarative filter specification, owned by the orchestrator and reset
/// whenever a new result set arrives.
#[derive(Debug, Clone)]
pub struct FilterState {
    /// Stop buckets to keep, subset of {0, 1, 2} where 2 means "2 or more".
    /// Empty or full set disables stop filtering.
    pub stops: HashSet<u32>,
    /// Airline display names to keep; empty disables airline filtering.
    pub airlines: HashSet<String>,
    /// Inclusive price bound.
    pub price_range: (f64, f64),
    /// Inclusive local-clock hour bound, 0-24. (0, 24) disables the filter.
    pub departure_time_range: (u32, u32),
    pub sort_by: SortBy,
}

impl Default for FilterState {
    fn default() -> Self {
        Self {
            stops: HashSet::from([0, 1, 2]),
            airlines: HashSet::new(),
            price_range: (0.0, DEFAULT_PRICE_CEILING),
            departure_time_range: (0, 24),
            sort_by: SortBy::Price,
        }
    }
}

impl FilterState {
    /// Fresh filters for a new result set: the price ceiling is the maximum
    /// offer price rounded up to the next 100-unit boundary.
    pub fn for_results(flights: &[Flight]) -> Self {
        let max_price = flights
            .iter()
            .map(|f| f.price)
            .fold(f64::NEG_INFINITY, f64::max);

        let mut state = Self::default();
        if max_price.is_finite() {
            state.price_range = (0.0, (max_price / 100.0).ceil() * 100.0);
        }
        state
    }
}

/// Applies the filter pipeline and sort order. Pure and idempotent: the
/// output already satisfies the same spec.
pub fn filter_and_sort(flights: &[Flight], spec: &FilterState) -> Vec<Flight> {
    let mut filtered: Vec<Flight> = flights
        .iter()
        .filter(|f| passes_stops(f, spec))
        .filter(|f| passes_airlines(f, spec))
        .filter(|f| f.price >= spec.price_range.0 && f.price <= spec.price_range.1)
        .filter(|f| passes_departure_window(f, spec))
        .cloned()
        .collect();

    match spec.sort_by {
        SortBy::Price => filtered.sort_by(|a, b| a.price.total_cmp(&b.price)),
        SortBy::Duration => filtered.sort_by_key(|f| f.duration_minutes),
        SortBy::Departure => filtered.sort_by_key(|f| departure_sort_key(f)),
    }

    filtered
}

/// Active only for a proper non-empty subset of the stop buckets. A flight
/// matches through its clamped stop count, so the "2+" bucket catches any
/// itinerary with two or more stops.
fn passes_stops(flight: &Flight, spec: &FilterState) -> bool {
    if spec.stops.is_empty() || spec.stops.len() as u32 > MAX_STOP_BUCKET {
        return true;
    }
    spec.stops.contains(&flight.stops.min(MAX_STOP_BUCKET))
}

/// OR semantics across a flight's carriers: one selected airline suffices.
fn passes_airlines(flight: &Flight, spec: &FilterState) -> bool {
    if spec.airlines.is_empty() {
        return true;
    }
    flight.airlines.iter().any(|a| spec.airlines.contains(a))
}

fn passes_departure_window(flight: &Flight, spec: &FilterState) -> bool {
    let (min_hour, max_hour) = spec.departure_time_range;
    if min_hour == 0 && max_hour >= 24 {
        return true;
    }
    let hour = departure_hour(&flight.departure_time);
    hour >= min_hour && hour <= max_hour
}

fn departure_sort_key(flight: &Flight) -> NaiveDateTime {
    parse_local_datetime(&flight.departure_time).unwrap_or(NaiveDateTime::MIN)
}

/// All distinct airline display names across the (unfiltered) result set,
/// lexicographically ordered. Facets are derived from the unfiltered set so
/// the options do not collapse as filters narrow the results.
pub fn unique_airlines(flights: &[Flight]) -> BTreeSet<String> {
    flights
        .iter()
        .flat_map(|f| f.airlines.iter().cloned())
        .collect()
}

/// Flight count per clamped stop bucket (0, 1, 2+).
pub fn stops_distribution(flights: &[Flight]) -> BTreeMap<u32, usize> {
    let mut distribution = BTreeMap::new();
    for flight in flights {
        *distribution
            .entry(flight.stops.min(MAX_STOP_BUCKET))
            .or_insert(0) += 1;
    }
    distribution
}

#[cfg(test)]
mod tests {
    use super::*;

    fn flight(id: &str, price: f64, stops: u32, airline: &str, departure: &str) -> Flight {
        Flight {
            id: id.to_string(),
            price,
            currency: "USD".to_string(),
            airlines: vec![airline.to_string()],
            airline_codes: vec![airline.chars().take(2).collect()],
            stops,
            duration_minutes: 60 + stops * 90,
            departure_time: departure.to_string(),
            arrival_time: "2025-09-01T23:00:00".to_string(),
            departure_airport: "JFK".to_string(),
            arrival_airport: "LAX".to_string(),
            departure_date: "2025-09-01".to_string(),
            segments: Vec::new(),
        }
    }

    fn sample() -> Vec<Flight> {
        vec![
            flight("a", 420.0, 0, "Delta Air Lines", "2025-09-01T08:00:00"),
            flight("b", 150.0, 1, "United Airlines", "2025-09-01T14:30:00"),
            flight("c", 290.0, 3, "Lufthansa", "2025-09-01T22:10:00"),
            flight("d", 150.0, 2, "Delta Air Lines", "2025-09-01T06:45:00"),
        ]
    }

    #[test]
    fn empty_input_yields_empty_output() {
        let spec = FilterState::default();
        assert!(filter_and_sort(&[], &spec).is_empty());
    }

    #[test]
    fn default_spec_only_sorts() {
        let result = filter_and_sort(&sample(), &FilterState::default());
        assert_eq!(result.len(), 4);
        let prices: Vec<f64> = result.iter().map(|f| f.price).collect();
        assert_eq!(prices, vec![150.0, 150.0, 290.0, 420.0]);
    }

    #[test]
    fn price_sort_is_stable_for_ties() {
        let result = filter_and_sort(&sample(), &FilterState::default());
        // "b" precedes "d" in the input and shares its price.
        assert_eq!(result[0].id, "b");
        assert_eq!(result[1].id, "d");
    }

    #[test]
    fn filtering_is_idempotent() {
        let spec = FilterState {
            stops: HashSet::from([0, 1]),
            airlines: HashSet::from(["Delta Air Lines".to_string()]),
            ..FilterState::default()
        };
        let once = filter_and_sort(&sample(), &spec);
        let twice = filter_and_sort(&once, &spec);
        assert_eq!(once, twice);
    }

    #[test]
    fn two_plus_bucket_matches_higher_stop_counts() {
        let spec = FilterState {
            stops: HashSet::from([2]),
            ..FilterState::default()
        };
        let result = filter_and_sort(&sample(), &spec);
        let ids: Vec<&str> = result.iter().map(|f| f.id.as_str()).collect();
        // Both the 2-stop and the 3-stop flight land in the 2+ bucket.
        assert_eq!(ids, vec!["d", "c"]);
    }

    #[test]
    fn full_stop_set_disables_stop_filter() {
        let spec = FilterState {
            stops: HashSet::from([0, 1, 2]),
            ..FilterState::default()
        };
        assert_eq!(filter_and_sort(&sample(), &spec).len(), 4);
    }

    #[test]
    fn airline_filter_uses_or_semantics() {
        let mut multi = flight("e", 500.0, 0, "Delta Air Lines", "2025-09-01T09:00:00");
        multi.airlines.push("United Airlines".to_string());

        let spec = FilterState {
            airlines: HashSet::from(["Delta Air Lines".to_string()]),
            ..FilterState::default()
        };
        let result = filter_and_sort(&[multi], &spec);
        assert_eq!(result.len(), 1);
    }

    #[test]
    fn price_bounds_are_inclusive() {
        let spec = FilterState {
            price_range: (150.0, 290.0),
            ..FilterState::default()
        };
        let result = filter_and_sort(&sample(), &spec);
        let ids: Vec<&str> = result.iter().map(|f| f.id.as_str()).collect();
        assert_eq!(ids, vec!["b", "d", "c"]);
    }

    #[test]
    fn departure_window_is_inclusive() {
        let spec = FilterState {
            departure_time_range: (8, 14),
            ..FilterState::default()
        };
        let result = filter_and_sort(&sample(), &spec);
        let ids: Vec<&str> = result.iter().map(|f| f.id.as_str()).collect();
        // 08:00 and 14:30 both pass on the inclusive hour bound.
        assert_eq!(ids, vec!["b", "a"]);
    }

    #[test]
    fn sorts_by_duration_and_departure() {
        let spec = FilterState {
            sort_by: SortBy::Duration,
            ..FilterState::default()
        };
        let result = filter_and_sort(&sample(), &spec);
        assert_eq!(result[0].id, "a");

        let spec = FilterState {
            sort_by: SortBy::Departure,
            ..FilterState::default()
        };
        let result = filter_and_sort(&sample(), &spec);
        let ids: Vec<&str> = result.iter().map(|f| f.id.as_str()).collect();
        assert_eq!(ids, vec!["d", "a", "b", "c"]);
    }

    #[test]
    fn for_results_rounds_price_ceiling_up_to_next_hundred() {
        let state = FilterState::for_results(&sample());
        assert_eq!(state.price_range, (0.0, 500.0));

        let exact = vec![flight("x", 400.0, 0, "KLM", "2025-09-01T10:00:00")];
        assert_eq!(FilterState::for_results(&exact).price_range, (0.0, 400.0));

        assert_eq!(
            FilterState::for_results(&[]).price_range,
            (0.0, DEFAULT_PRICE_CEILING)
        );
    }

    #[test]
    fn unique_airlines_are_sorted_and_deduplicated() {
        let airlines: Vec<String> = unique_airlines(&sample()).into_iter().collect();
        assert_eq!(
            airlines,
            vec!["Delta Air Lines", "Lufthansa", "United Airlines"]
        );
    }

    #[test]
    fn stops_distribution_clamps_to_two_plus() {
        let distribution = stops_distribution(&sample());
        assert_eq!(distribution.get(&0), Some(&1));
        assert_eq!(distribution.get(&1), Some(&1));
        assert_eq!(distribution.get(&2), Some(&2));
    }
}
