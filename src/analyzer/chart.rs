// Chart-ready aggregations: price points and the fare histogram.
use crate::model::Flight;

/// One point on the price curve, in input order. Callers sort beforehand if
/// they want an ascending curve.
#[derive(Debug, Clone, PartialEq)]
pub struct PricePoint {
    /// 1-based position in the input.
    pub index: usize,
    pub price: f64,
    /// Primary carrier display name.
    pub airline: String,
    pub stops: u32,
}

/// One contiguous price sub-range of the fare histogram. Rebuilt on every
/// aggregation call, never persisted.
#[derive(Debug, Clone, PartialEq)]
pub struct PriceBucket {
    pub range: String,
    pub range_start: f64,
    pub range_end: f64,
    pub count: usize,
    pub min_price: f64,
    pub avg_price: f64,
}

pub fn build_price_points(flights: &[Flight]) -> Vec<PricePoint> {
    flights
        .iter()
        .enumerate()
        .map(|(i, flight)| PricePoint {
            index: i + 1,
            price: flight.price,
            airline: flight
                .airlines
                .first()
                .cloned()
                .unwrap_or_else(|| "Unknown".to_string()),
            stops: flight.stops,
        })
        .collect()
}

/// Partitions `[min(price), max(price)]` into `bucket_count` equal-width
/// buckets with half-open membership `[start, end)`. Bucket width has a 50
/// floor so a zero-spread result set still produces a non-empty bucket.
/// Flights priced exactly at the overall maximum can fall outside every
/// half-open bucket; their count is folded into the last emitted bucket.
/// Empty buckets are dropped from the result.
pub fn build_price_distribution(flights: &[Flight], bucket_count: usize) -> Vec<PriceBucket> {
    if flights.is_empty() || bucket_count == 0 {
        return Vec::new();
    }

    let prices: Vec<f64> = flights.iter().map(|f| f.price).collect();
    let min_price = prices.iter().copied().fold(f64::INFINITY, f64::min);
    let max_price = prices.iter().copied().fold(f64::NEG_INFINITY, f64::max);

    let mut bucket_size = ((max_price - min_price) / bucket_count as f64).ceil();
    if bucket_size <= 0.0 {
        bucket_size = 50.0;
    }

    let mut buckets: Vec<PriceBucket> = Vec::new();
    for i in 0..bucket_count {
        let range_start = min_price + i as f64 * bucket_size;
        let range_end = range_start + bucket_size;

        let members: Vec<f64> = prices
            .iter()
            .copied()
            .filter(|p| *p >= range_start && *p < range_end)
            .collect();

        // The trailing bucket is only emitted when occupied; interior buckets
        // stay so the histogram keeps its contiguous x-axis.
        if members.is_empty() && i == bucket_count - 1 {
            continue;
        }

        let min_member = members.iter().copied().fold(f64::INFINITY, f64::min);
        buckets.push(PriceBucket {
            range: format!("${}-{}", range_start.round(), range_end.round()),
            range_start: range_start.round(),
            range_end: range_end.round(),
            count: members.len(),
            min_price: if members.is_empty() {
                range_start
            } else {
                min_member
            },
            avg_price: if members.is_empty() {
                0.0
            } else {
                (members.iter().sum::<f64>() / members.len() as f64).round()
            },
        });
    }

    let max_covered = buckets
        .iter()
        .any(|b| max_price >= b.range_start && max_price < b.range_end);
    if !max_covered {
        let stray = prices.iter().filter(|p| **p == max_price).count();
        if let Some(last) = buckets.last_mut() {
            last.count += stray;
        }
    }

    buckets.retain(|b| b.count > 0);
    buckets
}

#[cfg(test)]
mod tests {
    use super::*;

    fn flight(id: &str, price: f64, airlines: &[&str], stops: u32) -> Flight {
        Flight {
            id: id.to_string(),
            price,
            currency: "USD".to_string(),
            airlines: airlines.iter().map(|a| a.to_string()).collect(),
            airline_codes: Vec::new(),
            stops,
            duration_minutes: 120,
            departure_time: "2025-09-01T08:00:00".to_string(),
            arrival_time: "2025-09-01T11:00:00".to_string(),
            departure_airport: "JFK".to_string(),
            arrival_airport: "LAX".to_string(),
            departure_date: "2025-09-01".to_string(),
            segments: Vec::new(),
        }
    }

    #[test]
    fn price_points_preserve_input_order() {
        let flights = vec![
            flight("a", 300.0, &["Delta Air Lines"], 0),
            flight("b", 120.0, &[], 2),
        ];
        let points = build_price_points(&flights);

        assert_eq!(points.len(), 2);
        assert_eq!(points[0].index, 1);
        assert_eq!(points[0].price, 300.0);
        assert_eq!(points[0].airline, "Delta Air Lines");
        assert_eq!(points[1].index, 2);
        assert_eq!(points[1].airline, "Unknown");
        assert_eq!(points[1].stops, 2);

        assert!(build_price_points(&[]).is_empty());
    }

    #[test]
    fn single_flight_yields_one_bucket() {
        let buckets = build_price_distribution(&[flight("a", 100.0, &["KLM"], 0)], 8);
        assert_eq!(buckets.len(), 1);
        assert_eq!(buckets[0].count, 1);
        assert_eq!(buckets[0].min_price, 100.0);
        assert_eq!(buckets[0].avg_price, 100.0);
    }

    #[test]
    fn zero_spread_uses_minimum_bucket_width() {
        let flights = vec![
            flight("a", 200.0, &["KLM"], 0),
            flight("b", 200.0, &["KLM"], 0),
        ];
        let buckets = build_price_distribution(&flights, 8);
        assert_eq!(buckets.len(), 1);
        assert_eq!(buckets[0].range_start, 200.0);
        assert_eq!(buckets[0].range_end, 250.0);
        assert_eq!(buckets[0].count, 2);
    }

    #[test]
    fn max_price_flights_fold_into_last_bucket() {
        // Spread 0..800 over 8 buckets of width 100; the 800.0 flight sits
        // just outside the final half-open range.
        let flights = vec![
            flight("a", 0.0, &["KLM"], 0),
            flight("b", 750.0, &["KLM"], 0),
            flight("c", 800.0, &["KLM"], 0),
        ];
        let buckets = build_price_distribution(&flights, 8);

        assert_eq!(buckets.len(), 2);
        assert_eq!(buckets[1].range_start, 700.0);
        // 750.0 plus the folded 800.0.
        assert_eq!(buckets[1].count, 2);
        assert_eq!(buckets[1].min_price, 750.0);
    }

    #[test]
    fn empty_buckets_are_dropped() {
        let flights = vec![
            flight("a", 100.0, &["KLM"], 0),
            flight("b", 900.0, &["KLM"], 0),
        ];
        let buckets = build_price_distribution(&flights, 8);
        assert_eq!(buckets.len(), 2);
        assert!(buckets.iter().all(|b| b.count > 0));
    }

    #[test]
    fn bucket_members_report_min_and_rounded_average() {
        let flights = vec![
            flight("a", 100.0, &["KLM"], 0),
            flight("b", 110.0, &["KLM"], 0),
            flight("c", 121.0, &["KLM"], 0),
            flight("d", 500.0, &["KLM"], 0),
        ];
        let buckets = build_price_distribution(&flights, 8);

        assert_eq!(buckets[0].range_start, 100.0);
        assert_eq!(buckets[0].count, 3);
        assert_eq!(buckets[0].min_price, 100.0);
        assert_eq!(buckets[0].avg_price, 110.0);
    }

    #[test]
    fn empty_input_yields_no_buckets() {
        assert!(build_price_distribution(&[], 8).is_empty());
    }
}
