mod airlines;
mod analyzer;
mod api;
mod calendar;
mod config;
mod filter;
mod model;
mod normalizer;
mod utils;

use analyzer::{build_price_distribution, build_price_points, flight_stats};
use api::{AmadeusClient, FlightsApi};
use calendar::price_window;
use config::{load_config, AppConfig, RouteConfig};
use filter::{filter_and_sort, stops_distribution, unique_airlines, FilterState};
use futures::future::join_all;
use model::Flight;
use normalizer::{normalize_all, parse_duration};
use std::collections::HashSet;
use std::sync::Arc;
use tokio::time::{sleep, Duration};
use tracing::{error, info, warn};
use utils::{estimate_co2, format_duration, format_stops};

/// Bucket count for the compact histogram logged by the watch loop.
const SUMMARY_BUCKETS: usize = 6;

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt::init();

    std::panic::set_hook(Box::new(|panic_info| {
        eprintln!("Panic occurred: {:?}", panic_info);
    }));

    let config: Arc<AppConfig> = match load_config("config.json") {
        Ok(cfg) => Arc::new(cfg),
        Err(e) => {
            error!("Config load error: {}", e);
            return;
        }
    };

    let client = match AmadeusClient::new(config.api.clone()) {
        Ok(c) => Arc::new(c),
        Err(e) => {
            error!("Failed to initialize API client: {}", e);
            return;
        }
    };

    info!("FareSniper started, watching {} route(s)", config.routes.len());

    loop {
        let tasks: Vec<_> = config
            .routes
            .iter()
            .map(|route| process_route(route, client.as_ref(), config.clone()))
            .collect();
        join_all(tasks).await;

        info!(
            "Waiting {}s until the next fare check...",
            config.check_interval_seconds
        );
        sleep(Duration::from_secs(config.check_interval_seconds)).await;
    }
}

/// Runs one watch cycle for a route: search, normalize, filter, aggregate
/// and report.
async fn process_route(route: &RouteConfig, api: &AmadeusClient, config: Arc<AppConfig>) {
    let label = format!("{} -> {}", route.search.origin, route.search.destination);
    info!("Checking fares: {} on {}", label, route.search.departure_date);

    let offers = match api.search_offers(&route.search).await {
        Ok(offers) => offers,
        Err(e) => {
            warn!("Offer search failed for {}: {}", label, e);
            return;
        }
    };

    let flights = normalize_all(&offers);
    if flights.is_empty() {
        info!("No usable offers for {}", label);
        return;
    }

    let spec = filter_state_for(route, &flights);
    let filtered = filter_and_sort(&flights, &spec);
    info!(
        "{}: {} offers, {} after filters",
        label,
        flights.len(),
        filtered.len()
    );

    report_facets(&flights);
    report_results(&filtered);
    report_best_offer(&filtered);

    let window = price_window(api, &route.search, config.calendar_radius_days).await;
    for day in &window {
        match day.price {
            Some(price) => info!("  {}: from {:.2}", day.date, price),
            None => info!("  {}: no fares", day.date),
        }
    }
}

/// Fresh filters for the result set, overlaid with the route's configured
/// preferences.
fn filter_state_for(route: &RouteConfig, flights: &[Flight]) -> FilterState {
    let mut spec = FilterState::for_results(flights);

    if let Some(stops) = &route.stops {
        spec.stops = stops.iter().copied().collect::<HashSet<u32>>();
    }
    if !route.airlines.is_empty() {
        spec.airlines = route.airlines.iter().cloned().collect();
    }
    if let Some(max_price) = route.max_price {
        spec.price_range.1 = max_price;
    }
    if let Some(hours) = route.departure_hours {
        spec.departure_time_range = hours;
    }
    spec.sort_by = route.sort_by;

    spec
}

/// Logs the filter facets derived from the unfiltered result set.
fn report_facets(flights: &[Flight]) {
    let airlines: Vec<String> = unique_airlines(flights).into_iter().collect();
    info!("Airlines: {}", airlines.join(", "));

    for (stops, count) in stops_distribution(flights) {
        let bucket = if stops >= filter::MAX_STOP_BUCKET {
            "2+ stops".to_string()
        } else {
            format_stops(stops)
        };
        info!("  {}: {} flight(s)", bucket, count);
    }
}

/// Logs summary statistics, the fare histogram and the cheapest offers.
fn report_results(filtered: &[Flight]) {
    let Some(stats) = flight_stats(filtered) else {
        info!("All offers filtered out");
        return;
    };

    info!(
        "Cheapest {:.2} | average {:.2} | shortest {} | average {}",
        stats.cheapest_price,
        stats.average_price,
        format_duration(stats.shortest_duration),
        format_duration(stats.average_duration)
    );

    for bucket in build_price_distribution(filtered, SUMMARY_BUCKETS) {
        info!(
            "  {}: {} flight(s), from {:.2}, avg {:.2}",
            bucket.range, bucket.count, bucket.min_price, bucket.avg_price
        );
    }

    for (point, flight) in build_price_points(filtered).iter().zip(filtered).take(5) {
        info!(
            "  #{} {:.2} {} {} ({}, {}, ~{} kg CO2)",
            point.index,
            point.price,
            flight.currency,
            point.airline,
            format_stops(point.stops),
            format_duration(flight.duration_minutes),
            estimate_co2(flight.duration_minutes)
        );
    }
}

/// Logs the cheapest surviving offer segment by segment.
fn report_best_offer(filtered: &[Flight]) {
    let Some(best) = filtered
        .iter()
        .min_by(|a, b| a.price.total_cmp(&b.price))
    else {
        return;
    };

    info!(
        "Best offer {}: {:.2} {} {} -> {} on {}, dep {} arr {} ({} [{}])",
        best.id,
        best.price,
        best.currency,
        best.departure_airport,
        best.arrival_airport,
        best.departure_date,
        best.departure_time,
        best.arrival_time,
        best.airlines.join("/"),
        best.airline_codes.join("/")
    );

    for seg in &best.segments {
        info!(
            "  {} {} {} (T{}) -> {} (T{}), {}",
            seg.carrier_code,
            seg.flight_number,
            seg.departure.iata_code,
            seg.departure.terminal.as_deref().unwrap_or("-"),
            seg.arrival.iata_code,
            seg.arrival.terminal.as_deref().unwrap_or("-"),
            format_duration(parse_duration(&seg.duration))
        );
    }
}
