// Analyzer module: chart-ready aggregations and summary statistics.

pub mod chart;
pub mod stats;

pub use chart::{build_price_distribution, build_price_points, PriceBucket, PricePoint};
pub use stats::{flight_stats, FlightStats};
