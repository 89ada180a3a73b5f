// Utility functions
use chrono::{NaiveDateTime, Timelike};

/// Parses an airport-local ISO-8601 timestamp (`2025-08-01T14:30:00`).
/// Upstream `at` fields carry no UTC offset.
pub fn parse_local_datetime(value: &str) -> Option<NaiveDateTime> {
    NaiveDateTime::parse_from_str(value, "%Y-%m-%dT%H:%M:%S").ok()
}

/// Local-clock hour (0-23) of a departure timestamp, 0 if unparseable.
pub fn departure_hour(value: &str) -> u32 {
    parse_local_datetime(value).map(|dt| dt.hour()).unwrap_or(0)
}

/// `150` -> `"2h 30m"`.
pub fn format_duration(minutes: u32) -> String {
    format!("{}h {}m", minutes / 60, minutes % 60)
}

pub fn format_stops(stops: u32) -> String {
    match stops {
        0 => "Nonstop".to_string(),
        1 => "1 stop".to_string(),
        n => format!("{} stops", n),
    }
}

/// Rough CO2 estimate in kg: 90 kg per flight hour.
pub fn estimate_co2(duration_minutes: u32) -> u32 {
    (duration_minutes as f64 / 60.0 * 90.0).round() as u32
}
