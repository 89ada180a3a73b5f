// Price calendar: cheapest fares for dates around the requested departure.
use crate::analyzer::stats::cheapest_price;
use crate::api::FlightsApi;
use crate::model::SearchParams;
use crate::normalizer::normalize_all;
use chrono::{Duration, NaiveDate};
use futures::future::join_all;
use tracing::warn;

/// Cheapest fare found for one departure date. `None` when the lookup
/// failed or no offers came back.
#[derive(Debug, Clone, PartialEq)]
pub struct DatePrice {
    pub date: NaiveDate,
    pub price: Option<f64>,
}

/// Dates in a ±`radius`-day window around `center`, in calendar order.
pub fn date_window(center: NaiveDate, radius: i64) -> Vec<NaiveDate> {
    (-radius..=radius)
        .map(|offset| center + Duration::days(offset))
        .collect()
}

/// Fetches the cheapest fare for every date in the window around the
/// requested departure date, querying all dates concurrently. A failed
/// lookup yields `None` for that date rather than failing the window.
pub async fn price_window(
    api: &dyn FlightsApi,
    params: &SearchParams,
    radius: i64,
) -> Vec<DatePrice> {
    let Ok(center) = NaiveDate::parse_from_str(&params.departure_date, "%Y-%m-%d") else {
        warn!(
            "Unparseable departure date '{}', skipping price calendar",
            params.departure_date
        );
        return Vec::new();
    };

    let dates = date_window(center, radius);
    let lookups = dates.iter().map(|date| async move {
        let mut day_params = params.clone();
        day_params.departure_date = date.format("%Y-%m-%d").to_string();

        let price = match api.search_offers(&day_params).await {
            Ok(offers) => cheapest_price(&normalize_all(&offers)),
            Err(e) => {
                warn!("Calendar lookup failed for {}: {}", date, e);
                None
            }
        };
        DatePrice { date: *date, price }
    });

    join_all(lookups).await
}
