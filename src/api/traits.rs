use crate::api::types::RawOffer;
use crate::model::{ApiError, SearchParams};

#[async_trait::async_trait]
pub trait FlightsApi: Send + Sync {
    async fn search_offers(&self, params: &SearchParams) -> Result<Vec<RawOffer>, ApiError>;
}
