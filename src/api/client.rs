use crate::api::token::TokenCache;
use crate::api::traits::FlightsApi;
use crate::api::types::{OfferSearchResponse, RawOffer, TokenResponse};
use crate::config::ApiConfig;
use crate::model::{ApiError, SearchParams};
use reqwest::Client;
use tracing::info;

pub struct AmadeusClient {
    client: Client,
    config: ApiConfig,
    tokens: TokenCache,
}

impl AmadeusClient {
    pub fn new(config: ApiConfig) -> Result<Self, ApiError> {
        let client = Client::builder()
            .user_agent("FareSniperBot/0.1")
            .build()?;

        Ok(Self {
            client,
            config,
            tokens: TokenCache::new(),
        })
    }

    /// Returns a valid bearer token, requesting a fresh one from the OAuth
    /// endpoint when the cached token is missing or stale.
    async fn bearer_token(&self) -> Result<String, ApiError> {
        if let Some(token) = self.tokens.valid_token() {
            return Ok(token);
        }

        if self.config.client_id.is_empty() || self.config.client_secret.is_empty() {
            return Err(ApiError::MissingCredentials);
        }

        let url = format!("{}/v1/security/oauth2/token", self.config.base_url);
        let form = [
            ("grant_type", "client_credentials"),
            ("client_id", self.config.client_id.as_str()),
            ("client_secret", self.config.client_secret.as_str()),
        ];

        let response = self.client.post(&url).form(&form).send().await?;
        if !response.status().is_success() {
            return Err(ApiError::InvalidResponse(response.status().as_u16()));
        }

        let token: TokenResponse = response.json().await?;
        self.tokens
            .store(token.access_token.clone(), token.expires_in);
        info!("Obtained fresh access token (expires in {}s)", token.expires_in);

        Ok(token.access_token)
    }

    fn build_query(&self, params: &SearchParams) -> Vec<(&'static str, String)> {
        let mut query = vec![
            ("originLocationCode", params.origin.clone()),
            ("destinationLocationCode", params.destination.clone()),
            ("departureDate", params.departure_date.clone()),
            ("adults", params.adults.to_string()),
            ("travelClass", params.travel_class.as_str().to_string()),
            ("currencyCode", self.config.currency.clone()),
            ("max", self.config.max_results.to_string()),
        ];

        if let Some(return_date) = &params.return_date {
            query.push(("returnDate", return_date.clone()));
        }
        if params.non_stop {
            query.push(("nonStop", "true".to_string()));
        }

        query
    }
}

#[async_trait::async_trait]
impl FlightsApi for AmadeusClient {
    async fn search_offers(&self, params: &SearchParams) -> Result<Vec<RawOffer>, ApiError> {
        let token = self.bearer_token().await?;
        let url = format!("{}/v2/shopping/flight-offers", self.config.base_url);

        let response = self
            .client
            .get(&url)
            .query(&self.build_query(params))
            .bearer_auth(token)
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(ApiError::InvalidResponse(response.status().as_u16()));
        }

        let body: OfferSearchResponse = response.json().await?;
        Ok(body.data)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::TravelClass;

    fn client() -> AmadeusClient {
        AmadeusClient::new(ApiConfig {
            base_url: "https://test.api".into(),
            client_id: "id".into(),
            client_secret: "secret".into(),
            currency: "USD".into(),
            max_results: 50,
        })
        .unwrap()
    }

    fn params() -> SearchParams {
        SearchParams {
            origin: "JFK".into(),
            destination: "LAX".into(),
            departure_date: "2025-09-01".into(),
            return_date: None,
            adults: 1,
            travel_class: TravelClass::Economy,
            non_stop: false,
        }
    }

    #[test]
    fn query_carries_required_parameters() {
        let query = client().build_query(&params());
        assert!(query.contains(&("originLocationCode", "JFK".to_string())));
        assert!(query.contains(&("destinationLocationCode", "LAX".to_string())));
        assert!(query.contains(&("travelClass", "ECONOMY".to_string())));
        assert!(query.contains(&("currencyCode", "USD".to_string())));
        assert!(query.contains(&("max", "50".to_string())));
        assert!(!query.iter().any(|(k, _)| *k == "returnDate"));
        assert!(!query.iter().any(|(k, _)| *k == "nonStop"));
    }

    #[test]
    fn query_adds_optional_parameters() {
        let mut p = params();
        p.return_date = Some("2025-09-10".into());
        p.non_stop = true;
        let query = client().build_query(&p);
        assert!(query.contains(&("returnDate", "2025-09-10".to_string())));
        assert!(query.contains(&("nonStop", "true".to_string())));
    }
}
