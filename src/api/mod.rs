// Upstream flight-offers API: client, token cache and wire types.

pub mod client;
pub mod token;
pub mod traits;
pub mod types;

pub use client::AmadeusClient;
pub use traits::FlightsApi;
