//! The Odds API: events and player-prop prices.

pub mod http;
pub mod types;

pub use http::OddsClient;
pub use types::{EventOdds, OddsEvent, PropLine};
