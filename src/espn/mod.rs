//! ESPN public API access.
//!
//! - `types`: raw wire shapes
//! - `http`: the client
//! - `normalize`: scoreboard events into [`crate::models::GameRecord`]
//! - `gamelog`: athlete game logs flattened into stat columns

pub mod gamelog;
pub mod http;
pub mod normalize;
pub mod types;

pub use gamelog::GameLog;
pub use http::EspnClient;
