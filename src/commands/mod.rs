//! Command implementations for the sports-intel CLI.
//!
//! Handlers return the rendered report; `main` decides where it goes.

pub mod common;
pub mod events;
pub mod games;
pub mod identity;
pub mod value_bets;

pub use common::{BaseUrls, CommandContext};
