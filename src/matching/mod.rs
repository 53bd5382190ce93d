//! Player identity resolution between odds-feed names and ESPN rosters.
//!
//! - `fuzzy`: name normalization and similarity scoring
//! - `roster`: per-league roster snapshots from disk
//! - `store`: confirmed / pending / rejected records in JSON files
//! - `matcher`: the lookup pipeline tying them together

pub mod fuzzy;
pub mod matcher;
pub mod roster;
pub mod store;

pub use fuzzy::{best_match, FuzzyMatch, MATCH_THRESHOLD};
pub use matcher::{MatchSource, PlayerMatch, PlayerMatcher};
pub use roster::{RosterEntry, RosterStore};
pub use store::{IdentityState, IdentityStore, PlayerIdentityRecord};
