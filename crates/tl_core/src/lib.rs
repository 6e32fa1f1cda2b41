//! # tl_core - Tennis Team-League Standings & Lineup Engine
//!
//! Domain core for a club tennis team league: per-slot point configuration,
//! match result storage, standings aggregation, and the lineup slot
//! eligibility engine with its publish state machine.
//!
//! ## Features
//! - Two-level point lookup: per-`(match_type, order)` overrides over league
//!   defaults, with priority-ordering validation on every write
//! - Deterministic standings ranking (points, games difference, games won,
//!   team name); either a complete table or an explicit error
//! - Sequential-fill lineup editing (slot N unlocks when slot N-1 is full)
//!   with lenient no-op handling of invalid drops
//! - JSON entry points for transport bindings

pub mod api;
pub mod error;
pub mod lineup_engine;
pub mod models;
pub mod score;
pub mod service;
pub mod standings;
pub mod store;

// Re-export the JSON API surface
pub use api::{
    create_or_update_lineup_json, publish_lineup_json, standings_json, upsert_point_system_json,
    API_SCHEMA_VERSION,
};
pub use error::{LeagueError, Result};

// Re-export core model types
pub use models::{
    DoublesMatch, LeagueTeam, Lineup, LineupSlot, LineupVisibility, MatchType, PointSystemConfig,
    PointSystemEntry, PointValues, ResultType, RsvpPlayer, RsvpStatus, SinglesMatch, StandingsRow,
    TeamLeague, TeamMatch, Winner, DEFAULT_POINT_VALUES,
};

// Re-export the engine and service surfaces
pub use lineup_engine::{eligible_candidates, LineupEditor, SlotPosition};
pub use score::{games_tally, parse_score_string, score_array_to_string, SetScore};
pub use service::{LeagueService, LeagueUpdate};
pub use standings::compute_standings;
pub use store::{LeagueMatches, LeagueStore};
