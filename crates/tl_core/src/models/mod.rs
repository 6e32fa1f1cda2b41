pub mod lineup;
pub mod point_system;
pub mod standings;
pub mod team;
pub mod team_match;

pub use lineup::{
    Lineup, LineupSlot, LineupVisibility, RsvpPlayer, RsvpStatus, DOUBLES_SLOT_COUNT,
    LINEUP_SHAPE, SINGLES_SLOT_COUNT,
};
pub use point_system::{
    MatchType, PointSystemConfig, PointSystemEntry, PointValues, DEFAULT_POINT_VALUES,
};
pub use standings::StandingsRow;
pub use team::{LeagueTeam, TeamLeague};
pub use team_match::{DoublesMatch, ResultType, SinglesMatch, TeamMatch, Winner};
