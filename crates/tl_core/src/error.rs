use thiserror::Error;
use uuid::Uuid;

use crate::models::point_system::MatchType;

#[derive(Error, Debug)]
pub enum LeagueError {
    #[error(
        "invalid point ordering for {match_type}: order {lower_order} must not be worth less than order {higher_order}"
    )]
    InvalidPointOrdering {
        match_type: MatchType,
        lower_order: u32,
        higher_order: u32,
    },

    #[error("no point values configured for league {league_id}, {match_type} order {order}")]
    MissingPointSystemConfiguration {
        league_id: Uuid,
        match_type: MatchType,
        order: u32,
    },

    #[error("lineup has no players assigned")]
    IncompleteLineup,

    #[error("{slot_type} lineup slot {order} cannot be filled before the slot above it")]
    LineupSlotLocked { slot_type: MatchType, order: u32 },

    #[error("match {match_id} references missing team match {team_match_id}")]
    OrphanedMatch { match_id: Uuid, team_match_id: Uuid },

    #[error("league not found: {0}")]
    LeagueNotFound(Uuid),

    #[error("team not found: {0}")]
    TeamNotFound(Uuid),

    #[error("team match not found: {0}")]
    TeamMatchNotFound(Uuid),

    #[error("individual match not found: {0}")]
    MatchNotFound(Uuid),

    #[error("no lineup for team match {team_match_id} and team {team_id}")]
    LineupNotFound { team_match_id: Uuid, team_id: Uuid },

    #[error("{match_type} order {order} already taken in this team match")]
    DuplicateSlotOrder { match_type: MatchType, order: u32 },

    #[error("invalid {match_type} order {order}: orders start at 1")]
    InvalidSlotOrder { match_type: MatchType, order: u32 },

    #[error("invalid participants: {0}")]
    InvalidParticipants(String),
}

pub type Result<T> = std::result::Result<T, LeagueError>;
