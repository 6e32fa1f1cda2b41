use std::cmp::Ordering;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// One ranked row of a league table. Derived on demand from the point
/// configuration and the completed fixtures; never stored.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StandingsRow {
    pub team_id: Uuid,
    pub team_name: String,
    pub matches_played: u32,
    pub wins: u32,
    pub losses: u32,
    pub draws: u32,
    pub points: u32,
    pub games_won: u32,
    pub games_lost: u32,
}

impl StandingsRow {
    pub fn zeroed(team_id: Uuid, team_name: impl Into<String>) -> Self {
        Self {
            team_id,
            team_name: team_name.into(),
            matches_played: 0,
            wins: 0,
            losses: 0,
            draws: 0,
            points: 0,
            games_won: 0,
            games_lost: 0,
        }
    }

    pub fn games_diff(&self) -> i64 {
        i64::from(self.games_won) - i64::from(self.games_lost)
    }

    /// Ranking order: points desc, games difference desc, games won desc,
    /// then team name asc so the table is total and reproducible.
    pub fn rank_cmp(&self, other: &StandingsRow) -> Ordering {
        other
            .points
            .cmp(&self.points)
            .then_with(|| other.games_diff().cmp(&self.games_diff()))
            .then_with(|| other.games_won.cmp(&self.games_won))
            .then_with(|| self.team_name.cmp(&other.team_name))
    }
}
