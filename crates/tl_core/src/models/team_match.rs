//! Team fixtures and the individual matches they own.
//!
//! A `TeamMatch` is one team-vs-team fixture; it exclusively owns its
//! singles and doubles matches (deleting the fixture deletes them all).
//! Individual matches are stored as separate records carrying a
//! `team_match_id`; a match whose fixture no longer exists is a
//! data-integrity error, not a droppable row. Within an individual match,
//! player1/team1 is always the home side and player2/team2 the away side,
//! mirroring how fixtures are created from the two rosters.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::{LeagueError, Result};
use crate::models::point_system::MatchType;

/// Which side of a fixture won an individual match.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Winner {
    Home,
    Away,
    Draw,
}

/// How the result came about.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ResultType {
    Completed,
    TimedMatch,
    Default,
    None,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SinglesMatch {
    pub id: Uuid,
    pub team_match_id: Uuid,
    /// Slot priority, 1 = first singles. Unique per fixture.
    pub order: u32,
    /// Home-side player.
    pub player1_id: Uuid,
    /// Away-side player.
    pub player2_id: Uuid,
    pub match_date: DateTime<Utc>,
    /// Set-score string such as `"6-4 7-6"`. May be blank or malformed;
    /// see `crate::score`.
    pub score: String,
    pub winner: Option<Winner>,
    pub result_type: Option<ResultType>,
}

impl SinglesMatch {
    pub fn validate(&self) -> Result<()> {
        if self.order == 0 {
            return Err(LeagueError::InvalidSlotOrder {
                match_type: MatchType::Singles,
                order: self.order,
            });
        }
        if self.player1_id == self.player2_id {
            return Err(LeagueError::InvalidParticipants(
                "a singles match needs two different players".to_string(),
            ));
        }
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DoublesMatch {
    pub id: Uuid,
    pub team_match_id: Uuid,
    /// Slot priority, 1 = first doubles. Unique per fixture.
    pub order: u32,
    /// Home-side pair.
    pub team1_player1_id: Uuid,
    pub team1_player2_id: Uuid,
    /// Away-side pair.
    pub team2_player1_id: Uuid,
    pub team2_player2_id: Uuid,
    pub match_date: DateTime<Utc>,
    pub score: String,
    pub winner: Option<Winner>,
    pub result_type: Option<ResultType>,
}

impl DoublesMatch {
    pub fn validate(&self) -> Result<()> {
        if self.order == 0 {
            return Err(LeagueError::InvalidSlotOrder {
                match_type: MatchType::Doubles,
                order: self.order,
            });
        }
        let players = [
            self.team1_player1_id,
            self.team1_player2_id,
            self.team2_player1_id,
            self.team2_player2_id,
        ];
        for i in 0..players.len() {
            for j in (i + 1)..players.len() {
                if players[i] == players[j] {
                    return Err(LeagueError::InvalidParticipants(
                        "a doubles match needs four different players".to_string(),
                    ));
                }
            }
        }
        Ok(())
    }
}

/// One team-vs-team fixture. Owns its individual matches.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TeamMatch {
    pub id: Uuid,
    pub league_id: Uuid,
    pub home_team_id: Uuid,
    pub away_team_id: Uuid,
    pub match_date: DateTime<Utc>,
    pub is_completed: bool,
    pub home_score: Option<u32>,
    pub away_score: Option<u32>,
}

impl TeamMatch {
    pub fn new(
        league_id: Uuid,
        home_team_id: Uuid,
        away_team_id: Uuid,
        match_date: DateTime<Utc>,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            league_id,
            home_team_id,
            away_team_id,
            match_date,
            is_completed: false,
            home_score: None,
            away_score: None,
        }
    }

    pub fn involves(&self, team_id: Uuid) -> bool {
        self.home_team_id == team_id || self.away_team_id == team_id
    }
}
