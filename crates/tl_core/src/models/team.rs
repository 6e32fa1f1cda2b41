use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::models::point_system::PointSystemConfig;

/// A tennis team league. Point configuration lives on the league; teams and
/// fixtures are kept by the store and reference the league by id.
///
/// `point_config` is optional at the record level: league creation always
/// seeds one, but records that arrive without it leave standings
/// unresolvable, and the aggregator fails loudly rather than guessing.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TeamLeague {
    pub id: Uuid,
    pub name: String,
    pub description: Option<String>,
    pub start_date: DateTime<Utc>,
    pub end_date: DateTime<Utc>,
    pub is_active: bool,
    pub point_config: Option<PointSystemConfig>,
    pub created_at: DateTime<Utc>,
}

impl TeamLeague {
    /// New league with the stock 3/0/1 point defaults, matching what league
    /// creation seeds.
    pub fn new(
        name: impl Into<String>,
        description: Option<String>,
        start_date: DateTime<Utc>,
        end_date: DateTime<Utc>,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            name: name.into(),
            description,
            start_date,
            end_date,
            is_active: true,
            point_config: Some(PointSystemConfig::default()),
            created_at: Utc::now(),
        }
    }
}

/// A team registered in a league: a captain plus the roster used to decide
/// which side of a fixture a player belongs to.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LeagueTeam {
    pub id: Uuid,
    pub league_id: Uuid,
    pub name: String,
    pub captain_id: Uuid,
    pub roster: Vec<Uuid>,
}

impl LeagueTeam {
    pub fn new(league_id: Uuid, name: impl Into<String>, captain_id: Uuid) -> Self {
        Self {
            id: Uuid::new_v4(),
            league_id,
            name: name.into(),
            captain_id,
            roster: vec![captain_id],
        }
    }

    pub fn has_player(&self, player_id: Uuid) -> bool {
        self.roster.contains(&player_id)
    }
}
