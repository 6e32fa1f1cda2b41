//! In-memory repository for league records.
//!
//! One `LeagueStore` holds every record type behind plain maps, keyed the
//! way the persistence contract keys them (lineups by fixture + team).
//! Integrity rules live here: fixtures exclusively own their individual
//! matches, deletes cascade, and a match pointing at a missing fixture is
//! surfaced as an error instead of being dropped from query results.

use std::collections::HashMap;

use uuid::Uuid;

use crate::error::{LeagueError, Result};
use crate::models::lineup::Lineup;
use crate::models::point_system::MatchType;
use crate::models::team::{LeagueTeam, TeamLeague};
use crate::models::team_match::{DoublesMatch, SinglesMatch, TeamMatch};

/// All individual matches for one league, orphan-checked.
#[derive(Debug, Clone, Default)]
pub struct LeagueMatches {
    pub singles: Vec<SinglesMatch>,
    pub doubles: Vec<DoublesMatch>,
}

#[derive(Debug, Clone, Default)]
pub struct LeagueStore {
    leagues: HashMap<Uuid, TeamLeague>,
    teams: HashMap<Uuid, LeagueTeam>,
    fixtures: HashMap<Uuid, TeamMatch>,
    singles: HashMap<Uuid, SinglesMatch>,
    doubles: HashMap<Uuid, DoublesMatch>,
    lineups: HashMap<(Uuid, Uuid), Lineup>,
}

impl LeagueStore {
    pub fn new() -> Self {
        Self::default()
    }

    // ========================
    // Leagues
    // ========================

    pub fn insert_league(&mut self, league: TeamLeague) {
        self.leagues.insert(league.id, league);
    }

    pub fn league(&self, id: Uuid) -> Result<&TeamLeague> {
        self.leagues.get(&id).ok_or(LeagueError::LeagueNotFound(id))
    }

    pub fn league_mut(&mut self, id: Uuid) -> Result<&mut TeamLeague> {
        self.leagues
            .get_mut(&id)
            .ok_or(LeagueError::LeagueNotFound(id))
    }

    /// Deletes a league and everything hanging off it: teams, fixtures,
    /// individual matches, and lineups.
    pub fn remove_league(&mut self, id: Uuid) -> Result<TeamLeague> {
        let league = self
            .leagues
            .remove(&id)
            .ok_or(LeagueError::LeagueNotFound(id))?;
        self.teams.retain(|_, t| t.league_id != id);
        let fixture_ids: Vec<Uuid> = self
            .fixtures
            .values()
            .filter(|f| f.league_id == id)
            .map(|f| f.id)
            .collect();
        for fixture_id in fixture_ids {
            self.cascade_fixture(fixture_id);
        }
        Ok(league)
    }

    // ========================
    // Teams
    // ========================

    pub fn insert_team(&mut self, team: LeagueTeam) -> Result<()> {
        self.league(team.league_id)?;
        self.teams.insert(team.id, team);
        Ok(())
    }

    pub fn team(&self, id: Uuid) -> Result<&LeagueTeam> {
        self.teams.get(&id).ok_or(LeagueError::TeamNotFound(id))
    }

    pub fn team_mut(&mut self, id: Uuid) -> Result<&mut LeagueTeam> {
        self.teams.get_mut(&id).ok_or(LeagueError::TeamNotFound(id))
    }

    pub fn remove_team(&mut self, id: Uuid) -> Result<LeagueTeam> {
        self.teams.remove(&id).ok_or(LeagueError::TeamNotFound(id))
    }

    pub fn teams_in_league(&self, league_id: Uuid) -> Vec<LeagueTeam> {
        let mut teams: Vec<LeagueTeam> = self
            .teams
            .values()
            .filter(|t| t.league_id == league_id)
            .cloned()
            .collect();
        teams.sort_by(|a, b| a.name.cmp(&b.name));
        teams
    }

    // ========================
    // Fixtures (team matches)
    // ========================

    pub fn insert_fixture(&mut self, fixture: TeamMatch) -> Result<()> {
        self.league(fixture.league_id)?;
        self.fixtures.insert(fixture.id, fixture);
        Ok(())
    }

    pub fn fixture(&self, id: Uuid) -> Result<&TeamMatch> {
        self.fixtures
            .get(&id)
            .ok_or(LeagueError::TeamMatchNotFound(id))
    }

    pub fn fixture_mut(&mut self, id: Uuid) -> Result<&mut TeamMatch> {
        self.fixtures
            .get_mut(&id)
            .ok_or(LeagueError::TeamMatchNotFound(id))
    }

    /// Deletes a fixture; its individual matches and lineups go with it.
    pub fn remove_fixture(&mut self, id: Uuid) -> Result<TeamMatch> {
        let fixture = self
            .fixtures
            .remove(&id)
            .ok_or(LeagueError::TeamMatchNotFound(id))?;
        self.cascade_fixture(id);
        Ok(fixture)
    }

    fn cascade_fixture(&mut self, id: Uuid) {
        self.fixtures.remove(&id);
        self.singles.retain(|_, m| m.team_match_id != id);
        self.doubles.retain(|_, m| m.team_match_id != id);
        self.lineups.retain(|(team_match_id, _), _| *team_match_id != id);
    }

    pub fn fixtures_in_league(&self, league_id: Uuid) -> Vec<TeamMatch> {
        self.fixtures
            .values()
            .filter(|f| f.league_id == league_id)
            .cloned()
            .collect()
    }

    // ========================
    // Individual matches
    // ========================

    pub fn insert_singles(&mut self, m: SinglesMatch) -> Result<()> {
        m.validate()?;
        let fixture = self.fixture(m.team_match_id)?;
        if self
            .singles
            .values()
            .any(|other| other.team_match_id == fixture.id && other.order == m.order)
        {
            return Err(LeagueError::DuplicateSlotOrder {
                match_type: MatchType::Singles,
                order: m.order,
            });
        }
        self.singles.insert(m.id, m);
        Ok(())
    }

    pub fn insert_doubles(&mut self, m: DoublesMatch) -> Result<()> {
        m.validate()?;
        let fixture = self.fixture(m.team_match_id)?;
        if self
            .doubles
            .values()
            .any(|other| other.team_match_id == fixture.id && other.order == m.order)
        {
            return Err(LeagueError::DuplicateSlotOrder {
                match_type: MatchType::Doubles,
                order: m.order,
            });
        }
        self.doubles.insert(m.id, m);
        Ok(())
    }

    pub fn singles_mut(&mut self, id: Uuid) -> Result<&mut SinglesMatch> {
        self.singles
            .get_mut(&id)
            .ok_or(LeagueError::MatchNotFound(id))
    }

    pub fn doubles_mut(&mut self, id: Uuid) -> Result<&mut DoublesMatch> {
        self.doubles
            .get_mut(&id)
            .ok_or(LeagueError::MatchNotFound(id))
    }

    /// Every individual match belonging to the league's fixtures.
    ///
    /// Any stored match whose fixture no longer exists anywhere makes this
    /// fail with `OrphanedMatch`; queries never silently drop rows.
    pub fn league_matches(&self, league_id: Uuid) -> Result<LeagueMatches> {
        let mut matches = LeagueMatches::default();
        for m in self.singles.values() {
            match self.fixtures.get(&m.team_match_id) {
                Some(fixture) if fixture.league_id == league_id => {
                    matches.singles.push(m.clone())
                }
                Some(_) => {}
                None => {
                    return Err(LeagueError::OrphanedMatch {
                        match_id: m.id,
                        team_match_id: m.team_match_id,
                    })
                }
            }
        }
        for m in self.doubles.values() {
            match self.fixtures.get(&m.team_match_id) {
                Some(fixture) if fixture.league_id == league_id => {
                    matches.doubles.push(m.clone())
                }
                Some(_) => {}
                None => {
                    return Err(LeagueError::OrphanedMatch {
                        match_id: m.id,
                        team_match_id: m.team_match_id,
                    })
                }
            }
        }
        matches.singles.sort_by_key(|m| (m.team_match_id, m.order));
        matches.doubles.sort_by_key(|m| (m.team_match_id, m.order));
        Ok(matches)
    }

    /// All singles and doubles matches in which the team sat on either side.
    pub fn results_for_team(&self, league_id: Uuid, team_id: Uuid) -> Result<LeagueMatches> {
        let all = self.league_matches(league_id)?;
        let involves = |team_match_id: Uuid| {
            self.fixtures
                .get(&team_match_id)
                .is_some_and(|f| f.involves(team_id))
        };
        Ok(LeagueMatches {
            singles: all
                .singles
                .into_iter()
                .filter(|m| involves(m.team_match_id))
                .collect(),
            doubles: all
                .doubles
                .into_iter()
                .filter(|m| involves(m.team_match_id))
                .collect(),
        })
    }

    // ========================
    // Lineups
    // ========================

    pub fn upsert_lineup(&mut self, lineup: Lineup) {
        self.lineups
            .insert((lineup.team_match_id, lineup.team_id), lineup);
    }

    pub fn lineup(&self, team_match_id: Uuid, team_id: Uuid) -> Result<&Lineup> {
        self.lineups
            .get(&(team_match_id, team_id))
            .ok_or(LeagueError::LineupNotFound {
                team_match_id,
                team_id,
            })
    }

    pub fn lineup_mut(&mut self, team_match_id: Uuid, team_id: Uuid) -> Result<&mut Lineup> {
        self.lineups
            .get_mut(&(team_match_id, team_id))
            .ok_or(LeagueError::LineupNotFound {
                team_match_id,
                team_id,
            })
    }

    /// Test/import hook: inserts a singles match without integrity checks,
    /// so orphan detection has something to detect.
    #[cfg(test)]
    pub(crate) fn insert_singles_unchecked(&mut self, m: SinglesMatch) {
        self.singles.insert(m.id, m);
    }
}
