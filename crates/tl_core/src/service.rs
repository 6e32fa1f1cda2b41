//! League service: the operation surface consumed by the transport layer.
//!
//! Each method is one synchronous request-scoped operation over the store.
//! Standings are recomputed from scratch on every query. Lineup saves write
//! the whole slot set; two captains editing the same lineup race as
//! last-full-write-wins. There is deliberately no diff merge or optimistic
//! locking; the save payload is always the complete aggregate.

use chrono::{DateTime, Utc};
use tracing::{debug, info, warn};
use uuid::Uuid;

use crate::error::{LeagueError, Result};
use crate::lineup_engine::LineupEditor;
use crate::models::lineup::{Lineup, LineupSlot, LineupVisibility};
use crate::models::point_system::{MatchType, PointValues};
use crate::models::standings::StandingsRow;
use crate::models::team::{LeagueTeam, TeamLeague};
use crate::models::team_match::{DoublesMatch, ResultType, SinglesMatch, TeamMatch, Winner};
use crate::score::parse_score_string;
use crate::standings::compute_standings;
use crate::store::{LeagueMatches, LeagueStore};

/// Partial update for league metadata; `None` fields are left untouched.
#[derive(Debug, Clone, Default)]
pub struct LeagueUpdate {
    pub name: Option<String>,
    pub description: Option<Option<String>>,
    pub start_date: Option<DateTime<Utc>>,
    pub end_date: Option<DateTime<Utc>>,
    pub is_active: Option<bool>,
}

#[derive(Debug, Default)]
pub struct LeagueService {
    store: LeagueStore,
}

impl LeagueService {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn store(&self) -> &LeagueStore {
        &self.store
    }

    // ========================
    // Leagues
    // ========================

    pub fn create_league(
        &mut self,
        name: impl Into<String>,
        description: Option<String>,
        start_date: DateTime<Utc>,
        end_date: DateTime<Utc>,
    ) -> Uuid {
        let league = TeamLeague::new(name, description, start_date, end_date);
        let id = league.id;
        info!(league = %id, name = %league.name, "created league");
        self.store.insert_league(league);
        id
    }

    pub fn league(&self, id: Uuid) -> Result<&TeamLeague> {
        self.store.league(id)
    }

    pub fn update_league(&mut self, id: Uuid, update: LeagueUpdate) -> Result<&TeamLeague> {
        let league = self.store.league_mut(id)?;
        if let Some(name) = update.name {
            league.name = name;
        }
        if let Some(description) = update.description {
            league.description = description;
        }
        if let Some(start_date) = update.start_date {
            league.start_date = start_date;
        }
        if let Some(end_date) = update.end_date {
            league.end_date = end_date;
        }
        if let Some(is_active) = update.is_active {
            league.is_active = is_active;
        }
        Ok(league)
    }

    pub fn delete_league(&mut self, id: Uuid) -> Result<()> {
        self.store.remove_league(id)?;
        info!(league = %id, "deleted league with all teams, fixtures and lineups");
        Ok(())
    }

    // ========================
    // Teams
    // ========================

    pub fn add_team(
        &mut self,
        league_id: Uuid,
        name: impl Into<String>,
        captain_id: Uuid,
    ) -> Result<Uuid> {
        let team = LeagueTeam::new(league_id, name, captain_id);
        let id = team.id;
        self.store.insert_team(team)?;
        Ok(id)
    }

    pub fn add_roster_player(&mut self, team_id: Uuid, player_id: Uuid) -> Result<()> {
        let team = self.store.team_mut(team_id)?;
        if !team.has_player(player_id) {
            team.roster.push(player_id);
        }
        Ok(())
    }

    pub fn remove_team(&mut self, team_id: Uuid) -> Result<()> {
        self.store.remove_team(team_id)?;
        Ok(())
    }

    // ========================
    // Point system
    // ========================

    /// Creates or replaces the point values for one slot. The write is
    /// validated against the priority ordering of every other slot of the
    /// same match type and rejected wholesale on violation. Existing
    /// results are never rescored by the registry itself; standings always
    /// read the configuration current at query time.
    pub fn upsert_point_system(
        &mut self,
        league_id: Uuid,
        match_type: MatchType,
        order: u32,
        values: PointValues,
    ) -> Result<Uuid> {
        let league = self.store.league_mut(league_id)?;
        let config = league.point_config.get_or_insert_with(Default::default);
        match config.upsert(match_type, order, values) {
            Ok(id) => {
                info!(league = %league_id, %match_type, order, "updated point system");
                Ok(id)
            }
            Err(err) => {
                warn!(league = %league_id, %match_type, order, %err, "rejected point system write");
                Err(err)
            }
        }
    }

    pub fn set_point_defaults(&mut self, league_id: Uuid, values: PointValues) -> Result<()> {
        let league = self.store.league_mut(league_id)?;
        league
            .point_config
            .get_or_insert_with(Default::default)
            .set_defaults(values);
        Ok(())
    }

    /// Removes a per-slot override; that slot falls back to league defaults.
    pub fn delete_point_system(&mut self, league_id: Uuid, entry_id: Uuid) -> Result<bool> {
        let league = self.store.league_mut(league_id)?;
        Ok(league
            .point_config
            .as_mut()
            .map(|config| config.remove_entry(entry_id))
            .unwrap_or(false))
    }

    // ========================
    // Fixtures and results
    // ========================

    pub fn create_team_match(
        &mut self,
        league_id: Uuid,
        home_team_id: Uuid,
        away_team_id: Uuid,
        match_date: DateTime<Utc>,
    ) -> Result<Uuid> {
        if home_team_id == away_team_id {
            return Err(LeagueError::InvalidParticipants(
                "a team cannot play itself".to_string(),
            ));
        }
        for team_id in [home_team_id, away_team_id] {
            let team = self.store.team(team_id)?;
            if team.league_id != league_id {
                return Err(LeagueError::TeamNotFound(team_id));
            }
        }
        let fixture = TeamMatch::new(league_id, home_team_id, away_team_id, match_date);
        let id = fixture.id;
        self.store.insert_fixture(fixture)?;
        Ok(id)
    }

    pub fn delete_team_match(&mut self, id: Uuid) -> Result<()> {
        self.store.remove_fixture(id)?;
        Ok(())
    }

    /// Marks a fixture finished with its overall team scores.
    pub fn complete_team_match(
        &mut self,
        id: Uuid,
        home_score: u32,
        away_score: u32,
    ) -> Result<()> {
        let fixture = self.store.fixture_mut(id)?;
        fixture.is_completed = true;
        fixture.home_score = Some(home_score);
        fixture.away_score = Some(away_score);
        Ok(())
    }

    pub fn create_singles_match(
        &mut self,
        team_match_id: Uuid,
        order: u32,
        player1_id: Uuid,
        player2_id: Uuid,
        match_date: DateTime<Utc>,
    ) -> Result<Uuid> {
        let m = SinglesMatch {
            id: Uuid::new_v4(),
            team_match_id,
            order,
            player1_id,
            player2_id,
            match_date,
            score: String::new(),
            winner: None,
            result_type: None,
        };
        let id = m.id;
        self.store.insert_singles(m)?;
        Ok(id)
    }

    #[allow(clippy::too_many_arguments)]
    pub fn create_doubles_match(
        &mut self,
        team_match_id: Uuid,
        order: u32,
        team1_player1_id: Uuid,
        team1_player2_id: Uuid,
        team2_player1_id: Uuid,
        team2_player2_id: Uuid,
        match_date: DateTime<Utc>,
    ) -> Result<Uuid> {
        let m = DoublesMatch {
            id: Uuid::new_v4(),
            team_match_id,
            order,
            team1_player1_id,
            team1_player2_id,
            team2_player1_id,
            team2_player2_id,
            match_date,
            score: String::new(),
            winner: None,
            result_type: None,
        };
        let id = m.id;
        self.store.insert_doubles(m)?;
        Ok(id)
    }

    /// Records the terminal fields of a singles match.
    ///
    /// The score string is saved as given even when it does not parse
    /// (results arrive from humans), but an unparseable score is logged and
    /// will count as zero games either way in standings.
    pub fn record_singles_result(
        &mut self,
        match_id: Uuid,
        winner: Option<Winner>,
        score: impl Into<String>,
        result_type: Option<ResultType>,
    ) -> Result<()> {
        let score = score.into();
        warn_on_unparseable(match_id, winner, &score);
        let m = self.store.singles_mut(match_id)?;
        m.winner = winner;
        m.score = score;
        m.result_type = result_type;
        Ok(())
    }

    pub fn record_doubles_result(
        &mut self,
        match_id: Uuid,
        winner: Option<Winner>,
        score: impl Into<String>,
        result_type: Option<ResultType>,
    ) -> Result<()> {
        let score = score.into();
        warn_on_unparseable(match_id, winner, &score);
        let m = self.store.doubles_mut(match_id)?;
        m.winner = winner;
        m.score = score;
        m.result_type = result_type;
        Ok(())
    }

    pub fn results_for_team(&self, league_id: Uuid, team_id: Uuid) -> Result<LeagueMatches> {
        self.store.results_for_team(league_id, team_id)
    }

    // ========================
    // Standings
    // ========================

    /// The ranked league table. Either a complete table or an error:
    /// misconfigured leagues and orphaned matches never produce partial or
    /// zeroed rows.
    pub fn standings(&self, league_id: Uuid) -> Result<Vec<StandingsRow>> {
        let league = self.store.league(league_id)?;
        let teams = self.store.teams_in_league(league_id);
        let fixtures = self.store.fixtures_in_league(league_id);
        let matches = self.store.league_matches(league_id)?;
        debug!(
            league = %league_id,
            teams = teams.len(),
            singles = matches.singles.len(),
            doubles = matches.doubles.len(),
            "computing standings"
        );
        compute_standings(league, &teams, &fixtures, &matches.singles, &matches.doubles)
    }

    // ========================
    // Lineups
    // ========================

    /// Saves a lineup as one whole aggregate (last full write wins) at the
    /// requested visibility. Slots are merged into the canonical shape
    /// first; a save with no players at all is rejected, as is one whose
    /// slots skip the sequential fill order. The fill rule holds here, not
    /// just in the editing client.
    pub fn create_or_update_lineup(
        &mut self,
        team_match_id: Uuid,
        team_id: Uuid,
        slots: &[LineupSlot],
        visibility: LineupVisibility,
    ) -> Result<Lineup> {
        self.store.fixture(team_match_id)?;
        self.store.team(team_id)?;

        let editor = LineupEditor::from_stored(slots);
        if !editor.has_any_slot_filled() {
            return Err(LeagueError::IncompleteLineup);
        }
        if let Some((slot_type, order)) = editor.first_locked_assignment() {
            warn!(team_match = %team_match_id, team = %team_id, %slot_type, order,
                "rejected lineup save with a locked slot filled");
            return Err(LeagueError::LineupSlotLocked { slot_type, order });
        }

        let now = Utc::now();
        let mut lineup = match self.store.lineup(team_match_id, team_id) {
            Ok(existing) => existing.clone(),
            Err(_) => Lineup::draft(team_match_id, team_id, now),
        };
        lineup.slots = editor.into_slots();
        lineup.set_visibility(visibility, now);
        self.store.upsert_lineup(lineup.clone());
        info!(team_match = %team_match_id, team = %team_id, ?visibility, "saved lineup");
        Ok(lineup)
    }

    /// Publishes an existing lineup at the requested visibility. Any target
    /// is allowed from any state (straight to ALL included); the empty-slot
    /// guard applies here as it does on save.
    pub fn publish_lineup(
        &mut self,
        team_match_id: Uuid,
        team_id: Uuid,
        visibility: LineupVisibility,
    ) -> Result<Lineup> {
        let now = Utc::now();
        let lineup = self.store.lineup_mut(team_match_id, team_id)?;
        if !lineup.has_any_slot_filled() {
            return Err(LeagueError::IncompleteLineup);
        }
        lineup.set_visibility(visibility, now);
        info!(team_match = %team_match_id, team = %team_id, ?visibility, "published lineup");
        Ok(lineup.clone())
    }

    pub fn lineup(&self, team_match_id: Uuid, team_id: Uuid) -> Result<&Lineup> {
        self.store.lineup(team_match_id, team_id)
    }

    /// An editor over the stored lineup, or a fresh empty one. Stored slots
    /// are merged into the canonical shape by `(type, order)`.
    pub fn lineup_editor(&self, team_match_id: Uuid, team_id: Uuid) -> LineupEditor {
        match self.store.lineup(team_match_id, team_id) {
            Ok(lineup) => LineupEditor::from_stored(&lineup.slots),
            Err(_) => LineupEditor::new(),
        }
    }
}

fn warn_on_unparseable(match_id: Uuid, winner: Option<Winner>, score: &str) {
    let decided = matches!(winner, Some(Winner::Home) | Some(Winner::Away));
    if decided && !score.is_empty() && parse_score_string(score).is_none() {
        warn!(%match_id, score, "saving unparseable score; it will count zero games");
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use crate::lineup_engine::SlotPosition;
    use crate::models::lineup::{RsvpPlayer, RsvpStatus};

    struct Setup {
        service: LeagueService,
        league_id: Uuid,
        home_id: Uuid,
        away_id: Uuid,
        fixture_id: Uuid,
    }

    fn setup() -> Setup {
        let mut service = LeagueService::new();
        let league_id =
            service.create_league("Spring League", None, Utc::now(), Utc::now());
        let home_id = service
            .add_team(league_id, "Aces", Uuid::new_v4())
            .unwrap();
        let away_id = service
            .add_team(league_id, "Breakers", Uuid::new_v4())
            .unwrap();
        let fixture_id = service
            .create_team_match(league_id, home_id, away_id, Utc::now())
            .unwrap();
        Setup {
            service,
            league_id,
            home_id,
            away_id,
            fixture_id,
        }
    }

    fn player(name: &str) -> RsvpPlayer {
        RsvpPlayer {
            id: Uuid::new_v4(),
            name: name.to_string(),
            status: RsvpStatus::Available,
        }
    }

    #[test]
    fn home_singles_win_rolls_up_into_standings() {
        // One first-singles home win at the default 3/0/1.
        let mut s = setup();
        let match_id = s
            .service
            .create_singles_match(s.fixture_id, 1, Uuid::new_v4(), Uuid::new_v4(), Utc::now())
            .unwrap();
        s.service
            .record_singles_result(
                match_id,
                Some(Winner::Home),
                "6-4 7-6",
                Some(ResultType::Completed),
            )
            .unwrap();

        let table = s.service.standings(s.league_id).unwrap();
        let home = table.iter().find(|r| r.team_id == s.home_id).unwrap();
        assert_eq!(home.matches_played, 1);
        assert_eq!(home.wins, 1);
        assert_eq!(home.points, 3);
        // Winner tops the table.
        assert_eq!(table[0].team_id, s.home_id);
    }

    #[test]
    fn draws_pay_both_sides() {
        let mut s = setup();
        let match_id = s
            .service
            .create_doubles_match(
                s.fixture_id,
                1,
                Uuid::new_v4(),
                Uuid::new_v4(),
                Uuid::new_v4(),
                Uuid::new_v4(),
                Utc::now(),
            )
            .unwrap();
        s.service
            .record_doubles_result(
                match_id,
                Some(Winner::Draw),
                "6-4 4-6",
                Some(ResultType::TimedMatch),
            )
            .unwrap();

        let table = s.service.standings(s.league_id).unwrap();
        for r in &table {
            assert_eq!(r.draws, 1);
            assert_eq!(r.points, 1);
        }
    }

    #[test]
    fn point_ordering_violations_are_rejected_at_the_service() {
        let mut s = setup();
        s.service
            .upsert_point_system(
                s.league_id,
                MatchType::Singles,
                1,
                PointValues::new(2, 0, 1),
            )
            .unwrap();
        let err = s
            .service
            .upsert_point_system(
                s.league_id,
                MatchType::Singles,
                2,
                PointValues::new(3, 0, 1),
            )
            .unwrap_err();
        assert!(matches!(err, LeagueError::InvalidPointOrdering { .. }));
    }

    #[test]
    fn deleting_an_override_falls_back_to_defaults() {
        let mut s = setup();
        let entry_id = s
            .service
            .upsert_point_system(
                s.league_id,
                MatchType::Singles,
                1,
                PointValues::new(5, 1, 2),
            )
            .unwrap();
        assert!(s.service.delete_point_system(s.league_id, entry_id).unwrap());

        let match_id = s
            .service
            .create_singles_match(s.fixture_id, 1, Uuid::new_v4(), Uuid::new_v4(), Utc::now())
            .unwrap();
        s.service
            .record_singles_result(match_id, Some(Winner::Home), "6-0 6-0", None)
            .unwrap();
        let table = s.service.standings(s.league_id).unwrap();
        assert_eq!(table[0].points, 3, "back on league defaults");
    }

    #[test]
    fn team_cannot_play_itself() {
        let mut s = setup();
        let err = s
            .service
            .create_team_match(s.league_id, s.home_id, s.home_id, Utc::now())
            .unwrap_err();
        assert!(matches!(err, LeagueError::InvalidParticipants(_)));
    }

    #[test]
    fn lenient_score_save_keeps_the_string() {
        let mut s = setup();
        let match_id = s
            .service
            .create_singles_match(s.fixture_id, 1, Uuid::new_v4(), Uuid::new_v4(), Utc::now())
            .unwrap();
        s.service
            .record_singles_result(match_id, Some(Winner::Away), "walkover", None)
            .unwrap();
        let results = s.service.results_for_team(s.league_id, s.away_id).unwrap();
        assert_eq!(results.singles[0].score, "walkover");
    }

    #[test]
    fn empty_lineup_cannot_be_saved_or_published() {
        let mut s = setup();
        let err = s
            .service
            .create_or_update_lineup(
                s.fixture_id,
                s.home_id,
                &[],
                LineupVisibility::Team,
            )
            .unwrap_err();
        assert!(matches!(err, LeagueError::IncompleteLineup));
        // Nothing was stored.
        assert!(s.service.lineup(s.fixture_id, s.home_id).is_err());
    }

    #[test]
    fn out_of_order_slot_saves_are_rejected() {
        // A client bypassing the editor posts a slot set whose only filled
        // slot is second singles. The save must not persist it.
        let mut s = setup();
        let mut rogue = LineupSlot::empty(MatchType::Singles, 2);
        rogue.player1 = Some(player("ann"));
        let err = s
            .service
            .create_or_update_lineup(
                s.fixture_id,
                s.home_id,
                &[rogue],
                LineupVisibility::Private,
            )
            .unwrap_err();
        assert!(matches!(
            err,
            LeagueError::LineupSlotLocked {
                slot_type: MatchType::Singles,
                order: 2,
            }
        ));
        assert!(s.service.lineup(s.fixture_id, s.home_id).is_err());
    }

    #[test]
    fn lineup_save_publish_and_stamp_flow() {
        let mut s = setup();
        let mut editor = s.service.lineup_editor(s.fixture_id, s.home_id);
        editor.assign_player(MatchType::Singles, 1, SlotPosition::Player1, player("ann"));

        // Draft save: private, no publish stamp.
        let draft = s
            .service
            .create_or_update_lineup(
                s.fixture_id,
                s.home_id,
                editor.slots(),
                LineupVisibility::Private,
            )
            .unwrap();
        assert_eq!(draft.published_at, None);

        // Straight to ALL is a legal transition.
        let published = s
            .service
            .publish_lineup(s.fixture_id, s.home_id, LineupVisibility::All)
            .unwrap();
        let stamp = published.published_at.unwrap();

        // Re-publishing does not move the stamp.
        let again = s
            .service
            .publish_lineup(s.fixture_id, s.home_id, LineupVisibility::Team)
            .unwrap();
        assert_eq!(again.published_at, Some(stamp));
    }

    #[test]
    fn lineup_saves_are_last_full_write_wins() {
        let mut s = setup();
        let mut first = s.service.lineup_editor(s.fixture_id, s.home_id);
        first.assign_player(MatchType::Singles, 1, SlotPosition::Player1, player("ann"));
        s.service
            .create_or_update_lineup(
                s.fixture_id,
                s.home_id,
                first.slots(),
                LineupVisibility::Private,
            )
            .unwrap();

        // A second captain writes a different full slot set; it replaces
        // the first wholesale.
        let mut second = LineupEditor::new();
        second.assign_player(MatchType::Singles, 1, SlotPosition::Player1, player("ben"));
        let saved = s
            .service
            .create_or_update_lineup(
                s.fixture_id,
                s.home_id,
                second.slots(),
                LineupVisibility::Private,
            )
            .unwrap();
        let singles1 = &saved.slots[0];
        assert_eq!(singles1.player1.as_ref().unwrap().name, "ben");
    }

    #[test]
    fn lineup_editor_round_trips_through_storage() {
        let mut s = setup();
        let mut editor = s.service.lineup_editor(s.fixture_id, s.home_id);
        editor.assign_player(MatchType::Doubles, 1, SlotPosition::Player1, player("ann"));
        editor.assign_player(MatchType::Doubles, 1, SlotPosition::Player2, player("ben"));
        editor.assign_player(MatchType::Singles, 1, SlotPosition::Player1, player("cy"));
        s.service
            .create_or_update_lineup(
                s.fixture_id,
                s.home_id,
                editor.slots(),
                LineupVisibility::Private,
            )
            .unwrap();

        let reloaded = s.service.lineup_editor(s.fixture_id, s.home_id);
        assert_eq!(reloaded.slots().len(), 8);
        assert!(reloaded.is_slot_enabled(MatchType::Doubles, 2));
        assert!(reloaded.is_slot_enabled(MatchType::Singles, 2));
    }

    #[test]
    fn update_league_touches_only_given_fields() {
        let mut s = setup();
        s.service
            .update_league(
                s.league_id,
                LeagueUpdate {
                    is_active: Some(false),
                    ..Default::default()
                },
            )
            .unwrap();
        let league = s.service.league(s.league_id).unwrap();
        assert!(!league.is_active);
        assert_eq!(league.name, "Spring League");
    }

    #[test]
    fn delete_league_cascades_through_the_service() {
        let mut s = setup();
        s.service.delete_league(s.league_id).unwrap();
        assert!(s.service.league(s.league_id).is_err());
        assert!(s.service.standings(s.league_id).is_err());
    }
}
