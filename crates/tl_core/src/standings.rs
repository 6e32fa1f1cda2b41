//! League table aggregation.
//!
//! A pure read: point configuration plus the recorded individual matches in,
//! one ranked `StandingsRow` per registered team out. Nothing here mutates
//! state, so concurrent standings queries are trivially safe.

use std::collections::HashMap;

use uuid::Uuid;

use crate::error::{LeagueError, Result};
use crate::models::point_system::{MatchType, PointSystemConfig};
use crate::models::standings::StandingsRow;
use crate::models::team::{LeagueTeam, TeamLeague};
use crate::models::team_match::{DoublesMatch, SinglesMatch, TeamMatch, Winner};
use crate::score::games_tally;

/// Computes the ranked table for one league.
///
/// Every individual match with a recorded winner contributes points for its
/// `(match_type, order)` slot, a played-match tick for both teams, and its
/// parsed game counts. Matches without a winner contribute nothing at all.
/// Teams with no results still get an all-zero row.
///
/// Fails with [`LeagueError::OrphanedMatch`] when an individual match
/// references a fixture that does not exist, and with
/// [`LeagueError::MissingPointSystemConfiguration`] when the league has no
/// point configuration to score a slot with; a partial or silently
/// zero-scored table is worse than an error.
pub fn compute_standings(
    league: &TeamLeague,
    teams: &[LeagueTeam],
    fixtures: &[TeamMatch],
    singles: &[SinglesMatch],
    doubles: &[DoublesMatch],
) -> Result<Vec<StandingsRow>> {
    let fixture_by_id: HashMap<Uuid, &TeamMatch> =
        fixtures.iter().map(|f| (f.id, f)).collect();
    let mut rows: HashMap<Uuid, StandingsRow> = teams
        .iter()
        .map(|team| (team.id, StandingsRow::zeroed(team.id, team.name.clone())))
        .collect();

    for m in singles {
        let fixture = fixture_by_id.get(&m.team_match_id).copied().ok_or(
            LeagueError::OrphanedMatch {
                match_id: m.id,
                team_match_id: m.team_match_id,
            },
        )?;
        apply_match(
            league,
            &mut rows,
            fixture,
            MatchType::Singles,
            m.order,
            &m.score,
            m.winner,
        )?;
    }
    for m in doubles {
        let fixture = fixture_by_id.get(&m.team_match_id).copied().ok_or(
            LeagueError::OrphanedMatch {
                match_id: m.id,
                team_match_id: m.team_match_id,
            },
        )?;
        apply_match(
            league,
            &mut rows,
            fixture,
            MatchType::Doubles,
            m.order,
            &m.score,
            m.winner,
        )?;
    }

    let mut table: Vec<StandingsRow> = rows.into_values().collect();
    table.sort_by(|a, b| a.rank_cmp(b));
    Ok(table)
}

fn point_config<'a>(
    league: &'a TeamLeague,
    match_type: MatchType,
    order: u32,
) -> Result<&'a PointSystemConfig> {
    league
        .point_config
        .as_ref()
        .ok_or(LeagueError::MissingPointSystemConfiguration {
            league_id: league.id,
            match_type,
            order,
        })
}

fn apply_match(
    league: &TeamLeague,
    rows: &mut HashMap<Uuid, StandingsRow>,
    fixture: &TeamMatch,
    match_type: MatchType,
    order: u32,
    score: &str,
    winner: Option<Winner>,
) -> Result<()> {
    // Unresolved matches contribute nothing, not even matches_played.
    let Some(winner) = winner else {
        return Ok(());
    };
    let values = point_config(league, match_type, order)?.resolve(match_type, order);
    let (home_games, away_games) = games_tally(score);

    // Teams removed from the league no longer get a row; their side of an
    // old result simply has nowhere to land.
    if let Some(home) = rows.get_mut(&fixture.home_team_id) {
        home.matches_played += 1;
        home.games_won += home_games;
        home.games_lost += away_games;
        match winner {
            Winner::Home => {
                home.wins += 1;
                home.points += values.win_points;
            }
            Winner::Away => {
                home.losses += 1;
                home.points += values.loss_points;
            }
            Winner::Draw => {
                home.draws += 1;
                home.points += values.draw_points;
            }
        }
    }
    if let Some(away) = rows.get_mut(&fixture.away_team_id) {
        away.matches_played += 1;
        away.games_won += away_games;
        away.games_lost += home_games;
        match winner {
            Winner::Home => {
                away.losses += 1;
                away.points += values.loss_points;
            }
            Winner::Away => {
                away.wins += 1;
                away.points += values.win_points;
            }
            Winner::Draw => {
                away.draws += 1;
                away.points += values.draw_points;
            }
        }
    }
    Ok(())
}
