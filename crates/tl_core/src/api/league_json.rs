//! JSON entry points for the transport layer.
//!
//! String-in/string-out wrappers around [`LeagueService`], so a host can
//! bind them to whatever transport it runs (GraphQL resolvers, IPC, a test
//! harness) without touching the domain types. Every request carries a
//! `schema_version`; every error is flattened to a message string.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::models::lineup::{LineupSlot, LineupVisibility};
use crate::models::point_system::{MatchType, PointValues};
use crate::models::standings::StandingsRow;
use crate::service::LeagueService;

pub const API_SCHEMA_VERSION: u8 = 1;

fn check_schema(version: u8) -> Result<(), String> {
    if version != API_SCHEMA_VERSION {
        return Err(format!("Unsupported schema version: {version}"));
    }
    Ok(())
}

#[derive(Debug, Deserialize)]
pub struct StandingsRequest {
    pub schema_version: u8,
    pub league_id: Uuid,
}

#[derive(Debug, Serialize)]
pub struct StandingsResponse {
    pub schema_version: u8,
    pub league_id: Uuid,
    pub standings: Vec<StandingsRow>,
}

/// Ranked table for one league, or an error string, never a partial table.
pub fn standings_json(service: &LeagueService, request_json: &str) -> Result<String, String> {
    let request: StandingsRequest =
        serde_json::from_str(request_json).map_err(|e| format!("Invalid JSON request: {e}"))?;
    check_schema(request.schema_version)?;

    let standings = service
        .standings(request.league_id)
        .map_err(|e| e.to_string())?;
    let response = StandingsResponse {
        schema_version: API_SCHEMA_VERSION,
        league_id: request.league_id,
        standings,
    };
    serde_json::to_string(&response).map_err(|e| format!("Failed to serialize response: {e}"))
}

#[derive(Debug, Deserialize)]
pub struct UpsertPointSystemRequest {
    pub schema_version: u8,
    pub league_id: Uuid,
    pub match_type: MatchType,
    pub order: u32,
    pub win_points: u32,
    pub loss_points: u32,
    pub draw_points: u32,
}

#[derive(Debug, Serialize)]
pub struct UpsertPointSystemResponse {
    pub schema_version: u8,
    pub entry_id: Uuid,
}

pub fn upsert_point_system_json(
    service: &mut LeagueService,
    request_json: &str,
) -> Result<String, String> {
    let request: UpsertPointSystemRequest =
        serde_json::from_str(request_json).map_err(|e| format!("Invalid JSON request: {e}"))?;
    check_schema(request.schema_version)?;

    let entry_id = service
        .upsert_point_system(
            request.league_id,
            request.match_type,
            request.order,
            PointValues::new(request.win_points, request.loss_points, request.draw_points),
        )
        .map_err(|e| e.to_string())?;
    let response = UpsertPointSystemResponse {
        schema_version: API_SCHEMA_VERSION,
        entry_id,
    };
    serde_json::to_string(&response).map_err(|e| format!("Failed to serialize response: {e}"))
}

#[derive(Debug, Deserialize)]
pub struct SaveLineupRequest {
    pub schema_version: u8,
    pub team_match_id: Uuid,
    pub team_id: Uuid,
    pub slots: Vec<LineupSlot>,
    pub visibility: LineupVisibility,
}

#[derive(Debug, Serialize)]
pub struct LineupResponse {
    pub schema_version: u8,
    pub lineup: crate::models::lineup::Lineup,
}

/// Full-aggregate lineup save (last write wins), then returns the stored
/// lineup in its canonical slot shape.
pub fn create_or_update_lineup_json(
    service: &mut LeagueService,
    request_json: &str,
) -> Result<String, String> {
    let request: SaveLineupRequest =
        serde_json::from_str(request_json).map_err(|e| format!("Invalid JSON request: {e}"))?;
    check_schema(request.schema_version)?;

    let lineup = service
        .create_or_update_lineup(
            request.team_match_id,
            request.team_id,
            &request.slots,
            request.visibility,
        )
        .map_err(|e| e.to_string())?;
    let response = LineupResponse {
        schema_version: API_SCHEMA_VERSION,
        lineup,
    };
    serde_json::to_string(&response).map_err(|e| format!("Failed to serialize response: {e}"))
}

#[derive(Debug, Deserialize)]
pub struct PublishLineupRequest {
    pub schema_version: u8,
    pub team_match_id: Uuid,
    pub team_id: Uuid,
    pub visibility: LineupVisibility,
}

pub fn publish_lineup_json(
    service: &mut LeagueService,
    request_json: &str,
) -> Result<String, String> {
    let request: PublishLineupRequest =
        serde_json::from_str(request_json).map_err(|e| format!("Invalid JSON request: {e}"))?;
    check_schema(request.schema_version)?;

    let lineup = service
        .publish_lineup(request.team_match_id, request.team_id, request.visibility)
        .map_err(|e| e.to_string())?;
    let response = LineupResponse {
        schema_version: API_SCHEMA_VERSION,
        lineup,
    };
    serde_json::to_string(&response).map_err(|e| format!("Failed to serialize response: {e}"))
}
