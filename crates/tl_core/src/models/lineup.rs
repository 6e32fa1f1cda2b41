//! Lineups: a team's player-to-slot assignment for one fixture.
//!
//! The slot shape is fixed by convention at 3 singles + 5 doubles. Stored
//! lineups can be sparse (only the filled slots were persisted), so loading
//! always merges into the canonical shape by `(type, order)`.

use chrono::{DateTime, Utc};
use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::models::point_system::MatchType;

pub const SINGLES_SLOT_COUNT: u32 = 3;
pub const DOUBLES_SLOT_COUNT: u32 = 5;

/// Canonical slot shape: singles 1..=3 then doubles 1..=5.
pub static LINEUP_SHAPE: Lazy<Vec<(MatchType, u32)>> = Lazy::new(|| {
    (1..=SINGLES_SLOT_COUNT)
        .map(|order| (MatchType::Singles, order))
        .chain((1..=DOUBLES_SLOT_COUNT).map(|order| (MatchType::Doubles, order)))
        .collect()
});

/// A player's availability answer for the fixture's event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum RsvpStatus {
    Available,
    Maybe,
    OnlyIfNeeded,
    NotAvailable,
}

/// Candidate player as supplied by the RSVP subsystem.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RsvpPlayer {
    pub id: Uuid,
    pub name: String,
    pub status: RsvpStatus,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LineupSlot {
    /// 1..=N within the slot's type.
    pub order: u32,
    pub slot_type: MatchType,
    pub player1: Option<RsvpPlayer>,
    /// Doubles only; always `None` on singles slots.
    pub player2: Option<RsvpPlayer>,
}

impl LineupSlot {
    pub fn empty(slot_type: MatchType, order: u32) -> Self {
        Self {
            order,
            slot_type,
            player1: None,
            player2: None,
        }
    }

    /// A singles slot is filled by its one player; a doubles slot needs both.
    pub fn is_filled(&self) -> bool {
        match self.slot_type {
            MatchType::Singles => self.player1.is_some(),
            MatchType::Doubles => self.player1.is_some() && self.player2.is_some(),
        }
    }

    pub fn holds_player(&self, player_id: Uuid) -> bool {
        self.player1.as_ref().is_some_and(|p| p.id == player_id)
            || self.player2.as_ref().is_some_and(|p| p.id == player_id)
    }
}

/// Who can see a lineup.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum LineupVisibility {
    Private,
    Team,
    All,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Lineup {
    pub id: Uuid,
    pub team_match_id: Uuid,
    pub team_id: Uuid,
    pub slots: Vec<LineupSlot>,
    pub visibility: LineupVisibility,
    pub published_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Lineup {
    /// A fresh private draft with the canonical empty slot shape.
    pub fn draft(team_match_id: Uuid, team_id: Uuid, now: DateTime<Utc>) -> Self {
        Self {
            id: Uuid::new_v4(),
            team_match_id,
            team_id,
            slots: LINEUP_SHAPE
                .iter()
                .map(|&(slot_type, order)| LineupSlot::empty(slot_type, order))
                .collect(),
            visibility: LineupVisibility::Private,
            published_at: None,
            created_at: now,
            updated_at: now,
        }
    }

    pub fn has_any_slot_filled(&self) -> bool {
        self.slots.iter().any(|slot| slot.player1.is_some())
    }

    /// Sets visibility to whatever the caller asked for. `published_at` is
    /// stamped the first time visibility leaves `Private` and never reset by
    /// later saves (idempotent set).
    pub fn set_visibility(&mut self, visibility: LineupVisibility, now: DateTime<Utc>) {
        self.visibility = visibility;
        if visibility != LineupVisibility::Private && self.published_at.is_none() {
            self.published_at = Some(now);
        }
        self.updated_at = now;
    }
}
