//! Slot assignment engine for lineup editing.
//!
//! Slots are filled in priority order: slot N of a type unlocks only once
//! slot N-1 of that type is fully assigned. Invalid edits (locked slot,
//! duplicate player, bad position) are silent no-ops rather than errors;
//! the editing flow is drag-and-drop shaped and simply ignores drops that
//! make no sense. Eligibility is always derived from the current slots,
//! never cached, so removing a player can retroactively lock later slots.

use tracing::debug;
use uuid::Uuid;

use crate::models::lineup::{LineupSlot, RsvpPlayer, RsvpStatus, LINEUP_SHAPE};
use crate::models::point_system::MatchType;

/// Which player position inside a slot an edit targets.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SlotPosition {
    Player1,
    Player2,
}

/// In-memory editor over a lineup's slot set.
///
/// The editor always carries the full canonical shape; construct it with
/// [`LineupEditor::from_stored`] when loading sparse persisted slots.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LineupEditor {
    slots: Vec<LineupSlot>,
}

impl Default for LineupEditor {
    fn default() -> Self {
        Self::new()
    }
}

impl LineupEditor {
    /// An all-empty editor in the canonical 3 singles + 5 doubles shape.
    pub fn new() -> Self {
        Self {
            slots: LINEUP_SHAPE
                .iter()
                .map(|&(slot_type, order)| LineupSlot::empty(slot_type, order))
                .collect(),
        }
    }

    /// Merges stored slots into the canonical shape by `(type, order)` key.
    ///
    /// Structural slots with no stored counterpart stay empty; stored slots
    /// outside the shape are dropped. The result always has the full shape:
    /// sparse storage must never truncate the editor.
    pub fn from_stored(stored: &[LineupSlot]) -> Self {
        let slots = LINEUP_SHAPE
            .iter()
            .map(|&(slot_type, order)| {
                stored
                    .iter()
                    .find(|s| s.slot_type == slot_type && s.order == order)
                    .cloned()
                    .unwrap_or_else(|| LineupSlot::empty(slot_type, order))
            })
            .collect();
        Self { slots }
    }

    pub fn slots(&self) -> &[LineupSlot] {
        &self.slots
    }

    pub fn into_slots(self) -> Vec<LineupSlot> {
        self.slots
    }

    fn slot(&self, slot_type: MatchType, order: u32) -> Option<&LineupSlot> {
        self.slots
            .iter()
            .find(|s| s.slot_type == slot_type && s.order == order)
    }

    /// A slot is enabled at order 1, or once the previous slot of its type
    /// is fully assigned (singles: player1; doubles: both players).
    pub fn is_slot_enabled(&self, slot_type: MatchType, order: u32) -> bool {
        if self.slot(slot_type, order).is_none() {
            return false;
        }
        order == 1
            || self
                .slot(slot_type, order - 1)
                .is_some_and(|prev| prev.is_filled())
    }

    pub fn is_player_assigned(&self, player_id: Uuid) -> bool {
        self.slots.iter().any(|s| s.holds_player(player_id))
    }

    pub fn has_any_slot_filled(&self) -> bool {
        self.slots.iter().any(|s| s.player1.is_some())
    }

    /// First slot that holds a player while still locked under the
    /// sequential-fill rule, if any. Edits made through the editor can never
    /// produce one; a raw slot set from a client can.
    pub fn first_locked_assignment(&self) -> Option<(MatchType, u32)> {
        self.slots
            .iter()
            .find(|s| {
                (s.player1.is_some() || s.player2.is_some())
                    && !self.is_slot_enabled(s.slot_type, s.order)
            })
            .map(|s| (s.slot_type, s.order))
    }

    /// Assigns `player` to the given slot position. Returns whether the
    /// state changed; locked slots, duplicate players, and player-2 drops on
    /// singles slots are all ignored.
    pub fn assign_player(
        &mut self,
        slot_type: MatchType,
        order: u32,
        position: SlotPosition,
        player: RsvpPlayer,
    ) -> bool {
        if !self.is_slot_enabled(slot_type, order) {
            debug!(%slot_type, order, "ignoring assignment to locked slot");
            return false;
        }
        if self.is_player_assigned(player.id) {
            debug!(player = %player.id, "ignoring duplicate assignment");
            return false;
        }
        if slot_type == MatchType::Singles && position == SlotPosition::Player2 {
            return false;
        }
        let slot = self
            .slots
            .iter_mut()
            .find(|s| s.slot_type == slot_type && s.order == order);
        match (slot, position) {
            (Some(slot), SlotPosition::Player1) => {
                slot.player1 = Some(player);
                true
            }
            (Some(slot), SlotPosition::Player2) => {
                slot.player2 = Some(player);
                true
            }
            (None, _) => false,
        }
    }

    /// Clears a player position unconditionally. Later slots that depended
    /// on this one become locked the next time eligibility is asked.
    pub fn remove_player(&mut self, slot_type: MatchType, order: u32, position: SlotPosition) -> bool {
        let Some(slot) = self
            .slots
            .iter_mut()
            .find(|s| s.slot_type == slot_type && s.order == order)
        else {
            return false;
        };
        let target = match position {
            SlotPosition::Player1 => &mut slot.player1,
            SlotPosition::Player2 => &mut slot.player2,
        };
        target.take().is_some()
    }
}

/// Candidate pool for the editor: everyone who did not decline.
pub fn eligible_candidates(rsvps: &[RsvpPlayer]) -> Vec<RsvpPlayer> {
    rsvps
        .iter()
        .filter(|p| p.status != RsvpStatus::NotAvailable)
        .cloned()
        .collect()
}
