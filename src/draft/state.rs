// Draft session state: turn order, rosters, budgets, reroll ledger.
//
// A single DraftState instance covers one draft session. It is owned by the
// turn orchestrator for the session's lifetime and mutated only from there
// (and from the allocation engine's record helpers the orchestrator calls),
// so no locking is needed: the one-turn-at-a-time invariant holds by
// construction.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// Participants
// ---------------------------------------------------------------------------

/// A drafter: a real user with a notification channel, or a simulated
/// stand-in that never receives direct messages.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Participant {
    /// Stable numeric id.
    pub id: u64,
    /// Display name used in all prompts and summaries.
    pub display_name: String,
    /// Simulated participants have no notification capability.
    pub simulated: bool,
}

impl Participant {
    pub fn real(id: u64, display_name: impl Into<String>) -> Self {
        Participant {
            id,
            display_name: display_name.into(),
            simulated: false,
        }
    }

    pub fn simulated(id: u64, display_name: impl Into<String>) -> Self {
        Participant {
            id,
            display_name: display_name.into(),
            simulated: true,
        }
    }
}

// ---------------------------------------------------------------------------
// Modes
// ---------------------------------------------------------------------------

/// How turns resolve: human confirmation, automatic with public notices, or
/// automatic with logs only.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DraftMode {
    Interactive,
    AutoPublic,
    AutoSilent,
}

impl DraftMode {
    /// Cycle order used by the admin mode toggle.
    pub fn next(self) -> Self {
        match self {
            DraftMode::Interactive => DraftMode::AutoPublic,
            DraftMode::AutoPublic => DraftMode::AutoSilent,
            DraftMode::AutoSilent => DraftMode::Interactive,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            DraftMode::Interactive => "INTERACTIVE",
            DraftMode::AutoPublic => "AUTO PUBLIC",
            DraftMode::AutoSilent => "AUTO SILENT",
        }
    }
}

// ---------------------------------------------------------------------------
// DraftState
// ---------------------------------------------------------------------------

/// An item a participant has received: name plus the tier it cost.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RosterSlot {
    pub name: String,
    pub tier: u32,
}

/// The complete state of one draft session.
#[derive(Debug, Clone)]
pub struct DraftState {
    /// Whether a session is currently running.
    pub active: bool,
    /// Round counter, 1..=total_picks.
    pub round: u32,
    /// Turn order. Reversed at every round boundary (snake draft).
    pub order: Vec<Participant>,
    /// Index into `order` for whose turn it is.
    pub current_index: usize,
    /// Participant id -> received items, in pick order.
    pub rosters: HashMap<u64, Vec<RosterSlot>>,
    /// Participant id -> rerolls consumed.
    pub rerolls: HashMap<u64, u32>,
    /// Participant id -> total tier cost spent.
    pub points: HashMap<u64, u32>,
    /// Items rejected this turn only; excluded from the candidate pool until
    /// the turn advances so a reroll can't land on a just-declined item.
    pub burned: Vec<String>,
    /// Current execution mode.
    pub mode: DraftMode,
}

impl DraftState {
    /// Initialize a fresh session for the given participants. Every field is
    /// reset; any previous session's data is discarded.
    pub fn new(participants: Vec<Participant>) -> Self {
        let rosters = participants.iter().map(|p| (p.id, Vec::new())).collect();
        let rerolls = participants.iter().map(|p| (p.id, 0)).collect();
        let points = participants.iter().map(|p| (p.id, 0)).collect();

        DraftState {
            active: true,
            round: 1,
            order: participants,
            current_index: 0,
            rosters,
            rerolls,
            points,
            burned: Vec::new(),
            mode: DraftMode::Interactive,
        }
    }

    /// The participant whose turn it is, if the index is in range.
    pub fn current_participant(&self) -> Option<&Participant> {
        self.order.get(self.current_index)
    }

    /// Roster for a participant (empty slice when unknown).
    pub fn roster(&self, id: u64) -> &[RosterSlot] {
        self.rosters.get(&id).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Points spent so far by a participant.
    pub fn points_spent(&self, id: u64) -> u32 {
        self.points.get(&id).copied().unwrap_or(0)
    }

    /// Rerolls consumed so far by a participant.
    pub fn rerolls_used(&self, id: u64) -> u32 {
        self.rerolls.get(&id).copied().unwrap_or(0)
    }

    /// Record an accepted pick: append to the roster and charge the points.
    pub fn record_pick(&mut self, id: u64, name: impl Into<String>, tier: u32) {
        self.rosters
            .entry(id)
            .or_default()
            .push(RosterSlot {
                name: name.into(),
                tier,
            });
        *self.points.entry(id).or_insert(0) += tier;
    }

    /// Consume one reroll and burn the declined item for the rest of the turn.
    /// Returns the updated reroll count.
    pub fn record_reroll(&mut self, id: u64, declined: impl Into<String>) -> u32 {
        self.burned.push(declined.into());
        let used = self.rerolls.entry(id).or_insert(0);
        *used += 1;
        *used
    }

    /// True if any participant anywhere in the draft holds this item.
    pub fn is_taken(&self, name: &str) -> bool {
        self.rosters
            .values()
            .any(|roster| roster.iter().any(|slot| slot.name == name))
    }

    /// Advance to the next round: bump the counter, reverse the order (snake
    /// draft), reset the turn pointer.
    pub fn start_next_round(&mut self) {
        self.round += 1;
        self.order.reverse();
        self.current_index = 0;
    }

    /// Participants deduplicated by id, preserving order. The turn order may
    /// list a participant only once, but summaries iterate defensively.
    pub fn unique_participants(&self) -> Vec<&Participant> {
        let mut seen = Vec::new();
        let mut unique = Vec::new();
        for p in &self.order {
            if !seen.contains(&p.id) {
                seen.push(p.id);
                unique.push(p);
            }
        }
        unique
    }
}

// ---------------------------------------------------------------------------
// Unit tests
// ---------------------------------------------------------------------------
