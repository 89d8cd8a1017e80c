// Display formatting for everything the orchestrator sends out: odds grids,
// prompts, notices, and the paginated summary. Pure string builders; the
// messaging layer decides how they reach the chat platform.

use crate::config::DraftConfig;
use crate::draft::state::{DraftMode, DraftState, Participant};

/// Participants per summary page.
const SUMMARY_CHUNK_SIZE: usize = 6;

// ---------------------------------------------------------------------------
// Odds grid
// ---------------------------------------------------------------------------

/// Render renormalized tier odds as a two-column grid, one icon per band.
pub fn format_odds_grid(odds: &[(u32, f64)]) -> String {
    if odds.is_empty() {
        return "⚠️ No valid tiers".to_string();
    }

    let cells: Vec<String> = odds
        .iter()
        .map(|(tier, pct)| {
            let icon = if *tier >= 240 {
                "🔥"
            } else if *tier <= 40 {
                "⚪"
            } else {
                "🔹"
            };
            format!("{icon} T{tier}: {pct:.1}%")
        })
        .collect();

    cells
        .chunks(2)
        .map(|pair| pair.join("   "))
        .collect::<Vec<_>>()
        .join("\n")
}

// ---------------------------------------------------------------------------
// Turn prompts and notices
// ---------------------------------------------------------------------------

pub fn roll_prompt(
    participant: &Participant,
    pick_number: u32,
    odds_grid: &str,
    timeout_secs: u64,
) -> String {
    format!(
        "🎲 Pick #{pick_number} • {}\nPress to roll! Auto-roll in {timeout_secs}s.\n\nOdds:\n{odds_grid}",
        participant.display_name
    )
}

pub fn rolling_banner(odds_grid: &str) -> String {
    format!("Rolling... 🎰\n\nOdds:\n{odds_grid}")
}

pub fn roll_timeout_banner() -> String {
    "⏰ Time expired - auto rolling...".to_string()
}

pub fn decision_prompt(
    participant: &Participant,
    pick_number: u32,
    round: u32,
    name: &str,
    tier: u32,
    points_left: u32,
    rerolls_left: u32,
    max_rerolls: u32,
    timeout_secs: u64,
) -> String {
    format!(
        "Pick #{pick_number} • {} (Round {round})\nRolled: {name} (Tier {tier})\nBudget: {points_left} pts left\nRe-rolls left: {rerolls_left}/{max_rerolls}\nDecide within {timeout_secs}s.",
        participant.display_name
    )
}

pub fn auto_accept_notice(
    participant: &Participant,
    pick_number: u32,
    name: &str,
    tier: u32,
    reason: &str,
    points_left: u32,
) -> String {
    format!(
        "Pick #{pick_number} • {}\nAuto-accepted: {name} (Tier {tier})\n{reason} | Budget: {points_left}",
        participant.display_name
    )
}

pub fn keep_notice(by: Option<&str>, name: &str) -> String {
    match by {
        Some(by) => format!("✅ {by} accepted {name}."),
        None => format!("⏰ Timeout: accepted {name}."),
    }
}

pub fn reroll_notice(by: &str, rerolls_left: u32) -> String {
    format!("🔄 {by} re-rolled! ({rerolls_left} left).")
}

pub fn no_candidates_notice() -> String {
    "⚠️ CRITICAL: no valid items to offer.".to_string()
}

// ---------------------------------------------------------------------------
// Fake-out sequence
// ---------------------------------------------------------------------------

pub fn fake_reveal(participant: &Participant, name: &str, tier: u32) -> String {
    format!(
        "✨ CRITICAL HIT! {} pulled the legendary: {name} (Tier {tier})!",
        participant.display_name
    )
}

pub fn fake_spoiler(name: &str, tier: u32) -> String {
    format!("||✨ CRITICAL HIT! You pulled the legendary: {name} (Tier {tier})||\n\n...Wait... something feels off...")
}

pub fn fake_out_line() -> String {
    "✋ Fake Out!".to_string()
}

pub fn fake_transition(participant: &Participant) -> String {
    format!(
        "😅 Just kidding {}, your actual pull is...",
        participant.display_name
    )
}

// ---------------------------------------------------------------------------
// Round and session banners
// ---------------------------------------------------------------------------

pub fn round_banner(round: u32) -> String {
    format!("🔁 End of round! Snake order for Round {round}...")
}

pub fn draft_started_banner(state: &DraftState) -> String {
    let names: Vec<&str> = state
        .order
        .iter()
        .map(|p| p.display_name.as_str())
        .collect();
    format!("🏆 Draft started!\nOrder: {}", names.join(", "))
}

pub fn final_banner() -> String {
    "🏁 Draft complete!".to_string()
}

pub fn mode_switch_notice(mode: DraftMode) -> String {
    format!("⚡ Mode switched to: {}", mode.label())
}

pub fn completion_dm(participant: &Participant) -> String {
    format!(
        "🏁 The draft is over, {}. Thanks for playing - check the channel for the final summary.",
        participant.display_name
    )
}

pub fn on_deck_dm(participant: &Participant) -> String {
    format!(
        "🔔 Draft alert: get ready, {}! You are up in exactly 3 turns.",
        participant.display_name
    )
}

// ---------------------------------------------------------------------------
// Failure notices
// ---------------------------------------------------------------------------

pub fn delivery_fatal_notice() -> String {
    "🚨 FATAL: message delivery keeps failing. The draft has paused.".to_string()
}

pub fn generic_failure_notice() -> String {
    "🚨 An internal error occurred. The draft loop has paused; check the logs.".to_string()
}

// ---------------------------------------------------------------------------
// Summary
// ---------------------------------------------------------------------------

/// Render the cumulative summary, paginated at `SUMMARY_CHUNK_SIZE`
/// participants per page. Participants are deduplicated from the (snake
/// reversed) turn order.
pub fn summary_pages(state: &DraftState, config: &DraftConfig) -> Vec<String> {
    let unique = state.unique_participants();
    if unique.is_empty() {
        return vec!["📊 No data - the draft hasn't started.".to_string()];
    }

    let total_pages = unique.len().div_ceil(SUMMARY_CHUNK_SIZE);

    unique
        .chunks(SUMMARY_CHUNK_SIZE)
        .enumerate()
        .map(|(page_idx, chunk)| {
            let mut page = format!("📊 Draft Summary (Page {}/{})\n", page_idx + 1, total_pages);

            for participant in chunk {
                let roster = state.roster(participant.id);
                let spent = state.points_spent(participant.id);
                let rerolls_left = config
                    .max_rerolls
                    .saturating_sub(state.rerolls_used(participant.id));

                let items = if roster.is_empty() {
                    "(no picks yet)".to_string()
                } else {
                    roster
                        .iter()
                        .map(|slot| format!("• {} ({})", slot.name, slot.tier))
                        .collect::<Vec<_>>()
                        .join("\n")
                };

                page.push_str(&format!(
                    "\n👤 {}\n{items}\n💰 Points: {spent}/{} (left: {})\n🎲 Re-rolls: {rerolls_left} left\n",
                    participant.display_name,
                    config.max_points,
                    config.max_points.saturating_sub(spent),
                ));
            }

            page
        })
        .collect()
}

// ---------------------------------------------------------------------------
// Unit tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use crate::draft::state::Participant;
    use std::collections::BTreeMap;
    use std::time::Duration;

    fn test_config() -> DraftConfig {
        DraftConfig {
            total_picks: 10,
            max_points: 1200,
            max_rerolls: 10,
            min_tier_cost: 20,
            roll_timeout: Duration::from_secs(60),
            decision_timeout: Duration::from_secs(60),
            fake_out_chance: 0.13,
            summary_checkpoint_round: 3,
            catalog_path: String::new(),
            tier_probs: BTreeMap::new(),
        }
    }

    #[test]
    fn odds_grid_empty_shows_warning() {
        assert!(format_odds_grid(&[]).contains("No valid tiers"));
    }

    #[test]
    fn odds_grid_pairs_entries_per_row() {
        let grid = format_odds_grid(&[(300, 0.5), (240, 1.5), (100, 12.0)]);
        let rows: Vec<&str> = grid.lines().collect();
        assert_eq!(rows.len(), 2);
        assert!(rows[0].contains("T300") && rows[0].contains("T240"));
        assert!(rows[1].contains("T100"));
    }

    #[test]
    fn odds_grid_icons_follow_tier_bands() {
        let grid = format_odds_grid(&[(240, 1.0), (100, 1.0), (40, 98.0)]);
        assert!(grid.contains("🔥 T240"));
        assert!(grid.contains("🔹 T100"));
        assert!(grid.contains("⚪ T40"));
    }

    #[test]
    fn summary_paginates_at_six_per_page() {
        let participants: Vec<Participant> = (1..=8)
            .map(|i| Participant::real(i, format!("P{i}")))
            .collect();
        let state = DraftState::new(participants);

        let pages = summary_pages(&state, &test_config());
        assert_eq!(pages.len(), 2);
        assert!(pages[0].contains("Page 1/2"));
        assert!(pages[0].contains("P6"));
        assert!(!pages[0].contains("P7"));
        assert!(pages[1].contains("P7"));
        assert!(pages[1].contains("P8"));
    }

    #[test]
    fn summary_shows_roster_points_and_rerolls() {
        let mut state = DraftState::new(vec![Participant::real(1, "Ana")]);
        state.record_pick(1, "Gyarados", 220);
        state.rerolls.insert(1, 3);

        let pages = summary_pages(&state, &test_config());
        assert_eq!(pages.len(), 1);
        assert!(pages[0].contains("• Gyarados (220)"));
        assert!(pages[0].contains("Points: 220/1200 (left: 980)"));
        assert!(pages[0].contains("Re-rolls: 7 left"));
    }

    #[test]
    fn summary_empty_roster_placeholder() {
        let state = DraftState::new(vec![Participant::real(1, "Ana")]);
        let pages = summary_pages(&state, &test_config());
        assert!(pages[0].contains("(no picks yet)"));
    }

    #[test]
    fn summary_deduplicates_order() {
        let mut participants = vec![Participant::real(1, "Ana"), Participant::real(2, "Ben")];
        participants.push(Participant::real(1, "Ana"));
        let state = DraftState::new(participants);

        let pages = summary_pages(&state, &test_config());
        assert_eq!(pages[0].matches("👤 Ana").count(), 1);
    }
}
