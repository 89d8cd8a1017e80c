// Allocation engine: legal candidate/tier computation and the weighted draw.
//
// Everything here is a pure, synchronous function of catalog + config + draft
// state (+ an RNG stream for the draws). No I/O, no waiting. The orchestrator
// decides what to do with failures; nothing is retried in here.

use rand::distributions::WeightedIndex;
use rand::prelude::*;
use thiserror::Error;

use crate::catalog::{Catalog, Item};
use crate::config::DraftConfig;
use crate::draft::state::DraftState;

// ---------------------------------------------------------------------------
// Constants
// ---------------------------------------------------------------------------

/// Premium items at or above this tier count against the stricter "high" cap.
pub const PREMIUM_HIGH_TIER: u32 = 240;

/// Pick number at which the pity rule can force a premium-only pool.
pub const PITY_PICK: u32 = 6;

/// Tiers subject to the high-tier exclusivity rule.
pub const EXCLUSIVE_TIERS: [u32; 3] = [300, 260, 240];

/// A true roll at or below this tier can trigger the fake-out bit.
pub const FAKE_OUT_MAX_TIER: u32 = 60;

// ---------------------------------------------------------------------------
// Error type
// ---------------------------------------------------------------------------

#[derive(Debug, Error, PartialEq, Eq)]
pub enum RollError {
    /// The caller passed an empty tier set.
    #[error("no valid tiers to roll from")]
    NoValidTiers,

    /// Every tier in the set has zero base weight.
    #[error("tier weights sum to zero")]
    ZeroSum,

    /// The drawn tier has no candidates. Structurally impossible when the
    /// tiers were derived from the candidate pool, but handled defensively.
    #[error("no candidates left in the drawn tier")]
    EmptyTierPool,
}

// ---------------------------------------------------------------------------
// Premium ownership status
// ---------------------------------------------------------------------------

/// What premium items a participant may still receive.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PremiumStatus {
    AllAllowed,
    /// One low-band premium owned: one more low-band is allowed, no high-band.
    LowOnly,
    NoPremiums,
}

/// Count a participant's premium items: (total, high-band, low-band), split
/// at `PREMIUM_HIGH_TIER`.
pub fn premium_counts(catalog: &Catalog, state: &DraftState, id: u64) -> (u32, u32, u32) {
    let mut total = 0;
    let mut high = 0;
    let mut low = 0;
    for slot in state.roster(id) {
        let is_premium = catalog.get(&slot.name).is_some_and(|item| item.premium);
        if is_premium {
            total += 1;
            if slot.tier >= PREMIUM_HIGH_TIER {
                high += 1;
            } else {
                low += 1;
            }
        }
    }
    (total, high, low)
}

pub fn premium_status(catalog: &Catalog, state: &DraftState, id: u64) -> PremiumStatus {
    let (_, high, low) = premium_counts(catalog, state, id);
    if high >= 1 || low >= 2 {
        PremiumStatus::NoPremiums
    } else if low == 1 {
        PremiumStatus::LowOnly
    } else {
        PremiumStatus::AllAllowed
    }
}

// ---------------------------------------------------------------------------
// Budget helpers
// ---------------------------------------------------------------------------

/// The most a participant may spend on this pick: remaining budget minus the
/// reserve held back so every later mandatory pick stays affordable.
///
/// Signed because an over-spent or late-draft participant can have a reserve
/// larger than their remaining budget.
pub fn max_affordable(config: &DraftConfig, state: &DraftState, id: u64, pick_number: u32) -> i64 {
    let remaining = config.max_points as i64 - state.points_spent(id) as i64;
    let picks_after_this = config.total_picks.saturating_sub(pick_number) as i64;
    remaining - picks_after_this * config.min_tier_cost as i64
}

// ---------------------------------------------------------------------------
// Candidate pipeline
// ---------------------------------------------------------------------------

/// Compute the subset of the catalog legally offerable to this participant
/// right now.
///
/// The filter stages run in a fixed order; later stages depend on seeing the
/// already-narrowed pool (the pity check in particular must look at the
/// post-exclusion candidates).
pub fn valid_candidates<'a>(
    catalog: &'a Catalog,
    config: &DraftConfig,
    state: &DraftState,
    id: u64,
    pick_number: u32,
    is_reroll: bool,
) -> Vec<&'a Item> {
    // Stage 1: global uniqueness plus this-turn rejects.
    // Stage 2: family protection against the participant's own roster.
    let owned_roots: Vec<&str> = state
        .roster(id)
        .iter()
        .filter_map(|slot| catalog.root_of(&slot.name))
        .collect();

    let mut candidates: Vec<&Item> = catalog
        .items()
        .iter()
        .filter(|item| !state.is_taken(&item.name))
        .filter(|item| !state.burned.iter().any(|b| b == &item.name))
        .filter(|item| !owned_roots.contains(&item.root_family.as_str()))
        .collect();

    // Stage 3: pity rule. Only forces the premium pool when the participant
    // can actually afford one (the affordability-checked revision).
    let (premium_total, _, _) = premium_counts(catalog, state, id);
    if pick_number == PITY_PICK && premium_total == 0 && !is_reroll {
        let budget = max_affordable(config, state, id, pick_number);
        let any_affordable = candidates
            .iter()
            .any(|item| item.premium && item.tier as i64 <= budget);
        if any_affordable {
            candidates.retain(|item| item.premium);
            return candidates;
        }
    }

    // Stage 4: category cap.
    match premium_status(catalog, state, id) {
        PremiumStatus::NoPremiums => candidates.retain(|item| !item.premium),
        PremiumStatus::LowOnly => {
            candidates.retain(|item| !item.premium || item.tier < PREMIUM_HIGH_TIER)
        }
        PremiumStatus::AllAllowed => {}
    }

    candidates
}

/// Derive the set of tiers actually offerable, in descending order.
///
/// Starts from the tiers present in the valid candidate pool, then applies
/// high-tier exclusivity and the reserve-cash affordability check. An empty
/// result is a fatal condition the orchestrator must surface.
pub fn valid_tiers(
    catalog: &Catalog,
    config: &DraftConfig,
    state: &DraftState,
    id: u64,
    pick_number: u32,
    is_reroll: bool,
) -> Vec<u32> {
    let candidates = valid_candidates(catalog, config, state, id, pick_number, is_reroll);

    let mut allowed: Vec<u32> = config
        .tiers_descending()
        .into_iter()
        .filter(|t| candidates.iter().any(|item| item.tier == *t))
        .collect();

    // High-tier exclusivity, keyed off the tiers already held.
    let roster = state.roster(id);
    let count_of = |tier: u32| roster.iter().filter(|slot| slot.tier == tier).count();
    let count_300 = count_of(300);
    let count_260 = count_of(260);
    let count_240 = count_of(240);

    if count_300 > 0 || count_260 + count_240 >= 2 {
        allowed.retain(|t| !EXCLUSIVE_TIERS.contains(t));
    } else if count_260 > 0 {
        allowed.retain(|t| *t != 300 && *t != 260);
    } else if count_240 > 0 {
        allowed.retain(|t| *t != 300);
    }

    // Reserve-cash affordability.
    let budget = max_affordable(config, state, id, pick_number);
    allowed.retain(|t| *t as i64 <= budget);

    allowed
}

/// Displayed odds for each valid tier: base weights restricted to the valid
/// set and renormalized to 100. Descending tier order. Pure display helper.
pub fn tier_percentages(
    catalog: &Catalog,
    config: &DraftConfig,
    state: &DraftState,
    id: u64,
    pick_number: u32,
    is_reroll: bool,
) -> Vec<(u32, f64)> {
    let tiers = valid_tiers(catalog, config, state, id, pick_number, is_reroll);
    let sum: f64 = tiers.iter().map(|t| config.base_weight(*t)).sum();
    if sum == 0.0 {
        return Vec::new();
    }
    tiers
        .into_iter()
        .map(|t| (t, config.base_weight(t) / sum * 100.0))
        .collect()
}

// ---------------------------------------------------------------------------
// Weighted draw
// ---------------------------------------------------------------------------

/// Two-stage weighted draw: pick a tier by base weight among `tiers`, then
/// pick uniformly among the valid candidates of that tier.
pub fn roll(
    catalog: &Catalog,
    config: &DraftConfig,
    state: &DraftState,
    tiers: &[u32],
    id: u64,
    pick_number: u32,
    is_reroll: bool,
    rng: &mut impl Rng,
) -> Result<(String, u32), RollError> {
    if tiers.is_empty() {
        return Err(RollError::NoValidTiers);
    }

    let weights: Vec<f64> = tiers.iter().map(|t| config.base_weight(*t)).collect();
    if weights.iter().sum::<f64>() == 0.0 {
        return Err(RollError::ZeroSum);
    }

    let dist = WeightedIndex::new(&weights).map_err(|_| RollError::ZeroSum)?;
    let selected_tier = tiers[dist.sample(rng)];

    let pool: Vec<&Item> = valid_candidates(catalog, config, state, id, pick_number, is_reroll)
        .into_iter()
        .filter(|item| item.tier == selected_tier)
        .collect();

    let picked = pool.choose(rng).ok_or(RollError::EmptyTierPool)?;
    Ok((picked.name.clone(), picked.tier))
}

/// Pick a misleading "reveal" candidate from the top two tier bands.
///
/// Prefers the participant's own valid high-tier candidates; falls back to
/// any globally-unpicked item in those bands, ignoring personal restrictions,
/// so the bit can still fire when the participant's pool is exhausted.
/// `None` means no candidate exists anywhere and the caller must skip the bit.
pub fn fake_candidate(
    catalog: &Catalog,
    config: &DraftConfig,
    state: &DraftState,
    id: u64,
    pick_number: u32,
    is_reroll: bool,
    rng: &mut impl Rng,
) -> Option<(String, u32)> {
    let bands: Vec<u32> = config.tiers_descending().into_iter().take(2).collect();

    let personal: Vec<&Item> = valid_candidates(catalog, config, state, id, pick_number, is_reroll)
        .into_iter()
        .filter(|item| bands.contains(&item.tier))
        .collect();

    if let Some(item) = personal.choose(rng) {
        return Some((item.name.clone(), item.tier));
    }

    let global: Vec<&Item> = catalog
        .items()
        .iter()
        .filter(|item| bands.contains(&item.tier) && !state.is_taken(&item.name))
        .collect();

    global.choose(rng).map(|item| (item.name.clone(), item.tier))
}

// ---------------------------------------------------------------------------
// Unit tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use crate::draft::state::Participant;
    use rand::rngs::StdRng;
    use rand::SeedableRng;
    use std::collections::BTreeMap;
    use std::time::Duration;

    fn test_config() -> DraftConfig {
        let tier_probs: BTreeMap<u32, f64> = [
            (300, 0.5),
            (260, 1.0),
            (240, 1.5),
            (220, 3.0),
            (200, 7.5),
            (180, 10.0),
            (160, 12.25),
            (140, 15.0),
            (120, 15.0),
            (100, 12.25),
            (80, 10.0),
            (60, 7.5),
            (40, 3.0),
            (20, 1.5),
        ]
        .into_iter()
        .collect();

        DraftConfig {
            total_picks: 10,
            max_points: 1200,
            max_rerolls: 10,
            min_tier_cost: 20,
            roll_timeout: Duration::from_secs(60),
            decision_timeout: Duration::from_secs(60),
            fake_out_chance: 0.13,
            summary_checkpoint_round: 3,
            catalog_path: "data/catalog.csv".into(),
            tier_probs,
        }
    }

    fn test_catalog() -> Catalog {
        Catalog::from_rows(
            [
                ("Arceon", false, 300),
                ("Drakuza", false, 260),
                ("Mega Ferroclaw", true, 260),
                ("Ferroclaw", false, 180),
                ("Mega Tidewyrm", true, 240),
                ("Tidewyrm", false, 160),
                ("Mega Emberlark X", true, 220),
                ("Mega Emberlark Y", true, 200),
                ("Emberlark", false, 140),
                ("Galeon", false, 220),
                ("Bramblit", false, 120),
                ("Puddlim", false, 100),
                ("Moffin", false, 80),
                ("Sprocket", false, 60),
                ("Twigby", false, 40),
                ("Dustmite", false, 20),
            ]
            .into_iter()
            .map(|(n, p, t)| (n.to_string(), p, t))
            .collect(),
        )
        .unwrap()
    }

    fn two_player_state() -> DraftState {
        DraftState::new(vec![Participant::real(1, "Ana"), Participant::real(2, "Ben")])
    }

    fn rng() -> StdRng {
        StdRng::seed_from_u64(42)
    }

    #[test]
    fn candidates_exclude_taken_and_burned() {
        let catalog = test_catalog();
        let config = test_config();
        let mut state = two_player_state();

        state.record_pick(2, "Dustmite", 20);
        state.burned.push("Twigby".into());

        let names: Vec<&str> = valid_candidates(&catalog, &config, &state, 1, 1, false)
            .iter()
            .map(|i| i.name.as_str())
            .collect();

        assert!(!names.contains(&"Dustmite"));
        assert!(!names.contains(&"Twigby"));
        assert!(names.contains(&"Sprocket"));
    }

    #[test]
    fn candidates_exclude_own_family_both_directions() {
        let catalog = test_catalog();
        let config = test_config();

        // Owning the base blocks the premium variants...
        let mut state = two_player_state();
        state.record_pick(1, "Emberlark", 140);
        let names: Vec<&str> = valid_candidates(&catalog, &config, &state, 1, 2, false)
            .iter()
            .map(|i| i.name.as_str())
            .collect();
        assert!(!names.contains(&"Mega Emberlark X"));
        assert!(!names.contains(&"Mega Emberlark Y"));

        // ...and owning a premium variant blocks the base.
        let mut state = two_player_state();
        state.record_pick(1, "Mega Emberlark X", 220);
        let names: Vec<&str> = valid_candidates(&catalog, &config, &state, 1, 2, false)
            .iter()
            .map(|i| i.name.as_str())
            .collect();
        assert!(!names.contains(&"Emberlark"));
        assert!(!names.contains(&"Mega Emberlark Y"));
    }

    #[test]
    fn family_of_another_participant_is_not_blocked() {
        let catalog = test_catalog();
        let config = test_config();
        let mut state = two_player_state();
        state.record_pick(2, "Emberlark", 140);

        let names: Vec<&str> = valid_candidates(&catalog, &config, &state, 1, 1, false)
            .iter()
            .map(|i| i.name.as_str())
            .collect();
        // The specific item is taken globally, but its family is still open
        // to other participants.
        assert!(!names.contains(&"Emberlark"));
        assert!(names.contains(&"Mega Emberlark X"));
    }

    #[test]
    fn pity_rule_forces_premium_pool_at_pick_six() {
        let catalog = test_catalog();
        let config = test_config();
        let state = two_player_state();

        let candidates = valid_candidates(&catalog, &config, &state, 1, PITY_PICK, false);
        assert!(!candidates.is_empty());
        assert!(candidates.iter().all(|i| i.premium));
    }

    #[test]
    fn pity_rule_skipped_on_reroll() {
        let catalog = test_catalog();
        let config = test_config();
        let state = two_player_state();

        let candidates = valid_candidates(&catalog, &config, &state, 1, PITY_PICK, true);
        assert!(candidates.iter().any(|i| !i.premium));
    }

    #[test]
    fn pity_rule_skipped_when_premium_already_owned() {
        let catalog = test_catalog();
        let config = test_config();
        let mut state = two_player_state();
        state.record_pick(1, "Mega Emberlark Y", 200);

        let candidates = valid_candidates(&catalog, &config, &state, 1, PITY_PICK, false);
        assert!(candidates.iter().any(|i| !i.premium));
    }

    #[test]
    fn pity_rule_skipped_when_too_poor() {
        let catalog = test_catalog();
        let config = test_config();
        let mut state = two_player_state();

        // Spend down to where no premium tier clears the reserve check:
        // remaining = 1200 - 1000 = 200, reserve = (10-6)*20 = 80, so the
        // max affordable tier is 120 and the cheapest premium costs 200.
        state.points.insert(1, 1000);

        let candidates = valid_candidates(&catalog, &config, &state, 1, PITY_PICK, false);
        assert!(candidates.iter().any(|i| !i.premium));
    }

    #[test]
    fn category_cap_blocks_all_premiums_after_high_band_premium() {
        let catalog = test_catalog();
        let config = test_config();
        let mut state = two_player_state();
        state.record_pick(1, "Mega Tidewyrm", 240);

        let candidates = valid_candidates(&catalog, &config, &state, 1, 2, false);
        assert!(candidates.iter().all(|i| !i.premium));
    }

    #[test]
    fn category_cap_allows_one_more_low_band_premium() {
        let catalog = test_catalog();
        let config = test_config();
        let mut state = two_player_state();
        state.record_pick(1, "Mega Emberlark Y", 200);

        let names: Vec<&str> = valid_candidates(&catalog, &config, &state, 1, 2, false)
            .iter()
            .filter(|i| i.premium)
            .map(|i| i.name.as_str())
            .collect();
        // Low-band premiums stay available; high-band premiums do not.
        assert!(names.contains(&"Mega Emberlark X"));
        assert!(!names.contains(&"Mega Tidewyrm"));
        assert!(!names.contains(&"Mega Ferroclaw"));
    }

    #[test]
    fn category_cap_blocks_premiums_after_two_low_band() {
        let catalog = test_catalog();
        let config = test_config();
        let mut state = two_player_state();
        state.record_pick(1, "Mega Emberlark Y", 200);
        state.record_pick(1, "Mega Emberlark X", 220);

        // Two low-band premiums owned: status flips to NoPremiums.
        assert_eq!(premium_status(&catalog, &state, 1), PremiumStatus::NoPremiums);
        let candidates = valid_candidates(&catalog, &config, &state, 1, 3, false);
        assert!(candidates.iter().all(|i| !i.premium));
    }

    #[test]
    fn tier_300_owner_loses_all_exclusive_tiers() {
        let catalog = test_catalog();
        let config = test_config();
        let mut state = two_player_state();
        state.record_pick(1, "Arceon", 300);

        let tiers = valid_tiers(&catalog, &config, &state, 1, 2, false);
        for t in EXCLUSIVE_TIERS {
            assert!(!tiers.contains(&t), "tier {t} should be excluded");
        }
        assert!(tiers.contains(&220));
    }

    #[test]
    fn tier_260_owner_loses_300_and_260() {
        let catalog = test_catalog();
        let config = test_config();
        let mut state = two_player_state();
        state.record_pick(1, "Drakuza", 260);

        let tiers = valid_tiers(&catalog, &config, &state, 1, 2, false);
        assert!(!tiers.contains(&300));
        assert!(!tiers.contains(&260));
        assert!(tiers.contains(&240));
    }

    #[test]
    fn tier_240_owner_loses_only_300() {
        let catalog = test_catalog();
        let config = test_config();
        let mut state = two_player_state();
        state.record_pick(1, "Mega Tidewyrm", 240);

        let tiers = valid_tiers(&catalog, &config, &state, 1, 2, false);
        assert!(!tiers.contains(&300));
        assert!(tiers.contains(&260));
    }

    #[test]
    fn two_of_260_240_band_lose_all_exclusive_tiers() {
        let catalog = test_catalog();
        let config = test_config();
        let mut state = two_player_state();
        state.record_pick(1, "Drakuza", 260);
        state.record_pick(1, "Mega Tidewyrm", 240);

        let tiers = valid_tiers(&catalog, &config, &state, 1, 3, false);
        for t in EXCLUSIVE_TIERS {
            assert!(!tiers.contains(&t), "tier {t} should be excluded");
        }
    }

    #[test]
    fn reserve_check_caps_affordable_tiers() {
        let catalog = test_catalog();
        let config = test_config();
        let mut state = two_player_state();

        // Spent 1000 of 1200 with picks 3..10 still due after this one:
        // reserve = 7 * 20 = 140, so max affordable is 200 - 140 = 60.
        state.points.insert(1, 1000);
        let tiers = valid_tiers(&catalog, &config, &state, 1, 3, false);
        assert!(!tiers.is_empty());
        assert!(tiers.iter().all(|t| *t <= 60), "got {tiers:?}");
    }

    #[test]
    fn tier_percentages_renormalize_to_100() {
        let catalog = test_catalog();
        let config = test_config();
        let mut state = two_player_state();
        state.record_pick(1, "Arceon", 300);

        let odds = tier_percentages(&catalog, &config, &state, 1, 2, false);
        assert!(!odds.is_empty());
        let sum: f64 = odds.iter().map(|(_, pct)| pct).sum();
        assert!((sum - 100.0).abs() < 1e-9, "sum was {sum}");
        // Descending tier order, with the exclusive tiers gone.
        assert!(odds.windows(2).all(|w| w[0].0 > w[1].0));
        assert!(odds.iter().all(|(t, _)| !EXCLUSIVE_TIERS.contains(t)));
    }

    #[test]
    fn roll_empty_tiers_is_no_valid_tiers() {
        let catalog = test_catalog();
        let config = test_config();
        let state = two_player_state();
        let err = roll(&catalog, &config, &state, &[], 1, 1, false, &mut rng()).unwrap_err();
        assert_eq!(err, RollError::NoValidTiers);
    }

    #[test]
    fn roll_zero_weight_tiers_is_zero_sum() {
        let catalog = test_catalog();
        let config = test_config();
        let state = two_player_state();
        // Tier 999 is not in the probability table, so its weight is zero.
        let err = roll(&catalog, &config, &state, &[999], 1, 1, false, &mut rng()).unwrap_err();
        assert_eq!(err, RollError::ZeroSum);
    }

    #[test]
    fn roll_stale_tier_is_empty_tier_pool() {
        let catalog = test_catalog();
        let config = test_config();
        let mut state = two_player_state();
        // Tier 300 has exactly one item; once taken, a stale tier list that
        // still names 300 must fail the defensive pool check.
        state.record_pick(2, "Arceon", 300);
        let err = roll(&catalog, &config, &state, &[300], 1, 1, false, &mut rng()).unwrap_err();
        assert_eq!(err, RollError::EmptyTierPool);
    }

    #[test]
    fn roll_returns_item_from_a_valid_tier() {
        let catalog = test_catalog();
        let config = test_config();
        let state = two_player_state();
        let mut rng = rng();

        for _ in 0..50 {
            let tiers = valid_tiers(&catalog, &config, &state, 1, 1, false);
            let (name, tier) =
                roll(&catalog, &config, &state, &tiers, 1, 1, false, &mut rng).unwrap();
            assert!(tiers.contains(&tier));
            assert_eq!(catalog.get(&name).unwrap().tier, tier);
        }
    }

    #[test]
    fn roll_respects_single_affordable_tier() {
        // The worked scenario: 2 picks, cap 100, tiers {80, 20} at 50% each.
        let catalog = Catalog::from_rows(vec![
            ("Big".to_string(), false, 80),
            ("Small".to_string(), false, 20),
            ("Tiny".to_string(), false, 20),
        ])
        .unwrap();
        let config = DraftConfig {
            total_picks: 2,
            max_points: 100,
            max_rerolls: 10,
            min_tier_cost: 20,
            roll_timeout: Duration::from_secs(60),
            decision_timeout: Duration::from_secs(60),
            fake_out_chance: 0.0,
            summary_checkpoint_round: 3,
            catalog_path: String::new(),
            tier_probs: [(80, 50.0), (20, 50.0)].into_iter().collect(),
        };
        let mut state = two_player_state();
        let mut rng = rng();

        // Pick 1: reserve = 1 * 20, max affordable = 80, both tiers valid.
        let tiers = valid_tiers(&catalog, &config, &state, 1, 1, false);
        assert_eq!(tiers, vec![80, 20]);

        state.record_pick(1, "Big", 80);

        // Pick 2: remaining = 20, reserve = 0, only tier 20 fits.
        let tiers = valid_tiers(&catalog, &config, &state, 1, 2, false);
        assert_eq!(tiers, vec![20]);
        let (name, tier) = roll(&catalog, &config, &state, &tiers, 1, 2, false, &mut rng).unwrap();
        assert_eq!(tier, 20);
        assert!(name == "Small" || name == "Tiny");
    }

    #[test]
    fn fake_candidate_prefers_personal_pool() {
        let catalog = test_catalog();
        let config = test_config();
        let state = two_player_state();
        let mut rng = rng();

        let (name, tier) =
            fake_candidate(&catalog, &config, &state, 1, 1, false, &mut rng).unwrap();
        assert!(tier == 300 || tier == 260);
        assert!(catalog.get(&name).is_some());
    }

    #[test]
    fn fake_candidate_falls_back_to_global_pool() {
        let catalog = test_catalog();
        let config = test_config();
        let mut state = two_player_state();
        let mut rng = rng();

        // Ana owns Arceon and Ferroclaw, so exclusivity plus family protection
        // empty her personal top-band pool; the global fallback still finds
        // the unpicked premium variants.
        state.record_pick(1, "Arceon", 300);
        state.record_pick(1, "Ferroclaw", 180);
        state.record_pick(2, "Drakuza", 260);

        let (name, tier) =
            fake_candidate(&catalog, &config, &state, 1, 3, false, &mut rng).unwrap();
        assert_eq!(name, "Mega Ferroclaw");
        assert_eq!(tier, 260);
    }

    #[test]
    fn fake_candidate_none_when_top_bands_exhausted() {
        let catalog = test_catalog();
        let config = test_config();
        let mut state = two_player_state();
        let mut rng = rng();

        state.record_pick(1, "Arceon", 300);
        state.record_pick(1, "Drakuza", 260);
        state.record_pick(2, "Mega Ferroclaw", 260);

        assert!(fake_candidate(&catalog, &config, &state, 1, 3, false, &mut rng).is_none());
    }
}
