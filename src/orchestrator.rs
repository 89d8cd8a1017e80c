// Turn orchestrator: the control loop that advances the draft between
// participants and rounds.
//
// One logical task drives the whole session: `run` loops over `run_turn`, so
// at most one turn is ever in flight and DraftState has a single writer by
// construction. Participant-facing waits and pacing delays are the only
// suspension points, and the cancellation token is re-checked after every one
// of them. Admin commands (mode toggle, summary, cancel) arrive over a
// channel drained at turn boundaries.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use thiserror::Error;
use tokio::sync::mpsc;
use tokio::time::sleep;
use tracing::{debug, error, info, warn};

use crate::catalog::Catalog;
use crate::config::DraftConfig;
use crate::draft::engine::{self, FAKE_OUT_MAX_TIER};
use crate::draft::state::{DraftMode, DraftState, Participant};
use crate::messaging::{Decision, MessageId, Messenger, RollResponse, SendError};
use crate::views;

// ---------------------------------------------------------------------------
// Constants
// ---------------------------------------------------------------------------

/// How many times a turn is re-attempted after transient delivery failures
/// before the loop halts.
pub const DELIVERY_RETRY_BUDGET: u32 = 3;

/// Fixed back-off between turn retry attempts.
pub const RETRY_BACKOFF: Duration = Duration::from_secs(5);

/// Pacing between turns, and after a round announcement.
const TURN_PACING: Duration = Duration::from_secs(1);

/// Pacing between silent-mode turns. Keeps the loop cooperative without
/// slowing a simulated draft down.
const SILENT_PACING: Duration = Duration::from_millis(10);

/// Extra pacing after a public auto-acceptance, for readability.
const AUTO_PUBLIC_PACING: Duration = Duration::from_millis(500);

/// Pacing between completion DMs, to respect outbound rate limits.
const COMPLETION_DM_PACING: Duration = Duration::from_millis(500);

/// The fake-out beat timings: golden reveal, spoiler hold, punchline, and
/// the hand-off back to the real result.
const FAKE_REVEAL_HOLD: Duration = Duration::from_secs(7);
const FAKE_SPOILER_HOLD: Duration = Duration::from_secs(3);
const FAKE_LINE_HOLD: Duration = Duration::from_secs(2);
const FAKE_TRANSITION_HOLD: Duration = Duration::from_secs(1);

/// How far ahead the on-deck notification looks.
const ON_DECK_LOOKAHEAD: usize = 3;

// ---------------------------------------------------------------------------
// Cancellation and admin surface
// ---------------------------------------------------------------------------

/// Explicit cancellation signal, checked after every suspension point.
#[derive(Debug, Clone, Default)]
pub struct CancelToken(Arc<AtomicBool>);

impl CancelToken {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cancel(&self) {
        self.0.store(true, Ordering::SeqCst);
    }

    pub fn is_cancelled(&self) -> bool {
        self.0.load(Ordering::SeqCst)
    }
}

/// Administrative actions. Authorization happens in the command layer before
/// anything reaches this channel.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AdminCommand {
    ToggleMode,
    Summary,
    Cancel,
}

/// Handle given to the administrative command surface. Cloneable; all methods
/// are non-blocking.
#[derive(Debug, Clone)]
pub struct SessionHandle {
    tx: mpsc::UnboundedSender<AdminCommand>,
    cancel: CancelToken,
}

impl SessionHandle {
    /// Cycle Interactive -> AutoPublic -> AutoSilent. Applied at the next
    /// turn boundary.
    pub fn toggle_mode(&self) {
        let _ = self.tx.send(AdminCommand::ToggleMode);
    }

    /// Ask the orchestrator to post the cumulative summary.
    pub fn request_summary(&self) {
        let _ = self.tx.send(AdminCommand::Summary);
    }

    /// Cancel the session. Trips the token so any pending wait aborts at its
    /// next resumption, and queues the state transition.
    pub fn cancel(&self) {
        self.cancel.cancel();
        let _ = self.tx.send(AdminCommand::Cancel);
    }
}

// ---------------------------------------------------------------------------
// Error type and outcomes
// ---------------------------------------------------------------------------

#[derive(Debug, Error)]
pub enum TurnError {
    /// Transient delivery failure; the whole turn is retried.
    #[error("message delivery failed: {0}")]
    Delivery(SendError),

    /// Anything else. Halts the loop, no retry.
    #[error(transparent)]
    Unexpected(#[from] anyhow::Error),
}

/// How a single `run_turn` invocation resolved.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum TurnOutcome {
    Continue,
    Complete,
    Cancelled,
}

// ---------------------------------------------------------------------------
// Orchestrator
// ---------------------------------------------------------------------------

pub struct Orchestrator {
    config: DraftConfig,
    catalog: Catalog,
    messenger: Arc<dyn Messenger>,
    rng: StdRng,
    cancel: CancelToken,
    commands: mpsc::UnboundedReceiver<AdminCommand>,
}

impl Orchestrator {
    pub fn new(
        config: DraftConfig,
        catalog: Catalog,
        messenger: Arc<dyn Messenger>,
    ) -> (Self, SessionHandle) {
        Self::with_rng(config, catalog, messenger, StdRng::from_entropy())
    }

    /// Construct with a caller-provided RNG (seeded in tests for
    /// reproducible draws).
    pub fn with_rng(
        config: DraftConfig,
        catalog: Catalog,
        messenger: Arc<dyn Messenger>,
        rng: StdRng,
    ) -> (Self, SessionHandle) {
        let (tx, rx) = mpsc::unbounded_channel();
        let cancel = CancelToken::new();
        let handle = SessionHandle {
            tx,
            cancel: cancel.clone(),
        };
        let orchestrator = Orchestrator {
            config,
            catalog,
            messenger,
            rng,
            cancel,
            commands: rx,
        };
        (orchestrator, handle)
    }

    /// Drive the session to completion, cancellation, or a fatal halt.
    ///
    /// Transient delivery failures retry the entire current turn after a
    /// fixed back-off, up to `DELIVERY_RETRY_BUDGET` attempts; the budget
    /// resets whenever a turn completes. Exhausting it, or hitting any other
    /// error, halts the loop: the session stays technically active and needs
    /// an admin cancel (or restart) to recover.
    pub async fn run(&mut self, state: &mut DraftState) -> anyhow::Result<()> {
        if state.mode != DraftMode::AutoSilent {
            let _ = self.messenger.send(&views::draft_started_banner(state)).await;
        } else {
            debug!("draft started (silent)");
        }
        info!(
            "Session started: {} participants, {} picks each, mode {}",
            state.order.len(),
            self.config.total_picks,
            state.mode.label()
        );

        let mut retries_left = DELIVERY_RETRY_BUDGET;

        loop {
            if self.cancelled(state) {
                state.active = false;
                info!("Session cancelled, turn chain stopped");
                break;
            }

            match self.run_turn(state).await {
                Ok(TurnOutcome::Continue) => {
                    retries_left = DELIVERY_RETRY_BUDGET;
                }
                Ok(TurnOutcome::Complete) => {
                    info!("Draft complete, loop exiting");
                    break;
                }
                Ok(TurnOutcome::Cancelled) => {
                    state.active = false;
                    info!("Session cancelled mid-turn, loop exiting");
                    break;
                }
                Err(TurnError::Delivery(e)) if retries_left > 0 => {
                    retries_left -= 1;
                    warn!(
                        "Delivery failure, resuming turn in {:?} ({} retries left): {}",
                        RETRY_BACKOFF, retries_left, e
                    );
                    sleep(RETRY_BACKOFF).await;
                }
                Err(TurnError::Delivery(e)) => {
                    error!("Max delivery retries reached, draft loop halted: {}", e);
                    let _ = self.messenger.send(&views::delivery_fatal_notice()).await;
                    break;
                }
                Err(TurnError::Unexpected(e)) => {
                    error!("Unexpected error halted the draft loop: {:#}", e);
                    let _ = self.messenger.send(&views::generic_failure_notice()).await;
                    break;
                }
            }
        }

        Ok(())
    }

    // -----------------------------------------------------------------------
    // One turn
    // -----------------------------------------------------------------------

    async fn run_turn(&mut self, state: &mut DraftState) -> Result<TurnOutcome, TurnError> {
        self.drain_admin_commands(state).await?;
        if self.cancelled(state) {
            return Ok(TurnOutcome::Cancelled);
        }

        // Round boundary.
        if state.current_index >= state.order.len() {
            if state.round >= self.config.total_picks {
                return self.complete_draft(state).await;
            }

            state.start_next_round();
            if state.mode == DraftMode::AutoSilent {
                debug!("--- starting round {} (silent) ---", state.round);
            } else {
                info!("--- starting round {} ---", state.round);
                self.send(&views::round_banner(state.round)).await?;
                if state.round >= self.config.summary_checkpoint_round {
                    for page in views::summary_pages(state, &self.config) {
                        self.send(&page).await?;
                    }
                }
                sleep(TURN_PACING).await;
                if self.cancelled(state) {
                    return Ok(TurnOutcome::Cancelled);
                }
            }
        }

        let participant = match state.current_participant() {
            Some(p) => p.clone(),
            None => return Ok(TurnOutcome::Continue),
        };
        let pick_number = state.roster(participant.id).len() as u32 + 1;

        // Defensive skip for a participant that is somehow already full.
        if pick_number > self.config.total_picks {
            warn!(
                "{} already has a full roster, skipping their turn",
                participant.display_name
            );
            state.current_index += 1;
            return Ok(TurnOutcome::Continue);
        }

        state.burned.clear();

        info!(
            "[turn start] round {}, pick #{} for {}",
            state.round, pick_number, participant.display_name
        );

        if state.mode == DraftMode::Interactive {
            self.notify_on_deck(state).await;
        }

        let rerolls_left = self
            .config
            .max_rerolls
            .saturating_sub(state.rerolls_used(participant.id));

        match state.mode {
            DraftMode::AutoSilent => {
                self.run_silent_turn(state, &participant, pick_number);
                state.current_index += 1;
                sleep(SILENT_PACING).await;
            }
            DraftMode::AutoPublic => {
                self.run_auto_turn(state, &participant, pick_number, "⚡ Auto-mode")
                    .await?;
                state.current_index += 1;
                sleep(AUTO_PUBLIC_PACING).await;
                sleep(TURN_PACING).await;
            }
            DraftMode::Interactive if rerolls_left == 0 => {
                // No choice left to offer: same path as public auto.
                self.run_auto_turn(state, &participant, pick_number, "🔒 0 re-rolls left")
                    .await?;
                state.current_index += 1;
                sleep(TURN_PACING).await;
            }
            DraftMode::Interactive => {
                match self
                    .run_interactive_turn(state, &participant, pick_number)
                    .await?
                {
                    TurnOutcome::Cancelled => return Ok(TurnOutcome::Cancelled),
                    _ => {}
                }
                state.current_index += 1;
                sleep(TURN_PACING).await;
            }
        }

        if self.cancelled(state) {
            return Ok(TurnOutcome::Cancelled);
        }
        Ok(TurnOutcome::Continue)
    }

    // -----------------------------------------------------------------------
    // Mode paths
    // -----------------------------------------------------------------------

    /// Silent auto path: roll, record, log. No messaging at all.
    fn run_silent_turn(&mut self, state: &mut DraftState, participant: &Participant, pick: u32) {
        let tiers =
            engine::valid_tiers(&self.catalog, &self.config, state, participant.id, pick, false);
        match engine::roll(
            &self.catalog,
            &self.config,
            state,
            &tiers,
            participant.id,
            pick,
            false,
            &mut self.rng,
        ) {
            Ok((name, tier)) => {
                state.record_pick(participant.id, &name, tier);
                let left = self
                    .config
                    .max_points
                    .saturating_sub(state.points_spent(participant.id));
                info!(
                    "[R{}] pick #{} {}: {} (T{}) - left: {}",
                    state.round, pick, participant.display_name, name, tier, left
                );
            }
            Err(e) => {
                error!(
                    "[silent] no valid item for {}: {}",
                    participant.display_name, e
                );
            }
        }
    }

    /// Public auto path (also the forced path when rerolls are exhausted):
    /// roll, record, announce.
    async fn run_auto_turn(
        &mut self,
        state: &mut DraftState,
        participant: &Participant,
        pick: u32,
        reason: &str,
    ) -> Result<(), TurnError> {
        let tiers =
            engine::valid_tiers(&self.catalog, &self.config, state, participant.id, pick, false);
        match engine::roll(
            &self.catalog,
            &self.config,
            state,
            &tiers,
            participant.id,
            pick,
            false,
            &mut self.rng,
        ) {
            Ok((name, tier)) => {
                // Announce before recording: a failed delivery leaves the
                // turn unrecorded, so the retry re-runs it from scratch.
                let left = self
                    .config
                    .max_points
                    .saturating_sub(state.points_spent(participant.id) + tier);
                self.send(&views::auto_accept_notice(
                    participant,
                    pick,
                    &name,
                    tier,
                    reason,
                    left,
                ))
                .await?;
                state.record_pick(participant.id, &name, tier);
                info!(
                    "[auto] assigned {} (T{}) to {}",
                    name, tier, participant.display_name
                );
            }
            Err(e) => {
                // Allocation exhaustion aborts this turn only; the draft
                // moves on to the next participant.
                error!(
                    "[auto] no valid item for {}: {}",
                    participant.display_name, e
                );
                self.send(&views::no_candidates_notice()).await?;
            }
        }
        Ok(())
    }

    /// Interactive path: time-boxed roll confirmation, then the keep/reroll
    /// decision loop.
    async fn run_interactive_turn(
        &mut self,
        state: &mut DraftState,
        participant: &Participant,
        pick: u32,
    ) -> Result<TurnOutcome, TurnError> {
        let odds = engine::tier_percentages(
            &self.catalog,
            &self.config,
            state,
            participant.id,
            pick,
            false,
        );
        let grid = views::format_odds_grid(&odds);

        let prompt = views::roll_prompt(
            participant,
            pick,
            &grid,
            self.config.roll_timeout.as_secs(),
        );
        let response = self
            .messenger
            .prompt_roll(participant, &prompt, self.config.roll_timeout)
            .await
            .map_err(Self::delivery)?;
        if self.cancelled(state) {
            return Ok(TurnOutcome::Cancelled);
        }

        match response {
            RollResponse::TimedOut => {
                info!(
                    "Timeout on roll phase for {}, auto-rolling",
                    participant.display_name
                );
                self.send(&views::roll_timeout_banner()).await?;
            }
            RollResponse::Confirmed => {
                info!("{} confirmed the roll", participant.display_name);
                self.send(&views::rolling_banner(&grid)).await?;
            }
        }

        // Decision loop: roll, maybe fake out, then keep or reroll.
        let mut is_reroll = false;
        loop {
            let rerolls_left = self
                .config
                .max_rerolls
                .saturating_sub(state.rerolls_used(participant.id));
            let points_left = self
                .config
                .max_points
                .saturating_sub(state.points_spent(participant.id));

            let tiers = engine::valid_tiers(
                &self.catalog,
                &self.config,
                state,
                participant.id,
                pick,
                is_reroll,
            );
            let (name, tier) = match engine::roll(
                &self.catalog,
                &self.config,
                state,
                &tiers,
                participant.id,
                pick,
                is_reroll,
                &mut self.rng,
            ) {
                Ok(rolled) => rolled,
                Err(e) => {
                    error!(
                        "Decision phase: pool empty for {}: {}",
                        participant.display_name, e
                    );
                    self.send(&views::no_candidates_notice()).await?;
                    break;
                }
            };
            info!(
                "RNG generated {} (T{}) for {}",
                name, tier, participant.display_name
            );

            // Fake-out bit: low-tier true roll plus an independent chance.
            if tier <= FAKE_OUT_MAX_TIER && self.rng.gen::<f64>() < self.config.fake_out_chance {
                if let Some(outcome) = self
                    .play_fake_out(state, participant, pick, is_reroll, &name, tier)
                    .await?
                {
                    return Ok(outcome);
                }
            }

            // Out of rerolls mid-loop: no choice to offer, force the accept.
            if rerolls_left == 0 && is_reroll {
                let left = self
                    .config
                    .max_points
                    .saturating_sub(state.points_spent(participant.id) + tier);
                self.send(&views::auto_accept_notice(
                    participant,
                    pick,
                    &name,
                    tier,
                    "🔒 0 re-rolls left",
                    left,
                ))
                .await?;
                state.record_pick(participant.id, &name, tier);
                info!(
                    "Forced accept for {} (0 rerolls left)",
                    participant.display_name
                );
                break;
            }

            let prompt = views::decision_prompt(
                participant,
                pick,
                state.round,
                &name,
                tier,
                points_left,
                rerolls_left,
                self.config.max_rerolls,
                self.config.decision_timeout.as_secs(),
            );
            let decision = self
                .messenger
                .prompt_decision(participant, &prompt, self.config.decision_timeout)
                .await
                .map_err(Self::delivery)?;
            if self.cancelled(state) {
                return Ok(TurnOutcome::Cancelled);
            }

            match decision {
                Decision::Reroll { by } => {
                    let used = state.record_reroll(participant.id, &name);
                    let left = self.config.max_rerolls.saturating_sub(used);
                    info!("{} hit reroll on {} ({} left)", by, name, left);
                    self.send(&views::reroll_notice(&by, left)).await?;
                    is_reroll = true;
                }
                Decision::Keep { by } => {
                    self.send(&views::keep_notice(Some(&by), &name)).await?;
                    state.record_pick(participant.id, &name, tier);
                    info!("{} kept by {} (explicit)", name, participant.display_name);
                    break;
                }
                Decision::TimedOut => {
                    self.send(&views::keep_notice(None, &name)).await?;
                    state.record_pick(participant.id, &name, tier);
                    info!("{} kept by {} (timeout)", name, participant.display_name);
                    break;
                }
            }
        }

        Ok(TurnOutcome::Continue)
    }

    /// The cosmetic misdirection beat. Returns `Some(Cancelled)` when
    /// cancellation lands during one of its waits; `None` means the turn
    /// continues (whether or not the bit actually fired).
    async fn play_fake_out(
        &mut self,
        state: &DraftState,
        participant: &Participant,
        pick: u32,
        is_reroll: bool,
        actual_name: &str,
        actual_tier: u32,
    ) -> Result<Option<TurnOutcome>, TurnError> {
        let Some((fake_name, fake_tier)) = engine::fake_candidate(
            &self.catalog,
            &self.config,
            state,
            participant.id,
            pick,
            is_reroll,
            &mut self.rng,
        ) else {
            return Ok(None);
        };

        info!(
            "Fake-out triggered: showing {} {} (T{}) instead of actual {} (T{})",
            participant.display_name, fake_name, fake_tier, actual_name, actual_tier
        );

        let msg = self
            .send(&views::fake_reveal(participant, &fake_name, fake_tier))
            .await?;
        sleep(FAKE_REVEAL_HOLD).await;
        if self.cancelled(state) {
            return Ok(Some(TurnOutcome::Cancelled));
        }

        self.edit(msg, &views::fake_spoiler(&fake_name, fake_tier))
            .await?;
        sleep(FAKE_SPOILER_HOLD).await;
        if self.cancelled(state) {
            return Ok(Some(TurnOutcome::Cancelled));
        }

        self.send(&views::fake_out_line()).await?;
        sleep(FAKE_LINE_HOLD).await;

        self.send(&views::fake_transition(participant)).await?;
        sleep(FAKE_TRANSITION_HOLD).await;
        if self.cancelled(state) {
            return Ok(Some(TurnOutcome::Cancelled));
        }

        Ok(None)
    }

    // -----------------------------------------------------------------------
    // Round completion and notifications
    // -----------------------------------------------------------------------

    async fn complete_draft(&mut self, state: &mut DraftState) -> Result<TurnOutcome, TurnError> {
        if !state.active {
            return Ok(TurnOutcome::Complete);
        }

        self.send(&views::final_banner()).await?;
        for page in views::summary_pages(state, &self.config) {
            self.send(&page).await?;
        }

        let recipients: Vec<Participant> = state
            .unique_participants()
            .into_iter()
            .filter(|p| !p.simulated)
            .cloned()
            .collect();
        for participant in &recipients {
            match self
                .messenger
                .send_direct(participant, &views::completion_dm(participant))
                .await
            {
                Ok(()) => debug!("Completion DM sent to {}", participant.display_name),
                Err(SendError::Forbidden) => warn!(
                    "Could not DM {} (DMs disabled)",
                    participant.display_name
                ),
                Err(e) => warn!("Failed to DM {}: {}", participant.display_name, e),
            }
            sleep(COMPLETION_DM_PACING).await;
        }

        state.active = false;
        info!("Draft complete - summary sent");
        Ok(TurnOutcome::Complete)
    }

    /// DM the participant exactly `ON_DECK_LOOKAHEAD` turns out. Skipped for
    /// simulated participants, for anyone also up in the next 1-2 turns
    /// (back-to-back snake turns), and for anyone out of rerolls. DM failures
    /// never affect the turn.
    async fn notify_on_deck(&self, state: &DraftState) {
        let upcoming = simulate_upcoming(state, self.config.total_picks, ON_DECK_LOOKAHEAD);
        if upcoming.len() < ON_DECK_LOOKAHEAD {
            return;
        }

        let target = &upcoming[ON_DECK_LOOKAHEAD - 1];
        let is_current = state
            .current_participant()
            .is_some_and(|p| p.id == target.id);
        let up_sooner = upcoming[..ON_DECK_LOOKAHEAD - 1]
            .iter()
            .any(|p| p.id == target.id);
        let has_rerolls = state.rerolls_used(target.id) < self.config.max_rerolls;

        if is_current || up_sooner || target.simulated || !has_rerolls {
            return;
        }

        match self
            .messenger
            .send_direct(target, &views::on_deck_dm(target))
            .await
        {
            Ok(()) => info!("Sent 3-turn warning DM to {}", target.display_name),
            Err(SendError::Forbidden) => {
                warn!("Could not DM {} (DMs disabled)", target.display_name)
            }
            Err(e) => warn!("Failed to DM {}: {}", target.display_name, e),
        }
    }

    async fn drain_admin_commands(&mut self, state: &mut DraftState) -> Result<(), TurnError> {
        while let Ok(cmd) = self.commands.try_recv() {
            match cmd {
                AdminCommand::ToggleMode => {
                    state.mode = state.mode.next();
                    info!("Mode switched to {}", state.mode.label());
                    if state.mode != DraftMode::AutoSilent {
                        self.send(&views::mode_switch_notice(state.mode)).await?;
                    }
                }
                AdminCommand::Summary => {
                    for page in views::summary_pages(state, &self.config) {
                        self.send(&page).await?;
                    }
                }
                AdminCommand::Cancel => {
                    info!("Session cancelled by admin command");
                    state.active = false;
                    self.cancel.cancel();
                }
            }
        }
        Ok(())
    }

    // -----------------------------------------------------------------------
    // Helpers
    // -----------------------------------------------------------------------

    fn cancelled(&self, state: &DraftState) -> bool {
        self.cancel.is_cancelled() || !state.active
    }

    async fn send(&self, content: &str) -> Result<MessageId, TurnError> {
        self.messenger.send(content).await.map_err(Self::delivery)
    }

    async fn edit(&self, id: MessageId, content: &str) -> Result<(), TurnError> {
        self.messenger
            .edit(id, content)
            .await
            .map_err(Self::delivery)
    }

    fn delivery(e: SendError) -> TurnError {
        match e {
            SendError::Transient(_) => TurnError::Delivery(e),
            other => TurnError::Unexpected(anyhow::Error::new(other)),
        }
    }
}

// ---------------------------------------------------------------------------
// Turn lookahead
// ---------------------------------------------------------------------------

/// Simulate the next `steps` turns, following snake reversals across round
/// boundaries, without touching the real state. Returns fewer entries when
/// the draft ends inside the window.
pub(crate) fn simulate_upcoming(
    state: &DraftState,
    total_picks: u32,
    steps: usize,
) -> Vec<Participant> {
    if state.order.is_empty() {
        return Vec::new();
    }

    let mut round = state.round;
    let mut idx = state.current_index;
    let mut reversed = false;
    let mut upcoming = Vec::new();

    for _ in 0..steps {
        idx += 1;
        if idx >= state.order.len() {
            round += 1;
            idx = 0;
            // The real order flips at every boundary; the simulation reads
            // the array backwards instead.
            reversed = !reversed;
        }
        if round <= total_picks {
            let participant = if reversed {
                &state.order[state.order.len() - 1 - idx]
            } else {
                &state.order[idx]
            };
            upcoming.push(participant.clone());
        }
    }

    upcoming
}

// ---------------------------------------------------------------------------
// Unit tests
// ---------------------------------------------------------------------------
