// Messaging collaborator seam.
//
// The chat platform itself is out of scope; the orchestrator only needs the
// operations below. Implementations own the mechanics of buttons and timers;
// the contract for the prompt methods is that exactly one of an explicit
// choice or a timeout resolves each wait, never both.

use std::time::Duration;

use async_trait::async_trait;
use thiserror::Error;
use tracing::info;

use crate::draft::state::Participant;

// ---------------------------------------------------------------------------
// Types
// ---------------------------------------------------------------------------

/// Opaque handle to a delivered message, usable for later edits/deletes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct MessageId(pub u64);

/// Outcome of the time-boxed roll confirmation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RollResponse {
    Confirmed,
    TimedOut,
}

/// Outcome of the time-boxed keep/reroll choice. A timeout is treated as an
/// implicit accept by the orchestrator.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Decision {
    Keep { by: String },
    Reroll { by: String },
    TimedOut,
}

#[derive(Debug, Error)]
pub enum SendError {
    /// Transient outbound failure (rate limit, dropped connection). The
    /// orchestrator retries the whole turn for these.
    #[error("transient delivery failure: {0}")]
    Transient(String),

    /// The recipient refuses direct messages. Logged and swallowed.
    #[error("recipient refuses messages")]
    Forbidden,

    /// Unrecoverable collaborator failure; halts the session loop.
    #[error("messaging failure: {0}")]
    Fatal(String),
}

// ---------------------------------------------------------------------------
// Trait
// ---------------------------------------------------------------------------

/// The outbound surface the orchestrator drives. All methods target the one
/// channel the session is bound to, except `send_direct`.
#[async_trait]
pub trait Messenger: Send + Sync {
    /// Post a message to the draft channel.
    async fn send(&self, content: &str) -> Result<MessageId, SendError>;

    /// Replace the content of a previously sent message.
    async fn edit(&self, id: MessageId, content: &str) -> Result<(), SendError>;

    /// Delete a previously sent message, optionally after a delay.
    async fn delete(&self, id: MessageId, delay: Option<Duration>) -> Result<(), SendError>;

    /// Show the roll confirmation affordance and wait for the participant
    /// (or a timeout).
    async fn prompt_roll(
        &self,
        participant: &Participant,
        content: &str,
        timeout: Duration,
    ) -> Result<RollResponse, SendError>;

    /// Show the keep/reroll choice and wait for the participant (or a
    /// timeout).
    async fn prompt_decision(
        &self,
        participant: &Participant,
        content: &str,
        timeout: Duration,
    ) -> Result<Decision, SendError>;

    /// Send a direct message to one participant.
    async fn send_direct(&self, participant: &Participant, content: &str)
        -> Result<(), SendError>;
}

// ---------------------------------------------------------------------------
// Console implementation
// ---------------------------------------------------------------------------

/// Messenger that prints to stdout. Prompts resolve as immediate timeouts
/// (there are no buttons on a terminal), which the orchestrator treats as
/// auto-proceed / implicit accept, so interactive sessions still complete.
#[derive(Debug, Default)]
pub struct ConsoleMessenger {
    counter: std::sync::atomic::AtomicU64,
}

impl ConsoleMessenger {
    pub fn new() -> Self {
        Self::default()
    }

    fn next_id(&self) -> MessageId {
        MessageId(
            self.counter
                .fetch_add(1, std::sync::atomic::Ordering::Relaxed),
        )
    }
}

#[async_trait]
impl Messenger for ConsoleMessenger {
    async fn send(&self, content: &str) -> Result<MessageId, SendError> {
        println!("{content}");
        Ok(self.next_id())
    }

    async fn edit(&self, _id: MessageId, content: &str) -> Result<(), SendError> {
        println!("{content}");
        Ok(())
    }

    async fn delete(&self, _id: MessageId, _delay: Option<Duration>) -> Result<(), SendError> {
        Ok(())
    }

    async fn prompt_roll(
        &self,
        _participant: &Participant,
        content: &str,
        _timeout: Duration,
    ) -> Result<RollResponse, SendError> {
        println!("{content}");
        Ok(RollResponse::TimedOut)
    }

    async fn prompt_decision(
        &self,
        _participant: &Participant,
        content: &str,
        _timeout: Duration,
    ) -> Result<Decision, SendError> {
        println!("{content}");
        Ok(Decision::TimedOut)
    }

    async fn send_direct(
        &self,
        participant: &Participant,
        content: &str,
    ) -> Result<(), SendError> {
        info!("DM to {}: {}", participant.display_name, content);
        Ok(())
    }
}
