//! Port for structured transcript logging.
//!
//! Defines the [`ConversationLogger`] trait for recording auction events
//! (submitted proposals, scores, winners, feedback) to a structured log.
//!
//! This is separate from `tracing`-based operation logs: tracing handles
//! human-readable diagnostic messages, while this port captures the full
//! transcript of a run in a machine-readable format (JSONL).

use serde_json::Value;

/// A structured transcript event for logging.
///
/// Each event has a type string and a JSON payload containing
/// event-specific fields. The logger adds the timestamp.
#[derive(Debug, Clone)]
pub struct ConversationEvent {
    /// Event type identifier (e.g., "proposal_submitted", "winner_selected").
    pub event_type: &'static str,
    /// JSON payload with event-specific data.
    pub payload: Value,
}

impl ConversationEvent {
    pub fn new(event_type: &'static str, payload: Value) -> Self {
        Self {
            event_type,
            payload,
        }
    }
}

/// Port for logging transcript events to a structured log.
///
/// Implementations write each event as a single record (e.g., one JSONL line).
/// The `log` method is synchronous and infallible so that logging never
/// disrupts a stage; write failures are dropped by the implementation.
pub trait ConversationLogger: Send + Sync {
    /// Record a transcript event.
    fn log(&self, event: ConversationEvent);
}

/// No-op implementation for tests and when logging is disabled.
pub struct NoConversationLogger;

impl ConversationLogger for NoConversationLogger {
    fn log(&self, _event: ConversationEvent) {}
}

/// Event type identifiers written by the stage use cases
pub mod events {
    pub const STAGE_STARTED: &str = "stage_started";
    pub const PROPOSAL_SUBMITTED: &str = "proposal_submitted";
    pub const PROPOSAL_SCORED: &str = "proposal_scored";
    pub const WINNER_SELECTED: &str = "winner_selected";
    pub const FEEDBACK_ISSUED: &str = "feedback_issued";
    pub const NO_WINNER: &str = "no_winner";
    pub const STAGE_COMPLETED: &str = "stage_completed";
}
