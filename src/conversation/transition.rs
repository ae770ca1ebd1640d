//! Pure state transition function

use super::{Effect, Event, ExchangeOutcome, ExchangeState};
use thiserror::Error;

/// Shown when the proxy answered 2xx without any text
pub const EMPTY_REPLY_TEXT: &str = "Got a response, but it was empty.";
/// Shown for any non-2xx status
pub const REJECTED_TEXT: &str = "Sorry, I couldn't process that. Please try again.";
/// Shown when no usable response arrived
pub const TRANSPORT_FAILURE_TEXT: &str = "Something went wrong while contacting the server.";

/// Result of a state transition
#[derive(Debug)]
pub struct TransitionResult {
    pub new_state: ExchangeState,
    pub effects: Vec<Effect>,
}

impl TransitionResult {
    #[must_use]
    pub fn new(state: ExchangeState) -> Self {
        Self {
            new_state: state,
            effects: vec![],
        }
    }

    #[must_use]
    pub fn with_effect(mut self, effect: Effect) -> Self {
        self.effects.push(effect);
        self
    }
}

/// Errors that can occur during transition
#[derive(Debug, Error, PartialEq, Eq)]
pub enum TransitionError {
    #[error("Nothing to send")]
    EmptyInput,
    #[error("An exchange is already in flight")]
    ExchangeInFlight,
    #[error("No exchange is in flight")]
    NoExchangeInFlight,
}

/// Pure transition function
///
/// Given the same inputs it always produces the same outputs, with no I/O.
///
/// # Errors
///
/// Returns [`TransitionError`] when the event is not valid in `state`: blank
/// input, a submission while pending, or a settlement while idle.
pub fn transition(
    state: &ExchangeState,
    event: Event,
) -> Result<TransitionResult, TransitionError> {
    match (state, event) {
        // Single flight: never queued, just dropped
        (ExchangeState::Pending { .. }, Event::Submit { .. }) => {
            Err(TransitionError::ExchangeInFlight)
        }

        // Idle + Submit -> Pending, user message appended before any I/O
        (ExchangeState::Idle, Event::Submit { text }) => {
            let trimmed = text.trim();
            if trimmed.is_empty() {
                return Err(TransitionError::EmptyInput);
            }
            Ok(TransitionResult::new(ExchangeState::Pending {
                input_text: trimmed.to_string(),
            })
            .with_effect(Effect::append_user(trimmed))
            .with_effect(Effect::SendRequest {
                message: trimmed.to_string(),
            }))
        }

        // Pending + Settled -> Idle, exactly one assistant message whatever happened
        (ExchangeState::Pending { .. }, Event::Settled(outcome)) => {
            Ok(TransitionResult::new(ExchangeState::Idle)
                .with_effect(Effect::append_assistant(reply_text(outcome))))
        }

        (ExchangeState::Idle, Event::Settled(_)) => Err(TransitionError::NoExchangeInFlight),
    }
}

/// Text of the assistant message for a settled exchange
fn reply_text(outcome: ExchangeOutcome) -> String {
    match outcome {
        ExchangeOutcome::Reply {
            message: Some(message),
        } if !message.trim().is_empty() => message,
        ExchangeOutcome::Reply { .. } => EMPTY_REPLY_TEXT.to_string(),
        ExchangeOutcome::Rejected { .. } => REJECTED_TEXT.to_string(),
        ExchangeOutcome::TransportFailed { .. } => TRANSPORT_FAILURE_TEXT.to_string(),
    }
}
