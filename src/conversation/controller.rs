//! Conversation controller: owns the transcript and the single-flight lock

use super::transition::{transition, TransitionError};
use super::{ChatTransport, Effect, Event, ExchangeOutcome, ExchangeState, Message};
use crate::api::ChatRequest;

/// Prompts offered before the first exchange
pub const EXAMPLE_PROMPTS: [&str; 3] = [
    "explain quantum physics to me",
    "what is the purpose of personal finances",
    "what would it take for me to go to space",
];

/// Ordered transcript plus the state of the (at most one) in-flight exchange
#[derive(Debug, Default)]
pub struct Conversation {
    transcript: Vec<Message>,
    state: ExchangeState,
    draft: String,
}

impl Conversation {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn transcript(&self) -> &[Message] {
        &self.transcript
    }

    #[must_use]
    pub fn state(&self) -> &ExchangeState {
        &self.state
    }

    #[must_use]
    pub fn is_pending(&self) -> bool {
        self.state.is_pending()
    }

    /// Nothing has been sent yet
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.transcript.is_empty() && !self.is_pending()
    }

    #[must_use]
    pub fn draft(&self) -> &str {
        &self.draft
    }

    pub fn set_draft(&mut self, text: impl Into<String>) {
        self.draft = text.into();
    }

    /// Accept a submission if possible.
    ///
    /// On acceptance the user message is already in the transcript and the
    /// returned request must be sent, then passed back through [`Self::settle`].
    /// Blank text and submissions while pending are silently dropped.
    #[must_use]
    pub fn begin(&mut self, text: &str) -> Option<ChatRequest> {
        match self.apply(Event::Submit {
            text: text.to_string(),
        }) {
            Ok(request) => request,
            Err(e) => {
                tracing::debug!(reason = %e, "Submission ignored");
                None
            }
        }
    }

    /// Finish the pending exchange, appending exactly one assistant message
    ///
    /// # Errors
    ///
    /// Returns [`TransitionError::NoExchangeInFlight`] if nothing is pending.
    pub fn settle(&mut self, outcome: ExchangeOutcome) -> Result<&Message, TransitionError> {
        if let ExchangeOutcome::TransportFailed { reason } = &outcome {
            tracing::warn!(%reason, "Exchange failed before reaching a response");
        }
        self.apply(Event::Settled(outcome))?;
        self.transcript
            .last()
            .ok_or(TransitionError::NoExchangeInFlight)
    }

    /// Run one full exchange. Returns whether the submission was accepted.
    ///
    /// Once accepted, the exchange always settles, so the controller is idle
    /// again when this returns.
    pub async fn submit<T>(&mut self, transport: &T, text: &str) -> bool
    where
        T: ChatTransport + ?Sized,
    {
        let Some(request) = self.begin(text) else {
            return false;
        };

        let outcome = ExchangeOutcome::from(transport.send(&request).await);
        if let Err(e) = self.settle(outcome) {
            tracing::error!(error = %e, "Exchange settled in unexpected state");
        }
        true
    }

    /// Submit the current draft, clearing it only if it was accepted
    pub async fn submit_draft<T>(&mut self, transport: &T) -> bool
    where
        T: ChatTransport + ?Sized,
    {
        let text = self.draft.clone();
        let accepted = self.submit(transport, &text).await;
        if accepted {
            self.draft.clear();
        }
        accepted
    }

    /// Submit one of [`EXAMPLE_PROMPTS`]; the draft is left alone
    pub async fn submit_example<T>(&mut self, transport: &T, index: usize) -> bool
    where
        T: ChatTransport + ?Sized,
    {
        match EXAMPLE_PROMPTS.get(index) {
            Some(prompt) => self.submit(transport, prompt).await,
            None => false,
        }
    }

    /// Apply a transition, executing transcript effects and handing back any request to send
    fn apply(&mut self, event: Event) -> Result<Option<ChatRequest>, TransitionError> {
        let result = transition(&self.state, event)?;
        self.state = result.new_state;

        let mut request = None;
        for effect in result.effects {
            match effect {
                Effect::AppendMessage { role, text } => {
                    self.transcript.push(Message::new(role, text));
                }
                Effect::SendRequest { message } => {
                    request = Some(ChatRequest::new(message));
                }
            }
        }
        Ok(request)
    }
}
