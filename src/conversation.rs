//! Client-side conversation controller
//!
//! Implements the Elm Architecture pattern: a pure transition function decides
//! what an event does, and the controller applies the resulting effects to the
//! transcript it owns.

mod controller;
mod effect;
pub mod event;
pub mod state;
pub(crate) mod transition;
mod transport;

#[cfg(test)]
mod proptests;
#[cfg(test)]
pub(crate) mod testing;

pub use controller::{Conversation, EXAMPLE_PROMPTS};
pub use effect::Effect;
pub use event::{Event, ExchangeOutcome};
pub use state::{ExchangeState, Message, MessageId, Role};
pub use transition::{
    transition, TransitionError, TransitionResult, EMPTY_REPLY_TEXT, REJECTED_TEXT,
    TRANSPORT_FAILURE_TEXT,
};
pub use transport::{ChatTransport, HttpTransport, TransportError};
