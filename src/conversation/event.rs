//! Events that can occur in a conversation

/// Events that trigger state transitions
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Event {
    /// The user asked to send some text
    Submit { text: String },
    /// The in-flight network call finished, one way or another
    Settled(ExchangeOutcome),
}

/// How an exchange ended, as far as the client can tell
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ExchangeOutcome {
    /// 2xx with a parsed body; `message` may be absent
    Reply { message: Option<String> },
    /// Non-2xx status. The proxy's own error text is deliberately dropped.
    Rejected { status: u16 },
    /// No usable response at all
    TransportFailed { reason: String },
}
