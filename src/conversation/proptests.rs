//! Property-based tests for the conversation controller
//!
//! These tests verify key invariants hold across arbitrary call sequences.

use super::*;
use proptest::prelude::*;

// ============================================================================
// Arbitrary Generators
// ============================================================================

#[derive(Debug, Clone)]
enum Action {
    Submit(String),
    Settle(ExchangeOutcome),
}

fn arb_text() -> impl Strategy<Value = String> {
    prop_oneof![
        "[a-zA-Z ?]{1,40}",
        Just(String::new()),
        "[ \t\n]{1,5}",
    ]
}

fn arb_outcome() -> impl Strategy<Value = ExchangeOutcome> {
    prop_oneof![
        proptest::option::of("[a-zA-Z .]{0,40}")
            .prop_map(|message| ExchangeOutcome::Reply { message }),
        (400u16..600).prop_map(|status| ExchangeOutcome::Rejected { status }),
        "[a-z ]{1,20}".prop_map(|reason| ExchangeOutcome::TransportFailed { reason }),
    ]
}

fn arb_action() -> impl Strategy<Value = Action> {
    prop_oneof![
        arb_text().prop_map(Action::Submit),
        arb_outcome().prop_map(Action::Settle),
    ]
}

fn count(conversation: &Conversation, role: Role) -> usize {
    conversation
        .transcript()
        .iter()
        .filter(|m| m.role() == role)
        .count()
}

// ============================================================================
// Property Tests
// ============================================================================

proptest! {
    #[test]
    fn prop_transcript_is_append_only(actions in proptest::collection::vec(arb_action(), 0..30)) {
        let mut conversation = Conversation::new();

        for action in actions {
            let before: Vec<MessageId> = conversation.transcript().iter().map(Message::id).collect();

            match action {
                Action::Submit(text) => { let _ = conversation.begin(&text); }
                Action::Settle(outcome) => { let _ = conversation.settle(outcome); }
            }

            let after: Vec<MessageId> = conversation.transcript().iter().map(Message::id).collect();
            prop_assert!(after.len() >= before.len());
            prop_assert_eq!(&after[..before.len()], &before[..]);
        }
    }

    #[test]
    fn prop_one_reply_per_accepted_submission(actions in proptest::collection::vec(arb_action(), 0..30)) {
        let mut conversation = Conversation::new();

        for action in actions {
            match action {
                Action::Submit(text) => { let _ = conversation.begin(&text); }
                Action::Settle(outcome) => { let _ = conversation.settle(outcome); }
            }

            let users = count(&conversation, Role::User);
            let assistants = count(&conversation, Role::Assistant);
            let outstanding = usize::from(conversation.is_pending());
            prop_assert_eq!(users, assistants + outstanding);
        }
    }

    #[test]
    fn prop_pending_rejects_submissions(
        first in "[a-zA-Z]{1,20}",
        others in proptest::collection::vec(arb_text(), 1..10),
    ) {
        let mut conversation = Conversation::new();
        prop_assert!(conversation.begin(&first).is_some());
        let snapshot = conversation.transcript().to_vec();
        let state = conversation.state().clone();

        for text in others {
            prop_assert!(conversation.begin(&text).is_none());
            prop_assert_eq!(conversation.transcript(), &snapshot[..]);
            prop_assert_eq!(conversation.state(), &state);
        }
    }

    #[test]
    fn prop_settle_restores_idle(text in "[a-zA-Z]{1,20}", outcome in arb_outcome()) {
        let mut conversation = Conversation::new();
        prop_assert!(conversation.begin(&text).is_some());

        let reply = conversation.settle(outcome).map(|m| (m.role(), m.text().to_string()));
        prop_assert!(reply.is_ok());
        let (role, reply_text) = reply.unwrap();
        prop_assert_eq!(role, Role::Assistant);
        prop_assert!(!reply_text.trim().is_empty(), "Empty chat bubble");

        prop_assert_eq!(conversation.state(), &ExchangeState::Idle);
        prop_assert!(conversation.begin("next").is_some());
    }

    #[test]
    fn prop_user_text_is_trimmed(text in "[ \t]{0,3}[a-zA-Z][a-zA-Z ]{0,20}[ \t\n]{0,3}") {
        let mut conversation = Conversation::new();
        let request = conversation.begin(&text);
        prop_assert_eq!(request.map(|r| r.message), Some(text.trim().to_string()));
        prop_assert_eq!(conversation.transcript()[0].text(), text.trim());
    }
}
