use catalog::LandmarkRecord;
use serde::{Deserialize, Serialize};

use crate::persona::WELCOME_MESSAGE;

#[derive(Debug, Copy, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    User,
    Model,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatMessage {
    pub role: Role,
    pub text: String,
}

/// One prior conversation turn, as handed to the gateway.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Turn {
    pub role: Role,
    pub text: String,
}

/// A request the controller has issued but the app has not resolved
/// yet. The ticket identifies it; a reply for a stale ticket is
/// discarded.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PendingPrompt {
    pub ticket: u64,
    pub prompt: String,
    pub history: Vec<Turn>,
}

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
enum Phase {
    Idle,
    AwaitingResponse { ticket: u64 },
}

/// Conversation state machine.
///
/// Two phases: `Idle` and `AwaitingResponse`. The transcript is
/// append-only; the loading indicator derives from the phase. The
/// controller is synchronous — issuing returns a [`PendingPrompt`]
/// that the app dispatches through the gateway, then feeds back via
/// [`ChatController::resolve`].
///
/// Guards:
/// - submits are accepted only while `Idle`; empty input is rejected
/// - a landmark selection cancels-and-replaces any outstanding
///   request by invalidating its ticket
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChatController {
    messages: Vec<ChatMessage>,
    phase: Phase,
    next_ticket: u64,
}

impl ChatController {
    pub fn new() -> Self {
        Self {
            messages: vec![ChatMessage {
                role: Role::Model,
                text: WELCOME_MESSAGE.to_string(),
            }],
            phase: Phase::Idle,
            next_ticket: 0,
        }
    }

    pub fn messages(&self) -> &[ChatMessage] {
        &self.messages
    }

    /// True iff a gateway call is outstanding; the UI loading
    /// indicator mirrors this.
    pub fn is_awaiting(&self) -> bool {
        matches!(self.phase, Phase::AwaitingResponse { .. })
    }

    /// A landmark was selected: append the synthetic user turn and
    /// issue a context request. Selecting the same landmark twice in a
    /// row issues a duplicate request on purpose; selecting while a
    /// request is outstanding replaces it.
    pub fn select_landmark(&mut self, record: &LandmarkRecord) -> PendingPrompt {
        self.messages.push(ChatMessage {
            role: Role::User,
            text: format!("Tell me about {}", record.name),
        });

        let prompt = format!(
            "The user has clicked on {} ({}) in the 3D map. {}",
            record.name,
            record.kind.as_str(),
            record.description
        );
        let ticket = self.issue();
        PendingPrompt {
            ticket,
            prompt,
            history: Vec::new(),
        }
    }

    /// A free-text send. Returns `None` (with no state change) for
    /// empty/whitespace input or while a request is outstanding.
    pub fn submit(&mut self, input: &str) -> Option<PendingPrompt> {
        let text = input.trim();
        if text.is_empty() || self.is_awaiting() {
            return None;
        }

        // History is the transcript as it stood before this message.
        let history: Vec<Turn> = self
            .messages
            .iter()
            .map(|m| Turn {
                role: m.role,
                text: m.text.clone(),
            })
            .collect();

        self.messages.push(ChatMessage {
            role: Role::User,
            text: text.to_string(),
        });

        let ticket = self.issue();
        Some(PendingPrompt {
            ticket,
            prompt: text.to_string(),
            history,
        })
    }

    /// Feed a gateway reply back. Appends exactly one model message
    /// and returns to `Idle` when the ticket is current; a stale
    /// ticket is a no-op and returns `false`.
    pub fn resolve(&mut self, ticket: u64, text: impl Into<String>) -> bool {
        match self.phase {
            Phase::AwaitingResponse { ticket: current } if current == ticket => {
                self.messages.push(ChatMessage {
                    role: Role::Model,
                    text: text.into(),
                });
                self.phase = Phase::Idle;
                true
            }
            _ => false,
        }
    }

    fn issue(&mut self) -> u64 {
        let ticket = self.next_ticket;
        self.next_ticket += 1;
        self.phase = Phase::AwaitingResponse { ticket };
        ticket
    }
}

impl Default for ChatController {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::{ChatController, Role};
    use crate::persona::{FALLBACK_REPLY, WELCOME_MESSAGE};
    use catalog::{LandmarkKind, LandmarkRecord};
    use pretty_assertions::assert_eq;

    fn capitol() -> LandmarkRecord {
        LandmarkRecord {
            id: "capitol".to_string(),
            name: "Texas State Capitol".to_string(),
            description: "The seat of government of the American state of Texas.".to_string(),
            position: [0.0, 0.0, -10.0],
            kind: LandmarkKind::Building,
            scale: Some([4.0, 6.0, 4.0]),
            color: Some("#E57373".to_string()),
        }
    }

    #[test]
    fn starts_idle_with_the_welcome_message() {
        let chat = ChatController::new();
        assert!(!chat.is_awaiting());
        assert_eq!(chat.messages().len(), 1);
        assert_eq!(chat.messages()[0].role, Role::Model);
        assert_eq!(chat.messages()[0].text, WELCOME_MESSAGE);
    }

    #[test]
    fn submit_appends_one_user_message_and_awaits() {
        let mut chat = ChatController::new();
        let pending = chat.submit("what should I eat?").unwrap();

        assert!(chat.is_awaiting());
        assert_eq!(chat.messages().len(), 2);
        assert_eq!(chat.messages()[1].role, Role::User);
        assert_eq!(chat.messages()[1].text, "what should I eat?");

        // History excludes the message just appended.
        assert_eq!(pending.history.len(), 1);
        assert_eq!(pending.history[0].text, WELCOME_MESSAGE);
        assert_eq!(pending.prompt, "what should I eat?");
    }

    #[test]
    fn resolve_appends_one_model_message_and_returns_to_idle() {
        let mut chat = ChatController::new();
        let pending = chat.submit("hi").unwrap();

        assert!(chat.resolve(pending.ticket, "Howdy!"));
        assert!(!chat.is_awaiting());
        assert_eq!(chat.messages().len(), 3);
        assert_eq!(chat.messages()[2].role, Role::Model);
        assert_eq!(chat.messages()[2].text, "Howdy!");
    }

    #[test]
    fn empty_or_whitespace_input_is_rejected_without_state_change() {
        let mut chat = ChatController::new();
        assert_eq!(chat.submit(""), None);
        assert_eq!(chat.submit("   \t"), None);
        assert!(!chat.is_awaiting());
        assert_eq!(chat.messages().len(), 1);
    }

    #[test]
    fn send_while_awaiting_is_ignored() {
        let mut chat = ChatController::new();
        let first = chat.submit("first").unwrap();
        assert_eq!(chat.submit("second"), None);
        assert_eq!(chat.messages().len(), 2);

        assert!(chat.resolve(first.ticket, "reply"));
        assert!(chat.submit("second").is_some());
    }

    #[test]
    fn selection_issues_a_context_request() {
        let mut chat = ChatController::new();
        let pending = chat.select_landmark(&capitol());

        assert!(chat.is_awaiting());
        assert_eq!(
            chat.messages()[1].text,
            "Tell me about Texas State Capitol"
        );
        assert_eq!(
            pending.prompt,
            "The user has clicked on Texas State Capitol (building) in the 3D map. \
             The seat of government of the American state of Texas."
        );
        assert!(pending.history.is_empty());
    }

    #[test]
    fn selecting_the_same_landmark_twice_issues_twice() {
        let mut chat = ChatController::new();
        let a = chat.select_landmark(&capitol());
        let b = chat.select_landmark(&capitol());
        assert_ne!(a.ticket, b.ticket);
        // Both synthetic user turns are in the transcript.
        assert_eq!(chat.messages().len(), 3);
    }

    #[test]
    fn selection_cancels_and_replaces_an_outstanding_request() {
        let mut chat = ChatController::new();
        let stale = chat.submit("tell me things").unwrap();
        let fresh = chat.select_landmark(&capitol());

        // The late reply for the replaced request is discarded.
        assert!(!chat.resolve(stale.ticket, "late reply"));
        assert!(chat.is_awaiting());

        assert!(chat.resolve(fresh.ticket, "context reply"));
        assert!(!chat.is_awaiting());
        let texts: Vec<_> = chat.messages().iter().map(|m| m.text.as_str()).collect();
        assert!(!texts.contains(&"late reply"));
        assert!(texts.contains(&"context reply"));
    }

    #[test]
    fn a_failure_reply_still_clears_the_loading_flag() {
        let mut chat = ChatController::new();
        let pending = chat.submit("hello?").unwrap();
        assert!(chat.resolve(pending.ticket, FALLBACK_REPLY));
        assert!(!chat.is_awaiting());
        assert_eq!(chat.messages().last().unwrap().text, FALLBACK_REPLY);
    }
}
