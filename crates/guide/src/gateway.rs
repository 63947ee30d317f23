use std::future::Future;
use std::pin::Pin;

use crate::chat::{Role, Turn};
use crate::persona::{EMPTY_REPLY, FALLBACK_REPLY, SYSTEM_INSTRUCTION};

/// Type alias for a boxed future that can be sent between threads.
pub type BoxFuture<'a, T> = Pin<Box<dyn Future<Output = T> + Send + 'a>>;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GatewayError {
    MissingCredential,
    Http(String),
    Status(u16),
    MalformedResponse(String),
}

impl std::fmt::Display for GatewayError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            GatewayError::MissingCredential => write!(f, "generation API credential is not set"),
            GatewayError::Http(msg) => write!(f, "generation request failed: {msg}"),
            GatewayError::Status(code) => write!(f, "generation API returned status {code}"),
            GatewayError::MalformedResponse(msg) => {
                write!(f, "generation API payload malformed: {msg}")
            }
        }
    }
}

impl std::error::Error for GatewayError {}

/// A grounding source returned by the remote capability.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Citation {
    pub title: String,
    pub uri: String,
}

/// Raw generation result before display formatting.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Generation {
    pub text: String,
    pub citations: Vec<Citation>,
}

/// Assembled request for the remote generation capability: the fixed
/// system instruction, history turns verbatim in order, and the new
/// prompt as the final user turn.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GenerateRequest {
    pub system_instruction: String,
    pub turns: Vec<Turn>,
    pub enable_search: bool,
}

/// The remote generation capability.
///
/// Implementations must be dyn-compatible; methods return boxed
/// futures.
pub trait GenerateApi: Send + Sync {
    fn generate(&self, request: GenerateRequest) -> BoxFuture<'_, Result<Generation, GatewayError>>;
}

/// Stateless wrapper around the generation capability.
///
/// [`GuideGateway::reply`] never fails from the caller's point of
/// view: every error is logged here and resolved to the fixed apology
/// string, so the orchestrator needs no failure handling of its own.
pub struct GuideGateway<A> {
    api: A,
}

impl<A: GenerateApi> GuideGateway<A> {
    pub fn new(api: A) -> Self {
        Self { api }
    }

    pub async fn reply(&self, prompt: &str, history: &[Turn]) -> String {
        let request = build_request(prompt, history);
        match self.api.generate(request).await {
            Ok(generation) => render_reply(generation),
            Err(err) => {
                tracing::error!("guide generation failed: {err}");
                FALLBACK_REPLY.to_string()
            }
        }
    }
}

fn build_request(prompt: &str, history: &[Turn]) -> GenerateRequest {
    let mut turns = history.to_vec();
    turns.push(Turn {
        role: Role::User,
        text: prompt.to_string(),
    });
    GenerateRequest {
        system_instruction: SYSTEM_INSTRUCTION.to_string(),
        turns,
        enable_search: true,
    }
}

/// Append the "Sources:" line when at least one citation has a
/// resolvable link.
fn render_reply(generation: Generation) -> String {
    let mut text = if generation.text.is_empty() {
        EMPTY_REPLY.to_string()
    } else {
        generation.text
    };

    let sources: Vec<String> = generation
        .citations
        .iter()
        .filter(|c| !c.uri.is_empty())
        .map(|c| {
            let title = if c.title.is_empty() { &c.uri } else { &c.title };
            format!("[{}]({})", title, c.uri)
        })
        .collect();

    if !sources.is_empty() {
        text.push_str("\n\nSources: ");
        text.push_str(&sources.join(", "));
    }
    text
}
