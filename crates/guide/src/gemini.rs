//! Native client for the Gemini `generateContent` REST API.
//!
//! Request/response mapping only: no caching, no retry. Every failure
//! becomes a typed [`GatewayError`] that the gateway resolves to the
//! apology string.

use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::chat::Role;
use crate::gateway::{
    BoxFuture, Citation, GatewayError, GenerateApi, GenerateRequest, Generation,
};
use crate::persona::MODEL_ID;

const DEFAULT_ENDPOINT: &str = "https://generativelanguage.googleapis.com/v1beta";

/// Bounds the otherwise-unbounded wait on a hung remote call.
const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

pub struct GeminiApi {
    client: reqwest::Client,
    endpoint: String,
    model: String,
    api_key: Option<String>,
}

impl GeminiApi {
    /// A missing credential is logged but not fatal: the app keeps
    /// running and calls fail at call time instead.
    pub fn new(api_key: Option<String>, model: impl Into<String>) -> Self {
        if api_key.is_none() {
            tracing::warn!("GEMINI_API_KEY is not set; guide requests will fail until it is");
        }
        Self {
            client: reqwest::Client::new(),
            endpoint: DEFAULT_ENDPOINT.to_string(),
            model: model.into(),
            api_key,
        }
    }

    /// Configuration from the environment: `GEMINI_API_KEY` and an
    /// optional `GEMINI_MODEL` override.
    pub fn from_env() -> Self {
        let api_key = std::env::var("GEMINI_API_KEY")
            .ok()
            .filter(|key| !key.is_empty());
        let model = std::env::var("GEMINI_MODEL").unwrap_or_else(|_| MODEL_ID.to_string());
        Self::new(api_key, model)
    }

    pub fn with_endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.endpoint = endpoint.into();
        self
    }
}

impl GenerateApi for GeminiApi {
    fn generate(&self, request: GenerateRequest) -> BoxFuture<'_, Result<Generation, GatewayError>> {
        Box::pin(async move {
            let key = self
                .api_key
                .as_deref()
                .ok_or(GatewayError::MissingCredential)?;
            let url = format!(
                "{}/models/{}:generateContent",
                self.endpoint.trim_end_matches('/'),
                self.model
            );

            let response = self
                .client
                .post(&url)
                .query(&[("key", key)])
                .timeout(REQUEST_TIMEOUT)
                .json(&encode_request(&request))
                .send()
                .await
                .map_err(|e| GatewayError::Http(e.to_string()))?;

            if !response.status().is_success() {
                return Err(GatewayError::Status(response.status().as_u16()));
            }

            let payload: GenerateContentResponse = response
                .json()
                .await
                .map_err(|e| GatewayError::MalformedResponse(e.to_string()))?;
            Ok(decode_response(payload))
        })
    }
}

// --- wire format ---

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerateContentRequest {
    contents: Vec<Content>,
    system_instruction: Content,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    tools: Vec<Tool>,
}

#[derive(Debug, Serialize)]
struct Content {
    #[serde(skip_serializing_if = "Option::is_none")]
    role: Option<&'static str>,
    parts: Vec<Part>,
}

#[derive(Debug, Serialize)]
struct Part {
    text: String,
}

#[derive(Debug, Serialize)]
struct Tool {
    #[serde(rename = "googleSearch")]
    google_search: SearchTool,
}

#[derive(Debug, Serialize)]
struct SearchTool {}

#[derive(Debug, Deserialize)]
struct GenerateContentResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct Candidate {
    content: Option<CandidateContent>,
    grounding_metadata: Option<GroundingMetadata>,
}

#[derive(Debug, Deserialize)]
struct CandidateContent {
    #[serde(default)]
    parts: Vec<CandidatePart>,
}

#[derive(Debug, Deserialize)]
struct CandidatePart {
    text: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct GroundingMetadata {
    #[serde(default)]
    grounding_chunks: Vec<GroundingChunk>,
}

#[derive(Debug, Deserialize)]
struct GroundingChunk {
    web: Option<WebSource>,
}

#[derive(Debug, Deserialize)]
struct WebSource {
    uri: Option<String>,
    title: Option<String>,
}

fn role_name(role: Role) -> &'static str {
    match role {
        Role::User => "user",
        Role::Model => "model",
    }
}

fn encode_request(request: &GenerateRequest) -> GenerateContentRequest {
    let contents = request
        .turns
        .iter()
        .map(|turn| Content {
            role: Some(role_name(turn.role)),
            parts: vec![Part {
                text: turn.text.clone(),
            }],
        })
        .collect();

    let tools = if request.enable_search {
        vec![Tool {
            google_search: SearchTool {},
        }]
    } else {
        Vec::new()
    };

    GenerateContentRequest {
        contents,
        system_instruction: Content {
            role: None,
            parts: vec![Part {
                text: request.system_instruction.clone(),
            }],
        },
        tools,
    }
}

fn decode_response(payload: GenerateContentResponse) -> Generation {
    let Some(candidate) = payload.candidates.into_iter().next() else {
        return Generation::default();
    };

    let text = candidate
        .content
        .map(|content| {
            content
                .parts
                .into_iter()
                .filter_map(|part| part.text)
                .collect::<Vec<_>>()
                .join("")
        })
        .unwrap_or_default();

    let citations = candidate
        .grounding_metadata
        .map(|metadata| {
            metadata
                .grounding_chunks
                .into_iter()
                .filter_map(|chunk| chunk.web)
                .filter_map(|web| {
                    let uri = web.uri.filter(|uri| !uri.is_empty())?;
                    let title = web.title.unwrap_or_else(|| uri.clone());
                    Some(Citation { title, uri })
                })
                .collect()
        })
        .unwrap_or_default();

    Generation { text, citations }
}

#[cfg(test)]
mod tests {
    use super::{GeminiApi, decode_response, encode_request};
    use crate::chat::{Role, Turn};
    use crate::gateway::{Citation, GenerateApi, GenerateRequest};
    use pretty_assertions::assert_eq;

    fn request() -> GenerateRequest {
        GenerateRequest {
            system_instruction: "be a guide".to_string(),
            turns: vec![
                Turn {
                    role: Role::Model,
                    text: "welcome".to_string(),
                },
                Turn {
                    role: Role::User,
                    text: "what's good?".to_string(),
                },
            ],
            enable_search: true,
        }
    }

    #[test]
    fn encodes_the_expected_wire_shape() {
        let encoded = serde_json::to_value(encode_request(&request())).unwrap();

        assert_eq!(
            encoded["contents"],
            serde_json::json!([
                {"role": "model", "parts": [{"text": "welcome"}]},
                {"role": "user", "parts": [{"text": "what's good?"}]}
            ])
        );
        assert_eq!(
            encoded["systemInstruction"]["parts"][0]["text"],
            serde_json::json!("be a guide")
        );
        assert_eq!(encoded["tools"], serde_json::json!([{"googleSearch": {}}]));
    }

    #[test]
    fn search_tool_is_omitted_when_disabled() {
        let mut r = request();
        r.enable_search = false;
        let encoded = serde_json::to_value(encode_request(&r)).unwrap();
        assert!(encoded.get("tools").is_none());
    }

    #[test]
    fn decodes_a_grounded_response() {
        let payload = serde_json::from_str(
            r#"{
                "candidates": [{
                    "content": {
                        "role": "model",
                        "parts": [{"text": "Pink granite, "}, {"text": "since 1888."}]
                    },
                    "groundingMetadata": {
                        "groundingChunks": [
                            {"web": {"uri": "http://a", "title": "A"}},
                            {"web": {"uri": "http://b"}},
                            {"web": {"title": "no link"}}
                        ]
                    }
                }]
            }"#,
        )
        .unwrap();

        let generation = decode_response(payload);
        assert_eq!(generation.text, "Pink granite, since 1888.");
        assert_eq!(
            generation.citations,
            vec![
                Citation {
                    title: "A".to_string(),
                    uri: "http://a".to_string(),
                },
                Citation {
                    title: "http://b".to_string(),
                    uri: "http://b".to_string(),
                },
            ]
        );
    }

    #[test]
    fn empty_candidates_decode_to_the_default_generation() {
        let payload = serde_json::from_str(r#"{"candidates": []}"#).unwrap();
        let generation = decode_response(payload);
        assert_eq!(generation.text, "");
        assert!(generation.citations.is_empty());
    }

    #[tokio::test]
    async fn missing_credential_fails_at_call_time() {
        let api = GeminiApi::new(None, "test-model");
        let err = api.generate(request()).await.unwrap_err();
        assert_eq!(err, crate::gateway::GatewayError::MissingCredential);
    }
}
